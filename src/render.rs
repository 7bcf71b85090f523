use std::collections::BTreeMap;

use crate::types::{PolicyViolation, Project};

/// Shown in place of an analysis state for violations nobody has triaged
const NOT_ANALYZED: &str = "NOT_SET";

/// Format violations as Markdown, one section per project in first-seen order
pub fn format_markdown(violations: &[PolicyViolation]) -> String {
    if violations.is_empty() {
        return "No violations found".to_string();
    }

    let mut output = String::new();
    for (project, group) in group_by_project(violations) {
        output.push_str(&format!("# {} {}\n\n", project.name, project.version));
        output.push_str(&format!("- UUID: `{}`\n", project.uuid));
        if let Some(imported) = project.last_bom_import.get() {
            output.push_str(&format!("- Last BOM import: {}\n", imported.to_rfc3339()));
        }
        let m = &project.metrics;
        output.push_str(&format!(
            "- Findings: {} critical, {} high, {} medium, {} low, {} unassigned (risk score {})\n\n",
            m.critical, m.high, m.medium, m.low, m.unassigned, m.inherited_risk_score
        ));

        for violation in group {
            output.push_str(&format!("- {}\n", describe(violation)));
        }
        output.push('\n');
    }
    output.trim_end().to_string()
}

/// Format violations as one line each, followed by a count per violation type
pub fn format_text(violations: &[PolicyViolation]) -> String {
    let mut output = String::new();
    let mut by_type: BTreeMap<&str, usize> = BTreeMap::new();

    for violation in violations {
        *by_type.entry(violation.violation_type.as_str()).or_default() += 1;
        output.push_str(&format!(
            "{}@{}: {}\n",
            violation.project.name,
            violation.project.version,
            describe(violation)
        ));
    }

    let counts: Vec<String> = by_type
        .iter()
        .map(|(kind, count)| format!("{}: {}", kind, count))
        .collect();
    if counts.is_empty() {
        output.push_str("Total: 0");
    } else {
        output.push_str(&format!(
            "Total: {} ({})",
            violations.len(),
            counts.join(", ")
        ));
    }
    output
}

pub fn format_json(violations: &[PolicyViolation]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(violations)
}

fn describe(violation: &PolicyViolation) -> String {
    let state = violation
        .analysis
        .as_ref()
        .map_or(NOT_ANALYZED, |a| a.analysis_state.as_str());
    let suppressed = if violation.is_suppressed() {
        " (suppressed)"
    } else {
        ""
    };
    format!(
        "[{}] {} - analysis: {}{}",
        violation.violation_type, violation.policy_condition.policy.violation_state, state, suppressed
    )
}

fn group_by_project(violations: &[PolicyViolation]) -> Vec<(&Project, Vec<&PolicyViolation>)> {
    let mut groups: Vec<(&Project, Vec<&PolicyViolation>)> = Vec::new();
    for violation in violations {
        match groups
            .iter_mut()
            .find(|(project, _)| project.uuid == violation.project.uuid)
        {
            Some((_, group)) => group.push(violation),
            None => groups.push((&violation.project, vec![violation])),
        }
    }
    groups
}
