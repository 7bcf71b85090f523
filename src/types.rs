use serde::{Deserialize, Serialize};

use crate::time::Time;

/// A detected breach of a security, license or operational policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyViolation {
    /// Triage result; `None` when the violation has not been analyzed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<ViolationAnalysis>,
    pub policy_condition: PolicyCondition,
    pub project: Project,
    /// Violation category, e.g. "SECURITY", "LICENSE" or "OPERATIONAL"
    #[serde(rename = "type")]
    pub violation_type: String,
}

impl PolicyViolation {
    /// Whether a reviewer marked this violation as suppressed
    pub fn is_suppressed(&self) -> bool {
        self.analysis.as_ref().is_some_and(|a| a.is_suppressed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViolationAnalysis {
    /// e.g. "APPROVED", "REJECTED", "NOT_SET"
    pub analysis_state: String,
    #[serde(default)]
    pub is_suppressed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyCondition {
    pub policy: Policy,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Policy {
    /// Severity of the policy, e.g. "INFO", "WARN" or "FAIL"
    pub violation_state: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub name: String,
    /// Empty for unversioned projects
    #[serde(default)]
    pub version: String,
    pub active: bool,
    #[serde(default)]
    pub last_bom_import: Time,
    /// All zero when the server has not computed metrics yet
    #[serde(default)]
    pub metrics: ProjectMetrics,
    pub uuid: String,
}

/// Finding counts by severity, missing counts decode as zero
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectMetrics {
    pub critical: u32,
    pub high: u32,
    pub low: u32,
    pub medium: u32,
    pub unassigned: u32,
    pub inherited_risk_score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    const ANALYZED: &str = r#"
    {
      "analysis": {
        "analysisState": "APPROVED",
        "isSuppressed": true
      },
      "policyCondition": {
        "policy": {
          "violationState": "WARN"
        }
      },
      "project": {
        "name": "foo",
        "version": "bar",
        "active": true,
        "lastBomImport": 1700000000,
        "metrics": {
          "critical": 0,
          "high": 1,
          "low": 2,
          "medium": 3,
          "unassigned": 4,
          "inheritedRiskScore": 1240
        },
        "uuid": "fd1b10b9-678d-4af9-ad8e-877d1f357b03"
      },
      "type": "SECURITY"
    }"#;

    const UNANALYZED: &str = r#"
    {
      "policyCondition": {
        "policy": {
          "violationState": "WARN"
        }
      },
      "project": {
        "name": "bar",
        "version": "foo",
        "active": false,
        "metrics": {
          "critical": 50,
          "high": 25,
          "low": 12,
          "medium": 6,
          "unassigned": 3,
          "inheritedRiskScore": 2560.26
        },
        "uuid": "9b9a702a-a8b4-49fb-bb99-c05c1a8c8d49"
      },
      "type": "LICENSE"
    }"#;

    #[test]
    fn test_decode_analyzed_violation() {
        let v: PolicyViolation = serde_json::from_str(ANALYZED).unwrap();
        assert_eq!(
            v,
            PolicyViolation {
                analysis: Some(ViolationAnalysis {
                    analysis_state: "APPROVED".into(),
                    is_suppressed: true,
                }),
                policy_condition: PolicyCondition {
                    policy: Policy {
                        violation_state: "WARN".into(),
                    },
                },
                project: Project {
                    name: "foo".into(),
                    version: "bar".into(),
                    active: true,
                    last_bom_import: Time::from_unix(1_700_000_000).unwrap(),
                    metrics: ProjectMetrics {
                        critical: 0,
                        high: 1,
                        low: 2,
                        medium: 3,
                        unassigned: 4,
                        inherited_risk_score: 1240.0,
                    },
                    uuid: "fd1b10b9-678d-4af9-ad8e-877d1f357b03".into(),
                },
                violation_type: "SECURITY".into(),
            }
        );
        assert!(v.is_suppressed());
    }

    #[test]
    fn test_decode_unanalyzed_violation() {
        let v: PolicyViolation = serde_json::from_str(UNANALYZED).unwrap();
        assert_eq!(v.analysis, None);
        assert!(!v.is_suppressed());
        assert!(v.project.last_bom_import.is_zero());
        assert_eq!(v.project.metrics.inherited_risk_score, 2560.26);
        assert_eq!(v.violation_type, "LICENSE");
    }

    #[test]
    fn test_decode_null_analysis_and_timestamp() {
        let mut value: serde_json::Value = serde_json::from_str(UNANALYZED).unwrap();
        value["analysis"] = serde_json::Value::Null;
        value["project"]["lastBomImport"] = serde_json::Value::Null;
        let v: PolicyViolation = serde_json::from_value(value).unwrap();
        assert_eq!(v.analysis, None);
        assert!(v.project.last_bom_import.is_zero());
    }

    #[test]
    fn test_decode_ignores_unknown_fields() {
        let mut value: serde_json::Value = serde_json::from_str(ANALYZED).unwrap();
        value["uuid"] = "0d3ba1c2-7e3f-4a55-9a57-0f2b8f9e0c11".into();
        value["timestamp"] = 1_700_000_123_000u64.into();
        value["project"]["classifier"] = "APPLICATION".into();
        value["project"]["metrics"]["policyViolationsTotal"] = 7.into();
        value["policyCondition"]["policy"]["name"] = "No GPL".into();
        let v: PolicyViolation = serde_json::from_value(value).unwrap();
        assert_eq!(v.project.name, "foo");
        assert_eq!(v.policy_condition.policy.violation_state, "WARN");
    }

    #[test]
    fn test_decode_tolerates_omitted_fields() {
        let v: PolicyViolation = serde_json::from_str(
            r#"{
              "analysis": { "analysisState": "NOT_SET" },
              "policyCondition": { "policy": { "violationState": "INFO" } },
              "project": { "name": "unversioned", "active": true, "uuid": "u" },
              "type": "LICENSE"
            }"#,
        )
        .unwrap();
        let analysis = v.analysis.as_ref().unwrap();
        assert_eq!(analysis.analysis_state, "NOT_SET");
        assert!(!analysis.is_suppressed);
        assert_eq!(v.project.version, "");
        assert!(v.project.last_bom_import.is_zero());
        assert_eq!(v.project.metrics, ProjectMetrics::default());
    }

    #[test]
    fn test_decode_partial_metrics() {
        let mut value: serde_json::Value = serde_json::from_str(ANALYZED).unwrap();
        value["project"]["metrics"] = serde_json::json!({ "high": 7 });
        let v: PolicyViolation = serde_json::from_value(value).unwrap();
        assert_eq!(v.project.metrics.high, 7);
        assert_eq!(v.project.metrics.critical, 0);
        assert_eq!(v.project.metrics.inherited_risk_score, 0.0);
    }

    #[test]
    fn test_decode_missing_project_fails() {
        let mut value: serde_json::Value = serde_json::from_str(ANALYZED).unwrap();
        value.as_object_mut().unwrap().remove("project");
        assert!(serde_json::from_value::<PolicyViolation>(value).is_err());
    }

    #[test]
    fn test_serialize_omits_absent_analysis() {
        let v: PolicyViolation = serde_json::from_str(UNANALYZED).unwrap();
        let json = serde_json::to_value(&v).unwrap();
        assert!(json.get("analysis").is_none());
        assert_eq!(json["type"], "LICENSE");
        assert!(json["project"]["lastBomImport"].is_null());
    }
}
