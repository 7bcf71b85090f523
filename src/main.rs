mod cli;

use anyhow::{Context, bail};
use clap::Parser;
use cli::{Cli, Commands, InitArgs, ViolationsArgs};
use dtrack_violations::{Client, Config, HttpTransport, PolicyViolation, render};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const EXIT_FAILURE: i32 = 1;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so stdout carries only the report
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&cli.log_level))
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Init(args) => init(&args),
        Commands::Violations(args) => violations(&args).await,
    };

    if let Err(e) = result {
        error!("{:#}", e);
        std::process::exit(EXIT_FAILURE);
    }
}

fn init(args: &InitArgs) -> anyhow::Result<()> {
    if std::path::Path::new(&args.config).exists() && !args.r#override {
        bail!(
            "Config file {} already exists (use --override to replace it)",
            args.config
        );
    }
    let content = Config::default().to_toml()?;
    std::fs::write(&args.config, content)
        .with_context(|| format!("Failed to write config file {}", args.config))?;
    info!("Wrote {}", args.config);
    Ok(())
}

async fn violations(args: &ViolationsArgs) -> anyhow::Result<()> {
    let config = Config::load(&args.config, &args.config_overrides)
        .with_context(|| format!("Failed to load config {}", args.config))?;
    info!("Using Dependency-Track at {}", config.server.base_url);

    let transport = HttpTransport::from_config(&config, &args.api_key)?;
    let client = Client::new(transport)
        .page_size(config.http.page_size)
        .max_pages(config.http.max_pages);

    let violations = match args.page {
        Some(page) => {
            let page_size = args.page_size.unwrap_or(config.http.page_size);
            client
                .violations(args.suppressed, page, page_size)
                .await
                .with_context(|| format!("Failed to fetch violations page {}", page))?
        }
        None => client
            .all_violations(args.suppressed)
            .await
            .context("Failed to fetch violations")?,
    };
    info!("Found {} violations", violations.len());

    match &args.output {
        Some(path) => write_output(path, &violations),
        None => {
            println!("{}", render::format_text(&violations));
            Ok(())
        }
    }
}

fn write_output(path: &str, violations: &[PolicyViolation]) -> anyhow::Result<()> {
    let content = if path.ends_with(".json") {
        render::format_json(violations)?
    } else if path.ends_with(".md") {
        render::format_markdown(violations)
    } else {
        bail!("Output file must end with .md or .json");
    };

    std::fs::write(path, content).with_context(|| format!("Failed to write output file {}", path))?;
    info!("Wrote {}", path);
    Ok(())
}
