use clap::{Parser, Subcommand};

// Display order for API key option (placed at top of help text)
const API_KEY_DISPLAY_ORDER: usize = 0;
// Display order for log level option (placed at end of help text)
const LOG_LEVEL_DISPLAY_ORDER: usize = 100;

/// CLI arguments
#[derive(Parser)]
#[command(name = "dtrack-violations", version, about = "List Dependency-Track policy violations", long_about = None)]
pub struct Cli {
    /// Log level (see https://docs.rs/tracing-subscriber/latest/tracing_subscriber/filter/struct.EnvFilter.html)
    /// [env: DTRACK_LOG=] [default: info]
    #[arg(
        long,
        env = "DTRACK_LOG",
        default_value = "info",
        global = true,
        hide_default_value = true,
        hide_env = true,
        display_order = LOG_LEVEL_DISPLAY_ORDER,
        verbatim_doc_comment
    )]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a default dtrack.toml config file
    Init(InitArgs),
    /// List policy violations
    Violations(ViolationsArgs),
}

/// Arguments for the init command
#[derive(Parser)]
pub struct InitArgs {
    /// Path to config file
    #[arg(long, default_value = "dtrack.toml")]
    pub config: String,

    /// Override existing config file
    #[arg(long)]
    pub r#override: bool,
}

/// Arguments for the violations command
#[derive(Parser, Debug)]
pub struct ViolationsArgs {
    /// Path to config file (initialize with `dtrack-violations init`)
    #[arg(long, default_value = "dtrack.toml")]
    pub config: String,

    /// Override config values using dot notation (e.g. http.page_size=50)
    #[arg(long = "config-override")]
    pub config_overrides: Vec<String>,

    /// Dependency-Track API key
    #[arg(long, env = "DTRACK_API_KEY", hide_env_values = true, display_order = API_KEY_DISPLAY_ORDER)]
    pub api_key: String,

    /// List suppressed violations instead of active ones
    #[arg(long)]
    pub suppressed: bool,

    /// Fetch only this page (1-based) instead of all pages
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub page: Option<u32>,

    /// Page size for --page [default: http.page_size from config]
    #[arg(long, requires = "page", value_parser = clap::value_parser!(u32).range(1..))]
    pub page_size: Option<u32>,

    /// Output file path (.md or .json)
    #[arg(long)]
    pub output: Option<String>,
}
