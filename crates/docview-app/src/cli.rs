use std::path::PathBuf;

use clap::Parser;

/// docview: a native document viewer around an embedded web renderer.
#[derive(Parser, Debug)]
#[command(name = "docview", version, about)]
pub struct Args {
    /// Document to open.
    #[arg(required_unless_present = "write_config")]
    pub document: Option<PathBuf>,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level override (trace, debug, info, warn, error, or a filter directive).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Directory holding the renderer bundle (`index.html` and friends).
    #[arg(long)]
    pub assets: Option<PathBuf>,

    /// Text to search for with F3 / Shift+F3.
    #[arg(long, value_name = "TEXT")]
    pub find: Option<String>,

    /// Run the load protocol without a window and print the scripts that
    /// would reach the renderer.
    #[arg(long)]
    pub headless: bool,

    /// Write the effective settings to the config file and exit.
    #[arg(long)]
    pub write_config: bool,
}

pub fn parse() -> Args {
    Args::parse()
}
