use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueHint, builder::BoolishValueParser};

/// Command-line arguments for the storefront-blocks binary.
#[derive(Debug, Parser)]
#[command(
    name = "storefront-blocks",
    version,
    about = "Render storefront landing pages from block documents"
)]
pub struct CliArgs {
    /// Optional path to a configuration file.
    #[arg(
        long = "config-file",
        env = "STOREFRONT_BLOCKS_CONFIG_FILE",
        value_name = "PATH",
        value_hint = ValueHint::FilePath,
        global = true
    )]
    pub config_file: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: GlobalOverrides,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Render a landing page document (JSON or TOML) to HTML.
    Render(RenderArgs),
    /// List registered template slugs grouped by renderer.
    Templates(TemplatesArgs),
}

#[derive(Debug, Args, Clone)]
pub struct RenderArgs {
    /// Landing page document; `.toml` files are read as TOML, anything else as JSON.
    #[arg(value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub file: PathBuf,

    /// Write the result to this path instead of stdout.
    #[arg(long, short = 'o', value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Emit only the concatenated block markup, without the document shell.
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub fragment: bool,
}

#[derive(Debug, Args, Default, Clone)]
pub struct TemplatesArgs {
    /// Print the listing as JSON.
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub json: bool,
}

#[derive(Debug, Args, Default, Clone)]
pub struct GlobalOverrides {
    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new(),
        global = true
    )]
    pub log_json: Option<bool>,

    /// Toggle sanitising of interpolated fallback markup.
    #[arg(
        long = "sanitize-fallback",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new(),
        global = true
    )]
    pub sanitize_fallback: Option<bool>,

    /// Override the class carried by every block wrapper.
    #[arg(long = "wrapper-class", value_name = "CLASS", global = true)]
    pub wrapper_class: Option<String>,
}
