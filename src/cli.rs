//! Command-line interface definitions.
//!
//! Uses clap derive API for argument parsing.

use clap::{Parser, Subcommand};

use crate::client::Window;
use crate::output::Format;

/// Compose interactive earthquake maps from USGS GeoJSON feeds.
#[derive(Parser, Debug)]
#[command(name = "quakemap")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Command to run
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose debug logging
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(long, global = true)]
    pub quiet: bool,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch the feeds once and write the composed map document
    Render(RenderArgs),

    /// Serve the composed map as a full-page web view
    Serve(ServeArgs),
}

/// Arguments for the `render` command.
#[derive(Parser, Debug)]
pub struct RenderArgs {
    /// Rolling window for the earthquake feeds
    #[arg(long, default_value = "week", value_parser = parse_window)]
    pub window: Window,

    /// Mapbox access token for basemap tile URLs
    /// (falls back to $MAPBOX_ACCESS_TOKEN)
    #[arg(long)]
    pub access_token: Option<String>,

    /// Output format
    #[arg(long, short = 'f', default_value = "human", value_parser = parse_format)]
    pub format: Format,
}

/// Arguments for the `serve` command.
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(long, short = 'p', default_value = "8080")]
    pub port: u16,

    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Rolling window for the earthquake feeds
    #[arg(long, default_value = "week", value_parser = parse_window)]
    pub window: Window,

    /// Mapbox access token for basemap tile URLs
    /// (falls back to $MAPBOX_ACCESS_TOKEN)
    #[arg(long)]
    pub access_token: Option<String>,

    /// Open browser automatically
    #[arg(long)]
    pub open: bool,
}

/// Parse a feed window from string.
fn parse_window(s: &str) -> Result<Window, String> {
    s.parse()
}

/// Parse an output format from string.
fn parse_format(s: &str) -> Result<Format, String> {
    s.parse()
}
