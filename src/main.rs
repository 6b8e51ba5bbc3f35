//! quakemap - compose interactive earthquake maps from USGS GeoJSON feeds.
//!
//! Fetches the rolling earthquake feeds and the tectonic plate boundary
//! file, encodes magnitude as color and radius, and emits the composed,
//! toggleable map either as a document on stdout or as a served web page.

use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::error;

mod classify;
mod cli;
mod client;
mod errors;
mod layers;
mod legend;
mod map;
mod models;
mod output;
mod pipeline;
mod server;
mod style;

use cli::{Cli, Command};
use client::FeedClient;
use map::MapOptions;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity
    init_tracing(cli.verbose, cli.quiet);

    match cli.command {
        Command::Render(args) => cmd_render(args),
        Command::Serve(args) => cmd_serve(args),
    }
}

/// Initialize tracing subscriber.
fn init_tracing(verbose: bool, quiet: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// Resolve the Mapbox access token: flag first, then environment.
fn resolve_access_token(arg: Option<String>) -> String {
    if let Some(token) = arg.or_else(|| std::env::var("MAPBOX_ACCESS_TOKEN").ok()) {
        return token;
    }
    tracing::warn!("no access token configured; basemap tiles will not load");
    String::new()
}

/// Execute the `render` command - one-shot fetch and compose.
fn cmd_render(args: cli::RenderArgs) -> Result<()> {
    let options = MapOptions {
        window: args.window,
        access_token: resolve_access_token(args.access_token),
    };

    let runtime = tokio::runtime::Runtime::new().context("failed to create tokio runtime")?;
    let document = runtime.block_on(async {
        let client = FeedClient::new().context("failed to create feed client")?;
        Ok::<_, anyhow::Error>(map::build_map(&client, &options).await)
    })?;

    // Write output
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    output::write_document(&mut handle, &document, args.format)?;
    handle.flush()?;

    Ok(())
}

/// Execute the `serve` command - start the web view.
fn cmd_serve(args: cli::ServeArgs) -> Result<()> {
    let config = server::ServerConfig {
        port: args.port,
        host: args.host.clone(),
        options: MapOptions {
            window: args.window,
            access_token: resolve_access_token(args.access_token),
        },
    };

    let url = format!("http://{}:{}", args.host, args.port);
    println!("\x1b[1mquakemap\x1b[0m");
    println!("\x1b[2m───────────────────────────────────────\x1b[0m");
    println!("  Local:   \x1b[96m{url}\x1b[0m");
    println!("  Window:  {}", args.window.as_str());
    println!("\x1b[2m───────────────────────────────────────\x1b[0m");
    println!("\x1b[2mPress Ctrl+C to stop\x1b[0m\n");

    // Open browser if requested (using xdg-open/open command)
    if args.open {
        #[cfg(target_os = "linux")]
        let _ = std::process::Command::new("xdg-open").arg(&url).spawn();
        #[cfg(target_os = "macos")]
        let _ = std::process::Command::new("open").arg(&url).spawn();
        #[cfg(target_os = "windows")]
        let _ = std::process::Command::new("cmd").args(["/c", "start", &url]).spawn();
    }

    // Run the async server on tokio runtime
    tokio::runtime::Runtime::new()
        .context("failed to create tokio runtime")?
        .block_on(server::run_server(config))
}
