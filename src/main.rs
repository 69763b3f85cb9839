// Entry point for the `property-client` command line tool.
// The lib.rs file is the public API; this binary only wires arguments to commands.

use std::path::PathBuf;

use anyhow::Context;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use property_client_lib::commands::{compress_paths, list_presets, resolve_date_range};
use property_client_lib::{Compressor, PartialCompressionOptions};

#[derive(Parser, Debug)]
#[command(name = "property-client", version, about = "Report periods and pre-upload photo compression")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve a report period preset (this_month, last_quarter, ...) to dates
    Range {
        preset: String,
        /// Reference date, defaults to today
        #[arg(long)]
        today: Option<NaiveDate>,
    },
    /// List period presets with their current ranges
    Presets {
        #[arg(long)]
        today: Option<NaiveDate>,
    },
    /// Compress JPEG/PNG photos into an output directory
    Compress {
        #[arg(required = true)]
        files: Vec<PathBuf>,
        #[arg(long, short)]
        out_dir: PathBuf,
        #[arg(long)]
        max_size_mb: Option<f64>,
        #[arg(long)]
        max_width_or_height: Option<u32>,
        /// Encoder quality in (0.0, 1.0]
        #[arg(long)]
        quality: Option<f32>,
        /// Encode on the async task instead of the blocking pool
        #[arg(long)]
        inline: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_target(false)
        // stdout carries the JSON output
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let cli = Cli::parse();
    debug!("{:?}", cli.command);

    match cli.command {
        Command::Range { preset, today } => {
            let range = resolve_date_range(&preset, today);
            println!("{}", serde_json::to_string_pretty(&range)?);
        }
        Command::Presets { today } => {
            let today = today.unwrap_or_else(|| Local::now().date_naive());
            println!("{}", serde_json::to_string_pretty(&list_presets(today))?);
        }
        Command::Compress { files, out_dir, max_size_mb, max_width_or_height, quality, inline } => {
            let options = PartialCompressionOptions {
                max_size_mb,
                max_width_or_height,
                use_web_worker: inline.then_some(false),
                quality,
            };
            info!("Compressing {} files into {}", files.len(), out_dir.display());

            let report = compress_paths(&Compressor::default(), &files, &out_dir, options)
                .await
                .context("compression failed")?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}
