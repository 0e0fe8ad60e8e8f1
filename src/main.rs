mod app;
mod graph;
mod image_source;
mod source;
mod util;

use std::sync::Arc;

use anyhow::{Context, anyhow};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::image_source::ImageDirectory;
use crate::source::Location;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Graph description with image nodes, positions and weighted edges
    graph: String,

    /// Image file names, one per line; line order defines image indices
    list: String,

    /// Directory or URL prefix holding the preview images
    images: String,

    /// Print a JSON summary of the parsed graph instead of opening a window
    #[arg(long)]
    report: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    #[arg(long, default_value_t = 1300.0)]
    width: f32,

    #[arg(long, default_value_t = 800.0)]
    height: f32,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .init();

    let inputs = app::Inputs {
        graph: Location::parse(&args.graph),
        list: Location::parse(&args.list),
    };

    if args.report {
        let graph = graph::load_graph(&inputs.graph, &inputs.list)
            .with_context(|| format!("failed to load graph {}", inputs.graph))?;
        let report = serde_json::to_string_pretty(&graph.report())
            .context("failed to serialize graph report")?;
        println!("{report}");
        return Ok(());
    }

    let images = Arc::new(ImageDirectory::new(Location::parse(&args.images)));
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([args.width, args.height]),
        ..Default::default()
    };

    eframe::run_native(
        "simgraph-viewer",
        options,
        Box::new(move |cc| Ok(Box::new(app::GraphViewerApp::new(cc, inputs, images)))),
    )
    .map_err(|error| anyhow!("viewer window failed: {error}"))
}
