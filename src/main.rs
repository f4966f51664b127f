#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::style)]

use clap::Parser;
use splitbox::cli::Args;
use splitbox::generator::Generator;
use tracing::Level;

fn main() {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            Level::TRACE
        } else {
            Level::INFO
        })
        .init();

    if let Err(e) = run(&args) {
        tracing::error!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    tracing::info!("Loading node list from: {}", args.input);

    let generator = Generator::new(&args.input, &args.output, args.start_port);
    let summary = generator.run()?;

    tracing::info!(
        "{} written, start port: {}, {} nodes",
        args.output,
        summary.start_port,
        summary.node_count
    );
    Ok(())
}
