//! nucled — control the ring and power LEDs of Intel NUC computers.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

use clap::Parser;

mod cli;

/// Shared shutdown flag — cleared by the Ctrl+C / SIGTERM handler.
pub static RUNNING: AtomicBool = AtomicBool::new(true);

#[derive(Parser)]
#[command(
    name = "nucled",
    version,
    about = "Control LEDs of Intel NUC computers"
)]
struct Args {
    /// Control the ring LED (default)
    #[arg(long, global = true, conflicts_with = "power")]
    ring: bool,

    /// Control the power LED
    #[arg(long, global = true)]
    power: bool,

    /// LED control file (overrides the config file)
    #[arg(long, global = true)]
    device: Option<PathBuf>,

    /// Alternate config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output as JSON (for status, brightness, color, effect, config)
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<cli::Command>,
}

fn main() {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .format_target(false)
        .init();

    ctrlc::set_handler(move || {
        RUNNING.store(false, Ordering::SeqCst);
    })
    .ok();

    let opts = cli::GlobalOpts {
        ring: args.ring,
        power: args.power,
        device: args.device,
        config: args.config,
        json: args.json,
    };

    if let Err(e) = cli::run(args.command.unwrap_or(cli::Command::Status), &opts) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
