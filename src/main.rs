//! Kill Counter - Binary Entry Point
//!
//! Reads host events from stdin and writes broadcasts and replies to stdout.
//! Logs go to stderr; set `RUST_LOG` to change the level.

use std::io::{self, BufWriter};
use std::path::PathBuf;

use clap::Parser;
use log::{error, info};

use kill_counter::config::{DEFAULT_LEADERBOARD_SIZE, DEFAULT_TRACKED_ENTITY};
use kill_counter::persistence::DEFAULT_FILE_NAME;
use kill_counter::{BridgeConfig, HostBridge, JsonFileSlot, SlotConfig, StoreResult};

/// Command line arguments
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    /// Directory holding the save slot
    #[clap(short, long, env = "KILL_COUNTER_DATA_DIR", default_value = "data")]
    data_dir: PathBuf,
    /// File name of the save slot
    #[clap(short, long, env = "KILL_COUNTER_FILE", default_value = DEFAULT_FILE_NAME)]
    file: String,
    /// Entity-code substring counted as a kill
    #[clap(short, long, env = "KILL_COUNTER_TRACKED", default_value = DEFAULT_TRACKED_ENTITY)]
    tracked: String,
    /// Rows in the leaderboard listing
    #[clap(long, env = "KILL_COUNTER_TOP", default_value_t = DEFAULT_LEADERBOARD_SIZE)]
    top: usize,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if let Err(e) = run(args) {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> StoreResult<()> {
    let slot = JsonFileSlot::new(SlotConfig::new(&args.data_dir).with_file_name(args.file));
    slot.cleanup()?;

    let config = BridgeConfig::new(args.tracked).with_leaderboard_size(args.top);
    // A corrupted save stops the bridge here instead of being overwritten.
    let mut bridge = HostBridge::open(slot, config)?;
    info!(
        "Tracking '{}' kills in {}",
        bridge.config().tracked_entity,
        bridge.slot().config().state_path().display()
    );

    let stdin = io::stdin();
    bridge.run(stdin.lock(), BufWriter::new(io::stdout()))
}
