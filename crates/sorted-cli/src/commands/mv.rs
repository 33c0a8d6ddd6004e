use std::path::PathBuf;

use clap::Args;

use sorted_core::config::SortedConfig;
use sorted_core::models::entry::EntryId;
use sorted_ops::moves::{move_entry, MoveOutcome};

#[derive(Args)]
pub struct MoveArgs {
    /// Collection file the entry currently lives in
    src: PathBuf,
    /// Collection file to move the entry into
    dest: PathBuf,
    /// Internal id of the entry to move
    entry_id: String,
    /// Skip the duplicate check at the destination
    #[arg(long)]
    allow_duplicates: bool,
    /// Create the destination collection if it does not exist
    #[arg(long)]
    ensure_dest: bool,
}

pub fn run(args: MoveArgs) -> anyhow::Result<()> {
    let config = SortedConfig::load()?;
    let entry_id: EntryId = args
        .entry_id
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;

    let outcome = move_entry(
        &args.src,
        &args.dest,
        &entry_id,
        !args.allow_duplicates,
        args.ensure_dest,
        config.type_strict_dedup,
    )?;

    match outcome {
        MoveOutcome::Moved => println!(
            "Moved {entry_id} from {} to {}",
            args.src.display(),
            args.dest.display()
        ),
        MoveOutcome::SameCollection => {
            println!("Source and destination are the same collection; nothing moved")
        }
        MoveOutcome::DuplicateAtDestination => {
            println!("Already present at the destination; source left untouched")
        }
    }
    Ok(())
}
