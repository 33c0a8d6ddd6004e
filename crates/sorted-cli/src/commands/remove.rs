use std::path::PathBuf;

use clap::Args;

use sorted_core::models::entry::EntryId;
use sorted_ops::entries::{remove_entry, RemoveOutcome};

#[derive(Args)]
pub struct RemoveArgs {
    /// Collection file to remove from
    collection: PathBuf,
    /// Internal ids of the entries to remove
    #[arg(required = true)]
    entry_ids: Vec<String>,
}

pub fn run(args: RemoveArgs) -> anyhow::Result<()> {
    for raw_id in &args.entry_ids {
        let entry_id: EntryId = raw_id.parse().map_err(|e: String| anyhow::anyhow!(e))?;

        match remove_entry(&args.collection, &entry_id)? {
            RemoveOutcome::Removed(_) => println!("Removed {entry_id}"),
            RemoveOutcome::NotFound => println!("Not found: {entry_id}"),
        }
    }
    Ok(())
}
