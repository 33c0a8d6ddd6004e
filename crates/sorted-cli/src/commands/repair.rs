use std::path::PathBuf;

use clap::Args;

use sorted_core::config::SortedConfig;
use sorted_ops::repair::collapse_duplicates;

#[derive(Args)]
pub struct RepairArgs {
    /// Collection file to repair
    collection: PathBuf,
}

pub fn run(args: RepairArgs) -> anyhow::Result<()> {
    let config = SortedConfig::load()?;
    let dropped = collapse_duplicates(&args.collection, config.type_strict_dedup)?;

    if dropped == 0 {
        println!("No duplicates in {}", args.collection.display());
    } else {
        println!("Collapsed {dropped} duplicate entries in {}", args.collection.display());
    }
    Ok(())
}
