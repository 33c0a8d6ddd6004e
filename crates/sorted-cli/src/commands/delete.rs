use std::path::PathBuf;

use clap::Args;

use sorted_core::config::SortedConfig;

#[derive(Args)]
pub struct DeleteArgs {
    /// Collection file to delete
    collection: PathBuf,
    /// Unlink permanently instead of moving to the trash directory
    #[arg(long)]
    permanent: bool,
}

pub fn run(args: DeleteArgs) -> anyhow::Result<()> {
    if args.permanent {
        if sorted_store::trash::delete_permanently(&args.collection)? {
            println!("Deleted {}", args.collection.display());
        } else {
            println!("Nothing to delete at {}", args.collection.display());
        }
        return Ok(());
    }

    let config = SortedConfig::load()?;
    match sorted_store::trash::move_to_trash(&args.collection, &config.trash_dir)? {
        Some(rested) => println!(
            "Moved {} to trash ({})",
            args.collection.display(),
            rested.display()
        ),
        None => println!("Nothing to delete at {}", args.collection.display()),
    }
    Ok(())
}
