use std::path::PathBuf;

use clap::Args;
use sorted_core::config::SortedConfig;
use sorted_core::models::media::MediaKind;

#[derive(Args)]
pub struct CreateArgs {
    /// Title of the collection; becomes the file name
    title: String,
    /// Directory to create the collection in (default: configured collections dir)
    #[arg(long)]
    dir: Option<PathBuf>,
    /// Media kind the collection holds
    #[arg(long, default_value = "videos")]
    kind: String,
    /// Optional free-text description
    #[arg(long)]
    description: Option<String>,
    /// Overwrite an existing file with the same title
    #[arg(long)]
    force: bool,
    /// Fail instead of creating missing parent directories
    #[arg(long)]
    no_parents: bool,
}

pub fn run(args: CreateArgs) -> anyhow::Result<()> {
    let config = SortedConfig::load()?;
    let directory = args.dir.unwrap_or(config.collections_dir);
    let kind: MediaKind = args.kind.parse().map_err(|e: String| anyhow::anyhow!(e))?;

    let file = sorted_store::create_collection(
        &args.title,
        &directory,
        Some(kind),
        args.description,
        args.force,
        !args.no_parents,
    )?;

    println!("Collection '{}' created at {}", args.title, file.display());
    Ok(())
}
