use std::path::PathBuf;

use clap::Args;
use comfy_table::Table;

use sorted_core::config::SortedConfig;
use sorted_core::models::entry::EntryLocator;
use sorted_core::time;

#[derive(Args)]
pub struct ListArgs {
    /// Root directory to scan for collections (default: configured collections dir)
    #[arg(long)]
    root: Option<PathBuf>,
    /// Show the entries of this collection instead of the collection listing
    #[arg(long)]
    entries: Option<PathBuf>,
}

pub fn run(args: ListArgs) -> anyhow::Result<()> {
    if let Some(file) = args.entries {
        return list_entries(file);
    }

    let config = SortedConfig::load()?;
    let root = args.root.unwrap_or(config.collections_dir);

    let files = sorted_store::lookup::list_collection_files(&root);
    if files.is_empty() {
        println!("No collections under {}. Use `sorted create` to make one.", root.display());
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["TITLE", "TYPE", "ENTRIES", "LAST MODIFIED"]);

    let mut listed = 0usize;
    for file in &files {
        // deep-invalid files are reported by the read path and skipped
        let Some(collection) = sorted_store::read_collection(file)? else {
            continue;
        };
        listed += 1;

        let title = sorted_store::lookup::collection_title(file).unwrap_or("?");
        let kind = collection
            .kind
            .map(|k| k.to_string())
            .unwrap_or_else(|| "—".to_string());
        let modified = collection
            .last_modified_at
            .map(|dt| dt.format(time::FORMAT).to_string())
            .unwrap_or_else(|| "never".to_string());

        table.add_row(vec![
            title.to_string(),
            kind,
            collection.entry_count().to_string(),
            modified,
        ]);
    }

    println!("{table}");
    println!("\n{listed} collections under {}", root.display());
    Ok(())
}

fn list_entries(file: PathBuf) -> anyhow::Result<()> {
    let config = SortedConfig::load()?;
    let cache = sorted_cache::MetadataCache::new(config.cache_dir);

    let collection = sorted_store::read_collection(&file)?
        .ok_or_else(|| anyhow::anyhow!("not a valid collection: {}", file.display()))?;

    if collection.entries.is_empty() {
        println!("Collection is empty");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "TYPE", "REFERENCE", "TITLE", "INSERTED"]);

    for entry in &collection.entries {
        let reference = match &entry.locator {
            EntryLocator::Web { url } => url.clone(),
            EntryLocator::Service { service_metadata } => format!(
                "{}:{}",
                service_metadata.service_name, service_metadata.resolvable_id
            ),
        };

        // titles come from the cache only; listing never hits the network
        let title = entry
            .service_metadata()
            .and_then(|sm| cache.lookup(sm, entry.kind).ok().flatten())
            .and_then(|record| {
                record
                    .get("title")
                    .and_then(|t| t.as_str())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| "—".to_string());

        table.add_row(vec![
            entry.id.to_string(),
            entry.kind.to_string(),
            reference,
            title,
            entry.inserted_at.format(time::FORMAT).to_string(),
        ]);
    }

    println!("{table}");
    println!("\n{} entries", collection.entry_count());
    Ok(())
}
