use std::path::PathBuf;

use clap::Args;
use tracing::warn;

use sorted_core::config::SortedConfig;
use sorted_core::models::entry::EntryPayload;
use sorted_core::models::media::MediaKind;
use sorted_core::models::service::{ServiceKind, ServiceMetadata};
use sorted_ops::entries::{insert_entry, InsertOutcome};

#[derive(Args)]
pub struct InsertArgs {
    /// Collection file to insert into
    collection: PathBuf,
    /// One or more URLs to insert
    #[arg(required = true)]
    locators: Vec<String>,
    /// Skip the duplicate check
    #[arg(long)]
    allow_duplicates: bool,
    /// Media kind recorded for generic web locators
    #[arg(long, default_value = "videos")]
    kind: String,
}

pub async fn run(args: InsertArgs) -> anyhow::Result<()> {
    let config = SortedConfig::load()?;
    let cache = sorted_cache::MetadataCache::new(config.cache_dir.clone());
    let generic_kind: MediaKind = args.kind.parse().map_err(|e: String| anyhow::anyhow!(e))?;

    let mut inserted = 0usize;
    let mut skipped = 0usize;

    for locator in &args.locators {
        let payload = match ServiceKind::detect(locator) {
            Some(service) => {
                let resolver = sorted_resolve::create_resolver(service);
                let resolvable_id =
                    sorted_resolve::resolve_id(resolver.as_ref(), locator).await?;
                let section = resolver.section();

                // warm the cache so listings don't hit the network later;
                // the entry itself only needs the id, so a failure here
                // degrades to a warning
                let sm = ServiceMetadata::new(service, resolvable_id.clone());
                if let Err(err) = cache.get(&sm, section, resolver.as_ref()).await {
                    warn!("could not fetch metadata for {locator}: {err}");
                }

                EntryPayload::service(service, resolvable_id, section)
            }
            None => EntryPayload::web(locator.clone(), generic_kind),
        };

        let outcome = insert_entry(
            &args.collection,
            payload,
            !args.allow_duplicates,
            config.type_strict_dedup,
        )?;

        match outcome {
            InsertOutcome::Inserted(entry) => {
                inserted += 1;
                println!("Inserted {locator} (entry {})", entry.id);
            }
            InsertOutcome::AlreadyPresent => {
                skipped += 1;
                println!("Already present: {locator}");
            }
        }
    }

    println!("\n{inserted} inserted | {skipped} already present");
    Ok(())
}
