use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::Path;

use indicatif::{ProgressBar, ProgressStyle};
use serde_json::Value;
use tracing::warn;

use sorted_core::error::SortedError;
use sorted_core::models::media::MediaKind;
use sorted_core::models::service::ServiceKind;
use sorted_resolve::Resolver;

use crate::MetadataCache;

/// What a bulk refresh did, for the caller's summary output.
#[derive(Debug, Default)]
pub struct RefreshReport {
    pub collections_scanned: usize,
    pub distinct_ids: usize,
    pub carried_over: usize,
    pub resolved: usize,
    pub failed: usize,
}

/// Rebuilds the cache from every valid collection under a root.
///
/// Walks the collections, gathers the distinct set of referenced
/// `(service, section, resolvable-id)` triples, and rewrites each touched
/// cache file from that set: with `skip_already_cached`, records that are
/// already present are carried over unchanged; otherwise every id is
/// re-resolved. Ids that fail to resolve keep their previous record when
/// one exists and are counted, never aborting the sweep. This is the one
/// deliberately slow operation (O(unique ids) external calls) and is
/// meant to run out-of-band.
pub async fn bulk_refresh(
    cache: &MetadataCache,
    collections_root: &Path,
    resolvers: &[Box<dyn Resolver>],
    skip_already_cached: bool,
) -> Result<RefreshReport, SortedError> {
    let mut report = RefreshReport::default();

    // gather the distinct referenced ids, grouped per cache file
    let mut referenced: HashMap<(ServiceKind, MediaKind), BTreeSet<String>> = HashMap::new();
    for file in sorted_store::lookup::list_collection_files(collections_root) {
        let Some(collection) = sorted_store::read_collection(&file)? else {
            continue;
        };
        report.collections_scanned += 1;

        for entry in &collection.entries {
            if let Some(sm) = entry.service_metadata() {
                referenced
                    .entry((sm.service_name, entry.kind))
                    .or_default()
                    .insert(sm.resolvable_id.clone());
            }
        }
    }

    report.distinct_ids = referenced.values().map(BTreeSet::len).sum();

    let progress = ProgressBar::new(report.distinct_ids as u64);
    progress.set_style(
        ProgressStyle::with_template("{bar:40} {pos}/{len} {msg}")
            .expect("invalid progress template"),
    );

    for ((service, section), ids) in referenced {
        let resolver = resolvers
            .iter()
            .find(|r| r.service() == service && r.section() == section);

        let file = cache.cache_file(service, section);
        let previous = MetadataCache::read_cache_file(&file)?;
        let mut rebuilt: BTreeMap<String, Value> = BTreeMap::new();

        for id in ids {
            progress.set_message(format!("{service}/{section}: {id}"));

            if skip_already_cached {
                if let Some(value) = previous.get(&id) {
                    rebuilt.insert(id, value.clone());
                    report.carried_over += 1;
                    progress.inc(1);
                    continue;
                }
            }

            let Some(resolver) = resolver else {
                warn!("no resolver for {service}/{section}, skipping {id}");
                report.failed += 1;
                progress.inc(1);
                continue;
            };

            let locator = resolver.build_locator(&id);
            match resolver.resolve(&locator).await {
                Ok(metadata) => {
                    let mut fields = metadata.fields;
                    fields.remove("id");
                    rebuilt.insert(id, Value::Object(fields));
                    report.resolved += 1;
                }
                Err(err) => {
                    warn!("could not refresh {id}: {err}");
                    // keep the stale record rather than leaving a hole
                    if let Some(value) = previous.get(&id) {
                        rebuilt.insert(id, value.clone());
                    }
                    report.failed += 1;
                }
            }
            progress.inc(1);
        }

        MetadataCache::write_cache_file(&file, &rebuilt)?;
    }

    progress.finish_and_clear();
    Ok(report)
}
