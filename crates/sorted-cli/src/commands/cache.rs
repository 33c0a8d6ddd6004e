use std::path::PathBuf;

use clap::Subcommand;

use sorted_cache::refresh::bulk_refresh;
use sorted_cache::MetadataCache;
use sorted_core::config::SortedConfig;

#[derive(Subcommand)]
pub enum CacheAction {
    /// Rebuild the metadata cache from every collection under a root
    Update {
        /// Root directory to scan (default: configured collections dir)
        #[arg(long)]
        root: Option<PathBuf>,
        /// Re-resolve ids that are already cached
        #[arg(long)]
        re_resolve: bool,
    },
}

pub async fn run(action: CacheAction) -> anyhow::Result<()> {
    match action {
        CacheAction::Update { root, re_resolve } => {
            let config = SortedConfig::load()?;
            let root = root.unwrap_or(config.collections_dir);
            let cache = MetadataCache::new(config.cache_dir);
            let resolvers = sorted_resolve::all_resolvers();

            let report = bulk_refresh(&cache, &root, &resolvers, !re_resolve).await?;

            println!(
                "Scanned {} collections, {} distinct ids",
                report.collections_scanned, report.distinct_ids
            );
            println!(
                "{} resolved | {} carried over | {} failed",
                report.resolved, report.carried_over, report.failed
            );
            Ok(())
        }
    }
}
