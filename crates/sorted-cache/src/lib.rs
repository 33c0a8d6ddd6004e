pub mod refresh;

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info, warn};

use sorted_core::error::SortedError;
use sorted_core::models::media::MediaKind;
use sorted_core::models::service::{ServiceKind, ServiceMetadata};
use sorted_resolve::Resolver;

/// Cache-aside store for resolver metadata. One JSON file per
/// `(service, section)` pair, mapping resolvable id to the metadata
/// record, so different media kinds sharing a service never collide and
/// a corrupt file for one section cannot invalidate the others.
pub struct MetadataCache {
    cache_dir: PathBuf,
}

impl MetadataCache {
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
        }
    }

    /// Path of the cache file for a service/section pair.
    pub fn cache_file(&self, service: ServiceKind, section: MediaKind) -> PathBuf {
        self.cache_dir
            .join(service.to_string())
            .join(format!("{section}.json"))
    }

    /// Reads a cache file into a map. A missing or empty file is an
    /// empty cache, not an error; an unparseable one is logged and
    /// treated as empty (the cache is rebuildable, unlike collections).
    pub fn read_cache_file(file: &Path) -> Result<BTreeMap<String, Value>, SortedError> {
        if !file.exists() {
            return Ok(BTreeMap::new());
        }

        let content = fs::read_to_string(file)?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        match serde_json::from_str(&content) {
            Ok(map) => Ok(map),
            Err(err) => {
                warn!("unparseable cache file {}: {err}", file.display());
                Ok(BTreeMap::new())
            }
        }
    }

    fn write_cache_file(file: &Path, map: &BTreeMap<String, Value>) -> Result<(), SortedError> {
        if let Some(parent) = file.parent() {
            fs::create_dir_all(parent)?;
        }
        let json =
            serde_json::to_string_pretty(map).map_err(|e| SortedError::Serialization(e.to_string()))?;
        fs::write(file, json)?;
        Ok(())
    }

    /// Pure cache read; never touches the network.
    pub fn lookup(
        &self,
        sm: &ServiceMetadata,
        section: MediaKind,
    ) -> Result<Option<Value>, SortedError> {
        let file = self.cache_file(sm.service_name, section);
        let mut map = Self::read_cache_file(&file)?;
        Ok(map.remove(&sm.resolvable_id))
    }

    /// Writes one record under its resolvable id. The key is
    /// authoritative: any `id` field inside the value is stripped so the
    /// id is never duplicated into the payload.
    pub fn insert_record(
        &self,
        service: ServiceKind,
        section: MediaKind,
        resolvable_id: &str,
        mut value: Value,
    ) -> Result<(), SortedError> {
        if let Some(object) = value.as_object_mut() {
            object.remove("id");
        }

        let file = self.cache_file(service, section);
        let mut map = Self::read_cache_file(&file)?;
        map.insert(resolvable_id.to_string(), value);
        Self::write_cache_file(&file, &map)?;

        info!("cache record written: {resolvable_id}");
        Ok(())
    }

    /// Metadata for a service-bound item, cache-aside: a hit returns the
    /// stored record untouched (a new fetch could churn mutable fields
    /// like view counts); a miss rebuilds the locator from the resolvable
    /// id, resolves it once, persists the result and returns it.
    pub async fn get(
        &self,
        sm: &ServiceMetadata,
        section: MediaKind,
        resolver: &dyn Resolver,
    ) -> Result<Value, SortedError> {
        if let Some(cached) = self.lookup(sm, section)? {
            debug!("cache hit: {}", sm.resolvable_id);
            return Ok(cached);
        }

        let locator = resolver.build_locator(&sm.resolvable_id);
        let metadata = resolver.resolve(&locator).await?;

        let mut fields = metadata.fields;
        fields.remove("id");
        let value = Value::Object(fields);

        self.insert_record(sm.service_name, section, &sm.resolvable_id, value.clone())?;
        Ok(value)
    }
}
