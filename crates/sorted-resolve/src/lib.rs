pub mod reddit;
pub mod youtube;

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tracing::warn;

use sorted_core::error::SortedError;
use sorted_core::models::media::MediaKind;
use sorted_core::models::service::ServiceKind;

/// Metadata for one content item as returned by a resolver. The
/// service's own id is carried separately from the payload fields: when
/// the record is cached, the id becomes the key and must not appear
/// inside the value.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedMetadata {
    pub id: String,
    pub fields: serde_json::Map<String, serde_json::Value>,
}

/// An external service that can turn a locator into full metadata.
#[async_trait]
pub trait Resolver: Send + Sync {
    /// The service this resolver speaks for.
    fn service(&self) -> ServiceKind;

    /// The media kind this resolver produces; doubles as the cache
    /// section name.
    fn section(&self) -> MediaKind;

    /// Rebuilds a canonical locator from a resolvable id.
    fn build_locator(&self, resolvable_id: &str) -> String;

    /// Fast-path id extraction from a locator. Pure string work, no
    /// network; may fail on URL shapes it does not recognize.
    fn extract_id(&self, locator: &str) -> Option<String>;

    /// Fetches full metadata for a locator. One blocking attempt, no
    /// retry; failure surfaces immediately to the caller.
    async fn resolve(&self, locator: &str) -> Result<ResolvedMetadata, SortedError>;
}

/// Create a resolver for the given service.
pub fn create_resolver(kind: ServiceKind) -> Box<dyn Resolver> {
    match kind {
        ServiceKind::Youtube => Box::new(youtube::YoutubeResolver::new()),
        ServiceKind::Reddit => Box::new(reddit::RedditResolver::new()),
    }
}

/// All resolvers this build knows about, for operations that sweep every
/// service (e.g. a cache rebuild).
pub fn all_resolvers() -> Vec<Box<dyn Resolver>> {
    vec![
        create_resolver(ServiceKind::Youtube),
        create_resolver(ServiceKind::Reddit),
    ]
}

/// Extracts a stable external id from a locator: the cheap heuristic
/// first, the resolver API as fallback. When full metadata has already
/// been fetched there is no reason to call this separately.
pub async fn resolve_id(resolver: &dyn Resolver, locator: &str) -> Result<String, SortedError> {
    if let Some(id) = resolver.extract_id(locator) {
        return Ok(id);
    }

    warn!("could not extract an id from {locator}, falling back to the resolver API");
    let metadata = resolver.resolve(locator).await?;
    Ok(metadata.id)
}

/// Canned resolver serving metadata from an in-memory map, for tests.
/// Counts `resolve` calls so cache behavior can be asserted.
pub struct StaticResolver {
    service: ServiceKind,
    section: MediaKind,
    records: HashMap<String, serde_json::Map<String, serde_json::Value>>,
    resolve_calls: AtomicUsize,
}

impl StaticResolver {
    pub fn new(service: ServiceKind, section: MediaKind) -> Self {
        Self {
            service,
            section,
            records: HashMap::new(),
            resolve_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_record(mut self, id: &str, fields: serde_json::Value) -> Self {
        let fields = match fields {
            serde_json::Value::Object(map) => map,
            other => {
                let mut map = serde_json::Map::new();
                map.insert("value".to_string(), other);
                map
            }
        };
        self.records.insert(id.to_string(), fields);
        self
    }

    pub fn resolve_calls(&self) -> usize {
        self.resolve_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Resolver for StaticResolver {
    fn service(&self) -> ServiceKind {
        self.service
    }

    fn section(&self) -> MediaKind {
        self.section
    }

    fn build_locator(&self, resolvable_id: &str) -> String {
        format!("static://{}/{resolvable_id}", self.service)
    }

    fn extract_id(&self, locator: &str) -> Option<String> {
        locator.rsplit('/').next().map(str::to_string)
    }

    async fn resolve(&self, locator: &str) -> Result<ResolvedMetadata, SortedError> {
        self.resolve_calls.fetch_add(1, Ordering::SeqCst);

        let id = self
            .extract_id(locator)
            .ok_or_else(|| SortedError::Resolution {
                locator: locator.to_string(),
                message: "no id in locator".into(),
            })?;

        match self.records.get(&id) {
            Some(fields) => Ok(ResolvedMetadata {
                id,
                fields: fields.clone(),
            }),
            None => Err(SortedError::Resolution {
                locator: locator.to_string(),
                message: "unknown id".into(),
            }),
        }
    }
}
