use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::entry::{Entry, EntryId};
use super::media::MediaKind;
use crate::time;

/// Unique identifier for a collection, assigned at creation, immutable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CollectionId(pub Uuid);

impl CollectionId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }
}

impl Default for CollectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CollectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for CollectionId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| format!("invalid collection id {s:?}: {e}"))
    }
}

/// A named, file-persisted ordered set of entries of one media kind.
/// The title is the file stem, not a field; the file stores only what the
/// title cannot carry. `id` and `entries` are the required shape: a
/// document missing either never deserializes into this type.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Collection {
    pub id: CollectionId,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<MediaKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        default,
        with = "crate::time::iso_seconds_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(
        default,
        with = "crate::time::iso_seconds_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_modified_at: Option<DateTime<Utc>>,
    pub entries: Vec<Entry>,
}

impl Collection {
    pub fn new(kind: Option<MediaKind>, description: Option<String>) -> Self {
        Self {
            id: CollectionId::new(),
            kind,
            description,
            created_at: Some(time::now()),
            last_modified_at: None,
            entries: Vec::new(),
        }
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// First entry whose internal id matches, in insertion order.
    pub fn entry_by_id(&self, id: &EntryId) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id == *id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::entry::EntryPayload;
    use crate::models::service::ServiceKind;

    #[test]
    fn test_collection_json_keys() {
        let collection = Collection::new(Some(MediaKind::Videos), Some("favs".into()));
        let json = serde_json::to_value(&collection).unwrap();

        assert!(json.get("id").is_some());
        assert_eq!(json["type"], "videos");
        assert_eq!(json["description"], "favs");
        assert!(json.get("created-at").is_some());
        assert!(json.get("last-modified-at").is_none());
        assert!(json["entries"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_missing_entries_is_rejected() {
        let raw = r#"{"id": "018f3b7e-0000-7000-8000-000000000000"}"#;
        assert!(serde_json::from_str::<Collection>(raw).is_err());
    }

    #[test]
    fn test_missing_id_is_rejected() {
        let raw = r#"{"entries": []}"#;
        assert!(serde_json::from_str::<Collection>(raw).is_err());
    }

    #[test]
    fn test_untyped_legacy_collection_still_reads() {
        let raw = r#"{"id": "018f3b7e-0000-7000-8000-000000000000", "entries": []}"#;
        let collection: Collection = serde_json::from_str(raw).unwrap();
        assert!(collection.kind.is_none());
        assert!(collection.created_at.is_none());
    }

    #[test]
    fn test_entry_by_id() {
        let mut collection = Collection::new(Some(MediaKind::Videos), None);
        collection.entries.push(Entry::new(EntryPayload::service(
            ServiceKind::Youtube,
            "abc",
            MediaKind::Videos,
        )));
        collection.entries.push(Entry::new(EntryPayload::service(
            ServiceKind::Youtube,
            "xyz",
            MediaKind::Videos,
        )));

        let target = collection.entries[1].id.clone();
        let found = collection.entry_by_id(&target).unwrap();
        assert_eq!(
            found.service_metadata().unwrap().resolvable_id,
            "xyz".to_string()
        );
    }
}
