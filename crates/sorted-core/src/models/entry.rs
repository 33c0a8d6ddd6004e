use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::media::MediaKind;
use super::service::{ServiceKind, ServiceMetadata};
use crate::time;

/// Unique identifier for an entry, assigned at insertion time. Distinct
/// from any external id; used only for removal and move targeting.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryId(pub Uuid);

impl EntryId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for EntryId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| format!("invalid entry id {s:?}: {e}"))
    }
}

/// Where an entry points: either a bare web URL or a reference into a
/// specific service's namespace. An entry carries exactly one of the two,
/// which this enum guarantees structurally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntryLocator {
    Web {
        url: String,
    },
    Service {
        #[serde(rename = "service-metadata")]
        service_metadata: ServiceMetadata,
    },
}

/// The identity-bearing part of an entry, before an internal id and
/// insertion timestamp have been assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryPayload {
    pub kind: MediaKind,
    pub locator: EntryLocator,
}

impl EntryPayload {
    pub fn web(url: impl Into<String>, kind: MediaKind) -> Self {
        Self {
            kind,
            locator: EntryLocator::Web { url: url.into() },
        }
    }

    pub fn service(
        service_name: ServiceKind,
        resolvable_id: impl Into<String>,
        kind: MediaKind,
    ) -> Self {
        Self {
            kind,
            locator: EntryLocator::Service {
                service_metadata: ServiceMetadata::new(service_name, resolvable_id),
            },
        }
    }
}

/// A reference to one piece of external content inside a collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Entry {
    pub id: EntryId,
    #[serde(with = "crate::time::iso_seconds")]
    pub inserted_at: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: MediaKind,
    #[serde(flatten)]
    pub locator: EntryLocator,
}

impl Entry {
    /// Builds a fresh entry from a payload. Callers must run any dedup
    /// check before this point: the id assigned here is never part of
    /// identity comparison.
    pub fn new(payload: EntryPayload) -> Self {
        Self {
            id: EntryId::new(),
            inserted_at: time::now(),
            kind: payload.kind,
            locator: payload.locator,
        }
    }

    /// The identity-bearing part of this entry, for dedup comparison and
    /// for re-inserting the same content elsewhere under a new id.
    pub fn payload(&self) -> EntryPayload {
        EntryPayload {
            kind: self.kind,
            locator: self.locator.clone(),
        }
    }

    /// The service metadata, when this entry is service-bound.
    pub fn service_metadata(&self) -> Option<&ServiceMetadata> {
        match &self.locator {
            EntryLocator::Service { service_metadata } => Some(service_metadata),
            EntryLocator::Web { .. } => None,
        }
    }
}
