use std::path::Path;

use tracing::info;

use sorted_core::error::SortedError;
use sorted_core::models::entry::Entry;

use crate::dedup;

/// Collapses accidental duplicate entries, keeping the first occurrence
/// of each logical content in insertion order.
///
/// A crash between the two writes of a move leaves the entry present in
/// both collections; running this over the affected file restores the
/// invariant. Idempotent: a clean collection is read but never
/// rewritten. Returns the number of entries dropped.
pub fn collapse_duplicates(file: &Path, type_strict: bool) -> Result<usize, SortedError> {
    let mut collection =
        sorted_store::read_collection(file)?.ok_or_else(|| SortedError::InvalidCollectionData {
            path: file.to_path_buf(),
        })?;

    let mut kept: Vec<Entry> = Vec::with_capacity(collection.entries.len());
    let mut dropped = 0usize;

    for entry in std::mem::take(&mut collection.entries) {
        let payload = entry.payload();
        if kept
            .iter()
            .any(|survivor| dedup::is_duplicate(survivor, &payload, type_strict))
        {
            dropped += 1;
        } else {
            kept.push(entry);
        }
    }

    if dropped == 0 {
        return Ok(0);
    }

    collection.entries = kept;
    sorted_store::write_collection(file, &mut collection)?;
    info!("collapsed {dropped} duplicate entries in {}", file.display());
    Ok(dropped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entries::insert_entry;
    use sorted_core::models::entry::EntryPayload;
    use sorted_core::models::media::MediaKind;
    use sorted_core::models::service::ServiceKind;

    #[test]
    fn test_collapse_removes_crash_duplicates() {
        let dir = tempfile::tempdir().unwrap();
        let file = sorted_store::create_collection(
            "favs",
            dir.path(),
            Some(MediaKind::Videos),
            None,
            false,
            false,
        )
        .unwrap();

        let payload = EntryPayload::service(ServiceKind::Youtube, "abc", MediaKind::Videos);
        insert_entry(&file, payload.clone(), false, true).unwrap();
        insert_entry(&file, payload.clone(), false, true).unwrap();
        insert_entry(&file, payload, false, true).unwrap();
        insert_entry(
            &file,
            EntryPayload::service(ServiceKind::Youtube, "xyz", MediaKind::Videos),
            false,
            true,
        )
        .unwrap();

        let first_id = sorted_store::read_collection(&file).unwrap().unwrap().entries[0]
            .id
            .clone();

        assert_eq!(collapse_duplicates(&file, true).unwrap(), 2);

        let collection = sorted_store::read_collection(&file).unwrap().unwrap();
        assert_eq!(collection.entry_count(), 2);
        // the first occurrence survives
        assert_eq!(collection.entries[0].id, first_id);

        // a second pass finds nothing and leaves the file untouched
        let before = std::fs::read_to_string(&file).unwrap();
        assert_eq!(collapse_duplicates(&file, true).unwrap(), 0);
        assert_eq!(std::fs::read_to_string(&file).unwrap(), before);
    }

    #[test]
    fn test_collapse_refuses_invalid_collection() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("broken.json");
        std::fs::write(&file, r#"{"entries": []}"#).unwrap();

        let err = collapse_duplicates(&file, true).unwrap_err();
        assert!(matches!(err, SortedError::InvalidCollectionData { .. }));
    }
}
