use std::path::Path;

use tracing::{info, warn};

use sorted_core::error::SortedError;

use sorted_core::models::entry::EntryId;

use crate::dedup;
use crate::entries::{self, InsertOutcome, RemoveOutcome};

/// What a move did.
#[derive(Debug)]
pub enum MoveOutcome {
    /// Inserted at the destination and removed from the source.
    Moved,
    /// Source and destination are the same file; nothing was touched.
    SameCollection,
    /// The destination already holds the same logical content (possibly
    /// under a different internal id); the source is left untouched.
    DuplicateAtDestination,
}

impl MoveOutcome {
    pub fn moved(&self) -> bool {
        matches!(self, MoveOutcome::Moved)
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(ca), Ok(cb)) => ca == cb,
        _ => a == b,
    }
}

/// Transfers one entry between two collection files.
///
/// The entry is located in the source by its internal id, but the
/// presence check against the destination compares the entry's payload:
/// the same content may have been inserted there independently under a
/// different id. Insert-before-remove ordering means a crash between the
/// two writes duplicates the entry (recoverable via the repair pass)
/// rather than losing it; a removal failure after a successful insert
/// rolls the insert back.
pub fn move_entry(
    src: &Path,
    dest: &Path,
    entry_id: &EntryId,
    presence_check: bool,
    ensure_destination: bool,
    type_strict: bool,
) -> Result<MoveOutcome, SortedError> {
    if same_file(src, dest) {
        info!("source and destination are the same collection, nothing to move");
        return Ok(MoveOutcome::SameCollection);
    }

    let src_collection =
        sorted_store::read_collection(src)?.ok_or_else(|| SortedError::InvalidCollectionData {
            path: src.to_path_buf(),
        })?;

    if !dest.exists() && ensure_destination {
        let directory = dest.parent().ok_or_else(|| SortedError::NotADirectory {
            path: dest.to_path_buf(),
        })?;
        let title = dest
            .file_stem()
            .and_then(|stem| stem.to_str())
            .ok_or_else(|| SortedError::InvalidTitle {
                title: dest.display().to_string(),
            })?;
        sorted_store::create_collection(title, directory, src_collection.kind, None, false, true)?;
    }

    let dest_collection =
        sorted_store::read_collection(dest)?.ok_or_else(|| SortedError::InvalidCollectionData {
            path: dest.to_path_buf(),
        })?;

    if let (Some(src_kind), Some(dest_kind)) = (src_collection.kind, dest_collection.kind) {
        if src_kind != dest_kind {
            return Err(SortedError::MismatchedCollectionType {
                src: src_kind.to_string(),
                dest: dest_kind.to_string(),
            });
        }
    }

    let entry = src_collection
        .entry_by_id(entry_id)
        .cloned()
        .ok_or_else(|| SortedError::EntryNotFound {
            id: entry_id.to_string(),
        })?;
    let payload = entry.payload();

    if presence_check && dedup::is_entry_present(&dest_collection, &payload, type_strict) {
        info!("already present at the destination, leaving the source untouched");
        return Ok(MoveOutcome::DuplicateAtDestination);
    }

    let inserted = match entries::insert_entry(dest, payload, false, type_strict)? {
        InsertOutcome::Inserted(entry) => entry,
        InsertOutcome::AlreadyPresent => return Ok(MoveOutcome::DuplicateAtDestination),
    };

    match entries::remove_entry(src, entry_id) {
        Ok(RemoveOutcome::Removed(_)) => {
            info!(
                "entry {entry_id} moved from {} to {}",
                src.display(),
                dest.display()
            );
            Ok(MoveOutcome::Moved)
        }
        Ok(RemoveOutcome::NotFound) => {
            rollback_insert(dest, &inserted.id);
            Err(SortedError::EntryNotFound {
                id: entry_id.to_string(),
            })
        }
        Err(err) => {
            rollback_insert(dest, &inserted.id);
            Err(err)
        }
    }
}

fn rollback_insert(dest: &Path, inserted_id: &EntryId) {
    if let Err(err) = entries::remove_entry(dest, inserted_id) {
        warn!(
            "could not roll back the inserted copy {inserted_id} at {}: {err}",
            dest.display()
        );
    }
}
