use std::path::Path;

use tracing::info;

use sorted_core::error::SortedError;
use sorted_core::models::collection::Collection;
use sorted_core::models::entry::{Entry, EntryId, EntryPayload};

use crate::dedup;

/// What an insert did.
#[derive(Debug)]
pub enum InsertOutcome {
    /// The entry was appended and the collection rewritten.
    Inserted(Entry),
    /// The same logical content already exists; nothing was written.
    AlreadyPresent,
}

impl InsertOutcome {
    pub fn inserted(&self) -> bool {
        matches!(self, InsertOutcome::Inserted(_))
    }
}

/// What a remove did.
#[derive(Debug)]
pub enum RemoveOutcome {
    /// The first entry with the given id was removed.
    Removed(Entry),
    /// No entry carried the id. Normal for cleanup callers, not an error.
    NotFound,
}

impl RemoveOutcome {
    pub fn removed(&self) -> bool {
        matches!(self, RemoveOutcome::Removed(_))
    }
}

fn read_for_mutation(file: &Path) -> Result<Collection, SortedError> {
    sorted_store::read_collection(file)?.ok_or_else(|| SortedError::InvalidCollectionData {
        path: file.to_path_buf(),
    })
}

/// Appends a new entry to a collection file.
///
/// With `presence_check`, the dedup scan runs first and a duplicate is a
/// success-no-op: repeated insertion attempts of the same logical content
/// are safe. The internal id is assigned only after the check, so it
/// never participates in identity.
pub fn insert_entry(
    file: &Path,
    payload: EntryPayload,
    presence_check: bool,
    type_strict: bool,
) -> Result<InsertOutcome, SortedError> {
    let mut collection = read_for_mutation(file)?;

    if presence_check && dedup::is_entry_present(&collection, &payload, type_strict) {
        info!("already present in {}", file.display());
        return Ok(InsertOutcome::AlreadyPresent);
    }

    let entry = Entry::new(payload);
    collection.entries.push(entry.clone());
    sorted_store::write_collection(file, &mut collection)?;

    info!("entry {} added to {}", entry.id, file.display());
    Ok(InsertOutcome::Inserted(entry))
}

/// Removes at most the first entry whose internal id matches. Duplicates
/// past the first occurrence are left alone.
pub fn remove_entry(file: &Path, entry_id: &EntryId) -> Result<RemoveOutcome, SortedError> {
    let mut collection = read_for_mutation(file)?;

    match collection.entries.iter().position(|e| e.id == *entry_id) {
        Some(index) => {
            let removed = collection.entries.remove(index);
            sorted_store::write_collection(file, &mut collection)?;
            info!("entry {entry_id} removed from {}", file.display());
            Ok(RemoveOutcome::Removed(removed))
        }
        None => {
            info!("entry {entry_id} not found in {}", file.display());
            Ok(RemoveOutcome::NotFound)
        }
    }
}
