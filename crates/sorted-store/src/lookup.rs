use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use sorted_core::models::collection::CollectionId;

use crate::{read_collection, validate};

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .map(|name| name.starts_with('.'))
            .unwrap_or(false)
}

/// All candidate collection files under a root, judged superficially
/// (existence, file type, extension) so the scan stays cheap. Hidden
/// directories are skipped.
pub fn list_collection_files(root: &Path) -> Vec<PathBuf> {
    WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|entry| !is_hidden(entry))
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| validate::validate_collection(path, None, true))
        .collect()
}

/// Linear scan for the collection file carrying the given internal id.
/// Invalid candidates are skipped (and logged by the read path), never
/// treated as a match.
pub fn find_by_collection_id(collection_id: &CollectionId, root: &Path) -> Option<PathBuf> {
    if !root.is_dir() {
        return None;
    }

    for file in list_collection_files(root) {
        let Ok(Some(collection)) = read_collection(&file) else {
            continue;
        };
        if collection.id == *collection_id {
            return Some(file);
        }
    }

    None
}

/// A collection's title is its file name without the extension.
pub fn collection_title(file: &Path) -> Option<&str> {
    file.file_stem().and_then(|stem| stem.to_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::create_collection;
    use std::fs;

    #[test]
    fn test_list_skips_non_collections() {
        let dir = tempfile::tempdir().unwrap();
        create_collection("favs", dir.path(), None, None, false, false).unwrap();
        fs::write(dir.path().join("notes.txt"), "x").unwrap();

        let hidden = dir.path().join(".trash");
        fs::create_dir(&hidden).unwrap();
        fs::write(hidden.join("old.json"), "{}").unwrap();

        let files = list_collection_files(dir.path());
        assert_eq!(files.len(), 1);
        assert_eq!(collection_title(&files[0]), Some("favs"));
    }

    #[test]
    fn test_find_by_collection_id() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("nested");
        create_collection("a", dir.path(), None, None, false, false).unwrap();
        let b = create_collection("b", &sub, None, None, false, true).unwrap();

        // a corrupt neighbor must be skipped, not matched
        fs::write(dir.path().join("corrupt.json"), "{ not json").unwrap();

        let id = read_collection(&b).unwrap().unwrap().id;
        assert_eq!(find_by_collection_id(&id, dir.path()), Some(b));

        let missing = CollectionId::new();
        assert_eq!(find_by_collection_id(&missing, dir.path()), None);
    }
}
