pub mod lookup;
pub mod trash;
pub mod validate;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use sorted_core::error::SortedError;
use sorted_core::models::collection::Collection;
use sorted_core::models::media::MediaKind;
use sorted_core::time;

/// Appends the `.json` extension when the path lacks it. Collection and
/// cache files always carry the extension on disk.
pub fn normalize_json_file(path: PathBuf) -> PathBuf {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => path,
        _ => {
            let mut s = path.into_os_string();
            s.push(".json");
            PathBuf::from(s)
        }
    }
}

/// Creates a new collection file in the given directory and returns its
/// path. The title becomes the file name (and thus the collection title).
pub fn create_collection(
    title: &str,
    directory: &Path,
    kind: Option<MediaKind>,
    description: Option<String>,
    force_overwrite: bool,
    ensure_parents: bool,
) -> Result<PathBuf, SortedError> {
    if !force_overwrite && !validate::is_valid_filename(title) {
        return Err(SortedError::InvalidTitle {
            title: title.to_string(),
        });
    }

    if ensure_parents {
        fs::create_dir_all(directory)?;
    } else if !directory.is_dir() {
        return Err(SortedError::NotADirectory {
            path: directory.to_path_buf(),
        });
    }

    let file = normalize_json_file(directory.join(title));
    if !force_overwrite && file.exists() {
        return Err(SortedError::CollectionAlreadyExists { path: file });
    }

    let mut collection = Collection::new(kind, description);
    write_collection(&file, &mut collection)?;
    info!("collection created: {}", file.display());
    Ok(file)
}

/// Reads and parses a collection file.
///
/// Returns `Ok(None)` for absent data: a missing file, empty content,
/// unparseable JSON, or a document without the required collection shape
/// (each case logged). A path that exists but is not a regular file is a
/// caller error and fails loudly. A malformed file is never coerced into
/// an empty collection.
pub fn read_collection(file: &Path) -> Result<Option<Collection>, SortedError> {
    if file.exists() && !file.is_file() {
        return Err(SortedError::NotAFile {
            path: file.to_path_buf(),
        });
    }
    if !file.exists() {
        warn!("collection file does not exist: {}", file.display());
        return Ok(None);
    }

    let content = fs::read_to_string(file)?;
    if content.trim().is_empty() {
        warn!("collection file is empty: {}", file.display());
        return Ok(None);
    }

    let value: serde_json::Value = match serde_json::from_str(&content) {
        Ok(value) => value,
        Err(err) => {
            warn!("unparseable collection file {}: {err}", file.display());
            return Ok(None);
        }
    };

    if !validate::validate_collection(file, Some(&value), false) {
        return Ok(None);
    }

    match serde_json::from_value(value) {
        Ok(collection) => Ok(Some(collection)),
        Err(err) => {
            warn!("malformed collection file {}: {err}", file.display());
            Ok(None)
        }
    }
}

/// Writes the whole collection document, stamping `last-modified-at`
/// first. Callers mutate an in-memory copy obtained from
/// `read_collection` and hand it back here; there are no partial updates.
pub fn write_collection(file: &Path, collection: &mut Collection) -> Result<(), SortedError> {
    collection.last_modified_at = Some(time::now());
    let json = serde_json::to_string_pretty(collection)
        .map_err(|e| SortedError::Serialization(e.to_string()))?;
    fs::write(file, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_json_file() {
        assert_eq!(
            normalize_json_file(PathBuf::from("/tmp/favs")),
            PathBuf::from("/tmp/favs.json")
        );
        assert_eq!(
            normalize_json_file(PathBuf::from("/tmp/favs.json")),
            PathBuf::from("/tmp/favs.json")
        );
    }

    #[test]
    fn test_create_and_read_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let file = create_collection(
            "favs",
            dir.path(),
            Some(MediaKind::Videos),
            Some("test".into()),
            false,
            false,
        )
        .unwrap();

        assert_eq!(file, dir.path().join("favs.json"));
        let collection = read_collection(&file).unwrap().unwrap();
        assert_eq!(collection.kind, Some(MediaKind::Videos));
        assert_eq!(collection.description.as_deref(), Some("test"));
        assert!(collection.entries.is_empty());
        assert!(collection.last_modified_at.is_some());
    }

    #[test]
    fn test_create_refuses_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        create_collection("favs", dir.path(), None, None, false, false).unwrap();

        let err = create_collection("favs", dir.path(), None, None, false, false).unwrap_err();
        assert!(matches!(err, SortedError::CollectionAlreadyExists { .. }));
    }

    #[test]
    fn test_create_force_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let first = create_collection("favs", dir.path(), None, None, false, false).unwrap();
        let first_id = read_collection(&first).unwrap().unwrap().id;

        let second = create_collection("favs", dir.path(), None, None, true, false).unwrap();
        let second_id = read_collection(&second).unwrap().unwrap().id;
        assert_ne!(first_id, second_id);
    }

    #[test]
    fn test_create_rejects_invalid_title() {
        let dir = tempfile::tempdir().unwrap();
        let err = create_collection("a/b", dir.path(), None, None, false, false).unwrap_err();
        assert!(matches!(err, SortedError::InvalidTitle { .. }));
    }

    #[test]
    fn test_create_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");

        let err = create_collection("favs", &nested, None, None, false, false).unwrap_err();
        assert!(matches!(err, SortedError::NotADirectory { .. }));

        let file = create_collection("favs", &nested, None, None, false, true).unwrap();
        assert!(file.exists());
    }

    #[test]
    fn test_read_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_collection(&dir.path().join("nope.json")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_read_directory_is_caller_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_collection(dir.path()).unwrap_err();
        assert!(matches!(err, SortedError::NotAFile { .. }));
    }

    #[test]
    fn test_read_garbage_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("bad.json");
        fs::write(&file, "{ not json").unwrap();
        assert!(read_collection(&file).unwrap().is_none());

        fs::write(&file, "").unwrap();
        assert!(read_collection(&file).unwrap().is_none());
    }

    #[test]
    fn test_read_never_repairs_missing_shape() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("broken.json");
        fs::write(&file, r#"{"id": "018f3b7e-0000-7000-8000-000000000000"}"#).unwrap();
        assert!(read_collection(&file).unwrap().is_none());

        fs::write(&file, r#"{"entries": []}"#).unwrap();
        assert!(read_collection(&file).unwrap().is_none());
    }

    #[test]
    fn test_write_advances_last_modified() {
        let dir = tempfile::tempdir().unwrap();
        let file = create_collection("favs", dir.path(), None, None, false, false).unwrap();

        let mut collection = read_collection(&file).unwrap().unwrap();
        let before = collection.last_modified_at;
        collection.last_modified_at = None;
        write_collection(&file, &mut collection).unwrap();

        let reread = read_collection(&file).unwrap().unwrap();
        assert!(reread.last_modified_at.is_some());
        assert!(reread.last_modified_at >= before);
    }
}
