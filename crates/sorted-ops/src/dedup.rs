use sorted_core::models::collection::Collection;
use sorted_core::models::entry::{Entry, EntryLocator, EntryPayload};

/// Whether an existing entry and a candidate payload reference the same
/// logical content.
///
/// Generic entries compare by `url`; service-bound entries compare by
/// their `(service-name, resolvable-id)` pair. An entry of one shape is
/// never a duplicate of the other. With `type_strict`, matching locators
/// still differ when the media kinds differ, so a video and a playlist
/// sharing an id stay distinct. Internal entry ids take no part in the
/// comparison.
pub fn is_duplicate(existing: &Entry, payload: &EntryPayload, type_strict: bool) -> bool {
    let same_content = match (&existing.locator, &payload.locator) {
        (EntryLocator::Web { url: a }, EntryLocator::Web { url: b }) => a == b,
        (
            EntryLocator::Service { service_metadata: a },
            EntryLocator::Service { service_metadata: b },
        ) => a == b,
        _ => false,
    };

    same_content && (!type_strict || existing.kind == payload.kind)
}

/// Whether the collection already holds the payload's content.
pub fn is_entry_present(collection: &Collection, payload: &EntryPayload, type_strict: bool) -> bool {
    collection
        .entries
        .iter()
        .any(|existing| is_duplicate(existing, payload, type_strict))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sorted_core::models::media::MediaKind;
    use sorted_core::models::service::ServiceKind;

    fn collection_with(payloads: Vec<EntryPayload>) -> Collection {
        let mut collection = Collection::new(Some(MediaKind::Videos), None);
        collection.entries = payloads.into_iter().map(Entry::new).collect();
        collection
    }

    #[test]
    fn test_service_identity() {
        let collection = collection_with(vec![EntryPayload::service(
            ServiceKind::Youtube,
            "abc",
            MediaKind::Videos,
        )]);

        let same = EntryPayload::service(ServiceKind::Youtube, "abc", MediaKind::Videos);
        let other_id = EntryPayload::service(ServiceKind::Youtube, "xyz", MediaKind::Videos);
        let other_service = EntryPayload::service(ServiceKind::Reddit, "abc", MediaKind::Videos);

        assert!(is_entry_present(&collection, &same, true));
        assert!(!is_entry_present(&collection, &other_id, true));
        assert!(!is_entry_present(&collection, &other_service, true));
    }

    #[test]
    fn test_url_identity() {
        let collection = collection_with(vec![EntryPayload::web(
            "https://example.com/a",
            MediaKind::Posts,
        )]);

        let same = EntryPayload::web("https://example.com/a", MediaKind::Posts);
        let other = EntryPayload::web("https://example.com/b", MediaKind::Posts);

        assert!(is_entry_present(&collection, &same, true));
        assert!(!is_entry_present(&collection, &other, true));
    }

    #[test]
    fn test_mixed_shapes_never_match() {
        let collection = collection_with(vec![EntryPayload::web(
            "https://youtube.com/watch?v=abc",
            MediaKind::Videos,
        )]);

        let service = EntryPayload::service(ServiceKind::Youtube, "abc", MediaKind::Videos);
        assert!(!is_entry_present(&collection, &service, false));
    }

    #[test]
    fn test_type_strict_distinguishes_kinds() {
        let collection = collection_with(vec![EntryPayload::service(
            ServiceKind::Youtube,
            "abc",
            MediaKind::Videos,
        )]);

        let as_post = EntryPayload::service(ServiceKind::Youtube, "abc", MediaKind::Posts);
        assert!(!is_entry_present(&collection, &as_post, true));
        assert!(is_entry_present(&collection, &as_post, false));
    }

    #[test]
    fn test_internal_id_is_ignored() {
        let payload = EntryPayload::service(ServiceKind::Youtube, "abc", MediaKind::Videos);
        let existing = Entry::new(payload.clone());
        // a freshly built entry has a different internal id, yet the
        // content still counts as the same
        assert!(is_duplicate(&existing, &payload, true));
    }
}
