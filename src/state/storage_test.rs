use super::*;

// =============================================================
// MemoryStorage
// =============================================================

#[test]
fn memory_storage_set_then_get() {
    let storage = MemoryStorage::new();
    storage.set("k", "v").unwrap();
    assert_eq!(storage.get("k").as_deref(), Some("v"));
}

#[test]
fn memory_storage_overwrites_existing_value() {
    let storage = MemoryStorage::new();
    storage.set("k", "one").unwrap();
    storage.set("k", "two").unwrap();
    assert_eq!(storage.get("k").as_deref(), Some("two"));
    assert_eq!(storage.len(), 1);
}

#[test]
fn memory_storage_remove_is_idempotent() {
    let storage = MemoryStorage::new();
    storage.set("k", "v").unwrap();
    storage.remove("k").unwrap();
    storage.remove("k").unwrap();
    assert!(storage.get("k").is_none());
    assert!(storage.is_empty());
}

// =============================================================
// BrowserStorage outside the browser
// =============================================================

#[cfg(not(feature = "csr"))]
#[test]
fn browser_storage_is_unavailable_in_native_tests() {
    let storage = BrowserStorage;
    assert!(storage.get("auth_token").is_none());
    assert_eq!(storage.set("auth_token", "t"), Err(StorageError::Unavailable));
    assert_eq!(storage.remove("auth_token"), Err(StorageError::Unavailable));
}
