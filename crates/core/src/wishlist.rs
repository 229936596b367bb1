//! Client-persisted wishlist.
//!
//! The wishlist belongs to the browser, not to the account: it is kept in
//! client-local storage under [`WISHLIST_STORAGE_KEY`] and is never synced
//! to the server, so two devices hold two independent wishlists.
//!
//! [`Wishlist`] is the plain ordered set. [`PersistentWishlist`] binds one to a
//! [`WishlistStorage`] backend and writes the snapshot back after every
//! change.

use std::cell::RefCell;
use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Storage key the wishlist snapshot is kept under.
pub const WISHLIST_STORAGE_KEY: &str = "storehaus-wishlist";

/// A favorited catalog item, priced in both display currencies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistItem {
    /// Catalog identifier; unique within a wishlist.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Price in won.
    pub price_krw: Decimal,
    /// Price in US dollars.
    pub price_usd: Decimal,
    /// Image URL.
    pub image: Option<String>,
}

/// Ordered, id-unique collection of wishlist items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Wishlist {
    items: Vec<WishlistItem>,
}

impl Wishlist {
    /// Create an empty wishlist.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[WishlistItem] {
        &self.items
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the wishlist is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether an item with `id` is present.
    #[must_use]
    pub fn is_in_wishlist(&self, id: &str) -> bool {
        self.items.iter().any(|item| item.id == id)
    }

    /// Append `item` unless its id is already present.
    ///
    /// Returns `true` if the wishlist changed.
    pub fn add_to_wishlist(&mut self, item: WishlistItem) -> bool {
        if self.is_in_wishlist(&item.id) {
            return false;
        }
        self.items.push(item);
        true
    }

    /// Remove the item with `id`, if present.
    ///
    /// Returns `true` if the wishlist changed.
    pub fn remove_from_wishlist(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() != before
    }

    /// Rebuild from a snapshot, dropping duplicate ids after the first.
    fn from_snapshot(items: Vec<WishlistItem>) -> Self {
        let mut wishlist = Self::new();
        for item in items {
            wishlist.add_to_wishlist(item);
        }
        wishlist
    }
}

/// Errors from a wishlist storage backend.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The backend refused or failed the write.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    /// The snapshot could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Client-local key/value storage (the `localStorage` contract).
pub trait WishlistStorage {
    /// Read the value stored under `key`.
    fn load(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Unavailable` if the backend cannot be written.
    fn save(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-process storage backend.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl WishlistStorage for MemoryStorage {
    fn load(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// A wishlist that rehydrates from and persists to a storage backend.
#[derive(Debug)]
pub struct PersistentWishlist<S> {
    wishlist: Wishlist,
    storage: S,
}

impl<S: WishlistStorage> PersistentWishlist<S> {
    /// Rehydrate from `storage`.
    ///
    /// A missing or unreadable snapshot starts an empty wishlist.
    pub fn load(storage: S) -> Self {
        let wishlist = storage
            .load(WISHLIST_STORAGE_KEY)
            .and_then(|raw| serde_json::from_str::<Vec<WishlistItem>>(&raw).ok())
            .map(Wishlist::from_snapshot)
            .unwrap_or_default();

        Self { wishlist, storage }
    }

    /// Current wishlist.
    #[must_use]
    pub const fn wishlist(&self) -> &Wishlist {
        &self.wishlist
    }

    /// Items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[WishlistItem] {
        self.wishlist.items()
    }

    /// Whether an item with `id` is present.
    #[must_use]
    pub fn is_in_wishlist(&self, id: &str) -> bool {
        self.wishlist.is_in_wishlist(id)
    }

    /// Add `item` (no-op for a known id) and persist if the set changed.
    ///
    /// # Errors
    ///
    /// Returns the storage error if the snapshot cannot be written. The
    /// in-memory wishlist keeps the item either way.
    pub fn add_to_wishlist(&mut self, item: WishlistItem) -> Result<bool, StorageError> {
        let changed = self.wishlist.add_to_wishlist(item);
        if changed {
            self.persist()?;
        }
        Ok(changed)
    }

    /// Remove the item with `id` (no-op when absent) and persist if the set changed.
    ///
    /// # Errors
    ///
    /// Returns the storage error if the snapshot cannot be written. The
    /// in-memory wishlist stays updated either way.
    pub fn remove_from_wishlist(&mut self, id: &str) -> Result<bool, StorageError> {
        let changed = self.wishlist.remove_from_wishlist(id);
        if changed {
            self.persist()?;
        }
        Ok(changed)
    }

    /// Give back the storage backend.
    pub fn into_storage(self) -> S {
        self.storage
    }

    fn persist(&self) -> Result<(), StorageError> {
        let snapshot = serde_json::to_string(self.wishlist.items())?;
        self.storage.save(WISHLIST_STORAGE_KEY, &snapshot)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn item(id: &str) -> WishlistItem {
        WishlistItem {
            id: id.to_owned(),
            name: format!("Item {id}"),
            price_krw: Decimal::new(19_000, 0),
            price_usd: Decimal::new(1499, 2),
            image: Some(format!("https://cdn.example.com/{id}.jpg")),
        }
    }

    struct ReadOnlyStorage;

    impl WishlistStorage for ReadOnlyStorage {
        fn load(&self, _key: &str) -> Option<String> {
            None
        }

        fn save(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("quota exceeded".to_owned()))
        }
    }

    #[test]
    fn test_add_is_idempotent() {
        let mut wishlist = Wishlist::new();
        assert!(wishlist.add_to_wishlist(item("a")));
        assert_eq!(wishlist.len(), 1);

        assert!(!wishlist.add_to_wishlist(item("a")));
        assert_eq!(wishlist.len(), 1);
        assert!(wishlist.is_in_wishlist("a"));
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut wishlist = Wishlist::new();
        wishlist.add_to_wishlist(item("a"));
        wishlist.add_to_wishlist(item("b"));
        let before = wishlist.clone();

        assert!(!wishlist.remove_from_wishlist("zzz"));
        assert_eq!(wishlist, before);
    }

    #[test]
    fn test_insertion_order_is_kept() {
        let mut wishlist = Wishlist::new();
        for id in ["c", "a", "b"] {
            wishlist.add_to_wishlist(item(id));
        }
        assert!(wishlist.remove_from_wishlist("a"));
        wishlist.add_to_wishlist(item("a"));

        let ids: Vec<&str> = wishlist.items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["c", "b", "a"]);
    }

    #[test]
    fn test_persists_and_rehydrates() {
        let mut stored = PersistentWishlist::load(MemoryStorage::new());
        assert!(stored.items().is_empty());
        assert!(stored.add_to_wishlist(item("a")).unwrap());
        assert!(stored.add_to_wishlist(item("b")).unwrap());
        assert!(!stored.add_to_wishlist(item("a")).unwrap());

        let storage = stored.into_storage();
        let raw = storage.load(WISHLIST_STORAGE_KEY).unwrap();
        assert!(raw.contains("\"priceKrw\""));

        let reloaded = PersistentWishlist::load(storage);
        let ids: Vec<&str> = reloaded.items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
    }

    #[test]
    fn test_corrupt_snapshot_starts_empty() {
        let storage = MemoryStorage::new();
        storage.save(WISHLIST_STORAGE_KEY, "{not json").unwrap();
        let wishlist = PersistentWishlist::load(storage);
        assert!(wishlist.wishlist().is_empty());
    }

    #[test]
    fn test_snapshot_with_duplicates_is_deduplicated() {
        let storage = MemoryStorage::new();
        let snapshot = serde_json::to_string(&[item("a"), item("a"), item("b")]).unwrap();
        storage.save(WISHLIST_STORAGE_KEY, &snapshot).unwrap();

        let wishlist = PersistentWishlist::load(storage);
        assert_eq!(wishlist.items().len(), 2);
    }

    #[test]
    fn test_storage_failure_keeps_memory_state() {
        let mut stored = PersistentWishlist::load(ReadOnlyStorage);
        let result = stored.add_to_wishlist(item("a"));
        assert!(matches!(result, Err(StorageError::Unavailable(_))));
        assert!(stored.is_in_wishlist("a"));
    }

    #[test]
    fn test_separate_storages_are_independent() {
        let mut phone = PersistentWishlist::load(MemoryStorage::new());
        let laptop = PersistentWishlist::load(MemoryStorage::new());
        phone.add_to_wishlist(item("a")).unwrap();

        assert!(phone.is_in_wishlist("a"));
        assert!(!laptop.is_in_wishlist("a"));
    }
}
