use super::ItemStore;
use crate::{encrypted_table::TableAttributes, errors::StoreError};
use async_trait::async_trait;
use std::sync::{Arc, Mutex, PoisonError};

/// In-memory [`ItemStore`] with a declared key schema.
///
/// Records are matched by exact equality of their key attributes, including
/// the value type, which mirrors how an encrypted key value can never match
/// a plaintext lookup in a real store. Intended for tests and examples;
/// [`update`] exists so tests can corrupt stored ciphertext in place.
///
/// [`update`]: MemoryStore::update
#[derive(Clone)]
pub struct MemoryStore {
    key_attrs: Vec<String>,
    items: Arc<Mutex<Vec<(TableAttributes, TableAttributes)>>>,
}

impl MemoryStore {
    /// Create a store whose tables use the given key attribute names.
    pub fn new<I, S>(key_attrs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            key_attrs: key_attrs.into_iter().map(Into::into).collect(),
            items: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn key_of(&self, item: &TableAttributes) -> TableAttributes {
        self.key_attrs
            .iter()
            .filter_map(|name| item.get(name).map(|value| (name.clone(), value.clone())))
            .collect()
    }

    /// Mutate the stored record matching `key` in place. Returns `false` if
    /// no record matches.
    pub fn update(&self, key: &TableAttributes, f: impl FnOnce(&mut TableAttributes)) -> bool {
        let mut items = self.items.lock().unwrap_or_else(PoisonError::into_inner);

        match items.iter_mut().find(|(stored_key, _)| stored_key == key) {
            Some((_, item)) => {
                f(item);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ItemStore for MemoryStore {
    async fn put_item(&self, _table_name: &str, item: TableAttributes) -> Result<(), StoreError> {
        let key = self.key_of(&item);
        if key.len() != self.key_attrs.len() {
            let missing = self
                .key_attrs
                .iter()
                .find(|name| !item.contains(name))
                .cloned()
                .unwrap_or_default();
            return Err(StoreError::MissingKeyAttribute(missing));
        }

        let mut items = self.items.lock().unwrap_or_else(PoisonError::into_inner);

        match items.iter().position(|(stored_key, _)| *stored_key == key) {
            Some(index) => items[index].1 = item,
            None => items.push((key, item)),
        }

        Ok(())
    }

    async fn get_item(
        &self,
        _table_name: &str,
        key: &TableAttributes,
    ) -> Result<Option<TableAttributes>, StoreError> {
        let items = self.items.lock().unwrap_or_else(PoisonError::into_inner);

        Ok(items
            .iter()
            .find(|(stored_key, _)| stored_key == key)
            .map(|(_, item)| item.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, amount: i64) -> TableAttributes {
        let mut item = TableAttributes::new();
        item.insert("id", id);
        item.insert("amount", amount);
        item
    }

    fn key(id: &str) -> TableAttributes {
        let mut key = TableAttributes::new();
        key.insert("id", id);
        key
    }

    #[tokio::test]
    async fn put_then_get_by_key() {
        let store = MemoryStore::new(["id"]);

        store.put_item("t", item("a", 1)).await.unwrap();

        let found = store.get_item("t", &key("a")).await.unwrap();
        assert_eq!(found, Some(item("a", 1)));

        let missing = store.get_item("t", &key("b")).await.unwrap();
        assert_eq!(missing, None);
    }

    #[tokio::test]
    async fn put_replaces_existing_record() {
        let store = MemoryStore::new(["id"]);

        store.put_item("t", item("a", 1)).await.unwrap();
        store.put_item("t", item("a", 2)).await.unwrap();

        assert_eq!(store.len(), 1);
        let found = store.get_item("t", &key("a")).await.unwrap();
        assert_eq!(found, Some(item("a", 2)));
    }

    #[tokio::test]
    async fn put_without_key_attribute_is_rejected() {
        let store = MemoryStore::new(["id"]);

        let mut no_key = TableAttributes::new();
        no_key.insert("amount", 1);

        let result = store.put_item("t", no_key).await;
        assert!(matches!(
            result,
            Err(StoreError::MissingKeyAttribute(name)) if name == "id"
        ));
    }
}
