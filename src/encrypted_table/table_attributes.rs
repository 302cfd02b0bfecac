use super::TableAttribute;
use crate::{
    actions::{AttributeActions, CryptoAction},
    errors::ReadConversionError,
};
use aws_sdk_dynamodb::types::AttributeValue;
use std::collections::HashMap;

/// A collection of named attributes: one item to store, or the key
/// identifying one.
///
/// A key is simply the subset of attributes sufficient to identify a stored
/// record (partition key, optionally plus a sort key).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableAttributes(HashMap<String, TableAttribute>);

impl TableAttributes {
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<TableAttribute>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&TableAttribute> {
        self.0.get(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<TableAttribute> {
        self.0.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &TableAttribute)> {
        self.0.iter()
    }

    /// Split the attributes into those resolving to
    /// [`CryptoAction::EncryptAndSign`] and those resolving to
    /// [`CryptoAction::DoNothing`].
    pub(crate) fn partition(self, actions: &AttributeActions) -> (Self, Self) {
        let (protected, plaintext): (HashMap<_, _>, HashMap<_, _>) = self
            .0
            .into_iter()
            .partition(|(name, _)| actions.action_for(name) == CryptoAction::EncryptAndSign);

        (protected.into(), plaintext.into())
    }

}

impl From<HashMap<String, TableAttribute>> for TableAttributes {
    fn from(map: HashMap<String, TableAttribute>) -> Self {
        Self(map)
    }
}

impl<K> FromIterator<(K, TableAttribute)> for TableAttributes
where
    K: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, TableAttribute)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl IntoIterator for TableAttributes {
    type Item = (String, TableAttribute);
    type IntoIter = std::collections::hash_map::IntoIter<String, TableAttribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl From<TableAttributes> for HashMap<String, AttributeValue> {
    fn from(attributes: TableAttributes) -> Self {
        attributes
            .0
            .into_iter()
            .map(|(name, value)| (name, value.into()))
            .collect()
    }
}

impl TryFrom<HashMap<String, AttributeValue>> for TableAttributes {
    type Error = ReadConversionError;

    fn try_from(item: HashMap<String, AttributeValue>) -> Result<Self, Self::Error> {
        item.into_iter()
            .map(|(name, value)| Ok((name, TableAttribute::try_from(value)?)))
            .collect::<Result<HashMap<_, _>, _>>()
            .map(Self)
    }
}
