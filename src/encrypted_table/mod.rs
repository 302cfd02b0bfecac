mod table_attribute;
mod table_attributes;

pub use self::{table_attribute::TableAttribute, table_attributes::TableAttributes};

use crate::{
    actions::AttributeActions,
    crypto,
    errors::{GetError, InitError, PutError},
    material::{KmsMaterialsProvider, MaterialsProvider},
    store::{DynamoStore, ItemStore},
};
use log::{debug, info};

/// An item gateway that transparently encrypts and decrypts attributes
/// according to an [`AttributeActions`] policy.
///
/// Attributes resolving to [`CryptoAction::EncryptAndSign`] are envelope
/// encrypted under a per-item data key obtained from the materials provider;
/// attributes resolving to [`CryptoAction::DoNothing`] are stored and read
/// verbatim, so they stay usable as lookup keys.
///
/// A gateway is stateless between calls and can be shared freely across
/// tasks. Consistency of reads after writes is inherited from the backing
/// store.
///
/// [`CryptoAction::EncryptAndSign`]: crate::CryptoAction::EncryptAndSign
/// [`CryptoAction::DoNothing`]: crate::CryptoAction::DoNothing
pub struct EncryptedTable<S = DynamoStore, M = KmsMaterialsProvider> {
    store: S,
    provider: M,
    table_name: String,
    actions: AttributeActions,
}

impl EncryptedTable<DynamoStore, KmsMaterialsProvider> {
    /// Construct a gateway over DynamoDB and AWS KMS.
    ///
    /// Both clients are built and owned by the caller; the gateway never
    /// resolves ambient credentials itself. The KMS key id is mandatory.
    pub fn init(
        db: aws_sdk_dynamodb::Client,
        kms: aws_sdk_kms::Client,
        table_name: impl Into<String>,
        key_id: impl Into<String>,
        actions: AttributeActions,
    ) -> Result<Self, InitError> {
        let key_id = key_id.into();
        if key_id.is_empty() {
            return Err(InitError::EmptyKeyId);
        }

        Self::new(
            DynamoStore::new(db),
            KmsMaterialsProvider::new(kms, key_id),
            table_name,
            actions,
        )
    }
}

impl<S, M> EncryptedTable<S, M>
where
    S: ItemStore,
    M: MaterialsProvider,
{
    /// Construct a gateway over any [`ItemStore`] / [`MaterialsProvider`]
    /// pair.
    pub fn new(
        store: S,
        provider: M,
        table_name: impl Into<String>,
        actions: AttributeActions,
    ) -> Result<Self, InitError> {
        let table_name = table_name.into();
        if table_name.is_empty() {
            return Err(InitError::EmptyTableName);
        }

        info!("Encrypted table \"{table_name}\" ready");

        Ok(Self {
            store,
            provider,
            table_name,
            actions,
        })
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Encrypt the protected attributes of `item` and write it.
    ///
    /// The item must be non-empty, must not use the reserved envelope
    /// attribute names, and must contain the table's key attributes (the
    /// store rejects it otherwise). Either the whole item is written or
    /// nothing is; there is no partially encrypted state.
    pub async fn put(&self, item: TableAttributes) -> Result<(), PutError> {
        if item.is_empty() {
            return Err(PutError::InvalidItem(
                "item must contain at least one attribute".to_string(),
            ));
        }

        for reserved in crypto::RESERVED_ATTRS {
            if item.contains(reserved) {
                return Err(PutError::InvalidItem(format!(
                    "attribute name \"{reserved}\" is reserved"
                )));
            }
        }

        debug!(
            "put: {} attributes into table \"{}\"",
            item.len(),
            self.table_name
        );

        let sealed = crypto::seal(item, &self.table_name, &self.actions, &self.provider).await?;
        self.store.put_item(&self.table_name, sealed).await?;

        Ok(())
    }

    /// Read the item identified by `key`, decrypting and verifying every
    /// protected attribute.
    ///
    /// Returns `Ok(None)` when no record matches. A failed verification is
    /// an [`IntegrityError`] and never yields corrupted plaintext.
    ///
    /// [`IntegrityError`]: crate::errors::IntegrityError
    pub async fn get(&self, key: &TableAttributes) -> Result<Option<TableAttributes>, GetError> {
        match self.fetch(key).await? {
            None => Ok(None),
            Some(raw) => {
                let unsealed =
                    crypto::unseal(raw, &self.table_name, &self.actions, &self.provider).await?;
                Ok(Some(unsealed))
            }
        }
    }

    /// Read the stored record verbatim, bypassing decryption.
    ///
    /// Encrypted attributes come back as opaque blobs and the envelope state
    /// attributes are included. Useful for diagnostics.
    pub async fn get_raw(
        &self,
        key: &TableAttributes,
    ) -> Result<Option<TableAttributes>, GetError> {
        self.fetch(key).await
    }

    async fn fetch(&self, key: &TableAttributes) -> Result<Option<TableAttributes>, GetError> {
        if key.is_empty() {
            return Err(GetError::InvalidKey(
                "key must contain at least one attribute".to_string(),
            ));
        }

        debug!(
            "get: {} key attributes from table \"{}\"",
            key.len(),
            self.table_name
        );

        Ok(self.store.get_item(&self.table_name, key).await?)
    }
}
