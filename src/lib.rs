//! Client-side envelope encryption for Amazon DynamoDB items.
//!
//! [`EncryptedTable`] wraps a DynamoDB table with field-level encryption: an
//! [`AttributeActions`] policy names which attributes are encrypted and
//! integrity protected and which are stored in the clear, and `put`/`get`
//! apply it transparently. Each item is encrypted under its own data key,
//! obtained from AWS KMS (or any other [`MaterialsProvider`]) and stored in
//! wrapped form alongside the item, so plaintext key material never touches
//! the table.
//!
//! Attributes used as lookup keys must be left as
//! [`CryptoAction::DoNothing`] — an encrypted value can never be matched by
//! an equality lookup in the store.
//!
//! ```no_run
//! use dynamodb_envelope::{AttributeActions, CryptoAction, EncryptedTable, TableAttributes};
//!
//! # async fn run() -> Result<(), dynamodb_envelope::Error> {
//! let config = aws_config::load_from_env().await;
//!
//! let table = EncryptedTable::init(
//!     aws_sdk_dynamodb::Client::new(&config),
//!     aws_sdk_kms::Client::new(&config),
//!     "accounts",
//!     "arn:aws:kms:us-east-1:000000000000:key/00000000-0000-0000-0000-000000000000",
//!     AttributeActions::new(CryptoAction::EncryptAndSign)
//!         .with_attribute("account_id", CryptoAction::DoNothing),
//! )?;
//!
//! let mut item = TableAttributes::new();
//! item.insert("account_id", "123456789");
//! item.insert("card_number", "4111111111111111");
//!
//! table.put(item).await?;
//!
//! let mut key = TableAttributes::new();
//! key.insert("account_id", "123456789");
//!
//! let account = table.get(&key).await?;
//! # Ok(())
//! # }
//! ```

mod actions;
mod crypto;
pub mod encrypted_table;
pub mod errors;
pub mod material;
pub mod store;

pub use actions::{AttributeActions, CryptoAction};
pub use encrypted_table::{EncryptedTable, TableAttribute, TableAttributes};
pub use errors::Error;
pub use material::{DataKey, KmsMaterialsProvider, LocalMaterialsProvider, MaterialsProvider};
pub use store::{DynamoStore, ItemStore, MemoryStore};
