#![allow(dead_code)]

use dynamodb_envelope::{
    AttributeActions, CryptoAction, EncryptedTable, LocalMaterialsProvider, MemoryStore,
};

pub const TABLE_NAME: &str = "accounts";

pub const TEST_KEK: [u8; 32] = *b"an example very very secret key.";

/// Default policy for the test tables: everything encrypted except the `id`
/// lookup key.
pub fn default_actions() -> AttributeActions {
    AttributeActions::new(CryptoAction::EncryptAndSign)
        .with_attribute("id", CryptoAction::DoNothing)
}

pub fn gateway(
    store: MemoryStore,
    actions: AttributeActions,
) -> EncryptedTable<MemoryStore, LocalMaterialsProvider> {
    gateway_with_kek(store, actions, TEST_KEK)
}

pub fn gateway_with_kek(
    store: MemoryStore,
    actions: AttributeActions,
    kek: [u8; 32],
) -> EncryptedTable<MemoryStore, LocalMaterialsProvider> {
    let _ = env_logger::builder().is_test(true).try_init();

    EncryptedTable::new(store, LocalMaterialsProvider::new(kek), TABLE_NAME, actions)
        .expect("failed to construct gateway")
}
