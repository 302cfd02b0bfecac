use dynamodb_envelope::{
    errors::{GetError, IntegrityError, KeyManagementError},
    MemoryStore, TableAttribute, TableAttributes,
};

mod common;

fn sample_item() -> TableAttributes {
    let mut item = TableAttributes::new();
    item.insert("id", "abc");
    item.insert("secret", "123456789");
    item.insert("amount", 42);
    item
}

fn key(id: &str) -> TableAttributes {
    let mut key = TableAttributes::new();
    key.insert("id", id);
    key
}

#[tokio::test]
async fn altered_ciphertext_fails_with_integrity_error() {
    let store = MemoryStore::new(["id"]);
    let table = common::gateway(store.clone(), common::default_actions());

    table.put(sample_item()).await.expect("Failed to put item");

    let mutated = store.update(&key("abc"), |item| {
        let Some(TableAttribute::Bytes(envelope)) = item.get("secret").cloned() else {
            panic!("expected stored ciphertext for \"secret\"");
        };
        let mut envelope = envelope;
        let last = envelope.len() - 1;
        envelope[last] ^= 0xff;
        item.insert("secret", TableAttribute::Bytes(envelope));
    });
    assert!(mutated);

    let result = table.get(&key("abc")).await;
    assert!(matches!(
        result,
        Err(GetError::Integrity(IntegrityError::FailedVerification(name))) if name == "secret"
    ));
}

#[tokio::test]
async fn transplanted_ciphertext_fails_with_integrity_error() {
    let store = MemoryStore::new(["id"]);
    let table = common::gateway(store.clone(), common::default_actions());

    table.put(sample_item()).await.expect("Failed to put item");

    // Move a valid ciphertext to a different attribute name.
    store.update(&key("abc"), |item| {
        let secret = item.get("secret").cloned().expect("missing secret");
        item.insert("amount", secret);
    });

    let result = table.get(&key("abc")).await;
    assert!(matches!(
        result,
        Err(GetError::Integrity(IntegrityError::FailedVerification(name))) if name == "amount"
    ));
}

#[tokio::test]
async fn stripped_key_material_fails_with_integrity_error() {
    let store = MemoryStore::new(["id"]);
    let table = common::gateway(store.clone(), common::default_actions());

    table.put(sample_item()).await.expect("Failed to put item");

    store.update(&key("abc"), |item| {
        item.remove("__env_key");
    });

    let result = table.get(&key("abc")).await;
    assert!(matches!(
        result,
        Err(GetError::Integrity(IntegrityError::MissingKeyMaterial(_)))
    ));
}

#[tokio::test]
async fn wrong_kek_fails_with_key_management_error() {
    let store = MemoryStore::new(["id"]);
    let writer = common::gateway(store.clone(), common::default_actions());

    writer.put(sample_item()).await.expect("Failed to put item");

    // Same store, different key-encryption key.
    let reader = common::gateway_with_kek(store, common::default_actions(), [0u8; 32]);

    let result = reader.get(&key("abc")).await;
    assert!(matches!(
        result,
        Err(GetError::KeyManagement(KeyManagementError::DecryptDataKey(_)))
    ));
}
