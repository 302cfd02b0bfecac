use dynamodb_envelope::{AttributeActions, CryptoAction, MemoryStore, TableAttributes};

mod common;

fn key(id: &str) -> TableAttributes {
    let mut key = TableAttributes::new();
    key.insert("id", id);
    key
}

#[tokio::test]
async fn missing_record_is_not_found_not_an_error() {
    let table = common::gateway(MemoryStore::new(["id"]), common::default_actions());

    let found = table.get(&key("nope")).await.expect("Failed to get item");
    assert_eq!(found, None);

    let raw = table
        .get_raw(&key("nope"))
        .await
        .expect("Failed to get raw item");
    assert_eq!(raw, None);
}

#[tokio::test]
async fn encrypted_key_attribute_never_matches_a_lookup() {
    // No override for "id": the lookup key itself gets encrypted, which is
    // exactly the policy mistake the DoNothing action exists to avoid.
    let actions = AttributeActions::new(CryptoAction::EncryptAndSign);
    let table = common::gateway(MemoryStore::new(["id"]), actions);

    let mut item = TableAttributes::new();
    item.insert("id", "abc");
    item.insert("secret", "123456789");
    table.put(item).await.expect("Failed to put item");

    // The stored key is an opaque blob, so the plaintext lookup finds
    // nothing.
    let found = table.get(&key("abc")).await.expect("Failed to get item");
    assert_eq!(found, None);
}
