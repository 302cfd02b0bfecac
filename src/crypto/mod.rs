use crate::{
    actions::AttributeActions,
    encrypted_table::{TableAttribute, TableAttributes},
    errors::{EncryptionError, GetError, IntegrityError, KeyManagementError, PutError},
    material::MaterialsProvider,
};
use aes_gcm::{
    aead::{Aead, AeadCore, KeyInit, OsRng, Payload},
    Aes256Gcm, Nonce,
};
use log::debug;
use thiserror::Error;

/// Attribute holding the wrapped per-item data key.
pub(crate) const MATERIAL_KEY_ATTR: &str = "__env_key";

/// Attribute holding the material description of the envelope.
pub(crate) const MATERIAL_DESC_ATTR: &str = "__env_desc";

/// The one material description currently written and accepted.
pub(crate) const MATERIAL_DESCRIPTION: &str = "aes-256-gcm";

pub(crate) const RESERVED_ATTRS: [&str; 2] = [MATERIAL_KEY_ATTR, MATERIAL_DESC_ATTR];

const NONCE_LEN: usize = 12;

/// Error while encrypting an item's protected attributes.
#[derive(Error, Debug)]
pub enum SealError {
    #[error(transparent)]
    KeyManagement(#[from] KeyManagementError),
    #[error(transparent)]
    Encryption(#[from] EncryptionError),
}

/// Error while decrypting and verifying an item's protected attributes.
#[derive(Error, Debug)]
pub enum UnsealError {
    #[error(transparent)]
    KeyManagement(#[from] KeyManagementError),
    #[error(transparent)]
    Integrity(#[from] IntegrityError),
}

impl From<SealError> for PutError {
    fn from(error: SealError) -> Self {
        match error {
            SealError::KeyManagement(e) => PutError::KeyManagement(e),
            SealError::Encryption(e) => PutError::Encryption(e),
        }
    }
}

impl From<UnsealError> for GetError {
    fn from(error: UnsealError) -> Self {
        match error {
            UnsealError::KeyManagement(e) => GetError::KeyManagement(e),
            UnsealError::Integrity(e) => GetError::Integrity(e),
        }
    }
}

/// Encrypt every attribute resolving to `EncryptAndSign` under a fresh data
/// key and attach the envelope state attributes.
///
/// Items with no protected attributes pass through untouched and the
/// materials provider is never contacted.
pub(crate) async fn seal<M: MaterialsProvider>(
    item: TableAttributes,
    table_name: &str,
    actions: &AttributeActions,
    provider: &M,
) -> Result<TableAttributes, SealError> {
    let (protected, mut sealed) = item.partition(actions);
    debug!(
        "sealing {} protected and {} plaintext attributes",
        protected.len(),
        sealed.len()
    );

    if protected.is_empty() {
        return Ok(sealed);
    }

    let data_key = provider.generate_data_key().await?;
    let cipher = data_key_cipher(data_key.key_bytes())?;

    for (name, attribute) in protected {
        let envelope = encrypt_attribute(&cipher, table_name, &name, &attribute)?;
        sealed.insert(name, TableAttribute::Bytes(envelope));
    }

    sealed.insert(
        MATERIAL_KEY_ATTR,
        TableAttribute::Bytes(data_key.wrapped().to_vec()),
    );
    sealed.insert(
        MATERIAL_DESC_ATTR,
        TableAttribute::String(MATERIAL_DESCRIPTION.to_string()),
    );

    Ok(sealed)
}

/// Decrypt and verify every attribute resolving to `EncryptAndSign`,
/// stripping the envelope state attributes from the result.
pub(crate) async fn unseal<M: MaterialsProvider>(
    mut raw: TableAttributes,
    table_name: &str,
    actions: &AttributeActions,
    provider: &M,
) -> Result<TableAttributes, UnsealError> {
    let wrapped = raw.remove(MATERIAL_KEY_ATTR);
    let descriptor = raw.remove(MATERIAL_DESC_ATTR);

    let (protected, plaintext) = raw.partition(actions);
    debug!(
        "unsealing {} protected and {} plaintext attributes",
        protected.len(),
        plaintext.len()
    );

    if protected.is_empty() {
        return Ok(plaintext);
    }

    match descriptor {
        Some(TableAttribute::String(desc)) if desc == MATERIAL_DESCRIPTION => {}
        Some(TableAttribute::String(desc)) => {
            return Err(IntegrityError::DescriptorMismatch {
                expected: MATERIAL_DESCRIPTION.to_string(),
                actual: desc,
            }
            .into());
        }
        _ => return Err(IntegrityError::MissingKeyMaterial(MATERIAL_DESC_ATTR).into()),
    }

    let wrapped = match wrapped {
        Some(TableAttribute::Bytes(wrapped)) => wrapped,
        _ => return Err(IntegrityError::MissingKeyMaterial(MATERIAL_KEY_ATTR).into()),
    };

    let key_bytes = provider.decrypt_data_key(&wrapped).await?;
    let cipher = data_key_cipher(&key_bytes)?;

    let mut unsealed = plaintext;
    for (name, attribute) in protected {
        let value = decrypt_attribute(&cipher, table_name, &name, attribute)?;
        unsealed.insert(name, value);
    }

    Ok(unsealed)
}

fn data_key_cipher(key_bytes: &[u8]) -> Result<Aes256Gcm, KeyManagementError> {
    Aes256Gcm::new_from_slice(key_bytes).map_err(|_| {
        KeyManagementError::InvalidKeyMaterial(format!(
            "expected a 32 byte data key, got {}",
            key_bytes.len()
        ))
    })
}

/// AAD pins each ciphertext to its table, attribute name and algorithm so
/// blobs cannot be transplanted between attributes or tables undetected.
fn attribute_aad(table_name: &str, name: &str) -> Vec<u8> {
    format!("{table_name}/{name}/{MATERIAL_DESCRIPTION}").into_bytes()
}

fn encrypt_attribute(
    cipher: &Aes256Gcm,
    table_name: &str,
    name: &str,
    attribute: &TableAttribute,
) -> Result<Vec<u8>, EncryptionError> {
    let mut serialized = Vec::new();
    ciborium::ser::into_writer(attribute, &mut serialized)
        .map_err(|_| EncryptionError::Serialize(name.to_string()))?;

    let aad = attribute_aad(table_name, name);
    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
    let ciphertext = cipher
        .encrypt(
            &nonce,
            Payload {
                msg: &serialized,
                aad: &aad,
            },
        )
        .map_err(|_| EncryptionError::Encrypt(name.to_string()))?;

    let mut envelope = Vec::with_capacity(NONCE_LEN + ciphertext.len());
    envelope.extend_from_slice(&nonce);
    envelope.extend_from_slice(&ciphertext);

    Ok(envelope)
}

fn decrypt_attribute(
    cipher: &Aes256Gcm,
    table_name: &str,
    name: &str,
    attribute: TableAttribute,
) -> Result<TableAttribute, IntegrityError> {
    let TableAttribute::Bytes(envelope) = attribute else {
        return Err(IntegrityError::MalformedEnvelope(name.to_string()));
    };

    if envelope.len() < NONCE_LEN {
        return Err(IntegrityError::MalformedEnvelope(name.to_string()));
    }

    let (nonce, ciphertext) = envelope.split_at(NONCE_LEN);
    let aad = attribute_aad(table_name, name);
    let serialized = cipher
        .decrypt(
            Nonce::from_slice(nonce),
            Payload {
                msg: ciphertext,
                aad: &aad,
            },
        )
        .map_err(|_| IntegrityError::FailedVerification(name.to_string()))?;

    ciborium::de::from_reader(serialized.as_slice())
        .map_err(|_| IntegrityError::MalformedEnvelope(name.to_string()))
}
