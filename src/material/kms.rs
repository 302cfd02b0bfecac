use super::{DataKey, MaterialsProvider, DATA_KEY_LEN};
use crate::errors::KeyManagementError;
use async_trait::async_trait;
use aws_sdk_kms::{primitives::Blob, types::DataKeySpec, Client};
use zeroize::Zeroizing;

/// Materials provider backed by AWS KMS.
///
/// Data keys are produced by `GenerateDataKey` and unwrapped by `Decrypt`,
/// both pinned to the configured key id. The key id is mandatory
/// configuration; there is no default.
pub struct KmsMaterialsProvider {
    client: Client,
    key_id: String,
}

impl KmsMaterialsProvider {
    pub fn new(client: Client, key_id: impl Into<String>) -> Self {
        Self {
            client,
            key_id: key_id.into(),
        }
    }

    pub fn key_id(&self) -> &str {
        &self.key_id
    }
}

#[async_trait]
impl MaterialsProvider for KmsMaterialsProvider {
    async fn generate_data_key(&self) -> Result<DataKey, KeyManagementError> {
        let response = self
            .client
            .generate_data_key()
            .key_id(&self.key_id)
            .key_spec(DataKeySpec::Aes256)
            .send()
            .await
            .map_err(|e| KeyManagementError::GenerateDataKey(e.to_string()))?;

        let plaintext = response.plaintext().ok_or_else(|| {
            KeyManagementError::GenerateDataKey("response contained no plaintext key".to_string())
        })?;
        let wrapped = response.ciphertext_blob().ok_or_else(|| {
            KeyManagementError::GenerateDataKey("response contained no ciphertext blob".to_string())
        })?;

        DataKey::new(
            Zeroizing::new(plaintext.as_ref().to_vec()),
            wrapped.as_ref().to_vec(),
        )
    }

    async fn decrypt_data_key(
        &self,
        wrapped: &[u8],
    ) -> Result<Zeroizing<Vec<u8>>, KeyManagementError> {
        let response = self
            .client
            .decrypt()
            .key_id(&self.key_id)
            .ciphertext_blob(Blob::new(wrapped.to_vec()))
            .send()
            .await
            .map_err(|e| KeyManagementError::DecryptDataKey(e.to_string()))?;

        let plaintext = response.plaintext().ok_or_else(|| {
            KeyManagementError::DecryptDataKey("response contained no plaintext".to_string())
        })?;

        if plaintext.as_ref().len() != DATA_KEY_LEN {
            return Err(KeyManagementError::InvalidKeyMaterial(format!(
                "expected a {DATA_KEY_LEN} byte data key, got {}",
                plaintext.as_ref().len()
            )));
        }

        Ok(Zeroizing::new(plaintext.as_ref().to_vec()))
    }
}
