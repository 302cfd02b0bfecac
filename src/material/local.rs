use super::{DataKey, MaterialsProvider, DATA_KEY_LEN};
use crate::errors::KeyManagementError;
use aes_gcm::{
    aead::{Aead, AeadCore, KeyInit, OsRng},
    Aes256Gcm, Nonce,
};
use async_trait::async_trait;
use zeroize::Zeroizing;

const NONCE_LEN: usize = 12;

/// Materials provider that wraps data keys under a caller-supplied 256-bit
/// key-encryption key, with no external service involved.
///
/// Intended for tests and offline deployments where a KMS is unavailable.
/// The KEK must be sourced and protected by the caller.
pub struct LocalMaterialsProvider {
    kek: Zeroizing<[u8; 32]>,
}

impl LocalMaterialsProvider {
    pub fn new(kek: [u8; 32]) -> Self {
        Self {
            kek: Zeroizing::new(kek),
        }
    }

    fn cipher(&self) -> Aes256Gcm {
        Aes256Gcm::new((&*self.kek).into())
    }
}

#[async_trait]
impl MaterialsProvider for LocalMaterialsProvider {
    async fn generate_data_key(&self) -> Result<DataKey, KeyManagementError> {
        let key_bytes = Zeroizing::new(Aes256Gcm::generate_key(OsRng).to_vec());

        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let ciphertext = self
            .cipher()
            .encrypt(&nonce, key_bytes.as_slice())
            .map_err(|_| {
                KeyManagementError::GenerateDataKey("failed to wrap data key".to_string())
            })?;

        let mut wrapped = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        wrapped.extend_from_slice(&nonce);
        wrapped.extend_from_slice(&ciphertext);

        DataKey::new(key_bytes, wrapped)
    }

    async fn decrypt_data_key(
        &self,
        wrapped: &[u8],
    ) -> Result<Zeroizing<Vec<u8>>, KeyManagementError> {
        if wrapped.len() < NONCE_LEN {
            return Err(KeyManagementError::InvalidKeyMaterial(
                "wrapped data key is too short".to_string(),
            ));
        }

        let (nonce, ciphertext) = wrapped.split_at(NONCE_LEN);
        let key_bytes = self
            .cipher()
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .map_err(|_| {
                KeyManagementError::DecryptDataKey("failed to unwrap data key".to_string())
            })?;

        if key_bytes.len() != DATA_KEY_LEN {
            return Err(KeyManagementError::InvalidKeyMaterial(format!(
                "expected a {DATA_KEY_LEN} byte data key, got {}",
                key_bytes.len()
            )));
        }

        Ok(Zeroizing::new(key_bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEK: [u8; 32] = [3u8; 32];

    #[tokio::test]
    async fn wrap_unwrap_round_trip() {
        let provider = LocalMaterialsProvider::new(KEK);

        let data_key = provider.generate_data_key().await.unwrap();
        let unwrapped = provider.decrypt_data_key(data_key.wrapped()).await.unwrap();

        assert_eq!(&*unwrapped, data_key.key_bytes());
    }

    #[tokio::test]
    async fn fresh_key_per_call() {
        let provider = LocalMaterialsProvider::new(KEK);

        let a = provider.generate_data_key().await.unwrap();
        let b = provider.generate_data_key().await.unwrap();

        assert_ne!(a.key_bytes(), b.key_bytes());
        assert_ne!(a.wrapped(), b.wrapped());
    }

    #[tokio::test]
    async fn wrong_kek_fails_to_unwrap() {
        let provider = LocalMaterialsProvider::new(KEK);
        let other = LocalMaterialsProvider::new([9u8; 32]);

        let data_key = provider.generate_data_key().await.unwrap();
        let result = other.decrypt_data_key(data_key.wrapped()).await;

        assert!(matches!(
            result,
            Err(KeyManagementError::DecryptDataKey(_))
        ));
    }

    #[tokio::test]
    async fn truncated_wrap_is_rejected() {
        let provider = LocalMaterialsProvider::new(KEK);

        let result = provider.decrypt_data_key(&[0u8; 4]).await;

        assert!(matches!(
            result,
            Err(KeyManagementError::InvalidKeyMaterial(_))
        ));
    }
}
