mod kms;
mod local;

pub use kms::KmsMaterialsProvider;
pub use local::LocalMaterialsProvider;

use crate::errors::KeyManagementError;
use async_trait::async_trait;
use std::fmt;
use zeroize::Zeroizing;

/// Length of the AES-256 data keys produced by every provider.
pub const DATA_KEY_LEN: usize = 32;

/// A freshly generated data key: the plaintext key bytes used to encrypt one
/// item, and the wrapped form stored alongside that item.
///
/// The plaintext half is zeroized on drop and excluded from `Debug` output.
pub struct DataKey {
    plaintext: Zeroizing<Vec<u8>>,
    wrapped: Vec<u8>,
}

impl DataKey {
    pub fn new(plaintext: Zeroizing<Vec<u8>>, wrapped: Vec<u8>) -> Result<Self, KeyManagementError> {
        if plaintext.len() != DATA_KEY_LEN {
            return Err(KeyManagementError::InvalidKeyMaterial(format!(
                "expected a {DATA_KEY_LEN} byte data key, got {}",
                plaintext.len()
            )));
        }

        Ok(Self { plaintext, wrapped })
    }

    pub(crate) fn key_bytes(&self) -> &[u8] {
        &self.plaintext
    }

    pub(crate) fn wrapped(&self) -> &[u8] {
        &self.wrapped
    }
}

impl fmt::Debug for DataKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataKey")
            .field("plaintext", &"<redacted>")
            .field("wrapped_len", &self.wrapped.len())
            .finish()
    }
}

/// The key-management collaborator: hands out per-item data keys and unwraps
/// them again on read.
///
/// The gateway only ever sees wrapped key blobs and short-lived plaintext
/// data keys; master key material never leaves the provider.
#[async_trait]
pub trait MaterialsProvider: Send + Sync {
    /// Generate a fresh AES-256 data key together with its wrapped form.
    async fn generate_data_key(&self) -> Result<DataKey, KeyManagementError>;

    /// Unwrap a data key previously produced by [`generate_data_key`].
    ///
    /// [`generate_data_key`]: MaterialsProvider::generate_data_key
    async fn decrypt_data_key(&self, wrapped: &[u8])
        -> Result<Zeroizing<Vec<u8>>, KeyManagementError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_key_rejects_wrong_length() {
        let result = DataKey::new(Zeroizing::new(vec![0u8; 16]), vec![1, 2, 3]);

        assert!(matches!(
            result,
            Err(KeyManagementError::InvalidKeyMaterial(_))
        ));
    }

    #[test]
    fn data_key_debug_redacts_plaintext() {
        let key = DataKey::new(Zeroizing::new(vec![7u8; 32]), vec![1, 2, 3]).unwrap();

        let rendered = format!("{key:?}");
        assert!(rendered.contains("<redacted>"));
        assert!(!rendered.contains('7'));
    }
}
