use thiserror::Error;

/// Error talking to the key-management service when generating or unwrapping
/// a data key. Never retried automatically; surfaced to the caller.
#[derive(Error, Debug)]
pub enum KeyManagementError {
    #[error("GenerateDataKey: {0}")]
    GenerateDataKey(String),
    #[error("DecryptDataKey: {0}")]
    DecryptDataKey(String),
    #[error("Invalid key material: {0}")]
    InvalidKeyMaterial(String),
}

/// Error reading from or writing to the backing item store. Never retried
/// automatically; surfaced to the caller.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("AwsError: {0}")]
    Aws(String),
    #[error("Missing key attribute: {0}")]
    MissingKeyAttribute(String),
    #[error("ReadConversionError: {0}")]
    ReadConversion(#[from] ReadConversionError),
}

/// Decryption or verification failure on read. Indicates tampering, a wrong
/// key, or a policy mismatch, and is always fatal to the operation.
#[derive(Error, Debug)]
pub enum IntegrityError {
    #[error("Verification failed for attribute \"{0}\"")]
    FailedVerification(String),
    #[error("Malformed envelope for attribute \"{0}\"")]
    MalformedEnvelope(String),
    #[error("Material description mismatch: expected \"{expected}\", got \"{actual}\"")]
    DescriptorMismatch { expected: String, actual: String },
    #[error("Missing key material attribute \"{0}\"")]
    MissingKeyMaterial(&'static str),
}

/// Error preparing an attribute for encryption on write.
#[derive(Error, Debug)]
pub enum EncryptionError {
    #[error("Failed to serialize attribute \"{0}\"")]
    Serialize(String),
    #[error("Failed to encrypt attribute \"{0}\"")]
    Encrypt(String),
}

/// Error converting a stored DynamoDB item back into attribute values.
#[derive(Error, Debug)]
pub enum ReadConversionError {
    #[error("Unsupported DynamoDB attribute value")]
    UnsupportedValue,
}

/// Error returned by [`EncryptedTable::put`] when encrypting and writing an
/// item.
///
/// [`EncryptedTable::put`]: crate::EncryptedTable::put
#[derive(Error, Debug)]
pub enum PutError {
    #[error("Invalid item: {0}")]
    InvalidItem(String),
    #[error("KeyManagementError: {0}")]
    KeyManagement(#[from] KeyManagementError),
    #[error("EncryptionError: {0}")]
    Encryption(#[from] EncryptionError),
    #[error("StoreError: {0}")]
    Store(#[from] StoreError),
}

/// Error returned by [`EncryptedTable::get`] and [`EncryptedTable::get_raw`]
/// when reading, decrypting and verifying an item.
///
/// [`EncryptedTable::get`]: crate::EncryptedTable::get
/// [`EncryptedTable::get_raw`]: crate::EncryptedTable::get_raw
#[derive(Error, Debug)]
pub enum GetError {
    #[error("Invalid key: {0}")]
    InvalidKey(String),
    #[error("KeyManagementError: {0}")]
    KeyManagement(#[from] KeyManagementError),
    #[error("IntegrityError: {0}")]
    Integrity(#[from] IntegrityError),
    #[error("StoreError: {0}")]
    Store(#[from] StoreError),
}

/// Error returned by [`EncryptedTable::new`] and [`EncryptedTable::init`].
///
/// [`EncryptedTable::new`]: crate::EncryptedTable::new
/// [`EncryptedTable::init`]: crate::EncryptedTable::init
#[derive(Error, Debug)]
pub enum InitError {
    #[error("Table name must not be empty")]
    EmptyTableName,
    #[error("Key id must not be empty")]
    EmptyKeyId,
}

/// Error abstracting all errors returned by `dynamodb-envelope`.
///
/// Functions that mix operations can return this type and rely on `?` to
/// convert from the per-operation errors.
#[derive(Error, Debug)]
pub enum Error {
    #[error("InitError: {0}")]
    Init(#[from] InitError),
    #[error("PutError: {0}")]
    Put(#[from] PutError),
    #[error("GetError: {0}")]
    Get(#[from] GetError),
}
