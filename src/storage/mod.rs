//! Object-store boundary used by the image service.
use std::io::{self, Read};

use thiserror::Error;

use crate::domain::{BucketName, ObjectKey};

pub mod local;

pub use local::LocalObjectStore;

/// Convenience alias for store results.
pub type StoreResult<T> = Result<T, StoreError>;

/// Access policy attached to a stored object.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CannedAcl {
    Private,
    PublicRead,
}

impl CannedAcl {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Private => "private",
            Self::PublicRead => "public-read",
        }
    }
}

/// A single write request.
pub struct PutObject<'a> {
    pub bucket: &'a BucketName,
    pub key: &'a ObjectKey,
    pub body: &'a mut dyn Read,
    pub content_length: u64,
    pub acl: CannedAcl,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("object store I/O failure")]
    Io(#[source] io::Error),
    #[error("declared content length {declared} but wrote {written} bytes")]
    LengthMismatch { declared: u64, written: u64 },
}

/// Byte-blob storage reached by bucket and key.
pub trait ObjectStore: Send + Sync {
    fn put_object(&self, request: PutObject<'_>) -> StoreResult<()>;

    /// Public URL of an object. Deterministic in `(bucket, key)`.
    fn public_url(&self, bucket: &BucketName, key: &ObjectKey) -> String;

    /// Inverse of [`ObjectStore::public_url`]; `None` for foreign URLs.
    fn key_from_url(&self, bucket: &BucketName, url: &str) -> Option<ObjectKey>;

    /// Deleting a missing key succeeds.
    fn delete_object(&self, bucket: &BucketName, key: &ObjectKey) -> StoreResult<()>;
}
