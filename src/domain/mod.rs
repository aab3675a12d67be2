//! Strongly-typed domain structures for listings and their images.
use std::fmt;
use std::path::{Component, Path};

use thiserror::Error;

pub mod error_code;
pub mod image;
pub mod post;

pub use error_code::ErrorCode;
pub use image::{Image, NewImage, UploadedImage};
pub use post::{Amenities, OperatingTime, Post};

/// Identifier assigned to a post by the persistence layer.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct PostId(i64);

impl PostId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl From<i64> for PostId {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of the member owning a post.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct MemberId(i64);

impl MemberId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl From<i64> for MemberId {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Name of the object-store bucket images are written to.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct BucketName(String);

impl BucketName {
    /// Bucket names are a single lowercase path component of 3 to 63 characters.
    pub fn try_new(value: impl Into<String>) -> Result<Self, TypeConstraintError> {
        let value = value.into();
        let valid_len = (3..=63).contains(&value.len());
        let valid_chars = value
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '.');
        let valid_edges = !value.starts_with(['-', '.']) && !value.ends_with(['-', '.']);

        if valid_len && valid_chars && valid_edges {
            Ok(Self(value))
        } else {
            Err(TypeConstraintError::InvalidBucketName)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BucketName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Key of a stored object (single path component).
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct ObjectKey(String);

impl ObjectKey {
    pub fn try_new(value: impl Into<String>) -> Result<Self, TypeConstraintError> {
        let value = value.into();
        let mut components = Path::new(&value).components();
        let single = match (components.next(), components.next()) {
            (Some(Component::Normal(component)), None) => component.to_string_lossy() == value,
            _ => false,
        };

        if single && !value.starts_with('.') {
            Ok(Self(value))
        } else {
            Err(TypeConstraintError::InvalidObjectKey)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TypeConstraintError {
    #[error("invalid bucket name")]
    InvalidBucketName,
    #[error("invalid object key")]
    InvalidObjectKey,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bucket_name_accepts_lowercase_dns_style() {
        let bucket = BucketName::try_new("share-office.images").unwrap();
        assert_eq!(bucket.as_str(), "share-office.images");
    }

    #[test]
    fn bucket_name_rejects_bad_input() {
        assert!(BucketName::try_new("ab").is_err());
        assert!(BucketName::try_new("Upper").is_err());
        assert!(BucketName::try_new("-leading").is_err());
        assert!(BucketName::try_new("with/slash").is_err());
    }

    #[test]
    fn object_key_is_single_component() {
        assert!(ObjectKey::try_new("photo_1.jpg").is_ok());
        assert!(ObjectKey::try_new("nested/photo.jpg").is_err());
        assert!(ObjectKey::try_new("../evil.jpg").is_err());
        assert!(ObjectKey::try_new(".public").is_err());
        assert!(ObjectKey::try_new("").is_err());
    }

    #[test]
    fn ids_display_their_value() {
        assert_eq!(PostId::from(12).to_string(), "12");
        assert_eq!(MemberId::new(3).value(), 3);
    }
}
