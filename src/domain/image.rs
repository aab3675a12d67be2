use crate::domain::{ObjectKey, PostId};

/// Association between a post and one public image URL.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Image {
    pub id: i64,
    pub post_id: PostId,
    pub image_url: String,
}

/// Image association that has not been persisted yet.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NewImage {
    pub post_id: PostId,
    pub image_url: String,
}

impl NewImage {
    pub fn new(post_id: PostId, image_url: impl Into<String>) -> Self {
        Self {
            post_id,
            image_url: image_url.into(),
        }
    }
}

/// A file written to the object store. Immutable once created.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UploadedImage {
    key: ObjectKey,
    size: u64,
    url: String,
}

impl UploadedImage {
    pub fn new(key: ObjectKey, size: u64, url: String) -> Self {
        Self { key, size, url }
    }

    pub fn key(&self) -> &ObjectKey {
        &self.key
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn into_url(self) -> String {
        self.url
    }
}
