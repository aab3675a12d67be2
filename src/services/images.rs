use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{
    BucketName, ErrorCode, Image, NewImage, ObjectKey, Post, PostId, TypeConstraintError,
    UploadedImage,
};
use crate::forms::upload::UploadedFile;
use crate::models::config::StorageConfig;
use crate::repository::ImageRepository;
use crate::services::{ServiceError, ServiceResult};
use crate::storage::{CannedAcl, LocalObjectStore, ObjectStore, PutObject, StoreError};

/// Service storing listing images in the object store and recording them
/// against their post.
#[derive(Clone)]
pub struct ImageService {
    store: Arc<dyn ObjectStore>,
    images: Arc<dyn ImageRepository>,
    bucket: BucketName,
}

impl ImageService {
    pub fn new(
        store: Arc<dyn ObjectStore>,
        images: Arc<dyn ImageRepository>,
        bucket: BucketName,
    ) -> Self {
        Self {
            store,
            images,
            bucket,
        }
    }

    /// Build a service over a [`LocalObjectStore`] described by `config`.
    pub fn from_config(
        config: &StorageConfig,
        images: Arc<dyn ImageRepository>,
    ) -> Result<Self, TypeConstraintError> {
        let bucket = BucketName::try_new(config.bucket.as_str())?;
        let store = LocalObjectStore::new(&config.root, config.public_base_url.as_str());
        Ok(Self::new(Arc::new(store), images, bucket))
    }

    pub fn bucket(&self) -> &BucketName {
        &self.bucket
    }

    /// `{stem}_{token}.{ext}` from the last path component of `original`.
    fn generate_key(original: &str) -> ServiceResult<ObjectKey> {
        let base = original.rsplit(['/', '\\']).next().unwrap_or_default();
        let token = Uuid::new_v4();
        let name = match base.rsplit_once('.') {
            Some((stem, extension)) if !extension.is_empty() => {
                format!("{}_{token}.{extension}", stem.trim_start_matches('.'))
            }
            _ => format!("{}_{token}", base.trim_matches('.')),
        };
        ObjectKey::try_new(name).map_err(ServiceError::InvalidName)
    }

    fn store_file(&self, file: &UploadedFile) -> ServiceResult<UploadedImage> {
        let key = Self::generate_key(file.original_name())?;
        let upload_failed = |source: StoreError| ServiceError::UploadFailed {
            file_name: key.to_string(),
            source,
        };

        let mut body = file
            .file
            .reopen()
            .map_err(|err| upload_failed(StoreError::Io(err)))?;
        self.store
            .put_object(PutObject {
                bucket: &self.bucket,
                key: &key,
                body: &mut body,
                content_length: file.size,
                acl: CannedAcl::PublicRead,
            })
            .map_err(upload_failed)?;

        let url = self.store.public_url(&self.bucket, &key);
        Ok(UploadedImage::new(key, file.size, url))
    }

    /// Remove objects written earlier in a failed batch.
    fn discard(&self, keys: &[ObjectKey]) {
        for key in keys {
            if let Err(err) = self.store.delete_object(&self.bucket, key) {
                log::warn!("Failed to discard {key} after batch failure: {err}");
            }
        }
    }

    /// Best-effort removal of objects behind URLs returned by this service.
    pub fn discard_urls(&self, urls: &[String]) {
        let keys: Vec<ObjectKey> = urls
            .iter()
            .filter_map(|url| self.key_from_url(url))
            .collect();
        self.discard(&keys);
    }

    /// Upload every file in order and return their public URLs in the same order.
    ///
    /// If one write fails, the objects already written by this call are
    /// deleted before the error is returned.
    pub fn upload_many(&self, files: Vec<UploadedFile>) -> ServiceResult<Vec<String>> {
        if files.is_empty() {
            return Err(ErrorCode::InvalidImage.into());
        }

        let mut stored: Vec<ObjectKey> = Vec::with_capacity(files.len());
        let mut urls = Vec::with_capacity(files.len());
        for file in &files {
            match self.store_file(file) {
                Ok(image) => {
                    stored.push(image.key().clone());
                    urls.push(image.into_url());
                }
                Err(err) => {
                    log::error!("Image upload error: {err}");
                    self.discard(&stored);
                    return Err(err);
                }
            }
        }

        Ok(urls)
    }

    /// Upload a single non-empty file and return its public URL.
    pub fn upload_one(&self, file: UploadedFile) -> ServiceResult<String> {
        if file.is_empty() {
            return Err(ErrorCode::EmptyImageFile.into());
        }

        let image = self.store_file(&file)?;
        log::info!("Uploaded image {}", image.key());
        Ok(image.into_url())
    }

    /// Record every URL against `post`, one write per URL. Earlier records
    /// stay if a later one fails.
    pub fn save_image_list(&self, post: &Post, urls: &[String]) -> ServiceResult<()> {
        let post_id = post.id().ok_or(ErrorCode::NotExistPost)?;
        for url in urls {
            self.images
                .save_and_flush(NewImage::new(post_id, url.as_str()))?;
        }
        Ok(())
    }

    pub fn list_images(&self, post_id: PostId) -> ServiceResult<Vec<Image>> {
        Ok(self.images.list_by_post(post_id)?)
    }

    /// Delete a stored object by key. Image records are not touched.
    pub fn delete(&self, name: &str) -> ServiceResult<()> {
        let key = ObjectKey::try_new(name).map_err(ServiceError::InvalidName)?;
        self.store
            .delete_object(&self.bucket, &key)
            .map_err(ServiceError::DeleteFailed)
    }

    /// Stored key behind a URL returned by this service.
    pub fn key_from_url(&self, url: &str) -> Option<ObjectKey> {
        self.store.key_from_url(&self.bucket, url)
    }
}
