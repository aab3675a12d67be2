use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::domain::{BucketName, ObjectKey};
use crate::storage::{CannedAcl, ObjectStore, PutObject, StoreError, StoreResult};

const ACL_DIR: &str = ".acl";

/// Filesystem-backed object store: `{root}/{bucket}/{key}`.
///
/// Access policies are kept next to the objects in `{root}/{bucket}/.acl/{key}`.
#[derive(Clone, Debug)]
pub struct LocalObjectStore {
    root: PathBuf,
    public_base_url: String,
}

impl LocalObjectStore {
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        let public_base_url = public_base_url.into().trim_end_matches('/').to_string();
        Self {
            root: root.into(),
            public_base_url,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn bucket_dir(&self, bucket: &BucketName) -> PathBuf {
        self.root.join(bucket.as_str())
    }

    /// Absolute path of a stored object.
    pub fn object_path(&self, bucket: &BucketName, key: &ObjectKey) -> PathBuf {
        self.bucket_dir(bucket).join(key.as_str())
    }

    fn acl_path(&self, bucket: &BucketName, key: &ObjectKey) -> PathBuf {
        self.bucket_dir(bucket).join(ACL_DIR).join(key.as_str())
    }

    pub fn acl(&self, bucket: &BucketName, key: &ObjectKey) -> StoreResult<Option<CannedAcl>> {
        match fs::read_to_string(self.acl_path(bucket, key)) {
            Ok(raw) => Ok(match raw.trim() {
                "public-read" => Some(CannedAcl::PublicRead),
                _ => Some(CannedAcl::Private),
            }),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StoreError::Io(err)),
        }
    }

    fn remove_if_present(path: &Path) -> io::Result<()> {
        match fs::remove_file(path) {
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }
}

impl ObjectStore for LocalObjectStore {
    fn put_object(&self, request: PutObject<'_>) -> StoreResult<()> {
        let bucket_dir = self.bucket_dir(request.bucket);
        fs::create_dir_all(bucket_dir.join(ACL_DIR)).map_err(StoreError::Io)?;

        // Stage inside the bucket so the final rename stays on one filesystem.
        let mut staged = NamedTempFile::new_in(&bucket_dir).map_err(StoreError::Io)?;
        let written = io::copy(request.body, &mut staged).map_err(StoreError::Io)?;
        if written != request.content_length {
            return Err(StoreError::LengthMismatch {
                declared: request.content_length,
                written,
            });
        }

        // The policy goes in first so a visible object always has one.
        let acl_path = self.acl_path(request.bucket, request.key);
        fs::write(&acl_path, request.acl.as_str()).map_err(StoreError::Io)?;
        if let Err(err) = staged.persist(self.object_path(request.bucket, request.key)) {
            if let Err(cleanup) = Self::remove_if_present(&acl_path) {
                log::warn!("Failed to remove policy of {}: {cleanup}", request.key);
            }
            return Err(StoreError::Io(err.error));
        }

        log::debug!(
            "stored {}/{} ({} bytes, {})",
            request.bucket,
            request.key,
            written,
            request.acl.as_str()
        );
        Ok(())
    }

    fn public_url(&self, bucket: &BucketName, key: &ObjectKey) -> String {
        format!(
            "{}/{}/{}",
            self.public_base_url,
            bucket,
            urlencoding::encode(key.as_str())
        )
    }

    fn key_from_url(&self, bucket: &BucketName, url: &str) -> Option<ObjectKey> {
        let prefix = format!("{}/{}/", self.public_base_url, bucket);
        let encoded = url.strip_prefix(&prefix)?;
        let decoded = urlencoding::decode(encoded).ok()?;
        ObjectKey::try_new(decoded.into_owned()).ok()
    }

    fn delete_object(&self, bucket: &BucketName, key: &ObjectKey) -> StoreResult<()> {
        Self::remove_if_present(&self.object_path(bucket, key)).map_err(StoreError::Io)?;
        Self::remove_if_present(&self.acl_path(bucket, key)).map_err(StoreError::Io)
    }
}
