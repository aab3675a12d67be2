//! Relational persistence boundary for posts and their image records.
use thiserror::Error;

use crate::domain::{ErrorCode, Image, NewImage, Post, PostId};

pub mod memory;

pub use memory::{MemoryImageRepository, MemoryPostRepository};

/// Convenience alias for repository results.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("storage lock poisoned")]
    Poisoned,
    #[error("change rejected: {0}")]
    Rejected(ErrorCode),
}

/// In-place change applied to a stored post. Returning an error leaves the
/// row untouched.
pub type PostChange<'a> = dyn FnMut(&mut Post) -> Result<(), ErrorCode> + 'a;

pub trait PostRepository: Send + Sync {
    /// Persist a new post and return it with its assigned identity.
    fn insert(&self, post: Post) -> RepositoryResult<Post>;

    fn find(&self, id: PostId) -> RepositoryResult<Option<Post>>;

    /// Load, change and write back the stored row as one step, so no other
    /// mutation of the same post can interleave. Returns the row as written.
    ///
    /// Fails with [`RepositoryError::NotFound`] for unknown ids and with
    /// [`RepositoryError::Rejected`] when `change` refuses the row.
    fn modify(&self, id: PostId, change: &mut PostChange<'_>) -> RepositoryResult<Post>;

    /// Apply [`Post::update_like`] to a live post and return the new count.
    fn update_like(&self, id: PostId, liked: bool) -> RepositoryResult<i32> {
        let post = self.modify(id, &mut |post| {
            if post.is_deleted() {
                return Err(ErrorCode::NotExistPost);
            }
            post.update_like(liked);
            Ok(())
        })?;
        Ok(post.like_count())
    }
}

pub trait ImageRepository: Send + Sync {
    /// Write the record through immediately and return it with its identity.
    fn save_and_flush(&self, image: NewImage) -> RepositoryResult<Image>;

    fn list_by_post(&self, post_id: PostId) -> RepositoryResult<Vec<Image>>;
}
