//! `Mutex`-guarded in-memory repositories.
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use crate::domain::{Image, NewImage, Post, PostId};
use crate::repository::{
    ImageRepository, PostChange, PostRepository, RepositoryError, RepositoryResult,
};

fn lock<T>(mutex: &Mutex<T>) -> RepositoryResult<MutexGuard<'_, T>> {
    mutex.lock().map_err(|_| RepositoryError::Poisoned)
}

#[derive(Debug, Default)]
struct PostTable {
    next_id: i64,
    rows: BTreeMap<PostId, Post>,
}

#[derive(Debug, Default)]
pub struct MemoryPostRepository {
    table: Mutex<PostTable>,
}

impl MemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PostRepository for MemoryPostRepository {
    fn insert(&self, mut post: Post) -> RepositoryResult<Post> {
        let mut table = lock(&self.table)?;
        table.next_id += 1;
        let id = PostId::new(table.next_id);
        post.assign_id(id);
        table.rows.insert(id, post.clone());
        Ok(post)
    }

    fn find(&self, id: PostId) -> RepositoryResult<Option<Post>> {
        Ok(lock(&self.table)?.rows.get(&id).cloned())
    }

    fn modify(&self, id: PostId, change: &mut PostChange<'_>) -> RepositoryResult<Post> {
        let mut table = lock(&self.table)?;
        let row = table.rows.get_mut(&id).ok_or(RepositoryError::NotFound)?;

        // Work on a copy so a rejected change leaves the row as it was.
        let mut updated = row.clone();
        change(&mut updated).map_err(RepositoryError::Rejected)?;
        *row = updated.clone();
        Ok(updated)
    }
}

#[derive(Debug, Default)]
struct ImageTable {
    next_id: i64,
    rows: Vec<Image>,
}

#[derive(Debug, Default)]
pub struct MemoryImageRepository {
    table: Mutex<ImageTable>,
}

impl MemoryImageRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ImageRepository for MemoryImageRepository {
    fn save_and_flush(&self, image: NewImage) -> RepositoryResult<Image> {
        let mut table = lock(&self.table)?;
        table.next_id += 1;
        let record = Image {
            id: table.next_id,
            post_id: image.post_id,
            image_url: image.image_url,
        };
        table.rows.push(record.clone());
        Ok(record)
    }

    fn list_by_post(&self, post_id: PostId) -> RepositoryResult<Vec<Image>> {
        Ok(lock(&self.table)?
            .rows
            .iter()
            .filter(|image| image.post_id == post_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use super::*;
    use crate::domain::{Amenities, ErrorCode, MemberId, OperatingTime};
    use crate::forms::post::PostForm;

    fn post() -> Post {
        let form = PostForm {
            title: "Hongdae loft".to_string(),
            content: "Open space".to_string(),
            location: "Mapo-gu".to_string(),
            price: 300_000,
            capacity: 8,
            content_details: "Projector".to_string(),
        };
        Post::new(&form, Amenities::default(), OperatingTime::default(), MemberId::new(1))
    }

    #[test]
    fn insert_assigns_sequential_ids() {
        let repo = MemoryPostRepository::new();
        let first = repo.insert(post()).unwrap();
        let second = repo.insert(post()).unwrap();

        assert_eq!(first.id(), Some(PostId::new(1)));
        assert_eq!(second.id(), Some(PostId::new(2)));
        assert_eq!(repo.find(PostId::new(2)).unwrap(), Some(second));
    }

    #[test]
    fn modify_writes_back_the_changed_row() {
        let repo = MemoryPostRepository::new();
        let id = repo.insert(post()).unwrap().id().unwrap();

        let written = repo
            .modify(id, &mut |post| {
                post.mark_deleted();
                Ok(())
            })
            .unwrap();

        assert!(written.is_deleted());
        assert!(repo.find(id).unwrap().unwrap().is_deleted());
        assert!(matches!(
            repo.modify(PostId::new(9), &mut |_| Ok(())),
            Err(RepositoryError::NotFound)
        ));
    }

    #[test]
    fn rejected_modify_leaves_row_untouched() {
        let repo = MemoryPostRepository::new();
        let id = repo.insert(post()).unwrap().id().unwrap();

        let err = repo
            .modify(id, &mut |post| {
                post.mark_deleted();
                Err(ErrorCode::NotPostOwner)
            })
            .unwrap_err();

        assert!(matches!(
            err,
            RepositoryError::Rejected(ErrorCode::NotPostOwner)
        ));
        assert!(!repo.find(id).unwrap().unwrap().is_deleted());
    }

    #[test]
    fn modify_starts_from_the_current_row_not_an_earlier_read() {
        let repo = MemoryPostRepository::new();
        let id = repo.insert(post()).unwrap().id().unwrap();

        let earlier = repo.find(id).unwrap().unwrap();
        repo.update_like(id, true).unwrap();
        repo.modify(id, &mut |post| {
            post.mark_deleted();
            Ok(())
        })
        .unwrap();

        let current = repo.find(id).unwrap().unwrap();
        assert_eq!(earlier.like_count(), 0);
        assert_eq!(current.like_count(), 1);
        assert!(current.is_deleted());
    }

    #[test]
    fn update_like_on_deleted_post_is_rejected() {
        let repo = MemoryPostRepository::new();
        let id = repo.insert(post()).unwrap().id().unwrap();
        repo.modify(id, &mut |post| {
            post.mark_deleted();
            Ok(())
        })
        .unwrap();

        assert!(matches!(
            repo.update_like(id, true),
            Err(RepositoryError::Rejected(ErrorCode::NotExistPost))
        ));
        assert_eq!(repo.find(id).unwrap().unwrap().like_count(), 0);
    }

    #[test]
    fn update_like_on_missing_post_fails() {
        let repo = MemoryPostRepository::new();
        assert!(matches!(
            repo.update_like(PostId::new(9), true),
            Err(RepositoryError::NotFound)
        ));
    }

    #[test]
    fn concurrent_likes_are_not_lost() {
        let repo = Arc::new(MemoryPostRepository::new());
        let id = repo.insert(post()).unwrap().id().unwrap();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let repo = Arc::clone(&repo);
                thread::spawn(move || {
                    for _ in 0..100 {
                        repo.update_like(id, true).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(repo.find(id).unwrap().unwrap().like_count(), 800);
    }

    #[test]
    fn images_are_listed_per_post_in_insertion_order() {
        let repo = MemoryImageRepository::new();
        repo.save_and_flush(NewImage::new(PostId::new(1), "a")).unwrap();
        repo.save_and_flush(NewImage::new(PostId::new(2), "b")).unwrap();
        repo.save_and_flush(NewImage::new(PostId::new(1), "c")).unwrap();

        let urls: Vec<String> = repo
            .list_by_post(PostId::new(1))
            .unwrap()
            .into_iter()
            .map(|image| image.image_url)
            .collect();
        assert_eq!(urls, vec!["a".to_string(), "c".to_string()]);
    }
}
