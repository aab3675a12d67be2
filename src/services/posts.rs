use std::sync::Arc;

use validator::Validate;

use crate::domain::{Amenities, ErrorCode, MemberId, OperatingTime, Post, PostId};
use crate::dto::{ImageDto, PostDto};
use crate::forms::post::PostForm;
use crate::forms::upload::UploadedFile;
use crate::repository::PostRepository;
use crate::services::{ImageService, ServiceError, ServiceResult};

/// Service managing listings on behalf of members.
#[derive(Clone)]
pub struct PostService {
    posts: Arc<dyn PostRepository>,
    images: ImageService,
}

impl PostService {
    pub fn new(posts: Arc<dyn PostRepository>, images: ImageService) -> Self {
        Self { posts, images }
    }

    fn validate(form: &PostForm) -> ServiceResult<()> {
        form.validate()
            .map_err(|e| ServiceError::Validation(e.to_string()))
    }

    /// Load a post that has not been soft-deleted.
    fn load_active(&self, post_id: PostId) -> ServiceResult<Post> {
        match self.posts.find(post_id)? {
            Some(post) if !post.is_deleted() => Ok(post),
            _ => Err(ErrorCode::NotExistPost.into()),
        }
    }

    /// Only the author may change a live post.
    fn ensure_editable(post: &Post, member: MemberId) -> Result<(), ErrorCode> {
        if post.is_deleted() {
            return Err(ErrorCode::NotExistPost);
        }
        if post.member() != member {
            return Err(ErrorCode::NotPostOwner);
        }
        Ok(())
    }

    /// Upload the images, store the post and record its image URLs.
    pub fn create_post(
        &self,
        member: MemberId,
        form: &PostForm,
        amenities: Amenities,
        operating_time: OperatingTime,
        images: Vec<UploadedFile>,
    ) -> ServiceResult<PostDto> {
        Self::validate(form)?;

        let urls = self.images.upload_many(images)?;
        let mut post = Post::new(form, amenities, operating_time, member);
        post.set_images(urls.clone());
        let post = match self.store_post(post, &urls) {
            Ok(post) => post,
            Err(err) => {
                log::error!("Failed to store post for member {member}: {err}");
                self.images.discard_urls(&urls);
                return Err(err);
            }
        };

        if let Some(id) = post.id() {
            log::info!("Member {member} created post {id} with {} images", urls.len());
        }
        Ok(PostDto::from(post))
    }

    fn store_post(&self, post: Post, urls: &[String]) -> ServiceResult<Post> {
        let post = self.posts.insert(post)?;
        self.images.save_image_list(&post, urls)?;
        Ok(post)
    }

    pub fn update_post(
        &self,
        member: MemberId,
        post_id: PostId,
        form: &PostForm,
        amenities: Amenities,
        operating_time: OperatingTime,
    ) -> ServiceResult<PostDto> {
        Self::validate(form)?;

        let post = self.posts.modify(post_id, &mut |post| {
            Self::ensure_editable(post, member)?;
            post.update(form, amenities.clone(), operating_time.clone());
            Ok(())
        })?;
        Ok(PostDto::from(post))
    }

    /// Like (`true`) or unlike (`false`) a post and return the new count.
    pub fn like_post(&self, post_id: PostId, liked: bool) -> ServiceResult<i32> {
        Ok(self.posts.update_like(post_id, liked)?)
    }

    /// Soft-delete a post. Its images stay in the object store.
    pub fn delete_post(&self, member: MemberId, post_id: PostId) -> ServiceResult<()> {
        self.posts.modify(post_id, &mut |post| {
            Self::ensure_editable(post, member)?;
            post.mark_deleted();
            Ok(())
        })?;
        log::info!("Member {member} deleted post {post_id}");
        Ok(())
    }

    pub fn get_post(&self, post_id: PostId) -> ServiceResult<PostDto> {
        self.load_active(post_id).map(PostDto::from)
    }

    pub fn get_post_images(&self, post_id: PostId) -> ServiceResult<Vec<ImageDto>> {
        self.load_active(post_id)?;
        let images = self.images.list_images(post_id)?;
        Ok(images.into_iter().map(ImageDto::from).collect())
    }
}
