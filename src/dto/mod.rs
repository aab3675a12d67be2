use serde::Serialize;

use crate::domain::{Amenities, Image, OperatingTime, Post};

/// Serializable listing for callers rendering posts.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDto {
    pub id: Option<i64>,
    pub member_id: i64,
    pub title: String,
    pub content: String,
    pub location: String,
    pub price: i32,
    pub capacity: i32,
    pub content_details: String,
    pub like_count: i32,
    pub post_images: Vec<String>,
    pub amenities: Option<Amenities>,
    pub operating_time: Option<OperatingTime>,
}

impl From<Post> for PostDto {
    fn from(post: Post) -> Self {
        Self {
            id: post.id().map(|id| id.value()),
            member_id: post.member().value(),
            title: post.title().to_string(),
            content: post.content().to_string(),
            location: post.location().to_string(),
            price: post.price(),
            capacity: post.capacity(),
            content_details: post.content_details().to_string(),
            like_count: post.like_count(),
            post_images: post.post_images().to_vec(),
            amenities: post.amenities().cloned(),
            operating_time: post.operating_time().cloned(),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageDto {
    pub id: i64,
    pub image_url: String,
}

impl From<Image> for ImageDto {
    fn from(image: Image) -> Self {
        Self {
            id: image.id,
            image_url: image.image_url,
        }
    }
}
