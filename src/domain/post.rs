//! Listing entity and its owned sub-records.
use serde::{Deserialize, Serialize};

use crate::domain::{MemberId, PostId};
use crate::forms::post::PostForm;

/// Facilities offered by a space. Owned by exactly one post.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Amenities {
    pub wifi: bool,
    pub parking: bool,
    pub printer: bool,
    pub kitchen: bool,
    pub meeting_room: bool,
    pub locker: bool,
    pub air_conditioning: bool,
}

/// Opening hours of a space. Owned by exactly one post.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperatingTime {
    /// `HH:MM`
    pub opens_at: String,
    /// `HH:MM`
    pub closes_at: String,
    pub holidays: Option<String>,
}

/// A rental-space listing.
///
/// Amenities and operating time live inside the value, so removing a post
/// removes them too. Deletion is logical through [`Post::mark_deleted`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Post {
    id: Option<PostId>,
    member: MemberId,
    title: String,
    content: String,
    location: String,
    price: i32,
    capacity: i32,
    content_details: String,
    like_count: i32,
    post_images: Vec<String>,
    amenities: Option<Amenities>,
    operating_time: Option<OperatingTime>,
    is_deleted: bool,
}

/// Replace the two-character escape `\n` with a real newline.
pub fn normalize_newlines(value: &str) -> String {
    value.replace("\\n", "\n")
}

impl Post {
    pub fn new(
        form: &PostForm,
        amenities: Amenities,
        operating_time: OperatingTime,
        member: MemberId,
    ) -> Self {
        Self {
            id: None,
            member,
            title: form.title.clone(),
            content: normalize_newlines(&form.content),
            location: form.location.clone(),
            price: form.price,
            capacity: form.capacity,
            content_details: normalize_newlines(&form.content_details),
            like_count: 0,
            post_images: Vec::new(),
            amenities: Some(amenities),
            operating_time: Some(operating_time),
            is_deleted: false,
        }
    }

    /// Replace every editable field. Owner, likes, images and the
    /// soft-delete flag are left alone.
    pub fn update(&mut self, form: &PostForm, amenities: Amenities, operating_time: OperatingTime) {
        self.title = form.title.clone();
        self.content = normalize_newlines(&form.content);
        self.location = form.location.clone();
        self.price = form.price;
        self.capacity = form.capacity;
        self.content_details = normalize_newlines(&form.content_details);
        self.amenities = Some(amenities);
        self.operating_time = Some(operating_time);
    }

    /// Increment on `true`, decrement on `false`. Never goes below zero.
    pub fn update_like(&mut self, liked: bool) {
        self.like_count = if liked {
            self.like_count.saturating_add(1)
        } else {
            self.like_count.saturating_sub(1).max(0)
        };
    }

    pub fn mark_deleted(&mut self) {
        self.is_deleted = true;
    }

    pub fn set_images(&mut self, urls: Vec<String>) {
        self.post_images = urls;
    }

    pub(crate) fn assign_id(&mut self, id: PostId) {
        self.id = Some(id);
    }

    pub fn id(&self) -> Option<PostId> {
        self.id
    }

    pub fn member(&self) -> MemberId {
        self.member
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn price(&self) -> i32 {
        self.price
    }

    pub fn capacity(&self) -> i32 {
        self.capacity
    }

    pub fn content_details(&self) -> &str {
        &self.content_details
    }

    pub fn like_count(&self) -> i32 {
        self.like_count
    }

    pub fn post_images(&self) -> &[String] {
        &self.post_images
    }

    pub fn amenities(&self) -> Option<&Amenities> {
        self.amenities.as_ref()
    }

    pub fn operating_time(&self) -> Option<&OperatingTime> {
        self.operating_time.as_ref()
    }

    pub fn is_deleted(&self) -> bool {
        self.is_deleted
    }
}
