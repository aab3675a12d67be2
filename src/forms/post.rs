use serde::Deserialize;
use validator::Validate;

/// Fields submitted when creating or updating a listing.
#[derive(Clone, Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PostForm {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[validate(length(min = 1, max = 5000))]
    pub content: String,
    #[validate(length(min = 1, max = 255))]
    pub location: String,
    #[validate(range(min = 0))]
    pub price: i32,
    #[validate(range(min = 1))]
    pub capacity: i32,
    pub content_details: String,
}
