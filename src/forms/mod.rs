//! Caller-supplied request shapes.
pub mod post;
pub mod upload;
