//! Core of a shared-office rental listing service: posts describing rental
//! spaces, their images in an object store, and likes.
pub mod domain;
pub mod dto;
pub mod forms;
pub mod models;
pub mod repository;
pub mod services;
pub mod storage;
