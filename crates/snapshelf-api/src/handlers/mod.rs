//! HTTP request handlers

pub mod gallery;
pub mod health;
pub mod index;
pub mod upload;
