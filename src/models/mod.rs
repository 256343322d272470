//! Data models for postboard.
//!
//! The stored shape matches the documents in the `posts` collection field for field.

mod date;
mod image;
mod post;
mod question;

pub use date::*;
pub use image::*;
pub use post::*;
pub use question::*;

/// Name of the document collection holding every post.
pub const POSTS_COLLECTION: &str = "posts";

/// Opaque identifier assigned by the document store.
pub type PostId = String;
