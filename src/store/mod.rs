//! Durable store for scheduled posts.
//!
//! This module provides crash-consistent persistence for the post queue:
//! - `records` - the `ScheduledPost` entity and its lifecycle status
//! - `posts` - the `PostStore` (in-memory ordered sequence + JSON file)
//!
//! The on-disk form is a JSON array of post objects at a fixed path,
//! read fully into memory at startup and rewritten fully on every
//! mutation via a temp-file-then-rename so readers never observe a
//! partial write.

mod posts;
mod records;

pub use posts::PostStore;
pub use records::{MediaAttachment, PostStatus, ScheduledPost};
