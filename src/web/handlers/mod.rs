// File: src/web/handlers/mod.rs
pub mod common;
pub mod notifications;
pub mod posts;
pub mod stats;
pub mod storage;

pub use notifications::test_notification;
pub use posts::{get_page_info, publish_post, schedule_post};
pub use stats::get_stats;
pub use storage::{get_storage_quota, upload_file};
