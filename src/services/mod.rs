// File: src/services/mod.rs
pub mod dedup;
pub mod notifier;
pub mod publisher;

pub use dedup::DedupCache;
pub use notifier::Notifier;
pub use publisher::{PostPublisher, PublishedPost};
