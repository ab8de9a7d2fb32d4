pub mod config;
pub mod constants;
pub mod errors;
pub mod graph;
pub mod health;
pub mod media;
pub mod scheduler;
pub mod scheduling;
pub mod services;
pub mod storage;
pub mod store;
pub mod web;

// Re-export commonly used types
pub use config::{Config, ConfigManager};
pub use errors::{CredentialError, PublishError};
pub use scheduler::{PublicationScheduler, TickRunner};
pub use services::{DedupCache, Notifier, PostPublisher};
pub use store::{PostStatus, PostStore, ScheduledPost};
