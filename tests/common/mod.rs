//! Reusable test utilities:
//! - Mock Graph API server (accounts, media upload, feed creation)
//! - Test configuration builder wired to temp directories

// Allow unused code in test fixtures - they are utilities shared by
// several test binaries that each use a subset.
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod fixtures;

pub use fixtures::mock_graph::MockGraphServer;
pub use fixtures::test_config::TestEnv;
