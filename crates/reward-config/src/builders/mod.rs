//! Builders for constructing configurations programmatically.

mod config;

pub use config::{ConfigBuilder, DEV_PRIVATE_KEY};
