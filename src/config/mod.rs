//! Configuration for the clipboard handler.
//!
//! `ClipboardConfig` carries every option the paste pipeline consults, with
//! a fluent builder for hosts that prefer not to fill the struct by hand.

pub mod builder;
pub mod types;

pub use builder::ClipboardConfigBuilder;
pub use types::{ClipboardConfig, ImagePasteHandler};
