pub mod allowlist;
pub mod clipboard;
pub mod config;
pub(crate) mod dom;
pub mod error;
pub mod links;
pub mod sanitize;
pub mod substitute;
pub mod tables;

pub use allowlist::{AllowList, CustomButton, ToolbarControl};
pub use clipboard::{
    ClipboardFile, ClipboardHandler, ClipboardPayload, Delta, Editor, IgnoreReason, Op,
    PasteEvent, PasteOutcome, Range, SmartClipboard, Source,
};
pub use config::{ClipboardConfig, ClipboardConfigBuilder, ImagePasteHandler};
pub use error::PasteError;
pub use sanitize::{SanitizeHooks, SanitizeOutcome};
