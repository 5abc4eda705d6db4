// PDF text extraction used by both the CLI upload flow and the /upload form route.
// Pure CPU work; callers on the async runtime go through `spawn_extract`.

pub mod media_type;
pub mod pdf;

pub use pdf::{spawn_extract, ExtractionError};
