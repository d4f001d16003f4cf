//! Cover image files: locating covers by ISBN and converting between formats.

pub mod convert;
pub mod cover_index;
pub mod error;
pub mod format;

pub use convert::{ConvertOptions, ConvertOutcome, ConvertStats, batch_convert, convert_image};
pub use cover_index::CoverIndex;
pub use error::MediaError;
pub use format::TargetFormat;
