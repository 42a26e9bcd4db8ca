pub mod error;
pub mod traits;

pub use error::JiaofuError;
pub use traits::{OcrProvider, OcrRequest, OcrResponse};
