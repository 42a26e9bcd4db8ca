pub mod prompt;
pub mod providers;

pub use prompt::OCR_SYSTEM_PROMPT;
pub use providers::ark::ArkProvider;
pub use providers::mock::MockProvider;
