// Implementations of the `Translator` port.

pub mod gemini_client;
pub mod mirror;

pub use gemini_client::{GeminiTranslator, DEFAULT_GEMINI_MODEL};
pub use mirror::MirrorTranslator;
