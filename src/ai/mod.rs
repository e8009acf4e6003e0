pub mod client;
pub mod error;
pub mod generator;
pub mod image;
pub mod prompt;
pub mod provider;

pub use error::AiError;
pub use generator::{GeneratedArticle, Generator};
pub use image::{GeneratedImage, ImageGenerator};
pub use prompt::GenerationOptions;
pub use provider::{Provider, Purpose};
