//! One handler per task kind. Each wraps a single provider call with a fixed
//! prompt template and fixed decoding parameters.

pub mod content;
pub mod image;
pub mod math;

pub use content::handle_content;
pub use image::handle_image;
pub use math::handle_math;

use crate::provider::ChatMessage;

/// System message carrying the previous turn for chained requests.
pub(crate) fn context_message(context: &str) -> ChatMessage {
    ChatMessage::system(format!(
        "Previous context from this conversation:\n{}\n\n\
         Build on it and keep the answer consistent with it.",
        context
    ))
}
