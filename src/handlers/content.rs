use super::context_message;
use crate::provider::{ChatMessage, CompletionParams, ProviderResult, TextCompletion};

const CONTENT_SYSTEM_PROMPT: &str = "You are BrainStrata, an educational content writer. \
Write clear, well-structured learning material: start with a short overview, \
organise the body under headings, explain key concepts with concrete examples, \
and finish with a brief summary of the main takeaways. \
Use Markdown formatting and keep the tone encouraging and accessible.";

pub const CONTENT_FALLBACK: &str = "Sorry, I couldn't generate content for that request.";

pub const STANDALONE_PARAMS: CompletionParams = CompletionParams {
    max_tokens: 1500,
    temperature: 0.7,
};

pub const CHAINED_PARAMS: CompletionParams = CompletionParams {
    max_tokens: 2000,
    temperature: 0.8,
};

/// Generate educational text. `context` is the previous turn of a chained
/// request. Provider errors are returned to the caller.
pub async fn handle_content(
    llm: &dyn TextCompletion,
    prompt: &str,
    context: Option<&str>,
    is_chained: bool,
) -> ProviderResult<String> {
    let mut messages = vec![ChatMessage::system(CONTENT_SYSTEM_PROMPT)];
    if is_chained {
        if let Some(context) = context {
            messages.push(context_message(context));
        }
    }
    messages.push(ChatMessage::user(prompt));

    let params = if is_chained {
        CHAINED_PARAMS
    } else {
        STANDALONE_PARAMS
    };

    let reply = llm.complete(&messages, params).await?;
    Ok(reply
        .filter(|text| !text.trim().is_empty())
        .unwrap_or_else(|| CONTENT_FALLBACK.to_string()))
}
