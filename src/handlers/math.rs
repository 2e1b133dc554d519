use super::context_message;
use crate::expr::{self, ExprError};
use crate::provider::{ChatMessage, CompletionParams, ProviderError, TextCompletion};
use log::{error, warn};

const MATH_SYSTEM_PROMPT: &str = "You are a patient math tutor. \
Identify the type of problem, solve it step by step showing your working, \
state the final answer clearly on its own line prefixed with 'Answer:', \
and close with a short explanation of the method used.";

pub const MATH_APOLOGY: &str =
    "I apologize, but I couldn't solve this math problem. Please try rephrasing it.";

/// Replies of this many characters or fewer are treated as unusable.
pub const MIN_SOLUTION_LEN: usize = 10;

pub const MATH_PARAMS: CompletionParams = CompletionParams {
    max_tokens: 1000,
    temperature: 0.3,
};

#[derive(Debug, thiserror::Error)]
enum MathError {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("Invalid expression: {0}")]
    InvalidExpression(#[from] ExprError),
}

/// Solve a math prompt. Falls back to evaluating the arithmetic in the
/// prompt when the model reply is too short. Never fails: errors become
/// [`MATH_APOLOGY`].
pub async fn handle_math(
    llm: &dyn TextCompletion,
    prompt: &str,
    context: Option<&str>,
    is_chained: bool,
) -> String {
    match solve(llm, prompt, context, is_chained).await {
        Ok(solution) => solution,
        Err(e) => {
            error!("Math handler failed: {}", e);
            MATH_APOLOGY.to_string()
        }
    }
}

async fn solve(
    llm: &dyn TextCompletion,
    prompt: &str,
    context: Option<&str>,
    is_chained: bool,
) -> Result<String, MathError> {
    let mut messages = vec![ChatMessage::system(MATH_SYSTEM_PROMPT)];
    if is_chained {
        if let Some(context) = context {
            messages.push(context_message(context));
        }
    }
    messages.push(ChatMessage::user(prompt));

    let reply = llm.complete(&messages, MATH_PARAMS).await?;
    if let Some(text) = reply {
        if text.trim().chars().count() > MIN_SOLUTION_LEN {
            return Ok(text);
        }
    }

    warn!("Math reply too short, evaluating prompt arithmetic directly");
    Ok(evaluate_fallback(prompt)?)
}

/// Four-line report for the arithmetic found in `prompt`.
pub fn evaluate_fallback(prompt: &str) -> Result<String, ExprError> {
    let expression = expr::sanitize(prompt);
    let value = expr::format_number(expr::evaluate(&expression)?);
    Ok(format!(
        "Problem Type: Arithmetic\n\
         Solution: {} = {}\n\
         Answer: {}\n\
         Explanation: Evaluated the expression using standard order of operations.",
        expression, value, value
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::mock_providers::MockCompletion;

    #[tokio::test]
    async fn test_long_reply_returned_verbatim() {
        let reply = "Problem Type: Linear equation\nx = 3\nAnswer: 3";
        let llm = MockCompletion::replying(reply);
        let result = handle_math(&llm, "solve 3x = 9", None, false).await;
        assert_eq!(result, reply);
        assert_eq!(llm.calls()[0].params, MATH_PARAMS);
    }

    #[tokio::test]
    async fn test_short_reply_triggers_fallback() {
        let llm = MockCompletion::replying("42");
        let result = handle_math(&llm, "12+30", None, false).await;
        assert!(result.contains("Answer: 42"), "got: {}", result);
        assert_eq!(result.lines().count(), 4);
        assert!(result.starts_with("Problem Type: "));
    }

    #[tokio::test]
    async fn test_empty_reply_triggers_fallback() {
        let llm = MockCompletion::empty();
        let result = handle_math(&llm, "What is (2 + 3) * 4?", None, false).await;
        assert!(result.contains("Solution: (2 + 3) * 4 = 20"));
        assert!(result.contains("Answer: 20"));
    }

    #[tokio::test]
    async fn test_unparseable_fallback_apologizes() {
        let llm = MockCompletion::empty();
        let result = handle_math(&llm, "solve for x", None, false).await;
        assert_eq!(result, MATH_APOLOGY);

        let result = handle_math(&llm, "what is 5 / 0", None, false).await;
        assert_eq!(result, MATH_APOLOGY);
    }

    #[tokio::test]
    async fn test_deeply_nested_fallback_apologizes() {
        let llm = MockCompletion::replying("ok");
        let prompt = format!(
            "Reply only ok {}1+1{}",
            "(".repeat(100_000),
            ")".repeat(100_000)
        );
        let result = handle_math(&llm, &prompt, None, false).await;
        assert_eq!(result, MATH_APOLOGY);

        let prompt = format!("what is {}1", "-".repeat(100_000));
        let result = handle_math(&llm, &prompt, None, false).await;
        assert_eq!(result, MATH_APOLOGY);
    }

    #[tokio::test]
    async fn test_provider_error_apologizes() {
        let llm = MockCompletion::failing();
        let result = handle_math(&llm, "12+30", None, false).await;
        assert_eq!(result, MATH_APOLOGY);
    }

    #[tokio::test]
    async fn test_chained_context_added() {
        let llm = MockCompletion::replying("A sufficiently long worked solution.");
        handle_math(&llm, "and now double it", Some("x = 21"), true).await;
        let messages = &llm.calls()[0].messages;
        assert_eq!(messages.len(), 3);
        assert!(messages[1].content.contains("x = 21"));
    }

    #[test]
    fn test_fallback_report_format() {
        assert_eq!(
            evaluate_fallback("9 / 4").unwrap(),
            "Problem Type: Arithmetic\n\
             Solution: 9 / 4 = 2.25\n\
             Answer: 2.25\n\
             Explanation: Evaluated the expression using standard order of operations."
        );
    }
}
