use crate::provider::{ImageGeneration, ImageParams};
use log::error;

pub const IMAGE_EMPTY_APOLOGY: &str =
    "I apologize, but I couldn't generate an image for that request.";
pub const IMAGE_ERROR_APOLOGY: &str =
    "I apologize, but there was an error generating the image. Please try again.";

pub fn image_params() -> ImageParams {
    ImageParams {
        n: 1,
        size: "1792x1024".to_string(),
        quality: "standard".to_string(),
        style: "natural".to_string(),
    }
}

pub fn enhance_prompt(prompt: &str, context: Option<&str>, is_chained: bool) -> String {
    match context {
        Some(context) if is_chained => format!(
            "Create an educational illustration that continues this lesson: {}. \
             Now depict: {}. Keep the visual style consistent, clear and suitable for learners. \
             Use a 16:9 aspect ratio.",
            context, prompt
        ),
        _ => format!(
            "Create a clear, detailed educational illustration of: {}. \
             Use clean labels and a style suitable for learners. \
             Use a 16:9 aspect ratio.",
            prompt
        ),
    }
}

/// Generate one illustration and return a Markdown snippet embedding it.
/// Never fails: provider errors become a fixed apology.
pub async fn handle_image(
    images: &dyn ImageGeneration,
    prompt: &str,
    context: Option<&str>,
    is_chained: bool,
) -> String {
    let enhanced = enhance_prompt(prompt, context, is_chained);
    match images.generate(&enhanced, &image_params()).await {
        Ok(urls) => match urls.into_iter().next() {
            Some(url) => format!(
                "Here's the educational illustration I generated:\n\n![Generated image]({})",
                url
            ),
            None => IMAGE_EMPTY_APOLOGY.to_string(),
        },
        Err(e) => {
            error!("Image generation failed: {}", e);
            IMAGE_ERROR_APOLOGY.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::mock_providers::MockImages;

    #[tokio::test]
    async fn test_success_embeds_url() {
        let images = MockImages::with_urls(&["https://cdn.example/cell.png"]);
        let result = handle_image(&images, "a plant cell", None, false).await;
        assert!(result.contains("![Generated image](https://cdn.example/cell.png)"));

        let prompts = images.prompts.lock().unwrap();
        let (sent, params) = &prompts[0];
        assert!(sent.contains("a plant cell"));
        assert!(sent.contains("16:9"));
        assert_eq!(params.n, 1);
        assert_eq!(params.size, "1792x1024");
    }

    #[tokio::test]
    async fn test_no_image_returned() {
        let images = MockImages::with_urls(&[]);
        let result = handle_image(&images, "a plant cell", None, false).await;
        assert_eq!(result, IMAGE_EMPTY_APOLOGY);
    }

    #[tokio::test]
    async fn test_provider_failure_apologizes() {
        let images = MockImages::failing();
        let result = handle_image(&images, "a plant cell", None, false).await;
        assert_eq!(result, IMAGE_ERROR_APOLOGY);
        assert_eq!(images.call_count(), 1);
    }

    #[test]
    fn test_chained_prompt_mentions_context() {
        let chained = enhance_prompt("the nucleus", Some("plant cell anatomy"), true);
        assert!(chained.contains("plant cell anatomy"));
        assert!(chained.contains("the nucleus"));

        let plain = enhance_prompt("the nucleus", Some("plant cell anatomy"), false);
        assert!(!plain.contains("plant cell anatomy"));
        assert_ne!(chained, plain);
    }
}
