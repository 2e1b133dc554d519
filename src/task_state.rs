use crate::classifier::{TaskKind, classify};
use crate::config::RouterConfig;
use crate::error::ApiError;
use crate::handlers::{handle_content, handle_image, handle_math};
use crate::io_struct::{StreamEnvelope, TaskRequest, TaskResponse};
use crate::provider::{ImageGeneration, OpenAiClient, ProviderResult, TextCompletion};
use actix_web::HttpResponse;
use bytes::Bytes;
use futures::{Stream, stream};
use log::{error, info};
use std::pin::Pin;
use std::sync::Arc;

pub const STREAM_ERROR_MESSAGE: &str = "Failed to process task";
pub const STREAM_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

pub type FrameStream = Pin<Box<dyn Stream<Item = Result<Bytes, actix_web::Error>> + Send>>;

/// Shared, read-only state behind every task request.
#[derive(Clone)]
pub struct TaskState {
    pub llm: Arc<dyn TextCompletion>,
    pub images: Arc<dyn ImageGeneration>,
}

impl TaskState {
    pub fn new(config: &RouterConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .pool_idle_timeout(Some(std::time::Duration::from_secs(50)))
            .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
            .build()?;
        let provider = Arc::new(OpenAiClient::new(
            client,
            config.api_base.clone(),
            config.api_key.clone(),
            config.chat_model.clone(),
            config.image_model.clone(),
        ));
        Ok(Self::with_providers(provider.clone(), provider))
    }

    pub fn with_providers(
        llm: Arc<dyn TextCompletion>,
        images: Arc<dyn ImageGeneration>,
    ) -> Self {
        TaskState { llm, images }
    }

    /// Classify and run one prompt. Only content-handler provider errors
    /// reach the caller; the other handlers recover locally.
    pub async fn run_task(&self, req: &TaskRequest) -> ProviderResult<(TaskKind, String)> {
        let task_type = classify(&req.prompt);
        info!("Routing prompt to {} handler", task_type);

        let context = req.chained_context();
        let result = match task_type {
            TaskKind::Content => {
                handle_content(self.llm.as_ref(), &req.prompt, context, req.is_chained).await?
            }
            TaskKind::Math => {
                handle_math(self.llm.as_ref(), &req.prompt, context, req.is_chained).await
            }
            TaskKind::Image => {
                handle_image(self.images.as_ref(), &req.prompt, context, req.is_chained).await
            }
        };
        Ok((task_type, result))
    }

    /// Buffered response: one JSON body.
    pub async fn respond(&self, req: TaskRequest) -> Result<TaskResponse, ApiError> {
        validate_prompt(&req)?;
        match self.run_task(&req).await {
            Ok((task_type, result)) => Ok(TaskResponse::new(task_type, result)),
            Err(e) => {
                error!("Failed to process task: {}", e);
                Err(ApiError::Processing)
            }
        }
    }

    /// A body holding exactly one SSE frame; the stream ends after it.
    ///
    /// The task is spawned immediately and runs to completion even if the
    /// body is dropped before it is polled.
    pub fn single_frame(&self, req: TaskRequest) -> FrameStream {
        let state = self.clone();
        let task = tokio::spawn(async move { state.run_task(&req).await });
        Box::pin(stream::once(async move {
            let envelope = match task.await {
                Ok(Ok((task_type, result))) => StreamEnvelope::TaskResult { task_type, result },
                Ok(Err(e)) => {
                    error!("Failed to process streamed task: {}", e);
                    stream_error()
                }
                Err(e) => {
                    error!("Streamed task aborted: {}", e);
                    stream_error()
                }
            };
            Ok(Bytes::from(envelope.to_sse_frame()))
        }))
    }

    pub async fn handle(&self, req: TaskRequest) -> Result<HttpResponse, ApiError> {
        if req.stream_mode {
            validate_prompt(&req)?;
            Ok(HttpResponse::Ok()
                .content_type(STREAM_CONTENT_TYPE)
                .streaming(self.single_frame(req)))
        } else {
            Ok(HttpResponse::Ok().json(self.respond(req).await?))
        }
    }
}

fn stream_error() -> StreamEnvelope {
    StreamEnvelope::Error {
        error: STREAM_ERROR_MESSAGE.to_string(),
    }
}

pub fn validate_prompt(req: &TaskRequest) -> Result<(), ApiError> {
    if req.prompt.trim().is_empty() {
        return Err(ApiError::EmptyPrompt);
    }
    Ok(())
}
