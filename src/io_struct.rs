use crate::classifier::TaskKind;
use serde::{Deserialize, Serialize};

/// Body of `POST /api/task` and `POST /api/classify`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRequest {
    pub prompt: String,
    #[serde(default)]
    pub context: Option<String>,
    #[serde(default)]
    pub is_chained: bool,
    #[serde(default)]
    pub stream_mode: bool,
}

impl TaskRequest {
    /// Context to thread into the handlers. Only a chained request with a
    /// non-blank context carries one.
    pub fn chained_context(&self) -> Option<&str> {
        if !self.is_chained {
            return None;
        }
        self.context
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    pub task_type: TaskKind,
    pub result: String,
    pub success: bool,
}

impl TaskResponse {
    pub fn new(task_type: TaskKind, result: String) -> Self {
        TaskResponse {
            task_type,
            result,
            success: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClassifyResponse {
    pub task_type: TaskKind,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ErrorBody {
    pub error: String,
}

/// Payload of the single frame written in streaming mode.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum StreamEnvelope {
    #[serde(rename_all = "camelCase")]
    TaskResult { task_type: TaskKind, result: String },
    Error { error: String },
}

impl StreamEnvelope {
    /// Render as one SSE frame: `data: <json>\n\n`.
    pub fn to_sse_frame(&self) -> String {
        let payload = serde_json::to_string(self)
            .unwrap_or_else(|_| r#"{"type":"error","error":"Failed to process task"}"#.to_string());
        format!("data: {}\n\n", payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_defaults() {
        let req: TaskRequest =
            serde_json::from_value(json!({"prompt": "Explain mitosis"})).unwrap();
        assert_eq!(req.prompt, "Explain mitosis");
        assert!(req.context.is_none());
        assert!(!req.is_chained);
        assert!(!req.stream_mode);
    }

    #[test]
    fn test_request_camel_case_fields() {
        let req: TaskRequest = serde_json::from_value(json!({
            "prompt": "go on",
            "context": "cells divide",
            "isChained": true,
            "streamMode": true
        }))
        .unwrap();
        assert!(req.is_chained);
        assert!(req.stream_mode);
        assert_eq!(req.chained_context(), Some("cells divide"));
    }

    #[test]
    fn test_context_ignored_unless_chained() {
        let req = TaskRequest {
            prompt: "x".to_string(),
            context: Some("prior".to_string()),
            is_chained: false,
            stream_mode: false,
        };
        assert_eq!(req.chained_context(), None);

        let blank = TaskRequest {
            context: Some("   ".to_string()),
            is_chained: true,
            ..req
        };
        assert_eq!(blank.chained_context(), None);
    }

    #[test]
    fn test_task_response_shape() {
        let resp = TaskResponse::new(TaskKind::Math, "Answer: 4".to_string());
        assert_eq!(
            serde_json::to_value(&resp).unwrap(),
            json!({"taskType": "math", "result": "Answer: 4", "success": true})
        );
    }

    #[test]
    fn test_envelope_frames() {
        let ok = StreamEnvelope::TaskResult {
            task_type: TaskKind::Image,
            result: "done".to_string(),
        };
        assert_eq!(
            ok.to_sse_frame(),
            "data: {\"type\":\"task-result\",\"taskType\":\"image\",\"result\":\"done\"}\n\n"
        );

        let err = StreamEnvelope::Error {
            error: "Failed to process task".to_string(),
        };
        assert_eq!(
            err.to_sse_frame(),
            "data: {\"type\":\"error\",\"error\":\"Failed to process task\"}\n\n"
        );
    }
}
