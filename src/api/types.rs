//! API request and response types

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;
use serde_json::json;

use crate::models::AnswerResult;
use crate::models::SourceLink;

/// Question request body
#[derive(Debug, Deserialize)]
pub struct QuestionRequest {
    pub question: String,
    /// Opaque base64-encoded image payload
    #[serde(default)]
    pub image: Option<String>,
}

/// A source link returned alongside an answer
#[derive(Debug, Serialize)]
pub struct AnswerLink {
    pub url: String,
    pub text: String,
}

impl From<SourceLink> for AnswerLink {
    fn from(link: SourceLink) -> Self {
        Self {
            url: link.url,
            text: link.title,
        }
    }
}

/// Answer response body
#[derive(Debug, Serialize)]
pub struct AnswerResponse {
    pub answer: String,
    pub links: Vec<AnswerLink>,
}

impl From<AnswerResult> for AnswerResponse {
    fn from(result: AnswerResult) -> Self {
        Self {
            answer: result.answer,
            links: result.links.into_iter().map(AnswerLink::from).collect(),
        }
    }
}

/// Liveness probe response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

/// Status probe response with per-collection document counts
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: String,
    pub course_documents: u64,
    pub forum_posts: u64,
}

/// An API error with a fixed, opaque message
///
/// Internal detail is logged where the failure happens; the response body
/// carries only the status and a short message, never the question text or
/// partial pipeline state.
#[derive(Debug, PartialEq, Eq)]
pub struct ApiError {
    status: StatusCode,
    message: &'static str,
}

impl ApiError {
    /// Initialization has not completed yet
    pub const fn not_ready() -> Self {
        Self {
            status: StatusCode::SERVICE_UNAVAILABLE,
            message: "service is not ready",
        }
    }

    /// The question field is missing content
    pub const fn empty_question() -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: "question must not be empty",
        }
    }

    /// Something failed inside the answer pipeline
    pub const fn internal() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "Error processing request",
        }
    }

    pub const fn status(&self) -> StatusCode {
        self.status
    }

    pub const fn message(&self) -> &'static str {
        self.message
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "error": self.message }));
        (self.status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answer_link_from_source_link() {
        let link = SourceLink {
            url: "https://forum.example/t/topic/1".to_string(),
            title: "Topic title".to_string(),
        };
        let answer_link = AnswerLink::from(link);
        assert_eq!(answer_link.url, "https://forum.example/t/topic/1");
        assert_eq!(answer_link.text, "Topic title");
    }

    #[test]
    fn test_answer_response_serializes_links() {
        let response = AnswerResponse {
            answer: "Use uv.".to_string(),
            links: vec![AnswerLink {
                url: "https://forum.example/t/topic/1".to_string(),
                text: "Topic title".to_string(),
            }],
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"answer\":\"Use uv.\""));
        assert!(json.contains("\"text\":\"Topic title\""));
    }

    #[test]
    fn test_question_request_image_is_optional() {
        let req: QuestionRequest = serde_json::from_str(r#"{"question": "hi"}"#).unwrap();
        assert_eq!(req.question, "hi");
        assert!(req.image.is_none());
    }

    #[test]
    fn test_api_error_statuses() {
        assert_eq!(ApiError::not_ready().status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(ApiError::empty_question().status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::internal().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(ApiError::internal().message(), "Error processing request");
    }
}
