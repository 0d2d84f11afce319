//! Router and handlers.
//!
//! Thin shell over the `receipts` pipeline: request validation, mode
//! dispatch, and mapping extraction outcomes onto HTTP responses. No
//! extraction logic lives here.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use receipts::{
    CompletionModel, ExtractionMode, ReceiptPipeline, ReceiptRecord, SourceStrategy, UsageStats,
};

/// Shared application state.
pub struct AppState<M: CompletionModel> {
    pub pipeline: Arc<ReceiptPipeline<M>>,
}

impl<M: CompletionModel> Clone for AppState<M> {
    fn clone(&self) -> Self {
        Self {
            pipeline: Arc::clone(&self.pipeline),
        }
    }
}

/// Build the router with all routes and middleware.
pub fn build_app<M: CompletionModel + 'static>(state: AppState<M>) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/parse", post(parse::<M>))
        .route("/compare", post(compare::<M>))
        .route("/parsers", get(parsers_info))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Parse request body.
#[derive(Debug, Deserialize)]
pub struct ParseRequest {
    pub receipt_text: String,

    /// Strategy to use; defaults to auto
    #[serde(default)]
    pub parser: ExtractionMode,
}

/// Successful parse response.
#[derive(Debug, Serialize)]
pub struct ParseResponse {
    pub success: bool,
    pub parser_used: SourceStrategy,
    pub data: ReceiptRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<UsageStats>,
}

/// One strategy's outcome in a compare response.
#[derive(Debug, Serialize)]
pub struct StrategyOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ReceiptRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<UsageStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "service": "Receipt Parser API",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

fn error_response(status: StatusCode, detail: impl Into<String>) -> Response {
    (status, Json(json!({ "detail": detail.into() }))).into_response()
}

fn ok_response(record: ReceiptRecord, usage: Option<UsageStats>) -> Response {
    let response = ParseResponse {
        success: true,
        parser_used: record.source_strategy,
        data: record,
        usage,
    };
    Json(response).into_response()
}

/// `POST /parse` - run one strategy (or auto) over the receipt text.
async fn parse<M: CompletionModel>(
    State(state): State<AppState<M>>,
    Json(request): Json<ParseRequest>,
) -> Response {
    if request.receipt_text.trim().is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "receipt_text cannot be empty");
    }

    match request.parser {
        ExtractionMode::Pattern => {
            let record = state.pipeline.extract_pattern(&request.receipt_text);
            ok_response(record, None)
        }
        ExtractionMode::Model => match state.pipeline.extract_model(&request.receipt_text).await {
            Ok((record, usage)) => ok_response(record, Some(usage)),
            Err(e) => error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Model parsing failed: {e}"),
            ),
        },
        ExtractionMode::Auto => match state.pipeline.extract_auto(&request.receipt_text).await {
            Ok(extracted) => ok_response(extracted.record, extracted.usage),
            Err(e) => error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Parsing failed: {e}"),
            ),
        },
        ExtractionMode::CompareBoth => error_response(
            StatusCode::BAD_REQUEST,
            "use POST /compare for compare_both",
        ),
    }
}

/// `POST /compare` - run both strategies independently and report
/// field-level agreement when both succeed.
async fn compare<M: CompletionModel>(
    State(state): State<AppState<M>>,
    Json(request): Json<ParseRequest>,
) -> Response {
    if request.receipt_text.trim().is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "receipt_text cannot be empty");
    }

    let outcome = state.pipeline.compare_both(&request.receipt_text).await;

    let pattern = StrategyOutcome {
        success: true,
        data: Some(outcome.pattern),
        usage: None,
        error: None,
    };

    let model = match outcome.model {
        Ok((record, usage)) => StrategyOutcome {
            success: true,
            data: Some(record),
            usage: Some(usage),
            error: None,
        },
        Err(e) => StrategyOutcome {
            success: false,
            data: None,
            usage: None,
            error: Some(e.to_string()),
        },
    };

    let mut body = json!({
        "pattern": pattern,
        "model": model,
    });
    if let Some(comparison) = outcome.comparison {
        body["comparison"] = json!(comparison);
    }

    Json(body).into_response()
}

/// `GET /parsers` - static strategy metadata.
async fn parsers_info() -> Json<serde_json::Value> {
    Json(json!({
        "parsers": [
            {
                "name": "model",
                "description": "Uses a hosted language model - handles any language/format",
                "pros": ["Multi-language", "Flexible", "High accuracy"],
                "cons": ["Costs money", "Requires API", "Slower"]
            },
            {
                "name": "pattern",
                "description": "Pattern matching - fast but limited",
                "pros": ["Free", "Fast", "No API needed"],
                "cons": ["English only", "Strict format", "Brittle"]
            },
            {
                "name": "auto",
                "description": "Tries the model first, falls back to pattern",
                "pros": ["Best of both worlds", "Resilient"],
                "cons": ["Costs money when the model is used"]
            }
        ]
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header::CONTENT_TYPE, Request};
    use receipts::testing::MockModel;
    use tower::util::ServiceExt;

    fn test_app(mock: MockModel) -> Router {
        build_app(AppState {
            pipeline: Arc::new(ReceiptPipeline::new(mock)),
        })
    }

    fn parse_request(body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/parse")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_is_ok() {
        let app = test_app(MockModel::new());
        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_empty_receipt_text_is_rejected() {
        let app = test_app(MockModel::new());
        let response = app
            .oneshot(parse_request(json!({"receipt_text": "   \n ", "parser": "pattern"})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_pattern_parse_succeeds_without_model() {
        let app = test_app(MockModel::new());
        let response = app
            .oneshot(parse_request(
                json!({"receipt_text": "ACME\nTOTAL: $5.00", "parser": "pattern"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_model_parse_failure_maps_to_500() {
        let app = test_app(MockModel::new().with_transport_error("down"));
        let response = app
            .oneshot(parse_request(
                json!({"receipt_text": "ACME", "parser": "model"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_auto_parse_falls_back_and_stays_200() {
        let app = test_app(MockModel::new().with_transport_error("down"));
        let response = app
            .oneshot(parse_request(json!({"receipt_text": "ACME\nTOTAL: $5.00"})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_parser_value_is_a_client_error() {
        let app = test_app(MockModel::new());
        let response = app
            .oneshot(parse_request(
                json!({"receipt_text": "ACME", "parser": "ocr"}),
            ))
            .await
            .unwrap();
        assert!(response.status().is_client_error());
    }

    #[tokio::test]
    async fn test_compare_survives_model_failure() {
        let app = test_app(MockModel::new().with_transport_error("down"));
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/compare")
                    .header(CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        json!({"receipt_text": "ACME\nTOTAL: $5.00"}).to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
