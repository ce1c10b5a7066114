use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Extension, Json, Router,
};
use serde::Serialize;
use serde_json::Value;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use pricelens_core::generator::TextGenerator;

use crate::middleware::{cors_headers, request_id, RequestId};
use crate::prompt;

#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<dyn TextGenerator>,
    pub model: String,
}

/// 200 envelope: the model's answer text, passed through unparsed and
/// unvalidated.
#[derive(Debug, Serialize)]
struct AnswerBody {
    gemini_response: String,
}

/// 400/500 envelope.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Serialize)]
struct PreflightBody {
    message: &'static str,
}

/// Failure modes of the locate-price flow.
#[derive(Debug, PartialEq, Eq)]
enum ServiceError {
    /// The request body carried no usable `html` string. Terminal: the
    /// model is never invoked.
    MissingHtml,
    /// Everything else: an undecodable body or a failed generation call.
    Internal(String),
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        match self {
            Self::MissingHtml => (
                StatusCode::BAD_REQUEST,
                Json(ErrorBody {
                    error: "Missing 'html' field".to_owned(),
                }),
            )
                .into_response(),
            Self::Internal(message) => {
                let error = if message.is_empty() {
                    "Unknown error".to_owned()
                } else {
                    message
                };
                (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorBody { error })).into_response()
            }
        }
    }
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/", post(locate_price).options(preflight))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(axum::middleware::from_fn(cors_headers))
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

/// The locate-price handler: validate the body, build the prompt, make
/// exactly one generation call, and wrap the outcome in the documented
/// envelope.
async fn locate_price(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    body: Bytes,
) -> Result<Json<AnswerBody>, ServiceError> {
    let html = extract_html(&body)?;
    let prompt = prompt::build_prompt(&html);

    tracing::info!(
        request_id = %request_id.0,
        model = %state.model,
        html_bytes = html.len(),
        "dispatching extraction prompt"
    );

    let text = state
        .generator
        .generate(&state.model, &prompt)
        .await
        .map_err(|e| {
            tracing::error!(request_id = %request_id.0, error = %e, "generation failed");
            ServiceError::Internal(e.to_string())
        })?;

    Ok(Json(AnswerBody {
        gemini_response: text,
    }))
}

/// Preflight acknowledgement; the CORS headers themselves come from the
/// response middleware.
async fn preflight() -> impl IntoResponse {
    Json(PreflightBody {
        message: "CORS preflight successful",
    })
}

/// Pulls the `html` payload out of the raw body bytes.
///
/// Bodies may arrive JSON-encoded twice (the whole document as a JSON
/// string); a string document is decoded once more before the field
/// lookup. A missing, empty, or non-string `html` is a validation
/// failure; an undecodable body is an internal one.
fn extract_html(body: &[u8]) -> Result<String, ServiceError> {
    let decoded: Value =
        serde_json::from_slice(body).map_err(|e| ServiceError::Internal(e.to_string()))?;
    let document = match decoded {
        Value::String(inner) => {
            serde_json::from_str(&inner).map_err(|e| ServiceError::Internal(e.to_string()))?
        }
        other => other,
    };
    match document.get("html").and_then(Value::as_str) {
        Some(html) if !html.is_empty() => Ok(html.to_owned()),
        _ => Err(ServiceError::MissingHtml),
    }
}
