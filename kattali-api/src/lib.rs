use axum::{
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod contact;
pub mod error;
pub mod experiments;
pub mod newsletter;
pub mod pricing;
pub mod products;
pub mod state;
pub mod stocks;

pub use error::AppError;
pub use state::AppState;

/// `{ success, message }` reply returned by the form endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Acknowledgement {
    pub success: bool,
    pub message: String,
}

impl Acknowledgement {
    pub fn ok(message: &str) -> Self {
        Self {
            success: true,
            message: message.to_string(),
        }
    }
}

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Router::new()
        .merge(contact::routes())
        .merge(newsletter::routes())
        .merge(stocks::routes())
        .merge(pricing::routes())
        .merge(products::routes())
        .merge(experiments::routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Method fallback for every route: bare `OPTIONS` is acknowledged, anything else is 405.
pub(crate) async fn unsupported_method(method: Method) -> Response {
    if method == Method::OPTIONS {
        StatusCode::OK.into_response()
    } else {
        AppError::MethodNotAllowed.into_response()
    }
}
