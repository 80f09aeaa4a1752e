use axum::{extract::State, routing::post, Json, Router};
use axum_extra::extract::WithRejection;
use chrono::Utc;
use kattali_core::newsletter::{NewsletterForm, SUBSCRIPTION_SOURCE};
use kattali_shared::mask_email;
use kattali_shared::models::events::NEWSLETTER_TOPIC;

use crate::{error::AppError, state::AppState, unsupported_method, Acknowledgement};

const NEWSLETTER_SUCCESS: &str = "Successfully subscribed to our newsletter!";
const NEWSLETTER_FAILURE: &str = "Failed to subscribe. Please try again later.";

pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/api/newsletter",
        post(subscribe).fallback(unsupported_method),
    )
}

/// POST /api/newsletter
pub async fn subscribe(
    State(state): State<AppState>,
    WithRejection(Json(form), _): WithRejection<Json<NewsletterForm>, AppError>,
) -> Result<Json<Acknowledgement>, AppError> {
    let subscription = form.validate()?;

    tokio::time::sleep(state.latency.newsletter()).await;

    let now = Utc::now();
    tracing::info!(
        email = %mask_email(subscription.email.expose()),
        timestamp = %now.to_rfc3339(),
        source = SUBSCRIPTION_SOURCE,
        "Newsletter subscription"
    );

    let event = subscription.to_event(now);
    let payload =
        serde_json::to_value(&event).map_err(|e| AppError::internal(NEWSLETTER_FAILURE, e))?;
    state
        .events
        .publish(NEWSLETTER_TOPIC, &event.subscription_id.to_string(), &payload)
        .await
        .map_err(|e| AppError::internal(NEWSLETTER_FAILURE, e))?;

    Ok(Json(Acknowledgement::ok(NEWSLETTER_SUCCESS)))
}
