use axum::{extract::State, routing::post, Json, Router};
use axum_extra::extract::WithRejection;
use chrono::Utc;
use kattali_core::contact::ContactForm;
use kattali_shared::mask_email;
use kattali_shared::models::events::CONTACT_TOPIC;

use crate::{error::AppError, state::AppState, unsupported_method, Acknowledgement};

const CONTACT_SUCCESS: &str =
    "Your message has been sent successfully. We will get back to you soon!";
const CONTACT_FAILURE: &str = "Failed to send message. Please try again later.";

pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/api/contact",
        post(submit_contact).fallback(unsupported_method),
    )
}

/// POST /api/contact
/// Validate an inquiry, log it, and acknowledge. Nothing is stored or emailed.
pub async fn submit_contact(
    State(state): State<AppState>,
    WithRejection(Json(form), _): WithRejection<Json<ContactForm>, AppError>,
) -> Result<Json<Acknowledgement>, AppError> {
    let submission = form.validate()?;

    tokio::time::sleep(state.latency.contact()).await;

    let now = Utc::now();
    tracing::info!(
        name = %submission.full_name(),
        email = %mask_email(submission.email.expose()),
        inquiry_type = submission.inquiry_type.as_str(),
        timestamp = %now.to_rfc3339(),
        "Contact form submission"
    );

    let event = submission.to_event(now);
    let payload =
        serde_json::to_value(&event).map_err(|e| AppError::internal(CONTACT_FAILURE, e))?;
    state
        .events
        .publish(CONTACT_TOPIC, &event.submission_id.to_string(), &payload)
        .await
        .map_err(|e| AppError::internal(CONTACT_FAILURE, e))?;

    Ok(Json(Acknowledgement::ok(CONTACT_SUCCESS)))
}
