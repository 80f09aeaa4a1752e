use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::pii::Masked;

pub const CONTACT_TOPIC: &str = "contact.submitted";
pub const NEWSLETTER_TOPIC: &str = "newsletter.subscribed";

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ContactSubmittedEvent {
    pub submission_id: Uuid,
    pub name: String,
    pub email: Masked<String>,
    pub inquiry_type: String,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct NewsletterSubscribedEvent {
    pub subscription_id: Uuid,
    pub email: Masked<String>,
    pub consent: bool,
    pub source: String,
    pub subscribed_at: DateTime<Utc>,
}
