use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use kattali_shared::models::events::NewsletterSubscribedEvent;
use kattali_shared::Masked;

use crate::validation::{non_blank, validate_email, ValidationError, ValidationResult};

pub const SUBSCRIPTION_SOURCE: &str = "website";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewsletterForm {
    pub email: Option<String>,
    #[serde(default)]
    pub consent: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct NewsletterSubscription {
    pub email: Masked<String>,
    pub consent: bool,
}

impl NewsletterForm {
    pub fn validate(self) -> ValidationResult<NewsletterSubscription> {
        let email = non_blank(self.email.as_deref()).ok_or(ValidationError::EmailRequired)?;
        validate_email(&email)?;

        Ok(NewsletterSubscription {
            email: Masked(email),
            consent: self.consent.unwrap_or(false),
        })
    }
}

impl NewsletterSubscription {
    pub fn to_event(&self, subscribed_at: DateTime<Utc>) -> NewsletterSubscribedEvent {
        NewsletterSubscribedEvent {
            subscription_id: Uuid::new_v4(),
            email: self.email.clone(),
            consent: self.consent,
            source: SUBSCRIPTION_SOURCE.to_string(),
            subscribed_at,
        }
    }
}
