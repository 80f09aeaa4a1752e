use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use kattali_shared::models::events::ContactSubmittedEvent;
use kattali_shared::Masked;

use crate::validation::{non_blank, validate_email, ValidationError, ValidationResult};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InquiryType {
    Quote,
    Partnership,
    Sustainability,
    #[default]
    Other,
}

impl InquiryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InquiryType::Quote => "quote",
            InquiryType::Partnership => "partnership",
            InquiryType::Sustainability => "sustainability",
            InquiryType::Other => "other",
        }
    }
}

impl FromStr for InquiryType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "quote" => Ok(InquiryType::Quote),
            "partnership" => Ok(InquiryType::Partnership),
            "sustainability" => Ok(InquiryType::Sustainability),
            "other" => Ok(InquiryType::Other),
            _ => Err(ValidationError::InvalidInquiryType(s.to_string())),
        }
    }
}

/// Contact form body as posted by the browser. Every field is optional here so that a
/// missing field becomes a validation message rather than a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactForm {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub inquiry_type: Option<String>,
    pub message: Option<String>,
}

/// A contact request that passed validation. Fields are trimmed.
#[derive(Debug, Clone)]
pub struct ContactSubmission {
    pub first_name: String,
    pub last_name: String,
    pub email: Masked<String>,
    pub phone: Option<Masked<String>>,
    pub inquiry_type: InquiryType,
    pub message: String,
}

impl ContactForm {
    pub fn validate(self) -> ValidationResult<ContactSubmission> {
        let first_name = non_blank(self.first_name.as_deref());
        let last_name = non_blank(self.last_name.as_deref());
        let email = non_blank(self.email.as_deref());
        let message = non_blank(self.message.as_deref());

        let (Some(first_name), Some(last_name), Some(email), Some(message)) =
            (first_name.clone(), last_name.clone(), email.clone(), message.clone())
        else {
            let fields = [
                ("firstName", first_name.is_none()),
                ("lastName", last_name.is_none()),
                ("email", email.is_none()),
                ("message", message.is_none()),
            ]
            .into_iter()
            .filter_map(|(name, missing)| missing.then_some(name))
            .collect();
            return Err(ValidationError::MissingRequiredFields { fields });
        };

        validate_email(&email)?;

        let inquiry_type = match non_blank(self.inquiry_type.as_deref()) {
            Some(raw) => raw.parse()?,
            None => InquiryType::default(),
        };

        Ok(ContactSubmission {
            first_name,
            last_name,
            email: Masked(email),
            phone: non_blank(self.phone.as_deref()).map(Masked),
            inquiry_type,
            message,
        })
    }
}

impl ContactSubmission {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn to_event(&self, submitted_at: DateTime<Utc>) -> ContactSubmittedEvent {
        ContactSubmittedEvent {
            submission_id: Uuid::new_v4(),
            name: self.full_name(),
            email: self.email.clone(),
            inquiry_type: self.inquiry_type.as_str().to_string(),
            submitted_at,
        }
    }
}
