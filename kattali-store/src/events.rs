use async_trait::async_trait;
use kattali_core::repository::EventPublisher;
use kattali_core::CoreResult;
use serde_json::Value;
use std::sync::Mutex;
use tracing::info;

/// Publishes events to the log. Nothing is delivered anywhere else.
///
/// Only the topic and key are written. Payloads carry contact details in the clear.
#[derive(Debug, Clone, Default)]
pub struct LogEventPublisher;

#[async_trait]
impl EventPublisher for LogEventPublisher {
    async fn publish(&self, topic: &str, key: &str, _payload: &Value) -> CoreResult<()> {
        info!(topic, key, "event published");
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PublishedEvent {
    pub topic: String,
    pub key: String,
    pub payload: Value,
}

/// Keeps published events in memory so callers can inspect them.
#[derive(Debug, Default)]
pub struct MemoryEventPublisher {
    events: Mutex<Vec<PublishedEvent>>,
}

impl MemoryEventPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<PublishedEvent> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl EventPublisher for MemoryEventPublisher {
    async fn publish(&self, topic: &str, key: &str, payload: &Value) -> CoreResult<()> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(PublishedEvent {
                topic: topic.to_string(),
                key: key.to_string(),
                payload: payload.clone(),
            });
        Ok(())
    }
}
