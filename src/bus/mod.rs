//! Bus abstraction — driver-agnostic publish/subscribe surface.
//!
//! The server consumes exactly this capability set; concrete driver types
//! never cross this module boundary. Drivers deliver raw bytes; the typed
//! encode/decode of envelopes lives in [`MessageBus`].
//!
//! Subscription model: [`Driver::subscribe`] fans several subject patterns
//! into one delivery channel, each underlying subscription filtered through
//! its own pattern's software match (brokers differ in wildcard
//! granularity). [`Driver::queue_subscribe`] adds queue-group semantics: at
//! most one member of the group, fleet-wide, receives each message.

use async_trait::async_trait;
use bytes::Bytes;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::ari::Event;
use crate::proxy::{Announcement, Response};
use crate::subject::Subject;
use crate::types::{Error, Result};

pub mod memory;
pub mod nats;
pub mod rabbitmq;

/// A subscribe pattern: either a fixed literal subject or a three-component
/// subject with any-address positions.
#[derive(Debug, Clone)]
pub enum Pattern {
    Literal(String),
    Subject(Subject),
}

impl Pattern {
    /// Final in-software match of a delivered subject.
    pub fn matches(&self, subject: &str) -> bool {
        match self {
            Pattern::Literal(s) => s == subject,
            Pattern::Subject(s) => s.matches(subject),
        }
    }

    /// Subject string handed to the broker, with `token` substituted for
    /// any-address positions on drivers that need a literal wildcard.
    pub fn for_driver(&self, token: &str) -> String {
        match self {
            Pattern::Literal(s) => s.clone(),
            Pattern::Subject(s) => s.wildcarded(token),
        }
    }

    /// Display label for logs.
    pub fn label(&self) -> String {
        match self {
            Pattern::Literal(s) => s.clone(),
            Pattern::Subject(s) => s.encode(),
        }
    }
}

/// One message delivered by a subscription.
#[derive(Debug, Clone)]
pub struct Delivery {
    pub subject: String,
    /// Reply subject for request-style messages; valid for exactly one
    /// publish.
    pub reply: Option<String>,
    pub payload: Bytes,
}

/// Driver capability set.
#[async_trait]
pub trait Driver: Send + Sync {
    /// Plain fan-in subscription over several patterns. Every matching
    /// subscriber receives every message.
    async fn subscribe(&self, patterns: &[Pattern]) -> Result<Subscription>;

    /// Queue-group subscription: among all subscribers sharing `group`,
    /// each message is delivered to exactly one.
    async fn queue_subscribe(&self, pattern: &Pattern, group: &str) -> Result<Subscription>;

    async fn publish(&self, subject: &str, payload: Bytes) -> Result<()>;

    async fn close(&self) -> Result<()>;
}

/// Receiving side of one subscription. The paired [`SubscriptionHandle`] is
/// held by the supervisor and cancelled exactly once at shutdown.
#[derive(Debug)]
pub struct Subscription {
    label: String,
    rx: mpsc::UnboundedReceiver<Delivery>,
    cancel: CancellationToken,
}

impl Subscription {
    pub fn new(
        label: impl Into<String>,
        rx: mpsc::UnboundedReceiver<Delivery>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            label: label.into(),
            rx,
            cancel,
        }
    }

    /// Next delivery; `None` once the subscription is cancelled or the
    /// driver connection is gone.
    pub async fn recv(&mut self) -> Option<Delivery> {
        tokio::select! {
            _ = self.cancel.cancelled() => None,
            delivery = self.rx.recv() => delivery,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Detach the cancellation side for the supervisor.
    pub fn handle(&self) -> SubscriptionHandle {
        SubscriptionHandle {
            label: self.label.clone(),
            cancel: self.cancel.clone(),
        }
    }
}

/// Cancellation closure of one subscription.
#[derive(Debug, Clone)]
pub struct SubscriptionHandle {
    label: String,
    cancel: CancellationToken,
}

impl SubscriptionHandle {
    pub fn unsubscribe(&self) {
        self.cancel.cancel();
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

/// Typed facade over an [`Arc<dyn Driver>`].
#[derive(Clone)]
pub struct MessageBus {
    driver: Arc<dyn Driver>,
}

impl MessageBus {
    pub fn new(driver: Arc<dyn Driver>) -> Self {
        Self { driver }
    }

    /// Connect to the bus named by `url`, choosing the driver from the URL
    /// scheme: `nats://` or `amqp://`/`amqps://`.
    pub async fn connect(url: &str) -> Result<Self> {
        if url.starts_with("nats://") {
            Ok(Self::new(Arc::new(nats::NatsDriver::connect(url).await?)))
        } else if url.starts_with("amqp://") || url.starts_with("amqps://") {
            Ok(Self::new(Arc::new(
                rabbitmq::RabbitDriver::connect(url).await?,
            )))
        } else {
            Err(Error::startup(format!("unknown message bus URL: {url}")))
        }
    }

    /// Subscribe to presence pings.
    pub async fn subscribe_ping(&self, subject: &str) -> Result<Subscription> {
        self.driver
            .subscribe(&[Pattern::Literal(subject.to_string())])
            .await
    }

    /// Subscribe to request subjects, fan-in, no queue group.
    pub async fn subscribe_requests(&self, patterns: Vec<Subject>) -> Result<Subscription> {
        let patterns: Vec<Pattern> = patterns.into_iter().map(Pattern::Subject).collect();
        self.driver.subscribe(&patterns).await
    }

    /// Subscribe to one create-class subject with queue-group semantics.
    pub async fn subscribe_create_request(
        &self,
        pattern: Subject,
        group: &str,
    ) -> Result<Subscription> {
        self.driver
            .queue_subscribe(&Pattern::Subject(pattern), group)
            .await
    }

    pub async fn publish_response(&self, subject: &str, response: &Response) -> Result<()> {
        self.publish_json(subject, response).await
    }

    pub async fn publish_announce(&self, subject: &str, announcement: &Announcement) -> Result<()> {
        self.publish_json(subject, announcement).await
    }

    pub async fn publish_event(&self, subject: &str, event: &Event) -> Result<()> {
        self.publish_json(subject, event).await
    }

    pub async fn close(&self) -> Result<()> {
        self.driver.close().await
    }

    async fn publish_json<T: Serialize>(&self, subject: &str, msg: &T) -> Result<()> {
        let payload = serde_json::to_vec(msg)?;
        self.driver.publish(subject, payload.into()).await
    }
}

impl std::fmt::Debug for MessageBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageBus").finish_non_exhaustive()
    }
}
