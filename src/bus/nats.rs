//! NATS driver.
//!
//! NATS has no empty subject tokens, so any-address positions are
//! subscribed as the `*` wildcard and narrowed back down by the pattern's
//! software match — a `*` subscription sees every concrete token at that
//! position, not just the any-address marker.

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use super::{Delivery, Driver, Pattern, Subscription};
use crate::subject::WILDCARD;
use crate::types::{Error, Result};

/// Driver over one NATS connection.
pub struct NatsDriver {
    conn: nats::asynk::Connection,
}

impl std::fmt::Debug for NatsDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NatsDriver").finish_non_exhaustive()
    }
}

impl NatsDriver {
    pub async fn connect(url: &str) -> Result<Self> {
        let conn = nats::asynk::connect(url)
            .await
            .map_err(|e| Error::startup(format!("failed to connect to NATS at {url}: {e}")))?;
        Ok(Self { conn })
    }

    fn pump(
        sub: nats::asynk::Subscription,
        pattern: Pattern,
        tx: mpsc::UnboundedSender<Delivery>,
        cancel: CancellationToken,
    ) {
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    msg = sub.next() => {
                        let Some(msg) = msg else { break };
                        if !pattern.matches(&msg.subject) {
                            continue;
                        }
                        let delivery = Delivery {
                            subject: msg.subject,
                            reply: msg.reply,
                            payload: Bytes::from(msg.data),
                        };
                        if tx.send(delivery).is_err() {
                            break;
                        }
                    }
                }
            }
            if let Err(e) = sub.unsubscribe().await {
                tracing::debug!("NATS unsubscribe failed: {}", e);
            }
        });
    }
}

#[async_trait]
impl Driver for NatsDriver {
    async fn subscribe(&self, patterns: &[Pattern]) -> Result<Subscription> {
        let (tx, rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();
        let label = patterns
            .iter()
            .map(Pattern::label)
            .collect::<Vec<_>>()
            .join(",");

        for pattern in patterns {
            let sub = self
                .conn
                .subscribe(&pattern.for_driver(WILDCARD))
                .await
                .map_err(|e| {
                    Error::startup(format!("NATS subscribe {} failed: {e}", pattern.label()))
                })?;
            Self::pump(sub, pattern.clone(), tx.clone(), cancel.clone());
        }

        Ok(Subscription::new(label, rx, cancel))
    }

    async fn queue_subscribe(&self, pattern: &Pattern, group: &str) -> Result<Subscription> {
        let (tx, rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();

        let sub = self
            .conn
            .queue_subscribe(&pattern.for_driver(WILDCARD), group)
            .await
            .map_err(|e| {
                Error::startup(format!(
                    "NATS queue subscribe {} ({group}) failed: {e}",
                    pattern.label()
                ))
            })?;
        Self::pump(sub, pattern.clone(), tx, cancel.clone());

        Ok(Subscription::new(pattern.label(), rx, cancel))
    }

    async fn publish(&self, subject: &str, payload: Bytes) -> Result<()> {
        self.conn
            .publish(subject, payload.as_ref())
            .await
            .map_err(|e| Error::publish(format!("NATS publish to {subject} failed: {e}")))
    }

    async fn close(&self) -> Result<()> {
        self.conn.clone().close().await.map_err(Error::from)
    }
}
