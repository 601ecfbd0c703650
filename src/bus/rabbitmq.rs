//! RabbitMQ driver (AMQP 0.9.1).
//!
//! All traffic flows through one topic exchange. Plain subscriptions bind
//! an exclusive auto-delete queue per pattern; queue-group subscriptions
//! share one named queue per (group, pattern), which gives competing
//! consumers across the proxy fleet. AMQP's `*` binds exactly one word, the
//! same token the software matcher treats as the any-address marker, so
//! filtering mirrors the NATS driver.

use async_trait::async_trait;
use bytes::Bytes;
use futures::StreamExt;
use lapin::options::{
    BasicCancelOptions, BasicConsumeOptions, BasicPublishOptions, ExchangeDeclareOptions,
    QueueBindOptions, QueueDeclareOptions,
};
use lapin::types::FieldTable;
use lapin::{BasicProperties, Connection, ConnectionProperties, ExchangeKind};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use super::{Delivery, Driver, Pattern, Subscription};
use crate::subject::WILDCARD;
use crate::types::{Error, Result};

const EXCHANGE: &str = "ari-proxy";

/// Driver over one AMQP connection with a single publish/consume channel.
pub struct RabbitDriver {
    conn: Connection,
    channel: lapin::Channel,
}

impl std::fmt::Debug for RabbitDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RabbitDriver").finish_non_exhaustive()
    }
}

impl RabbitDriver {
    pub async fn connect(url: &str) -> Result<Self> {
        let conn = Connection::connect(url, ConnectionProperties::default())
            .await
            .map_err(|e| Error::startup(format!("failed to connect to RabbitMQ at {url}: {e}")))?;
        let channel = conn
            .create_channel()
            .await
            .map_err(|e| Error::startup(format!("failed to open AMQP channel: {e}")))?;
        channel
            .exchange_declare(
                EXCHANGE,
                ExchangeKind::Topic,
                ExchangeDeclareOptions {
                    durable: false,
                    auto_delete: true,
                    ..Default::default()
                },
                FieldTable::default(),
            )
            .await
            .map_err(|e| Error::startup(format!("failed to declare exchange {EXCHANGE}: {e}")))?;
        Ok(Self { conn, channel })
    }

    async fn consume_queue(
        &self,
        queue_name: &str,
        declare: QueueDeclareOptions,
        pattern: &Pattern,
        tx: mpsc::UnboundedSender<Delivery>,
        cancel: CancellationToken,
    ) -> Result<()> {
        let map_err =
            |e: lapin::Error| Error::startup(format!("AMQP subscribe {}: {e}", pattern.label()));

        let queue = self
            .channel
            .queue_declare(queue_name, declare, FieldTable::default())
            .await
            .map_err(map_err)?;
        self.channel
            .queue_bind(
                queue.name().as_str(),
                EXCHANGE,
                &pattern.for_driver(WILDCARD),
                QueueBindOptions::default(),
                FieldTable::default(),
            )
            .await
            .map_err(map_err)?;

        let tag = format!("ariproxy-{}", uuid::Uuid::new_v4().simple());
        let mut consumer = self
            .channel
            .basic_consume(
                queue.name().as_str(),
                &tag,
                BasicConsumeOptions {
                    no_ack: true,
                    ..Default::default()
                },
                FieldTable::default(),
            )
            .await
            .map_err(map_err)?;

        let pattern = pattern.clone();
        let channel = self.channel.clone();
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    next = consumer.next() => {
                        let Some(Ok(msg)) = next else { break };
                        let subject = msg.routing_key.as_str().to_string();
                        if !pattern.matches(&subject) {
                            continue;
                        }
                        let delivery = Delivery {
                            subject,
                            reply: msg
                                .properties
                                .reply_to()
                                .as_ref()
                                .map(|r| r.as_str().to_string()),
                            payload: Bytes::from(msg.data),
                        };
                        if tx.send(delivery).is_err() {
                            break;
                        }
                    }
                }
            }
            if let Err(e) = channel
                .basic_cancel(&tag, BasicCancelOptions::default())
                .await
            {
                tracing::debug!("AMQP consumer cancel failed: {}", e);
            }
        });

        Ok(())
    }
}

#[async_trait]
impl Driver for RabbitDriver {
    async fn subscribe(&self, patterns: &[Pattern]) -> Result<Subscription> {
        let (tx, rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();
        let label = patterns
            .iter()
            .map(Pattern::label)
            .collect::<Vec<_>>()
            .join(",");

        for pattern in patterns {
            // Server-named exclusive queue, one per pattern.
            self.consume_queue(
                "",
                QueueDeclareOptions {
                    exclusive: true,
                    auto_delete: true,
                    ..Default::default()
                },
                pattern,
                tx.clone(),
                cancel.clone(),
            )
            .await?;
        }

        Ok(Subscription::new(label, rx, cancel))
    }

    async fn queue_subscribe(&self, pattern: &Pattern, group: &str) -> Result<Subscription> {
        let (tx, rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();

        // Every group member declares the same queue name; the broker then
        // round-robins deliveries among their consumers.
        let queue_name = format!("{group}.{}", pattern.for_driver(WILDCARD));
        self.consume_queue(
            &queue_name,
            QueueDeclareOptions {
                auto_delete: true,
                ..Default::default()
            },
            pattern,
            tx,
            cancel.clone(),
        )
        .await?;

        Ok(Subscription::new(pattern.label(), rx, cancel))
    }

    async fn publish(&self, subject: &str, payload: Bytes) -> Result<()> {
        let _confirm = self
            .channel
            .basic_publish(
                EXCHANGE,
                subject,
                BasicPublishOptions::default(),
                payload.as_ref(),
                BasicProperties::default(),
            )
            .await
            .map_err(|e| Error::publish(format!("AMQP publish to {subject} failed: {e}")))?;
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        self.conn
            .close(200, "shutting down")
            .await
            .map_err(|e| Error::internal(format!("AMQP close failed: {e}")))
    }
}
