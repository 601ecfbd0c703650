//! In-process bus driver.
//!
//! A hub shared by cloning: every clone talks to the same subscription
//! table, so several servers (or a server and a test harness) in one
//! process see one bus. Implements the full subject-matching and
//! queue-group semantics of the external drivers.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use super::{Delivery, Driver, Pattern, Subscription};
use crate::types::{Error, Result};

#[derive(Debug)]
struct Sub {
    id: u64,
    patterns: Vec<Pattern>,
    group: Option<String>,
    tx: mpsc::UnboundedSender<Delivery>,
}

#[derive(Debug, Default)]
struct Hub {
    subs: Mutex<Vec<Sub>>,
    next_id: AtomicU64,
    rr: AtomicUsize,
    closed: AtomicBool,
}

impl Hub {
    fn remove(&self, id: u64) {
        let mut subs = self.subs.lock().expect("hub lock poisoned");
        subs.retain(|s| s.id != id);
    }
}

/// Shared in-process bus.
#[derive(Debug, Clone, Default)]
pub struct MemoryBus {
    hub: Arc<Hub>,
}

impl MemoryBus {
    pub fn new() -> Self {
        Self::default()
    }

    fn add_sub(&self, patterns: Vec<Pattern>, group: Option<String>) -> Subscription {
        let label = patterns
            .iter()
            .map(Pattern::label)
            .collect::<Vec<_>>()
            .join(",");
        let (tx, rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();
        let id = self.hub.next_id.fetch_add(1, Ordering::Relaxed);

        self.hub
            .subs
            .lock()
            .expect("hub lock poisoned")
            .push(Sub {
                id,
                patterns,
                group,
                tx,
            });

        // Deregister as soon as the handle is cancelled so a queue group
        // never routes a message to a dead member.
        let hub = Arc::clone(&self.hub);
        let token = cancel.clone();
        tokio::spawn(async move {
            token.cancelled().await;
            hub.remove(id);
        });

        Subscription::new(label, rx, cancel)
    }

    fn deliver(&self, subject: &str, reply: Option<&str>, payload: &Bytes) {
        let delivery = || Delivery {
            subject: subject.to_string(),
            reply: reply.map(str::to_string),
            payload: payload.clone(),
        };

        let mut dead: Vec<u64> = Vec::new();
        let subs = self.hub.subs.lock().expect("hub lock poisoned");

        // Plain subscribers: everyone that matches receives a copy.
        for sub in subs
            .iter()
            .filter(|s| s.group.is_none() && s.patterns.iter().any(|p| p.matches(subject)))
        {
            if sub.tx.send(delivery()).is_err() {
                dead.push(sub.id);
            }
        }

        // Queue groups: one member per group.
        let mut groups: HashMap<&str, Vec<&Sub>> = HashMap::new();
        for sub in subs.iter().filter(|s| {
            s.group.is_some() && s.patterns.iter().any(|p| p.matches(subject))
        }) {
            groups
                .entry(sub.group.as_deref().unwrap_or_default())
                .or_default()
                .push(sub);
        }
        for members in groups.values() {
            let pick = self.hub.rr.fetch_add(1, Ordering::Relaxed) % members.len();
            if members[pick].tx.send(delivery()).is_err() {
                dead.push(members[pick].id);
            }
        }

        drop(subs);
        for id in dead {
            self.hub.remove(id);
        }
    }

    /// Publish a request carrying a reply subject. Servers never send
    /// requests; this is the client half used by embedders and tests.
    pub fn publish_request(&self, subject: &str, reply: &str, payload: impl Into<Bytes>) {
        self.deliver(subject, Some(reply), &payload.into());
    }
}

#[async_trait]
impl Driver for MemoryBus {
    async fn subscribe(&self, patterns: &[Pattern]) -> Result<Subscription> {
        if self.hub.closed.load(Ordering::Relaxed) {
            return Err(Error::startup("memory bus is closed"));
        }
        Ok(self.add_sub(patterns.to_vec(), None))
    }

    async fn queue_subscribe(&self, pattern: &Pattern, group: &str) -> Result<Subscription> {
        if self.hub.closed.load(Ordering::Relaxed) {
            return Err(Error::startup("memory bus is closed"));
        }
        Ok(self.add_sub(vec![pattern.clone()], Some(group.to_string())))
    }

    async fn publish(&self, subject: &str, payload: Bytes) -> Result<()> {
        if self.hub.closed.load(Ordering::Relaxed) {
            return Err(Error::publish("memory bus is closed"));
        }
        self.deliver(subject, None, &payload);
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        self.hub.closed.store(true, Ordering::Relaxed);
        self.hub.subs.lock().expect("hub lock poisoned").clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subject::Subject;

    fn subject_pattern(class: &str, app: &str, node: &str) -> Pattern {
        Pattern::Subject(Subject::new("ari.", class, app, node))
    }

    #[tokio::test]
    async fn test_publish_reaches_matching_subscribers() {
        let bus = MemoryBus::new();
        let mut exact = bus
            .subscribe(&[subject_pattern("get", "app", "node")])
            .await
            .unwrap();
        let mut other = bus
            .subscribe(&[subject_pattern("data", "app", "node")])
            .await
            .unwrap();

        bus.publish("ari.get.app.node", Bytes::from_static(b"x"))
            .await
            .unwrap();

        let d = exact.recv().await.unwrap();
        assert_eq!(d.subject, "ari.get.app.node");
        assert_eq!(d.payload.as_ref(), b"x");

        // The data subscriber saw nothing.
        bus.publish("ari.data.app.node", Bytes::from_static(b"y"))
            .await
            .unwrap();
        assert_eq!(other.recv().await.unwrap().payload.as_ref(), b"y");
    }

    #[tokio::test]
    async fn test_fan_in_accepts_each_request_once() {
        let bus = MemoryBus::new();
        let patterns = [
            subject_pattern("get", "", ""),
            subject_pattern("get", "app", ""),
            subject_pattern("get", "app", "node"),
        ];
        let mut sub = bus.subscribe(&patterns).await.unwrap();

        bus.publish("ari.get.app.node", Bytes::from_static(b"1"))
            .await
            .unwrap();
        bus.publish("ari.get.app.", Bytes::from_static(b"2"))
            .await
            .unwrap();
        bus.publish("ari.get..", Bytes::from_static(b"3"))
            .await
            .unwrap();

        for expect in [b"1", b"2", b"3"] {
            assert_eq!(sub.recv().await.unwrap().payload.as_ref(), expect);
        }
        // Nothing extra queued.
        assert!(tokio::time::timeout(
            std::time::Duration::from_millis(50),
            sub.recv()
        )
        .await
        .is_err());
    }

    #[tokio::test]
    async fn test_queue_group_delivers_to_exactly_one_member() {
        let bus = MemoryBus::new();
        let pattern = subject_pattern("create", "app", "");
        let mut a = bus.queue_subscribe(&pattern, "ariproxy").await.unwrap();
        let mut b = bus.queue_subscribe(&pattern, "ariproxy").await.unwrap();

        for _ in 0..4 {
            bus.publish("ari.create.app.", Bytes::from_static(b"req"))
                .await
                .unwrap();
        }

        let mut received = 0;
        let deadline = std::time::Duration::from_millis(50);
        while let Ok(Some(_)) = tokio::time::timeout(deadline, a.recv()).await {
            received += 1;
        }
        while let Ok(Some(_)) = tokio::time::timeout(deadline, b.recv()).await {
            received += 1;
        }
        assert_eq!(received, 4);
    }

    #[tokio::test]
    async fn test_unsubscribe_stops_delivery() {
        let bus = MemoryBus::new();
        let mut sub = bus
            .subscribe(&[Pattern::Literal("ari.ping".into())])
            .await
            .unwrap();
        let handle = sub.handle();

        handle.unsubscribe();
        assert!(sub.recv().await.is_none());

        // Give the reaper a turn, then verify the entry is gone.
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        bus.publish("ari.ping", Bytes::new()).await.unwrap();
        assert!(bus.hub.subs.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_request_carries_reply_subject() {
        let bus = MemoryBus::new();
        let mut sub = bus
            .subscribe(&[subject_pattern("command", "app", "node")])
            .await
            .unwrap();

        bus.publish_request("ari.command.app.node", "_reply.1", Bytes::from_static(b"r"));

        let d = sub.recv().await.unwrap();
        assert_eq!(d.reply.as_deref(), Some("_reply.1"));
    }
}
