//! The Asterisk-facing proxy server.
//!
//! One server owns one ARI application on one Asterisk node and one bus
//! connection. Startup discovers the node identity, establishes every bus
//! subscription, then runs four kinds of background work until the caller's
//! cancellation token fires:
//!
//! - the announcer (periodic presence + ping replies)
//! - the event pump (ARI events → canonical and per-dialog subjects)
//! - the identity checker (fail-fast on Asterisk entity-id drift)
//! - one broker loop per request subscription, spawning a task per request
//!
//! Shutdown cancels every subscription handle in reverse creation order and
//! joins the background tasks inside a bounded grace window; exceeding the
//! window is a programmer error and panics.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

use crate::ari;
use crate::observability::server_span;
use crate::bus::{MessageBus, Subscription, SubscriptionHandle};
use crate::dialog;
use crate::proxy::{Announcement, EntityRef, Request, Response};
use crate::subject::{self, Subject, CLASS_COMMAND, CLASS_CREATE, CLASS_DATA, CLASS_GET};
use crate::types::{Config, Error, Result, QUEUE_GROUP};

mod dispatch;
mod ops;

/// The proxy server.
pub struct Server {
    config: Config,
    dialogs: Arc<dyn dialog::Manager>,
    ready_tx: watch::Sender<bool>,
    ready_rx: watch::Receiver<bool>,
}

impl Server {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        let (ready_tx, ready_rx) = watch::channel(false);
        Self {
            config,
            dialogs: Arc::new(dialog::MemoryManager::new()),
            ready_tx,
            ready_rx,
        }
    }

    /// Replace the dialog manager. Only meaningful before `listen`.
    pub fn with_dialog_manager(mut self, dialogs: Arc<dyn dialog::Manager>) -> Self {
        self.dialogs = dialogs;
        self
    }

    /// Readiness signal. The receiver observes `true` once all
    /// subscriptions are established; reads are idempotent and never block
    /// after first ready.
    pub fn ready(&self) -> watch::Receiver<bool> {
        self.ready_rx.clone()
    }

    /// Wait until the server is ready (or gone).
    pub async fn wait_ready(&self) {
        let mut rx = self.ready_rx.clone();
        while !*rx.borrow() {
            if rx.changed().await.is_err() {
                return;
            }
        }
    }

    /// Run the server against an ARI client and the bus named by `bus_url`
    /// (driver chosen from the URL scheme). Returns when `cancel` fires or
    /// on a startup error.
    pub async fn listen(
        &self,
        cancel: CancellationToken,
        ari: Arc<dyn ari::Client>,
        bus_url: &str,
    ) -> Result<()> {
        let bus = MessageBus::connect(bus_url).await?;
        self.listen_on(cancel, ari, bus).await
    }

    /// Run the server on pre-built ARI and bus clients.
    pub async fn listen_on(
        &self,
        cancel: CancellationToken,
        ari: Arc<dyn ari::Client>,
        bus: MessageBus,
    ) -> Result<()> {
        tracing::debug!("starting listener");

        let info = ari
            .asterisk()
            .info()
            .await
            .map_err(|e| Error::startup(format!("failed to get Asterisk info: {e}")))?;
        let asterisk_id = info.system.entity_id;
        if asterisk_id.is_empty() {
            return Err(Error::startup("empty Asterisk entity id"));
        }
        let application = ari.application_name();

        let core = Arc::new(Core {
            application,
            asterisk_id,
            prefix: self.config.prefix.clone(),
            ari: Arc::clone(&ari),
            bus: bus.clone(),
            dialogs: Arc::clone(&self.dialogs),
        });

        let mut handles: Vec<SubscriptionHandle> = Vec::new();

        let setup = async {
            let ping_sub = bus.subscribe_ping(&subject::ping(&core.prefix)).await?;
            handles.push(ping_sub.handle());

            let requests_sub = bus
                .subscribe_requests(request_subjects(
                    &core.prefix,
                    &core.application,
                    &core.asterisk_id,
                ))
                .await?;
            handles.push(requests_sub.handle());

            let mut create_subs = Vec::new();
            for pattern in create_subjects(&core.prefix, &core.application, &core.asterisk_id) {
                let sub = bus.subscribe_create_request(pattern, QUEUE_GROUP).await?;
                handles.push(sub.handle());
                create_subs.push(sub);
            }
            Ok::<_, Error>((ping_sub, requests_sub, create_subs))
        };
        let (ping_sub, requests_sub, create_subs) = match setup.await {
            Ok(subs) => subs,
            Err(e) => {
                // Partial startup: release whatever was established.
                for handle in handles.iter().rev() {
                    handle.unsubscribe();
                }
                return Err(e);
            }
        };

        // All task logs carry the proxy identity through this span.
        let span = server_span(&core.application, &core.asterisk_id);

        let mut tasks: Vec<JoinHandle<()>> = Vec::new();
        tasks.push(tokio::spawn(
            run_announcer(
                Arc::clone(&core),
                cancel.clone(),
                ping_sub,
                self.config.announce_interval,
            )
            .instrument(span.clone()),
        ));
        tasks.push(tokio::spawn(
            run_event_pump(Arc::clone(&core), cancel.clone()).instrument(span.clone()),
        ));
        tasks.push(tokio::spawn(
            run_identity_checker(
                Arc::clone(&core),
                cancel.clone(),
                self.config.identity_check_interval,
            )
            .instrument(span.clone()),
        ));
        tasks.push(tokio::spawn(
            run_request_broker(Arc::clone(&core), cancel.clone(), requests_sub)
                .instrument(span.clone()),
        ));
        for sub in create_subs {
            tasks.push(tokio::spawn(
                run_request_broker(Arc::clone(&core), cancel.clone(), sub)
                    .instrument(span.clone()),
            ));
        }

        self.ready_tx.send_replace(true);
        span.in_scope(|| tracing::info!("proxy ready"));

        cancel.cancelled().await;

        let teardown = async {
            for handle in handles.iter().rev() {
                tracing::debug!(subscription = handle.label(), "unsubscribing");
                handle.unsubscribe();
            }
            for task in tasks {
                let _ = task.await;
            }
        };
        if tokio::time::timeout(self.config.shutdown_grace, teardown)
            .await
            .is_err()
        {
            panic!("timeout waiting for shutdown of sub components");
        }

        if let Err(e) = bus.close().await {
            tracing::warn!("failed to close bus connection: {}", e);
        }
        ari.close().await;

        Ok(())
    }
}

impl Default for Server {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Server {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Server")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// The nine plain request subscription shapes: {get, data, command} ×
/// {any app, this app, this app + this node}.
fn request_subjects(prefix: &str, app: &str, node: &str) -> Vec<Subject> {
    let mut subjects = Vec::with_capacity(9);
    for class in [CLASS_GET, CLASS_DATA, CLASS_COMMAND] {
        subjects.push(Subject::new(prefix, class, "", ""));
        subjects.push(Subject::new(prefix, class, app, ""));
        subjects.push(Subject::new(prefix, class, app, node));
    }
    subjects
}

/// The three create-class queue-group subscription shapes.
fn create_subjects(prefix: &str, app: &str, node: &str) -> Vec<Subject> {
    vec![
        Subject::new(prefix, CLASS_CREATE, "", ""),
        Subject::new(prefix, CLASS_CREATE, app, ""),
        Subject::new(prefix, CLASS_CREATE, app, node),
    ]
}

/// Shared state of one running server, handed to every task and handler.
pub(crate) struct Core {
    pub(crate) application: String,
    pub(crate) asterisk_id: String,
    pub(crate) prefix: String,
    pub(crate) ari: Arc<dyn ari::Client>,
    pub(crate) bus: MessageBus,
    pub(crate) dialogs: Arc<dyn dialog::Manager>,
}

impl Core {
    /// Publish a response, logging any failure.
    pub(crate) async fn publish(&self, subject: &str, response: &Response) {
        if let Err(e) = self.bus.publish_response(subject, response).await {
            tracing::warn!(subject, "failed to publish response: {}", e);
        }
    }

    pub(crate) async fn send_error(&self, reply: &str, err: &Error) {
        self.publish(reply, &Response::error(err)).await;
    }

    async fn publish_event(&self, subject: &str, event: &ari::Event) {
        if let Err(e) = self.bus.publish_event(subject, event).await {
            tracing::warn!(subject, "failed to publish event: {}", e);
        }
    }

    async fn announce(&self) {
        let subject = subject::announce(&self.prefix);
        let announcement = Announcement {
            node: self.asterisk_id.clone(),
            application: self.application.clone(),
        };
        if let Err(e) = self.bus.publish_announce(&subject, &announcement).await {
            tracing::warn!(subject = %subject, "failed to publish announcement: {}", e);
        }
    }

    /// Handle to an entity on this node.
    pub(crate) fn entity_ref(&self, kind: &str, id: &str) -> EntityRef {
        EntityRef::new(kind, id, &self.asterisk_id, &self.application)
    }
}

/// Periodic presence announcer; also answers pings immediately whenever the
/// ARI connection is live.
async fn run_announcer(
    core: Arc<Core>,
    cancel: CancellationToken,
    mut ping_sub: Subscription,
    period: Duration,
) {
    let mut ticker = tokio::time::interval(period);
    loop {
        tokio::select! {
            _ = cancel.cancelled() => return,
            _ = ticker.tick() => core.announce().await,
            ping = ping_sub.recv() => {
                if ping.is_none() {
                    return;
                }
                // Tolerate pings arriving before ARI is up.
                if core.ari.connected() {
                    core.announce().await;
                }
            }
        }
    }
}

/// Republish ARI events, canonical subject first, then one stamped copy per
/// bound dialog.
async fn run_event_pump(core: Arc<Core>, cancel: CancellationToken) {
    let mut events = match core.ari.subscribe_events().await {
        Ok(rx) => rx,
        Err(e) => {
            tracing::error!("failed to subscribe to ARI events: {}", e);
            return;
        }
    };
    tracing::debug!("listening for events");

    let canonical = subject::event(&core.prefix, &core.application, &core.asterisk_id);
    loop {
        tokio::select! {
            _ = cancel.cancelled() => return,
            event = events.recv() => {
                let Some(event) = event else { return };
                tracing::debug!(kind = %event.kind(), "event received");

                core.publish_event(&canonical, &event).await;

                for dialog in core.dialogs.dialogs_for_event(&event) {
                    let mut stamped = event.clone();
                    stamped.set_dialog(&dialog);
                    core.publish_event(&subject::dialog_event(&core.prefix, &dialog), &stamped)
                        .await;
                }
            }
        }
    }
}

/// Periodic check of the Asterisk entity id. Drift means the node behind
/// this proxy was replaced; downstream consumers must rediscover, so exit
/// non-zero and let the process supervisor restart us.
async fn run_identity_checker(core: Arc<Core>, cancel: CancellationToken, period: Duration) {
    let mut ticker = tokio::time::interval(period);
    ticker.tick().await; // the immediate first tick
    loop {
        tokio::select! {
            _ = cancel.cancelled() => return,
            _ = ticker.tick() => {
                let info = match core.ari.asterisk().info().await {
                    Ok(info) => info,
                    Err(e) => {
                        tracing::error!("failed to get info from Asterisk: {}", e);
                        continue;
                    }
                };
                if info.system.entity_id != core.asterisk_id {
                    tracing::warn!(
                        old = %core.asterisk_id,
                        new = %info.system.entity_id,
                        "system entity id changed"
                    );
                    std::process::exit(1);
                }
            }
        }
    }
}

/// Accept requests from one subscription, one spawned task per request.
async fn run_request_broker(core: Arc<Core>, cancel: CancellationToken, mut sub: Subscription) {
    loop {
        tokio::select! {
            _ = cancel.cancelled() => return,
            delivery = sub.recv() => {
                let Some(delivery) = delivery else { return };
                let Some(reply) = delivery.reply else {
                    tracing::debug!(subject = %delivery.subject, "request without reply subject dropped");
                    continue;
                };

                let request: Request = match serde_json::from_slice(&delivery.payload) {
                    Ok(request) => request,
                    Err(e) => {
                        core.send_error(&reply, &Error::bad_request(format!("invalid request envelope: {e}")))
                            .await;
                        continue;
                    }
                };

                if !core.ari.connected() {
                    core.send_error(&reply, &Error::transport("ARI connection is down")).await;
                    continue;
                }

                let core = Arc::clone(&core);
                tokio::spawn(
                    async move {
                        dispatch::dispatch(&core, &reply, request).await;
                    }
                    .instrument(tracing::Span::current()),
                );
            }
        }
    }
}
