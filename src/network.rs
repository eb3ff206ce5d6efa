//! Network gateway: connectivity status, inbound catalog spool, outbound
//! event delivery.
//!
//! The core never blocks on the network. Inbound payloads arrive through a
//! spool file watched by a background thread, validated at the boundary, and
//! handed to a registered callback. Outbound payloads drain from the bounded
//! event queue onto an append-only JSON-lines log; a delivery failure is
//! logged and never retried here.

use crate::events::{EventSender, OutboundEvent};
use anyhow::{Context, Result};
use crossbeam_channel::Receiver;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant, SystemTime};
use thiserror::Error;
use tracing::{info, warn};

/// Simulated association time once provisioning starts.
const PROVISION_COMPLETE_AFTER: Duration = Duration::from_secs(3);

/// Inbound payloads are checked here before they can reach the core.
#[derive(Debug, Error)]
pub enum BoundaryError {
    #[error("payload is not valid JSON: {0}")]
    NotJson(#[from] serde_json::Error),
    #[error("payload has no `tasks` key")]
    MissingTasks,
}

/// Accept only well-formed JSON objects that carry a `tasks` key. The full
/// schema decode happens later, inside the core's ingestion.
pub fn validate_inbound(json: &str) -> Result<(), BoundaryError> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    if value.get("tasks").is_none() {
        return Err(BoundaryError::MissingTasks);
    }
    Ok(())
}

#[derive(Debug, Default)]
struct NetShared {
    wifi_connected: AtomicBool,
    provisioned: AtomicBool,
    provisioning_started: Mutex<Option<Instant>>,
}

/// The core's view of the gateway: status flags, provisioning control, and
/// the outbound event queue.
#[derive(Clone)]
pub struct NetLink {
    shared: Arc<NetShared>,
    sender: EventSender,
}

impl NetLink {
    pub fn new(provisioned: bool, sender: EventSender) -> Self {
        let shared = NetShared::default();
        shared.provisioned.store(provisioned, Ordering::SeqCst);
        shared.wifi_connected.store(provisioned, Ordering::SeqCst);
        Self {
            shared: Arc::new(shared),
            sender,
        }
    }

    pub fn is_wifi_connected(&self) -> bool {
        if self.shared.wifi_connected.load(Ordering::SeqCst) {
            return true;
        }
        // Association comes up together with the provisioning completing.
        let started = self
            .shared
            .provisioning_started
            .lock()
            .expect("provisioning lock poisoned");
        matches!(*started, Some(at) if at.elapsed() >= PROVISION_COMPLETE_AFTER)
    }

    pub fn is_provisioned(&self) -> bool {
        if self.shared.provisioned.load(Ordering::SeqCst) {
            return true;
        }
        // While provisioning is active, association completes after a fixed
        // simulated delay.
        let started = self
            .shared
            .provisioning_started
            .lock()
            .expect("provisioning lock poisoned");
        match *started {
            Some(at) => at.elapsed() >= PROVISION_COMPLETE_AFTER,
            None => false,
        }
    }

    pub fn start_provisioning(&self) {
        info!("starting provisioning mode");
        let mut started = self
            .shared
            .provisioning_started
            .lock()
            .expect("provisioning lock poisoned");
        if started.is_none() {
            *started = Some(Instant::now());
        }
    }

    /// Leave provisioning mode, committing the result if association
    /// completed.
    pub fn stop_provisioning(&self) {
        let mut started = self
            .shared
            .provisioning_started
            .lock()
            .expect("provisioning lock poisoned");
        if let Some(at) = started.take() {
            if at.elapsed() >= PROVISION_COMPLETE_AFTER {
                self.shared.provisioned.store(true, Ordering::SeqCst);
                self.shared.wifi_connected.store(true, Ordering::SeqCst);
                info!("provisioning complete, network up");
            } else {
                info!("provisioning aborted");
            }
        }
    }

    /// Erase credentials/pairing state (factory reset).
    pub fn reset_credentials(&self) {
        self.shared.provisioned.store(false, Ordering::SeqCst);
        self.shared.wifi_connected.store(false, Ordering::SeqCst);
        *self
            .shared
            .provisioning_started
            .lock()
            .expect("provisioning lock poisoned") = None;
        info!("credentials cleared");
    }

    /// Fire-and-forget event submission.
    pub fn send_event(&self, event: OutboundEvent) {
        self.sender.send(event);
    }
}

/// Callback the gateway invokes with each validated inbound payload.
pub type InboundCallback = Arc<dyn Fn(&str) + Send + Sync>;

/// Background threads: spool watcher + event delivery.
pub struct NetworkGateway {
    shutdown: Arc<AtomicBool>,
    threads: Vec<JoinHandle<()>>,
}

impl NetworkGateway {
    /// Spawn the gateway threads.
    ///
    /// `spool` is polled for modification; each new payload is boundary-
    /// validated and handed to `on_inbound`. Events drained from `events_rx`
    /// are appended to `events_path`. `device_online` is emitted once when
    /// connectivity is first observed.
    pub fn spawn(
        link: NetLink,
        spool: PathBuf,
        events_path: PathBuf,
        events_rx: Receiver<OutboundEvent>,
        on_inbound: InboundCallback,
        poll_interval: Duration,
    ) -> Self {
        let shutdown = Arc::new(AtomicBool::new(false));
        let mut threads = Vec::new();

        {
            let shutdown = Arc::clone(&shutdown);
            let link = link.clone();
            threads.push(
                thread::Builder::new()
                    .name("spool-watcher".into())
                    .spawn(move || {
                        watch_spool(link, spool, on_inbound, shutdown, poll_interval)
                    })
                    .expect("spawning spool watcher"),
            );
        }

        {
            let shutdown = Arc::clone(&shutdown);
            threads.push(
                thread::Builder::new()
                    .name("event-delivery".into())
                    .spawn(move || deliver_events(events_path, events_rx, shutdown))
                    .expect("spawning event delivery"),
            );
        }

        Self { shutdown, threads }
    }

    /// Signal the threads and wait for them to finish.
    pub fn stop(mut self) {
        self.shutdown.store(true, Ordering::SeqCst);
        for handle in self.threads.drain(..) {
            let _ = handle.join();
        }
    }
}

fn watch_spool(
    link: NetLink,
    spool: PathBuf,
    on_inbound: InboundCallback,
    shutdown: Arc<AtomicBool>,
    poll_interval: Duration,
) {
    let mut last_seen: Option<SystemTime> = None;
    let mut online_sent = false;

    while !shutdown.load(Ordering::SeqCst) {
        if !online_sent && link.is_wifi_connected() {
            link.send_event(OutboundEvent::DeviceOnline {});
            online_sent = true;
        }

        let mtime = fs::metadata(&spool).and_then(|m| m.modified()).ok();
        if let Some(mtime) = mtime {
            if last_seen != Some(mtime) {
                last_seen = Some(mtime);
                match fs::read_to_string(&spool) {
                    Ok(json) => match validate_inbound(&json) {
                        Ok(()) => {
                            info!(bytes = json.len(), "inbound catalog payload accepted");
                            on_inbound(&json);
                        }
                        Err(e) => warn!("inbound catalog payload rejected: {e}"),
                    },
                    Err(e) => warn!("failed to read spool file: {e}"),
                }
            }
        }

        thread::sleep(poll_interval);
    }
}

fn deliver_events(
    events_path: PathBuf,
    events_rx: Receiver<OutboundEvent>,
    shutdown: Arc<AtomicBool>,
) {
    while !shutdown.load(Ordering::SeqCst) {
        match events_rx.recv_timeout(Duration::from_millis(200)) {
            Ok(event) => {
                if let Err(e) = append_event(&events_path, &event) {
                    // Best-effort delivery: log and move on, never retry.
                    warn!(kind = event.kind(), "event delivery failed: {e}");
                }
            }
            Err(crossbeam_channel::RecvTimeoutError::Timeout) => {}
            Err(crossbeam_channel::RecvTimeoutError::Disconnected) => break,
        }
    }
}

fn append_event(path: &PathBuf, event: &OutboundEvent) -> Result<()> {
    // Delivery-time stamp is transport metadata; receivers ignore unknown
    // keys.
    let mut value = serde_json::to_value(event).context("serializing event payload")?;
    if let Some(object) = value.as_object_mut() {
        object.insert(
            "delivered_at".to_string(),
            serde_json::Value::String(chrono::Local::now().to_rfc3339()),
        );
    }
    let line = serde_json::to_string(&value).context("serializing event payload")?;
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening event log {}", path.display()))?;
    writeln!(file, "{}", line).context("appending event payload")?;
    Ok(())
}
