use std::sync::Arc;

use async_trait::async_trait;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::{broadcast, watch};
use tracing::{debug, error, info, warn};

use crate::errors::Error;
use crate::session::{SessionCredential, SessionStore};

use super::event::{ConnectionState, PushEvent};
use super::plan::ReconnectPlan;

const EVENT_BUFFER: usize = 256;

/// Opens push channels. The socket library lives behind this trait.
#[async_trait]
pub trait PushTransport: Send + Sync {
    async fn connect(
        &self,
        url: &str,
        credential: Option<&SessionCredential>,
    ) -> Result<Box<dyn PushConnection>, Error>;
}

/// One open channel. `None` means the peer closed it.
#[async_trait]
pub trait PushConnection: Send {
    async fn next_message(&mut self) -> Option<Result<String, Error>>;
}

/// Keeps a push channel open and fans its events out to subscribers.
///
/// A successful connection resets the failure count; `max_attempts`
/// consecutive failed connects end the loop.
pub struct PushListener {
    url: String,
    transport: Arc<dyn PushTransport>,
    session: Arc<dyn SessionStore>,
    plan: ReconnectPlan,
    events: broadcast::Sender<PushEvent>,
    rng: StdRng,
}

impl PushListener {
    pub fn new(
        url: impl Into<String>,
        transport: Arc<dyn PushTransport>,
        session: Arc<dyn SessionStore>,
        plan: ReconnectPlan,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_BUFFER);
        Self {
            url: url.into(),
            transport,
            session,
            plan,
            events,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PushEvent> {
        self.events.subscribe()
    }

    /// Runs until `shutdown` flips to `true` (or its sender is dropped), or
    /// until reconnecting is exhausted.
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) -> Result<(), Error> {
        let mut failures: u32 = 0;
        loop {
            if *shutdown.borrow() {
                return Ok(());
            }
            let credential = self.session.load().unwrap_or_else(|e| {
                warn!(error = %e, "push.credential_unavailable");
                None
            });
            let connected = tokio::select! {
                res = self.transport.connect(&self.url, credential.as_ref()) => res,
                _ = shutdown.changed() => return Ok(()),
            };

            match connected {
                Ok(mut connection) => {
                    failures = 0;
                    info!(url = %self.url, "push.connected");
                    self.publish(PushEvent::Connection(ConnectionState::Connected));
                    loop {
                        let next = tokio::select! {
                            msg = connection.next_message() => msg,
                            _ = shutdown.changed() => return Ok(()),
                        };
                        match next {
                            Some(Ok(text)) => self.dispatch(&text),
                            Some(Err(e)) => {
                                warn!(url = %self.url, error = %e, "push.read_failed");
                                break;
                            }
                            None => break,
                        }
                    }
                    warn!(url = %self.url, "push.disconnected");
                    self.publish(PushEvent::Connection(ConnectionState::Disconnected));
                }
                Err(e) => {
                    failures += 1;
                    warn!(
                        url = %self.url,
                        attempt = failures,
                        max_attempts = self.plan.max_attempts,
                        error = %e,
                        "push.connect_failed"
                    );
                }
            }

            if failures >= self.plan.max_attempts {
                error!(url = %self.url, attempts = failures, "push.gave_up");
                self.publish(PushEvent::Connection(ConnectionState::GaveUp));
                return Err(Error::PushExhausted(failures));
            }

            let attempt = failures + 1;
            let delay = self.plan.delay_for_attempt(attempt, &mut self.rng);
            warn!(
                url = %self.url,
                attempt,
                delay_ms = delay.as_millis() as u64,
                "push.reconnect.scheduling"
            );
            self.publish(PushEvent::Connection(ConnectionState::Reconnecting {
                attempt,
                delay,
            }));
            tokio::select! {
                _ = tokio::time::sleep(delay) => {}
                _ = shutdown.changed() => return Ok(()),
            }
        }
    }

    fn dispatch(&self, text: &str) {
        match PushEvent::parse(text) {
            Ok(event) => self.publish(event),
            Err(e) => warn!(error = %e, "push.frame_skipped"),
        }
    }

    fn publish(&self, event: PushEvent) {
        if self.events.send(event).is_err() {
            debug!("push event dropped: no subscribers");
        }
    }
}
