mod descriptor;

pub use descriptor::{Descriptor, PendingRequest};

use std::sync::Arc;

use futures::future::join_all;
use tracing::{info, warn};

use crate::config::{Config, Messages};
use crate::errors::Error;
use crate::failure::{RequestFailure, TransportError};
use crate::payload::{self, Payload};
use crate::session::SessionStore;
use crate::surface::{Navigator, Notifier, Severity};
use crate::telemetry::invocation::{InvocationForm, InvocationTelemetry};

/// What the caller hands to [`Gateway::invoke`].
#[derive(Debug)]
pub enum Invocation {
    Single(Descriptor),
    Batch(Vec<Descriptor>),
}

impl From<Descriptor> for Invocation {
    fn from(descriptor: Descriptor) -> Self {
        Invocation::Single(descriptor)
    }
}

impl From<Vec<Descriptor>> for Invocation {
    fn from(descriptors: Vec<Descriptor>) -> Self {
        Invocation::Batch(descriptors)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Resolved {
    Single(Payload),
    /// Positionally aligned with the input descriptors.
    Batch(Vec<Payload>),
}

impl Resolved {
    pub fn into_payloads(self) -> Vec<Payload> {
        match self {
            Resolved::Single(payload) => vec![payload],
            Resolved::Batch(payloads) => payloads,
        }
    }
}

type SuccessCallback = Box<dyn FnOnce(&Resolved) + Send>;
type FailureCallback = Box<dyn FnOnce(&RequestFailure) + Send>;

/// Optional side-effecting hooks layered over the returned `Result`.
#[derive(Default)]
pub struct Callbacks {
    on_success: Option<SuccessCallback>,
    on_failure: Option<FailureCallback>,
}

impl Callbacks {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn on_success(mut self, callback: impl FnOnce(&Resolved) + Send + 'static) -> Self {
        self.on_success = Some(Box::new(callback));
        self
    }

    pub fn on_failure(mut self, callback: impl FnOnce(&RequestFailure) + Send + 'static) -> Self {
        self.on_failure = Some(Box::new(callback));
        self
    }
}

#[derive(Clone, Debug)]
pub struct GatewayOptions {
    pub login_route: String,
    pub promote_embedded_failures: bool,
    pub messages: Messages,
}

impl Default for GatewayOptions {
    fn default() -> Self {
        Self {
            login_route: "/".to_string(),
            promote_embedded_failures: true,
            messages: Messages::default(),
        }
    }
}

impl GatewayOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            login_route: config.login_route.clone(),
            promote_embedded_failures: config.promote_embedded_failures,
            messages: config.messages.clone(),
        }
    }
}

/// Single chokepoint between UI actions and the network.
///
/// Runs one descriptor or a batch, promotes `success: false` bodies to
/// failures, and performs the failure side effects: one notification per
/// failed invocation, plus session teardown and a redirect on 401.
/// Nothing is retried here.
#[derive(Clone)]
pub struct Gateway {
    session: Arc<dyn SessionStore>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
    options: GatewayOptions,
}

impl Gateway {
    pub fn new(
        session: Arc<dyn SessionStore>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
        options: GatewayOptions,
    ) -> Self {
        Self {
            session,
            notifier,
            navigator,
            options,
        }
    }

    pub fn options(&self) -> &GatewayOptions {
        &self.options
    }

    pub async fn invoke(
        &self,
        invocation: impl Into<Invocation>,
        callbacks: Callbacks,
    ) -> Result<Resolved, Error> {
        let Callbacks {
            on_success,
            on_failure,
        } = callbacks;
        let outcome = match invocation.into() {
            Invocation::Single(descriptor) => self.single(descriptor).await.map(Resolved::Single),
            Invocation::Batch(descriptors) => self.batch(descriptors).await.map(Resolved::Batch),
        };
        match outcome {
            Ok(resolved) => {
                if let Some(callback) = on_success {
                    callback(&resolved);
                }
                Ok(resolved)
            }
            Err(Error::Request(failure)) => {
                if let Some(callback) = on_failure {
                    callback(&failure);
                }
                Err(Error::Request(failure))
            }
            Err(other) => Err(other),
        }
    }

    pub async fn single(&self, descriptor: Descriptor) -> Result<Payload, Error> {
        let telemetry =
            InvocationTelemetry::new(descriptor.label().to_string(), InvocationForm::Single, 1);
        telemetry.emit_start();
        match self.settle(descriptor.start().await) {
            Ok(payload) => {
                telemetry.emit_success();
                Ok(payload)
            }
            Err(failure) => Err(self.report(failure, &telemetry, 0, 1)),
        }
    }

    /// Runs every descriptor concurrently and waits for all of them.
    ///
    /// Results keep input order. When anything fails, only the failure with
    /// the lowest index is reported and returned.
    pub async fn batch(&self, descriptors: Vec<Descriptor>) -> Result<Vec<Payload>, Error> {
        if descriptors.is_empty() {
            warn!("invoke.rejected: empty batch");
            return Err(Error::EmptyBatch);
        }
        let context = descriptors
            .iter()
            .map(Descriptor::label)
            .collect::<Vec<_>>()
            .join(",");
        let telemetry = InvocationTelemetry::new(context, InvocationForm::Batch, descriptors.len());
        telemetry.emit_start();

        let pending = descriptors
            .into_iter()
            .map(Descriptor::start)
            .collect::<Vec<_>>();
        let settled = join_all(pending).await;

        let mut payloads = Vec::with_capacity(settled.len());
        let mut first_failure: Option<(usize, RequestFailure)> = None;
        let mut failed = 0;
        for (index, result) in settled.into_iter().enumerate() {
            match self.settle(result) {
                Ok(payload) => payloads.push(payload),
                Err(failure) => {
                    failed += 1;
                    if first_failure.is_none() {
                        first_failure = Some((index, failure));
                    }
                }
            }
        }

        match first_failure {
            Some((index, failure)) => Err(self.report(failure, &telemetry, index, failed)),
            None => {
                telemetry.emit_success();
                Ok(payloads)
            }
        }
    }

    fn settle(&self, result: Result<Payload, TransportError>) -> Result<Payload, RequestFailure> {
        let payload = result.map_err(RequestFailure::from_transport)?;
        if self.options.promote_embedded_failures && payload::signals_failure(&payload) {
            return Err(RequestFailure::application(payload));
        }
        Ok(payload)
    }

    fn report(
        &self,
        failure: RequestFailure,
        telemetry: &InvocationTelemetry,
        index: usize,
        failed: usize,
    ) -> Error {
        telemetry.emit_failure(&failure, index, failed);
        let messages = &self.options.messages;
        if failure.is_unauthorized() {
            self.notifier.notify(Severity::Error, &messages.session_expired);
            if let Err(e) = self.session.clear() {
                warn!(error = %e, "session.clear_failed");
            }
            info!(route = %self.options.login_route, "session expired; redirecting");
            self.navigator.navigate(&self.options.login_route);
        } else if failure.is_network_error() {
            self.notifier.notify(Severity::Error, &messages.network);
        } else {
            let text = failure.description().unwrap_or(messages.generic.as_str());
            self.notifier.notify(Severity::Error, text);
        }
        Error::Request(failure)
    }
}
