use std::borrow::Cow;
use std::fmt;
use std::future::Future;

use futures::FutureExt;
use futures::future::BoxFuture;

use crate::failure::TransportError;
use crate::payload::Payload;

pub type PendingRequest = BoxFuture<'static, Result<Payload, TransportError>>;

enum Source {
    Deferred(Box<dyn FnOnce() -> PendingRequest + Send>),
    Pending(PendingRequest),
}

/// A deferred producer of one network operation. Built per call site, consumed once.
pub struct Descriptor {
    label: Cow<'static, str>,
    source: Source,
}

impl Descriptor {
    pub fn new<F, Fut>(produce: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<Payload, TransportError>> + Send + 'static,
    {
        Self {
            label: Cow::Borrowed("request"),
            source: Source::Deferred(Box::new(move || produce().boxed())),
        }
    }

    /// Wraps an operation that already exists.
    pub fn pending<Fut>(operation: Fut) -> Self
    where
        Fut: Future<Output = Result<Payload, TransportError>> + Send + 'static,
    {
        Self {
            label: Cow::Borrowed("request"),
            source: Source::Pending(operation.boxed()),
        }
    }

    /// Names the descriptor in invocation telemetry.
    pub fn labelled(mut self, label: impl Into<Cow<'static, str>>) -> Self {
        self.label = label.into();
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub(crate) fn start(self) -> PendingRequest {
        match self.source {
            Source::Deferred(produce) => produce(),
            Source::Pending(operation) => operation,
        }
    }
}

impl fmt::Debug for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.source {
            Source::Deferred(_) => "deferred",
            Source::Pending(_) => "pending",
        };
        f.debug_struct("Descriptor")
            .field("label", &self.label)
            .field("source", &kind)
            .finish()
    }
}
