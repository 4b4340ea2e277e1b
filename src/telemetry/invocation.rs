use std::fmt;
use std::time::Instant;

use tracing::{Level, event};
use uuid::Uuid;

use crate::failure::RequestFailure;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvocationForm {
    Single,
    Batch,
}

impl fmt::Display for InvocationForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvocationForm::Single => write!(f, "single"),
            InvocationForm::Batch => write!(f, "batch"),
        }
    }
}

/// Structured events for one gateway invocation, correlated by a random id.
#[derive(Clone, Debug)]
pub struct InvocationTelemetry {
    invocation_id: Uuid,
    context: String,
    form: InvocationForm,
    descriptors: usize,
    started: Instant,
}

impl InvocationTelemetry {
    pub fn new(context: impl Into<String>, form: InvocationForm, descriptors: usize) -> Self {
        Self {
            invocation_id: Uuid::new_v4(),
            context: context.into(),
            form,
            descriptors,
            started: Instant::now(),
        }
    }

    pub fn invocation_id(&self) -> Uuid {
        self.invocation_id
    }

    pub fn context(&self) -> &str {
        &self.context
    }

    pub fn emit_start(&self) {
        event!(
            Level::DEBUG,
            invocation_id = %self.invocation_id,
            context = %self.context,
            form = %self.form,
            descriptors = self.descriptors,
            "invoke.start"
        );
    }

    pub fn emit_success(&self) {
        event!(
            Level::INFO,
            invocation_id = %self.invocation_id,
            context = %self.context,
            form = %self.form,
            descriptors = self.descriptors,
            elapsed_ms = self.started.elapsed().as_millis() as u64,
            "invoke.success"
        );
    }

    /// `index` is the position of the reported descriptor within a batch.
    pub fn emit_failure(&self, failure: &RequestFailure, index: usize, failed: usize) {
        event!(
            Level::WARN,
            invocation_id = %self.invocation_id,
            context = %self.context,
            form = %self.form,
            descriptors = self.descriptors,
            index,
            failed,
            kind = %failure.kind(),
            status = failure.status().map(|s| s.as_u16()),
            elapsed_ms = self.started.elapsed().as_millis() as u64,
            error = %failure,
            "invoke.failure"
        );
    }
}
