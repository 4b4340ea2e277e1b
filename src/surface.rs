//! Notification and navigation surfaces the gateway reports through.

use std::fmt;

use tracing::{error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Info,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Success => write!(f, "success"),
            Severity::Info => write!(f, "info"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// Short-lived user notification (toast).
pub trait Notifier: Send + Sync {
    fn notify(&self, severity: Severity, message: &str);
}

pub trait Navigator: Send + Sync {
    fn navigate(&self, route: &str);
}

/// Headless surface: notifications and navigation requests go to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSurface;

impl Notifier for LogSurface {
    fn notify(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Error => error!(severity = %severity, "notify: {}", message),
            _ => info!(severity = %severity, "notify: {}", message),
        }
    }
}

impl Navigator for LogSurface {
    fn navigate(&self, route: &str) {
        info!(route, "navigate");
    }
}
