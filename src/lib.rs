pub mod adapter;
pub mod api;
mod client;
pub mod config;
pub mod errors;
pub mod failure;
pub mod gateway;
pub mod payload;
pub mod push;
pub mod session;
pub mod surface;
pub mod telemetry;
pub mod types;

pub use adapter::HttpAdapter;
pub use client::FarmClient;
pub use config::{Config, ConfigLocation, Messages, read_config};
pub use errors::Error;
pub use failure::{FailureKind, RequestFailure, TransportError};
pub use gateway::{Callbacks, Descriptor, Gateway, GatewayOptions, Invocation, Resolved};
pub use payload::Payload;
pub use session::{FileSessionStore, MemorySessionStore, SessionCredential, SessionStore};
pub use surface::{LogSurface, Navigator, Notifier, Severity};

#[cfg(test)]
pub(crate) mod tests;
