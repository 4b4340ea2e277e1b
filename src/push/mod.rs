mod event;
mod listener;
mod plan;

pub use event::{ConnectionState, MACHINE_STATUS_TOPIC, PushEvent};
pub use listener::{PushConnection, PushListener, PushTransport};
pub use plan::{JitterStrategy, ReconnectPlan};
