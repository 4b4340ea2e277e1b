use crate::gateway::Descriptor;
use crate::types::SensorRange;

use super::{Api, pond_query};

impl Api {
    /// Readings for one pond, optionally limited to `[from, to]`.
    pub fn sensor_readings(&self, pond_id: &str, range: Option<SensorRange>) -> Descriptor {
        let mut query = pond_query(pond_id);
        if let Some(range) = range {
            query.push(("from", range.from.to_string()));
            query.push(("to", range.to.to_string()));
        }
        self.get("sensors.list", "/sensor-readings".to_string(), query)
    }
}
