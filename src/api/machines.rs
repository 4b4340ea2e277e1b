use crate::adapter::segment;
use crate::gateway::Descriptor;
use crate::types::MachinePowerState;

use super::{Api, pond_query};

impl Api {
    /// All machines, or only those attached to `pond_id`.
    pub fn machines(&self, pond_id: Option<&str>) -> Descriptor {
        let query = pond_id.map(pond_query).unwrap_or_default();
        self.get("machines.list", "/machines".to_string(), query)
    }

    pub fn set_machine_status(&self, machine_id: &str, status: MachinePowerState) -> Descriptor {
        self.put(
            "machines.set_status",
            format!("/machines/{}/status", segment(machine_id)),
            serde_json::json!({ "status": status }),
        )
    }
}
