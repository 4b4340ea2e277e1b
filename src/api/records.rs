use crate::gateway::Descriptor;
use crate::types::{NewHarvest, NewPondTransfer};

use super::{Api, pond_query};

impl Api {
    pub fn harvests(&self, pond_id: &str) -> Descriptor {
        self.get("harvests.list", "/harvests".to_string(), pond_query(pond_id))
    }

    pub fn record_harvest(&self, harvest: NewHarvest) -> Descriptor {
        self.post("harvests.create", "/harvests".to_string(), harvest)
    }

    pub fn transfers(&self, pond_id: &str) -> Descriptor {
        self.get(
            "transfers.list",
            "/pond-transfers".to_string(),
            pond_query(pond_id),
        )
    }

    pub fn record_transfer(&self, transfer: NewPondTransfer) -> Descriptor {
        self.post("transfers.create", "/pond-transfers".to_string(), transfer)
    }
}
