use crate::adapter::segment;
use crate::gateway::Descriptor;
use crate::types::NewPond;

use super::Api;

impl Api {
    pub fn list_ponds(&self) -> Descriptor {
        self.get("ponds.list", "/ponds".to_string(), Vec::new())
    }

    pub fn pond(&self, pond_id: &str) -> Descriptor {
        self.get("ponds.get", format!("/ponds/{}", segment(pond_id)), Vec::new())
    }

    pub fn create_pond(&self, pond: NewPond) -> Descriptor {
        self.post("ponds.create", "/ponds".to_string(), pond)
    }

    /// Moves a pond from inactive to active (stocked).
    pub fn activate_pond(&self, pond_id: &str) -> Descriptor {
        self.put(
            "ponds.activate",
            format!("/ponds/{}/activate", segment(pond_id)),
            serde_json::json!({}),
        )
    }

    pub fn delete_pond(&self, pond_id: &str) -> Descriptor {
        self.delete("ponds.delete", format!("/ponds/{}", segment(pond_id)))
    }
}
