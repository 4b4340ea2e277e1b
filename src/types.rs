use jiff::Timestamp;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PondStatus {
    Inactive,
    Active,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pond {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub area: Option<f64>,
    #[serde(default)]
    pub depth: Option<f64>,
    pub status: PondStatus,
    #[serde(default)]
    pub stocked_at: Option<Timestamp>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPond {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedingSchedule {
    pub id: String,
    pub pond_id: String,
    pub feed_type: String,
    pub amount_kg: f64,
    pub scheduled_at: Timestamp,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFeedingSchedule {
    pub pond_id: String,
    pub feed_type: String,
    pub amount_kg: f64,
    pub scheduled_at: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicineSchedule {
    pub id: String,
    pub pond_id: String,
    pub medicine: String,
    pub dosage: f64,
    pub unit: String,
    pub scheduled_at: Timestamp,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMedicineSchedule {
    pub pond_id: String,
    pub medicine: String,
    pub dosage: f64,
    pub unit: String,
    pub scheduled_at: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// One environmental sample. Sensors report whichever channels they carry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorReading {
    pub pond_id: String,
    pub recorded_at: Timestamp,
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub ph: Option<f64>,
    #[serde(default)]
    pub dissolved_oxygen: Option<f64>,
    #[serde(default)]
    pub salinity: Option<f64>,
    #[serde(default)]
    pub ammonia: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorRange {
    pub from: Timestamp,
    pub to: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Harvest {
    pub id: String,
    pub pond_id: String,
    pub harvested_at: Timestamp,
    pub weight_kg: f64,
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewHarvest {
    pub pond_id: String,
    pub harvested_at: Timestamp,
    pub weight_kg: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PondTransfer {
    pub id: String,
    pub from_pond_id: String,
    pub to_pond_id: String,
    pub transferred_at: Timestamp,
    pub quantity: u64,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPondTransfer {
    pub from_pond_id: String,
    pub to_pond_id: String,
    pub transferred_at: Timestamp,
    pub quantity: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MachinePowerState {
    On,
    Off,
    Fault,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Machine {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub pond_id: Option<String>,
    #[serde(default)]
    pub kind: Option<String>,
    pub status: MachinePowerState,
}

/// Status change pushed by the backend for a single machine.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MachineStatus {
    pub machine_id: String,
    #[serde(default)]
    pub pond_id: Option<String>,
    pub status: MachinePowerState,
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub username: Option<String>,
}
