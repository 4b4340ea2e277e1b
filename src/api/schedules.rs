use crate::adapter::segment;
use crate::gateway::Descriptor;
use crate::types::{NewFeedingSchedule, NewMedicineSchedule};

use super::{Api, pond_query};

impl Api {
    pub fn feeding_schedules(&self, pond_id: &str) -> Descriptor {
        self.get(
            "feeding.list",
            "/feeding-schedules".to_string(),
            pond_query(pond_id),
        )
    }

    pub fn create_feeding_schedule(&self, schedule: NewFeedingSchedule) -> Descriptor {
        self.post("feeding.create", "/feeding-schedules".to_string(), schedule)
    }

    pub fn delete_feeding_schedule(&self, schedule_id: &str) -> Descriptor {
        self.delete(
            "feeding.delete",
            format!("/feeding-schedules/{}", segment(schedule_id)),
        )
    }

    pub fn medicine_schedules(&self, pond_id: &str) -> Descriptor {
        self.get(
            "medicine.list",
            "/medicine-schedules".to_string(),
            pond_query(pond_id),
        )
    }

    pub fn create_medicine_schedule(&self, schedule: NewMedicineSchedule) -> Descriptor {
        self.post("medicine.create", "/medicine-schedules".to_string(), schedule)
    }

    pub fn delete_medicine_schedule(&self, schedule_id: &str) -> Descriptor {
        self.delete(
            "medicine.delete",
            format!("/medicine-schedules/{}", segment(schedule_id)),
        )
    }
}
