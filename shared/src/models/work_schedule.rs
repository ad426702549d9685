//! Work Schedule Model
//!
//! Schedules are a closed, compile-time-known set keyed by
//! [`WorkScheduleType`]. There is no `work_schedule` table; the users
//! table stores the discriminant and the catalogue below is served
//! read-only.

use serde::{Deserialize, Serialize};

/// Work schedule discriminant (stored on the user row)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkScheduleType {
    Comercial,
    Intern,
    Contractor,
}

impl WorkScheduleType {
    /// Every schedule in the catalogue.
    pub const ALL: [Self; 3] = [Self::Comercial, Self::Intern, Self::Contractor];

    /// Fixed lookup table for the schedule parameters.
    pub fn info(self) -> WorkSchedule {
        match self {
            Self::Comercial => WorkSchedule {
                id: self,
                name: "Comercial",
                start_time: "08:00",
                end_time: "17:00",
                tolerance_minutes: 10,
                work_days: &[1, 2, 3, 4, 5],
            },
            Self::Intern => WorkSchedule {
                id: self,
                name: "Intern",
                start_time: "08:00",
                end_time: "15:00",
                tolerance_minutes: 10,
                work_days: &[1, 2, 3, 4, 5],
            },
            Self::Contractor => WorkSchedule {
                id: self,
                name: "Contractor",
                start_time: "09:00",
                end_time: "18:00",
                tolerance_minutes: 10,
                work_days: &[1, 2, 3, 4, 5],
            },
        }
    }
}

/// Schedule parameters (catalogue entry)
#[derive(Debug, Clone, Serialize)]
pub struct WorkSchedule {
    pub id: WorkScheduleType,
    pub name: &'static str,
    /// HH:MM
    pub start_time: &'static str,
    /// HH:MM
    pub end_time: &'static str,
    pub tolerance_minutes: u32,
    /// 0 = Sunday .. 6 = Saturday
    pub work_days: &'static [u8],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalogue_covers_every_variant() {
        for ty in WorkScheduleType::ALL {
            let info = ty.info();
            assert_eq!(info.id, ty);
            assert!(!info.name.is_empty());
            assert!(!info.work_days.is_empty());
        }
    }
}
