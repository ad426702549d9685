//! User Model

use serde::{Deserialize, Serialize};

use super::WorkScheduleType;

/// Access role (admin UI gate, not review eligibility - that is JobTitle)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Employee,
    Admin,
}

/// Department a user belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Department {
    It,
    Hr,
    Finance,
    Marketing,
    Sales,
    Operations,
    Legal,
    Board,
}

/// Job title - drives request-review eligibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobTitle {
    SoftwareEngineer,
    Developer,
    TechLead,
    ProductOwner,
    ScrumMaster,
    Architect,
    HrAnalyst,
    Manager,
    DataEngineer,
    Support,
    Director,
}

impl JobTitle {
    /// Titles allowed to review requests.
    pub fn can_review(self) -> bool {
        matches!(self, Self::Manager | Self::HrAnalyst)
    }

    /// HR analysts review across departments; managers are scoped to
    /// their own.
    pub fn bypasses_department_scope(self) -> bool {
        matches!(self, Self::HrAnalyst)
    }
}

/// Employment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserStatus {
    Active,
    Inactive,
    OnVacation,
    MaternityLeave,
    DoctorsNote,
    TemporaryDisability,
}

/// User entity
///
/// Never physically deleted - deactivation is a status change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct User {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub role: UserRole,
    pub department: Department,
    pub job_title: JobTitle,
    pub status: UserStatus,
    /// Closed enum - the schedule catalogue is compile-time-known.
    pub work_schedule: WorkScheduleType,
    pub created_at: i64,
}

/// Create user payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserCreate {
    pub full_name: String,
    pub email: String,
    #[serde(default = "default_role")]
    pub role: UserRole,
    pub department: Department,
    pub job_title: JobTitle,
    #[serde(default = "default_schedule")]
    pub work_schedule: WorkScheduleType,
}

fn default_role() -> UserRole {
    UserRole::Employee
}

fn default_schedule() -> WorkScheduleType {
    WorkScheduleType::Comercial
}

/// Status change payload (soft activation/deactivation)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserStatusUpdate {
    pub status: UserStatus,
}
