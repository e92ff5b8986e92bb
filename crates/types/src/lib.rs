use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(
            Clone, Debug, Serialize, Deserialize, ToSchema, JsonSchema, Eq, PartialEq, Hash,
        )]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }
    };
}
id_newtype!(ClassId);
id_newtype!(TeacherId);
id_newtype!(SubjectId);

/// Fixed six-day grid. The outer service may configure a different count
/// (`SCHED_DAYS`) but the core itself is built around this ordering.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, ToSchema, JsonSchema, Eq, PartialEq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

pub const ALL_DAYS: [Day; 6] = [
    Day::Monday,
    Day::Tuesday,
    Day::Wednesday,
    Day::Thursday,
    Day::Friday,
    Day::Saturday,
];

impl Day {
    pub fn index(self) -> usize {
        ALL_DAYS.iter().position(|d| *d == self).unwrap()
    }

    pub fn from_index(i: usize) -> Option<Day> {
        ALL_DAYS.get(i).copied()
    }
}

/// Wire-level subject kind. `kind` and `isLab` are both accepted on input and
/// normalized by the index builder into one boolean; see `sched_core::index`.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, JsonSchema, Default, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum SubjectKind {
    #[default]
    Theory,
    Lab,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, JsonSchema)]
pub struct Subject {
    pub id: SubjectId,
    #[serde(default)]
    pub r#type: Option<SubjectKind>,
    #[serde(default, rename = "isLab")]
    pub is_lab: Option<bool>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClassSubject {
    pub subject_id: SubjectId,
    pub teacher_id: TeacherId,
    pub hours_per_week: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, JsonSchema)]
pub struct Class {
    pub id: ClassId,
    pub subjects: Vec<ClassSubject>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, JsonSchema)]
pub struct UnavailableSlot {
    pub day: Day,
    pub period: u32,
}

fn default_max_periods_per_day() -> u32 {
    4
}

fn default_max_hours_per_week() -> u32 {
    25
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    pub id: TeacherId,
    #[serde(default = "default_max_periods_per_day")]
    pub max_periods_per_day: u32,
    #[serde(default = "default_max_hours_per_week")]
    pub max_hours_per_week: u32,
    #[serde(default)]
    pub unavailable_slots: Vec<UnavailableSlot>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FixedSlot {
    pub class_id: ClassId,
    pub day: Day,
    pub period: u32,
    #[serde(default)]
    pub subject_id: Option<SubjectId>,
    #[serde(default)]
    pub teacher_id: Option<TeacherId>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, JsonSchema, Default)]
pub struct ScheduleInstance {
    pub classes: Vec<Class>,
    pub teachers: Vec<Teacher>,
    pub subjects: Vec<Subject>,
    #[serde(default)]
    pub fixed_slots: Vec<FixedSlot>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, JsonSchema, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleCell {
    pub class_id: ClassId,
    pub day: Day,
    pub period: u32,
    pub subject_id: SubjectId,
    pub teacher_id: TeacherId,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, ToSchema, JsonSchema, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum SolveStatus {
    Optimal,
    Feasible,
    Infeasible,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, JsonSchema, Default)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total_possible_slots: u32,
    pub scheduled_slots: u32,
    pub utilization_rate: f64,
    pub teacher_workload: serde_json::Value,
    pub class_utilization: serde_json::Value,
    pub subject_distribution: serde_json::Value,
    pub conflicts: u32,
    pub solve_time: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, JsonSchema, Eq, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum ConflictKind {
    TeacherDoubleBooking,
    ClassDoubleBooking,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Conflict {
    pub kind: ConflictKind,
    pub day: Day,
    pub period: u32,
    pub entity_id: String,
    pub cells: Vec<ScheduleCell>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRequest {
    pub classes: Vec<Class>,
    pub teachers: Vec<Teacher>,
    pub subjects: Vec<Subject>,
    #[serde(default)]
    pub fixed_slots: Vec<FixedSlot>,
}

impl From<ScheduleRequest> for ScheduleInstance {
    fn from(r: ScheduleRequest) -> Self {
        ScheduleInstance {
            classes: r.classes,
            teachers: r.teachers,
            subjects: r.subjects,
            fixed_slots: r.fixed_slots,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, JsonSchema)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ScheduleResponse {
    Success {
        message: String,
        timetable: Vec<ScheduleCell>,
        statistics: Statistics,
    },
    Error {
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        statistics: Option<Statistics>,
    },
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, JsonSchema)]
pub struct ValidateRequest {
    pub timetable: Vec<ScheduleCell>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, JsonSchema)]
pub struct ValidateResponse {
    pub valid: bool,
    pub conflicts: Vec<Conflict>,
    pub message: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, JsonSchema)]
pub struct OptimizeRequest {
    pub timetable: Vec<ScheduleCell>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, JsonSchema)]
pub struct OptimizeResponse {
    pub optimized: Vec<ScheduleCell>,
    pub message: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, JsonSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub timestamp: String,
}
