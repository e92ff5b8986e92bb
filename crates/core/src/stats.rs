use std::collections::HashMap;

use serde_json::json;
use types::{ScheduleCell, ScheduleInstance, Statistics};

use crate::index::Index;

/// Descriptive statistics attached to every solve response: slot
/// utilization, per-teacher workload, per-class utilization, and subject
/// distribution.
pub fn compute_statistics(
    inst: &ScheduleInstance,
    idx: &Index,
    cells: &[ScheduleCell],
    solve_time: f64,
) -> Statistics {
    let total_possible_slots = (idx.class_count() * idx.days * idx.periods) as u32;
    let scheduled_slots = cells.len() as u32;
    let utilization_rate = if total_possible_slots > 0 {
        scheduled_slots as f64 / total_possible_slots as f64
    } else {
        0.0
    };

    let mut teacher_workload: HashMap<&str, u32> = HashMap::new();
    let mut class_utilization: HashMap<&str, u32> = HashMap::new();
    let mut subject_distribution: HashMap<&str, u32> = HashMap::new();

    for t in &inst.teachers {
        teacher_workload.entry(t.id.0.as_str()).or_insert(0);
    }
    for c in &inst.classes {
        class_utilization.entry(c.id.0.as_str()).or_insert(0);
    }
    for s in &inst.subjects {
        subject_distribution.entry(s.id.0.as_str()).or_insert(0);
    }

    for cell in cells {
        *teacher_workload.entry(cell.teacher_id.0.as_str()).or_insert(0) += 1;
        *class_utilization.entry(cell.class_id.0.as_str()).or_insert(0) += 1;
        *subject_distribution
            .entry(cell.subject_id.0.as_str())
            .or_insert(0) += 1;
    }

    Statistics {
        total_possible_slots,
        scheduled_slots,
        utilization_rate,
        teacher_workload: json!(teacher_workload),
        class_utilization: json!(class_utilization),
        subject_distribution: json!(subject_distribution),
        conflicts: 0,
        solve_time,
    }
}
