use std::collections::HashMap;

use types::{Conflict, ConflictKind, ScheduleCell};

/// Scans an externally supplied timetable for teacher and class
/// double-bookings. Does not re-solve or otherwise validate subject plans;
/// it only looks for two cells sharing the same (teacher, day, period) or
/// (class, day, period).
pub fn find_conflicts(cells: &[ScheduleCell]) -> Vec<Conflict> {
    let mut by_teacher_slot: HashMap<(String, &str, u32), Vec<&ScheduleCell>> = HashMap::new();
    let mut by_class_slot: HashMap<(String, &str, u32), Vec<&ScheduleCell>> = HashMap::new();

    for cell in cells {
        by_teacher_slot
            .entry((cell.teacher_id.0.clone(), day_key(&cell.day), cell.period))
            .or_default()
            .push(cell);
        by_class_slot
            .entry((cell.class_id.0.clone(), day_key(&cell.day), cell.period))
            .or_default()
            .push(cell);
    }

    let mut conflicts = Vec::new();

    for ((teacher_id, _, period), group) in &by_teacher_slot {
        if group.len() > 1 {
            conflicts.push(Conflict {
                kind: ConflictKind::TeacherDoubleBooking,
                day: group[0].day,
                period: *period,
                entity_id: teacher_id.clone(),
                cells: group.iter().map(|c| (*c).clone()).collect(),
            });
        }
    }

    for ((class_id, _, period), group) in &by_class_slot {
        if group.len() > 1 {
            conflicts.push(Conflict {
                kind: ConflictKind::ClassDoubleBooking,
                day: group[0].day,
                period: *period,
                entity_id: class_id.clone(),
                cells: group.iter().map(|c| (*c).clone()).collect(),
            });
        }
    }

    conflicts.sort_by(|a, b| (a.day.index(), a.period, &a.entity_id).cmp(&(b.day.index(), b.period, &b.entity_id)));
    conflicts
}

fn day_key(day: &types::Day) -> &'static str {
    match day {
        types::Day::Monday => "mon",
        types::Day::Tuesday => "tue",
        types::Day::Wednesday => "wed",
        types::Day::Thursday => "thu",
        types::Day::Friday => "fri",
        types::Day::Saturday => "sat",
    }
}
