use std::collections::HashSet;

use types::ScheduleInstance;

use crate::error::ScheduleError;

/// Structural checks that must pass before a model is ever built. Reports
/// the first offending entry it finds rather than accumulating every error
/// in the instance — the caller fixes one problem at a time.
pub fn validate_structure(inst: &ScheduleInstance) -> Result<(), ScheduleError> {
    if inst.classes.is_empty() && inst.teachers.is_empty() && inst.subjects.is_empty() {
        return Err(ScheduleError::bad_input(
            "classes/teachers/subjects",
            "instance has no classes, teachers, or subjects",
        ));
    }

    let mut seen_classes = HashSet::new();
    for c in &inst.classes {
        if !seen_classes.insert(&c.id) {
            return Err(ScheduleError::bad_input(
                "classes[].id",
                format!("duplicate class id {}", c.id.0),
            ));
        }
    }

    let mut seen_teachers = HashSet::new();
    for t in &inst.teachers {
        if !seen_teachers.insert(&t.id) {
            return Err(ScheduleError::bad_input(
                "teachers[].id",
                format!("duplicate teacher id {}", t.id.0),
            ));
        }
        if t.max_periods_per_day == 0 {
            return Err(ScheduleError::bad_input(
                format!("teachers[{}].maxPeriodsPerDay", t.id.0),
                "must be at least 1",
            ));
        }
    }

    let mut seen_subjects = HashSet::new();
    for s in &inst.subjects {
        if !seen_subjects.insert(&s.id) {
            return Err(ScheduleError::bad_input(
                "subjects[].id",
                format!("duplicate subject id {}", s.id.0),
            ));
        }
    }

    let subject_ids: HashSet<_> = inst.subjects.iter().map(|s| &s.id).collect();
    let teacher_ids: HashSet<_> = inst.teachers.iter().map(|t| &t.id).collect();

    for c in &inst.classes {
        for cs in &c.subjects {
            if !subject_ids.contains(&cs.subject_id) {
                return Err(ScheduleError::bad_input(
                    format!("classes[{}].subjects[].subjectId", c.id.0),
                    format!("unknown subject id {}", cs.subject_id.0),
                ));
            }
            if !teacher_ids.contains(&cs.teacher_id) {
                return Err(ScheduleError::bad_input(
                    format!("classes[{}].subjects[].teacherId", c.id.0),
                    format!("unknown teacher id {}", cs.teacher_id.0),
                ));
            }
        }
    }

    Ok(())
}

/// Rejects instances whose variable count would be unreasonably large
/// before any model construction happens, per the resource model: an
/// oversized instance is a bad-input error, not an excuse to exhaust
/// memory trying to build it.
pub fn validate_size(inst: &ScheduleInstance, days: usize, periods: usize) -> Result<(), ScheduleError> {
    if days == 0 || periods == 0 {
        return Err(ScheduleError::bad_input(
            "SCHED_DAYS/SCHED_PERIODS",
            "day and period grid must each have at least one slot",
        ));
    }

    const MAX_VARS: usize = 20_000_000;
    let vars = inst.classes.len() * days * periods * inst.subjects.len().max(1);
    if vars > MAX_VARS {
        return Err(ScheduleError::bad_input(
            "classes/subjects",
            format!(
                "instance too large: {} classes x {} days x {} periods x {} subjects exceeds the model size limit",
                inst.classes.len(),
                days,
                periods,
                inst.subjects.len()
            ),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::{Class, ClassId, ClassSubject, Subject, SubjectId, Teacher, TeacherId};

    fn minimal() -> ScheduleInstance {
        ScheduleInstance {
            classes: vec![Class {
                id: ClassId("X".into()),
                subjects: vec![ClassSubject {
                    subject_id: SubjectId("Math".into()),
                    teacher_id: TeacherId("T1".into()),
                    hours_per_week: 1,
                }],
            }],
            teachers: vec![Teacher {
                id: TeacherId("T1".into()),
                max_periods_per_day: 4,
                max_hours_per_week: 25,
                unavailable_slots: vec![],
            }],
            subjects: vec![Subject {
                id: SubjectId("Math".into()),
                r#type: None,
                is_lab: None,
            }],
            fixed_slots: vec![],
        }
    }

    #[test]
    fn accepts_valid_instance() {
        assert!(validate_structure(&minimal()).is_ok());
    }

    #[test]
    fn empty_instance_is_rejected() {
        let inst = ScheduleInstance::default();
        assert!(validate_structure(&inst).is_err());
    }

    #[test]
    fn zero_classes_with_teachers_and_subjects_is_accepted() {
        let mut inst = minimal();
        inst.classes.clear();
        assert!(validate_structure(&inst).is_ok());
    }

    #[test]
    fn rejects_unknown_teacher_reference() {
        let mut inst = minimal();
        inst.classes[0].subjects[0].teacher_id = TeacherId("Ghost".into());
        assert!(validate_structure(&inst).is_err());
    }

    #[test]
    fn rejects_zero_period_grid() {
        let inst = minimal();
        assert!(validate_size(&inst, 6, 0).is_err());
    }

    #[test]
    fn rejects_oversized_instance() {
        let inst = minimal();
        assert!(validate_size(&inst, 1_000_000, 1_000_000).is_err());
    }
}
