use std::collections::HashMap;
use std::collections::HashSet;

use types::{ClassId, ScheduleInstance, SubjectId, SubjectKind, TeacherId};

use crate::error::ScheduleError;

/// Dense integer indices over a [`ScheduleInstance`], built once per request.
///
/// Replaces dictionaries keyed by string ids with flat arrays indexed by
/// small integers, the representation the constraint builder and variable
/// layer are designed around.
pub struct Index {
    pub class_ids: Vec<ClassId>,
    pub teacher_ids: Vec<TeacherId>,
    pub subject_ids: Vec<SubjectId>,

    class_idx: HashMap<ClassId, usize>,
    teacher_idx: HashMap<TeacherId, usize>,
    subject_idx: HashMap<SubjectId, usize>,

    /// Subject indices whose normalized kind is lab.
    pub lab_subjects: HashSet<usize>,

    /// `teacher_of_cs[class][subject]` — the teacher idx teaching that
    /// subject to that class, if the class's plan includes it.
    pub teacher_of_cs: Vec<Vec<Option<usize>>>,

    /// `hours_of_cs[class][subject]` — required weekly hour count, 0 if
    /// the class's plan doesn't include the subject.
    pub hours_of_cs: Vec<Vec<u32>>,

    pub days: usize,
    pub periods: usize,
}

impl Index {
    pub fn class(&self, id: usize) -> &ClassId {
        &self.class_ids[id]
    }

    pub fn teacher(&self, id: usize) -> &TeacherId {
        &self.teacher_ids[id]
    }

    pub fn subject(&self, id: usize) -> &SubjectId {
        &self.subject_ids[id]
    }

    pub fn class_count(&self) -> usize {
        self.class_ids.len()
    }

    pub fn teacher_count(&self) -> usize {
        self.teacher_ids.len()
    }

    pub fn subject_count(&self) -> usize {
        self.subject_ids.len()
    }

    pub fn class_index(&self, id: &ClassId) -> Option<usize> {
        self.class_idx.get(id).copied()
    }

    pub fn teacher_index(&self, id: &TeacherId) -> Option<usize> {
        self.teacher_idx.get(id).copied()
    }

    pub fn subject_index(&self, id: &SubjectId) -> Option<usize> {
        self.subject_idx.get(id).copied()
    }
}

/// Intern every id referenced by the instance, normalize the lab flag, and
/// build the class/subject -> teacher/hours maps.
///
/// Any id referenced by a class plan, fixed slot, or unavailable-slot entry
/// that isn't declared in the corresponding top-level list is reported as a
/// [`ScheduleError::BadInput`] naming the offending field; it is never
/// silently dropped or remapped.
pub fn build_index(inst: &ScheduleInstance, days: usize, periods: usize) -> Result<Index, ScheduleError> {
    let class_ids: Vec<ClassId> = inst.classes.iter().map(|c| c.id.clone()).collect();
    let teacher_ids: Vec<TeacherId> = inst.teachers.iter().map(|t| t.id.clone()).collect();
    let subject_ids: Vec<SubjectId> = inst.subjects.iter().map(|s| s.id.clone()).collect();

    let class_idx: HashMap<ClassId, usize> = class_ids
        .iter()
        .cloned()
        .enumerate()
        .map(|(i, id)| (id, i))
        .collect();
    let teacher_idx: HashMap<TeacherId, usize> = teacher_ids
        .iter()
        .cloned()
        .enumerate()
        .map(|(i, id)| (id, i))
        .collect();
    let subject_idx: HashMap<SubjectId, usize> = subject_ids
        .iter()
        .cloned()
        .enumerate()
        .map(|(i, id)| (id, i))
        .collect();

    let mut lab_subjects = HashSet::new();
    for s in &inst.subjects {
        let is_lab = s.is_lab.unwrap_or(false) || matches!(s.r#type, Some(SubjectKind::Lab));
        if is_lab {
            let idx = *subject_idx.get(&s.id).expect("subject interned above");
            lab_subjects.insert(idx);
        }
    }

    let mut teacher_of_cs = vec![vec![None; subject_ids.len()]; class_ids.len()];
    let mut hours_of_cs = vec![vec![0u32; subject_ids.len()]; class_ids.len()];

    for class in &inst.classes {
        let ci = *class_idx
            .get(&class.id)
            .expect("class interned from this same list");
        for cs in &class.subjects {
            let si = *subject_idx.get(&cs.subject_id).ok_or_else(|| {
                ScheduleError::bad_input(
                    format!("classes[{}].subjects[].subjectId", class.id.0),
                    format!("unknown subject id {}", cs.subject_id.0),
                )
            })?;
            let ti = *teacher_idx.get(&cs.teacher_id).ok_or_else(|| {
                ScheduleError::bad_input(
                    format!("classes[{}].subjects[].teacherId", class.id.0),
                    format!("unknown teacher id {}", cs.teacher_id.0),
                )
            })?;
            teacher_of_cs[ci][si] = Some(ti);
            hours_of_cs[ci][si] = cs.hours_per_week;
        }
    }

    for slot in &inst.fixed_slots {
        if !class_idx.contains_key(&slot.class_id) {
            return Err(ScheduleError::bad_input(
                "fixedSlots[].classId",
                format!("unknown class id {}", slot.class_id.0),
            ));
        }
        if let Some(sid) = &slot.subject_id {
            if !subject_idx.contains_key(sid) {
                return Err(ScheduleError::bad_input(
                    "fixedSlots[].subjectId",
                    format!("unknown subject id {}", sid.0),
                ));
            }
        }
        if let Some(tid) = &slot.teacher_id {
            if !teacher_idx.contains_key(tid) {
                return Err(ScheduleError::bad_input(
                    "fixedSlots[].teacherId",
                    format!("unknown teacher id {}", tid.0),
                ));
            }
        }
    }

    for teacher in &inst.teachers {
        for _slot in &teacher.unavailable_slots {
            // day is a closed enum, always valid; period range is checked
            // by the caller against `periods` once both are known.
        }
    }

    Ok(Index {
        class_ids,
        teacher_ids,
        subject_ids,
        class_idx,
        teacher_idx,
        subject_idx,
        lab_subjects,
        teacher_of_cs,
        hours_of_cs,
        days,
        periods,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::{Class, ClassSubject, ScheduleInstance, Subject, SubjectKind, Teacher};

    #[test]
    fn normalizes_lab_flag_from_either_spelling() {
        let inst = ScheduleInstance {
            classes: vec![],
            teachers: vec![],
            subjects: vec![
                Subject {
                    id: SubjectId("L1".into()),
                    r#type: Some(SubjectKind::Lab),
                    is_lab: None,
                },
                Subject {
                    id: SubjectId("L2".into()),
                    r#type: None,
                    is_lab: Some(true),
                },
                Subject {
                    id: SubjectId("Theory".into()),
                    r#type: Some(SubjectKind::Theory),
                    is_lab: Some(false),
                },
            ],
            fixed_slots: vec![],
        };
        let idx = build_index(&inst, 6, 6).unwrap();
        let l1 = idx.subject_index(&SubjectId("L1".into())).unwrap();
        let l2 = idx.subject_index(&SubjectId("L2".into())).unwrap();
        let theory = idx.subject_index(&SubjectId("Theory".into())).unwrap();
        assert!(idx.lab_subjects.contains(&l1));
        assert!(idx.lab_subjects.contains(&l2));
        assert!(!idx.lab_subjects.contains(&theory));
    }

    #[test]
    fn teacher_of_cs_resolves_from_class_plan() {
        let inst = ScheduleInstance {
            classes: vec![Class {
                id: ClassId("X".into()),
                subjects: vec![ClassSubject {
                    subject_id: SubjectId("Math".into()),
                    teacher_id: TeacherId("T1".into()),
                    hours_per_week: 3,
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
        };
        let idx = build_index(&inst, 6, 6).unwrap();
        let ci = idx.class_index(&ClassId("X".into())).unwrap();
        let si = idx.subject_index(&SubjectId("Math".into())).unwrap();
        let ti = idx.teacher_index(&TeacherId("T1".into())).unwrap();
        assert_eq!(idx.teacher_of_cs[ci][si], Some(ti));
        assert_eq!(idx.hours_of_cs[ci][si], 3);
    }

    #[test]
    fn unknown_subject_reference_is_reported() {
        let inst = ScheduleInstance {
            classes: vec![Class {
                id: ClassId("X".into()),
                subjects: vec![ClassSubject {
                    subject_id: SubjectId("Ghost".into()),
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
            subjects: vec![],
            fixed_slots: vec![],
        };
        let err = build_index(&inst, 6, 6).unwrap_err();
        assert!(matches!(err, ScheduleError::BadInput { .. }));
    }
}
