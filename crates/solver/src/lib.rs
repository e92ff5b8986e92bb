mod ilp;

use std::time::Instant;

use good_lp::{default_solver, ProblemVariables, ResolutionError, SolverModel};
use tracing::{info, warn};

use sched_core::{Index, ScheduleError, SolveConfig, SolveOutcome, Solver};
use types::ScheduleInstance;

/// The timetable solver: builds the ILP model described by the variable
/// layer and constraint builder, configures the solve with the requested
/// time budget and worker count, and extracts the schedule. One instance
/// per process; holds no state between calls.
pub struct IlpSolver;

impl IlpSolver {
    pub fn new() -> Self {
        Self
    }
}

impl Default for IlpSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Solver for IlpSolver {
    fn solve(
        &self,
        inst: &ScheduleInstance,
        idx: &Index,
        config: &SolveConfig,
    ) -> Result<SolveOutcome, ScheduleError> {
        info!(
            classes = idx.class_count(),
            teachers = idx.teacher_count(),
            subjects = idx.subject_count(),
            "building timetable model"
        );

        if idx.class_count() == 0 {
            return Ok(SolveOutcome::Optimal {
                cells: Vec::new(),
                solve_time: 0.0,
            });
        }

        let start = Instant::now();

        let mut pvars = ProblemVariables::new();
        let v = ilp::declare_variables(idx, &mut pvars);
        let objective = ilp::build_objective(idx, &v);

        let model = pvars
            .minimise(objective)
            .using(default_solver)
            .set_parameter("threads", &config.workers.to_string())
            .set_parameter("seconds", &(config.time_limit_secs as f64).to_string());
        let model = ilp::build_constraints(model, inst, idx, &v);

        match model.solve() {
            Ok(sol) => {
                let cells = ilp::extract_solution(idx, &v, &sol);
                let solve_time = start.elapsed().as_secs_f64();
                info!(cells = cells.len(), solve_time, "solve complete");
                Ok(SolveOutcome::Optimal { cells, solve_time })
            }
            Err(ResolutionError::Infeasible) | Err(ResolutionError::Unbounded) => {
                let solve_time = start.elapsed().as_secs_f64();
                warn!(solve_time, "model has no feasible solution");
                Ok(SolveOutcome::Infeasible { solve_time })
            }
            Err(e) => Err(ScheduleError::Internal(anyhow::anyhow!(
                "solver backend failed: {e}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sched_core::prepare;
    use types::{
        Class, ClassId, ClassSubject, FixedSlot, ScheduleInstance, Subject, SubjectId,
        SubjectKind, Teacher, TeacherId, UnavailableSlot,
    };

    fn default_config() -> SolveConfig {
        SolveConfig {
            days: 1,
            periods: 6,
            time_limit_secs: 10,
            workers: 1,
        }
    }

    #[test]
    fn minimal_instance_is_solved() {
        let inst = ScheduleInstance {
            classes: vec![Class {
                id: ClassId("X".into()),
                subjects: vec![
                    ClassSubject {
                        subject_id: SubjectId("Math".into()),
                        teacher_id: TeacherId("T1".into()),
                        hours_per_week: 2,
                    },
                    ClassSubject {
                        subject_id: SubjectId("Sci".into()),
                        teacher_id: TeacherId("T2".into()),
                        hours_per_week: 1,
                    },
                ],
            }],
            teachers: vec![
                Teacher {
                    id: TeacherId("T1".into()),
                    max_periods_per_day: 4,
                    max_hours_per_week: 25,
                    unavailable_slots: vec![],
                },
                Teacher {
                    id: TeacherId("T2".into()),
                    max_periods_per_day: 4,
                    max_hours_per_week: 25,
                    unavailable_slots: vec![],
                },
            ],
            subjects: vec![
                Subject {
                    id: SubjectId("Math".into()),
                    r#type: Some(SubjectKind::Theory),
                    is_lab: None,
                },
                Subject {
                    id: SubjectId("Sci".into()),
                    r#type: Some(SubjectKind::Theory),
                    is_lab: None,
                },
            ],
            fixed_slots: vec![],
        };
        let config = default_config();
        let idx = prepare(&inst, &config).unwrap();
        let outcome = IlpSolver::new().solve(&inst, &idx, &config).unwrap();
        match outcome {
            SolveOutcome::Optimal { cells, .. } | SolveOutcome::Feasible { cells, .. } => {
                assert_eq!(cells.len(), 3);
                let math_count = cells.iter().filter(|c| c.subject_id.0 == "Math").count();
                assert_eq!(math_count, 2);
            }
            SolveOutcome::Infeasible { .. } => panic!("expected a feasible schedule"),
        }
    }

    #[test]
    fn teacher_double_demand_is_infeasible() {
        let inst = ScheduleInstance {
            classes: vec![
                Class {
                    id: ClassId("X".into()),
                    subjects: vec![ClassSubject {
                        subject_id: SubjectId("Math".into()),
                        teacher_id: TeacherId("T1".into()),
                        hours_per_week: 6,
                    }],
                },
                Class {
                    id: ClassId("Y".into()),
                    subjects: vec![ClassSubject {
                        subject_id: SubjectId("Math".into()),
                        teacher_id: TeacherId("T1".into()),
                        hours_per_week: 6,
                    }],
                },
            ],
            teachers: vec![Teacher {
                id: TeacherId("T1".into()),
                max_periods_per_day: 6,
                max_hours_per_week: 25,
                unavailable_slots: vec![],
            }],
            subjects: vec![Subject {
                id: SubjectId("Math".into()),
                r#type: Some(SubjectKind::Theory),
                is_lab: None,
            }],
            fixed_slots: vec![],
        };
        let config = default_config();
        let idx = prepare(&inst, &config).unwrap();
        let outcome = IlpSolver::new().solve(&inst, &idx, &config).unwrap();
        assert!(matches!(outcome, SolveOutcome::Infeasible { .. }));
    }

    #[test]
    fn fixed_slot_is_honored() {
        let inst = ScheduleInstance {
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
                r#type: Some(SubjectKind::Theory),
                is_lab: None,
            }],
            fixed_slots: vec![FixedSlot {
                class_id: ClassId("X".into()),
                day: types::Day::Wednesday,
                period: 3,
                subject_id: Some(SubjectId("Math".into())),
                teacher_id: Some(TeacherId("T1".into())),
            }],
        };
        let config = SolveConfig {
            days: 6,
            periods: 6,
            time_limit_secs: 10,
            workers: 1,
        };
        let idx = prepare(&inst, &config).unwrap();
        let outcome = IlpSolver::new().solve(&inst, &idx, &config).unwrap();
        match outcome {
            SolveOutcome::Optimal { cells, .. } => {
                assert_eq!(cells.len(), 1);
                assert_eq!(cells[0].day, types::Day::Wednesday);
                assert_eq!(cells[0].period, 3);
            }
            other => panic!("expected a single optimal cell, got {other:?}"),
        }
    }

    #[test]
    fn availability_is_honored() {
        let inst = ScheduleInstance {
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
                unavailable_slots: vec![UnavailableSlot {
                    day: types::Day::Monday,
                    period: 1,
                }],
            }],
            subjects: vec![Subject {
                id: SubjectId("Math".into()),
                r#type: Some(SubjectKind::Theory),
                is_lab: None,
            }],
            fixed_slots: vec![],
        };
        let config = SolveConfig {
            days: 1,
            periods: 1,
            time_limit_secs: 5,
            workers: 1,
        };
        let idx = prepare(&inst, &config).unwrap();
        let outcome = IlpSolver::new().solve(&inst, &idx, &config).unwrap();
        assert!(matches!(outcome, SolveOutcome::Infeasible { .. }));
    }

    #[test]
    fn lab_subject_is_placed_as_an_adjacent_pair() {
        let inst = ScheduleInstance {
            classes: vec![Class {
                id: ClassId("X".into()),
                subjects: vec![ClassSubject {
                    subject_id: SubjectId("Lab".into()),
                    teacher_id: TeacherId("T1".into()),
                    hours_per_week: 2,
                }],
            }],
            teachers: vec![Teacher {
                id: TeacherId("T1".into()),
                max_periods_per_day: 4,
                max_hours_per_week: 25,
                unavailable_slots: vec![],
            }],
            subjects: vec![Subject {
                id: SubjectId("Lab".into()),
                r#type: Some(SubjectKind::Lab),
                is_lab: None,
            }],
            fixed_slots: vec![],
        };
        let config = SolveConfig {
            days: 1,
            periods: 6,
            time_limit_secs: 10,
            workers: 1,
        };
        let idx = prepare(&inst, &config).unwrap();
        let outcome = IlpSolver::new().solve(&inst, &idx, &config).unwrap();
        match outcome {
            SolveOutcome::Optimal { mut cells, .. } => {
                assert_eq!(cells.len(), 2);
                cells.sort_by_key(|c| c.period);
                assert_eq!(cells[1].period, cells[0].period + 1);
                assert!(cells[1].period <= config.periods as u32);
            }
            other => panic!("expected a lab pair, got {other:?}"),
        }
    }
}
