//! Variable layer, constraint builder, and objective shaper for the
//! timetable model. An ILP engine stands in for a CP-SAT-style solver:
//! every variable here is boolean or small-range integer, every constraint
//! is a linear (in)equality, and the one place a CP "reified implication"
//! is needed (lab pairing) it is expressed directly as `a <= b`, which is
//! exact for binary variables and needs no big-M term.

use good_lp::{Expression, ProblemVariables, Solution, SolverModel, Variable};

use sched_core::Index;
use types::{Day, FixedSlot, ScheduleCell, ScheduleInstance, SubjectId, TeacherId};

/// `x[c][d][p][s]` decision variables, only allocated for (c, s) pairs the
/// class's plan actually assigns to a teacher — no wasted variables for
/// subjects a class never takes.
pub(crate) struct Vars {
    pub x: Vec<Vec<Vec<Vec<Option<Variable>>>>>,
    /// `y[t][c][d][p]`, only for teachers that teach class c at all.
    pub y: Vec<Vec<Vec<Vec<Option<Variable>>>>>,
    pub overload: Vec<Variable>,
}

pub(crate) fn declare_variables(idx: &Index, vars: &mut ProblemVariables) -> Vars {
    let (c, d, p, s) = (
        idx.class_count(),
        idx.days,
        idx.periods,
        idx.subject_count(),
    );

    let mut x = vec![vec![vec![vec![None; s]; p]; d]; c];
    for ci in 0..c {
        for si in 0..s {
            if idx.teacher_of_cs[ci][si].is_none() {
                continue;
            }
            for di in 0..d {
                for pi in 0..p {
                    x[ci][di][pi][si] = Some(vars.add(good_lp::variable().binary()));
                }
            }
        }
    }

    let mut teaches_class = vec![vec![false; c]; idx.teacher_count()];
    for ci in 0..c {
        for si in 0..s {
            if let Some(ti) = idx.teacher_of_cs[ci][si] {
                teaches_class[ti][ci] = true;
            }
        }
    }

    let mut y = vec![vec![vec![vec![None; p]; d]; c]; idx.teacher_count()];
    for ti in 0..idx.teacher_count() {
        for ci in 0..c {
            if !teaches_class[ti][ci] {
                continue;
            }
            for di in 0..d {
                for pi in 0..p {
                    y[ti][ci][di][pi] = Some(vars.add(good_lp::variable().binary()));
                }
            }
        }
    }

    let overload = (0..idx.teacher_count())
        .map(|_| vars.add(good_lp::variable().integer().min(0.0).max(100.0)))
        .collect();

    Vars { x, y, overload }
}

fn sum_x_over_s(v: &Vars, ci: usize, di: usize, pi: usize) -> Expression {
    v.x[ci][di][pi]
        .iter()
        .filter_map(|o| *o)
        .map(Expression::from)
        .sum()
}

fn sum_y_over_c(v: &Vars, ti: usize, di: usize, pi: usize) -> Expression {
    v.y[ti]
        .iter()
        .filter_map(|cd| cd[di][pi])
        .map(Expression::from)
        .sum()
}

/// Emits every hard constraint in the order described by the constraint
/// builder: single assignment, weekly hours, fixed slots, teacher linkage,
/// no double-booking, availability, daily cap, no back-to-back teaching,
/// no-consecutive-same-subject, lab pairing, no-triple-lab.
pub(crate) fn build_constraints<M: SolverModel>(
    mut model: M,
    inst: &ScheduleInstance,
    idx: &Index,
    v: &Vars,
) -> M {
    let (c, d, p, s) = (
        idx.class_count(),
        idx.days,
        idx.periods,
        idx.subject_count(),
    );

    // 1. at most one subject per cell; empty periods are allowed.
    for ci in 0..c {
        for di in 0..d {
            for pi in 0..p {
                model = model.with(sum_x_over_s(v, ci, di, pi).leq(1.0));
            }
        }
    }

    // 3. weekly hours exact match.
    for ci in 0..c {
        for si in 0..s {
            if idx.teacher_of_cs[ci][si].is_none() {
                continue;
            }
            let sum: Expression = (0..d)
                .flat_map(|di| (0..p).map(move |pi| (di, pi)))
                .filter_map(|(di, pi)| v.x[ci][di][pi][si])
                .map(Expression::from)
                .sum();
            model = model.with(sum.eq(idx.hours_of_cs[ci][si] as f64));
        }
    }

    // 4. fixed slots.
    for slot in &inst.fixed_slots {
        model = apply_fixed_slot(model, idx, v, slot);
    }

    // 5. teacher linkage: y[t][c][d][p] = sum over s with teacherOfCS[c][s]=t of x[c][d][p][s].
    for ti in 0..idx.teacher_count() {
        for ci in 0..c {
            for di in 0..d {
                for pi in 0..p {
                    let Some(yvar) = v.y[ti][ci][di][pi] else {
                        continue;
                    };
                    let sum: Expression = (0..s)
                        .filter(|&si| idx.teacher_of_cs[ci][si] == Some(ti))
                        .filter_map(|si| v.x[ci][di][pi][si])
                        .map(Expression::from)
                        .sum();
                    model = model.with(sum.eq(yvar));
                }
            }
        }
    }

    // 6. teacher no-double-booking.
    for ti in 0..idx.teacher_count() {
        for di in 0..d {
            for pi in 0..p {
                model = model.with(sum_y_over_c(v, ti, di, pi).leq(1.0));
            }
        }
    }

    // 7. teacher availability.
    for teacher in &inst.teachers {
        let Some(ti) = idx.teacher_index(&teacher.id) else {
            continue;
        };
        for slot in &teacher.unavailable_slots {
            let di = slot.day.index();
            let pi = (slot.period as usize).saturating_sub(1);
            if di >= d || pi >= p {
                continue;
            }
            for ci in 0..c {
                if let Some(yvar) = v.y[ti][ci][di][pi] {
                    model = model.with(Expression::from(yvar).eq(0.0));
                }
            }
        }
    }

    // 8. daily cap per teacher.
    for teacher in &inst.teachers {
        let Some(ti) = idx.teacher_index(&teacher.id) else {
            continue;
        };
        for di in 0..d {
            let sum: Expression = (0..p).map(|pi| sum_y_over_c(v, ti, di, pi)).sum();
            model = model.with(sum.leq(teacher.max_periods_per_day as f64));
        }
    }

    // 9. no back-to-back teaching.
    for ti in 0..idx.teacher_count() {
        for di in 0..d {
            for pi in 0..p.saturating_sub(1) {
                let sum = sum_y_over_c(v, ti, di, pi) + sum_y_over_c(v, ti, di, pi + 1);
                model = model.with(sum.leq(1.0));
            }
        }
    }

    // 10. no consecutive same non-lab subject.
    for ci in 0..c {
        for di in 0..d {
            for pi in 0..p.saturating_sub(1) {
                for si in 0..s {
                    if idx.lab_subjects.contains(&si) {
                        continue;
                    }
                    let (Some(a), Some(b)) = (v.x[ci][di][pi][si], v.x[ci][di][pi + 1][si]) else {
                        continue;
                    };
                    model = model.with((Expression::from(a) + Expression::from(b)).leq(1.0));
                }
            }
        }
    }

    // 11. lab pairing: x[c,d,p,s]=1 => x[c,d,p+1,s]=1; labs never at the last period.
    for ci in 0..c {
        for di in 0..d {
            for &si in &idx.lab_subjects {
                if idx.teacher_of_cs[ci][si].is_none() {
                    continue;
                }
                if let Some(last) = v.x[ci][di][p - 1][si] {
                    model = model.with(Expression::from(last).eq(0.0));
                }
                for pi in 0..p.saturating_sub(1) {
                    let (Some(a), Some(b)) = (v.x[ci][di][pi][si], v.x[ci][di][pi + 1][si]) else {
                        continue;
                    };
                    model = model.with((Expression::from(a) - Expression::from(b)).leq(0.0));
                }
            }
        }
    }

    // 12. no triple lab.
    for ci in 0..c {
        for di in 0..d {
            for &si in &idx.lab_subjects {
                if idx.teacher_of_cs[ci][si].is_none() {
                    continue;
                }
                for pi in 1..p.saturating_sub(1) {
                    let vars3: Vec<Variable> = [pi - 1, pi, pi + 1]
                        .into_iter()
                        .filter_map(|k| v.x[ci][di][k][si])
                        .collect();
                    if vars3.len() < 3 {
                        continue;
                    }
                    let sum: Expression = vars3.into_iter().map(Expression::from).sum();
                    model = model.with(sum.leq(2.0));
                }
            }
        }
    }

    // overload linkage: overload[t] >= weekHours(t) - maxHoursPerWeek(t), overload[t] >= 0.
    for teacher in &inst.teachers {
        let Some(ti) = idx.teacher_index(&teacher.id) else {
            continue;
        };
        let week_hours: Expression = (0..c)
            .flat_map(|ci| (0..d).flat_map(move |di| (0..p).map(move |pi| (ci, di, pi))))
            .filter_map(|(ci, di, pi)| v.y[ti][ci][di][pi])
            .map(Expression::from)
            .sum();
        model = model.with(
            (week_hours - Expression::from(v.overload[ti])).leq(teacher.max_hours_per_week as f64),
        );
    }

    model
}

fn apply_fixed_slot<M: SolverModel>(
    mut model: M,
    idx: &Index,
    v: &Vars,
    slot: &FixedSlot,
) -> M {
    let Some(ci) = idx.class_index(&slot.class_id) else {
        return model;
    };
    let di = slot.day.index();
    let pi = (slot.period as usize).saturating_sub(1);
    if di >= idx.days || pi >= idx.periods {
        return model;
    }

    if let Some(subject_id) = &slot.subject_id {
        if let Some(si) = idx.subject_index(subject_id) {
            if let Some(var) = v.x[ci][di][pi][si] {
                model = model.with(Expression::from(var).eq(1.0));
            }
        }
    }

    if let Some(teacher_id) = &slot.teacher_id {
        if let Some(ti) = idx.teacher_index(teacher_id) {
            if let Some(var) = v.y[ti][ci][di][pi] {
                model = model.with(Expression::from(var).eq(1.0));
            }
        }
    }
    model
}

/// Overload penalty weighted far above the period bias, so early-period
/// placement never trades off against a teacher's workload balance.
const OVERLOAD_WEIGHT: f64 = 1000.0;
const PERIOD_WEIGHT: f64 = 1.0;

pub(crate) fn build_objective(idx: &Index, v: &Vars) -> Expression {
    let mut objective = Expression::from(0.0);
    for ov in &v.overload {
        objective = objective + OVERLOAD_WEIGHT * *ov;
    }
    for ci in 0..idx.class_count() {
        for di in 0..idx.days {
            for pi in 0..idx.periods {
                let period_weight = PERIOD_WEIGHT * (pi as f64);
                for si in 0..idx.subject_count() {
                    if let Some(var) = v.x[ci][di][pi][si] {
                        objective = objective + period_weight * var;
                    }
                }
            }
        }
    }
    objective
}

pub(crate) fn extract_solution(idx: &Index, v: &Vars, sol: &impl Solution) -> Vec<ScheduleCell> {
    let mut cells = Vec::new();
    for ci in 0..idx.class_count() {
        for di in 0..idx.days {
            for pi in 0..idx.periods {
                for si in 0..idx.subject_count() {
                    let Some(var) = v.x[ci][di][pi][si] else {
                        continue;
                    };
                    if sol.value(var) > 0.5 {
                        let ti = idx.teacher_of_cs[ci][si].expect("allocated only when mapped");
                        cells.push(ScheduleCell {
                            class_id: idx.class(ci).clone(),
                            day: Day::from_index(di).expect("di < idx.days"),
                            period: (pi + 1) as u32,
                            subject_id: subject_id_of(idx, si),
                            teacher_id: teacher_id_of(idx, ti),
                        });
                    }
                }
            }
        }
    }
    cells.sort_by(|a, b| {
        (a.class_id.0.clone(), a.day.index(), a.period).cmp(&(
            b.class_id.0.clone(),
            b.day.index(),
            b.period,
        ))
    });
    cells
}

fn subject_id_of(idx: &Index, si: usize) -> SubjectId {
    idx.subject(si).clone()
}

fn teacher_id_of(idx: &Index, ti: usize) -> TeacherId {
    idx.teacher(ti).clone()
}
