use std::time::Instant;

use log::debug;
use microlp::{ComparisonOp, LinearExpr, OptimizationDirection, Problem};

use crate::model::{Comparison, Direction, VarKind};

use super::{BurnModel, SolveOptions, SolverError};

/// A value per program variable, indexed by `VarId`.
pub(crate) struct Assignment {
    pub(crate) objective: f64,
    pub(crate) values: Vec<f64>,
}

/// Translates the program into a microlp problem and runs it. The backend is
/// the only place solver types appear; everything else speaks `model` types.
pub(crate) fn run(model: &BurnModel, options: &SolveOptions) -> Result<Assignment, SolverError> {
    let started = Instant::now();

    let direction = match model.objective.direction() {
        Direction::Minimize => OptimizationDirection::Minimize,
        Direction::Maximize => OptimizationDirection::Maximize,
    };
    let mut problem = Problem::new(direction);

    // microlp takes objective coefficients at variable creation
    let mut objective_coeffs = vec![0.0; model.register.len()];
    for &(var, coeff) in model.objective.terms() {
        objective_coeffs[var.index()] = coeff;
    }

    let vars: Vec<microlp::Variable> = model
        .register
        .iter()
        .map(|(id, key)| match key.kind() {
            VarKind::Binary => problem.add_binary_var(objective_coeffs[id.index()]),
            VarKind::NonNegative => {
                problem.add_var(objective_coeffs[id.index()], (0.0, f64::INFINITY))
            }
        })
        .collect();

    for constraint in &model.constraints {
        let mut lhs = LinearExpr::empty();
        for &(var, coeff) in constraint.terms() {
            lhs.add(vars[var.index()], coeff);
        }
        let op = match constraint.comparison() {
            Comparison::Le => ComparisonOp::Le,
            Comparison::Ge => ComparisonOp::Ge,
            Comparison::Eq => ComparisonOp::Eq,
        };
        problem.add_constraint(lhs, op, constraint.rhs());
    }

    let solved = problem.solve();
    let elapsed = started.elapsed();
    let solution = match solved {
        Ok(solution) => solution,
        Err(microlp::Error::Infeasible) => return Err(SolverError::Infeasible),
        Err(microlp::Error::Unbounded) => return Err(SolverError::Unbounded),
        Err(err) => return Err(SolverError::Backend(err.to_string())),
    };

    if let Some(limit) = options.time_limit {
        if elapsed > limit {
            return Err(SolverError::TimedOut { limit, elapsed });
        }
    }

    debug!(
        "solved {} variables / {} constraints in {:?}, objective {}",
        model.register.len(),
        model.constraints.len(),
        elapsed,
        solution.objective()
    );

    let values = vars.iter().map(|&var| solution[var]).collect();
    Ok(Assignment {
        objective: solution.objective(),
        values,
    })
}

#[cfg(test)]
mod test {
    use crate::graph::Node;
    use crate::model::{Comparison, Constraint, Direction, Objective};
    use crate::solve::{BurnModel, SolveOptions};
    use crate::variable_registry::{VarKey, VariableRegister};

    use super::*;

    // A program that demands y >= 2 and y <= 1 cannot be satisfied; the
    // backend must say so rather than hand back an assignment
    #[test]
    fn test_infeasible_program_is_reported() {
        let mut register = VariableRegister::new();
        let y = register.create(VarKey::BurnTime { node: Node(0) }).unwrap();

        let constraints = vec![
            Constraint::new(vec![(y, 1.0)], Comparison::Ge, 2.0),
            Constraint::new(vec![(y, 1.0)], Comparison::Le, 1.0),
        ];
        let model = BurnModel::new(
            register,
            constraints,
            Objective::new(Direction::Minimize, vec![(y, 1.0)]),
            1,
            vec![Node(0)],
            vec![],
        );

        let result = run(&model, &SolveOptions::default());
        assert!(matches!(result, Err(SolverError::Infeasible)));
    }

    #[test]
    fn test_trivial_program_solves() {
        let mut register = VariableRegister::new();
        let y = register.create(VarKey::BurnTime { node: Node(0) }).unwrap();

        let constraints = vec![Constraint::new(vec![(y, 1.0)], Comparison::Ge, 3.0)];
        let model = BurnModel::new(
            register,
            constraints,
            Objective::new(Direction::Minimize, vec![(y, 1.0)]),
            1,
            vec![Node(0)],
            vec![],
        );

        let assignment = run(&model, &SolveOptions::default()).unwrap();
        assert!((assignment.objective - 3.0).abs() < 1e-9);
        assert_eq!(assignment.values.len(), 1);
        assert!((assignment.values[0] - 3.0).abs() < 1e-9);
    }
}
