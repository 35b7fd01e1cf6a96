use std::time::Duration;

use thiserror::Error;

use crate::graph::{GraphError, Node};
use crate::model::{Constraint, ModelError, Objective};
use crate::solve::backend;
use crate::solve::report::{self, BurnReport, InconsistencyError};
use crate::variable_registry::VariableRegister;

#[derive(Error, Debug)]
pub enum SolverError {
    // A burning program over a nonempty graph is always satisfiable within
    // its horizon, so this means the construction is buggy
    #[error("backend reported the program infeasible")]
    Infeasible,
    #[error("backend reported the program unbounded")]
    Unbounded,
    #[error("backend failure: {0}")]
    Backend(String),
    #[error("time limit {limit:?} exceeded ({elapsed:?} elapsed)")]
    TimedOut { limit: Duration, elapsed: Duration },
}

#[derive(Error, Debug)]
pub enum BurnError {
    #[error("graph error: {0}")]
    Graph(#[from] GraphError),
    #[error("model error: {0}")]
    Model(#[from] ModelError),
    #[error("solver error: {0}")]
    Solver(#[from] SolverError),
    #[error("inconsistent result: {0}")]
    Inconsistent(#[from] InconsistencyError),
}

#[derive(Clone, Debug, Default)]
pub struct SolveOptions {
    /// Wall-clock budget for the backend call. None runs to optimality.
    pub time_limit: Option<Duration>,
}

/// A fully assembled burning program. Immutable; solving reads it and returns
/// a fresh report, so re-solving is free of cross-talk.
#[derive(Clone)]
pub struct BurnModel {
    pub(crate) register: VariableRegister,
    pub(crate) constraints: Vec<Constraint>,
    pub(crate) objective: Objective,
    pub(crate) horizon: u32,
    pub(crate) nodes: Vec<Node>,
    // Nodes no neighbor can ignite; they must show up in the ignition schedule
    pub(crate) unignitable: Vec<Node>,
}

impl BurnModel {
    pub(crate) fn new(
        register: VariableRegister,
        constraints: Vec<Constraint>,
        objective: Objective,
        horizon: u32,
        nodes: Vec<Node>,
        unignitable: Vec<Node>,
    ) -> BurnModel {
        BurnModel {
            register,
            constraints,
            objective,
            horizon,
            nodes,
            unignitable,
        }
    }

    pub fn horizon(&self) -> u32 {
        self.horizon
    }

    pub fn variable_count(&self) -> usize {
        self.register.len()
    }

    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn objective(&self) -> &Objective {
        &self.objective
    }

    pub fn unignitable(&self) -> &[Node] {
        &self.unignitable
    }

    pub fn solve(&self, options: &SolveOptions) -> Result<BurnReport, BurnError> {
        let assignment = backend::run(self, options)?;
        let report = report::extract(self, &assignment)?;
        Ok(report)
    }
}
