use core::fmt;

use fnv::FnvHashMap;
use thiserror::Error;

use crate::graph::Node;
use crate::variable_registry::VarKey;

use super::backend::Assignment;
use super::BurnModel;

// Tolerance for reading integers back out of the relaxation
const INTEGRALITY_TOLERANCE: f64 = 1e-6;

#[derive(Error, Debug, PartialEq)]
pub enum InconsistencyError {
    #[error("objective value {0} is not integral")]
    FractionalObjective(f64),
    #[error("burn time of {node:?} is not integral: {value}")]
    FractionalBurnTime { node: Node, value: f64 },
    #[error("{0:?} has no igniters yet never appears in the ignition schedule")]
    UnexplainedNode(Node),
}

/// The burn schedule read back from an optimal assignment.
#[derive(Clone, PartialEq)]
pub struct BurnReport {
    burning_number: u32,
    // Free ignitions as (step, node), ordered by step
    ignitions: Vec<(u32, Node)>,
    burn_steps: FnvHashMap<Node, u32>,
    // Node order for rendering
    nodes: Vec<Node>,
}

impl BurnReport {
    /// The minimum number of steps that burns the whole graph.
    pub fn burning_number(&self) -> u32 {
        self.burning_number
    }

    pub fn ignitions(&self) -> &[(u32, Node)] {
        &self.ignitions
    }

    /// The step at which the node first burns, on the schedule the solver
    /// settled on. Other optimal schedules may exist.
    pub fn burn_step(&self, node: Node) -> Option<u32> {
        self.burn_steps.get(&node).copied()
    }

    /// How many steps the node has left to keep spreading fire before the
    /// process ends. Informational only.
    pub fn spread_window(&self, node: Node) -> Option<u32> {
        self.burn_step(node)
            .map(|step| self.burning_number.saturating_sub(step))
    }
}

impl fmt::Debug for BurnReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "burning number {}; ignite ", self.burning_number)?;
        let mut first = true;
        for &(step, node) in &self.ignitions {
            if !first {
                write!(f, ", ")?;
            }
            first = false;
            write!(f, "{:?}@{}", node, step)?;
        }
        write!(f, "; burns ")?;
        first = true;
        for &node in &self.nodes {
            if !first {
                write!(f, ", ")?;
            }
            first = false;
            match self.burn_steps.get(&node) {
                Some(step) => write!(f, "{:?}={}", node, step)?,
                None => write!(f, "{:?}=undef", node)?,
            }
        }
        Ok(())
    }
}

/// Reads the schedule out of a solved assignment. Pure: the same assignment
/// always extracts to the same report.
pub(crate) fn extract(
    model: &BurnModel,
    assignment: &Assignment,
) -> Result<BurnReport, InconsistencyError> {
    let burning_number = integral(assignment.objective)
        .ok_or(InconsistencyError::FractionalObjective(assignment.objective))?
        as u32;

    let mut ignitions = vec![];
    let mut burn_steps = FnvHashMap::default();
    for (id, key) in model.register.iter() {
        let value = assignment.values[id.index()];
        match *key {
            VarKey::Ignition { node, step } => {
                if value > 0.5 {
                    ignitions.push((step, node));
                }
            }
            VarKey::BurnTime { node } => {
                let step = integral(value)
                    .ok_or(InconsistencyError::FractionalBurnTime { node, value })?
                    as u32;
                burn_steps.insert(node, step);
            }
            VarKey::Spread { .. } => {}
        }
    }
    ignitions.sort();

    for &node in &model.unignitable {
        if !ignitions.iter().any(|&(_, ignited)| ignited == node) {
            return Err(InconsistencyError::UnexplainedNode(node));
        }
    }

    Ok(BurnReport {
        burning_number,
        ignitions,
        burn_steps,
        nodes: model.nodes.clone(),
    })
}

fn integral(value: f64) -> Option<i64> {
    let rounded = value.round();
    if (value - rounded).abs() <= INTEGRALITY_TOLERANCE {
        Some(rounded as i64)
    } else {
        None
    }
}
