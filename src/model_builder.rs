use fnv::FnvHashSet;
use itertools::Itertools;
use log::debug;

use crate::graph::{BurnGraph, GraphError, Node};
use crate::model::{Comparison, Constraint, Direction, ModelError, Objective, VarId};
use crate::solve::{BurnError, BurnModel};
use crate::variable_registry::{VarKey, VariableRegister};

/// Assembles the burning program for one graph. The horizon (the largest step
/// the schedule may use, and the big-M constant) is the node count: no burning
/// process ever needs more steps than there are nodes.
pub struct ModelBuilder<'g, G: BurnGraph> {
    graph: &'g G,
    nodes: Vec<Node>,
    // Igniter lists aligned with `nodes`, self-loops dropped, sorted for
    // deterministic variable order.
    igniters: Vec<Vec<Node>>,
    horizon: u32,
    register: VariableRegister,
    constraints: Vec<Constraint>,
}

impl<'g, G: BurnGraph> ModelBuilder<'g, G> {
    pub fn new(graph: &'g G) -> ModelBuilder<'g, G> {
        ModelBuilder {
            graph,
            nodes: vec![],
            igniters: vec![],
            horizon: 0,
            register: VariableRegister::new(),
            constraints: vec![],
        }
    }

    pub fn build(mut self) -> Result<BurnModel, BurnError> {
        self.snapshot_graph()?;
        self.create_variables()?;

        self.burn_time_bounds();
        self.ignition_schedule();
        self.ignition_consistency();
        self.spread_consistency();
        self.coverage();

        let objective = self.objective();
        let unignitable = self
            .nodes
            .iter()
            .enumerate()
            .filter(|(ix, _)| self.igniters[*ix].is_empty())
            .map(|(_, &node)| node)
            .collect_vec();

        debug!(
            "assembled burning program: {} nodes, horizon {}, {} variables, {} constraints",
            self.nodes.len(),
            self.horizon,
            self.register.len(),
            self.constraints.len()
        );

        Ok(BurnModel::new(
            self.register,
            self.constraints,
            objective,
            self.horizon,
            self.nodes,
            unignitable,
        ))
    }

    /// Copies the node set and igniter lists out of the adapter, rejecting
    /// malformed graphs before any variable exists.
    fn snapshot_graph(&mut self) -> Result<(), GraphError> {
        self.nodes = self.graph.nodes();
        if self.nodes.is_empty() {
            return Err(GraphError::Empty);
        }
        let members: FnvHashSet<Node> = self.nodes.iter().copied().collect();

        for &node in &self.nodes {
            let mut igniters = vec![];
            for &igniter in self.graph.igniters(node).iter().sorted() {
                if igniter == node {
                    // Self-loops never explain a burn
                    continue;
                }
                if !members.contains(&igniter) {
                    return Err(GraphError::UnknownIgniter { node, igniter });
                }
                igniters.push(igniter);
            }
            self.igniters.push(igniters);
        }
        self.horizon = self.nodes.len() as u32;
        Ok(())
    }

    fn create_variables(&mut self) -> Result<(), ModelError> {
        for ix in 0..self.nodes.len() {
            let node = self.nodes[ix];
            self.register.create(VarKey::BurnTime { node })?;
        }
        for ix in 0..self.nodes.len() {
            let node = self.nodes[ix];
            for step in 1..=self.horizon {
                self.register.create(VarKey::Ignition { node, step })?;
            }
        }
        for ix in 0..self.nodes.len() {
            let node = self.nodes[ix];
            for jx in 0..self.igniters[ix].len() {
                let igniter = self.igniters[ix][jx];
                self.register.create(VarKey::Spread { node, igniter })?;
            }
        }
        Ok(())
    }

    // y_v >= 1: every node burns at some step, steps are 1-indexed
    fn burn_time_bounds(&mut self) {
        for ix in 0..self.nodes.len() {
            let node = self.nodes[ix];
            let c = Constraint::new(vec![(self.y(node), 1.0)], Comparison::Ge, 1.0);
            self.constraints.push(c);
        }
    }

    // sum_v x_v^1 <= 1, and sum_v x_v^k <= sum_v x_v^{k-1} for k >= 2.
    // One free ignition per step, and a used step implies the previous step
    // was used. The ordering half is a symmetry break; dropping it leaves the
    // optimum unchanged but makes the search far slower.
    fn ignition_schedule(&mut self) {
        let first = self.nodes.iter().map(|&v| (self.x(v, 1), 1.0)).collect();
        self.constraints
            .push(Constraint::new(first, Comparison::Le, 1.0));

        for step in 2..=self.horizon {
            let mut terms = Vec::with_capacity(self.nodes.len() * 2);
            for ix in 0..self.nodes.len() {
                let node = self.nodes[ix];
                terms.push((self.x(node, step), 1.0));
                terms.push((self.x(node, step - 1), -1.0));
            }
            self.constraints
                .push(Constraint::new(terms, Comparison::Le, 0.0));
        }
    }

    // y_v + (U-k) x_v^k <= U, i.e. y_v <= k when x_v^k fires, y_v <= U otherwise
    fn ignition_consistency(&mut self) {
        let horizon = self.horizon;
        for ix in 0..self.nodes.len() {
            let node = self.nodes[ix];
            for step in 1..=horizon {
                let terms = vec![
                    (self.y(node), 1.0),
                    (self.x(node, step), (horizon - step) as f64),
                ];
                self.constraints
                    .push(Constraint::new(terms, Comparison::Le, horizon as f64));
            }
        }
    }

    // y_v - y_u + U z_v_u <= U - 1: when z_v_u fires, v's burn is pinned
    // against u's; when it doesn't, the pair is unconstrained
    fn spread_consistency(&mut self) {
        let big_m = self.horizon as f64;
        for ix in 0..self.nodes.len() {
            let node = self.nodes[ix];
            for jx in 0..self.igniters[ix].len() {
                let igniter = self.igniters[ix][jx];
                let terms = vec![
                    (self.y(node), 1.0),
                    (self.y(igniter), -1.0),
                    (self.z(node, igniter), big_m),
                ];
                self.constraints
                    .push(Constraint::new(terms, Comparison::Le, big_m - 1.0));
            }
        }
    }

    // sum_k x_v^k + sum_u z_v^u >= 1: every node's burn has an explanation.
    // A node nothing can ignite only has the x terms, so it must be a source.
    fn coverage(&mut self) {
        for ix in 0..self.nodes.len() {
            let node = self.nodes[ix];
            let mut terms: Vec<(VarId, f64)> = (1..=self.horizon)
                .map(|step| (self.x(node, step), 1.0))
                .collect();
            for jx in 0..self.igniters[ix].len() {
                let igniter = self.igniters[ix][jx];
                terms.push((self.z(node, igniter), 1.0));
            }
            self.constraints
                .push(Constraint::new(terms, Comparison::Ge, 1.0));
        }
    }

    // minimize sum x_v^k: the number of free ignitions used is the number of
    // steps used, which is the burning number
    fn objective(&self) -> Objective {
        let mut terms = Vec::with_capacity(self.nodes.len() * self.horizon as usize);
        for &node in &self.nodes {
            for step in 1..=self.horizon {
                terms.push((self.x(node, step), 1.0));
            }
        }
        Objective::new(Direction::Minimize, terms)
    }

    fn x(&self, node: Node, step: u32) -> VarId {
        self.register.get(VarKey::Ignition { node, step })
    }

    fn y(&self, node: Node) -> VarId {
        self.register.get(VarKey::BurnTime { node })
    }

    fn z(&self, node: Node, igniter: Node) -> VarId {
        self.register.get(VarKey::Spread { node, igniter })
    }
}
