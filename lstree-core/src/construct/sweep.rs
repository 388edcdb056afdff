//! Forward sweep over the density levels.
//!
//! Within a level every live component is evaluated independently, either on
//! the calling thread or on the rayon pool. Id allocation and the swap of
//! closed components for their children happen afterwards in a single
//! sequential pass, in ascending id order.

use std::collections::BTreeMap;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, info, warn};

use super::{
    connectivity::{LiveComponent, Outcome, evaluate, partition},
    graph::NeighbourGraph,
};
use crate::{
    Result,
    builder::{ExecutionStrategy, LevelSetTreeConfig},
    error::LevelSetTreeError,
    telemetry,
    tree::{Node, NodeId},
};

const PROGRESS_INTERVAL: usize = 100;

/// Nodes and background sets produced by a completed sweep.
#[derive(Debug)]
pub(crate) struct SweepOutput {
    pub(crate) nodes: BTreeMap<NodeId, Node>,
    pub(crate) background_sets: Vec<Vec<usize>>,
}

pub(crate) struct LevelSweep<'a> {
    graph: &'a NeighbourGraph,
    density: &'a [f64],
    levels: &'a [f64],
    config: &'a LevelSetTreeConfig,
    nodes: BTreeMap<NodeId, Node>,
    live: Vec<LiveComponent>,
    next_id: NodeId,
}

impl<'a> LevelSweep<'a> {
    pub(crate) fn new(
        graph: &'a NeighbourGraph,
        density: &'a [f64],
        levels: &'a [f64],
        config: &'a LevelSetTreeConfig,
    ) -> Self {
        Self {
            graph,
            density,
            levels,
            config,
            nodes: BTreeMap::new(),
            live: Vec::new(),
            next_id: NodeId::default(),
        }
    }

    fn allocate(&mut self) -> NodeId {
        let id = self.next_id;
        self.next_id = id.next();
        id
    }

    fn open(&mut self, parent: Option<NodeId>, level: f64, mass: f64, members: Vec<usize>) -> NodeId {
        let id = self.allocate();
        self.live.push(LiveComponent {
            node: id,
            vertices: members.clone(),
        });
        self.nodes
            .insert(id, Node::open(id, parent, level, mass, members));
        id
    }

    fn close(&mut self, id: NodeId, level: f64, mass: f64) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.close(level, mass);
        }
    }

    fn seed_roots(&mut self) {
        let everything: Vec<usize> = (0..self.graph.len()).collect();
        let roots = partition(self.graph, &everything);
        telemetry::record_nodes_created(roots.len());
        for members in roots {
            self.open(None, 0.0, 0.0, members);
        }
    }

    pub(crate) fn run(mut self) -> Result<SweepOutput> {
        let point_count = self.density.len();
        if point_count == 0 {
            return Ok(SweepOutput {
                nodes: self.nodes,
                background_sets: vec![Vec::new(); self.levels.len()],
            });
        }

        self.seed_roots();

        let mut order: Vec<usize> = (0..point_count).collect();
        order.sort_by(|&a, &b| self.density[a].total_cmp(&self.density[b]).then(a.cmp(&b)));
        let mut cursor = 0;
        let mut removed = vec![false; point_count];
        let mut removed_total = 0_usize;
        let mut background_sets = Vec::with_capacity(self.levels.len());
        let mut mass = 0.0;

        for (level_index, &level) in self.levels.iter().enumerate() {
            if let Some(token) = &self.config.cancellation
                && token.is_cancelled()
            {
                warn!(level_index, level, "level sweep cancelled");
                return Err(LevelSetTreeError::Cancelled { level_index, level });
            }

            let start = cursor;
            while let Some(&point) = order.get(cursor)
                && self.density[point] <= level
            {
                removed[point] = true;
                cursor += 1;
            }
            let mut background = order[start..cursor].to_vec();
            background.sort_unstable();
            removed_total += background.len();
            mass = removed_total as f64 / point_count as f64;

            if !background.is_empty() {
                let outcomes = self.evaluate_live(&removed);
                self.apply(outcomes, level, mass);
            }

            telemetry::record_level();
            debug!(
                level_index,
                level,
                mass,
                removed = background.len(),
                live = self.live.len(),
                "level processed"
            );
            if self.config.verbose && (level_index + 1) % PROGRESS_INTERVAL == 0 {
                info!(
                    level_index,
                    total_levels = self.levels.len(),
                    live = self.live.len(),
                    "level sweep progress"
                );
            }
            background_sets.push(background);
        }

        let final_level = self.levels.last().copied().unwrap_or_default();
        for component in std::mem::take(&mut self.live) {
            self.close(component.node, final_level, mass);
        }

        Ok(SweepOutput {
            nodes: self.nodes,
            background_sets,
        })
    }

    fn evaluate_live(&self, removed: &[bool]) -> Vec<Outcome> {
        let graph = self.graph;
        match self.config.execution_strategy {
            #[cfg(feature = "parallel")]
            ExecutionStrategy::Parallel => self
                .live
                .par_iter()
                .map(|component| evaluate(component, graph, removed))
                .collect(),
            _ => self
                .live
                .iter()
                .map(|component| evaluate(component, graph, removed))
                .collect(),
        }
    }

    /// Folds the per-component outcomes back into the tree. `self.live` is
    /// sorted by id on entry and on exit.
    fn apply(&mut self, outcomes: Vec<Outcome>, level: f64, mass: f64) {
        let previous = std::mem::take(&mut self.live);
        for (component, outcome) in previous.into_iter().zip(outcomes) {
            match outcome {
                Outcome::Unchanged => self.live.push(component),
                Outcome::Shrunk(vertices) => self.live.push(LiveComponent {
                    node: component.node,
                    vertices,
                }),
                Outcome::Vanished => self.close(component.node, level, mass),
                Outcome::Split(parts) => {
                    self.close(component.node, level, mass);
                    debug!(
                        parent = %component.node,
                        children = parts.len(),
                        level,
                        "component split"
                    );
                    telemetry::record_split();
                    telemetry::record_nodes_created(parts.len());
                    let children: Vec<NodeId> = parts
                        .into_iter()
                        .map(|members| self.open(Some(component.node), level, mass, members))
                        .collect();
                    if let Some(parent) = self.nodes.get_mut(&component.node) {
                        parent.children = children;
                    }
                }
            }
        }
        self.live.sort_unstable_by_key(|component| component.node);
    }
}
