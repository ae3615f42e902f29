//! Dependency graph analysis over one task batch.
//!
//! Two batch-level facts feed the ranker:
//! - how many tasks list each task as a dependency (its blocking count)
//! - which tasks sit on a dependency cycle
//!
//! Ids that are not part of the batch are dropped from the graph; they never
//! count toward blocking and never take part in a cycle.

use std::collections::{HashMap, HashSet};

use taskrank_core::{Task, TaskId};

use crate::factors::{self, Factor};

/// Traversal mark of a node during cycle detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    /// On the current path, at this depth
    OnPath(usize),
    Done,
}

/// A dependency graph built from one batch.
#[derive(Debug)]
pub struct DepGraph<'a> {
    /// Distinct ids, in first-seen order
    nodes: Vec<&'a TaskId>,
    /// id -> node index
    index: HashMap<&'a str, usize>,
    /// node -> [dependency nodes]
    edges: Vec<Vec<usize>>,
    /// node -> number of listings as a dependency
    dependents: Vec<usize>,
}

impl<'a> DepGraph<'a> {
    /// Build the graph of a batch.
    ///
    /// A repeated id keeps its first position and the dependency list of
    /// its last occurrence; listings from every occurrence are counted.
    pub fn build(tasks: &'a [Task]) -> Self {
        let mut nodes = Vec::new();
        let mut index: HashMap<&'a str, usize> = HashMap::with_capacity(tasks.len());

        for task in tasks {
            index.entry(task.id.as_str()).or_insert_with(|| {
                nodes.push(&task.id);
                nodes.len() - 1
            });
        }

        let mut edges = vec![Vec::new(); nodes.len()];
        let mut dependents = vec![0usize; nodes.len()];

        for task in tasks {
            let resolved: Vec<usize> = task
                .dependencies
                .iter()
                .filter_map(|dep| index.get(dep.as_str()).copied())
                .collect();

            for &dep in &resolved {
                dependents[dep] += 1;
            }

            if let Some(&from) = index.get(task.id.as_str()) {
                edges[from] = resolved;
            }
        }

        Self {
            nodes,
            index,
            edges,
            dependents,
        }
    }

    /// Number of distinct tasks in the graph.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph has no tasks.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// How many times tasks in the batch list `id` as a dependency.
    ///
    /// Unknown ids have a count of zero.
    pub fn blocking_count(&self, id: &str) -> usize {
        self.index
            .get(id)
            .map(|&node| self.dependents[node])
            .unwrap_or(0)
    }

    /// Blocking-count factor of `id`.
    pub fn blocking_factor(&self, id: &str) -> Factor {
        factors::blocking(self.blocking_count(id))
    }

    /// Ids of every task that lies on at least one dependency cycle.
    ///
    /// Depth-first over edges task -> dependency, rooted at every node in
    /// batch order. The frame stack doubles as the current path: reaching a
    /// node that is still on it closes a cycle through every frame from that
    /// node to the top. Runs in O(V + E) without native recursion.
    pub fn detect_cycles(&self) -> HashSet<TaskId> {
        let mut marks = vec![Mark::Unvisited; self.nodes.len()];
        let mut in_cycle = vec![false; self.nodes.len()];
        // (node, next edge to follow)
        let mut frames: Vec<(usize, usize)> = Vec::new();

        for root in 0..self.nodes.len() {
            if marks[root] != Mark::Unvisited {
                continue;
            }

            marks[root] = Mark::OnPath(0);
            frames.push((root, 0));

            while let Some(&(node, next)) = frames.last() {
                let Some(&dep) = self.edges[node].get(next) else {
                    frames.pop();
                    marks[node] = Mark::Done;
                    continue;
                };

                let top = frames.len() - 1;
                frames[top].1 += 1;

                match marks[dep] {
                    Mark::OnPath(depth) => {
                        for &(member, _) in &frames[depth..] {
                            in_cycle[member] = true;
                        }
                    }
                    Mark::Done => {}
                    Mark::Unvisited => {
                        marks[dep] = Mark::OnPath(frames.len());
                        frames.push((dep, 0));
                    }
                }
            }
        }

        self.nodes
            .iter()
            .zip(in_cycle)
            .filter_map(|(id, flagged)| flagged.then(|| (*id).clone()))
            .collect()
    }
}
