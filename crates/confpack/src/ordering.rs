//! Deterministic ordering of extensions by before/after constraints.
//!
//! Nodes are extension names; "A before B" and "B after A" both produce the
//! edge A precedes B. The sort is a topological sort with a stable
//! tie-break: among nodes whose predecessors are all emitted, the one that
//! was declared first wins. The output is always a full permutation of the
//! declared nodes — cyclic constraints never fail the sort, they are broken
//! deterministically and reported through `tracing`.

use std::collections::{HashMap, HashSet};

/// Collects ordering constraints and resolves them into one total order.
#[derive(Debug, Clone, Default)]
pub struct DependencyOrderer {
    /// Declared nodes in insertion order; the tie-break order.
    order: Vec<String>,
    nodes: HashSet<String>,
    /// `(predecessor, successor)` pairs as declared.
    edges: Vec<(String, String)>,
}

impl DependencyOrderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a node. Redeclaring an existing node is a no-op, keeping its
    /// original position for the tie-break.
    pub fn add_node(&mut self, name: &str) {
        if self.nodes.insert(name.to_string()) {
            self.order.push(name.to_string());
        }
    }

    /// Declare that `name` must appear earlier than `target`.
    pub fn add_before(&mut self, name: &str, target: &str) {
        self.edges.push((name.to_string(), target.to_string()));
    }

    /// Declare that `name` must appear later than `target`.
    pub fn add_after(&mut self, name: &str, target: &str) {
        self.edges.push((target.to_string(), name.to_string()));
    }

    /// Declare a node together with its before/after constraint lists.
    pub fn add_constraints(&mut self, name: &str, before: &[String], after: &[String]) {
        self.add_node(name);
        for target in before {
            self.add_before(name, target);
        }
        for target in after {
            self.add_after(name, target);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Resolve all constraints into a total order over the declared nodes.
    ///
    /// The result is always a permutation of the declared nodes and is
    /// byte-identical across runs for identical input. Self-referential
    /// constraints and constraints naming undeclared nodes are ignored.
    /// When a cycle stalls the sort, the earliest-declared remaining node
    /// is emitted anyway and a warning names the stalled set.
    pub fn sort(&self) -> Vec<String> {
        let mut predecessors: HashMap<&str, HashSet<&str>> = self
            .order
            .iter()
            .map(|name| (name.as_str(), HashSet::new()))
            .collect();
        for (first, second) in &self.edges {
            if first == second {
                continue;
            }
            if !self.nodes.contains(first) || !self.nodes.contains(second) {
                continue;
            }
            if let Some(preds) = predecessors.get_mut(second.as_str()) {
                preds.insert(first.as_str());
            }
        }

        let mut result: Vec<String> = Vec::with_capacity(self.order.len());
        let mut emitted: HashSet<&str> = HashSet::new();

        while result.len() < self.order.len() {
            let ready = self.order.iter().map(String::as_str).find(|name| {
                !emitted.contains(name)
                    && predecessors[name]
                        .iter()
                        .all(|pred| emitted.contains(pred))
            });

            let next = match ready {
                Some(name) => name,
                None => {
                    // Every remaining node is part of (or blocked by) a
                    // cycle. Emit the earliest-declared one to guarantee
                    // progress and full coverage.
                    let stalled: Vec<&str> = self
                        .order
                        .iter()
                        .map(String::as_str)
                        .filter(|name| !emitted.contains(name))
                        .collect();
                    tracing::warn!(
                        participants = ?stalled,
                        breaking_with = stalled[0],
                        "cyclic ordering constraints; breaking cycle deterministically"
                    );
                    stalled[0]
                }
            };

            emitted.insert(next);
            result.push(next.to_string());
        }

        result
    }
}
