//! Blocking cycles, found as strongly connected components.
//!
//! Nodes are indices into a caller-owned list (units or tasks in input
//! order). Components are numbered by their lowest member index and list
//! members in index order, so every result follows input order.

use std::collections::HashMap;

use crate::graph::TaskGraph;

#[derive(Debug, Clone, Default)]
pub struct Components {
    component_of: Vec<usize>,
    members: Vec<Vec<usize>>,
    cyclic: Vec<bool>,
}

impl Components {
    /// Components of the graph where `edges[i]` lists the nodes `i` points to.
    pub fn find(edges: &[Vec<usize>]) -> Self {
        let len = edges.len();
        let mut search = Search {
            edges,
            order: vec![None; len],
            low: vec![0; len],
            on_stack: vec![false; len],
            stack: Vec::new(),
            next: 0,
            found: Vec::new(),
        };
        for node in 0..len {
            if search.order[node].is_none() {
                search.visit(node);
            }
        }

        let mut members = search.found;
        for component in &mut members {
            component.sort_unstable();
        }
        members.sort_unstable_by_key(|component| component[0]);

        let mut component_of = vec![0; len];
        for (idx, component) in members.iter().enumerate() {
            for &node in component {
                component_of[node] = idx;
            }
        }
        let cyclic = members
            .iter()
            .map(|component| component.len() > 1 || edges[component[0]].contains(&component[0]))
            .collect();

        Self {
            component_of,
            members,
            cyclic,
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn component_of(&self, node: usize) -> usize {
        self.component_of[node]
    }

    pub fn members(&self, component: usize) -> &[usize] {
        &self.members[component]
    }

    /// More than one member, or a single member pointing at itself.
    pub fn is_cyclic(&self, component: usize) -> bool {
        self.cyclic[component]
    }

    pub fn cycles(&self) -> impl Iterator<Item = &[usize]> {
        self.members
            .iter()
            .zip(&self.cyclic)
            .filter(|(_, cyclic)| **cyclic)
            .map(|(members, _)| members.as_slice())
    }
}

/// Tarjan's search state.
struct Search<'e> {
    edges: &'e [Vec<usize>],
    order: Vec<Option<usize>>,
    low: Vec<usize>,
    on_stack: Vec<bool>,
    stack: Vec<usize>,
    next: usize,
    found: Vec<Vec<usize>>,
}

impl Search<'_> {
    fn visit(&mut self, node: usize) {
        self.order[node] = Some(self.next);
        self.low[node] = self.next;
        self.next += 1;
        self.stack.push(node);
        self.on_stack[node] = true;

        let edges = self.edges;
        for &target in &edges[node] {
            match self.order[target] {
                None => {
                    self.visit(target);
                    self.low[node] = self.low[node].min(self.low[target]);
                }
                Some(order) if self.on_stack[target] => {
                    self.low[node] = self.low[node].min(order);
                }
                Some(_) => {}
            }
        }

        if self.order[node] == Some(self.low[node]) {
            let mut component = Vec::new();
            while let Some(top) = self.stack.pop() {
                self.on_stack[top] = false;
                component.push(top);
                if top == node {
                    break;
                }
            }
            self.found.push(component);
        }
    }
}

/// Task-level blocking cycles, each listed in input order.
///
/// Runs over every task, so blocking between subtasks of the same group is
/// covered even though it never moves a unit.
pub fn blocking_cycles<'a>(graph: &TaskGraph<'a>) -> Vec<Vec<&'a str>> {
    let ids: Vec<&'a str> = graph.ids().collect();
    let index: HashMap<&str, usize> = ids.iter().enumerate().map(|(idx, id)| (*id, idx)).collect();
    let edges: Vec<Vec<usize>> = ids
        .iter()
        .map(|id| {
            graph
                .blocked(id)
                .iter()
                .filter_map(|target| index.get(target).copied())
                .collect()
        })
        .collect();

    let components = Components::find(&edges);
    let cycles: Vec<Vec<&'a str>> = components
        .cycles()
        .map(|members| members.iter().map(|&idx| ids[idx]).collect())
        .collect();
    if !cycles.is_empty() {
        tracing::debug!(cycles = cycles.len(), "found blocking cycles between tasks");
    }
    cycles
}
