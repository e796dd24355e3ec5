//! Total estimate aggregation.
//!
//! A task's total estimate is its own estimate plus the totals of its
//! subtasks. Subtask trees should be acyclic, but malformed input may contain
//! a task that reaches itself; such a revisit contributes 0 and is reported.

use std::collections::{HashMap, HashSet};

use crate::graph::TaskGraph;
use crate::layout::LayoutWarning;

pub struct EstimateAggregator<'g, 'a> {
    graph: &'g TaskGraph<'a>,
    memo: HashMap<&'a str, f64>,
    cyclic: HashSet<&'a str>,
    warnings: Vec<LayoutWarning>,
}

impl<'g, 'a> EstimateAggregator<'g, 'a> {
    pub fn new(graph: &'g TaskGraph<'a>) -> Self {
        Self {
            graph,
            memo: HashMap::new(),
            cyclic: HashSet::new(),
            warnings: Vec::new(),
        }
    }

    /// Total estimate of `id`; 0 for unknown ids.
    pub fn total_estimate(&mut self, id: &str) -> f64 {
        let Some(entry) = self.graph.entry(id) else {
            return 0.0;
        };
        let mut visiting = HashSet::new();
        self.visit(entry.id.as_str(), &mut visiting)
    }

    /// Totals for every task, computed in input order.
    pub fn compute_all(&mut self) -> HashMap<&'a str, f64> {
        let ids: Vec<&'a str> = self.graph.ids().collect();
        for id in ids {
            let mut visiting = HashSet::new();
            self.visit(id, &mut visiting);
        }
        self.memo.clone()
    }

    pub fn warnings(&self) -> &[LayoutWarning] {
        &self.warnings
    }

    pub fn into_warnings(self) -> Vec<LayoutWarning> {
        self.warnings
    }

    fn visit(&mut self, id: &'a str, visiting: &mut HashSet<&'a str>) -> f64 {
        if let Some(total) = self.memo.get(id) {
            return *total;
        }
        if !visiting.insert(id) {
            if self.cyclic.insert(id) {
                tracing::warn!(task = id, "subtask cycle, counting revisit as 0");
                self.warnings.push(LayoutWarning::CircularSubtasks {
                    task_id: id.to_string(),
                });
            }
            return 0.0;
        }

        let graph = self.graph;
        let mut total = graph.estimate(id);
        for child in graph.subtasks(id) {
            total += self.visit(*child, visiting);
        }

        visiting.remove(id);
        self.memo.insert(id, total);
        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{Task, TaskArena};

    #[test]
    fn sums_nested_subtasks() {
        let arena = TaskArena::from_tasks(&[
            Task::new("p", 1.0)
                .with_subtask(Task::new("s1", 2.0))
                .with_subtask(Task::new("s2", 3.0)),
            Task::new("s1", 2.0).with_subtask(Task::new("deep", 4.0)),
            Task::new("s2", 3.0),
            Task::new("deep", 4.0),
        ]);
        let graph = TaskGraph::build(&arena);
        let mut estimates = EstimateAggregator::new(&graph);
        assert_eq!(estimates.total_estimate("p"), 10.0);
        assert_eq!(estimates.total_estimate("s1"), 6.0);
        assert_eq!(estimates.total_estimate("deep"), 4.0);
        assert!(estimates.warnings().is_empty());
    }

    #[test]
    fn self_containing_task_terminates() {
        let mut a = Task::new("a", 2.0);
        a.subtask_ids = vec!["b".to_string()];
        let mut b = Task::new("b", 3.0);
        b.subtask_ids = vec!["a".to_string()];
        let arena = TaskArena::from_tasks(&[a, b]);
        let graph = TaskGraph::build(&arena);
        let mut estimates = EstimateAggregator::new(&graph);
        let totals = estimates.compute_all();
        assert_eq!(totals["a"], 5.0);
        assert_eq!(totals["b"], 3.0);
        assert_eq!(
            estimates.warnings(),
            &[LayoutWarning::CircularSubtasks {
                task_id: "a".to_string()
            }]
        );
    }
}
