use crate::graph::TaskGraph;
use crate::layout::types::{group_node_id, LayoutEdge, Relationship};

/// Node id a task's edges attach to.
pub fn endpoint_id(graph: &TaskGraph<'_>, task_id: &str) -> String {
    if graph.is_group(task_id) {
        group_node_id(task_id)
    } else {
        task_id.to_string()
    }
}

/// One `blocks` edge per (blocker, blocked) pair, in input order.
pub fn synthesize_edges(graph: &TaskGraph<'_>) -> Vec<LayoutEdge> {
    let mut edges = Vec::new();
    for task_id in graph.ids() {
        for &blocker_id in graph.blockers(task_id) {
            edges.push(LayoutEdge {
                id: format!("blocks-{blocker_id}-{task_id}"),
                source: endpoint_id(graph, blocker_id),
                target: endpoint_id(graph, task_id),
                relationship: Relationship::Blocks,
                source_task_id: blocker_id.to_string(),
                target_task_id: task_id.to_string(),
            });
        }
    }
    edges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{Task, TaskArena};

    #[test]
    fn group_endpoints_use_group_ids() {
        let arena = TaskArena::from_tasks(&[
            Task::new("p", 1.0).with_subtask(Task::new("s", 1.0)),
            Task::new("s", 1.0),
            Task::new("q", 1.0).blocked_by_id("p"),
            Task::new("r", 1.0).blocked_by_id("s"),
        ]);
        let graph = TaskGraph::build(&arena);
        let edges = synthesize_edges(&graph);
        assert_eq!(edges.len(), 2);
        assert_eq!(edges[0].id, "blocks-p-q");
        assert_eq!(edges[0].source, "group-p");
        assert_eq!(edges[0].target, "q");
        assert_eq!(edges[1].source, "s");
        assert_eq!(edges[1].relationship, Relationship::Blocks);
    }
}
