//! Node/edge view of task dependencies for visualization.
//!
//! Edges point from a dependency to the task that needs it, matching the
//! direction used by cycle detection.

use serde::{Deserialize, Serialize};

use crate::task::Task;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub from: String,
    pub to: String,
}

/// Every task as a node, every declared dependency as an edge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyView {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl DependencyView {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let mut view = Self::default();
        for task in tasks {
            view.nodes.push(GraphNode {
                id: task.id.clone(),
                label: task.title.clone(),
            });
            view.edges.extend(task.dependencies.iter().map(|dep| GraphEdge {
                from: dep.clone(),
                to: task.id.clone(),
            }));
        }
        view
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_run_from_dependency_to_task() {
        let tasks = vec![
            Task::new("1", "Design"),
            Task::new("2", "Build").with_dependencies(["1"]),
            Task::new("3", "Release").with_dependencies(["2", "missing"]),
        ];
        let view = DependencyView::from_tasks(&tasks);
        assert_eq!(view.nodes.len(), 3);
        assert_eq!(view.nodes[2].label, "Release");
        assert_eq!(
            view.edges,
            vec![
                GraphEdge { from: "1".into(), to: "2".into() },
                GraphEdge { from: "2".into(), to: "3".into() },
                GraphEdge { from: "missing".into(), to: "3".into() },
            ]
        );
    }

    #[test]
    fn empty_batch_is_empty_view() {
        assert_eq!(DependencyView::from_tasks(&[]), DependencyView::default());
    }
}
