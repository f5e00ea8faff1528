//! Circular dependency detection.
//!
//! Edges run from a dependency to the task that declares it ("X must
//! finish before Y" is `X -> Y`). Traversal is an iterative depth-first
//! search so deep chains cannot overflow the call stack.

use std::collections::{HashMap, HashSet};

use crate::task::{ScoredTask, Task};

/// Anything that has an id and declares dependencies by id.
pub trait DependencyNode {
    fn node_id(&self) -> &str;
    fn dependency_ids(&self) -> &[String];
}

impl DependencyNode for Task {
    fn node_id(&self) -> &str {
        &self.id
    }

    fn dependency_ids(&self) -> &[String] {
        &self.dependencies
    }
}

impl DependencyNode for ScoredTask {
    fn node_id(&self) -> &str {
        &self.task.id
    }

    fn dependency_ids(&self) -> &[String] {
        &self.task.dependencies
    }
}

/// Find dependency cycles among `tasks`.
///
/// Each cycle is reported as the path from the first occurrence of the
/// repeated node, closed by that node again (`[a, b, a]`; a self-loop is
/// `[a, a]`). Searches start from each task in input order; nodes already
/// explored by an earlier search are not re-entered. Duplicate cycles are
/// dropped, keeping the first.
pub fn detect_cycles<T: DependencyNode>(tasks: &[T]) -> Vec<Vec<String>> {
    let mut graph: HashMap<&str, Vec<&str>> = HashMap::new();
    for task in tasks {
        for dep in task.dependency_ids() {
            graph.entry(dep.as_str()).or_default().push(task.node_id());
        }
    }

    let mut visited: HashSet<&str> = HashSet::new();
    let mut cycles: Vec<Vec<String>> = Vec::new();
    let mut seen: HashSet<Vec<String>> = HashSet::new();

    // (node, index of next outgoing edge to follow)
    let mut frames: Vec<(&str, usize)> = Vec::new();
    // node -> its position in `frames` while it is on the current path
    let mut on_stack: HashMap<&str, usize> = HashMap::new();

    for task in tasks {
        let root = task.node_id();
        if visited.contains(root) {
            continue;
        }
        visited.insert(root);
        on_stack.insert(root, 0);
        frames.push((root, 0));

        while let Some(frame) = frames.last_mut() {
            let (node, next) = *frame;
            let Some(&neighbor) = graph.get(node).and_then(|edges| edges.get(next)) else {
                frames.pop();
                on_stack.remove(node);
                continue;
            };
            frame.1 += 1;

            if let Some(&start) = on_stack.get(neighbor) {
                let mut cycle: Vec<String> =
                    frames[start..].iter().map(|(id, _)| (*id).to_string()).collect();
                cycle.push(neighbor.to_string());
                if seen.insert(cycle.clone()) {
                    cycles.push(cycle);
                }
            } else if visited.insert(neighbor) {
                on_stack.insert(neighbor, frames.len());
                frames.push((neighbor, 0));
            }
        }
    }

    cycles
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: &str, deps: &[&str]) -> Task {
        Task::new(id, id).with_dependencies(deps.iter().copied())
    }

    #[test]
    fn mutual_dependency_is_one_cycle() {
        let cycles = detect_cycles(&[task("A", &["B"]), task("B", &["A"])]);
        assert_eq!(cycles, vec![vec!["A", "B", "A"]]);
    }

    #[test]
    fn self_loop_is_two_element_cycle() {
        let cycles = detect_cycles(&[task("A", &["A"])]);
        assert_eq!(cycles, vec![vec!["A", "A"]]);
    }

    #[test]
    fn independent_tasks_have_no_cycles() {
        let cycles = detect_cycles(&[task("A", &[]), task("B", &[]), task("C", &[])]);
        assert!(cycles.is_empty());
    }

    #[test]
    fn chain_without_back_edge_has_no_cycles() {
        let cycles = detect_cycles(&[task("A", &[]), task("B", &["A"]), task("C", &["B"])]);
        assert!(cycles.is_empty());
    }

    #[test]
    fn unknown_dependencies_are_ignored() {
        let cycles = detect_cycles(&[task("A", &["ghost"]), task("B", &["A", "phantom"])]);
        assert!(cycles.is_empty());
    }

    #[test]
    fn three_node_cycle_follows_edge_direction() {
        // A needs C, B needs A, C needs B: edges C->A, A->B, B->C
        let cycles = detect_cycles(&[task("A", &["C"]), task("B", &["A"]), task("C", &["B"])]);
        assert_eq!(cycles, vec![vec!["A", "B", "C", "A"]]);
    }

    #[test]
    fn cycle_slice_starts_at_repeated_node() {
        // Path enters the loop B<->C from A
        let cycles = detect_cycles(&[task("A", &[]), task("B", &["A", "C"]), task("C", &["B"])]);
        assert_eq!(cycles, vec![vec!["B", "C", "B"]]);
    }

    #[test]
    fn disconnected_components_each_report() {
        let cycles = detect_cycles(&[
            task("A", &["B"]),
            task("B", &["A"]),
            task("X", &["X"]),
            task("M", &[]),
        ]);
        assert_eq!(cycles, vec![vec!["A", "B", "A"], vec!["X", "X"]]);
    }

    #[test]
    fn repeated_dependency_is_reported_once() {
        let cycles = detect_cycles(&[task("A", &["A", "A"])]);
        assert_eq!(cycles, vec![vec!["A", "A"]]);
    }

    #[test]
    fn deep_chain_does_not_overflow() {
        let n = 50_000;
        let mut tasks: Vec<Task> = (0..n)
            .map(|i| {
                let deps = if i == 0 { vec![] } else { vec![format!("t{}", i - 1)] };
                Task::new(format!("t{i}"), "x").with_dependencies(deps)
            })
            .collect();
        tasks[0].dependencies.push(format!("t{}", n - 1));
        let cycles = detect_cycles(&tasks);
        assert_eq!(cycles.len(), 1);
        assert_eq!(cycles[0].len(), n + 1);
        assert_eq!(cycles[0].first(), cycles[0].last());
    }
}
