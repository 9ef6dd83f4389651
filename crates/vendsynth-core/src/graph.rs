use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::table::TableId;

/// Summary of the table dependency graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DependencySummary {
    pub nodes: usize,
    pub edges: usize,
}

/// Generation order derived from table dependencies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DependencyReport {
    pub summary: DependencySummary,
    pub topo_order: Option<Vec<TableId>>,
    pub cycle: Option<Vec<TableId>>,
}

/// Build a deterministic generation order for the given tables.
///
/// Parents referenced by a requested table are pulled into the graph even
/// when they were not requested, so a dependent never precedes its parent.
pub fn build_dependency_report(tables: &[TableId]) -> DependencyReport {
    let graph = build_adjacency(tables);
    let nodes = graph.len();
    let edges = graph.values().map(|targets| targets.len()).sum();
    let summary = DependencySummary { nodes, edges };

    match toposort(&graph) {
        Ok(order) => DependencyReport {
            summary,
            topo_order: Some(order),
            cycle: None,
        },
        Err(cycle) => DependencyReport {
            summary,
            topo_order: None,
            cycle: Some(cycle),
        },
    }
}

fn build_adjacency(tables: &[TableId]) -> BTreeMap<TableId, BTreeSet<TableId>> {
    let mut graph: BTreeMap<TableId, BTreeSet<TableId>> = BTreeMap::new();
    let mut pending: Vec<TableId> = tables.to_vec();

    while let Some(table) = pending.pop() {
        if graph.contains_key(&table) {
            continue;
        }
        graph.entry(table).or_default();
        for parent in table.parents() {
            pending.push(*parent);
        }
    }

    let nodes: Vec<TableId> = graph.keys().copied().collect();
    for table in nodes {
        for parent in table.parents() {
            graph.entry(*parent).or_default().insert(table);
        }
    }

    graph
}

/// Kahn's algorithm over an adjacency map of `node -> dependents`.
///
/// Ties are broken by node order. On failure the nodes left on a cycle are
/// returned.
pub fn toposort<N>(graph: &BTreeMap<N, BTreeSet<N>>) -> Result<Vec<N>, Vec<N>>
where
    N: Ord + Clone,
{
    let mut indegree: BTreeMap<N, usize> = BTreeMap::new();

    for node in graph.keys() {
        indegree.entry(node.clone()).or_insert(0);
    }

    for targets in graph.values() {
        for target in targets {
            *indegree.entry(target.clone()).or_insert(0) += 1;
        }
    }

    let mut ready: BTreeSet<N> = indegree
        .iter()
        .filter_map(|(node, count)| if *count == 0 { Some(node.clone()) } else { None })
        .collect();

    let mut order = Vec::with_capacity(indegree.len());

    while let Some(node) = ready.iter().next().cloned() {
        ready.remove(&node);
        order.push(node.clone());

        if let Some(targets) = graph.get(&node) {
            for target in targets {
                if let Some(count) = indegree.get_mut(target) {
                    *count = count.saturating_sub(1);
                    if *count == 0 {
                        ready.insert(target.clone());
                    }
                }
            }
        }
    }

    if order.len() == indegree.len() {
        Ok(order)
    } else {
        let cycle_nodes: Vec<N> = indegree
            .into_iter()
            .filter_map(|(node, count)| if count > 0 { Some(node) } else { None })
            .collect();
        Err(cycle_nodes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(order: &[TableId], table: TableId) -> usize {
        order
            .iter()
            .position(|entry| *entry == table)
            .unwrap_or_else(|| panic!("{table} missing from order"))
    }

    #[test]
    fn parents_precede_dependents() {
        let report = build_dependency_report(&TableId::ALL);
        let order = report.topo_order.expect("acyclic");
        assert_eq!(order.len(), TableId::ALL.len());
        for table in TableId::ALL {
            for parent in table.parents() {
                assert!(position(&order, *parent) < position(&order, table));
            }
        }
        assert_eq!(report.summary.edges, 6);
    }

    #[test]
    fn missing_parents_are_pulled_in() {
        let report = build_dependency_report(&[TableId::RestockRecord]);
        let order = report.topo_order.expect("acyclic");
        assert_eq!(order, vec![TableId::Record, TableId::RestockRecord]);
    }

    #[test]
    fn toposort_reports_cycle() {
        let mut graph: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
        graph.entry("a").or_default().insert("b");
        graph.entry("b").or_default().insert("a");
        graph.entry("c").or_default();

        let cycle = toposort(&graph).expect_err("cycle expected");
        assert_eq!(cycle, vec!["a", "b"]);
    }
}
