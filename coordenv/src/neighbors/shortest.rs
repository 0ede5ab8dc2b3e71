use std::collections::{BTreeMap, BTreeSet};

use indexmap::IndexMap;

use crate::systems::BondPair;
use super::ConnectionGraph;

/// Get the shortest distance between any two atoms in the graph
pub fn shortest_distance(graph: &ConnectionGraph) -> Option<f64> {
    graph.iter()
        .filter_map(|site| site.shortest_distance())
        .min_by(f64::total_cmp)
}

/// Get the shortest distance observed for every pair of elements in the
/// graph
pub fn shortest_distance_per_pair(graph: &ConnectionGraph) -> BTreeMap<BondPair, f64> {
    let mut shortest = BTreeMap::new();
    for site in graph.iter() {
        for connection in &site.neighbors {
            let pair = BondPair::new(&site.element, &connection.element);
            shortest.entry(pair)
                .and_modify(|d: &mut f64| *d = f64::min(*d, connection.distance))
                .or_insert(connection.distance);
        }
    }
    return shortest;
}

/// Closest neighbor of a site
#[derive(Debug, Clone, PartialEq)]
#[derive(serde::Serialize)]
pub struct ShortestNeighbor {
    /// label of the closest neighbor
    pub label: String,
    /// distance to the closest neighbor
    pub distance: f64,
}

/// Get the closest neighbor of every site with at least one neighbor
pub fn shortest_neighbor_per_site(graph: &ConnectionGraph) -> IndexMap<String, ShortestNeighbor> {
    graph.iter()
        .filter_map(|site| {
            let first = site.neighbors.first()?;
            Some((site.label.clone(), ShortestNeighbor {
                label: first.label.clone(),
                distance: first.distance,
            }))
        })
        .collect()
}

/// Get all the pairs of elements connected in the graph
pub fn element_pairs(graph: &ConnectionGraph) -> BTreeSet<BondPair> {
    graph.iter()
        .flat_map(|site| site.neighbors.iter().map(|c| BondPair::new(&site.element, &c.element)))
        .collect()
}

/// Get all the pairs of site labels connected in the graph
pub fn label_pairs(graph: &ConnectionGraph) -> BTreeSet<BondPair> {
    graph.iter()
        .flat_map(|site| site.neighbors.iter().map(|c| BondPair::new(&site.label, &c.label)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::systems::{ShellSelector, build_supercell};
    use crate::systems::test_utils::test_structure;

    fn urhin_graph() -> ConnectionGraph {
        let structure = test_structure("URhIn");
        let cell = structure.cell().unwrap();
        let points = build_supercell(&structure, ShellSelector::Full).unwrap();
        return ConnectionGraph::new(&structure, &cell, &points, 10.0).unwrap();
    }

    #[test]
    fn urhin() {
        let graph = urhin_graph();
        assert_eq!(shortest_distance(&graph), Some(2.697));

        let per_pair = shortest_distance_per_pair(&graph);
        let expected = [
            ("In", "In", 3.244), ("In", "Rh", 2.697), ("In", "U", 3.21),
            ("Rh", "Rh", 3.881), ("Rh", "U", 2.983), ("U", "U", 3.881),
        ];
        assert_eq!(per_pair.len(), expected.len());
        for (a, b, distance) in expected {
            assert_eq!(per_pair[&BondPair::new(a, b)], distance);
        }

        let per_site = shortest_neighbor_per_site(&graph);
        assert_eq!(per_site.keys().collect::<Vec<_>>(), ["In1", "Rh1", "Rh2", "U1"]);
        assert_eq!(per_site["Rh2"], ShortestNeighbor { label: "In1".into(), distance: 2.697 });
        assert_eq!(per_site["U1"], ShortestNeighbor { label: "Rh1".into(), distance: 2.983 });

        assert_eq!(element_pairs(&graph).len(), 6);
        let labels = label_pairs(&graph);
        assert!(labels.contains(&BondPair::new("Rh2", "U1")));
        assert!(labels.contains(&BondPair::new("Rh1", "Rh1")));
    }
}
