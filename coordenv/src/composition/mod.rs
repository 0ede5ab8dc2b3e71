//! Statistics on the bonds and coordination numbers of a (filtered)
//! connection graph.

use std::collections::{BTreeMap, BTreeSet};

use indexmap::IndexMap;

use crate::neighbors::ConnectionGraph;
use crate::systems::BondPair;

mod polyhedron;
pub use self::polyhedron::{Polyhedron, Vertex};

/// Count the bonds between elements around every site in the graph
pub fn bond_counts_per_site(graph: &ConnectionGraph) -> IndexMap<String, BTreeMap<BondPair, usize>> {
    graph.iter()
        .map(|site| {
            let mut counts = BTreeMap::new();
            for connection in &site.neighbors {
                let pair = BondPair::new(&site.element, &connection.element);
                *counts.entry(pair).or_insert(0) += 1;
            }
            (site.label.clone(), counts)
        })
        .collect()
}

/// Sum the bond counts of all sites
pub fn global_bond_counts(per_site: &IndexMap<String, BTreeMap<BondPair, usize>>) -> BTreeMap<BondPair, usize> {
    let mut counts = BTreeMap::new();
    for site_counts in per_site.values() {
        for (pair, &count) in site_counts {
            *counts.entry(pair.clone()).or_insert(0) += count;
        }
    }
    return counts;
}

/// Get the fraction of each kind of bond. The fractions sum to 1, unless
/// there are no bonds at all.
pub fn bond_fractions(counts: &BTreeMap<BondPair, usize>) -> BTreeMap<BondPair, f64> {
    let total = counts.values().sum::<usize>();
    if total == 0 {
        return BTreeMap::new();
    }

    counts.iter()
        .map(|(pair, &count)| (pair.clone(), count as f64 / total as f64))
        .collect()
}

/// Get the coordination number of every site, i.e. the number of connected
/// neighbors
pub fn cn_per_site(graph: &ConnectionGraph) -> IndexMap<String, usize> {
    graph.iter()
        .map(|site| (site.label.clone(), site.neighbors.len()))
        .collect()
}

/// Get the arithmetic mean of the coordination numbers, or `None` if there
/// are no sites.
pub fn average_cn(cn: &IndexMap<String, usize>) -> Option<f64> {
    if cn.is_empty() {
        return None;
    }
    let sum = cn.values().sum::<usize>();
    return Some(sum as f64 / cn.len() as f64);
}

/// Get the set of distinct coordination numbers
pub fn unique_cn(cn: &IndexMap<String, usize>) -> BTreeSet<usize> {
    cn.values().copied().collect()
}

/// Bond and coordination number statistics for a connection graph
#[derive(Debug, Clone, PartialEq)]
#[derive(serde::Serialize)]
pub struct BondStatistics {
    /// number of bonds of each kind around each site
    pub bond_counts_per_site: IndexMap<String, BTreeMap<BondPair, usize>>,
    /// number of bonds of each kind in the whole structure
    pub bond_counts: BTreeMap<BondPair, usize>,
    /// fraction of bonds of each kind in the whole structure
    pub bond_fractions: BTreeMap<BondPair, f64>,
    /// coordination number of each site
    pub cn_per_site: IndexMap<String, usize>,
    /// average coordination number
    pub average_cn: Option<f64>,
    /// distinct coordination numbers
    pub unique_cn: BTreeSet<usize>,
    /// smallest coordination number
    pub min_cn: Option<usize>,
    /// largest coordination number
    pub max_cn: Option<usize>,
    /// labels of the sites for which the coordination number could not be
    /// determined. These sites are not included in the other statistics.
    pub undetermined: Vec<String>,
}

impl BondStatistics {
    /// Compute all statistics for `graph`. `undetermined` lists the sites
    /// which were removed from the graph because their coordination number
    /// is unknown.
    pub fn new(graph: &ConnectionGraph, undetermined: &[String]) -> BondStatistics {
        let bond_counts_per_site = bond_counts_per_site(graph);
        let bond_counts = global_bond_counts(&bond_counts_per_site);
        let bond_fractions = bond_fractions(&bond_counts);
        let cn_per_site = cn_per_site(graph);
        let unique_cn = unique_cn(&cn_per_site);

        return BondStatistics {
            bond_counts_per_site,
            bond_counts,
            bond_fractions,
            average_cn: average_cn(&cn_per_site),
            cn_per_site,
            min_cn: unique_cn.first().copied(),
            max_cn: unique_cn.last().copied(),
            unique_cn,
            undetermined: undetermined.to_vec(),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::Vector3D;
    use crate::neighbors::{Connection, SiteConnections};

    fn site(label: &str, element: &str, neighbors: &[&str]) -> SiteConnections {
        SiteConnections {
            label: label.into(),
            element: element.into(),
            position: Vector3D::zero(),
            fractional: Vector3D::zero(),
            neighbors: neighbors.iter().enumerate().map(|(i, &neighbor)| Connection {
                center: label.into(),
                label: format!("{}1", neighbor),
                element: neighbor.into(),
                distance: 2.0 + 0.1 * i as f64,
                position: Vector3D::zero(),
                fractional: Vector3D::zero(),
            }).collect(),
        }
    }

    fn urhin_like() -> ConnectionGraph {
        let mut sites = IndexMap::new();
        let mut add = |label: &str, element: &str, neighbors: Vec<&str>| {
            sites.insert(label.to_string(), site(label, element, &neighbors));
        };

        let mut in1 = vec!["In"; 4];
        in1.extend(["Rh"; 4]);
        in1.extend(["U"; 6]);
        add("In1", "In", in1);

        let mut rh1 = vec!["In"; 3];
        rh1.extend(["U"; 6]);
        add("Rh1", "Rh", rh1);

        let mut rh2 = vec!["In"; 6];
        rh2.extend(["U"; 3]);
        add("Rh2", "Rh", rh2);

        let mut u1 = vec!["In"; 6];
        u1.extend(["Rh"; 5]);
        add("U1", "U", u1);

        return ConnectionGraph::from_sites(10.0, sites);
    }

    #[test]
    fn counts() {
        let graph = urhin_like();
        let per_site = bond_counts_per_site(&graph);
        assert_eq!(per_site["Rh1"][&BondPair::new("In", "Rh")], 3);
        assert_eq!(per_site["Rh1"][&BondPair::new("Rh", "U")], 6);
        assert_eq!(per_site["U1"].len(), 2);

        let global = global_bond_counts(&per_site);
        assert_eq!(global[&BondPair::new("In", "In")], 4);
        assert_eq!(global[&BondPair::new("In", "Rh")], 13);
        assert_eq!(global[&BondPair::new("In", "U")], 12);
        assert_eq!(global[&BondPair::new("Rh", "U")], 14);
    }

    #[test]
    fn fractions() {
        let graph = urhin_like();
        let statistics = BondStatistics::new(&graph, &[]);

        let total = statistics.bond_fractions.values().sum::<f64>();
        assert!(f64::abs(total - 1.0) < 1e-12);
        assert_eq!(statistics.bond_fractions[&BondPair::new("In", "Rh")], 13.0 / 43.0);

        assert!(bond_fractions(&BTreeMap::new()).is_empty());
    }

    #[test]
    fn coordination_numbers() {
        let graph = urhin_like();
        let statistics = BondStatistics::new(&graph, &["Cs1".to_string()]);

        assert_eq!(statistics.cn_per_site.values().copied().collect::<Vec<_>>(), [14, 9, 9, 11]);
        assert_eq!(statistics.average_cn, Some(10.75));
        assert_eq!(statistics.unique_cn.iter().copied().collect::<Vec<_>>(), [9, 11, 14]);
        assert_eq!(statistics.min_cn, Some(9));
        assert_eq!(statistics.max_cn, Some(14));
        assert_eq!(statistics.undetermined, ["Cs1"]);

        let empty = ConnectionGraph::from_sites(10.0, IndexMap::new());
        let statistics = BondStatistics::new(&empty, &[]);
        assert_eq!(statistics.average_cn, None);
        assert_eq!(statistics.min_cn, None);
    }

    #[test]
    fn serialization() {
        let graph = urhin_like();
        let statistics = BondStatistics::new(&graph, &[]);

        let json = serde_json::to_value(&statistics).unwrap();
        assert_eq!(json["bond_counts"]["In-U"], 12);
        assert_eq!(json["bond_counts_per_site"]["Rh2"]["In-Rh"], 6);
        assert_eq!(json["cn_per_site"]["U1"], 11);
    }
}
