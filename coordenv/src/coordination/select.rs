use std::collections::BTreeMap;

use indexmap::IndexMap;

use crate::neighbors::{Connection, ConnectionGraph, SiteConnections, sort_connections};
use crate::radius::RadiusTable;
use super::{CnMethod, GapResult};

/// The method selected to determine the coordination number of a site
#[derive(Debug, Clone, Copy, PartialEq)]
#[derive(serde::Serialize)]
pub struct BestMethod {
    /// the selected method
    pub method: CnMethod,
    /// coordination number given by this method
    pub cn: usize,
    /// largest gap found by this method
    pub max_gap: f64,
    /// distance to the furthest connected neighbor
    pub cutoff_distance: f64,
}

/// Selected methods for all sites in a structure
#[derive(Debug, Clone, PartialEq)]
#[derive(serde::Serialize)]
pub struct MethodSelection {
    /// best method for every site where at least one method was valid, in
    /// input order
    pub sites: IndexMap<String, BestMethod>,
    /// labels of the sites where no method was valid
    pub undetermined: Vec<String>,
}

impl MethodSelection {
    /// Get the best method for the site with the given `label`
    pub fn get(&self, label: &str) -> Option<&BestMethod> {
        self.sites.get(label)
    }
}

/// Pick the best method among `results`: the largest gap wins, and exact
/// ties are resolved by preferring refined CIF radii, then CIF radii, then
/// Pauling radii and finally the shortest distance.
#[allow(clippy::float_cmp)]
pub fn select_best_method(results: &BTreeMap<CnMethod, GapResult>) -> Option<(CnMethod, GapResult)> {
    let mut best: Option<(CnMethod, GapResult)> = None;
    for (&method, &result) in results {
        let better = match best {
            None => true,
            Some((best_method, best_result)) => {
                result.max_gap > best_result.max_gap || (
                    result.max_gap == best_result.max_gap
                    && method.preference() > best_method.preference()
                )
            }
        };

        if better {
            best = Some((method, result));
        }
    }
    return best;
}

/// Get the first `cn` neighbors of `site` in the order defined by `method`,
/// sorted back by distance.
pub fn connected_neighbors(
    site: &SiteConnections,
    radii: &RadiusTable,
    method: CnMethod,
    cn: usize,
) -> Option<Vec<Connection>> {
    let normalized = method.normalized_neighbors(site, radii)?;
    if normalized.len() < cn {
        return None;
    }

    let mut neighbors = normalized[..cn].iter()
        .map(|&(_, i)| site.neighbors[i].clone())
        .collect::<Vec<_>>();
    sort_connections(&mut neighbors);
    return Some(neighbors);
}

/// Select the best method for every site in the `graph`, from the results of
/// the gap analysis.
pub fn select_methods(
    graph: &ConnectionGraph,
    radii: &RadiusTable,
    gaps: &IndexMap<String, BTreeMap<CnMethod, GapResult>>,
) -> MethodSelection {
    let mut sites = IndexMap::new();
    let mut undetermined = Vec::new();
    for site in graph.iter() {
        let best = gaps.get(&site.label).and_then(select_best_method);
        let neighbors = best.and_then(|(method, result)| {
            connected_neighbors(site, radii, method, result.cn)
        });

        match (best, neighbors) {
            (Some((method, result)), Some(neighbors)) => {
                let cutoff_distance = neighbors.last().map_or(0.0, |c| c.distance);
                sites.insert(site.label.clone(), BestMethod {
                    method: method,
                    cn: result.cn,
                    max_gap: result.max_gap,
                    cutoff_distance: cutoff_distance,
                });
            }
            _ => undetermined.push(site.label.clone()),
        }
    }

    return MethodSelection { sites, undetermined };
}

/// Build a new connection graph containing, for every site, only the
/// neighbors connected according to the selected method and coordination
/// number in `choices`. Sites without a choice are not part of the new
/// graph.
pub fn filter_connections(
    graph: &ConnectionGraph,
    radii: &RadiusTable,
    choices: &IndexMap<String, (CnMethod, usize)>,
) -> ConnectionGraph {
    let mut sites = IndexMap::new();
    for site in graph.iter() {
        let neighbors = choices.get(&site.label).and_then(|&(method, cn)| {
            connected_neighbors(site, radii, method, cn)
        });

        if let Some(neighbors) = neighbors {
            sites.insert(site.label.clone(), SiteConnections {
                label: site.label.clone(),
                element: site.element.clone(),
                position: site.position,
                fractional: site.fractional,
                neighbors: neighbors,
            });
        }
    }
    return ConnectionGraph::from_sites(graph.cutoff(), sites);
}
