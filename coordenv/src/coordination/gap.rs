use std::collections::BTreeMap;

use indexmap::IndexMap;

use crate::neighbors::{ConnectionGraph, SiteConnections};
use crate::radius::RadiusTable;
use crate::systems::{MixingTable, SiteMixing};
use super::CnMethod;

/// Result of the largest gap search for one site and one method
#[derive(Debug, Clone, Copy, PartialEq)]
#[derive(serde::Serialize)]
pub struct GapResult {
    /// largest gap between two consecutive normalized distances
    pub max_gap: f64,
    /// coordination number, i.e. the number of neighbors before the largest
    /// gap
    pub cn: usize,
}

/// Find the largest gap in the sorted `values`, considering only
/// coordination numbers between `min_neighbors` and `max_neighbors`.
///
/// The gap for a coordination number `cn` is `values[cn] - values[cn - 1]`,
/// and the first of multiple equal largest gaps is used. A gap needs the
/// value of the next neighbor after the last one counted, so at least
/// `min_neighbors + 1` values are required: this returns `None` when there
/// are `min_neighbors` values or less.
pub fn max_gap(values: &[f64], min_neighbors: usize, max_neighbors: usize) -> Option<GapResult> {
    let min_neighbors = usize::max(min_neighbors, 1);
    if values.len() <= min_neighbors {
        return None;
    }

    let upper = usize::min(max_neighbors, values.len() - 1);
    let mut result: Option<GapResult> = None;
    for cn in min_neighbors..=upper {
        let gap = values[cn] - values[cn - 1];
        if result.map_or(true, |best| gap > best.max_gap) {
            result = Some(GapResult { max_gap: gap, cn: cn });
        }
    }

    return result;
}

/// Get the methods that can be used given the available radii and the
/// occupancy classification of the structure. Radius based methods are not
/// used for structures with both atomic mixing and deficiency.
pub fn candidate_methods(radii: &RadiusTable, mixing: SiteMixing) -> Vec<CnMethod> {
    CnMethod::ALL.iter()
        .copied()
        .filter(|method| match method.radius_source() {
            None => true,
            Some(source) => {
                radii.is_available(source) && mixing != SiteMixing::DeficiencyAtomicMixing
            }
        })
        .collect()
}

/// Run the largest gap search for a single site, using all the given
/// `methods`. Methods without enough neighbors for this site are not part of
/// the result.
pub fn analyze_site(
    site: &SiteConnections,
    radii: &RadiusTable,
    methods: &[CnMethod],
    min_neighbors: usize,
    max_neighbors: usize,
) -> BTreeMap<CnMethod, GapResult> {
    let mut results = BTreeMap::new();
    for &method in methods {
        let normalized = match method.normalized_neighbors(site, radii) {
            Some(normalized) => normalized,
            None => continue,
        };

        let values = normalized.iter().map(|n| n.0).collect::<Vec<_>>();
        if let Some(result) = max_gap(&values, min_neighbors, max_neighbors) {
            results.insert(method, result);
        }
    }
    return results;
}

/// Run the largest gap search for all the sites in the `graph`. The same
/// methods are used for all sites, depending on the classification of the
/// whole structure in `mixing`.
#[time_graph::instrument(name = "analyze_gaps")]
pub fn analyze_gaps(
    graph: &ConnectionGraph,
    radii: &RadiusTable,
    mixing: &MixingTable,
    min_neighbors: usize,
    max_neighbors: usize,
) -> IndexMap<String, BTreeMap<CnMethod, GapResult>> {
    let methods = candidate_methods(radii, mixing.structure);

    let mut all = IndexMap::new();
    for site in graph.iter() {
        let results = analyze_site(site, radii, &methods, min_neighbors, max_neighbors);
        if results.is_empty() {
            log::debug!("no valid coordination number method for site {}", site.label);
        }
        all.insert(site.label.clone(), results);
    }
    return all;
}
