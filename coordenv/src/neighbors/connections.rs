use std::collections::HashMap;

use indexmap::IndexMap;

use crate::{Error, Vector3D};
use crate::math::round_to;
use crate::systems::{BondPair, StructureData, SupercellPoint, UnitCell, fractional_key};

/// Number of decimals kept in the distances between atoms
pub const DISTANCE_DECIMALS: i32 = 3;

/// Points closer than this to the representative atom are the atom itself
const SELF_DISTANCE: f64 = 1e-4;

/// A connection between the representative atom of a site and one of the
/// atoms in the supercell.
#[derive(Debug, Clone, PartialEq)]
#[derive(serde::Serialize)]
pub struct Connection {
    /// label of the site at the center of this connection
    pub center: String,
    /// label of the neighbor site
    pub label: String,
    /// element of the neighbor site
    pub element: String,
    /// distance between the center and the neighbor, in Å, rounded to
    /// `DISTANCE_DECIMALS`
    pub distance: f64,
    /// Cartesian position of the neighbor
    pub position: Vector3D,
    /// fractional position of the neighbor
    pub fractional: Vector3D,
}

/// All the connections starting from the representative atom of a single
/// site.
#[derive(Debug, Clone, PartialEq)]
#[derive(serde::Serialize)]
pub struct SiteConnections {
    /// label of this site
    pub label: String,
    /// element of this site
    pub element: String,
    /// Cartesian position of the representative atom of this site
    pub position: Vector3D,
    /// fractional position of the representative atom of this site
    pub fractional: Vector3D,
    /// connections to neighbors, sorted by increasing distance. Equal
    /// distances are sorted by neighbor label and then by fractional
    /// position.
    pub neighbors: Vec<Connection>,
}

impl SiteConnections {
    /// Get the shortest distance from this site to any of its neighbors
    pub fn shortest_distance(&self) -> Option<f64> {
        self.neighbors.first().map(|c| c.distance)
    }

    /// Get a copy of this site with only the neighbors for which `keep`
    /// returns `true`, preserving their order.
    pub fn filtered<F>(&self, keep: F) -> SiteConnections where F: Fn(&Connection) -> bool {
        SiteConnections {
            label: self.label.clone(),
            element: self.element.clone(),
            position: self.position,
            fractional: self.fractional,
            neighbors: self.neighbors.iter().filter(|c| keep(c)).cloned().collect(),
        }
    }
}

/// Sort connections by distance, then by neighbor label and finally by
/// fractional position
pub(crate) fn sort_connections(connections: &mut [Connection]) {
    connections.sort_by(|a, b| {
        a.distance.total_cmp(&b.distance)
            .then_with(|| a.label.cmp(&b.label))
            .then_with(|| fractional_key(a.fractional).cmp(&fractional_key(b.fractional)))
    });
}

/// The set of connections for all sites of a structure, up to a given
/// cutoff distance.
#[derive(Debug, Clone, PartialEq)]
#[derive(serde::Serialize)]
pub struct ConnectionGraph {
    cutoff: f64,
    sites: IndexMap<String, SiteConnections>,
}

impl ConnectionGraph {
    /// Compute the connection graph of `structure`, between the
    /// representative atom of every site and all the `points` of the
    /// supercell closer than `cutoff`.
    ///
    /// The representative atom of a site is its first position, and
    /// distances are computed with the metric tensor of the `cell`.
    #[time_graph::instrument(name = "ConnectionGraph::new")]
    pub fn new(
        structure: &StructureData,
        cell: &UnitCell,
        points: &[SupercellPoint],
        cutoff: f64,
    ) -> Result<ConnectionGraph, Error> {
        if !(cutoff.is_finite() && cutoff > 0.0) {
            return Err(Error::InvalidParameter(format!(
                "cutoff must be a positive number, got {}", cutoff
            )));
        }

        let elements = structure.sites.iter()
            .map(|site| (site.label.as_str(), site.element.as_str()))
            .collect::<HashMap<_, _>>();

        let mut sites = IndexMap::new();
        for site in &structure.sites {
            let position = site.positions.first().ok_or_else(|| Error::InvalidParameter(format!(
                "site '{}' does not have any position", site.label
            )))?;
            let center = SupercellPoint::new(Vector3D::from(*position), &site.label);

            let mut neighbors = Vec::new();
            for point in points {
                let distance = cell.distance(center.position, point.position);
                if distance < SELF_DISTANCE || distance > cutoff {
                    continue;
                }

                let element = elements.get(point.label.as_str())
                    .ok_or_else(|| Error::UnknownSite(point.label.clone()))?;

                neighbors.push(Connection {
                    center: site.label.clone(),
                    label: point.label.clone(),
                    element: (*element).to_owned(),
                    distance: round_to(distance, DISTANCE_DECIMALS),
                    position: cell.cartesian(point.position),
                    fractional: point.position,
                });
            }
            sort_connections(&mut neighbors);

            sites.insert(site.label.clone(), SiteConnections {
                label: site.label.clone(),
                element: site.element.clone(),
                position: cell.cartesian(center.position),
                fractional: center.position,
                neighbors: neighbors,
            });
        }

        return Ok(ConnectionGraph { cutoff, sites });
    }

    /// Create a graph from already computed site connections
    pub(crate) fn from_sites(cutoff: f64, sites: IndexMap<String, SiteConnections>) -> ConnectionGraph {
        ConnectionGraph { cutoff, sites }
    }

    /// Get the cutoff used to build this graph
    pub fn cutoff(&self) -> f64 {
        self.cutoff
    }

    /// Get the connections of the site with the given label
    pub fn get(&self, label: &str) -> Option<&SiteConnections> {
        self.sites.get(label)
    }

    /// Get the connections of all the sites, in input order
    pub fn sites(&self) -> &IndexMap<String, SiteConnections> {
        &self.sites
    }

    /// Iterate over the connections of all the sites, in input order
    pub fn iter(&self) -> impl Iterator<Item = &SiteConnections> {
        self.sites.values()
    }

    /// Get the labels of all the sites in this graph
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.sites.keys().map(|label| label.as_str())
    }

    /// Get the number of sites in this graph
    pub fn len(&self) -> usize {
        self.sites.len()
    }

    /// Is this graph empty?
    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    /// Get all the connections in this graph as `(element pair, distance)`,
    /// sorted by distance and then by pair.
    pub fn flattened(&self) -> Vec<(BondPair, f64)> {
        let mut all = self.iter()
            .flat_map(|site| site.neighbors.iter().map(move |connection| {
                (BondPair::new(&site.element, &connection.element), connection.distance)
            }))
            .collect::<Vec<_>>();

        all.sort_by(|a, b| a.1.total_cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
        return all;
    }
}
