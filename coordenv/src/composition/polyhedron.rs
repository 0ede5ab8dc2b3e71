use crate::Vector3D;
use crate::neighbors::SiteConnections;

/// A vertex of a coordination polyhedron
#[derive(Debug, Clone, PartialEq)]
#[derive(serde::Serialize)]
pub struct Vertex {
    /// site label of the atom at this vertex
    pub label: String,
    /// Cartesian position of this vertex
    pub position: Vector3D,
}

/// The coordination polyhedron of a site: the central atom and all its
/// connected neighbors.
#[derive(Debug, Clone, PartialEq)]
#[derive(serde::Serialize)]
pub struct Polyhedron {
    /// central atom
    pub center: Vertex,
    /// connected neighbors, in the same order as the connections
    pub vertices: Vec<Vertex>,
}

impl Polyhedron {
    /// Get the polyhedron defined by the connections of `site`
    pub fn new(site: &SiteConnections) -> Polyhedron {
        Polyhedron {
            center: Vertex {
                label: site.label.clone(),
                position: site.position,
            },
            vertices: site.neighbors.iter().map(|connection| Vertex {
                label: connection.label.clone(),
                position: connection.position,
            }).collect(),
        }
    }

    /// Get the positions and labels of all the vertices, followed by the
    /// position and label of the central atom.
    pub fn coordinates_and_labels(&self) -> (Vec<[f64; 3]>, Vec<String>) {
        self.vertices.iter()
            .chain(std::iter::once(&self.center))
            .map(|vertex| (<[f64; 3]>::from(vertex.position), vertex.label.clone()))
            .unzip()
    }
}
