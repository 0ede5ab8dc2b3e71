//! Distances between the atoms of a structure and the connection graph
//! built from them.

mod connections;
pub use self::connections::{Connection, ConnectionGraph, SiteConnections, DISTANCE_DECIMALS};
pub(crate) use self::connections::sort_connections;

mod shortest;
pub use self::shortest::{ShortestNeighbor, shortest_distance, shortest_distance_per_pair};
pub use self::shortest::{element_pairs, label_pairs, shortest_neighbor_per_site};
