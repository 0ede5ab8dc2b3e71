use crate::Error;
use crate::math::round_to;
use crate::neighbors::{SiteConnections, DISTANCE_DECIMALS};
use crate::radius::{RadiusSource, RadiusTable};

/// The different methods used to normalize the distances between a site and
/// its neighbors before looking for the largest gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CnMethod {
    /// distances divided by the shortest distance of the site
    ShortestDistance,
    /// distances divided by the sum of literature CIF radii
    CifRadiusSum,
    /// distances divided by the sum of refined CIF radii
    CifRadiusRefinedSum,
    /// distances divided by the sum of Pauling CN12 radii
    PaulingRadiusSum,
}

impl CnMethod {
    /// All the coordination number methods
    pub const ALL: [CnMethod; 4] = [
        CnMethod::ShortestDistance,
        CnMethod::CifRadiusSum,
        CnMethod::CifRadiusRefinedSum,
        CnMethod::PaulingRadiusSum,
    ];

    /// Get the name of this method
    pub fn name(&self) -> &'static str {
        match self {
            CnMethod::ShortestDistance => "shortest_distance",
            CnMethod::CifRadiusSum => "cif_radius_sum",
            CnMethod::CifRadiusRefinedSum => "cif_radius_refined_sum",
            CnMethod::PaulingRadiusSum => "pauling_radius_sum",
        }
    }

    /// Get the radius source used by this method, or `None` for the
    /// shortest distance method which does not use radii.
    pub fn radius_source(&self) -> Option<RadiusSource> {
        match self {
            CnMethod::ShortestDistance => None,
            CnMethod::CifRadiusSum => Some(RadiusSource::Cif),
            CnMethod::CifRadiusRefinedSum => Some(RadiusSource::CifRefined),
            CnMethod::PaulingRadiusSum => Some(RadiusSource::PaulingCn12),
        }
    }

    /// Does this method rely on atomic radii?
    pub fn uses_radii(&self) -> bool {
        self.radius_source().is_some()
    }

    /// Preference of this method when multiple methods give exactly the same
    /// gap. Larger is preferred.
    pub(crate) fn preference(&self) -> u8 {
        match self {
            CnMethod::CifRadiusRefinedSum => 3,
            CnMethod::CifRadiusSum => 2,
            CnMethod::PaulingRadiusSum => 1,
            CnMethod::ShortestDistance => 0,
        }
    }

    /// Normalize the distances from `site` to its neighbors according to
    /// this method.
    ///
    /// This returns pairs of `(normalized distance, index in
    /// site.neighbors)`, sorted by increasing normalized distance. Equal
    /// values keep the distance order. `None` is returned if the data
    /// required by this method is missing for this site.
    pub fn normalized_neighbors(&self, site: &SiteConnections, radii: &RadiusTable) -> Option<Vec<(f64, usize)>> {
        let mut normalized = Vec::with_capacity(site.neighbors.len());
        match self.radius_source() {
            None => {
                let shortest = site.shortest_distance()?;
                for (i, connection) in site.neighbors.iter().enumerate() {
                    normalized.push((connection.distance / shortest, i));
                }
            }
            Some(source) => {
                let center = radii.radius(&site.element, source)?;
                for (i, connection) in site.neighbors.iter().enumerate() {
                    let neighbor = radii.radius(&connection.element, source)?;
                    let sum = round_to(center + neighbor, DISTANCE_DECIMALS);
                    normalized.push((connection.distance / sum, i));
                }
            }
        }

        // sort_by is stable, so equal values stay in distance order
        normalized.sort_by(|a, b| a.0.total_cmp(&b.0));
        return Some(normalized);
    }
}

impl std::fmt::Display for CnMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for CnMethod {
    type Err = Error;

    fn from_str(name: &str) -> Result<CnMethod, Error> {
        CnMethod::ALL.iter()
            .find(|method| method.name() == name)
            .copied()
            .ok_or_else(|| Error::InvalidParameter(format!(
                "unknown coordination number method '{}'", name
            )))
    }
}
