//! Atomic radii: literature values, refined values and the corresponding
//! sums for every pair of elements.

use std::collections::{BTreeMap, BTreeSet};

use crate::math::round_to;
use crate::neighbors::DISTANCE_DECIMALS;
use crate::systems::{BondPair, all_pairs};

mod data;
pub use self::data::{LiteratureRadius, literature_radius, known_elements};

mod refine;
pub use self::refine::{RadiusRefinement, refine_radii};

/// The different sources of radii, or radius sums, for a pair of elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RadiusSource {
    /// Shortest distance observed between the two elements
    ShortestDistance,
    /// Literature CIF radius
    Cif,
    /// Literature Pauling radius for coordination number 12
    PaulingCn12,
    /// CIF radius refined on this structure
    CifRefined,
}

impl RadiusSource {
    /// All the radius sources
    pub const ALL: [RadiusSource; 4] = [
        RadiusSource::ShortestDistance,
        RadiusSource::Cif,
        RadiusSource::PaulingCn12,
        RadiusSource::CifRefined,
    ];

    /// Get the name of this source
    pub fn name(&self) -> &'static str {
        match self {
            RadiusSource::ShortestDistance => "shortest_distance",
            RadiusSource::Cif => "cif",
            RadiusSource::PaulingCn12 => "pauling_cn12",
            RadiusSource::CifRefined => "cif_refined",
        }
    }
}

impl std::fmt::Display for RadiusSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Radii of a single element, from the different sources
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[derive(serde::Serialize)]
pub struct ElementRadii {
    /// Literature CIF radius
    pub cif: Option<f64>,
    /// Literature Pauling radius for coordination number 12
    pub pauling_cn12: Option<f64>,
    /// CIF radius refined on the current structure
    pub cif_refined: Option<f64>,
}

/// Radii of all the elements in a structure.
///
/// A radius source is available only if all elements have a value for it.
#[derive(Debug, Clone, PartialEq)]
#[derive(serde::Serialize)]
pub struct RadiusTable {
    radii: BTreeMap<String, ElementRadii>,
    cif_available: bool,
    pauling_available: bool,
    refined_available: bool,
}

impl RadiusTable {
    /// Collect literature radii for all `elements`, and refine them using
    /// the `shortest` distance between each pair of elements.
    pub fn new(
        elements: &BTreeSet<&str>,
        shortest: &BTreeMap<BondPair, f64>,
        refinement: RadiusRefinement,
    ) -> RadiusTable {
        let sorted = elements.iter().copied().collect::<Vec<_>>();
        let refined = refine_radii(&sorted, shortest, refinement);

        let mut radii = BTreeMap::new();
        for &element in elements {
            let literature = literature_radius(element);
            radii.insert(element.to_owned(), ElementRadii {
                cif: literature.and_then(|r| r.cif),
                pauling_cn12: literature.and_then(|r| r.pauling_cn12),
                cif_refined: refined.get(element).copied(),
            });
        }

        let all = |f: fn(&ElementRadii) -> Option<f64>| !radii.is_empty() && radii.values().all(|r| f(r).is_some());
        let cif_available = all(|r| r.cif);
        let pauling_available = all(|r| r.pauling_cn12);
        let refined_available = all(|r| r.cif_refined);

        return RadiusTable {
            radii,
            cif_available,
            pauling_available,
            refined_available,
        };
    }

    /// Get all the radii of the given `element`
    pub fn get(&self, element: &str) -> Option<&ElementRadii> {
        self.radii.get(element)
    }

    /// Iterate over the radii of all elements, in alphabetical order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ElementRadii)> {
        self.radii.iter().map(|(element, radii)| (element.as_str(), radii))
    }

    /// Get the radius of `element` from the given `source`. The shortest
    /// distance source does not define per-element radii and always returns
    /// `None`.
    pub fn radius(&self, element: &str, source: RadiusSource) -> Option<f64> {
        let radii = self.radii.get(element)?;
        match source {
            RadiusSource::ShortestDistance => None,
            RadiusSource::Cif => radii.cif,
            RadiusSource::PaulingCn12 => radii.pauling_cn12,
            RadiusSource::CifRefined => radii.cif_refined,
        }
    }

    /// Check if the given radius `source` has values for all elements
    pub fn is_available(&self, source: RadiusSource) -> bool {
        match source {
            RadiusSource::ShortestDistance => false,
            RadiusSource::Cif => self.cif_available,
            RadiusSource::PaulingCn12 => self.pauling_available,
            RadiusSource::CifRefined => self.refined_available,
        }
    }
}

/// Sum of radii for every pair of elements, for all available sources.
/// Sums are rounded to `DISTANCE_DECIMALS`.
#[derive(Debug, Clone, PartialEq)]
#[derive(serde::Serialize)]
pub struct RadiusSumTable {
    sums: BTreeMap<RadiusSource, BTreeMap<BondPair, f64>>,
}

impl RadiusSumTable {
    /// Compute the radius sums for all pairs of `elements`.
    ///
    /// The shortest distance source is available when all pairs of
    /// elements are observed in `shortest`; other sources are available when
    /// the corresponding radii are available in `radii`.
    pub fn new(
        elements: &BTreeSet<&str>,
        radii: &RadiusTable,
        shortest: &BTreeMap<BondPair, f64>,
    ) -> RadiusSumTable {
        let pairs = all_pairs(elements.iter().copied());

        let mut sums = BTreeMap::new();
        if !pairs.is_empty() && pairs.iter().all(|pair| shortest.contains_key(pair)) {
            let observed = pairs.iter()
                .map(|pair| (pair.clone(), shortest[pair]))
                .collect();
            sums.insert(RadiusSource::ShortestDistance, observed);
        }

        for source in [RadiusSource::Cif, RadiusSource::PaulingCn12, RadiusSource::CifRefined] {
            if !radii.is_available(source) {
                continue;
            }

            let mut per_pair = BTreeMap::new();
            for pair in &pairs {
                let first = radii.radius(pair.first(), source);
                let second = radii.radius(pair.second(), source);
                if let (Some(first), Some(second)) = (first, second) {
                    per_pair.insert(pair.clone(), round_to(first + second, DISTANCE_DECIMALS));
                }
            }
            sums.insert(source, per_pair);
        }

        return RadiusSumTable { sums };
    }

    /// Is the given `source` available in this table?
    pub fn is_available(&self, source: RadiusSource) -> bool {
        self.sums.contains_key(&source)
    }

    /// Get all the sums for a given `source`, if it is available
    pub fn get(&self, source: RadiusSource) -> Option<&BTreeMap<BondPair, f64>> {
        self.sums.get(&source)
    }

    /// Get the sum for the `first` and `second` elements from `source`
    pub fn sum(&self, source: RadiusSource, first: &str, second: &str) -> Option<f64> {
        self.sums.get(&source)?.get(&BondPair::new(first, second)).copied()
    }

    /// Get the list of available sources
    pub fn sources(&self) -> impl Iterator<Item = RadiusSource> + '_ {
        self.sums.keys().copied()
    }
}
