use std::collections::{BTreeMap, HashMap};

use indexmap::IndexMap;

use super::{BondPair, StructureData, all_pairs};
use super::supercell::POSITION_DECIMALS;

/// Sites with a total occupancy below `1 - OCCUPANCY_TOLERANCE` are deficient
const OCCUPANCY_TOLERANCE: f64 = 1e-4;

/// Classification of the occupancy of crystallographic sites.
///
/// Atomic mixing happens when multiple labels share the same position,
/// deficiency when the total occupancy of a position is below 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SiteMixing {
    /// Every site is fully occupied by a single label
    FullOccupancy,
    /// Some sites are partially occupied, but never shared between labels
    DeficiencyWithoutAtomicMixing,
    /// Some positions are shared between labels, with full total occupancy
    FullOccupancyAtomicMixing,
    /// Some positions are shared between labels, and not fully occupied
    DeficiencyAtomicMixing,
}

impl SiteMixing {
    fn from_flags(mixing: bool, deficiency: bool) -> SiteMixing {
        match (mixing, deficiency) {
            (false, false) => SiteMixing::FullOccupancy,
            (false, true) => SiteMixing::DeficiencyWithoutAtomicMixing,
            (true, false) => SiteMixing::FullOccupancyAtomicMixing,
            (true, true) => SiteMixing::DeficiencyAtomicMixing,
        }
    }

    fn has_mixing(self) -> bool {
        matches!(self, SiteMixing::FullOccupancyAtomicMixing | SiteMixing::DeficiencyAtomicMixing)
    }

    fn has_deficiency(self) -> bool {
        matches!(self, SiteMixing::DeficiencyWithoutAtomicMixing | SiteMixing::DeficiencyAtomicMixing)
    }

    /// Get the name of this kind of mixing
    pub fn name(&self) -> &'static str {
        match self {
            SiteMixing::FullOccupancy => "full_occupancy",
            SiteMixing::DeficiencyWithoutAtomicMixing => "deficiency_without_atomic_mixing",
            SiteMixing::FullOccupancyAtomicMixing => "full_occupancy_atomic_mixing",
            SiteMixing::DeficiencyAtomicMixing => "deficiency_atomic_mixing",
        }
    }
}

impl std::fmt::Display for SiteMixing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Occupancy classification of every site in a structure, together with the
/// classification of the whole structure.
#[derive(Debug, Clone, PartialEq)]
#[derive(serde::Serialize)]
pub struct MixingTable {
    /// Classification of the structure as a whole
    pub structure: SiteMixing,
    /// Classification of each site, in input order
    pub sites: IndexMap<String, SiteMixing>,
}

impl MixingTable {
    /// Classify all the sites of the given `structure`
    pub fn new(structure: &StructureData) -> MixingTable {
        // positions are compared after wrapping inside the unit cell and
        // rounding to the same precision as supercell points
        let scale = 10_f64.powi(POSITION_DECIMALS);
        let period = scale as i64;
        let key = |position: &[f64; 3]| -> [i64; 3] {
            let mut key = [0; 3];
            for (k, x) in key.iter_mut().zip(position) {
                *k = ((x * scale).round() as i64).rem_euclid(period);
            }
            key
        };

        let mut sites_by_position = HashMap::<[i64; 3], Vec<usize>>::new();
        for (i, site) in structure.sites.iter().enumerate() {
            for position in &site.positions {
                let sites = sites_by_position.entry(key(position)).or_default();
                if !sites.contains(&i) {
                    sites.push(i);
                }
            }
        }

        let mut any_mixing = false;
        let mut any_deficiency = false;
        let mut sites = IndexMap::new();
        for (i, site) in structure.sites.iter().enumerate() {
            let mut sharing = site.positions.iter()
                .flat_map(|position| &sites_by_position[&key(position)])
                .copied()
                .collect::<Vec<_>>();
            sharing.sort_unstable();
            sharing.dedup();

            let mixing = sharing.len() > 1;
            let occupancy = sharing.iter().map(|&j| structure.sites[j].occupancy).sum::<f64>();
            let deficiency = occupancy < 1.0 - OCCUPANCY_TOLERANCE;

            any_mixing |= mixing;
            any_deficiency |= deficiency;
            sites.insert(site.label.clone(), SiteMixing::from_flags(mixing, deficiency));
        }

        return MixingTable {
            structure: SiteMixing::from_flags(any_mixing, any_deficiency),
            sites: sites,
        };
    }

    /// Get the classification of the site with the given label
    pub fn site(&self, label: &str) -> Option<SiteMixing> {
        self.sites.get(label).copied()
    }

    /// Classify every pair of site labels (including pairs of a label with
    /// itself). A pair has atomic mixing if either site shares its position
    /// with another label, and deficiency if either site is deficient.
    pub fn pair_mixing(&self) -> BTreeMap<BondPair, SiteMixing> {
        let mut pairs = BTreeMap::new();
        for pair in all_pairs(self.sites.keys().map(String::as_str)) {
            let first = self.sites[pair.first()];
            let second = self.sites[pair.second()];
            let mixing = SiteMixing::from_flags(
                first.has_mixing() || second.has_mixing(),
                first.has_deficiency() || second.has_deficiency(),
            );
            pairs.insert(pair, mixing);
        }
        return pairs;
    }
}
