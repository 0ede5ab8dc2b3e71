use std::collections::BTreeMap;

use indexmap::IndexMap;
use log::warn;
use once_cell::unsync::OnceCell;

use crate::Error;
use crate::AnalysisOptions;
use crate::systems::{BondPair, MixingTable, SiteMixing, StructureData, UnitCell};
use crate::systems::{ShellSelector, SupercellPoint, build_supercell};
use crate::neighbors::{ConnectionGraph, ShortestNeighbor};
use crate::neighbors::{shortest_distance, shortest_distance_per_pair, shortest_neighbor_per_site};
use crate::radius::{RadiusSumTable, RadiusTable};
use crate::coordination::{CnMethod, GapResult, MethodSelection};
use crate::coordination::{analyze_gaps, filter_connections, select_methods};
use crate::composition::{BondStatistics, Polyhedron};

/// Values derived from the connection graph. They depend on the cutoff, and
/// are computed on first access.
#[derive(Default)]
struct DerivedState {
    graph: OnceCell<ConnectionGraph>,
    shortest: OnceCell<BTreeMap<BondPair, f64>>,
    radii: OnceCell<RadiusTable>,
    sums: OnceCell<RadiusSumTable>,
    gaps: OnceCell<IndexMap<String, BTreeMap<CnMethod, GapResult>>>,
    selection: OnceCell<MethodSelection>,
    best_graph: OnceCell<ConnectionGraph>,
    min_distance: OnceCell<(ConnectionGraph, Vec<String>)>,
    best_statistics: OnceCell<BondStatistics>,
    min_distance_statistics: OnceCell<BondStatistics>,
}

/// Analysis of the coordination environment of every site in a single
/// crystal structure.
///
/// The unit cell, supercell and site mixing are computed when creating the
/// analysis. Everything else (connections, radii, gaps, selected methods and
/// statistics) is computed the first time it is requested and then cached.
///
/// ```no_run
/// # use coordenv::{AnalysisOptions, CoordinationAnalysis, StructureData};
/// # fn main() -> Result<(), coordenv::Error> {
/// let structure = StructureData::from_json(&std::fs::read_to_string("URhIn.json").unwrap())?;
/// let analysis = CoordinationAnalysis::new(structure, AnalysisOptions::default())?;
///
/// for (label, best) in &analysis.best_methods()?.sites {
///     println!("{}: CN = {} ({})", label, best.cn, best.method);
/// }
/// # Ok(())
/// # }
/// ```
pub struct CoordinationAnalysis {
    structure: StructureData,
    options: AnalysisOptions,
    cell: UnitCell,
    mixing: MixingTable,
    unit_cell: Vec<SupercellPoint>,
    supercell: Vec<SupercellPoint>,
    derived: DerivedState,
}

impl std::fmt::Debug for CoordinationAnalysis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoordinationAnalysis")
            .field("options", &self.options)
            .field("sites", &self.structure.labels())
            .field("supercell", &self.supercell.len())
            .finish_non_exhaustive()
    }
}

impl CoordinationAnalysis {
    /// Start the analysis of `structure` with the given `options`
    pub fn new(structure: StructureData, options: AnalysisOptions) -> Result<CoordinationAnalysis, Error> {
        structure.validate()?;
        options.validate()?;

        let cell = structure.cell()?;
        let unit_cell = build_supercell(&structure, ShellSelector::None)?;
        let supercell = build_supercell(&structure, options.shells)?;
        let mixing = MixingTable::new(&structure);

        let analysis = CoordinationAnalysis {
            structure,
            options,
            cell,
            mixing,
            unit_cell,
            supercell,
            derived: DerivedState::default(),
        };
        analysis.check_reach();

        return Ok(analysis);
    }

    fn check_reach(&self) {
        let reach = self.options.shells.reach(&self.cell);
        if self.options.cutoff > reach {
            warn!(
                "the cutoff ({} Å) is larger than the distance covered by the supercell ({:.3} Å), \
                some neighbors might be missing",
                self.options.cutoff, reach
            );
        }
    }

    /// Get the structure being analyzed
    pub fn structure(&self) -> &StructureData {
        &self.structure
    }

    /// Get the options used for this analysis
    pub fn options(&self) -> &AnalysisOptions {
        &self.options
    }

    /// Get the unit cell of the structure
    pub fn cell(&self) -> &UnitCell {
        &self.cell
    }

    /// Change the cutoff used to find neighbors. All values computed with
    /// the previous cutoff are discarded if the cutoff changes.
    #[allow(clippy::float_cmp)]
    pub fn set_cutoff(&mut self, cutoff: f64) -> Result<(), Error> {
        let options = AnalysisOptions { cutoff, ..self.options };
        options.validate()?;

        if options.cutoff != self.options.cutoff {
            self.options = options;
            self.derived = DerivedState::default();
            self.check_reach();
        }

        return Ok(());
    }

    /// Get the points in the unit cell, without any translation
    pub fn unit_cell_points(&self) -> &[SupercellPoint] {
        &self.unit_cell
    }

    /// Get all the points in the supercell
    pub fn supercell_points(&self) -> &[SupercellPoint] {
        &self.supercell
    }

    /// Number of atoms in the unit cell
    pub fn unit_cell_atom_count(&self) -> usize {
        self.unit_cell.len()
    }

    /// Number of atoms in the supercell
    pub fn supercell_atom_count(&self) -> usize {
        self.supercell.len()
    }

    /// Get the occupancy classification of all sites
    pub fn mixing(&self) -> &MixingTable {
        &self.mixing
    }

    /// Get the occupancy classification of the site with the given `label`
    pub fn site_mixing(&self, label: &str) -> Result<SiteMixing, Error> {
        self.mixing.site(label).ok_or_else(|| Error::UnknownSite(label.into()))
    }

    /// Get the occupancy classification of every pair of site labels
    pub fn pair_mixing(&self) -> BTreeMap<BondPair, SiteMixing> {
        self.mixing.pair_mixing()
    }

    /// Get the connections between every site and all the atoms in the
    /// supercell within the cutoff
    pub fn connections(&self) -> Result<&ConnectionGraph, Error> {
        self.derived.graph.get_or_try_init(|| {
            ConnectionGraph::new(&self.structure, &self.cell, &self.supercell, self.options.cutoff)
        })
    }

    /// Get all the connections as (element pair, distance), sorted by
    /// distance
    pub fn flattened_connections(&self) -> Result<Vec<(BondPair, f64)>, Error> {
        Ok(self.connections()?.flattened())
    }

    /// Get the shortest distance between any two atoms in the structure
    pub fn shortest_distance(&self) -> Result<Option<f64>, Error> {
        Ok(shortest_distance(self.connections()?))
    }

    /// Get the shortest distance for every pair of elements observed within
    /// the cutoff
    pub fn shortest_distances(&self) -> Result<&BTreeMap<BondPair, f64>, Error> {
        let graph = self.connections()?;
        Ok(self.derived.shortest.get_or_init(|| shortest_distance_per_pair(graph)))
    }

    /// Get the closest neighbor of every site
    pub fn shortest_neighbors(&self) -> Result<IndexMap<String, ShortestNeighbor>, Error> {
        Ok(shortest_neighbor_per_site(self.connections()?))
    }

    /// Get the literature and refined radii of all elements
    pub fn radii(&self) -> Result<&RadiusTable, Error> {
        let shortest = self.shortest_distances()?;
        Ok(self.derived.radii.get_or_init(|| {
            RadiusTable::new(&self.structure.unique_elements(), shortest, self.options.refinement)
        }))
    }

    /// Get the sums of radii for all pairs of elements
    pub fn radius_sums(&self) -> Result<&RadiusSumTable, Error> {
        let shortest = self.shortest_distances()?;
        let radii = self.radii()?;
        Ok(self.derived.sums.get_or_init(|| {
            RadiusSumTable::new(&self.structure.unique_elements(), radii, shortest)
        }))
    }

    /// Get the largest gap and corresponding coordination number for every
    /// site and every valid method
    pub fn gaps(&self) -> Result<&IndexMap<String, BTreeMap<CnMethod, GapResult>>, Error> {
        let graph = self.connections()?;
        let radii = self.radii()?;
        Ok(self.derived.gaps.get_or_init(|| {
            analyze_gaps(graph, radii, &self.mixing, self.options.min_neighbors, self.options.max_neighbors)
        }))
    }

    /// Get the best method for every site
    pub fn best_methods(&self) -> Result<&MethodSelection, Error> {
        let graph = self.connections()?;
        let radii = self.radii()?;
        let gaps = self.gaps()?;
        Ok(self.derived.selection.get_or_init(|| select_methods(graph, radii, gaps)))
    }

    /// Get the connections of every site to its neighbors, according to the
    /// best method of this site. Sites without a valid method are not
    /// included.
    pub fn best_connections(&self) -> Result<&ConnectionGraph, Error> {
        let graph = self.connections()?;
        let radii = self.radii()?;
        let selection = self.best_methods()?;
        Ok(self.derived.best_graph.get_or_init(|| {
            let choices = selection.sites.iter()
                .map(|(label, best)| (label.clone(), (best.method, best.cn)))
                .collect();
            filter_connections(graph, radii, &choices)
        }))
    }

    fn min_distance(&self) -> Result<&(ConnectionGraph, Vec<String>), Error> {
        let graph = self.connections()?;
        let radii = self.radii()?;
        let gaps = self.gaps()?;
        Ok(self.derived.min_distance.get_or_init(|| {
            let mut choices = IndexMap::new();
            let mut undetermined = Vec::new();
            for (label, results) in gaps {
                match results.get(&CnMethod::ShortestDistance) {
                    Some(result) => {
                        choices.insert(label.clone(), (CnMethod::ShortestDistance, result.cn));
                    }
                    None => undetermined.push(label.clone()),
                }
            }
            (filter_connections(graph, radii, &choices), undetermined)
        }))
    }

    /// Get the connections of every site to its neighbors, using the
    /// coordination number given by the shortest distance method
    pub fn min_distance_connections(&self) -> Result<&ConnectionGraph, Error> {
        Ok(&self.min_distance()?.0)
    }

    /// Get the bond statistics of the connections given by the best method
    pub fn best_statistics(&self) -> Result<&BondStatistics, Error> {
        let graph = self.best_connections()?;
        let selection = self.best_methods()?;
        Ok(self.derived.best_statistics.get_or_init(|| {
            BondStatistics::new(graph, &selection.undetermined)
        }))
    }

    /// Get the bond statistics of the connections given by the shortest
    /// distance method
    pub fn min_distance_statistics(&self) -> Result<&BondStatistics, Error> {
        let (graph, undetermined) = self.min_distance()?;
        Ok(self.derived.min_distance_statistics.get_or_init(|| {
            BondStatistics::new(graph, undetermined)
        }))
    }

    /// Get the coordination polyhedron of the site with the given `label`,
    /// using the connections given by the best method.
    pub fn polyhedron(&self, label: &str) -> Result<Polyhedron, Error> {
        if self.structure.site(label).is_none() {
            return Err(Error::UnknownSite(label.into()));
        }

        let site = self.best_connections()?.get(label)
            .ok_or_else(|| Error::UndeterminedSite(label.into()))?;

        return Ok(Polyhedron::new(site));
    }
}
