use crate::Error;
use crate::radius::RadiusRefinement;
use crate::systems::ShellSelector;

/// Parameters controlling the analysis of a structure.
///
/// All fields have default values, and unknown fields are rejected when
/// reading the options from JSON.
#[derive(Debug, Clone, Copy, PartialEq)]
#[derive(serde::Deserialize, serde::Serialize, schemars::JsonSchema)]
#[serde(deny_unknown_fields, default)]
pub struct AnalysisOptions {
    /// Largest distance between two atoms to consider them as neighbors,
    /// in Å
    pub cutoff: f64,
    /// Lattice translations used to build the supercell
    pub shells: ShellSelector,
    /// Smallest coordination number considered by the gap analysis
    pub min_neighbors: usize,
    /// Largest coordination number considered by the gap analysis
    pub max_neighbors: usize,
    /// Strategy used to refine the CIF radii on the structure
    pub refinement: RadiusRefinement,
}

impl Default for AnalysisOptions {
    fn default() -> AnalysisOptions {
        AnalysisOptions {
            cutoff: 10.0,
            shells: ShellSelector::Full,
            min_neighbors: 3,
            max_neighbors: 24,
            refinement: RadiusRefinement::AdjacentPairs,
        }
    }
}

impl AnalysisOptions {
    /// Read and validate options from their JSON representation
    pub fn from_json(json: &str) -> Result<AnalysisOptions, Error> {
        let options = serde_json::from_str::<AnalysisOptions>(json)?;
        options.validate()?;
        return Ok(options);
    }

    /// Check that these options make sense
    pub fn validate(&self) -> Result<(), Error> {
        if !(self.cutoff.is_finite() && self.cutoff > 0.0) {
            return Err(Error::InvalidParameter(format!(
                "cutoff must be a positive number, got {}", self.cutoff
            )));
        }

        if self.min_neighbors == 0 {
            return Err(Error::InvalidParameter(
                "min_neighbors must be at least 1".into()
            ));
        }

        if self.max_neighbors < self.min_neighbors {
            return Err(Error::InvalidParameter(format!(
                "max_neighbors ({}) must not be smaller than min_neighbors ({})",
                self.max_neighbors, self.min_neighbors
            )));
        }

        self.shells.validate()?;

        return Ok(());
    }
}
