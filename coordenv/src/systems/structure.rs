use std::collections::{BTreeSet, HashSet};

use crate::Error;
use super::UnitCell;
use super::elements::is_element;

/// Tolerance used when checking occupancies
const OCCUPANCY_TOLERANCE: f64 = 1e-4;

/// A single crystallographic site: one label, one element and all the
/// symmetry-equivalent positions of this site in the unit cell.
#[derive(Debug, Clone, PartialEq)]
#[derive(serde::Deserialize, serde::Serialize, schemars::JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct SiteData {
    /// Unique label of this site, starting with the element symbol (e.g.
    /// `"Rh2"`)
    pub label: String,
    /// Chemical symbol of the element occupying this site
    pub element: String,
    /// Fractional occupancy of this site
    #[serde(default = "default_occupancy")]
    pub occupancy: f64,
    /// Symmetry-expanded fractional positions of this site in the unit cell.
    /// The first position is used as the representative atom of the site.
    pub positions: Vec<[f64; 3]>,
}

fn default_occupancy() -> f64 {
    1.0
}

/// Already parsed crystal structure: unit cell geometry and atomic sites
#[derive(Debug, Clone, PartialEq)]
#[derive(serde::Deserialize, serde::Serialize, schemars::JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct StructureData {
    /// Lengths of the unit cell vectors `[a, b, c]`, in Å
    pub lengths: [f64; 3],
    /// Angles of the unit cell `[alpha, beta, gamma]`, in radians
    pub angles: [f64; 3],
    /// All the sites in this structure, in the order they should be reported
    pub sites: Vec<SiteData>,
}

impl StructureData {
    /// Read a structure from its JSON representation
    pub fn from_json(json: &str) -> Result<StructureData, Error> {
        let structure = serde_json::from_str::<StructureData>(json)?;
        structure.validate()?;
        return Ok(structure);
    }

    /// Check that this structure makes sense: it must contain at least one
    /// site, labels must be unique, elements must be known, occupancies must
    /// be in (0, 1] and every site must have at least one position.
    pub fn validate(&self) -> Result<(), Error> {
        if self.sites.is_empty() {
            return Err(Error::InvalidParameter(
                "the structure must contain at least one site".into()
            ));
        }

        let mut labels = HashSet::new();
        for site in &self.sites {
            if !labels.insert(site.label.as_str()) {
                return Err(Error::InvalidParameter(format!(
                    "site label '{}' is used more than once", site.label
                )));
            }

            if !is_element(&site.element) {
                return Err(Error::InvalidParameter(format!(
                    "unknown element '{}' for site '{}'", site.element, site.label
                )));
            }

            if !(site.occupancy > 0.0 && site.occupancy <= 1.0 + OCCUPANCY_TOLERANCE) {
                return Err(Error::InvalidParameter(format!(
                    "occupancy of site '{}' must be in (0, 1], got {}", site.label, site.occupancy
                )));
            }

            if site.positions.is_empty() {
                return Err(Error::InvalidParameter(format!(
                    "site '{}' does not have any position", site.label
                )));
            }

            if site.positions.iter().flatten().any(|x| !x.is_finite()) {
                return Err(Error::InvalidParameter(format!(
                    "site '{}' contains non finite coordinates", site.label
                )));
            }
        }

        return Ok(());
    }

    /// Create the unit cell corresponding to this structure
    pub fn cell(&self) -> Result<UnitCell, Error> {
        UnitCell::new(self.lengths, self.angles)
    }

    /// Get the site with the given label
    pub fn site(&self, label: &str) -> Option<&SiteData> {
        self.sites.iter().find(|site| site.label == label)
    }

    /// Get the element of the site with the given label
    pub fn element_of(&self, label: &str) -> Result<&str, Error> {
        self.site(label)
            .map(|site| site.element.as_str())
            .ok_or_else(|| Error::UnknownSite(label.into()))
    }

    /// Get all the site labels, in input order
    pub fn labels(&self) -> Vec<&str> {
        self.sites.iter().map(|site| site.label.as_str()).collect()
    }

    /// Get the sorted set of elements in this structure
    pub fn unique_elements(&self) -> BTreeSet<&str> {
        self.sites.iter().map(|site| site.element.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn structure() -> StructureData {
        StructureData::from_json(r#"{
            "lengths": [4.0, 4.0, 4.0],
            "angles": [1.5707963267948966, 1.5707963267948966, 1.5707963267948966],
            "sites": [
                {"label": "Cs1", "element": "Cs", "positions": [[0, 0, 0]]},
                {"label": "Cl1", "element": "Cl", "occupancy": 0.5, "positions": [[0.5, 0.5, 0.5]]}
            ]
        }"#).unwrap()
    }

    #[test]
    fn from_json() {
        let structure = structure();
        assert_eq!(structure.labels(), ["Cs1", "Cl1"]);
        assert_eq!(structure.sites[0].occupancy, 1.0);
        assert_eq!(structure.sites[1].occupancy, 0.5);
        assert_eq!(structure.element_of("Cl1").unwrap(), "Cl");
        assert_eq!(structure.unique_elements().into_iter().collect::<Vec<_>>(), ["Cl", "Cs"]);

        let error = structure.element_of("Na1").unwrap_err();
        assert_eq!(error.to_string(), "unknown site label 'Na1'");

        let cell = structure.cell().unwrap();
        assert_eq!(cell.lengths(), [4.0, 4.0, 4.0]);
    }

    #[test]
    fn invalid_json() {
        let error = StructureData::from_json(r#"{"lengths": [1, 1, 1]}"#).unwrap_err();
        assert!(matches!(error, Error::Json(_)));

        let error = StructureData::from_json(r#"{
            "lengths": [1, 1, 1], "angles": [1.5, 1.5, 1.5], "sites": [], "extra": 3
        }"#).unwrap_err();
        assert!(error.to_string().contains("unknown field `extra`"));
    }

    #[test]
    fn validation() {
        let mut structure = structure();
        structure.sites[1].label = "Cs1".into();
        let error = structure.validate().unwrap_err();
        assert_eq!(error.to_string(), "invalid parameter: site label 'Cs1' is used more than once");

        let mut structure = self::structure();
        structure.sites[0].element = "Xx".into();
        assert!(structure.validate().is_err());

        let mut structure = self::structure();
        structure.sites[0].occupancy = 0.0;
        assert!(structure.validate().is_err());

        let mut structure = self::structure();
        structure.sites[0].positions.clear();
        let error = structure.validate().unwrap_err();
        assert_eq!(error.to_string(), "invalid parameter: site 'Cs1' does not have any position");

        let mut structure = self::structure();
        structure.sites.clear();
        assert!(structure.validate().is_err());
    }
}
