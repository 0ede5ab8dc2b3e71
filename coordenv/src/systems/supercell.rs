use indexmap::IndexSet;

use crate::{Error, Vector3D};
use super::{StructureData, UnitCell};
use super::elements::element_from_label;

/// Number of decimals kept in the fractional coordinates of supercell
/// points. Points are compared after rounding to this precision.
pub const POSITION_DECIMALS: i32 = 5;

/// Which lattice translations to apply to the unit cell atoms when building
/// the supercell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[derive(serde::Deserialize, serde::Serialize, schemars::JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ShellSelector {
    /// Only the unit cell itself
    None,
    /// Translations by {0, 1} along each axis, for 8 images of the cell
    Positive,
    /// Translations by {-1, 0, 1} along each axis, for 27 images of the cell
    #[default]
    Full,
    /// Translations by {-n, ..., n} along each axis, for `(2n + 1)^3` images
    /// of the cell
    Extended(u32),
}

impl ShellSelector {
    /// Check that this selector describes at least one translation, and
    /// that all translations can be represented
    pub fn validate(&self) -> Result<(), Error> {
        if let ShellSelector::Extended(n) = *self {
            if n == 0 {
                return Err(Error::InvalidParameter(
                    "extended shells must contain at least one translation in each direction".into()
                ));
            }

            if i32::try_from(n).is_err() {
                return Err(Error::InvalidParameter(format!(
                    "extended shells can not contain more than {} translations in each direction, got {}",
                    i32::MAX, n
                )));
            }
        }
        return Ok(());
    }

    /// Get all the lattice translations corresponding to this selector
    pub fn translations(&self) -> Vec<[i32; 3]> {
        let range = match *self {
            ShellSelector::None => 0..=0,
            ShellSelector::Positive => 0..=1,
            ShellSelector::Full => -1..=1,
            ShellSelector::Extended(n) => {
                // values above i32::MAX are rejected by `validate`
                let n = i32::try_from(n).unwrap_or(i32::MAX);
                -n..=n
            }
        };

        let mut translations = Vec::new();
        for i in range.clone() {
            for j in range.clone() {
                for k in range.clone() {
                    translations.push([i, j, k]);
                }
            }
        }
        return translations;
    }

    /// Get the distance up to which all the periodic neighbors of an atom
    /// inside the unit cell are guaranteed to be part of the supercell.
    ///
    /// For centered shells of `n` translations, this is `(n - 1/2)` times the
    /// shortest distance between two faces of the cell. One-sided selectors
    /// do not give any guarantee, and their reach is 0.
    pub fn reach(&self, cell: &UnitCell) -> f64 {
        let shells = match *self {
            ShellSelector::None | ShellSelector::Positive => return 0.0,
            ShellSelector::Full => 1.0,
            ShellSelector::Extended(n) => n as f64,
        };

        let faces = cell.distances_between_faces();
        let shortest = f64::min(faces[0], f64::min(faces[1], faces[2]));
        return f64::max(shells - 0.5, 0.0) * shortest;
    }
}

/// A point in the supercell: fractional coordinates rounded to
/// `POSITION_DECIMALS`, and the label of the corresponding site.
///
/// Two points are equal if they have the same label and the same rounded
/// coordinates.
#[derive(Debug, Clone)]
#[derive(serde::Serialize)]
pub struct SupercellPoint {
    /// rounded fractional coordinates of this point
    pub position: Vector3D,
    /// label of the site this point belongs to
    pub label: String,
    /// integer version of the rounded coordinates, used for comparisons
    #[serde(skip)]
    key: [i64; 3],
}

impl SupercellPoint {
    /// Create a new point, rounding the `position` to `POSITION_DECIMALS`
    pub fn new(position: Vector3D, label: &str) -> SupercellPoint {
        let key = fractional_key(position);
        let scale = 10_f64.powi(POSITION_DECIMALS);
        let position = Vector3D::new(
            key[0] as f64 / scale,
            key[1] as f64 / scale,
            key[2] as f64 / scale,
        );

        SupercellPoint {
            position: position,
            label: label.into(),
            key: key,
        }
    }

    /// Get the integer key used to compare rounded coordinates
    pub fn key(&self) -> [i64; 3] {
        self.key
    }
}

impl PartialEq for SupercellPoint {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.label == other.label
    }
}

impl Eq for SupercellPoint {}

impl std::hash::Hash for SupercellPoint {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.key.hash(state);
        self.label.hash(state);
    }
}

/// Get the integer key corresponding to fractional coordinates rounded to
/// `POSITION_DECIMALS`
pub fn fractional_key(position: Vector3D) -> [i64; 3] {
    let scale = 10_f64.powi(POSITION_DECIMALS);
    [
        (position[0] * scale).round() as i64,
        (position[1] * scale).round() as i64,
        (position[2] * scale).round() as i64,
    ]
}

/// Check that the element implied by every site label matches the element
/// declared for this site.
pub fn check_structural_integrity(structure: &StructureData) -> Result<(), Error> {
    for site in &structure.sites {
        let implied = element_from_label(&site.label);
        if implied != Some(site.element.as_str()) {
            return Err(Error::StructuralIntegrity {
                label: site.label.clone(),
                declared: site.element.clone(),
                implied: implied.map(String::from),
            });
        }
    }
    return Ok(());
}

/// Build the set of supercell points for the given `structure`, applying
/// all the translations described by `shells` to every position of every
/// site.
///
/// Points are deduplicated after rounding, and returned in the order they
/// are first generated: sites in input order, then positions, then
/// translations.
#[time_graph::instrument(name = "build_supercell")]
pub fn build_supercell(structure: &StructureData, shells: ShellSelector) -> Result<Vec<SupercellPoint>, Error> {
    check_structural_integrity(structure)?;
    shells.validate()?;

    let translations = shells.translations();

    let mut points = IndexSet::new();
    for site in &structure.sites {
        for &position in &site.positions {
            let position = Vector3D::from(position);
            for translation in &translations {
                let shift = Vector3D::new(
                    translation[0] as f64,
                    translation[1] as f64,
                    translation[2] as f64,
                );
                points.insert(SupercellPoint::new(position + shift, &site.label));
            }
        }
    }

    return Ok(points.into_iter().collect());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::systems::SiteData;
    use crate::systems::test_utils::test_structure;

    use approx::assert_relative_eq;

    #[test]
    fn translations() {
        assert_eq!(ShellSelector::None.translations(), [[0, 0, 0]]);
        assert_eq!(ShellSelector::Positive.translations().len(), 8);
        assert_eq!(ShellSelector::Full.translations().len(), 27);
        assert_eq!(ShellSelector::Extended(2).translations().len(), 125);
        assert_eq!(ShellSelector::default(), ShellSelector::Full);

        assert!(ShellSelector::Extended(0).validate().is_err());
        assert!(ShellSelector::Extended(1).validate().is_ok());

        let error = ShellSelector::Extended(u32::MAX).validate().unwrap_err();
        assert_eq!(error.to_string(), format!(
            "invalid parameter: extended shells can not contain more than 2147483647 translations in each direction, got {}",
            u32::MAX
        ));
        assert!(ShellSelector::Extended(i32::MAX as u32).validate().is_ok());

        let structure = test_structure("CsCl");
        assert!(build_supercell(&structure, ShellSelector::Extended(u32::MAX)).is_err());
    }

    #[test]
    fn reach() {
        let cell = UnitCell::orthorhombic(4.0, 6.0, 8.0).unwrap();
        assert_eq!(ShellSelector::None.reach(&cell), 0.0);
        assert_eq!(ShellSelector::Positive.reach(&cell), 0.0);
        assert_relative_eq!(ShellSelector::Full.reach(&cell), 2.0, epsilon = 1e-12);
        assert_relative_eq!(ShellSelector::Extended(3).reach(&cell), 10.0, epsilon = 1e-12);
    }

    #[test]
    fn rounding() {
        let a = SupercellPoint::new(Vector3D::new(0.333333, -0.666667, 1.0), "Rh1");
        let b = SupercellPoint::new(Vector3D::new(0.3333329, -0.6666671, 1.000001), "Rh1");
        let c = SupercellPoint::new(Vector3D::new(0.333333, -0.666667, 1.0), "Rh2");

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.key(), [33333, -66667, 100000]);
        assert_eq!(a.position, Vector3D::new(0.33333, -0.66667, 1.0));
    }

    #[test]
    fn urhin() {
        let structure = test_structure("URhIn");

        let unit_cell = build_supercell(&structure, ShellSelector::None).unwrap();
        assert_eq!(unit_cell.len(), 22);
        assert_eq!(unit_cell[0].label, "In1");
        assert_eq!(unit_cell[0].position, Vector3D::new(-0.2505, -0.2505, 0.5));

        let supercell = build_supercell(&structure, ShellSelector::Full).unwrap();
        assert_eq!(supercell.len(), 336);
        for point in &unit_cell {
            assert!(supercell.contains(point));
        }
    }

    #[test]
    fn duplicated_points() {
        let structure = StructureData {
            lengths: [3.0, 3.0, 3.0],
            angles: [std::f64::consts::FRAC_PI_2; 3],
            sites: vec![
                SiteData {
                    label: "Fe1".into(),
                    element: "Fe".into(),
                    occupancy: 1.0,
                    positions: vec![[0.0, 0.0, 0.0], [0.5, 0.5, 0.5]],
                },
                SiteData {
                    label: "Si1".into(),
                    element: "Si".into(),
                    occupancy: 1.0,
                    positions: vec![[0.5, 0.0, 0.0]],
                },
            ],
        };

        // (0, 0, 0) + (1, 0, 0) and (1, 0, 0) + (0, 0, 0) are the same point
        let positive = build_supercell(&structure, ShellSelector::Positive).unwrap();
        assert_eq!(positive.len(), 3 * 8);

        let full = build_supercell(&structure, ShellSelector::Full).unwrap();
        assert_eq!(full.len(), 3 * 27);

        let mut structure = structure;
        structure.sites[1].positions.push([-0.5, 0.0, 0.0]);
        let full = build_supercell(&structure, ShellSelector::Full).unwrap();
        // x in {-1.5, -0.5, 0.5, 1.5} for Si1
        assert_eq!(full.len(), 2 * 27 + 4 * 9);

        let extended = build_supercell(&structure, ShellSelector::Extended(2)).unwrap();
        assert_eq!(extended.len(), 2 * 125 + 6 * 25);
    }

    #[test]
    fn integrity() {
        let mut structure = test_structure("URhIn");
        structure.sites[3].element = "Rh".into();

        let error = build_supercell(&structure, ShellSelector::Full).unwrap_err();
        match error {
            Error::StructuralIntegrity { label, declared, implied } => {
                assert_eq!(label, "U1");
                assert_eq!(declared, "Rh");
                assert_eq!(implied.as_deref(), Some("U"));
            }
            _ => panic!("unexpected error: {}", error),
        }

        let mut structure = test_structure("URhIn");
        structure.sites[0].label = "X1".into();
        let error = build_supercell(&structure, ShellSelector::None).unwrap_err();
        assert_eq!(
            error.to_string(),
            "could not find an element in the label of site 'X1' (declared as In)"
        );
    }
}
