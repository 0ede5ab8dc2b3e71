//! Crystal structure input data, unit cell geometry and supercell
//! generation.

mod cell;
pub use self::cell::UnitCell;

mod elements;
pub use self::elements::{BondPair, ELEMENT_SYMBOLS, all_pairs, element_from_label, is_element};

mod structure;
pub use self::structure::{SiteData, StructureData};

mod mixing;
pub use self::mixing::{MixingTable, SiteMixing};

mod supercell;
pub use self::supercell::{ShellSelector, SupercellPoint, POSITION_DECIMALS};
pub use self::supercell::{build_supercell, check_structural_integrity, fractional_key};

#[cfg(test)]
pub(crate) mod test_utils;
