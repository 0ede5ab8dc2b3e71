use std::collections::BTreeMap;

use once_cell::sync::Lazy;

/// Radii of an element taken from the literature, in Å
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LiteratureRadius {
    /// Radius used in crystallographic information files
    pub cif: Option<f64>,
    /// Metallic radius from Pauling, for coordination number 12
    pub pauling_cn12: Option<f64>,
}

macro_rules! add_radius {
    ($map: expr, $element: literal, $cif: expr, $pauling: expr) => {
        $map.insert($element, LiteratureRadius {
            cif: Some($cif),
            pauling_cn12: Some($pauling),
        });
    };
}

static LITERATURE_RADII: Lazy<BTreeMap<&'static str, LiteratureRadius>> = Lazy::new(|| {
    let mut map = BTreeMap::new();
    add_radius!(map, "Si", 1.176, 1.316);
    add_radius!(map, "Sc", 1.641, 1.641);
    add_radius!(map, "Fe", 1.242, 1.274);
    add_radius!(map, "Co", 1.25, 1.252);
    add_radius!(map, "Ni", 1.246, 1.246);
    add_radius!(map, "Ga", 1.243, 1.411);
    add_radius!(map, "Ge", 1.225, 1.369);
    add_radius!(map, "Y", 1.783, 1.8);
    add_radius!(map, "Mo", 1.386, 1.4);
    add_radius!(map, "Ru", 1.324, 1.336);
    add_radius!(map, "Rh", 1.345, 1.342);
    add_radius!(map, "Pd", 1.376, 1.373);
    add_radius!(map, "Ag", 1.445, 1.445);
    add_radius!(map, "Cd", 1.568, 1.541);
    add_radius!(map, "In", 1.624, 1.66);
    add_radius!(map, "Sn", 1.563, 1.623);
    add_radius!(map, "Sb", 1.587, 1.59);
    add_radius!(map, "La", 1.871, 1.871);
    add_radius!(map, "Ce", 1.82, 1.818);
    add_radius!(map, "Pr", 1.824, 1.824);
    add_radius!(map, "Nd", 1.822, 1.818);
    add_radius!(map, "Sm", 1.804, 1.804);
    add_radius!(map, "Eu", 2.084, 1.984);
    add_radius!(map, "Gd", 1.801, 1.795);
    add_radius!(map, "Tb", 1.783, 1.773);
    add_radius!(map, "Dy", 1.774, 1.77);
    add_radius!(map, "Ho", 1.766, 1.761);
    add_radius!(map, "Er", 1.757, 1.748);
    add_radius!(map, "Tm", 1.746, 1.743);
    add_radius!(map, "Yb", 1.939, 1.933);
    add_radius!(map, "Lu", 1.735, 1.738);
    add_radius!(map, "Hf", 1.5635, 1.585);
    add_radius!(map, "Ta", 1.43, 1.47);
    add_radius!(map, "Os", 1.352, 1.35);
    add_radius!(map, "Ir", 1.357, 1.355);
    add_radius!(map, "Pt", 1.387, 1.385);
    add_radius!(map, "Au", 1.442, 1.439);
    add_radius!(map, "Al", 1.43, 1.43);
    add_radius!(map, "Th", 1.798, 1.795);
    add_radius!(map, "U", 1.377, 1.51);
    return map;
});

/// Get the literature radii of the given `element`, if they are known
pub fn literature_radius(element: &str) -> Option<LiteratureRadius> {
    LITERATURE_RADII.get(element).copied()
}

/// Get all the elements with known literature radii
pub fn known_elements() -> impl Iterator<Item = &'static str> {
    LITERATURE_RADII.keys().copied()
}
