use super::{SiteData, StructureData};

pub fn test_structure(name: &str) -> StructureData {
    match name {
        "URhIn" => get_urhin(),
        "CsCl" => get_cscl(),
        _ => panic!("unknown test structure {}", name)
    }
}

fn site(label: &str, element: &str, positions: &[[f64; 3]]) -> SiteData {
    SiteData {
        label: label.into(),
        element: element.into(),
        occupancy: 1.0,
        positions: positions.to_vec(),
    }
}

/// URhIn, ZrNiAl structure type (hexagonal, P-62m). The positions are
/// already expanded by symmetry, with coordinates in (-1, 1).
fn get_urhin() -> StructureData {
    let right = std::f64::consts::FRAC_PI_2;
    StructureData {
        lengths: [7.476, 7.476, 3.881],
        angles: [right, right, 2.0 * std::f64::consts::FRAC_PI_3],
        sites: vec![
            site("In1", "In", &[
                [-0.2505, -0.2505, 0.5],
                [0.0, 0.2505, 0.5],
                [0.2505, 0.0, 0.5],
                [-0.2505, -0.2505, -0.5],
                [0.0, 0.2505, -0.5],
                [0.2505, 0.0, -0.5],
            ]),
            site("Rh1", "Rh", &[
                [0.33333, -0.33333, -0.5],
                [0.66667, 0.33333, -0.5],
                [0.33333, 0.66667, -0.5],
                [-0.33333, 0.33333, 0.5],
                [-0.66667, -0.33333, 0.5],
                [-0.33333, -0.66667, -0.5],
                [-0.33333, -0.66667, 0.5],
                [-0.66667, -0.33333, -0.5],
                [0.33333, -0.33333, 0.5],
                [-0.33333, 0.33333, -0.5],
                [0.66667, 0.33333, 0.5],
                [0.33333, 0.66667, 0.5],
            ]),
            site("Rh2", "Rh", &[[0.0, 0.0, 0.0]]),
            site("U1", "U", &[
                [0.5925, 0.0, 0.0],
                [-0.5925, -0.5925, 0.0],
                [0.0, 0.5925, 0.0],
            ]),
        ],
    }
}

/// CsCl structure, with a cubic cell of side 4.12 Å
fn get_cscl() -> StructureData {
    let right = std::f64::consts::FRAC_PI_2;
    StructureData {
        lengths: [4.12, 4.12, 4.12],
        angles: [right, right, right],
        sites: vec![
            site("Cs1", "Cs", &[[0.0, 0.0, 0.0]]),
            site("Cl1", "Cl", &[[0.5, 0.5, 0.5]]),
        ],
    }
}
