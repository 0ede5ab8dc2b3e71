use std::collections::BTreeMap;

use approx::assert_relative_eq;

use coordenv::{CnMethod, CoordinationAnalysis};
use coordenv::radius::RadiusSource;
use coordenv::systems::{BondPair, ShellSelector, SiteMixing};

mod data;

fn bonds(counts: &[(&str, &str, usize)]) -> BTreeMap<BondPair, usize> {
    counts.iter().map(|&(a, b, count)| (BondPair::new(a, b), count)).collect()
}

fn cn_per_site(analysis: &CoordinationAnalysis) -> Vec<(String, usize)> {
    analysis.best_methods().unwrap().sites.iter()
        .map(|(label, best)| (label.clone(), best.cn))
        .collect()
}

#[test]
fn supercell() {
    let analysis = data::load_analysis("URhIn", "{}");
    assert_eq!(analysis.unit_cell_atom_count(), 22);
    assert_eq!(analysis.supercell_atom_count(), 336);

    assert_eq!(analysis.mixing().structure, SiteMixing::FullOccupancy);
    assert_relative_eq!(analysis.cell().volume(), 187.8507, epsilon = 1e-3);
}

#[test]
fn shortest_distances() {
    let analysis = data::load_analysis("URhIn", "{}");

    let shortest = analysis.shortest_distances().unwrap();
    let expected = [
        ("In", "In", 3.244), ("In", "Rh", 2.697), ("In", "U", 3.21),
        ("Rh", "Rh", 3.881), ("Rh", "U", 2.983), ("U", "U", 3.881),
    ];
    assert_eq!(shortest.len(), expected.len());
    for (a, b, distance) in expected {
        assert_eq!(shortest[&BondPair::new(a, b)], distance);
    }

    let neighbors = analysis.shortest_neighbors().unwrap();
    assert_eq!(neighbors["In1"].label, "Rh2");
    assert_eq!(neighbors["In1"].distance, 2.697);
    assert_eq!(neighbors["Rh2"].label, "In1");
    assert_eq!(neighbors["U1"].label, "Rh1");
    assert_eq!(neighbors["U1"].distance, 2.983);

    let flattened = analysis.flattened_connections().unwrap();
    assert_eq!(flattened[0], (BondPair::new("In", "Rh"), 2.697));
    assert!(flattened.windows(2).all(|w| w[0].1 <= w[1].1));
}

#[test]
fn radii() {
    let analysis = data::load_analysis("URhIn", "{}");

    let radii = analysis.radii().unwrap();
    assert!(radii.is_available(RadiusSource::Cif));
    assert!(radii.is_available(RadiusSource::PaulingCn12));
    assert!(radii.is_available(RadiusSource::CifRefined));

    assert_relative_eq!(radii.radius("In", RadiusSource::CifRefined).unwrap(), 1.32835, epsilon = 1e-5);
    assert_relative_eq!(radii.radius("Rh", RadiusSource::CifRefined).unwrap(), 1.36865, epsilon = 1e-5);
    assert_relative_eq!(radii.radius("U", RadiusSource::CifRefined).unwrap(), 1.61435, epsilon = 1e-5);

    let sums = analysis.radius_sums().unwrap();
    assert_eq!(sums.sources().count(), 4);
    assert_eq!(sums.sum(RadiusSource::Cif, "In", "In"), Some(3.248));
    assert_eq!(sums.sum(RadiusSource::Cif, "Rh", "In"), Some(2.969));
    assert_eq!(sums.sum(RadiusSource::Cif, "U", "U"), Some(2.754));
    assert_eq!(sums.sum(RadiusSource::PaulingCn12, "In", "U"), Some(3.17));
    assert_eq!(sums.sum(RadiusSource::ShortestDistance, "U", "Rh"), Some(2.983));
    assert_eq!(sums.sum(RadiusSource::CifRefined, "In", "Rh"), Some(2.697));
}

#[test]
fn gaps() {
    let analysis = data::load_analysis("URhIn", "{}");
    let gaps = analysis.gaps().unwrap();

    let expected = [
        ("In1", [(CnMethod::ShortestDistance, 0.3055, 14), (CnMethod::CifRadiusSum, 0.3264, 14), (CnMethod::CifRadiusRefinedSum, 0.2839, 14), (CnMethod::PaulingRadiusSum, 0.3193, 14)]),
        ("Rh1", [(CnMethod::ShortestDistance, 0.3145, 9), (CnMethod::CifRadiusSum, 0.3465, 9), (CnMethod::CifRadiusRefinedSum, 0.3601, 9), (CnMethod::PaulingRadiusSum, 0.3997, 9)]),
        ("Rh2", [(CnMethod::ShortestDistance, 0.3096, 9), (CnMethod::CifRadiusSum, 0.3237, 9), (CnMethod::CifRadiusRefinedSum, 0.3969, 9), (CnMethod::PaulingRadiusSum, 0.378, 9)]),
        ("U1", [(CnMethod::ShortestDistance, 0.1968, 11), (CnMethod::CifRadiusSum, 0.2902, 11), (CnMethod::CifRadiusRefinedSum, 0.2695, 17), (CnMethod::PaulingRadiusSum, 0.2536, 17)]),
    ];

    for (label, methods) in expected {
        let site = &gaps[label];
        assert_eq!(site.len(), 4);
        for (method, max_gap, cn) in methods {
            assert_eq!(site[&method].cn, cn, "wrong CN for {} with {}", label, method);
            assert_relative_eq!(site[&method].max_gap, max_gap, epsilon = 1e-3);
        }
    }
}

#[test]
fn best_methods() {
    let analysis = data::load_analysis("URhIn", "{}");
    let selection = analysis.best_methods().unwrap();
    assert!(selection.undetermined.is_empty());

    let methods = selection.sites.iter()
        .map(|(label, best)| (label.as_str(), best.method))
        .collect::<Vec<_>>();
    assert_eq!(methods, [
        ("In1", CnMethod::CifRadiusSum),
        ("Rh1", CnMethod::PaulingRadiusSum),
        ("Rh2", CnMethod::CifRadiusRefinedSum),
        ("U1", CnMethod::CifRadiusSum),
    ]);

    assert_eq!(selection.get("In1").unwrap().cutoff_distance, 3.881);
    assert_eq!(selection.get("Rh2").unwrap().cutoff_distance, 3.046);
    assert_eq!(selection.get("U1").unwrap().cutoff_distance, 3.294);

    let expected = [("In1", 14), ("Rh1", 9), ("Rh2", 9), ("U1", 11)];
    let cn = cn_per_site(&analysis);
    assert_eq!(cn, expected.map(|(label, cn)| (label.to_string(), cn)));
}

#[test]
fn bond_statistics() {
    let analysis = data::load_analysis("URhIn", "{}");

    for statistics in [analysis.min_distance_statistics().unwrap(), analysis.best_statistics().unwrap()] {
        assert_eq!(statistics.cn_per_site.values().copied().collect::<Vec<_>>(), [14, 9, 9, 11]);

        let per_site = &statistics.bond_counts_per_site;
        assert_eq!(per_site["In1"], bonds(&[("In", "In", 4), ("In", "Rh", 4), ("In", "U", 6)]));
        assert_eq!(per_site["Rh1"], bonds(&[("In", "Rh", 3), ("Rh", "U", 6)]));
        assert_eq!(per_site["Rh2"], bonds(&[("In", "Rh", 6), ("Rh", "U", 3)]));
        assert_eq!(per_site["U1"], bonds(&[("In", "U", 6), ("Rh", "U", 5)]));

        assert_eq!(statistics.bond_counts, bonds(&[
            ("In", "In", 4), ("In", "Rh", 13), ("In", "U", 12), ("Rh", "U", 14)
        ]));

        let total = statistics.bond_fractions.values().sum::<f64>();
        assert_relative_eq!(total, 1.0, epsilon = 1e-12);
        assert_relative_eq!(statistics.bond_fractions[&BondPair::new("Rh", "U")], 14.0 / 43.0);

        assert_eq!(statistics.average_cn, Some(10.75));
        assert_eq!(statistics.unique_cn.iter().copied().collect::<Vec<_>>(), [9, 11, 14]);
        assert_eq!(statistics.min_cn, Some(9));
        assert_eq!(statistics.max_cn, Some(14));
        assert!(statistics.undetermined.is_empty());
    }
}

#[test]
fn polyhedron() {
    let analysis = data::load_analysis("URhIn", "{}");

    let polyhedron = analysis.polyhedron("U1").unwrap();
    assert_eq!(polyhedron.center.label, "U1");
    assert_eq!(polyhedron.vertices.len(), 11);
    assert_eq!(polyhedron.vertices.iter().filter(|v| v.label == "In1").count(), 6);

    let (coordinates, labels) = polyhedron.coordinates_and_labels();
    assert_eq!(coordinates.len(), 12);
    assert_eq!(labels.last().map(String::as_str), Some("U1"));

    // vertices are at the right distance from the center
    let center = polyhedron.center.position;
    let best = analysis.best_methods().unwrap().get("U1").unwrap().cutoff_distance;
    for vertex in &polyhedron.vertices {
        let distance = (vertex.position - center).norm();
        assert!(distance <= best + 1e-3);
    }
}

#[test]
fn refinement_strategies() {
    let analysis = data::load_analysis("URhIn", r#"{"refinement": "all_pairs"}"#);

    let radii = analysis.radii().unwrap();
    assert_relative_eq!(radii.radius("In", RadiusSource::CifRefined).unwrap(), 1.4842, epsilon = 1e-6);
    assert_relative_eq!(radii.radius("Rh", RadiusSource::CifRefined).unwrap(), 1.6936, epsilon = 1e-6);
    assert_relative_eq!(radii.radius("U", RadiusSource::CifRefined).unwrap(), 1.7962, epsilon = 1e-6);

    let gaps = analysis.gaps().unwrap();
    assert_eq!(gaps["In1"][&CnMethod::CifRadiusRefinedSum].cn, 12);
    assert_eq!(gaps["U1"][&CnMethod::CifRadiusRefinedSum].cn, 17);

    // the refined radii are never selected with this strategy, but the
    // coordination numbers stay the same
    let selection = analysis.best_methods().unwrap();
    assert_eq!(selection.get("Rh2").unwrap().method, CnMethod::PaulingRadiusSum);
    assert!(selection.sites.values().all(|best| best.method != CnMethod::CifRadiusRefinedSum));

    let default = data::load_analysis("URhIn", "{}");
    assert_eq!(cn_per_site(&analysis), cn_per_site(&default));
}

#[test]
fn shells() {
    let full = data::load_analysis("URhIn", r#"{"cutoff": 6.0}"#);
    let extended = data::load_analysis("URhIn", r#"{"cutoff": 6.0, "shells": {"extended": 2}}"#);

    assert_eq!(extended.options().shells, ShellSelector::Extended(2));
    assert_eq!(extended.unit_cell_atom_count(), 22);
    assert!(extended.supercell_atom_count() > full.supercell_atom_count());

    assert_eq!(full.shortest_distances().unwrap(), extended.shortest_distances().unwrap());
    assert_eq!(cn_per_site(&full), cn_per_site(&extended));
    assert_eq!(
        full.min_distance_statistics().unwrap().bond_counts,
        extended.min_distance_statistics().unwrap().bond_counts,
    );
}

#[test]
fn cutoff_changes() {
    let mut analysis = data::load_analysis("URhIn", "{}");
    let before = cn_per_site(&analysis);

    analysis.set_cutoff(5.0).unwrap();
    assert_eq!(analysis.connections().unwrap().cutoff(), 5.0);
    assert!(analysis.connections().unwrap().iter().all(|site| {
        site.neighbors.iter().all(|c| c.distance <= 5.0)
    }));
    assert_eq!(cn_per_site(&analysis), before);
}
