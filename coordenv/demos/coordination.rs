use coordenv::{AnalysisOptions, CoordinationAnalysis, StructureData};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // print warnings emitted during the analysis
    coordenv::logging::set_logging_callback(|level, message| {
        eprintln!("[{}] {}", level, message);
    });

    // load the structure from command line argument, as JSON
    let path = std::env::args().nth(1).expect("expected a command line argument");
    let structure = StructureData::from_json(&std::fs::read_to_string(path)?)?;

    // options can also be given as JSON, all fields have a default value
    let options = AnalysisOptions::from_json(r#"{
        "cutoff": 10.0,
        "shells": "full",
        "refinement": "adjacent_pairs"
    }"#)?;

    let analysis = CoordinationAnalysis::new(structure, options)?;
    println!(
        "{} atoms in the unit cell, {} atoms in the supercell",
        analysis.unit_cell_atom_count(),
        analysis.supercell_atom_count(),
    );

    // the best method is selected for each site, based on the largest gap
    // in the normalized distances to neighbors
    let selection = analysis.best_methods()?;
    for (label, best) in &selection.sites {
        println!(
            "{:>6}: CN = {:>2} using {} (gap = {:.3}, up to {:.3} Å)",
            label, best.cn, best.method, best.max_gap, best.cutoff_distance
        );
    }
    for label in &selection.undetermined {
        println!("{:>6}: could not determine the coordination number", label);
    }

    // all the output types can be serialized
    let statistics = analysis.best_statistics()?;
    println!("{}", serde_json::to_string_pretty(statistics)?);

    Ok(())
}
