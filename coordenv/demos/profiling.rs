use coordenv::{AnalysisOptions, CoordinationAnalysis, StructureData};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::args().nth(1).expect("expected a command line argument");

    // enable collection of profiling data
    time_graph::enable_data_collection(true);
    // clear any existing collected data
    time_graph::clear_collected_data();

    // run the analysis
    analyze(&path)?;

    // get the call graph and display it
    let graph = time_graph::get_full_graph();
    // (this requires the "table" feature for the time_graph crate)
    println!("{}", graph.as_short_table());

    // also available for saving profiling data to the disk & future analysis
    // (this requires the "json" feature for the time_graph crate)
    println!("{}", graph.as_json());

    Ok(())
}

/// Run the full analysis of a structure, this is the same code as the
/// 'coordination' example
fn analyze(path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let structure = StructureData::from_json(&std::fs::read_to_string(path)?)?;

    time_graph::spanned!("Full analysis", {
        let options = AnalysisOptions {
            shells: coordenv::systems::ShellSelector::Extended(2),
            ..Default::default()
        };
        let analysis = CoordinationAnalysis::new(structure, options)?;
        analysis.best_statistics()?;
        analysis.min_distance_statistics()?;
    });

    Ok(())
}
