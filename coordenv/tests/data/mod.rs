#![allow(dead_code)]

use coordenv::{AnalysisOptions, CoordinationAnalysis, StructureData};

pub fn load_structure(name: &str) -> StructureData {
    let json = std::fs::read_to_string(format!("tests/data/{}.json", name))
        .expect("failed to read input file");

    StructureData::from_json(&json).expect("invalid structure")
}

pub fn load_analysis(name: &str, options: &str) -> CoordinationAnalysis {
    let options = AnalysisOptions::from_json(options).expect("invalid options");
    CoordinationAnalysis::new(load_structure(name), options).expect("failed to start the analysis")
}
