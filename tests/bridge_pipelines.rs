#![warn(clippy::pedantic)]

use std::path::Path;

use approx::assert_relative_eq;
use girderviz::{
    run_bridge_model, run_girder_diagram, BridgeConfig, ForceKind, GirderChain, MissingData,
    PipelineError,
};
use serde_json::{json, Value};

/// Two girders of three elements over a 7.5 m span, tied at both ends.
fn write_geometry(path: &Path) {
    let geometry = json!({
        "nodes": {
            "1": [0.0, 0.0, 0.0], "2": [2.5, 0.0, 0.0], "3": [5.0, 0.0, 0.0], "4": [7.5, 0.0, 0.0],
            "5": [0.0, 0.0, 2.0], "6": [2.5, 0.0, 2.0], "7": [5.0, 0.0, 2.0], "8": [7.5, 0.0, 2.0]
        },
        "members": {
            "101": [1, 2], "102": [2, 3], "103": [3, 4],
            "201": [5, 6], "202": [6, 7], "203": [7, 8],
            "301": [1, 5], "302": [4, 8]
        }
    });
    std::fs::write(path, geometry.to_string()).expect("geometry written");
}

/// End forces `[Mz_i, Mz_j, Vy_i, Vy_j]` for the girder elements.
fn write_dataset(path: &Path, elements: &[(u32, [f64; 4])]) {
    let dataset = json!({
        "dims": {"Element": elements.len(), "Component": 4},
        "attrs": {},
        "coords": {
            "Element": {"dims": ["Element"], "attrs": {}, "data": elements.iter().map(|(id, _)| id).collect::<Vec<_>>()},
            "Component": {"dims": ["Component"], "attrs": {}, "data": ["Mz_i", "Mz_j", "Vy_i", "Vy_j"]}
        },
        "data_vars": {
            "forces": {
                "dims": ["Element", "Component"],
                "attrs": {},
                "data": elements.iter().map(|(_, values)| values.to_vec()).collect::<Vec<_>>()
            }
        }
    });
    std::fs::write(path, dataset.to_string()).expect("dataset written");
}

const FORCES: [(u32, [f64; 4]); 6] = [
    (101, [0.0, 150.0, 60.0, 40.0]),
    (102, [150.0, 150.0, 0.0, 0.0]),
    (103, [150.0, 0.0, -40.0, -60.0]),
    (201, [0.0, 120.0, 48.0, 30.0]),
    (202, [120.0, 120.0, 0.0, 0.0]),
    (203, [120.0, 0.0, -30.0, -48.0]),
];

fn config_in(directory: &Path) -> BridgeConfig {
    BridgeConfig {
        dataset: directory.join("screening_task.json"),
        geometry: directory.join("bridge_geometry.json"),
        girders: vec![
            GirderChain::new("Girder A", vec![101, 102, 103]),
            GirderChain::new("Girder B", vec![201, 202, 203]),
        ],
        reference_girder: "Girder A".to_owned(),
        span: 7.5,
        scale_factor: 0.5,
        continuity_tolerance: 1.0e-6,
        diagram_output: directory.join("2d_images").join("Task1_2D_Results.png"),
        model_output: directory.join("3d_view").join("Interactive_Bridge_Model.html"),
        show: false,
    }
}

fn prepared_directory(forces: &[(u32, [f64; 4])]) -> (tempfile::TempDir, BridgeConfig) {
    let directory = tempfile::tempdir().expect("temporary directory");
    let config = config_in(directory.path());
    write_geometry(&config.geometry);
    write_dataset(&config.dataset, forces);
    (directory, config)
}

#[test]
fn bridge_model_exports_toggleable_scene() {
    let (directory, config) = prepared_directory(&FORCES);
    std::fs::create_dir(directory.path().join("3d_view")).expect("output directory");

    let outcome = run_bridge_model(&config).expect("model exports");

    assert_eq!(outcome.scene.traces.len(), 5);
    assert_eq!(
        outcome.scene.visibility(ForceKind::Moment),
        vec![true, true, true, false, false]
    );
    assert_eq!(
        outcome.scene.visibility(ForceKind::Shear),
        vec![true, false, false, true, true]
    );

    let figure: Value =
        serde_json::from_str(&outcome.scene.figure().to_json()).expect("figure encodes");
    let frame = &figure["data"][0];
    assert_eq!(frame["x"].as_array().map(Vec::len), Some(8 * 3));
    let girder_a_moment = &figure["data"][1];
    assert_eq!(girder_a_moment["name"], "Girder A (Mz)");
    let xs = girder_a_moment["x"].as_array().expect("x coordinates");
    assert_eq!(xs.len(), 3 * 5);
    assert_eq!(xs.iter().filter(|x| x.is_null()).count(), 3);
    assert_eq!(
        girder_a_moment["text"].as_array().map(Vec::len),
        Some(3 * 5)
    );
    assert_eq!(girder_a_moment["y"][2], 75.0);
    assert_eq!(girder_a_moment["y"][0], 0.0);
    assert_eq!(figure["data"][4]["text"][12], "Elem 203<br>Val: -48.00 kN");

    let html = std::fs::read_to_string(&outcome.output).expect("document readable");
    assert!(html.contains("Girder B (Vy)"));
    assert!(html.contains("3D Shear Force Diagram (Vy)"));
    assert!(!html.contains("<script src=\"http"));
}

#[test]
fn bridge_model_is_deterministic() {
    let (directory, config) = prepared_directory(&FORCES);
    std::fs::create_dir(directory.path().join("3d_view")).expect("output directory");

    run_bridge_model(&config).expect("first export");
    let first = std::fs::read(&config.model_output).expect("first document");
    run_bridge_model(&config).expect("second export");
    let second = std::fs::read(&config.model_output).expect("second document");
    assert_eq!(first, second);
}

#[test]
fn bridge_model_needs_existing_output_directory() {
    let (_directory, config) = prepared_directory(&FORCES);

    let error = run_bridge_model(&config).expect_err("missing directory rejected");
    assert!(matches!(error, PipelineError::Export(_)));
    assert!(!config.model_output.exists());
}

#[test]
fn missing_element_aborts_model_without_output() {
    let (directory, config) = prepared_directory(&FORCES[..5]);
    std::fs::create_dir(directory.path().join("3d_view")).expect("output directory");

    let error = run_bridge_model(&config).expect_err("element 203 is absent");
    assert!(matches!(
        error,
        PipelineError::MissingData(MissingData::Element(203))
    ));
    assert!(!config.model_output.exists());
}

#[test]
fn girder_diagram_renders_reference_girder() {
    let (directory, config) = prepared_directory(&FORCES);

    let outcome = run_girder_diagram(&config).expect("diagram renders");

    let diagram = &outcome.diagram;
    assert_eq!(diagram.girder, "Girder A");
    assert_eq!(diagram.moment.len(), 6);
    assert_eq!(diagram.shear.len(), 6);
    assert_relative_eq!(diagram.element_length, 2.5);
    assert_eq!(diagram.moment.points[3], (5.0, 150.0));
    assert!(diagram.moment.discontinuities(1.0e-6).is_empty());

    assert!(outcome.output.is_file());
    let leftovers: Vec<_> = std::fs::read_dir(directory.path().join("2d_images"))
        .expect("image directory created")
        .filter_map(Result::ok)
        .map(|entry| entry.file_name())
        .collect();
    assert_eq!(leftovers, vec![std::ffi::OsString::from("Task1_2D_Results.png")]);
}

#[test]
fn missing_component_aborts_diagram_without_output() {
    let directory = tempfile::tempdir().expect("temporary directory");
    let config = config_in(directory.path());
    let dataset = json!({
        "coords": {
            "Element": {"data": [101, 102, 103]},
            "Component": {"data": ["Mz_i", "Mz_j", "Vy_i"]}
        },
        "data_vars": {
            "forces": {
                "dims": ["Element", "Component"],
                "data": [[0.0, 1.0, 2.0], [1.0, 1.0, 0.0], [1.0, 0.0, -2.0]]
            }
        }
    });
    std::fs::write(&config.dataset, dataset.to_string()).expect("dataset written");

    let error = run_girder_diagram(&config).expect_err("Vy_j is absent");
    assert!(matches!(
        error,
        PipelineError::MissingData(MissingData::Component(ref tag)) if tag == "Vy_j"
    ));
    assert!(!config.diagram_output.exists());
}
