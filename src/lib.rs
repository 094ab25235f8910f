#![warn(clippy::all)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_doc_code_examples)]
#![warn(clippy::missing_docs_in_private_items)]
#![doc = include_str!("../README.md")]

pub mod chart;
pub mod config;
pub mod curtain;
pub mod diagram;
pub mod errors;
pub mod figure;
pub mod geometry;
pub mod model;
pub mod pipeline;
pub mod report;
pub mod results;
pub mod scene;
pub mod viewer;

/// Identifier of an element (member) shared by the dataset and the member table.
pub type ElementId = u32;
/// Identifier of a structural node.
pub type NodeId = u32;

pub use chart::render_diagram_png;
pub use config::{BridgeConfig, GirderChain, CONFIG_FILE};
pub use curtain::{build_curtain, Curtain, CurtainSegment};
pub use diagram::{build_longitudinal_diagram, Discontinuity, LongitudinalDiagram, PlotSeries};
pub use errors::{ConfigError, ExportError, LoadError, MissingData, ModelError, PipelineError};
pub use figure::{line_trace, LineStyle};
pub use geometry::{point, Point, Polyline};
pub use model::BridgeModel;
pub use pipeline::{
    run_bridge_model, run_bridge_model_with, run_girder_diagram, run_girder_diagram_with,
    DiagramOutcome, ModelOutcome,
};
pub use report::render_summary;
pub use results::{Component, ElementEnd, ForceDataset, ForceKind, ResultsStore};
pub use scene::{Scene, SceneTrace, TraceGroup};
pub use viewer::{open_in_viewer, open_or_warn};
