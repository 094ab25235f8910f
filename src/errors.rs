//! Error types produced while loading, querying and exporting bridge results.

use std::path::PathBuf;

use thiserror::Error;

use crate::results::Component;
use crate::{ElementId, NodeId};

/// Error returned when a lookup finds no data for the requested key.
///
/// Structural force data is never substituted with a default, so every
/// variant aborts the pipeline that raised it.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum MissingData {
    /// Returned when an element is not a label of the results dataset.
    #[error("element {0} is not present in the results dataset")]
    Element(ElementId),
    /// Returned when a component tag is unknown or absent from the dataset.
    #[error("component '{0}' is not present in the results dataset")]
    Component(String),
    /// Returned when the dataset has the labels but no recorded value.
    #[error("no value recorded for element {element}, component {component}")]
    Value {
        /// Element that was queried.
        element: ElementId,
        /// Component that was queried.
        component: Component,
    },
    /// Returned when a node is not part of the node table.
    #[error("node {0} is not present in the node table")]
    Node(NodeId),
    /// Returned when an element is not part of the member table.
    #[error("element {0} is not present in the member table")]
    Member(ElementId),
}

/// Error returned when assembling a [`BridgeModel`](crate::BridgeModel).
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ModelError {
    /// Returned when a node ID is added twice.
    #[error("node {0} is defined more than once")]
    DuplicateNode(NodeId),
    /// Returned when a member ID is added twice.
    #[error("member {0} is defined more than once")]
    DuplicateMember(ElementId),
    /// Returned when a member references a node that does not exist.
    #[error("member {member} references unknown node {node}")]
    UnknownNode {
        /// Identifier of the offending member.
        member: ElementId,
        /// Node the member points at.
        node: NodeId,
    },
}

/// Error returned when a [`BridgeConfig`](crate::BridgeConfig) cannot be used.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ConfigError {
    /// Returned when the requested girder is not configured.
    #[error("girder '{0}' is not configured")]
    UnknownGirder(String),
    /// Returned when a girder has no elements.
    #[error("girder '{0}' has no elements")]
    EmptyGirder(String),
    /// Returned when the span is zero, negative or not finite.
    #[error("span must be positive (received {0})")]
    InvalidSpan(f64),
    /// Returned when the curtain scale factor is not finite.
    #[error("scale factor must be finite (received {0})")]
    InvalidScaleFactor(f64),
}

/// Error returned when reading an input file.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Returned when the file cannot be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// Returned when the file is not valid JSON for the expected layout.
    #[error("failed to parse {path}: {source}")]
    Json {
        /// File that was being parsed.
        path: PathBuf,
        /// Underlying parse failure.
        #[source]
        source: serde_json::Error,
    },
    /// Returned when the dataset parses but its labels or shape are unusable.
    #[error("malformed results dataset: {0}")]
    Dataset(String),
    /// Returned when the node and member tables are inconsistent.
    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Error returned when writing or displaying an output artifact.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Returned when an output file or directory cannot be written.
    #[error("failed to write {path}: {source}")]
    Io {
        /// Path that was being written.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// Returned when the chart backend fails to draw.
    #[error("failed to draw chart: {0}")]
    Chart(String),
    /// Returned when the desktop viewer cannot be launched.
    #[error("failed to open {path} in a viewer: {reason}")]
    Viewer {
        /// Artifact that was being opened.
        path: PathBuf,
        /// Why the launch failed.
        reason: String,
    },
}

/// Any failure of a complete pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The configuration is unusable.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// An input file could not be loaded.
    #[error(transparent)]
    Load(#[from] LoadError),
    /// A required value is missing.
    #[error(transparent)]
    MissingData(#[from] MissingData),
    /// An artifact could not be written.
    #[error(transparent)]
    Export(#[from] ExportError),
}
