//! Force "curtains": end forces draped over the girder as vertical offsets.
//!
//! Each element becomes a four-vertex outline rising from the deck at its
//! start node to the scaled start value, running across to the scaled end
//! value and dropping back to the deck at its end node. The vertical axis of
//! the outline is force, multiplied by a display scale factor; it is not a
//! length.

use log::debug;

use crate::config::GirderChain;
use crate::errors::MissingData;
use crate::geometry::{Point, Polyline};
use crate::model::BridgeModel;
use crate::results::{ForceKind, ResultsStore};
use crate::ElementId;

/// The curtain drawn over one element.
#[derive(Clone, Debug, PartialEq)]
pub struct CurtainSegment {
    /// Element the segment belongs to.
    pub element: ElementId,
    /// Force at the start node, unscaled.
    pub start_value: f64,
    /// Force at the end node, unscaled.
    pub end_value: f64,
    /// Deck at start, raised start, raised end, deck at end.
    pub vertices: [Point; 4],
    /// Hover label for each vertex.
    pub labels: [String; 4],
}

impl CurtainSegment {
    /// The segment as a labeled polyline.
    #[must_use]
    pub fn to_polyline(&self) -> Polyline {
        Polyline::labeled(self.vertices.to_vec(), self.labels.to_vec())
    }
}

/// Curtains for every element of one girder and one force kind.
#[derive(Clone, Debug, PartialEq)]
pub struct Curtain {
    /// Name of the girder.
    pub girder: String,
    /// Force kind the curtain shows.
    pub kind: ForceKind,
    /// One segment per element, in chain order.
    pub segments: Vec<CurtainSegment>,
}

impl Curtain {
    /// Segments as separate polylines.
    #[must_use]
    pub fn polylines(&self) -> Vec<Polyline> {
        self.segments.iter().map(CurtainSegment::to_polyline).collect()
    }
}

/// Hover label for a raised vertex.
fn value_label(element: ElementId, value: f64, kind: ForceKind) -> String {
    format!("Elem {element}<br>Val: {value:.2} {}", kind.unit())
}

/// Hover label for a vertex on the deck.
fn base_label(element: ElementId) -> String {
    format!("Elem {element}<br>Base Node")
}

/// Build the curtain of `kind` along `girder`.
///
/// Node positions are projected onto the deck (y = 0) and raised by
/// `value * scale`.
///
/// # Errors
///
/// Returns [`MissingData`] when an element is not in the member table, a node
/// is not in the node table, or a force value is absent.
pub fn build_curtain<S>(
    store: &S,
    model: &BridgeModel,
    girder: &GirderChain,
    kind: ForceKind,
    scale: f64,
) -> Result<Curtain, MissingData>
where
    S: ResultsStore + ?Sized,
{
    let mut segments = Vec::with_capacity(girder.len());
    for &element in &girder.elements {
        let (start_node, end_node) = model.member_nodes(element)?;
        let start = model.node_position(start_node)?.on_deck();
        let end = model.node_position(end_node)?.on_deck();
        let (start_value, end_value) = store.end_forces(element, kind)?;

        let base = base_label(element);
        segments.push(CurtainSegment {
            element,
            start_value,
            end_value,
            vertices: [
                start,
                start.raised(start_value * scale),
                end.raised(end_value * scale),
                end,
            ],
            labels: [
                base.clone(),
                value_label(element, start_value, kind),
                value_label(element, end_value, kind),
                base,
            ],
        });
    }
    debug!(
        "built {} curtain for {} with {} segments",
        kind,
        girder.name,
        segments.len()
    );

    Ok(Curtain {
        girder: girder.name.clone(),
        kind,
        segments,
    })
}
