//! Adapter from scene polylines to plotly traces.
//!
//! Polylines are flattened into single coordinate arrays with a `null` after
//! each one, which plotly.js treats as a break in the line.

use plotly::common::{HoverInfo, Line, Mode, Visible};
use plotly::Scatter3D;

use crate::geometry::Polyline;

/// A `scatter3d` trace over flattened coordinates.
pub type LineTrace = Scatter3D<Option<f64>, Option<f64>, Option<f64>>;

/// Flattened vertex arrays for a set of polylines.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Flattened {
    /// X coordinates, `None` at breaks.
    pub x: Vec<Option<f64>>,
    /// Y coordinates, `None` at breaks.
    pub y: Vec<Option<f64>>,
    /// Z coordinates, `None` at breaks.
    pub z: Vec<Option<f64>>,
    /// Per-vertex hover text, present when any polyline is labeled.
    pub text: Option<Vec<Option<String>>>,
}

/// Flatten `polylines`, appending a break after each one.
///
/// Unlabeled vertices of a labeled set get no label so the text array stays
/// aligned with the coordinates.
#[must_use]
pub fn flatten(polylines: &[Polyline]) -> Flattened {
    let labeled = polylines.iter().any(|line| line.labels.is_some());
    let capacity = polylines.iter().map(|line| line.len() + 1).sum();
    let mut flat = Flattened {
        x: Vec::with_capacity(capacity),
        y: Vec::with_capacity(capacity),
        z: Vec::with_capacity(capacity),
        text: labeled.then(|| Vec::with_capacity(capacity)),
    };

    for line in polylines {
        for (index, vertex) in line.vertices.iter().enumerate() {
            flat.x.push(Some(vertex.x));
            flat.y.push(Some(vertex.y));
            flat.z.push(Some(vertex.z));
            if let Some(text) = flat.text.as_mut() {
                text.push(
                    line.labels
                        .as_ref()
                        .and_then(|labels| labels.get(index).cloned()),
                );
            }
        }
        flat.x.push(None);
        flat.y.push(None);
        flat.z.push(None);
        if let Some(text) = flat.text.as_mut() {
            text.push(None);
        }
    }
    flat
}

/// Colour and width of a line trace.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineStyle {
    /// CSS colour name.
    pub color: &'static str,
    /// Width in pixels.
    pub width: f64,
}

/// Build a line trace from polylines.
///
/// Labeled sets show the vertex text with the trace name on hover; unlabeled
/// sets have no hover box.
#[must_use]
pub fn line_trace(
    name: &str,
    polylines: &[Polyline],
    style: LineStyle,
    visible: bool,
) -> Box<LineTrace> {
    let Flattened { x, y, z, text } = flatten(polylines);
    let trace = Scatter3D::new(x, y, z)
        .name(name)
        .mode(Mode::Lines)
        .line(Line::new().color(style.color).width(style.width))
        .visible(if visible { Visible::True } else { Visible::False });

    match text {
        Some(text) => {
            let labels: Vec<String> = text.into_iter().map(Option::unwrap_or_default).collect();
            trace.text_array(labels).hover_template("%{text}")
        }
        None => trace.hover_info(HoverInfo::None),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::*;
    use crate::geometry::point;

    fn encoded(trace: &LineTrace) -> Value {
        serde_json::to_value(trace).expect("trace serialises")
    }

    #[test]
    fn flatten_breaks_after_every_polyline() {
        let polylines = vec![
            Polyline::new(vec![point(0.0, 0.0, 0.0), point(1.0, 0.0, 0.0)]),
            Polyline::new(vec![point(1.0, 0.0, 0.0), point(1.0, 0.0, 2.0)]),
        ];
        let flat = flatten(&polylines);
        assert_eq!(flat.x, vec![Some(0.0), Some(1.0), None, Some(1.0), Some(1.0), None]);
        assert_eq!(flat.z, vec![Some(0.0), Some(0.0), None, Some(0.0), Some(2.0), None]);
        assert_eq!(flat.text, None);
    }

    #[test]
    fn flatten_aligns_labels_with_vertices() {
        let polylines = vec![
            Polyline::labeled(
                vec![point(0.0, 0.0, 0.0), point(0.0, 3.0, 0.0)],
                vec!["a".into(), "b".into()],
            ),
            Polyline::new(vec![point(2.0, 0.0, 0.0)]),
        ];
        let flat = flatten(&polylines);
        assert_eq!(flat.x.len(), 5);
        assert_eq!(
            flat.text,
            Some(vec![
                Some("a".to_owned()),
                Some("b".to_owned()),
                None,
                None,
                None
            ])
        );
    }

    #[test]
    fn unlabeled_trace_has_no_hover() {
        let trace = line_trace(
            "Bridge Frame",
            &[Polyline::new(vec![point(0.0, 0.0, 0.0), point(1.0, 0.0, 0.0)])],
            LineStyle {
                color: "lightgrey",
                width: 2.0,
            },
            false,
        );
        let json = encoded(&trace);
        assert_eq!(json["type"], "scatter3d");
        assert_eq!(json["mode"], "lines");
        assert_eq!(json["name"], "Bridge Frame");
        assert_eq!(json["hoverinfo"], "none");
        assert_eq!(json["visible"], false);
        assert_eq!(json["line"]["color"], "lightgrey");
        assert_eq!(json["x"], json!([0.0, 1.0, null]));
        assert!(json.get("text").is_none());
    }

    #[test]
    fn labeled_trace_shows_text_and_name() {
        let trace = line_trace(
            "Girder 1 (Mz)",
            &[Polyline::labeled(
                vec![point(0.0, 0.0, 0.0), point(0.0, 3.0, 0.0)],
                vec!["base".into(), "top".into()],
            )],
            LineStyle {
                color: "blue",
                width: 4.0,
            },
            true,
        );
        let json = encoded(&trace);
        assert_eq!(json["visible"], true);
        assert_eq!(json["text"], json!(["base", "top", ""]));
        assert_eq!(json["hovertemplate"], "%{text}");
        assert!(json.get("hoverinfo").is_none());
    }
}
