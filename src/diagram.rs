//! Longitudinal bending moment and shear force diagrams for one girder.

use crate::config::GirderChain;
use crate::errors::MissingData;
use crate::results::{ForceKind, ResultsStore};

/// Ordered `(position, value)` pairs along a girder.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlotSeries {
    /// Points in the order they are drawn.
    pub points: Vec<(f64, f64)>,
}

/// A jump between the end value of one element and the start value of the next.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Discontinuity {
    /// Distance along the girder where the elements meet.
    pub position: f64,
    /// End value of the element on the left.
    pub left: f64,
    /// Start value of the element on the right.
    pub right: f64,
}

impl PlotSeries {
    /// Number of points in the series.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the series has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Smallest and largest value, or `None` for an empty series.
    #[must_use]
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.points.iter().fold(None, |range, &(_, value)| match range {
            None => Some((value, value)),
            Some((low, high)) => Some((low.min(value), high.max(value))),
        })
    }

    /// Point with the largest value.
    #[must_use]
    pub fn max_point(&self) -> Option<(f64, f64)> {
        self.points
            .iter()
            .copied()
            .reduce(|best, point| if point.1 > best.1 { point } else { best })
    }

    /// Point with the smallest value.
    #[must_use]
    pub fn min_point(&self) -> Option<(f64, f64)> {
        self.points
            .iter()
            .copied()
            .reduce(|best, point| if point.1 < best.1 { point } else { best })
    }

    /// Element boundaries where the two recorded values differ by more than `tolerance`.
    ///
    /// Assumes the start/end pairing produced by [`build_longitudinal_diagram`].
    #[must_use]
    pub fn discontinuities(&self, tolerance: f64) -> Vec<Discontinuity> {
        self.points
            .chunks_exact(2)
            .zip(self.points.chunks_exact(2).skip(1))
            .filter_map(|(left, right)| {
                let (position, left) = left[1];
                let (_, right) = right[0];
                ((left - right).abs() > tolerance).then_some(Discontinuity {
                    position,
                    left,
                    right,
                })
            })
            .collect()
    }
}

/// Moment and shear series for one girder.
#[derive(Clone, Debug, PartialEq)]
pub struct LongitudinalDiagram {
    /// Name of the girder the series belong to.
    pub girder: String,
    /// Length assigned to every element.
    pub element_length: f64,
    /// Bending moment series.
    pub moment: PlotSeries,
    /// Shear force series.
    pub shear: PlotSeries,
}

impl LongitudinalDiagram {
    /// Series of the requested kind.
    #[must_use]
    pub fn series(&self, kind: ForceKind) -> &PlotSeries {
        match kind {
            ForceKind::Moment => &self.moment,
            ForceKind::Shear => &self.shear,
        }
    }

    /// Total length covered by the series.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.moment.points.last().map_or(0.0, |(position, _)| *position)
    }
}

/// Build moment and shear series along `girder`.
///
/// Every element is given the same length, `span / girder.len()`. Element `k`
/// contributes its start value at `k * L` and its end value at `(k + 1) * L`,
/// so each series holds two points per element and shared boundaries appear
/// twice.
///
/// # Examples
/// ```
/// use girderviz::{build_longitudinal_diagram, ForceDataset, GirderChain};
///
/// let dataset = ForceDataset::from_rows(&[
///     (15, [100.0, -50.0, 20.0, 20.0]),
///     (24, [-50.0, 80.0, -10.0, -10.0]),
/// ])
/// .unwrap();
/// let girder = GirderChain::new("Girder 3", vec![15, 24]);
/// let diagram = build_longitudinal_diagram(&dataset, &girder, 25.0 / 9.0 * 2.0).unwrap();
/// assert_eq!(diagram.moment.len(), 4);
/// assert_eq!(diagram.moment.points[0], (0.0, 100.0));
/// ```
///
/// # Errors
///
/// Returns [`MissingData`] for the first value the store cannot supply.
pub fn build_longitudinal_diagram<S>(
    store: &S,
    girder: &GirderChain,
    span: f64,
) -> Result<LongitudinalDiagram, MissingData>
where
    S: ResultsStore + ?Sized,
{
    let element_length = span / girder.len() as f64;
    let mut moment = PlotSeries::default();
    let mut shear = PlotSeries::default();

    for (index, element) in girder.elements.iter().enumerate() {
        let start = index as f64 * element_length;
        let end = (index + 1) as f64 * element_length;

        let (mz_i, mz_j) = store.end_forces(*element, ForceKind::Moment)?;
        moment.points.push((start, mz_i));
        moment.points.push((end, mz_j));

        let (vy_i, vy_j) = store.end_forces(*element, ForceKind::Shear)?;
        shear.points.push((start, vy_i));
        shear.points.push((end, vy_j));
    }

    Ok(LongitudinalDiagram {
        girder: girder.name.clone(),
        element_length,
        moment,
        shear,
    })
}
