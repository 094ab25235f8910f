//! Geometric primitives shared by the frame and curtain builders.

use nalgebra::Vector3;

/// Position in three dimensional space.
///
/// Structural coordinates are in metres. Curtain vertices reuse the type with
/// the Y component carrying a scaled force magnitude instead of a length.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    /// Distance along the bridge (global X axis).
    pub x: f64,
    /// Vertical coordinate (global Y axis).
    pub y: f64,
    /// Distance across the deck (global Z axis).
    pub z: f64,
}

impl Point {
    /// Create a [`Point`] with explicit coordinates.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Convert the point into an algebraic vector.
    #[must_use]
    pub fn to_vector(self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }

    /// Project the point onto the horizontal plane through the origin.
    ///
    /// # Examples
    /// ```
    /// use girderviz::point;
    ///
    /// let base = point(2.5, 1.2, -3.0).on_deck();
    /// assert_eq!(base, point(2.5, 0.0, -3.0));
    /// ```
    #[must_use]
    pub const fn on_deck(self) -> Self {
        Self::new(self.x, 0.0, self.z)
    }

    /// Shift the point vertically by `offset`.
    #[must_use]
    pub fn raised(self, offset: f64) -> Self {
        Self::from(self.to_vector() + Vector3::y() * offset)
    }
}

impl From<Vector3<f64>> for Point {
    fn from(value: Vector3<f64>) -> Self {
        Self::new(value.x, value.y, value.z)
    }
}

impl From<Point> for Vector3<f64> {
    fn from(value: Point) -> Self {
        value.to_vector()
    }
}

impl From<[f64; 3]> for Point {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::new(x, y, z)
    }
}

/// Convenience helper for creating [`Point`] instances.
///
/// # Examples
/// ```
/// use girderviz::point;
///
/// let origin = point(0.0, 0.0, 0.0);
/// assert_eq!(origin.x, 0.0);
/// ```
#[must_use]
pub const fn point(x: f64, y: f64, z: f64) -> Point {
    Point::new(x, y, z)
}

/// An unbroken run of connected vertices.
///
/// Separate polylines are never joined when drawn; how the gap between them
/// is encoded is left to the rendering adapter.
#[derive(Clone, Debug, PartialEq)]
pub struct Polyline {
    /// Vertices in drawing order.
    pub vertices: Vec<Point>,
    /// Hover label per vertex, when the polyline carries annotations.
    pub labels: Option<Vec<String>>,
}

impl Polyline {
    /// Create an unlabeled polyline.
    #[must_use]
    pub fn new(vertices: Vec<Point>) -> Self {
        Self {
            vertices,
            labels: None,
        }
    }

    /// Create a polyline with one label per vertex.
    ///
    /// # Panics
    ///
    /// Panics when the number of labels differs from the number of vertices.
    #[must_use]
    pub fn labeled(vertices: Vec<Point>, labels: Vec<String>) -> Self {
        assert_eq!(
            vertices.len(),
            labels.len(),
            "one label is required per vertex"
        );
        Self {
            vertices,
            labels: Some(labels),
        }
    }

    /// Number of vertices in the polyline.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Whether the polyline has no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}
