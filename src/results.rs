//! Element end forces and the labeled dataset they are queried from.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use log::info;
use ndarray::Array2;
use serde::Deserialize;

use crate::errors::{LoadError, MissingData};
use crate::ElementId;

/// Name of the element dimension in the results dataset.
pub const ELEMENT_DIM: &str = "Element";
/// Name of the component dimension in the results dataset.
pub const COMPONENT_DIM: &str = "Component";
/// Name of the data variable holding element end forces.
pub const FORCES_VAR: &str = "forces";

/// Force quantity plotted along a girder.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ForceKind {
    /// Bending moment about the local z axis.
    Moment,
    /// Shear force along the local y axis.
    Shear,
}

impl ForceKind {
    /// Both force kinds, moment first.
    pub const ALL: [ForceKind; 2] = [ForceKind::Moment, ForceKind::Shear];

    /// Dataset symbol of the quantity.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            ForceKind::Moment => "Mz",
            ForceKind::Shear => "Vy",
        }
    }

    /// Unit the dataset records the quantity in.
    #[must_use]
    pub const fn unit(self) -> &'static str {
        match self {
            ForceKind::Moment => "kN-m",
            ForceKind::Shear => "kN",
        }
    }

    /// Human readable name of the quantity.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            ForceKind::Moment => "Bending Moment",
            ForceKind::Shear => "Shear Force",
        }
    }

    /// Colour used for the quantity in every chart.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            ForceKind::Moment => "blue",
            ForceKind::Shear => "red",
        }
    }
}

impl fmt::Display for ForceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// End of an element a force is recorded at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementEnd {
    /// The start node, `i`.
    Start,
    /// The end node, `j`.
    End,
}

impl ElementEnd {
    /// Suffix used in component tags.
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            ElementEnd::Start => "i",
            ElementEnd::End => "j",
        }
    }
}

/// A force quantity at one end of an element, tagged `Mz_i`, `Mz_j`, `Vy_i` or `Vy_j`.
///
/// # Examples
/// ```
/// use girderviz::{Component, ElementEnd, ForceKind};
///
/// let component: Component = "Vy_j".parse().unwrap();
/// assert_eq!(component, Component::new(ForceKind::Shear, ElementEnd::End));
/// assert_eq!(component.to_string(), "Vy_j");
/// assert!("Fx_i".parse::<Component>().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Component {
    /// Quantity being recorded.
    pub kind: ForceKind,
    /// Element end the quantity is recorded at.
    pub end: ElementEnd,
}

impl Component {
    /// The four recognised components in dataset order.
    pub const ALL: [Component; 4] = [
        Component::new(ForceKind::Moment, ElementEnd::Start),
        Component::new(ForceKind::Moment, ElementEnd::End),
        Component::new(ForceKind::Shear, ElementEnd::Start),
        Component::new(ForceKind::Shear, ElementEnd::End),
    ];

    /// Create a component from its parts.
    #[must_use]
    pub const fn new(kind: ForceKind, end: ElementEnd) -> Self {
        Self { kind, end }
    }

    /// Dataset label of the component.
    #[must_use]
    pub fn tag(&self) -> String {
        format!("{}_{}", self.kind.symbol(), self.end.suffix())
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.kind.symbol(), self.end.suffix())
    }
}

impl FromStr for Component {
    type Err = MissingData;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        Component::ALL
            .into_iter()
            .find(|component| component.tag() == tag)
            .ok_or_else(|| MissingData::Component(tag.to_owned()))
    }
}

/// Read access to element end forces.
///
/// Implementations must fail rather than invent a value: a diagram drawn
/// through a defaulted zero looks plausible and is wrong.
pub trait ResultsStore {
    /// Return the force recorded for `element` and `component`.
    ///
    /// # Errors
    ///
    /// Returns [`MissingData`] when the element, the component or the value
    /// itself is absent.
    fn force(&self, element: ElementId, component: Component) -> Result<f64, MissingData>;

    /// Return the start and end values of `kind` for `element`.
    ///
    /// # Errors
    ///
    /// Returns [`MissingData`] when either end is absent.
    fn end_forces(&self, element: ElementId, kind: ForceKind) -> Result<(f64, f64), MissingData> {
        let start = self.force(element, Component::new(kind, ElementEnd::Start))?;
        let end = self.force(element, Component::new(kind, ElementEnd::End))?;
        Ok((start, end))
    }
}

/// Element end forces held as an `Element x Component` array.
///
/// Absent cells are stored as NaN and reported as [`MissingData::Value`].
#[derive(Clone, Debug)]
pub struct ForceDataset {
    /// Row of each element label.
    elements: HashMap<ElementId, usize>,
    /// Column of each component label.
    components: HashMap<String, usize>,
    /// Recorded values, one row per element.
    forces: Array2<f64>,
}

impl ForceDataset {
    /// Create a dataset from labels and a matching value array.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Dataset`] when the array shape does not match the
    /// labels or a label is repeated.
    pub fn new(
        elements: Vec<ElementId>,
        components: Vec<String>,
        forces: Array2<f64>,
    ) -> Result<Self, LoadError> {
        if forces.dim() != (elements.len(), components.len()) {
            return Err(LoadError::Dataset(format!(
                "{FORCES_VAR} has shape {:?} but there are {} elements and {} components",
                forces.dim(),
                elements.len(),
                components.len()
            )));
        }

        let mut element_rows = HashMap::with_capacity(elements.len());
        for (row, element) in elements.into_iter().enumerate() {
            if element_rows.insert(element, row).is_some() {
                return Err(LoadError::Dataset(format!(
                    "element {element} appears more than once"
                )));
            }
        }
        let mut component_columns = HashMap::with_capacity(components.len());
        for (column, component) in components.into_iter().enumerate() {
            if component_columns.contains_key(&component) {
                return Err(LoadError::Dataset(format!(
                    "component '{component}' appears more than once"
                )));
            }
            component_columns.insert(component, column);
        }

        Ok(Self {
            elements: element_rows,
            components: component_columns,
            forces,
        })
    }

    /// Create a dataset holding the four standard components for each element.
    ///
    /// Each row is `[Mz_i, Mz_j, Vy_i, Vy_j]`.
    ///
    /// # Examples
    /// ```
    /// use girderviz::{Component, ForceDataset, ResultsStore};
    ///
    /// let dataset = ForceDataset::from_rows(&[(15, [100.0, -50.0, 12.0, 11.0])]).unwrap();
    /// let value = dataset.force(15, "Mz_j".parse::<Component>().unwrap()).unwrap();
    /// assert_eq!(value, -50.0);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Dataset`] when an element is listed twice.
    pub fn from_rows(rows: &[(ElementId, [f64; 4])]) -> Result<Self, LoadError> {
        let elements = rows.iter().map(|(element, _)| *element).collect();
        let components = Component::ALL.iter().map(Component::tag).collect();
        let flat = rows.iter().flat_map(|(_, values)| *values).collect();
        let forces = Array2::from_shape_vec((rows.len(), Component::ALL.len()), flat)
            .map_err(|error| LoadError::Dataset(error.to_string()))?;
        Self::new(elements, components, forces)
    }

    /// Load a dataset exported in xarray's `to_dict` JSON layout.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] when the file cannot be read, is not valid JSON,
    /// or does not describe a two-dimensional `forces` variable over the
    /// `Element` and `Component` dimensions.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let dict: DatasetDict = serde_json::from_str(&text).map_err(|source| LoadError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        let dataset = Self::from_dict(dict)?;
        info!(
            "loaded {} elements x {} components from {}",
            dataset.element_count(),
            dataset.component_count(),
            path.display()
        );
        Ok(dataset)
    }

    /// Convert the deserialised dictionary layout into a dataset.
    fn from_dict(mut dict: DatasetDict) -> Result<Self, LoadError> {
        let elements = take_coordinate(&mut dict, ELEMENT_DIM)?
            .into_iter()
            .map(|label| {
                label
                    .as_u64()
                    .and_then(|id| ElementId::try_from(id).ok())
                    .ok_or_else(|| {
                        LoadError::Dataset(format!("element label {label} is not an integer ID"))
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let components = take_coordinate(&mut dict, COMPONENT_DIM)?
            .into_iter()
            .map(|label| match label {
                serde_json::Value::String(tag) => Ok(tag),
                other => Err(LoadError::Dataset(format!(
                    "component label {other} is not a string"
                ))),
            })
            .collect::<Result<Vec<_>, _>>()?;

        let variable = dict
            .data_vars
            .remove(FORCES_VAR)
            .ok_or_else(|| LoadError::Dataset(format!("no '{FORCES_VAR}' data variable")))?;
        let transposed = match variable
            .dims
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .as_slice()
        {
            [ELEMENT_DIM, COMPONENT_DIM] => false,
            [COMPONENT_DIM, ELEMENT_DIM] => true,
            other => {
                return Err(LoadError::Dataset(format!(
                    "'{FORCES_VAR}' must span ({ELEMENT_DIM}, {COMPONENT_DIM}), found {other:?}"
                )))
            }
        };

        let (rows, columns) = if transposed {
            (components.len(), elements.len())
        } else {
            (elements.len(), components.len())
        };
        if variable.data.len() != rows {
            return Err(LoadError::Dataset(format!(
                "'{FORCES_VAR}' has {} rows, expected {rows}",
                variable.data.len()
            )));
        }
        let mut flat = Vec::with_capacity(rows * columns);
        for (index, row) in variable.data.into_iter().enumerate() {
            if row.len() != columns {
                return Err(LoadError::Dataset(format!(
                    "row {index} of '{FORCES_VAR}' has {} values, expected {columns}",
                    row.len()
                )));
            }
            flat.extend(row.into_iter().map(|value| value.unwrap_or(f64::NAN)));
        }
        let forces = Array2::from_shape_vec((rows, columns), flat)
            .map_err(|error| LoadError::Dataset(error.to_string()))?;
        let forces = if transposed {
            forces.reversed_axes()
        } else {
            forces
        };

        Self::new(elements, components, forces)
    }

    /// Number of element labels.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Number of component labels.
    #[must_use]
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Look up a value by its raw component tag.
    ///
    /// # Errors
    ///
    /// Returns [`MissingData::Component`] when `tag` is not one of the four
    /// recognised tags, otherwise as [`ResultsStore::force`].
    pub fn force_by_tag(&self, element: ElementId, tag: &str) -> Result<f64, MissingData> {
        self.force(element, tag.parse()?)
    }
}

impl ResultsStore for ForceDataset {
    fn force(&self, element: ElementId, component: Component) -> Result<f64, MissingData> {
        let row = *self
            .elements
            .get(&element)
            .ok_or(MissingData::Element(element))?;
        let tag = component.tag();
        let column = match self.components.get(&tag) {
            Some(column) => *column,
            None => return Err(MissingData::Component(tag)),
        };
        let value = self.forces[[row, column]];
        if value.is_nan() {
            return Err(MissingData::Value { element, component });
        }
        Ok(value)
    }
}

/// Top level of xarray's `Dataset.to_dict()` layout.
#[derive(Debug, Deserialize)]
struct DatasetDict {
    /// Coordinate variables keyed by dimension name.
    coords: HashMap<String, CoordinateDict>,
    /// Data variables keyed by name.
    data_vars: HashMap<String, VariableDict>,
}

/// One coordinate variable.
#[derive(Debug, Deserialize)]
struct CoordinateDict {
    /// Labels along the dimension.
    data: Vec<serde_json::Value>,
}

/// One two-dimensional data variable.
#[derive(Debug, Deserialize)]
struct VariableDict {
    /// Dimension names, outermost first.
    dims: Vec<String>,
    /// Nested rows of values; `null` marks an absent value.
    data: Vec<Vec<Option<f64>>>,
}

/// Remove and return the labels of a coordinate.
fn take_coordinate(
    dict: &mut DatasetDict,
    name: &str,
) -> Result<Vec<serde_json::Value>, LoadError> {
    dict.coords
        .remove(name)
        .map(|coordinate| coordinate.data)
        .ok_or_else(|| LoadError::Dataset(format!("no '{name}' coordinate")))
}
