//! Node and member tables of the bridge, held as a graph.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use log::info;
use petgraph::graph::{EdgeIndex, Graph, NodeIndex};
use serde::Deserialize;

use crate::errors::{LoadError, MissingData, ModelError};
use crate::geometry::{Point, Polyline};
use crate::{ElementId, NodeId};

/// Internal representation of a structural node.
#[derive(Clone, Debug)]
struct Node {
    /// Identifier from the node table.
    id: NodeId,
    /// Position of the node in metres.
    position: Point,
}

/// Internal representation of a member between two nodes.
#[derive(Clone, Debug)]
struct Member {
    /// Identifier from the member table, shared with the results dataset.
    id: ElementId,
}

/// Geometry of the bridge: nodes, and members connecting them.
///
/// The tables are trusted as supplied; the model only guarantees that every
/// member references nodes it knows about.
#[derive(Debug, Default)]
pub struct BridgeModel {
    /// Underlying graph storage for nodes and members.
    graph: Graph<Node, Member>,
    /// Graph index of each node ID.
    nodes: HashMap<NodeId, NodeIndex>,
    /// Graph index of each member ID, in ascending ID order.
    members: BTreeMap<ElementId, EdgeIndex>,
}

impl BridgeModel {
    /// Create an empty model.
    ///
    /// # Examples
    /// ```
    /// use girderviz::BridgeModel;
    ///
    /// let model = BridgeModel::new();
    /// assert_eq!(model.node_count(), 0);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a model from a node table and a member table.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::UnknownNode`] when a member references a node that
    /// is not in `nodes`.
    pub fn from_tables<N, M>(nodes: N, members: M) -> Result<Self, ModelError>
    where
        N: IntoIterator<Item = (NodeId, Point)>,
        M: IntoIterator<Item = (ElementId, (NodeId, NodeId))>,
    {
        let mut model = Self::new();
        for (id, position) in nodes {
            model.add_node(id, position)?;
        }
        for (id, (start, end)) in members {
            model.add_member(id, start, end)?;
        }
        Ok(model)
    }

    /// Load a model from a JSON geometry file.
    ///
    /// The file holds a `nodes` map of ID to `[x, y, z]` and a `members` map
    /// of ID to `[start, end]`.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] when the file cannot be read or parsed, or when a
    /// member references an unknown node.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let tables: GeometryFile =
            serde_json::from_str(&text).map_err(|source| LoadError::Json {
                path: path.to_path_buf(),
                source,
            })?;
        let model = Self::from_tables(
            tables
                .nodes
                .into_iter()
                .map(|(id, position)| (id, Point::from(position))),
            tables
                .members
                .into_iter()
                .map(|(id, [start, end])| (id, (start, end))),
        )?;
        info!(
            "loaded {} nodes and {} members from {}",
            model.node_count(),
            model.member_count(),
            path.display()
        );
        Ok(model)
    }

    /// Return the number of nodes in the model.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Return the number of members in the model.
    #[must_use]
    pub fn member_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Add a node.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::DuplicateNode`] when `id` is already present.
    pub fn add_node(&mut self, id: NodeId, position: Point) -> Result<NodeIndex, ModelError> {
        if self.nodes.contains_key(&id) {
            return Err(ModelError::DuplicateNode(id));
        }
        let index = self.graph.add_node(Node { id, position });
        self.nodes.insert(id, index);
        Ok(index)
    }

    /// Connect two existing nodes with a member.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::DuplicateMember`] when `id` is already present and
    /// [`ModelError::UnknownNode`] when either node is missing.
    pub fn add_member(
        &mut self,
        id: ElementId,
        start: NodeId,
        end: NodeId,
    ) -> Result<EdgeIndex, ModelError> {
        if self.members.contains_key(&id) {
            return Err(ModelError::DuplicateMember(id));
        }
        let lookup = |node: NodeId| {
            self.nodes
                .get(&node)
                .copied()
                .ok_or(ModelError::UnknownNode { member: id, node })
        };
        let (a, b) = (lookup(start)?, lookup(end)?);
        let index = self.graph.add_edge(a, b, Member { id });
        self.members.insert(id, index);
        Ok(index)
    }

    /// Position of a node.
    ///
    /// # Errors
    ///
    /// Returns [`MissingData::Node`] when the node is not in the table.
    pub fn node_position(&self, id: NodeId) -> Result<Point, MissingData> {
        self.nodes
            .get(&id)
            .map(|index| self.graph[*index].position)
            .ok_or(MissingData::Node(id))
    }

    /// Start and end node IDs of a member.
    ///
    /// # Errors
    ///
    /// Returns [`MissingData::Member`] when the member is not in the table.
    pub fn member_nodes(&self, id: ElementId) -> Result<(NodeId, NodeId), MissingData> {
        let (start, end) = self.endpoints(id)?;
        Ok((self.graph[start].id, self.graph[end].id))
    }

    /// Start and end positions of a member.
    ///
    /// # Errors
    ///
    /// Returns [`MissingData::Member`] when the member is not in the table.
    pub fn member_coordinates(&self, id: ElementId) -> Result<(Point, Point), MissingData> {
        let (start, end) = self.endpoints(id)?;
        Ok((self.graph[start].position, self.graph[end].position))
    }

    /// Every member as a two-point polyline, in ascending member ID order.
    #[must_use]
    pub fn wireframe(&self) -> Vec<Polyline> {
        self.member_ids()
            .filter_map(|id| self.member_coordinates(id).ok())
            .map(|(start, end)| Polyline::new(vec![start, end]))
            .collect()
    }

    /// Consecutive element pairs in `chain` that do not share a node.
    ///
    /// A pair `(a, b)` is reported when the end node of `a` is not the start
    /// node of `b`.
    ///
    /// # Errors
    ///
    /// Returns [`MissingData::Member`] when an element is not in the table.
    pub fn chain_gaps(
        &self,
        chain: &[ElementId],
    ) -> Result<Vec<(ElementId, ElementId)>, MissingData> {
        let mut gaps = Vec::new();
        for pair in chain.windows(2) {
            let (_, end) = self.endpoints(pair[0])?;
            let (start, _) = self.endpoints(pair[1])?;
            if end != start {
                gaps.push((pair[0], pair[1]));
            }
        }
        Ok(gaps)
    }

    /// Graph endpoints of a member.
    fn endpoints(&self, id: ElementId) -> Result<(NodeIndex, NodeIndex), MissingData> {
        self.members
            .get(&id)
            .and_then(|edge| self.graph.edge_endpoints(*edge))
            .ok_or(MissingData::Member(id))
    }

    /// Member IDs in ascending order.
    ///
    /// # Examples
    /// ```
    /// use girderviz::{point, BridgeModel};
    ///
    /// let model = BridgeModel::from_tables(
    ///     [(1, point(0.0, 0.0, 0.0)), (2, point(1.0, 0.0, 0.0))],
    ///     [(7, (1, 2)), (3, (2, 1))],
    /// )
    /// .unwrap();
    /// assert_eq!(model.member_ids().collect::<Vec<_>>(), vec![3, 7]);
    /// ```
    pub fn member_ids(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.members.values().map(|edge| self.graph[*edge].id)
    }
}

/// On-disk layout of the node and member tables.
#[derive(Debug, Deserialize)]
struct GeometryFile {
    /// Node ID to `[x, y, z]`.
    nodes: BTreeMap<NodeId, [f64; 3]>,
    /// Member ID to `[start node, end node]`.
    members: BTreeMap<ElementId, [NodeId; 2]>,
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::geometry::point;

    /// Two spans of a single girder plus one cross beam.
    fn small_deck() -> BridgeModel {
        BridgeModel::from_tables(
            [
                (1, point(0.0, 0.0, 0.0)),
                (2, point(2.5, 0.0, 0.0)),
                (3, point(5.0, 0.0, 0.0)),
                (4, point(2.5, 0.0, 1.5)),
            ],
            [(10, (1, 2)), (11, (2, 3)), (20, (2, 4))],
        )
        .expect("valid tables")
    }

    #[test]
    fn builds_expected_topology() {
        let model = small_deck();
        assert_eq!(model.node_count(), 4);
        assert_eq!(model.member_count(), 3);
        assert_eq!(model.member_nodes(11), Ok((2, 3)));
        assert_eq!(
            model.member_coordinates(20),
            Ok((point(2.5, 0.0, 0.0), point(2.5, 0.0, 1.5)))
        );
        assert_eq!(model.member_ids().collect::<Vec<_>>(), vec![10, 11, 20]);
    }

    #[test]
    fn lookups_report_missing_ids() {
        let model = small_deck();
        assert_eq!(model.node_position(9), Err(MissingData::Node(9)));
        assert_eq!(model.member_nodes(99), Err(MissingData::Member(99)));
        assert_eq!(model.member_coordinates(99), Err(MissingData::Member(99)));
    }

    #[test]
    fn table_errors_are_rejected() {
        let mut model = small_deck();
        assert_eq!(
            model.add_node(1, point(9.0, 9.0, 9.0)),
            Err(ModelError::DuplicateNode(1))
        );
        assert_eq!(model.add_member(10, 1, 3), Err(ModelError::DuplicateMember(10)));
        assert_eq!(
            model.add_member(30, 1, 42),
            Err(ModelError::UnknownNode {
                member: 30,
                node: 42
            })
        );
        assert_eq!(model.member_count(), 3);
    }

    #[test]
    fn wireframe_follows_member_order() {
        let model = small_deck();
        let frame = model.wireframe();
        assert_eq!(frame.len(), 3);
        assert!(frame.iter().all(|line| line.len() == 2 && line.labels.is_none()));
        assert_eq!(
            frame[2].vertices,
            vec![point(2.5, 0.0, 0.0), point(2.5, 0.0, 1.5)]
        );
        for (line, id) in frame.iter().zip(model.member_ids()) {
            let (start, end) = model.member_coordinates(id).expect("member in table");
            assert_eq!(line.vertices, vec![start, end]);
        }
    }

    #[test]
    fn chain_gaps_flag_disconnected_elements() {
        let model = small_deck();
        assert_eq!(model.chain_gaps(&[10, 11]), Ok(vec![]));
        assert_eq!(model.chain_gaps(&[11, 10]), Ok(vec![(11, 10)]));
        assert_eq!(model.chain_gaps(&[10, 77]), Err(MissingData::Member(77)));
    }

    #[test]
    fn loads_geometry_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temporary file");
        file.write_all(
            br#"{
                "nodes": {"1": [0.0, 0.0, 0.0], "2": [2.5, 0.0, 0.0]},
                "members": {"13": [1, 2]}
            }"#,
        )
        .expect("geometry written");
        let model = BridgeModel::load(file.path()).expect("geometry loads");
        assert_eq!(model.member_nodes(13), Ok((1, 2)));

        let mut dangling = tempfile::NamedTempFile::new().expect("temporary file");
        dangling
            .write_all(br#"{"nodes": {"1": [0.0, 0.0, 0.0]}, "members": {"13": [1, 2]}}"#)
            .expect("geometry written");
        assert!(matches!(
            BridgeModel::load(dangling.path()),
            Err(LoadError::Model(ModelError::UnknownNode { member: 13, node: 2 }))
        ));
    }
}
