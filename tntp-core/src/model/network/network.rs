//! Physical network: node/link graph plus external id lookups

use geo::Point;
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;

use super::components::{
    Link, LinkId, LinkSegment, LinkSegmentType, LinkSegmentTypeId, Mode, ModeId, Node,
};
use crate::Error;
use crate::model::{EntityKind, SourceIdRegistry};

/// Directed graph of nodes and link segments
pub type NetworkGraph = DiGraph<Node, LinkSegment>;

/// Counts and tags declared in the network file metadata
#[derive(Debug, Clone, Default)]
pub struct NetworkMeta {
    pub declared_nodes: usize,
    pub declared_links: usize,
    pub declared_zones: Option<usize>,
    pub first_thru_node: Option<usize>,
    pub coordinate_reference_system: Option<String>,
}

/// Single mode, single layer road network
#[derive(Debug, Clone)]
pub struct PhysicalNetwork {
    pub graph: NetworkGraph,
    pub links: Vec<Link>,
    pub link_segment_types: Vec<LinkSegmentType>,
    pub modes: Vec<Mode>,
    pub meta: NetworkMeta,
    node_ids: SourceIdRegistry<NodeIndex>,
    link_ids: SourceIdRegistry<LinkId>,
    link_segment_ids: SourceIdRegistry<EdgeIndex>,
    link_segment_type_ids: SourceIdRegistry<LinkSegmentTypeId>,
    mode_ids: SourceIdRegistry<ModeId>,
}

impl PhysicalNetwork {
    pub(crate) fn new(meta: NetworkMeta) -> Self {
        Self {
            graph: NetworkGraph::with_capacity(meta.declared_nodes, meta.declared_links),
            links: Vec::with_capacity(meta.declared_links),
            link_segment_types: Vec::new(),
            modes: Vec::new(),
            meta,
            node_ids: SourceIdRegistry::new(EntityKind::Node),
            link_ids: SourceIdRegistry::new(EntityKind::Link),
            link_segment_ids: SourceIdRegistry::new(EntityKind::LinkSegment),
            link_segment_type_ids: SourceIdRegistry::new(EntityKind::LinkSegmentType),
            mode_ids: SourceIdRegistry::new(EntityKind::Mode),
        }
    }

    pub(crate) fn register_mode(&mut self, mode: Mode) -> Result<ModeId, Error> {
        let mode_id = self.modes.len();
        self.mode_ids.register(mode.external_id.clone(), mode_id)?;
        self.modes.push(mode);
        Ok(mode_id)
    }

    /// Returns the node with `external_id`, adding it to the graph on first use
    pub(crate) fn get_or_create_node(&mut self, external_id: &str) -> Result<NodeIndex, Error> {
        let (node, _) = self.node_ids.get_or_register_with(external_id, || {
            Ok(self.graph.add_node(Node {
                external_id: external_id.to_string(),
                position: None,
            }))
        })?;
        Ok(node)
    }

    /// Adds a link together with its single directed segment
    pub(crate) fn add_link(
        &mut self,
        external_id: &str,
        upstream: NodeIndex,
        downstream: NodeIndex,
        length: f64,
        mut segment: LinkSegment,
    ) -> Result<EdgeIndex, Error> {
        if self.link_segment_ids.contains(&segment.external_id) {
            return Err(Error::DuplicateId {
                kind: EntityKind::LinkSegment,
                id: segment.external_id,
            });
        }
        let link_id = self.links.len();
        self.link_ids.register(external_id, link_id)?;

        segment.link = link_id;
        let segment_external_id = segment.external_id.clone();
        let edge = self.graph.add_edge(upstream, downstream, segment);
        self.link_segment_ids.register(segment_external_id, edge)?;

        self.links.push(Link {
            external_id: external_id.to_string(),
            upstream,
            downstream,
            length,
            segment: edge,
        });
        Ok(edge)
    }

    /// Returns the link segment type with `external_id`, creating it with
    /// `create` when absent. An existing type is returned untouched.
    pub(crate) fn get_or_create_link_segment_type<F>(
        &mut self,
        external_id: &str,
        create: F,
    ) -> Result<(LinkSegmentTypeId, bool), Error>
    where
        F: FnOnce() -> LinkSegmentType,
    {
        self.link_segment_type_ids
            .get_or_register_with(external_id, || {
                self.link_segment_types.push(create());
                Ok(self.link_segment_types.len() - 1)
            })
    }

    pub(crate) fn set_node_position(&mut self, node: NodeIndex, position: Point<f64>) {
        if let Some(weight) = self.graph.node_weight_mut(node) {
            weight.position = Some(position);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0 || self.links.is_empty()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    pub fn link_segment_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn node(&self, node: NodeIndex) -> Option<&Node> {
        self.graph.node_weight(node)
    }

    pub fn node_by_external_id(&self, external_id: &str) -> Option<NodeIndex> {
        self.node_ids.get(external_id)
    }

    pub fn link(&self, link: LinkId) -> Option<&Link> {
        self.links.get(link)
    }

    pub fn link_by_external_id(&self, external_id: &str) -> Option<&Link> {
        self.link_ids
            .get(external_id)
            .and_then(|link| self.links.get(link))
    }

    pub fn link_segment(&self, segment: EdgeIndex) -> Option<&LinkSegment> {
        self.graph.edge_weight(segment)
    }

    pub fn link_segment_by_external_id(&self, external_id: &str) -> Option<EdgeIndex> {
        self.link_segment_ids.get(external_id)
    }

    pub fn link_segment_type(&self, segment_type: LinkSegmentTypeId) -> Option<&LinkSegmentType> {
        self.link_segment_types.get(segment_type)
    }

    pub fn link_segment_type_by_external_id(
        &self,
        external_id: &str,
    ) -> Option<LinkSegmentTypeId> {
        self.link_segment_type_ids.get(external_id)
    }

    /// The mode of a TNTP network; `None` only before decoding registered it
    pub fn mode(&self) -> Option<(ModeId, &Mode)> {
        self.modes.first().map(|mode| (0, mode))
    }

    pub fn mode_by_external_id(&self, external_id: &str) -> Option<ModeId> {
        self.mode_ids.get(external_id)
    }

    /// Nodes in creation order
    pub fn nodes(&self) -> impl Iterator<Item = (NodeIndex, &Node)> + '_ {
        self.graph
            .node_indices()
            .map(move |index| (index, &self.graph[index]))
    }

    /// Link segments with their upstream and downstream nodes, in creation order
    pub fn link_segments(
        &self,
    ) -> impl Iterator<Item = (EdgeIndex, NodeIndex, NodeIndex, &LinkSegment)> + '_ {
        self.graph
            .edge_references()
            .map(|edge| (edge.id(), edge.source(), edge.target(), edge.weight()))
    }
}
