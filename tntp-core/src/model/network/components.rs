//! Physical network components - nodes, links, link segments and their types

use geo::Point;
use petgraph::graph::{EdgeIndex, NodeIndex};

/// Index of a link in `PhysicalNetwork::links`
pub type LinkId = usize;
/// Index of a link segment type in `PhysicalNetwork::link_segment_types`
pub type LinkSegmentTypeId = usize;
/// Index of a mode in `PhysicalNetwork::modes`
pub type ModeId = usize;

/// External id of the only mode a TNTP network carries
pub const TNTP_MODE_EXTERNAL_ID: &str = "1";

/// Maximum density per lane (pcu/km/lane) assigned to every link segment type
pub const DEFAULT_MAXIMUM_DENSITY_PER_LANE: f64 = 180.0;

/// Network node
#[derive(Debug, Clone)]
pub struct Node {
    /// Id of the node in the network file
    pub external_id: String,
    /// Position from the node coordinate file, if one was supplied
    pub position: Option<Point<f64>>,
}

/// Physical link between two nodes
#[derive(Debug, Clone)]
pub struct Link {
    pub external_id: String,
    pub upstream: NodeIndex,
    pub downstream: NodeIndex,
    /// Length in km
    pub length: f64,
    /// The single directed segment of this link
    pub segment: EdgeIndex,
}

/// Directed, traversable part of a link. Stored as the edge weight of the
/// network graph.
#[derive(Debug, Clone)]
pub struct LinkSegment {
    pub external_id: String,
    pub link: LinkId,
    pub segment_type: LinkSegmentTypeId,
    /// Segment level maximum speed in km/h, overrides the type's speed
    pub maximum_speed: f64,
    /// Free flow travel time in hours
    pub free_flow_time: f64,
    /// Capacity per lane in veh/h as given on this segment's row
    pub capacity_per_lane: f64,
    pub toll: f64,
}

/// Speed related properties of a link segment type for one mode
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModeProperties {
    pub mode: ModeId,
    /// km/h
    pub maximum_speed: f64,
}

#[derive(Debug, Clone)]
pub struct LinkSegmentType {
    /// The link type column value
    pub external_id: String,
    /// veh/h/lane
    pub capacity_per_lane: f64,
    /// pcu/km/lane
    pub maximum_density_per_lane: f64,
    pub mode_properties: ModeProperties,
}

#[derive(Debug, Clone)]
pub struct Mode {
    pub external_id: String,
    pub name: String,
}

impl Mode {
    pub(crate) fn tntp() -> Self {
        Self {
            external_id: TNTP_MODE_EXTERNAL_ID.to_string(),
            name: "car".to_string(),
        }
    }
}

/// Coefficients of the BPR link performance function
/// `t = t0 * (1 + alpha * (v / c) ^ beta)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BprParameters {
    pub alpha: f64,
    pub beta: f64,
}

impl BprParameters {
    pub const DEFAULT_ALPHA: f64 = 0.15;
    pub const DEFAULT_BETA: f64 = 4.0;

    pub fn new(alpha: f64, beta: f64) -> Self {
        Self { alpha, beta }
    }
}

impl Default for BprParameters {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ALPHA, Self::DEFAULT_BETA)
    }
}
