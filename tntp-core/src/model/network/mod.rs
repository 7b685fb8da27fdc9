//! Road network model

pub mod components;
#[allow(clippy::module_inception)]
pub mod network;

pub use components::{
    BprParameters, DEFAULT_MAXIMUM_DENSITY_PER_LANE, Link, LinkId, LinkSegment, LinkSegmentType,
    LinkSegmentTypeId, Mode, ModeId, ModeProperties, Node, TNTP_MODE_EXTERNAL_ID,
};
pub use network::{NetworkGraph, NetworkMeta, PhysicalNetwork};
