//! Data model produced by the TNTP decoders
//!
//! Contains the road network, the zoning overlay and the demand matrices.

pub mod demand;
pub mod network;
pub mod registry;
pub mod tntp_model;
pub mod zoning;

// Re-export of the main model structure
pub use tntp_model::{BprParameterTable, TntpModel};

// Re-export of basic types for convenience
pub use demand::{Demands, OdDemandMatrix, TimePeriod, TimePeriodId};
pub use network::{
    BprParameters, Link, LinkId, LinkSegment, LinkSegmentType, LinkSegmentTypeId, Mode, ModeId,
    Node, PhysicalNetwork,
};
pub use registry::{EntityKind, SourceIdRegistry};
pub use zoning::{Connectoid, ConnectoidId, Zone, ZoneId, Zoning};
