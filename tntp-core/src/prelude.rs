// Re-export key components
pub use crate::loading::tntp::{
    DecodedNetwork, decode_demands, decode_network, decode_zoning, read_node_coordinates,
};
pub use crate::loading::{
    ColumnSchema, NetworkColumn, NetworkFileSettings, TntpModelConfig, create_tntp_model,
};
pub use crate::model::{BprParameterTable, TntpModel};

// Core types for the road network
pub use crate::model::network::{
    BprParameters, Link, LinkId, LinkSegment, LinkSegmentType, LinkSegmentTypeId, Mode, ModeId,
    Node, PhysicalNetwork,
};

// Core types for zoning and demand
pub use crate::model::demand::{Demands, OdDemandMatrix, TimePeriod, TimePeriodId};
pub use crate::model::zoning::{Connectoid, Zone, ZoneId, Zoning};

pub use crate::units::{CanonicalUnit, CapacityPeriod, LengthUnit, SpeedUnit, TimeUnit};
pub use crate::Error;
