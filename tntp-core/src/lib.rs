//! Reader for the TNTP transportation network interchange format.
//!
//! Decodes a network file (nodes, links, link segments and their BPR
//! coefficients), synthesizes the zoning it declares and reads the
//! origin-destination demand file into a single all-day matrix.

pub mod error;
pub mod loading;
pub mod model;
pub mod prelude;
pub mod units;

pub use error::Error;
pub use loading::{
    ColumnSchema, NetworkColumn, NetworkFileSettings, TntpModelConfig, create_tntp_model,
};
pub use model::{
    BprParameterTable, BprParameters, Demands, OdDemandMatrix, PhysicalNetwork, TntpModel,
    Zoning,
};
pub use units::{CanonicalUnit, CapacityPeriod, LengthUnit, SpeedUnit, TimeUnit};
