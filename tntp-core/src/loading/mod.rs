//! This module is responsible for reading TNTP network, zoning and demand data
//! and building the model consumed by assignment and cost components.

mod builder;
mod config;
pub mod tntp;

pub use builder::create_tntp_model;
pub use config::{ColumnSchema, NetworkColumn, NetworkFileSettings, TntpModelConfig};
