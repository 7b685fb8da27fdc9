//! Decoders for the TNTP text format

mod coordinates;
mod demand;
mod metadata;
mod network;
mod zoning;

pub use coordinates::read_node_coordinates;
pub use demand::decode_demands;
pub use network::{DecodedNetwork, decode_network};
pub use zoning::decode_zoning;
