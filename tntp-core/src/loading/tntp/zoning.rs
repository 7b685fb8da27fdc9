//! Zoning from the network file: one zone and one centroid connector per declared zone

use std::path::Path;

use log::info;

use super::metadata::{NUMBER_OF_ZONES, TntpMetadata, canonical_id, read_metadata};
use crate::Error;
use crate::model::PhysicalNetwork;
use crate::model::zoning::{DEFAULT_CONNECTOID_LENGTH, Zoning};

/// Creates zones `1..=N` for the `<NUMBER OF ZONES>` declared in the network
/// file, connecting zone `i` to node `i`
///
/// # Errors
///
/// `Error::Configuration` without a network file, `Error::Validation` for an
/// empty network, `Error::Reference` when a zone has no node with its id
pub fn decode_zoning(
    network_file: Option<&Path>,
    network: &PhysicalNetwork,
) -> Result<Zoning, Error> {
    let Some(path) = network_file else {
        return Err(Error::Configuration(
            "No network file configured to read the zoning from".to_string(),
        ));
    };
    if network.is_empty() {
        return Err(Error::Validation(
            "Zoning requires a decoded, non-empty network".to_string(),
        ));
    }

    info!("Decoding TNTP zoning from: {}", path.display());
    let metadata = read_metadata(path)?;
    let zone_count = TntpMetadata::require(metadata.zones, NUMBER_OF_ZONES)?;

    let mut zoning = Zoning::with_capacity(zone_count);
    for index in 1..=zone_count {
        let external_id = canonical_id(index as u64);
        let zone = zoning.add_zone(&external_id)?;
        let node = network.node_by_external_id(&external_id).ok_or_else(|| {
            Error::Reference(format!("Zone {external_id} has no node with the same id"))
        })?;
        zoning.add_connectoid(&external_id, zone, node, DEFAULT_CONNECTOID_LENGTH)?;
    }

    info!(
        "Created {} zones and {} connectoids",
        zoning.zones.len(),
        zoning.connectoids.len()
    );
    Ok(zoning)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::model::network::NetworkMeta;

    #[test]
    fn empty_network_is_rejected_before_reading() {
        let network = PhysicalNetwork::new(NetworkMeta::default());
        let err = decode_zoning(Some(Path::new("never/opened.tntp")), &network).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn zone_without_matching_node_is_a_reference_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "<NUMBER OF ZONES> 3\n<END OF METADATA>").unwrap();

        let mut network = PhysicalNetwork::new(NetworkMeta {
            declared_nodes: 2,
            declared_links: 1,
            ..NetworkMeta::default()
        });
        let first = network.get_or_create_node("1").unwrap();
        let second = network.get_or_create_node("2").unwrap();
        let segment = crate::model::LinkSegment {
            external_id: "1".to_string(),
            link: 0,
            segment_type: 0,
            maximum_speed: 50.0,
            free_flow_time: 0.1,
            capacity_per_lane: 1000.0,
            toll: 0.0,
        };
        network.add_link("1", first, second, 5.0, segment).unwrap();

        let err = decode_zoning(Some(file.path()), &network).unwrap_err();
        assert!(matches!(err, Error::Reference(msg) if msg.contains("Zone 3")));
    }
}
