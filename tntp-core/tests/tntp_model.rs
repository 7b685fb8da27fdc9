use std::path::{Path, PathBuf};

use tntp_core::prelude::*;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join(name)
}

fn two_zone_settings() -> NetworkFileSettings {
    NetworkFileSettings {
        length_unit: LengthUnit::Kilometers,
        speed_unit: SpeedUnit::KilometersPerHour,
        free_flow_time_unit: TimeUnit::Minutes,
        capacity_period: CapacityPeriod::new(1.0, TimeUnit::Hours),
        default_maximum_speed: 60.0,
        ..NetworkFileSettings::default()
    }
}

fn two_zone_config() -> TntpModelConfig {
    TntpModelConfig::new(fixture("two_zone/net.tntp"), fixture("two_zone/trips.tntp"))
        .with_network_settings(two_zone_settings())
}

#[test]
fn decode_two_zone_network() {
    let decoded = decode_network(&fixture("two_zone/net.tntp"), &two_zone_settings())
        .expect("impossible to read network");
    let network = &decoded.network;

    assert_eq!(network.node_count(), 2);
    assert!(network.node_by_external_id("1").is_some());
    assert!(network.node_by_external_id("2").is_some());
    assert_eq!(network.link_count(), 1);
    assert_eq!(network.link_segment_count(), 1);
    assert_eq!(network.meta.declared_zones, Some(2));

    let segment_id = network.link_segment_by_external_id("1").unwrap();
    let segment = network.link_segment(segment_id).unwrap();
    assert_eq!(segment.maximum_speed, 60.0);
    assert!((segment.free_flow_time - 10.0 / 60.0).abs() < 1e-6);

    let type_id = network.link_segment_type_by_external_id("3").unwrap();
    assert_eq!(segment.segment_type, type_id);
    let segment_type = network.link_segment_type(type_id).unwrap();
    assert_eq!(segment_type.capacity_per_lane, 1000.0);

    let link = network.link_by_external_id("1").unwrap();
    assert_eq!(link.length, 5.0);
    assert_eq!(link.segment, segment_id);
    assert_eq!(
        network.node(link.upstream).unwrap().external_id,
        "1".to_string()
    );

    assert_eq!(
        decoded.bpr_parameters.get(&segment_id),
        Some(&BprParameters::new(0.15, 4.0))
    );
}

#[test]
fn decode_two_zone_zoning() {
    let network_file = fixture("two_zone/net.tntp");
    let decoded = decode_network(&network_file, &two_zone_settings()).unwrap();
    let zoning = decode_zoning(Some(network_file.as_path()), &decoded.network).unwrap();

    assert_eq!(zoning.zones.len(), 2);
    assert_eq!(zoning.connectoids.len(), 2);
    for external_id in ["1", "2"] {
        let zone = zoning.zone_by_external_id(external_id).unwrap();
        let connectoid = zoning.connectoid_by_external_id(external_id).unwrap();
        assert_eq!(connectoid.zone, zone);
        assert_eq!(
            connectoid.node,
            decoded.network.node_by_external_id(external_id).unwrap()
        );
        assert_eq!(connectoid.length, 1.0);
        assert_eq!(zoning.zone_connectoids(zone).count(), 1);
    }
}

#[test]
fn zoning_without_network_file_is_a_configuration_error() {
    let decoded = decode_network(&fixture("two_zone/net.tntp"), &two_zone_settings()).unwrap();
    let err = decode_zoning(None, &decoded.network).unwrap_err();
    assert!(matches!(err, Error::Configuration(_)));
}

#[test]
fn decode_two_zone_demands() {
    let model = create_tntp_model(&two_zone_config()).expect("impossible to read model");
    let zone_1 = model.zoning.zone_by_external_id("1").unwrap();
    let zone_2 = model.zoning.zone_by_external_id("2").unwrap();

    let time_period = model.demands.time_period_by_external_id("1").unwrap();
    assert_eq!(model.demands.time_periods[time_period].description, "All Day");
    let (mode, _) = model.network.mode().unwrap();
    let matrix = model.demands.od_matrix(time_period, mode).unwrap();

    assert_eq!(matrix.len(), 2);
    assert_eq!(matrix.get(zone_1, zone_2), 50.0);
    assert_eq!(matrix.get(zone_2, zone_1), 30.0);
    assert_eq!(matrix.get(zone_1, zone_1), 0.0);
    assert!(!matrix.contains(zone_2, zone_2));
    assert_eq!(model.total_demand(), 80.0);
}

#[test]
fn demand_zone_count_must_match_zoning() {
    let config = TntpModelConfig::new(
        fixture("two_zone/net.tntp"),
        fixture("two_zone/trips_three_zones.tntp"),
    )
    .with_network_settings(two_zone_settings());
    let err = create_tntp_model(&config).unwrap_err();
    assert!(matches!(err.innermost(), Error::Format(msg) if msg.contains("3 zones")));
    // Raised on the metadata line, before the first origin block
    assert_eq!(err.line(), Some(1));
}

#[test]
fn demand_file_without_origins_gives_empty_matrix() {
    let network_file = fixture("two_zone/net.tntp");
    let decoded = decode_network(&network_file, &two_zone_settings()).unwrap();
    let zoning = decode_zoning(Some(network_file.as_path()), &decoded.network).unwrap();
    let demands = decode_demands(
        &fixture("two_zone/trips_empty.tntp"),
        &zoning,
        &decoded.network,
    )
    .unwrap();

    let (mode, _) = decoded.network.mode().unwrap();
    let matrix = demands.od_matrix(0, mode).unwrap();
    assert!(matrix.is_empty());
}

#[test]
fn node_coordinates_are_attached() {
    let settings = NetworkFileSettings {
        node_coordinate_file: Some(fixture("two_zone/node.tntp")),
        coordinate_reference_system: Some("EPSG:4326".to_string()),
        ..two_zone_settings()
    };
    let decoded = decode_network(&fixture("two_zone/net.tntp"), &settings).unwrap();
    let network = &decoded.network;

    let node = network.node_by_external_id("2").unwrap();
    assert_eq!(
        network.node(node).unwrap().position,
        Some(geo::Point::new(3.0, 4.0))
    );
    assert_eq!(
        network.meta.coordinate_reference_system.as_deref(),
        Some("EPSG:4326")
    );
}

#[test]
fn decode_braess_example() {
    let config = TntpModelConfig::new(
        fixture("braess/Braess_net.tntp"),
        fixture("braess/Braess_trips.tntp"),
    );
    let model = create_tntp_model(&config).expect("impossible to read Braess example");
    let network = &model.network;

    assert_eq!(network.node_count(), 4);
    assert_eq!(network.link_count(), 5);
    assert_eq!(network.meta.first_thru_node, Some(1));
    assert_eq!(network.link_segment_types.len(), 2);

    // 45 km in 45 minutes, fixed by the first type 1 row
    let type_1 = network.link_segment_type_by_external_id("1").unwrap();
    let speed = network.link_segment_types[type_1].mode_properties.maximum_speed;
    assert!((speed - 60.0).abs() < 1e-3);

    // Speed column is zero everywhere, segments fall back to the default
    for (_, _, _, segment) in network.link_segments() {
        assert_eq!(segment.maximum_speed, 25.0);
    }
    let bridge = network.link_segment_by_external_id("5").unwrap();
    assert_eq!(network.link_segment(bridge).unwrap().toll, 2.5);
    assert_eq!(model.bpr_parameters.len(), 5);

    assert_eq!(model.zone_count(), 4);
    assert_eq!(model.total_demand(), 6.0);
    let origin = model.zoning.zone_by_external_id("1").unwrap();
    let destination = model.zoning.zone_by_external_id("4").unwrap();
    let (_, matrix) = model.demands.matrices().next().unwrap();
    assert_eq!(matrix.get(origin, destination), 6.0);
}

#[test]
fn missing_demand_file_fails_before_decoding() {
    let config = TntpModelConfig::new(
        fixture("two_zone/net.tntp"),
        fixture("two_zone/does_not_exist.tntp"),
    );
    let err = create_tntp_model(&config).unwrap_err();
    assert!(matches!(err, Error::IoError(_)));
}
