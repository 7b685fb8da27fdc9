use std::fs;

use tntp::{SettingsError, read_tntp_project};

const NETWORK: &str = "<NUMBER OF ZONES> 2
<NUMBER OF NODES> 3
<NUMBER OF LINKS> 3
<END OF METADATA>

~ init term capacity length fftt b power speed toll type ;
\t1\t3\t24000\t2\t3\t0.15\t4\t40\t0\t3\t;
\t3\t2\t24000\t2\t3\t0.15\t4\t40\t0\t3\t;
\t2\t1\t48000\t3\t4\t0.15\t4\t0\t0\t3\t;
";

const TRIPS: &str = "<NUMBER OF ZONES> 2
<TOTAL OD FLOW> 150.0
<END OF METADATA>

Origin \t1
    1 :      0.0;     2 :    100.0;
Origin \t2
    1 :     50.0;
";

const SETTINGS: &str = r#"
network_file = "data/net.tntp"
demand_file = "data/trips.tntp"

[network]
default_maximum_speed = 30.0

[network.capacity_period]
duration = 24.0
unit = "h"
"#;

#[test]
fn reads_project_relative_to_settings_file() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("data")).unwrap();
    fs::write(dir.path().join("data/net.tntp"), NETWORK).unwrap();
    fs::write(dir.path().join("data/trips.tntp"), TRIPS).unwrap();
    let settings = dir.path().join("settings.toml");
    fs::write(&settings, SETTINGS).unwrap();

    let model = read_tntp_project(&settings).expect("impossible to read project");
    assert_eq!(model.node_count(), 3);
    assert_eq!(model.link_count(), 3);
    assert_eq!(model.zone_count(), 2);
    assert_eq!(model.total_demand(), 150.0);

    // 24000 per day, first row of type 3 wins
    let network = &model.network;
    assert_eq!(network.link_segment_types.len(), 1);
    assert!((network.link_segment_types[0].capacity_per_lane - 1000.0).abs() < 1e-9);

    let third = network.link_segment_by_external_id("3").unwrap();
    let segment = network.link_segment(third).unwrap();
    assert_eq!(segment.maximum_speed, 30.0);
    assert!((segment.capacity_per_lane - 2000.0).abs() < 1e-9);
}

#[test]
fn missing_settings_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_tntp_project(&dir.path().join("missing.toml")).unwrap_err();
    assert!(matches!(err, SettingsError::Io { .. }));
}

#[test]
fn model_errors_pass_through() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("data")).unwrap();
    fs::write(
        dir.path().join("data/net.tntp"),
        NETWORK.replace("<NUMBER OF LINKS> 3", "<NUMBER OF LINKS> 4"),
    )
    .unwrap();
    fs::write(dir.path().join("data/trips.tntp"), TRIPS).unwrap();
    let settings = dir.path().join("settings.toml");
    fs::write(&settings, SETTINGS).unwrap();

    match read_tntp_project(&settings).unwrap_err() {
        SettingsError::Model(err) => assert!(matches!(err.innermost(), tntp::Error::Format(_))),
        other => panic!("expected a model error, got {other:?}"),
    }
}
