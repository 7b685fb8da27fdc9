use log::info;

use super::config::TntpModelConfig;
use super::tntp::{decode_demands, decode_network, decode_zoning};
use crate::{Error, TntpModel};

/// Creates a TNTP model based on the provided configuration
///
/// Runs network, zoning and demand decoding in that order; a failing stage
/// stops the pipeline and nothing of the partial model is returned.
///
/// # Errors
///
/// Returns an error if there are problems reading or processing data
pub fn create_tntp_model(config: &TntpModelConfig) -> Result<TntpModel, Error> {
    validate_config(config)?;
    let Some(network_file) = config.network_file.as_deref() else {
        return Err(Error::Configuration("No network file configured".to_string()));
    };

    info!("Processing network data: {}", network_file.display());
    let decoded = decode_network(network_file, &config.network)?;

    info!("Processing zoning");
    let zoning = decode_zoning(Some(network_file), &decoded.network)?;

    info!("Processing demand data: {}", config.demand_file.display());
    let demands = decode_demands(&config.demand_file, &zoning, &decoded.network)?;

    let model = TntpModel {
        network: decoded.network,
        bpr_parameters: decoded.bpr_parameters,
        zoning,
        demands,
    };
    info!("{}", model.summary());
    Ok(model)
}

fn validate_config(config: &TntpModelConfig) -> Result<(), Error> {
    config.network.validate()?;

    let Some(network_file) = &config.network_file else {
        return Err(Error::Configuration(
            "No network file provided in the configuration".to_string(),
        ));
    };

    let files = [
        Some(network_file),
        Some(&config.demand_file),
        config.network.node_coordinate_file.as_ref(),
    ];
    for file in files.into_iter().flatten() {
        if !file.is_file() {
            return Err(Error::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("TNTP file not found: {}", file.display()),
            )));
        }
    }

    Ok(())
}
