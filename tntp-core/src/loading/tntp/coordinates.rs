//! Node coordinate file: `id x y ;` rows attaching positions to existing nodes

use std::path::Path;

use geo::Point;
use log::info;

use super::metadata::{parse_canonical_id, trimmed_lines};
use crate::Error;
use crate::model::PhysicalNetwork;

/// Attaches the positions listed in `path` to the nodes of `network`
///
/// Lines not starting with a digit (headers, comments) are skipped.
///
/// # Errors
///
/// `Error::Reference` for rows naming a node the network does not contain,
/// `Error::Format` for rows with missing or malformed coordinates
pub fn read_node_coordinates(path: &Path, network: &mut PhysicalNetwork) -> Result<(), Error> {
    info!("Reading node coordinates: {}", path.display());

    let mut positioned = 0usize;
    for line in trimmed_lines(path)? {
        let (line_number, line) = line?;
        if !line.starts_with(|c: char| c.is_ascii_digit()) {
            continue;
        }
        read_coordinate_row(&line, network).map_err(|e| e.at(path, line_number))?;
        positioned += 1;
    }

    info!(
        "Positioned {positioned} of {} nodes",
        network.node_count()
    );
    Ok(())
}

fn read_coordinate_row(line: &str, network: &mut PhysicalNetwork) -> Result<(), Error> {
    let mut fields = line
        .split(|c: char| c.is_whitespace() || c == ';')
        .filter(|field| !field.is_empty());

    let (Some(id), Some(x), Some(y)) = (fields.next(), fields.next(), fields.next()) else {
        return Err(Error::Format(format!(
            "Expected 'id x y' coordinate row, got '{line}'"
        )));
    };
    let parse = |raw: &str| {
        raw.parse::<f64>()
            .map_err(|_| Error::Format(format!("Invalid coordinate '{raw}' for node {id}")))
    };
    let position = Point::new(parse(x)?, parse(y)?);

    let node = parse_canonical_id(id)
        .and_then(|external_id| network.node_by_external_id(&external_id))
        .ok_or_else(|| {
            Error::Reference(format!("Coordinate file references unknown node {id}"))
        })?;
    network.set_node_position(node, position);
    Ok(())
}
