//! Demand (trips) file decoding
//!
//! ```text
//! <NUMBER OF ZONES> 2
//! <END OF METADATA>
//! Origin 1
//!     2 :   50.0;
//! ```

use std::path::Path;

use hashbrown::HashMap;
use itertools::Itertools;
use log::{info, warn};

use super::metadata::{
    NUMBER_OF_ZONES, TntpMetadata, is_comment, is_end_of_metadata, parse_canonical_id, trimmed_lines,
};
use crate::Error;
use crate::model::demand::{Demands, OdDemandMatrix, TimePeriod};
use crate::model::zoning::{ZoneId, Zoning};
use crate::model::PhysicalNetwork;

const ORIGIN: &str = "Origin";

/// Relative tolerance before a declared `<TOTAL OD FLOW>` is reported as off
const TOTAL_FLOW_TOLERANCE: f64 = 1e-6;

/// Decodes a TNTP demand file into a single all-day OD matrix for the network's mode
///
/// # Errors
///
/// `Error::Format` when the declared zone count differs from `zoning`, or for
/// malformed origin blocks and values; `Error::Reference` for unknown zones
pub fn decode_demands(
    path: &Path,
    zoning: &Zoning,
    network: &PhysicalNetwork,
) -> Result<Demands, Error> {
    let Some((mode, _)) = network.mode() else {
        return Err(Error::Validation("Network has no mode registered".to_string()));
    };

    info!("Decoding TNTP demand file: {}", path.display());

    let mut demands = Demands::default();
    let time_period = demands.register_time_period(TimePeriod::all_day())?;

    let mut metadata = TntpMetadata::default();
    let mut blocks: Option<OriginBlocks<'_>> = None;

    for line in trimmed_lines(path)? {
        let (line_number, line) = line?;
        let Some(reader) = blocks.as_mut() else {
            if is_end_of_metadata(&line) {
                check_zone_count(&metadata, zoning).map_err(|e| e.at(path, line_number))?;
                blocks = Some(OriginBlocks::new(zoning));
            } else {
                metadata
                    .read_line(&line)
                    .map_err(|e| e.at(path, line_number))?;
                // Fail before any OD entry is read
                if metadata.zones.is_some() {
                    check_zone_count(&metadata, zoning).map_err(|e| e.at(path, line_number))?;
                }
            }
            continue;
        };

        if line.is_empty() || is_comment(&line) {
            continue;
        }
        reader
            .read_line(&line)
            .map_err(|e| e.at(path, line_number))?;
    }

    let Some(reader) = blocks else {
        return Err(Error::Format(format!(
            "'{}' has no <END OF METADATA> line",
            path.display()
        )));
    };
    let matrix = reader.finish();

    let total = matrix.total();
    if let Some(declared) = metadata.total_od_flow {
        if (declared - total).abs() > TOTAL_FLOW_TOLERANCE * declared.abs().max(1.0) {
            warn!("Declared total OD flow {declared} differs from parsed total {total}");
        }
    }
    info!(
        "Read {} OD pairs with a total demand of {total}",
        matrix.len()
    );

    demands.register_od_matrix(time_period, mode, matrix);
    Ok(demands)
}

fn check_zone_count(metadata: &TntpMetadata, zoning: &Zoning) -> Result<(), Error> {
    let declared = TntpMetadata::require(metadata.zones, NUMBER_OF_ZONES)?;
    if declared != zoning.zone_count() {
        return Err(Error::Format(format!(
            "Demand file declares {declared} zones, the zoning has {}",
            zoning.zone_count()
        )));
    }
    Ok(())
}

/// Accumulates `Origin` blocks into an OD matrix
struct OriginBlocks<'z> {
    zoning: &'z Zoning,
    matrix: OdDemandMatrix,
    origin: Option<ZoneId>,
    destinations: HashMap<ZoneId, f64>,
}

impl<'z> OriginBlocks<'z> {
    fn new(zoning: &'z Zoning) -> Self {
        Self {
            zoning,
            matrix: OdDemandMatrix::new(),
            origin: None,
            destinations: HashMap::new(),
        }
    }

    fn zone(&self, external_id: &str) -> Result<ZoneId, Error> {
        parse_canonical_id(external_id)
            .and_then(|id| self.zoning.zone_by_external_id(&id))
            .ok_or_else(|| Error::Reference(format!("Unknown zone '{external_id}'")))
    }

    fn read_line(&mut self, line: &str) -> Result<(), Error> {
        if let Some(rest) = line.strip_prefix(ORIGIN) {
            self.flush();
            let external_id = rest.split_whitespace().next().ok_or_else(|| {
                Error::Format(format!("Origin line without a zone id: '{line}'"))
            })?;
            self.origin = Some(self.zone(external_id)?);
            return Ok(());
        }

        if self.origin.is_none() {
            return Err(Error::Format(format!(
                "Demand values outside an Origin block: '{line}'"
            )));
        }

        let compact: String = line.chars().filter(|c| !c.is_whitespace()).collect();
        let tokens: Vec<&str> = compact
            .split([':', ';'])
            .filter(|token| !token.is_empty())
            .collect();
        if tokens.len() % 2 != 0 {
            return Err(Error::Format(format!(
                "Expected 'destination : demand' pairs, got '{line}'"
            )));
        }

        for (destination, value) in tokens.into_iter().tuples() {
            let destination = self.zone(destination)?;
            let demand: f64 = value
                .parse()
                .map_err(|_| Error::Format(format!("Invalid demand value '{value}'")))?;
            if !(demand.is_finite() && demand >= 0.0) {
                return Err(Error::Format(format!(
                    "Demand must be finite and non-negative, got {demand}"
                )));
            }
            self.destinations.insert(destination, demand);
        }
        Ok(())
    }

    /// Moves the current origin's destinations into the matrix
    fn flush(&mut self) {
        if let Some(origin) = self.origin {
            for (destination, demand) in self.destinations.drain() {
                self.matrix.set(origin, destination, demand);
            }
        }
    }

    fn finish(mut self) -> OdDemandMatrix {
        self.flush();
        self.matrix
    }
}
