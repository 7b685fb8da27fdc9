//! Network file decoding: metadata, then one directed link per data row

use std::path::Path;

use log::{debug, info, warn};
use petgraph::graph::NodeIndex;

use super::coordinates::read_node_coordinates;
use super::metadata::{
    NUMBER_OF_LINKS, NUMBER_OF_NODES, TntpMetadata, canonical_id, is_comment, is_end_of_metadata,
    trimmed_lines,
};
use crate::Error;
use crate::loading::config::{ColumnSchema, NetworkColumn, NetworkFileSettings};
use crate::model::network::{
    BprParameters, DEFAULT_MAXIMUM_DENSITY_PER_LANE, LinkSegment, LinkSegmentType, Mode, ModeId,
    ModeProperties, NetworkMeta, PhysicalNetwork,
};
use crate::model::BprParameterTable;
use crate::units::CanonicalUnit;

/// Speeds at or below this value are treated as "not given"
const SPEED_EPSILON: f64 = 1e-6;

/// Output of the network decoder
#[derive(Debug, Clone)]
pub struct DecodedNetwork {
    pub network: PhysicalNetwork,
    /// BPR coefficients of segments whose rows carry B and/or POWER columns
    pub bpr_parameters: BprParameterTable,
}

/// Decodes a TNTP network file, and the node coordinate file if one is configured
///
/// # Errors
///
/// Returns an error for invalid settings, unreadable files, malformed rows,
/// unsupported link types, node ids above the declared node count or a link
/// row count that differs from the declared one
pub fn decode_network(path: &Path, settings: &NetworkFileSettings) -> Result<DecodedNetwork, Error> {
    settings.validate()?;
    let columns = LinkColumns::resolve(&settings.columns)?;

    info!("Decoding TNTP network file: {}", path.display());

    let mut metadata = TntpMetadata::default();
    let mut rows: Option<LinkRowReader<'_>> = None;
    let mut header_seen = false;

    for line in trimmed_lines(path)? {
        let (line_number, line) = line?;
        let Some(reader) = rows.as_mut() else {
            if is_end_of_metadata(&line) {
                rows = Some(
                    LinkRowReader::new(settings, columns, &metadata)
                        .map_err(|e| e.at(path, line_number))?,
                );
            } else {
                metadata
                    .read_line(&line)
                    .map_err(|e| e.at(path, line_number))?;
            }
            continue;
        };

        if line.is_empty() {
            continue;
        }
        if is_comment(&line) {
            header_seen = true;
            continue;
        }
        if !header_seen {
            warn!(
                "{}:{line_number}: skipping line before the link table header",
                path.display()
            );
            continue;
        }
        reader
            .read_row(&line)
            .map_err(|e| e.at(path, line_number))?;
    }

    let Some(reader) = rows else {
        return Err(Error::Format(format!(
            "'{}' has no <END OF METADATA> line",
            path.display()
        )));
    };
    let mut decoded = reader.finish(path)?;

    if let Some(coordinates) = &settings.node_coordinate_file {
        read_node_coordinates(coordinates, &mut decoded.network)?;
    }

    info!(
        "Created {} nodes, {} links and {} link segment types ({} with BPR parameters)",
        decoded.network.node_count(),
        decoded.network.link_count(),
        decoded.network.link_segment_types.len(),
        decoded.bpr_parameters.len()
    );
    Ok(decoded)
}

/// Column indices resolved once before any row is read
#[derive(Debug, Clone, Copy)]
struct LinkColumns {
    upstream: usize,
    downstream: usize,
    capacity: usize,
    length: usize,
    free_flow_time: usize,
    b: Option<usize>,
    power: Option<usize>,
    maximum_speed: usize,
    toll: usize,
    link_type: usize,
}

impl LinkColumns {
    fn resolve(schema: &ColumnSchema) -> Result<Self, Error> {
        Ok(Self {
            upstream: schema.required(NetworkColumn::UpstreamNode)?,
            downstream: schema.required(NetworkColumn::DownstreamNode)?,
            capacity: schema.required(NetworkColumn::CapacityPerLane)?,
            length: schema.required(NetworkColumn::Length)?,
            free_flow_time: schema.required(NetworkColumn::FreeFlowTime)?,
            b: schema.index(NetworkColumn::B),
            power: schema.index(NetworkColumn::Power),
            maximum_speed: schema.required(NetworkColumn::MaximumSpeed)?,
            toll: schema.required(NetworkColumn::Toll)?,
            link_type: schema.required(NetworkColumn::LinkType)?,
        })
    }
}

/// Fields of one whitespace separated link row
struct LinkRow<'l> {
    fields: Vec<&'l str>,
}

impl<'l> LinkRow<'l> {
    fn new(line: &'l str) -> Self {
        Self {
            fields: line.split_whitespace().collect(),
        }
    }

    fn field(&self, index: usize, column: NetworkColumn) -> Result<&'l str, Error> {
        self.fields.get(index).copied().ok_or_else(|| {
            Error::Format(format!(
                "Row has {} fields, no {column} value at column {index}",
                self.fields.len()
            ))
        })
    }

    fn float(&self, index: usize, column: NetworkColumn) -> Result<f64, Error> {
        let raw = self.field(index, column)?;
        raw.parse()
            .map_err(|_| Error::Format(format!("Invalid {column} value '{raw}'")))
    }

    fn integer(&self, index: usize, column: NetworkColumn) -> Result<u64, Error> {
        let raw = self.field(index, column)?;
        raw.parse()
            .map_err(|_| Error::Format(format!("Invalid {column} value '{raw}'")))
    }
}

/// Link data section state: the network under construction and its side tables
struct LinkRowReader<'s> {
    settings: &'s NetworkFileSettings,
    columns: LinkColumns,
    network: PhysicalNetwork,
    mode: ModeId,
    bpr_parameters: BprParameterTable,
    rows: usize,
}

impl<'s> LinkRowReader<'s> {
    fn new(
        settings: &'s NetworkFileSettings,
        columns: LinkColumns,
        metadata: &TntpMetadata,
    ) -> Result<Self, Error> {
        let meta = NetworkMeta {
            declared_nodes: TntpMetadata::require(metadata.nodes, NUMBER_OF_NODES)?,
            declared_links: TntpMetadata::require(metadata.links, NUMBER_OF_LINKS)?,
            declared_zones: metadata.zones,
            first_thru_node: metadata.first_thru_node,
            coordinate_reference_system: settings.coordinate_reference_system.clone(),
        };
        debug!(
            "Network metadata: {} nodes, {} links",
            meta.declared_nodes, meta.declared_links
        );

        let mut network = PhysicalNetwork::new(meta);
        let mode = network.register_mode(Mode::tntp())?;
        Ok(Self {
            settings,
            columns,
            network,
            mode,
            bpr_parameters: BprParameterTable::new(),
            rows: 0,
        })
    }

    fn node(&mut self, row: &LinkRow<'_>, index: usize, column: NetworkColumn) -> Result<NodeIndex, Error> {
        let id = row.integer(index, column)?;
        let declared = self.network.meta.declared_nodes;
        if id == 0 || id > declared as u64 {
            return Err(Error::Reference(format!(
                "Node id {id} is outside the declared range 1..={declared}"
            )));
        }
        self.network.get_or_create_node(&canonical_id(id))
    }

    fn read_row(&mut self, line: &str) -> Result<(), Error> {
        let row = LinkRow::new(line);
        let columns = self.columns;
        let settings = self.settings;
        let speed_unit = settings.speed_unit;

        let upstream = self.node(&row, columns.upstream, NetworkColumn::UpstreamNode)?;
        let downstream = self.node(&row, columns.downstream, NetworkColumn::DownstreamNode)?;

        let length = settings
            .length_unit
            .convert(row.float(columns.length, NetworkColumn::Length)?);
        let external_id = (self.rows + 1).to_string();

        let raw_speed = row.float(columns.maximum_speed, NetworkColumn::MaximumSpeed)?;
        let maximum_speed = if raw_speed > SPEED_EPSILON && raw_speed.is_finite() {
            speed_unit.convert(raw_speed)
        } else {
            speed_unit.convert(settings.default_maximum_speed)
        };

        let free_flow_time = settings
            .free_flow_time_unit
            .convert(row.float(columns.free_flow_time, NetworkColumn::FreeFlowTime)?);
        let capacity_per_lane = settings
            .capacity_period
            .to_hourly(row.float(columns.capacity, NetworkColumn::CapacityPerLane)?);
        let toll = row.float(columns.toll, NetworkColumn::Toll)?;

        let link_type = row.integer(columns.link_type, NetworkColumn::LinkType)?;
        let type_speed = match link_type {
            1 | 2 => {
                let derived = length / free_flow_time * speed_unit.multiplier();
                if derived.is_finite() {
                    derived
                } else {
                    maximum_speed
                }
            }
            3 => maximum_speed,
            other => {
                return Err(Error::Format(format!("Unsupported link type {other}")));
            }
        };

        // The first row of a type fixes its capacity and speed
        let type_external_id = link_type.to_string();
        let mode = self.mode;
        let (segment_type, created) =
            self.network
                .get_or_create_link_segment_type(&type_external_id, || LinkSegmentType {
                    external_id: type_external_id.clone(),
                    capacity_per_lane,
                    maximum_density_per_lane: DEFAULT_MAXIMUM_DENSITY_PER_LANE,
                    mode_properties: ModeProperties {
                        mode,
                        maximum_speed: type_speed,
                    },
                })?;
        if !created {
            let stored = &self.network.link_segment_types[segment_type];
            if stored.capacity_per_lane != capacity_per_lane {
                warn!(
                    "Link {external_id} reuses link segment type {type_external_id} with capacity {}, row capacity {capacity_per_lane} ignored",
                    stored.capacity_per_lane
                );
            }
        }

        let segment = LinkSegment {
            external_id: external_id.clone(),
            link: 0,
            segment_type,
            maximum_speed,
            free_flow_time,
            capacity_per_lane,
            toll,
        };
        let edge = self
            .network
            .add_link(&external_id, upstream, downstream, length, segment)?;

        let alpha = columns
            .b
            .map(|index| row.float(index, NetworkColumn::B))
            .transpose()?;
        let beta = columns
            .power
            .map(|index| row.float(index, NetworkColumn::Power))
            .transpose()?;
        if alpha.is_some() || beta.is_some() {
            self.bpr_parameters.insert(
                edge,
                BprParameters::new(
                    alpha.unwrap_or(BprParameters::DEFAULT_ALPHA),
                    beta.unwrap_or(BprParameters::DEFAULT_BETA),
                ),
            );
        }

        self.rows += 1;
        Ok(())
    }

    fn finish(self, path: &Path) -> Result<DecodedNetwork, Error> {
        let declared = self.network.meta.declared_links;
        if self.rows != declared {
            return Err(Error::Format(format!(
                "'{}' declares {declared} links but contains {} link rows",
                path.display(),
                self.rows
            )));
        }
        Ok(DecodedNetwork {
            network: self.network,
            bpr_parameters: self.bpr_parameters,
        })
    }
}
