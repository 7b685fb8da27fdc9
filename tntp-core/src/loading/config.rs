use std::fmt;
use std::path::PathBuf;

use hashbrown::{HashMap, HashSet};
use serde::Deserialize;

use crate::Error;
use crate::units::{CapacityPeriod, LengthUnit, SpeedUnit, TimeUnit};

/// Logical columns of a network file link row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NetworkColumn {
    UpstreamNode,
    DownstreamNode,
    CapacityPerLane,
    Length,
    FreeFlowTime,
    B,
    Power,
    MaximumSpeed,
    Toll,
    LinkType,
}

impl NetworkColumn {
    pub const REQUIRED: [NetworkColumn; 8] = [
        NetworkColumn::UpstreamNode,
        NetworkColumn::DownstreamNode,
        NetworkColumn::CapacityPerLane,
        NetworkColumn::Length,
        NetworkColumn::FreeFlowTime,
        NetworkColumn::MaximumSpeed,
        NetworkColumn::Toll,
        NetworkColumn::LinkType,
    ];
}

impl fmt::Display for NetworkColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NetworkColumn::UpstreamNode => "upstream node",
            NetworkColumn::DownstreamNode => "downstream node",
            NetworkColumn::CapacityPerLane => "capacity per lane",
            NetworkColumn::Length => "length",
            NetworkColumn::FreeFlowTime => "free flow time",
            NetworkColumn::B => "B",
            NetworkColumn::Power => "power",
            NetworkColumn::MaximumSpeed => "maximum speed",
            NetworkColumn::Toll => "toll",
            NetworkColumn::LinkType => "link type",
        };
        f.write_str(name)
    }
}

/// Zero-based position of each logical column in a whitespace separated row
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct ColumnSchema {
    columns: HashMap<NetworkColumn, usize>,
}

impl Default for ColumnSchema {
    /// Column order of most published TNTP networks:
    /// `init_node term_node capacity length free_flow_time b power speed toll link_type`
    fn default() -> Self {
        Self::empty()
            .with(NetworkColumn::UpstreamNode, 0)
            .with(NetworkColumn::DownstreamNode, 1)
            .with(NetworkColumn::CapacityPerLane, 2)
            .with(NetworkColumn::Length, 3)
            .with(NetworkColumn::FreeFlowTime, 4)
            .with(NetworkColumn::B, 5)
            .with(NetworkColumn::Power, 6)
            .with(NetworkColumn::MaximumSpeed, 7)
            .with(NetworkColumn::Toll, 8)
            .with(NetworkColumn::LinkType, 9)
    }
}

impl ColumnSchema {
    pub fn empty() -> Self {
        Self {
            columns: HashMap::new(),
        }
    }

    #[must_use]
    pub fn with(mut self, column: NetworkColumn, index: usize) -> Self {
        self.columns.insert(column, index);
        self
    }

    #[must_use]
    pub fn without(mut self, column: NetworkColumn) -> Self {
        self.columns.remove(&column);
        self
    }

    pub fn index(&self, column: NetworkColumn) -> Option<usize> {
        self.columns.get(&column).copied()
    }

    /// Index of a required column
    ///
    /// # Errors
    ///
    /// `Error::Configuration` when the column is not mapped
    pub fn required(&self, column: NetworkColumn) -> Result<usize, Error> {
        self.index(column).ok_or_else(|| {
            Error::Configuration(format!("No column index configured for {column}"))
        })
    }

    /// Checks that every required column is mapped and no two columns share an index
    pub fn validate(&self) -> Result<(), Error> {
        for column in NetworkColumn::REQUIRED {
            self.required(column)?;
        }
        let mut seen = HashSet::with_capacity(self.columns.len());
        for (column, index) in &self.columns {
            if !seen.insert(*index) {
                return Err(Error::Configuration(format!(
                    "Column index {index} of {column} is mapped to more than one column"
                )));
            }
        }
        Ok(())
    }
}

/// Settings of the network decoder
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NetworkFileSettings {
    pub columns: ColumnSchema,
    pub length_unit: LengthUnit,
    pub speed_unit: SpeedUnit,
    /// Unit of the free flow time column
    pub free_flow_time_unit: TimeUnit,
    /// Period the capacity column refers to
    pub capacity_period: CapacityPeriod,
    /// Maximum speed, in `speed_unit`, for rows without a usable speed value
    pub default_maximum_speed: f64,
    pub node_coordinate_file: Option<PathBuf>,
    pub coordinate_reference_system: Option<String>,
}

impl Default for NetworkFileSettings {
    fn default() -> Self {
        Self {
            columns: ColumnSchema::default(),
            length_unit: LengthUnit::Kilometers,
            speed_unit: SpeedUnit::KilometersPerHour,
            free_flow_time_unit: TimeUnit::Minutes,
            capacity_period: CapacityPeriod::default(),
            default_maximum_speed: 25.0,
            node_coordinate_file: None,
            coordinate_reference_system: None,
        }
    }
}

impl NetworkFileSettings {
    /// # Errors
    ///
    /// `Error::Configuration` for incomplete column mappings or unusable values
    pub fn validate(&self) -> Result<(), Error> {
        self.columns.validate()?;

        if !(self.default_maximum_speed.is_finite() && self.default_maximum_speed > 0.0) {
            return Err(Error::Configuration(format!(
                "Default maximum speed must be positive and finite, got {}",
                self.default_maximum_speed
            )));
        }
        let period = self.capacity_period.hours();
        if !(period.is_finite() && period > 0.0) {
            return Err(Error::Configuration(format!(
                "Capacity period must be positive, got {} {}",
                self.capacity_period.duration, self.capacity_period.unit
            )));
        }
        Ok(())
    }
}

/// Locations and settings for reading one TNTP dataset
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TntpModelConfig {
    pub network_file: Option<PathBuf>,
    pub demand_file: PathBuf,
    pub network: NetworkFileSettings,
}

impl TntpModelConfig {
    pub fn new(network_file: impl Into<PathBuf>, demand_file: impl Into<PathBuf>) -> Self {
        Self {
            network_file: Some(network_file.into()),
            demand_file: demand_file.into(),
            network: NetworkFileSettings::default(),
        }
    }

    #[must_use]
    pub fn with_network_settings(mut self, network: NetworkFileSettings) -> Self {
        self.network = network;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_schema_is_valid() {
        let schema = ColumnSchema::default();
        schema.validate().unwrap();
        assert_eq!(schema.index(NetworkColumn::LinkType), Some(9));
    }

    #[test]
    fn bpr_columns_are_optional() {
        let schema = ColumnSchema::default()
            .without(NetworkColumn::B)
            .without(NetworkColumn::Power);
        schema.validate().unwrap();
        assert_eq!(schema.index(NetworkColumn::B), None);
    }

    #[test]
    fn missing_required_column_fails_validation() {
        let schema = ColumnSchema::default().without(NetworkColumn::Length);
        let err = schema.validate().unwrap_err();
        assert!(matches!(err, Error::Configuration(msg) if msg.contains("length")));
    }

    #[test]
    fn shared_column_index_fails_validation() {
        let schema = ColumnSchema::default().with(NetworkColumn::Toll, 0);
        assert!(matches!(schema.validate(), Err(Error::Configuration(_))));
    }

    #[test]
    fn settings_reject_non_positive_values() {
        let settings = NetworkFileSettings {
            default_maximum_speed: 0.0,
            ..NetworkFileSettings::default()
        };
        assert!(matches!(settings.validate(), Err(Error::Configuration(_))));

        let settings = NetworkFileSettings {
            capacity_period: CapacityPeriod::new(0.0, TimeUnit::Hours),
            ..NetworkFileSettings::default()
        };
        assert!(matches!(settings.validate(), Err(Error::Configuration(_))));
    }
}
