//! Travel demand: time periods and origin-destination matrices

use chrono::TimeDelta;
use hashbrown::HashMap;

use crate::Error;
use crate::model::network::ModeId;
use crate::model::zoning::ZoneId;
use crate::model::{EntityKind, SourceIdRegistry};

/// Index of a time period in `Demands::time_periods`
pub type TimePeriodId = usize;

/// External id of the single time period of a TNTP demand file
pub const ALL_DAY_EXTERNAL_ID: &str = "1";

#[derive(Debug, Clone, PartialEq)]
pub struct TimePeriod {
    pub external_id: String,
    pub description: String,
    /// Offset of the period start from midnight
    pub start: TimeDelta,
    pub duration: TimeDelta,
}

impl TimePeriod {
    /// The whole day, 00:00 to 24:00
    pub fn all_day() -> Self {
        Self {
            external_id: ALL_DAY_EXTERNAL_ID.to_string(),
            description: "All Day".to_string(),
            start: TimeDelta::zero(),
            duration: TimeDelta::hours(24),
        }
    }
}

/// Sparse origin-destination demand matrix, veh/h
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OdDemandMatrix {
    entries: HashMap<(ZoneId, ZoneId), f64>,
}

impl OdDemandMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the demand of a pair, replacing any previous value
    pub fn set(&mut self, origin: ZoneId, destination: ZoneId, demand: f64) {
        self.entries.insert((origin, destination), demand);
    }

    /// Demand between a pair, zero when absent
    pub fn get(&self, origin: ZoneId, destination: ZoneId) -> f64 {
        self.entries
            .get(&(origin, destination))
            .copied()
            .unwrap_or(0.0)
    }

    pub fn contains(&self, origin: ZoneId, destination: ZoneId) -> bool {
        self.entries.contains_key(&(origin, destination))
    }

    /// Number of stored pairs
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.entries.values().sum()
    }

    /// Stored pairs as `(origin, destination, demand)`, in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (ZoneId, ZoneId, f64)> + '_ {
        self.entries
            .iter()
            .map(|(&(origin, destination), &demand)| (origin, destination, demand))
    }
}

#[derive(Debug, Clone)]
pub struct Demands {
    pub time_periods: Vec<TimePeriod>,
    matrices: HashMap<(TimePeriodId, ModeId), OdDemandMatrix>,
    time_period_ids: SourceIdRegistry<TimePeriodId>,
}

impl Default for Demands {
    fn default() -> Self {
        Self {
            time_periods: Vec::new(),
            matrices: HashMap::new(),
            time_period_ids: SourceIdRegistry::new(EntityKind::TimePeriod),
        }
    }
}

impl Demands {
    pub(crate) fn register_time_period(
        &mut self,
        time_period: TimePeriod,
    ) -> Result<TimePeriodId, Error> {
        let id = self.time_periods.len();
        self.time_period_ids
            .register(time_period.external_id.clone(), id)?;
        self.time_periods.push(time_period);
        Ok(id)
    }

    pub(crate) fn register_od_matrix(
        &mut self,
        time_period: TimePeriodId,
        mode: ModeId,
        matrix: OdDemandMatrix,
    ) {
        self.matrices.insert((time_period, mode), matrix);
    }

    pub fn time_period_by_external_id(&self, external_id: &str) -> Option<TimePeriodId> {
        self.time_period_ids.get(external_id)
    }

    pub fn od_matrix(&self, time_period: TimePeriodId, mode: ModeId) -> Option<&OdDemandMatrix> {
        self.matrices.get(&(time_period, mode))
    }

    pub fn matrices(&self) -> impl Iterator<Item = ((TimePeriodId, ModeId), &OdDemandMatrix)> + '_ {
        self.matrices.iter().map(|(key, matrix)| (*key, matrix))
    }
}
