//! Zones and the connectoids attaching them to the road network

use petgraph::graph::NodeIndex;

use crate::Error;
use crate::model::{EntityKind, SourceIdRegistry};

/// Index of a zone in `Zoning::zones`
pub type ZoneId = usize;
/// Index of a connectoid in `Zoning::connectoids`
pub type ConnectoidId = usize;

/// Connector length in km given to every connectoid
pub const DEFAULT_CONNECTOID_LENGTH: f64 = 1.0;

#[derive(Debug, Clone)]
pub struct Zone {
    pub external_id: String,
}

/// Centroid connector between a zone and a network node
#[derive(Debug, Clone)]
pub struct Connectoid {
    pub external_id: String,
    pub zone: ZoneId,
    pub node: NodeIndex,
    /// km
    pub length: f64,
}

#[derive(Debug, Clone)]
pub struct Zoning {
    pub zones: Vec<Zone>,
    pub connectoids: Vec<Connectoid>,
    zone_ids: SourceIdRegistry<ZoneId>,
    connectoid_ids: SourceIdRegistry<ConnectoidId>,
}

impl Default for Zoning {
    fn default() -> Self {
        Self {
            zones: Vec::new(),
            connectoids: Vec::new(),
            zone_ids: SourceIdRegistry::new(EntityKind::Zone),
            connectoid_ids: SourceIdRegistry::new(EntityKind::Connectoid),
        }
    }
}

impl Zoning {
    pub(crate) fn with_capacity(zones: usize) -> Self {
        let mut zoning = Self::default();
        zoning.zones.reserve(zones);
        zoning.connectoids.reserve(zones);
        zoning
    }

    pub(crate) fn add_zone(&mut self, external_id: &str) -> Result<ZoneId, Error> {
        let zone = self.zones.len();
        self.zone_ids.register(external_id, zone)?;
        self.zones.push(Zone {
            external_id: external_id.to_string(),
        });
        Ok(zone)
    }

    pub(crate) fn add_connectoid(
        &mut self,
        external_id: &str,
        zone: ZoneId,
        node: NodeIndex,
        length: f64,
    ) -> Result<ConnectoidId, Error> {
        let connectoid = self.connectoids.len();
        self.connectoid_ids.register(external_id, connectoid)?;
        self.connectoids.push(Connectoid {
            external_id: external_id.to_string(),
            zone,
            node,
            length,
        });
        Ok(connectoid)
    }

    pub fn zone_count(&self) -> usize {
        self.zones.len()
    }

    pub fn zone(&self, zone: ZoneId) -> Option<&Zone> {
        self.zones.get(zone)
    }

    pub fn zone_by_external_id(&self, external_id: &str) -> Option<ZoneId> {
        self.zone_ids.get(external_id)
    }

    pub fn connectoid_by_external_id(&self, external_id: &str) -> Option<&Connectoid> {
        self.connectoid_ids
            .get(external_id)
            .and_then(|connectoid| self.connectoids.get(connectoid))
    }

    /// Connectoids attached to `zone`
    pub fn zone_connectoids(&self, zone: ZoneId) -> impl Iterator<Item = &Connectoid> + '_ {
        self.connectoids
            .iter()
            .filter(move |connectoid| connectoid.zone == zone)
    }
}
