use hashbrown::HashMap;
use petgraph::graph::EdgeIndex;

use super::{BprParameters, Demands, PhysicalNetwork, Zoning};

/// BPR coefficients keyed by link segment, for segments whose row supplied them
pub type BprParameterTable = HashMap<EdgeIndex, BprParameters>;

/// Network, zoning and demands read from one TNTP dataset
#[derive(Debug, Clone)]
pub struct TntpModel {
    pub network: PhysicalNetwork,
    pub bpr_parameters: BprParameterTable,
    pub zoning: Zoning,
    pub demands: Demands,
}

impl TntpModel {
    pub fn node_count(&self) -> usize {
        self.network.node_count()
    }

    pub fn link_count(&self) -> usize {
        self.network.link_count()
    }

    pub fn zone_count(&self) -> usize {
        self.zoning.zone_count()
    }

    /// BPR coefficients of a segment, if its row supplied any
    pub fn bpr_parameters(&self, segment: EdgeIndex) -> Option<BprParameters> {
        self.bpr_parameters.get(&segment).copied()
    }

    /// Sum of all demand over every matrix
    pub fn total_demand(&self) -> f64 {
        self.demands
            .matrices()
            .map(|(_, matrix)| matrix.total())
            .sum()
    }

    /// Short description of the model contents
    pub fn summary(&self) -> String {
        format!(
            "TNTP model with {} nodes, {} links, {} link segment types, {} zones and {:.1} total demand",
            self.node_count(),
            self.link_count(),
            self.network.link_segment_types.len(),
            self.zone_count(),
            self.total_demand()
        )
    }
}
