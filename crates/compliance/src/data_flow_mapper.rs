//! Registers data assets and the directed flows between them.

use crate::error::{ComplianceError, Result};
use governance_core::{define_domain_id, Identified, RecordStore};
use serde::{Deserialize, Serialize};
use std::sync::RwLock;

define_domain_id!(AssetId, "asset");
define_domain_id!(FlowId, "flow");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetCategory {
    Personal,
    Sensitive,
    Financial,
    Health,
    Biometric,
    Children,
    Public,
}

impl AssetCategory {
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "personal" => Ok(Self::Personal),
            "sensitive" => Ok(Self::Sensitive),
            "financial" => Ok(Self::Financial),
            "health" => Ok(Self::Health),
            "biometric" => Ok(Self::Biometric),
            "children" => Ok(Self::Children),
            "public" => Ok(Self::Public),
            other => Err(ComplianceError::InvalidCategory { category: other.to_string() }),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataAsset {
    pub id: AssetId,
    pub name: String,
    pub category: AssetCategory,
}

impl Identified<AssetId> for DataAsset {
    fn id(&self) -> AssetId {
        self.id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataFlow {
    pub id: FlowId,
    pub asset_id: AssetId,
    pub destination: String,
    pub cross_border: bool,
}

impl Identified<FlowId> for DataFlow {
    fn id(&self) -> FlowId {
        self.id
    }
}

pub struct DataFlowMapper {
    assets: RecordStore<AssetId, DataAsset>,
    flows: RecordStore<FlowId, DataFlow>,
    cross_border_flows: RwLock<Vec<FlowId>>,
}

impl Default for DataFlowMapper {
    fn default() -> Self {
        Self::new()
    }
}

impl DataFlowMapper {
    pub fn new() -> Self {
        Self { assets: RecordStore::new(), flows: RecordStore::new(), cross_border_flows: RwLock::new(Vec::new()) }
    }

    pub fn register_asset(&self, name: impl Into<String>, category: &str) -> Result<AssetId> {
        let category = AssetCategory::parse(category)?;
        let asset = DataAsset { id: AssetId::new(), name: name.into(), category };
        let id = asset.id;
        self.assets.insert(asset);
        Ok(id)
    }

    pub fn map_flow(&self, asset_id: AssetId, destination: impl Into<String>, cross_border: bool) -> Result<FlowId> {
        if self.assets.get(asset_id).is_none() {
            return Err(ComplianceError::AssetNotFound { id: asset_id.to_string() });
        }
        let flow = DataFlow { id: FlowId::new(), asset_id, destination: destination.into(), cross_border };
        let id = flow.id;
        self.flows.insert(flow);
        if cross_border {
            self.cross_border_flows.write().unwrap().push(id);
        }
        Ok(id)
    }

    pub fn cross_border_flows(&self) -> Vec<DataFlow> {
        let ids = self.cross_border_flows.read().unwrap();
        ids.iter().filter_map(|id| self.flows.get(*id)).collect()
    }

    pub fn flows_for_asset(&self, asset_id: AssetId) -> Vec<DataFlow> {
        self.flows.all().into_iter().filter(|f| f.asset_id == asset_id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_category_is_rejected() {
        let mapper = DataFlowMapper::new();
        assert!(mapper.register_asset("customer emails", "made_up").is_err());
    }

    #[test]
    fn cross_border_flows_are_indexed_separately() {
        let mapper = DataFlowMapper::new();
        let asset_id = mapper.register_asset("customer profiles", "personal").unwrap();
        mapper.map_flow(asset_id, "eu-warehouse", false).unwrap();
        mapper.map_flow(asset_id, "us-analytics", true).unwrap();
        assert_eq!(mapper.cross_border_flows().len(), 1);
        assert_eq!(mapper.flows_for_asset(asset_id).len(), 2);
    }

    #[test]
    fn mapping_to_unknown_asset_fails() {
        let mapper = DataFlowMapper::new();
        assert!(mapper.map_flow(AssetId::new(), "somewhere", false).is_err());
    }
}
