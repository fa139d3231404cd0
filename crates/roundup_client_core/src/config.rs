//! Static configuration an `AllocationSet` is built from, plus the presets the screens open with.

use crate::catalog::{builtin_charity_catalog, builtin_investment_catalog};
use crate::error::AllocationError;
use crate::ids::BucketId;
use crate::models::{AllocationMode, AllocationSet, Bucket, Percentage};
use serde::{Deserialize, Serialize};

/// One bucket as supplied by the host. `percentage` is range-checked on `build`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketConfig {
    pub id: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub group: Option<String>,
    pub percentage: i64,
}

impl BucketConfig {
    pub fn new(id: &str, label: &str, percentage: i64) -> Self {
        Self {
            id: id.to_string(),
            label: Some(label.to_string()),
            group: None,
            percentage,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioConfig {
    pub mode: AllocationMode,
    pub buckets: Vec<BucketConfig>,
}

impl PortfolioConfig {
    pub fn from_json(json: &str) -> Result<Self, AllocationError> {
        serde_json::from_str(json).map_err(|e| AllocationError::InvalidConfig(e.to_string()))
    }

    /// Validate every bucket and the mode's invariant, then build the set.
    pub fn build(&self) -> Result<AllocationSet, AllocationError> {
        let buckets = self
            .buckets
            .iter()
            .map(|b| -> Result<Bucket, AllocationError> {
                Ok(Bucket {
                    id: BucketId::parse(&b.id).map_err(AllocationError::InvalidConfig)?,
                    label: b.label.clone(),
                    group: b.group.clone(),
                    percentage: Percentage::new(b.percentage)?,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        AllocationSet::new(self.mode, buckets)
    }
}

/// Built-in starting points, one per allocation screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    /// Top-level split of every round-up: sadaqah / halal investments / savings.
    RoundUpSplit,
    EmergencyFund,
    HalalInvestments,
    SadaqahProjects,
}

impl Preset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::RoundUpSplit => "round_up_split",
            Preset::EmergencyFund => "emergency_fund",
            Preset::HalalInvestments => "halal_investments",
            Preset::SadaqahProjects => "sadaqah_projects",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "round_up_split" => Some(Preset::RoundUpSplit),
            "emergency_fund" => Some(Preset::EmergencyFund),
            "halal_investments" => Some(Preset::HalalInvestments),
            "sadaqah_projects" => Some(Preset::SadaqahProjects),
            _ => None,
        }
    }

    pub fn config(&self) -> PortfolioConfig {
        match self {
            Preset::RoundUpSplit => PortfolioConfig {
                mode: AllocationMode::Conserving,
                buckets: vec![
                    BucketConfig::new("sadaqah", "Sadaqah Projects", 40),
                    BucketConfig::new("halal_investments", "Halal Investments", 35),
                    BucketConfig::new("savings", "Bank Savings", 25),
                ],
            },
            Preset::EmergencyFund => PortfolioConfig {
                mode: AllocationMode::Capped,
                buckets: vec![
                    BucketConfig::new("1", "Sharia-Compliant Savings Account", 40),
                    BucketConfig::new("2", "Money Market Account", 30),
                    BucketConfig::new("3", "Islamic Investment Certificates", 20),
                    BucketConfig::new("4", "Government Savings Bonds", 10),
                ],
            },
            Preset::HalalInvestments => builtin_investment_catalog().allocation_config(),
            Preset::SadaqahProjects => builtin_charity_catalog().allocation_config(),
        }
    }
}

impl std::fmt::Display for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
