//! Investment and charity catalogs as typed records.
//! Each catalog turns into a capped-mode `PortfolioConfig` (one bucket per item, grouped by category).

use crate::config::{BucketConfig, PortfolioConfig};
use crate::error::AllocationError;
use crate::models::{AllocationMode, Percentage};
use serde::{Deserialize, Serialize};

/// Per-kind instrument data. ETFs and bonds carry an expense ratio; stocks and commodities a sector.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InstrumentDetails {
    Etf { expense_ratio_bps: u32 },
    Stock { sector: String },
    Bond { expense_ratio_bps: u32 },
    Commodity { sector: String },
}

fn format_bps(bps: u32) -> String {
    format!("{}.{:02}%", bps / 100, bps % 100)
}

impl InstrumentDetails {
    /// Secondary line shown under the instrument name.
    pub fn detail_label(&self) -> String {
        match self {
            InstrumentDetails::Etf { expense_ratio_bps } | InstrumentDetails::Bond { expense_ratio_bps } => {
                format!("Expense ratio {}", format_bps(*expense_ratio_bps))
            }
            InstrumentDetails::Stock { sector } | InstrumentDetails::Commodity { sector } => {
                format!("Sector: {}", sector)
            }
        }
    }

    pub fn expense_ratio_bps(&self) -> Option<u32> {
        match self {
            InstrumentDetails::Etf { expense_ratio_bps } | InstrumentDetails::Bond { expense_ratio_bps } => {
                Some(*expense_ratio_bps)
            }
            InstrumentDetails::Stock { .. } | InstrumentDetails::Commodity { .. } => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instrument {
    pub name: String,
    pub symbol: String,
    pub description: String,
    pub details: InstrumentDetails,
    pub expected_return_bps: u32,
    pub allocation: Percentage,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvestmentCategory {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub instruments: Vec<Instrument>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvestmentCatalog {
    pub categories: Vec<InvestmentCategory>,
}

impl InvestmentCatalog {
    pub fn allocation_config(&self) -> PortfolioConfig {
        let buckets = self
            .categories
            .iter()
            .flat_map(|c| {
                c.instruments.iter().map(move |i| BucketConfig {
                    id: format!("{}-{}", c.id, i.symbol),
                    label: Some(i.name.clone()),
                    group: Some(c.id.to_string()),
                    percentage: i.allocation.value() as i64,
                })
            })
            .collect();
        PortfolioConfig {
            mode: AllocationMode::Capped,
            buckets,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Critical,
    High,
    Medium,
    Low,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharityProject {
    pub name: String,
    pub organization: String,
    pub description: String,
    pub urgency: Urgency,
    pub impact: String,
    pub allocation: Percentage,
    pub raised: u64,
    pub goal: u64,
}

impl CharityProject {
    /// Funding progress, capped at 100. A zero goal counts as fully funded.
    pub fn progress_percent(&self) -> u8 {
        if self.goal == 0 {
            return 100;
        }
        (self.raised.saturating_mul(100) / self.goal).min(100) as u8
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharityCategory {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub projects: Vec<CharityProject>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharityCatalog {
    pub categories: Vec<CharityCategory>,
}

impl CharityCatalog {
    pub fn allocation_config(&self) -> PortfolioConfig {
        let buckets = self
            .categories
            .iter()
            .flat_map(|c| {
                c.projects.iter().map(move |p| BucketConfig {
                    id: format!("{}-{}", c.id, p.name),
                    label: Some(p.name.clone()),
                    group: Some(c.id.to_string()),
                    percentage: p.allocation.value() as i64,
                })
            })
            .collect();
        PortfolioConfig {
            mode: AllocationMode::Capped,
            buckets,
        }
    }

    pub fn find_project(&self, name: &str) -> Option<&CharityProject> {
        self.categories
            .iter()
            .flat_map(|c| c.projects.iter())
            .find(|p| p.name == name)
    }
}

pub fn parse_investment_catalog(json: &str) -> Result<InvestmentCatalog, AllocationError> {
    serde_json::from_str(json).map_err(|e| AllocationError::InvalidConfig(e.to_string()))
}

pub fn parse_charity_catalog(json: &str) -> Result<CharityCatalog, AllocationError> {
    serde_json::from_str(json).map_err(|e| AllocationError::InvalidConfig(e.to_string()))
}

fn pct(v: u8) -> Percentage {
    Percentage::clamped(v as i64)
}

fn instrument(
    name: &str,
    symbol: &str,
    description: &str,
    details: InstrumentDetails,
    expected_return_bps: u32,
    allocation: u8,
) -> Instrument {
    Instrument {
        name: name.to_string(),
        symbol: symbol.to_string(),
        description: description.to_string(),
        details,
        expected_return_bps,
        allocation: pct(allocation),
    }
}

fn etf(bps: u32) -> InstrumentDetails {
    InstrumentDetails::Etf { expense_ratio_bps: bps }
}

fn bond(bps: u32) -> InstrumentDetails {
    InstrumentDetails::Bond { expense_ratio_bps: bps }
}

fn stock(sector: &str) -> InstrumentDetails {
    InstrumentDetails::Stock { sector: sector.to_string() }
}

fn commodity(sector: &str) -> InstrumentDetails {
    InstrumentDetails::Commodity { sector: sector.to_string() }
}

/// Halal investment catalog shipped with the app. Initial allocations sum to 100.
pub fn builtin_investment_catalog() -> InvestmentCatalog {
    InvestmentCatalog {
        categories: vec![
            InvestmentCategory {
                id: 1,
                name: "Islamic ETFs".to_string(),
                description: "Diversified Sharia-compliant exchange-traded funds".to_string(),
                instruments: vec![
                    instrument("HLAL - Wahed FTSE USA Shariah ETF", "HLAL", "US large-cap Sharia-compliant stocks", etf(50), 120, 12),
                    instrument("SPUS - SP Funds S&P 500 Sharia Industry Exclusions ETF", "SPUS", "S&P 500 with Islamic screening", etf(49), 180, 10),
                    instrument("UMMA - Wahed Dow Jones Islamic World ETF", "UMMA", "Global Islamic equity exposure", etf(65), 210, 8),
                ],
            },
            InvestmentCategory {
                id: 2,
                name: "Halal Individual Stocks".to_string(),
                description: "Carefully screened Sharia-compliant companies".to_string(),
                instruments: vec![
                    instrument("Saudi Aramco", "2222.SR", "World's largest oil and gas company", stock("Energy"), 1250, 15),
                    instrument("Al Rajhi Bank", "1120.SR", "Leading Islamic bank in Saudi Arabia", stock("Islamic Banking"), 1180, 10),
                    instrument("Dubai Islamic Bank", "DIB.DU", "Largest Islamic bank in UAE", stock("Islamic Banking"), 950, 8),
                    instrument("Petronas Gas Berhad", "KLSE:PETGAS", "Provides halal utility services", stock("Energy Infrastructure"), 820, 7),
                ],
            },
            InvestmentCategory {
                id: 3,
                name: "Sukuk Bonds".to_string(),
                description: "Islamic bonds compliant with Sharia law".to_string(),
                instruments: vec![
                    instrument("SPSK - SPDR Bloomberg Barclays Sukuk Bond ETF", "SPSK", "Diversified sukuk bond exposure", bond(50), 320, 8),
                    instrument("UAE Government Sukuk", "UAE-SUK", "UAE sovereign sukuk bonds", bond(25), 410, 6),
                    instrument("Malaysia Government Sukuk", "MYS-SUK", "Malaysian sovereign sukuk bonds", bond(30), 380, 4),
                ],
            },
            InvestmentCategory {
                id: 4,
                name: "Commodities".to_string(),
                description: "Precious metals and commodity investments".to_string(),
                instruments: vec![
                    instrument("Gold ETF", "GOLD", "Physical gold-backed exchange traded fund", commodity("Precious Metals"), 250, 8),
                    instrument("Silver ETF", "SLVR", "Physical silver-backed investment fund", commodity("Precious Metals"), 280, 4),
                    instrument("Platinum ETF", "PLAT", "Platinum commodity investment fund", commodity("Industrial Metals"), 310, 0),
                ],
            },
        ],
    }
}

#[allow(clippy::too_many_arguments)]
fn project(
    name: &str,
    organization: &str,
    description: &str,
    urgency: Urgency,
    impact: &str,
    allocation: u8,
    raised: u64,
    goal: u64,
) -> CharityProject {
    CharityProject {
        name: name.to_string(),
        organization: organization.to_string(),
        description: description.to_string(),
        urgency,
        impact: impact.to_string(),
        allocation: pct(allocation),
        raised,
        goal,
    }
}

/// Sadaqah project catalog shipped with the app. Initial allocations sum to 100.
pub fn builtin_charity_catalog() -> CharityCatalog {
    use Urgency::*;
    CharityCatalog {
        categories: vec![
            CharityCategory {
                id: 1,
                name: "Emergency Relief".to_string(),
                description: "Urgent humanitarian assistance worldwide".to_string(),
                projects: vec![
                    project("Gaza Medical Emergency Fund", "Islamic Relief", "Critical medical supplies and emergency healthcare", Critical, "500 families/month", 15, 890_000, 1_200_000),
                    project("Syria Refugee Crisis Support", "Human Appeal", "Food, shelter, and basic necessities for refugees", High, "1,200 refugees", 10, 1_400_000, 2_000_000),
                    project("Turkey Earthquake Relief", "Helping Hand", "Rebuilding homes and providing emergency aid", High, "800 families", 5, 2_100_000, 3_000_000),
                ],
            },
            CharityCategory {
                id: 2,
                name: "Education & Knowledge".to_string(),
                description: "Building futures through Islamic education".to_string(),
                projects: vec![
                    project("Orphan Education Fund", "Orphans in Need", "Complete education for orphaned children", Medium, "350 children", 12, 450_000, 600_000),
                    project("Islamic School Construction - Nigeria", "Al-Mustafa Foundation", "Building modern Islamic schools in rural areas", Medium, "2,000 students", 10, 320_000, 800_000),
                    project("Quran Memorization Program", "Dar Al-Hifz", "Supporting hafiz students with scholarships", Low, "150 students", 4, 180_000, 250_000),
                ],
            },
            CharityCategory {
                id: 3,
                name: "Places of Worship".to_string(),
                description: "Building and maintaining mosques worldwide".to_string(),
                projects: vec![
                    project("Masjid Construction - Somalia", "Islamic Society of Somalia", "New mosque with water well and community center", High, "5,000 worshippers", 12, 125_000, 250_000),
                    project("Masjid Renovation - Bangladesh", "Bangladesh Islamic Foundation", "Renovating historic mosque damaged by floods", Medium, "2,000 worshippers", 8, 78_000, 150_000),
                    project("Community Masjid - UK", "British Muslim Community", "New mosque for growing Muslim community", Low, "1,500 worshippers", 5, 890_000, 1_200_000),
                ],
            },
            CharityCategory {
                id: 4,
                name: "Water & Sanitation".to_string(),
                description: "Providing clean water and sanitation facilities".to_string(),
                projects: vec![
                    project("Water Wells - Africa", "Water for Life", "Deep water wells in drought-affected regions", High, "10,000 people", 8, 340_000, 500_000),
                    project("Clean Water Project - Yemen", "Yemen Relief", "Water purification systems for villages", Critical, "3,000 people", 6, 89_000, 200_000),
                    project("Sanitation Facilities - India", "Helping Hand India", "Building clean sanitation facilities in slums", Medium, "5,000 people", 5, 145_000, 300_000),
                ],
            },
        ],
    }
}

/// A project offered on the Donate screen. `raised` and `goal` are whole pounds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DonationProject {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub urgency: Urgency,
    pub raised: u64,
    pub goal: u64,
}

impl DonationProject {
    pub fn progress_percent(&self) -> u8 {
        if self.goal == 0 {
            return 100;
        }
        (self.raised.saturating_mul(100) / self.goal).min(100) as u8
    }
}

pub fn find_donation_project<'a>(projects: &'a [DonationProject], title: &str) -> Option<&'a DonationProject> {
    projects.iter().find(|p| p.title == title)
}

/// Projects listed on the Donate screen. Separate from the sadaqah allocation catalog.
pub fn builtin_donation_projects() -> Vec<DonationProject> {
    let entry = |id, title: &str, description: &str, urgency, raised, goal| DonationProject {
        id,
        title: title.to_string(),
        description: description.to_string(),
        urgency,
        raised,
        goal,
    };
    vec![
        entry(1, "Masjid in Somalia", "Building a mosque with water well & education center", Urgency::High, 12_450, 25_000),
        entry(2, "Medical Aid Gaza", "Emergency medical supplies for families in need", Urgency::Critical, 8_750, 15_000),
        entry(3, "Orphan Education Fund", "Providing education for 25 orphaned children", Urgency::Medium, 20_920, 30_000),
        entry(4, "Clean Water Initiative", "Installing water pumps in rural communities", Urgency::High, 5_680, 20_000),
    ]
}
