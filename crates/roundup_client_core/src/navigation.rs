//! Screen navigation owned by one controller, plus the bank connection step machine.

use crate::error::NavigationError;
use crate::rust_log;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    Home,
    BankConnection,
    Investments,
    PortfolioAllocation,
    Insights,
    AppSettings,
    SadaqahProjects,
    Withdraw,
    Donate,
    HalalInvestments,
    Savings,
    EmergencyFund,
}

impl Screen {
    pub const ALL: [Screen; 12] = [
        Screen::Home,
        Screen::BankConnection,
        Screen::Investments,
        Screen::PortfolioAllocation,
        Screen::Insights,
        Screen::AppSettings,
        Screen::SadaqahProjects,
        Screen::Withdraw,
        Screen::Donate,
        Screen::HalalInvestments,
        Screen::Savings,
        Screen::EmergencyFund,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Screen::Home => "home",
            Screen::BankConnection => "bank_connection",
            Screen::Investments => "investments",
            Screen::PortfolioAllocation => "portfolio_allocation",
            Screen::Insights => "insights",
            Screen::AppSettings => "app_settings",
            Screen::SadaqahProjects => "sadaqah_projects",
            Screen::Withdraw => "withdraw",
            Screen::Donate => "donate",
            Screen::HalalInvestments => "halal_investments",
            Screen::Savings => "savings",
            Screen::EmergencyFund => "emergency_fund",
        }
    }

    pub fn parse(s: &str) -> Result<Self, NavigationError> {
        let lower = s.trim().to_lowercase();
        Screen::ALL
            .iter()
            .copied()
            .find(|screen| screen.as_str() == lower)
            .ok_or_else(|| NavigationError::UnknownScreen(s.to_string()))
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Back stack with `Home` at the root. Never empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavigationStack {
    stack: Vec<Screen>,
}

impl Default for NavigationStack {
    fn default() -> Self {
        Self {
            stack: vec![Screen::Home],
        }
    }
}

impl NavigationStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Screen {
        self.stack.last().copied().unwrap_or(Screen::Home)
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn history(&self) -> &[Screen] {
        &self.stack
    }

    /// Pushing the visible screen again is a no-op; pushing `Home` returns to the root.
    pub fn push(&mut self, screen: Screen) -> Screen {
        if screen == Screen::Home {
            self.reset();
        } else if self.current() != screen {
            self.stack.push(screen);
        }
        rust_log!("[roundup_rs] navigation push screen={} depth={}", screen, self.depth());
        self.current()
    }

    /// Pop the visible screen. Returns false at the root.
    pub fn back(&mut self) -> bool {
        if self.stack.len() <= 1 {
            return false;
        }
        self.stack.pop();
        rust_log!("[roundup_rs] navigation back -> {}", self.current());
        true
    }

    pub fn reset(&mut self) {
        self.stack.truncate(1);
    }
}

/// Banks offered on the connection screen (id, display name).
pub const POPULAR_BANKS: [(&str, &str); 6] = [
    ("1", "HSBC"),
    ("2", "Barclays"),
    ("3", "Lloyds Bank"),
    ("4", "NatWest"),
    ("5", "Santander UK"),
    ("6", "Royal Bank of Scotland"),
];

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum ConnectionStep {
    Select,
    Verify { bank_id: String },
    Connecting { bank_id: String },
    Success { bank_id: String },
}

impl ConnectionStep {
    pub fn name(&self) -> &'static str {
        match self {
            ConnectionStep::Select => "select",
            ConnectionStep::Verify { .. } => "verify",
            ConnectionStep::Connecting { .. } => "connecting",
            ConnectionStep::Success { .. } => "success",
        }
    }
}

/// Select -> Verify -> Connecting -> Success. Delays between steps belong to the UI.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BankConnectionFlow {
    step: ConnectionStep,
}

impl Default for BankConnectionFlow {
    fn default() -> Self {
        Self {
            step: ConnectionStep::Select,
        }
    }
}

impl BankConnectionFlow {
    pub fn step(&self) -> &ConnectionStep {
        &self.step
    }

    fn invalid(&self, action: &'static str) -> NavigationError {
        NavigationError::InvalidStep {
            from: self.step.name().to_string(),
            action,
        }
    }

    pub fn select_bank(&mut self, bank_id: &str) -> Result<&ConnectionStep, NavigationError> {
        if self.step != ConnectionStep::Select {
            return Err(self.invalid("select a bank"));
        }
        if !POPULAR_BANKS.iter().any(|(id, _)| *id == bank_id) {
            return Err(NavigationError::UnknownBank(bank_id.to_string()));
        }
        self.step = ConnectionStep::Verify {
            bank_id: bank_id.to_string(),
        };
        rust_log!("[roundup_rs] bank_connection select bank_id={}", bank_id);
        Ok(&self.step)
    }

    pub fn verify(&mut self) -> Result<&ConnectionStep, NavigationError> {
        let ConnectionStep::Verify { bank_id } = &self.step else {
            return Err(self.invalid("verify"));
        };
        let bank_id = bank_id.clone();
        self.step = ConnectionStep::Connecting { bank_id };
        rust_log!("[roundup_rs] bank_connection verify -> connecting");
        Ok(&self.step)
    }

    pub fn complete(&mut self) -> Result<&ConnectionStep, NavigationError> {
        let ConnectionStep::Connecting { bank_id } = &self.step else {
            return Err(self.invalid("complete"));
        };
        let bank_id = bank_id.clone();
        self.step = ConnectionStep::Success { bank_id };
        rust_log!("[roundup_rs] bank_connection success");
        Ok(&self.step)
    }

    pub fn reset(&mut self) {
        self.step = ConnectionStep::Select;
    }
}
