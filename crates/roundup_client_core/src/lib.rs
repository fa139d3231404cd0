#![allow(unexpected_cfgs)] // flutter_rust_bridge macro emits frb_expand cfg
use flutter_rust_bridge::frb;
use once_cell::sync::Lazy;
use std::sync::{Mutex, MutexGuard};

pub mod catalog;
pub mod config;
pub mod error;
pub mod ids;
mod log_bridge;
pub mod models;
pub mod navigation;
pub mod rebalance;
pub mod rounding;
mod session;
pub mod transfers;

pub use error::AllocationError;
pub use ids::{AllocationSetId, BucketId};
pub use models::{AdjustOutcome, AllocationMode, AllocationSet, Delta, Percentage, RejectReason};

use config::{PortfolioConfig, Preset};
use models::SavedAllocation;
use navigation::{BankConnectionFlow, NavigationStack, Screen};
use rounding::RoundingSettings;
use transfers::WithdrawMethod;

static NAVIGATION: Lazy<Mutex<NavigationStack>> = Lazy::new(|| Mutex::new(NavigationStack::new()));
static BANK_CONNECTION: Lazy<Mutex<BankConnectionFlow>> =
    Lazy::new(|| Mutex::new(BankConnectionFlow::default()));
static ROUNDING: Lazy<Mutex<RoundingSettings>> = Lazy::new(|| Mutex::new(RoundingSettings::default()));

fn lock<T>(m: &'static Lazy<Mutex<T>>) -> MutexGuard<'static, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| e.to_string())
}

#[frb(init)]
pub fn init_app() {
    // Nothing to load: sets are opened per screen via create_*_allocation_set.
}

// --- Allocation sets ---

/// Open a set from a host-supplied `PortfolioConfig` JSON. Returns the set id.
pub fn create_allocation_set(config_json: String) -> Result<String, String> {
    let config = PortfolioConfig::from_json(&config_json).map_err(|e| e.to_string())?;
    let set = config.build().map_err(|e| {
        rust_log!("[roundup_rs] create_allocation_set failed: {}", e);
        e.to_string()
    })?;
    Ok(session::insert(set).into())
}

/// Open a set from a built-in preset (`round_up_split`, `emergency_fund`, `halal_investments`, `sadaqah_projects`).
pub fn create_preset_allocation_set(preset: String) -> Result<String, String> {
    let preset = Preset::from_str(&preset)
        .ok_or_else(|| AllocationError::UnknownPreset(preset.clone()).to_string())?;
    let set = preset.config().build().map_err(|e| e.to_string())?;
    Ok(session::insert(set).into())
}

/// Open a capped set over a host-supplied catalog. `kind` is `investments` or `charity`.
pub fn create_catalog_allocation_set(kind: String, catalog_json: String) -> Result<String, String> {
    let config = match kind.to_lowercase().as_str() {
        "investments" => catalog::parse_investment_catalog(&catalog_json).map(|c| c.allocation_config()),
        "charity" => catalog::parse_charity_catalog(&catalog_json).map(|c| c.allocation_config()),
        _ => Err(AllocationError::InvalidConfig(format!("unknown catalog kind: {}", kind))),
    }
    .map_err(|e| e.to_string())?;
    let set = config.build().map_err(|e| {
        rust_log!("[roundup_rs] create_catalog_allocation_set failed: {}", e);
        e.to_string()
    })?;
    Ok(session::insert(set).into())
}

/// Apply a stepper/slider change. Returns the `AdjustOutcome` as JSON; rejected adjustments are
/// `{"outcome":"rejected",...}` and leave the set untouched.
pub fn adjust_allocation(set_id: String, bucket_id: String, delta: f64) -> Result<String, String> {
    let delta = Delta::from_f64(delta).map_err(|e| e.to_string())?;
    let bucket = BucketId::parse(&bucket_id)
        .map_err(|_| AllocationError::UnknownBucket(bucket_id.clone()).to_string())?;
    let outcome = session::with_set(&set_id, |set| set.adjust(&bucket, delta)).map_err(|e| {
        rust_log!("[roundup_rs] adjust_allocation failed set_id={}: {}", set_id, e);
        e.to_string()
    })?;
    to_json(&outcome)
}

pub fn get_total(set_id: String) -> Result<u32, String> {
    session::with_set(&set_id, |set| Ok(set.total())).map_err(|e| e.to_string())
}

pub fn get_percentage(set_id: String, bucket_id: String) -> Result<u8, String> {
    let bucket = BucketId::parse(&bucket_id)
        .map_err(|_| AllocationError::UnknownBucket(bucket_id.clone()).to_string())?;
    session::with_set(&set_id, |set| set.get(&bucket).map(Percentage::value)).map_err(|e| e.to_string())
}

/// Subtotal for one category (e.g. "1" for Islamic ETFs). Unknown groups are 0.
pub fn get_group_total(set_id: String, group: String) -> Result<u32, String> {
    session::with_set(&set_id, |set| Ok(set.group_total(&group))).map_err(|e| e.to_string())
}

pub fn get_allocations(set_id: String) -> Result<String, String> {
    let snapshot = session::with_set(&set_id, |set| Ok(set.snapshot(&set_id))).map_err(|e| e.to_string())?;
    to_json(&snapshot)
}

/// Save button state: enabled only when the total is exactly 100.
pub fn can_save_allocations(set_id: String) -> Result<bool, String> {
    session::with_set(&set_id, |set| Ok(set.total() == 100)).map_err(|e| e.to_string())
}

pub fn save_allocations(set_id: String) -> Result<String, String> {
    let saved = session::with_set(&set_id, |set| {
        let total = set.total();
        if total != 100 {
            return Err(AllocationError::NotSaveable { total });
        }
        Ok(SavedAllocation {
            snapshot: set.snapshot(&set_id),
            saved_at: chrono::Utc::now().to_rfc3339(),
        })
    })
    .map_err(|e| {
        rust_log!("[roundup_rs] save_allocations failed set_id={}: {}", set_id, e);
        e.to_string()
    })?;
    rust_log!("[roundup_rs] allocation saved set_id={} at={}", set_id, saved.saved_at);
    to_json(&saved)
}

/// Close a set when its screen is dismissed. Returns false if it was not open.
pub fn drop_allocation_set(set_id: String) -> bool {
    session::remove(&set_id)
}

// --- Rounding settings ---

pub fn get_rounding_settings() -> Result<String, String> {
    to_json(&*lock(&ROUNDING))
}

/// `field` is one of under_100 / over_100 / over_500 / over_1000. Returns the new value.
pub fn step_rounding_setting(field: String, up: bool) -> Result<u32, String> {
    lock(&ROUNDING).step_named(&field, up).map_err(|e| e.to_string())
}

// --- Navigation ---

/// Push a screen by name. Returns the visible screen afterwards.
pub fn navigate_to(screen: String) -> Result<String, String> {
    let screen = Screen::parse(&screen).map_err(|e| e.to_string())?;
    Ok(lock(&NAVIGATION).push(screen).as_str().to_string())
}

pub fn navigate_back() -> bool {
    lock(&NAVIGATION).back()
}

pub fn current_screen() -> String {
    lock(&NAVIGATION).current().as_str().to_string()
}

pub fn reset_navigation() {
    lock(&NAVIGATION).reset();
}

// --- Bank connection ---

pub fn bank_connection_step() -> Result<String, String> {
    to_json(lock(&BANK_CONNECTION).step())
}

pub fn bank_connection_select(bank_id: String) -> Result<String, String> {
    let mut flow = lock(&BANK_CONNECTION);
    let step = flow.select_bank(&bank_id).map_err(|e| e.to_string())?;
    to_json(step)
}

pub fn bank_connection_verify() -> Result<String, String> {
    let mut flow = lock(&BANK_CONNECTION);
    let step = flow.verify().map_err(|e| e.to_string())?;
    to_json(step)
}

pub fn bank_connection_complete() -> Result<String, String> {
    let mut flow = lock(&BANK_CONNECTION);
    let step = flow.complete().map_err(|e| e.to_string())?;
    to_json(step)
}

pub fn bank_connection_reset() {
    lock(&BANK_CONNECTION).reset();
}

// --- Catalogs ---

pub fn get_investment_catalog() -> Result<String, String> {
    to_json(&catalog::builtin_investment_catalog())
}

pub fn get_charity_catalog() -> Result<String, String> {
    to_json(&catalog::builtin_charity_catalog())
}

// --- Transfers ---

/// Validate a withdrawal request. `balance_minor` and the returned amounts are pence.
pub fn quote_withdrawal(amount_text: String, balance_minor: i64, method: String) -> Result<String, String> {
    let method = WithdrawMethod::from_str(&method)
        .ok_or_else(|| error::TransferError::UnknownMethod(method.clone()).to_string())?;
    let quote = transfers::quote_withdrawal(&amount_text, balance_minor, method).map_err(|e| e.to_string())?;
    to_json(&quote)
}

/// Projects on the Donate screen, as JSON.
pub fn get_donation_projects() -> Result<String, String> {
    to_json(&catalog::builtin_donation_projects())
}

/// `project_title` is a Donate screen project (see `get_donation_projects`).
pub fn validate_donation(project_title: String, amount_minor: i64) -> Result<i64, String> {
    transfers::validate_donation(&catalog::builtin_donation_projects(), &project_title, amount_minor)
        .map_err(|e| e.to_string())
}

/// Drain buffered Rust log lines so Dart can show them (e.g. via debugPrint).
pub fn drain_rust_logs() -> Vec<String> {
    log_bridge::drain_rust_logs()
}
