//! Round-up threshold settings (nearest £N per purchase band), edited with bounded steppers.

use crate::error::RoundingError;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingField {
    /// Purchases under £100.
    Under100,
    Over100,
    Over500,
    Over1000,
}

impl RoundingField {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "under_100" | "under100" => Some(RoundingField::Under100),
            "over_100" | "over100" => Some(RoundingField::Over100),
            "over_500" | "over500" => Some(RoundingField::Over500),
            "over_1000" | "over1000" => Some(RoundingField::Over1000),
            _ => None,
        }
    }

    /// (min, max, step)
    pub fn bounds(&self) -> (u32, u32, u32) {
        match self {
            RoundingField::Under100 => (1, 5, 1),
            RoundingField::Over100 => (5, 20, 5),
            RoundingField::Over500 => (10, 50, 10),
            RoundingField::Over1000 => (20, 100, 20),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RoundingSettings {
    pub under_100: u32,
    pub over_100: u32,
    pub over_500: u32,
    pub over_1000: u32,
}

impl Default for RoundingSettings {
    fn default() -> Self {
        Self {
            under_100: 1,
            over_100: 5,
            over_500: 10,
            over_1000: 20,
        }
    }
}

impl RoundingSettings {
    pub fn get(&self, field: RoundingField) -> u32 {
        match field {
            RoundingField::Under100 => self.under_100,
            RoundingField::Over100 => self.over_100,
            RoundingField::Over500 => self.over_500,
            RoundingField::Over1000 => self.over_1000,
        }
    }

    fn slot(&mut self, field: RoundingField) -> &mut u32 {
        match field {
            RoundingField::Under100 => &mut self.under_100,
            RoundingField::Over100 => &mut self.over_100,
            RoundingField::Over500 => &mut self.over_500,
            RoundingField::Over1000 => &mut self.over_1000,
        }
    }

    /// Move one step up or down, clamped to the field's range. Returns the new value.
    pub fn step(&mut self, field: RoundingField, up: bool) -> u32 {
        let (min, max, step) = field.bounds();
        let slot = self.slot(field);
        *slot = if up {
            (*slot + step).min(max)
        } else {
            slot.saturating_sub(step).max(min)
        };
        *slot
    }

    pub fn step_named(&mut self, field: &str, up: bool) -> Result<u32, RoundingError> {
        let field = RoundingField::from_str(field)
            .ok_or_else(|| RoundingError::UnknownField(field.to_string()))?;
        Ok(self.step(field, up))
    }
}
