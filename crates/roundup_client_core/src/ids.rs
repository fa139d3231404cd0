//! Strongly-typed IDs. Use these instead of raw strings.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Any accepted spelling maps to the lowercase hyphenated form.
fn validate_uuid(s: &str) -> Result<String, String> {
    let uuid = Uuid::parse_str(s.trim()).map_err(|e| format!("Invalid UUID: {}", e))?;
    Ok(uuid.hyphenated().to_string())
}

fn validate_bucket(s: &str) -> Result<String, String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err("Invalid bucket id: empty".to_string());
    }
    Ok(trimmed.to_string())
}

/// Bucket ID (charity project, instrument, savings tier). Non-empty, trimmed, case-sensitive.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BucketId(pub String);

/// Live allocation set handle (UUID v4). Inner field pub for FFI codegen.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AllocationSetId(pub String);

macro_rules! id_serde {
    ($name:ident) => {
        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
                ser.serialize_str(&self.0)
            }
        }
        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(de: D) -> Result<Self, D::Error> {
                let s = String::deserialize(de)?;
                Self::from_str(&s).map_err(serde::de::Error::custom)
            }
        }
    };
}
id_serde!(BucketId);
id_serde!(AllocationSetId);

macro_rules! id_type {
    ($name:ident, $validate:ident) => {
        impl $name {
            pub fn parse(s: impl AsRef<str>) -> Result<Self, String> {
                Self::from_str(s.as_ref())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }
        impl FromStr for $name {
            type Err = String;
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self($validate(s)?))
            }
        }
        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}
id_type!(BucketId, validate_bucket);
id_type!(AllocationSetId, validate_uuid);

impl AllocationSetId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl Default for AllocationSetId {
    fn default() -> Self {
        Self::new()
    }
}
