use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Biography variants. `short` is not guaranteed to be a subset of `full`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BiographyVariant {
    Full,
    Short,
}

impl BiographyVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            BiographyVariant::Full => "full",
            BiographyVariant::Short => "short",
        }
    }
}

impl fmt::Display for BiographyVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BiographyVariant {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "full" => Ok(BiographyVariant::Full),
            "short" => Ok(BiographyVariant::Short),
            other => Err(Error::InvalidBiographyVariant(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Biography {
    pub content: String,
    pub variant: BiographyVariant,
}
