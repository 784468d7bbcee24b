use super::{is_blank, ValidationError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Composer {
    pub id: i64,
    pub full_name: String,
    pub short_name: String,
}

impl Composer {
    pub fn new(full_name: impl Into<String>, short_name: impl Into<String>) -> Self {
        Self {
            id: 0,
            full_name: full_name.into(),
            short_name: short_name.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if is_blank(&self.full_name) {
            return Err(ValidationError::ComposerFullNameEmpty);
        }

        if is_blank(&self.short_name) {
            return Err(ValidationError::ComposerShortNameEmpty);
        }

        Ok(())
    }
}

/// Composer plus the number of pieces attributed to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComposerWithDetails {
    pub composer: Composer,
    pub piece_count: i64,
}
