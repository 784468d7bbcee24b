use super::{is_blank, ValidationError};
use serde::{Deserialize, Serialize};

/// A piece of music
///
/// `composer_id` is not checked here; it is substituted from the resolved
/// composer intent and enforced by storage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Piece {
    pub id: i64,
    pub title: String,
    pub composer_id: i64,
}

impl Piece {
    pub fn new(title: impl Into<String>, composer_id: i64) -> Self {
        Self {
            id: 0,
            title: title.into(),
            composer_id,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if is_blank(&self.title) {
            return Err(ValidationError::PieceTitleEmpty);
        }

        Ok(())
    }
}

/// Piece plus the number of programmes that include it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PieceWithDetails {
    pub piece: Piece,
    pub programme_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_title() {
        assert_eq!(Piece::new("", 1).validate(), Err(ValidationError::PieceTitleEmpty));
        assert_eq!(Piece::new("BWV 1", 1).validate(), Ok(()));
    }
}
