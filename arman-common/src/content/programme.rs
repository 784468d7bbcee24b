use super::{is_blank, Composer, Piece, ValidationError};
use serde::{Deserialize, Serialize};

/// An ordered list of pieces performed together
///
/// The piece order lives in [`ProgrammePiece::sequence`], not in the piece.
/// A programme referenced by a published event is frozen; see the programme
/// service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Programme {
    pub id: i64,
    pub title: String,
}

impl Programme {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: 0,
            title: title.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if is_blank(&self.title) {
            return Err(ValidationError::ProgrammeTitleEmpty);
        }

        Ok(())
    }
}

/// One slot of a programme, joined with its piece and composer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgrammePiece {
    pub piece: Piece,
    pub composer: Composer,
    /// 1-based position within the programme
    pub sequence: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgrammeWithPieces {
    pub programme: Programme,
    pub pieces: Vec<ProgrammePiece>,
}

/// Programme plus its piece count and the number of published events
/// referencing it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgrammeWithDetails {
    pub programme: Programme,
    pub piece_count: i64,
    pub event_count: i64,
}

/// Pair every piece id with its sequence number, `index + 1`.
///
/// Duplicates are kept: a piece listed twice occupies two slots.
pub fn assign_sequence(piece_ids: &[i64]) -> Vec<(i64, i64)> {
    piece_ids
        .iter()
        .enumerate()
        .map(|(index, &piece_id)| (index as i64 + 1, piece_id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_title() {
        assert_eq!(
            Programme::new(" ").validate(),
            Err(ValidationError::ProgrammeTitleEmpty)
        );
        assert_eq!(Programme::new("Recital").validate(), Ok(()));
    }

    #[test]
    fn test_sequence_follows_input_order() {
        assert_eq!(assign_sequence(&[30, 10, 20]), vec![(1, 30), (2, 10), (3, 20)]);
        assert!(assign_sequence(&[]).is_empty());
    }

    #[test]
    fn test_sequence_keeps_repeated_pieces() {
        assert_eq!(assign_sequence(&[7, 8, 7]), vec![(1, 7), (2, 8), (3, 7)]);
    }
}
