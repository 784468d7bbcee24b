use super::{is_blank, ValidationError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Venue {
    pub id: i64,
    pub name: String,
    pub full_address: String,
    pub short_address: String,
}

impl Venue {
    pub fn new(
        name: impl Into<String>,
        full_address: impl Into<String>,
        short_address: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            name: name.into(),
            full_address: full_address.into(),
            short_address: short_address.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if is_blank(&self.name) {
            return Err(ValidationError::VenueNameEmpty);
        }

        if is_blank(&self.full_address) {
            return Err(ValidationError::VenueFullAddressEmpty);
        }

        if is_blank(&self.short_address) {
            return Err(ValidationError::VenueShortAddressEmpty);
        }

        Ok(())
    }
}

/// Venue plus the number of published events held there
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueWithDetails {
    pub venue: Venue,
    pub event_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_order() {
        assert_eq!(
            Venue::new("", "", "").validate(),
            Err(ValidationError::VenueNameEmpty)
        );
        assert_eq!(
            Venue::new("Wigmore Hall", "", "London").validate(),
            Err(ValidationError::VenueFullAddressEmpty)
        );
        assert_eq!(
            Venue::new("Wigmore Hall", "36 Wigmore St, London W1U 2BP", "").validate(),
            Err(ValidationError::VenueShortAddressEmpty)
        );
        assert_eq!(
            Venue::new("Wigmore Hall", "36 Wigmore St, London W1U 2BP", "London").validate(),
            Ok(())
        );
    }
}
