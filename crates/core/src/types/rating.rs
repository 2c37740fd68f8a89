//! Average customer rating.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Rating`].
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum RatingError {
    /// The value is NaN or infinite.
    #[error("rating must be a finite number")]
    NotFinite,
    /// The value is outside `0.0..=5.0`.
    #[error("rating must be between {min} and {max} (got {value})")]
    OutOfRange {
        /// Rejected value.
        value: f32,
        /// Lowest allowed rating.
        min: f32,
        /// Highest allowed rating.
        max: f32,
    },
}

/// An average star rating between 0.0 and 5.0.
///
/// ## Examples
///
/// ```
/// use lk_printers_core::Rating;
///
/// assert!(Rating::new(4.8).is_ok());
/// assert!(Rating::new(5.1).is_err());
/// assert_eq!(Rating::new(4.8).unwrap().full_stars(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f32", into = "f32")]
pub struct Rating(f32);

impl Rating {
    /// Lowest allowed rating.
    pub const MIN: f32 = 0.0;
    /// Highest allowed rating.
    pub const MAX: f32 = 5.0;

    /// Create a rating.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not finite or not within `0.0..=5.0`.
    pub fn new(value: f32) -> Result<Self, RatingError> {
        if !value.is_finite() {
            return Err(RatingError::NotFinite);
        }
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(RatingError::OutOfRange {
                value,
                min: Self::MIN,
                max: Self::MAX,
            });
        }
        Ok(Self(value))
    }

    /// The rating value.
    #[must_use]
    pub const fn value(self) -> f32 {
        self.0
    }

    /// Number of fully filled stars (floor of the rating).
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // 0.0..=5.0
    pub fn full_stars(self) -> u8 {
        self.0.floor() as u8
    }
}

impl TryFrom<f32> for Rating {
    type Error = RatingError;

    fn try_from(value: f32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for f32 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_are_inclusive() {
        assert!(Rating::new(0.0).is_ok());
        assert!(Rating::new(5.0).is_ok());
    }

    #[test]
    fn test_out_of_range() {
        assert!(matches!(
            Rating::new(-0.1),
            Err(RatingError::OutOfRange { .. })
        ));
        assert!(matches!(
            Rating::new(5.5),
            Err(RatingError::OutOfRange { .. })
        ));
        assert!(matches!(Rating::new(f32::NAN), Err(RatingError::NotFinite)));
    }

    #[test]
    fn test_display_one_decimal() {
        assert_eq!(Rating::new(4.0).unwrap().to_string(), "4.0");
        assert_eq!(Rating::new(4.76).unwrap().to_string(), "4.8");
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: Rating = serde_json::from_str("4.9").unwrap();
        assert_eq!(ok.full_stars(), 4);
        assert!(serde_json::from_str::<Rating>("7.5").is_err());
    }
}
