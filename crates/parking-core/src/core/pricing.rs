// crates/parking-core/src/core/pricing.rs
// ============================================================================
// Module: Parking Rates
// Description: Hourly rate card keyed by slot size class.
// Purpose: Price a closed ticket from its duration and slot class.
// Dependencies: crate::core::size, serde, thiserror
// ============================================================================

//! ## Overview
//! Price is `hours * (base_rate + surcharge(slot class))`. Fractional hours
//! are billed linearly; there is no rounding or minimum charge. The charge
//! follows the slot class, not the vehicle class, so a small car parked in a
//! large slot pays the large rate.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::size::SizeClass;

// ============================================================================
// SECTION: Rate Card
// ============================================================================

/// Per-class hourly surcharges added to the base rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Surcharges {
    /// Surcharge for two-wheeler slots.
    pub two_wheeler: f64,
    /// Surcharge for small slots.
    pub small: f64,
    /// Surcharge for medium slots.
    pub medium: f64,
    /// Surcharge for large slots.
    pub large: f64,
}

impl Surcharges {
    /// Returns the surcharge for a slot class.
    #[must_use]
    pub const fn for_class(&self, class: SizeClass) -> f64 {
        match class {
            SizeClass::TwoWheeler => self.two_wheeler,
            SizeClass::Small => self.small,
            SizeClass::Medium => self.medium,
            SizeClass::Large => self.large,
        }
    }
}

impl Default for Surcharges {
    fn default() -> Self {
        Self {
            two_wheeler: 0.01,
            small: 0.02,
            medium: 0.03,
            large: 0.04,
        }
    }
}

/// Hourly pricing table.
///
/// # Invariants
/// - All rates are finite and non-negative once validated.
/// - Surcharges do not decrease as the class grows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RateCard {
    /// Rate charged per hour for every class.
    #[serde(default = "default_base_rate")]
    pub base_rate: f64,
    /// Class-specific hourly surcharges.
    #[serde(default)]
    pub surcharges: Surcharges,
}

/// Default hourly base rate.
const fn default_base_rate() -> f64 {
    0.01
}

impl Default for RateCard {
    fn default() -> Self {
        Self {
            base_rate: default_base_rate(),
            surcharges: Surcharges::default(),
        }
    }
}

impl RateCard {
    /// Returns the hourly rate for a slot class.
    #[must_use]
    pub fn rate(&self, class: SizeClass) -> f64 {
        self.base_rate + self.surcharges.for_class(class)
    }

    /// Prices `hours` of parking in a slot of `class`. Negative hours bill as zero.
    #[must_use]
    pub fn price(&self, hours: f64, class: SizeClass) -> f64 {
        hours.max(0.0) * self.rate(class)
    }

    /// Validates the rate card.
    ///
    /// # Errors
    ///
    /// Returns [`RateCardError`] for negative or non-finite rates and for
    /// surcharges that decrease with class size.
    pub fn validate(&self) -> Result<(), RateCardError> {
        check_rate("base_rate", self.base_rate)?;
        let mut previous: Option<(SizeClass, f64)> = None;
        for class in SizeClass::ALL {
            let surcharge = self.surcharges.for_class(class);
            check_rate(class.as_str(), surcharge)?;
            if let Some((smaller, value)) = previous
                && surcharge < value
            {
                return Err(RateCardError::Decreasing {
                    smaller,
                    larger: class,
                });
            }
            previous = Some((class, surcharge));
        }
        Ok(())
    }
}

/// Rejects negative and non-finite rates.
fn check_rate(field: &str, value: f64) -> Result<(), RateCardError> {
    if !value.is_finite() || value < 0.0 {
        return Err(RateCardError::InvalidRate {
            field: field.to_string(),
            value,
        });
    }
    Ok(())
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Rate card validation errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RateCardError {
    /// Rate is negative, NaN, or infinite.
    #[error("rate {field} must be finite and non-negative, got {value}")]
    InvalidRate {
        /// Rate field name.
        field: String,
        /// Offending value.
        value: f64,
    },
    /// A larger class has a lower surcharge than a smaller class.
    #[error("surcharge for {larger} is lower than for {smaller}")]
    Decreasing {
        /// Smaller class.
        smaller: SizeClass,
        /// Larger class with the lower surcharge.
        larger: SizeClass,
    },
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::unwrap_used,
        clippy::float_cmp,
        reason = "Test-only assertions are permitted."
    )]

    use super::RateCard;
    use super::RateCardError;
    use crate::core::size::SizeClass;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn default_rates_match_class_table() {
        let card = RateCard::default();
        assert!(close(card.rate(SizeClass::TwoWheeler), 0.02));
        assert!(close(card.rate(SizeClass::Small), 0.03));
        assert!(close(card.rate(SizeClass::Medium), 0.04));
        assert!(close(card.rate(SizeClass::Large), 0.05));
        card.validate().unwrap();
    }

    #[test]
    fn price_is_linear_in_hours() {
        let card = RateCard::default();
        assert!(close(card.price(2.0, SizeClass::Medium), 0.08));
        assert!(close(card.price(0.5, SizeClass::Small), 0.015));
        assert_eq!(card.price(0.0, SizeClass::Large), 0.0);
        assert_eq!(card.price(-3.0, SizeClass::Large), 0.0);
    }

    #[test]
    fn validate_rejects_negative_and_non_finite() {
        let mut card = RateCard::default();
        card.base_rate = -0.5;
        assert!(matches!(card.validate(), Err(RateCardError::InvalidRate { .. })));
        card.base_rate = f64::NAN;
        assert!(matches!(card.validate(), Err(RateCardError::InvalidRate { .. })));
    }

    #[test]
    fn validate_rejects_decreasing_surcharges() {
        let mut card = RateCard::default();
        card.surcharges.large = 0.001;
        let err = card.validate().unwrap_err();
        assert_eq!(err, RateCardError::Decreasing {
            smaller: SizeClass::Medium,
            larger: SizeClass::Large,
        });
    }
}
