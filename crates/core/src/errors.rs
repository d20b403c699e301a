use rust_decimal::Decimal;
use thiserror::Error;

use crate::tariff::CommodityType;

/// Input problems raised while collecting dialogue fields. Always recovered
/// locally with a corrective re-prompt; never ends a session.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("input is not a valid number")]
    InvalidNumberFormat,
    #[error("value must be greater than zero")]
    NonPositiveValue,
    #[error("value must not be negative")]
    NegativeValue,
    #[error("customs clearance choice is required for white delivery")]
    MissingCustomsChoice,
}

/// Structural tariff-lookup failures. Never retried; surfaced to the user as
/// a terminal failure offering only a restart.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("no tariff is defined for commodity {0:?}")]
    UnknownCommodityType(CommodityType),
    #[error("no per-volume tariff exists below the density threshold for this commodity")]
    NoSubThresholdTariff,
    #[error("density {density} kg/m3 does not fall into any bracket")]
    DensityOutOfRange { density: Decimal },
}

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum QuoteError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{CatalogError, QuoteError, ValidationError};

    #[test]
    fn quote_error_wraps_both_layers_transparently() {
        let validation = QuoteError::from(ValidationError::NonPositiveValue);
        assert_eq!(validation.to_string(), "value must be greater than zero");

        let catalog = QuoteError::from(CatalogError::DensityOutOfRange {
            density: Decimal::new(9_950, 2),
        });
        assert_eq!(catalog.to_string(), "density 99.50 kg/m3 does not fall into any bracket");
    }

    #[test]
    fn error_kinds_are_matchable_by_value() {
        let error = QuoteError::from(ValidationError::MissingCustomsChoice);
        assert!(matches!(error, QuoteError::Validation(ValidationError::MissingCustomsChoice)));
    }
}
