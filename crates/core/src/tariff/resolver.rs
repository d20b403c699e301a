use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{TariffEntry, DENSITY_THRESHOLD};
use crate::errors::CatalogError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingMode {
    PerVolume,
    PerWeight,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateSelection {
    pub billing: BillingMode,
    pub unit_price: Decimal,
}

/// Picks the billing rule for a density. Below the threshold the entry's
/// per-volume price applies; at or above it exactly one bracket of a
/// validated entry matches. The out-of-range arm stays reachable for raw
/// (unvalidated) entries rather than assuming the partition invariant.
pub fn resolve_rate(entry: &TariffEntry, density: Decimal) -> Result<RateSelection, CatalogError> {
    if density < DENSITY_THRESHOLD {
        let unit_price = entry
            .price_under_threshold_per_m3
            .ok_or(CatalogError::NoSubThresholdTariff)?;
        return Ok(RateSelection { billing: BillingMode::PerVolume, unit_price });
    }

    entry
        .brackets
        .iter()
        .find(|bracket| bracket.contains(density))
        .map(|bracket| RateSelection {
            billing: BillingMode::PerWeight,
            unit_price: bracket.price_per_kg,
        })
        .ok_or(CatalogError::DensityOutOfRange { density })
}
