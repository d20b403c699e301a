use super::{CommodityType, RateCatalog, ServiceLevel};
use crate::errors::CatalogError;

const EXPRESS_MAX_DAYS: u32 = 15;
const STANDARD_MAX_DAYS: u32 = 20;

/// Fixed fallback chain applied when no desired-days rule matches. This is a
/// priority table, not a nearest-match heuristic.
const FALLBACK_ORDER: [ServiceLevel; 3] =
    [ServiceLevel::Slow, ServiceLevel::Standard, ServiceLevel::Express];

pub fn select_service(
    catalog: &RateCatalog,
    commodity: CommodityType,
    desired_days: u32,
) -> Result<ServiceLevel, CatalogError> {
    let available = catalog.levels_for(commodity);
    if available.is_empty() {
        return Err(CatalogError::UnknownCommodityType(commodity));
    }

    if desired_days <= EXPRESS_MAX_DAYS && available.contains(&ServiceLevel::Express) {
        return Ok(ServiceLevel::Express);
    }
    if desired_days <= STANDARD_MAX_DAYS && available.contains(&ServiceLevel::Standard) {
        return Ok(ServiceLevel::Standard);
    }
    if desired_days > STANDARD_MAX_DAYS && available.contains(&ServiceLevel::Slow) {
        return Ok(ServiceLevel::Slow);
    }

    for level in FALLBACK_ORDER {
        if available.contains(&level) {
            return Ok(level);
        }
    }

    // Unreachable while ServiceLevel has exactly the three variants above,
    // but the contract requires a defined answer: first in insertion order.
    available
        .first()
        .copied()
        .ok_or(CatalogError::UnknownCommodityType(commodity))
}
