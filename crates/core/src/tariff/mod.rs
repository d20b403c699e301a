mod catalog;
mod resolver;
mod selector;

pub use catalog::{default_catalog, CatalogBuildError, RateCatalog, RateCatalogBuilder};
pub use resolver::{resolve_rate, BillingMode, RateSelection};
pub use selector::select_service;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Density (kg/m3) at and above which billing switches from the per-volume
/// sub-threshold rate to bracketed per-weight rates.
pub const DENSITY_THRESHOLD: Decimal = Decimal::ONE_HUNDRED;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommodityType {
    Tools,
    AutoParts,
    Toys,
    Appliances,
    GeneralGoods,
    Clothing,
}

impl CommodityType {
    pub const ALL: [CommodityType; 6] = [
        CommodityType::Tools,
        CommodityType::AutoParts,
        CommodityType::Toys,
        CommodityType::Appliances,
        CommodityType::GeneralGoods,
        CommodityType::Clothing,
    ];

    /// Stable identifier used in button tags and logs. Display strings live
    /// in the presentation layer, not here.
    pub fn slug(self) -> &'static str {
        match self {
            Self::Tools => "tools",
            Self::AutoParts => "auto_parts",
            Self::Toys => "toys",
            Self::Appliances => "appliances",
            Self::GeneralGoods => "general_goods",
            Self::Clothing => "clothing",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|commodity| commodity.slug() == slug)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceLevel {
    Express,
    Standard,
    Slow,
}

/// Half-open density interval `[min, max)` priced per kilogram. `None` for
/// `max_density` means unbounded above.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DensityBracket {
    pub min_density: Decimal,
    pub max_density: Option<Decimal>,
    pub price_per_kg: Decimal,
}

impl DensityBracket {
    pub fn new(min_density: Decimal, max_density: Option<Decimal>, price_per_kg: Decimal) -> Self {
        Self { min_density, max_density, price_per_kg }
    }

    pub fn contains(&self, density: Decimal) -> bool {
        density >= self.min_density && self.max_density.map_or(true, |max| density < max)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TariffEntry {
    /// Display range of transit days ("12-15"). Not parsed, carried through
    /// to the rendered quote.
    pub service_term_days: String,
    pub price_under_threshold_per_m3: Option<Decimal>,
    pub brackets: Vec<DensityBracket>,
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{CommodityType, DensityBracket};

    #[test]
    fn commodity_slugs_round_trip() {
        for commodity in CommodityType::ALL {
            assert_eq!(CommodityType::from_slug(commodity.slug()), Some(commodity));
        }
        assert_eq!(CommodityType::from_slug("furniture"), None);
    }

    #[test]
    fn bracket_interval_is_half_open() {
        let bracket = DensityBracket::new(
            Decimal::from(200),
            Some(Decimal::from(250)),
            Decimal::new(150, 2),
        );

        assert!(bracket.contains(Decimal::from(200)));
        assert!(bracket.contains(Decimal::new(24_999, 2)));
        assert!(!bracket.contains(Decimal::from(250)));
        assert!(!bracket.contains(Decimal::new(19_999, 2)));
    }

    #[test]
    fn unbounded_bracket_has_no_upper_limit() {
        let bracket = DensityBracket::new(Decimal::from(400), None, Decimal::new(110, 2));
        assert!(bracket.contains(Decimal::from(1_000_000)));
        assert!(!bracket.contains(Decimal::new(39_999, 2)));
    }
}
