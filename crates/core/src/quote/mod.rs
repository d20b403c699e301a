mod engine;

pub use engine::QuoteEngine;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::tariff::{CommodityType, ServiceLevel};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryMode {
    Cargo,
    White,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CustomsPayer {
    OurCompany,
    Client,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CargoRequest {
    pub commodity: CommodityType,
    pub desired_days: u32,
    pub weight_kg: Decimal,
    pub volume_m3: Decimal,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhiteRequest {
    pub weight_kg: Decimal,
    pub volume_m3: Decimal,
    /// Must be chosen explicitly before a white quote can be computed.
    pub payer: Option<CustomsPayer>,
    pub goods_value_usd: Option<Decimal>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuoteRequest {
    Cargo(CargoRequest),
    White(WhiteRequest),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CargoQuote {
    pub commodity: CommodityType,
    pub service_level: ServiceLevel,
    pub service_term_days: String,
    pub density: Decimal,
    pub total_usd: Decimal,
    pub effective_per_kg_usd: Decimal,
    pub explanation: String,
}

/// A white-delivery total is either final or still missing the declared-value
/// insurance component. The pending shape is distinct on purpose so callers
/// cannot read the subtotal as a final price.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WhiteTotal {
    Final(Decimal),
    PendingInsurance { subtotal: Decimal },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhiteQuote {
    pub payer: CustomsPayer,
    pub density: Decimal,
    pub total: WhiteTotal,
    pub explanation: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuoteResult {
    Cargo(CargoQuote),
    White(WhiteQuote),
}

/// Fee schedule for the customs-cleared ("white") mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhiteTariff {
    pub customs_on_us_per_m3: Decimal,
    pub customs_on_client_per_kg: Decimal,
    pub fixed_fee: Decimal,
    pub extra_packaging_per_m3: Decimal,
    /// Fraction of the declared goods value charged as insurance.
    pub insurance_rate: Decimal,
}

impl Default for WhiteTariff {
    fn default() -> Self {
        Self {
            customs_on_us_per_m3: Decimal::new(18_000, 2),
            customs_on_client_per_kg: Decimal::new(14_000, 2),
            fixed_fee: Decimal::new(50_000, 2),
            extra_packaging_per_m3: Decimal::new(2_000, 2),
            insurance_rate: Decimal::new(1, 2),
        }
    }
}
