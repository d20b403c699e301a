use rust_decimal::Decimal;

use super::{
    CargoQuote, CargoRequest, CustomsPayer, QuoteRequest, QuoteResult, WhiteQuote, WhiteRequest,
    WhiteTariff, WhiteTotal,
};
use crate::errors::{CatalogError, QuoteError, ValidationError};
use crate::tariff::{resolve_rate, select_service, BillingMode, RateCatalog};

pub struct QuoteEngine {
    catalog: RateCatalog,
    white: WhiteTariff,
}

impl QuoteEngine {
    pub fn new(catalog: RateCatalog) -> Self {
        Self { catalog, white: WhiteTariff::default() }
    }

    pub fn with_white_tariff(catalog: RateCatalog, white: WhiteTariff) -> Self {
        Self { catalog, white }
    }

    pub fn catalog(&self) -> &RateCatalog {
        &self.catalog
    }

    pub fn compute(&self, request: &QuoteRequest) -> Result<QuoteResult, QuoteError> {
        match request {
            QuoteRequest::Cargo(cargo) => self.compute_cargo(cargo).map(QuoteResult::Cargo),
            QuoteRequest::White(white) => self.compute_white(white).map(QuoteResult::White),
        }
    }

    pub fn compute_cargo(&self, request: &CargoRequest) -> Result<CargoQuote, QuoteError> {
        let density = density_of(request.weight_kg, request.volume_m3)?;
        let level = select_service(&self.catalog, request.commodity, request.desired_days)?;
        let tariff = self
            .catalog
            .find(request.commodity, level)
            .ok_or(CatalogError::UnknownCommodityType(request.commodity))?;
        let rate = resolve_rate(tariff, density)?;

        let (total, effective_per_kg, explanation) = match rate.billing {
            BillingMode::PerWeight => {
                let total = rate.unit_price * request.weight_kg;
                let explanation =
                    format!("{:.2} $/kg x {:.2} kg", rate.unit_price, request.weight_kg);
                (total, rate.unit_price, explanation)
            }
            BillingMode::PerVolume => {
                let total = rate.unit_price * request.volume_m3;
                let effective_per_kg = total / request.weight_kg;
                let explanation = format!(
                    "{:.2} $/m3 x {:.3} m3 (= {:.4} $/kg)",
                    rate.unit_price, request.volume_m3, effective_per_kg
                );
                (total, effective_per_kg, explanation)
            }
        };

        Ok(CargoQuote {
            commodity: request.commodity,
            service_level: level,
            service_term_days: tariff.service_term_days.clone(),
            density: density.round_dp(2),
            total_usd: total.round_dp(2),
            effective_per_kg_usd: effective_per_kg.round_dp(4),
            explanation,
        })
    }

    pub fn compute_white(&self, request: &WhiteRequest) -> Result<WhiteQuote, QuoteError> {
        let density = density_of(request.weight_kg, request.volume_m3)?;
        let payer = request.payer.ok_or(ValidationError::MissingCustomsChoice)?;

        let (base, base_detail) = match payer {
            CustomsPayer::OurCompany => (
                self.white.customs_on_us_per_m3 * request.volume_m3,
                format!(
                    "{:.2} $/m3 x {:.3} m3",
                    self.white.customs_on_us_per_m3, request.volume_m3
                ),
            ),
            CustomsPayer::Client => (
                self.white.customs_on_client_per_kg * request.weight_kg,
                format!(
                    "{:.2} $/kg x {:.2} kg",
                    self.white.customs_on_client_per_kg, request.weight_kg
                ),
            ),
        };

        let packaging = self.white.extra_packaging_per_m3 * request.volume_m3;
        let subtotal = base + self.white.fixed_fee + packaging;
        let insurance_pct = self.white.insurance_rate * Decimal::ONE_HUNDRED;
        let detail = format!(
            "{base_detail} + {:.2} $ + {:.2} $/m3 x {:.3} m3",
            self.white.fixed_fee, self.white.extra_packaging_per_m3, request.volume_m3
        );

        match request.goods_value_usd {
            None => Ok(WhiteQuote {
                payer,
                density: density.round_dp(2),
                total: WhiteTotal::PendingInsurance { subtotal: subtotal.round_dp(2) },
                explanation: format!("{detail} + {insurance_pct:.0}% of the goods value"),
            }),
            Some(goods_value) => {
                if goods_value < Decimal::ZERO {
                    return Err(ValidationError::NegativeValue.into());
                }
                let insurance = goods_value * self.white.insurance_rate;
                let total = subtotal + insurance;
                Ok(WhiteQuote {
                    payer,
                    density: density.round_dp(2),
                    total: WhiteTotal::Final(total.round_dp(2)),
                    explanation: format!(
                        "{detail} + {insurance_pct:.0}% x {goods_value:.2} $ = {insurance:.2} $"
                    ),
                })
            }
        }
    }
}

fn density_of(weight_kg: Decimal, volume_m3: Decimal) -> Result<Decimal, ValidationError> {
    if weight_kg <= Decimal::ZERO || volume_m3 <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveValue);
    }
    Ok(weight_kg / volume_m3)
}
