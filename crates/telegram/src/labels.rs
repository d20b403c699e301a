//! Display strings for core identifiers. The core never sees these; swapping
//! the user-facing language touches only this crate.

use freighty_core::quote::CustomsPayer;
use freighty_core::tariff::{CommodityType, ServiceLevel};

pub fn commodity_label(commodity: CommodityType) -> &'static str {
    match commodity {
        CommodityType::Tools => "Tools",
        CommodityType::AutoParts => "Auto parts",
        CommodityType::Toys => "Toys",
        CommodityType::Appliances => "Home appliances",
        CommodityType::GeneralGoods => "General goods (TIR)",
        CommodityType::Clothing => "Clothing",
    }
}

pub fn service_label(level: ServiceLevel) -> &'static str {
    match level {
        ServiceLevel::Express => "Express",
        ServiceLevel::Standard => "Standard",
        ServiceLevel::Slow => "Slow",
    }
}

pub fn payer_label(payer: CustomsPayer) -> &'static str {
    match payer {
        CustomsPayer::OurCompany => "our company",
        CustomsPayer::Client => "the client",
    }
}

#[cfg(test)]
mod tests {
    use freighty_core::tariff::CommodityType;

    use super::commodity_label;

    #[test]
    fn every_commodity_has_a_distinct_label() {
        let mut labels: Vec<&str> = CommodityType::ALL.into_iter().map(commodity_label).collect();
        labels.sort_unstable();
        labels.dedup();
        assert_eq!(labels.len(), CommodityType::ALL.len());
    }
}
