pub mod config;
pub mod dialog;
pub mod errors;
pub mod quote;
pub mod tariff;

pub use config::{AppConfig, ConfigError, ConfigOverrides, LoadOptions, LogFormat};
pub use dialog::{
    ButtonTag, DialogController, DialogEvent, DialogService, DialogState, InputField, Reply,
    Session, SessionId, TurnOutcome,
};
pub use errors::{CatalogError, QuoteError, ValidationError};
pub use quote::{
    CargoQuote, CargoRequest, CustomsPayer, DeliveryMode, QuoteEngine, QuoteRequest, QuoteResult,
    WhiteQuote, WhiteRequest, WhiteTariff, WhiteTotal,
};
pub use tariff::{
    default_catalog, resolve_rate, select_service, BillingMode, CatalogBuildError, CommodityType,
    DensityBracket, RateCatalog, RateCatalogBuilder, RateSelection, ServiceLevel, TariffEntry,
};
