use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{QuoteError, ValidationError};
use crate::quote::{CargoQuote, CustomsPayer, DeliveryMode, WhiteQuote};
use crate::tariff::CommodityType;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DialogState {
    ChooseDeliveryMode,
    CargoType,
    CustomsPayer,
    AskDays,
    AskWeight,
    AskVolume,
    AskHasGoodsValue,
    AskGoodsValue,
}

impl DialogState {
    pub const ALL: [DialogState; 8] = [
        DialogState::ChooseDeliveryMode,
        DialogState::CargoType,
        DialogState::CustomsPayer,
        DialogState::AskDays,
        DialogState::AskWeight,
        DialogState::AskVolume,
        DialogState::AskHasGoodsValue,
        DialogState::AskGoodsValue,
    ];
}

/// Closed button vocabulary exchanged with the transport. Payloads carry
/// stable commodity slugs; display labels never appear here.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ButtonTag {
    DeliveryCargo,
    DeliveryWhite,
    CargoType(CommodityType),
    CustomsUs,
    CustomsClient,
    HasValueYes,
    HasValueNo,
    Restart,
}

impl ButtonTag {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "delivery:cargo" => Some(Self::DeliveryCargo),
            "delivery:white" => Some(Self::DeliveryWhite),
            "customs:us" => Some(Self::CustomsUs),
            "customs:client" => Some(Self::CustomsClient),
            "has_value:yes" => Some(Self::HasValueYes),
            "has_value:no" => Some(Self::HasValueNo),
            "restart" => Some(Self::Restart),
            other => other
                .strip_prefix("cargo_type:")
                .and_then(CommodityType::from_slug)
                .map(Self::CargoType),
        }
    }

    pub fn encode(self) -> String {
        match self {
            Self::DeliveryCargo => "delivery:cargo".to_string(),
            Self::DeliveryWhite => "delivery:white".to_string(),
            Self::CargoType(commodity) => format!("cargo_type:{}", commodity.slug()),
            Self::CustomsUs => "customs:us".to_string(),
            Self::CustomsClient => "customs:client".to_string(),
            Self::HasValueYes => "has_value:yes".to_string(),
            Self::HasValueNo => "has_value:no".to_string(),
            Self::Restart => "restart".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DialogEvent {
    ButtonPress(ButtonTag),
    TextInput(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputField {
    Days,
    Weight,
    Volume,
    GoodsValue,
}

/// One user's in-progress dialogue. Every collected field stays optional
/// until its state has been passed; handlers only read fields their state
/// guarantees.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub state: DialogState,
    pub delivery: Option<DeliveryMode>,
    pub commodity: Option<CommodityType>,
    pub desired_days: Option<u32>,
    pub weight_kg: Option<Decimal>,
    pub volume_m3: Option<Decimal>,
    pub payer: Option<CustomsPayer>,
    pub has_goods_value: Option<bool>,
    pub goods_value_usd: Option<Decimal>,
    pub started_at: DateTime<Utc>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            state: DialogState::ChooseDeliveryMode,
            delivery: None,
            commodity: None,
            desired_days: None,
            weight_kg: None,
            volume_m3: None,
            payer: None,
            has_goods_value: None,
            goods_value_usd: None,
            started_at: Utc::now(),
        }
    }

    /// Discards, never merges, collected data.
    pub fn reset(&mut self) {
        *self = Session::new();
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Semantic render instruction handed to the presentation layer. The core
/// decides *what* to say; wording and keyboards live outside it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reply {
    PromptDeliveryMode,
    PromptCargoType { commodities: Vec<CommodityType> },
    PromptCustomsPayer,
    PromptDays,
    PromptWeight,
    PromptVolume,
    PromptHasGoodsValue,
    PromptGoodsValue,
    InvalidInput { field: InputField, error: ValidationError },
    NotUnderstood,
    CargoResult(CargoQuote),
    WhiteResult(WhiteQuote),
    QuoteFailed(QuoteError),
}

impl Reply {
    /// Terminal replies destroy the session; only the restart affordance
    /// remains meaningful afterwards.
    pub fn ends_session(&self) -> bool {
        matches!(self, Self::CargoResult(_) | Self::WhiteResult(_) | Self::QuoteFailed(_))
    }
}
