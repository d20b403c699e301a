use std::str::FromStr;

use rust_decimal::Decimal;

use super::states::{ButtonTag, DialogEvent, DialogState, InputField, Reply, Session};
use crate::errors::ValidationError;
use crate::quote::{CargoRequest, CustomsPayer, DeliveryMode, QuoteEngine, WhiteRequest};

/// Result of feeding one event into the state machine. `to: None` means the
/// dialogue reached a terminal render and the session record must be
/// destroyed by the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnOutcome {
    pub from: DialogState,
    pub to: Option<DialogState>,
    pub reply: Reply,
}

pub struct DialogController {
    engine: QuoteEngine,
}

impl DialogController {
    pub fn new(engine: QuoteEngine) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &QuoteEngine {
        &self.engine
    }

    /// Entry point for an explicit conversation (re)start.
    pub fn start(&self, session: &mut Session) -> Reply {
        session.reset();
        Reply::PromptDeliveryMode
    }

    pub fn handle(&self, session: &mut Session, event: &DialogEvent) -> TurnOutcome {
        let from = session.state;

        // Restart wins over every state, discarding collected data.
        if let DialogEvent::ButtonPress(ButtonTag::Restart) = event {
            session.reset();
            return TurnOutcome {
                from,
                to: Some(DialogState::ChooseDeliveryMode),
                reply: Reply::PromptDeliveryMode,
            };
        }

        match (from, event) {
            (DialogState::ChooseDeliveryMode, DialogEvent::ButtonPress(ButtonTag::DeliveryCargo)) => {
                session.delivery = Some(DeliveryMode::Cargo);
                Self::advance(
                    session,
                    from,
                    DialogState::CargoType,
                    Reply::PromptCargoType { commodities: self.engine.catalog().commodities() },
                )
            }
            (DialogState::ChooseDeliveryMode, DialogEvent::ButtonPress(ButtonTag::DeliveryWhite)) => {
                session.delivery = Some(DeliveryMode::White);
                Self::advance(session, from, DialogState::CustomsPayer, Reply::PromptCustomsPayer)
            }
            (DialogState::CargoType, DialogEvent::ButtonPress(ButtonTag::CargoType(commodity))) => {
                session.commodity = Some(*commodity);
                Self::advance(session, from, DialogState::AskDays, Reply::PromptDays)
            }
            (DialogState::CustomsPayer, DialogEvent::ButtonPress(ButtonTag::CustomsUs)) => {
                session.payer = Some(CustomsPayer::OurCompany);
                Self::advance(session, from, DialogState::AskDays, Reply::PromptDays)
            }
            (DialogState::CustomsPayer, DialogEvent::ButtonPress(ButtonTag::CustomsClient)) => {
                session.payer = Some(CustomsPayer::Client);
                Self::advance(session, from, DialogState::AskDays, Reply::PromptDays)
            }
            (DialogState::AskDays, DialogEvent::TextInput(raw)) => match parse_days(raw) {
                Ok(days) => {
                    session.desired_days = Some(days);
                    Self::advance(session, from, DialogState::AskWeight, Reply::PromptWeight)
                }
                Err(error) => Self::stay(from, Reply::InvalidInput { field: InputField::Days, error }),
            },
            (DialogState::AskWeight, DialogEvent::TextInput(raw)) => {
                match parse_positive_decimal(raw) {
                    Ok(weight) => {
                        session.weight_kg = Some(weight);
                        Self::advance(session, from, DialogState::AskVolume, Reply::PromptVolume)
                    }
                    Err(error) => {
                        Self::stay(from, Reply::InvalidInput { field: InputField::Weight, error })
                    }
                }
            }
            (DialogState::AskVolume, DialogEvent::TextInput(raw)) => {
                match parse_positive_decimal(raw) {
                    Ok(volume) => {
                        session.volume_m3 = Some(volume);
                        match session.delivery {
                            Some(DeliveryMode::White) => Self::advance(
                                session,
                                from,
                                DialogState::AskHasGoodsValue,
                                Reply::PromptHasGoodsValue,
                            ),
                            Some(DeliveryMode::Cargo) => self.finish_cargo(session, from),
                            None => Self::stay(from, Reply::NotUnderstood),
                        }
                    }
                    Err(error) => {
                        Self::stay(from, Reply::InvalidInput { field: InputField::Volume, error })
                    }
                }
            }
            (DialogState::AskHasGoodsValue, DialogEvent::ButtonPress(ButtonTag::HasValueYes)) => {
                session.has_goods_value = Some(true);
                Self::advance(session, from, DialogState::AskGoodsValue, Reply::PromptGoodsValue)
            }
            (DialogState::AskHasGoodsValue, DialogEvent::ButtonPress(ButtonTag::HasValueNo)) => {
                session.has_goods_value = Some(false);
                session.goods_value_usd = None;
                self.finish_white(session, from)
            }
            (DialogState::AskGoodsValue, DialogEvent::TextInput(raw)) => {
                match parse_non_negative_decimal(raw) {
                    Ok(value) => {
                        session.goods_value_usd = Some(value);
                        self.finish_white(session, from)
                    }
                    Err(error) => Self::stay(
                        from,
                        Reply::InvalidInput { field: InputField::GoodsValue, error },
                    ),
                }
            }
            // Recognized tag in the wrong state, or free text where a button
            // was expected: re-prompt without moving.
            _ => Self::stay(from, Reply::NotUnderstood),
        }
    }

    fn finish_cargo(&self, session: &Session, from: DialogState) -> TurnOutcome {
        let request = match (
            session.commodity,
            session.desired_days,
            session.weight_kg,
            session.volume_m3,
        ) {
            (Some(commodity), Some(desired_days), Some(weight_kg), Some(volume_m3)) => {
                CargoRequest { commodity, desired_days, weight_kg, volume_m3 }
            }
            _ => return Self::stay(from, Reply::NotUnderstood),
        };

        let reply = match self.engine.compute_cargo(&request) {
            Ok(quote) => Reply::CargoResult(quote),
            Err(error) => Reply::QuoteFailed(error),
        };
        Self::terminal(from, reply)
    }

    fn finish_white(&self, session: &Session, from: DialogState) -> TurnOutcome {
        let (Some(weight_kg), Some(volume_m3)) = (session.weight_kg, session.volume_m3) else {
            return Self::stay(from, Reply::NotUnderstood);
        };

        let request = WhiteRequest {
            weight_kg,
            volume_m3,
            payer: session.payer,
            goods_value_usd: session.goods_value_usd,
        };
        let reply = match self.engine.compute_white(&request) {
            Ok(quote) => Reply::WhiteResult(quote),
            Err(error) => Reply::QuoteFailed(error),
        };
        Self::terminal(from, reply)
    }

    fn advance(
        session: &mut Session,
        from: DialogState,
        to: DialogState,
        reply: Reply,
    ) -> TurnOutcome {
        session.state = to;
        TurnOutcome { from, to: Some(to), reply }
    }

    fn stay(from: DialogState, reply: Reply) -> TurnOutcome {
        TurnOutcome { from, to: Some(from), reply }
    }

    fn terminal(from: DialogState, reply: Reply) -> TurnOutcome {
        TurnOutcome { from, to: None, reply }
    }
}

fn parse_days(raw: &str) -> Result<u32, ValidationError> {
    let days: i64 = raw.trim().parse().map_err(|_| ValidationError::InvalidNumberFormat)?;
    if days <= 0 {
        return Err(ValidationError::NonPositiveValue);
    }
    u32::try_from(days).map_err(|_| ValidationError::InvalidNumberFormat)
}

fn parse_decimal(raw: &str) -> Result<Decimal, ValidationError> {
    // Both decimal separators are accepted; normalize before parsing.
    let normalized = raw.trim().replace(',', ".");
    Decimal::from_str(&normalized).map_err(|_| ValidationError::InvalidNumberFormat)
}

fn parse_positive_decimal(raw: &str) -> Result<Decimal, ValidationError> {
    let value = parse_decimal(raw)?;
    if value <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveValue);
    }
    Ok(value)
}

fn parse_non_negative_decimal(raw: &str) -> Result<Decimal, ValidationError> {
    let value = parse_decimal(raw)?;
    if value < Decimal::ZERO {
        return Err(ValidationError::NegativeValue);
    }
    Ok(value)
}
