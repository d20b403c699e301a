use freighty_core::dialog::{ButtonTag, InputField, Reply};
use freighty_core::errors::{QuoteError, ValidationError};
use freighty_core::quote::{CargoQuote, WhiteQuote, WhiteTotal};
use freighty_core::tariff::CommodityType;
use serde::Serialize;

use crate::labels::{commodity_label, payer_label, service_label};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct InlineButton {
    pub label: String,
    pub tag: String,
}

impl InlineButton {
    pub fn new(label: impl Into<String>, tag: ButtonTag) -> Self {
        Self { label: label.into(), tag: tag.encode() }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct InlineKeyboard {
    pub rows: Vec<Vec<InlineButton>>,
}

impl InlineKeyboard {
    pub fn row(mut self, buttons: Vec<InlineButton>) -> Self {
        self.rows.push(buttons);
        self
    }

    pub fn button_row(self, button: InlineButton) -> Self {
        self.row(vec![button])
    }
}

/// What the transport should put on screen for one turn: message text plus
/// the buttons carrying the next expected tags.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RenderRequest {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyboard: Option<InlineKeyboard>,
}

impl RenderRequest {
    pub fn text_only(text: impl Into<String>) -> Self {
        Self { text: text.into(), keyboard: None }
    }

    pub fn with_keyboard(text: impl Into<String>, keyboard: InlineKeyboard) -> Self {
        Self { text: text.into(), keyboard: Some(keyboard) }
    }
}

pub fn start_keyboard() -> InlineKeyboard {
    InlineKeyboard::default()
        .button_row(InlineButton::new("🚚 Cargo", ButtonTag::DeliveryCargo))
        .button_row(InlineButton::new("📄 White delivery", ButtonTag::DeliveryWhite))
}

pub fn cargo_type_keyboard(commodities: &[CommodityType]) -> InlineKeyboard {
    let mut keyboard = InlineKeyboard::default();
    for commodity in commodities {
        keyboard = keyboard.button_row(InlineButton::new(
            commodity_label(*commodity),
            ButtonTag::CargoType(*commodity),
        ));
    }
    keyboard.button_row(InlineButton::new("⬅️ Back", ButtonTag::Restart))
}

pub fn customs_keyboard() -> InlineKeyboard {
    InlineKeyboard::default()
        .button_row(InlineButton::new("Cleared by our company", ButtonTag::CustomsUs))
        .button_row(InlineButton::new("Cleared by the client", ButtonTag::CustomsClient))
        .button_row(InlineButton::new("⬅️ Back", ButtonTag::Restart))
}

pub fn has_value_keyboard() -> InlineKeyboard {
    InlineKeyboard::default()
        .button_row(InlineButton::new("Yes, there is a goods value", ButtonTag::HasValueYes))
        .button_row(InlineButton::new("No goods value", ButtonTag::HasValueNo))
        .button_row(InlineButton::new("⬅️ Back", ButtonTag::Restart))
}

pub fn restart_keyboard() -> InlineKeyboard {
    InlineKeyboard::default().button_row(InlineButton::new("🔁 New quote", ButtonTag::Restart))
}

pub fn render_reply(reply: &Reply) -> RenderRequest {
    match reply {
        Reply::PromptDeliveryMode => RenderRequest::with_keyboard(
            "Hi! I'm the delivery cost calculator.\n\nPick a delivery mode below 👇",
            start_keyboard(),
        ),
        Reply::PromptCargoType { commodities } => RenderRequest::with_keyboard(
            "Pick a commodity type (cargo):",
            cargo_type_keyboard(commodities),
        ),
        Reply::PromptCustomsPayer => RenderRequest::with_keyboard(
            "White delivery: who handles customs clearance?",
            customs_keyboard(),
        ),
        Reply::PromptDays => {
            RenderRequest::text_only("Enter the desired delivery time in days, e.g. 15")
        }
        Reply::PromptWeight => RenderRequest::text_only("Enter the weight in kg, e.g. 300"),
        Reply::PromptVolume => RenderRequest::text_only("Enter the volume in m³, e.g. 1.5"),
        Reply::PromptHasGoodsValue => RenderRequest::with_keyboard(
            "Is there a declared goods value (needed for the insurance fee)?",
            has_value_keyboard(),
        ),
        Reply::PromptGoodsValue => {
            RenderRequest::text_only("Enter the goods value in USD, e.g. 10000")
        }
        Reply::InvalidInput { field, error } => {
            RenderRequest::text_only(invalid_input_text(*field, *error))
        }
        Reply::NotUnderstood => not_understood(),
        Reply::CargoResult(quote) => {
            RenderRequest::with_keyboard(cargo_result_text(quote), restart_keyboard())
        }
        Reply::WhiteResult(quote) => {
            RenderRequest::with_keyboard(white_result_text(quote), restart_keyboard())
        }
        Reply::QuoteFailed(error) => {
            RenderRequest::with_keyboard(quote_failed_text(error), restart_keyboard())
        }
    }
}

/// Fallback render for anything the dialogue cannot act on. Leaves the
/// session untouched; the user can keep going or start over.
pub fn not_understood() -> RenderRequest {
    RenderRequest::with_keyboard(
        "Sorry, I didn't understand that. Use the buttons above, or start over 👇",
        restart_keyboard(),
    )
}

fn invalid_input_text(field: InputField, error: ValidationError) -> String {
    let expected = match field {
        InputField::Days => "a number of days, e.g. 15",
        InputField::Weight => "the weight in kg, e.g. 300",
        InputField::Volume => "the volume in m³, e.g. 1.5",
        InputField::GoodsValue => "the goods value in USD, e.g. 10000",
    };
    format!("That didn't work: {error}. Enter {expected}, then try again:")
}

fn cargo_result_text(quote: &CargoQuote) -> String {
    format!(
        "✅ Result (Cargo)\n\
         Commodity: {commodity}\n\
         Service: {service} (tariff term {term} days)\n\
         Density: {density:.2} kg/m³\n\
         Total: {total:.2} $\n\
         Effective per kg: {effective:.4} $/kg\n\
         Calculation: {explanation}",
        commodity = commodity_label(quote.commodity),
        service = service_label(quote.service_level),
        term = quote.service_term_days,
        density = quote.density,
        total = quote.total_usd,
        effective = quote.effective_per_kg_usd,
        explanation = quote.explanation,
    )
}

fn white_result_text(quote: &WhiteQuote) -> String {
    let total_line = match &quote.total {
        WhiteTotal::Final(total) => format!("{total:.2} $"),
        WhiteTotal::PendingInsurance { subtotal } => {
            format!("{subtotal:.2} $ + insurance on the declared goods value")
        }
    };
    format!(
        "✅ Result (White delivery)\n\
         Customs clearance: {payer}\n\
         Density: {density:.2} kg/m³\n\
         Total: {total_line}\n\
         Calculation: {explanation}",
        payer = payer_label(quote.payer),
        density = quote.density,
        explanation = quote.explanation,
    )
}

fn quote_failed_text(error: &QuoteError) -> String {
    format!("❌ Could not compute the quote: {error}.\n\nPress \"New quote\" to start over.")
}
