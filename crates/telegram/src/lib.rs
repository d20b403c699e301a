pub mod gateway;
pub mod labels;
pub mod render;
pub mod transport;

pub use gateway::{BotGateway, InboundUpdate, OutboundMessage, UpdateKind};
pub use render::{InlineButton, InlineKeyboard, RenderRequest};
pub use transport::{
    NoopTelegramTransport, PollingRunner, ReconnectPolicy, TelegramTransport, TransportError,
};
