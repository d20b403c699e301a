use freighty_core::dialog::{ButtonTag, DialogEvent, DialogService, SessionId};
use tracing::{debug, warn};

use crate::render::{self, RenderRequest};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InboundUpdate {
    pub session_id: SessionId,
    pub kind: UpdateKind,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UpdateKind {
    /// A bot command without its leading slash ("start").
    Command(String),
    /// A pressed inline button's callback payload.
    CallbackQuery { data: String },
    /// Free-form message text.
    Message { text: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutboundMessage {
    pub session_id: SessionId,
    pub render: RenderRequest,
}

/// Maps transport updates onto the dialogue core and replies onto render
/// requests. Everything protocol-shaped stops here; the core only ever sees
/// its own event vocabulary.
pub struct BotGateway {
    service: DialogService,
}

impl BotGateway {
    pub fn new(service: DialogService) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &DialogService {
        &self.service
    }

    pub async fn on_update(
        &self,
        update: InboundUpdate,
        correlation_id: &str,
    ) -> Option<OutboundMessage> {
        let session_id = update.session_id;

        let render = match update.kind {
            UpdateKind::Command(command) if command == "start" => {
                let reply = self.service.start(&session_id).await;
                debug!(
                    event_name = "telegram.session_started",
                    correlation_id,
                    session_id = %session_id,
                    "conversation started"
                );
                render::render_reply(&reply)
            }
            UpdateKind::Command(command) => {
                debug!(
                    event_name = "telegram.command_ignored",
                    correlation_id,
                    session_id = %session_id,
                    command = %command,
                    "unsupported command"
                );
                return None;
            }
            UpdateKind::CallbackQuery { data } => match ButtonTag::parse(&data) {
                Some(tag) => {
                    let reply =
                        self.service.on_event(&session_id, DialogEvent::ButtonPress(tag)).await;
                    render::render_reply(&reply)
                }
                None => {
                    // Payload outside the button vocabulary; the session is
                    // left exactly as it was.
                    warn!(
                        event_name = "telegram.unknown_callback",
                        correlation_id,
                        session_id = %session_id,
                        payload = %data,
                        "callback payload not in the button vocabulary"
                    );
                    render::not_understood()
                }
            },
            UpdateKind::Message { text } => {
                let reply =
                    self.service.on_event(&session_id, DialogEvent::TextInput(text)).await;
                render::render_reply(&reply)
            }
        };

        Some(OutboundMessage { session_id, render })
    }
}
