use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use super::controller::DialogController;
use super::states::{DialogEvent, Reply, Session};
use crate::quote::QuoteEngine;

/// Opaque session key supplied by the transport (chat id, user id, ...).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Session registry around the controller. Each session entry has its own
/// mutex, so events for one session are processed strictly one at a time
/// while distinct sessions never contend or share state. The registry lock
/// itself is only held for the map lookup.
pub struct DialogService {
    controller: DialogController,
    sessions: Mutex<HashMap<SessionId, Arc<Mutex<Session>>>>,
}

impl DialogService {
    pub fn new(engine: QuoteEngine) -> Self {
        Self {
            controller: DialogController::new(engine),
            sessions: Mutex::new(HashMap::new()),
        }
    }

    pub fn controller(&self) -> &DialogController {
        &self.controller
    }

    /// Explicit conversation start: resets (or lazily creates) the session
    /// and returns the initial prompt.
    pub async fn start(&self, session_id: &SessionId) -> Reply {
        let entry = self.entry(session_id).await;
        let mut session = entry.lock().await;
        self.controller.start(&mut session)
    }

    pub async fn on_event(&self, session_id: &SessionId, event: DialogEvent) -> Reply {
        let entry = self.entry(session_id).await;
        let mut session = entry.lock().await;
        let outcome = self.controller.handle(&mut session, &event);
        drop(session);

        if outcome.to.is_none() {
            self.sessions.lock().await.remove(session_id);
        }
        outcome.reply
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.lock().await.len()
    }

    async fn entry(&self, session_id: &SessionId) -> Arc<Mutex<Session>> {
        let mut sessions = self.sessions.lock().await;
        sessions
            .entry(session_id.clone())
            .or_insert_with(|| Arc::new(Mutex::new(Session::new())))
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rust_decimal::Decimal;

    use super::{DialogService, SessionId};
    use crate::dialog::states::{ButtonTag, DialogEvent, Reply};
    use crate::quote::QuoteEngine;
    use crate::tariff::{default_catalog, CommodityType};

    fn service() -> DialogService {
        DialogService::new(QuoteEngine::new(default_catalog().expect("default catalog")))
    }

    fn press(tag: ButtonTag) -> DialogEvent {
        DialogEvent::ButtonPress(tag)
    }

    fn text(raw: &str) -> DialogEvent {
        DialogEvent::TextInput(raw.to_string())
    }

    #[tokio::test]
    async fn terminal_replies_destroy_the_session_record() {
        let service = service();
        let id = SessionId::new("chat-1");

        assert_eq!(service.start(&id).await, Reply::PromptDeliveryMode);
        service.on_event(&id, press(ButtonTag::DeliveryCargo)).await;
        service.on_event(&id, press(ButtonTag::CargoType(CommodityType::Tools))).await;
        service.on_event(&id, text("10")).await;
        service.on_event(&id, text("300")).await;
        assert_eq!(service.session_count().await, 1);

        let reply = service.on_event(&id, text("1.5")).await;
        assert!(matches!(reply, Reply::CargoResult(_)));
        assert_eq!(service.session_count().await, 0);

        // The restart button on the terminal render still works: a fresh
        // session is created in the initial state.
        let reply = service.on_event(&id, press(ButtonTag::Restart)).await;
        assert_eq!(reply, Reply::PromptDeliveryMode);
    }

    #[tokio::test]
    async fn sessions_are_isolated_from_each_other() {
        let service = Arc::new(service());
        let alice = SessionId::new("alice");
        let bob = SessionId::new("bob");

        service.on_event(&alice, press(ButtonTag::DeliveryCargo)).await;
        service.on_event(&bob, press(ButtonTag::DeliveryWhite)).await;
        service.on_event(&alice, press(ButtonTag::CargoType(CommodityType::Toys))).await;
        service.on_event(&bob, press(ButtonTag::CustomsClient)).await;

        // Interleaved numeric input must land in the right records.
        service.on_event(&alice, text("10")).await;
        service.on_event(&bob, text("12")).await;
        service.on_event(&alice, text("250")).await;
        service.on_event(&bob, text("300")).await;

        let alice_reply = service.on_event(&alice, text("1.0")).await;
        let Reply::CargoResult(quote) = alice_reply else {
            panic!("expected cargo result for alice, got {alice_reply:?}");
        };
        assert_eq!(quote.commodity, CommodityType::Toys);
        assert_eq!(quote.density, Decimal::from(250));

        let bob_reply = service.on_event(&bob, text("1.5")).await;
        assert_eq!(bob_reply, Reply::PromptHasGoodsValue);
        assert_eq!(service.session_count().await, 1);
    }

    #[tokio::test]
    async fn concurrent_dialogues_complete_without_cross_talk() {
        let service = Arc::new(service());
        let mut handles = Vec::new();

        for index in 0..16 {
            let service = Arc::clone(&service);
            handles.push(tokio::spawn(async move {
                let id = SessionId::new(format!("chat-{index}"));
                service.on_event(&id, press(ButtonTag::DeliveryCargo)).await;
                service
                    .on_event(&id, press(ButtonTag::CargoType(CommodityType::Tools)))
                    .await;
                service.on_event(&id, text("10")).await;
                service.on_event(&id, text("300")).await;
                service.on_event(&id, text("1.5")).await
            }));
        }

        for handle in handles {
            let reply = handle.await.expect("dialogue task");
            let Reply::CargoResult(quote) = reply else {
                panic!("expected a cargo result, got {reply:?}");
            };
            assert_eq!(quote.total_usd, Decimal::new(45_000, 2));
        }
        assert_eq!(service.session_count().await, 0);
    }
}
