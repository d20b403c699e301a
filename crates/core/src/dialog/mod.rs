mod controller;
mod service;
mod states;

pub use controller::{DialogController, TurnOutcome};
pub use service::{DialogService, SessionId};
pub use states::{ButtonTag, DialogEvent, DialogState, InputField, Reply, Session};
