//! Platform-neutral chat widget controller.
//!
//! This crate owns everything about the chat widget that does not touch a
//! browser or a socket: the open/closed panel state, the append-only turn
//! list, the single in-flight request gate, keyboard and pointer routing,
//! and the wire types exchanged with the chat endpoint.
//!
//! The Leptos binding (root crate) and `chatbot-cli` both drive the same
//! [`ChatWidget`] and plug in their own [`ChatService`] transport.

pub mod config;
pub mod input;
pub mod render;
pub mod service;
pub mod turn;
pub mod widget;

pub use config::{DEFAULT_API_URL, DEFAULT_GREETING, RETRY_FALLBACK, WidgetConfig};
pub use input::{KeyChord, KeyOutcome, KeyPress, KeyScope, PointerTarget, route_key};
pub use render::{MessageNode, render};
pub use service::{ChatReply, ChatRequest, ChatService, ServiceError, decode_reply};
pub use turn::{Role, Turn};
pub use widget::{ChatWidget, InFlight, Panel};
