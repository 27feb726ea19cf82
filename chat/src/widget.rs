//! The chat widget controller.
//!
//! DESIGN
//! ======
//! `ChatWidget` is a plain value: front ends keep it wherever their state
//! lives (a Leptos `RwSignal`, a local in the CLI) and feed it events.
//!
//! A submit is split in two halves so reactive front ends can release
//! their borrow across the network call:
//!
//! 1. [`ChatWidget::begin_submit`] disables input, appends the user turn,
//!    clears the draft, shows the typing placeholder and hands back an
//!    [`InFlight`] ticket.
//! 2. [`ChatWidget::settle`] consumes the ticket, appends exactly one bot
//!    turn and re-enables input.
//!
//! The ticket is move-only, so every begun submit is settled at most once,
//! and no second submit can begin while one is outstanding.

#[cfg(test)]
#[path = "widget_test.rs"]
mod widget_test;

use crate::config::{RETRY_FALLBACK, WidgetConfig};
use crate::input::{KeyOutcome, KeyPress, KeyScope, PointerTarget, route_key};
use crate::render::{MessageNode, render};
use crate::service::{ChatReply, ChatService, ServiceError};
use crate::turn::Turn;

/// Panel visibility.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Panel {
    #[default]
    Closed,
    Open,
}

/// Proof that a submit has begun and still needs settling.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "an in-flight submit must be passed to `ChatWidget::settle`"]
pub struct InFlight {
    message: String,
}

impl InFlight {
    /// The trimmed text that was submitted.
    pub fn message(&self) -> &str {
        &self.message
    }
}

#[derive(Clone, Debug)]
pub struct ChatWidget {
    config: WidgetConfig,
    panel: Panel,
    turns: Vec<Turn>,
    draft: String,
    in_flight: bool,
    focus_seq: u64,
}

impl Default for ChatWidget {
    fn default() -> Self {
        Self::new(WidgetConfig::default())
    }
}

impl ChatWidget {
    /// Closed widget, seeded with the configured greeting if any.
    #[must_use]
    pub fn new(config: WidgetConfig) -> Self {
        let turns = config.greeting.iter().map(Turn::bot).collect();
        Self { config, panel: Panel::Closed, turns, draft: String::new(), in_flight: false, focus_seq: 0 }
    }

    #[must_use]
    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    #[must_use]
    pub fn panel(&self) -> Panel {
        self.panel
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.panel == Panel::Open
    }

    #[must_use]
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    #[must_use]
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Mirror the text field's current value.
    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// True while a request is outstanding; input and send are disabled.
    #[must_use]
    pub fn controls_disabled(&self) -> bool {
        self.in_flight
    }

    /// True while the typing placeholder should be shown.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.in_flight
    }

    /// Bumped whenever focus should move into the text field.
    #[must_use]
    pub fn focus_seq(&self) -> u64 {
        self.focus_seq
    }

    /// Whether a pending focus request may be honored: the panel is open
    /// and the text field is enabled.
    #[must_use]
    pub fn input_accepts_focus(&self) -> bool {
        self.is_open() && !self.in_flight
    }

    #[must_use]
    pub fn render(&self) -> Vec<MessageNode> {
        render(&self.turns, self.is_pending())
    }

    // =========================================================================
    // PANEL
    // =========================================================================

    /// Flip the panel. Opening requests focus in the text field.
    pub fn toggle(&mut self) -> Panel {
        self.panel = match self.panel {
            Panel::Closed => {
                self.request_focus();
                Panel::Open
            }
            Panel::Open => Panel::Closed,
        };
        self.panel
    }

    /// Force the panel closed.
    pub fn close(&mut self) {
        self.panel = Panel::Closed;
    }

    /// Apply a key press observed in `scope`.
    ///
    /// [`KeyOutcome::Submit`] is only reported, never performed: submitting
    /// needs a [`ChatService`], which the caller owns.
    pub fn handle_key(&mut self, press: &KeyPress, scope: KeyScope) -> KeyOutcome {
        let outcome = route_key(&self.config.toggle_chord, press, scope, self.is_open());
        match outcome {
            KeyOutcome::Toggled => {
                self.toggle();
            }
            KeyOutcome::Closed => self.close(),
            KeyOutcome::Submit | KeyOutcome::Ignored => {}
        }
        outcome
    }

    /// Apply a pointer interaction. Returns true if it closed the panel.
    pub fn handle_pointer(&mut self, target: PointerTarget) -> bool {
        if self.is_open() && target == PointerTarget::Outside {
            self.close();
            return true;
        }
        false
    }

    // =========================================================================
    // SUBMIT
    // =========================================================================

    /// Start a submit from the current draft.
    ///
    /// Returns `None` without touching state when the trimmed draft is
    /// empty or a request is already in flight.
    pub fn begin_submit(&mut self) -> Option<InFlight> {
        if self.in_flight {
            log::debug!("chat submit ignored: request already in flight");
            return None;
        }
        let message = self.draft.trim();
        if message.is_empty() {
            return None;
        }
        let message = message.to_owned();

        self.in_flight = true;
        self.turns.push(Turn::user(message.clone()));
        self.draft.clear();
        log::debug!("chat submit started ({} chars)", message.len());
        Some(InFlight { message })
    }

    /// Finish a submit: drop the placeholder, append the reply or a
    /// fallback, re-enable input and request focus. Returns the bot turn.
    pub fn settle(&mut self, ticket: InFlight, outcome: Result<ChatReply, ServiceError>) -> &Turn {
        let text = match outcome {
            Ok(reply) => match reply.text() {
                Some(text) => text.to_owned(),
                None => {
                    log::warn!("chat service could not process message");
                    RETRY_FALLBACK.to_owned()
                }
            },
            Err(err) => {
                log::error!("chat request to {} failed: {err}", self.config.endpoint);
                self.config.unreachable_fallback()
            }
        };
        log::debug!("chat submit settled ({} chars sent)", ticket.message.len());

        self.in_flight = false;
        self.request_focus();
        let idx = self.turns.len();
        self.turns.push(Turn::bot(text));
        &self.turns[idx]
    }

    /// Run a full submit against `service`.
    ///
    /// Returns the bot turn, or `None` if the submit was a no-op.
    pub async fn submit<S>(&mut self, service: &S) -> Option<&Turn>
    where
        S: ChatService + ?Sized,
    {
        let ticket = self.begin_submit()?;
        let outcome = service.send(ticket.message()).await;
        Some(self.settle(ticket, outcome))
    }

    fn request_focus(&mut self) {
        self.focus_seq = self.focus_seq.wrapping_add(1);
    }
}
