//! Floating chat widget: toggle button, panel, message list and input row.
//!
//! SYSTEM CONTEXT
//! ==============
//! All behavior lives in `chat::ChatWidget`; this component only turns DOM
//! events into controller calls and draws `ChatWidget::render`.
//!
//! LIFECYCLE
//! =========
//! The document-level `keydown` (shortcut, Escape) and `click` (outside
//! click) listeners are owned by the component instance and removed in
//! `on_cleanup`, so mounting and unmounting the widget never leaks handlers.

use chat::{ChatService, KeyOutcome, KeyPress, KeyScope, MessageNode, PointerTarget};
use leptos::prelude::*;

use crate::net::api::HttpChatService;

type WidgetState = chat::ChatWidget;

/// Chat launcher plus panel. Props override the build-time configuration.
#[component]
pub fn ChatWidget(
    /// Chat endpoint URL; defaults to the `CHATBOT_API_URL` build value.
    #[prop(optional, into)]
    endpoint: Option<String>,
    /// Greeting bubble shown before the first message. Empty disables it.
    #[prop(optional, into)]
    greeting: Option<String>,
) -> impl IntoView {
    let config = crate::config::resolve(endpoint.as_deref(), greeting);
    let service = StoredValue::new(HttpChatService::new(config.endpoint.clone()));
    let widget = RwSignal::new(WidgetState::new(config));

    let toggle_ref = NodeRef::<leptos::html::Button>::new();
    let panel_ref = NodeRef::<leptos::html::Div>::new();
    let messages_ref = NodeRef::<leptos::html::Div>::new();
    let input_ref = NodeRef::<leptos::html::Input>::new();

    // Keep the newest bubble in view.
    Effect::new(move || {
        let _ = widget.with(|w| (w.turns().len(), w.is_pending()));

        #[cfg(feature = "csr")]
        {
            if let Some(el) = messages_ref.get() {
                el.set_scroll_top(el.scroll_height());
            }
        }
    });

    // Focus runs a frame later so the `disabled`/`hidden` bindings have
    // already been applied to the DOM.
    Effect::new(move || {
        let (seq, ready) = widget.with(|w| (w.focus_seq(), w.input_accepts_focus()));
        if seq == 0 || !ready {
            return;
        }

        #[cfg(feature = "csr")]
        {
            request_animation_frame(move || {
                if !widget.with_untracked(WidgetState::input_accepts_focus) {
                    return;
                }
                let Some(el) = input_ref.get_untracked() else {
                    return;
                };
                if let Err(err) = el.focus() {
                    log::debug!("chat input focus failed: {err:?}");
                }
            });
        }
    });

    let do_submit = move || {
        let Some(ticket) = widget.try_update(WidgetState::begin_submit).flatten() else {
            return;
        };
        let service = service.get_value();
        leptos::task::spawn_local(async move {
            let outcome = service.send(ticket.message()).await;
            widget.update(|w| {
                w.settle(ticket, outcome);
            });
        });
    };

    let on_input_keydown = move |ev: leptos::ev::KeyboardEvent| {
        let press = key_press(&ev);
        let outcome = widget
            .try_maybe_update(|w| (false, w.handle_key(&press, KeyScope::Input)))
            .unwrap_or(KeyOutcome::Ignored);
        if outcome.prevent_default() {
            ev.prevent_default();
        }
        if outcome == KeyOutcome::Submit {
            do_submit();
        }
    };

    let keydown_handle = window_event_listener(leptos::ev::keydown, move |ev| {
        let press = key_press(&ev);
        let outcome = widget
            .try_maybe_update(|w| {
                let outcome = w.handle_key(&press, KeyScope::Document);
                (outcome != KeyOutcome::Ignored, outcome)
            })
            .unwrap_or(KeyOutcome::Ignored);
        if outcome.prevent_default() {
            ev.prevent_default();
        }
    });

    let click_handle = window_event_listener(leptos::ev::click, move |ev| {
        let target = pointer_target(&ev, panel_ref, toggle_ref);
        widget.maybe_update(|w| w.handle_pointer(target));
    });

    on_cleanup(move || {
        keydown_handle.remove();
        click_handle.remove();
    });

    view! {
        <div class="chatbot">
            <button
                class="chatbot-toggle"
                aria-label="Toggle chat"
                node_ref=toggle_ref
                on:click=move |_| {
                    widget.update(|w| {
                        w.toggle();
                    });
                }
            >
                "Chat"
            </button>

            <div
                class="chatbot-window"
                class:hidden=move || !widget.with(WidgetState::is_open)
                node_ref=panel_ref
            >
                <div class="chatbot-header">
                    <span class="chatbot-title">"Assistant"</span>
                    <button
                        class="chatbot-close"
                        aria-label="Close chat"
                        on:click=move |_| widget.update(WidgetState::close)
                    >
                        "×"
                    </button>
                </div>

                <div class="chatbot-messages" node_ref=messages_ref>
                    {move || {
                        widget
                            .with(WidgetState::render)
                            .into_iter()
                            .map(message_view)
                            .collect::<Vec<_>>()
                    }}
                </div>

                <div class="chatbot-input-row">
                    <input
                        class="chatbot-input"
                        type="text"
                        placeholder="Type your message..."
                        node_ref=input_ref
                        disabled=move || widget.with(WidgetState::controls_disabled)
                        prop:value=move || widget.with(|w| w.draft().to_owned())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            widget.update(|w| w.set_draft(value));
                        }
                        on:keydown=on_input_keydown
                    />
                    <button
                        class="chatbot-send"
                        on:click=move |_| do_submit()
                        disabled=move || widget.with(WidgetState::controls_disabled)
                    >
                        "Send"
                    </button>
                </div>
            </div>
        </div>
    }
}

fn message_view(node: MessageNode) -> AnyView {
    let class = node.class();
    match node {
        MessageNode::Message { text, .. } => view! {
            <div class=class>
                <div class="message-content">{text}</div>
            </div>
        }
        .into_any(),
        MessageNode::Typing => view! {
            <div class=class>
                <div class="typing-indicator">
                    <span></span>
                    <span></span>
                    <span></span>
                </div>
            </div>
        }
        .into_any(),
    }
}

fn key_press(ev: &leptos::ev::KeyboardEvent) -> KeyPress {
    KeyPress {
        key: ev.key(),
        ctrl: ev.ctrl_key(),
        shift: ev.shift_key(),
        alt: ev.alt_key(),
        meta: ev.meta_key(),
    }
}

/// Classify a click by whether it landed in the panel, on the toggle, or
/// anywhere else on the page.
fn pointer_target(
    ev: &leptos::ev::MouseEvent,
    panel_ref: NodeRef<leptos::html::Div>,
    toggle_ref: NodeRef<leptos::html::Button>,
) -> PointerTarget {
    #[cfg(feature = "csr")]
    {
        use wasm_bindgen::JsCast;

        let Some(node) = ev.target().and_then(|t| t.dyn_into::<web_sys::Node>().ok()) else {
            return PointerTarget::Outside;
        };
        let inside = |container: Option<web_sys::Node>| container.is_some_and(|c| c.contains(Some(&node)));

        if inside(panel_ref.get_untracked().map(Into::into)) {
            PointerTarget::Panel
        } else if inside(toggle_ref.get_untracked().map(Into::into)) {
            PointerTarget::Toggle
        } else {
            PointerTarget::Outside
        }
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (ev, panel_ref, toggle_ref);
        PointerTarget::Outside
    }
}
