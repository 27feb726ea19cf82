//! Demo page hosting the chat widget.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};

use crate::components::chat_widget::ChatWidget;

/// Root application component.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="Chatbot Widget"/>

        <main class="chatbot-demo">
            <h1>"Chatbot widget"</h1>
            <p>"Open the chat with the button below or press Ctrl + /. Escape closes it."</p>
        </main>

        <ChatWidget/>
    }
}
