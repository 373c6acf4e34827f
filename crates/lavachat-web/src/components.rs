//! UI Components

use leptos::prelude::*;

use crate::api::ChatMessage;

/// Message bubble component
#[component]
pub fn MessageBubble(message: ChatMessage) -> impl IntoView {
    let class = format!("message message-{}", message.role);
    let label = if message.role == "user" { "You" } else { "AI" };

    view! {
        <div class=class>
            <span class="role">{label}</span>
            <p class="content">{message.content.clone()}</p>
        </div>
    }
}
