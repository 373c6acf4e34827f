//! Home Page
//!
//! Single-page wallet + chat demo. Wallet states: disconnected →
//! connecting (hosted checkout open) → connected, with topup reachable
//! from connected. Chat unlocks once a connection exists; every control is
//! disabled while a wallet or chat request is in flight.

use leptos::prelude::*;

use crate::api::{self, ChatMessage, ConnectionInfo};
use crate::components::MessageBubble;

#[component]
pub fn HomePage() -> impl IntoView {
    // Wallet state
    let (connection_id, set_connection_id) = signal(None::<String>);
    let (connection_info, set_connection_info) = signal(None::<ConnectionInfo>);
    let (wallet_busy, set_wallet_busy) = signal(false);

    // Chat state
    let (messages, set_messages) = signal(Vec::<ChatMessage>::new());
    let (input, set_input) = signal(String::new());
    let (chat_busy, set_chat_busy) = signal(false);

    let busy = move || wallet_busy.get() || chat_busy.get();

    // Returning from the hosted checkout, the redirect carries the
    // connection id in the query string.
    if let Some(id) = api::connection_id_from_url() {
        set_connection_id.set(Some(id.clone()));
        set_wallet_busy.set(true);
        leptos::task::spawn_local(async move {
            match api::fetch_connection(&id).await {
                Ok(info) => set_connection_info.set(Some(info)),
                Err(e) => leptos::logging::error!("failed to fetch connection: {e}"),
            }
            set_wallet_busy.set(false);
        });
    }

    let connect_wallet = move |_| {
        if busy() {
            return;
        }
        set_wallet_busy.set(true);
        leptos::task::spawn_local(async move {
            match api::create_checkout_session().await {
                // Navigates away; the redirect back re-enters with an id
                Ok(token) => api::open_checkout(&token),
                Err(e) => leptos::logging::error!("checkout session failed: {e}"),
            }
            set_wallet_busy.set(false);
        });
    };

    let top_up = move |_| {
        let Some(id) = connection_id.get() else {
            return;
        };
        if busy() {
            return;
        }
        set_wallet_busy.set(true);
        leptos::task::spawn_local(async move {
            match api::create_topup_session(&id).await {
                Ok(token) => api::open_checkout(&token),
                Err(e) => leptos::logging::error!("top-up session failed: {e}"),
            }
            set_wallet_busy.set(false);
        });
    };

    let send = move || {
        let text = input.get().trim().to_string();
        let Some(id) = connection_id.get() else {
            return;
        };
        if text.is_empty() || busy() {
            return;
        }

        set_messages.update(|msgs| {
            msgs.push(ChatMessage {
                role: "user".into(),
                content: text,
            });
        });
        set_input.set(String::new());
        set_chat_busy.set(true);

        let history = messages.get();
        leptos::task::spawn_local(async move {
            match api::send_chat(&history, &id).await {
                Ok(reply) => {
                    set_messages.update(|msgs| {
                        msgs.push(ChatMessage {
                            role: "assistant".into(),
                            content: reply,
                        });
                    });
                }
                Err(e) => {
                    set_messages.update(|msgs| {
                        msgs.push(ChatMessage {
                            role: "error".into(),
                            content: e,
                        });
                    });
                }
            }
            set_chat_busy.set(false);
        });
    };

    let short_id = move || {
        connection_id
            .get()
            .map(|id| id.chars().take(12).collect::<String>())
            .unwrap_or_default()
    };

    let balance = move || {
        connection_info
            .get()
            .and_then(|info| info.balance)
            .map(|amount| format!("${amount:.2}"))
    };

    view! {
        <div class="home">
            <header class="hero">
                <h1>"lavachat"</h1>
                <p class="tagline">"Wallet-billed AI chat demo"</p>
            </header>

            <section class="wallet card">
                <h2>"Connect Your Wallet"</h2>

                <Show
                    when=move || connection_id.get().is_some()
                    fallback=move || view! {
                        <button class="btn btn-primary" on:click=connect_wallet disabled=busy>
                            {move || if wallet_busy.get() { "Processing..." } else { "Connect Wallet" }}
                        </button>
                    }
                >
                    <p class="status connected">"Wallet Connected"</p>
                    <p class="connection-id">
                        "Connection ID: " <span class="mono">{short_id} "..."</span>
                    </p>
                    <Show when=move || balance().is_some()>
                        <p class="balance">"Balance: " {balance}</p>
                    </Show>
                    <button class="btn" on:click=top_up disabled=busy>
                        {move || if wallet_busy.get() { "Processing..." } else { "Add Funds" }}
                    </button>
                </Show>
            </section>

            <Show when=move || connection_id.get().is_some()>
                <section class="chat card">
                    <h2>"AI Chat"</h2>

                    <div class="messages">
                        <Show
                            when=move || !messages.get().is_empty()
                            fallback=|| view! {
                                <p class="placeholder">"Your conversation will appear here"</p>
                            }
                        >
                            <For
                                each=move || messages.get()
                                key=|msg| format!("{}-{}", msg.role, msg.content.len())
                                children=move |msg| view! { <MessageBubble message=msg /> }
                            />
                        </Show>
                        <Show when=move || chat_busy.get()>
                            <div class="message loading">"..."</div>
                        </Show>
                    </div>

                    <div class="input-area">
                        <input
                            type="text"
                            placeholder="What would you like to know?"
                            prop:value=move || input.get()
                            on:input=move |ev| set_input.set(event_target_value(&ev))
                            on:keydown=move |ev| {
                                if ev.key() == "Enter" {
                                    ev.prevent_default();
                                    send();
                                }
                            }
                        />
                        <button class="btn btn-primary" on:click=move |_| send() disabled=busy>
                            {move || if chat_busy.get() { "..." } else { "Send" }}
                        </button>
                    </div>
                </section>
            </Show>
        </div>
    }
}
