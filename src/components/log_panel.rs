//! Log Panel Component
//!
//! Collapsible footer listing the most recent log lines.

use leptos::prelude::*;

#[component]
pub fn LogPanel() -> impl IntoView {
    let (lines, set_lines) = signal(Vec::<String>::new());

    // Snapshot on open; the buffer is not reactive
    let refresh = move || set_lines.set(rolling_logger::recent_lines());

    view! {
        <footer class="log-panel">
            <details on:toggle=move |_| refresh()>
                <summary>"Logs"</summary>
                <button type="button" class="log-refresh" on:click=move |_| refresh()>"Refresh"</button>
                <pre class="log-lines">
                    {move || lines.get().join("\n")}
                </pre>
            </details>
        </footer>
    }
}
