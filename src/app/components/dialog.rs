use leptos::prelude::*;

use crate::app::state::AppState;

/// Modal frame shared by every dialog. `on_close` runs before the modal is
/// dismissed.
#[component]
pub fn Dialog(
    #[prop(into)] title: String,
    #[prop(optional)] wide: bool,
    #[prop(optional, into)] on_close: Option<Callback<()>>,
    children: Children,
) -> impl IntoView {
    let state = expect_context::<AppState>();
    let close = move |_| {
        if let Some(on_close) = on_close {
            on_close.run(());
        }
        state.close_modal();
    };

    view! {
        <div class="modal-backdrop">
            <div class="modal" class:wide=wide>
                <div class="modal-header">
                    <h3>{title}</h3>
                    <button class="icon-btn" title="关闭" on:click=close>"×"</button>
                </div>
                <div class="modal-body">{children()}</div>
            </div>
        </div>
    }
}
