use leptos::prelude::*;
use prompt_flow::{Cursor, PromptFormat};

use crate::app::library::copy_prompt;
use crate::app::state::AppState;

#[component]
pub fn SelectionPanel() -> impl IntoView {
    let state = expect_context::<AppState>();
    let prompt = move || state.board.with(|b| b.prompt_display());
    let empty = move || state.board.with(|b| b.selection.is_empty());
    let selected = move || {
        state.board.with(|b| b.selection.tags().iter().cloned().enumerate().collect::<Vec<_>>())
    };
    let cursor_hint = move || {
        state.board.with(|b| match b.selection.cursor() {
            Cursor::Append => "插入位置: 末尾".to_string(),
            Cursor::After(i) => format!("插入位置: 第 {} 个之后", i + 1),
        })
    };

    view! {
        <aside class="right-sidebar">
            <div class="panel-header">
                <h2>"Prompt"</h2>
                <select
                    class="format-select"
                    on:change=move |ev| {
                        state.dispatch("set-format", Some(event_target_value(&ev).as_str()));
                    }
                >
                    {PromptFormat::ALL
                        .into_iter()
                        .map(|format| {
                            view! {
                                <option
                                    value=format.as_str()
                                    selected=move || state.board.with(|b| b.format == format)
                                >
                                    {format.label()}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
            </div>

            <div class="prompt-output" class:empty=empty>{prompt}</div>
            <div class="prompt-actions">
                <button on:click=move |_| copy_prompt(state)>"复制"</button>
                <button
                    class="danger"
                    disabled=empty
                    on:click=move |_| {
                        state.dispatch("clear-selection", None);
                    }
                >
                    "清空"
                </button>
            </div>

            <div class="panel-header">
                <h3>"已选标签"</h3>
                <span class="cursor-hint">{cursor_hint}</span>
            </div>
            <div class="selected-list">
                <For
                    each=selected
                    key=|(i, t)| (*i, t.id.clone(), t.weight.to_bits())
                    children=move |(index, tag)| {
                        let at_cursor = move || state.board.with(|b| b.selection.is_cursor_at(index));
                        let remove_id = tag.id.clone();
                        view! {
                            <div
                                class="selected-tag"
                                class:cursor=at_cursor
                                title="点击设为插入位置"
                                on:click=move |_| {
                                    state.dispatch("set-cursor", Some(index.to_string().as_str()));
                                }
                            >
                                <span class="index">{index + 1}</span>
                                <span class="name-en">{tag.name_en.clone()}</span>
                                <span class="name-zh">{tag.name_zh.clone()}</span>
                                <button
                                    class="icon-btn"
                                    title="移除"
                                    on:click=move |ev| {
                                        ev.stop_propagation();
                                        state.dispatch("remove-selected", Some(remove_id.as_str()));
                                    }
                                >
                                    "×"
                                </button>
                            </div>
                        }
                    }
                />
            </div>
        </aside>
    }
}
