use leptos::prelude::*;
use prompt_flow::{CategoryFilter, Tag};

use crate::app::library::{delete_tag, open_add_tag};
use crate::app::state::AppState;
use crate::app::types::Modal;

#[component]
pub fn TagPanel() -> impl IntoView {
    let state = expect_context::<AppState>();
    let visible = move || state.board.with(|b| b.library.visible_tags().cloned().collect::<Vec<_>>());
    let title = move || {
        state.board.with(|b| match b.library.filter() {
            CategoryFilter::All => "全部标签".to_string(),
            CategoryFilter::Category(id) => b
                .library
                .category(id)
                .map(|c| c.label())
                .unwrap_or_else(|| "全部标签".to_string()),
        })
    };

    view! {
        <section class="center-panel">
            <div class="panel-header">
                <h2>{title}</h2>
                <div class="panel-actions">
                    <button on:click=move |_| open_add_tag(state)>"+ 添加标签"</button>
                    <button on:click=move |_| state.open(Modal::Import)>"批量导入"</button>
                    <button on:click=move |_| state.open(Modal::Editor)>"Prompt 编辑器"</button>
                </div>
            </div>
            <Show
                when=move || state.board.with(|b| b.library.visible_tags().next().is_some())
                fallback=|| view! { <p class="empty-hint">"暂无标签"</p> }
            >
                <div class="tag-grid">
                    <For
                        each=visible
                        key=|t| (t.id.clone(), t.name_en.clone(), t.name_zh.clone(), t.category_id.clone(), t.weight.to_bits())
                        children=move |tag| view! { <TagChip tag=tag/> }
                    />
                </div>
            </Show>
        </section>
    }
}

#[component]
fn TagChip(tag: Tag) -> impl IntoView {
    let state = expect_context::<AppState>();
    let id = tag.id.clone();
    let selected = {
        let id = id.clone();
        move || state.board.with(|b| b.selection.contains(&id))
    };
    let category_id = tag.category_id.clone();
    let color = move || {
        state.board.with(|b| b.library.category_color(category_id.as_deref()).to_string())
    };
    let weight = (tag.weight != 1.0).then(|| view! { <span class="weight">{format!("×{}", tag.weight)}</span> });
    let toggle_id = id.clone();
    let edit = tag.clone();
    let delete_name = tag.name_en.clone();

    view! {
        <div
            class="tag-chip"
            class:selected=selected
            style=move || format!("border-color: {}", color())
            on:click=move |_| {
                state.dispatch("toggle-tag", Some(toggle_id.as_str()));
            }
        >
            <span class="name-en">{tag.name_en.clone()}</span>
            <span class="name-zh">{tag.name_zh.clone()}</span>
            {weight}
            <button
                class="icon-btn"
                title="编辑"
                on:click=move |ev| {
                    ev.stop_propagation();
                    state.open(Modal::EditTag(edit.clone()));
                }
            >
                "✎"
            </button>
            <button
                class="icon-btn danger"
                title="删除"
                on:click=move |ev| {
                    ev.stop_propagation();
                    delete_tag(state, id.clone(), delete_name.clone());
                }
            >
                "×"
            </button>
        </div>
    }
}
