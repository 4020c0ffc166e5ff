use leptos::prelude::*;
use prompt_flow::CategoryFilter;

use crate::app::library::delete_category;
use crate::app::state::AppState;
use crate::app::types::Modal;

#[component]
pub fn CategoryPanel() -> impl IntoView {
    let state = expect_context::<AppState>();
    let categories = move || state.board.with(|b| b.library.categories().to_vec());
    let all_active = move || state.board.with(|b| *b.library.filter() == CategoryFilter::All);
    let total = move || state.board.with(|b| b.library.tags().len());

    view! {
        <aside class="left-panel">
            <div class="panel-header">
                <h2>"分类"</h2>
                <button title="添加分类" on:click=move |_| state.open(Modal::AddCategory)>"+"</button>
            </div>
            <ul class="category-list">
                <li
                    class="category-item"
                    class:active=all_active
                    on:click=move |_| {
                        state.dispatch("filter-all", None);
                    }
                >
                    <span class="category-name">"全部"</span>
                    <span class="count">{total}</span>
                </li>
                <For
                    each=categories
                    key=|c| (c.id.clone(), c.name_en.clone(), c.name_zh.clone(), c.color.clone())
                    children=move |category| {
                        let id = category.id.clone();
                        let label = category.label();
                        let active = {
                            let id = id.clone();
                            move || state.board.with(|b| b.library.filter().is_category(&id))
                        };
                        let count = {
                            let id = id.clone();
                            move || {
                                state.board.with(|b| {
                                    b.library
                                        .tags()
                                        .iter()
                                        .filter(|t| t.category_id.as_deref() == Some(id.as_str()))
                                        .count()
                                })
                            }
                        };
                        let select_id = id.clone();
                        let delete_label = label.clone();
                        let edit = category.clone();
                        view! {
                            <li
                                class="category-item"
                                class:active=active
                                on:click=move |_| {
                                    state.dispatch("filter-category", Some(select_id.as_str()));
                                }
                            >
                                <span class="color-dot" style=format!("background: {}", category.color)></span>
                                <span class="category-name">{label}</span>
                                <span class="count">{count}</span>
                                <button
                                    class="icon-btn"
                                    title="编辑"
                                    on:click=move |ev| {
                                        ev.stop_propagation();
                                        state.open(Modal::EditCategory(edit.clone()));
                                    }
                                >
                                    "✎"
                                </button>
                                <button
                                    class="icon-btn danger"
                                    title="删除"
                                    on:click=move |ev| {
                                        ev.stop_propagation();
                                        delete_category(state, id.clone(), delete_label.clone());
                                    }
                                >
                                    "×"
                                </button>
                            </li>
                        }
                    }
                />
            </ul>
        </aside>
    }
}
