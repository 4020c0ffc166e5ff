use leptos::prelude::*;
use prompt_flow::Control;

use crate::app::components::dialog::Dialog;
use crate::app::components::tag_dialogs::category_options;
use crate::app::editor;
use crate::app::state::AppState;

/// Paste a prompt, resolve it against the library, pick what to keep.
#[component]
pub fn EditorDialog() -> impl IntoView {
    let state = expect_context::<AppState>();
    let text = RwSignal::new(String::new());
    let bulk_category = RwSignal::new(String::new());
    let new_category = RwSignal::new(
        state
            .board
            .with_untracked(|b| b.library.active_category().map(|c| c.id.clone()).unwrap_or_default()),
    );

    let items = move || state.board.with(|b| b.editor.items().iter().cloned().enumerate().collect::<Vec<_>>());
    let has_items = move || state.board.with(|b| !b.editor.is_empty());
    let checked = move || state.board.with(|b| b.editor.checked_count());
    let has_new = move || state.board.with(|b| b.editor.items().iter().any(|t| t.is_new));
    let on_close = Callback::new(move |_: ()| editor::close(state));

    view! {
        <Dialog title="Prompt 编辑器" wide=true on_close=on_close>
            <textarea
                class="prompt-input"
                rows="5"
                placeholder="粘贴 Prompt，例如: 1girl, (masterpiece:1.2), {beautiful}"
                prop:value=move || text.get()
                on:input=move |ev| text.set(event_target_value(&ev))
            ></textarea>
            <div class="toolbar">
                <button on:click=move |_| editor::parse_local(state, &text.get_untracked())>"本地解析"</button>
                <button
                    disabled=move || state.busy(Control::EditorParse)
                    on:click=move |_| editor::parse_remote(state, text.get_untracked())
                >
                    {move || if state.busy(Control::EditorParse) { "解析中..." } else { "AI 解析" }}
                </button>
            </div>

            <Show when=has_items fallback=|| view! { <p class="empty-hint">"解析后的标签会显示在这里"</p> }>
                <div class="toolbar">
                    <button on:click=move |_| {
                        state.dispatch("editor-select-all", None);
                    }>"全选"</button>
                    <button on:click=move |_| {
                        state.dispatch("editor-select-none", None);
                    }>"全不选"</button>
                    <select on:change=move |ev| bulk_category.set(event_target_value(&ev))>
                        <option value="">"选择分类..."</option>
                        {category_options(state, bulk_category)}
                    </select>
                    <button on:click=move |_| {
                        let id = bulk_category.get_untracked();
                        if id.is_empty() {
                            state.flow_error(&prompt_flow::FlowError::NoCategorySelected);
                        } else {
                            state.dispatch("editor-select-category", Some(id.as_str()));
                        }
                    }>"按分类选择"</button>
                    <button
                        disabled=move || state.busy(Control::EditorRelevance)
                        on:click=move |_| editor::select_relevant(state, bulk_category.get_untracked())
                    >
                        {move || if state.busy(Control::EditorRelevance) { "分析中..." } else { "AI 按分类选择" }}
                    </button>
                </div>

                <ul class="editor-list">
                    <For
                        each=items
                        key=|(i, t)| (*i, t.id.clone(), t.checked, t.is_new)
                        children=move |(index, item)| {
                            let badge = if item.from_library { "库" } else { "新" };
                            let color = state
                                .board
                                .with_untracked(|b| b.library.category_color(item.category_id.as_deref()).to_string());
                            view! {
                                <li class="editor-item" class:new=item.is_new class:checked=item.checked>
                                    <label>
                                        <input
                                            type="checkbox"
                                            prop:checked=item.checked
                                            on:change=move |_| {
                                                state.dispatch("editor-toggle", Some(index.to_string().as_str()));
                                            }
                                        />
                                        <span class="color-dot" style=format!("background: {color}")></span>
                                        <span class="name-en">{item.name_en.clone()}</span>
                                        <span class="name-zh">{item.name_zh.clone()}</span>
                                        <span class="badge">{badge}</span>
                                    </label>
                                </li>
                            }
                        }
                    />
                </ul>

                <Show when=has_new>
                    <div class="toolbar">
                        <span>"新标签保存到:"</span>
                        <select on:change=move |ev| new_category.set(event_target_value(&ev))>
                            <option value="">"沿用解析分类"</option>
                            {category_options(state, new_category)}
                        </select>
                        <button
                            disabled=move || state.busy(Control::EditorSaveNew)
                            on:click=move |_| editor::save_new_tags(state, new_category.get_untracked())
                        >
                            "保存勾选的新标签"
                        </button>
                    </div>
                </Show>

                <div class="form-actions">
                    <span class="hint">{move || format!("已勾选 {} 个", checked())}</span>
                    <button class="primary" on:click=move |_| editor::commit(state)>"添加到选择"</button>
                </div>
            </Show>
        </Dialog>
    }
}
