use leptos::prelude::*;
use prompt_flow::types::{parse_weight, FALLBACK_COLOR};
use prompt_flow::{Category, CategoryDraft, Control, FlowError, Tag, TagDraft};

use crate::app::components::dialog::Dialog;
use crate::app::library::{save_category, save_tag};
use crate::app::state::AppState;

/// Options for every category, with `current` preselected.
pub fn category_options(state: AppState, current: RwSignal<String>) -> impl IntoView {
    move || {
        state.board.with(|b| {
            b.library
                .categories()
                .iter()
                .map(|c| {
                    let id = c.id.clone();
                    let is_current = current.get_untracked() == id;
                    view! { <option value=id selected=is_current>{c.label()}</option> }
                })
                .collect_view()
        })
    }
}

#[component]
pub fn TagDialog(editing: Option<Tag>) -> impl IntoView {
    let state = expect_context::<AppState>();
    let editing_id = editing.as_ref().map(|t| t.id.clone());
    let is_edit = editing.is_some();

    let initial_category = match &editing {
        Some(tag) => tag.category_id.clone().unwrap_or_default(),
        None => state
            .board
            .with_untracked(|b| b.library.active_category().map(|c| c.id.clone()).unwrap_or_default()),
    };
    let name_en = RwSignal::new(editing.as_ref().map(|t| t.name_en.clone()).unwrap_or_default());
    let name_zh = RwSignal::new(editing.as_ref().map(|t| t.name_zh.clone()).unwrap_or_default());
    let weight = RwSignal::new(editing.as_ref().map_or("1".to_string(), |t| t.weight.to_string()));
    let category = RwSignal::new(initial_category);

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let name = name_en.get_untracked().trim().to_string();
        if name.is_empty() {
            state.flow_error(&FlowError::EmptyInput);
            return;
        }
        let category_id = category.get_untracked();
        let draft = TagDraft {
            name_en: name,
            name_zh: name_zh.get_untracked().trim().to_string(),
            category_id: (!category_id.is_empty()).then_some(category_id),
            weight: parse_weight(&weight.get_untracked()),
        };
        save_tag(state, editing_id.clone(), draft);
    };

    view! {
        <Dialog title=if is_edit { "编辑标签" } else { "添加标签" }>
            <form class="form" on:submit=submit>
                <label>"英文名"</label>
                <input
                    type="text"
                    required=true
                    placeholder="e.g. long hair"
                    prop:value=move || name_en.get()
                    on:input=move |ev| name_en.set(event_target_value(&ev))
                />
                <label>"中文名"</label>
                <input
                    type="text"
                    placeholder="例如 长发"
                    prop:value=move || name_zh.get()
                    on:input=move |ev| name_zh.set(event_target_value(&ev))
                />
                <label>"分类"</label>
                <select on:change=move |ev| category.set(event_target_value(&ev))>
                    <option value="" selected=category.get_untracked().is_empty()>"未分类"</option>
                    {category_options(state, category)}
                </select>
                <label>"权重"</label>
                <input
                    type="number"
                    step="0.1"
                    min="0.1"
                    max="2"
                    prop:value=move || weight.get()
                    on:input=move |ev| weight.set(event_target_value(&ev))
                />
                <div class="form-actions">
                    <button type="submit" class="primary" disabled=move || state.busy(Control::SaveTag)>
                        "保存"
                    </button>
                </div>
            </form>
        </Dialog>
    }
}

#[component]
pub fn CategoryDialog(editing: Option<Category>) -> impl IntoView {
    let state = expect_context::<AppState>();
    let editing_id = editing.as_ref().map(|c| c.id.clone());
    let is_edit = editing.is_some();

    let name_en = RwSignal::new(editing.as_ref().map(|c| c.name_en.clone()).unwrap_or_default());
    let name_zh = RwSignal::new(editing.as_ref().map(|c| c.name_zh.clone()).unwrap_or_default());
    let color = RwSignal::new(editing.as_ref().map_or(FALLBACK_COLOR.to_string(), |c| c.color.clone()));

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let en = name_en.get_untracked().trim().to_string();
        let zh = name_zh.get_untracked().trim().to_string();
        if en.is_empty() && zh.is_empty() {
            state.flow_error(&FlowError::EmptyInput);
            return;
        }
        let draft = CategoryDraft { name_en: en, name_zh: zh, color: color.get_untracked() };
        save_category(state, editing_id.clone(), draft);
    };

    view! {
        <Dialog title=if is_edit { "编辑分类" } else { "添加分类" }>
            <form class="form" on:submit=submit>
                <label>"英文名"</label>
                <input
                    type="text"
                    prop:value=move || name_en.get()
                    on:input=move |ev| name_en.set(event_target_value(&ev))
                />
                <label>"中文名"</label>
                <input
                    type="text"
                    prop:value=move || name_zh.get()
                    on:input=move |ev| name_zh.set(event_target_value(&ev))
                />
                <label>"颜色"</label>
                <input
                    type="color"
                    prop:value=move || color.get()
                    on:input=move |ev| color.set(event_target_value(&ev))
                />
                <div class="form-actions">
                    <button type="submit" class="primary" disabled=move || state.busy(Control::SaveCategory)>
                        "保存"
                    </button>
                </div>
            </form>
        </Dialog>
    }
}
