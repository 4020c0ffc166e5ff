use leptos::prelude::*;
use prompt_flow::{Control, ImportDraft};

use crate::app::components::dialog::Dialog;
use crate::app::components::tag_dialogs::category_options;
use crate::app::import;
use crate::app::state::AppState;

#[component]
pub fn ImportDialog() -> impl IntoView {
    let state = expect_context::<AppState>();
    let text = RwSignal::new(String::new());
    let default_category = RwSignal::new(
        state
            .board
            .with_untracked(|b| b.library.active_category().map(|c| c.id.clone()).unwrap_or_default()),
    );
    let draft = RwSignal::new(None::<ImportDraft>);

    let rows = move || {
        draft.with(|d| {
            d.as_ref()
                .map(|d| d.rows().iter().cloned().enumerate().collect::<Vec<_>>())
                .unwrap_or_default()
        })
    };
    let summary = move || {
        draft.with(|d| d.as_ref().map(|d| format!("{} (解析方式: {})", d.summary(), d.method.label())))
    };

    let set_row_category = move |index: usize, id: String| {
        let Some(category) = state.board.with_untracked(|b| b.library.category(&id).cloned()) else {
            return;
        };
        draft.update(|d| {
            if let Some(d) = d {
                if let Err(err) = d.set_category(index, &category) {
                    log::warn!("{err}");
                }
            }
        });
    };

    view! {
        <Dialog title="批量导入标签" wide=true>
            <textarea
                rows="6"
                placeholder="每行或逗号分隔一个标签，支持中英文"
                prop:value=move || text.get()
                on:input=move |ev| text.set(event_target_value(&ev))
            ></textarea>
            <div class="toolbar">
                <span>"默认分类:"</span>
                <select on:change=move |ev| default_category.set(event_target_value(&ev))>
                    <option value="">"不指定"</option>
                    {category_options(state, default_category)}
                </select>
                <button
                    disabled=move || state.busy(Control::ParseImport)
                    on:click=move |_| {
                        import::parse(state, text.get_untracked(), default_category.get_untracked(), draft)
                    }
                >
                    {move || if state.busy(Control::ParseImport) { "解析中..." } else { "解析" }}
                </button>
            </div>

            {move || summary().map(|s| view! { <p class="import-summary">{s}</p> })}

            <table class="import-table">
                <thead>
                    <tr>
                        <th>"导入"</th>
                        <th>"原文"</th>
                        <th>"英文"</th>
                        <th>"中文"</th>
                        <th>"分类"</th>
                        <th>"状态"</th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=rows
                        key=|(i, row)| (*i, row.excluded, row.tag.category_id.clone())
                        children=move |(index, row)| {
                            let current = RwSignal::new(row.tag.category_id.clone().unwrap_or_default());
                            let exists = row.tag.exists;
                            view! {
                                <tr class:exists=exists class:excluded=row.excluded>
                                    <td>
                                        <input
                                            type="checkbox"
                                            disabled=exists
                                            prop:checked=!row.excluded && !exists
                                            on:change=move |_| {
                                                draft.update(|d| {
                                                    if let Some(d) = d {
                                                        let _ = d.toggle_excluded(index);
                                                    }
                                                });
                                            }
                                        />
                                    </td>
                                    <td>{row.tag.original.clone()}</td>
                                    <td>{row.tag.name_en.clone()}</td>
                                    <td>
                                        <input
                                            type="text"
                                            value=row.tag.name_zh.clone()
                                            on:change=move |ev| {
                                                let value = event_target_value(&ev);
                                                draft.update(|d| {
                                                    if let Some(d) = d {
                                                        let _ = d.set_name_zh(index, value.trim());
                                                    }
                                                });
                                            }
                                        />
                                    </td>
                                    <td>
                                        <select on:change=move |ev| set_row_category(index, event_target_value(&ev))>
                                            <option value="" selected=current.get_untracked().is_empty()>"未分类"</option>
                                            {category_options(state, current)}
                                        </select>
                                    </td>
                                    <td>{if exists { "已存在" } else { "新" }}</td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>

            <div class="form-actions">
                <button
                    class="primary"
                    disabled=move || state.busy(Control::ConfirmImport) || draft.with(|d| d.is_none())
                    on:click=move |_| import::confirm(state, draft)
                >
                    {move || if state.busy(Control::ConfirmImport) { "导入中..." } else { "确认导入" }}
                </button>
            </div>
        </Dialog>
    }
}
