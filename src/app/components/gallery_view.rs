use leptos::html;
use leptos::prelude::*;
use prompt_flow::gallery::{GalleryDraft, GalleryItem};
use prompt_flow::Control;

use crate::app::components::dialog::Dialog;
use crate::app::gallery;
use crate::app::state::AppState;
use crate::app::types::Modal;
use crate::app::utils::picked_file;

#[component]
pub fn GalleryPage() -> impl IntoView {
    let state = expect_context::<AppState>();

    Effect::new(move || {
        gallery::reload_gallery(state);
    });

    let items = move || state.gallery.with(|g| g.items().to_vec());

    view! {
        <main class="gallery-page">
            <div class="panel-header">
                <h2>"画廊"</h2>
                <button class="primary" on:click=move |_| state.open(Modal::GalleryUpload)>"+ 上传作品"</button>
            </div>
            <Show
                when=move || state.gallery.with(|g| !g.is_empty())
                fallback=move || {
                    view! {
                        <p class="empty-hint">
                            {move || {
                                if state.busy(Control::LoadGallery) { "加载中..." } else { "暂无作品，点击上方按钮上传" }
                            }}
                        </p>
                    }
                }
            >
                <div class="gallery-grid">
                    <For
                        each=items
                        key=|item| (item.id.clone(), item.updated_at.clone(), item.title.clone(), item.image.clone())
                        children=move |item| view! { <GalleryCard item=item/> }
                    />
                </div>
            </Show>
        </main>
    }
}

#[component]
fn GalleryCard(item: GalleryItem) -> impl IntoView {
    let state = expect_context::<AppState>();
    let view_item = item.clone();
    let edit_item = item.clone();

    view! {
        <div class="gallery-card" on:click=move |_| state.open(Modal::GalleryView(view_item.clone()))>
            <img src=item.image_url() alt=item.display_title().to_string() loading="lazy"/>
            <div class="gallery-card-footer">
                <span class="title">{item.display_title().to_string()}</span>
                <button
                    class="icon-btn"
                    title="编辑"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        state.open(Modal::GalleryEdit(edit_item.clone()));
                    }
                >
                    "✎"
                </button>
            </div>
        </div>
    }
}

/// Title and prompt fields shared by the upload and edit dialogs.
#[component]
fn DraftFields(draft: RwSignal<GalleryDraft>) -> impl IntoView {
    view! {
        <label>"标题"</label>
        <input
            type="text"
            placeholder="可选"
            prop:value=move || draft.with(|d| d.title.clone())
            on:input=move |ev| {
                let value = event_target_value(&ev);
                draft.update(|d| d.title = value);
            }
        />
        <label>"正向提示词"</label>
        <textarea
            rows="4"
            prop:value=move || draft.with(|d| d.positive_prompt.clone())
            on:input=move |ev| {
                let value = event_target_value(&ev);
                draft.update(|d| d.positive_prompt = value);
            }
        ></textarea>
        <label>"反向提示词"</label>
        <textarea
            rows="3"
            prop:value=move || draft.with(|d| d.negative_prompt.clone())
            on:input=move |ev| {
                let value = event_target_value(&ev);
                draft.update(|d| d.negative_prompt = value);
            }
        ></textarea>
    }
}

#[component]
pub fn GalleryUploadDialog() -> impl IntoView {
    let state = expect_context::<AppState>();
    let draft = RwSignal::new(GalleryDraft::default());
    let file_input = NodeRef::<html::Input>::new();

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let file = file_input.get_untracked().and_then(|input| picked_file(&input));
        gallery::upload(state, draft.get_untracked(), file);
    };

    view! {
        <Dialog title="上传作品">
            <form class="form" on:submit=submit>
                <label>"图片"</label>
                <input type="file" accept="image/*" node_ref=file_input/>
                <DraftFields draft=draft/>
                <div class="form-actions">
                    <button type="submit" class="primary" disabled=move || state.busy(Control::SaveGalleryItem)>
                        {move || if state.busy(Control::SaveGalleryItem) { "上传中..." } else { "上传" }}
                    </button>
                </div>
            </form>
        </Dialog>
    }
}

#[component]
pub fn GalleryEditDialog(item: GalleryItem) -> impl IntoView {
    let state = expect_context::<AppState>();
    let draft = RwSignal::new(GalleryDraft::from_item(&item));
    let file_input = NodeRef::<html::Input>::new();
    let id = StoredValue::new(item.id.clone());

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let file = file_input.get_untracked().and_then(|input| picked_file(&input));
        gallery::update(state, id.get_value(), draft.get_untracked(), file);
    };

    view! {
        <Dialog title="编辑作品">
            <form class="form" on:submit=submit>
                <img class="gallery-preview" src=item.image_url() alt=item.display_title().to_string()/>
                <label>"替换图片 (可选)"</label>
                <input type="file" accept="image/*" node_ref=file_input/>
                <DraftFields draft=draft/>
                <div class="form-actions">
                    <button
                        type="button"
                        class="danger"
                        disabled=move || state.busy(Control::DeleteGalleryItem)
                        on:click=move |_| gallery::delete(state, id.get_value())
                    >
                        "删除"
                    </button>
                    <button type="submit" class="primary" disabled=move || state.busy(Control::SaveGalleryItem)>
                        {move || if state.busy(Control::SaveGalleryItem) { "保存中..." } else { "保存" }}
                    </button>
                </div>
            </form>
        </Dialog>
    }
}

#[component]
pub fn GalleryViewDialog(item: GalleryItem) -> impl IntoView {
    let state = expect_context::<AppState>();
    let edit_item = item.clone();

    let prompt_block = move |label: &'static str, text: String| {
        let copy_text = text.clone();
        let empty = text.trim().is_empty();
        view! {
            <div class="prompt-block">
                <div class="panel-header">
                    <h3>{label}</h3>
                    <button disabled=empty on:click=move |_| state.copy(copy_text.clone())>"复制"</button>
                </div>
                <pre class="prompt-text">{if empty { "(无)".to_string() } else { text }}</pre>
            </div>
        }
    };

    view! {
        <Dialog title=item.display_title().to_string() wide=true>
            <div class="gallery-view">
                <img class="gallery-full" src=item.image_url() alt=item.display_title().to_string()/>
                <div class="gallery-prompts">
                    {prompt_block("正向提示词", item.positive_prompt.clone())}
                    {prompt_block("反向提示词", item.negative_prompt.clone())}
                    <div class="form-actions">
                        <button on:click=move |_| state.open(Modal::GalleryEdit(edit_item.clone()))>"编辑"</button>
                    </div>
                </div>
            </div>
        </Dialog>
    }
}
