use leptos::prelude::*;

pub mod api;
pub mod components;
pub mod config;
pub mod editor;
pub mod gallery;
pub mod import;
pub mod library;
pub mod logger;
pub mod settings;
pub mod state;
pub mod types;
pub mod utils;

use components::category_panel::CategoryPanel;
use components::editor_panel::EditorDialog;
use components::gallery_view::{GalleryEditDialog, GalleryPage, GalleryUploadDialog, GalleryViewDialog};
use components::import_dialog::ImportDialog;
use components::selection_panel::SelectionPanel;
use components::settings_dialog::SettingsDialog;
use components::tag_dialogs::{CategoryDialog, TagDialog};
use components::tag_panel::TagPanel;
use config::AppConfig;
use state::AppState;
use types::{Modal, Page};

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    let state = AppState::new(config);
    provide_context(state);

    // Load initial state
    Effect::new(move || {
        library::reload_library(state);
    });

    let page_button = move |page: Page, label: &'static str| {
        view! {
            <button
                class="nav-btn"
                class:active=move || state.page.get() == page
                on:click=move |_| state.page.set(page)
            >
                {label}
            </button>
        }
    };

    view! {
        <div class="app">
            <header class="header">
                <h1>"TagPrompt"</h1>
                <nav class="nav">
                    {page_button(Page::Library, "标签库")}
                    {page_button(Page::Gallery, "画廊")}
                </nav>
                <Show when=move || state.in_flight.with(|f| f.any_busy())>
                    <span class="sync-hint">"同步中..."</span>
                </Show>
                <button class="header-btn" title="设置" on:click=move |_| state.open(Modal::Settings)>
                    "⚙ 设置"
                </button>
            </header>

            {move || match state.page.get() {
                Page::Library => view! {
                    <main class="main-content">
                        <CategoryPanel/>
                        <TagPanel/>
                        <SelectionPanel/>
                    </main>
                }
                .into_any(),
                Page::Gallery => view! { <GalleryPage/> }.into_any(),
            }}

            <ModalHost/>
            <ToastLine/>
        </div>
    }
}

#[component]
fn ModalHost() -> impl IntoView {
    let state = expect_context::<AppState>();
    move || {
        state.modal.get().map(|modal| match modal {
            Modal::AddTag => view! { <TagDialog editing=None/> }.into_any(),
            Modal::EditTag(tag) => view! { <TagDialog editing=Some(tag)/> }.into_any(),
            Modal::AddCategory => view! { <CategoryDialog editing=None/> }.into_any(),
            Modal::EditCategory(category) => {
                view! { <CategoryDialog editing=Some(category)/> }.into_any()
            }
            Modal::Import => view! { <ImportDialog/> }.into_any(),
            Modal::Editor => view! { <EditorDialog/> }.into_any(),
            Modal::Settings => view! { <SettingsDialog/> }.into_any(),
            Modal::GalleryUpload => view! { <GalleryUploadDialog/> }.into_any(),
            Modal::GalleryEdit(item) => view! { <GalleryEditDialog item=item/> }.into_any(),
            Modal::GalleryView(item) => view! { <GalleryViewDialog item=item/> }.into_any(),
        })
    }
}

#[component]
fn ToastLine() -> impl IntoView {
    let state = expect_context::<AppState>();
    move || {
        state.toast.get().map(|toast| {
            view! { <div class=toast.kind.class()>{toast.message}</div> }
        })
    }
}
