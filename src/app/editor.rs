//! Remote halves of the prompt editor: AI parse, relevance and save-new.

use prompt_flow::{Control, FlowError};

use leptos::prelude::*;

use crate::app::state::AppState;

pub fn parse_local(state: AppState, text: &str) {
    let parsed = state
        .board
        .try_update(|b| b.editor.load_text(text, b.library.tags()));
    match parsed {
        Some(Ok(count)) => state.info(format!("解析出 {count} 个标签")),
        Some(Err(err)) => state.flow_error(&err),
        None => {}
    }
}

pub fn parse_remote(state: AppState, text: String) {
    if text.trim().is_empty() {
        state.flow_error(&FlowError::EmptyInput);
        return;
    }
    state.spawn_guarded(Control::EditorParse, "AI 解析失败", async move {
        let response = state.api().parse_tags(&text).await?;
        let count = state
            .board
            .try_update(|b| b.editor.load_parsed(&response.tags, b.library.tags()))
            .unwrap_or_default();
        state.info(format!("{} 解析出 {count} 个标签", response.method.label()));
        Ok(())
    });
}

/// Asks the collaborator which editor tags belong to `category_id`; its
/// answer replaces the checked state.
pub fn select_relevant(state: AppState, category_id: String) {
    let prepared = state.board.with_untracked(|b| {
        if category_id.is_empty() {
            return Err(FlowError::NoCategorySelected);
        }
        let category = b
            .library
            .category(&category_id)
            .ok_or_else(|| FlowError::UnknownCategory(category_id.clone()))?;
        if b.editor.is_empty() {
            return Err(FlowError::EmptyInput);
        }
        Ok(b.editor.relevance_request(category))
    });
    let request = match prepared {
        Ok(request) => request,
        Err(err) => return state.flow_error(&err),
    };
    state.spawn_guarded(Control::EditorRelevance, "AI 分析失败", async move {
        let response = state.api().analyze_relevance(&request).await?;
        let checked = state
            .board
            .try_update(|b| b.editor.apply_relevance(&response.relevant_tags))
            .unwrap_or_default();
        state.info(format!("AI 选中了 {checked} 个相关标签"));
        Ok(())
    });
}

/// Saves checked new tags to the library and swaps in their real ids.
pub fn save_new_tags(state: AppState, fallback_category: String) {
    let fallback = (!fallback_category.is_empty()).then_some(fallback_category);
    let candidates = match state
        .board
        .with_untracked(|b| b.editor.new_candidates(fallback.as_deref()))
    {
        Ok(candidates) => candidates,
        Err(err) => return state.flow_error(&err),
    };
    state.spawn_guarded(Control::EditorSaveNew, "保存新标签失败", async move {
        let response = state.api().import_tags(candidates).await?;
        let imported = response.imported;
        state.board.update(|b| {
            b.adopt_imported(response.tags);
        });
        state.success(format!("成功保存 {imported} 个新标签"));
        Ok(())
    });
}

pub fn commit(state: AppState) {
    if state.dispatch("editor-commit", None) {
        state.close_modal();
    }
}

pub fn close(state: AppState) {
    state.dispatch("editor-close", None);
}
