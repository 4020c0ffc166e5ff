//! Loaders and save/delete handlers for tags and categories.

use prompt_flow::{CategoryDraft, Control, TagDraft};

use crate::app::api::ApiResult;
use leptos::prelude::*;

use crate::app::state::AppState;
use crate::app::types::Modal;
use crate::app::utils::confirm;

pub async fn load_library(state: AppState) -> ApiResult<()> {
    let snapshot = state.api().library().await?;
    state.board.update(|b| b.library.replace_all(snapshot));
    Ok(())
}

pub fn reload_library(state: AppState) {
    state.spawn_guarded(Control::LoadLibrary, "加载标签失败", load_library(state));
}

/// New tags go into the filtered category, so one has to be picked first.
pub fn open_add_tag(state: AppState) {
    match state.board.with_untracked(|b| b.library.active_category().map(|_| ())) {
        Ok(()) => state.open(Modal::AddTag),
        Err(err) => state.flow_error(&err),
    }
}

pub fn save_tag(state: AppState, editing: Option<String>, draft: TagDraft) {
    state.spawn_guarded(Control::SaveTag, "保存标签失败", async move {
        let api = state.api();
        let tag = match &editing {
            Some(id) => api.update_tag(id, &draft).await?,
            None => api.create_tag(&draft).await?,
        };
        log::info!("saved tag {} ({})", tag.id, tag.name_en);
        state.board.update(|b| b.apply_saved_tag(tag));
        state.close_modal();
        state.success(if editing.is_some() { "标签已更新" } else { "标签已添加" });
        Ok(())
    });
}

pub fn delete_tag(state: AppState, id: String, name: String) {
    if !confirm(&format!("确定要删除标签 \"{name}\" 吗?")) {
        return;
    }
    state.spawn_guarded(Control::DeleteTag, "删除标签失败", async move {
        state.api().delete_tag(&id).await?;
        state.board.update(|b| b.forget_tag(&id));
        state.success("标签已删除");
        Ok(())
    });
}

pub fn save_category(state: AppState, editing: Option<String>, draft: CategoryDraft) {
    state.spawn_guarded(Control::SaveCategory, "保存分类失败", async move {
        let api = state.api();
        let category = match &editing {
            Some(id) => api.update_category(id, &draft).await?,
            None => api.create_category(&draft).await?,
        };
        state.board.update(|b| b.library.upsert_category(category));
        state.close_modal();
        state.success(if editing.is_some() { "分类已更新" } else { "分类已添加" });
        Ok(())
    });
}

pub fn delete_category(state: AppState, id: String, label: String) {
    if !confirm(&format!("确定要删除分类 \"{label}\" 吗? 该分类下的标签不会被删除。")) {
        return;
    }
    state.spawn_guarded(Control::DeleteCategory, "删除分类失败", async move {
        state.api().delete_category(&id).await?;
        state.board.update(|b| b.forget_category(&id));
        state.success("分类已删除");
        Ok(())
    });
}

pub fn copy_prompt(state: AppState) {
    let prompt = state.board.with_untracked(|b| b.prompt());
    state.copy(prompt);
}
