use leptos::prelude::*;
use prompt_flow::{Control, FlowError, ImportDraft};

use crate::app::state::AppState;

pub fn parse(
    state: AppState,
    text: String,
    default_category: String,
    draft: RwSignal<Option<ImportDraft>>,
) {
    if text.trim().is_empty() {
        state.flow_error(&FlowError::EmptyInput);
        return;
    }
    state.spawn_guarded(Control::ParseImport, "解析请求失败", async move {
        let response = state.api().parse_tags(&text).await?;
        let parsed = state.board.with_untracked(|b| {
            let category = b.library.category(&default_category);
            ImportDraft::from_response(response, category)
        });
        log::info!("import parse: {}", parsed.summary());
        draft.set(Some(parsed));
        Ok(())
    });
}

pub fn confirm(state: AppState, draft: RwSignal<Option<ImportDraft>>) {
    let candidates = draft.with_untracked(|d| match d {
        Some(d) => d.candidates(),
        None => Err(FlowError::NothingToImport),
    });
    let candidates = match candidates {
        Ok(candidates) => candidates,
        Err(err) => return state.flow_error(&err),
    };
    state.spawn_guarded(Control::ConfirmImport, "导入请求失败", async move {
        let response = state.api().import_tags(candidates).await?;
        let imported = response.imported;
        state.board.update(|b| {
            b.library.extend_tags(response.tags);
        });
        draft.set(None);
        state.close_modal();
        state.success(format!("成功导入 {imported} 个标签!"));
        Ok(())
    });
}
