use leptos::prelude::*;
use prompt_flow::settings::{LlmConfig, LlmForm};
use prompt_flow::Control;

use crate::app::state::AppState;

/// Outcome line under the test button: (ok, message).
pub type TestResult = Option<(bool, String)>;

pub fn load(state: AppState, config: RwSignal<LlmConfig>, form: RwSignal<LlmForm>) {
    state.spawn_guarded(Control::LoadSettings, "加载配置失败", async move {
        let response = state.api().config().await?;
        form.set(LlmForm::from_config(&response.llm));
        config.set(response.llm);
        Ok(())
    });
}

/// Failures land in the result line instead of a toast.
pub fn test_connection(state: AppState, form: RwSignal<LlmForm>, result: RwSignal<TestResult>) {
    let request = form.with_untracked(|f| f.test_request());
    result.set(None);
    state.spawn_guarded(Control::TestLlm, "测试请求失败", async move {
        match state.api().test_llm(&request).await {
            Ok(_) => result.set(Some((true, "连接成功!".to_string()))),
            Err(err) => {
                log::warn!("LLM test failed: {err}");
                result.set(Some((false, err.notice("连接失败"))));
            }
        }
        Ok(())
    });
}

pub fn save(state: AppState, form: RwSignal<LlmForm>) {
    let update = form.with_untracked(|f| f.update());
    state.spawn_guarded(Control::SaveSettings, "保存请求失败", async move {
        state.api().save_config(&update).await?;
        state.close_modal();
        state.success("设置已保存!");
        Ok(())
    });
}
