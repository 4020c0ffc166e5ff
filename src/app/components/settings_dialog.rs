use leptos::prelude::*;
use prompt_flow::settings::{LlmConfig, LlmForm, PROVIDERS};
use prompt_flow::Control;

use crate::app::components::dialog::Dialog;
use crate::app::settings::{self, TestResult};
use crate::app::state::AppState;

#[component]
pub fn SettingsDialog() -> impl IntoView {
    let state = expect_context::<AppState>();
    let config = RwSignal::new(LlmConfig::default());
    let form = RwSignal::new(LlmForm::default());
    let result = RwSignal::<TestResult>::new(None);
    let show_key = RwSignal::new(false);

    settings::load(state, config, form);

    let provider = move || form.with(|f| f.provider.clone());
    let testing = move || state.busy(Control::TestLlm);
    let saving = move || state.busy(Control::SaveSettings);

    view! {
        <Dialog title="LLM 设置">
            <div class="form">
                <label class="checkbox-label">
                    <input
                        type="checkbox"
                        prop:checked=move || form.with(|f| f.enabled)
                        on:change=move |ev| {
                            let on = event_target_checked(&ev);
                            form.update(|f| f.enabled = on);
                        }
                    />
                    "启用 AI 解析"
                </label>

                <label>"服务商"</label>
                <select on:change=move |ev| {
                    let id = event_target_value(&ev);
                    form.update(|f| f.choose_provider(&id));
                }>
                    {PROVIDERS
                        .iter()
                        .map(|p| {
                            view! {
                                <option value=p.id selected=move || provider() == p.id>
                                    {p.label}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>

                <label>"API 地址"</label>
                <input
                    type="text"
                    placeholder="https://api.openai.com/v1"
                    prop:value=move || form.with(|f| f.base_url.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        form.update(|f| f.base_url = value);
                    }
                />

                <label>"模型"</label>
                <input
                    type="text"
                    placeholder="gpt-3.5-turbo"
                    prop:value=move || form.with(|f| f.model.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        form.update(|f| f.model = value);
                    }
                />

                <label>"API 密钥"</label>
                <div class="key-row">
                    <input
                        type=move || if show_key.get() { "text" } else { "password" }
                        placeholder=move || config.with(|c| c.key_placeholder())
                        prop:value=move || form.with(|f| f.api_key.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            form.update(|f| f.api_key = value);
                        }
                    />
                    <button class="icon-btn" on:click=move |_| show_key.update(|s| *s = !*s)>
                        {move || if show_key.get() { "隐藏" } else { "显示" }}
                    </button>
                </div>
                <p class="hint">{move || config.with(|c| c.key_status())}</p>

                <div class="toolbar">
                    <button disabled=testing on:click=move |_| settings::test_connection(state, form, result)>
                        {move || if testing() { "测试中..." } else { "测试连接" }}
                    </button>
                    {move || {
                        result
                            .get()
                            .map(|(ok, message)| {
                                view! {
                                    <span class="test-result" class:ok=ok class:failed=!ok>
                                        {message}
                                    </span>
                                }
                            })
                    }}
                </div>

                <div class="form-actions">
                    <button class="primary" disabled=saving on:click=move |_| settings::save(state, form)>
                        {move || if saving() { "保存中..." } else { "保存" }}
                    </button>
                </div>
            </div>
        </Dialog>
    }
}
