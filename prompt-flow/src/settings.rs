//! LLM provider settings: the read view, the write payload and the preset
//! table the settings panel fills defaults from.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProviderPreset {
    pub id: &'static str,
    pub label: &'static str,
    pub base_url: &'static str,
    pub model: &'static str,
}

pub const PROVIDERS: &[ProviderPreset] = &[
    ProviderPreset {
        id: "openai",
        label: "OpenAI",
        base_url: "https://api.openai.com/v1",
        model: "gpt-3.5-turbo",
    },
    ProviderPreset {
        id: "claude",
        label: "Claude",
        base_url: "https://api.anthropic.com/v1",
        model: "claude-3-haiku-20240307",
    },
    ProviderPreset {
        id: "deepseek",
        label: "DeepSeek",
        base_url: "https://api.deepseek.com/v1",
        model: "deepseek-chat",
    },
    ProviderPreset {
        id: "custom",
        label: "自定义",
        base_url: "",
        model: "",
    },
];

pub const DEFAULT_PROVIDER: &str = "openai";

pub fn preset(provider: &str) -> Option<&'static ProviderPreset> {
    PROVIDERS.iter().find(|p| p.id == provider)
}

fn default_provider() -> String {
    DEFAULT_PROVIDER.to_string()
}

/// `llm` section of the config read endpoint. The key itself never comes back.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default)]
    pub base_url: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub has_api_key: bool,
    #[serde(default)]
    pub api_key_masked: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            provider: default_provider(),
            base_url: String::new(),
            model: String::new(),
            has_api_key: false,
            api_key_masked: String::new(),
        }
    }
}

impl LlmConfig {
    pub fn key_status(&self) -> String {
        if self.has_api_key {
            format!("当前密钥: {}", self.api_key_masked)
        } else {
            "未配置 API 密钥".to_string()
        }
    }

    pub fn key_placeholder(&self) -> &'static str {
        if self.has_api_key {
            "已配置 (留空保持不变)"
        } else {
            "sk-..."
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ConfigResponse {
    #[serde(default)]
    pub llm: LlmConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LlmConfigUpdate {
    pub enabled: bool,
    pub provider: String,
    pub base_url: String,
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ConfigUpdate {
    pub llm: LlmConfigUpdate,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LlmTestRequest {
    pub provider: String,
    pub api_key: String,
    pub base_url: String,
    pub model: String,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct LlmTestResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub response: Option<String>,
}

/// Editable state of the settings panel.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LlmForm {
    pub enabled: bool,
    pub provider: String,
    pub base_url: String,
    pub model: String,
    /// Blank means "keep the stored key".
    pub api_key: String,
}

impl LlmForm {
    /// Blank fields in the stored config are filled from the provider preset.
    pub fn from_config(config: &LlmConfig) -> Self {
        let defaults = preset(&config.provider).or_else(|| preset(DEFAULT_PROVIDER));
        let or_default = |value: &str, fallback: Option<&'static str>| {
            if value.is_empty() {
                fallback.unwrap_or_default().to_string()
            } else {
                value.to_string()
            }
        };
        Self {
            enabled: config.enabled,
            provider: config.provider.clone(),
            base_url: or_default(&config.base_url, defaults.map(|p| p.base_url)),
            model: or_default(&config.model, defaults.map(|p| p.model)),
            api_key: String::new(),
        }
    }

    /// Switching provider fills base URL and model from the table. The custom
    /// entry leaves whatever the user typed.
    pub fn choose_provider(&mut self, provider: &str) {
        self.provider = provider.to_string();
        if let Some(preset) = preset(provider) {
            if !preset.base_url.is_empty() {
                self.base_url = preset.base_url.to_string();
            }
            if !preset.model.is_empty() {
                self.model = preset.model.to_string();
            }
        }
    }

    fn trimmed_key(&self) -> Option<String> {
        let key = self.api_key.trim();
        (!key.is_empty()).then(|| key.to_string())
    }

    pub fn update(&self) -> ConfigUpdate {
        ConfigUpdate {
            llm: LlmConfigUpdate {
                enabled: self.enabled,
                provider: self.provider.clone(),
                base_url: self.base_url.trim().trim_end_matches('/').to_string(),
                model: self.model.trim().to_string(),
                api_key: self.trimmed_key(),
            },
        }
    }

    /// A blank key asks the collaborator to test with the stored one.
    pub fn test_request(&self) -> LlmTestRequest {
        LlmTestRequest {
            provider: self.provider.clone(),
            api_key: self.trimmed_key().unwrap_or_default(),
            base_url: self.base_url.trim().to_string(),
            model: self.model.trim().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case("openai", "https://api.openai.com/v1")]
    #[case("deepseek", "https://api.deepseek.com/v1")]
    #[case("custom", "")]
    fn preset_lookup(#[case] provider: &str, #[case] base_url: &str) {
        assert_eq!(preset(provider).map(|p| p.base_url), Some(base_url));
    }

    #[test]
    fn unknown_provider_has_no_preset() {
        assert!(preset("bard").is_none());
    }

    #[test]
    fn config_read_fills_defaults() {
        let config: ConfigResponse = serde_json::from_value(json!({
            "llm": {"enabled": true, "has_api_key": true, "api_key_masked": "sk-1****abcd"}
        }))
        .unwrap();
        assert_eq!(config.llm.provider, "openai");
        assert_eq!(config.llm.key_status(), "当前密钥: sk-1****abcd");

        let form = LlmForm::from_config(&config.llm);
        assert_eq!(form.base_url, "https://api.openai.com/v1");
        assert_eq!(form.model, "gpt-3.5-turbo");
        assert!(form.api_key.is_empty());
    }

    #[test]
    fn blank_key_is_omitted_from_update() {
        let mut form = LlmForm::from_config(&LlmConfig::default());
        form.api_key = "   ".into();
        let body = serde_json::to_value(form.update()).unwrap();
        assert!(body["llm"].get("api_key").is_none());

        form.api_key = "sk-new".into();
        let body = serde_json::to_value(form.update()).unwrap();
        assert_eq!(body["llm"]["api_key"], "sk-new");
    }

    #[test]
    fn update_trims_trailing_slash() {
        let mut form = LlmForm::from_config(&LlmConfig::default());
        form.base_url = "https://example.com/v1/ ".into();
        assert_eq!(form.update().llm.base_url, "https://example.com/v1");
    }

    #[test]
    fn choosing_provider_fills_defaults_except_custom() {
        let mut form = LlmForm::from_config(&LlmConfig::default());
        form.choose_provider("deepseek");
        assert_eq!(form.model, "deepseek-chat");
        form.choose_provider("custom");
        assert_eq!(form.provider, "custom");
        assert_eq!(form.base_url, "https://api.deepseek.com/v1");
    }

    #[test]
    fn test_request_sends_empty_key_when_blank() {
        let form = LlmForm::from_config(&LlmConfig::default());
        let request = form.test_request();
        assert_eq!(request.api_key, "");
        assert_eq!(request.provider, "openai");
    }
}
