use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::FlowError;

pub const DEFAULT_WEIGHT: f64 = 1.0;
pub const FALLBACK_COLOR: &str = "#6366f1";

fn default_weight() -> f64 {
    DEFAULT_WEIGHT
}

fn default_color() -> String {
    FALLBACK_COLOR.to_string()
}

// Missing, null and zero weights all render as 1.
fn weight_or_default<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let weight = Option::<f64>::deserialize(deserializer)?;
    Ok(normalize_weight(weight))
}

pub fn normalize_weight(weight: Option<f64>) -> f64 {
    weight
        .filter(|w| w.is_finite() && *w != 0.0)
        .unwrap_or(DEFAULT_WEIGHT)
}

/// Parses a weight typed into a form field; anything unparsable falls back to 1.
pub fn parse_weight(input: &str) -> f64 {
    normalize_weight(input.trim().parse::<f64>().ok())
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub id: String,
    pub name_en: String,
    #[serde(default)]
    pub name_zh: String,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default = "default_weight", deserialize_with = "weight_or_default")]
    pub weight: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name_en: String,
    #[serde(default)]
    pub name_zh: String,
    #[serde(default = "default_color")]
    pub color: String,
}

impl Category {
    /// "中文 / English", the label used in selects and badges.
    pub fn label(&self) -> String {
        format!("{} / {}", self.name_zh, self.name_en)
    }
}

/// Payload for tag create/update.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TagDraft {
    pub name_en: String,
    pub name_zh: String,
    pub category_id: Option<String>,
    pub weight: f64,
}

impl TagDraft {
    pub fn from_tag(tag: &Tag) -> Self {
        Self {
            name_en: tag.name_en.clone(),
            name_zh: tag.name_zh.clone(),
            category_id: tag.category_id.clone(),
            weight: tag.weight,
        }
    }
}

/// Payload for category create/update.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CategoryDraft {
    pub name_en: String,
    pub name_zh: String,
    pub color: String,
}

/// A parsed candidate living in the prompt editor until it is committed
/// or the editor is closed.
#[derive(Clone, Debug, PartialEq)]
pub struct EditorTag {
    pub id: String,
    pub name_en: String,
    pub name_zh: String,
    pub category_id: Option<String>,
    pub weight: f64,
    pub checked: bool,
    pub from_library: bool,
    pub is_new: bool,
}

impl EditorTag {
    pub fn from_library(tag: &Tag) -> Self {
        Self {
            id: tag.id.clone(),
            name_en: tag.name_en.clone(),
            name_zh: tag.name_zh.clone(),
            category_id: tag.category_id.clone(),
            weight: tag.weight,
            checked: false,
            from_library: true,
            is_new: false,
        }
    }

    pub fn unmatched(id: String, name_en: &str, name_zh: &str, category_id: Option<String>) -> Self {
        Self {
            id,
            name_en: name_en.to_string(),
            name_zh: name_zh.to_string(),
            category_id,
            weight: DEFAULT_WEIGHT,
            checked: false,
            from_library: false,
            is_new: true,
        }
    }

    pub fn to_tag(&self) -> Tag {
        Tag {
            id: self.id.clone(),
            name_en: self.name_en.clone(),
            name_zh: self.name_zh.clone(),
            category_id: self.category_id.clone(),
            weight: self.weight,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptFormat {
    #[default]
    Plain,
    Sd,
    Nai,
}

impl PromptFormat {
    pub const ALL: [PromptFormat; 3] = [PromptFormat::Plain, PromptFormat::Sd, PromptFormat::Nai];

    pub fn as_str(self) -> &'static str {
        match self {
            PromptFormat::Plain => "plain",
            PromptFormat::Sd => "sd",
            PromptFormat::Nai => "nai",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PromptFormat::Plain => "纯文本 Plain",
            PromptFormat::Sd => "SD (tag:1.2)",
            PromptFormat::Nai => "NAI {tag}",
        }
    }
}

impl fmt::Display for PromptFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PromptFormat {
    type Err = FlowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "plain" => Ok(PromptFormat::Plain),
            "sd" => Ok(PromptFormat::Sd),
            "nai" => Ok(PromptFormat::Nai),
            other => Err(FlowError::InvalidArgument(format!("unknown prompt format `{other}`"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_weight_defaults_when_missing_null_or_zero() {
        let missing: Tag = serde_json::from_str(r#"{"id":"1","name_en":"cat"}"#).unwrap();
        let null: Tag = serde_json::from_str(r#"{"id":"1","name_en":"cat","weight":null}"#).unwrap();
        let zero: Tag = serde_json::from_str(r#"{"id":"1","name_en":"cat","weight":0}"#).unwrap();
        let set: Tag = serde_json::from_str(r#"{"id":"1","name_en":"cat","weight":1.2}"#).unwrap();
        assert_eq!(missing.weight, 1.0);
        assert_eq!(null.weight, 1.0);
        assert_eq!(zero.weight, 1.0);
        assert_eq!(set.weight, 1.2);
        assert_eq!(missing.category_id, None);
    }

    #[test]
    fn category_color_falls_back() {
        let cat: Category = serde_json::from_str(r#"{"id":"c","name_en":"Hair","name_zh":"头发"}"#).unwrap();
        assert_eq!(cat.color, FALLBACK_COLOR);
        assert_eq!(cat.label(), "头发 / Hair");
    }

    #[test]
    fn parse_weight_from_form_input() {
        assert_eq!(parse_weight("1.3"), 1.3);
        assert_eq!(parse_weight(" 0.8 "), 0.8);
        assert_eq!(parse_weight(""), 1.0);
        assert_eq!(parse_weight("heavy"), 1.0);
    }

    #[test]
    fn prompt_format_names_round_trip() {
        for format in PromptFormat::ALL {
            assert_eq!(format.as_str().parse::<PromptFormat>().unwrap(), format);
        }
        assert!("markdown".parse::<PromptFormat>().is_err());
    }
}
