//! Batch import: the remote parse result, the editable draft built from it
//! and the payload sent back to the library.

use serde::{Deserialize, Serialize};

use crate::error::{FlowError, FlowResult};
use crate::types::{normalize_weight, Category, Tag};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseMethod {
    Llm,
    #[default]
    Traditional,
    #[serde(other)]
    Other,
}

impl ParseMethod {
    pub fn label(self) -> &'static str {
        match self {
            ParseMethod::Llm => "AI",
            ParseMethod::Traditional => "词典",
            ParseMethod::Other => "-",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParsedTag {
    #[serde(default)]
    pub original: String,
    pub name_en: String,
    #[serde(default)]
    pub name_zh: String,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub category_color: Option<String>,
    #[serde(default)]
    pub exists: bool,
    #[serde(default)]
    pub existing_id: Option<String>,
    #[serde(default)]
    pub weight: Option<f64>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ParseResponse {
    #[serde(default)]
    pub tags: Vec<ParsedTag>,
    #[serde(default)]
    pub total: usize,
    #[serde(default)]
    pub new_count: usize,
    #[serde(default)]
    pub method: ParseMethod,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ParseRequest {
    pub text: String,
}

/// One tag handed to the batch import endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ImportCandidate {
    pub name_en: String,
    pub name_zh: String,
    pub category_id: Option<String>,
    pub weight: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BatchImportRequest {
    pub tags: Vec<ImportCandidate>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct BatchImportResponse {
    #[serde(default)]
    pub imported: usize,
    #[serde(default)]
    pub skipped: usize,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ImportRow {
    pub tag: ParsedTag,
    pub excluded: bool,
}

impl ImportRow {
    pub fn is_importable(&self) -> bool {
        !self.excluded && !self.tag.exists
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ImportDraft {
    rows: Vec<ImportRow>,
    pub total: usize,
    pub new_count: usize,
    pub method: ParseMethod,
}

fn assign_category(tag: &mut ParsedTag, category: &Category) {
    tag.category_id = Some(category.id.clone());
    tag.category_name = Some(category.label());
    tag.category_color = Some(category.color.clone());
}

impl ImportDraft {
    /// Rows the parser could not place get `default_category`.
    pub fn from_response(response: ParseResponse, default_category: Option<&Category>) -> Self {
        let rows = response
            .tags
            .into_iter()
            .map(|mut tag| {
                if tag.category_id.as_deref().map_or(true, str::is_empty) {
                    if let Some(category) = default_category {
                        assign_category(&mut tag, category);
                    }
                }
                ImportRow { tag, excluded: false }
            })
            .collect();
        Self {
            rows,
            total: response.total,
            new_count: response.new_count,
            method: response.method,
        }
    }

    pub fn rows(&self) -> &[ImportRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn summary(&self) -> String {
        format!("共解析 {} 个标签，其中 {} 个为新标签", self.total, self.new_count)
    }

    fn row_mut(&mut self, index: usize) -> FlowResult<&mut ImportRow> {
        let len = self.rows.len();
        self.rows.get_mut(index).ok_or(FlowError::RowOutOfRange { index, len })
    }

    pub fn set_name_zh(&mut self, index: usize, name_zh: &str) -> FlowResult<()> {
        self.row_mut(index)?.tag.name_zh = name_zh.to_string();
        Ok(())
    }

    pub fn set_category(&mut self, index: usize, category: &Category) -> FlowResult<()> {
        assign_category(&mut self.row_mut(index)?.tag, category);
        Ok(())
    }

    pub fn toggle_excluded(&mut self, index: usize) -> FlowResult<bool> {
        let row = self.row_mut(index)?;
        row.excluded = !row.excluded;
        Ok(row.excluded)
    }

    /// What confirming would send: rows neither excluded nor already in the
    /// library.
    pub fn candidates(&self) -> FlowResult<Vec<ImportCandidate>> {
        let candidates: Vec<ImportCandidate> = self
            .rows
            .iter()
            .filter(|row| row.is_importable())
            .map(|row| ImportCandidate {
                name_en: row.tag.name_en.clone(),
                name_zh: row.tag.name_zh.clone(),
                category_id: row.tag.category_id.clone(),
                weight: normalize_weight(row.tag.weight),
            })
            .collect();
        if candidates.is_empty() {
            return Err(FlowError::NothingToImport);
        }
        Ok(candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(id: &str) -> Category {
        Category {
            id: id.to_string(),
            name_en: "Hair".to_string(),
            name_zh: "头发".to_string(),
            color: "#ff0000".to_string(),
        }
    }

    fn response() -> ParseResponse {
        serde_json::from_str(
            r#"{
                "success": true,
                "tags": [
                    {"original": "long hair", "name_en": "long hair", "name_zh": "长发", "category_id": "hair", "exists": false},
                    {"original": "smile", "name_en": "smile", "name_zh": "微笑", "category_id": null, "exists": false},
                    {"original": "1girl", "name_en": "1girl", "name_zh": "一个女孩", "category_id": "char", "exists": true, "existing_id": "42"}
                ],
                "total": 3,
                "new_count": 2,
                "method": "traditional"
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn unknown_method_deserializes_as_other() {
        let parsed: ParseResponse = serde_json::from_str(r#"{"tags": [], "method": "magic"}"#).unwrap();
        assert_eq!(parsed.method, ParseMethod::Other);
    }

    #[test]
    fn default_category_fills_only_missing_rows() {
        let draft = ImportDraft::from_response(response(), Some(&category("default")));
        let ids: Vec<_> = draft.rows().iter().map(|r| r.tag.category_id.as_deref()).collect();
        assert_eq!(ids, [Some("hair"), Some("default"), Some("char")]);
        assert_eq!(draft.rows()[1].tag.category_name.as_deref(), Some("头发 / Hair"));
        assert_eq!(draft.summary(), "共解析 3 个标签，其中 2 个为新标签");
    }

    #[test]
    fn candidates_skip_existing_and_excluded_rows() {
        let mut draft = ImportDraft::from_response(response(), None);
        draft.set_name_zh(1, "笑容").unwrap();
        let names: Vec<_> = draft.candidates().unwrap().into_iter().map(|c| c.name_zh).collect();
        assert_eq!(names, ["长发", "笑容"]);

        assert!(draft.toggle_excluded(0).unwrap());
        draft.toggle_excluded(1).unwrap();
        assert_eq!(draft.candidates(), Err(FlowError::NothingToImport));
        assert!(!draft.toggle_excluded(1).unwrap());
        assert_eq!(draft.candidates().unwrap().len(), 1);
    }

    #[test]
    fn row_edits_reject_bad_index() {
        let mut draft = ImportDraft::from_response(response(), None);
        assert_eq!(draft.set_category(7, &category("x")), Err(FlowError::RowOutOfRange { index: 7, len: 3 }));
        draft.set_category(2, &category("x")).unwrap();
        assert_eq!(draft.rows()[2].tag.category_color.as_deref(), Some("#ff0000"));
    }

    #[test]
    fn candidate_weight_defaults_to_one() {
        let draft = ImportDraft::from_response(response(), None);
        assert!(draft.candidates().unwrap().iter().all(|c| c.weight == 1.0));
    }
}
