//! The prompt editor: free text in, a checkable list of tag candidates out.

use serde::{Deserialize, Serialize};

use crate::error::{FlowError, FlowResult};
use crate::import::{ImportCandidate, ParsedTag};
use crate::matcher::match_token;
use crate::selection::Selection;
use crate::tokenize::tokenize;
use crate::types::{Category, EditorTag, Tag};

pub const TEMP_ID_PREFIX: &str = "new-";

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RelevanceTag {
    pub name_en: String,
    pub name_zh: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RelevanceCategory {
    pub id: String,
    pub name_en: String,
    pub name_zh: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RelevanceRequest {
    pub tags: Vec<RelevanceTag>,
    pub category: RelevanceCategory,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct RelevanceResponse {
    #[serde(default)]
    pub relevant_tags: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Editor {
    items: Vec<EditorTag>,
    next_temp: u64,
}

impl Editor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[EditorTag] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn checked_count(&self) -> usize {
        self.items.iter().filter(|t| t.checked).count()
    }

    /// Drops every candidate; called when the editor closes.
    pub fn close(&mut self) {
        self.items.clear();
    }

    fn temp_id(&mut self) -> String {
        self.next_temp += 1;
        format!("{TEMP_ID_PREFIX}{}", self.next_temp)
    }

    fn push_unique(&mut self, item: EditorTag) -> bool {
        let name = item.name_en.to_lowercase();
        let duplicate = self.items.iter().any(|existing| {
            (item.from_library && existing.id == item.id)
                || existing.name_en.to_lowercase() == name
        });
        if !duplicate {
            self.items.push(item);
        }
        !duplicate
    }

    /// Local parse: tokenizer plus library matching. Replaces the current list.
    pub fn load_text(&mut self, text: &str, library: &[Tag]) -> FlowResult<usize> {
        if text.trim().is_empty() {
            return Err(FlowError::EmptyInput);
        }
        self.items.clear();
        for token in tokenize(text) {
            let item = match match_token(&token, library) {
                Some(found) => EditorTag::from_library(found.tag),
                None => {
                    let id = self.temp_id();
                    EditorTag::unmatched(id, &token, "", None)
                }
            };
            self.push_unique(item);
        }
        log::debug!("editor parsed {} candidates locally", self.items.len());
        Ok(self.items.len())
    }

    /// Remote parse: reconciles the collaborator's tags against the library,
    /// by English name first and Chinese name second.
    pub fn load_parsed(&mut self, parsed: &[ParsedTag], library: &[Tag]) -> usize {
        self.items.clear();
        for candidate in parsed {
            let found = match_token(&candidate.name_en, library).or_else(|| {
                (!candidate.name_zh.is_empty())
                    .then(|| match_token(&candidate.name_zh, library))
                    .flatten()
            });
            let item = match found {
                Some(found) => EditorTag::from_library(found.tag),
                None => {
                    let id = self.temp_id();
                    EditorTag::unmatched(
                        id,
                        &candidate.name_en,
                        &candidate.name_zh,
                        candidate.category_id.clone().filter(|c| !c.is_empty()),
                    )
                }
            };
            self.push_unique(item);
        }
        log::debug!("editor reconciled {} remote candidates", self.items.len());
        self.items.len()
    }

    pub fn toggle(&mut self, index: usize) -> FlowResult<bool> {
        let len = self.items.len();
        let item = self.items.get_mut(index).ok_or(FlowError::RowOutOfRange { index, len })?;
        item.checked = !item.checked;
        Ok(item.checked)
    }

    pub fn set_all(&mut self, checked: bool) {
        for item in &mut self.items {
            item.checked = checked;
        }
    }

    /// Checks every candidate in `category_id`, leaving the others alone.
    pub fn select_category(&mut self, category_id: &str) -> FlowResult<usize> {
        let mut affected = 0;
        for item in &mut self.items {
            if item.category_id.as_deref() == Some(category_id) {
                item.checked = true;
                affected += 1;
            }
        }
        if affected == 0 {
            return Err(FlowError::NoCategoryMatches(category_id.to_string()));
        }
        Ok(affected)
    }

    pub fn relevance_request(&self, category: &Category) -> RelevanceRequest {
        RelevanceRequest {
            tags: self
                .items
                .iter()
                .map(|t| RelevanceTag { name_en: t.name_en.clone(), name_zh: t.name_zh.clone() })
                .collect(),
            category: RelevanceCategory {
                id: category.id.clone(),
                name_en: category.name_en.clone(),
                name_zh: category.name_zh.clone(),
            },
        }
    }

    /// The relevance answer replaces the checked state wholesale.
    pub fn apply_relevance(&mut self, relevant: &[String]) -> usize {
        let relevant: Vec<String> = relevant.iter().map(|n| n.trim().to_lowercase()).collect();
        let mut checked = 0;
        for item in &mut self.items {
            item.checked = relevant.contains(&item.name_en.to_lowercase());
            checked += usize::from(item.checked);
        }
        checked
    }

    pub fn checked(&self) -> impl Iterator<Item = &EditorTag> {
        self.items.iter().filter(|t| t.checked)
    }

    /// Adds the checked candidates to `selection` at its cursor, in editor
    /// order. Already selected ids are skipped.
    pub fn commit(&self, selection: &mut Selection) -> FlowResult<usize> {
        if self.checked_count() == 0 {
            return Err(FlowError::NothingChecked);
        }
        let added = self
            .checked()
            .filter_map(|item| selection.add(&item.to_tag()))
            .count();
        log::info!("committed {added} editor tags to the selection");
        Ok(added)
    }

    /// Checked candidates that are not in the library yet. Those without a
    /// category get `fallback_category`.
    pub fn new_candidates(&self, fallback_category: Option<&str>) -> FlowResult<Vec<ImportCandidate>> {
        let candidates: Vec<ImportCandidate> = self
            .checked()
            .filter(|t| t.is_new)
            .map(|t| ImportCandidate {
                name_en: t.name_en.clone(),
                name_zh: t.name_zh.clone(),
                category_id: t.category_id.clone().or_else(|| fallback_category.map(str::to_string)),
                weight: t.weight,
            })
            .collect();
        if candidates.is_empty() {
            return Err(FlowError::NothingToImport);
        }
        if candidates.iter().any(|c| c.category_id.is_none()) {
            return Err(FlowError::NoCategorySelected);
        }
        Ok(candidates)
    }

    /// Swaps temporary candidates for the tags the library persisted, here and
    /// in `selection`. Returns how many were adopted.
    pub fn adopt_imported(&mut self, imported: &[Tag], selection: &mut Selection) -> usize {
        let mut adopted = 0;
        for tag in imported {
            let Some(item) = self
                .items
                .iter_mut()
                .find(|t| t.is_new && t.name_en.eq_ignore_ascii_case(&tag.name_en))
            else {
                continue;
            };
            selection.replace_id(&item.id, tag);
            let checked = item.checked;
            *item = EditorTag { checked, ..EditorTag::from_library(tag) };
            adopted += 1;
        }
        adopted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(id: &str, en: &str, zh: &str, category: Option<&str>) -> Tag {
        Tag {
            id: id.to_string(),
            name_en: en.to_string(),
            name_zh: zh.to_string(),
            category_id: category.map(str::to_string),
            weight: 1.0,
        }
    }

    fn library() -> Vec<Tag> {
        vec![
            tag("t1", "cat", "猫", Some("animal")),
            tag("t2", "long hair", "长发", Some("hair")),
            tag("t3", "masterpiece", "杰作", Some("quality")),
        ]
    }

    fn names(editor: &Editor) -> Vec<&str> {
        editor.items().iter().map(|t| t.name_en.as_str()).collect()
    }

    #[test]
    fn local_parse_marks_library_and_new_tags() {
        let mut editor = Editor::new();
        let count = editor.load_text("(masterpiece:1.2), cats, sunset", &library()).unwrap();
        assert_eq!(count, 3);
        let items = editor.items();
        assert_eq!(items[0].id, "t3");
        assert!(items[0].from_library && !items[0].is_new);
        assert_eq!(items[1].id, "t1");
        assert!(items[2].is_new && !items[2].from_library);
        assert_eq!(items[2].id, "new-1");
        assert_eq!(items[2].category_id, None);
        assert_eq!(items[2].weight, 1.0);
        assert!(items.iter().all(|t| !t.checked));
    }

    #[test]
    fn empty_text_is_rejected_before_parsing() {
        let mut editor = Editor::new();
        assert_eq!(editor.load_text("  \n", &library()), Err(FlowError::EmptyInput));
    }

    #[test]
    fn duplicates_collapse() {
        let mut editor = Editor::new();
        editor.load_text("cat, cats, Sunset, sunset", &library()).unwrap();
        assert_eq!(names(&editor), ["cat", "Sunset"]);
    }

    #[test]
    fn duplicates_collapse_beyond_ascii_case() {
        let mut editor = Editor::new();
        editor.load_text("Éclair, éclair", &library()).unwrap();
        assert_eq!(names(&editor), ["Éclair"]);
    }

    #[test]
    fn temporary_ids_stay_unique_across_parses() {
        let mut editor = Editor::new();
        editor.load_text("sunset", &library()).unwrap();
        editor.load_text("moonlight", &library()).unwrap();
        assert_eq!(editor.items()[0].id, "new-2");
    }

    #[test]
    fn remote_parse_reconciles_by_english_then_chinese() {
        let parsed: Vec<ParsedTag> = serde_json::from_str(
            r#"[
                {"name_en": "Long Hair", "name_zh": ""},
                {"name_en": "kitty", "name_zh": "猫"},
                {"name_en": "sunset", "name_zh": "日落", "category_id": "scene"}
            ]"#,
        )
        .unwrap();
        let mut editor = Editor::new();
        assert_eq!(editor.load_parsed(&parsed, &library()), 3);
        let items = editor.items();
        assert_eq!(items[0].id, "t2");
        assert_eq!(items[1].id, "t1");
        assert!(items[2].is_new);
        assert_eq!(items[2].category_id.as_deref(), Some("scene"));
        assert_eq!(items[2].name_zh, "日落");
    }

    #[test]
    fn local_category_selection_is_additive() {
        let mut editor = Editor::new();
        editor.load_text("cat, long hair, masterpiece", &library()).unwrap();
        editor.toggle(2).unwrap();
        assert_eq!(editor.select_category("hair"), Ok(1));
        let checked: Vec<_> = editor.checked().map(|t| t.id.as_str()).collect();
        assert_eq!(checked, ["t2", "t3"]);
        assert_eq!(
            editor.select_category("scene"),
            Err(FlowError::NoCategoryMatches("scene".to_string()))
        );
    }

    #[test]
    fn relevance_result_replaces_checked_state() {
        let mut editor = Editor::new();
        editor.load_text("cat, long hair, masterpiece", &library()).unwrap();
        editor.set_all(true);
        let checked = editor.apply_relevance(&["LONG HAIR".to_string(), "unknown".to_string()]);
        assert_eq!(checked, 1);
        let flags: Vec<_> = editor.items().iter().map(|t| t.checked).collect();
        assert_eq!(flags, [false, true, false]);
    }

    #[test]
    fn relevance_request_carries_names_and_category() {
        let mut editor = Editor::new();
        editor.load_text("cat, sunset", &library()).unwrap();
        let category = Category {
            id: "c1".into(),
            name_en: "Scene".into(),
            name_zh: "场景".into(),
            color: "#000".into(),
        };
        let request = editor.relevance_request(&category);
        assert_eq!(request.tags.len(), 2);
        assert_eq!(request.tags[0].name_zh, "猫");
        assert_eq!(request.category.name_en, "Scene");
    }

    #[test]
    fn commit_inserts_checked_at_cursor_and_skips_selected() {
        let lib = library();
        let mut selection = Selection::new();
        selection.toggle(&lib[2]);
        selection.toggle(&lib[1]);
        selection.set_cursor(0).unwrap();

        let mut editor = Editor::new();
        editor.load_text("cat, long hair, sunset", &lib).unwrap();
        assert_eq!(editor.commit(&mut selection), Err(FlowError::NothingChecked));

        editor.set_all(true);
        assert_eq!(editor.commit(&mut selection), Ok(2));
        let ids: Vec<_> = selection.tags().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["t3", "t1", "new-1", "t2"]);
    }

    #[test]
    fn new_candidates_need_a_category() {
        let mut editor = Editor::new();
        editor.load_text("cat, sunset", &library()).unwrap();
        assert_eq!(editor.new_candidates(Some("scene")), Err(FlowError::NothingToImport));
        editor.set_all(true);
        assert_eq!(editor.new_candidates(None), Err(FlowError::NoCategorySelected));
        let candidates = editor.new_candidates(Some("scene")).unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].name_en, "sunset");
        assert_eq!(candidates[0].category_id.as_deref(), Some("scene"));
    }

    #[test]
    fn adopt_imported_swaps_temporary_ids() {
        let lib = library();
        let mut editor = Editor::new();
        editor.load_text("cat, sunset", &lib).unwrap();
        editor.set_all(true);
        let mut selection = Selection::new();
        editor.commit(&mut selection).unwrap();

        let persisted = tag("t9", "sunset", "日落", Some("scene"));
        assert_eq!(editor.adopt_imported(&[persisted.clone()], &mut selection), 1);
        assert_eq!(editor.items()[1].id, "t9");
        assert!(editor.items()[1].from_library && editor.items()[1].checked);
        assert_eq!(selection.tags()[1], persisted);
    }
}
