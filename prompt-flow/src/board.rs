//! The controller: library cache, selection, editor and output dialect in one
//! place, driven by named actions so views never touch the state directly.

use crate::editor::{Editor, TEMP_ID_PREFIX};
use crate::error::{FlowError, FlowResult};
use crate::format::format_prompt;
use crate::library::{CategoryFilter, Library};
use crate::selection::{Selection, Toggled};
use crate::types::{PromptFormat, Tag};

pub const PROMPT_PLACEHOLDER: &str = "选择标签后生成 Prompt...";

/// Every synchronous user command the views can issue.
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    ToggleTag(String),
    SetCursor(usize),
    RemoveSelected(String),
    ClearSelection,
    SetFormat(PromptFormat),
    FilterAll,
    FilterCategory(String),
    EditorToggle(usize),
    EditorSelectAll,
    EditorSelectNone,
    EditorSelectCategory(String),
    EditorCommit,
    EditorClose,
}

/// Names the dispatch table answers to, in menu order.
pub const ACTIONS: &[&str] = &[
    "toggle-tag",
    "set-cursor",
    "remove-selected",
    "clear-selection",
    "set-format",
    "filter-all",
    "filter-category",
    "editor-toggle",
    "editor-select-all",
    "editor-select-none",
    "editor-select-category",
    "editor-commit",
    "editor-close",
];

fn required<'a>(name: &'static str, arg: Option<&'a str>) -> FlowResult<&'a str> {
    arg.map(str::trim)
        .filter(|a| !a.is_empty())
        .ok_or(FlowError::MissingArgument(name))
}

fn index(name: &'static str, arg: Option<&str>) -> FlowResult<usize> {
    let raw = required(name, arg)?;
    raw.parse()
        .map_err(|_| FlowError::InvalidArgument(format!("`{raw}` is not a position")))
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::ToggleTag(_) => "toggle-tag",
            Action::SetCursor(_) => "set-cursor",
            Action::RemoveSelected(_) => "remove-selected",
            Action::ClearSelection => "clear-selection",
            Action::SetFormat(_) => "set-format",
            Action::FilterAll => "filter-all",
            Action::FilterCategory(_) => "filter-category",
            Action::EditorToggle(_) => "editor-toggle",
            Action::EditorSelectAll => "editor-select-all",
            Action::EditorSelectNone => "editor-select-none",
            Action::EditorSelectCategory(_) => "editor-select-category",
            Action::EditorCommit => "editor-commit",
            Action::EditorClose => "editor-close",
        }
    }

    /// Builds an action from its name and optional string argument.
    pub fn parse(name: &str, arg: Option<&str>) -> FlowResult<Self> {
        let action = match name {
            "toggle-tag" => Action::ToggleTag(required("toggle-tag", arg)?.to_string()),
            "set-cursor" => Action::SetCursor(index("set-cursor", arg)?),
            "remove-selected" => {
                Action::RemoveSelected(required("remove-selected", arg)?.to_string())
            }
            "clear-selection" => Action::ClearSelection,
            "set-format" => Action::SetFormat(required("set-format", arg)?.parse()?),
            "filter-all" => Action::FilterAll,
            "filter-category" => {
                Action::FilterCategory(required("filter-category", arg)?.to_string())
            }
            "editor-toggle" => Action::EditorToggle(index("editor-toggle", arg)?),
            "editor-select-all" => Action::EditorSelectAll,
            "editor-select-none" => Action::EditorSelectNone,
            "editor-select-category" => {
                Action::EditorSelectCategory(required("editor-select-category", arg)?.to_string())
            }
            "editor-commit" => Action::EditorCommit,
            "editor-close" => Action::EditorClose,
            other => return Err(FlowError::UnknownAction(other.to_string())),
        };
        Ok(action)
    }
}

/// What a dispatched action did, for the toast line.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    Toggled(Toggled),
    CursorMoved,
    Removed,
    Cleared,
    FormatChanged,
    Filtered,
    Checked(bool),
    BulkChecked(usize),
    Committed(usize),
    EditorClosed,
    Nothing,
}

impl Outcome {
    pub fn notice(&self) -> Option<String> {
        match self {
            Outcome::BulkChecked(n) => Some(format!("已选中 {n} 个标签")),
            Outcome::Committed(n) => Some(format!("已添加 {n} 个标签")),
            Outcome::Cleared => Some("已清空选择".to_string()),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Board {
    pub library: Library,
    pub selection: Selection,
    pub editor: Editor,
    pub format: PromptFormat,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prompt(&self) -> String {
        format_prompt(self.selection.tags(), self.format)
    }

    /// The prompt, or the placeholder when nothing is selected.
    pub fn prompt_display(&self) -> String {
        if self.selection.is_empty() {
            PROMPT_PLACEHOLDER.to_string()
        } else {
            self.prompt()
        }
    }

    pub fn toggle_tag(&mut self, id: &str) -> FlowResult<Toggled> {
        let tag = self
            .library
            .tag(id)
            .ok_or_else(|| FlowError::UnknownTag(id.to_string()))?;
        Ok(self.selection.toggle(tag))
    }

    /// A tag came back from create/update: cache it and refresh the selection.
    pub fn apply_saved_tag(&mut self, tag: Tag) {
        self.selection.refresh(&tag);
        self.library.upsert_tag(tag);
    }

    pub fn forget_tag(&mut self, id: &str) {
        self.library.remove_tag(id);
        self.selection.remove(id);
    }

    pub fn forget_category(&mut self, id: &str) {
        self.library.remove_category(id);
    }

    /// Imported tags join the library and replace their temporary stand-ins
    /// in the editor and the selection. The selection is matched by name so a
    /// commit that already closed the editor still gets the real ids.
    pub fn adopt_imported(&mut self, tags: Vec<Tag>) -> usize {
        let mut adopted = self.editor.adopt_imported(&tags, &mut self.selection);
        for tag in &tags {
            let stand_in = self
                .selection
                .tags()
                .iter()
                .find(|t| {
                    t.id.starts_with(TEMP_ID_PREFIX) && t.name_en.eq_ignore_ascii_case(&tag.name_en)
                })
                .map(|t| t.id.clone());
            if let Some(old_id) = stand_in {
                self.selection.replace_id(&old_id, tag);
                adopted += 1;
            }
        }
        self.library.extend_tags(tags);
        adopted
    }

    pub fn dispatch(&mut self, action: Action) -> FlowResult<Outcome> {
        log::debug!("dispatch {}", action.name());
        let outcome = match action {
            Action::ToggleTag(id) => Outcome::Toggled(self.toggle_tag(&id)?),
            Action::SetCursor(index) => {
                self.selection.set_cursor(index)?;
                Outcome::CursorMoved
            }
            Action::RemoveSelected(id) => match self.selection.remove(&id) {
                Some(_) => Outcome::Removed,
                None => Outcome::Nothing,
            },
            Action::ClearSelection => {
                self.selection.clear();
                Outcome::Cleared
            }
            Action::SetFormat(format) => {
                self.format = format;
                Outcome::FormatChanged
            }
            Action::FilterAll => {
                self.library.set_filter(CategoryFilter::All)?;
                Outcome::Filtered
            }
            Action::FilterCategory(id) => {
                self.library.set_filter(CategoryFilter::Category(id))?;
                Outcome::Filtered
            }
            Action::EditorToggle(index) => Outcome::Checked(self.editor.toggle(index)?),
            Action::EditorSelectAll => {
                self.editor.set_all(true);
                Outcome::BulkChecked(self.editor.checked_count())
            }
            Action::EditorSelectNone => {
                self.editor.set_all(false);
                Outcome::BulkChecked(0)
            }
            Action::EditorSelectCategory(id) => {
                Outcome::BulkChecked(self.editor.select_category(&id)?)
            }
            Action::EditorCommit => {
                let added = self.editor.commit(&mut self.selection)?;
                self.editor.close();
                Outcome::Committed(added)
            }
            Action::EditorClose => {
                self.editor.close();
                Outcome::EditorClosed
            }
        };
        Ok(outcome)
    }

    /// Dispatch by name, as bound from the views.
    pub fn run(&mut self, name: &str, arg: Option<&str>) -> FlowResult<Outcome> {
        let action = Action::parse(name, arg).inspect_err(|err| {
            log::warn!("rejected action `{name}`: {err}");
        })?;
        self.dispatch(action)
    }
}
