//! The ordered list of selected tags and its insertion cursor.
//!
//! The cursor is either [`Cursor::Append`] or [`Cursor::After`] a valid index.
//! Every mutation below re-establishes that; nothing else touches `items`.

use crate::error::{FlowError, FlowResult};
use crate::types::Tag;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Cursor {
    /// New tags go to the end of the sequence.
    #[default]
    Append,
    /// New tags go right after this position.
    After(usize),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Toggled {
    Added(usize),
    Removed(usize),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Selection {
    items: Vec<Tag>,
    cursor: Cursor,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tags(&self) -> &[Tag] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|t| t.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    /// Where the next added tag will land.
    pub fn insertion_index(&self) -> usize {
        match self.cursor {
            Cursor::Append => self.items.len(),
            Cursor::After(index) => index + 1,
        }
    }

    pub fn is_cursor_at(&self, index: usize) -> bool {
        self.cursor == Cursor::After(index)
    }

    pub fn toggle(&mut self, tag: &Tag) -> Toggled {
        match self.position(&tag.id) {
            Some(index) => {
                self.remove_at(index);
                Toggled::Removed(index)
            }
            None => Toggled::Added(self.insert_at_cursor(tag.clone())),
        }
    }

    /// Adds `tag` at the cursor unless it is already selected.
    pub fn add(&mut self, tag: &Tag) -> Option<usize> {
        if self.contains(&tag.id) {
            return None;
        }
        Some(self.insert_at_cursor(tag.clone()))
    }

    /// Picking the position the cursor already sits on resets it to append.
    pub fn set_cursor(&mut self, index: usize) -> FlowResult<Cursor> {
        if index >= self.items.len() {
            return Err(FlowError::CursorOutOfRange { index, len: self.items.len() });
        }
        self.cursor = if self.cursor == Cursor::After(index) {
            Cursor::Append
        } else {
            Cursor::After(index)
        };
        Ok(self.cursor)
    }

    pub fn remove(&mut self, id: &str) -> Option<Tag> {
        let index = self.position(id)?;
        Some(self.remove_at(index))
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.cursor = Cursor::Append;
    }

    /// Refreshes a selected tag after it was edited, keeping its position.
    pub fn refresh(&mut self, tag: &Tag) -> bool {
        self.replace_id(&tag.id, tag)
    }

    /// Swaps the entry selected under `old_id` for `tag` in place. Used when
    /// a temporary editor tag gets persisted under a real id.
    pub fn replace_id(&mut self, old_id: &str, tag: &Tag) -> bool {
        match self.position(old_id) {
            Some(index) => {
                self.items[index] = tag.clone();
                true
            }
            None => false,
        }
    }

    fn insert_at_cursor(&mut self, tag: Tag) -> usize {
        match self.cursor {
            Cursor::Append => {
                self.items.push(tag);
                self.items.len() - 1
            }
            Cursor::After(index) if index + 1 >= self.items.len() => {
                self.items.push(tag);
                let last = self.items.len() - 1;
                self.cursor = Cursor::After(last);
                last
            }
            Cursor::After(index) => {
                self.items.insert(index + 1, tag);
                self.cursor = Cursor::After(index + 1);
                index + 1
            }
        }
    }

    fn remove_at(&mut self, index: usize) -> Tag {
        let removed = self.items.remove(index);
        self.cursor = match self.cursor {
            _ if self.items.is_empty() => Cursor::Append,
            Cursor::After(0) if index == 0 => Cursor::Append,
            Cursor::After(at) if at >= index => Cursor::After(at - 1),
            other => other,
        };
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(id: &str) -> Tag {
        Tag {
            id: id.to_string(),
            name_en: id.to_string(),
            name_zh: String::new(),
            category_id: None,
            weight: 1.0,
        }
    }

    fn ids(selection: &Selection) -> Vec<&str> {
        selection.tags().iter().map(|t| t.id.as_str()).collect()
    }

    fn selection_of(names: &[&str]) -> Selection {
        let mut selection = Selection::new();
        for name in names {
            selection.toggle(&tag(name));
        }
        selection
    }

    fn assert_cursor_valid(selection: &Selection) {
        if let Cursor::After(index) = selection.cursor() {
            assert!(index < selection.len(), "cursor {index} past {}", selection.len());
        }
    }

    #[test]
    fn toggle_appends_while_cursor_is_append() {
        let selection = selection_of(&["a", "b", "c"]);
        assert_eq!(ids(&selection), ["a", "b", "c"]);
        assert_eq!(selection.cursor(), Cursor::Append);
    }

    #[test]
    fn toggle_inserts_after_cursor_and_advances() {
        let mut selection = selection_of(&["a", "b", "c"]);
        selection.set_cursor(0).unwrap();
        assert_eq!(selection.toggle(&tag("x")), Toggled::Added(1));
        assert_eq!(selection.toggle(&tag("y")), Toggled::Added(2));
        assert_eq!(ids(&selection), ["a", "x", "y", "b", "c"]);
        assert_eq!(selection.cursor(), Cursor::After(2));
    }

    #[test]
    fn cursor_on_last_index_keeps_following_the_tail() {
        let mut selection = selection_of(&["a", "b"]);
        selection.set_cursor(1).unwrap();
        selection.toggle(&tag("c"));
        assert_eq!(ids(&selection), ["a", "b", "c"]);
        assert_eq!(selection.cursor(), Cursor::After(2));
    }

    #[test]
    fn removing_at_or_before_cursor_shifts_it_back() {
        let mut selection = selection_of(&["a", "b", "c", "d"]);
        selection.set_cursor(2).unwrap();
        selection.remove("a");
        assert_eq!(selection.cursor(), Cursor::After(1));
        selection.remove("c");
        assert_eq!(selection.cursor(), Cursor::After(0));
        assert_eq!(ids(&selection), ["b", "d"]);
    }

    #[test]
    fn removing_after_cursor_leaves_it() {
        let mut selection = selection_of(&["a", "b", "c"]);
        selection.set_cursor(0).unwrap();
        selection.remove("c");
        assert_eq!(selection.cursor(), Cursor::After(0));
    }

    #[test]
    fn removing_the_first_item_under_cursor_floors_at_append() {
        let mut selection = selection_of(&["a", "b"]);
        selection.set_cursor(0).unwrap();
        selection.remove("a");
        assert_eq!(selection.cursor(), Cursor::Append);
        assert_eq!(ids(&selection), ["b"]);
    }

    #[test]
    fn emptying_resets_cursor() {
        let mut selection = selection_of(&["a"]);
        selection.set_cursor(0).unwrap();
        selection.toggle(&tag("a"));
        assert!(selection.is_empty());
        assert_eq!(selection.cursor(), Cursor::Append);
    }

    #[test]
    fn clear_resets_everything() {
        let mut selection = selection_of(&["a", "b"]);
        selection.set_cursor(1).unwrap();
        selection.clear();
        assert_eq!(selection, Selection::new());
    }

    #[test]
    fn set_cursor_twice_returns_to_append() {
        let mut selection = selection_of(&["a", "b", "c"]);
        assert_eq!(selection.set_cursor(1).unwrap(), Cursor::After(1));
        assert_eq!(selection.set_cursor(1).unwrap(), Cursor::Append);
        assert_eq!(selection.set_cursor(2).unwrap(), Cursor::After(2));
        assert_eq!(selection.set_cursor(0).unwrap(), Cursor::After(0));
    }

    #[test]
    fn reclicking_last_index_resets_to_append_not_last() {
        let mut selection = selection_of(&["a", "b"]);
        selection.set_cursor(1).unwrap();
        assert_eq!(selection.set_cursor(1).unwrap(), Cursor::Append);
        assert_eq!(selection.insertion_index(), 2);
    }

    #[test]
    fn set_cursor_rejects_out_of_range() {
        let mut selection = selection_of(&["a"]);
        assert_eq!(
            selection.set_cursor(1),
            Err(FlowError::CursorOutOfRange { index: 1, len: 1 })
        );
        assert_eq!(selection.cursor(), Cursor::Append);
    }

    #[test]
    fn double_toggle_at_append_is_a_no_op() {
        let mut selection = selection_of(&["a", "b"]);
        let before = selection.clone();
        selection.toggle(&tag("x"));
        selection.toggle(&tag("x"));
        assert_eq!(selection, before);

        let mut empty = Selection::new();
        empty.toggle(&tag("x"));
        empty.toggle(&tag("x"));
        assert_eq!(empty, Selection::new());
    }

    #[test]
    fn double_toggle_of_new_tag_mid_sequence_restores_state() {
        let mut selection = selection_of(&["a", "b", "c"]);
        selection.set_cursor(0).unwrap();
        let before = selection.clone();
        selection.toggle(&tag("x"));
        selection.toggle(&tag("x"));
        assert_eq!(selection, before);
    }

    #[test]
    fn double_toggle_of_selected_tag_moves_it_to_the_cursor() {
        let mut selection = selection_of(&["a", "b", "c", "d"]);
        selection.set_cursor(0).unwrap();
        // Removing "c" (after the cursor) leaves the cursor on "a";
        // re-adding puts "c" right after "a" and the cursor follows it.
        selection.toggle(&tag("c"));
        selection.toggle(&tag("c"));
        assert_eq!(ids(&selection), ["a", "c", "b", "d"]);
        assert_eq!(selection.cursor(), Cursor::After(1));
    }

    #[test]
    fn add_skips_existing_ids() {
        let mut selection = selection_of(&["a"]);
        assert_eq!(selection.add(&tag("a")), None);
        assert_eq!(selection.add(&tag("b")), Some(1));
        assert_eq!(ids(&selection), ["a", "b"]);
    }

    #[test]
    fn refresh_and_replace_keep_position() {
        let mut selection = selection_of(&["a", "b", "c"]);
        let mut edited = tag("b");
        edited.weight = 1.4;
        assert!(selection.refresh(&edited));
        assert_eq!(selection.tags()[1].weight, 1.4);

        assert!(selection.replace_id("c", &tag("z")));
        assert_eq!(ids(&selection), ["a", "b", "z"]);
        assert!(!selection.replace_id("missing", &tag("q")));
    }

    #[test]
    fn cursor_stays_valid_through_mixed_operations() {
        let mut selection = Selection::new();
        let script: &[(&str, usize)] = &[
            ("t", 0), ("t", 1), ("t", 2), ("c", 1), ("t", 3), ("t", 4), ("r", 1),
            ("c", 0), ("t", 5), ("r", 0), ("c", 2), ("t", 2), ("r", 3), ("t", 6),
            ("c", 0), ("c", 0), ("r", 5), ("r", 6), ("t", 7), ("x", 0), ("t", 8),
        ];
        for (op, n) in script {
            let name = format!("tag{n}");
            match *op {
                "t" => {
                    selection.toggle(&tag(&name));
                }
                "r" => {
                    selection.remove(&name);
                }
                "c" => {
                    let _ = selection.set_cursor(*n);
                }
                _ => selection.clear(),
            }
            assert_cursor_valid(&selection);
        }
    }
}
