//! Gallery of generated images and the prompts that produced them.

use serde::{Deserialize, Serialize};

pub const UPLOADS_PATH: &str = "/static/uploads";
pub const UNTITLED: &str = "未命名作品";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GalleryItem {
    pub id: String,
    pub image: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub positive_prompt: String,
    #[serde(default)]
    pub negative_prompt: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl GalleryItem {
    pub fn image_url(&self) -> String {
        format!("{UPLOADS_PATH}/{}", self.image)
    }

    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            UNTITLED
        } else {
            &self.title
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct GalleryList {
    #[serde(default)]
    pub items: Vec<GalleryItem>,
}

/// Text fields of the upload and edit forms; the image travels separately.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GalleryDraft {
    pub title: String,
    pub positive_prompt: String,
    pub negative_prompt: String,
}

impl GalleryDraft {
    pub fn from_item(item: &GalleryItem) -> Self {
        Self {
            title: item.title.clone(),
            positive_prompt: item.positive_prompt.clone(),
            negative_prompt: item.negative_prompt.clone(),
        }
    }

    pub fn fields(&self) -> [(&'static str, &str); 3] {
        [
            ("title", &self.title),
            ("positive_prompt", &self.positive_prompt),
            ("negative_prompt", &self.negative_prompt),
        ]
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Gallery {
    items: Vec<GalleryItem>,
}

impl Gallery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[GalleryItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&GalleryItem> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn replace_all(&mut self, list: GalleryList) {
        self.items = list.items;
    }

    /// Uploads show up first.
    pub fn prepend(&mut self, item: GalleryItem) {
        self.items.insert(0, item);
    }

    pub fn replace(&mut self, item: GalleryItem) -> bool {
        match self.items.iter_mut().find(|i| i.id == item.id) {
            Some(existing) => {
                *existing = item;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: &str) -> Option<GalleryItem> {
        let index = self.items.iter().position(|i| i.id == id)?;
        Some(self.items.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, title: &str) -> GalleryItem {
        GalleryItem {
            id: id.to_string(),
            image: format!("{id}.png"),
            title: title.to_string(),
            positive_prompt: "1girl, smile".to_string(),
            negative_prompt: String::new(),
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn list_deserializes_with_missing_fields() {
        let list: GalleryList =
            serde_json::from_str(r#"{"items": [{"id": "1", "image": "a.png"}]}"#).unwrap();
        assert_eq!(list.items[0].display_title(), UNTITLED);
        assert_eq!(list.items[0].image_url(), "/static/uploads/a.png");
    }

    #[test]
    fn uploads_go_first_and_edits_stay_in_place() {
        let mut gallery = Gallery::new();
        gallery.replace_all(GalleryList { items: vec![item("1", "old")] });
        gallery.prepend(item("2", "new"));
        assert_eq!(gallery.items()[0].id, "2");

        assert!(gallery.replace(item("1", "renamed")));
        assert_eq!(gallery.items()[1].display_title(), "renamed");
        assert!(!gallery.replace(item("9", "ghost")));
    }

    #[test]
    fn remove_by_id() {
        let mut gallery = Gallery::new();
        gallery.prepend(item("1", ""));
        assert!(gallery.remove("1").is_some());
        assert!(gallery.is_empty());
        assert!(gallery.remove("1").is_none());
    }

    #[test]
    fn draft_fields_follow_form_names() {
        let draft = GalleryDraft::from_item(&item("1", "t"));
        let names: Vec<_> = draft.fields().iter().map(|(name, _)| *name).collect();
        assert_eq!(names, ["title", "positive_prompt", "negative_prompt"]);
    }
}
