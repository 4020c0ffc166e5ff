//! The cached copy of the tag library and the category filter.

use serde::Deserialize;

use crate::error::{FlowError, FlowResult};
use crate::types::{Category, Tag, FALLBACK_COLOR};

/// Body of the library read endpoint.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct LibrarySnapshot {
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub categories: Vec<Category>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Category(String),
}

impl CategoryFilter {
    pub fn admits(&self, tag: &Tag) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Category(id) => tag.category_id.as_deref() == Some(id.as_str()),
        }
    }

    pub fn is_category(&self, id: &str) -> bool {
        matches!(self, CategoryFilter::Category(current) if current == id)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Library {
    tags: Vec<Tag>,
    categories: Vec<Category>,
    filter: CategoryFilter,
}

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the cached copy. A filter naming a category that no longer
    /// exists falls back to `All`.
    pub fn replace_all(&mut self, snapshot: LibrarySnapshot) {
        self.tags = snapshot.tags;
        self.categories = snapshot.categories;
        if let CategoryFilter::Category(id) = &self.filter {
            if self.category(id).is_none() {
                self.filter = CategoryFilter::All;
            }
        }
        log::info!(
            "library loaded: {} tags, {} categories",
            self.tags.len(),
            self.categories.len()
        );
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn filter(&self) -> &CategoryFilter {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: CategoryFilter) -> FlowResult<()> {
        if let CategoryFilter::Category(id) = &filter {
            if self.category(id).is_none() {
                return Err(FlowError::UnknownCategory(id.clone()));
            }
        }
        self.filter = filter;
        Ok(())
    }

    pub fn visible_tags(&self) -> impl Iterator<Item = &Tag> {
        self.tags.iter().filter(|t| self.filter.admits(t))
    }

    pub fn tag(&self, id: &str) -> Option<&Tag> {
        self.tags.iter().find(|t| t.id == id)
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn category_color(&self, id: Option<&str>) -> &str {
        id.and_then(|id| self.category(id))
            .map_or(FALLBACK_COLOR, |c| c.color.as_str())
    }

    /// The category new tags go into; only a concrete filter names one.
    pub fn active_category(&self) -> FlowResult<&Category> {
        match &self.filter {
            CategoryFilter::Category(id) => self
                .category(id)
                .ok_or_else(|| FlowError::UnknownCategory(id.clone())),
            CategoryFilter::All => Err(FlowError::NoCategorySelected),
        }
    }

    pub fn upsert_tag(&mut self, tag: Tag) {
        match self.tags.iter_mut().find(|t| t.id == tag.id) {
            Some(existing) => *existing = tag,
            None => self.tags.push(tag),
        }
    }

    pub fn remove_tag(&mut self, id: &str) -> Option<Tag> {
        let index = self.tags.iter().position(|t| t.id == id)?;
        Some(self.tags.remove(index))
    }

    /// Appends imported tags, skipping ids the cache already holds.
    pub fn extend_tags(&mut self, tags: impl IntoIterator<Item = Tag>) -> usize {
        let before = self.tags.len();
        for tag in tags {
            if self.tag(&tag.id).is_none() {
                self.tags.push(tag);
            }
        }
        self.tags.len() - before
    }

    pub fn upsert_category(&mut self, category: Category) {
        match self.categories.iter_mut().find(|c| c.id == category.id) {
            Some(existing) => *existing = category,
            None => self.categories.push(category),
        }
    }

    /// Member tags keep their dangling `category_id`; they render with the
    /// fallback colour until reassigned.
    pub fn remove_category(&mut self, id: &str) -> Option<Category> {
        let index = self.categories.iter().position(|c| c.id == id)?;
        if self.filter.is_category(id) {
            self.filter = CategoryFilter::All;
        }
        Some(self.categories.remove(index))
    }
}
