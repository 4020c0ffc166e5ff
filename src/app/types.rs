use prompt_flow::gallery::GalleryItem;
use prompt_flow::{Category, Tag};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Page {
    #[default]
    Library,
    Gallery,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

impl ToastKind {
    pub fn class(self) -> &'static str {
        match self {
            ToastKind::Success => "toast success",
            ToastKind::Error => "toast error",
            ToastKind::Info => "toast info",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u32,
    pub message: String,
    pub kind: ToastKind,
}

/// The dialog currently open, with whatever it was opened on.
#[derive(Clone, Debug, PartialEq)]
pub enum Modal {
    AddTag,
    EditTag(Tag),
    AddCategory,
    EditCategory(Category),
    Import,
    Editor,
    Settings,
    GalleryUpload,
    GalleryEdit(GalleryItem),
    GalleryView(GalleryItem),
}
