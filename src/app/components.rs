pub mod category_panel;
pub mod dialog;
pub mod editor_panel;
pub mod gallery_view;
pub mod import_dialog;
pub mod selection_panel;
pub mod settings_dialog;
pub mod tag_dialogs;
pub mod tag_panel;
