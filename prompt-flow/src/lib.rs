pub mod board;
pub mod busy;
pub mod editor;
pub mod error;
pub mod format;
pub mod gallery;
pub mod import;
pub mod library;
pub mod matcher;
pub mod selection;
pub mod settings;
pub mod tokenize;
pub mod types;

pub use board::{Action, Board, Outcome, ACTIONS, PROMPT_PLACEHOLDER};
pub use busy::{Control, InFlight};
pub use editor::{Editor, RelevanceRequest, RelevanceResponse};
pub use error::{FlowError, FlowResult};
pub use format::{format_prompt, render_tag};
pub use gallery::{Gallery, GalleryDraft, GalleryItem, GalleryList};
pub use import::{
    BatchImportRequest, BatchImportResponse, ImportCandidate, ImportDraft, ParseRequest,
    ParseResponse,
};
pub use library::{CategoryFilter, Library, LibrarySnapshot};
pub use matcher::{match_token, MatchRule, TagMatch};
pub use selection::{Cursor, Selection, Toggled};
pub use tokenize::tokenize;
pub use types::{Category, CategoryDraft, EditorTag, PromptFormat, Tag, TagDraft};
