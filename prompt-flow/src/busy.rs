//! At most one outstanding request per control.

use std::collections::HashSet;
use std::fmt;

use crate::error::{FlowError, FlowResult};

/// Every control that can start a request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Control {
    LoadLibrary,
    SaveTag,
    DeleteTag,
    SaveCategory,
    DeleteCategory,
    ParseImport,
    ConfirmImport,
    EditorParse,
    EditorRelevance,
    EditorSaveNew,
    LoadGallery,
    SaveGalleryItem,
    DeleteGalleryItem,
    LoadSettings,
    TestLlm,
    SaveSettings,
}

impl fmt::Display for Control {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Control::LoadLibrary => "load-library",
            Control::SaveTag => "save-tag",
            Control::DeleteTag => "delete-tag",
            Control::SaveCategory => "save-category",
            Control::DeleteCategory => "delete-category",
            Control::ParseImport => "parse-import",
            Control::ConfirmImport => "confirm-import",
            Control::EditorParse => "editor-parse",
            Control::EditorRelevance => "editor-relevance",
            Control::EditorSaveNew => "editor-save-new",
            Control::LoadGallery => "load-gallery",
            Control::SaveGalleryItem => "save-gallery-item",
            Control::DeleteGalleryItem => "delete-gallery-item",
            Control::LoadSettings => "load-settings",
            Control::TestLlm => "test-llm",
            Control::SaveSettings => "save-settings",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct InFlight {
    active: HashSet<Control>,
}

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims `control`. Fails while a request for it is still pending.
    pub fn begin(&mut self, control: Control) -> FlowResult<()> {
        if !self.active.insert(control) {
            log::warn!("{control} pressed while its request is pending");
            return Err(FlowError::Busy(control));
        }
        Ok(())
    }

    /// Releases `control`, whatever the request's outcome was.
    pub fn finish(&mut self, control: Control) {
        self.active.remove(&control);
    }

    pub fn is_busy(&self, control: Control) -> bool {
        self.active.contains(&control)
    }

    pub fn any_busy(&self) -> bool {
        !self.active.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_begin_on_same_control_is_rejected() {
        let mut in_flight = InFlight::new();
        in_flight.begin(Control::ConfirmImport).unwrap();
        assert_eq!(
            in_flight.begin(Control::ConfirmImport),
            Err(FlowError::Busy(Control::ConfirmImport))
        );
        assert!(in_flight.is_busy(Control::ConfirmImport));
    }

    #[test]
    fn other_controls_stay_usable() {
        let mut in_flight = InFlight::new();
        in_flight.begin(Control::EditorParse).unwrap();
        assert!(in_flight.begin(Control::TestLlm).is_ok());
        assert!(!in_flight.is_busy(Control::SaveTag));
    }

    #[test]
    fn finish_releases_the_control() {
        let mut in_flight = InFlight::new();
        in_flight.begin(Control::SaveTag).unwrap();
        in_flight.finish(Control::SaveTag);
        assert!(!in_flight.any_busy());
        assert!(in_flight.begin(Control::SaveTag).is_ok());
    }
}
