//! Panel state machine
//!
//! The page shows exactly one of four panels at a time. Every change of
//! panel goes through [`Panel::apply`].

use crate::error::ReviewError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Panel {
    /// Upload box waiting for a file
    #[default]
    Empty,
    /// A file is chosen and can be submitted
    FileChosen,
    /// Upload in progress
    Loading,
    /// Analysis results on screen
    Results,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelEvent {
    FileSelected,
    SubmitStarted,
    Succeeded,
    Failed,
    Reset,
}

impl Panel {
    pub const ALL: [Panel; 4] = [
        Panel::Empty,
        Panel::FileChosen,
        Panel::Loading,
        Panel::Results,
    ];

    pub fn apply(self, event: PanelEvent) -> Result<Panel, ReviewError> {
        use Panel::*;
        use PanelEvent::*;

        match (self, event) {
            (Empty | FileChosen, FileSelected) => Ok(FileChosen),
            (FileChosen, SubmitStarted) => Ok(Loading),
            (Loading, Succeeded) => Ok(Results),
            (Loading, Failed) => Ok(Empty),
            (Empty | FileChosen | Results, Reset) => Ok(Empty),
            (from, event) => Err(ReviewError::InvalidTransition { from, event }),
        }
    }

    /// Stable name, also used for the `panel` getter exposed to JavaScript
    pub fn as_str(self) -> &'static str {
        match self {
            Panel::Empty => "empty",
            Panel::FileChosen => "file-chosen",
            Panel::Loading => "loading",
            Panel::Results => "results",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path() {
        let panel = Panel::default()
            .apply(PanelEvent::FileSelected)
            .and_then(|p| p.apply(PanelEvent::SubmitStarted))
            .and_then(|p| p.apply(PanelEvent::Succeeded))
            .unwrap();
        assert_eq!(panel, Panel::Results);
        assert_eq!(panel.apply(PanelEvent::Reset).unwrap(), Panel::Empty);
    }

    #[test]
    fn test_failure_returns_to_empty() {
        assert_eq!(
            Panel::Loading.apply(PanelEvent::Failed).unwrap(),
            Panel::Empty
        );
    }

    #[test]
    fn test_reselect_keeps_file_chosen() {
        assert_eq!(
            Panel::FileChosen.apply(PanelEvent::FileSelected).unwrap(),
            Panel::FileChosen
        );
    }

    #[test]
    fn test_rejected_transitions() {
        let rejected = [
            (Panel::Empty, PanelEvent::SubmitStarted),
            (Panel::Empty, PanelEvent::Succeeded),
            (Panel::Loading, PanelEvent::FileSelected),
            (Panel::Loading, PanelEvent::SubmitStarted),
            (Panel::Loading, PanelEvent::Reset),
            (Panel::Results, PanelEvent::FileSelected),
            (Panel::Results, PanelEvent::SubmitStarted),
            (Panel::FileChosen, PanelEvent::Failed),
        ];
        for (from, event) in rejected {
            assert_eq!(
                from.apply(event),
                Err(ReviewError::InvalidTransition { from, event }),
                "{:?} on {:?} should be rejected",
                event,
                from
            );
        }
    }

    #[test]
    fn test_names_are_distinct() {
        let names: std::collections::HashSet<_> = Panel::ALL.iter().map(|p| p.as_str()).collect();
        assert_eq!(names.len(), 4);
    }
}
