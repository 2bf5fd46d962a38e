use chrono::{
    DateTime,
    Local,
};
use serde::Serialize;

/// Where a form instance is in its draft lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DraftPhase {
    /// Mounted, waiting on the restore/discard decision.
    CheckingForDraft,
    Clean,
    /// Edited, snapshot timer running.
    Dirty,
    Snapshotted,
}

/// Save indicator shown next to an autosaving editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SaveStatus {
    Saved,
    Dirty,
    Saving,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountOutcome {
    NoDraft,
    DraftAvailable,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DraftStatus {
    pub phase: DraftPhase,
    pub save: SaveStatus,
    pub last_saved: Option<DateTime<Local>>,
}

impl DraftStatus {
    pub fn label(&self) -> String {
        match self.save {
            SaveStatus::Saving => "Saving...".to_string(),
            SaveStatus::Dirty => "Editing".to_string(),
            SaveStatus::Error => "Autosave failed".to_string(),
            SaveStatus::Saved => match self.last_saved {
                Some(at) => format!("Saved • {}", at.format("%H:%M:%S")),
                None => "Saved • now".to_string(),
            },
        }
    }
}

impl Default for DraftStatus {
    fn default() -> Self {
        Self { phase: DraftPhase::CheckingForDraft, save: SaveStatus::Saved, last_saved: None }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_labels() {
        let mut status = DraftStatus::default();
        assert_eq!(status.label(), "Saved • now");

        status.last_saved = Local.with_ymd_and_hms(2026, 1, 5, 14, 3, 9).single();
        assert_eq!(status.label(), "Saved • 14:03:09");

        status.save = SaveStatus::Dirty;
        assert_eq!(status.label(), "Editing");
    }
}
