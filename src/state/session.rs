/// Orchestrator state for the restoration workflow
///
/// `Session` is the single mutable record the UI reads from. Every field
/// changes through exactly one of four transitions: a file is selected,
/// a restoration starts, a restoration succeeds, a restoration fails.
///
/// Each restoration attempt is stamped with a generation number. Results
/// that come back for an older generation are dropped, so a response that
/// arrives after the user picked another photo never overwrites the view.
use std::path::PathBuf;

use super::data::{RestoredImage, SelectedImage};

/// The message shown for every restoration failure
pub const GENERIC_ERROR: &str = "Failed to restore the image. Please try again.";

/// Coarse phase of the workflow, derived from the session fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing selected yet
    Idle,
    /// A photo is selected, no restoration has run for it
    Selected,
    /// A request is in flight
    Restoring,
    /// The restored image is available
    Restored,
    /// The last attempt failed
    Failed,
}

/// Everything a background restoration needs to know about its request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestoreTicket {
    pub generation: u64,
    pub path: PathBuf,
    pub media_type: String,
}

#[derive(Debug, Default)]
pub struct Session {
    selected: Option<SelectedImage>,
    restored: Option<RestoredImage>,
    error: Option<String>,
    in_progress: bool,
    generation: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<&SelectedImage> {
        self.selected.as_ref()
    }

    pub fn restored(&self) -> Option<&RestoredImage> {
        self.restored.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_restoring(&self) -> bool {
        self.in_progress
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The restore button is enabled only with a selection and no request in flight
    pub fn can_restore(&self) -> bool {
        self.selected.is_some() && !self.in_progress
    }

    /// Pick and drop are disabled while a restoration runs
    pub fn accepts_uploads(&self) -> bool {
        !self.in_progress
    }

    pub fn phase(&self) -> Phase {
        if self.in_progress {
            Phase::Restoring
        } else if self.restored.is_some() {
            Phase::Restored
        } else if self.error.is_some() {
            Phase::Failed
        } else if self.selected.is_some() {
            Phase::Selected
        } else {
            Phase::Idle
        }
    }

    /// Replace the current selection.
    ///
    /// Clears any restored image and error. If a request is still in
    /// flight its result will be discarded when it arrives.
    pub fn select(&mut self, image: SelectedImage) {
        if self.in_progress {
            self.generation += 1;
            self.in_progress = false;
        }
        self.selected = Some(image);
        self.restored = None;
        self.error = None;
    }

    /// Start a restoration for the current selection.
    ///
    /// Returns `None` when nothing is selected or a request is already
    /// running; the caller must not issue a request in that case.
    pub fn begin_restore(&mut self) -> Option<RestoreTicket> {
        if !self.can_restore() {
            return None;
        }
        let selected = self.selected.as_ref()?;

        self.generation += 1;
        self.in_progress = true;
        self.restored = None;
        self.error = None;

        Some(RestoreTicket {
            generation: self.generation,
            path: selected.path.clone(),
            media_type: selected.media_type.clone(),
        })
    }

    /// Apply the outcome of a restoration.
    ///
    /// Returns `false` if the outcome belongs to a superseded attempt and
    /// was ignored.
    pub fn finish_restore<E>(&mut self, generation: u64, outcome: Result<RestoredImage, E>) -> bool {
        if !self.in_progress || generation != self.generation {
            return false;
        }

        self.in_progress = false;
        match outcome {
            Ok(image) => {
                self.restored = Some(image);
                self.error = None;
            }
            Err(_) => {
                self.restored = None;
                self.error = Some(GENERIC_ERROR.to_string());
            }
        }
        true
    }
}
