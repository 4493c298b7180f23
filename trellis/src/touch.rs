//! Touch input as seen by layouts.

use std::collections::HashMap;

/// Touch event kinds delivered to a layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TouchEvent {
    /// A contact went down.
    Press,
    /// A contact that is down moved.
    Move,
    /// A contact lifted.
    Release,
    /// The platform aborted the contact (e.g. the window lost focus).
    Cancel,
}

impl TouchEvent {
    /// Whether this event ends the contact's gesture.
    pub fn ends_contact(&self) -> bool {
        matches!(self, TouchEvent::Release | TouchEvent::Cancel)
    }
}

/// Which container captured each touch contact.
///
/// A contact is captured on press, so moves and the release reach the same
/// container even after the finger leaves its bounds. The target is the
/// path of child indices from the root to the container.
#[derive(Debug, Clone, Default)]
pub struct TouchCapture {
    targets: HashMap<u32, Vec<usize>>,
}

impl TouchCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture `contact` for the container at `path`.
    pub fn capture(&mut self, contact: u32, path: Vec<usize>) {
        self.targets.insert(contact, path);
    }

    /// Release the capture, returning the captured path.
    pub fn release(&mut self, contact: u32) -> Option<Vec<usize>> {
        self.targets.remove(&contact)
    }

    pub fn captured(&self, contact: u32) -> Option<&[usize]> {
        self.targets.get(&contact).map(Vec::as_slice)
    }
}
