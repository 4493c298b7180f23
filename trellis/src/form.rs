//! Top-level window of controls.
//!
//! A [`Form`] owns the root [`Panel`], runs the per-frame layout pass and
//! routes touch input. Touches go to the deepest container under the
//! contact and bubble up to the root until a layout consumes them. Each
//! contact is captured by the containers it pressed on, so a drag that
//! leaves its scroll area still reaches it.

use crate::control::{Container, Control};
use crate::host::{dispatch_touch, run_layout};
use crate::touch::{TouchCapture, TouchEvent};
use crate::widget::Panel;

#[derive(Debug)]
pub struct Form {
    root: Panel,
    capture: TouchCapture,
}

impl Form {
    pub fn new(root: Panel) -> Self {
        Self {
            root,
            capture: TouchCapture::new(),
        }
    }

    pub fn root(&self) -> &Panel {
        &self.root
    }

    /// Mutable access to the tree. Call [`Form::update`] afterwards so
    /// absolute bounds catch up.
    pub fn root_mut(&mut self) -> &mut Panel {
        &mut self.root
    }

    /// Run one layout pass over the whole tree. The root's bounds are in
    /// window space.
    pub fn update(&mut self) {
        let bounds = Control::bounds(&self.root).sanitized();
        self.root.set_absolute_bounds(bounds);
        run_layout(&mut self.root, bounds.origin());
    }

    /// Route a touch event in window coordinates. Returns whether a
    /// layout consumed it.
    pub fn touch_event(&mut self, event: TouchEvent, x: i32, y: i32, contact_index: u32) -> bool {
        let path = match event {
            TouchEvent::Press => {
                let path = self.hit_path(x, y);
                self.capture.capture(contact_index, path.clone());
                path
            }
            TouchEvent::Move => match self.capture.captured(contact_index) {
                Some(path) => path.to_vec(),
                None => self.hit_path(x, y),
            },
            TouchEvent::Release | TouchEvent::Cancel => match self.capture.release(contact_index) {
                Some(path) => path,
                None => self.hit_path(x, y),
            },
        };

        let chain = container_chain(&self.root, &path);
        tracing::trace!(
            "touch {:?} at ({}, {}) contact {} -> depth {}",
            event,
            x,
            y,
            contact_index,
            chain.len()
        );

        if event.ends_contact() {
            // Every container on the path hears the end of the contact, so
            // no gesture is left open behind one that consumed.
            let mut consumed = false;
            for container in chain.iter().rev() {
                let (local_x, local_y) = to_content_space(*container, x, y);
                consumed |= dispatch_touch(*container, event, local_x, local_y, contact_index);
            }
            return consumed;
        }

        chain.iter().rev().any(|container| {
            let (local_x, local_y) = to_content_space(*container, x, y);
            dispatch_touch(*container, event, local_x, local_y, contact_index)
        })
    }

    /// Topmost visible control under a window-space point.
    pub fn control_at(&self, x: f32, y: f32) -> Option<&dyn Control> {
        if !self.root.is_visible() || !self.root.absolute_bounds().contains_xy(x, y) {
            return None;
        }

        let mut hit: &dyn Control = &self.root;
        let mut current: &dyn Container = &self.root;
        loop {
            let Some(child) = topmost_child_at(current, x, y) else {
                return Some(hit);
            };
            hit = child;
            match child.as_container() {
                Some(nested) => current = nested,
                None => return Some(hit),
            }
        }
    }

    /// Child indices from the root to the deepest visible container under
    /// the point.
    fn hit_path(&self, x: i32, y: i32) -> Vec<usize> {
        let (x, y) = (x as f32, y as f32);
        let mut path = Vec::new();
        if !self.root.absolute_bounds().contains_xy(x, y) {
            return path;
        }

        let mut current: &dyn Container = &self.root;
        while let Some(index) = topmost_child_index_at(current, x, y) {
            let Some(nested) = current.children().nth(index).and_then(|child| child.as_container())
            else {
                break;
            };
            path.push(index);
            current = nested;
        }
        path
    }
}

/// The root followed by each container along `path`. Stops early if the
/// tree changed since the path was captured.
fn container_chain<'a>(root: &'a dyn Container, path: &[usize]) -> Vec<&'a dyn Container> {
    let mut chain = vec![root];
    let mut current = root;
    for &index in path {
        let Some(next) = current.children().nth(index).and_then(|child| child.as_container()) else {
            tracing::debug!("captured touch path no longer matches the tree");
            break;
        };
        chain.push(next);
        current = next;
    }
    chain
}

fn topmost_child_index_at(container: &dyn Container, x: f32, y: f32) -> Option<usize> {
    let children: Vec<&dyn Control> = container.children().collect();
    children
        .iter()
        .rposition(|child| child.is_visible() && child.absolute_bounds().contains_xy(x, y))
}

fn topmost_child_at<'a>(container: &'a dyn Container, x: f32, y: f32) -> Option<&'a dyn Control> {
    let index = topmost_child_index_at(container, x, y)?;
    container.children().nth(index)
}

/// Window coordinates relative to the container's content-area origin.
fn to_content_space(container: &dyn Container, x: i32, y: i32) -> (i32, i32) {
    let absolute = container.absolute_bounds();
    let content = container.content_bounds();
    (
        (x as f32 - absolute.x - content.x).round() as i32,
        (y as f32 - absolute.y - content.y).round() as i32,
    )
}
