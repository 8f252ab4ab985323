//! An [`EditorState`] bound to a [`PointerHost`].
//!
//! The editor forwards every [`PointerCapture`] to the host and releases a
//! live capture when it is dropped, so global pointer listeners never
//! outlive the drag (or the editor) that needed them.

use crate::drag::{PointerCapture, PointerHost};
use crate::event::{EditorEvent, Transition};
use crate::{EditorState, OverlayResult};

/// Editor state plus the host that owns its pointer listeners.
#[derive(Debug)]
pub struct Editor<H: PointerHost> {
    state: EditorState,
    host: H,
    captured: bool,
}

impl<H: PointerHost> Editor<H> {
    /// A fresh editor driving `host`.
    #[must_use]
    pub fn new(host: H) -> Self {
        Self::with_state(EditorState::new(), host)
    }

    /// Resume from a saved state. Any drag recorded in it is ended, since
    /// the host holds no listeners for it.
    #[must_use]
    pub fn with_state(mut state: EditorState, host: H) -> Self {
        state.end_drag();
        Self {
            state,
            host,
            captured: false,
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &EditorState {
        &self.state
    }

    /// The pointer host.
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the pointer host.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Whether the host currently has listeners attached.
    #[must_use]
    pub fn is_capturing(&self) -> bool {
        self.captured
    }

    /// Apply an event and sync the host's listeners with the result.
    ///
    /// # Errors
    ///
    /// Propagates the notice from [`EditorState::apply`].
    pub fn dispatch(&mut self, event: &EditorEvent) -> OverlayResult<Transition> {
        let transition = self.state.apply(event)?;
        self.sync_capture(transition.capture);
        Ok(transition)
    }

    /// End any drag and detach listeners.
    pub fn release(&mut self) {
        let transition = self.state.end_drag();
        self.sync_capture(transition.capture);
        // A host that acquired without a matching state drag still gets detached.
        if self.captured {
            self.host.detach();
            self.captured = false;
        }
    }

    /// Tear the editor down, returning its final state.
    #[must_use]
    pub fn into_state(mut self) -> EditorState {
        self.release();
        std::mem::take(&mut self.state)
    }

    fn sync_capture(&mut self, capture: PointerCapture) {
        match capture {
            PointerCapture::Acquire if !self.captured => {
                self.host.attach();
                self.captured = true;
            }
            PointerCapture::Release if self.captured => {
                self.host.detach();
                self.captured = false;
            }
            _ => {}
        }
    }
}

impl<H: PointerHost> Drop for Editor<H> {
    fn drop(&mut self) {
        if self.captured {
            tracing::debug!("editor dropped mid-drag, detaching pointer listeners");
            self.release();
        }
    }
}
