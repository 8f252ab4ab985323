//! WebAssembly bindings for overlay-core.
//!
//! A browser host owns the DOM, the file pickers and the image decoder; it
//! forwards user input here as [`EditorEvent`] JSON and renders the
//! [`PreviewLayout`] it gets back.

use wasm_bindgen::prelude::*;

use crate::{ApproxTextMeasurer, Editor, EditorEvent, EditorState, PointerHost, PreviewLayout};

/// Initialize the overlay WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages
    #[cfg(feature = "wasm")]
    console_error_panic_hook::set_once();
}

/// Pointer host backed by two JavaScript callbacks.
#[derive(Debug, Default)]
struct JsPointerHost {
    attach: Option<js_sys::Function>,
    detach: Option<js_sys::Function>,
}

impl PointerHost for JsPointerHost {
    fn attach(&mut self) {
        if let Some(f) = &self.attach {
            if let Err(e) = f.call0(&JsValue::NULL) {
                tracing::warn!("attach callback failed: {e:?}");
            }
        }
    }

    fn detach(&mut self) {
        if let Some(f) = &self.detach {
            if let Err(e) = f.call0(&JsValue::NULL) {
                tracing::warn!("detach callback failed: {e:?}");
            }
        }
    }
}

/// Editor instance for WASM.
#[wasm_bindgen]
pub struct WasmEditor {
    editor: Editor<JsPointerHost>,
}

#[wasm_bindgen]
impl WasmEditor {
    /// Create a new editor.
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new() -> Self {
        Self {
            editor: Editor::new(JsPointerHost::default()),
        }
    }

    /// Register the callbacks that add and remove the document-level
    /// `mousemove`/`mouseup` listeners.
    #[wasm_bindgen(js_name = setPointerHooks)]
    pub fn set_pointer_hooks(&mut self, attach: js_sys::Function, detach: js_sys::Function) {
        let host = self.editor.host_mut();
        host.attach = Some(attach);
        host.detach = Some(detach);
    }

    /// Apply an event given as JSON. Returns whether the state changed.
    ///
    /// # Errors
    ///
    /// Returns the user-visible notice for rejected input, or a parse error.
    #[wasm_bindgen(js_name = applyEventJson)]
    pub fn apply_event_json(&mut self, json: &str) -> Result<bool, String> {
        let event: EditorEvent = serde_json::from_str(json).map_err(|e| e.to_string())?;
        self.editor
            .dispatch(&event)
            .map(|t| t.changed)
            .map_err(|e| e.to_string())
    }

    /// Check an upload's MIME type before reading the file.
    ///
    /// # Errors
    ///
    /// Returns the rejection notice for unsupported types.
    #[wasm_bindgen(js_name = selectUpload)]
    pub fn select_upload(&mut self, slot: &str, mime: &str) -> Result<(), String> {
        let slot = slot.parse()?;
        self.editor
            .dispatch(&EditorEvent::UploadSelected {
                slot,
                mime: mime.to_string(),
            })
            .map(|_| ())
            .map_err(|e| e.to_string())
    }

    /// Get the current state as JSON.
    #[wasm_bindgen(js_name = getStateJson)]
    #[must_use]
    pub fn get_state_json(&self) -> String {
        serde_json::to_string(self.editor.state()).unwrap_or_default()
    }

    /// Get the preview layout as JSON (`null` before a background exists).
    #[wasm_bindgen(js_name = getPreviewJson)]
    #[must_use]
    pub fn get_preview_json(&self) -> String {
        let layout = PreviewLayout::compute(self.editor.state(), &ApproxTextMeasurer::default());
        serde_json::to_string(&layout).unwrap_or_default()
    }

    /// Whether document-level pointer listeners should currently be attached.
    #[wasm_bindgen(js_name = isDragging)]
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.editor.is_capturing()
    }

    /// Current size label text.
    #[wasm_bindgen(js_name = labelText)]
    #[must_use]
    pub fn label_text(&self) -> String {
        self.editor.state().label_text()
    }

    /// Replace the whole state from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error string if JSON parsing fails.
    #[wasm_bindgen(js_name = loadStateJson)]
    pub fn load_state_json(&mut self, json: &str) -> Result<(), String> {
        let state: EditorState = serde_json::from_str(json).map_err(|e| e.to_string())?;
        self.editor.release();
        let host = std::mem::take(self.editor.host_mut());
        self.editor = Editor::with_state(state, host);
        Ok(())
    }
}

impl Default for WasmEditor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wasm_editor_new_is_idle() {
        let editor = WasmEditor::new();
        assert!(!editor.is_dragging());
        assert_eq!(editor.label_text(), "100×100px");
    }

    #[test]
    fn test_preview_is_null_without_background() {
        let editor = WasmEditor::default();
        assert_eq!(editor.get_preview_json(), "null");
    }

    #[test]
    fn test_apply_event_json_changes_state() {
        let mut editor = WasmEditor::new();
        let changed = editor
            .apply_event_json(r#"{"type":"set_grid","data":{"visible":false}}"#)
            .expect("valid event");
        assert!(changed);
        assert!(editor.get_state_json().contains(r#""show_grid":false"#));
    }

    #[test]
    fn test_apply_event_json_rejects_invalid_json() {
        let mut editor = WasmEditor::new();
        assert!(editor.apply_event_json("{ not valid json }").is_err());
        assert!(editor.apply_event_json(r#"{"type":"explode"}"#).is_err());
    }

    #[test]
    fn test_select_upload_rejects_gif() {
        let mut editor = WasmEditor::new();
        let err = editor.select_upload("logo", "image/gif").unwrap_err();
        assert!(err.contains("PNG, JPG, or WebP"));
        assert!(editor.select_upload("background", "image/png").is_ok());
        assert!(editor.select_upload("banner", "image/png").is_err());
    }

    #[test]
    fn test_state_json_roundtrip() {
        let editor1 = WasmEditor::new();
        let json1 = editor1.get_state_json();
        let mut editor2 = WasmEditor::new();
        editor2.load_state_json(&json1).expect("load");
        assert_eq!(json1, editor2.get_state_json());
    }
}
