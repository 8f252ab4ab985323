//! Edit scripts: a JSON array of uploads and editor events.
//!
//! ```json
//! [
//!   { "upload": { "slot": "background", "path": "photo.jpg" } },
//!   { "upload": { "slot": "logo", "path": "logo.png" } },
//!   { "type": "set_number", "data": { "field": "position_x", "raw": "120" } },
//!   { "type": "rotate_by", "data": { "degrees": 90 } }
//! ]
//! ```
//!
//! Relative upload paths resolve against the script's directory.

use std::path::{Path, PathBuf};

use overlay_core::{AssetSlot, EditorEvent};
use overlay_renderer::{EditorSession, RenderError};
use serde::{Deserialize, Serialize};

/// An upload step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadStep {
    /// Target slot.
    pub slot: AssetSlot,
    /// Image file.
    pub path: PathBuf,
}

/// One step of a script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScriptStep {
    /// Upload an image file.
    Upload {
        /// What to upload.
        upload: UploadStep,
    },
    /// Apply an editor event.
    Event(EditorEvent),
}

/// Outcome of a replay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayReport {
    /// Steps applied.
    pub applied: usize,
    /// Steps rejected with a notice and skipped.
    pub rejected: usize,
}

/// Parse a script.
///
/// # Errors
///
/// Returns an error if the JSON is not a list of steps.
pub fn parse_script(json: &str) -> serde_json::Result<Vec<ScriptStep>> {
    serde_json::from_str(json)
}

/// Apply `steps` to `session` in order.
///
/// A rejected step is logged as a notice and skipped, the way the editor
/// shows a notice and carries on. Any other failure aborts the replay.
///
/// # Errors
///
/// Returns I/O, raster and encoding errors.
pub fn replay(
    session: &mut EditorSession,
    steps: &[ScriptStep],
    base_dir: &Path,
) -> Result<ReplayReport, RenderError> {
    let mut report = ReplayReport::default();
    for (index, step) in steps.iter().enumerate() {
        let result = match step {
            ScriptStep::Upload { upload } => {
                let path = base_dir.join(&upload.path);
                session.upload_file(upload.slot, &path).map(|_| ())
            }
            ScriptStep::Event(event) => session.dispatch(event).map(|_| ()),
        };
        match result {
            Ok(()) => report.applied += 1,
            Err(notice @ (RenderError::Overlay(_) | RenderError::AssetEvent(_))) => {
                tracing::warn!(step = index, %notice, "step rejected");
                report.rejected += 1;
            }
            Err(e) => return Err(e),
        }
    }
    tracing::info!(
        applied = report.applied,
        rejected = report.rejected,
        "script replayed"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use overlay_core::NumericField;

    #[test]
    fn test_parse_mixed_steps() {
        let steps = parse_script(
            r#"[
                {"upload": {"slot": "logo", "path": "logo.png"}},
                {"type": "set_number", "data": {"field": "width", "raw": "120"}},
                {"type": "pointer_up"}
            ]"#,
        )
        .expect("parse");
        assert_eq!(
            steps,
            vec![
                ScriptStep::Upload {
                    upload: UploadStep {
                        slot: AssetSlot::Logo,
                        path: PathBuf::from("logo.png"),
                    },
                },
                ScriptStep::Event(EditorEvent::SetNumber {
                    field: NumericField::Width,
                    raw: "120".to_string(),
                }),
                ScriptStep::Event(EditorEvent::PointerUp),
            ]
        );
    }

    #[test]
    fn test_unknown_step_is_a_parse_error() {
        assert!(parse_script(r#"[{"type": "explode"}]"#).is_err());
        assert!(parse_script(r#"{"type": "pointer_up"}"#).is_err());
    }

    #[test]
    fn test_rejected_steps_are_skipped() {
        let mut session = EditorSession::default();
        let steps = parse_script(
            r#"[
                {"upload": {"slot": "logo", "path": "logo.gif"}},
                {"type": "decode_failed", "data": {"slot": "logo", "reason": "truncated"}},
                {"type": "asset_decoded", "data": {"slot": "logo", "info": {"format": "png", "width": 50, "height": 50}}},
                {"type": "rotate_by", "data": {"degrees": 90}}
            ]"#,
        )
        .expect("parse");
        let report = replay(&mut session, &steps, Path::new(".")).expect("replay");
        assert_eq!(report, ReplayReport { applied: 1, rejected: 3 });
        assert_eq!(session.state().transform.rotation, 90);
        assert!(session.state().logo.is_none());
    }

    #[test]
    fn test_missing_file_aborts() {
        let mut session = EditorSession::default();
        let steps = parse_script(r#"[{"upload": {"slot": "background", "path": "nope.png"}}]"#)
            .expect("parse");
        let err = replay(&mut session, &steps, Path::new("/definitely/not/here")).unwrap_err();
        assert!(matches!(err, RenderError::Io(_)));
    }
}
