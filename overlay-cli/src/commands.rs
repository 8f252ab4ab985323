//! Subcommand implementations.

use std::path::{Path, PathBuf};

use anyhow::Context;
use overlay_core::{AssetSlot, EditorEvent};
use overlay_renderer::EditorSession;

use crate::script::{self, ReplayReport};
use crate::{ComposeArgs, EditArgs, OverlayConfig, PreviewArgs, ReplayArgs};

fn apply_edits(session: &mut EditorSession, edit: &EditArgs) -> anyhow::Result<()> {
    for event in edit.events() {
        session
            .dispatch(&event)
            .with_context(|| format!("applying {event:?}"))?;
    }
    Ok(())
}

fn upload(session: &mut EditorSession, slot: AssetSlot, path: &Path) -> anyhow::Result<()> {
    let info = session
        .upload_file(slot, path)
        .with_context(|| format!("loading {slot} image {}", path.display()))?;
    tracing::info!(
        %slot,
        width = info.width,
        height = info.height,
        path = %path.display(),
        "image loaded"
    );
    Ok(())
}

fn write_output(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating output directory {}", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "output written");
    Ok(())
}

fn export_to(
    session: &EditorSession,
    config: &OverlayConfig,
    output: Option<&Path>,
) -> anyhow::Result<PathBuf> {
    let exported = session.export().context("exporting composite")?;
    let path = config.output_path(output);
    write_output(&path, &exported.png)?;
    Ok(path)
}

/// `compose`: background + logo + settings → PNG. Returns the written path.
///
/// # Errors
///
/// Returns an error if an image cannot be loaded or the output cannot be
/// written.
pub fn compose(config: &OverlayConfig, args: &ComposeArgs) -> anyhow::Result<PathBuf> {
    let mut session = config.session();
    upload(&mut session, AssetSlot::Background, &args.background)?;
    upload(&mut session, AssetSlot::Logo, &args.logo)?;
    apply_edits(&mut session, &args.edit)?;
    export_to(&session, config, args.output.as_deref())
}

/// `preview`: write the editor preview as SVG. Returns the written path.
///
/// # Errors
///
/// Returns an error if an image cannot be loaded or the output cannot be
/// written.
pub fn preview(config: &OverlayConfig, args: &PreviewArgs) -> anyhow::Result<PathBuf> {
    let mut session = config.session();
    upload(&mut session, AssetSlot::Background, &args.background)?;
    if let Some(logo) = &args.logo {
        upload(&mut session, AssetSlot::Logo, logo)?;
    }
    if args.no_grid {
        session.dispatch(&EditorEvent::SetGrid { visible: false })?;
    }
    apply_edits(&mut session, &args.edit)?;

    let svg = session.preview_svg().context("rendering preview")?;
    let path = config.output_path(Some(&args.output));
    write_output(&path, svg.as_bytes())?;
    Ok(path)
}

/// Result of `replay`.
#[derive(Debug)]
pub struct ReplayOutcome {
    /// Step counts.
    pub report: ReplayReport,
    /// Final editor state as pretty JSON, when requested.
    pub state_json: Option<String>,
    /// Written composite, if a background was loaded.
    pub output: Option<PathBuf>,
}

/// `replay`: run a script, then export if a background was loaded.
///
/// # Errors
///
/// Returns an error if the script cannot be read or parsed, a step fails
/// for a reason other than a user notice, or the output cannot be written.
pub fn replay(config: &OverlayConfig, args: &ReplayArgs) -> anyhow::Result<ReplayOutcome> {
    let json = std::fs::read_to_string(&args.script)
        .with_context(|| format!("reading script {}", args.script.display()))?;
    let steps = script::parse_script(&json)
        .with_context(|| format!("parsing script {}", args.script.display()))?;
    let base_dir = args.script.parent().unwrap_or_else(|| Path::new("."));

    let mut session = config.session();
    let report = script::replay(&mut session, &steps, base_dir)?;

    let output = if session.state().background.is_some() {
        Some(export_to(&session, config, args.output.as_deref())?)
    } else {
        tracing::warn!("script loaded no background; nothing exported");
        None
    };

    let state_json = if args.dump_state {
        Some(serde_json::to_string_pretty(session.state()).context("serializing state")?)
    } else {
        None
    };

    Ok(ReplayOutcome {
        report,
        state_json,
        output,
    })
}
