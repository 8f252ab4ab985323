//! # logo-overlay
//!
//! Headless front end for the logo overlay compositor.
//!
//! ## Usage
//!
//! ```bash
//! logo-overlay compose --background photo.jpg --logo logo.png --x 120 --y 40
//! logo-overlay preview --background photo.jpg --logo logo.png --output preview.svg
//! logo-overlay replay edits.json --dump-state
//! ```
//!
//! ## Architecture
//!
//! - `CliArgs` - Command-line arguments parsed with clap
//! - `OverlayConfig` - Output location and label font, built from the arguments
//! - `script` - JSON edit scripts replayed through an `EditorSession`
//! - `commands` - One function per subcommand

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod commands;
pub mod script;

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use overlay_core::{AnchorMode, EditorEvent, NumericField, EXPORT_FILE_NAME};
use overlay_renderer::{CompositeExporter, EditorSession, TextRenderer, DEFAULT_FONT_FAMILY};

/// Command-line arguments for logo-overlay.
#[derive(Debug, Clone, Parser)]
#[command(name = "logo-overlay")]
#[command(about = "Place, rotate and label a logo on a background image")]
#[command(version)]
pub struct CliArgs {
    /// Directory for outputs given without a directory
    #[arg(long, global = true, env = "LOGO_OVERLAY_OUT_DIR")]
    pub out_dir: Option<PathBuf>,

    /// Font family list for the size label
    #[arg(long, global = true, env = "LOGO_OVERLAY_FONT", default_value = DEFAULT_FONT_FAMILY)]
    pub font_family: String,

    /// Skip loading system fonts (label text is then not drawn)
    #[arg(long, global = true)]
    pub no_system_fonts: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Compose a logo onto a background and write the PNG
    Compose(ComposeArgs),
    /// Write the editor preview as SVG
    Preview(PreviewArgs),
    /// Replay a JSON edit script and export the result
    Replay(ReplayArgs),
}

/// Logo and label settings shared by `compose` and `preview`.
///
/// Numbers are taken as typed and coerced like the editor's form fields.
#[derive(Debug, Clone, Default, Args)]
pub struct EditArgs {
    /// Logo X position in preview pixels
    #[arg(long, allow_hyphen_values = true)]
    pub x: Option<String>,

    /// Logo Y position in preview pixels
    #[arg(long, allow_hyphen_values = true)]
    pub y: Option<String>,

    /// Logo width in preview pixels (overrides the auto-fit)
    #[arg(long, allow_hyphen_values = true)]
    pub width: Option<String>,

    /// Logo height in preview pixels (overrides the auto-fit)
    #[arg(long, allow_hyphen_values = true)]
    pub height: Option<String>,

    /// Clockwise rotation in degrees
    #[arg(long, allow_hyphen_values = true)]
    pub rotation: Option<String>,

    /// Hide the size label
    #[arg(long)]
    pub no_label: bool,

    /// Label anchor: below, above, left, right or custom
    #[arg(long)]
    pub anchor: Option<AnchorMode>,

    /// Custom label X in preview pixels
    #[arg(long, allow_hyphen_values = true)]
    pub label_x: Option<String>,

    /// Custom label Y in preview pixels
    #[arg(long, allow_hyphen_values = true)]
    pub label_y: Option<String>,

    /// Label font size in preview pixels
    #[arg(long)]
    pub font_size: Option<String>,

    /// Label text color
    #[arg(long)]
    pub color: Option<String>,

    /// Label box color
    #[arg(long)]
    pub label_background: Option<String>,
}

impl EditArgs {
    /// Editor events equivalent to these settings, in form order.
    #[must_use]
    pub fn events(&self) -> Vec<EditorEvent> {
        let numbers = [
            (NumericField::PositionX, &self.x),
            (NumericField::PositionY, &self.y),
            (NumericField::Width, &self.width),
            (NumericField::Height, &self.height),
            (NumericField::Rotation, &self.rotation),
            (NumericField::FontSize, &self.font_size),
            (NumericField::LabelX, &self.label_x),
            (NumericField::LabelY, &self.label_y),
        ];

        let mut events: Vec<EditorEvent> = numbers
            .into_iter()
            .filter_map(|(field, raw)| {
                raw.as_ref().map(|raw| EditorEvent::SetNumber {
                    field,
                    raw: raw.clone(),
                })
            })
            .collect();

        if self.no_label {
            events.push(EditorEvent::SetLabelVisible { visible: false });
        }
        if let Some(anchor) = self.anchor {
            events.push(EditorEvent::SetLabelAnchor { anchor });
        }
        if let Some(color) = &self.color {
            events.push(EditorEvent::SetLabelColor {
                color: color.clone(),
            });
        }
        if let Some(color) = &self.label_background {
            events.push(EditorEvent::SetLabelBackground {
                color: color.clone(),
            });
        }
        events
    }
}

/// Arguments for `compose`.
#[derive(Debug, Clone, Args)]
pub struct ComposeArgs {
    /// Background image (PNG, JPG or WebP)
    #[arg(long)]
    pub background: PathBuf,

    /// Logo image (PNG, JPG or WebP)
    #[arg(long)]
    pub logo: PathBuf,

    /// Output PNG path
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Logo and label settings
    #[command(flatten)]
    pub edit: EditArgs,
}

/// Arguments for `preview`.
#[derive(Debug, Clone, Args)]
pub struct PreviewArgs {
    /// Background image (PNG, JPG or WebP)
    #[arg(long)]
    pub background: PathBuf,

    /// Logo image (PNG, JPG or WebP)
    #[arg(long)]
    pub logo: Option<PathBuf>,

    /// Hide the alignment grid
    #[arg(long)]
    pub no_grid: bool,

    /// Output SVG path
    #[arg(long, short, default_value = "preview.svg")]
    pub output: PathBuf,

    /// Logo and label settings
    #[command(flatten)]
    pub edit: EditArgs,
}

/// Arguments for `replay`.
#[derive(Debug, Clone, Args)]
pub struct ReplayArgs {
    /// JSON edit script
    pub script: PathBuf,

    /// Output PNG path
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Print the final editor state as JSON
    #[arg(long)]
    pub dump_state: bool,
}

/// Runtime configuration.
#[derive(Debug, Clone)]
pub struct OverlayConfig {
    /// Directory for outputs given without a directory.
    pub out_dir: PathBuf,
    /// Default export file name.
    pub file_name: String,
    /// Label font family list.
    pub font_family: String,
    /// Whether to load system fonts for label text.
    pub system_fonts: bool,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl OverlayConfig {
    /// Create a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            out_dir: PathBuf::from("."),
            file_name: EXPORT_FILE_NAME.to_string(),
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            system_fonts: true,
        }
    }

    /// Where to write an output: `explicit` if given (relative paths land in
    /// `out_dir`), otherwise `out_dir/file_name`.
    #[must_use]
    pub fn output_path(&self, explicit: Option<&Path>) -> PathBuf {
        match explicit {
            Some(path) if path.is_absolute() => path.to_path_buf(),
            Some(path) => self.out_dir.join(path),
            None => self.out_dir.join(&self.file_name),
        }
    }

    /// A fresh editor session using this configuration's fonts.
    #[must_use]
    pub fn session(&self) -> EditorSession {
        let text = if self.system_fonts {
            TextRenderer::with_system_fonts(&self.font_family)
        } else {
            TextRenderer::without_fonts()
        };
        EditorSession::new(CompositeExporter::new(text))
    }
}

impl From<&CliArgs> for OverlayConfig {
    fn from(args: &CliArgs) -> Self {
        Self {
            out_dir: args.out_dir.clone().unwrap_or_else(|| PathBuf::from(".")),
            file_name: EXPORT_FILE_NAME.to_string(),
            font_family: args.font_family.clone(),
            system_fonts: !args.no_system_fonts,
        }
    }
}
