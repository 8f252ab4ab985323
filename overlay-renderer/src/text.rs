//! Label text: measuring with real fonts and drawing through resvg.

use std::fmt::Write;
use std::sync::Arc;

use overlay_core::{ApproxTextMeasurer, LabelBox, Size, TextMeasurer};

use crate::error::{RenderError, RenderResult};

/// Font family used when none is configured.
pub const DEFAULT_FONT_FAMILY: &str = "Arial, Helvetica, sans-serif";

/// Faces tried, in order, for the generic `sans-serif` family when the
/// database's default is not installed.
const SANS_SERIF_CANDIDATES: [&str; 8] = [
    "Arial",
    "Helvetica",
    "Liberation Sans",
    "DejaVu Sans",
    "Noto Sans",
    "Roboto",
    "FreeSans",
    "Verdana",
];

/// Shared font database and family for label text.
pub struct TextRenderer {
    options: usvg::Options<'static>,
    family: String,
    fallback: ApproxTextMeasurer,
}

impl std::fmt::Debug for TextRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextRenderer")
            .field("family", &self.family)
            .field("faces", &self.options.fontdb.len())
            .finish_non_exhaustive()
    }
}

impl TextRenderer {
    /// Load the system fonts and use `family` for labels.
    #[must_use]
    pub fn with_system_fonts(family: &str) -> Self {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        tracing::debug!(faces = db.len(), family, "font database loaded");
        Self::with_database(db, family)
    }

    /// Use an already populated font database.
    ///
    /// Generic `sans-serif` and `serif` are pointed at installed faces when
    /// their defaults are missing, so a family list ending in a generic
    /// family always resolves.
    #[must_use]
    pub fn with_database(mut db: usvg::fontdb::Database, family: &str) -> Self {
        resolve_generic_families(&mut db);
        Self {
            options: usvg::Options {
                fontdb: Arc::new(db),
                ..usvg::Options::default()
            },
            family: family.to_string(),
            fallback: ApproxTextMeasurer::default(),
        }
    }

    /// A renderer without fonts: measurements are estimates and no glyphs
    /// are drawn.
    #[must_use]
    pub fn without_fonts() -> Self {
        Self::with_database(usvg::fontdb::Database::new(), DEFAULT_FONT_FAMILY)
    }

    /// Whether any font faces are available.
    #[must_use]
    pub fn has_fonts(&self) -> bool {
        !self.options.fontdb.is_empty()
    }

    /// Configured font family list.
    #[must_use]
    pub fn family(&self) -> &str {
        &self.family
    }

    /// SVG fragment for a label box: rounded rect plus its text.
    #[must_use]
    pub fn label_svg(&self, label: &LabelBox, font_weight: Option<u16>) -> String {
        let mut svg = String::with_capacity(256);
        let r = &label.rect;
        let _ = write!(
            svg,
            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" rx=\"{}\" fill=\"{}\"/>",
            r.x,
            r.y,
            r.width,
            r.height,
            label.corner_radius,
            escape_xml(&label.background),
        );
        let origin = label.text_origin();
        let _ = write!(
            svg,
            "<text x=\"{}\" y=\"{}\" font-size=\"{}\" font-family=\"{}\" fill=\"{}\" dominant-baseline=\"hanging\"",
            origin.x,
            origin.y,
            label.font_size,
            escape_xml(&self.family),
            escape_xml(&label.color),
        );
        if let Some(weight) = font_weight {
            let _ = write!(svg, " font-weight=\"{weight}\"");
        }
        let _ = write!(svg, ">{}</text>", escape_xml(&label.text));
        svg
    }

    /// Draw a label box onto `pixmap`, which is in the label's space.
    ///
    /// # Errors
    ///
    /// Returns an error if the generated SVG cannot be parsed.
    pub fn draw_label(&self, label: &LabelBox, pixmap: &mut tiny_skia::Pixmap) -> RenderResult<()> {
        let svg = format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\">{}</svg>",
            pixmap.width(),
            pixmap.height(),
            self.label_svg(label, None),
        );
        let tree = usvg::Tree::from_str(&svg, &self.options)
            .map_err(|e| RenderError::Raster(format!("label SVG parsing failed: {e}")))?;
        if self.has_fonts()
            && self
                .measure_with_fonts(&label.text, label.font_size)
                .is_none()
        {
            tracing::warn!(
                family = %self.family,
                text = %label.text,
                "label text matched no installed font; drawing box only"
            );
        }
        resvg::render(&tree, tiny_skia::Transform::identity(), &mut pixmap.as_mut());
        Ok(())
    }

    fn measure_with_fonts(&self, text: &str, font_size: f32) -> Option<f32> {
        if !self.has_fonts() {
            return None;
        }
        let svg = format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"1\" height=\"1\"><text x=\"0\" y=\"0\" font-size=\"{font_size}\" font-family=\"{}\">{}</text></svg>",
            escape_xml(&self.family),
            escape_xml(text),
        );
        let tree = usvg::Tree::from_str(&svg, &self.options).ok()?;
        if !tree.root().has_children() {
            return None;
        }
        let width = tree.root().bounding_box().width();
        (width > 0.0).then_some(width)
    }
}

impl TextMeasurer for TextRenderer {
    fn measure(&self, text: &str, font_size: f32) -> Size {
        match self.measure_with_fonts(text, font_size) {
            Some(width) => Size::new(width, font_size),
            None => self.fallback.measure(text, font_size),
        }
    }
}

fn has_family(db: &usvg::fontdb::Database, name: &str) -> bool {
    db.faces()
        .any(|face| face.families.iter().any(|(family, _)| family == name))
}

/// First installed sans face: a known name, then any proportional face, then
/// any face at all.
fn installed_sans_family(db: &usvg::fontdb::Database) -> Option<String> {
    if let Some(name) = SANS_SERIF_CANDIDATES
        .iter()
        .find(|name| has_family(db, name))
    {
        return Some((*name).to_string());
    }
    db.faces()
        .find(|face| !face.monospaced)
        .or_else(|| db.faces().next())
        .and_then(|face| face.families.first())
        .map(|(family, _)| family.clone())
}

fn resolve_generic_families(db: &mut usvg::fontdb::Database) {
    if db.is_empty() {
        return;
    }
    let sans_missing = !has_family(db, db.family_name(&usvg::fontdb::Family::SansSerif));
    let serif_missing = !has_family(db, db.family_name(&usvg::fontdb::Family::Serif));
    if !sans_missing && !serif_missing {
        return;
    }
    let Some(fallback) = installed_sans_family(db) else {
        return;
    };
    if sans_missing {
        tracing::debug!(family = %fallback, "sans-serif mapped to installed face");
        db.set_sans_serif_family(fallback.clone());
    }
    if serif_missing {
        tracing::debug!(family = %fallback, "serif mapped to installed face");
        db.set_serif_family(fallback);
    }
}

/// Escape special XML characters.
#[must_use]
pub fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
