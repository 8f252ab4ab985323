//! # Overlay Renderer
//!
//! Pixel work for the logo overlay compositor: decoding uploads, rendering
//! the live preview and rasterizing the export.
//!
//! ## Pipeline
//!
//! ```text
//! ┌──────────────┐   ┌──────────────────┐   ┌───────────────────────────┐
//! │ upload bytes │──▶│ asset::decode    │──▶│ EditorSession             │
//! └──────────────┘   │ (sniff + image)  │   │  - Editor<DetachedHost>   │
//!                    └──────────────────┘   │  - background, logo       │
//!                                           └─────┬───────────────┬─────┘
//!                                                 │               │
//!                                      ┌──────────▼─────┐ ┌───────▼──────────┐
//!                                      │ preview (SVG)  │ │ export (PNG)     │
//!                                      │ container size │ │ native size,     │
//!                                      │                │ │ tiny-skia+resvg  │
//!                                      └────────────────┘ └──────────────────┘
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod asset;
pub mod error;
pub mod export;
pub mod preview;
pub mod session;
pub mod text;

pub use asset::{decode_asset, ImageAsset};
pub use error::{RenderError, RenderResult};
pub use export::{CompositeExporter, ExportedImage};
pub use preview::render_preview_svg;
pub use session::EditorSession;
pub use text::{TextRenderer, DEFAULT_FONT_FAMILY};
