//! # Overlay Core
//!
//! Editor logic for the logo overlay compositor: a background image, one logo
//! placed on top of it, and an optional size label. Compiles to WASM so a
//! browser host can drive the same state machine the CLI uses.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │              overlay-core                   │
//! ├─────────────────────────────────────────────┤
//! │  EditorState      │  Input                  │
//! │  - Assets         │  - EditorEvent          │
//! │  - Logo transform │  - Drag session         │
//! │  - Size label     │  - Pointer capture      │
//! ├─────────────────────────────────────────────┤
//! │  Layout (preview space)  │  Composite plan  │
//! │  - Container, grid       │  (native space)  │
//! │  - Label anchoring       │                  │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! Everything here is pure data and geometry. Pixel work (decoding,
//! rasterization, PNG encoding) lives in `overlay-renderer`.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod asset;
pub mod composite;
pub mod drag;
pub mod editor;
pub mod error;
pub mod event;
pub mod intake;
pub mod label;
pub mod layout;
pub mod preview;
pub mod state;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use asset::{AssetInfo, AssetSlot, ImageFormat};
pub use composite::{CompositePlan, EXPORT_FILE_NAME};
pub use drag::{DetachedHost, DragSession, PointerCapture, PointerHost};
pub use editor::Editor;
pub use error::{OverlayError, OverlayResult};
pub use event::{DecodeRequest, EditorEvent, NumericField, Transition};
pub use label::{AnchorMode, ApproxTextMeasurer, LabelBox, LabelStyle, SizeLabel, TextMeasurer};
pub use layout::{Point, Rect, Scale, Size};
pub use preview::{GridOverlay, LogoPlacement, PreviewLayout};
pub use state::{EditorState, LogoTransform};

/// Overlay core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
