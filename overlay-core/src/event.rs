//! Input events for the editor and what applying them produced.

use serde::{Deserialize, Serialize};

use crate::drag::PointerCapture;
use crate::label::AnchorMode;
use crate::layout::MIN_LOGO_SIZE;
use crate::{AssetInfo, AssetSlot, ImageFormat};

/// Numeric form controls. Each one coerces free text the same way a browser
/// number input followed by `parseInt(..) || default` would.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericField {
    /// Logo X position.
    PositionX,
    /// Logo Y position.
    PositionY,
    /// Logo width.
    Width,
    /// Logo height.
    Height,
    /// Logo rotation in degrees.
    Rotation,
    /// Label font size.
    FontSize,
    /// Custom label X.
    LabelX,
    /// Custom label Y.
    LabelY,
}

impl NumericField {
    /// Value used when the input is empty, unparseable or zero.
    #[must_use]
    pub fn fallback(self) -> i32 {
        match self {
            Self::Width | Self::Height => 10,
            Self::FontSize => 12,
            Self::PositionX | Self::PositionY | Self::Rotation | Self::LabelX | Self::LabelY => 0,
        }
    }

    /// Coerce raw input into this field's value. Never fails.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub fn coerce(self, raw: &str) -> i32 {
        let value = match parse_leading_int(raw) {
            Some(0) | None => self.fallback(),
            Some(v) => v,
        };
        match self {
            Self::Width | Self::Height => value.max(MIN_LOGO_SIZE as i32),
            Self::FontSize => value.max(1),
            _ => value,
        }
    }
}

/// Parse an optional sign followed by leading digits, ignoring anything
/// after them (`"12px"` is 12). Saturates instead of overflowing.
#[must_use]
pub fn parse_leading_int(raw: &str) -> Option<i32> {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let magnitude = digits[..end].bytes().fold(0i64, |acc, b| {
        (acc * 10 + i64::from(b - b'0')).min(i64::from(i32::MAX) + 1)
    });
    let signed = if negative { -magnitude } else { magnitude };
    Some(i32::try_from(signed).unwrap_or(if negative { i32::MIN } else { i32::MAX }))
}

/// All input events the editor can receive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum EditorEvent {
    /// A file was picked for a slot. Validated synchronously; on success the
    /// host is asked to decode it.
    UploadSelected {
        /// Target slot.
        slot: AssetSlot,
        /// MIME type reported for the file.
        mime: String,
    },

    /// The host finished decoding an accepted upload.
    AssetDecoded {
        /// Target slot.
        slot: AssetSlot,
        /// Decoded image size and format.
        info: AssetInfo,
    },

    /// The host failed to decode an accepted upload.
    DecodeFailed {
        /// Target slot.
        slot: AssetSlot,
        /// Decoder message.
        reason: String,
    },

    /// The preview container moved; its top-left corner in client space.
    ContainerMoved {
        /// Client X of the container origin.
        x: f32,
        /// Client Y of the container origin.
        y: f32,
    },

    /// Pointer pressed, in client space.
    PointerDown {
        /// Client X.
        x: f32,
        /// Client Y.
        y: f32,
    },

    /// Pointer moved, in client space.
    PointerMove {
        /// Client X.
        x: f32,
        /// Client Y.
        y: f32,
    },

    /// Pointer released anywhere.
    PointerUp,

    /// Pointer interaction aborted by the host.
    PointerCancel,

    /// A numeric control changed.
    SetNumber {
        /// Which control.
        field: NumericField,
        /// Raw text as typed.
        raw: String,
    },

    /// Quick-rotate button (usually ±90).
    RotateBy {
        /// Degrees to add, clockwise positive.
        degrees: i32,
    },

    /// Reset rotation to 0.
    ResetRotation,

    /// Toggle the grid overlay.
    SetGrid {
        /// New visibility.
        visible: bool,
    },

    /// Toggle the size label.
    SetLabelVisible {
        /// New visibility.
        visible: bool,
    },

    /// Change the label anchor mode.
    SetLabelAnchor {
        /// New anchor.
        anchor: AnchorMode,
    },

    /// Change the label text color.
    SetLabelColor {
        /// CSS color string.
        color: String,
    },

    /// Change the label box fill.
    SetLabelBackground {
        /// CSS color string.
        color: String,
    },
}

/// A decode the host should start after an accepted upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeRequest {
    /// Target slot.
    pub slot: AssetSlot,
    /// Format established from the MIME type.
    pub format: ImageFormat,
}

/// Outcome of applying one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Transition {
    /// Whether any state changed.
    pub changed: bool,
    /// What the host must do with its global pointer listeners.
    pub capture: PointerCapture,
    /// Decode to start, after an accepted upload.
    pub decode: Option<DecodeRequest>,
}

impl Transition {
    /// Nothing happened.
    #[must_use]
    pub fn unchanged() -> Self {
        Self::default()
    }

    /// State changed; no side effects.
    #[must_use]
    pub fn changed() -> Self {
        Self {
            changed: true,
            ..Self::default()
        }
    }
}
