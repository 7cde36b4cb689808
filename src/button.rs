use std::{fmt, ops::BitOr};

use serde::{Deserialize, Serialize};

use crate::icon::IconAsset;

/// Display flags for a thumbnail toolbar button. The bit values are the
/// ones the shell expects.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u32", from = "u32")]
pub struct ButtonMode(u32);

impl ButtonMode {
    pub const ENABLED: ButtonMode = ButtonMode(0x0);
    pub const DISABLED: ButtonMode = ButtonMode(0x1);
    pub const DISMISS_ON_CLICK: ButtonMode = ButtonMode(0x2);
    pub const NO_BACKGROUND: ButtonMode = ButtonMode(0x4);
    pub const NON_INTERACTIVE: ButtonMode = ButtonMode(0x10);

    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Keeps only the bits callers may set; the shell reserves 0x8 for
    /// hiding unused slots.
    pub const fn from_bits_truncate(bits: u32) -> Self {
        ButtonMode(bits & 0x17)
    }

    pub fn contains(self, flag: ButtonMode) -> bool {
        has_flag!(self.0, flag.0)
    }
}

impl From<u32> for ButtonMode {
    fn from(bits: u32) -> Self {
        ButtonMode::from_bits_truncate(bits)
    }
}

impl From<ButtonMode> for u32 {
    fn from(mode: ButtonMode) -> u32 {
        mode.bits()
    }
}

impl BitOr for ButtonMode {
    type Output = ButtonMode;
    fn bitor(self, rhs: ButtonMode) -> ButtonMode {
        ButtonMode(self.0 | rhs.0)
    }
}

pub type ClickHandler = Box<dyn Fn() + Send + Sync + 'static>;

/// One thumbnail toolbar button. Immutable once built.
pub struct ThumbnailButton {
    icon: IconAsset,
    tooltip: String,
    mode: ButtonMode,
    on_click: ClickHandler,
}

impl ThumbnailButton {
    pub fn new<F>(icon: IconAsset, tooltip: impl Into<String>, on_click: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        ThumbnailButton {
            icon,
            tooltip: tooltip.into(),
            mode: ButtonMode::ENABLED,
            on_click: Box::new(on_click),
        }
    }

    pub fn with_mode(self, mode: ButtonMode) -> Self {
        ThumbnailButton { mode, ..self }
    }

    pub fn icon(&self) -> &IconAsset {
        &self.icon
    }

    pub fn tooltip(&self) -> &str {
        &self.tooltip
    }

    pub fn mode(&self) -> ButtonMode {
        self.mode
    }

    pub fn click(&self) {
        (self.on_click)()
    }
}

impl fmt::Debug for ThumbnailButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThumbnailButton")
            .field("icon", &self.icon.id())
            .field("tooltip", &self.tooltip)
            .field("mode", &self.mode)
            .finish()
    }
}
