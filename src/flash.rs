use std::ops::BitOr;

use serde::{Deserialize, Serialize};

/// Flash behaviour for the taskbar icon and window caption.
///
/// `STOP` carries no bits and therefore cannot be combined with anything:
/// or-ing it into another mode is a no-op, and a mode equal to `STOP` ends
/// flashing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlashMode(u32);

impl FlashMode {
    pub const STOP: FlashMode = FlashMode(0);
    pub const CAPTION: FlashMode = FlashMode(1);
    pub const TRAY: FlashMode = FlashMode(2);
    pub const ALL: FlashMode = FlashMode(3);
    pub const TIMER: FlashMode = FlashMode(4);
    /// Flash until the window comes to the foreground.
    pub const TIMER_NO_FOREGROUND: FlashMode = FlashMode(12);

    pub const fn from_bits(bits: u32) -> Self {
        FlashMode(bits)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub fn is_stop(self) -> bool {
        self.0 == Self::STOP.0
    }

    pub fn contains(self, other: FlashMode) -> bool {
        !other.is_stop() && (self.0 & other.0) == other.0
    }
}

impl BitOr for FlashMode {
    type Output = FlashMode;
    fn bitor(self, rhs: FlashMode) -> FlashMode {
        FlashMode(self.0 | rhs.0)
    }
}
