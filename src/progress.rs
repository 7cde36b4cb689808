use serde::{Deserialize, Serialize};

/// Visual state overlaid on the taskbar icon.
///
/// The discriminants are the values the shell expects and are part of the
/// public contract.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
#[repr(i32)]
pub enum ProgressMode {
    #[default]
    None = 0x0,
    Indeterminate = 0x1,
    Normal = 0x2,
    Error = 0x4,
    Paused = 0x8,
}

impl ProgressMode {
    pub fn value(self) -> i32 {
        self as i32
    }
}

impl From<ProgressMode> for i32 {
    fn from(mode: ProgressMode) -> i32 {
        mode.value()
    }
}

impl std::convert::TryFrom<i32> for ProgressMode {
    type Error = i32;
    fn try_from(value: i32) -> std::result::Result<Self, i32> {
        match value {
            0x0 => Ok(ProgressMode::None),
            0x1 => Ok(ProgressMode::Indeterminate),
            0x2 => Ok(ProgressMode::Normal),
            0x4 => Ok(ProgressMode::Error),
            0x8 => Ok(ProgressMode::Paused),
            other => Err(other),
        }
    }
}
