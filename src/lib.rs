#[macro_export]
macro_rules! has_flag {
    ($value:expr, $flag:expr) => {
        ($value & $flag) != 0
    };
}

#[macro_export]
macro_rules! LOWORD {
    ($value:expr) => {
        ($value & 0xffff) as u16
    };
}

#[macro_export]
macro_rules! HIWORD {
    ($value:expr) => {
        (($value >> 16) & 0xffff) as u16
    };
}

pub mod button;
pub mod channel;
pub mod config;
pub mod dispatch;
pub mod flash;
pub mod icon;
pub mod progress;
pub mod registry;
pub mod request;
pub mod taskbar;
#[cfg(windows)]
pub mod win32;

pub use button::{ButtonMode, ThumbnailButton};
pub use channel::{NativeChannel, Notification};
pub use config::Config;
pub use dispatch::EventDispatcher;
pub use flash::FlashMode;
pub use icon::{IconAsset, IconResolver};
pub use progress::ProgressMode;
pub use registry::{ButtonRegistry, MAX_THUMBNAIL_BUTTONS};
pub use request::Request;
pub use taskbar::Taskbar;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid icon asset {asset:?}: {reason}")]
    InvalidIconAsset { asset: String, reason: String },
    #[error("a thumbnail toolbar holds at most 7 buttons, got {0}")]
    TooManyButtons(usize),
    #[error("native call {method} failed: {message}")]
    NativeCallFailed {
        method: &'static str,
        message: String,
    },
    #[error("{0}")]
    Platform(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Config(#[from] serde_yaml::Error),
}

impl Error {
    pub fn native(method: &'static str, message: impl ToString) -> Self {
        Error::NativeCallFailed {
            method,
            message: message.to_string(),
        }
    }
}

impl std::convert::From<&str> for Error {
    fn from(err: &str) -> Self {
        Error::Platform(String::from(err))
    }
}

#[cfg(windows)]
impl std::convert::From<windows::core::Error> for Error {
    fn from(err: windows::core::Error) -> Self {
        Error::Platform(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    #[test]
    fn word_macros_split_command_parameter() {
        let wparam: usize = (0x1800 << 16) | 0x0003;
        assert_eq!(HIWORD!(wparam), 0x1800);
        assert_eq!(LOWORD!(wparam), 3);
    }

    #[test]
    fn has_flag_checks_any_shared_bit() {
        assert!(has_flag!(0b0110u32, 0b0010u32));
        assert!(!has_flag!(0b0100u32, 0b0011u32));
    }
}
