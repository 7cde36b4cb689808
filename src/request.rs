use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{
    button::ThumbnailButton, flash::FlashMode, icon::IconAsset, progress::ProgressMode,
};

/// One toolbar slot as it crosses into the shell layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonPayload {
    pub icon: String,
    pub tooltip: String,
    pub mode: u32,
}

/// A request for the shell layer. Every field is a plain value so the
/// payload can be queued, logged or serialized as-is.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", content = "arguments", rename_all_fields = "camelCase")]
pub enum Request {
    SetProgressMode {
        mode: i32,
    },
    SetProgress {
        completed: u64,
        total: u64,
    },
    SetThumbnailToolbar {
        buttons: Vec<ButtonPayload>,
    },
    SetThumbnailTooltip {
        tooltip: String,
    },
    SetFlashTaskbar {
        mode: u32,
        flash_count: u32,
        timeout_milliseconds: u32,
    },
    SetOverlayIcon {
        icon: Option<String>,
        description: String,
    },
}

impl Request {
    pub fn progress_mode(mode: ProgressMode) -> Self {
        Request::SetProgressMode { mode: mode.value() }
    }

    /// `total == 0` is passed through; the shell decides what it means.
    pub fn progress(completed: u64, total: u64) -> Self {
        Request::SetProgress { completed, total }
    }

    /// Slots keep the order of `buttons`; the position is the click id.
    pub fn thumbnail_toolbar<'a>(buttons: impl IntoIterator<Item = &'a ThumbnailButton>) -> Self {
        let buttons = buttons
            .into_iter()
            .map(|button| ButtonPayload {
                icon: icon_path(button.icon()),
                tooltip: button.tooltip().to_owned(),
                mode: button.mode().bits(),
            })
            .collect();
        Request::SetThumbnailToolbar { buttons }
    }

    pub fn thumbnail_tooltip(tooltip: &str) -> Self {
        Request::SetThumbnailTooltip {
            tooltip: tooltip.to_owned(),
        }
    }

    /// Timeouts beyond `u32::MAX` milliseconds saturate.
    pub fn flash(mode: FlashMode, flash_count: u32, timeout: Duration) -> Self {
        Request::SetFlashTaskbar {
            mode: mode.bits(),
            flash_count,
            timeout_milliseconds: u32::try_from(timeout.as_millis()).unwrap_or(u32::MAX),
        }
    }

    pub fn stop_flashing() -> Self {
        Request::flash(FlashMode::STOP, 0, Duration::ZERO)
    }

    pub fn overlay_icon(icon: Option<&IconAsset>, description: &str) -> Self {
        Request::SetOverlayIcon {
            icon: icon.map(icon_path),
            description: description.to_owned(),
        }
    }

    pub fn method(&self) -> &'static str {
        match self {
            Request::SetProgressMode { .. } => "SetProgressMode",
            Request::SetProgress { .. } => "SetProgress",
            Request::SetThumbnailToolbar { .. } => "SetThumbnailToolbar",
            Request::SetThumbnailTooltip { .. } => "SetThumbnailTooltip",
            Request::SetFlashTaskbar { .. } => "SetFlashTaskbar",
            Request::SetOverlayIcon { .. } => "SetOverlayIcon",
        }
    }
}

fn icon_path(icon: &IconAsset) -> String {
    icon.path().to_string_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::button::{
        tests::{counting_button, fixture_icons},
        ButtonMode,
    };
    use serde_json::json;
    use std::sync::{atomic::AtomicUsize, Arc};

    #[test]
    fn progress_mode_encodes_shell_value() {
        assert_eq!(
            Request::progress_mode(ProgressMode::Paused),
            Request::SetProgressMode { mode: 8 }
        );
    }

    #[test]
    fn zero_total_passes_through() {
        assert_eq!(
            Request::progress(0, 0),
            Request::SetProgress {
                completed: 0,
                total: 0
            }
        );
    }

    #[test]
    fn toolbar_keeps_button_order() {
        let (dir, resolver) = fixture_icons();
        let counter = Arc::new(AtomicUsize::new(0));
        let buttons = vec![
            counting_button(&resolver, "c", &counter),
            counting_button(&resolver, "a", &counter).with_mode(ButtonMode::DISABLED),
            counting_button(&resolver, "b", &counter),
        ];
        let request = Request::thumbnail_toolbar(&buttons);
        let Request::SetThumbnailToolbar { buttons: payload } = request else {
            panic!("expected a toolbar request");
        };
        let tooltips: Vec<_> = payload.iter().map(|b| b.tooltip.as_str()).collect();
        assert_eq!(tooltips, ["C", "A", "B"]);
        assert_eq!(payload[1].mode, 0x1);
        assert_eq!(
            payload[0].icon,
            dir.path().join("c.ico").to_string_lossy()
        );
    }

    #[test]
    fn empty_toolbar_is_valid() {
        assert_eq!(
            Request::thumbnail_toolbar(&Vec::<ThumbnailButton>::new()),
            Request::SetThumbnailToolbar { buttons: vec![] }
        );
    }

    #[test]
    fn stop_flashing_clears_every_field() {
        assert_eq!(
            Request::stop_flashing(),
            Request::SetFlashTaskbar {
                mode: 0,
                flash_count: 0,
                timeout_milliseconds: 0
            }
        );
    }

    #[test]
    fn flash_timeout_saturates() {
        let request = Request::flash(FlashMode::TRAY, 1, Duration::from_secs(u64::MAX));
        assert!(matches!(
            request,
            Request::SetFlashTaskbar {
                timeout_milliseconds: u32::MAX,
                ..
            }
        ));
    }

    #[test]
    fn payload_is_flat_camel_case() {
        let request = Request::flash(FlashMode::CAPTION, 3, Duration::from_millis(250));
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "method": "SetFlashTaskbar",
                "arguments": { "mode": 1, "flashCount": 3, "timeoutMilliseconds": 250 }
            })
        );
        let tooltip = Request::thumbnail_tooltip("");
        assert_eq!(
            serde_json::to_value(&tooltip).unwrap(),
            json!({ "method": "SetThumbnailTooltip", "arguments": { "tooltip": "" } })
        );
    }

    #[test]
    fn reset_overlay_has_no_icon() {
        let request = Request::overlay_icon(None, "");
        assert_eq!(request.method(), "SetOverlayIcon");
        assert_eq!(
            serde_json::to_value(&request).unwrap()["arguments"]["icon"],
            serde_json::Value::Null
        );
    }
}
