use log::info;
use windows::{
    core::HSTRING,
    Win32::{
        Foundation::HWND,
        UI::{
            Shell::{
                ITaskbarList3, TaskbarList as TaskbarList_ID, TBPFLAG, THBF_HIDDEN, THB_FLAGS,
                THB_ICON, THB_TOOLTIP, THUMBBUTTON, THUMBBUTTONFLAGS,
            },
            WindowsAndMessaging::HICON,
        },
    },
};

use crate::Result;

pub struct TaskbarList(ITaskbarList3);

impl TaskbarList {
    pub fn new() -> Result<Self> {
        use windows::Win32::System::Com::{CoCreateInstance, CLSCTX_ALL};
        info!("Instantiate TaskbarList");
        let taskbarlist: ITaskbarList3 =
            unsafe { CoCreateInstance(&TaskbarList_ID, None, CLSCTX_ALL)? };
        unsafe { taskbarlist.HrInit()? };
        Ok(Self(taskbarlist))
    }

    pub fn set_progress_state(&self, hwnd: HWND, mode: i32) -> windows::core::Result<()> {
        unsafe { self.0.SetProgressState(hwnd, TBPFLAG(mode as _)) }
    }

    pub fn set_progress_value(
        &self,
        hwnd: HWND,
        completed: u64,
        total: u64,
    ) -> windows::core::Result<()> {
        unsafe { self.0.SetProgressValue(hwnd, completed, total) }
    }

    pub fn thumb_bar_add_buttons(
        &self,
        hwnd: HWND,
        pbutton: &[THUMBBUTTON],
    ) -> windows::core::Result<()> {
        unsafe { self.0.ThumbBarAddButtons(hwnd, pbutton) }
    }

    pub fn thumb_bar_update_buttons(
        &self,
        hwnd: HWND,
        pbutton: &[THUMBBUTTON],
    ) -> windows::core::Result<()> {
        unsafe { self.0.ThumbBarUpdateButtons(hwnd, pbutton) }
    }

    pub fn set_thumbnail_tooltip(&self, hwnd: HWND, tooltip: &str) -> windows::core::Result<()> {
        unsafe { self.0.SetThumbnailTooltip(hwnd, &HSTRING::from(tooltip)) }
    }

    /// `HICON::default()` removes the overlay.
    pub fn set_overlay_icon(
        &self,
        hwnd: HWND,
        icon: HICON,
        description: &str,
    ) -> windows::core::Result<()> {
        unsafe { self.0.SetOverlayIcon(hwnd, icon, &HSTRING::from(description)) }
    }
}

pub fn thumb_button(id: u32, icon: HICON, tooltip: &str, flags: u32) -> THUMBBUTTON {
    let mut button = THUMBBUTTON {
        dwMask: THB_ICON | THB_TOOLTIP | THB_FLAGS,
        iId: id,
        hIcon: icon,
        dwFlags: THUMBBUTTONFLAGS(flags as _),
        ..Default::default()
    };
    // Leave room for the terminating nul.
    let limit = button.szTip.len() - 1;
    for (slot, unit) in button.szTip.iter_mut().zip(tooltip.encode_utf16().take(limit)) {
        *slot = unit;
    }
    button
}

pub fn hidden_thumb_button(id: u32) -> THUMBBUTTON {
    THUMBBUTTON {
        dwMask: THB_FLAGS,
        iId: id,
        dwFlags: THBF_HIDDEN,
        ..Default::default()
    }
}
