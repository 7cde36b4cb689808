use std::mem::size_of;

use windows::{
    core::{HSTRING, PCWSTR},
    Win32::{
        Foundation::{HINSTANCE, HMODULE, HWND, LPARAM, LRESULT, WPARAM},
        System::LibraryLoader::GetModuleHandleA,
        UI::WindowsAndMessaging::{
            DefWindowProcW, DestroyIcon, FlashWindowEx, LoadImageW, PostQuitMessage,
            RegisterClassW, RegisterWindowMessageW, ShowWindow, FLASHWINFO, FLASHWINFO_FLAGS,
            HICON, IMAGE_ICON, LR_DEFAULTSIZE, LR_LOADFROMFILE, SW_SHOWNORMAL, WNDCLASSW,
        },
    },
};

pub mod channel;
pub mod com;
pub(crate) mod subclass;
pub mod taskbar;

pub fn get_module_handle() -> windows::core::Result<HMODULE> {
    unsafe { GetModuleHandleA(None) }
}

pub fn register_class(wc: *const WNDCLASSW) -> u16 {
    unsafe { RegisterClassW(wc) }
}

pub fn register_window_messagew(s: PCWSTR) -> u32 {
    unsafe { RegisterWindowMessageW(s) }
}

pub fn show_window(hwnd: HWND) -> bool {
    unsafe { ShowWindow(hwnd, SW_SHOWNORMAL).into() }
}

pub fn def_window_proc(hwnd: HWND, msg: u32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) }
}

pub fn post_quit_message(msg: i32) {
    unsafe { PostQuitMessage(msg) }
}

/// Returns whether the window was active before the call; this is not an
/// error indicator.
pub fn flash_window(hwnd: HWND, flags: u32, count: u32, timeout: u32) -> bool {
    let info = FLASHWINFO {
        cbSize: size_of::<FLASHWINFO>() as u32,
        hwnd,
        dwFlags: FLASHWINFO_FLAGS(flags as _),
        uCount: count,
        dwTimeout: timeout,
    };
    unsafe { FlashWindowEx(&info).into() }
}

pub fn load_icon_from_file(path: &str) -> windows::core::Result<HICON> {
    let handle = unsafe {
        LoadImageW(
            HINSTANCE::default(),
            &HSTRING::from(path),
            IMAGE_ICON,
            0,
            0,
            LR_LOADFROMFILE | LR_DEFAULTSIZE,
        )?
    };
    Ok(HICON(handle.0))
}

pub fn destroy_icon(icon: HICON) {
    unsafe {
        let _ = DestroyIcon(icon);
    }
}
