use log::{error, info};
use std::sync::{Arc, OnceLock};
use tokio::sync::Notify;
use windows::core::w;
use windows::Win32::{
    Foundation::{HINSTANCE, HWND, LPARAM, LRESULT, WPARAM},
    Graphics::Gdi::{COLOR_WINDOW, HBRUSH},
    UI::WindowsAndMessaging::{
        CreateWindowExW, CW_USEDEFAULT, WINDOW_EX_STYLE, WM_DESTROY, WNDCLASSW,
        WS_OVERLAPPEDWINDOW,
    },
};

use taskbar_bridge::{win32, Result};

static TASKBAR_BUTTON_CREATED: OnceLock<u32> = OnceLock::new();
static TASKBAR_READY: OnceLock<Arc<Notify>> = OnceLock::new();

pub struct AppWindow {
    hwnd: HWND,
}

impl AppWindow {
    pub fn new() -> Result<Self> {
        let instance: HINSTANCE = win32::get_module_handle()?.into();
        let windows_class = w!("taskbar-bridge.window");
        let wc = WNDCLASSW {
            hInstance: instance,
            hbrBackground: HBRUSH((COLOR_WINDOW.0 + 1) as isize),
            lpszClassName: windows_class,
            lpfnWndProc: Some(Self::wnd_proc),
            ..Default::default()
        };
        if win32::register_class(&wc) == 0 {
            error!("Could not register class");
            return Err("Could not register class".into());
        }
        let _ = TASKBAR_BUTTON_CREATED
            .set(win32::register_window_messagew(w!("TaskbarButtonCreated")));
        let hwnd = unsafe {
            CreateWindowExW(
                WINDOW_EX_STYLE::default(),
                windows_class,
                w!("taskbar-bridge"),
                WS_OVERLAPPEDWINDOW,
                CW_USEDEFAULT,
                CW_USEDEFAULT,
                CW_USEDEFAULT,
                CW_USEDEFAULT,
                None,
                None,
                instance,
                None,
            )
        };
        if hwnd.0 == 0 {
            error!("Could not create window");
            return Err("Could not create window".into());
        }
        win32::show_window(hwnd);
        Ok(Self { hwnd })
    }

    pub fn hwnd(&self) -> HWND {
        self.hwnd
    }

    /// Notified when the shell creates this window's taskbar button; taskbar
    /// calls made before that are rejected.
    pub fn taskbar_ready(&self) -> Arc<Notify> {
        Arc::clone(TASKBAR_READY.get_or_init(Default::default))
    }

    pub fn handle_messages(&self) -> Result<&Self> {
        use windows::Win32::UI::WindowsAndMessaging::{
            DispatchMessageW, GetMessageW, TranslateMessage, MSG,
        };
        let mut message = MSG::default();
        unsafe {
            while GetMessageW(&mut message, HWND(0), 0, 0).into() {
                TranslateMessage(&message);
                DispatchMessageW(&message);
            }
        }
        Ok(self)
    }

    extern "system" fn wnd_proc(hwnd: HWND, msg: u32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
        if msg == WM_DESTROY {
            info!("Received WM_DESTROY message");
            win32::post_quit_message(0);
            return LRESULT(0);
        }
        if TASKBAR_BUTTON_CREATED.get() == Some(&msg) {
            info!("Taskbar button created");
            TASKBAR_READY
                .get_or_init(Default::default)
                .notify_one();
            return LRESULT(0);
        }
        win32::def_window_proc(hwnd, msg, wparam, lparam)
    }
}
