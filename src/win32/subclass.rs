use log::debug;
use tokio::sync::mpsc::UnboundedSender;
use windows::Win32::{
    Foundation::{HWND, LPARAM, LRESULT, WPARAM},
    UI::{
        Shell::{DefSubclassProc, RemoveWindowSubclass, SetWindowSubclass, THBN_CLICKED},
        WindowsAndMessaging::{WM_COMMAND, WM_NCDESTROY},
    },
};

use crate::{channel::Notification, Result};

const SUBCLASS_ID: usize = 0x7462;

/// Hooks `hwnd` so toolbar clicks are forwarded to `notifications`. Must
/// run on the thread that owns the window.
pub(crate) fn install(hwnd: HWND, notifications: UnboundedSender<Notification>) -> Result<()> {
    let sender = Box::into_raw(Box::new(notifications));
    let installed: bool =
        unsafe { SetWindowSubclass(hwnd, Some(subclass_proc), SUBCLASS_ID, sender as usize) }
            .into();
    if !installed {
        drop(unsafe { Box::from_raw(sender) });
        return Err("Could not subclass window".into());
    }
    Ok(())
}

unsafe extern "system" fn subclass_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
    _: usize,
    refdata: usize,
) -> LRESULT {
    let sender = refdata as *mut UnboundedSender<Notification>;
    match msg {
        WM_COMMAND if HIWORD!(wparam.0) as u32 == THBN_CLICKED => {
            let index = LOWORD!(wparam.0) as usize;
            if (*sender)
                .send(Notification::ButtonClicked { index })
                .is_err()
            {
                debug!("Click on button {index} after dispatcher stopped");
            }
            return LRESULT(0);
        }
        WM_NCDESTROY => {
            let _ = RemoveWindowSubclass(hwnd, Some(subclass_proc), SUBCLASS_ID);
            drop(Box::from_raw(sender));
        }
        _ => {}
    }
    DefSubclassProc(hwnd, msg, wparam, lparam)
}
