use log::info;

/// Single-threaded COM apartment for the current thread, released on drop.
pub struct Win32Com;

impl Win32Com {
    pub fn new() -> crate::Result<Self> {
        use windows::Win32::System::Com::{CoInitializeEx, COINIT_APARTMENTTHREADED};
        info!("Initialize COM");
        unsafe {
            CoInitializeEx(None, COINIT_APARTMENTTHREADED).ok()?;
        }
        Ok(Win32Com)
    }
}

impl Drop for Win32Com {
    fn drop(&mut self) {
        use windows::Win32::System::Com::CoUninitialize;
        info!("Uninitializing COM");
        unsafe {
            CoUninitialize();
        }
    }
}
