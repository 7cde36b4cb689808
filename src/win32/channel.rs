use std::{sync::mpsc, thread};

use async_trait::async_trait;
use log::{debug, error, info};
use tokio::sync::{
    mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender},
    oneshot,
};
use windows::Win32::{Foundation::HWND, UI::WindowsAndMessaging::HICON};

use crate::{
    channel::{NativeChannel, Notification},
    registry::MAX_THUMBNAIL_BUTTONS,
    request::{ButtonPayload, Request},
    win32::{
        self,
        com::Win32Com,
        subclass,
        taskbar::{hidden_thumb_button, thumb_button, TaskbarList},
    },
    Error, Result,
};

struct Job {
    request: Request,
    reply: oneshot::Sender<Result<()>>,
}

/// Native channel backed by `ITaskbarList3`.
///
/// Requests run in order on a dedicated thread that owns the COM objects;
/// toolbar clicks on the window come back as notifications.
pub struct ShellChannel {
    jobs: UnboundedSender<Job>,
}

impl ShellChannel {
    /// Connects to the taskbar button of `hwnd`. Call this on the thread
    /// that owns the window so its messages can be intercepted.
    pub fn attach(hwnd: HWND) -> Result<(Self, UnboundedReceiver<Notification>)> {
        let (jobs, queue) = unbounded_channel();
        let (ready_tx, ready_rx) = mpsc::channel();
        let raw_hwnd = hwnd.0;
        thread::Builder::new()
            .name("taskbar-shell".into())
            .spawn(move || shell_thread(HWND(raw_hwnd), queue, ready_tx))?;
        ready_rx
            .recv()
            .map_err(|_| Error::from("Shell thread exited during startup"))??;

        let (notifications, notification_rx) = unbounded_channel();
        subclass::install(hwnd, notifications)?;
        info!("Attached to taskbar button of {hwnd:?}");
        Ok((ShellChannel { jobs }, notification_rx))
    }
}

#[async_trait]
impl NativeChannel for ShellChannel {
    async fn invoke(&self, request: Request) -> Result<()> {
        let method = request.method();
        let (reply, response) = oneshot::channel();
        self.jobs
            .send(Job { request, reply })
            .map_err(|_| Error::native(method, "shell thread has stopped"))?;
        response
            .await
            .map_err(|_| Error::native(method, "shell thread dropped the request"))?
    }
}

fn shell_thread(hwnd: HWND, mut queue: UnboundedReceiver<Job>, ready: mpsc::Sender<Result<()>>) {
    let started = Win32Com::new().and_then(|com| Ok((com, TaskbarList::new()?)));
    let (_com, taskbar) = match started {
        Ok(started) => {
            let _ = ready.send(Ok(()));
            started
        }
        Err(err) => {
            error!("Could not start shell thread: {err}");
            let _ = ready.send(Err(err));
            return;
        }
    };
    let mut shell = Shell {
        hwnd,
        taskbar,
        toolbar_added: false,
        toolbar_icons: Vec::new(),
    };
    while let Some(Job { request, reply }) = queue.blocking_recv() {
        let method = request.method();
        let result = shell.execute(request).map_err(|err| {
            error!("{method} failed: {err}");
            Error::native(method, err)
        });
        if reply.send(result).is_err() {
            debug!("Caller of {method} went away before the reply");
        }
    }
    info!("Shell thread stopping");
}

struct Shell {
    hwnd: HWND,
    taskbar: TaskbarList,
    toolbar_added: bool,
    toolbar_icons: Vec<HICON>,
}

impl Shell {
    fn execute(&mut self, request: Request) -> windows::core::Result<()> {
        match request {
            Request::SetProgressMode { mode } => self.taskbar.set_progress_state(self.hwnd, mode),
            Request::SetProgress { completed, total } => {
                self.taskbar.set_progress_value(self.hwnd, completed, total)
            }
            Request::SetThumbnailToolbar { buttons } => self.set_toolbar(&buttons),
            Request::SetThumbnailTooltip { tooltip } => {
                self.taskbar.set_thumbnail_tooltip(self.hwnd, &tooltip)
            }
            Request::SetFlashTaskbar {
                mode,
                flash_count,
                timeout_milliseconds,
            } => {
                win32::flash_window(self.hwnd, mode, flash_count, timeout_milliseconds);
                Ok(())
            }
            Request::SetOverlayIcon { icon, description } => {
                self.set_overlay(icon.as_deref(), &description)
            }
        }
    }

    /// The shell only accepts one `ThumbBarAddButtons` per window, so every
    /// slot is added up front and unused ones stay hidden.
    fn set_toolbar(&mut self, buttons: &[ButtonPayload]) -> windows::core::Result<()> {
        let mut icons = Vec::with_capacity(buttons.len());
        for button in buttons {
            match win32::load_icon_from_file(&button.icon) {
                Ok(icon) => icons.push(icon),
                Err(err) => {
                    icons.into_iter().for_each(win32::destroy_icon);
                    return Err(err);
                }
            }
        }
        let slots: Vec<_> = (0..MAX_THUMBNAIL_BUTTONS)
            .map(|id| match (buttons.get(id), icons.get(id)) {
                (Some(button), Some(&icon)) => {
                    thumb_button(id as u32, icon, &button.tooltip, button.mode)
                }
                _ => hidden_thumb_button(id as u32),
            })
            .collect();
        let (taskbar, hwnd) = (&self.taskbar, self.hwnd);
        let res = install_slots(
            &mut self.toolbar_added,
            || taskbar.thumb_bar_add_buttons(hwnd, &slots),
            || taskbar.thumb_bar_update_buttons(hwnd, &slots),
        );
        match res {
            Ok(()) => {
                let previous = std::mem::replace(&mut self.toolbar_icons, icons);
                previous.into_iter().for_each(win32::destroy_icon);
                Ok(())
            }
            Err(err) => {
                icons.into_iter().for_each(win32::destroy_icon);
                Err(err)
            }
        }
    }

    fn set_overlay(&self, icon: Option<&str>, description: &str) -> windows::core::Result<()> {
        let hicon = match icon {
            Some(path) => win32::load_icon_from_file(path)?,
            None => HICON::default(),
        };
        // The taskbar keeps its own copy of the overlay.
        let res = self.taskbar.set_overlay_icon(self.hwnd, hicon, description);
        if icon.is_some() {
            win32::destroy_icon(hicon);
        }
        res
    }
}

/// Updates the slots added earlier, or adds them when the button has none.
/// A restarted Explorer recreates the taskbar button without our slots, so a
/// rejected update falls back to adding them again.
fn install_slots<E>(
    added: &mut bool,
    add: impl FnOnce() -> std::result::Result<(), E>,
    update: impl FnOnce() -> std::result::Result<(), E>,
) -> std::result::Result<(), E> {
    if *added {
        if update().is_ok() {
            return Ok(());
        }
        debug!("Toolbar update rejected, adding the slots again");
    }
    add()?;
    *added = true;
    Ok(())
}

impl Drop for Shell {
    fn drop(&mut self) {
        self.toolbar_icons.drain(..).for_each(win32::destroy_icon);
    }
}

#[cfg(test)]
mod tests {
    use super::install_slots;
    use std::cell::Cell;

    #[test]
    fn first_install_adds_slots() {
        let mut added = false;
        let res: Result<(), ()> = install_slots(&mut added, || Ok(()), || panic!("no slots yet"));
        assert!(res.is_ok());
        assert!(added);
    }

    #[test]
    fn later_installs_update_slots() {
        let mut added = true;
        let res: Result<(), ()> =
            install_slots(&mut added, || panic!("slots exist"), || Ok(()));
        assert!(res.is_ok());
    }

    #[test]
    fn recreated_button_gets_slots_again() {
        let mut added = true;
        let adds = Cell::new(0);
        let res: Result<(), ()> = install_slots(
            &mut added,
            || {
                adds.set(adds.get() + 1);
                Ok(())
            },
            || Err(()),
        );
        assert!(res.is_ok());
        assert_eq!(adds.get(), 1);
        assert!(added);
    }

    #[test]
    fn failed_add_leaves_slots_missing() {
        let mut added = false;
        let res = install_slots(&mut added, || Err("rejected"), || Ok(()));
        assert_eq!(res, Err("rejected"));
        assert!(!added);
    }
}
