use std::{sync::Arc, time::Duration};

use log::{error, info};
use tokio::sync::{
    mpsc::{unbounded_channel, UnboundedSender},
    Notify,
};

use taskbar_bridge::{
    win32::channel::ShellChannel, ButtonMode, FlashMode, IconResolver, ProgressMode, Result,
    Taskbar, ThumbnailButton,
};

const TOTAL: u64 = 100;

#[derive(Clone, Copy, Debug)]
enum Command {
    Play,
    Pause,
    Stop,
}

/// Drives a fake job: the toolbar starts, pauses and stops it, progress is
/// shown on the taskbar icon, and the icon flashes when the job finishes.
pub async fn run(
    taskbar: Arc<Taskbar<ShellChannel>>,
    resolver: IconResolver,
    tooltip: String,
    ready: Arc<Notify>,
) {
    ready.notified().await;
    if let Err(err) = showcase(&taskbar, &resolver, &tooltip).await {
        error!("Taskbar demo stopped: {err}");
    }
}

async fn showcase(
    taskbar: &Taskbar<ShellChannel>,
    resolver: &IconResolver,
    tooltip: &str,
) -> Result<()> {
    let (commands, mut received) = unbounded_channel();
    taskbar.set_thumbnail_tooltip(tooltip).await?;
    taskbar
        .set_thumbnail_toolbar(player_buttons(resolver, &commands, true)?)
        .await?;
    taskbar.set_progress_mode(ProgressMode::Normal).await?;

    let mut ticker = tokio::time::interval(Duration::from_millis(100));
    let mut completed = 0;
    let mut playing = true;
    loop {
        tokio::select! {
            Some(command) = received.recv() => {
                info!("{command:?} pressed");
                match command {
                    Command::Play => {
                        playing = true;
                        taskbar.stop_flashing_taskbar_app_icon().await?;
                        taskbar.reset_overlay_icon().await?;
                        taskbar
                            .set_thumbnail_toolbar(player_buttons(resolver, &commands, true)?)
                            .await?;
                        taskbar.set_progress_mode(ProgressMode::Normal).await?;
                    }
                    Command::Pause => {
                        playing = false;
                        taskbar.set_progress_mode(ProgressMode::Paused).await?;
                        taskbar
                            .set_overlay_icon(&resolver.resolve("pause.ico")?, "Paused")
                            .await?;
                    }
                    Command::Stop => {
                        playing = false;
                        completed = 0;
                        taskbar.set_progress_mode(ProgressMode::None).await?;
                        taskbar.reset_overlay_icon().await?;
                        taskbar
                            .set_thumbnail_toolbar(player_buttons(resolver, &commands, false)?)
                            .await?;
                    }
                }
            }
            _ = ticker.tick(), if playing => {
                completed += 1;
                taskbar.set_progress(completed, TOTAL).await?;
                if completed == TOTAL {
                    playing = false;
                    completed = 0;
                    taskbar.set_progress_mode(ProgressMode::None).await?;
                    taskbar
                        .set_flash_taskbar_app_icon(
                            FlashMode::ALL | FlashMode::TIMER_NO_FOREGROUND,
                            0,
                            Duration::ZERO,
                        )
                        .await?;
                }
            }
        }
    }
}

/// While stopped only Play is offered, so the toolbar shrinks to one slot.
fn player_buttons(
    resolver: &IconResolver,
    commands: &UnboundedSender<Command>,
    running: bool,
) -> Result<Vec<ThumbnailButton>> {
    let mut layout = vec![("play.ico", "Play", Command::Play)];
    if running {
        layout.push(("pause.ico", "Pause", Command::Pause));
        layout.push(("stop.ico", "Stop", Command::Stop));
    }
    layout
        .into_iter()
        .map(|(icon, tooltip, command)| -> Result<ThumbnailButton> {
            let commands = commands.clone();
            let button = ThumbnailButton::new(resolver.resolve(icon)?, tooltip, move || {
                let _ = commands.send(command);
            });
            Ok(match command {
                Command::Stop => button.with_mode(ButtonMode::DISMISS_ON_CLICK),
                _ => button,
            })
        })
        .collect()
}
