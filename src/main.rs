#[cfg(windows)]
mod appwindow;
#[cfg(windows)]
mod demo;

#[cfg(windows)]
fn main() -> taskbar_bridge::Result<()> {
    use log::info;
    use std::sync::Arc;
    use taskbar_bridge::{win32::channel::ShellChannel, Config, IconResolver, Taskbar};

    use crate::appwindow::AppWindow;

    let config = Config::load_default()?.load_or_create_user_config()?;
    match config.log_file() {
        Some(log_file) => simple_logging::log_to_file(log_file, config.level_filter())?,
        None => simple_logging::log_to_stderr(config.level_filter()),
    }
    info!("Starting {}", env!("CARGO_PKG_NAME"));

    let resolver = IconResolver::from_config(&config)?;
    let window = AppWindow::new()?;
    let (channel, notifications) = ShellChannel::attach(window.hwnd())?;
    let taskbar = Arc::new(Taskbar::new(channel));

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.spawn(taskbar.dispatcher().run(notifications));
    runtime.spawn(demo::run(
        Arc::clone(&taskbar),
        resolver,
        config.tooltip().to_owned(),
        window.taskbar_ready(),
    ));

    window.handle_messages()?;
    info!("Message loop finished");
    runtime.shutdown_background();
    Ok(())
}

#[cfg(not(windows))]
fn main() {
    eprintln!(
        "{} drives the Windows taskbar and only runs on Windows",
        env!("CARGO_PKG_NAME")
    );
    std::process::exit(1);
}
