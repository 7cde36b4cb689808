use std::{sync::Arc, time::Duration};

use log::{info, warn};
use tokio::sync::Mutex;

use crate::{
    button::ThumbnailButton,
    channel::NativeChannel,
    dispatch::EventDispatcher,
    flash::FlashMode,
    icon::IconAsset,
    progress::ProgressMode,
    registry::ButtonRegistry,
    request::Request,
    Result,
};

/// Controls the taskbar presentation of one window.
///
/// Local checks run before anything is sent; the button registry only
/// changes after the shell has acknowledged the new toolbar.
pub struct Taskbar<C> {
    channel: C,
    registry: Arc<ButtonRegistry>,
    installing: Mutex<()>,
}

impl<C: NativeChannel> Taskbar<C> {
    /// Bridge backed by the process-wide button registry.
    pub fn new(channel: C) -> Self {
        Self::with_registry(channel, ButtonRegistry::global())
    }

    pub fn with_registry(channel: C, registry: Arc<ButtonRegistry>) -> Self {
        Taskbar {
            channel,
            registry,
            installing: Mutex::new(()),
        }
    }

    pub fn registry(&self) -> &Arc<ButtonRegistry> {
        &self.registry
    }

    pub fn dispatcher(&self) -> EventDispatcher {
        EventDispatcher::new(Arc::clone(&self.registry))
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }

    pub async fn set_progress_mode(&self, mode: ProgressMode) -> Result<()> {
        self.send(Request::progress_mode(mode)).await
    }

    pub async fn set_progress(&self, completed: u64, total: u64) -> Result<()> {
        self.send(Request::progress(completed, total)).await
    }

    /// Replaces the toolbar. Button `i` is reported back as index `i`.
    pub async fn set_thumbnail_toolbar(&self, buttons: Vec<ThumbnailButton>) -> Result<()> {
        ButtonRegistry::check_capacity(buttons.len())?;
        let request = Request::thumbnail_toolbar(&buttons);
        // Held across the shell round trip so installs commit in send order.
        let _installing = self.installing.lock().await;
        self.send(request).await?;
        let generation = self.registry.replace(buttons)?;
        info!("Thumbnail toolbar generation {generation} is live");
        Ok(())
    }

    pub async fn clear_thumbnail_toolbar(&self) -> Result<()> {
        self.set_thumbnail_toolbar(Vec::new()).await
    }

    pub async fn set_thumbnail_tooltip(&self, tooltip: &str) -> Result<()> {
        self.send(Request::thumbnail_tooltip(tooltip)).await
    }

    pub async fn set_flash_taskbar_app_icon(
        &self,
        mode: FlashMode,
        flash_count: u32,
        timeout: Duration,
    ) -> Result<()> {
        self.send(Request::flash(mode, flash_count, timeout)).await
    }

    pub async fn stop_flashing_taskbar_app_icon(&self) -> Result<()> {
        self.send(Request::stop_flashing()).await
    }

    pub async fn set_overlay_icon(&self, icon: &IconAsset, description: &str) -> Result<()> {
        self.send(Request::overlay_icon(Some(icon), description)).await
    }

    pub async fn reset_overlay_icon(&self) -> Result<()> {
        self.send(Request::overlay_icon(None, "")).await
    }

    async fn send(&self, request: Request) -> Result<()> {
        let method = request.method();
        self.channel.invoke(request).await.map_err(|err| {
            warn!("{method} was rejected: {err}");
            err
        })
    }
}
