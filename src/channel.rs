use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{request::Request, Result};

/// Transport to the platform shell.
///
/// `invoke` resolves once the shell has acknowledged the request; a
/// rejection comes back as `Error::NativeCallFailed`.
#[async_trait]
pub trait NativeChannel: Send + Sync {
    async fn invoke(&self, request: Request) -> Result<()>;
}

#[async_trait]
impl<C: NativeChannel + ?Sized> NativeChannel for Arc<C> {
    async fn invoke(&self, request: Request) -> Result<()> {
        (**self).invoke(request).await
    }
}

#[async_trait]
impl<C: NativeChannel + ?Sized> NativeChannel for Box<C> {
    async fn invoke(&self, request: Request) -> Result<()> {
        (**self).invoke(request).await
    }
}

/// Unsolicited message from the shell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum Notification {
    /// The toolbar button at `index` was activated.
    ButtonClicked { index: usize },
}


#[cfg(test)]
mod tests {
    use super::{mock::RecordingChannel, *};
    use crate::Error;

    #[tokio::test]
    async fn shared_channel_forwards_requests() {
        let channel = Arc::new(RecordingChannel::default());
        let shared: Box<dyn NativeChannel> = Box::new(Arc::clone(&channel));
        shared.invoke(Request::progress(1, 2)).await.unwrap();
        assert_eq!(channel.requests(), vec![Request::progress(1, 2)]);
    }

    #[tokio::test]
    async fn rejection_names_the_method() {
        let channel = RecordingChannel::default();
        channel.fail_next(true);
        let err = channel
            .invoke(Request::thumbnail_tooltip("busy"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::NativeCallFailed { method: "SetThumbnailTooltip", .. }
        ));
    }

    #[test]
    fn click_notification_wire_shape() {
        let notification: Notification =
            serde_json::from_str(r#"{"event":"ButtonClicked","index":4}"#).unwrap();
        assert_eq!(notification, Notification::ButtonClicked { index: 4 });
    }
}
