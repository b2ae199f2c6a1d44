//! Outbound notifications.
//!
//! A [`Notifier`] delivers one decorated payload to the outside world. The
//! only transport shipped is [`UrlPathNotifier`], which appends the payload to
//! an endpoint URL and issues a GET.

pub mod url_path;

pub use url_path::UrlPathNotifier;

use crate::error::Result;
use async_trait::async_trait;

/// Delivers a decorated event to a remote endpoint.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Send one payload. No retries are attempted on failure.
    async fn notify(&self, payload: &str) -> Result<()>;
}

#[async_trait]
impl<N: Notifier + ?Sized> Notifier for Box<N> {
    async fn notify(&self, payload: &str) -> Result<()> {
        (**self).notify(payload).await
    }
}
