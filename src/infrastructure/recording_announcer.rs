//! Recording announcer
//!
//! Keeps every announcement in memory. Tests assert against the recorded
//! feed; the demo binary prints it.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::application::ports::outbound::{AnnouncementHandle, AnnouncementPort, Audience};
use crate::domain::value_objects::AnnouncementId;

pub struct RecordingAnnouncer {
    sent: Mutex<Vec<(Audience, String)>>,
}

impl RecordingAnnouncer {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
        }
    }

    /// Everything announced so far, in delivery order.
    pub fn messages(&self) -> Vec<(Audience, String)> {
        self.sent.lock().map(|sent| sent.clone()).unwrap_or_default()
    }

    /// The town-facing feed only.
    pub fn town_feed(&self) -> Vec<String> {
        self.messages()
            .into_iter()
            .filter(|(audience, _)| *audience == Audience::Town)
            .map(|(_, text)| text)
            .collect()
    }
}

impl Default for RecordingAnnouncer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AnnouncementPort for RecordingAnnouncer {
    async fn announce(
        &self,
        audience: Audience,
        text: &str,
    ) -> anyhow::Result<AnnouncementHandle> {
        tracing::debug!(?audience, text, "announcement");
        self.sent
            .lock()
            .map_err(|_| anyhow::anyhow!("announcer lock poisoned"))?
            .push((audience, text.to_string()));
        Ok(AnnouncementHandle(AnnouncementId::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_feed_keeps_delivery_order_and_audience() {
        let announcer = RecordingAnnouncer::new();
        announcer
            .announce(Audience::Town, "first")
            .await
            .unwrap();
        announcer
            .announce(Audience::Storytellers, "quiet")
            .await
            .unwrap();
        announcer.announce(Audience::Town, "second").await.unwrap();

        assert_eq!(announcer.town_feed(), vec!["first", "second"]);
        assert_eq!(announcer.messages().len(), 3);
    }
}
