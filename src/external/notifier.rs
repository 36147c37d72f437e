use crate::config::NotifierConfig;
use crate::models::UnlockedAchievement;
use serde_json::json;

/// Hands unlock events to the platform's notification pipeline over a
/// webhook. Delivery is fire-and-forget; failures are logged and never
/// surfaced to the triggering request.
#[derive(Clone)]
pub struct UnlockNotifier {
    client: reqwest::Client,
    webhook_url: Option<String>,
}

impl UnlockNotifier {
    pub fn new(config: NotifierConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            webhook_url: config.unlock_webhook_url,
        }
    }

    pub fn notify_unlocks(&self, user_id: i64, unlocked: &[UnlockedAchievement]) {
        let Some(url) = self.webhook_url.clone() else {
            return;
        };
        if unlocked.is_empty() {
            return;
        }

        let client = self.client.clone();
        let payload = json!({
            "user_id": user_id,
            "achievements": unlocked,
        });

        tokio::spawn(async move {
            match client.post(&url).json(&payload).send().await {
                Ok(resp) if resp.status().is_success() => {}
                Ok(resp) => {
                    log::warn!("Unlock webhook returned {}", resp.status());
                }
                Err(e) => {
                    log::warn!("Failed to deliver unlock webhook: {e}");
                }
            }
        });
    }
}
