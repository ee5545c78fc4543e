//! MVP request gateway (`/api/mvp`)

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Method;
use serde::Serialize;
use serde_json::json;
use tracing::info;

use super::client::ApiClient;
use super::{ListGateway, SaveGateway};
use crate::domain::{Activity, Milestone, MvpCoreUpdate, MvpQuery, MvpRecord};
use crate::error::{GatewayError, GatewayResult};
use crate::listing::{normalize, Page, PageRequest};

#[derive(Debug, Clone)]
pub struct MvpGateway {
    client: ApiClient,
    page_size: u64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AssignBody<'a> {
    assigned_to: Option<&'a str>,
}

impl MvpGateway {
    pub fn new(client: ApiClient, page_size: u64) -> Self {
        Self { client, page_size }
    }

    // ========================
    // Paths
    // ========================

    pub fn list_path() -> &'static str {
        "/api/mvp/get/all/forms"
    }

    pub fn record_path(id: u64) -> String {
        format!("/api/mvp/{}", id)
    }

    pub fn progress_path(id: u64, progress: u8) -> String {
        format!("/api/mvp/{}/progress/{}", id, progress.min(100))
    }

    pub fn assign_path(id: u64) -> String {
        format!("/api/mvp/{}/assign", id)
    }

    pub fn milestones_path(id: u64) -> String {
        format!("/api/mvp/{}/milestones", id)
    }

    pub fn activity_path(id: u64) -> String {
        format!("/api/mvp/{}/activity", id)
    }

    pub fn update_urls_path(id: u64) -> String {
        format!("/api/mvp/{}/update-urls", id)
    }

    // ========================
    // Operations
    // ========================

    /// Fetches MVP requests matching the server-side part of `query`, at the
    /// page it asks for.
    pub async fn list(&self, query: &MvpQuery) -> GatewayResult<Page<MvpRecord>> {
        let request = if query.page.size > 0 {
            query.page
        } else {
            PageRequest::first(self.page_size)
        };
        let body = self.client.get_value(Self::list_path(), &query.to_query_pairs()).await?;
        Ok(normalize(body, request))
    }

    pub async fn update_core(&self, record: &MvpRecord) -> GatewayResult<()> {
        let body = MvpCoreUpdate::from(record);
        self.client
            .send_json(Method::PATCH, &Self::record_path(record.id), Some(&body))
            .await?;
        Ok(())
    }

    /// The value travels in the path; no body is sent.
    pub async fn update_progress(&self, id: u64, progress: u8) -> GatewayResult<()> {
        self.client
            .send_json::<()>(Method::PATCH, &Self::progress_path(id, progress), None)
            .await?;
        Ok(())
    }

    /// `None` clears the assignment.
    pub async fn assign(&self, id: u64, assigned_to: Option<&str>) -> GatewayResult<()> {
        let assigned_to = assigned_to.map(str::trim).filter(|a| !a.is_empty());
        self.client
            .send_json(Method::PATCH, &Self::assign_path(id), Some(&AssignBody { assigned_to }))
            .await?;
        Ok(())
    }

    /// Adds a milestone and returns it as stored. Falls back to the sent
    /// milestone when the backend answers without one.
    pub async fn add_milestone(&self, id: u64, milestone: &Milestone) -> GatewayResult<Milestone> {
        if milestone.title.trim().is_empty() {
            return Err(GatewayError::MissingField("title"));
        }
        if milestone.due_date.trim().is_empty() {
            return Err(GatewayError::MissingField("dueDate"));
        }
        let response = self
            .client
            .send_json(Method::POST, &Self::milestones_path(id), Some(milestone))
            .await?;
        let stored = serde_json::from_value::<Milestone>(response)
            .ok()
            .filter(|m| !m.title.is_empty())
            .unwrap_or_else(|| milestone.clone());
        Ok(stored)
    }

    /// Logs an activity entry, returning it stamped with the local time.
    pub async fn add_activity(&self, id: u64, message: &str) -> GatewayResult<Activity> {
        let message = message.trim();
        if message.is_empty() {
            return Err(GatewayError::MissingField("message"));
        }
        self.client
            .send_json(Method::POST, &Self::activity_path(id), Some(&json!({ "message": message })))
            .await?;
        Ok(Activity {
            id: None,
            message: message.to_string(),
            timestamp: Utc::now().to_rfc3339(),
        })
    }

    pub async fn update_urls(&self, id: u64, live: Option<&str>, demo: Option<&str>) -> GatewayResult<()> {
        self.client
            .send_json(
                Method::POST,
                &Self::update_urls_path(id),
                Some(&json!({ "live": live, "demo": demo })),
            )
            .await?;
        Ok(())
    }
}

#[async_trait(?Send)]
impl ListGateway<MvpRecord> for MvpGateway {
    type Query = MvpQuery;

    async fn list(&self, query: &MvpQuery) -> GatewayResult<Page<MvpRecord>> {
        MvpGateway::list(self, query).await
    }
}

/// Core fields first, then progress and assignment only when they changed.
/// The first failing call aborts the save.
#[async_trait(?Send)]
impl SaveGateway<MvpRecord> for MvpGateway {
    async fn save(&self, original: &MvpRecord, draft: &MvpRecord) -> GatewayResult<MvpRecord> {
        self.update_core(draft).await?;
        if draft.progress != original.progress {
            self.update_progress(draft.id, draft.progress).await?;
        }
        if draft.assigned_to != original.assigned_to {
            self.assign(draft.id, draft.assigned_to.as_deref()).await?;
        }

        let mut confirmed = draft.clone();
        confirmed.touch_now();
        info!("Saved MVP request {}", confirmed.id);
        Ok(confirmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_use_numeric_id() {
        assert_eq!(MvpGateway::record_path(7), "/api/mvp/7");
        assert_eq!(MvpGateway::progress_path(7, 65), "/api/mvp/7/progress/65");
        assert_eq!(MvpGateway::progress_path(7, 180), "/api/mvp/7/progress/100");
        assert_eq!(MvpGateway::assign_path(7), "/api/mvp/7/assign");
        assert_eq!(MvpGateway::milestones_path(7), "/api/mvp/7/milestones");
        assert_eq!(MvpGateway::activity_path(7), "/api/mvp/7/activity");
        assert_eq!(MvpGateway::update_urls_path(7), "/api/mvp/7/update-urls");
    }

    #[test]
    fn assign_body_keeps_explicit_null() {
        let body = serde_json::to_value(AssignBody { assigned_to: None }).unwrap();
        assert_eq!(body, json!({ "assignedTo": null }));
    }

    #[tokio::test]
    async fn blank_milestone_is_rejected_before_any_request() {
        // Port 9 (discard) is never contacted: validation fails first.
        let gateway = MvpGateway::new(ApiClient::new("http://127.0.0.1:9").unwrap(), 10);
        let missing_due = Milestone::new("Design", "", " ", false);
        assert_eq!(
            gateway.add_milestone(1, &missing_due).await,
            Err(GatewayError::MissingField("dueDate"))
        );
        assert_eq!(
            gateway.add_activity(1, "   ").await,
            Err(GatewayError::MissingField("message"))
        );
    }
}
