//! MVP Request Entity
//!
//! A development request tracked from submission to completion. Its
//! lifecycle label follows the progress percentage whenever progress is
//! edited locally.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::entity::{Editable, Record};
use super::lenient;
use crate::listing::{Filter, Filterable, PageRequest};

/// Lifecycle label of an MVP request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
pub enum MvpStatus {
    #[default]
    Submitted,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
}

impl MvpStatus {
    pub const ALL: [MvpStatus; 3] = [MvpStatus::Submitted, MvpStatus::InProgress, MvpStatus::Completed];

    pub fn as_str(&self) -> &'static str {
        match self {
            MvpStatus::Submitted => "Submitted",
            MvpStatus::InProgress => "In Progress",
            MvpStatus::Completed => "Completed",
        }
    }
}

impl fmt::Display for MvpStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MvpStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s.chars().filter(|c| c.is_alphanumeric()).collect::<String>().to_lowercase();
        match key.as_str() {
            "submitted" => Ok(MvpStatus::Submitted),
            "inprogress" => Ok(MvpStatus::InProgress),
            "completed" => Ok(MvpStatus::Completed),
            _ => Err(format!("unknown status: {}", s)),
        }
    }
}

impl<'de> Deserialize<'de> for MvpStatus {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        lenient::enum_or_default(deserializer)
    }
}

/// Lifecycle label for a progress percentage.
///
/// `100` is completed, `0` is submitted, anything in between is in progress.
/// Values above 100 are treated as 100.
pub fn derive_status(progress: u8) -> MvpStatus {
    match progress {
        0 => MvpStatus::Submitted,
        p if p >= 100 => MvpStatus::Completed,
        _ => MvpStatus::InProgress,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            _ => Err(format!("unknown priority: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub notes: String,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub due_date: String,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub completed: bool,
}

impl Milestone {
    pub fn new(title: impl Into<String>, notes: impl Into<String>, due_date: impl Into<String>, completed: bool) -> Self {
        Self {
            id: None,
            title: title.into(),
            notes: notes.into(),
            due_date: due_date.into(),
            completed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Activity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub message: String,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct FileAttachment {
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub filename: String,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub url: String,
}

/// An MVP development request as served by `/api/mvp`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MvpRecord {
    pub id: u64,
    #[serde(default, deserialize_with = "lenient::string_or_number")]
    pub request_id: String,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub title: String,
    #[serde(default, rename = "type", deserialize_with = "lenient::null_as_default")]
    pub kind: String,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub target_audience: String,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub platform: String,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub prompt: String,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub contact_email: String,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub contact_phone: String,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub price: f64,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub is_paid: bool,
    #[serde(default)]
    pub assigned_to: Option<String>,
    #[serde(default, deserialize_with = "lenient::enum_or_default")]
    pub priority: Priority,
    #[serde(default)]
    pub status: MvpStatus,
    #[serde(default, deserialize_with = "lenient::percent")]
    pub progress: u8,
    #[serde(default)]
    pub estimated_completion: Option<String>,
    #[serde(default)]
    pub next_milestone: Option<String>,
    #[serde(default)]
    pub demo_url: Option<String>,
    #[serde(default, rename = "live_url")]
    pub live_url: Option<String>,
    #[serde(default)]
    pub pdf_url: Option<String>,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub created_at: String,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub last_updated: String,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub milestones: Vec<Milestone>,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub activities: Vec<Activity>,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub files: Vec<FileAttachment>,
}

impl MvpRecord {
    /// Minimal record, mostly useful for fixtures.
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id,
            request_id: format!("MVP-{:03}", id),
            title: title.into(),
            kind: String::new(),
            description: String::new(),
            target_audience: String::new(),
            platform: String::new(),
            prompt: String::new(),
            contact_email: String::new(),
            contact_phone: String::new(),
            price: 0.0,
            is_paid: false,
            assigned_to: None,
            priority: Priority::default(),
            status: MvpStatus::Submitted,
            progress: 0,
            estimated_completion: None,
            next_milestone: None,
            demo_url: None,
            live_url: None,
            pdf_url: None,
            created_at: String::new(),
            last_updated: String::new(),
            milestones: Vec::new(),
            activities: Vec::new(),
            files: Vec::new(),
        }
    }

    /// Sets progress and re-derives the status from it.
    pub fn set_progress(&mut self, progress: u8) {
        self.progress = progress.min(100);
        self.status = derive_status(self.progress);
    }

    pub fn push_milestone(&mut self, milestone: Milestone) {
        self.milestones.push(milestone);
    }

    /// Activities are kept most-recent-first.
    pub fn push_activity(&mut self, activity: Activity) {
        self.activities.insert(0, activity);
    }

    pub fn touch(&mut self, timestamp: impl Into<String>) {
        self.last_updated = timestamp.into();
    }

    /// Stamps `last_updated` with the current UTC time.
    pub fn touch_now(&mut self) {
        self.touch(chrono::Utc::now().to_rfc3339());
    }

    pub fn is_assigned(&self) -> bool {
        self.assigned_to.as_deref().is_some_and(|a| !a.trim().is_empty())
    }
}

impl Record for MvpRecord {
    type Id = u64;

    fn id(&self) -> Self::Id {
        self.id
    }
}

impl Filterable for MvpRecord {
    fn field_text(&self, field: &str) -> Option<Cow<'_, str>> {
        match field {
            "id" => Some(Cow::Owned(self.id.to_string())),
            "requestId" => Some(Cow::Borrowed(self.request_id.as_str())),
            "title" => Some(Cow::Borrowed(self.title.as_str())),
            "contactEmail" => Some(Cow::Borrowed(self.contact_email.as_str())),
            "status" => Some(Cow::Borrowed(self.status.as_str())),
            "priority" => Some(Cow::Borrowed(self.priority.as_str())),
            "assignedTo" => self.assigned_to.as_deref().map(Cow::Borrowed),
            "platform" => Some(Cow::Borrowed(self.platform.as_str())),
            "isPaid" => Some(Cow::Borrowed(if self.is_paid { "true" } else { "false" })),
            _ => None,
        }
    }
}

/// Field edits accepted by the MVP detail editor
#[derive(Debug, Clone, PartialEq)]
pub enum MvpEdit {
    Title(String),
    Description(String),
    Platform(String),
    TargetAudience(String),
    Priority(Priority),
    EstimatedCompletion(Option<String>),
    DemoUrl(Option<String>),
    LiveUrl(Option<String>),
    AssignedTo(Option<String>),
    Progress(u8),
}

impl Editable for MvpRecord {
    type Edit = MvpEdit;

    fn apply_edit(&mut self, edit: MvpEdit) {
        match edit {
            MvpEdit::Title(v) => self.title = v,
            MvpEdit::Description(v) => self.description = v,
            MvpEdit::Platform(v) => self.platform = v,
            MvpEdit::TargetAudience(v) => self.target_audience = v,
            MvpEdit::Priority(v) => self.priority = v,
            MvpEdit::EstimatedCompletion(v) => self.estimated_completion = blank_to_none(v),
            MvpEdit::DemoUrl(v) => self.demo_url = blank_to_none(v),
            MvpEdit::LiveUrl(v) => self.live_url = blank_to_none(v),
            MvpEdit::AssignedTo(v) => self.assigned_to = blank_to_none(v),
            MvpEdit::Progress(p) => self.set_progress(p),
        }
    }
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Body of `PATCH /api/mvp/{id}`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MvpCoreUpdate {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub platform: String,
    pub priority: Priority,
    pub target_audience: String,
    pub estimated_completion: Option<String>,
    pub demo_url: Option<String>,
    #[serde(rename = "live_url")]
    pub live_url: Option<String>,
}

impl From<&MvpRecord> for MvpCoreUpdate {
    fn from(record: &MvpRecord) -> Self {
        Self {
            id: record.id,
            title: record.title.clone(),
            description: record.description.clone(),
            platform: record.platform.clone(),
            priority: record.priority,
            target_audience: record.target_audience.clone(),
            estimated_completion: record.estimated_completion.clone(),
            demo_url: record.demo_url.clone(),
            live_url: record.live_url.clone(),
        }
    }
}

/// Assignee selection on the MVP filter bar
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AssigneeFilter {
    #[default]
    Any,
    Unassigned,
    Named(String),
}

/// Server-side filters for `GET /api/mvp/get/all/forms`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MvpQuery {
    pub search: String,
    pub status: Option<MvpStatus>,
    pub priority: Option<Priority>,
    pub assigned_to: AssigneeFilter,
    pub is_paid: Option<bool>,
    pub start_date: String,
    pub end_date: String,
    /// Requested page; a zero size leaves paging to the backend.
    pub page: PageRequest,
}

impl MvpQuery {
    pub fn first_page(size: u64) -> Self {
        Self {
            page: PageRequest::first(size),
            ..Default::default()
        }
    }

    /// Same filters, different page.
    pub fn at_page(&self, page: PageRequest) -> Self {
        Self {
            page,
            ..self.clone()
        }
    }

    /// Query-string pairs with unset and blank values left out.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        let mut push_text = |key: &'static str, value: &str| {
            let value = value.trim();
            if !value.is_empty() {
                pairs.push((key, value.to_string()));
            }
        };
        push_text("search", &self.search);
        if let Some(status) = self.status {
            push_text("status", status.as_str());
        }
        if let Some(priority) = self.priority {
            push_text("priority", priority.as_str());
        }
        if let AssigneeFilter::Named(name) = &self.assigned_to {
            push_text("assignedTo", name);
        }
        push_text("startDate", &self.start_date);
        push_text("endDate", &self.end_date);
        if let Some(paid) = self.is_paid {
            pairs.push(("isPaid", paid.to_string()));
        }
        if self.page.size > 0 {
            pairs.push(("page", self.page.index.to_string()));
            pairs.push(("size", self.page.size.to_string()));
        }
        pairs
    }

    /// Narrowing the backend cannot express, applied through the filter engine.
    ///
    /// The list endpoint has no "unassigned" filter, so that selection is
    /// resolved locally after each fetch.
    pub fn local_filter(&self) -> Filter {
        match self.assigned_to {
            AssigneeFilter::Unassigned => Filter::new().missing("assignedTo"),
            _ => Filter::new(),
        }
    }
}

/// Counters shown on the MVP dashboard header
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MvpStats {
    pub total: u64,
    pub submitted: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub paid: usize,
    pub unpaid: usize,
    pub total_revenue: f64,
}

impl MvpStats {
    /// `total` is the server-reported total; the rest is counted over `records`.
    pub fn from_records(records: &[MvpRecord], total: u64) -> Self {
        let mut stats = MvpStats {
            total,
            ..Default::default()
        };
        for record in records {
            match record.status {
                MvpStatus::Submitted => stats.submitted += 1,
                MvpStatus::InProgress => stats.in_progress += 1,
                MvpStatus::Completed => stats.completed += 1,
            }
            if record.is_paid {
                stats.paid += 1;
                stats.total_revenue += record.price;
            } else {
                stats.unpaid += 1;
            }
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_derive_status_boundaries() {
        assert_eq!(derive_status(100), MvpStatus::Completed);
        assert_eq!(derive_status(1), MvpStatus::InProgress);
        assert_eq!(derive_status(99), MvpStatus::InProgress);
        assert_eq!(derive_status(0), MvpStatus::Submitted);
    }

    #[test]
    fn test_derive_status_is_total_over_range() {
        for p in 0..=100u8 {
            let branches = [p == 0, p > 0 && p < 100, p == 100];
            assert_eq!(branches.iter().filter(|b| **b).count(), 1);
            let expected = if p == 0 {
                MvpStatus::Submitted
            } else if p == 100 {
                MvpStatus::Completed
            } else {
                MvpStatus::InProgress
            };
            assert_eq!(derive_status(p), expected);
        }
    }

    #[test]
    fn test_progress_edit_rederives_status() {
        let mut record = MvpRecord::new(1, "Shop");
        record.status = MvpStatus::Completed;
        record.progress = 40;

        record.apply_edit(MvpEdit::Progress(65));
        assert_eq!(record.status, MvpStatus::InProgress);
        record.apply_edit(MvpEdit::Progress(0));
        assert_eq!(record.status, MvpStatus::Submitted);
        record.apply_edit(MvpEdit::Progress(250));
        assert_eq!((record.progress, record.status), (100, MvpStatus::Completed));
    }

    #[test]
    fn test_other_edits_leave_server_status_alone() {
        let mut record = MvpRecord::new(1, "Shop");
        record.status = MvpStatus::Completed;
        record.progress = 80;
        record.apply_edit(MvpEdit::Title("Renamed".to_string()));
        assert_eq!(record.status, MvpStatus::Completed);
    }

    #[test]
    fn test_blank_assignee_clears_assignment() {
        let mut record = MvpRecord::new(1, "Shop");
        record.apply_edit(MvpEdit::AssignedTo(Some("Jane Smith".to_string())));
        assert!(record.is_assigned());
        record.apply_edit(MvpEdit::AssignedTo(Some("  ".to_string())));
        assert_eq!(record.assigned_to, None);
    }

    #[test]
    fn test_decodes_backend_payload() {
        let payload = json!({
            "requestId": "MVP-001",
            "id": 4,
            "title": "E-commerce Mobile App",
            "type": "SaaS",
            "price": 5000,
            "isPaid": true,
            "assignedTo": "John Doe",
            "priority": "High",
            "status": "In Progress",
            "progress": 65,
            "live_url": null,
            "createdAt": "2024-01-15T10:30:00Z",
            "milestones": [{ "title": "Project Setup", "notes": "", "dueDate": "2024-01-20", "completed": true }],
            "activities": null,
            "files": [{ "filename": "requirements.pdf", "url": "/files/req-001.pdf" }]
        });
        let record: MvpRecord = serde_json::from_value(payload).expect("decode");
        assert_eq!(record.id, 4);
        assert_eq!(record.kind, "SaaS");
        assert_eq!(record.priority, Priority::High);
        assert_eq!(record.status, MvpStatus::InProgress);
        assert_eq!(record.milestones[0].due_date, "2024-01-20");
        assert!(record.activities.is_empty());
        assert_eq!(record.files.len(), 1);
    }

    #[test]
    fn test_unknown_status_and_priority_fall_back() {
        let record: MvpRecord =
            serde_json::from_value(json!({ "id": 1, "status": "ARCHIVED", "priority": 3 })).expect("decode");
        assert_eq!(record.status, MvpStatus::Submitted);
        assert_eq!(record.priority, Priority::Medium);

        let record: MvpRecord = serde_json::from_value(json!({ "id": 1, "status": "IN_PROGRESS" })).expect("decode");
        assert_eq!(record.status, MvpStatus::InProgress);
    }

    #[test]
    fn test_status_serializes_with_label() {
        assert_eq!(serde_json::to_value(MvpStatus::InProgress).unwrap(), json!("In Progress"));
    }

    #[test]
    fn test_core_update_body_shape() {
        let mut record = MvpRecord::new(9, "Task App");
        record.live_url = Some("https://live".to_string());
        let body = serde_json::to_value(MvpCoreUpdate::from(&record)).unwrap();
        assert_eq!(body["id"], json!(9));
        assert_eq!(body["live_url"], json!("https://live"));
        assert_eq!(body["targetAudience"], json!(""));
        assert!(body.get("progress").is_none());
    }

    #[test]
    fn test_query_pairs_skip_blank_values() {
        let query = MvpQuery {
            search: "  shop ".to_string(),
            status: Some(MvpStatus::InProgress),
            assigned_to: AssigneeFilter::Unassigned,
            is_paid: Some(false),
            ..Default::default()
        };
        assert_eq!(
            query.to_query_pairs(),
            vec![
                ("search", "shop".to_string()),
                ("status", "In Progress".to_string()),
                ("isPaid", "false".to_string()),
            ]
        );
        assert!(!query.local_filter().is_empty());
        assert!(MvpQuery::default().to_query_pairs().is_empty());
    }

    #[test]
    fn test_query_pairs_carry_requested_page() {
        let query = MvpQuery {
            search: "shop".to_string(),
            ..MvpQuery::first_page(10)
        };
        let second = query.at_page(PageRequest::new(1, 10));
        assert_eq!(
            second.to_query_pairs(),
            vec![
                ("search", "shop".to_string()),
                ("page", "1".to_string()),
                ("size", "10".to_string()),
            ]
        );
        assert_eq!(second.search, query.search);
    }

    #[test]
    fn test_stats() {
        let mut paid = MvpRecord::new(1, "A");
        paid.is_paid = true;
        paid.price = 5000.0;
        paid.set_progress(65);
        let mut done = MvpRecord::new(2, "B");
        done.set_progress(100);
        let fresh = MvpRecord::new(3, "C");

        let stats = MvpStats::from_records(&[paid, done, fresh], 10);
        assert_eq!(stats.total, 10);
        assert_eq!((stats.submitted, stats.in_progress, stats.completed), (1, 1, 1));
        assert_eq!((stats.paid, stats.unpaid), (1, 2));
        assert_eq!(stats.total_revenue, 5000.0);
    }
}
