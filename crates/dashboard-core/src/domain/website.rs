//! Website Template and Form Entities

use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::entity::{Editable, Record};
use super::lenient;
use crate::error::{GatewayError, GatewayResult};
use crate::listing::{Filter, Filterable, PageRequest};

/// A website template listed under a niche
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebsiteTemplate {
    pub id: u64,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub thumbnail: String,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub demo_url: String,
    #[serde(default, deserialize_with = "lenient::tag_list", serialize_with = "lenient::tags_as_csv")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub price: f64,
    #[serde(default, deserialize_with = "lenient::string_or_number")]
    pub niche_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<String>,
}

impl Record for WebsiteTemplate {
    type Id = u64;

    fn id(&self) -> Self::Id {
        self.id
    }
}

impl Filterable for WebsiteTemplate {
    fn field_text(&self, field: &str) -> Option<Cow<'_, str>> {
        match field {
            "title" => Some(Cow::Borrowed(self.title.as_str())),
            "description" => Some(Cow::Borrowed(self.description.as_str())),
            "tags" => Some(Cow::Owned(self.tags.join(", "))),
            "nicheId" => Some(Cow::Borrowed(self.niche_id.as_str())),
            _ => None,
        }
    }
}

/// Field edits accepted by the website template editor
#[derive(Debug, Clone, PartialEq)]
pub enum WebsiteTemplateEdit {
    Title(String),
    Description(String),
    Thumbnail(String),
    DemoUrl(String),
    /// Comma-separated
    Tags(String),
    Price(f64),
}

impl Editable for WebsiteTemplate {
    type Edit = WebsiteTemplateEdit;

    fn apply_edit(&mut self, edit: WebsiteTemplateEdit) {
        match edit {
            WebsiteTemplateEdit::Title(v) => self.title = v,
            WebsiteTemplateEdit::Description(v) => self.description = v,
            WebsiteTemplateEdit::Thumbnail(v) => self.thumbnail = v,
            WebsiteTemplateEdit::DemoUrl(v) => self.demo_url = v,
            WebsiteTemplateEdit::Tags(v) => self.tags = lenient::split_tags(&v),
            WebsiteTemplateEdit::Price(v) => self.price = v.max(0.0),
        }
    }
}

/// Body of `POST /api/website-templets/save/templet`
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct WebsiteTemplateRequest {
    pub title: String,
    pub description: String,
    pub thumbnail: String,
    pub demo_url: String,
    /// Comma-separated
    pub tags: String,
    pub price: f64,
    pub niche_id: String,
}

impl WebsiteTemplateRequest {
    /// Trims free text and checks the required fields.
    pub fn validated(mut self) -> GatewayResult<Self> {
        self.title = self.title.trim().to_string();
        self.tags = self.tags.trim().to_string();
        self.niche_id = self.niche_id.trim().to_string();
        if self.title.is_empty() {
            return Err(GatewayError::MissingField("title"));
        }
        if self.niche_id.is_empty() {
            return Err(GatewayError::MissingField("nicheId"));
        }
        Ok(self)
    }
}

/// A customer submission for a website template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebsiteForm {
    pub id: u64,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::string_or_number")]
    pub phone_number: String,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub email: String,
    #[serde(default, deserialize_with = "lenient::string_or_number")]
    pub templet_id: String,
    #[serde(default, deserialize_with = "lenient::string_or_number")]
    pub uid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<String>,
    /// Fields the dashboard does not model, shown verbatim in the detail view
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Record for WebsiteForm {
    type Id = u64;

    fn id(&self) -> Self::Id {
        self.id
    }
}

impl Filterable for WebsiteForm {
    fn field_text(&self, field: &str) -> Option<Cow<'_, str>> {
        match field {
            "name" => Some(Cow::Borrowed(self.name.as_str())),
            "email" => Some(Cow::Borrowed(self.email.as_str())),
            "phoneNumber" => Some(Cow::Borrowed(self.phone_number.as_str())),
            "uid" => Some(Cow::Borrowed(self.uid.as_str())),
            "templetId" => Some(Cow::Borrowed(self.templet_id.as_str())),
            _ => None,
        }
    }
}

/// Server-side filters for `GET /api/website-forms`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WebsiteFormQuery {
    pub uid: String,
    pub templet_id: String,
    pub search: String,
    pub page: PageRequest,
}

impl WebsiteFormQuery {
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

    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("page", self.page.index.to_string()), ("size", self.page.size.to_string())];
        for (key, value) in [("uid", &self.uid), ("templetId", &self.templet_id), ("search", &self.search)] {
            let value = value.trim();
            if !value.is_empty() {
                pairs.push((key, value.to_string()));
            }
        }
        pairs
    }

    /// The same narrowing expressed locally, used to keep the visible page
    /// consistent when the backend ignores a filter.
    pub fn local_filter(&self) -> Filter {
        Filter::new()
            .contains("uid", &self.uid)
            .exact("templetId", &self.templet_id)
            .any_contains(&["name", "email", "phoneNumber"], &self.search)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_template_tags_round_trip_as_csv() {
        let template: WebsiteTemplate = serde_json::from_value(json!({
            "id": 3,
            "title": "Bistro",
            "tags": ["food", "dark"],
            "price": "49.5",
            "nicheId": 7
        }))
        .expect("decode");
        assert_eq!(template.tags, vec!["food", "dark"]);
        assert_eq!(template.niche_id, "7");
        assert_eq!(template.price, 49.5);

        let body = serde_json::to_value(&template).unwrap();
        assert_eq!(body["tags"], json!("food, dark"));
        assert_eq!(body["nicheId"], json!("7"));
    }

    #[test]
    fn test_template_edits() {
        let mut template: WebsiteTemplate = serde_json::from_value(json!({ "id": 1 })).unwrap();
        template.apply_edit(WebsiteTemplateEdit::Tags("a, b, ".to_string()));
        template.apply_edit(WebsiteTemplateEdit::Price(-4.0));
        assert_eq!(template.tags, vec!["a", "b"]);
        assert_eq!(template.price, 0.0);
    }

    #[test]
    fn test_request_requires_title_and_niche() {
        let missing_title = WebsiteTemplateRequest {
            niche_id: "food".to_string(),
            ..Default::default()
        };
        assert_eq!(missing_title.validated(), Err(GatewayError::MissingField("title")));

        let missing_niche = WebsiteTemplateRequest {
            title: "Bistro".to_string(),
            niche_id: "  ".to_string(),
            ..Default::default()
        };
        assert_eq!(missing_niche.validated(), Err(GatewayError::MissingField("nicheId")));

        let ok = WebsiteTemplateRequest {
            title: " Bistro ".to_string(),
            niche_id: "food".to_string(),
            ..Default::default()
        }
        .validated()
        .unwrap();
        assert_eq!(ok.title, "Bistro");
    }

    #[test]
    fn test_form_keeps_unknown_fields() {
        let form: WebsiteForm = serde_json::from_value(json!({
            "id": 11,
            "name": "Jane Smith",
            "phoneNumber": 5550101,
            "email": "jane@acme.io",
            "templetId": 4,
            "uid": "U-77",
            "budget": "2k"
        }))
        .expect("decode");
        assert_eq!(form.phone_number, "5550101");
        assert_eq!(form.templet_id, "4");
        assert_eq!(form.extra.get("budget"), Some(&json!("2k")));
    }

    #[test]
    fn test_form_query_pairs() {
        let query = WebsiteFormQuery {
            uid: "U-7".to_string(),
            search: " ".to_string(),
            ..WebsiteFormQuery::first_page(10)
        };
        assert_eq!(
            query.to_query_pairs(),
            vec![("page", "0".to_string()), ("size", "10".to_string()), ("uid", "U-7".to_string())]
        );
        assert_eq!(query.at_page(PageRequest::new(2, 10)).to_query_pairs()[0], ("page", "2".to_string()));
    }
}
