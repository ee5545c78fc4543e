//! 3D Website Template and Form Entities

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use super::entity::{Editable, Record};
use super::lenient;
use crate::error::{GatewayError, GatewayResult};
use crate::listing::{Filter, Filterable};

/// A 3D website template listed under a brand niche
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreeDTemplate {
    pub id: u64,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub model_url: String,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub demo_url: String,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub tags: String,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub price: f64,
    #[serde(default, deserialize_with = "lenient::string_or_number")]
    pub brand_niche_id: String,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub created_at: String,
}

impl ThreeDTemplate {
    pub fn tag_list(&self) -> Vec<String> {
        lenient::split_tags(&self.tags)
    }
}

impl Record for ThreeDTemplate {
    type Id = u64;

    fn id(&self) -> Self::Id {
        self.id
    }
}

impl Filterable for ThreeDTemplate {
    fn field_text(&self, field: &str) -> Option<Cow<'_, str>> {
        match field {
            "title" => Some(Cow::Borrowed(self.title.as_str())),
            "description" => Some(Cow::Borrowed(self.description.as_str())),
            "tags" => Some(Cow::Borrowed(self.tags.as_str())),
            "brandNicheId" => Some(Cow::Borrowed(self.brand_niche_id.as_str())),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ThreeDTemplateEdit {
    Title(String),
    Description(String),
    ModelUrl(String),
    DemoUrl(String),
    Tags(String),
    Price(f64),
    BrandNicheId(String),
}

impl Editable for ThreeDTemplate {
    type Edit = ThreeDTemplateEdit;

    fn apply_edit(&mut self, edit: ThreeDTemplateEdit) {
        match edit {
            ThreeDTemplateEdit::Title(v) => self.title = v,
            ThreeDTemplateEdit::Description(v) => self.description = v,
            ThreeDTemplateEdit::ModelUrl(v) => self.model_url = v,
            ThreeDTemplateEdit::DemoUrl(v) => self.demo_url = v,
            ThreeDTemplateEdit::Tags(v) => self.tags = v,
            ThreeDTemplateEdit::Price(v) => self.price = v.max(0.0),
            ThreeDTemplateEdit::BrandNicheId(v) => self.brand_niche_id = v,
        }
    }
}

/// Body of `POST /api/3d-website-templets/save/templet`
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ThreeDTemplateRequest {
    pub title: String,
    pub description: String,
    pub model_url: String,
    pub demo_url: String,
    pub tags: String,
    pub price: f64,
    pub brand_niche_id: String,
}

impl ThreeDTemplateRequest {
    pub fn validated(mut self) -> GatewayResult<Self> {
        self.title = self.title.trim().to_string();
        self.brand_niche_id = self.brand_niche_id.trim().to_string();
        if self.title.is_empty() {
            return Err(GatewayError::MissingField("title"));
        }
        if self.brand_niche_id.is_empty() {
            return Err(GatewayError::MissingField("brandNicheId"));
        }
        Ok(self)
    }
}

impl From<&ThreeDTemplate> for ThreeDTemplateRequest {
    fn from(template: &ThreeDTemplate) -> Self {
        Self {
            title: template.title.clone(),
            description: template.description.clone(),
            model_url: template.model_url.clone(),
            demo_url: template.demo_url.clone(),
            tags: template.tags.clone(),
            price: template.price,
            brand_niche_id: template.brand_niche_id.clone(),
        }
    }
}

/// A customer submission for a 3D website template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreeDForm {
    pub id: u64,
    #[serde(default, deserialize_with = "lenient::string_or_number")]
    pub website_id: String,
    #[serde(default, deserialize_with = "lenient::string_or_number")]
    pub uid: String,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::string_or_number")]
    pub number: String,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub email: String,
    #[serde(default, deserialize_with = "lenient::string_or_number")]
    pub templet_id: String,
    #[serde(default, rename = "createdAt", deserialize_with = "lenient::null_as_default")]
    pub created_at: String,
}

impl Record for ThreeDForm {
    type Id = u64;

    fn id(&self) -> Self::Id {
        self.id
    }
}

impl Filterable for ThreeDForm {
    fn field_text(&self, field: &str) -> Option<Cow<'_, str>> {
        let text = match field {
            "uid" => &self.uid,
            "name" => &self.name,
            "number" => &self.number,
            "email" => &self.email,
            "templetId" => &self.templet_id,
            _ => return None,
        };
        Some(Cow::Borrowed(text.as_str()))
    }
}

/// Client-side filters on the 3D forms table
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ThreeDFormFilter {
    pub uid: String,
    pub template_id: String,
    pub search_term: String,
}

impl ThreeDFormFilter {
    pub fn to_filter(&self) -> Filter {
        Filter::new()
            .contains("uid", &self.uid)
            .contains("templetId", &self.template_id)
            .any_contains(&["name", "email", "number"], &self.search_term)
    }
}
