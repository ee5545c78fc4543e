//! 3D website template and form gateway

use async_trait::async_trait;
use reqwest::Method;
use tracing::info;

use super::client::{encode_segment, ApiClient};
use super::{ListGateway, SaveGateway};
use crate::domain::{ThreeDForm, ThreeDTemplate, ThreeDTemplateRequest};
use crate::error::{GatewayError, GatewayResult};
use crate::listing::{normalize, Page, PageRequest};

#[derive(Debug, Clone)]
pub struct ThreeDGateway {
    client: ApiClient,
}

impl ThreeDGateway {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn templates_path(niche: &str) -> String {
        format!("/api/3d-website-templets/get/templet/{}", encode_segment(niche.trim()))
    }

    /// Saves a template and returns it as stored.
    pub async fn save_template(&self, request: ThreeDTemplateRequest) -> GatewayResult<ThreeDTemplate> {
        let request = request.validated()?;
        let response = self
            .client
            .send_json(Method::POST, "/api/3d-website-templets/save/templet", Some(&request))
            .await?;
        let saved: ThreeDTemplate = serde_json::from_value(response).map_err(|error| GatewayError::Malformed {
            message: error.to_string(),
        })?;
        info!("Saved 3D template {} '{}'", saved.id, saved.title);
        Ok(saved)
    }

    /// Templates of one brand niche. A blank niche lists nothing and sends nothing.
    pub async fn list_templates(&self, niche: &str) -> GatewayResult<Vec<ThreeDTemplate>> {
        if niche.trim().is_empty() {
            return Ok(Vec::new());
        }
        let body = self.client.get_value(&Self::templates_path(niche), &[]).await?;
        Ok(normalize(body, PageRequest::default()).content)
    }

    pub async fn list_forms(&self, page: PageRequest) -> GatewayResult<Page<ThreeDForm>> {
        let query = [("page", page.index.to_string()), ("size", page.size.to_string())];
        let body = self.client.get_value("/api/3d-website-forms", &query).await?;
        Ok(normalize(body, page))
    }
}

#[async_trait(?Send)]
impl ListGateway<ThreeDTemplate> for ThreeDGateway {
    /// Brand niche
    type Query = String;

    async fn list(&self, niche: &String) -> GatewayResult<Page<ThreeDTemplate>> {
        let templates = self.list_templates(niche).await?;
        let size = templates.len().max(1) as u64;
        Ok(Page::from_items(templates, PageRequest::first(size)))
    }
}

#[async_trait(?Send)]
impl ListGateway<ThreeDForm> for ThreeDGateway {
    type Query = PageRequest;

    async fn list(&self, page: &PageRequest) -> GatewayResult<Page<ThreeDForm>> {
        self.list_forms(*page).await
    }
}

/// The backend has no separate update call for 3D templates; saving an
/// edited template goes through `save/templet` as well. The returned id may
/// differ from the draft's.
#[async_trait(?Send)]
impl SaveGateway<ThreeDTemplate> for ThreeDGateway {
    async fn save(&self, _original: &ThreeDTemplate, draft: &ThreeDTemplate) -> GatewayResult<ThreeDTemplate> {
        self.save_template(ThreeDTemplateRequest::from(draft)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn templates_path_encodes_niche() {
        assert_eq!(
            ThreeDGateway::templates_path("tech/ai"),
            "/api/3d-website-templets/get/templet/tech%2Fai"
        );
    }

    #[tokio::test]
    async fn save_requires_brand_niche() {
        let gateway = ThreeDGateway::new(ApiClient::new("http://127.0.0.1:9").unwrap());
        let request = ThreeDTemplateRequest {
            title: "Orbit".to_string(),
            ..Default::default()
        };
        assert_eq!(
            gateway.save_template(request).await,
            Err(GatewayError::MissingField("brandNicheId"))
        );
    }
}
