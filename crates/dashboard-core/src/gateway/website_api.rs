//! Website template and form gateway (`/api/website-templets`, `/api/website-forms`)

use async_trait::async_trait;
use reqwest::Method;
use tracing::info;

use super::client::{encode_segment, ApiClient};
use super::{ListGateway, SaveGateway};
use crate::domain::{WebsiteForm, WebsiteFormQuery, WebsiteTemplate, WebsiteTemplateRequest};
use crate::error::GatewayResult;
use crate::listing::{normalize, Page, PageRequest};

#[derive(Debug, Clone)]
pub struct WebsiteGateway {
    client: ApiClient,
}

impl WebsiteGateway {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn templates_path(niche: &str) -> String {
        format!("/api/website-templets/get/templet/{}", encode_segment(niche.trim()))
    }

    /// Creates a template. The backend answers with a plain confirmation.
    pub async fn save_template(&self, request: WebsiteTemplateRequest) -> GatewayResult<()> {
        let request = request.validated()?;
        self.client
            .send_json(Method::POST, "/api/website-templets/save/templet", Some(&request))
            .await?;
        info!("Created website template '{}'", request.title);
        Ok(())
    }

    /// Templates of one niche. A blank niche lists nothing and sends nothing.
    pub async fn list_templates(&self, niche: &str) -> GatewayResult<Vec<WebsiteTemplate>> {
        if niche.trim().is_empty() {
            return Ok(Vec::new());
        }
        let body = self.client.get_value(&Self::templates_path(niche), &[]).await?;
        Ok(normalize(body, PageRequest::default()).content)
    }

    /// Returns the stored template, or the sent one when the answer is not a
    /// template.
    pub async fn update_template(&self, template: &WebsiteTemplate) -> GatewayResult<WebsiteTemplate> {
        let response = self
            .client
            .send_json(Method::POST, "/api/website-templets/update/templet", Some(template))
            .await?;
        Ok(serde_json::from_value(response).unwrap_or_else(|_| template.clone()))
    }

    pub async fn list_forms(&self, query: &WebsiteFormQuery) -> GatewayResult<Page<WebsiteForm>> {
        let body = self.client.get_value("/api/website-forms", &query.to_query_pairs()).await?;
        Ok(normalize(body, query.page))
    }
}

#[async_trait(?Send)]
impl ListGateway<WebsiteTemplate> for WebsiteGateway {
    /// Niche
    type Query = String;

    async fn list(&self, niche: &String) -> GatewayResult<Page<WebsiteTemplate>> {
        let templates = self.list_templates(niche).await?;
        let size = templates.len().max(1) as u64;
        Ok(Page::from_items(templates, PageRequest::first(size)))
    }
}

#[async_trait(?Send)]
impl ListGateway<WebsiteForm> for WebsiteGateway {
    type Query = WebsiteFormQuery;

    async fn list(&self, query: &WebsiteFormQuery) -> GatewayResult<Page<WebsiteForm>> {
        self.list_forms(query).await
    }
}

#[async_trait(?Send)]
impl SaveGateway<WebsiteTemplate> for WebsiteGateway {
    async fn save(&self, _original: &WebsiteTemplate, draft: &WebsiteTemplate) -> GatewayResult<WebsiteTemplate> {
        self.update_template(draft).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GatewayError;

    #[test]
    fn templates_path_encodes_niche() {
        assert_eq!(
            WebsiteGateway::templates_path(" real estate "),
            "/api/website-templets/get/templet/real%20estate"
        );
    }

    #[tokio::test]
    async fn blank_niche_sends_nothing() {
        let gateway = WebsiteGateway::new(ApiClient::new("http://127.0.0.1:9").unwrap());
        assert_eq!(gateway.list_templates("  ").await, Ok(Vec::new()));
    }

    #[tokio::test]
    async fn save_requires_title() {
        let gateway = WebsiteGateway::new(ApiClient::new("http://127.0.0.1:9").unwrap());
        let request = WebsiteTemplateRequest {
            niche_id: "food".to_string(),
            ..Default::default()
        };
        assert_eq!(gateway.save_template(request).await, Err(GatewayError::MissingField("title")));
    }
}
