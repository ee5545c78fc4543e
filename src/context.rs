//! Session Context
//!
//! Gateways and the notification banner, provided via Leptos Context API.

use dashboard_core::{ApiConfig, GatewayError, Gateways};
use leptos::prelude::*;

/// Build-time JSON overrides for the backend configuration
const CONFIG_OVERRIDES: Option<&str> = option_env!("DASHBOARD_API_CONFIG");

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// One banner message
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
    /// Distinguishes two identical consecutive notices
    pub serial: u32,
}

/// Session-wide handles provided via context
#[derive(Clone, Copy)]
pub struct SessionContext {
    gateways: StoredValue<Gateways, LocalStorage>,
    notice: RwSignal<Option<Notice>>,
    issued: StoredValue<u32>,
}

impl SessionContext {
    pub fn new(gateways: Gateways) -> Self {
        Self {
            gateways: StoredValue::new_local(gateways),
            notice: RwSignal::new(None),
            issued: StoredValue::new(0),
        }
    }

    pub fn gateways(&self) -> Gateways {
        self.gateways.get_value()
    }

    pub fn notice(&self) -> ReadSignal<Option<Notice>> {
        self.notice.read_only()
    }

    pub fn dismiss(&self) {
        self.notice.set(None);
    }

    pub fn success(&self, title: &str, message: impl Into<String>) {
        self.push(NoticeKind::Success, title, message.into());
    }

    pub fn error(&self, title: &str, message: impl Into<String>) {
        self.push(NoticeKind::Error, title, message.into());
    }

    /// Reports the outcome of a command: success text, or the error message.
    pub fn report<T>(&self, title: &str, result: &Result<T, String>, success: &str) {
        match result {
            Ok(_) => self.success(title, success),
            Err(message) => self.error(title, message.clone()),
        }
    }

    fn push(&self, kind: NoticeKind, title: &str, message: String) {
        self.issued.update_value(|n| *n = n.wrapping_add(1));
        let serial = self.issued.get_value();
        self.notice.set(Some(Notice {
            kind,
            title: title.to_string(),
            message,
            serial,
        }));
    }
}

/// Defaults, overridden by `DASHBOARD_API_CONFIG` when set at build time.
fn load_config() -> Result<ApiConfig, String> {
    match CONFIG_OVERRIDES {
        Some(raw) => ApiConfig::from_json(raw).map_err(|e| e.to_string()),
        None => ApiConfig::default().validate().map_err(|e| e.to_string()),
    }
}

/// Session built from the loaded configuration, returned alongside it.
pub fn build_session() -> Result<(SessionContext, ApiConfig), String> {
    let config = load_config()?;
    let gateways = Gateways::from_config(&config).map_err(|e: GatewayError| e.to_string())?;
    tracing::info!(
        "Dashboard backends: mvp={} website={} 3d={}",
        config.mvp_base_url,
        config.website_base_url,
        config.three_d_base_url
    );
    Ok((SessionContext::new(gateways), config))
}

/// Get the session context
pub fn use_session() -> SessionContext {
    expect_context::<SessionContext>()
}
