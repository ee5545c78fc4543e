//! UI Components
//!
//! Dashboard screens and the small reusable pieces they share.

mod field_input;
mod mvp_dashboard;
mod mvp_detail;
mod notice_banner;
mod pagination_bar;
mod tab_bar;
mod three_d_forms;
mod three_d_templates;
mod website_forms;
mod website_templates;

pub use field_input::{TextAreaField, TextField};
pub use mvp_dashboard::MvpDashboard;
pub use mvp_detail::MvpDetail;
pub use notice_banner::NoticeBanner;
pub use pagination_bar::{LoadStatus, PaginationBar};
pub use tab_bar::{DashboardTab, TabBar};
pub use three_d_forms::ThreeDForms;
pub use three_d_templates::{AddThreeDTemplate, ThreeDTemplateManager};
pub use website_forms::WebsiteForms;
pub use website_templates::{AddWebsiteTemplate, WebsiteTemplateManager};
