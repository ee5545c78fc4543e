//! Domain Layer
//!
//! Records served by the dashboard backend, one module per product line.
//! This layer depends on serde only; it performs no I/O.

mod entity;
mod lenient;
mod mvp;
mod three_d;
mod website;

pub use entity::{Editable, Record};
pub use lenient::split_tags;
pub use mvp::{
    derive_status, Activity, AssigneeFilter, FileAttachment, Milestone, MvpCoreUpdate, MvpEdit, MvpQuery,
    MvpRecord, MvpStats, MvpStatus, Priority,
};
pub use three_d::{ThreeDForm, ThreeDFormFilter, ThreeDTemplate, ThreeDTemplateEdit, ThreeDTemplateRequest};
pub use website::{WebsiteForm, WebsiteFormQuery, WebsiteTemplate, WebsiteTemplateEdit, WebsiteTemplateRequest};
