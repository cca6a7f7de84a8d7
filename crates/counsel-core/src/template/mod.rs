//! Rehearsal templates: model, catalog, scoring and retrieval.
//!
//! # Module Structure
//!
//! - `model`: `Template`, `TemplateType`, `TemplateRoles`
//! - `catalog`: read-only `TemplateCatalog`
//! - `repository`: `TemplateRepository` trait for template stores
//! - `scoring`: named scoring functions for types and templates
//! - `synthesis`: on-the-fly templates and situation text
//! - `retriever`: `TemplateRetriever`

mod catalog;
mod model;
mod repository;
pub mod scoring;
mod retriever;
mod synthesis;

pub use catalog::TemplateCatalog;
pub use model::{Template, TemplatePreconditions, TemplateRoles, TemplateType};
pub use repository::TemplateRepository;
pub use retriever::{Retrieval, TemplateRetriever};
pub use synthesis::{situation_prompt, synthesize};
