//! Template store trait.

use super::catalog::TemplateCatalog;
use crate::error::Result;

/// Source of the template catalog.
///
/// Loaded once at startup. Implementations skip unreadable entries and
/// report them through logging; an `Err` means the store as a whole could
/// not be read.
#[async_trait::async_trait]
pub trait TemplateRepository: Send + Sync {
    /// Loads every template the store holds.
    async fn load_catalog(&self) -> Result<TemplateCatalog>;
}
