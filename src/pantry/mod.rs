//! The pantry service (Grocy) as seen from the import core: where the nutrition
//! locale comes from, and the recipe body it receives.

mod client;
mod draft;

use async_trait::async_trait;

use crate::error::ImportError;
use crate::format::Locale;

pub use client::{GrocyClient, GrocyVersion, SystemInfo};
pub use draft::{youtube_embed, DraftOptions, PantryRecipeDraft};

/// Resolves the locale used for the nutrition table
#[async_trait]
pub trait LocaleSource: Send + Sync {
    async fn locale(&self) -> Result<Locale, ImportError>;
}

/// A fixed locale, used when no pantry service is configured
#[async_trait]
impl LocaleSource for Locale {
    async fn locale(&self) -> Result<Locale, ImportError> {
        Ok(*self)
    }
}
