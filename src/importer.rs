use log::{info, warn};
use std::time::Duration;

use crate::config::{FetchConfig, ImportConfig, PantryConfig};
use crate::error::ImportError;
use crate::fetchers::RequestFetcher;
use crate::format::Locale;
use crate::hydrate::{hydrate_nodes, hydrate_recipe_from_html, validate_url, HydrateOptions};
use crate::json_ld;
use crate::model::HydratedRecipe;
use crate::pantry::{GrocyClient, LocaleSource};

/// Imports recipes, resolving the nutrition locale alongside the document fetch.
///
/// # Example
/// ```no_run
/// use recipe_buddy_import::{Locale, RecipeImporter};
///
/// # async fn run() -> Result<(), recipe_buddy_import::ImportError> {
/// let importer = RecipeImporter::builder().locale(Locale::De).build()?;
/// let hydrated = importer.import_url("https://example.com/recipe").await?;
/// println!("{}", hydrated.recipe.name);
/// # Ok(())
/// # }
/// ```
pub struct RecipeImporter {
    fetcher: RequestFetcher,
    locale_source: Box<dyn LocaleSource>,
    fallback_locale: Locale,
    embed_nutrition: bool,
}

impl RecipeImporter {
    pub fn builder() -> RecipeImporterBuilder {
        RecipeImporterBuilder::default()
    }

    pub fn from_config(config: &ImportConfig) -> Result<Self, ImportError> {
        let mut builder = RecipeImporter::builder()
            .fetch_config(config.fetch.clone())
            .locale(config.locale)
            .embed_nutrition(config.embed_nutrition);
        if let Some(pantry) = &config.pantry {
            builder = builder.pantry(pantry);
        }
        builder.build()
    }

    /// Fetch `url` and extract its recipe. The fetch and the locale lookup run concurrently.
    pub async fn import_url(&self, url: &str) -> Result<HydratedRecipe, ImportError> {
        validate_url(url)?;

        let (nodes, locale) = tokio::join!(
            json_ld::load_from_url(&self.fetcher, url),
            self.resolve_locale()
        );
        let hydrated = hydrate_nodes(&nodes?, url, &self.options(locale))?;

        info!("Imported '{}' from {}", hydrated.recipe.name, url);
        Ok(hydrated)
    }

    /// Extract the recipe from an HTML document supplied directly.
    pub async fn import_html(&self, html: &str) -> Result<HydratedRecipe, ImportError> {
        let locale = self.resolve_locale().await;
        hydrate_recipe_from_html(html, &self.options(locale))
    }

    fn options(&self, locale: Locale) -> HydrateOptions {
        HydrateOptions {
            locale,
            embed_nutrition: self.embed_nutrition,
        }
    }

    async fn resolve_locale(&self) -> Locale {
        match self.locale_source.locale().await {
            Ok(locale) => locale,
            Err(e) => {
                warn!(
                    "Locale lookup failed, using '{}': {}",
                    self.fallback_locale, e
                );
                self.fallback_locale
            }
        }
    }
}

/// Builder for [`RecipeImporter`]
#[derive(Default)]
pub struct RecipeImporterBuilder {
    fetch: FetchConfig,
    locale: Locale,
    embed_nutrition: Option<bool>,
    locale_source: Option<LocaleSetting>,
}

enum LocaleSetting {
    Pantry(PantryConfig),
    Source(Box<dyn LocaleSource>),
}

impl RecipeImporterBuilder {
    pub fn fetch_config(mut self, fetch: FetchConfig) -> Self {
        self.fetch = fetch;
        self
    }

    /// Set the request timeout for fetching recipe pages. Sub-millisecond
    /// precision is dropped; a zero timeout fails at [`build`](Self::build).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.fetch.timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Retry failed fetches `attempts` times, waiting `delay_ms * n` before the n-th retry
    pub fn retries(mut self, attempts: u32, delay_ms: u64) -> Self {
        self.fetch.retry_attempts = attempts;
        self.fetch.retry_delay_ms = delay_ms;
        self
    }

    /// Locale of the nutrition table. Also the fallback when a pantry lookup fails.
    pub fn locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn embed_nutrition(mut self, embed: bool) -> Self {
        self.embed_nutrition = Some(embed);
        self
    }

    /// Read the nutrition locale from a Grocy instance
    pub fn pantry(mut self, config: &PantryConfig) -> Self {
        self.locale_source = Some(LocaleSetting::Pantry(config.clone()));
        self
    }

    pub fn locale_source(mut self, source: impl LocaleSource + 'static) -> Self {
        self.locale_source = Some(LocaleSetting::Source(Box::new(source)));
        self
    }

    pub fn build(self) -> Result<RecipeImporter, ImportError> {
        let locale_source: Box<dyn LocaleSource> = match self.locale_source {
            Some(LocaleSetting::Pantry(config)) => Box::new(GrocyClient::new(&config)?),
            Some(LocaleSetting::Source(source)) => source,
            None => Box::new(self.locale),
        };

        Ok(RecipeImporter {
            fetcher: RequestFetcher::new(&self.fetch)?,
            locale_source,
            fallback_locale: self.locale,
            embed_nutrition: self.embed_nutrition.unwrap_or(true),
        })
    }
}
