use clap::{Args, Parser, Subcommand};
use log::{error, info};
use serde::Serialize;
use tokio::io::AsyncReadExt;

use recipe_buddy_import::pantry::{DraftOptions, GrocyClient, PantryRecipeDraft};
use recipe_buddy_import::{load_config, HydratedRecipe, ImportConfig, Locale, RecipeImporter};

#[derive(Parser)]
#[command(name = "recipe-buddy-import", version, about = "Import Schema.org recipes from web pages")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch a recipe page and print the extracted recipe as JSON
    Url {
        url: String,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Extract a recipe from an HTML file ("-" reads stdin)
    Html {
        path: String,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Check the connection to the configured pantry service
    CheckPantry,
}

#[derive(Args)]
struct OutputArgs {
    /// Locale of the nutrition table (overrides config and pantry lookup)
    #[arg(long)]
    locale: Option<Locale>,
    /// Print the pantry recipe body instead of the extracted recipe
    #[arg(long)]
    pantry_draft: bool,
    /// Embed a YouTube player in the pantry recipe body
    #[arg(long)]
    embed_video: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let cli = Cli::parse();
    let config = load_config()?;

    match cli.command {
        Command::Url { url, output } => {
            let importer = importer(&config, &output)?;
            let hydrated = importer.import_url(&url).await.inspect_err(|e| {
                error!("Failed to import {}: {}", url, e);
            })?;
            print_result(hydrated, &config, &output)
        }
        Command::Html { path, output } => {
            let html = read_html(&path).await?;
            let importer = importer(&config, &output)?;
            let hydrated = importer.import_html(&html).await.inspect_err(|e| {
                error!("Failed to import {}: {}", path, e);
            })?;
            print_result(hydrated, &config, &output)
        }
        Command::CheckPantry => {
            let pantry = config
                .pantry
                .as_ref()
                .ok_or("No pantry service configured (set RECIPE_BUDDY__PANTRY__BASE_URL)")?;
            let info = GrocyClient::new(pantry)?.system_info().await?;
            info!("Connected to Grocy {}", info.grocy_version.version);
            print_json(&info.grocy_version.version)
        }
    }
}

fn importer(
    config: &ImportConfig,
    output: &OutputArgs,
) -> Result<RecipeImporter, Box<dyn std::error::Error>> {
    let mut builder = RecipeImporter::builder()
        .fetch_config(config.fetch.clone())
        .locale(output.locale.unwrap_or(config.locale))
        // the draft embeds nutrition itself
        .embed_nutrition(config.embed_nutrition && !output.pantry_draft);

    match (output.locale, &config.pantry) {
        (Some(locale), _) => builder = builder.locale_source(locale),
        (None, Some(pantry)) => builder = builder.pantry(pantry),
        (None, None) => {}
    }

    Ok(builder.build()?)
}

async fn read_html(path: &str) -> Result<String, std::io::Error> {
    if path == "-" {
        let mut html = String::new();
        tokio::io::stdin().read_to_string(&mut html).await?;
        Ok(html)
    } else {
        tokio::fs::read_to_string(path).await
    }
}

fn print_result(
    hydrated: HydratedRecipe,
    config: &ImportConfig,
    output: &OutputArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    if !output.pantry_draft {
        return print_json(&hydrated);
    }

    let options = DraftOptions {
        embed_nutrition: config.embed_nutrition,
        embed_video: output.embed_video,
        locale: hydrated.locale,
    };
    print_json(&PantryRecipeDraft::from_recipe(&hydrated.recipe, &options))
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
