use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use postly::fonts::{self, FontBook, FontCatalog, FontLoader, LoadState};
use postly::models::{
    AppConfig, BackgroundType, Color, FontFamily, FooterPosition, GradientDirection, PostConfig,
    PostSize,
};
use postly::rendering::{Exporter, ImageFormat};
use postly::PostSession;

#[derive(Parser)]
#[command(name = "postly")]
#[command(about = "Render social media post images from a declarative config")]
struct Cli {
    /// Application config file (overrides POSTLY_CONFIG)
    #[arg(long, global = true)]
    app_config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a post and export it as PNG or JPEG
    Render {
        /// Post config YAML (defaults are used for missing fields)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output file name, relative to the export directory
        #[arg(short, long)]
        output: Option<String>,

        /// Image format: png, jpg or jpeg
        #[arg(short, long, default_value = "png")]
        format: ImageFormat,

        /// Size preset, e.g. "Story / Portrait"
        #[arg(long)]
        size: Option<String>,

        /// Main text; use \n for line breaks
        #[arg(long)]
        text: Option<String>,

        /// Font family, e.g. "Open Sans"
        #[arg(long)]
        font: Option<String>,

        /// Footer text
        #[arg(long)]
        footer: Option<String>,

        /// Footer position, e.g. top-left
        #[arg(long)]
        footer_position: Option<FooterPosition>,

        /// Solid background color
        #[arg(long)]
        background: Option<Color>,

        /// Gradient preset name (Ocean, Sunset, Forest, Purple, Fire, Sky)
        #[arg(long)]
        gradient: Option<String>,

        /// Render with fallback fonts instead of waiting for downloads
        #[arg(long)]
        no_wait: bool,
    },
    /// List or search the font catalog
    Fonts {
        /// Case-insensitive family name filter
        #[arg(short, long)]
        search: Option<String>,

        /// Maximum number of families to show
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Write a post config with default values
    Init {
        /// Destination file
        #[arg(default_value = "post.yaml")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long, short)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "postly=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let config_path = cli
        .app_config
        .or_else(|| std::env::var("POSTLY_CONFIG").ok().map(PathBuf::from));
    let mut app_config = AppConfig::load(config_path.as_deref());
    if let Ok(key) = std::env::var("GOOGLE_FONTS_API_KEY") {
        app_config.fonts.api_key = Some(key);
    }

    match cli.command {
        Some(Commands::Render {
            config,
            output,
            format,
            size,
            text,
            font,
            footer,
            footer_position,
            background,
            gradient,
            no_wait,
        }) => {
            let mut post = match config {
                Some(path) => PostConfig::load(&path)?,
                None => PostConfig::default(),
            };
            if let Some(name) = size {
                post = post.with_size(PostSize::preset(&name)?);
            }
            if let Some(text) = text {
                post.main_text = text.replace("\\n", "\n");
            }
            if let Some(font) = font {
                post = post.with_font(FontFamily::new(&font));
            }
            if let Some(footer) = footer {
                post.footer_text = footer;
            }
            if let Some(position) = footer_position {
                post.footer_position = position;
            }
            if let Some(color) = background {
                post.background_type = BackgroundType::Solid;
                post.background_color = color;
            }
            if let Some(preset) = gradient {
                post = post.with_gradient_preset(&preset)?;
            }
            run_render_command(&app_config, post, format, output.as_deref(), !no_wait).await
        }
        Some(Commands::Fonts { search, limit }) => {
            run_fonts_command(&app_config, search.as_deref().unwrap_or(""), limit).await
        }
        Some(Commands::Init { path, force }) => run_init_command(&path, force),
        None => {
            run_status_command(&app_config, config_path.as_deref());
            Ok(())
        }
    }
}

async fn run_render_command(
    app_config: &AppConfig,
    post: PostConfig,
    format: ImageFormat,
    output: Option<&str>,
    wait_for_font: bool,
) -> anyhow::Result<()> {
    post.validate()?;

    let client = fonts::http_client(&app_config.fonts)?;
    let loader = FontLoader::new(
        client.clone(),
        &app_config.fonts,
        FontBook::with_system_fonts(),
    );

    let font = post.font.clone();
    if wait_for_font && !font.is_system() {
        // Weights from the catalog entry when there is one
        let catalog = FontCatalog::new(client, &app_config.fonts);
        let variants = catalog
            .find(font.as_str())
            .await
            .map(|entry| entry.variants)
            .unwrap_or_default();
        if loader.ensure_loaded_with(font.as_str(), &variants).await == LoadState::Failed {
            tracing::warn!(font = %font, "Font unavailable, rendering with fallback");
        }
    }

    let mut session = PostSession::new(post.clone(), loader, Exporter::new(&app_config.export));
    session.apply(post)?;

    let exported = session.export(format, output)?;
    println!(
        "Rendered {} ({}, {} bytes)",
        exported.path.display(),
        exported.format.mime_type(),
        exported.bytes
    );
    Ok(())
}

async fn run_fonts_command(
    app_config: &AppConfig,
    search: &str,
    limit: Option<usize>,
) -> anyhow::Result<()> {
    let client = fonts::http_client(&app_config.fonts)?;
    let catalog = FontCatalog::new(client, &app_config.fonts);
    let limit = limit.unwrap_or(app_config.fonts.display_limit);

    let found = catalog.search(search, limit).await;
    if found.is_empty() {
        println!("No fonts match '{search}'");
        return Ok(());
    }
    for font in &found {
        println!("  {:<32} {}", font.family, font.category);
    }
    if catalog.cached().is_none() {
        println!("\n(catalog unavailable, showing built-in list)");
    }
    Ok(())
}

fn run_init_command(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }
    let yaml = PostConfig::default().to_yaml_string()?;
    std::fs::write(path, yaml)?;
    println!("Wrote {}", path.display());
    Ok(())
}

fn run_status_command(app_config: &AppConfig, config_path: Option<&Path>) {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    println!("Postly v{VERSION}");
    println!("Social media post images from a declarative config\n");

    println!("Configuration:");
    println!(
        "  Config file  = {}",
        config_path
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(defaults)".to_string())
    );
    println!("  Catalog      = {}", app_config.fonts.catalog_url);
    println!(
        "  API key      = {}",
        if app_config.fonts.api_key.is_some() {
            "set"
        } else {
            "(not set)"
        }
    );
    println!("  Stylesheets  = {}", app_config.fonts.stylesheet_url);
    println!(
        "  Output dir   = {}",
        app_config.export.output_dir.display()
    );

    println!("\nSize presets:");
    for size in PostSize::presets() {
        println!("  {:<20} {}x{}", size.name, size.width, size.height);
    }

    println!("\nGradient directions:");
    for direction in GradientDirection::ALL {
        println!("  {:<20} {}", direction.as_str(), direction.label());
    }

    println!("\nCommands:");
    println!("  postly render   Render a post to PNG or JPEG");
    println!("  postly fonts    List or search the font catalog");
    println!("  postly init     Write a default post config");
    println!("\nRun 'postly --help' for more details.");
}
