//! Config command - configuration management.

use anyhow::Result;
use clap::{Args, Subcommand};
use console::Style;

use chronicle_config::{Backend, resolve_api_key};

use super::Context;

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the resolved configuration and credential sources
    Show,

    /// Show which config files are loaded and their precedence
    Which,
}

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => cmd_show(ctx),
        ConfigCommand::Which => cmd_which(ctx),
    }
}

fn cmd_show(ctx: &Context) -> Result<()> {
    let loaded = ctx.load_config()?;
    let config = &loaded.config;
    let dim = Style::new().dim();

    println!("# Chronicle Configuration\n");

    // Sources
    let sources = loaded.loaded_from();
    if sources.is_empty() {
        println!("No config files loaded (using defaults)\n");
    } else {
        println!("Config files:");
        for source in &sources {
            println!("  {}", source.display());
        }
        println!();
    }

    // Generator
    println!("Generator:");
    println!("  backend: {}", config.backend());
    match config.template_path() {
        Some(path) => println!("  template: {}", path.display()),
        None => println!("  template: {}", dim.apply_to("(bundled)")),
    }
    println!();

    // Providers
    println!("Providers:");
    for backend in [Backend::HuggingFace, Backend::OpenAi] {
        let provider = config.provider(backend);
        let model = provider.model.as_deref().unwrap_or("(default)");
        let key_status = match resolve_api_key(backend, provider.api_key.as_deref()) {
            Some(secret) => format!("key from {}", secret.source),
            None => format!("no key (set {})", backend.env_var()),
        };
        println!(
            "  {:<12} {}  {}",
            backend.section(),
            model,
            dim.apply_to(key_status)
        );
        if let Some(ref url) = provider.base_url {
            println!("  {:<12} base_url: {}", "", url);
        }
    }
    println!();

    // Warnings
    if !loaded.warnings.is_empty() {
        println!("Warnings:");
        for w in &loaded.warnings {
            println!("  ⚠ {}", w);
        }
        println!();
    }

    if ctx.verbose {
        println!("---\nRaw config:\n");
        println!("{}", config.redacted().to_toml()?);
    }

    Ok(())
}

fn cmd_which(ctx: &Context) -> Result<()> {
    let loaded = ctx.load_config()?;

    println!("Config file search order (later overrides earlier):\n");

    for source in &loaded.sources {
        let status = if source.loaded {
            Style::new().green().apply_to("✓ loaded")
        } else {
            Style::new().dim().apply_to("· not found")
        };
        println!("  {} {}", status, source.path.display());
    }

    Ok(())
}
