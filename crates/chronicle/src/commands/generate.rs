//! Generate command - summarize dated content into a timeline.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use clap::Args;

use chronicle_config::{Backend, Credentials};
use chronicle_timeline::{
    ContentRow, TimelineTemplate, build_generator, generate_timeline, parse_rows,
};

use super::Context;

/// Arguments for the generate command.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// JSON array of {"date", "content"} rows ('-' reads stdin)
    #[arg(short, long)]
    pub rows: PathBuf,

    /// Topic the timeline is about
    #[arg(short, long)]
    pub topic: String,

    /// Summarization backend: huggingface, openai (default: from config)
    #[arg(short, long)]
    pub backend: Option<Backend>,

    /// TimelineJS template JSON (default: from config, else bundled)
    #[arg(long)]
    pub template: Option<PathBuf>,

    /// Write the timeline to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Run the generate command.
pub async fn run(args: GenerateArgs, ctx: &Context) -> Result<()> {
    let loaded = ctx.load_config()?;
    let config = &loaded.config;

    let backend = args.backend.unwrap_or_else(|| config.backend());
    let template_path = args.template.as_deref().or(config.template_path().map(PathBuf::as_path));
    let template = load_template(template_path)?;

    let credentials = Credentials::resolve(config);
    let generator = build_generator(backend, &config.provider(backend), &credentials, template)
        .with_context(|| format!("failed to set up the {} generator", backend))?;

    let rows = read_rows(&args.rows)?;
    let timeline = generate_timeline(generator.as_ref(), &rows, &args.topic)
        .await
        .context("timeline generation failed")?;

    // Hugging Face reports provider errors as an empty result.
    if backend == Backend::HuggingFace && !rows.is_empty() && timeline.is_empty() {
        anyhow::bail!(
            "timeline generation failed: the {} backend returned no summaries (see the log for the provider error)",
            backend
        );
    }

    let json = timeline.to_json_pretty()?;
    match args.output {
        Some(path) => {
            std::fs::write(&path, format!("{}\n", json))
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(
                path = %path.display(),
                items = timeline.len(),
                "timeline written"
            );
        }
        None => println!("{}", json),
    }

    Ok(())
}

fn load_template(path: Option<&Path>) -> Result<TimelineTemplate> {
    let template = match path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading timeline template");
            TimelineTemplate::load(path)?
        }
        None => TimelineTemplate::bundled()?,
    };
    Ok(template)
}

fn read_rows(path: &Path) -> Result<Vec<ContentRow>> {
    let json = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read rows from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read rows from {}", path.display()))?
    };
    Ok(parse_rows(&json)?)
}
