//! Sketchpad CLI - drive and inspect the stored drawing from the command line.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sketchpad_app::{AppConfig, Replayer, script};
use sketchpad_core::{Editor, ElementKind, FileStorage};
use sketchpad_render::{SvgPainter, export_svg};
use std::path::{Path, PathBuf};

/// Sketchpad - headless drawing surface
#[derive(Parser)]
#[command(name = "sketchpad")]
#[command(about = "Replay, export and inspect Sketchpad drawings")]
struct Cli {
    /// Config file (default: platform config dir)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Storage directory, overriding the config
    #[arg(short, long)]
    storage: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Feed a JSON event script through the editor
    Replay {
        /// Script file
        script: PathBuf,

        /// Also write the final surface as SVG
        #[arg(long)]
        svg: Option<PathBuf>,
    },

    /// Render the stored drawing to an SVG file
    Export {
        /// Output file
        output: PathBuf,
    },

    /// Print a summary of the stored drawing
    Show,

    /// Delete every element of the stored drawing
    Clear,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref())?;
    let storage = config.open_storage(cli.storage.as_deref())?;
    let editor = Editor::open(storage, &config.editor).context("Failed to load drawing")?;
    log::info!("Loaded {} elements", editor.document().len());

    match cli.command {
        Commands::Replay { script, svg } => replay(editor, &config, &script, svg.as_deref()),
        Commands::Export { output } => export(&editor, &config, &output),
        Commands::Show => {
            show(&editor);
            Ok(())
        }
        Commands::Clear => clear(editor, &config),
    }
}

fn surface(config: &AppConfig) -> Result<SvgPainter> {
    let size = config.editor.viewport_size();
    SvgPainter::new(size.width, size.height).context("Failed to create surface")
}

/// Run a script against the stored drawing.
fn replay(
    mut editor: Editor<FileStorage>,
    config: &AppConfig,
    script_path: &Path,
    svg: Option<&Path>,
) -> Result<()> {
    let json = std::fs::read_to_string(script_path)
        .with_context(|| format!("Failed to read script {}", script_path.display()))?;
    let steps = script::parse(&json)
        .with_context(|| format!("Invalid script {}", script_path.display()))?;

    let mut painter = surface(config)?;
    editor.redraw(&mut painter);
    Replayer::default()
        .run(&mut editor, &mut painter, &steps)
        .context("Replay failed")?;
    log::info!(
        "Replayed {} steps, drawing has {} elements",
        steps.len(),
        editor.document().len()
    );

    if let Some(path) = svg {
        let mut file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        painter.write_svg(&mut file)?;
        println!("Wrote {}", path.display());
    }
    Ok(())
}

/// Render the stored drawing to SVG.
fn export(editor: &Editor<FileStorage>, config: &AppConfig, output: &Path) -> Result<()> {
    let svg = export_svg(editor.document(), config.editor.viewport_size())?;
    std::fs::write(output, svg).with_context(|| format!("Failed to write {}", output.display()))?;
    println!("Wrote {}", output.display());
    Ok(())
}

fn show(editor: &Editor<FileStorage>) {
    let doc = editor.document();
    println!(
        "{} ({})",
        editor.store().storage().base_path().display(),
        editor.store().key()
    );
    println!("Background: {}", doc.background);
    println!("Elements: {}", doc.len());
    for kind in [
        ElementKind::Rect,
        ElementKind::Ellipse,
        ElementKind::PenStroke,
        ElementKind::Text,
    ] {
        let count = doc.elements.iter().filter(|e| e.kind() == kind).count();
        if count > 0 {
            println!("  {}: {}", kind.name(), count);
        }
    }
    for (i, element) in doc.elements.iter().enumerate() {
        let anchor = element.anchor();
        match element.as_text() {
            Some(text) => {
                println!("  [{}] text {:?} at ({}, {})", i, text.text, anchor.x, anchor.y)
            }
            None => {
                let size = element.size();
                println!(
                    "  [{}] {} at ({}, {}) size {}x{}",
                    i,
                    element.kind().name(),
                    anchor.x,
                    anchor.y,
                    size.x,
                    size.y
                );
            }
        }
    }
}

/// Empty the stored drawing.
fn clear(mut editor: Editor<FileStorage>, config: &AppConfig) -> Result<()> {
    let mut painter = surface(config)?;
    let count = editor.document().len();
    editor.request_clear_all();
    editor
        .confirm_delete(&mut painter)
        .context("Failed to save cleared drawing")?;
    println!("Removed {} elements", count);
    Ok(())
}
