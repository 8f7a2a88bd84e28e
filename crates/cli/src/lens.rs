use mapperlens_api::{Hint, HostDocument, LensCommand};
use mapperlens_core::{LensConfig, SourceDocument, WorkspaceFolders};
use std::path::PathBuf;
use std::sync::Arc;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct LensRow {
    #[tabled(rename = "Line")]
    line: u32,
    #[tabled(rename = "Method")]
    method: String,
    #[tabled(rename = "Action")]
    action: &'static str,
    #[tabled(rename = "Target")]
    target: String,
}

pub async fn run(
    path: PathBuf,
    workspace: Option<PathBuf>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let path = std::fs::canonicalize(&path)?;
    let workspace = match workspace {
        Some(dir) => std::fs::canonicalize(dir)?,
        None => std::env::current_dir()?,
    };

    let config = LensConfig::load(&workspace)?;
    let folders = Arc::new(WorkspaceFolders::new(vec![workspace]));
    let correlator = mapperlens_runtime::build_default_correlator(config, folders)?;

    let document = SourceDocument::from_path(&path)?;
    let hints = correlator.compute_hints(&document).await?;
    tracing::info!("{} lenses for {}", hints.len(), path.display());

    if json {
        println!("{}", serde_json::to_string_pretty(&hints)?);
        return Ok(());
    }

    if hints.is_empty() {
        println!("No mapper lenses for {}", path.display());
        return Ok(());
    }

    let rows: Vec<LensRow> = hints.iter().map(|hint| row(&document, hint)).collect();
    println!("{}", Table::new(rows).with(Style::rounded()));
    Ok(())
}

fn row(document: &SourceDocument, hint: &Hint) -> LensRow {
    let text = document.text();
    let index = document.line_index();
    let start = index.offset_at(text, hint.range.start);
    let end = index.offset_at(text, hint.range.end);

    let target = match &hint.command {
        LensCommand::Navigate { uri, selection } => {
            format!("{}:{}", uri, selection.start.line + 1)
        }
        LensCommand::Generate { uri, position, .. } => {
            format!("{}:{} (new)", uri, position.line + 1)
        }
    };

    LensRow {
        line: hint.range.start.line + 1,
        method: text[start..end].to_string(),
        action: hint.command.title(),
        target,
    }
}
