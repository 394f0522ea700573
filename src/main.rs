// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use anyhow::{bail, Context, Result};
use ingest_designer::compat::{allowed_destinations, allowed_sources};
use ingest_designer::config::{load_settings, EditorSettings};
use ingest_designer::graph::WorkflowGraph;
use ingest_designer::model::{Category, TaskTable};
use ingest_designer::observability::init_tracing;
use ingest_designer::schema::{build_form, FieldValues, SchemaRegistry};
use ingest_designer::serialize::{TaskBatch, WorkflowDocument};
use ingest_designer::session::EditorSession;
use ingest_designer::store::JsonFileStore;
use std::env;
use std::fs;
use std::path::PathBuf;

fn usage(program: &str) -> String {
    format!(
        "Usage: {program} [--settings <editor.toml>] <command>\n\
         \n\
         Commands:\n\
         \x20 categories                   list task categories and what they allow\n\
         \x20 schema <category>            print the configuration form for a category\n\
         \x20 reconcile <tasks.json>       fix incompatible sources/destinations, print the table\n\
         \x20 canonicalize <workflow.json> rewrite a saved workflow in canonical form\n\
         \x20 import <tasks.json>          reconcile a task file and upsert it into the store\n\
         \x20 workflows                    list workflows saved in the store"
    )
}

#[tokio::main]
async fn main() -> Result<()> {
    let mut args: Vec<String> = env::args().collect();
    let program = args.remove(0);

    let mut settings_path: Option<PathBuf> = None;
    if args.first().map(String::as_str) == Some("--settings") {
        if args.len() < 2 {
            bail!("--settings needs a file\n\n{}", usage(&program));
        }
        settings_path = Some(PathBuf::from(args.remove(1)));
        args.remove(0);
    }

    let settings = match &settings_path {
        Some(path) => load_settings(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => EditorSettings::default(),
    };
    init_tracing(&settings.log_filter);

    match args.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
        ["categories"] => print_categories(),
        ["schema", category] => print_schema(&settings, category)?,
        ["reconcile", path] => reconcile_file(path)?,
        ["canonicalize", path] => canonicalize_file(&settings, path)?,
        ["import", path] => import_file(settings, path).await?,
        ["workflows"] => list_workflows(settings).await?,
        _ => {
            eprintln!("{}", usage(&program));
            std::process::exit(2);
        }
    }

    Ok(())
}

fn print_categories() {
    for category in Category::all() {
        let sources: Vec<String> = allowed_sources(*category)
            .iter()
            .map(|s| format!("{} ({})", s, s.label()))
            .collect();
        let destinations: Vec<String> = allowed_destinations(*category)
            .iter()
            .map(|d| format!("{} ({})", d, d.label()))
            .collect();
        let rules: Vec<String> = category
            .rule_kinds()
            .iter()
            .map(|k| format!("{} ({})", k, k.label()))
            .collect();

        println!("{} ({})", category.wire_name(), category.label());
        println!("  sources:      {}", sources.join(", "));
        println!("  destinations: {}", destinations.join(", "));
        if !rules.is_empty() {
            println!("  rules:        {}", rules.join(", "));
        }
    }
}

fn print_schema(settings: &EditorSettings, category: &str) -> Result<()> {
    let category: Category = category.parse().map_err(anyhow::Error::msg)?;
    let registry = SchemaRegistry::load_or_builtin(settings.schemas.path.as_deref())
        .context("loading field schemas")?;

    let form = build_form(
        category,
        registry.fields_for(category),
        "",
        &FieldValues::new(),
        &FieldValues::new(),
    );
    println!("{}", serde_json::to_string_pretty(&form)?);
    Ok(())
}

fn reconcile_file(path: &str) -> Result<()> {
    let content = fs::read_to_string(path).with_context(|| format!("reading {}", path))?;
    let batch = TaskBatch::from_json_str(&content).with_context(|| format!("parsing {}", path))?;

    let mut table = TaskTable::new();
    let report = table.replace(batch.tasks);

    for correction in &report.corrections {
        if let Some((from, to)) = correction.source {
            eprintln!("{}: source {} -> {}", correction.task_id, from, to);
        }
        if let Some((from, to)) = correction.destination {
            eprintln!("{}: destination {} -> {}", correction.task_id, from, to);
        }
    }

    let batch = TaskBatch::new(table.into());
    println!("{}", serde_json::to_string_pretty(&batch)?);
    Ok(())
}

fn canonicalize_file(settings: &EditorSettings, path: &str) -> Result<()> {
    let content = fs::read_to_string(path).with_context(|| format!("reading {}", path))?;
    let document: WorkflowDocument =
        serde_json::from_str(&content).with_context(|| format!("parsing {}", path))?;

    let graph = WorkflowGraph::from_document(&document, settings.canvas);
    println!("{}", serde_json::to_string_pretty(&graph.to_document())?);
    Ok(())
}

async fn import_file(settings: EditorSettings, path: &str) -> Result<()> {
    let content = fs::read_to_string(path).with_context(|| format!("reading {}", path))?;
    let batch = TaskBatch::from_json_str(&content).with_context(|| format!("parsing {}", path))?;

    let store = JsonFileStore::new(&settings.store.directory);
    let mut session = EditorSession::from_settings(settings).context("loading field schemas")?;
    let report = session.tasks_mut().replace(batch.tasks);

    let notification = session.save_tasks(&store).await;
    println!(
        "{} ({} task(s), {} corrected)",
        notification.message,
        session.tasks().len(),
        report.corrections.len()
    );
    if notification.is_error() {
        bail!("import into {} failed", store.directory().display());
    }
    Ok(())
}

async fn list_workflows(settings: EditorSettings) -> Result<()> {
    let store = JsonFileStore::new(&settings.store.directory);
    let session = EditorSession::from_settings(settings).context("loading field schemas")?;
    for name in session.list_workflows(&store).await {
        println!("{}", name);
    }
    Ok(())
}
