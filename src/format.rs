//! Output formatting for the CLI, as plain text or JSON.

use crate::config::LoadReport;
use crate::resources::ResourceIndex;
use serde_json::{Value, json};

/// Format a load report as `KEY = value (kind)` lines.
pub fn format_config_text(report: &LoadReport) -> String {
    let mut out = String::new();

    match &report.source {
        Some(path) => out.push_str(&format!("# source: {}\n", path.display())),
        None => out.push_str("# source: <environment only>\n"),
    }

    for (key, value) in report.config.iter() {
        out.push_str(&format!("{} = {} ({})\n", key, value, value.kind()));
    }

    if !report.invalid.is_empty() {
        out.push_str(&format!("\n# {} key(s) kept their raw value\n", report.invalid.len()));
        for err in &report.invalid {
            out.push_str(&format!("# {}\n", err));
        }
    }

    out
}

pub fn format_config_json(report: &LoadReport) -> Value {
    json!({
        "source": report.source,
        "config": report.config,
        "invalid": report.invalid,
    })
}

/// Format every category with its sorted files.
pub fn format_resources_text(index: &ResourceIndex) -> String {
    let mut out = String::new();

    if let Some(base) = index.base() {
        out.push_str(&format!("base: {}\n", base.display()));
    }

    for (name, files) in index.all() {
        let dir = index
            .category(name)
            .map(|c| c.dir().display().to_string())
            .unwrap_or_default();
        out.push_str(&format!("\n{} ({} files) {}\n", name, files.len(), dir));

        let mut sorted: Vec<_> = files.iter().collect();
        sorted.sort();
        for file in sorted {
            out.push_str(&format!("  {}\n", file.display()));
        }
    }

    out
}

pub fn format_resources_json(index: &ResourceIndex) -> Value {
    let categories: serde_json::Map<String, Value> = index
        .all()
        .into_iter()
        .map(|(name, files)| {
            let mut sorted: Vec<_> = files.iter().collect();
            sorted.sort();
            let dir = index.category(name).map(|c| c.dir().to_path_buf());
            (name.to_string(), json!({ "dir": dir, "files": sorted }))
        })
        .collect();

    json!({
        "base": index.base(),
        "categories": categories,
    })
}
