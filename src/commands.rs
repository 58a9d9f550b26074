// SPDX-License-Identifier: MIT
//
// Subcommand implementations. Each returns the text to print and whether
// the run found problems; `main` owns stdout and the exit code.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use petal_contrast::{
    ActivationReport, ContrastEnforcer, DiagnosticReport, EnforcementReport, EnforcerConfig,
    MemoryTree, activate_theme, diagnose,
};
use petal_theme::{BaseTheme, ThemeActivated, builtin_names, builtin_theme, expand, require_builtin};
use serde::Serialize;
use tracing::info;

use crate::cli::{AuditArgs, EnforceArgs, ExpandArgs, ExpandFormat};

/// Text for stdout and whether the run should exit non-zero.
#[derive(Debug)]
pub struct Output {
    pub text: String,
    pub failed: bool,
}

/// A builtin name, or a path to a palette JSON file.
pub fn load_theme(theme: &str) -> Result<BaseTheme> {
    let path = Path::new(theme);
    if path.extension().is_some_and(|ext| ext == "json") || path.is_file() {
        let text = fs::read_to_string(path).with_context(|| format!("reading palette {}", path.display()))?;
        return BaseTheme::from_json(&text).with_context(|| format!("parsing palette {}", path.display()));
    }
    require_builtin(theme).with_context(|| format!("builtin palettes: {}", builtin_names().join(", ")))
}

fn load_tree(path: &Path) -> Result<MemoryTree> {
    let text = fs::read_to_string(path).with_context(|| format!("reading tree {}", path.display()))?;
    MemoryTree::from_json(&text).with_context(|| format!("parsing tree {}", path.display()))
}

fn load_config(args: &EnforceArgs) -> Result<EnforcerConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path).with_context(|| format!("reading config {}", path.display()))?;
            EnforcerConfig::from_json(&text).with_context(|| format!("parsing config {}", path.display()))?
        }
        None => EnforcerConfig::default(),
    };
    if let Some(min_ratio) = args.min_ratio {
        config = config.with_min_ratio(min_ratio);
    }
    Ok(config)
}

// ─── expand ──────────────────────────────────────────────────────────────────

pub fn run_expand(args: &ExpandArgs) -> Result<Output> {
    let base = load_theme(&args.theme)?;
    let set = expand(&base);
    let text = match args.format {
        ExpandFormat::Css => set.to_css(),
        ExpandFormat::Json => serde_json::to_string_pretty(&set)?,
    };
    let violations = set.pair_violations();
    Ok(Output { text, failed: !violations.is_empty() })
}

// ─── audit ───────────────────────────────────────────────────────────────────

pub fn run_audit(args: &AuditArgs) -> Result<Output> {
    let mut tree = load_tree(&args.tree)?;
    if let Some(theme) = &args.theme {
        let base = load_theme(theme)?;
        ThemeActivated::from_base(&base).publish(&mut tree);
        info!(theme = %base.id, "theme variables published");
    }
    let report = diagnose(&tree, args.min_ratio)?;
    let text = if args.json { serde_json::to_string_pretty(&report)? } else { render_diagnostics(&report) };
    Ok(Output { text, failed: !report.is_clean() })
}

// ─── enforce ─────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct EnforceSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    theme_id: Option<String>,
    enforcement: EnforcementReport,
    diagnostics: DiagnosticReport,
}

impl From<ActivationReport> for EnforceSummary {
    fn from(report: ActivationReport) -> Self {
        Self { theme_id: Some(report.theme_id), enforcement: report.enforcement, diagnostics: report.diagnostics }
    }
}

pub fn run_enforce(args: &EnforceArgs) -> Result<Output> {
    let mut tree = load_tree(&args.tree)?;
    let config = load_config(args)?;
    let min_ratio = config.min_ratio;
    let mut enforcer = ContrastEnforcer::new(config);
    let summary: EnforceSummary = match &args.theme {
        Some(theme) => activate_theme(&load_theme(theme)?, &mut tree, &mut enforcer)?.into(),
        None => EnforceSummary {
            theme_id: None,
            enforcement: enforcer.enforce(&mut tree)?,
            diagnostics: diagnose(&tree, min_ratio)?,
        },
    };
    let text = if args.json {
        serde_json::to_string_pretty(&summary)?
    } else {
        let mut text = render_enforcement(&summary.enforcement);
        text.push_str(&render_diagnostics(&summary.diagnostics));
        text
    };
    Ok(Output { text, failed: !summary.diagnostics.is_clean() })
}

// ─── themes ──────────────────────────────────────────────────────────────────

pub fn run_themes() -> Output {
    let mut text = String::new();
    for name in builtin_names() {
        if let Some(base) = builtin_theme(name) {
            let mode = if base.is_light() { "light" } else { "dark" };
            let _ = writeln!(text, "{name:<22}{mode:<7}{}", base.name);
        }
    }
    Output { text, failed: false }
}

// ─── Rendering ───────────────────────────────────────────────────────────────

fn render_enforcement(report: &EnforcementReport) -> String {
    format!(
        "examined {} elements, {} candidates: {} recolored, {} overlays, {} skipped\n",
        report.examined, report.selected, report.adjusted, report.overlays, report.skipped
    )
}

fn render_diagnostics(report: &DiagnosticReport) -> String {
    let mut text = String::new();
    let _ = writeln!(
        text,
        "checked {} elements: {} violations ({} critical)",
        report.elements_checked,
        report.violations.len(),
        report.critical().count()
    );
    for v in &report.violations {
        let marker = if v.is_critical() { "!!" } else { " !" };
        let _ = writeln!(
            text,
            "{marker} {:>5.2}:1 < {:.1}  {} on {}  {}",
            v.ratio, v.threshold, v.foreground, v.background, v.descriptor
        );
    }
    text
}
