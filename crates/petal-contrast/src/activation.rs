// SPDX-License-Identifier: MIT
//
// Theme activation: the one place the pieces are sequenced.
//
//   publish variables → undo previous fixes → settle → enforce → audit
//
// The tree receives the variables (it is the style sink) so its computed
// styles reflect the new theme before the enforcer looks at them.

use std::thread;
use std::time::Duration;

use petal_theme::{BaseTheme, StyleSink, ThemeActivated};
use serde::Serialize;
use tracing::{debug, info, info_span};

use crate::diagnose::{DiagnosticReport, diagnose};
use crate::enforce::{ContrastEnforcer, EnforcementReport};
use crate::error::Result;
use crate::tree::VisualTreeMut;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivationReport {
    pub theme_id: String,
    /// Engine writes undone from the previous theme.
    pub reset: usize,
    pub enforcement: EnforcementReport,
    /// Audit after enforcement at the configured base threshold.
    pub diagnostics: DiagnosticReport,
}

/// Apply an already-expanded theme to `tree`.
///
/// # Errors
///
/// [`crate::ContrastError::NoRoot`] when the tree has no root.
pub fn activate<T: VisualTreeMut + StyleSink>(
    event: &ThemeActivated,
    tree: &mut T,
    enforcer: &mut ContrastEnforcer,
) -> Result<ActivationReport> {
    let _span = info_span!("activate", theme = %event.theme_id).entered();
    event.publish(tree);
    let reset = enforcer.reset(tree);

    let delay = enforcer.config().settle_delay_ms;
    if delay > 0 {
        debug!(delay_ms = delay, "waiting for styles to settle");
        thread::sleep(Duration::from_millis(delay));
    }

    let enforcement = enforcer.enforce(tree)?;
    let diagnostics = diagnose(tree, enforcer.config().min_ratio)?;
    info!(
        theme = %event.theme_name,
        adjusted = enforcement.adjusted,
        remaining = diagnostics.violations.len(),
        "theme activated"
    );
    Ok(ActivationReport { theme_id: event.theme_id.clone(), reset, enforcement, diagnostics })
}

/// Expand `base` and activate it.
///
/// # Errors
///
/// As [`activate`].
pub fn activate_theme<T: VisualTreeMut + StyleSink>(
    base: &BaseTheme,
    tree: &mut T,
    enforcer: &mut ContrastEnforcer,
) -> Result<ActivationReport> {
    activate(&ThemeActivated::from_base(base), tree, enforcer)
}
