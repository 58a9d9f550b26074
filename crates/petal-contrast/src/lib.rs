// SPDX-License-Identifier: MIT
//
// petal-contrast — page-wide contrast enforcement.
//
// Runs against any host tree implementing `VisualTree`/`VisualTreeMut`.
// A pass is: select candidates (`select`), find what each is drawn on
// (`background`), measure (`inspect`), then either fix (`enforce`) or
// report (`diagnose`). `activation` sequences a theme change end to end.
// `memory` is the in-process tree used by tests and the CLI.

pub mod activation;
pub mod background;
pub mod config;
pub mod diagnose;
pub mod enforce;
pub mod error;
pub mod inspect;
pub mod memory;
pub mod select;
pub mod tree;

pub use activation::{ActivationReport, activate, activate_theme};
pub use background::{BackgroundDescriptor, EffectiveBackground, average_of, effective_background};
pub use config::{EnforcerConfig, OverlayPolicy};
pub use diagnose::{ContrastViolation, DiagnosticReport, diagnose, scan};
pub use enforce::{ContrastEnforcer, EnforcementReport, NodeOutcome};
pub use error::{ContrastError, Result};
pub use inspect::{Measurement, Thresholds};
pub use memory::{ElementSpec, MemoryTree};
pub use select::{Candidate, Region};
pub use tree::{ComputedStyle, ElementMeta, NodeId, Overlay, OverlayId, VisualTree, VisualTreeMut};
