//! # petal-theme — accessible theme expansion
//!
//! Turns a handful of designer-chosen base colors into the full set of
//! role variables a storefront stylesheet reads, with readable text on
//! every role background.
//!
//! # Architecture
//!
//! ```text
//! BaseTheme (builtin.rs presets or JSON)
//!     │
//!     ▼
//! palette.rs:  fill optional roles (hover, tertiary, border)
//!     │
//!     ▼
//! expand.rs:   anchor role backgrounds, derive every Var
//!     │        (contrast.rs: stepping search, headroom)
//!     ▼
//! vars.rs:     ThemeVariableSet + CONTRAST_PAIRS
//!     │
//!     ▼
//! sink.rs:     StyleSink / ThemeActivated
//! ```

pub mod builtin;
pub mod contrast;
pub mod error;
pub mod expand;
pub mod palette;
pub mod sink;
pub mod vars;

pub use builtin::{builtin_names, builtin_theme, require_builtin};
pub use error::{Result, ThemeError};
pub use expand::expand;
pub use palette::{BaseTheme, Palette};
pub use sink::{MemorySink, StyleSink, ThemeActivated};
pub use vars::{CONTRAST_PAIRS, ContrastPair, ThemeVariableSet, Var, VarValue};
