//! Where expanded variables go.
//!
//! The expander never touches a document. It publishes through a
//! [`StyleSink`], and theme changes are announced with a
//! [`ThemeActivated`] event carrying the finished variable set.

use std::collections::BTreeMap;

use crate::expand::expand;
use crate::palette::BaseTheme;
use crate::vars::ThemeVariableSet;

/// A destination for CSS custom properties.
pub trait StyleSink {
    /// Set `name` (including the leading `--`) to `value`.
    fn set_variable(&mut self, name: &str, value: &str);

    /// Drop every variable previously set through this sink.
    fn clear_variables(&mut self);
}

/// A sink that just records what it was given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySink {
    variables: BTreeMap<String, String>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.variables.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.variables.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl StyleSink for MemorySink {
    fn set_variable(&mut self, name: &str, value: &str) {
        self.variables.insert(name.to_string(), value.to_string());
    }

    fn clear_variables(&mut self) {
        self.variables.clear();
    }
}

/// Emitted once per theme change. Consumers: the style layer (publishes
/// `variables`) and the contrast enforcer (re-checks the page).
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeActivated {
    pub theme_id: String,
    pub theme_name: String,
    pub variables: ThemeVariableSet,
}

impl ThemeActivated {
    /// Expand `base` and wrap the result.
    #[must_use]
    pub fn from_base(base: &BaseTheme) -> Self {
        Self {
            theme_id: base.id.clone(),
            theme_name: base.name.clone(),
            variables: expand(base),
        }
    }

    /// Publish the variables to `sink`.
    pub fn publish(&self, sink: &mut dyn StyleSink) {
        self.variables.publish(sink);
    }
}
