use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;

/// Ordered set of CSS declarations
///
/// Properties keep the position of their first assignment; setting an
/// existing property again replaces its value in place. That keeps output
/// deterministic for a given sequence of rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Style {
    props: Vec<(String, String)>,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, property: &str, value: impl Into<String>) -> &mut Self {
        let value = value.into();
        match self.props.iter_mut().find(|(p, _)| p == property) {
            Some(entry) => entry.1 = value,
            None => self.props.push((property.to_string(), value)),
        }
        self
    }

    /// Builder form of [`Style::set`]
    pub fn with(mut self, property: &str, value: impl Into<String>) -> Self {
        self.set(property, value);
        self
    }

    /// Set only when `value` is present
    pub fn set_opt(&mut self, property: &str, value: Option<impl Into<String>>) -> &mut Self {
        if let Some(value) = value {
            self.set(property, value);
        }
        self
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.props
            .iter()
            .find(|(p, _)| p == property)
            .map(|(_, v)| v.as_str())
    }

    pub fn remove(&mut self, property: &str) -> Option<String> {
        let index = self.props.iter().position(|(p, _)| p == property)?;
        Some(self.props.remove(index).1)
    }

    /// Apply every declaration of `other` on top of `self`
    pub fn merge(&mut self, other: &Style) -> &mut Self {
        for (property, value) in &other.props {
            self.set(property, value.clone());
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }

    pub fn len(&self) -> usize {
        self.props.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.props.iter().map(|(p, v)| (p.as_str(), v.as_str()))
    }

    /// Inline `style` attribute value
    pub fn to_css(&self) -> String {
        self.props
            .iter()
            .map(|(p, v)| format!("{}: {};", p, v))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

impl Serialize for Style {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.props.len()))?;
        for (property, value) in &self.props {
            map.serialize_entry(property, value)?;
        }
        map.end()
    }
}

impl<'a> FromIterator<(&'a str, String)> for Style {
    fn from_iter<I: IntoIterator<Item = (&'a str, String)>>(iter: I) -> Self {
        let mut style = Style::new();
        for (property, value) in iter {
            style.set(property, value);
        }
        style
    }
}
