use serde::{Deserialize, Serialize};

pub const DEFAULT_PRIMARY_COLOR: &str = "#2563eb";
pub const DEFAULT_TEXT_COLOR: &str = "#1a1a1a";
pub const DEFAULT_BACKGROUND_COLOR: &str = "#ffffff";
pub const DEFAULT_FONT_FAMILY: &str = "Arial, Helvetica, sans-serif";

/// Theme configuration shared by the style layer and both renderers
///
/// Only `primaryColor` is required; the accessors fall back to fixed defaults
/// for everything else. `Theme::default()` is what renderers use when no
/// theme has been provided at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub primary_color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
}

impl Theme {
    pub fn new(primary_color: impl Into<String>) -> Self {
        Self {
            primary_color: primary_color.into(),
            text_color: None,
            background_color: None,
            font_family: None,
        }
    }

    pub fn text_color(&self) -> &str {
        self.text_color.as_deref().unwrap_or(DEFAULT_TEXT_COLOR)
    }

    pub fn background_color(&self) -> &str {
        self.background_color
            .as_deref()
            .unwrap_or(DEFAULT_BACKGROUND_COLOR)
    }

    pub fn font_family(&self) -> &str {
        self.font_family.as_deref().unwrap_or(DEFAULT_FONT_FAMILY)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(DEFAULT_PRIMARY_COLOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_fields_fall_back() {
        let theme: Theme = serde_json::from_str(r##"{ "primaryColor": "#ff0066" }"##).unwrap();
        assert_eq!(theme.primary_color, "#ff0066");
        assert_eq!(theme.text_color(), DEFAULT_TEXT_COLOR);
        assert_eq!(theme.background_color(), DEFAULT_BACKGROUND_COLOR);
        assert_eq!(theme.font_family(), DEFAULT_FONT_FAMILY);
    }

    #[test]
    fn test_primary_color_is_required() {
        let result: Result<Theme, _> = serde_json::from_str(r##"{ "textColor": "#000" }"##);
        assert!(result.is_err());
    }
}
