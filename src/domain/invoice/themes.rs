use serde::Serialize;

/// Preview color palette shown in the theme picker
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ThemePreview {
  pub primary: &'static str,
  pub secondary: &'static str,
  pub accent: &'static str,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub header_text: Option<&'static str>,
}

/// Metadata for a built-in invoice theme
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ThemeMetadata {
  pub id: &'static str,
  pub name: &'static str,
  pub description: &'static str,
  pub author: &'static str,
  pub version: &'static str,
  pub preview: ThemePreview,
}

pub const DEFAULT_THEME_ID: &str = "classic-white";

/// Built-in theme registry, in picker order
pub const THEMES: [ThemeMetadata; 4] = [
  ThemeMetadata {
    id: "classic-white",
    name: "Classic White",
    description: "Clean and timeless with subtle gray accents",
    author: "Invoicr",
    version: "1.0.0",
    preview: ThemePreview {
      primary: "#f9fafb",
      secondary: "#f9fafb",
      accent: "#6b7280",
      header_text: Some("#6b7280"),
    },
  },
  ThemeMetadata {
    id: "professional-blue",
    name: "Professional Blue",
    description: "Clean and modern with blue accents",
    author: "Invoicr",
    version: "1.0.0",
    preview: ThemePreview {
      primary: "#3b82f6",
      secondary: "#dbeafe",
      accent: "#1e40af",
      header_text: None,
    },
  },
  ThemeMetadata {
    id: "elegant-green",
    name: "Elegant Green",
    description: "Sophisticated with green highlights",
    author: "Invoicr",
    version: "1.0.0",
    preview: ThemePreview {
      primary: "#10b981",
      secondary: "#d1fae5",
      accent: "#047857",
      header_text: None,
    },
  },
  ThemeMetadata {
    id: "vibrant-orange",
    name: "Vibrant Orange",
    description: "Energetic and warm with orange accents",
    author: "Invoicr",
    version: "1.0.0",
    preview: ThemePreview {
      primary: "#f97316",
      secondary: "#fed7aa",
      accent: "#ea580c",
      header_text: None,
    },
  },
];

pub fn find_theme(id: &str) -> Option<&'static ThemeMetadata> {
  THEMES.iter().find(|theme| theme.id == id)
}

/// Resolves a theme id, falling back to the default for unknown ids
pub fn resolve_theme(id: Option<&str>) -> &'static ThemeMetadata {
  id.and_then(find_theme)
    .unwrap_or_else(|| find_theme(DEFAULT_THEME_ID).unwrap_or(&THEMES[0]))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_default_theme_exists() {
    assert!(find_theme(DEFAULT_THEME_ID).is_some());
  }

  #[test]
  fn test_resolve_falls_back_to_default() {
    assert_eq!(resolve_theme(Some("neon-pink")).id, DEFAULT_THEME_ID);
    assert_eq!(resolve_theme(None).id, DEFAULT_THEME_ID);
    assert_eq!(resolve_theme(Some("elegant-green")).id, "elegant-green");
  }

  #[test]
  fn test_metadata_carries_author_and_version() {
    let theme = resolve_theme(Some("classic-white"));
    let json = serde_json::to_value(theme).unwrap();

    assert_eq!(json["author"], "Invoicr");
    assert_eq!(json["version"], "1.0.0");
    assert_eq!(json["preview"]["header_text"], "#6b7280");

    let blue = serde_json::to_value(resolve_theme(Some("professional-blue"))).unwrap();
    assert!(blue["preview"].get("header_text").is_none());
  }
}
