use crate::domain::invoice::themes::{self, ThemeMetadata};

/// Use case for the theme picker: the built-in registry plus the default
pub struct ListThemesUseCase;

impl ListThemesUseCase {
  pub fn new() -> Self {
    Self
  }

  pub fn execute(&self) -> (&'static [ThemeMetadata], &'static str) {
    (&themes::THEMES, themes::DEFAULT_THEME_ID)
  }
}

impl Default for ListThemesUseCase {
  fn default() -> Self {
    Self::new()
  }
}
