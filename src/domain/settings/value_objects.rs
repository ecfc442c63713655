use chrono::Utc;

/// Invoice number template supporting `{prefix}` and `{number}` placeholders.
///
/// The counter renders zero-padded to four digits, so counter 7 with the
/// default pattern produces `INV-0007`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceNumberFormat(String);

impl InvoiceNumberFormat {
  pub const DEFAULT_PATTERN: &'static str = "{prefix}-{number}";

  pub fn new(pattern: impl Into<String>) -> Self {
    Self(pattern.into())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  /// Renders the template for the given prefix and counter value
  pub fn render(&self, prefix: &str, counter: i32) -> String {
    let number = format!("{:04}", counter.max(0));
    self
      .0
      .replace("{prefix}", prefix)
      .replace("{number}", &number)
  }
}

impl Default for InvoiceNumberFormat {
  fn default() -> Self {
    Self::new(Self::DEFAULT_PATTERN)
  }
}

/// Fallback invoice number used when the numbering state cannot be read.
///
/// Unix-millisecond suffix keeps it unique enough without coordination.
pub fn fallback_invoice_number() -> String {
  format!("INV-{}", Utc::now().timestamp_millis())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_default_pattern_pads_to_four_digits() {
    let format = InvoiceNumberFormat::default();
    assert_eq!(format.render("INV", 7), "INV-0007");
    assert_eq!(format.render("INV", 1234), "INV-1234");
    assert_eq!(format.render("INV", 99999), "INV-99999");
  }

  #[test]
  fn test_custom_pattern() {
    let format = InvoiceNumberFormat::new("{number}/{prefix}");
    assert_eq!(format.render("ACME", 3), "0003/ACME");
  }

  #[test]
  fn test_pattern_without_placeholders_is_literal() {
    let format = InvoiceNumberFormat::new("FIXED");
    assert_eq!(format.render("INV", 12), "FIXED");
  }

  #[test]
  fn test_fallback_number_has_prefix() {
    assert!(fallback_invoice_number().starts_with("INV-"));
  }
}
