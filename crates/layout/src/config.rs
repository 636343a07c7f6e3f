use folio_types::FontFamily;

/// Defaults applied to text elements that leave font attributes unset.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    /// Defaults to `Helvetica`.
    pub default_font_family: FontFamily,
    /// Defaults to `12.0`.
    pub default_font_size: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            default_font_family: FontFamily::new("Helvetica"),
            default_font_size: 12.0,
        }
    }
}
