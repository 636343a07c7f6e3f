//! The page's font table.
//!
//! Families declared by the template come first, in declaration order. The
//! fourteen standard PDF fonts need no font program, so a text command that
//! names one of them registers it on first use. Any other family must be
//! declared by the template; the serializer rejects commands that reference
//! a family missing from the table.
//!
//! No font program is ever embedded. A declared family is written as a bare
//! Type1 reference by name, without widths or a font descriptor, and the
//! viewer substitutes an installed font. [`FontRef::url`] is carried through
//! the table for callers but never fetched.

use folio_template::FontRef;
use folio_types::FontFamily;

pub const STANDARD_FONTS: [&str; 14] = [
    "Times-Roman",
    "Times-Bold",
    "Times-Italic",
    "Times-BoldItalic",
    "Helvetica",
    "Helvetica-Bold",
    "Helvetica-Oblique",
    "Helvetica-BoldOblique",
    "Courier",
    "Courier-Bold",
    "Courier-Oblique",
    "Courier-BoldOblique",
    "Symbol",
    "ZapfDingbats",
];

pub fn is_standard_font(family: &str) -> bool {
    STANDARD_FONTS.contains(&family)
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FontTable {
    fonts: Vec<FontRef>,
}

impl FontTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the table from template declarations, keeping the first of any duplicates.
    pub fn from_declared(declared: &[FontRef]) -> Self {
        let mut table = Self::new();
        for font in declared {
            table.register(font.clone());
        }
        table
    }

    /// Appends `font` unless its family is already present. Returns its index.
    pub fn register(&mut self, font: FontRef) -> usize {
        match self.index_of(&font.family) {
            Some(index) => index,
            None => {
                self.fonts.push(font);
                self.fonts.len() - 1
            }
        }
    }

    /// Registers a standard font on first use. Returns `false` for unknown families
    /// that the template never declared.
    pub fn ensure_available(&mut self, family: &FontFamily) -> bool {
        if self.contains(family) {
            return true;
        }
        if is_standard_font(family.as_str()) {
            log::trace!("Registering standard font '{}'", family);
            self.register(FontRef::new(family.clone(), format!("standard:{}", family)));
            return true;
        }
        false
    }

    pub fn index_of(&self, family: &FontFamily) -> Option<usize> {
        self.fonts.iter().position(|f| &f.family == family)
    }

    pub fn contains(&self, family: &FontFamily) -> bool {
        self.index_of(family).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FontRef> {
        self.fonts.iter()
    }

    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declared_fonts_keep_order() {
        let table = FontTable::from_declared(&[
            FontRef::new("Brand", "fonts/brand.ttf"),
            FontRef::new("Courier", "builtin"),
            FontRef::new("Brand", "ignored"),
        ]);
        let families: Vec<_> = table.iter().map(|f| f.family.as_str()).collect();
        assert_eq!(families, ["Brand", "Courier"]);
        assert_eq!(table.iter().next().unwrap().url, "fonts/brand.ttf");
    }

    #[test]
    fn test_standard_fonts_register_on_demand() {
        let mut table = FontTable::new();
        assert!(table.ensure_available(&FontFamily::new("Helvetica")));
        assert!(table.ensure_available(&FontFamily::new("Helvetica")));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_unknown_fonts_are_not_invented() {
        let mut table = FontTable::new();
        assert!(!table.ensure_available(&FontFamily::new("Comic Sans")));
        assert!(table.is_empty());
    }
}
