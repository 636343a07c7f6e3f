//! Number, string and name encoding for PDF syntax.

/// Convert a template y coordinate (origin top-left) to PDF space (origin bottom-left).
pub fn flip_y(y: f32, page_height: f32) -> f32 {
    page_height - y
}

/// Formats a number with at most three decimals and no trailing zeros.
/// Non-finite values become `0`.
pub fn fmt_num(value: f32) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let milli = (f64::from(value) * 1000.0).round() as i64;
    format_milli(milli)
}

fn format_milli(milli: i64) -> String {
    if milli == 0 {
        return "0".to_string();
    }
    let sign = if milli < 0 { "-" } else { "" };
    let abs = milli.abs();
    let int_part = abs / 1000;
    let frac_part = abs % 1000;
    if frac_part == 0 {
        return format!("{}{}", sign, int_part);
    }
    let mut s = format!("{}{}.{:03}", sign, int_part, frac_part);
    while s.ends_with('0') {
        s.pop();
    }
    s
}

pub fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) }
}

/// Encodes `text` as the body of a PDF literal string in WinAnsiEncoding.
///
/// Bytes outside printable ASCII are written as octal escapes, so the result
/// is plain ASCII. Characters WinAnsi cannot represent become `?`.
pub fn encode_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match winansi_byte(ch).unwrap_or(b'?') {
            b'\\' => out.push_str("\\\\"),
            b'(' => out.push_str("\\("),
            b')' => out.push_str("\\)"),
            b'\n' => out.push_str("\\n"),
            b'\r' => out.push_str("\\r"),
            b if !(0x20..0x7f).contains(&b) => out.push_str(&format!("\\{:03o}", b)),
            b => out.push(b as char),
        }
    }
    out
}

fn winansi_byte(ch: char) -> Option<u8> {
    let byte = match ch {
        '\u{0000}'..='\u{007F}' | '\u{00A0}'..='\u{00FF}' => ch as u8,
        '\u{20AC}' => 0x80,
        '\u{201A}' => 0x82,
        '\u{0192}' => 0x83,
        '\u{201E}' => 0x84,
        '\u{2026}' => 0x85,
        '\u{2020}' => 0x86,
        '\u{2021}' => 0x87,
        '\u{02C6}' => 0x88,
        '\u{2030}' => 0x89,
        '\u{0160}' => 0x8A,
        '\u{2039}' => 0x8B,
        '\u{0152}' => 0x8C,
        '\u{017D}' => 0x8E,
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{201C}' => 0x93,
        '\u{201D}' => 0x94,
        '\u{2022}' => 0x95,
        '\u{2013}' => 0x96,
        '\u{2014}' => 0x97,
        '\u{02DC}' => 0x98,
        '\u{2122}' => 0x99,
        '\u{0161}' => 0x9A,
        '\u{203A}' => 0x9B,
        '\u{0153}' => 0x9C,
        '\u{017E}' => 0x9E,
        '\u{0178}' => 0x9F,
        _ => return None,
    };
    Some(byte)
}

/// Writes `name` as a PDF name object, `#xx`-escaping delimiters and non-regular bytes.
pub fn pdf_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 1);
    out.push('/');
    for b in name.bytes() {
        let delimiter = matches!(
            b,
            b'(' | b')' | b'<' | b'>' | b'[' | b']' | b'{' | b'}' | b'/' | b'%' | b'#'
        );
        if delimiter || !(0x21..0x7f).contains(&b) {
            out.push_str(&format!("#{:02X}", b));
        } else {
            out.push(b as char);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fmt_num() {
        assert_eq!(fmt_num(742.0), "742");
        assert_eq!(fmt_num(12.5), "12.5");
        assert_eq!(fmt_num(0.784_313_7), "0.784");
        assert_eq!(fmt_num(-20.0), "-20");
        assert_eq!(fmt_num(-0.0001), "0");
        assert_eq!(fmt_num(f32::NAN), "0");
        assert_eq!(fmt_num(f32::INFINITY), "0");
    }

    #[test]
    fn test_flip_y() {
        assert_eq!(flip_y(0.0, 842.0), 842.0);
        assert_eq!(flip_y(842.0, 842.0), 0.0);
        assert_eq!(flip_y(100.0, 842.0), 742.0);
    }

    #[test]
    fn test_encode_text_escapes_delimiters() {
        assert_eq!(encode_text("Acme Co"), "Acme Co");
        assert_eq!(encode_text("a (b) \\ c"), "a \\(b\\) \\\\ c");
        assert_eq!(encode_text("line\nbreak"), "line\\nbreak");
    }

    #[test]
    fn test_encode_text_uses_winansi_octal() {
        assert_eq!(encode_text("€5"), "\\2005");
        assert_eq!(encode_text("Økonomi"), "\\330konomi");
        assert_eq!(encode_text("日本"), "??");
    }

    #[test]
    fn test_pdf_name_escapes() {
        assert_eq!(pdf_name("Helvetica"), "/Helvetica");
        assert_eq!(pdf_name("Brand Sans"), "/Brand#20Sans");
        assert_eq!(pdf_name("A#B/C"), "/A#23B#2FC");
    }

    #[test]
    fn test_clamp_unit() {
        assert_eq!(clamp_unit(1.5), 1.0);
        assert_eq!(clamp_unit(-0.2), 0.0);
        assert_eq!(clamp_unit(f32::NAN), 0.0);
        assert_eq!(clamp_unit(0.5), 0.5);
    }
}
