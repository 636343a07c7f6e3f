#![allow(dead_code)]

use lopdf::Document as LopdfDocument;

/// Byte position of `needle` in `haystack`.
pub fn find_bytes(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Parses the classic xref table and checks every in-use entry points at `N 0 obj`.
/// Returns the number of objects checked.
pub fn verify_xref(bytes: &[u8]) -> Result<usize, String> {
    let startxref = find_bytes(bytes, b"startxref\n").ok_or("no startxref")?;
    let tail = std::str::from_utf8(&bytes[startxref..]).map_err(|e| e.to_string())?;
    let xref_start: usize = tail
        .lines()
        .nth(1)
        .ok_or("no startxref value")?
        .trim()
        .parse()
        .map_err(|e| format!("bad startxref: {}", e))?;

    if !bytes[xref_start..].starts_with(b"xref\n") {
        return Err(format!("startxref {} does not point at the xref keyword", xref_start));
    }
    let table = std::str::from_utf8(&bytes[xref_start..startxref]).map_err(|e| e.to_string())?;
    let mut lines = table.lines().skip(1);
    let header = lines.next().ok_or("no subsection header")?;
    let count: usize = header
        .split_whitespace()
        .nth(1)
        .ok_or("bad subsection header")?
        .parse()
        .map_err(|e| format!("bad object count: {}", e))?;

    let free = lines.next().ok_or("no free entry")?;
    if free != "0000000000 65535 f " {
        return Err(format!("unexpected free entry '{}'", free));
    }

    for id in 1..count {
        let entry = lines.next().ok_or_else(|| format!("missing entry {}", id))?;
        let offset: usize = entry[..10].parse().map_err(|e| format!("entry {}: {}", id, e))?;
        let expected = format!("{} 0 obj", id);
        if !bytes[offset..].starts_with(expected.as_bytes()) {
            return Err(format!("entry {} offset {} does not land on '{}'", id, offset, expected));
        }
    }
    Ok(count - 1)
}

/// Base font names referenced by the page resources.
pub fn font_names(doc: &LopdfDocument) -> Vec<String> {
    let mut names = Vec::new();
    for (_, page_id) in doc.get_pages() {
        let Ok(page) = doc.get_object(page_id).and_then(|o| o.as_dict()) else {
            continue;
        };
        let Ok(resources) = page.get(b"Resources").and_then(|r| r.as_dict()) else {
            continue;
        };
        let Ok(fonts) = resources.get(b"Font").and_then(|f| f.as_dict()) else {
            continue;
        };
        for (_, font_ref) in fonts.iter() {
            let font = font_ref
                .as_reference()
                .and_then(|id| doc.get_object(id))
                .and_then(|o| o.as_dict());
            if let Ok(name) = font.and_then(|f| f.get(b"BaseFont")).and_then(|n| n.as_name()) {
                names.push(String::from_utf8_lossy(name).into_owned());
            }
        }
    }
    names.sort();
    names
}

#[macro_export]
macro_rules! assert_content_contains {
    ($pdf:expr, $needle:expr) => {
        let content = $pdf.content();
        assert!(
            content.contains($needle),
            "content stream does not contain {:?}:\n{}",
            $needle,
            content
        );
    };
}
