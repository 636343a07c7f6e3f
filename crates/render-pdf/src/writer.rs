//! Byte-level PDF object writer.

use crate::error::RenderError;

const PDF_HEADER: &[u8] = b"%PDF-1.7\n%\xE2\xE3\xCF\xD3\n";

/// Writer context for one document.
///
/// Object ids are handed out by [`reserve`](Self::reserve) before any body is
/// written, so objects can reference each other freely. The offset of each
/// object is taken from the buffer length at the moment its header is
/// emitted, which keeps the cross-reference table exact by construction.
pub(crate) struct PdfWriter {
    buf: Vec<u8>,
    offsets: Vec<Option<usize>>,
    next_id: usize,
}

impl PdfWriter {
    pub(crate) fn new() -> Self {
        Self {
            buf: PDF_HEADER.to_vec(),
            // Slot 0 is the free-list head and never written.
            offsets: vec![None],
            next_id: 1,
        }
    }

    pub(crate) fn reserve(&mut self) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        self.offsets.push(None);
        id
    }

    pub(crate) fn write_object(&mut self, id: usize, body: &[u8]) -> Result<(), RenderError> {
        self.begin_object(id)?;
        self.buf.extend_from_slice(body);
        self.buf.extend_from_slice(b"\nendobj\n");
        Ok(())
    }

    /// Writes a stream object. `dict_entries` is the dictionary body without
    /// `<<`/`>>` and without `/Length`, which is appended here.
    pub(crate) fn write_stream(
        &mut self,
        id: usize,
        dict_entries: &str,
        data: &[u8],
    ) -> Result<(), RenderError> {
        self.begin_object(id)?;
        let dict = if dict_entries.is_empty() {
            format!("<< /Length {} >>\nstream\n", data.len())
        } else {
            format!("<< {} /Length {} >>\nstream\n", dict_entries, data.len())
        };
        self.buf.extend_from_slice(dict.as_bytes());
        self.buf.extend_from_slice(data);
        self.buf.extend_from_slice(b"\nendstream\nendobj\n");
        Ok(())
    }

    fn begin_object(&mut self, id: usize) -> Result<(), RenderError> {
        let slot = self
            .offsets
            .get_mut(id)
            .filter(|_| id != 0)
            .ok_or_else(|| RenderError::InternalPdfError(format!("object {} was never reserved", id)))?;
        if slot.is_some() {
            return Err(RenderError::InternalPdfError(format!("object {} written twice", id)));
        }
        *slot = Some(self.buf.len());
        self.buf.extend_from_slice(format!("{} 0 obj\n", id).as_bytes());
        Ok(())
    }

    /// Appends the cross-reference table and trailer and returns the file bytes.
    pub(crate) fn finish(mut self, root_id: usize) -> Result<Vec<u8>, RenderError> {
        let total = self.offsets.len();
        let xref_start = self.buf.len();
        self.buf
            .extend_from_slice(format!("xref\n0 {}\n", total).as_bytes());
        self.buf.extend_from_slice(b"0000000000 65535 f \n");
        for (id, offset) in self.offsets.iter().enumerate().skip(1) {
            let offset = offset.ok_or_else(|| {
                RenderError::InternalPdfError(format!("object {} was reserved but never written", id))
            })?;
            self.buf
                .extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
        }
        let trailer = format!(
            "trailer\n<< /Size {} /Root {} 0 R >>\nstartxref\n{}\n%%EOF\n",
            total, root_id, xref_start
        );
        self.buf.extend_from_slice(trailer.as_bytes());
        Ok(self.buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn find(haystack: &[u8], needle: &str) -> usize {
        haystack
            .windows(needle.len())
            .position(|w| w == needle.as_bytes())
            .unwrap()
    }

    #[test]
    fn test_offsets_point_at_object_headers() {
        let mut writer = PdfWriter::new();
        let a = writer.reserve();
        let b = writer.reserve();
        writer.write_object(a, b"<< /Type /Catalog /Pages 2 0 R >>").unwrap();
        writer.write_stream(b, "", b"q Q").unwrap();
        let bytes = writer.finish(a).unwrap();

        let a_at = find(&bytes, "1 0 obj");
        let b_at = find(&bytes, "2 0 obj");
        find(&bytes, &format!("{:010} 00000 n \n{:010} 00000 n \n", a_at, b_at));

        let xref_at = find(&bytes, "xref\n");
        assert!(bytes.ends_with(format!("startxref\n{}\n%%EOF\n", xref_at).as_bytes()));
        find(&bytes, "<< /Length 3 >>\nstream\nq Q\nendstream");
    }

    #[test]
    fn test_unwritten_object_is_an_error() {
        let mut writer = PdfWriter::new();
        let a = writer.reserve();
        let _b = writer.reserve();
        writer.write_object(a, b"null").unwrap();
        assert!(writer.finish(a).is_err());
    }

    #[test]
    fn test_double_write_is_an_error() {
        let mut writer = PdfWriter::new();
        let a = writer.reserve();
        writer.write_object(a, b"null").unwrap();
        assert!(writer.write_object(a, b"null").is_err());
        assert!(writer.write_object(7, b"null").is_err());
    }
}
