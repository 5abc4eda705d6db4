use std::path::Path;

pub const PDF: &str = "application/pdf";
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Media type a file declares through its extension. Content is never sniffed:
/// a `.pdf` that is really a PNG still declares `application/pdf` and fails later
/// in parsing, the same way a browser reports `File.type`.
pub fn declared_from_path(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("pdf") => PDF,
        _ => OCTET_STREAM,
    }
}

/// True when a declared media type names PDF. Parameters such as
/// `; charset=binary` and letter case are ignored.
pub fn is_pdf(declared: &str) -> bool {
    declared
        .split(';')
        .next()
        .map(|essence| essence.trim().eq_ignore_ascii_case(PDF))
        .unwrap_or(false)
}
