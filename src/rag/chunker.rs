/// Default chunk window, in characters.
pub const MAX_CHUNK_CHARS: usize = 1200;
/// Default tail/head overlap between consecutive chunks, in characters.
pub const CHUNK_OVERLAP: usize = 200;

/// Split text into overlapping fixed-size character windows.
///
/// Line endings are normalized (CRLF to LF) before splitting. Each window
/// after the first starts `overlap` characters before the end of the
/// previous one, except when the remaining text fits in a single window.
/// Chunks are trimmed; chunks that trim to nothing are dropped.
pub fn chunk_text(text: &str, max_chars: usize, overlap: usize) -> Vec<String> {
    let text = text.replace("\r\n", "\n");
    let chars: Vec<char> = text.chars().collect();
    let length = chars.len();

    let max_chars = max_chars.max(1);
    // The window start must always advance, even for overlap >= max_chars.
    let overlap = overlap.min(max_chars - 1);

    let mut chunks = Vec::new();
    let mut start = 0;
    while start < length {
        let end = (start + max_chars).min(length);
        let window: String = chars[start..end].iter().collect();
        let trimmed = window.trim();
        if !trimmed.is_empty() {
            chunks.push(trimmed.to_string());
        }
        if end == length {
            break;
        }
        start = end - overlap;
    }

    chunks
}
