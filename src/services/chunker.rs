/// Default chunk threshold in characters. Keeps t5-class models under their
/// input token limit.
pub const DEFAULT_MAX_CHARS: usize = 700;

/// Greedily pack newline-separated paragraphs into chunks shorter than
/// `max_chars` characters.
///
/// A paragraph is appended to the running chunk while the result stays
/// strictly below the threshold; otherwise the running chunk is flushed and a
/// new one starts with that paragraph. A single paragraph longer than
/// `max_chars` is emitted as-is rather than split mid-paragraph.
pub fn chunk_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for para in text.split('\n') {
        let para_len = para.chars().count();

        if current_len + para_len + 1 < max_chars {
            current.push_str(para);
            current.push('\n');
            current_len += para_len + 1;
        } else {
            chunks.push(current.trim().to_string());
            current.clear();
            current.push_str(para);
            current.push('\n');
            current_len = para_len + 1;
        }
    }

    if !current.trim().is_empty() {
        chunks.push(current.trim().to_string());
    }

    chunks.retain(|c| !c.trim().is_empty());
    chunks
}
