/*!
 * Fixed-width text chunking.
 *
 * Providers cap the amount of text accepted per request, so document content is
 * cut into consecutive slices of at most `max_chars` characters. The cut is not
 * sentence aware; order is significant and joining the chunks back together
 * reproduces the input exactly.
 */

/// Split `text` into consecutive chunks of at most `max_chars` characters.
///
/// Lengths are counted in `char`s, so a chunk boundary never falls inside a
/// multi-byte character. Empty text yields no chunks. A `max_chars` of zero is
/// treated as one.
pub fn split_into_chunks(text: &str, max_chars: usize) -> Vec<&str> {
    let max_chars = max_chars.max(1);
    let mut chunks = Vec::with_capacity(text.len() / max_chars + 1);

    let mut start = 0;
    let mut count = 0;
    for (idx, _) in text.char_indices() {
        if count == max_chars {
            chunks.push(&text[start..idx]);
            start = idx;
            count = 0;
        }
        count += 1;
    }

    if start < text.len() {
        chunks.push(&text[start..]);
    }

    chunks
}
