//! Title extraction from Markdown text.

/// Title used for notes without a leading heading line.
pub const UNTITLED: &str = "Untitled";

/// Extracts a display title from Markdown text.
///
/// The title is the remainder of the first line when that line starts with
/// `#` and is terminated by a newline. Everything else is `"Untitled"`.
///
/// This is close to the pattern `/^#(.+)\n/` with two differences: the
/// captured text is trimmed, so a `\r` before the newline is dropped, and
/// a heading that is blank after trimming (`"#   \n"`) gives `"Untitled"`
/// rather than whitespace.
///
/// # Examples
///
/// ```
/// use notesmd::domain::extract_title;
///
/// assert_eq!(extract_title("# Title\nfoo"), "Title");
/// assert_eq!(extract_title("bar"), "Untitled");
/// ```
pub fn extract_title(markdown: &str) -> &str {
    let Some((first_line, _)) = markdown.split_once('\n') else {
        return UNTITLED;
    };
    let Some(heading) = first_line.strip_prefix('#') else {
        return UNTITLED;
    };

    let title = heading.trim();
    if title.is_empty() { UNTITLED } else { title }
}
