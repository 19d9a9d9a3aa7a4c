//! Markdown to HTML conversion for the read-only preview.

use pulldown_cmark::{Options, Parser, html};

/// Converts markdown text to HTML.
///
/// Enables common markdown extensions:
/// - Tables
/// - Footnotes
/// - Strikethrough
/// - Task lists
///
/// # Example
///
/// ```
/// use notesmd::infra::markdown_to_html;
///
/// let html = markdown_to_html("# Hello\n\nWorld");
/// assert!(html.contains("<h1>Hello</h1>"));
/// assert!(html.contains("<p>World</p>"));
/// ```
pub fn markdown_to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(markdown, options);
    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);
    html_output
}
