use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static PRIMARY_HEADER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\A# .*\n").unwrap());
static H5_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^##### (.*)$").unwrap());
static H4_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^#### (.*)$").unwrap());
static H3_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^### (.*)$").unwrap());
static H2_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^## (.*)$").unwrap());
static BOLD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.*?)\*\*").unwrap());
static ITALIC_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*(.*?)\*").unwrap());
static UNORDERED_ITEM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^\s*-\s(.*)$").unwrap());
static ORDERED_ITEM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^\s*\d+\.\s(.*)$").unwrap());
static LINK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"!?\[(.*?)\]\((.*?)\)").unwrap());
static EMPTY_PARAGRAPH_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<p>\s*</p>").unwrap());
static LIST_RUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<li>.*?</li>(?:(?:<br>)*<li>.*?</li>)*").unwrap());

/// Minimal markdown-to-markup conversion for definition texts and
/// inline text nodes: headers 2-5, bold, italic, list items, links and
/// images rewritten to anchors, paragraph and line-break wrapping, with
/// the primary header stripped. Contiguous list items end up inside a
/// single enclosing list tag.
pub fn markdown_to_html(markdown: &str) -> String {
    if markdown.is_empty() {
        return String::new();
    }

    let text = PRIMARY_HEADER_RE.replace(markdown, "");
    let text = H5_RE.replace_all(&text, "<h5>${1}</h5>");
    let text = H4_RE.replace_all(&text, "<h4>${1}</h4>");
    let text = H3_RE.replace_all(&text, "<h3>${1}</h3>");
    let text = H2_RE.replace_all(&text, "<h2>${1}</h2>");
    let text = BOLD_RE.replace_all(&text, "<strong>${1}</strong>");
    let text = ITALIC_RE.replace_all(&text, "<em>${1}</em>");
    let text = UNORDERED_ITEM_RE.replace_all(&text, "<li>${1}</li>");
    let text = ORDERED_ITEM_RE.replace_all(&text, "<li>${1}</li>");
    let text = LINK_RE.replace_all(&text, r#"<a href="${2}" target="_blank">${1}</a>"#);

    let text = text.replace("\n\n", "</p><p>");
    let text = text.replace('\n', "<br>");
    let wrapped = if text.is_empty() {
        String::new()
    } else {
        format!("<p>{text}</p>")
    };
    let cleaned = EMPTY_PARAGRAPH_RE.replace_all(&wrapped, "");
    LIST_RUN_RE
        .replace_all(&cleaned, |caps: &Captures| {
            format!("<ul>{}</ul>", caps[0].replace("<br>", ""))
        })
        .into_owned()
}
