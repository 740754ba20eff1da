use scraper::node::Node as ScraperNode;
use scraper::{ElementRef, Html};

use super::super::utils::truncate_chars;

/// Elements whose text never renders.
const HIDDEN_TAGS: &[&str] = &["head", "script", "style", "noscript", "template"];

pub fn normalize_space(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// All rendered text of the document, whitespace collapsed to single spaces.
pub fn visible_text(html: &str) -> String {
    let doc = Html::parse_document(html);
    let mut out = String::new();
    collect_visible_text(&doc.root_element(), &mut out);
    normalize_space(&out)
}

/// First `max_chars` characters of the page's visible text.
pub fn digest(html: &str, max_chars: usize) -> String {
    truncate_chars(&visible_text(html), max_chars)
}

/// Document-order walk with an explicit stack, so nesting depth is bounded
/// by the heap rather than the thread stack.
fn collect_visible_text(root: &ElementRef, out: &mut String) {
    let mut stack = vec![**root];

    while let Some(node) = stack.pop() {
        match node.value() {
            ScraperNode::Text(t) => {
                let t = t.text.trim();
                if !t.is_empty() {
                    if !out.is_empty() {
                        out.push(' ');
                    }
                    out.push_str(t);
                }
            }
            ScraperNode::Element(el) => {
                if HIDDEN_TAGS.iter().any(|tag| el.name().eq_ignore_ascii_case(tag)) {
                    continue;
                }
                // reversed so the first child pops first
                let mut child = node.last_child();
                while let Some(c) = child {
                    stack.push(c);
                    child = c.prev_sibling();
                }
            }
            _ => {}
        }
    }
}
