//! Normalization of legacy rich-text markup.
//!
//! [`HtmlSanitizer`] rewrites the HTML-like fragments exported from the
//! legacy tool into a clean fragment wrapped in a single outer `<div>`.
//! The rules run in a fixed order and the whole pipeline is repeated until
//! the output no longer changes, so sanitizing is idempotent.

use std::sync::LazyLock;

use log::{debug, trace};
use regex::{Captures, Regex};

use crate::config::SanitizerConfig;

/// Upper bound on whole-pipeline repetitions.
const MAX_PASSES: usize = 64;

/// Inline elements whose immediate duplicates are collapsed.
const INLINE_TAGS: [&str; 5] = ["i", "u", "b", "sub", "sup"];

const TABLE_STYLE: &str = "width: 70%; border-collapse: collapse; border-color: #c0c0c0;";
const CELL_STYLE: &str = "border: 1px solid #c0c0c0; padding: 4px;";

/// Style properties replaced by the fixed table and cell styles.
const FIXED_PROPERTIES: [&str; 5] = [
    "width",
    "border-collapse",
    "border-color",
    "border",
    "padding",
];

fn regex(pattern: &str) -> Regex {
    Regex::new(pattern).expect("hard-coded pattern is valid")
}

static WRAPPER: LazyLock<Regex> =
    LazyLock::new(|| regex(r"</?(?:[A-Za-z][\w.-]*:)+primarytext\b[^>]*>"));
static PREFIXED_OPEN: LazyLock<Regex> =
    LazyLock::new(|| regex(r"<(?:[A-Za-z][\w.-]*:)+([A-Za-z0-9]+)"));
static PREFIXED_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| regex(r"</(?:[A-Za-z][\w.-]*:)+([A-Za-z0-9]+)>"));
static DIR_ID_ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| regex(r#"\s+(?:dir|id)="[^"]*""#));
static IMAGE: LazyLock<Regex> = LazyLock::new(|| regex(r"(?i)<img\b[^>]*>"));
static NEWLINES: LazyLock<Regex> = LazyLock::new(|| regex(r"[\r\n]+"));
static SPACES: LazyLock<Regex> = LazyLock::new(|| regex(r"\s{2,}"));
static EMPTY_P: LazyLock<Regex> = LazyLock::new(|| regex(r"(?i)<p>\s*(?:&nbsp;)?\s*</p>"));
static EMPTY_DIV: LazyLock<Regex> =
    LazyLock::new(|| regex(r"(?i)<div>\s*(?:&nbsp;)?\s*</div>"));
static P_GAPS: LazyLock<Regex> = LazyLock::new(|| regex(r"(?:</p>\s*<p>\s*)+"));
static DIV_GAPS: LazyLock<Regex> = LazyLock::new(|| regex(r"(?:</div>\s*<div>\s*)+"));
static TABLE_TAG: LazyLock<Regex> = LazyLock::new(|| regex(r"(?i)<(table|td)\b([^>]*)>"));
static STYLE_ATTRIBUTE: LazyLock<Regex> =
    LazyLock::new(|| regex(r#"(?i)\bstyle\s*=\s*(?:"([^"]*)"|'([^']*)')"#));
static TRAILING_PARAGRAPH: LazyLock<Regex> = LazyLock::new(|| regex(r"</p>\s+</div>$"));

/// Normalizes legacy rich-text fragments.
#[derive(Debug, Clone, Default)]
pub struct HtmlSanitizer {
    config: SanitizerConfig,
}

impl HtmlSanitizer {
    /// Creates a sanitizer with the given options.
    pub fn new(config: SanitizerConfig) -> Self {
        Self { config }
    }

    /// Sanitizes one fragment.
    ///
    /// Empty or whitespace-only input yields an empty string; anything else
    /// comes back wrapped in an outer `<div>` unless it sanitizes to
    /// nothing.
    pub fn sanitize(&self, raw: &str) -> String {
        let mut current = self.pass(raw);
        for passes in 1..MAX_PASSES {
            let next = self.pass(&current);
            if next == current {
                trace!(passes; "Sanitizer converged");
                return current;
            }
            current = next;
        }
        debug!(passes = MAX_PASSES, len = current.len(); "Sanitizer stopped before converging");
        current
    }

    /// Applies every rule once, in order.
    fn pass(&self, raw: &str) -> String {
        if raw.trim().is_empty() {
            return String::new();
        }

        // Namespaced wrapper and prefixes.
        let text = replace_to_fixed_point(&WRAPPER, raw.to_string(), "");
        let text = replace_to_fixed_point(&PREFIXED_OPEN, text, "<${1}");
        let text = replace_to_fixed_point(&PREFIXED_CLOSE, text, "</${1}>");

        // Attributes and images.
        let text = replace_to_fixed_point(&DIR_ID_ATTRIBUTE, text, "");
        let text = replace_to_fixed_point(&IMAGE, text, "");

        // Whitespace.
        let text = NEWLINES.replace_all(&text, " ");
        let text = SPACES.replace_all(&text, " ");

        let text = replace_to_fixed_point(&EMPTY_P, text.into_owned(), "");
        let text = replace_to_fixed_point(&EMPTY_DIV, text, "");

        let text = P_GAPS.replace_all(&text, "</p><p>");
        let text = DIV_GAPS.replace_all(&text, "</div><div>");

        let mut text = collapse_inline_duplicates(text.into_owned());

        if self.config.style_tables() {
            text = TABLE_TAG
                .replace_all(&text, |caps: &Captures<'_>| restyle_tag(caps))
                .into_owned();
        }

        wrap(text.trim())
    }
}

/// Applies a shrinking rewrite until it no longer matches, so a match
/// uncovered by an earlier replacement is handled in the same pass.
fn replace_to_fixed_point(pattern: &Regex, mut text: String, replacement: &str) -> String {
    loop {
        let next = pattern.replace_all(&text, replacement);
        if next == text {
            return text;
        }
        text = next.into_owned();
    }
}

/// Collapses `<b><b>` into `<b>` and `</b></b>` into `</b>` for every
/// inline tag, repeatedly.
fn collapse_inline_duplicates(mut text: String) -> String {
    loop {
        let mut changed = false;
        for tag in INLINE_TAGS {
            for (doubled, single) in [
                (format!("<{tag}><{tag}>"), format!("<{tag}>")),
                (format!("</{tag}></{tag}>"), format!("</{tag}>")),
            ] {
                if text.contains(&doubled) {
                    text = text.replace(&doubled, &single);
                    changed = true;
                }
            }
        }
        if !changed {
            return text;
        }
    }
}

/// Rewrites the `style` attribute of one `table`/`td` opening tag.
fn restyle_tag(caps: &Captures<'_>) -> String {
    let tag = &caps[1];
    let attributes = &caps[2];
    let fixed = if tag.eq_ignore_ascii_case("table") {
        TABLE_STYLE
    } else {
        CELL_STYLE
    };

    let (attributes, self_closing) = match attributes.trim_end().strip_suffix('/') {
        Some(rest) => (rest.trim_end(), true),
        None => (attributes.trim_end(), false),
    };

    let attributes = match STYLE_ATTRIBUTE.captures(attributes) {
        Some(style) => {
            let declarations = style
                .get(1)
                .or_else(|| style.get(2))
                .map_or("", |m| m.as_str());
            let styled = format!(r#"style="{}""#, merge_style(declarations, fixed));
            STYLE_ATTRIBUTE
                .replace(attributes, regex::NoExpand(&styled))
                .into_owned()
        }
        None => format!(r#"{attributes} style="{fixed}""#),
    };

    let close = if self_closing { " />" } else { ">" };
    format!("<{tag}{attributes}{close}")
}

/// Drops width and previously applied fixed declarations, then appends the
/// fixed style.
fn merge_style(declarations: &str, fixed: &str) -> String {
    let kept: Vec<&str> = declarations
        .split(';')
        .map(str::trim)
        .filter(|decl| !decl.is_empty())
        .filter(|decl| {
            let property = decl.split(':').next().unwrap_or_default().trim();
            !FIXED_PROPERTIES
                .iter()
                .any(|name| property.eq_ignore_ascii_case(name))
        })
        .collect();

    if kept.is_empty() {
        fixed.to_string()
    } else {
        format!("{}; {fixed}", kept.join("; "))
    }
}

/// Trims, then wraps in an outer `<div>` when not already wrapped.
fn wrap(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let wrapped = if text.starts_with("<div>") {
        text.to_string()
    } else {
        format!("<div>{text}</div>")
    };
    TRAILING_PARAGRAPH
        .replace(&wrapped, "</p></div>")
        .into_owned()
}
