//! SVG rendering and data-URI embedding of reconstructed diagrams.

use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use svg::Document;

use reqmig_core::draw::ShapeStyle;

use super::interpret::DiagramDocument;
use crate::config::DiagramConfig;

const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// Renders the shapes of a diagram into standalone SVG markup.
///
/// Returns `None` when the diagram has no shapes.
pub fn render_svg(diagram: &DiagramDocument, style: &ShapeStyle) -> Option<String> {
    if diagram.is_empty() {
        return None;
    }

    let size = diagram.canvas_size();
    let doc = Document::new()
        .set("xmlns", SVG_NAMESPACE)
        .set("width", size.width())
        .set("height", size.height())
        .set(
            "viewBox",
            format!("0 0 {} {}", size.width(), size.height()),
        );

    let doc = diagram
        .shapes()
        .iter()
        .fold(doc, |doc, shape| doc.add(shape.render_to_svg(style)));

    Some(doc.to_string())
}

/// Wraps SVG markup as a percent-encoded data-URI image inside a `<div>`.
pub fn embed(svg: &str, config: &DiagramConfig) -> String {
    format!(
        r#"<div><img src="data:image/svg+xml;charset=utf-8,{}" alt="{}" style="width: {}%;"/></div>"#,
        utf8_percent_encode(svg, NON_ALPHANUMERIC),
        escape_attribute(config.alt_text()),
        config.display_width(),
    )
}

fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use percent_encoding::percent_decode_str;

    use super::*;
    use crate::diagram::interpret::interpret;

    fn diagram(source: &str) -> DiagramDocument {
        interpret(&reqmig_parser::parse(source).unwrap())
    }

    #[test]
    fn test_render_svg() {
        let doc = diagram(
            r#"<d><width size="120"/><height size="60"/><rect x="10" y="10" w="20" h="20"/></d>"#,
        );
        let svg = render_svg(&doc, &ShapeStyle::default()).unwrap();

        assert!(svg.contains("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains(r#"xmlns="http://www.w3.org/2000/svg""#));
        assert!(svg.contains(r#"width="120""#));
        assert!(svg.contains(r#"height="60""#));
        assert!(svg.contains(r#"viewBox="0 0 120 60""#));
        assert!(svg.contains("<rect"));
        assert!(svg.contains(r#"stroke="slategray""#));
    }

    #[test]
    fn test_empty_diagram_renders_nothing() {
        let doc = diagram(r#"<d><width size="120"/></d>"#);
        assert!(render_svg(&doc, &ShapeStyle::default()).is_none());
    }

    #[test]
    fn test_embed() {
        let svg = r#"<svg width="1"></svg>"#;
        let html = embed(svg, &DiagramConfig::default());

        let prefix = r#"<div><img src="data:image/svg+xml;charset=utf-8,"#;
        let suffix = r#"" alt="Diagram" style="width: 70%;"/></div>"#;
        assert!(html.starts_with(prefix));
        assert!(html.ends_with(suffix));

        let encoded = &html[prefix.len()..html.len() - suffix.len()];
        assert!(encoded.chars().all(|c| c.is_ascii_alphanumeric() || c == '%'));
        assert_eq!(percent_decode_str(encoded).decode_utf8().unwrap(), svg);
    }

    #[test]
    fn test_embed_escapes_alt_text() {
        let config = DiagramConfig::new(50, r#"A "quoted" <diagram>"#);
        let html = embed("<svg/>", &config);
        assert!(html.contains(r#"alt="A &quot;quoted&quot; &lt;diagram&gt;""#));
        assert!(html.contains("width: 50%;"));
    }
}
