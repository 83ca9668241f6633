use crate::render::Scene;
use crate::{EditorConfig, Graph};
use std::fmt::Write;

pub fn to_svg_paths_impl(g: &Graph, cfg: &EditorConfig) -> Vec<String> {
    g.edges()
        .filter_map(|(id, _)| g.edge_path(id, cfg))
        .map(|p| p.svg_d())
        .collect()
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Standalone SVG document for a scene, with arrowheads on directed edges.
pub fn to_svg_document(scene: &Scene, width: f32, height: f32) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = width,
        h = height
    );
    out.push_str("<defs>");
    for (id, color) in [("arrow", crate::render::EDGE_STROKE), ("arrow-hl", crate::render::HIGHLIGHT_EDGE_STROKE)] {
        // refX pushes the tip back to the node rim
        let _ = write!(
            out,
            r#"<marker id="{id}" viewBox="0 0 10 10" refX="28" refY="5" markerWidth="6" markerHeight="6" orient="auto-start-reverse"><path d="M 0 0 L 10 5 L 0 10 z" fill="{color}"/></marker>"#
        );
    }
    out.push_str("</defs>");

    for e in &scene.edges {
        let width = if e.highlighted { 4 } else { 2 };
        let _ = write!(
            out,
            r#"<path d="{}" fill="none" stroke="{}" stroke-width="{}""#,
            e.d, e.stroke, width
        );
        if e.directed {
            let marker = if e.highlighted { "arrow-hl" } else { "arrow" };
            let _ = write!(out, r#" marker-end="url(#{})""#, marker);
        }
        out.push_str("/>");
        if let Some(w) = &e.weight {
            let _ = write!(
                out,
                r##"<text x="{}" y="{}" text-anchor="middle" font-size="12" fill="#0f172a">{}</text>"##,
                w.at.x,
                w.at.y,
                escape(&w.text)
            );
        }
    }
    for n in &scene.nodes {
        let _ = write!(
            out,
            r#"<circle cx="{}" cy="{}" r="{}" fill="{}" stroke="{}" stroke-width="2"/>"#,
            n.pos.x, n.pos.y, n.radius, n.fill, n.stroke
        );
        let _ = write!(
            out,
            r#"<text x="{}" y="{}" text-anchor="middle" dominant-baseline="central" font-size="12" fill="{}">{}</text>"#,
            n.pos.x,
            n.pos.y,
            n.text,
            escape(&n.label)
        );
    }
    if let Some(p) = &scene.preview {
        let _ = write!(
            out,
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-dasharray="4 4"/>"#,
            p.from.x,
            p.from.y,
            p.to.x,
            p.to.y,
            crate::render::EDGE_STROKE
        );
    }
    out.push_str("</svg>");
    out
}
