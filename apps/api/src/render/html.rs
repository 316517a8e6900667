//! HTML backend: serialises the document tree into a standalone page with
//! an embedded stylesheet. Used for previews.

use std::fmt::Write as _;

use crate::render::document::{Block, Node, Region, ResumeLayout, Section};
use crate::render::template::Template;
use crate::render::{RenderBackend, RenderError, RenderFormat, RenderOutput};

#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlBackend;

impl RenderBackend for HtmlBackend {
    fn format(&self) -> RenderFormat {
        RenderFormat::Html
    }

    fn rasterize(
        &self,
        layout: &ResumeLayout,
        template: &Template,
    ) -> Result<RenderOutput, RenderError> {
        Ok(RenderOutput::Html(to_html(layout, template)))
    }
}

/// Renders a full HTML document for `layout`.
pub fn to_html(layout: &ResumeLayout, template: &Template) -> String {
    let mut out = String::with_capacity(8 * 1024);
    let title = if layout.header.name.is_empty() {
        "Resume".to_string()
    } else {
        format!("{} - Resume", layout.header.name)
    };

    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"UTF-8\">\n");
    let _ = writeln!(out, "<title>{}</title>", escape(&title));
    let _ = writeln!(out, "<style>{}</style>", stylesheet(template));
    out.push_str("</head>\n<body>\n");

    out.push_str("<div class=\"header\">\n");
    let _ = writeln!(out, "<h1>{}</h1>", escape(&layout.header.name));
    let _ = writeln!(out, "<h2>{}</h2>", escape(&layout.header.title));
    out.push_str("</div>\n");

    out.push_str("<table class=\"columns\" cellpadding=\"0\" cellspacing=\"0\">\n<tr>\n");
    write_region(&mut out, &layout.left, "left-column");
    write_region(&mut out, &layout.right, "right-column");
    out.push_str("</tr>\n</table>\n</body>\n</html>\n");
    out
}

fn write_region(out: &mut String, region: &Region, class: &str) {
    let _ = writeln!(
        out,
        "<td class=\"{class}\" style=\"width: {}%;\">",
        region.width_pct
    );
    for section in &region.sections {
        write_section(out, section);
    }
    out.push_str("</td>\n");
}

fn write_section(out: &mut String, section: &Section) {
    let _ = writeln!(out, "<div class=\"section section-{}\">", section.kind.slug());
    let _ = writeln!(
        out,
        "<div class=\"section-title\">{}</div>",
        escape(section.heading())
    );
    for block in &section.blocks {
        write_block(out, block);
    }
    out.push_str("</div>\n");
}

fn write_block(out: &mut String, block: &Block) {
    let slug = block.kind.slug();
    let _ = writeln!(out, "<div class=\"{slug}-item\">");
    for node in &block.nodes {
        match node {
            Node::Row { label, value } => {
                let _ = writeln!(
                    out,
                    "<span class=\"contact-label\">{}</span> <span class=\"contact-value\">{}</span>",
                    escape(label),
                    escape(value)
                );
            }
            Node::Text { role, text } => {
                let _ = writeln!(
                    out,
                    "<div class=\"{slug}-{}\">{}</div>",
                    role.slug(),
                    escape(text)
                );
            }
            Node::Bar {
                label,
                value_text,
                fill_pct,
            } => {
                let _ = writeln!(
                    out,
                    "<div class=\"skill-header\"><span class=\"skill-name\">{}</span><span class=\"skill-level\">{}</span></div>",
                    escape(label),
                    escape(value_text)
                );
                let _ = writeln!(
                    out,
                    "<div class=\"skill-bar\"><div class=\"skill-fill\" style=\"width: {fill_pct}%;\"></div></div>"
                );
            }
            Node::Bullets { items } => {
                out.push_str("<ul class=\"points\">\n");
                for item in items {
                    let _ = writeln!(out, "<li>{}</li>", escape(item));
                }
                out.push_str("</ul>\n");
            }
        }
    }
    out.push_str("</div>\n");
}

/// Escapes text for element content and double-quoted attributes.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn stylesheet(t: &Template) -> String {
    let accent = t.accent.hex();
    let base = t.base_font_pt;
    format!(
        r#"
@page {{ size: {page}; margin: 0; }}
* {{ margin: 0; padding: 0; box-sizing: border-box; }}
body {{ font-family: Helvetica, Arial, sans-serif; font-size: {base}pt; line-height: 1.4; color: {ink}; background: white; }}
.header {{ background-color: {accent}; color: white; text-align: center; padding: 30px 20px; width: 100%; }}
.header h1 {{ font-size: {h1}pt; font-weight: normal; letter-spacing: 4px; margin-bottom: 8px; color: white; }}
.header h2 {{ font-size: {h2}pt; font-weight: normal; letter-spacing: 3px; color: {subtitle}; }}
.columns {{ width: 100%; }}
.left-column {{ background-color: {sidebar}; padding: 25px 20px; vertical-align: top; }}
.right-column {{ background: white; padding: 25px 25px; vertical-align: top; }}
.section {{ margin-bottom: 20px; }}
.section-title {{ font-size: {title}pt; font-weight: bold; color: {accent}; letter-spacing: 2px; text-transform: uppercase; margin-bottom: 12px; padding-bottom: 5px; border-bottom: 1.5px solid {accent}; }}
.contact-item {{ margin-bottom: 8px; }}
.contact-label {{ color: {accent}; font-weight: bold; display: inline-block; width: 55px; }}
.contact-value {{ color: {muted}; }}
.summary-paragraph {{ color: {muted}; font-style: italic; line-height: 1.5; text-align: justify; }}
.education-item, .project-item {{ margin-bottom: 15px; }}
.experience-item {{ margin-bottom: 18px; }}
.skill-item {{ margin-bottom: 12px; }}
.education-date {{ color: {accent}; font-style: italic; margin-bottom: 3px; }}
.education-title, .project-title {{ font-size: {title}pt; font-weight: bold; color: {ink}; }}
.education-detail {{ color: {muted}; font-style: italic; }}
.education-organisation {{ color: #666666; }}
.skill-header {{ margin-bottom: 4px; }}
.skill-level {{ color: {accent}; font-weight: bold; float: right; }}
.skill-bar {{ background: {track}; height: 5px; width: 100%; clear: both; }}
.skill-fill {{ background: {accent}; height: 5px; }}
.experience-date {{ color: {accent}; font-weight: bold; margin-bottom: 2px; }}
.experience-title {{ font-size: {role}pt; font-weight: bold; font-style: italic; color: {ink}; }}
.experience-organisation {{ color: {accent}; margin-bottom: 6px; }}
.project-tech {{ font-size: {tech}pt; color: {accent}; font-style: italic; margin-bottom: 5px; }}
.points {{ margin-left: 15px; color: {muted}; }}
.points li {{ margin-bottom: 4px; line-height: 1.4; }}
"#,
        page = t.page.css_name(),
        ink = t.ink.hex(),
        muted = t.muted.hex(),
        sidebar = t.sidebar.hex(),
        subtitle = t.header_subtitle.hex(),
        track = t.bar_track.hex(),
        h1 = base * 2.9,
        h2 = base + 2.0,
        title = base + 1.0,
        role = base + 2.0,
        tech = base - 1.0,
    )
}
