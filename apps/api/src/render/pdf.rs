//! PDF backend: flows the document tree onto fixed-size pages and writes
//! them with `pdf-writer`.
//!
//! # Pagination
//! The two regions flow independently: each starts below the header band on
//! page 1 and continues at the top margin of later pages. The page count is
//! the longer of the two. The sidebar background repeats on every page; the
//! header band appears on page 1 only.
//!
//! # Fonts
//! Only the base-14 Helvetica family is used, encoded as WinAnsi, so no font
//! files are embedded. Characters outside WinAnsi print as `?`.

use chrono::{DateTime, Datelike, Timelike, Utc};
use pdf_writer::{Content, Date, Finish, Name, Pdf, Rect as PdfRect, Ref, Str, TextStr};
use tracing::debug;

use crate::render::document::{
    Block, BlockKind, HeaderBand, Node, Region, ResumeLayout, Section, TextRole,
};
use crate::render::metrics::Face;
use crate::render::template::{Rgb, Template};
use crate::render::{RenderBackend, RenderError, RenderFormat, RenderOutput};

const MARGIN_Y: f32 = 36.0;
const LEFT_PAD: f32 = 20.0;
const RIGHT_PAD: f32 = 25.0;
const COLUMN_TOP_GAP: f32 = 25.0;
const LABEL_WIDTH: f32 = 55.0;
const BULLET_INDENT: f32 = 12.0;
const BAR_HEIGHT: f32 = 5.0;
const LINE_SPACING: f32 = 1.35;
const WHITE: Rgb = Rgb(0xff, 0xff, 0xff);

#[derive(Debug, Default, Clone, Copy)]
pub struct PdfBackend;

impl RenderBackend for PdfBackend {
    fn format(&self) -> RenderFormat {
        RenderFormat::Pdf
    }

    fn rasterize(
        &self,
        layout: &ResumeLayout,
        template: &Template,
    ) -> Result<RenderOutput, RenderError> {
        let paged = paginate(layout, template)?;
        debug!("pdf layout: {} page(s)", paged.pages.len());
        Ok(RenderOutput::Pdf(write_pdf(&paged, &layout.header, Utc::now())))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Draw operations
// ────────────────────────────────────────────────────────────────────────────

/// Axis-aligned box in PDF user space (origin bottom-left, points).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Fill {
        rect: Rect,
        color: Rgb,
    },
    Rule {
        x1: f32,
        x2: f32,
        y: f32,
        width: f32,
        color: Rgb,
    },
    Text {
        x: f32,
        /// Baseline.
        y: f32,
        face: Face,
        size: f32,
        tracking: f32,
        color: Rgb,
        text: String,
    },
    /// Skill bar: the full track plus a fill covering `fill_pct` of it.
    Bar {
        track: Rect,
        fill_pct: u8,
        track_color: Rgb,
        fill_color: Rgb,
    },
}

/// Width of the filled part of a bar track.
pub fn bar_fill_width(track: &Rect, fill_pct: u8) -> f32 {
    track.w * f32::from(fill_pct.min(100)) / 100.0
}

/// Draw operations grouped per page, in paint order.
#[derive(Debug, Clone)]
pub struct PagedLayout {
    pub page_size: (f32, f32),
    pub pages: Vec<Vec<DrawOp>>,
}

// ────────────────────────────────────────────────────────────────────────────
// Pagination
// ────────────────────────────────────────────────────────────────────────────

/// Lays out both regions onto pages.
///
/// Fails when the template geometry is unusable or the content needs more
/// pages than `template.max_pages`.
pub fn paginate(layout: &ResumeLayout, template: &Template) -> Result<PagedLayout, RenderError> {
    template.check().map_err(RenderError::Rasterize)?;

    let (page_w, page_h) = template.page.dimensions_pt();
    let left_w = page_w * f32::from(layout.left.width_pct.min(100)) / 100.0;
    let first_top = page_h - template.header_height_pt - COLUMN_TOP_GAP;
    let top = page_h - MARGIN_Y;

    let mut left = ColumnFlow::new(
        template,
        LEFT_PAD,
        left_w - 2.0 * LEFT_PAD,
        first_top,
        top,
    );
    let mut right = ColumnFlow::new(
        template,
        left_w + RIGHT_PAD,
        page_w - left_w - 2.0 * RIGHT_PAD,
        first_top,
        top,
    );
    if left.width <= 0.0 || right.width <= 0.0 {
        return Err(RenderError::Rasterize(format!(
            "column widths {:.1}pt / {:.1}pt leave no room for text",
            left.width, right.width
        )));
    }

    left.region(&layout.left);
    right.region(&layout.right);

    let page_count = left.pages.len().max(right.pages.len());
    if page_count > usize::from(template.max_pages) {
        return Err(RenderError::Rasterize(format!(
            "layout needs {page_count} pages but the template allows {}",
            template.max_pages
        )));
    }

    let mut left_pages = left.pages.into_iter();
    let mut right_pages = right.pages.into_iter();
    let pages = (0..page_count)
        .map(|index| {
            let mut ops = background(index, template, page_w, page_h, left_w, &layout.header);
            ops.extend(left_pages.next().unwrap_or_default());
            ops.extend(right_pages.next().unwrap_or_default());
            ops
        })
        .collect();

    Ok(PagedLayout {
        page_size: (page_w, page_h),
        pages,
    })
}

fn background(
    index: usize,
    t: &Template,
    page_w: f32,
    page_h: f32,
    left_w: f32,
    header: &HeaderBand,
) -> Vec<DrawOp> {
    if index > 0 {
        return vec![DrawOp::Fill {
            rect: Rect {
                x: 0.0,
                y: 0.0,
                w: left_w,
                h: page_h,
            },
            color: t.sidebar,
        }];
    }

    let band_y = page_h - t.header_height_pt;
    let mut ops = vec![
        DrawOp::Fill {
            rect: Rect {
                x: 0.0,
                y: 0.0,
                w: left_w,
                h: band_y,
            },
            color: t.sidebar,
        },
        DrawOp::Fill {
            rect: Rect {
                x: 0.0,
                y: band_y,
                w: page_w,
                h: t.header_height_pt,
            },
            color: t.accent,
        },
    ];
    ops.extend(centered(
        &header.name,
        TextStyle {
            face: Face::Regular,
            size: t.base_font_pt * 2.9,
            tracking: 4.0,
            color: WHITE,
        },
        page_h - t.header_height_pt * 0.45,
        page_w,
    ));
    ops.extend(centered(
        &header.title,
        TextStyle {
            face: Face::Regular,
            size: t.base_font_pt + 2.0,
            tracking: 3.0,
            color: t.header_subtitle,
        },
        page_h - t.header_height_pt * 0.75,
        page_w,
    ));
    ops
}

/// Centres one line on the page, shrinking it to fit inside 20pt margins.
fn centered(text: &str, mut style: TextStyle, baseline: f32, page_w: f32) -> Option<DrawOp> {
    if text.is_empty() {
        return None;
    }
    let available = page_w - 40.0;
    let metrics = style.face.metrics();
    let natural = metrics.measure_pt(text, style.size, style.tracking);
    if natural > available {
        let scale = available / natural;
        style.size *= scale;
        style.tracking *= scale;
    }
    let width = metrics.measure_pt(text, style.size, style.tracking);
    Some(DrawOp::Text {
        x: (page_w - width) / 2.0,
        y: baseline,
        face: style.face,
        size: style.size,
        tracking: style.tracking,
        color: style.color,
        text: text.to_string(),
    })
}

#[derive(Debug, Clone, Copy)]
struct TextStyle {
    face: Face,
    size: f32,
    tracking: f32,
    color: Rgb,
}

fn text_style(role: TextRole, block: BlockKind, t: &Template) -> TextStyle {
    let base = t.base_font_pt;
    let (face, size, color) = match (role, block) {
        (TextRole::Paragraph, _) => (Face::Oblique, base, t.muted),
        (TextRole::Date, BlockKind::Education) => (Face::Oblique, base, t.accent),
        (TextRole::Date, _) => (Face::Bold, base, t.accent),
        (TextRole::Title, BlockKind::Experience) => (Face::BoldOblique, base + 2.0, t.ink),
        (TextRole::Title, _) => (Face::Bold, base + 1.0, t.ink),
        (TextRole::Detail, _) => (Face::Oblique, base, t.muted),
        (TextRole::Organisation, BlockKind::Experience) => (Face::Regular, base, t.accent),
        (TextRole::Organisation, _) => (Face::Regular, base, t.muted),
        (TextRole::Tech, _) => (Face::Oblique, base - 1.0, t.accent),
    };
    TextStyle {
        face,
        size,
        tracking: 0.0,
        color,
    }
}

/// Top-down cursor over one column across pages.
struct ColumnFlow<'t> {
    template: &'t Template,
    x: f32,
    width: f32,
    first_top: f32,
    top: f32,
    y: f32,
    page: usize,
    pages: Vec<Vec<DrawOp>>,
}

impl<'t> ColumnFlow<'t> {
    fn new(template: &'t Template, x: f32, width: f32, first_top: f32, top: f32) -> Self {
        Self {
            template,
            x,
            width,
            first_top,
            top,
            y: first_top,
            page: 0,
            pages: vec![Vec::new()],
        }
    }

    fn page_top(&self) -> f32 {
        if self.page == 0 {
            self.first_top
        } else {
            self.top
        }
    }

    /// Starts a new page unless `height` fits, or the cursor is already at
    /// the top of a page (content taller than a page is not split further).
    fn reserve(&mut self, height: f32) {
        if self.y - height < MARGIN_Y && self.y < self.page_top() {
            self.page += 1;
            self.pages.push(Vec::new());
            self.y = self.top;
        }
    }

    fn push(&mut self, op: DrawOp) {
        self.pages[self.page].push(op);
    }

    /// Reserves one line at `size` and returns its baseline.
    fn advance(&mut self, size: f32) -> f32 {
        let height = size * LINE_SPACING;
        self.reserve(height);
        let baseline = self.y - size;
        self.y -= height;
        baseline
    }

    fn gap(&mut self, height: f32) {
        self.y -= height;
    }

    fn text_at(&mut self, x: f32, baseline: f32, text: String, style: TextStyle) {
        if text.is_empty() {
            return;
        }
        self.push(DrawOp::Text {
            x,
            y: baseline,
            face: style.face,
            size: style.size,
            tracking: style.tracking,
            color: style.color,
            text,
        });
    }

    fn paragraph(&mut self, text: &str, style: TextStyle) {
        let lines = style.face.metrics().wrap(text, style.size, self.width);
        for line in lines {
            let baseline = self.advance(style.size);
            self.text_at(self.x, baseline, line, style);
        }
    }

    fn region(&mut self, region: &Region) {
        for section in &region.sections {
            self.section(section);
        }
    }

    fn section(&mut self, section: &Section) {
        let t = self.template;
        let style = TextStyle {
            face: Face::Bold,
            size: t.base_font_pt + 1.0,
            tracking: 1.5,
            color: t.accent,
        };
        // keep the heading with at least two body lines
        self.reserve(style.size * LINE_SPACING + 10.0 + t.base_font_pt * LINE_SPACING * 2.0);

        let baseline = self.advance(style.size);
        self.text_at(self.x, baseline, section.heading().to_uppercase(), style);
        self.push(DrawOp::Rule {
            x1: self.x,
            x2: self.x + self.width,
            y: self.y - 1.0,
            width: 1.2,
            color: t.accent,
        });
        self.gap(10.0);

        for block in &section.blocks {
            self.block(block);
        }
        self.gap(8.0);
    }

    fn block(&mut self, block: &Block) {
        let t = self.template;
        for node in &block.nodes {
            match node {
                Node::Row { label, value } => self.row(label, value),
                Node::Text { role, text } => self.paragraph(text, text_style(*role, block.kind, t)),
                Node::Bar {
                    label,
                    value_text,
                    fill_pct,
                } => self.bar(label, value_text, *fill_pct),
                Node::Bullets { items } => self.bullets(items),
            }
        }
        let spacing = match block.kind {
            BlockKind::Contact => 3.0,
            BlockKind::Skill => 7.0,
            BlockKind::Summary => 0.0,
            BlockKind::Education | BlockKind::Project => 10.0,
            BlockKind::Experience => 12.0,
        };
        self.gap(spacing);
    }

    fn row(&mut self, label: &str, value: &str) {
        let t = self.template;
        let size = t.base_font_pt;
        let label_style = TextStyle {
            face: Face::Bold,
            size,
            tracking: 0.0,
            color: t.accent,
        };
        let value_style = TextStyle {
            face: Face::Regular,
            size,
            tracking: 0.0,
            color: t.muted,
        };
        let lines = Face::Regular
            .metrics()
            .wrap(value, size, (self.width - LABEL_WIDTH).max(size));
        for (i, line) in lines.into_iter().enumerate() {
            let baseline = self.advance(size);
            if i == 0 {
                self.text_at(self.x, baseline, label.to_string(), label_style);
            }
            self.text_at(self.x + LABEL_WIDTH, baseline, line, value_style);
        }
    }

    fn bar(&mut self, label: &str, value_text: &str, fill_pct: u8) {
        let t = self.template;
        let size = t.base_font_pt;
        let name_style = TextStyle {
            face: Face::Regular,
            size,
            tracking: 0.0,
            color: t.ink,
        };
        let level_style = TextStyle {
            face: Face::Bold,
            size,
            tracking: 0.0,
            color: t.accent,
        };
        let value_w = Face::Bold.metrics().measure_pt(value_text, size, 0.0);
        let mut lines = Face::Regular
            .metrics()
            .wrap(label, size, (self.width - value_w - 6.0).max(size));
        if lines.is_empty() {
            lines.push(String::new());
        }

        // label line and bar stay on one page
        self.reserve(size * LINE_SPACING + 2.0 + BAR_HEIGHT);
        for (i, line) in lines.into_iter().enumerate() {
            let baseline = self.advance(size);
            if i == 0 {
                let x = self.x + self.width - value_w;
                self.text_at(x, baseline, value_text.to_string(), level_style);
            }
            self.text_at(self.x, baseline, line, name_style);
        }
        self.gap(2.0);

        self.reserve(BAR_HEIGHT);
        self.push(DrawOp::Bar {
            track: Rect {
                x: self.x,
                y: self.y - BAR_HEIGHT,
                w: self.width,
                h: BAR_HEIGHT,
            },
            fill_pct,
            track_color: t.bar_track,
            fill_color: t.accent,
        });
        self.y -= BAR_HEIGHT;
    }

    fn bullets(&mut self, items: &[String]) {
        let t = self.template;
        let style = TextStyle {
            face: Face::Regular,
            size: t.base_font_pt,
            tracking: 0.0,
            color: t.muted,
        };
        for item in items {
            let lines = style
                .face
                .metrics()
                .wrap(item, style.size, self.width - BULLET_INDENT);
            for (i, line) in lines.into_iter().enumerate() {
                let baseline = self.advance(style.size);
                if i == 0 {
                    self.text_at(self.x + 3.0, baseline, "•".to_string(), style);
                }
                self.text_at(self.x + BULLET_INDENT, baseline, line, style);
            }
            self.gap(1.5);
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// PDF serialisation
// ────────────────────────────────────────────────────────────────────────────

fn write_pdf(paged: &PagedLayout, header: &HeaderBand, now: DateTime<Utc>) -> Vec<u8> {
    let mut alloc = Ref::new(1);
    let catalog_id = alloc.bump();
    let tree_id = alloc.bump();
    let info_id = alloc.bump();
    let font_ids: Vec<(Face, Ref)> = Face::ALL.iter().map(|f| (*f, alloc.bump())).collect();
    let page_ids: Vec<(Ref, Ref)> = paged
        .pages
        .iter()
        .map(|_| (alloc.bump(), alloc.bump()))
        .collect();

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(tree_id);
    pdf.pages(tree_id)
        .kids(page_ids.iter().map(|(page_id, _)| *page_id))
        .count(page_ids.len() as i32);

    for (face, id) in &font_ids {
        pdf.type1_font(*id)
            .base_font(Name(face.base_font()))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
    }

    let (page_w, page_h) = paged.page_size;
    for (ops, (page_id, content_id)) in paged.pages.iter().zip(&page_ids) {
        let mut page = pdf.page(*page_id);
        page.media_box(PdfRect::new(0.0, 0.0, page_w, page_h));
        page.parent(tree_id);
        page.contents(*content_id);
        {
            let mut resources = page.resources();
            let mut fonts = resources.fonts();
            for (face, id) in &font_ids {
                fonts.pair(Name(face.resource_name()), *id);
            }
        }
        page.finish();

        pdf.stream(*content_id, &encode_ops(ops));
    }

    let title = if header.name.is_empty() {
        "Resume".to_string()
    } else {
        format!("{} - Resume", header.name)
    };
    let mut info = pdf.document_info(info_id);
    info.title(TextStr(&title));
    info.producer(TextStr(concat!("resume-api ", env!("CARGO_PKG_VERSION"))));
    info.creation_date(pdf_date(now));
    info.finish();

    pdf.finish()
}

fn encode_ops(ops: &[DrawOp]) -> Vec<u8> {
    let mut content = Content::new();
    for op in ops {
        match op {
            DrawOp::Fill { rect, color } => fill_rect(&mut content, rect, *color),
            DrawOp::Rule {
                x1,
                x2,
                y,
                width,
                color,
            } => {
                let (r, g, b) = color.unit();
                content.set_stroke_rgb(r, g, b);
                content.set_line_width(*width);
                content.move_to(*x1, *y);
                content.line_to(*x2, *y);
                content.stroke();
            }
            DrawOp::Text {
                x,
                y,
                face,
                size,
                tracking,
                color,
                text,
            } => {
                let (r, g, b) = color.unit();
                content.set_fill_rgb(r, g, b);
                content.begin_text();
                content.set_font(Name(face.resource_name()), *size);
                content.set_char_spacing(*tracking);
                content.next_line(*x, *y);
                content.show(Str(&win_ansi(text)));
                content.end_text();
            }
            DrawOp::Bar {
                track,
                fill_pct,
                track_color,
                fill_color,
            } => {
                fill_rect(&mut content, track, *track_color);
                let fill_w = bar_fill_width(track, *fill_pct);
                if fill_w > 0.0 {
                    let fill = Rect { w: fill_w, ..*track };
                    fill_rect(&mut content, &fill, *fill_color);
                }
            }
        }
    }
    content.finish()
}

fn fill_rect(content: &mut Content, rect: &Rect, color: Rgb) {
    let (r, g, b) = color.unit();
    content.set_fill_rgb(r, g, b);
    content.rect(rect.x, rect.y, rect.w, rect.h);
    content.fill_nonzero();
}

/// Encodes text as WinAnsi (CP-1252). Unmappable characters become `?`.
pub fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            ' '..='~' | '\u{a0}'..='\u{ff}' => c as u8,
            '€' => 0x80,
            '…' => 0x85,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '™' => 0x99,
            _ => b'?',
        })
        .collect()
}

fn pdf_date(now: DateTime<Utc>) -> Date {
    Date::new(now.year().clamp(0, 9999) as u16)
        .month(now.month() as u8)
        .day(now.day() as u8)
        .hour(now.hour() as u8)
        .minute(now.minute() as u8)
        .second(now.second() as u8)
        .utc_offset_hour(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{Experience, Resume, Skill};
    use crate::render::layout::build_layout;
    use crate::render::template::PageSize;

    fn skill(name: &str, level: u8) -> Skill {
        Skill {
            name: name.to_string(),
            level,
        }
    }

    fn paged(resume: &Resume, template: &Template) -> PagedLayout {
        paginate(&build_layout(resume, template), template).unwrap()
    }

    fn bars(paged: &PagedLayout) -> Vec<(Rect, u8)> {
        paged
            .pages
            .iter()
            .flatten()
            .filter_map(|op| match op {
                DrawOp::Bar {
                    track, fill_pct, ..
                } => Some((*track, *fill_pct)),
                _ => None,
            })
            .collect()
    }

    fn texts(paged: &PagedLayout) -> Vec<&str> {
        paged
            .pages
            .iter()
            .flatten()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    fn long_resume(entries: usize) -> Resume {
        let mut resume = Resume::default();
        resume.header.name = "Jane Doe".to_string();
        resume.experience = (0..entries)
            .map(|i| Experience {
                role: format!("Engineer {i}"),
                company: "Acme".to_string(),
                location: "Remote".to_string(),
                duration: "2020 - 2024".to_string(),
                points: vec![
                    "Designed and operated a multi-region event pipeline handling two \
                     billion messages per day with exactly-once delivery guarantees"
                        .to_string();
                    3
                ],
            })
            .collect();
        resume
    }

    // ── skill bars ──────────────────────────────────────────────────────────

    #[test]
    fn test_bar_fill_is_proportional_to_level() {
        let mut resume = Resume::default();
        resume.skills = vec![skill("Rust", 37), skill("Perl", 0), skill("Go", 100)];
        let bars = bars(&paged(&resume, &Template::default()));
        assert_eq!(bars.len(), 3);

        let (track, pct) = bars[0];
        assert_eq!(pct, 37);
        assert!((bar_fill_width(&track, pct) - track.w * 0.37).abs() < 1e-3);
        assert_eq!(bar_fill_width(&bars[1].0, bars[1].1), 0.0);
        assert_eq!(bar_fill_width(&bars[2].0, bars[2].1), bars[2].0.w);
    }

    #[test]
    fn test_bars_sit_in_left_column() {
        let mut resume = Resume::default();
        resume.skills = vec![skill("Rust", 80)];
        let template = Template::default();
        let (page_w, _) = template.page.dimensions_pt();
        let (track, _) = bars(&paged(&resume, &template))[0];
        assert!(track.x + track.w <= page_w * 0.35);
    }

    // ── header band ─────────────────────────────────────────────────────────

    #[test]
    fn test_header_band_text_on_first_page() {
        let mut resume = long_resume(1);
        resume.header.title = "Platform Engineer".to_string();
        let paged = paged(&resume, &Template::default());
        let first_page: Vec<&str> = paged.pages[0]
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert!(first_page.contains(&"JANE DOE"));
        assert!(first_page.contains(&"PLATFORM ENGINEER"));
    }

    #[test]
    fn test_overlong_name_is_shrunk_to_fit() {
        let mut resume = Resume::default();
        resume.header.name = "Maximiliana Alexandrina Konstantinopoulou-Vanderbilt".to_string();
        let template = Template::default();
        let paged = paged(&resume, &template);
        let (page_w, _) = paged.page_size;
        let name_op = paged.pages[0]
            .iter()
            .find_map(|op| match op {
                DrawOp::Text {
                    x,
                    size,
                    tracking,
                    face,
                    text,
                    ..
                } if text.starts_with("MAXIMILIANA") => Some((*x, *size, *tracking, *face)),
                _ => None,
            })
            .unwrap();
        let (x, size, tracking, face) = name_op;
        assert!(x >= 19.0);
        let width = face
            .metrics()
            .measure_pt(&resume.header.name.to_uppercase(), size, tracking);
        assert!(width <= page_w - 40.0 + 0.5);
    }

    // ── pagination ──────────────────────────────────────────────────────────

    #[test]
    fn test_short_resume_is_one_page() {
        let paged = paged(&long_resume(1), &Template::default());
        assert_eq!(paged.pages.len(), 1);
    }

    #[test]
    fn test_long_resume_flows_onto_more_pages_within_margins() {
        let template = Template::classic(PageSize::Letter).with_max_pages(20);
        let paged = paged(&long_resume(25), &template);
        assert!(paged.pages.len() > 1);

        let (_, page_h) = paged.page_size;
        for page in &paged.pages {
            for op in page {
                if let DrawOp::Text { y, .. } = op {
                    assert!(*y >= MARGIN_Y - LINE_SPACING * 12.0, "text below margin: {y}");
                    assert!(*y <= page_h);
                }
            }
        }
        // every role survives pagination
        let all = texts(&paged);
        for i in 0..25 {
            let role = format!("Engineer {i}");
            assert!(all.contains(&role.as_str()), "missing {role}");
        }
    }

    #[test]
    fn test_sidebar_on_every_page() {
        let template = Template::default().with_max_pages(20);
        let paged = paged(&long_resume(25), &template);
        for page in &paged.pages {
            assert!(page.iter().any(|op| matches!(
                op,
                DrawOp::Fill { color, .. } if *color == template.sidebar
            )));
        }
    }

    #[test]
    fn test_too_many_pages_is_rasterize_error() {
        let template = Template::default().with_max_pages(1);
        let layout = build_layout(&long_resume(40), &template);
        let err = paginate(&layout, &template).unwrap_err();
        assert!(matches!(err, RenderError::Rasterize(ref msg) if msg.contains("pages")));
    }

    #[test]
    fn test_bad_template_is_rasterize_error() {
        let mut template = Template::default();
        template.left_width_pct = 0;
        let layout = build_layout(&Resume::default(), &Template::default());
        assert!(matches!(
            paginate(&layout, &template),
            Err(RenderError::Rasterize(_))
        ));
    }

    // ── serialisation ───────────────────────────────────────────────────────

    #[test]
    fn test_rasterize_produces_pdf_bytes() {
        let mut resume = long_resume(2);
        resume.skills = vec![skill("Rust", 90)];
        let template = Template::default();
        let output = PdfBackend
            .rasterize(&build_layout(&resume, &template), &template)
            .unwrap();
        let RenderOutput::Pdf(bytes) = output else {
            panic!("expected pdf output");
        };
        assert!(bytes.starts_with(b"%PDF-"));
        let tail = String::from_utf8_lossy(&bytes[bytes.len().saturating_sub(16)..]).to_string();
        assert!(tail.contains("%%EOF"));
        let body = String::from_utf8_lossy(&bytes);
        assert!(body.contains("/Helvetica-Bold"));
        assert!(body.contains("/WinAnsiEncoding"));
    }

    #[test]
    fn test_page_tree_counts_every_page() {
        let template = Template::default().with_max_pages(20);
        let paged = paginate(&build_layout(&long_resume(25), &template), &template).unwrap();
        let header = HeaderBand {
            name: "JANE".to_string(),
            title: String::new(),
        };
        let bytes = write_pdf(&paged, &header, Utc::now());
        let body = String::from_utf8_lossy(&bytes);
        assert!(paged.pages.len() > 1);
        assert!(body.contains(&format!("/Count {}", paged.pages.len())));
        assert!(body.contains("(JANE - Resume)"));
    }

    #[test]
    fn test_win_ansi_mapping() {
        assert_eq!(win_ansi("Ab 1"), b"Ab 1".to_vec());
        assert_eq!(win_ansi("é"), vec![0xe9]);
        assert_eq!(win_ansi("•–—"), vec![0x95, 0x96, 0x97]);
        assert_eq!(win_ansi("漢"), b"?".to_vec());
    }
}
