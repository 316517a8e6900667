//! Template definition: page geometry, column split and palette.
//!
//! A template is built once at startup and shared read-only between
//! concurrent render calls.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Page size
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageSize {
    #[default]
    A4,
    Letter,
}

impl PageSize {
    /// Width and height in PDF points (1/72 inch).
    pub fn dimensions_pt(self) -> (f32, f32) {
        match self {
            PageSize::A4 => (595.28, 841.89),
            PageSize::Letter => (612.0, 792.0),
        }
    }

    /// Value for the CSS `@page { size: ... }` rule.
    pub fn css_name(self) -> &'static str {
        match self {
            PageSize::A4 => "A4",
            PageSize::Letter => "letter",
        }
    }
}

impl FromStr for PageSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a4" => Ok(PageSize::A4),
            "letter" | "us-letter" => Ok(PageSize::Letter),
            other => Err(format!("unknown page size '{other}' (expected a4 or letter)")),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Colour
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }

    /// Components scaled to 0.0 to 1.0 for PDF colour operators.
    pub fn unit(self) -> (f32, f32, f32) {
        (
            self.0 as f32 / 255.0,
            self.1 as f32 / 255.0,
            self.2 as f32 / 255.0,
        )
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Template
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub page: PageSize,
    /// Left column share of the page width; the right column takes the rest.
    pub left_width_pct: u8,
    pub accent: Rgb,
    pub sidebar: Rgb,
    pub ink: Rgb,
    pub muted: Rgb,
    pub header_subtitle: Rgb,
    pub bar_track: Rgb,
    /// Body font size in points. Other sizes scale from it.
    pub base_font_pt: f32,
    /// Height of the header band on the first page.
    pub header_height_pt: f32,
    /// Rasterization fails rather than emit more pages than this.
    pub max_pages: u16,
}

impl Default for Template {
    fn default() -> Self {
        Template::classic(PageSize::A4)
    }
}

impl Template {
    /// Teal header band, grey sidebar, 35/65 split.
    pub fn classic(page: PageSize) -> Self {
        Self {
            page,
            left_width_pct: 35,
            accent: Rgb(0x2e, 0x66, 0x77),
            sidebar: Rgb(0xf5, 0xf6, 0xf7),
            ink: Rgb(0x22, 0x22, 0x22),
            muted: Rgb(0x55, 0x55, 0x55),
            header_subtitle: Rgb(0xe0, 0xe0, 0xe0),
            bar_track: Rgb(0xdd, 0xdd, 0xdd),
            base_font_pt: 9.0,
            header_height_pt: 95.0,
            max_pages: 4,
        }
    }

    pub fn with_max_pages(mut self, max_pages: u16) -> Self {
        self.max_pages = max_pages;
        self
    }

    pub fn right_width_pct(&self) -> u8 {
        100u8.saturating_sub(self.left_width_pct)
    }

    /// Rejects geometry no backend can lay out.
    pub fn check(&self) -> Result<(), String> {
        if !(10..=90).contains(&self.left_width_pct) {
            return Err(format!(
                "left column width {}% is outside 10-90%",
                self.left_width_pct
            ));
        }
        if self.max_pages == 0 {
            return Err("max_pages must be at least 1".to_string());
        }
        if !(self.base_font_pt > 0.0) {
            return Err(format!("base font size {} is not positive", self.base_font_pt));
        }
        let (_, height) = self.page.dimensions_pt();
        if self.header_height_pt < 0.0 || self.header_height_pt >= height / 2.0 {
            return Err(format!(
                "header band height {}pt does not fit the page",
                self.header_height_pt
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_size_parse() {
        assert_eq!("A4".parse::<PageSize>().unwrap(), PageSize::A4);
        assert_eq!(" letter ".parse::<PageSize>().unwrap(), PageSize::Letter);
        assert!("legal".parse::<PageSize>().is_err());
    }

    #[test]
    fn test_classic_split_is_35_65() {
        let t = Template::classic(PageSize::Letter);
        assert_eq!(t.left_width_pct, 35);
        assert_eq!(t.right_width_pct(), 65);
        assert!(t.check().is_ok());
    }

    #[test]
    fn test_rgb_hex_and_unit() {
        let accent = Rgb(0x2e, 0x66, 0x77);
        assert_eq!(accent.hex(), "#2e6677");
        let (r, _, _) = Rgb(255, 0, 0).unit();
        assert_eq!(r, 1.0);
    }

    #[test]
    fn test_check_rejects_bad_geometry() {
        let mut t = Template::default();
        t.left_width_pct = 95;
        assert_eq!(
            t.check().unwrap_err(),
            "left column width 95% is outside 10-90%"
        );

        let t = Template::default().with_max_pages(0);
        assert!(t.check().is_err());

        let mut t = Template::default();
        t.header_height_pt = 600.0;
        assert!(t.check().is_err());
    }
}
