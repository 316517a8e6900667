//! Document tree produced by layout binding and consumed by render backends.
//!
//! The tree carries no styling beyond semantic roles; backends decide how a
//! role looks. Nothing here references the `Resume` type, so backends can be
//! tested against hand-built trees.

use serde::Serialize;

/// A complete two-region resume layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResumeLayout {
    pub header: HeaderBand,
    pub left: Region,
    pub right: Region,
}

/// Full-width band at the top of the first page. Text is already upper-cased.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeaderBand {
    pub name: String,
    pub title: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionSide {
    Left,
    Right,
}

/// One column of the page. Sections appear in order; empty sections are
/// never present.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Region {
    pub side: RegionSide,
    /// Share of the page width, in percent.
    pub width_pct: u8,
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Contact,
    Summary,
    Education,
    Skills,
    Experience,
    Projects,
}

impl SectionKind {
    pub fn heading(self) -> &'static str {
        match self {
            SectionKind::Contact => "Contact",
            SectionKind::Summary => "Summary",
            SectionKind::Education => "Education",
            SectionKind::Skills => "Relevant Skills",
            SectionKind::Experience => "Professional Experience",
            SectionKind::Projects => "Projects",
        }
    }

    /// Stable identifier used for CSS classes and diagnostics.
    pub fn slug(self) -> &'static str {
        match self {
            SectionKind::Contact => "contact",
            SectionKind::Summary => "summary",
            SectionKind::Education => "education",
            SectionKind::Skills => "skills",
            SectionKind::Experience => "experience",
            SectionKind::Projects => "projects",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub kind: SectionKind,
    pub blocks: Vec<Block>,
}

impl Section {
    pub fn heading(&self) -> &'static str {
        self.kind.heading()
    }
}

/// A group of nodes that belongs together (one education entry, one skill,
/// one contact row, ...).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Block {
    pub kind: BlockKind,
    pub nodes: Vec<Node>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    Contact,
    Summary,
    Education,
    Skill,
    Experience,
    Project,
}

impl BlockKind {
    pub fn slug(self) -> &'static str {
        match self {
            BlockKind::Contact => "contact",
            BlockKind::Summary => "summary",
            BlockKind::Education => "education",
            BlockKind::Skill => "skill",
            BlockKind::Experience => "experience",
            BlockKind::Project => "project",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum Node {
    /// Label/value pair, e.g. a contact row.
    Row { label: String, value: String },
    /// A line of running text with a semantic role.
    Text { role: TextRole, text: String },
    /// Proportional bar. `fill_pct` is the filled share of the track.
    Bar {
        label: String,
        value_text: String,
        fill_pct: u8,
    },
    /// Bulleted list. Never empty.
    Bullets { items: Vec<String> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextRole {
    /// Long-form paragraph (summary).
    Paragraph,
    /// Dates and durations.
    Date,
    /// Primary line of an entry: degree, role, project title.
    Title,
    /// Secondary emphasis: honours, GPA.
    Detail,
    /// Organisation line: institution, "company, location".
    Organisation,
    /// Comma-joined technology list.
    Tech,
}

impl TextRole {
    pub fn slug(self) -> &'static str {
        match self {
            TextRole::Paragraph => "paragraph",
            TextRole::Date => "date",
            TextRole::Title => "title",
            TextRole::Detail => "detail",
            TextRole::Organisation => "organisation",
            TextRole::Tech => "tech",
        }
    }
}

impl ResumeLayout {
    /// All sections across both regions, left first.
    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.left.sections.iter().chain(self.right.sections.iter())
    }

    #[cfg(test)]
    pub fn section(&self, kind: SectionKind) -> Option<&Section> {
        self.sections().find(|s| s.kind == kind)
    }
}
