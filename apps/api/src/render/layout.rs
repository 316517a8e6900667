//! Layout binding: maps a canonical [`Resume`] onto the two-region document
//! tree.
//!
//! # Rules
//! - Header band: name and title, upper-cased.
//! - Left region: Contact, Summary, Education, Skills.
//! - Right region: Professional Experience, Projects.
//! - A section with nothing to show is left out entirely, header included.
//! - Contact shows only non-empty fields.
//! - Skill bars fill exactly `level` percent of the track.
//! - "company, location" gets the location only when it is non-empty.
//! - Tech stacks are comma-joined and omitted when empty; bullet lists are
//!   omitted when empty.

use crate::models::resume::{Education, Experience, Project, Resume, Skill};
use crate::render::document::{
    Block, BlockKind, HeaderBand, Node, Region, RegionSide, ResumeLayout, Section, SectionKind,
    TextRole,
};
use crate::render::template::Template;

/// Binds `resume` to the template's regions. Never mutates the document.
pub fn build_layout(resume: &Resume, template: &Template) -> ResumeLayout {
    let left_sections = [
        contact_section(resume),
        summary_section(resume),
        list_section(SectionKind::Education, &resume.education, education_block),
        list_section(SectionKind::Skills, &resume.skills, skill_block),
    ];
    let right_sections = [
        list_section(SectionKind::Experience, &resume.experience, experience_block),
        list_section(SectionKind::Projects, &resume.projects, project_block),
    ];

    ResumeLayout {
        header: HeaderBand {
            name: resume.header.name.to_uppercase(),
            title: resume.header.title.to_uppercase(),
        },
        left: Region {
            side: RegionSide::Left,
            width_pct: template.left_width_pct,
            sections: left_sections.into_iter().flatten().collect(),
        },
        right: Region {
            side: RegionSide::Right,
            width_pct: template.right_width_pct(),
            sections: right_sections.into_iter().flatten().collect(),
        },
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Sections
// ────────────────────────────────────────────────────────────────────────────

fn contact_section(resume: &Resume) -> Option<Section> {
    let blocks: Vec<Block> = resume
        .contact
        .labelled()
        .into_iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(label, value)| Block {
            kind: BlockKind::Contact,
            nodes: vec![Node::Row {
                label: label.to_string(),
                value: value.to_string(),
            }],
        })
        .collect();

    non_empty(SectionKind::Contact, blocks)
}

fn summary_section(resume: &Resume) -> Option<Section> {
    if resume.summary.is_empty() {
        return None;
    }
    non_empty(
        SectionKind::Summary,
        vec![Block {
            kind: BlockKind::Summary,
            nodes: vec![text(TextRole::Paragraph, &resume.summary)],
        }],
    )
}

fn list_section<T>(kind: SectionKind, items: &[T], block: fn(&T) -> Block) -> Option<Section> {
    non_empty(kind, items.iter().map(block).collect())
}

fn non_empty(kind: SectionKind, blocks: Vec<Block>) -> Option<Section> {
    if blocks.is_empty() {
        None
    } else {
        Some(Section { kind, blocks })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Blocks
// ────────────────────────────────────────────────────────────────────────────

fn education_block(edu: &Education) -> Block {
    let mut nodes = vec![
        text(TextRole::Date, &edu.year),
        text(TextRole::Title, &edu.degree),
    ];
    if !edu.details.is_empty() {
        nodes.push(text(TextRole::Detail, &edu.details));
    }
    nodes.push(text(TextRole::Organisation, &edu.institution));
    Block {
        kind: BlockKind::Education,
        nodes,
    }
}

fn skill_block(skill: &Skill) -> Block {
    Block {
        kind: BlockKind::Skill,
        nodes: vec![Node::Bar {
            label: skill.name.clone(),
            value_text: format!("{}%", skill.level),
            fill_pct: skill.level,
        }],
    }
}

fn experience_block(exp: &Experience) -> Block {
    let organisation = if exp.location.is_empty() {
        exp.company.clone()
    } else {
        format!("{}, {}", exp.company, exp.location)
    };
    let mut nodes = vec![
        text(TextRole::Date, &exp.duration),
        text(TextRole::Title, &exp.role),
        Node::Text {
            role: TextRole::Organisation,
            text: organisation,
        },
    ];
    push_bullets(&mut nodes, &exp.points);
    Block {
        kind: BlockKind::Experience,
        nodes,
    }
}

fn project_block(project: &Project) -> Block {
    let mut nodes = vec![text(TextRole::Title, &project.title)];
    if !project.tech_stack.is_empty() {
        nodes.push(Node::Text {
            role: TextRole::Tech,
            text: project.tech_stack.join(", "),
        });
    }
    push_bullets(&mut nodes, &project.points);
    Block {
        kind: BlockKind::Project,
        nodes,
    }
}

fn push_bullets(nodes: &mut Vec<Node>, points: &[String]) {
    if !points.is_empty() {
        nodes.push(Node::Bullets {
            items: points.to_vec(),
        });
    }
}

fn text(role: TextRole, value: &str) -> Node {
    Node::Text {
        role,
        text: value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{Contact, Header};

    fn sample() -> Resume {
        Resume {
            header: Header {
                name: "Jane Doe".to_string(),
                title: "Backend Engineer".to_string(),
            },
            contact: Contact {
                email: "jane@x.com".to_string(),
                linkedin: "in/jane".to_string(),
                ..Default::default()
            },
            summary: "Builds reliable services.".to_string(),
            skills: vec![
                Skill {
                    name: "Rust".to_string(),
                    level: 37,
                },
                Skill {
                    name: "COBOL".to_string(),
                    level: 0,
                },
            ],
            projects: vec![Project {
                title: "Ledger".to_string(),
                tech_stack: vec!["Rust".to_string(), "Postgres".to_string()],
                points: vec![],
            }],
            experience: vec![Experience {
                role: "Engineer".to_string(),
                company: "Acme".to_string(),
                location: String::new(),
                duration: "2021 - 2024".to_string(),
                points: vec!["Shipped billing v2".to_string()],
            }],
            education: vec![Education {
                degree: "BSc CS".to_string(),
                institution: "TU Berlin".to_string(),
                year: "2020".to_string(),
                details: String::new(),
            }],
        }
    }

    fn kinds(region: &Region) -> Vec<SectionKind> {
        region.sections.iter().map(|s| s.kind).collect()
    }

    #[test]
    fn test_header_is_upper_cased() {
        let layout = build_layout(&sample(), &Template::default());
        assert_eq!(layout.header.name, "JANE DOE");
        assert_eq!(layout.header.title, "BACKEND ENGINEER");
    }

    #[test]
    fn test_region_order_and_widths() {
        let layout = build_layout(&sample(), &Template::default());
        assert_eq!(
            kinds(&layout.left),
            [
                SectionKind::Contact,
                SectionKind::Summary,
                SectionKind::Education,
                SectionKind::Skills
            ]
        );
        assert_eq!(
            kinds(&layout.right),
            [SectionKind::Experience, SectionKind::Projects]
        );
        assert_eq!(layout.left.width_pct, 35);
        assert_eq!(layout.right.width_pct, 65);
    }

    #[test]
    fn test_contact_rows_only_for_non_empty_fields() {
        let layout = build_layout(&sample(), &Template::default());
        let contact = layout.section(SectionKind::Contact).unwrap();
        let labels: Vec<&str> = contact
            .blocks
            .iter()
            .flat_map(|b| &b.nodes)
            .filter_map(|n| match n {
                Node::Row { label, .. } => Some(label.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(labels, ["email", "linkedin"]);
    }

    #[test]
    fn test_empty_sections_omitted() {
        let mut resume = sample();
        resume.summary.clear();
        resume.projects.clear();
        resume.education.clear();
        resume.contact = Contact::default();

        let layout = build_layout(&resume, &Template::default());
        assert_eq!(kinds(&layout.left), [SectionKind::Skills]);
        assert_eq!(kinds(&layout.right), [SectionKind::Experience]);
    }

    #[test]
    fn test_skill_bar_fill_equals_level() {
        let layout = build_layout(&sample(), &Template::default());
        let fills: Vec<u8> = layout
            .section(SectionKind::Skills)
            .unwrap()
            .blocks
            .iter()
            .flat_map(|b| &b.nodes)
            .filter_map(|n| match n {
                Node::Bar { fill_pct, .. } => Some(*fill_pct),
                _ => None,
            })
            .collect();
        assert_eq!(fills, [37u8, 0]);
    }

    #[test]
    fn test_company_line_without_location() {
        let layout = build_layout(&sample(), &Template::default());
        let block = &layout.section(SectionKind::Experience).unwrap().blocks[0];
        assert!(block.nodes.contains(&Node::Text {
            role: TextRole::Organisation,
            text: "Acme".to_string()
        }));
    }

    #[test]
    fn test_company_line_with_location() {
        let mut resume = sample();
        resume.experience[0].location = "Remote".to_string();
        let layout = build_layout(&resume, &Template::default());
        let block = &layout.section(SectionKind::Experience).unwrap().blocks[0];
        assert!(block.nodes.contains(&Node::Text {
            role: TextRole::Organisation,
            text: "Acme, Remote".to_string()
        }));
    }

    #[test]
    fn test_project_tech_joined_and_empty_points_omitted() {
        let layout = build_layout(&sample(), &Template::default());
        let block = &layout.section(SectionKind::Projects).unwrap().blocks[0];
        assert_eq!(
            block.nodes,
            vec![
                Node::Text {
                    role: TextRole::Title,
                    text: "Ledger".to_string()
                },
                Node::Text {
                    role: TextRole::Tech,
                    text: "Rust, Postgres".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_education_details_only_when_present() {
        let mut resume = sample();
        let layout = build_layout(&resume, &Template::default());
        let nodes = &layout.section(SectionKind::Education).unwrap().blocks[0].nodes;
        assert_eq!(nodes.len(), 3);

        resume.education[0].details = "First-class honours".to_string();
        let layout = build_layout(&resume, &Template::default());
        let nodes = &layout.section(SectionKind::Education).unwrap().blocks[0].nodes;
        assert_eq!(
            nodes[2],
            Node::Text {
                role: TextRole::Detail,
                text: "First-class honours".to_string()
            }
        );
    }

    #[test]
    fn test_one_block_per_entry() {
        let mut resume = sample();
        resume.projects.push(Project::default());
        let layout = build_layout(&resume, &Template::default());
        assert_eq!(layout.section(SectionKind::Projects).unwrap().blocks.len(), 2);
    }

    #[test]
    fn test_binding_does_not_mutate_document() {
        let resume = sample();
        let before = resume.clone();
        let _ = build_layout(&resume, &Template::default());
        assert_eq!(resume, before);
    }
}
