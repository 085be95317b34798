//! Authors and donors lists
//!
//! Both files are Markdown with `## ` headings; each name is a line indented
//! by four spaces. Only headings ending with a known section title are
//! collected, everything else is skipped.

use crate::cxx::{escape_string, GENERATED_BANNER};

/// A heading to collect and the C array it becomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
    pub title: &'static str,
    pub id: &'static str,
}

pub const AUTHORS_SECTIONS: &[Section] = &[
    Section {
        title: "Project Founders",
        id: "AUTHORS_FOUNDERS",
    },
    Section {
        title: "Lead Developer",
        id: "AUTHORS_LEAD_DEVELOPERS",
    },
    Section {
        title: "Project Manager",
        id: "AUTHORS_PROJECT_MANAGERS",
    },
    Section {
        title: "Developers",
        id: "AUTHORS_DEVELOPERS",
    },
];

pub const DONORS_SECTIONS: &[Section] = &[
    Section {
        title: "Platinum sponsors",
        id: "DONORS_SPONSOR_PLATINUM",
    },
    Section {
        title: "Gold sponsors",
        id: "DONORS_SPONSOR_GOLD",
    },
    Section {
        title: "Silver sponsors",
        id: "DONORS_SPONSOR_SILVER",
    },
    Section {
        title: "Bronze sponsors",
        id: "DONORS_SPONSOR_BRONZE",
    },
    Section {
        title: "Mini sponsors",
        id: "DONORS_SPONSOR_MINI",
    },
    Section {
        title: "Gold donors",
        id: "DONORS_GOLD",
    },
    Section {
        title: "Silver donors",
        id: "DONORS_SILVER",
    },
    Section {
        title: "Bronze donors",
        id: "DONORS_BRONZE",
    },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContributorGroup {
    pub id: &'static str,
    pub names: Vec<String>,
}

/// Collect the names listed under each recognised heading, in file order.
///
/// A heading that appears twice yields two groups.
pub fn parse_contributors(text: &str, sections: &[Section]) -> Vec<ContributorGroup> {
    let mut groups = Vec::new();
    let mut current: Option<ContributorGroup> = None;

    for line in text.lines() {
        if let Some(group) = current.as_mut() {
            if line.starts_with("    ") {
                group.names.push(line.trim().to_string());
                continue;
            }
        }
        if line.starts_with("## ") {
            groups.extend(current.take());
            let heading = line.trim();
            current = sections
                .iter()
                .find(|section| heading.ends_with(section.title))
                .map(|section| ContributorGroup {
                    id: section.id,
                    names: Vec::new(),
                });
        }
    }
    groups.extend(current);
    groups
}

/// Render the groups as null-terminated `const char *` arrays.
pub fn render_contributors(groups: &[ContributorGroup], guard: &str) -> String {
    let mut out = String::new();
    out.push_str(GENERATED_BANNER);
    out.push_str(&format!("#ifndef {}\n#define {}\n", guard, guard));
    for group in groups {
        out.push_str(&format!("const char *const {}[] = {{\n", group.id));
        for name in &group.names {
            out.push_str(&format!("\t\"{}\",\n", escape_string(name)));
        }
        out.push_str("\t0\n};\n");
    }
    out.push_str("#endif\n");
    out
}
