//! Copyright ledger parser
//!
//! Reads the machine-readable copyright file (Debian `copyright-format`
//! style). The file is a sequence of paragraphs separated by lines without a
//! `Tag:`; a tag's value continues on following lines that start with a
//! space. Lines starting with `#` are ignored everywhere.
//!
//! A paragraph with a `Comment: <project>` tag contributes one part to that
//! project. A paragraph with a `License` but no `Files` tag is a standalone
//! license text.

use super::LegalError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicensePart {
    /// License identifier (first value of the `License` tag).
    pub license: String,
    pub files: Vec<String>,
    pub copyright: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub name: String,
    pub parts: Vec<LicensePart>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandaloneLicense {
    pub name: String,
    /// Body lines; a lone `.` stands for an empty line.
    pub body: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopyrightLedger {
    /// Projects in order of first appearance.
    pub projects: Vec<Project>,
    pub licenses: Vec<StandaloneLicense>,
}

impl CopyrightLedger {
    fn project_mut(&mut self, name: &str) -> &mut Project {
        let index = match self.projects.iter().position(|p| p.name == name) {
            Some(index) => index,
            None => {
                self.projects.push(Project {
                    name: name.to_string(),
                    parts: Vec::new(),
                });
                self.projects.len() - 1
            }
        };
        &mut self.projects[index]
    }
}

/// Line cursor that skips comment lines.
struct LedgerReader<'a> {
    lines: std::str::Lines<'a>,
    line_num: usize,
    current: Option<&'a str>,
}

impl<'a> LedgerReader<'a> {
    fn new(text: &'a str) -> Self {
        let mut reader = LedgerReader {
            lines: text.lines(),
            line_num: 0,
            current: None,
        };
        reader.next_line();
        reader
    }

    fn next_line(&mut self) -> Option<&'a str> {
        loop {
            self.current = self.lines.next();
            self.line_num += 1;
            match self.current {
                Some(line) if line.starts_with('#') => continue,
                other => return other,
            }
        }
    }

    /// Read the tag on the current line plus its continuation lines.
    ///
    /// Returns an empty tag when the current line carries none.
    fn next_tag(&mut self) -> (&'a str, Vec<String>) {
        let Some((tag, first)) = self.current.and_then(|line| line.split_once(':')) else {
            return ("", Vec::new());
        };
        let mut values = vec![first.trim().to_string()];
        while let Some(line) = self.next_line() {
            if !line.starts_with(' ') {
                break;
            }
            values.push(line.trim().to_string());
        }
        (tag, values)
    }
}

#[derive(Default)]
struct Paragraph {
    files: Option<Vec<String>>,
    copyright: Option<Vec<String>>,
    license: Option<Vec<String>>,
    projects: Vec<String>,
}

impl Paragraph {
    fn close(self, ledger: &mut CopyrightLedger, line: usize) -> Result<(), LegalError> {
        if self.files.is_none() {
            if let Some(license) = &self.license {
                let mut values = license.iter().cloned();
                let name = values.next().unwrap_or_default();
                // first body wins for a repeated license name
                if !ledger.licenses.iter().any(|known| known.name == name) {
                    ledger.licenses.push(StandaloneLicense {
                        name,
                        body: values.collect(),
                    });
                }
            }
        }

        for project in &self.projects {
            let missing = |field: &'static str| LegalError::MissingField {
                project: project.clone(),
                field,
                line,
            };
            let files = self.files.clone().ok_or_else(|| missing("Files"))?;
            let copyright = self.copyright.clone().ok_or_else(|| missing("Copyright"))?;
            let license = self
                .license
                .as_ref()
                .and_then(|values| values.first().cloned())
                .ok_or_else(|| missing("License"))?;
            ledger.project_mut(project).parts.push(LicensePart {
                license,
                files,
                copyright,
            });
        }
        Ok(())
    }
}

/// Parse a copyright ledger.
pub fn parse_copyright(text: &str) -> Result<CopyrightLedger, LegalError> {
    let mut ledger = CopyrightLedger::default();
    let mut reader = LedgerReader::new(text);
    let mut paragraph = Paragraph::default();

    while reader.current.is_some() {
        let (tag, values) = reader.next_tag();
        match tag {
            "Files" => paragraph.files = Some(values),
            "Copyright" => paragraph.copyright = Some(values),
            "License" => paragraph.license = Some(values),
            "Comment" => {
                if let Some(name) = values.into_iter().next() {
                    paragraph.projects.push(name);
                }
            }
            _ => {}
        }

        if tag.is_empty() || reader.current.is_none() {
            std::mem::take(&mut paragraph).close(&mut ledger, reader.line_num)?;
            reader.next_line();
        }
    }

    Ok(ledger)
}
