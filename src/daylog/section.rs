//! # Section Merging
//!
//! A daily note is an ordinary markdown file the user also edits by hand, so
//! daylog only ever touches one well-delimited range of it: a level-3 entry
//! (`### <project>`) under a level-2 section (`## Projects`).
//!
//! Headings are recognized by literal prefix (`# `, `## `, `### `); nothing
//! else about markdown is interpreted. An entry runs from its heading to the
//! next level 1-3 heading or the end of the document.
//!
//! [`merge_entry`] is a pure function from lines to lines:
//! - the section is appended when missing,
//! - an existing entry with the same title under that section is replaced,
//! - otherwise the entry is inserted at the end of the section.
//!
//! Everything outside the replaced range is carried over unchanged, and
//! merging the same entry twice leaves the document as the first merge did.

/// Heading level of `line`, if it is a level 1-3 heading.
pub fn heading_level(line: &str) -> Option<u8> {
    if line.starts_with("### ") {
        Some(3)
    } else if line.starts_with("## ") {
        Some(2)
    } else if line.starts_with("# ") {
        Some(1)
    } else {
        None
    }
}

fn is_heading_at_most(line: &str, level: u8) -> bool {
    heading_level(line).is_some_and(|l| l <= level)
}

/// The lines an entry is written as: heading, body, one blank separator.
pub fn render_entry(entry_title: &str, entry_body: &str) -> Vec<String> {
    let mut body: Vec<&str> = entry_body.lines().collect();
    while body.last().is_some_and(|line| line.trim().is_empty()) {
        body.pop();
    }

    let mut lines = Vec::with_capacity(body.len() + 2);
    lines.push(format!("### {}", entry_title));
    lines.extend(body.into_iter().map(str::to_string));
    lines.push(String::new());
    lines
}

/// Inserts or replaces the `### entry_title` entry under `## section_title`.
pub fn merge_entry(
    lines: &[String],
    section_title: &str,
    entry_title: &str,
    entry_body: &str,
) -> Vec<String> {
    let section_heading = format!("## {}", section_title);
    let entry_heading = format!("### {}", entry_title);
    let entry = render_entry(entry_title, entry_body);

    let mut lines = lines.to_vec();
    let section_start = match lines.iter().position(|line| *line == section_heading) {
        Some(index) => index,
        None => {
            lines.push(String::new());
            lines.push(section_heading);
            lines.push(String::new());
            lines.len() - 2
        }
    };

    // the section ends at the next level 1-2 heading
    let section_end = lines[section_start + 1..]
        .iter()
        .position(|line| is_heading_at_most(line, 2))
        .map_or(lines.len(), |offset| section_start + 1 + offset);

    let existing = lines[section_start + 1..section_end]
        .iter()
        .position(|line| *line == entry_heading)
        .map(|offset| section_start + 1 + offset);

    match existing {
        Some(start) => {
            let end = lines[start + 1..]
                .iter()
                .position(|line| is_heading_at_most(line, 3))
                .map_or(lines.len(), |offset| start + 1 + offset);
            lines.splice(start..end, entry);
        }
        None => {
            lines.splice(section_end..section_end, entry);
        }
    }

    lines
}

/// A note's full content as lines.
///
/// Remembers the line ending and whether the text ended with one, so lines
/// outside a merged entry are written back exactly as read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub lines: Vec<String>,
    line_ending: &'static str,
    trailing_newline: bool,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            lines: Vec::new(),
            line_ending: "\n",
            trailing_newline: true,
        }
    }
}

impl Document {
    pub fn from_text(text: &str) -> Self {
        if text.is_empty() {
            return Self::default();
        }
        let line_ending = if text.contains("\r\n") { "\r\n" } else { "\n" };
        Self {
            lines: text.lines().map(str::to_string).collect(),
            line_ending,
            trailing_newline: text.ends_with('\n'),
        }
    }

    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn to_text(&self) -> String {
        let mut text = self.lines.join(self.line_ending);
        if self.trailing_newline && !self.lines.is_empty() {
            text.push_str(self.line_ending);
        }
        text
    }

    /// Returns a new document with the entry merged in; see [`merge_entry`].
    pub fn merge_entry(&self, section_title: &str, entry_title: &str, entry_body: &str) -> Self {
        Self {
            lines: merge_entry(&self.lines, section_title, entry_title, entry_body),
            ..self.clone()
        }
    }
}
