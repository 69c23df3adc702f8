//! Master document model.
//!
//! # Responsibility
//! - Render the starter skeleton for a new project.
//! - Hold the master file as an ordered list of lines and insert entry
//!   references right above the end-marker line.
//! - Read back the references registered in the notes region.
//!
//! # Invariants
//! - Every stored line keeps its original terminator, so `render()` of an
//!   unmodified document reproduces the input bytes.
//! - Insertion never reorders existing lines.

use crate::config::ProjectLayout;
use once_cell::sync::Lazy;
use regex::Regex;

static INPUT_LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*\\input\{(?P<file>[^{}]+)\}\s*$").expect("input line regex is valid")
});

/// A reference line found inside the notes region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    /// Included file name as written in the master document.
    pub file_name: String,
    /// 1-based line number in the master document.
    pub line_number: usize,
}

/// In-memory master document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MasterDocument {
    lines: Vec<String>,
}

impl MasterDocument {
    /// Returns the starter master document for `project_name`.
    pub fn skeleton(project_name: &str, layout: &ProjectLayout) -> String {
        let mut out = String::new();
        out.push_str(&format!("% {project_name} master file\n"));
        out.push('\n');
        out.push_str("\\documentclass{article}\n");
        out.push_str("\\input{../preamble.tex}\n");
        out.push('\n');
        out.push_str(&format!("\\title{{{project_name}}}\n"));
        out.push_str("\\date{}\n");
        out.push('\n');
        out.push_str("\\begin{document}\n");
        out.push_str("\\maketitle\n");
        out.push_str("\\tableofcontents\n");
        out.push_str("\\newpage\n");
        out.push_str(&format!("{}\n\n{}\n", layout.begin_marker, layout.end_marker));
        out.push_str("\\end{document}");
        out
    }

    pub fn parse(content: &str) -> Self {
        Self {
            lines: content.split_inclusive('\n').map(str::to_string).collect(),
        }
    }

    pub fn render(&self) -> String {
        self.lines.concat()
    }

    /// Line index (0-based) of the end-marker line.
    pub fn end_marker_index(&self, layout: &ProjectLayout) -> Option<usize> {
        self.lines
            .iter()
            .position(|line| strip_terminator(line) == layout.end_marker)
    }

    /// Inclusion line for `file_name`, without terminator.
    pub fn input_line(file_name: &str) -> String {
        format!("\\input{{{file_name}}}")
    }

    /// References between the begin marker (or document start when absent)
    /// and the end marker, in document order.
    pub fn references(&self, layout: &ProjectLayout) -> Vec<Reference> {
        let end = self
            .end_marker_index(layout)
            .unwrap_or(self.lines.len());
        let start = self.lines[..end]
            .iter()
            .rposition(|line| strip_terminator(line) == layout.begin_marker)
            .map(|index| index + 1)
            .unwrap_or(0);

        self.lines[start..end]
            .iter()
            .enumerate()
            .filter_map(|(offset, line)| {
                INPUT_LINE_RE
                    .captures(strip_terminator(line))
                    .map(|captures| Reference {
                        file_name: captures["file"].to_string(),
                        line_number: start + offset + 1,
                    })
            })
            .collect()
    }

    pub fn has_reference(&self, file_name: &str, layout: &ProjectLayout) -> bool {
        self.references(layout)
            .iter()
            .any(|reference| reference.file_name == file_name)
    }

    /// Inserts a reference to `file_name` directly above the end marker.
    ///
    /// Returns the 0-based index of the inserted line, or `None` when the
    /// document has no end-marker line (the document is left untouched).
    pub fn insert_reference(&mut self, file_name: &str, layout: &ProjectLayout) -> Option<usize> {
        let index = self.end_marker_index(layout)?;
        let terminator = line_terminator(&self.lines[index]);
        self.lines
            .insert(index, format!("{}{terminator}", Self::input_line(file_name)));
        Some(index)
    }
}

fn strip_terminator(line: &str) -> &str {
    line.trim_end_matches(['\n', '\r'])
}

// The marker may be the last line without a newline; the inserted reference
// still needs one to keep the marker on its own line.
fn line_terminator(line: &str) -> &'static str {
    if line.ends_with("\r\n") {
        "\r\n"
    } else {
        "\n"
    }
}

#[cfg(test)]
mod tests {
    use super::{MasterDocument, Reference};
    use crate::config::ProjectLayout;

    #[test]
    fn skeleton_matches_expected_layout() {
        let skeleton = MasterDocument::skeleton("research", &ProjectLayout::default());
        let expected = "% research master file\n\
                        \n\
                        \\documentclass{article}\n\
                        \\input{../preamble.tex}\n\
                        \n\
                        \\title{research}\n\
                        \\date{}\n\
                        \n\
                        \\begin{document}\n\
                        \\maketitle\n\
                        \\tableofcontents\n\
                        \\newpage\n\
                        %BEGIN NOTES\n\
                        \n\
                        %END NOTES\n\
                        \\end{document}";
        assert_eq!(skeleton, expected);
    }

    #[test]
    fn parse_then_render_preserves_bytes() {
        let content = "a\r\nb\n\nc";
        assert_eq!(MasterDocument::parse(content).render(), content);
    }

    #[test]
    fn insert_places_reference_right_above_end_marker() {
        let layout = ProjectLayout::default();
        let mut doc = MasterDocument::parse(&MasterDocument::skeleton("x", &layout));
        let before = doc.end_marker_index(&layout).unwrap();

        let inserted = doc.insert_reference("entry-20240305.tex", &layout).unwrap();
        assert_eq!(inserted, before);
        assert_eq!(doc.end_marker_index(&layout), Some(before + 1));

        let rendered = doc.render();
        assert!(rendered.contains("\\input{entry-20240305.tex}\n%END NOTES\n"));
    }

    #[test]
    fn insert_without_marker_leaves_document_untouched() {
        let layout = ProjectLayout::default();
        let mut doc = MasterDocument::parse("\\begin{document}\n%END NOTE\n");
        assert_eq!(doc.insert_reference("entry-20240305.tex", &layout), None);
        assert_eq!(doc.render(), "\\begin{document}\n%END NOTE\n");
    }

    #[test]
    fn marker_on_last_line_without_newline_is_found() {
        let layout = ProjectLayout::default();
        let mut doc = MasterDocument::parse("%BEGIN NOTES\n%END NOTES");
        doc.insert_reference("entry-20240101.tex", &layout).unwrap();
        assert_eq!(
            doc.render(),
            "%BEGIN NOTES\n\\input{entry-20240101.tex}\n%END NOTES"
        );
    }

    #[test]
    fn references_are_limited_to_notes_region_and_ordered() {
        let layout = ProjectLayout::default();
        let mut doc = MasterDocument::parse(&MasterDocument::skeleton("x", &layout));
        doc.insert_reference("entry-20240305.tex", &layout).unwrap();
        doc.insert_reference("entry-20240306.tex", &layout).unwrap();

        let references = doc.references(&layout);
        assert_eq!(
            references,
            vec![
                Reference {
                    file_name: "entry-20240305.tex".to_string(),
                    line_number: 15,
                },
                Reference {
                    file_name: "entry-20240306.tex".to_string(),
                    line_number: 16,
                },
            ]
        );
        assert!(!doc.has_reference("../preamble.tex", &layout));
        assert!(doc.has_reference("entry-20240306.tex", &layout));
    }
}
