// Preview module: syntax-highlighted file content and directory trees

use crate::domain::Item;
use crate::tree::{DirTree, TreeEntryKind, TreeLine};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use std::sync::OnceLock;
use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

/// Files larger than this are cut and followed by [`TRUNCATION_NOTICE`]
pub const MAX_PREVIEW_BYTES: usize = 100 * 1024;
pub const TRUNCATION_NOTICE: &str = "--- truncated (>100KB) ---";
/// Directories holding this file are previewed through it
pub const SKILL_FILE: &str = "SKILL.md";

const THEME_NAME: &str = "base16-ocean.dark";

const HEADING_COLOR: Color = Color::Cyan;
const MUTED_COLOR: Color = Color::DarkGray;
const ERROR_COLOR: Color = Color::Red;

/// Rendered preview for one item
#[derive(Debug, Clone)]
pub struct Preview {
    pub lines: Vec<Line<'static>>,
}

impl Preview {
    fn message(text: &str, color: Color) -> Self {
        Self {
            lines: vec![Line::from(Span::styled(
                text.to_string(),
                Style::default().fg(color),
            ))],
        }
    }

    /// Placeholder when nothing is selected
    pub fn empty() -> Self {
        Self::message("No item selected", MUTED_COLOR)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

fn syntax_set() -> &'static SyntaxSet {
    static SYNTAX_SET: OnceLock<SyntaxSet> = OnceLock::new();
    SYNTAX_SET.get_or_init(SyntaxSet::load_defaults_newlines)
}

fn theme() -> &'static Theme {
    static THEME: OnceLock<Theme> = OnceLock::new();
    THEME.get_or_init(|| {
        let mut themes = ThemeSet::load_defaults();
        themes
            .themes
            .remove(THEME_NAME)
            .unwrap_or_default()
    })
}

fn syntax_for_path(path: &Path) -> &'static SyntaxReference {
    let set = syntax_set();
    path.extension()
        .and_then(|e| e.to_str())
        .and_then(|ext| set.find_syntax_by_extension(ext))
        .unwrap_or_else(|| set.find_syntax_plain_text())
}

/// Reads at most [`MAX_PREVIEW_BYTES`] of a file. Returns the text and whether
/// it was truncated. Invalid UTF-8 is replaced rather than rejected.
pub fn read_truncated(path: &Path) -> io::Result<(String, bool)> {
    let mut data = Vec::new();
    // One byte past the limit tells whether anything was cut
    File::open(path)?
        .take(MAX_PREVIEW_BYTES as u64 + 1)
        .read_to_end(&mut data)?;
    let truncated = data.len() > MAX_PREVIEW_BYTES;
    data.truncate(MAX_PREVIEW_BYTES);
    Ok((String::from_utf8_lossy(&data).into_owned(), truncated))
}

/// Highlights `content` into styled lines using `syntax`
pub fn highlight(content: &str, syntax: &SyntaxReference) -> Vec<Line<'static>> {
    let mut highlighter = HighlightLines::new(syntax, theme());
    let mut lines = Vec::new();

    for line in LinesWithEndings::from(content) {
        let spans = match highlighter.highlight_line(line, syntax_set()) {
            Ok(ranges) => ranges
                .into_iter()
                .map(|(style, text)| {
                    let fg = style.foreground;
                    Span::styled(
                        text.trim_end_matches(['\n', '\r']).to_string(),
                        Style::default().fg(Color::Rgb(fg.r, fg.g, fg.b)),
                    )
                })
                .collect(),
            // Fall back to plain text for the line
            Err(_) => vec![Span::raw(line.trim_end_matches(['\n', '\r']).to_string())],
        };
        lines.push(Line::from(spans));
    }

    lines
}

fn heading(title: String, note: Option<&str>) -> Line<'static> {
    let mut spans = vec![Span::styled(
        title,
        Style::default()
            .fg(HEADING_COLOR)
            .add_modifier(Modifier::BOLD),
    )];
    if let Some(note) = note {
        spans.push(Span::styled(
            format!(" ({})", note),
            Style::default().fg(MUTED_COLOR),
        ));
    }
    Line::from(spans)
}

fn highlighted_file(path: &Path, syntax: &SyntaxReference) -> io::Result<Vec<Line<'static>>> {
    let (content, truncated) = read_truncated(path)?;
    let mut lines = highlight(&content, syntax);
    if truncated {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            TRUNCATION_NOTICE,
            Style::default().fg(MUTED_COLOR),
        )));
    }
    Ok(lines)
}

/// Generates a syntax-highlighted preview for a file item
pub fn generate_file_preview(item: &Item) -> io::Result<Preview> {
    let body = highlighted_file(&item.global_path, syntax_for_path(&item.global_path))?;
    let mut lines = vec![heading(item.name.clone(), None), Line::from("")];
    lines.extend(body);
    Ok(Preview { lines })
}

/// Converts collected tree rows into styled lines
pub fn tree_lines(rows: &[TreeLine]) -> Vec<Line<'static>> {
    rows.iter()
        .map(|row| {
            let name_style = match row.kind {
                TreeEntryKind::Directory => Style::default().fg(HEADING_COLOR),
                TreeEntryKind::Truncated => Style::default().fg(MUTED_COLOR),
                TreeEntryKind::File => Style::default(),
            };
            let name = match row.kind {
                TreeEntryKind::Directory => format!("{}/", row.name),
                _ => row.name.clone(),
            };
            Line::from(vec![
                Span::raw(row.prefix.clone()),
                Span::styled(name, name_style),
            ])
        })
        .collect()
}

/// Generates a directory preview: its `SKILL.md` when present, else a tree
pub fn generate_directory_preview(item: &Item) -> io::Result<Preview> {
    let title = format!("{}/", item.name);
    let skill = item.global_path.join(SKILL_FILE);

    if skill.is_file() {
        let markdown = syntax_set()
            .find_syntax_by_extension("md")
            .unwrap_or_else(|| syntax_set().find_syntax_plain_text());
        let mut lines = vec![heading(title, Some(SKILL_FILE)), Line::from("")];
        lines.extend(highlighted_file(&skill, markdown)?);
        return Ok(Preview { lines });
    }

    let mut lines = vec![heading(title, None), Line::from("")];
    lines.extend(tree_lines(&DirTree::new(&item.global_path).lines()));
    Ok(Preview { lines })
}

/// Generates a preview for an item. Read errors become an error message.
pub fn generate_preview(item: &Item) -> Preview {
    let result = if item.is_directory {
        generate_directory_preview(item)
    } else {
        generate_file_preview(item)
    };
    result.unwrap_or_else(|e| {
        let mut preview = Preview::message(&format!("Error reading {}: {}", item.name, e), ERROR_COLOR);
        preview
            .lines
            .push(Line::from(format!("Path: {}", item.global_path.display())));
        preview
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Category;
    use std::fs;
    use tempfile::TempDir;

    fn text_of(preview: &Preview) -> Vec<String> {
        preview
            .lines
            .iter()
            .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    fn category(temp: &TempDir) -> Category {
        let category = Category::new("skills", temp.path(), &temp.path().join("project"));
        fs::create_dir_all(&category.global_dir).unwrap();
        category
    }

    #[test]
    fn test_syntax_for_path_by_extension() {
        assert_eq!(syntax_for_path(Path::new("main.rs")).name, "Rust");
        assert_eq!(syntax_for_path(Path::new("agent.md")).name, "Markdown");
    }

    #[test]
    fn test_syntax_for_path_falls_back_to_plain_text() {
        assert_eq!(syntax_for_path(Path::new("data.xyz123")).name, "Plain Text");
        assert_eq!(syntax_for_path(Path::new("Makefile-ish")).name, "Plain Text");
    }

    #[test]
    fn test_read_truncated_small_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("small.txt");
        fs::write(&path, "hello").unwrap();

        let (content, truncated) = read_truncated(&path).unwrap();
        assert_eq!(content, "hello");
        assert!(!truncated);
    }

    #[test]
    fn test_read_truncated_large_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("big.txt");
        fs::write(&path, vec![b'a'; MAX_PREVIEW_BYTES + 10]).unwrap();

        let (content, truncated) = read_truncated(&path).unwrap();
        assert_eq!(content.len(), MAX_PREVIEW_BYTES);
        assert!(truncated);
    }

    #[test]
    fn test_read_truncated_exact_limit_is_complete() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("exact.txt");
        fs::write(&path, vec![b'a'; MAX_PREVIEW_BYTES]).unwrap();

        let (content, truncated) = read_truncated(&path).unwrap();
        assert_eq!(content.len(), MAX_PREVIEW_BYTES);
        assert!(!truncated);
    }

    #[test]
    fn test_file_preview_keeps_text() {
        let temp = TempDir::new().unwrap();
        let category = category(&temp);
        let code = "fn main() {\n    println!(\"hi\");\n}\n";
        fs::write(category.global_dir.join("main.rs"), code).unwrap();
        let item = Item::new("main.rs", false, &category);

        let text = text_of(&generate_preview(&item));
        assert_eq!(text[0], "main.rs");
        assert_eq!(text[2], "fn main() {");
        assert_eq!(text[3], "    println!(\"hi\");");
        assert_eq!(text.len(), 5);
    }

    #[test]
    fn test_large_file_preview_ends_with_notice() {
        let temp = TempDir::new().unwrap();
        let category = category(&temp);
        let line = "0123456789\n".repeat(MAX_PREVIEW_BYTES / 10);
        fs::write(category.global_dir.join("big.txt"), line).unwrap();
        let item = Item::new("big.txt", false, &category);

        let text = text_of(&generate_preview(&item));
        assert_eq!(text.last().map(String::as_str), Some(TRUNCATION_NOTICE));
    }

    #[test]
    fn test_directory_with_skill_file_previews_it() {
        let temp = TempDir::new().unwrap();
        let category = category(&temp);
        let dir = category.global_dir.join("review");
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join(SKILL_FILE), "# Review\n").unwrap();
        let item = Item::new("review", true, &category);

        let text = text_of(&generate_preview(&item));
        assert_eq!(text[0], "review/ (SKILL.md)");
        assert_eq!(text[2], "# Review");
    }

    #[test]
    fn test_directory_without_skill_file_shows_tree() {
        let temp = TempDir::new().unwrap();
        let category = category(&temp);
        let dir = category.global_dir.join("bundle");
        fs::create_dir_all(dir.join("scripts")).unwrap();
        fs::write(dir.join("README.md"), "").unwrap();
        let item = Item::new("bundle", true, &category);

        let text = text_of(&generate_preview(&item));
        assert_eq!(text[0], "bundle/");
        assert_eq!(text[2], "├── README.md");
        assert_eq!(text[3], "└── scripts/");
    }

    #[test]
    fn test_missing_file_shows_error() {
        let temp = TempDir::new().unwrap();
        let category = category(&temp);
        let item = Item::new("gone.md", false, &category);

        let text = text_of(&generate_preview(&item));
        assert!(text[0].starts_with("Error reading gone.md"));
    }

    #[test]
    fn test_empty_preview() {
        let preview = Preview::empty();
        assert_eq!(text_of(&preview), vec!["No item selected".to_string()]);
        assert_eq!(preview.len(), 1);
    }
}
