//! Recovers line/column positions for structural paths by re-scanning the raw text.
//!
//! The parser keeps no source spans, so positions are re-derived here with a
//! line-oriented heuristic instead of a real indentation-aware parse:
//!
//! * a line is a key line when it holds a mapping key made of letters, digits, `_`
//!   or `-` (optionally quoted, optionally after a `- ` item marker);
//! * a line is a sequence item line when it starts with `- ` (or is a bare `-`);
//! * path segments are matched in order, one per line, and each match opens a scope
//!   that ends at the next line indented at or left of the matched node;
//! * an index segment only counts items of the sequence directly under the scope, so
//!   lists nested inside earlier entries do not shift the count.
//!
//! Known limits: a key matches at any depth inside the current scope, so when the
//! same key appears under an earlier sibling parent, the first occurrence in document
//! order wins. Keys outside the identifier set (for example `/users/{id}`) are never
//! located; callers fall back to a default position. Flow collections and
//! multi-line plain scalars are not understood.

use regex::Regex;
use std::sync::OnceLock;
use xlint_core::{PathSegment, SourcePosition, StructuralPath};

const KEY_PATTERN: &str =
    r#"^(?:"([A-Za-z0-9_-]+)"|'([A-Za-z0-9_-]+)'|([A-Za-z0-9_-]+))[ \t]*:(?:[ \t]+(.*))?$"#;

pub fn locate(text: &str, path: &StructuralPath) -> Option<SourcePosition> {
    LineIndex::new(text).locate(path)
}

/// Pre-scanned view of a document's lines, reusable across many lookups.
#[derive(Debug, Clone)]
pub struct LineIndex {
    lines: Vec<ScannedLine>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ScannedLine {
    number: usize,
    indent: usize,
    item: bool,
    key: Option<ScannedKey>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ScannedKey {
    name: String,
    column: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScopeKind {
    Key,
    Item,
}

#[derive(Debug, Clone, Copy)]
struct Scope {
    indent: usize,
    kind: ScopeKind,
}

#[derive(Debug, Clone, Copy)]
struct SequenceCounter {
    indent: usize,
    index: isize,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut lines = Vec::new();
        let mut block_parent: Option<usize> = None;

        for (line_index, raw_line) in text.lines().enumerate() {
            if raw_line.trim().is_empty() {
                continue;
            }
            let indent = count_leading_spaces(raw_line);
            if let Some(parent) = block_parent {
                if indent > parent {
                    continue;
                }
                block_parent = None;
            }

            let line = strip_inline_comment(raw_line);
            let content = line[indent..].trim_end();
            if content.is_empty() || content == "---" || content == "..." {
                continue;
            }

            let (item, key_offset) = match sequence_item_offset(content) {
                Some(offset) => (true, offset),
                None => (false, 0),
            };
            let key = parse_key(&content[key_offset..]).map(|(name, value)| {
                let column = indent + key_offset;
                if is_block_scalar_indicator(value) {
                    block_parent = Some(column);
                }
                ScannedKey { name, column }
            });

            lines.push(ScannedLine {
                number: line_index + 1,
                indent,
                item,
                key,
            });
        }

        Self { lines }
    }

    /// Position of the last path segment: the key's first character, or the first
    /// character after the `- ` marker for an index.
    pub fn locate(&self, path: &StructuralPath) -> Option<SourcePosition> {
        let segments = path.segments();
        if segments.is_empty() {
            return None;
        }

        let mut depth = 0;
        let mut scope: Option<Scope> = None;
        let mut counters = Vec::<SequenceCounter>::new();
        // Indentation of the sequence directly under the current scope, fixed by the
        // first item line seen after the scope opens.
        let mut sequence_indent: Option<usize> = None;

        for line in &self.lines {
            if let Some(scope) = scope {
                if leaves_scope(scope, line) {
                    return None;
                }
            }

            if line.indent == 0 && !line.item {
                counters.clear();
            }
            let item_index = if line.item {
                counters.retain(|counter| counter.indent <= line.indent);
                Some(advance_counter(&mut counters, line.indent))
            } else {
                counters.retain(|counter| counter.indent < line.indent);
                None
            };

            if let (Some(index), PathSegment::Index(wanted)) = (item_index, &segments[depth]) {
                let direct_indent = *sequence_indent.get_or_insert(line.indent);
                if line.indent == direct_indent && usize::try_from(index).ok() == Some(*wanted) {
                    depth += 1;
                    if depth == segments.len() {
                        return Some(SourcePosition::new(line.number, line.indent + 3));
                    }
                    scope = Some(Scope {
                        indent: line.indent,
                        kind: ScopeKind::Item,
                    });
                    sequence_indent = None;
                }
            }

            if let (Some(key), PathSegment::Key(wanted)) = (&line.key, &segments[depth]) {
                if key.name == *wanted {
                    depth += 1;
                    if depth == segments.len() {
                        return Some(SourcePosition::new(line.number, key.column + 1));
                    }
                    scope = Some(Scope {
                        indent: key.column,
                        kind: ScopeKind::Key,
                    });
                    sequence_indent = None;
                }
            }
        }

        None
    }
}

fn leaves_scope(scope: Scope, line: &ScannedLine) -> bool {
    if line.indent < scope.indent {
        return true;
    }
    if line.indent > scope.indent {
        return false;
    }
    // `key:` followed by `- item` at the same indentation is still the key's value.
    !(scope.kind == ScopeKind::Key && line.item)
}

fn advance_counter(counters: &mut Vec<SequenceCounter>, indent: usize) -> isize {
    if let Some(counter) = counters.iter_mut().find(|counter| counter.indent == indent) {
        counter.index += 1;
        return counter.index;
    }
    counters.push(SequenceCounter { indent, index: 0 });
    0
}

fn sequence_item_offset(content: &str) -> Option<usize> {
    if content == "-" {
        return Some(content.len());
    }
    let rest = content.strip_prefix("- ")?;
    Some(content.len() - rest.trim_start().len())
}

fn parse_key(text: &str) -> Option<(String, &str)> {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let pattern = PATTERN.get_or_init(|| Regex::new(KEY_PATTERN).expect("valid regex"));

    let captures = pattern.captures(text)?;
    let name = captures
        .get(1)
        .or_else(|| captures.get(2))
        .or_else(|| captures.get(3))?
        .as_str()
        .to_string();
    let value = captures.get(4).map_or("", |value| value.as_str());
    Some((name, value))
}

fn is_block_scalar_indicator(value: &str) -> bool {
    let mut chars = value.trim().chars();
    matches!(chars.next(), Some('|') | Some('>'))
        && chars.all(|character| matches!(character, '+' | '-') || character.is_ascii_digit())
}

fn strip_inline_comment(line: &str) -> &str {
    let mut in_single = false;
    let mut in_double = false;
    let mut previous_is_space = true;
    for (index, character) in line.char_indices() {
        match character {
            '\'' if !in_double => in_single = !in_single,
            '"' if !in_single => in_double = !in_double,
            '#' if !in_single && !in_double && previous_is_space => return &line[..index],
            _ => {}
        }
        previous_is_space = character == ' ' || character == '\t';
    }
    line
}

fn count_leading_spaces(line: &str) -> usize {
    line.chars().take_while(|character| *character == ' ').count()
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
