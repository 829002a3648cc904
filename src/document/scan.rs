//! Source scanning for the metadata the event parser does not report.
//!
//! The yaml-rust2 event stream carries scalar styles and tags, but drops
//! comments, reports anchors by numeric id only and does not say whether a
//! collection was written in flow style. `SourceMap` recovers those from the
//! raw text with a quote-aware line scan, and the decoder claims entries as
//! it builds nodes.

use std::collections::{BTreeMap, HashMap, VecDeque};

/// Comments, anchor names and line offsets of one YAML source text.
#[derive(Debug, Default)]
pub(crate) struct SourceMap {
    chars: Vec<char>,
    /// Char index of the first character of every line
    line_starts: Vec<usize>,
    /// Lines consisting only of a comment, keyed by 0-based line
    full_line: BTreeMap<usize, String>,
    /// Comments trailing content on the same line
    trailing: HashMap<usize, String>,
    /// Anchor declarations in source order
    anchors: VecDeque<(usize, String)>,
}

impl SourceMap {
    pub(crate) fn new(source: &str) -> Self {
        let chars: Vec<char> = source.chars().collect();
        let mut map = SourceMap {
            line_starts: vec![0],
            ..SourceMap::default()
        };
        for (index, ch) in chars.iter().enumerate() {
            if *ch == '\n' {
                map.line_starts.push(index + 1);
            }
        }
        for (line_no, line) in source.split('\n').enumerate() {
            map.scan_line(line_no, line.trim_end_matches('\r'));
        }
        map.chars = chars;
        map
    }

    fn scan_line(&mut self, line_no: usize, line: &str) {
        let mut in_single = false;
        let mut in_double = false;
        let mut escaped = false;
        let mut prev: Option<char> = None;
        let mut iter = line.char_indices().peekable();

        while let Some((offset, ch)) = iter.next() {
            if in_double {
                if escaped {
                    escaped = false;
                } else if ch == '\\' {
                    escaped = true;
                } else if ch == '"' {
                    in_double = false;
                }
            } else if in_single {
                if ch == '\'' {
                    if iter.peek().map(|(_, next)| *next) == Some('\'') {
                        iter.next();
                    } else {
                        in_single = false;
                    }
                }
            } else {
                let at_token_start = prev.map_or(true, is_token_boundary);
                match ch {
                    '#' if prev.map_or(true, char::is_whitespace) => {
                        let comment = line[offset..].trim_end().to_string();
                        if line[..offset].trim().is_empty() {
                            self.full_line.insert(line_no, comment);
                        } else {
                            self.trailing.insert(line_no, comment);
                        }
                        return;
                    }
                    '"' if at_token_start => in_double = true,
                    '\'' if at_token_start => in_single = true,
                    '&' if at_token_start => {
                        let name: String = line[offset + 1..]
                            .chars()
                            .take_while(|c| !c.is_whitespace() && !",[]{}".contains(*c))
                            .collect();
                        if !name.is_empty() {
                            self.anchors.push_back((line_no, name));
                        }
                    }
                    _ => {}
                }
            }
            prev = Some(ch);
        }
    }

    /// 0-based line of a char index.
    pub(crate) fn line_of(&self, char_index: usize) -> usize {
        self.line_starts
            .partition_point(|start| *start <= char_index)
            .saturating_sub(1)
    }

    pub(crate) fn char_at(&self, char_index: usize) -> Option<char> {
        self.chars.get(char_index).copied()
    }

    /// Takes the trailing comment of a line, if any is left.
    pub(crate) fn claim_line_comment(&mut self, line: usize) -> Option<String> {
        self.trailing.remove(&line)
    }

    /// Takes the block of comment-only lines directly above `line`.
    pub(crate) fn claim_head_comment(&mut self, line: usize) -> Option<String> {
        let mut first = line;
        while first > 0 && self.full_line.contains_key(&(first - 1)) {
            first -= 1;
        }
        join_lines((first..line).filter_map(|l| self.full_line.remove(&l)))
    }

    /// Takes every comment-only line in `from..to`.
    pub(crate) fn claim_comments_between(&mut self, from: usize, to: usize) -> Option<String> {
        if from >= to {
            return None;
        }
        let lines: Vec<usize> = self.full_line.range(from..to).map(|(l, _)| *l).collect();
        join_lines(lines.into_iter().filter_map(|l| self.full_line.remove(&l)))
    }

    /// Takes the next anchor name in source order.
    pub(crate) fn next_anchor(&mut self) -> Option<String> {
        self.anchors.pop_front().map(|(_, name)| name)
    }

    /// Forgets everything found on `first..=last`, used for the body of
    /// block scalars where `#` and `&` are plain text.
    pub(crate) fn mask_lines(&mut self, first: usize, last: usize) {
        if first > last {
            return;
        }
        let masked: Vec<usize> = self.full_line.range(first..=last).map(|(l, _)| *l).collect();
        for line in masked {
            self.full_line.remove(&line);
        }
        self.trailing.retain(|line, _| *line < first || *line > last);
        self.anchors
            .retain(|(line, _)| *line < first || *line > last);
    }
}

fn is_token_boundary(ch: char) -> bool {
    ch.is_whitespace() || matches!(ch, '[' | '{' | ',' | ':' | '-' | '?')
}

fn join_lines(lines: impl Iterator<Item = String>) -> Option<String> {
    let lines: Vec<String> = lines.collect();
    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finds_full_line_and_trailing_comments() {
        let mut map = SourceMap::new("# head\na: 1 # trailing\n");
        assert_eq!(map.claim_line_comment(1), Some("# trailing".to_string()));
        assert_eq!(map.claim_head_comment(1), Some("# head".to_string()));
        // claimed entries are gone
        assert_eq!(map.claim_head_comment(1), None);
    }

    #[test]
    fn test_hash_inside_quotes_is_not_a_comment() {
        let mut map = SourceMap::new("a: \"x # y\"\nb: 'it''s # not'\nc: x#y\n");
        assert_eq!(map.claim_line_comment(0), None);
        assert_eq!(map.claim_line_comment(1), None);
        assert_eq!(map.claim_line_comment(2), None);
    }

    #[test]
    fn test_head_comment_stops_at_blank_line() {
        let mut map = SourceMap::new("# far\n\n# near1\n# near2\nkey: v\n");
        assert_eq!(
            map.claim_head_comment(4),
            Some("# near1\n# near2".to_string())
        );
    }

    #[test]
    fn test_anchor_names_in_order() {
        let mut map = SourceMap::new("a: &first 1\nb: [&second 2]\nc: x&y\n");
        assert_eq!(map.next_anchor(), Some("first".to_string()));
        assert_eq!(map.next_anchor(), Some("second".to_string()));
        assert_eq!(map.next_anchor(), None);
    }

    #[test]
    fn test_mask_lines_drops_block_body() {
        let mut map = SourceMap::new("s: |\n  # text\n  &notanchor\nb: 1\n");
        map.mask_lines(1, 2);
        assert_eq!(map.claim_head_comment(3), None);
        assert_eq!(map.next_anchor(), None);
    }

    #[test]
    fn test_line_of_char_index() {
        let map = SourceMap::new("ab\ncd\n\nef");
        assert_eq!(map.line_of(0), 0);
        assert_eq!(map.line_of(2), 0);
        assert_eq!(map.line_of(3), 1);
        assert_eq!(map.line_of(6), 2);
        assert_eq!(map.line_of(7), 3);
        assert_eq!(map.char_at(3), Some('c'));
    }
}
