//! Code span detection, so extractors can ignore text inside code.

use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

// Inline code: ``double`` (may contain single backticks) or `single`.
static INLINE_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"``(?:[^`]|`[^`])*``|`[^`\n]+`").unwrap());

/// Byte ranges and line ranges covered by code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeSpans {
    /// Byte ranges of fenced blocks and inline code.
    ranges: Vec<Range<usize>>,
    /// 1-based inclusive line ranges of fenced blocks.
    fenced_lines: Vec<(usize, usize)>,
}

impl CodeSpans {
    /// Whether a byte offset falls inside any code.
    pub fn contains_offset(&self, offset: usize) -> bool {
        self.ranges.iter().any(|r| r.contains(&offset))
    }

    /// Whether a 1-based line lies inside a fenced block (fences included).
    pub fn contains_line(&self, line: usize) -> bool {
        self.fenced_lines
            .iter()
            .any(|&(start, end)| line >= start && line <= end)
    }
}

fn fence_of(line: &str) -> Option<(char, usize)> {
    let trimmed = line.trim_start();
    let c = trimmed.chars().next()?;
    if c != '`' && c != '~' {
        return None;
    }
    let len = trimmed.chars().take_while(|&x| x == c).count();
    (len >= 3).then_some((c, len))
}

/// Find fenced code blocks and inline code spans.
///
/// A fence without a matching closing fence is not treated as code.
pub fn find_code_spans(text: &str) -> CodeSpans {
    let mut spans = CodeSpans::default();

    // (fence char, fence length, start byte, start line)
    let mut open: Option<(char, usize, usize, usize)> = None;
    let mut pending_after_unclosed: Option<usize> = None;
    let mut offset = 0;
    let lines: Vec<&str> = text.split_inclusive('\n').collect();
    let mut idx = 0;

    while idx < lines.len() {
        let line = lines[idx];
        let line_no = idx + 1;
        let content = line.trim_end_matches(['\n', '\r']);

        match open {
            None => {
                if let Some((c, len)) = fence_of(content) {
                    open = Some((c, len, offset, line_no));
                    pending_after_unclosed = Some(idx + 1);
                }
            }
            Some((c, len, start, start_line)) => {
                let trimmed = content.trim();
                if !trimmed.is_empty()
                    && trimmed.chars().all(|x| x == c)
                    && trimmed.chars().count() >= len
                {
                    spans.ranges.push(start..offset + content.len());
                    spans.fenced_lines.push((start_line, line_no));
                    open = None;
                    pending_after_unclosed = None;
                }
            }
        }

        offset += line.len();
        idx += 1;

        // Unclosed fence: rewind to just after the opener and keep scanning.
        if idx == lines.len() && open.is_some() {
            if let Some(resume) = pending_after_unclosed.take() {
                open = None;
                offset = lines[..resume].iter().map(|l| l.len()).sum();
                idx = resume;
            }
        }
    }

    for m in INLINE_CODE.find_iter(text) {
        let overlaps = spans
            .ranges
            .iter()
            .any(|r| m.start() < r.end && r.start < m.end());
        if !overlaps {
            spans.ranges.push(m.range());
        }
    }

    spans.ranges.sort_by_key(|r| r.start);
    spans
}
