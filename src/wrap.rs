//! Greedy line breaking.
//!
//! Text is split into alternating runs of words and whitespace. Runs are added
//! to a line while the line's measure stays within the limit. Whitespace at a
//! break is dropped, except leading whitespace on the first line. A word longer
//! than the limit is split across lines between character clusters. Every
//! whitespace character counts as a single space.

use std::collections::VecDeque;

use unicode_normalization::char::is_combining_mark;

const VIRAMA: char = '\u{094D}';
const ZERO_WIDTH_JOINER: char = '\u{200D}';
const ZERO_WIDTH_NON_JOINER: char = '\u{200C}';

/// Wraps `text` so that no line has more than `max_chars` characters.
pub fn wrap_chars(text: &str, max_chars: usize) -> Vec<String> {
    wrap_with(text, max_chars, |line| line.chars().count())
}

/// Wraps `text` so that `measure(line) <= max_width` for every line, splitting
/// single words only when they cannot fit on a line of their own.
pub fn wrap_measured<M>(text: &str, max_width: usize, measure: M) -> Vec<String>
where
    M: Fn(&str) -> usize,
{
    wrap_with(text, max_width, measure)
}

fn is_space_run(chunk: &str) -> bool {
    chunk.starts_with(' ')
}

fn split_chunks(text: &str) -> VecDeque<String> {
    let mut chunks = VecDeque::new();
    let mut current = String::new();
    let mut current_is_space = false;

    for ch in text.chars() {
        let is_space = ch.is_whitespace();
        if !current.is_empty() && is_space != current_is_space {
            chunks.push_back(std::mem::take(&mut current));
        }
        current_is_space = is_space;
        current.push(if is_space { ' ' } else { ch });
    }

    if !current.is_empty() {
        chunks.push_back(current);
    }
    chunks
}

/// Whether a cluster may end between `previous` and `next`.
///
/// Marks and joiners attach to what precedes them, and a consonant following a
/// virama or joiner belongs to the same conjunct.
fn is_cluster_break(previous: char, next: char) -> bool {
    if is_combining_mark(next) || next == ZERO_WIDTH_JOINER || next == ZERO_WIDTH_NON_JOINER {
        return false;
    }
    previous != VIRAMA && previous != ZERO_WIDTH_JOINER
}

/// Byte offsets just past each character cluster of `chunk`.
fn cluster_ends(chunk: &str) -> Vec<usize> {
    let mut ends = Vec::new();
    let mut chars = chunk.char_indices().peekable();
    while let Some((offset, ch)) = chars.next() {
        let end = offset + ch.len_utf8();
        match chars.peek() {
            Some(&(_, next)) if !is_cluster_break(ch, next) => {}
            _ => ends.push(end),
        }
    }
    ends
}

/// Longest cluster-boundary prefix of `chunk` that keeps `line + prefix` within `limit`.
fn fitting_prefix<M>(line: &str, chunk: &str, limit: usize, measure: &M) -> usize
where
    M: Fn(&str) -> usize,
{
    let mut fitted = 0;
    for end in cluster_ends(chunk) {
        let candidate = format!("{line}{}", &chunk[..end]);
        if measure(&candidate) > limit {
            break;
        }
        fitted = end;
    }
    fitted
}

fn wrap_with<M>(text: &str, limit: usize, measure: M) -> Vec<String>
where
    M: Fn(&str) -> usize,
{
    let mut chunks = split_chunks(text);
    let mut lines = Vec::new();

    while !chunks.is_empty() {
        let mut line = String::new();
        let mut trailing_space = 0;

        if !lines.is_empty() && chunks.front().is_some_and(|chunk| is_space_run(chunk)) {
            chunks.pop_front();
        }

        while let Some(chunk) = chunks.front() {
            let candidate = format!("{line}{chunk}");
            if measure(&candidate) > limit {
                break;
            }
            trailing_space = if is_space_run(chunk) { chunk.len() } else { 0 };
            line = candidate;
            chunks.pop_front();
        }

        if let Some(chunk) = chunks.front_mut() {
            if measure(chunk.as_str()) > limit {
                let mut split_at = fitting_prefix(&line, chunk, limit, &measure);
                if split_at == 0 && line.is_empty() {
                    split_at = cluster_ends(chunk).first().copied().unwrap_or(chunk.len());
                }
                if split_at > 0 {
                    let rest = chunk.split_off(split_at);
                    trailing_space = if is_space_run(chunk) { chunk.len() } else { 0 };
                    line.push_str(chunk);
                    *chunk = rest;
                    if chunk.is_empty() {
                        chunks.pop_front();
                    }
                }
            }
        }

        line.truncate(line.len() - trailing_space);
        if !line.is_empty() {
            lines.push(line);
        }
    }

    lines
}
