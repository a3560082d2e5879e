//! Tab-stop resolver.
//!
//! The engine marks caret targets in its output with placeholder markers:
//! `$1`, `${1}` or `${1:default text}` (placeholders may nest). `extract`
//! strips the markers, keeping any default text, and reports where each one
//! ended up in the literal result.
//!
//! A backslash makes the next character literal. What that character turns
//! into is up to the caller's escape transform, since it depends on what
//! the receiving editor treats as special.

/// Escape transform applied to every backslash-escaped character.
pub type EscapeFn = dyn Fn(char) -> String;

/// Escape transform that emits the escaped character as-is
pub fn literal_escape(ch: char) -> String {
    ch.to_string()
}

/// A placeholder's location in the literal text (char offsets).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabStop {
    pub start: usize,
    pub end: usize,
    /// Placeholder number as written by the engine
    pub group: u32,
}

/// Marker-free text plus the tab stops found in it, in encounter order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TabStopData {
    pub text: String,
    pub tabstops: Vec<TabStop>,
}

impl TabStopData {
    /// The default caret target, if any marker was found
    pub fn first(&self) -> Option<&TabStop> {
        self.tabstops.first()
    }
}

/// Strip placeholder markers from `text` and record their ranges.
///
/// Runs in two linear passes: the first pairs every `${N:` opener with its
/// closing brace, the second emits text. An opener without a closing brace
/// is copied through as literal text.
pub fn extract(text: &str, escape: &EscapeFn) -> TabStopData {
    let chars: Vec<char> = text.chars().collect();
    let paired = pair_braces(&chars);

    let mut out = String::with_capacity(text.len());
    let mut out_len = 0;
    let mut tabstops = Vec::new();
    // Indices into `tabstops` of the placeholders still open
    let mut open: Vec<usize> = Vec::new();

    let mut pos = 0;
    while let Some(&c) = chars.get(pos) {
        match c {
            '\\' if pos + 1 < chars.len() => {
                let escaped = escape(chars[pos + 1]);
                out_len += escaped.chars().count();
                out.push_str(&escaped);
                pos += 2;
                continue;
            }
            '$' => match marker_at(&chars, pos) {
                Some(Marker::Stop { group, next }) => {
                    tabstops.push(TabStop {
                        start: out_len,
                        end: out_len,
                        group,
                    });
                    pos = next;
                    continue;
                }
                Some(Marker::Open { group, body }) if paired[pos] => {
                    open.push(tabstops.len());
                    tabstops.push(TabStop {
                        start: out_len,
                        end: out_len,
                        group,
                    });
                    pos = body;
                    continue;
                }
                _ => {}
            },
            '}' if paired[pos] => {
                if let Some(idx) = open.pop() {
                    tabstops[idx].end = out_len;
                }
                pos += 1;
                continue;
            }
            _ => {}
        }
        out.push(c);
        out_len += 1;
        pos += 1;
    }

    TabStopData { text: out, tabstops }
}

enum Marker {
    /// `$N` or `${N}`; `next` is the index after the marker
    Stop { group: u32, next: usize },
    /// `${N:`; `body` is the index of the default text
    Open { group: u32, body: usize },
}

fn digits_at(chars: &[char], from: usize) -> Option<(u32, usize)> {
    let end = chars[from..]
        .iter()
        .position(|c| !c.is_ascii_digit())
        .map(|n| from + n)
        .unwrap_or(chars.len());
    if end == from {
        return None;
    }
    let group = chars[from..end].iter().collect::<String>().parse().ok()?;
    Some((group, end))
}

/// Classify the marker starting at `at` (which holds `$`), if any.
fn marker_at(chars: &[char], at: usize) -> Option<Marker> {
    match chars.get(at + 1)? {
        c if c.is_ascii_digit() => {
            let (group, next) = digits_at(chars, at + 1)?;
            Some(Marker::Stop { group, next })
        }
        '{' => {
            let (group, end) = digits_at(chars, at + 2)?;
            match chars.get(end)? {
                '}' => Some(Marker::Stop {
                    group,
                    next: end + 1,
                }),
                ':' => Some(Marker::Open {
                    group,
                    body: end + 1,
                }),
                _ => None,
            }
        }
        _ => None,
    }
}

/// Mark every `${N:` opener and `}` that close each other. The innermost
/// open placeholder takes the nearest closing brace; openers still open at
/// the end of input stay unmarked.
fn pair_braces(chars: &[char]) -> Vec<bool> {
    let mut paired = vec![false; chars.len()];
    let mut open: Vec<usize> = Vec::new();

    let mut pos = 0;
    while let Some(&c) = chars.get(pos) {
        match c {
            '\\' if pos + 1 < chars.len() => {
                pos += 2;
                continue;
            }
            '$' => match marker_at(chars, pos) {
                Some(Marker::Stop { next, .. }) => {
                    pos = next;
                    continue;
                }
                Some(Marker::Open { body, .. }) => {
                    open.push(pos);
                    pos = body;
                    continue;
                }
                None => {}
            },
            '}' => {
                if let Some(opener) = open.pop() {
                    paired[opener] = true;
                    paired[pos] = true;
                }
            }
            _ => {}
        }
        pos += 1;
    }
    paired
}
