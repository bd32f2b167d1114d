use std::fmt;

/// Shell-style wildcard pattern with `fnmatch` semantics.
///
/// * `*` matches any run of characters (underscores and slashes included)
/// * `?` matches exactly one character
/// * `[seq]` / `[!seq]` match one character in / not in `seq`; `a-z` ranges are allowed
///
/// Matching is case-sensitive. A `[` without a closing `]` is a literal bracket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobPattern {
    source: String,
    tokens: Vec<Token>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Literal(char),
    AnyChar,
    AnyRun,
    Class { negated: bool, items: Vec<ClassItem> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ClassItem {
    Char(char),
    Range(char, char),
}

impl Token {
    fn matches(&self, c: char) -> bool {
        match self {
            Token::Literal(l) => *l == c,
            Token::AnyChar => true,
            Token::AnyRun => false,
            Token::Class { negated, items } => {
                let hit = items.iter().any(|item| match item {
                    ClassItem::Char(x) => *x == c,
                    ClassItem::Range(lo, hi) => (*lo..=*hi).contains(&c),
                });
                hit != *negated
            }
        }
    }
}

impl GlobPattern {
    pub fn new(pattern: &str) -> Self {
        let chars: Vec<char> = pattern.chars().collect();
        let mut tokens = Vec::new();
        let mut i = 0;

        while i < chars.len() {
            let c = chars[i];
            i += 1;
            match c {
                '*' => {
                    if tokens.last() != Some(&Token::AnyRun) {
                        tokens.push(Token::AnyRun);
                    }
                }
                '?' => tokens.push(Token::AnyChar),
                '[' => {
                    // A leading '!' negates; a ']' right after the opening (or after '!') is literal.
                    let mut j = i;
                    if j < chars.len() && chars[j] == '!' {
                        j += 1;
                    }
                    if j < chars.len() && chars[j] == ']' {
                        j += 1;
                    }
                    while j < chars.len() && chars[j] != ']' {
                        j += 1;
                    }
                    if j >= chars.len() {
                        tokens.push(Token::Literal('['));
                        continue;
                    }
                    let mut body = &chars[i..j];
                    i = j + 1;
                    let negated = body.first() == Some(&'!');
                    if negated {
                        body = &body[1..];
                    }
                    tokens.push(Token::Class {
                        negated,
                        items: class_items(body),
                    });
                }
                other => tokens.push(Token::Literal(other)),
            }
        }

        Self {
            source: pattern.to_string(),
            tokens,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn matches(&self, text: &str) -> bool {
        let chars: Vec<char> = text.chars().collect();
        let tokens = &self.tokens;
        let (mut t, mut p) = (0, 0);
        // Token index after the last `*` and the text position it currently absorbs up to.
        let mut backtrack: Option<(usize, usize)> = None;

        while t < chars.len() {
            if p < tokens.len() {
                if tokens[p] == Token::AnyRun {
                    backtrack = Some((p + 1, t));
                    p += 1;
                    continue;
                }
                if tokens[p].matches(chars[t]) {
                    p += 1;
                    t += 1;
                    continue;
                }
            }
            match backtrack {
                Some((resume, absorbed)) => {
                    p = resume;
                    t = absorbed + 1;
                    backtrack = Some((resume, absorbed + 1));
                }
                None => return false,
            }
        }

        tokens[p..].iter().all(|tok| *tok == Token::AnyRun)
    }
}

fn class_items(body: &[char]) -> Vec<ClassItem> {
    let mut items = Vec::new();
    let mut k = 0;
    while k < body.len() {
        if k + 2 < body.len() && body[k + 1] == '-' {
            items.push(ClassItem::Range(body[k], body[k + 2]));
            k += 3;
        } else {
            items.push(ClassItem::Char(body[k]));
            k += 1;
        }
    }
    items
}

impl fmt::Display for GlobPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
