//! Structured addressing of a changed field inside a Space tree.
//!
//! A location is plain data: a list of typed steps. The textual form
//! `root['spaces'][2]['metrics']['cyclomatic']['sum']` exists for logs and
//! reports, and reading it back goes through the small tokenizer below.
//! Nothing here ever evaluates a path string.

use std::fmt;
use std::iter::Peekable;
use std::str::{CharIndices, FromStr};
use thiserror::Error;

const ROOT: &str = "root";
const SPACES_KEY: &str = "spaces";

/// One step of a [`ChangeLocation`]
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PathStep {
    /// Descend into the n-th child Space
    Space(usize),
    /// Descend into a metric field (or a key of a composite metric value)
    Field(String),
}

/// Path from the document root to one changed field
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChangeLocation {
    steps: Vec<PathStep>,
}

impl ChangeLocation {
    /// The document root itself
    pub fn root() -> Self {
        Self::default()
    }

    pub fn from_steps(steps: Vec<PathStep>) -> Self {
        Self { steps }
    }

    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    pub fn is_root(&self) -> bool {
        self.steps.is_empty()
    }

    /// Location of the n-th child Space under this one
    pub fn space(&self, index: usize) -> Self {
        self.with_step(PathStep::Space(index))
    }

    /// Location of a field under this one
    pub fn field(&self, name: impl Into<String>) -> Self {
        self.with_step(PathStep::Field(name.into()))
    }

    fn with_step(&self, step: PathStep) -> Self {
        let mut steps = Vec::with_capacity(self.steps.len() + 1);
        steps.extend_from_slice(&self.steps);
        steps.push(step);
        Self { steps }
    }
}

impl fmt::Display for ChangeLocation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(ROOT)?;
        for step in &self.steps {
            match step {
                PathStep::Space(index) => write!(f, "['{}'][{}]", SPACES_KEY, index)?,
                PathStep::Field(name) => {
                    let escaped = name.replace('\\', "\\\\").replace('\'', "\\'");
                    write!(f, "['{}']", escaped)?
                }
            }
        }
        Ok(())
    }
}

/// Errors raised while reading a location back from its textual form
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathParseError {
    #[error("path must start with `root`")]
    MissingRoot,

    #[error("unexpected character {found:?} at offset {offset}")]
    UnexpectedChar { offset: usize, found: char },

    #[error("unterminated segment starting at offset {0}")]
    Unterminated(usize),

    #[error("invalid index {text:?} at offset {offset}")]
    InvalidIndex { offset: usize, text: String },

    #[error("index at offset {0} does not follow ['spaces']")]
    StrayIndex(usize),

    #[error("['spaces'] at offset {0} is not followed by an index")]
    DanglingSpaces(usize),
}

enum Segment {
    Key(String),
    Index(usize),
}

struct Tokenizer<'a> {
    text: &'a str,
    chars: Peekable<CharIndices<'a>>,
    base: usize,
}

impl<'a> Tokenizer<'a> {
    fn new(text: &'a str, base: usize) -> Self {
        Self {
            text,
            chars: text.char_indices().peekable(),
            base,
        }
    }

    fn offset(&mut self) -> usize {
        let local = self.chars.peek().map_or(self.text.len(), |(i, _)| *i);
        self.base + local
    }

    fn is_done(&mut self) -> bool {
        self.chars.peek().is_none()
    }

    fn expect(&mut self, wanted: char, segment_start: usize) -> Result<(), PathParseError> {
        match self.chars.next() {
            Some((_, c)) if c == wanted => Ok(()),
            Some((i, found)) => Err(PathParseError::UnexpectedChar {
                offset: self.base + i,
                found,
            }),
            None => Err(PathParseError::Unterminated(segment_start)),
        }
    }

    fn segment(&mut self) -> Result<Segment, PathParseError> {
        let start = self.offset();
        self.expect('[', start)?;

        let segment = match self.chars.peek().copied() {
            Some((_, '\'')) => {
                self.chars.next();
                Segment::Key(self.quoted(start)?)
            }
            Some((_, c)) if c.is_ascii_digit() => Segment::Index(self.index()?),
            Some((i, found)) => {
                return Err(PathParseError::UnexpectedChar {
                    offset: self.base + i,
                    found,
                })
            }
            None => return Err(PathParseError::Unterminated(start)),
        };

        self.expect(']', start)?;
        Ok(segment)
    }

    fn quoted(&mut self, segment_start: usize) -> Result<String, PathParseError> {
        let mut key = String::new();
        loop {
            match self.chars.next() {
                Some((_, '\'')) => return Ok(key),
                Some((_, '\\')) => match self.chars.next() {
                    Some((_, escaped)) => key.push(escaped),
                    None => return Err(PathParseError::Unterminated(segment_start)),
                },
                Some((_, c)) => key.push(c),
                None => return Err(PathParseError::Unterminated(segment_start)),
            }
        }
    }

    fn index(&mut self) -> Result<usize, PathParseError> {
        let offset = self.offset();
        let mut digits = String::new();
        while let Some((_, c)) = self.chars.peek().copied() {
            if !c.is_ascii_digit() {
                break;
            }
            digits.push(c);
            self.chars.next();
        }
        digits
            .parse()
            .map_err(|_| PathParseError::InvalidIndex {
                offset,
                text: digits,
            })
    }
}

impl FromStr for ChangeLocation {
    type Err = PathParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let rest = input.strip_prefix(ROOT).ok_or(PathParseError::MissingRoot)?;
        let mut tokens = Tokenizer::new(rest, ROOT.len());
        let mut steps = Vec::new();
        let mut pending_spaces: Option<usize> = None;

        while !tokens.is_done() {
            let offset = tokens.offset();
            match tokens.segment()? {
                Segment::Key(key) => {
                    if let Some(at) = pending_spaces.take() {
                        return Err(PathParseError::DanglingSpaces(at));
                    }
                    if key == SPACES_KEY {
                        pending_spaces = Some(offset);
                    } else {
                        steps.push(PathStep::Field(key));
                    }
                }
                Segment::Index(index) => match pending_spaces.take() {
                    Some(_) => steps.push(PathStep::Space(index)),
                    None => return Err(PathParseError::StrayIndex(offset)),
                },
            }
        }

        if let Some(at) = pending_spaces {
            return Err(PathParseError::DanglingSpaces(at));
        }

        Ok(Self { steps })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_textual_form() {
        let location = ChangeLocation::root()
            .space(2)
            .field("metrics")
            .field("cyclomatic")
            .field("sum");
        assert_eq!(
            location.to_string(),
            "root['spaces'][2]['metrics']['cyclomatic']['sum']"
        );
    }

    #[test]
    fn test_parse_reads_typed_steps() {
        let location: ChangeLocation = "root['spaces'][0]['spaces'][3]['cognitive']"
            .parse()
            .unwrap();
        assert_eq!(
            location.steps(),
            &[
                PathStep::Space(0),
                PathStep::Space(3),
                PathStep::Field("cognitive".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_bare_root() {
        let location: ChangeLocation = "root".parse().unwrap();
        assert!(location.is_root());
    }

    #[test]
    fn test_quoted_keys_survive_a_round_trip() {
        let location = ChangeLocation::root().field("it's").field("a\\b");
        let parsed: ChangeLocation = location.to_string().parse().unwrap();
        assert_eq!(parsed, location);
    }

    #[test]
    fn test_parse_rejects_expressions() {
        assert_eq!(
            "__import__('os')".parse::<ChangeLocation>(),
            Err(PathParseError::MissingRoot)
        );
        assert!(matches!(
            "root['spaces'][0].__class__".parse::<ChangeLocation>(),
            Err(PathParseError::UnexpectedChar { found: '.', .. })
        ));
        assert!(matches!(
            "root[len(x)]".parse::<ChangeLocation>(),
            Err(PathParseError::UnexpectedChar { found: 'l', .. })
        ));
    }

    #[test]
    fn test_parse_rejects_malformed_segments() {
        assert_eq!(
            "root[3]".parse::<ChangeLocation>(),
            Err(PathParseError::StrayIndex(4))
        );
        assert_eq!(
            "root['spaces']".parse::<ChangeLocation>(),
            Err(PathParseError::DanglingSpaces(4))
        );
        assert_eq!(
            "root['spaces']['x']".parse::<ChangeLocation>(),
            Err(PathParseError::DanglingSpaces(4))
        );
        assert_eq!(
            "root['sum".parse::<ChangeLocation>(),
            Err(PathParseError::Unterminated(4))
        );
        assert!(matches!(
            "root['spaces'][99999999999999999999999]".parse::<ChangeLocation>(),
            Err(PathParseError::InvalidIndex { .. })
        ));
    }
}
