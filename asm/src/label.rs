use indexmap::IndexMap;

use crate::error::{Error, LineError};
use crate::lexer::Line;
use crate::parser::{fill_value, Imm};

pub const MAX_LABEL_LEN: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelKind {
    /// Address of the line it is defined on.
    Code,
    /// `.fill` with an integer literal.
    Fill,
    /// `.fill` naming another label.
    Alias(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    pub line: usize,
    pub kind: LabelKind,
    pub value: i32,
}

/// Symbol table built by the first pass, in definition order.
#[derive(Debug, Default)]
pub struct Labels {
    labels: IndexMap<String, Label>,
}

impl Labels {
    pub fn new() -> Self {
        Labels {
            labels: IndexMap::new(),
        }
    }

    pub fn insert(&mut self, name: &str, label: Label) -> Result<(), Error> {
        validate(name)?;
        if self.labels.contains_key(name) {
            return Err(Error::DuplicateLabel(name.to_string()));
        }
        self.labels.insert(name.to_string(), label);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Label> {
        self.labels.get(name)
    }

    pub fn resolve(&self, name: &str) -> Result<i32, Error> {
        match self.labels.get(name) {
            Some(label) => Ok(label.value),
            None => Err(Error::UndefinedLabel(name.to_string())),
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Label)> {
        self.labels.iter().map(|(name, label)| (name.as_str(), label))
    }

    /// Label defined on the given line, if any.
    pub fn at_line(&self, line: usize) -> Option<&str> {
        self.iter()
            .find(|(_, label)| label.line == line)
            .map(|(name, _)| name)
    }
}

// ----------------------------------------------------------------------------
// Pass 1

impl Labels {
    pub fn collect(lines: &[Line]) -> Result<Self, LineError> {
        let mut labels = Labels::new();

        for (idx, line) in lines.iter().enumerate() {
            let Some(name) = line.label else {
                continue;
            };
            let at = |error| LineError { line: idx, error };
            let label = if line.is_fill() {
                match Imm::parse(line.args[0]).map_err(at)? {
                    Imm::Literal(v) => Label {
                        line: idx,
                        kind: LabelKind::Fill,
                        value: fill_value(v, line.args[0]).map_err(at)?,
                    },
                    Imm::Ident(target) => Label {
                        line: idx,
                        kind: LabelKind::Alias(target),
                        value: 0,
                    },
                }
            } else {
                Label {
                    line: idx,
                    kind: LabelKind::Code,
                    value: idx as i32,
                }
            };
            labels.insert(name, label).map_err(at)?;
        }

        // Aliases may point forward, so they are settled once every name is known.
        for idx in 0..labels.labels.len() {
            let Some((name, label)) = labels.labels.get_index(idx) else {
                continue;
            };
            if !matches!(label.kind, LabelKind::Alias(_)) {
                continue;
            }
            let line = label.line;
            let value = labels
                .follow(name)
                .map_err(|error| LineError { line, error })?;
            if let Some((_, label)) = labels.labels.get_index_mut(idx) {
                label.value = value;
            }
        }

        Ok(labels)
    }

    fn follow(&self, name: &str) -> Result<i32, Error> {
        let mut seen = vec![name];
        let mut label = self
            .labels
            .get(name)
            .ok_or_else(|| Error::UndefinedLabel(name.to_string()))?;
        while let LabelKind::Alias(target) = &label.kind {
            if seen.contains(&target.as_str()) {
                return Err(Error::CircularLabel(name.to_string()));
            }
            seen.push(target);
            label = self
                .labels
                .get(target)
                .ok_or_else(|| Error::UndefinedLabel(target.clone()))?;
        }
        Ok(label.value)
    }
}

fn validate(name: &str) -> Result<(), Error> {
    let mut chars = name.chars();
    let head = matches!(chars.next(), Some(c) if c.is_ascii_alphabetic());
    if head && chars.all(|c| c.is_ascii_alphanumeric()) && name.len() <= MAX_LABEL_LEN {
        Ok(())
    } else {
        Err(Error::InvalidLabel(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::split;

    fn collect(src: &str) -> Result<Labels, LineError> {
        Labels::collect(&split(src).unwrap())
    }

    #[test]
    fn test_code_labels() {
        let labels = collect("start\tnoop\n\tnoop\nend\thalt\n").unwrap();
        assert_eq!(labels.len(), 2);
        assert_eq!(labels.resolve("start").unwrap(), 0);
        assert_eq!(labels.resolve("end").unwrap(), 2);
        assert_eq!(labels.at_line(2), Some("end"));
        assert!(matches!(
            labels.resolve("nowhere"),
            Err(Error::UndefinedLabel(name)) if name == "nowhere"
        ));
    }

    #[test]
    fn test_fill_literal() {
        let labels = collect("\thalt\nfive\t.fill 5\nneg\t.fill -1\n").unwrap();
        assert_eq!(labels.resolve("five").unwrap(), 5);
        assert_eq!(labels.resolve("neg").unwrap(), -1);
        assert_eq!(labels.get("five").unwrap().kind, LabelKind::Fill);
    }

    #[test]
    fn test_fill_alias() {
        let labels = collect("\thalt\nptr\t.fill data\ntwice\t.fill ptr\ndata\t.fill 42\n").unwrap();
        assert_eq!(labels.resolve("ptr").unwrap(), 42);
        assert_eq!(labels.resolve("twice").unwrap(), 42);
        assert_eq!(
            labels.get("ptr").unwrap().kind,
            LabelKind::Alias("data".to_string())
        );
    }

    #[test]
    fn test_fill_alias_to_code() {
        let labels = collect("loop\tnoop\naddr\t.fill loop\n").unwrap();
        assert_eq!(labels.resolve("addr").unwrap(), 0);
    }

    #[test]
    fn test_circular_alias() {
        let err = collect("a\t.fill b\nb\t.fill a\n").unwrap_err();
        assert_eq!(err.line, 0);
        assert!(matches!(err.error, Error::CircularLabel(_)));

        let err = collect("self\t.fill self\n").unwrap_err();
        assert!(matches!(err.error, Error::CircularLabel(_)));
    }

    #[test]
    fn test_alias_undefined() {
        let err = collect("\thalt\nptr\t.fill gone\n").unwrap_err();
        assert_eq!(err.line, 1);
        assert!(matches!(err.error, Error::UndefinedLabel(name) if name == "gone"));
    }

    #[test]
    fn test_duplicate() {
        let err = collect("x\tnoop\n\tnoop\nx\thalt\n").unwrap_err();
        assert_eq!(err.line, 2);
        assert!(matches!(err.error, Error::DuplicateLabel(name) if name == "x"));

        let err = collect("x\t.fill 1\nx\t.fill 1\n").unwrap_err();
        assert!(matches!(err.error, Error::DuplicateLabel(_)));
    }

    #[test]
    fn test_invalid_names() {
        for name in ["toolong", "1abc", "a_b", "x:"] {
            let err = collect(&format!("{}\thalt\n", name)).unwrap_err();
            assert!(matches!(err.error, Error::InvalidLabel(_)), "{}", name);
        }
        for name in ["a", "abcdef", "L2", "Loop9"] {
            assert!(collect(&format!("{}\thalt\n", name)).is_ok(), "{}", name);
        }
    }

    #[test]
    fn test_case_sensitive() {
        let labels = collect("Loop\tnoop\nloop\thalt\n").unwrap();
        assert_eq!(labels.resolve("Loop").unwrap(), 0);
        assert_eq!(labels.resolve("loop").unwrap(), 1);
    }
}
