//! The brace notation: `{1,2,3}` for a hyperedge, `{{1,2},{2,3}}` for a hypergraph.
//! Whitespace between tokens is ignored when parsing and never printed.
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::hypergraph::{Hyperedge, Hypergraph, Vertex};

impl fmt::Display for Hyperedge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_list(f, self.iter())
    }
}

impl fmt::Display for Hypergraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_list(f, self.iter())
    }
}

/// Write `{a,b,c}`.
pub fn write_list<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    items: impl IntoIterator<Item = T>,
) -> fmt::Result {
    f.write_str("{")?;
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            f.write_str(",")?;
        }
        write!(f, "{item}")?;
    }
    f.write_str("}")
}

impl FromStr for Hyperedge {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut parser = Parser::new(s);
        let he = parser.hyperedge()?;
        parser.end()?;
        Ok(he)
    }
}

impl FromStr for Hypergraph {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut parser = Parser::new(s);
        let hg = parser.hypergraph()?;
        parser.end()?;
        Ok(hg)
    }
}

struct Parser<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, position: 0 }
    }

    fn skip_whitespace(&mut self) {
        let rest = &self.input[self.position..];
        self.position += rest.len() - rest.trim_start().len();
    }

    fn peek(&mut self) -> Option<char> {
        self.skip_whitespace();
        self.input[self.position..].chars().next()
    }

    fn expect(&mut self, c: char) -> Result<()> {
        match self.peek() {
            Some(found) if found == c => {
                self.position += c.len_utf8();
                Ok(())
            }
            Some(found) => Err(Error::malformed(
                self.position,
                format!("expected '{c}', found '{found}'"),
            )),
            None => Err(Error::malformed(
                self.position,
                format!("expected '{c}', found end of input"),
            )),
        }
    }

    /// Parse a brace-delimited, comma-separated list of `item`s.
    fn list<T>(&mut self, mut item: impl FnMut(&mut Self) -> Result<T>) -> Result<Vec<T>> {
        self.expect('{')?;
        let mut items = Vec::new();
        if self.peek() == Some('}') {
            self.position += 1;
            return Ok(items);
        }
        loop {
            items.push(item(self)?);
            match self.peek() {
                Some(',') => self.position += 1,
                Some('}') => {
                    self.position += 1;
                    return Ok(items);
                }
                Some(found) => {
                    return Err(Error::malformed(
                        self.position,
                        format!("expected ',' or '}}', found '{found}'"),
                    ));
                }
                None => return Err(Error::malformed(self.position, "missing closing '}'")),
            }
        }
    }

    fn vertex(&mut self) -> Result<Vertex> {
        self.skip_whitespace();
        let rest = &self.input[self.position..];
        let len = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        if len == 0 {
            let found = rest
                .chars()
                .next()
                .map_or("end of input".to_string(), |c| format!("'{c}'"));
            return Err(Error::malformed(
                self.position,
                format!("expected a vertex, found {found}"),
            ));
        }
        let vertex = rest[..len]
            .parse()
            .map_err(|e| Error::malformed(self.position, format!("bad vertex: {e}")))?;
        self.position += len;
        Ok(vertex)
    }

    fn hyperedge(&mut self) -> Result<Hyperedge> {
        self.list(Self::vertex).map(Hyperedge::from)
    }

    fn hypergraph(&mut self) -> Result<Hypergraph> {
        self.list(Self::hyperedge).map(Hypergraph::new)
    }

    fn end(&mut self) -> Result<()> {
        match self.peek() {
            None => Ok(()),
            Some(found) => Err(Error::malformed(
                self.position,
                format!("unexpected '{found}' after closing '}}'"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hypergraph() {
        let hg: Hypergraph = "{{1,2},{2,3}}".parse().unwrap();
        assert_eq!(hg, Hypergraph::from_lists([vec![1, 2], vec![2, 3]]));

        let hg: Hypergraph = " { {1, 2} ,{ 3 } }\r\n".parse().unwrap();
        assert_eq!(hg, Hypergraph::from_lists([vec![1, 2], vec![3]]));
    }

    #[test]
    fn test_parse_empty() {
        assert!("{}".parse::<Hypergraph>().unwrap().is_empty());

        let hg: Hypergraph = "{{}}".parse().unwrap();
        assert_eq!(hg.len(), 1);
        assert!(hg.hyperedges()[0].is_empty());
    }

    #[test]
    fn test_parse_hyperedge() {
        let he: Hyperedge = "{10,2,10}".parse().unwrap();
        assert_eq!(he.vertices(), &[10, 2, 10]);
    }

    #[test]
    fn test_malformed() {
        for input in [
            "",
            "{{1,2}",
            "{{1,2},{2,3}",
            "{1,2}}",
            "{{1,a}}",
            "{{1,-2}}",
            "{{1,,2}}",
            "{{1 2}}",
            "{{1,2}} x",
            "1,2",
        ] {
            let result = input.parse::<Hypergraph>();
            assert!(
                matches!(result, Err(Error::MalformedInput { .. })),
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_malformed_position() {
        let Err(Error::MalformedInput { position, .. }) = "{{1,x}}".parse::<Hypergraph>() else {
            panic!("expected a parse error");
        };
        assert_eq!(position, 4);
    }

    #[test]
    fn test_display() {
        let hg = Hypergraph::from_lists([vec![1, 2], vec![], vec![3]]);
        assert_eq!(hg.to_string(), "{{1,2},{},{3}}");
        assert_eq!(Hypergraph::default().to_string(), "{}");

        let text = "{{4,1,4},{2}}";
        assert_eq!(text.parse::<Hypergraph>().unwrap().to_string(), text);
    }
}
