//! Single-pass SQL template renderer
//!
//! Recognizes two placeholder forms:
//! - `{{join.name}}` → list bound to `name`, rendered with [`join`](crate::join::join)
//! - `{{.name}}` → scalar bound to `name`, rendered as one literal
//!
//! Placeholders whose name is not bound are left in the output verbatim.
//! Anything else between `{{` and `}}` is plain text.

use std::ops::Range;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, instrument};

use crate::error::WeaveError;
use crate::join::{join, render_literal, JOIN_DELIMITER};
use crate::value::Args;

/// `{{join.name}}` or `{{.name}}`; names are ASCII identifiers, case-sensitive
static PLACEHOLDER_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\{(join)?\.([A-Za-z_][A-Za-z0-9_]*)\}\}").expect("valid placeholder regex")
});

/// Token representing a parsed template fragment
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Literal text (stores range in the source query)
    Literal(Range<usize>),
    /// List placeholder: {{join.name}}
    Join(String),
    /// Scalar placeholder: {{.name}}
    Scalar(String),
}

impl Token {
    /// Placeholder name, if this token is a placeholder
    pub fn name(&self) -> Option<&str> {
        match self {
            Token::Literal(_) => None,
            Token::Join(name) | Token::Scalar(name) => Some(name.as_str()),
        }
    }
}

/// A query split into literal text and placeholders
///
/// Built per call; nothing is cached between renders.
#[derive(Debug, Clone)]
pub struct Template<'a> {
    source: &'a str,
    tokens: Vec<Token>,
}

impl<'a> Template<'a> {
    /// Parse a query into tokens
    pub fn parse(source: &'a str) -> Self {
        Self {
            source,
            tokens: tokenize(source),
        }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Placeholder names in order of appearance (duplicates kept)
    pub fn names(&self) -> Vec<&str> {
        self.tokens.iter().filter_map(Token::name).collect()
    }

    /// Substitute every bound placeholder with its formatted value
    pub fn render(&self, args: &Args) -> Result<String, WeaveError> {
        // Pre-allocate with estimated size (lists usually grow the query)
        let mut result = String::with_capacity(self.source.len() * 2);

        for token in &self.tokens {
            match token {
                Token::Literal(range) => {
                    result.push_str(&self.source[range.clone()]);
                }
                Token::Join(name) => match args.get(name) {
                    Some(value) if value.is_seq() => {
                        result.push_str(&join(value, JOIN_DELIMITER)?);
                    }
                    Some(value) => {
                        return Err(WeaveError::TypeMismatch {
                            name: name.clone(),
                            expected: "sequence",
                            found: value.kind(),
                        });
                    }
                    None => {
                        debug!(name = %name, "join placeholder not bound, keeping it");
                        result.push_str(&format!("{{{{join.{}}}}}", name));
                    }
                },
                Token::Scalar(name) => match args.get(name) {
                    Some(value) => result.push_str(&render_literal(name, value)?),
                    None => {
                        debug!(name = %name, "placeholder not bound, keeping it");
                        result.push_str(&format!("{{{{.{}}}}}", name));
                    }
                },
            }
        }

        Ok(result)
    }
}

/// Split a query into literal ranges and placeholder tokens
///
/// Single regex pass, linear in the query length. Text that does not match
/// a placeholder (unknown prefixes, unterminated `{{`) stays literal.
pub fn tokenize(template: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut literal_start = 0;

    for caps in PLACEHOLDER_PATTERN.captures_iter(template) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(2)) else {
            continue;
        };

        // Flush literal if any
        if whole.start() > literal_start {
            tokens.push(Token::Literal(literal_start..whole.start()));
        }
        let name = name.as_str().to_string();
        tokens.push(if caps.get(1).is_some() {
            Token::Join(name)
        } else {
            Token::Scalar(name)
        });
        literal_start = whole.end();
    }

    // Flush remaining literal
    if literal_start < template.len() {
        tokens.push(Token::Literal(literal_start..template.len()));
    }

    tokens
}

/// Render a query against an argument map
#[instrument(level = "debug", skip_all, fields(query_len = query.len(), args = args.len()))]
pub fn render_template(query: &str, args: &Args) -> Result<String, WeaveError> {
    let template = Template::parse(query);
    debug!(placeholders = template.names().len(), "Rendering template");
    template.render(args)
}
