// Minimal DQL expression parser standing in for a host query language.
// Included by the integration tests; it feeds `FunctionCallNode` through
// `ArgumentSource` and renders through `ArgumentRenderer`.

use geodql_core::{ArgumentRenderer, ArgumentSource, FunctionCallNode, GeoDqlError};

#[derive(Debug, Clone, PartialEq)]
pub enum Tok {
    Word(String),
    Number(String),
    Param(String),
    Str(String),
    Comma,
    Open,
    Close,
    End,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Path(String),
    Number(String),
    Param(String),
    Str(String),
    Call(Box<FunctionCallNode<Expr>>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct QueryError {
    pub position: usize,
    pub expected: &'static str,
    pub found: Tok,
}

pub struct DqlParser {
    tokens: Vec<(usize, Tok)>,
    index: usize,
}

impl DqlParser {
    pub fn new(src: &str) -> Self {
        let chars: Vec<char> = src.chars().collect();
        let word = |c: char| c.is_alphanumeric() || c == '_' || c == '.';
        let mut tokens = Vec::new();
        let mut i = 0;
        while i < chars.len() {
            let start = i;
            let c = chars[i];
            i += 1;
            let run = |i: &mut usize, pred: &dyn Fn(char) -> bool| {
                let from = *i;
                while *i < chars.len() && pred(chars[*i]) {
                    *i += 1;
                }
                chars[from..*i].iter().collect::<String>()
            };
            let tok = match c {
                c if c.is_whitespace() => continue,
                ',' => Tok::Comma,
                '(' => Tok::Open,
                ')' => Tok::Close,
                ':' => Tok::Param(run(&mut i, &|c| c.is_alphanumeric() || c == '_')),
                '\'' => {
                    let text = run(&mut i, &|c| c != '\'');
                    i += 1;
                    Tok::Str(text)
                }
                c if c.is_ascii_digit() || c == '-' => {
                    let rest = run(&mut i, &|c| c.is_ascii_digit() || c == '.');
                    Tok::Number(format!("{c}{rest}"))
                }
                c if word(c) => Tok::Word(format!("{c}{}", run(&mut i, &word))),
                c => Tok::Word(c.to_string()),
            };
            tokens.push((start, tok));
        }
        tokens.push((chars.len(), Tok::End));
        Self { tokens, index: 0 }
    }

    /// Parse a whole input as one function call.
    pub fn parse_call(src: &str) -> Result<FunctionCallNode<Expr>, QueryError> {
        let mut parser = Self::new(src);
        match parser.expression()? {
            Expr::Call(node) => {
                parser.expect(Tok::End, "end of input")?;
                Ok(*node)
            }
            _ => Err(parser.error("function call")),
        }
    }

    fn peek(&self) -> &Tok {
        &self.tokens[self.index].1
    }

    fn bump(&mut self) -> Tok {
        let tok = self.tokens[self.index].1.clone();
        if tok != Tok::End {
            self.index += 1;
        }
        tok
    }

    fn error(&self, expected: &'static str) -> QueryError {
        let (position, found) = self.tokens[self.index].clone();
        QueryError {
            position,
            expected,
            found,
        }
    }

    fn expect(&mut self, tok: Tok, expected: &'static str) -> Result<(), QueryError> {
        if *self.peek() == tok {
            self.bump();
            Ok(())
        } else {
            Err(self.error(expected))
        }
    }

    fn expression(&mut self) -> Result<Expr, QueryError> {
        match self.peek().clone() {
            Tok::Word(word) => {
                self.bump();
                if *self.peek() != Tok::Open {
                    return Ok(Expr::Path(word));
                }
                self.bump();
                let mut node = FunctionCallNode::new(word);
                node.collect_arguments(self)?;
                Ok(Expr::Call(Box::new(node)))
            }
            Tok::Number(n) => {
                self.bump();
                Ok(Expr::Number(n))
            }
            Tok::Param(p) => {
                self.bump();
                Ok(Expr::Param(p))
            }
            Tok::Str(s) => {
                self.bump();
                Ok(Expr::Str(s))
            }
            _ => Err(self.error("expression")),
        }
    }
}

impl ArgumentSource for DqlParser {
    type Argument = Expr;
    type Error = QueryError;

    fn match_argument(&mut self) -> Result<Expr, QueryError> {
        self.expression()
    }

    fn match_separator(&mut self) -> Result<(), QueryError> {
        self.expect(Tok::Comma, "','")
    }

    fn has_more_arguments(&self) -> bool {
        !matches!(self.peek(), Tok::Close | Tok::End)
    }

    fn match_close(&mut self) -> Result<(), QueryError> {
        self.expect(Tok::Close, "')'")
    }
}

/// Renders parameters as positional placeholders and nested calls recursively.
pub struct SqlRenderer;

impl ArgumentRenderer<Expr> for SqlRenderer {
    type Error = GeoDqlError;

    fn render(&self, argument: &Expr, platform: &str) -> Result<String, GeoDqlError> {
        Ok(match argument {
            Expr::Path(path) => path.clone(),
            Expr::Number(n) => n.clone(),
            Expr::Param(_) => "?".to_string(),
            Expr::Str(s) => format!("'{}'", s.replace('\'', "''")),
            Expr::Call(node) => node.emit(platform, self)?,
        })
    }
}
