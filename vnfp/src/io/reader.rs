use anyhow::{Context, Result, bail};
use regex::Regex;
use std::fmt::{Display, Formatter};
use std::io::Read;

/// Sequential source of numeric values: scalars, arrays (sequences of scalars) and
/// matrices (sequences of arrays). Rows of a matrix are not required to have equal lengths.
pub trait NumericReader {
    fn scalar(&mut self) -> Result<f64>;

    fn array(&mut self) -> Result<Vec<f64>>;

    fn matrix(&mut self) -> Result<Vec<Vec<f64>>>;
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Number(f64),
    Open,
    Close,
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Number(v) => write!(f, "number {v}"),
            Token::Open => write!(f, "`[`"),
            Token::Close => write!(f, "`]`"),
        }
    }
}

/// [`NumericReader`] over bracketed text such as
/// ```text
/// numServers=2;
/// P_max=[10, 12.5];
/// Edges=[[1,2,10,0,1],
///        [2,3,10,0,1]];
/// ```
/// Numbers and brackets are the only meaningful tokens. Identifiers, `=`, `;`, `,`, whitespace
/// and `#` or `//` line comments are skipped.
#[derive(Debug, Clone)]
pub struct TextReader {
    /// Tokens with the (1-based) line they were found on
    tokens: Vec<(usize, Token)>,
    pos: usize,
}

impl TextReader {
    /// Reads the entire `source` and tokenizes it.
    pub fn new(mut source: impl Read) -> Result<Self> {
        let mut text = String::new();
        source
            .read_to_string(&mut text)
            .context("could not read instance text")?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(TextReader {
            tokens: tokenize(text)?,
            pos: 0,
        })
    }

    /// True if all tokens have been consumed
    pub fn is_exhausted(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn next(&mut self) -> Result<(usize, Token)> {
        let token = *self
            .tokens
            .get(self.pos)
            .context("unexpected end of input")?;
        self.pos += 1;
        Ok(token)
    }

    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).map(|(_, t)| *t)
    }

    fn expect_open(&mut self) -> Result<()> {
        match self.next()? {
            (_, Token::Open) => Ok(()),
            (line, t) => bail!("expected `[` on line {line}, found {t}"),
        }
    }
}

impl NumericReader for TextReader {
    fn scalar(&mut self) -> Result<f64> {
        match self.next()? {
            (_, Token::Number(v)) => Ok(v),
            (line, t) => bail!("expected a number on line {line}, found {t}"),
        }
    }

    fn array(&mut self) -> Result<Vec<f64>> {
        self.expect_open()?;
        let mut values = vec![];
        loop {
            match self.next()? {
                (_, Token::Number(v)) => values.push(v),
                (_, Token::Close) => return Ok(values),
                (line, t) => bail!("expected a number or `]` on line {line}, found {t}"),
            }
        }
    }

    fn matrix(&mut self) -> Result<Vec<Vec<f64>>> {
        self.expect_open()?;
        let mut rows = vec![];
        loop {
            match self.peek() {
                Some(Token::Open) => rows.push(self.array()?),
                Some(Token::Close) => {
                    self.pos += 1;
                    return Ok(rows);
                }
                Some(Token::Number(_)) => {
                    let (line, t) = self.next()?;
                    bail!("expected a row or `]` on line {line}, found {t}")
                }
                None => bail!("unexpected end of input inside a matrix"),
            }
        }
    }
}

/// One alternative per token class, tried in order. Every character of a line matches exactly one
/// alternative, `other` catches everything that may not appear in an instance.
const TOKEN_PATTERN: &str = r"(?P<comment>#.*|//.*)|(?P<open>\[)|(?P<close>\])|(?P<ident>[A-Za-z_][A-Za-z0-9_]*)|(?P<number>[0-9.eE+\-]+)|(?P<skip>[\s=;,]+)|(?P<other>.)";

fn tokenize(text: &str) -> Result<Vec<(usize, Token)>> {
    let re = Regex::new(TOKEN_PATTERN)?;
    let mut tokens = vec![];
    for (i, line) in text.lines().enumerate() {
        let line_nr = i + 1;
        for caps in re.captures_iter(line) {
            if caps.name("open").is_some() {
                tokens.push((line_nr, Token::Open));
            } else if caps.name("close").is_some() {
                tokens.push((line_nr, Token::Close));
            } else if let Some(literal) = caps.name("number") {
                let literal = literal.as_str();
                let value = literal
                    .parse::<f64>()
                    .with_context(|| format!("invalid number `{literal}` on line {line_nr}"))?;
                tokens.push((line_nr, Token::Number(value)));
            } else if let Some(c) = caps.name("other") {
                bail!("unexpected character `{}` on line {line_nr}", c.as_str());
            }
            //comments, identifiers and separators carry no data
        }
    }
    Ok(tokens)
}
