//! Type signatures as written in declarations.
//!
//! A compact docblock-style notation for method return types and parent
//! clauses. Names are kept unresolved; [`ClassTable`](crate::ClassTable)
//! binds them to classes and template parameters.
//!
//! # Syntax
//!
//! - `Name`, `App\Models\User`: class or template parameter
//! - `Name<A, B>`: generic instantiation
//! - `A|B`: union
//! - `?A`: nullable, same as `A|null`
//! - `*`: wildcard argument, same as `mixed`
//! - `mixed`, `never`, `null`, `string`: builtins
//! - `static`, `$this`: the class the member is looked up on
//! - `'posts'`, `"posts"`: string literal
//!
//! # Example
//!
//! ```text
//! HasMany<Post, $this>
//! Builder<static>|null
//! Relation<TRelatedModel, *>
//! ```

use logos::Logos;

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r]+")]
enum Token<'src> {
    #[token("mixed")]
    Mixed,

    #[token("never")]
    Never,

    #[token("null")]
    Null,

    #[token("string")]
    String,

    #[token("static")]
    Static,

    #[token("$this")]
    This,

    #[token("<")]
    LAngle,

    #[token(">")]
    RAngle,

    #[token(",")]
    Comma,

    #[token("|")]
    Pipe,

    #[token("?")]
    Question,

    #[token("*")]
    Star,

    #[regex(r"'(?:[^'\\]|\\.)*'", unquote)]
    #[regex(r#""(?:[^"\\]|\\.)*""#, unquote)]
    Literal(&'src str),

    /// Class or template name. Namespace separators are part of the name.
    #[regex(r"[A-Za-z_\\][A-Za-z0-9_\\]*", |lex| lex.slice())]
    Name(&'src str),
}

fn unquote<'src>(lex: &mut logos::Lexer<'src, Token<'src>>) -> &'src str {
    let slice = lex.slice();
    &slice[1..slice.len() - 1]
}

/// Parsed, unresolved type signature.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum TypeSig {
    Mixed,
    Never,
    Null,
    String,
    /// `static` or `$this`.
    Static,
    Literal(String),
    Named { name: String, args: Vec<TypeSig> },
    Union(Vec<TypeSig>),
}

impl TypeSig {
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named {
            name: name.into(),
            args: Vec::new(),
        }
    }
}

impl std::fmt::Display for TypeSig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeSig::Mixed => f.write_str("mixed"),
            TypeSig::Never => f.write_str("never"),
            TypeSig::Null => f.write_str("null"),
            TypeSig::String => f.write_str("string"),
            TypeSig::Static => f.write_str("static"),
            TypeSig::Literal(value) => write!(f, "'{value}'"),
            TypeSig::Named { name, args } => {
                f.write_str(name)?;
                if args.is_empty() {
                    return Ok(());
                }
                f.write_str("<")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(">")
            }
            TypeSig::Union(members) => {
                for (i, member) in members.iter().enumerate() {
                    if i > 0 {
                        f.write_str("|")?;
                    }
                    write!(f, "{member}")?;
                }
                Ok(())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} at {span:?}")]
pub struct TypeSigError {
    pub message: String,
    pub span: std::ops::Range<usize>,
}

/// Parse a type signature.
pub fn parse_type_sig(input: &str) -> Result<TypeSig, TypeSigError> {
    let mut parser = Parser::new(input)?;
    let sig = parser.parse_union()?;

    if parser.peek().is_some() {
        let span = parser.current_span();
        return Err(TypeSigError {
            message: format!("unexpected trailing input {:?}", &input[span.clone()]),
            span,
        });
    }

    Ok(sig)
}

struct Parser<'src> {
    tokens: Vec<(Token<'src>, std::ops::Range<usize>)>,
    pos: usize,
    input: &'src str,
}

impl<'src> Parser<'src> {
    fn new(input: &'src str) -> Result<Self, TypeSigError> {
        let lexer = Token::lexer(input);
        let mut tokens = Vec::new();

        for (result, span) in lexer.spanned() {
            match result {
                Ok(token) => tokens.push((token, span)),
                Err(_) => {
                    return Err(TypeSigError {
                        message: format!("unexpected character: {:?}", &input[span.clone()]),
                        span,
                    });
                }
            }
        }

        Ok(Self {
            tokens,
            pos: 0,
            input,
        })
    }

    fn peek(&self) -> Option<&Token<'src>> {
        self.tokens.get(self.pos).map(|(t, _)| t)
    }

    fn advance(&mut self) -> Option<Token<'src>> {
        let token = self.tokens.get(self.pos).map(|(t, _)| t.clone());
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn current_span(&self) -> std::ops::Range<usize> {
        self.tokens
            .get(self.pos)
            .map(|(_, s)| s.clone())
            .unwrap_or(self.input.len()..self.input.len())
    }

    fn parse_union(&mut self) -> Result<TypeSig, TypeSigError> {
        let mut members = vec![self.parse_member()?];
        while self.peek() == Some(&Token::Pipe) {
            self.advance();
            members.push(self.parse_member()?);
        }

        if members.len() == 1 {
            return Ok(members.remove(0));
        }
        Ok(TypeSig::Union(members))
    }

    fn parse_member(&mut self) -> Result<TypeSig, TypeSigError> {
        if self.peek() == Some(&Token::Question) {
            self.advance();
            let inner = self.parse_atom()?;
            return Ok(TypeSig::Union(vec![inner, TypeSig::Null]));
        }
        self.parse_atom()
    }

    fn parse_atom(&mut self) -> Result<TypeSig, TypeSigError> {
        let span = self.current_span();
        match self.advance() {
            Some(Token::Mixed | Token::Star) => Ok(TypeSig::Mixed),
            Some(Token::Never) => Ok(TypeSig::Never),
            Some(Token::Null) => Ok(TypeSig::Null),
            Some(Token::String) => Ok(TypeSig::String),
            Some(Token::Static | Token::This) => Ok(TypeSig::Static),
            Some(Token::Literal(value)) => Ok(TypeSig::Literal(value.to_owned())),
            Some(Token::Name(name)) => {
                let name = name.trim_start_matches('\\').to_owned();
                let args = if self.peek() == Some(&Token::LAngle) {
                    self.parse_args()?
                } else {
                    Vec::new()
                };
                Ok(TypeSig::Named { name, args })
            }
            Some(t) => Err(TypeSigError {
                message: format!("expected type, got {:?}", t),
                span,
            }),
            None => Err(TypeSigError {
                message: "expected type, got EOF".to_string(),
                span,
            }),
        }
    }

    fn parse_args(&mut self) -> Result<Vec<TypeSig>, TypeSigError> {
        self.advance();
        let mut args = vec![self.parse_union()?];
        loop {
            let span = self.current_span();
            match self.advance() {
                Some(Token::Comma) => args.push(self.parse_union()?),
                Some(Token::RAngle) => return Ok(args),
                Some(t) => {
                    return Err(TypeSigError {
                        message: format!("expected ',' or '>', got {:?}", t),
                        span,
                    });
                }
                None => {
                    return Err(TypeSigError {
                        message: "unclosed generic argument list".to_string(),
                        span,
                    });
                }
            }
        }
    }
}
