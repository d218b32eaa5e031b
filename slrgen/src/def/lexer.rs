//! Lexer for grammar definition files.
//!
//! Built on [`logos`]. Words are interned into the [`LexContext`] symbol
//! table so that tokens carry indices rather than strings. Whitespace other
//! than line feeds, and `--` comments, are skipped.

use crate::symtab::Symtab;
use logos::Logos;

/// State shared by the lexer and the definition loader.
#[derive(Default, Debug)]
pub struct LexContext {
    /// Every word seen, in first-appearance order.
    pub words: Symtab,
}

/// Tokens of a grammar definition file.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// `%terminals`
    Terminals,

    /// `%nonterminals`
    Nonterminals,

    /// `%start`
    Start,

    /// The rule separator `->`.
    Prod,

    /// Any other whitespace-delimited word, by index into
    /// [`LexContext::words`].
    Word(usize),

    /// A line feed; rules and directives end at one.
    LineFeed,
}

#[derive(Logos, Debug, PartialEq)]
#[logos(skip r"[ \t\f\r]+")]
enum LogosToken {
    #[regex(r"\n")]
    LineFeed,

    #[regex(r"--[^\n]*")]
    Comment,

    #[token("->")]
    Prod,

    #[token("%terminals")]
    Terminals,

    #[token("%nonterminals")]
    Nonterminals,

    #[token("%start")]
    Start,

    #[regex(r"[^ \t\f\r\n]+")]
    Word,
}

/// Grammar file lexer.
pub struct Lexer<'source> {
    inner: logos::Lexer<'source, LogosToken>,
}

impl<'source> Lexer<'source> {
    pub fn new(input: &'source str) -> Self {
        Self {
            inner: LogosToken::lexer(input),
        }
    }

    /// Returns the next token, or `None` at end of input.
    ///
    /// Input the lexer cannot classify yields `Some(Err(text))`.
    pub fn next_token(&mut self, ctx: &mut LexContext) -> Option<Result<Token, String>> {
        while let Some(kind) = self.inner.next() {
            let slice = self.inner.slice();
            return Some(match kind {
                Ok(LogosToken::LineFeed) => Ok(Token::LineFeed),
                Ok(LogosToken::Comment) => continue,
                Ok(LogosToken::Prod) => Ok(Token::Prod),
                Ok(LogosToken::Terminals) => Ok(Token::Terminals),
                Ok(LogosToken::Nonterminals) => Ok(Token::Nonterminals),
                Ok(LogosToken::Start) => Ok(Token::Start),
                Ok(LogosToken::Word) => Ok(Token::Word(ctx.words.add(slice))),
                Err(()) => Err(slice.to_owned()),
            });
        }
        None
    }

    /// Tokenizes the whole input. On failure returns the 1-based line and
    /// the offending text.
    pub fn tokenize_all(
        input: &'source str,
        ctx: &mut LexContext,
    ) -> Result<Vec<Token>, (usize, String)> {
        let mut lex = Lexer::new(input);
        let mut out = Vec::new();
        let mut line = 1;
        while let Some(tok) = lex.next_token(ctx) {
            match tok {
                Ok(tok) => {
                    if tok == Token::LineFeed {
                        line += 1;
                    }
                    out.push(tok);
                }
                Err(text) => return Err((line, text)),
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directives_rules_and_comments() {
        let mut ctx = LexContext::default();
        let input = "-- header\n%terminals a ( )\n\nS -> ( S ) -- nested\nS -> ε\n";
        let toks = Lexer::tokenize_all(input, &mut ctx).unwrap();
        assert_eq!(toks.len(), 17);
        assert_eq!(toks[0], Token::LineFeed);
        assert_eq!(toks[1], Token::Terminals);
        assert_eq!(toks[2], Token::Word(0));
        assert_eq!(toks[8], Token::Prod);
        assert_eq!(ctx.words.names(), &["a", "(", ")", "S", "ε"]);
    }

    #[test]
    fn arrow_inside_a_word_is_not_a_separator() {
        let mut ctx = LexContext::default();
        let toks = Lexer::tokenize_all("x->y -> z", &mut ctx).unwrap();
        assert_eq!(toks, vec![Token::Word(0), Token::Prod, Token::Word(1)]);
        assert_eq!(ctx.words.sym(0), Some("x->y"));
    }
}
