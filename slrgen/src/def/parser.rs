use super::lexer::Token;
use chumsky::prelude::*;

/// One non-blank line of a grammar definition file.
#[derive(Debug, Clone, PartialEq)]
pub enum Line {
    /// `%terminals w1 w2 ...`
    Terminals(Vec<usize>),
    /// `%nonterminals w1 w2 ...`
    Nonterminals(Vec<usize>),
    /// `%start w`
    Start(usize),
    /// `lhs -> w1 w2 ...`; the right-hand side may be empty here and is
    /// rejected when the grammar is loaded.
    Rule(usize, Vec<usize>),
}

/// Parses the tokens of a single line (without its line feed).
pub fn line<'a>() -> impl Parser<'a, &'a [Token], Line> {
    let word = select! {
        Token::Word(w) => w.clone(),
    };

    let words = word.clone().repeated().collect::<Vec<_>>();

    let terminals = select! { Token::Terminals => () }
        .ignore_then(words.clone())
        .map(Line::Terminals);

    let nonterminals = select! { Token::Nonterminals => () }
        .ignore_then(words.clone())
        .map(Line::Nonterminals);

    let start = select! { Token::Start => () }
        .ignore_then(word.clone())
        .map(Line::Start);

    let prod_kw = select! { Token::Prod => () };

    let rule = word
        .then_ignore(prod_kw)
        .then(words)
        .map(|(lhs, rhs)| Line::Rule(lhs, rhs));

    terminals
        .or(nonterminals)
        .or(start)
        .or(rule)
        .then_ignore(end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_line() {
        let tokens = vec![Token::Word(1), Token::Prod, Token::Word(2), Token::Word(3)];
        let parsed = line().parse(&tokens).into_result().unwrap();
        assert_eq!(parsed, Line::Rule(1, vec![2, 3]));
    }

    #[test]
    fn rule_with_empty_rhs_parses() {
        let tokens = vec![Token::Word(0), Token::Prod];
        let parsed = line().parse(&tokens).into_result().unwrap();
        assert_eq!(parsed, Line::Rule(0, vec![]));
    }

    #[test]
    fn directive_lines() {
        let tokens = vec![Token::Terminals, Token::Word(4), Token::Word(5)];
        assert_eq!(line().parse(&tokens).into_result().unwrap(), Line::Terminals(vec![4, 5]));
        let tokens = vec![Token::Nonterminals];
        assert_eq!(line().parse(&tokens).into_result().unwrap(), Line::Nonterminals(vec![]));
        let tokens = vec![Token::Start, Token::Word(7)];
        assert_eq!(line().parse(&tokens).into_result().unwrap(), Line::Start(7));
    }

    #[test]
    fn malformed_lines_fail() {
        let bad = [
            vec![Token::Word(0), Token::Word(1)],
            vec![Token::Start],
            vec![Token::Start, Token::Word(0), Token::Word(1)],
            vec![Token::Prod, Token::Word(0)],
            vec![Token::Word(0), Token::Prod, Token::Prod],
        ];
        for tokens in bad {
            assert!(line().parse(&tokens).into_result().is_err(), "{tokens:?}");
        }
    }
}
