use super::{
    keyword::{lookup_word, parse_word},
    symbol::parse_symbol,
    token::{Span, Token, TokenKind},
    whitespace::skip_whitespace,
};

/// Produces tokens lazily, one call at a time.
///
/// The lexer keeps no buffered tokens; it only remembers where in the input
/// it stopped. Once the input is exhausted every further call to
/// [`Lexer::next_token`] yields another [`TokenKind::Eof`] token.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    input: &'a str,
    position: usize,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            position: 0,
            line: 1,   // 1-based
            column: 1, // 1-based
        }
    }

    /// Returns the next token and advances past the characters it matched.
    ///
    /// Characters outside the syntax are reported as [`TokenKind::Illegal`]
    /// tokens holding exactly one character; the lexer itself never fails.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let remaining = &self.input[self.position..];
        let Some(first) = remaining.chars().next() else {
            return Token::new(TokenKind::Eof, "", self.span_to(self.position));
        };

        let (kind, literal) = if let Ok((rest, kind)) = parse_symbol(remaining) {
            (kind, &remaining[..remaining.len() - rest.len()])
        } else if let Ok((_, word)) = parse_word(remaining) {
            (lookup_word(word), word)
        } else {
            (TokenKind::Illegal, &remaining[..first.len_utf8()])
        };

        let span = self.span_to(self.position + literal.len());
        self.advance(literal);
        tracing::trace!("lexed {} {:?} at {}", kind, literal, span);

        Token::new(kind, literal, span)
    }

    /// Lexes the whole input, including the final end-of-input token.
    pub fn tokenize(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let done = token.is_eof();
            tokens.push(token);
            if done {
                return tokens;
            }
        }
    }

    fn skip_whitespace(&mut self) {
        let remaining = &self.input[self.position..];
        if let Ok((_, skipped)) = skip_whitespace(remaining) {
            self.advance(skipped);
        }
    }

    fn span_to(&self, end: usize) -> Span {
        Span {
            start: self.position,
            end,
            line: self.line,
            column: self.column,
        }
    }

    fn advance(&mut self, text: &str) {
        for c in text.chars() {
            self.position += c.len_utf8();
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
    }
}
