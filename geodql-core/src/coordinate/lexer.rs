//! Tokenizer for coordinate text.
//!
//! Positions are zero-based character offsets, so multi-byte glyphs such as
//! `°` or `′` count as one column.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Integer,
    Float,
    Minus,
    Colon,
    /// `°`
    Degree,
    /// `'` or `′`
    Apostrophe,
    /// `"` or `″`
    Quote,
    /// `N` or `S`, either case.
    CardinalLatitude,
    /// `E` or `W`, either case.
    CardinalLongitude,
    Unknown,
    End,
}

impl TokenKind {
    pub const fn name(self) -> &'static str {
        match self {
            TokenKind::Integer => "T_INTEGER",
            TokenKind::Float => "T_FLOAT",
            TokenKind::Minus => "T_MINUS",
            TokenKind::Colon => "T_COLON",
            TokenKind::Degree => "T_DEGREE",
            TokenKind::Apostrophe => "T_APOSTROPHE",
            TokenKind::Quote => "T_QUOTE",
            TokenKind::CardinalLatitude => "T_CARDINAL_LAT",
            TokenKind::CardinalLongitude => "T_CARDINAL_LON",
            TokenKind::Unknown => "T_NONE",
            TokenKind::End => "T_END",
        }
    }

    pub const fn is_number(self) -> bool {
        matches!(self, TokenKind::Integer | TokenKind::Float)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub position: usize,
}

/// Split `input` into tokens, skipping whitespace. The last token is always
/// [`TokenKind::End`], positioned one past the final character.
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().enumerate().peekable();

    while let Some((position, (start, c))) = chars.next() {
        if c.is_whitespace() {
            continue;
        }

        let kind = match c {
            '0'..='9' => {
                let mut end = start + c.len_utf8();
                let mut kind = TokenKind::Integer;
                while let Some(&(_, (i, d))) = chars.peek() {
                    if !d.is_ascii_digit() {
                        break;
                    }
                    end = i + d.len_utf8();
                    chars.next();
                }
                // A fraction needs at least one digit after the point.
                let mut lookahead = chars.clone().map(|(_, (_, c))| c);
                if lookahead.next() == Some('.')
                    && lookahead.next().is_some_and(|d| d.is_ascii_digit())
                {
                    kind = TokenKind::Float;
                    chars.next();
                    while let Some(&(_, (i, d))) = chars.peek() {
                        if !d.is_ascii_digit() {
                            break;
                        }
                        end = i + d.len_utf8();
                        chars.next();
                    }
                }
                tokens.push(Token {
                    kind,
                    text: &input[start..end],
                    position,
                });
                continue;
            }
            '-' => TokenKind::Minus,
            ':' => TokenKind::Colon,
            '°' => TokenKind::Degree,
            '\'' | '′' => TokenKind::Apostrophe,
            '"' | '″' => TokenKind::Quote,
            'N' | 'S' | 'n' | 's' => TokenKind::CardinalLatitude,
            'E' | 'W' | 'e' | 'w' => TokenKind::CardinalLongitude,
            _ => TokenKind::Unknown,
        };
        tokens.push(Token {
            kind,
            text: &input[start..start + c.len_utf8()],
            position,
        });
    }

    tokens.push(Token {
        kind: TokenKind::End,
        text: "",
        position: input.chars().count(),
    });
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn colon_form() {
        use TokenKind::*;
        assert_eq!(
            kinds("79:56:55W"),
            vec![Integer, Colon, Integer, Colon, Integer, CardinalLongitude, End]
        );
    }

    #[test]
    fn glyph_form_with_whitespace() {
        use TokenKind::*;
        assert_eq!(
            kinds("40° 26′ 46.5″ n"),
            vec![Integer, Degree, Integer, Apostrophe, Float, Quote, CardinalLatitude, End]
        );
    }

    #[test]
    fn positions_count_characters_not_bytes() {
        let tokens = tokenize("40°26'46\"N");
        let positions: Vec<usize> = tokens.iter().map(|t| t.position).collect();
        assert_eq!(positions, vec![0, 2, 3, 5, 6, 8, 9, 10]);
        assert_eq!(tokens[4].text, "46");
    }

    #[test]
    fn float_requires_fraction_digits() {
        use TokenKind::*;
        assert_eq!(kinds("12.75"), vec![Float, End]);
        assert_eq!(kinds("12."), vec![Integer, Unknown, End]);
        assert_eq!(kinds("-0.5"), vec![Minus, Float, End]);
        assert_eq!(kinds("1.5.2"), vec![Float, Unknown, Integer, End]);
        assert_eq!(tokenize("46.543N")[0].text, "46.543");
    }

    #[test]
    fn unknown_characters_are_single_tokens() {
        let tokens = tokenize("84:26:46Q");
        let q = tokens[5];
        assert_eq!(q.kind, TokenKind::Unknown);
        assert_eq!(q.text, "Q");
        assert_eq!(q.position, 8);
    }

    #[test]
    fn end_token_follows_last_character() {
        let tokens = tokenize("  ");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::End);
        assert_eq!(tokens[0].position, 2);
    }
}
