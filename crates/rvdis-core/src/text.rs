//! Tokenized instruction text.

use std::fmt;

/// Display category of a text token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TokenKind {
    Mnemonic,
    Register,
    Separator,
    IntegerLiteral,
    MemoryOperandBegin,
    MemoryOperandEnd,
    Address,
}

/// One piece of rendered instruction text.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    /// Numeric value for integer and address tokens.
    pub value: Option<i64>,
}

impl Token {
    pub fn mnemonic(text: impl Into<String>) -> Self {
        Self::plain(TokenKind::Mnemonic, text)
    }

    pub fn register(name: impl Into<String>) -> Self {
        Self::plain(TokenKind::Register, name)
    }

    pub fn separator(text: impl Into<String>) -> Self {
        Self::plain(TokenKind::Separator, text)
    }

    /// Signed integer rendered in hex, e.g. `0x10` or `-0x10`.
    pub fn integer(value: i64) -> Self {
        let text = if value < 0 {
            format!("-{:#x}", value.unsigned_abs())
        } else {
            format!("{:#x}", value)
        };
        Self {
            kind: TokenKind::IntegerLiteral,
            text,
            value: Some(value),
        }
    }

    /// Code address rendered in hex.
    pub fn address(target: u64) -> Self {
        Self {
            kind: TokenKind::Address,
            text: format!("{:#x}", target),
            value: Some(target as i64),
        }
    }

    pub fn memory_begin() -> Self {
        Self::plain(TokenKind::MemoryOperandBegin, "(")
    }

    pub fn memory_end() -> Self {
        Self::plain(TokenKind::MemoryOperandEnd, ")")
    }

    fn plain(kind: TokenKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            value: None,
        }
    }
}

/// Rendered instruction: ordered tokens plus byte length.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InstructionText {
    pub tokens: Vec<Token>,
    pub length: usize,
}

impl InstructionText {
    /// Returns the mnemonic token's text.
    pub fn mnemonic(&self) -> Option<&str> {
        self.tokens
            .iter()
            .find(|t| t.kind == TokenKind::Mnemonic)
            .map(|t| t.text.as_str())
    }

    /// Returns all tokens after the mnemonic.
    pub fn operands(&self) -> &[Token] {
        self.tokens.get(1..).unwrap_or(&[])
    }
}

impl fmt::Display for InstructionText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in &self.tokens {
            f.write_str(&token.text)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_text() {
        assert_eq!(Token::integer(0).text, "0x0");
        assert_eq!(Token::integer(16).text, "0x10");
        assert_eq!(Token::integer(-16).text, "-0x10");
        assert_eq!(Token::integer(i64::MIN).text, "-0x8000000000000000");
        assert_eq!(Token::integer(-2048).value, Some(-2048));
    }

    #[test]
    fn test_display_concatenates() {
        let text = InstructionText {
            tokens: vec![
                Token::mnemonic("lw"),
                Token::separator(" "),
                Token::register("a0"),
                Token::separator(", "),
                Token::integer(8),
                Token::memory_begin(),
                Token::register("sp"),
                Token::memory_end(),
            ],
            length: 4,
        };
        assert_eq!(text.to_string(), "lw a0, 0x8(sp)");
        assert_eq!(text.mnemonic(), Some("lw"));
        assert_eq!(text.operands().len(), 7);
        assert_eq!(Token::address(0x2000).kind, TokenKind::Address);
        assert!(InstructionText::default().operands().is_empty());
    }
}
