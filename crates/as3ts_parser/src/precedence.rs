//! Operator precedence for binary and assignment operators.

use as3ts_scanner::{Token, TokenKind};

/// Operators are punctuators or keyword identifiers, never literals.
fn is_operator_token(token: &Token<'_>) -> bool {
    matches!(token.kind, TokenKind::Identifier | TokenKind::Punctuator)
}

/// Binary operator precedence levels, lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum OperatorPrecedence {
    /// Below every binary operator; the entry level for precedence climbing.
    Lowest = 0,
    LogicalOr = 1,
    LogicalAnd = 2,
    BitwiseOr = 3,
    BitwiseXor = 4,
    BitwiseAnd = 5,
    Equality = 6,
    Relational = 7,
    Shift = 8,
    Additive = 9,
    Multiplicative = 10,
}

/// Get the binary operator precedence of a token, or `None` if the token is
/// not a binary operator.
pub fn binary_operator_precedence(token: &Token<'_>) -> Option<OperatorPrecedence> {
    if !is_operator_token(token) {
        return None;
    }
    let precedence = match token.text {
        "||" => OperatorPrecedence::LogicalOr,
        "&&" => OperatorPrecedence::LogicalAnd,
        "|" => OperatorPrecedence::BitwiseOr,
        "^" => OperatorPrecedence::BitwiseXor,
        "&" => OperatorPrecedence::BitwiseAnd,
        "==" | "!=" | "===" | "!==" => OperatorPrecedence::Equality,
        "<" | ">" | "<=" | ">=" | "is" | "as" | "in" | "instanceof" => {
            OperatorPrecedence::Relational
        }
        "<<" | ">>" | ">>>" => OperatorPrecedence::Shift,
        "+" | "-" => OperatorPrecedence::Additive,
        "*" | "/" | "%" => OperatorPrecedence::Multiplicative,
        _ => return None,
    };
    Some(precedence)
}

/// Whether a token is an assignment operator.
pub fn is_assignment_operator(token: &Token<'_>) -> bool {
    is_operator_token(token)
        && matches!(
            token.text,
            "=" | "+="
                | "-="
                | "*="
                | "/="
                | "%="
                | "&="
                | "|="
                | "^="
                | "<<="
                | ">>="
                | ">>>="
                | "&&="
                | "||="
        )
}

/// Whether a token is a prefix unary operator.
pub fn is_prefix_operator(token: &Token<'_>) -> bool {
    is_operator_token(token)
        && matches!(
            token.text,
            "!" | "-" | "+" | "~" | "++" | "--" | "typeof" | "delete" | "void"
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn punct(text: &str) -> Token<'_> {
        Token::new(TokenKind::Punctuator, text, 0, text.len() as u32)
    }

    #[test]
    fn test_precedence_ordering() {
        let mul = binary_operator_precedence(&punct("*"));
        let add = binary_operator_precedence(&punct("+"));
        let or = binary_operator_precedence(&punct("||"));
        assert!(mul > add);
        assert!(add > or);
        assert!(or > Some(OperatorPrecedence::Lowest));
    }

    #[test]
    fn test_keyword_operators_need_identifier_tokens() {
        let ident = Token::new(TokenKind::Identifier, "instanceof", 0, 10);
        assert_eq!(binary_operator_precedence(&ident), Some(OperatorPrecedence::Relational));
        let string = Token::new(TokenKind::StringLiteral, "in", 0, 2);
        assert_eq!(binary_operator_precedence(&string), None);
    }

    #[test]
    fn test_assignment_operators() {
        assert!(is_assignment_operator(&punct(">>>=")));
        assert!(is_assignment_operator(&punct("=")));
        assert!(!is_assignment_operator(&punct("==")));
    }
}
