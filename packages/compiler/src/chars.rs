/*
 * Character Codes
 *
 * Characters recognized by the attribute value scanner.
 */
#![allow(non_upper_case_globals)]

//! Character constants used by the attribute splitter

pub const NEWLINE: char = '\n';

// Punctuation
pub const BANG: char = '!';
pub const DQ: char = '"';
pub const DOLLAR: char = '$';
pub const SQ: char = '\'';
pub const MINUS: char = '-';
pub const SEMICOLON: char = ';';
pub const LT: char = '<';
pub const EQ: char = '=';
pub const GT: char = '>';
pub const BACKSLASH: char = '\\';
pub const UNDERSCORE: char = '_';
pub const BT: char = '`';

// Letters and digits
pub const a: char = 'a';
pub const z: char = 'z';
pub const A: char = 'A';
pub const Z: char = 'Z';
pub const ZERO: char = '0';
pub const NINE: char = '9';

/// Check if character is a digit
pub fn is_digit(ch: char) -> bool {
    ch >= ZERO && ch <= NINE
}

/// Check if character is ASCII letter
pub fn is_ascii_letter(ch: char) -> bool {
    (ch >= a && ch <= z) || (ch >= A && ch <= Z)
}

/// Check if character opens a quoted section of an attribute value
pub fn is_quote(ch: char) -> bool {
    ch == SQ || ch == DQ || ch == BT
}

/// Characters that turn a following `=` into part of an operator (`!=`, `<=`, `>=`, `==`)
pub fn is_operator_prefix(ch: char) -> bool {
    ch == BANG || ch == LT || ch == GT || ch == EQ
}

/// Check if character can start a field name
pub fn is_identifier_start(ch: char) -> bool {
    is_ascii_letter(ch) || ch == UNDERSCORE || ch == DOLLAR
}

/// Check if character can be part of a field name. Dashes are allowed so
/// that dash-case names survive until `remove_dashes` rewrites them.
pub fn is_identifier_part(ch: char) -> bool {
    is_identifier_start(ch) || is_digit(ch) || ch == MINUS
}
