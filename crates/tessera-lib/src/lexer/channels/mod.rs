//! Concrete channels for C-family sources.

mod angle;
mod backslash;
mod comment;
mod identifier;
mod literal;
mod misc;
mod preprocessor;
mod punctuator;
mod regexp;
mod whitespace;

use super::buffer::CodeBuffer;

pub use angle::RightAngleBracketChannel;
pub use backslash::BackslashChannel;
pub use comment::CommentChannel;
pub use identifier::IdentifierChannel;
pub use literal::LiteralChannel;
pub use misc::{BomChannel, UnknownCharacterChannel};
pub use preprocessor::{PreprocessorChannel, directives};
pub use punctuator::PunctuatorChannel;
pub use regexp::RegexpChannel;
pub use whitespace::WhitespaceChannel;

#[cfg(test)]
mod literal_tests;

/// Length of a line splice (`\`, trailing blanks, line break) starting `at`
/// characters ahead of the cursor.
pub(crate) fn splice_len(code: &CodeBuffer, at: usize) -> Option<usize> {
    if code.char_at(at)? != '\\' {
        return None;
    }
    let mut k = at + 1;
    while matches!(code.char_at(k), Some(' ' | '\t' | '\u{000B}' | '\u{000C}')) {
        k += 1;
    }
    match code.char_at(k)? {
        '\r' if code.char_at(k + 1) == Some('\n') => Some(k + 2 - at),
        '\r' | '\n' => Some(k + 1 - at),
        _ => None,
    }
}

pub(crate) fn is_line_break(c: char) -> bool {
    c == '\n' || c == '\r'
}
