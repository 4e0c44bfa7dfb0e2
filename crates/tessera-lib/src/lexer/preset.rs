//! Ready-made channel order for C-family sources.

use super::LexerBuilder;
use super::channels::{
    BackslashChannel, BomChannel, CommentChannel, IdentifierChannel, LiteralChannel,
    PreprocessorChannel, PunctuatorChannel, RegexpChannel, RightAngleBracketChannel,
    WhitespaceChannel,
};
use super::Lexer;

/// Builder preloaded with the C-family channels in priority order.
///
/// Channels appended afterwards run after the built-in ones.
pub fn c_family() -> LexerBuilder {
    c_family_with(IdentifierChannel::new())
}

/// Same as [`c_family`] with a custom identifier channel, typically one with keywords.
pub fn c_family_with(identifiers: IdentifierChannel) -> LexerBuilder {
    Lexer::builder()
        .channel(BomChannel)
        .channel(WhitespaceChannel::new())
        .channel(CommentChannel::c_line())
        .channel(CommentChannel::c_block())
        .channel(BackslashChannel)
        .channel(PreprocessorChannel::new())
        .channel(LiteralChannel::character())
        .channel(LiteralChannel::string())
        .channel(RegexpChannel::c_number())
        .channel(identifiers)
        .channel(RightAngleBracketChannel::new())
        .channel(PunctuatorChannel::c_family())
}
