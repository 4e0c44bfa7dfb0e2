use crate::lexer::buffer::CodeBuffer;
use crate::lexer::channel::Channel;
use crate::lexer::sink::LexSink;

use super::splice_len;

/// Swallows `\` + optional blanks + line break, joining physical lines.
#[derive(Debug, Default, Clone, Copy)]
pub struct BackslashChannel;

impl Channel for BackslashChannel {
    fn consume(&mut self, code: &mut CodeBuffer, _sink: &mut LexSink) -> bool {
        match splice_len(code, 0) {
            Some(len) => {
                code.skip(len);
                true
            }
            None => false,
        }
    }
}
