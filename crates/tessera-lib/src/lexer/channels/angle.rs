use crate::lexer::buffer::CodeBuffer;
use crate::lexer::channel::Channel;
use crate::lexer::sink::LexSink;
use crate::syntax::TokenKind;

/// Splits `>>` that closes nested template argument lists.
///
/// Observes `<`, `(`, `)` and `;` without consuming them. Consumes a `>` only
/// when it closes an open angle bracket outside parentheses, is not part of
/// `>=`, and is not a dangling `>>` at the outermost level.
#[derive(Debug, Clone, Copy)]
pub struct RightAngleBracketChannel {
    angle_level: u32,
    paren_level: u32,
    kind: TokenKind,
}

impl Default for RightAngleBracketChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl RightAngleBracketChannel {
    pub fn new() -> Self {
        Self {
            angle_level: 0,
            paren_level: 0,
            kind: TokenKind::GT,
        }
    }

    pub fn with_kind(mut self, kind: TokenKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn angle_level(&self) -> u32 {
        self.angle_level
    }

    pub fn paren_level(&self) -> u32 {
        self.paren_level
    }
}

impl Channel for RightAngleBracketChannel {
    fn consume(&mut self, code: &mut CodeBuffer, sink: &mut LexSink) -> bool {
        let Some(c) = code.peek() else {
            return false;
        };
        let next = code.char_at(1);

        match c {
            '(' if self.angle_level > 0 => self.paren_level += 1,
            ')' if self.paren_level > 0 => self.paren_level -= 1,
            '<' if self.paren_level == 0 && !matches!(next, Some('<' | '=')) => {
                self.angle_level += 1;
            }
            '>' if self.angle_level > 0 && self.paren_level == 0 => {
                let dangling = next == Some('>') && self.angle_level == 1;
                if next != Some('=') && !dangling {
                    let start = code.checkpoint();
                    code.pop();
                    let token = sink.token(self.kind, ">", start, code.offset());
                    sink.add_token(token);
                    self.angle_level -= 1;
                    return true;
                }
            }
            ';' => {
                self.angle_level = 0;
                self.paren_level = 0;
            }
            _ => {}
        }
        false
    }

    fn reset(&mut self) {
        self.angle_level = 0;
        self.paren_level = 0;
    }
}
