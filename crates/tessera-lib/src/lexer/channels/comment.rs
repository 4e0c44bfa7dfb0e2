use crate::lexer::buffer::CodeBuffer;
use crate::lexer::channel::Channel;
use crate::lexer::sink::LexSink;
use crate::syntax::{TokenKind, Trivia};

use super::{is_line_break, splice_len};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Style {
    /// Runs to the end of the logical line.
    Line,
    /// Runs to the close marker.
    Block { end: [char; 2] },
}

/// Recognizes comments and hands them to the sink as comment trivia.
///
/// A line splice may sit between the two characters of the start marker.
#[derive(Debug, Clone, Copy)]
pub struct CommentChannel {
    start: [char; 2],
    style: Style,
}

impl CommentChannel {
    pub fn line(start: [char; 2]) -> Self {
        Self {
            start,
            style: Style::Line,
        }
    }

    pub fn block(start: [char; 2], end: [char; 2]) -> Self {
        Self {
            start,
            style: Style::Block { end },
        }
    }

    /// `// ...`
    pub fn c_line() -> Self {
        Self::line(['/', '/'])
    }

    /// `/* ... */`
    pub fn c_block() -> Self {
        Self::block(['/', '*'], ['*', '/'])
    }

    /// Characters covered by the start marker at the cursor, splices included.
    fn start_len(&self, code: &CodeBuffer) -> Option<usize> {
        if code.peek()? != self.start[0] {
            return None;
        }
        let mut k = 1;
        while let Some(len) = splice_len(code, k) {
            k += len;
        }
        (code.char_at(k)? == self.start[1]).then_some(k + 1)
    }
}

impl Channel for CommentChannel {
    fn consume(&mut self, code: &mut CodeBuffer, sink: &mut LexSink) -> bool {
        let Some(marker) = self.start_len(code) else {
            return false;
        };

        let start = code.checkpoint();
        let mut text = code.take(marker);

        match self.style {
            Style::Line => read_line(code, &mut text),
            Style::Block { end } => {
                if !read_block(code, &mut text, end) {
                    code.restore(start);
                    return false;
                }
            }
        }

        let token = sink.token(TokenKind::COMMENT, text, start, code.offset());
        sink.add_trivia(Trivia::comment(token));
        true
    }
}

fn read_line(code: &mut CodeBuffer, text: &mut String) {
    while let Some(c) = code.peek() {
        if let Some(len) = splice_len(code, 0) {
            text.push_str(&code.take(len));
            continue;
        }
        if is_line_break(c) {
            break;
        }
        text.push(c);
        code.pop();
    }
}

/// One-character lookback: the comment ends when the previous character and
/// the current one spell the close marker.
fn read_block(code: &mut CodeBuffer, text: &mut String, end: [char; 2]) -> bool {
    let mut prev = None;
    while let Some(c) = code.pop() {
        text.push(c);
        if prev == Some(end[0]) && c == end[1] {
            return true;
        }
        prev = Some(c);
    }
    false
}
