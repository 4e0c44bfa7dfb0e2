//! The channel contract and the ordered dispatcher over channels.

use crate::config::UnrecognizedCharPolicy;
use crate::diagnostics::DiagnosticKind;
use crate::syntax::text_range;
use crate::{Error, Result};

use super::buffer::CodeBuffer;
use super::invariants::ensure_untouched;
use super::sink::LexSink;

/// Recognizer for one lexical construct.
///
/// `consume` either recognizes a construct at the cursor, feeds the sink and
/// returns `true`, or returns `false` with the buffer untouched.
pub trait Channel: Send {
    fn consume(&mut self, code: &mut CodeBuffer, sink: &mut LexSink) -> bool;

    /// Clears per-file state. Called before each lexing run.
    fn reset(&mut self) {}
}

/// Tries channels in priority order at every position.
///
/// After a channel consumes input the dispatcher starts again from the
/// first channel. A channel that reports success without consuming does not
/// restart the loop; the next channel gets its turn at the same position.
pub struct ChannelDispatcher {
    channels: Vec<Box<dyn Channel>>,
    policy: UnrecognizedCharPolicy,
}

impl ChannelDispatcher {
    pub fn new(channels: Vec<Box<dyn Channel>>, policy: UnrecognizedCharPolicy) -> Self {
        Self { channels, policy }
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    pub fn policy(&self) -> UnrecognizedCharPolicy {
        self.policy
    }

    pub fn reset(&mut self) {
        for channel in &mut self.channels {
            channel.reset();
        }
    }

    /// Runs until the buffer is exhausted.
    pub fn consume(&mut self, code: &mut CodeBuffer, sink: &mut LexSink) -> Result<()> {
        while let Some(c) = code.peek() {
            if !self.dispatch_once(code, sink) {
                self.unrecognized(c, code, sink)?;
            }
        }
        Ok(())
    }

    fn dispatch_once(&mut self, code: &mut CodeBuffer, sink: &mut LexSink) -> bool {
        let before = code.offset();
        for (idx, channel) in self.channels.iter_mut().enumerate() {
            if channel.consume(code, sink) {
                if code.offset() > before {
                    return true;
                }
            } else {
                ensure_untouched(before, code, idx);
            }
        }
        false
    }

    fn unrecognized(&self, c: char, code: &mut CodeBuffer, sink: &mut LexSink) -> Result<()> {
        let offset = code.offset();
        match self.policy {
            UnrecognizedCharPolicy::Fail => {
                return Err(Error::UnrecognizedCharacter {
                    ch: c,
                    offset,
                    position: code.position(),
                });
            }
            UnrecognizedCharPolicy::Skip => {}
            UnrecognizedCharPolicy::Report => {
                sink.diagnostics_mut()
                    .report(DiagnosticKind::UnrecognizedCharacter, text_range(offset, offset + 1))
                    .message(format!("{c:?}"))
                    .emit();
            }
        }
        code.pop();
        Ok(())
    }
}
