use regex_automata::meta::Regex;

use crate::lexer::buffer::CodeBuffer;
use crate::lexer::channel::Channel;
use crate::lexer::sink::LexSink;
use crate::syntax::TokenKind;
use crate::{Error, Result};

/// Integer and floating literals with digit separators and suffixes.
const C_NUMBER: &str = r"(?:0[xX][0-9a-fA-F']+(?:\.[0-9a-fA-F']*)?(?:[pP][+-]?[0-9]+)?|[0-9][0-9']*(?:\.[0-9']*)?(?:[eE][+-]?[0-9]+)?|\.[0-9][0-9']*(?:[eE][+-]?[0-9]+)?)[a-zA-Z_0-9]*";

/// Emits one token kind for every anchored match of a pattern.
#[derive(Debug, Clone)]
pub struct RegexpChannel {
    kind: TokenKind,
    regex: Regex,
}

impl RegexpChannel {
    pub fn new(kind: TokenKind, pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|err| Error::InvalidPattern {
            pattern: pattern.to_owned(),
            message: err.to_string(),
        })?;
        Ok(Self { kind, regex })
    }

    /// C-family numeric literals as `NUMBER`.
    pub fn c_number() -> Self {
        Self::new(TokenKind::NUMBER, C_NUMBER).expect("C_NUMBER is a valid pattern")
    }
}

impl Channel for RegexpChannel {
    fn consume(&mut self, code: &mut CodeBuffer, sink: &mut LexSink) -> bool {
        let Some(len) = code.match_regex(&self.regex).filter(|&len| len > 0) else {
            return false;
        };
        let start = code.checkpoint();
        let text = code.take(len);
        let token = sink.token(self.kind, text, start, code.offset());
        sink.add_token(token);
        true
    }
}
