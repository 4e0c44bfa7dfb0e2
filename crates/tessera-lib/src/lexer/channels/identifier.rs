use std::collections::HashMap;

use crate::lexer::buffer::CodeBuffer;
use crate::lexer::channel::Channel;
use crate::lexer::sink::LexSink;
use crate::syntax::TokenKind;

/// Identifiers, with a keyword table deciding the kind.
#[derive(Debug, Clone)]
pub struct IdentifierChannel {
    keywords: HashMap<String, TokenKind>,
    case_sensitive: bool,
}

impl Default for IdentifierChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentifierChannel {
    pub fn new() -> Self {
        Self {
            keywords: HashMap::new(),
            case_sensitive: true,
        }
    }

    pub fn keyword(mut self, word: &str, kind: TokenKind) -> Self {
        let key = self.normalize(word);
        self.keywords.insert(key, kind);
        self
    }

    /// Registers each word with the generic `KEYWORD` kind.
    pub fn keywords(self, words: &[&str]) -> Self {
        words
            .iter()
            .fold(self, |channel, word| channel.keyword(word, TokenKind::KEYWORD))
    }

    /// Matches keywords regardless of case. Applies to words added afterwards.
    pub fn case_insensitive(mut self) -> Self {
        self.case_sensitive = false;
        self
    }

    fn normalize(&self, word: &str) -> String {
        if self.case_sensitive {
            word.to_owned()
        } else {
            word.to_lowercase()
        }
    }
}

fn is_start(c: char) -> bool {
    c == '_' || c.is_alphabetic()
}

fn is_part(c: char) -> bool {
    c == '_' || c.is_alphanumeric()
}

impl Channel for IdentifierChannel {
    fn consume(&mut self, code: &mut CodeBuffer, sink: &mut LexSink) -> bool {
        if !code.peek().is_some_and(is_start) {
            return false;
        }

        let start = code.checkpoint();
        let mut text = String::new();
        while let Some(c) = code.peek().filter(|c| is_part(*c)) {
            text.push(c);
            code.pop();
        }

        let kind = self
            .keywords
            .get(&self.normalize(&text))
            .copied()
            .unwrap_or(TokenKind::IDENTIFIER);
        let token = sink.token(kind, text, start, code.offset());
        sink.add_token(token);
        true
    }
}
