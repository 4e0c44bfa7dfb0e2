//! Tokenizing mode: a character buffer drained by prioritized channels.
//!
//! # Architecture
//!
//! [`Lexer::lex`] runs the configured [`CodeFilter`]s, wraps the result in a
//! [`CodeBuffer`] and lets the [`ChannelDispatcher`] drain it into a
//! [`LexSink`]. Channels that recognize comments or whitespace hand the sink
//! trivia instead of tokens; the sink attaches it to the next token. The
//! stream always ends with an `EOF` token, which carries trailing trivia.
//! Registered [`Preprocessor`]s then rewrite the finished stream in order.

mod buffer;
mod channel;
pub mod channels;
mod invariants;
mod preprocessor;
mod preset;
mod sink;

use std::path::Path;

use tessera_core::{Source, SourceId};

use crate::config::{LexerConfig, UnrecognizedCharPolicy};
use crate::syntax::{Token, TokenKind};
use crate::{Error, PassResult};

pub use buffer::{Checkpoint, CodeBuffer, CodeFilter};
pub use channel::{Channel, ChannelDispatcher};
pub use preprocessor::{Preprocessor, PreprocessorAction};
pub use preset::{c_family, c_family_with};
pub use sink::LexSink;

#[cfg(test)]
mod buffer_tests;
#[cfg(test)]
mod dispatcher_tests;

pub struct Lexer {
    config: LexerConfig,
    filters: Vec<Box<dyn CodeFilter>>,
    dispatcher: ChannelDispatcher,
    preprocessors: Vec<Box<dyn Preprocessor>>,
}

impl Lexer {
    pub fn builder() -> LexerBuilder {
        LexerBuilder::default()
    }

    pub fn config(&self) -> &LexerConfig {
        &self.config
    }

    /// Tokenizes `source`. Channel state is reset first.
    pub fn lex(&mut self, source: &str) -> PassResult<Vec<Token>> {
        self.run(source, self.config.source())
    }

    /// Tokenizes a registered source, stamping tokens with its id.
    pub fn lex_source(&mut self, source: Source<'_>) -> PassResult<Vec<Token>> {
        self.run(source.content, source.id)
    }

    fn run(&mut self, source: &str, id: SourceId) -> PassResult<Vec<Token>> {
        self.dispatcher.reset();
        for preprocessor in &mut self.preprocessors {
            preprocessor.init();
        }
        let mut code = CodeBuffer::with_filters(source, self.config.tab_width(), &mut self.filters);
        let mut sink = LexSink::new(id);

        self.dispatcher.consume(&mut code, &mut sink)?;

        let end = code.checkpoint();
        let eof = sink.token(TokenKind::EOF, "", end, end.offset()).into_synthetic();
        let (mut tokens, diagnostics) = sink.finish(eof);
        for pass in &mut self.preprocessors {
            tokens = preprocessor::preprocess(pass.as_mut(), tokens);
        }
        Ok((tokens, diagnostics))
    }

    pub fn lex_file(&mut self, path: impl AsRef<Path>) -> PassResult<Vec<Token>> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|err| Error::Io {
            path: path.display().to_string(),
            message: err.to_string(),
        })?;
        self.lex(&source)
    }
}

#[derive(Default)]
pub struct LexerBuilder {
    config: LexerConfig,
    filters: Vec<Box<dyn CodeFilter>>,
    channels: Vec<Box<dyn Channel>>,
    preprocessors: Vec<Box<dyn Preprocessor>>,
}

impl LexerBuilder {
    pub fn config(mut self, config: LexerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn tab_width(mut self, width: u32) -> Self {
        self.config = self.config.with_tab_width(width);
        self
    }

    pub fn unrecognized(mut self, policy: UnrecognizedCharPolicy) -> Self {
        self.config = self.config.with_unrecognized(policy);
        self
    }

    pub fn source(mut self, source: SourceId) -> Self {
        self.config = self.config.with_source(source);
        self
    }

    pub fn filter(mut self, filter: impl CodeFilter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Appends a channel; earlier channels take priority.
    pub fn channel(mut self, channel: impl Channel + 'static) -> Self {
        self.channels.push(Box::new(channel));
        self
    }

    /// Appends a token-stream pass; passes run in registration order.
    pub fn preprocessor(mut self, preprocessor: impl Preprocessor + 'static) -> Self {
        self.preprocessors.push(Box::new(preprocessor));
        self
    }

    pub fn build(self) -> Lexer {
        Lexer {
            dispatcher: ChannelDispatcher::new(self.channels, self.config.unrecognized()),
            config: self.config,
            filters: self.filters,
            preprocessors: self.preprocessors,
        }
    }
}
