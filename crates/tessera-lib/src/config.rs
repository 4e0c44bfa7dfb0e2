//! Lexer and parser settings.
//!
//! Both are small `Copy` values built with `with_*` methods on top of
//! [`Default`].

use tessera_core::SourceId;

/// Default nesting limit for rule calls.
pub const DEFAULT_RECURSION_FUEL: u32 = 1024;

/// What the dispatcher does with a character no channel accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnrecognizedCharPolicy {
    /// Abort lexing with [`crate::Error::UnrecognizedCharacter`].
    #[default]
    Fail,
    /// Drop the character silently.
    Skip,
    /// Drop the character and record a warning diagnostic.
    Report,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexerConfig {
    tab_width: u32,
    unrecognized: UnrecognizedCharPolicy,
    source: SourceId,
}

impl Default for LexerConfig {
    fn default() -> Self {
        Self {
            tab_width: 1,
            unrecognized: UnrecognizedCharPolicy::default(),
            source: SourceId::default(),
        }
    }
}

impl LexerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Columns a tab advances the cursor by. Zero is treated as one.
    pub fn with_tab_width(mut self, width: u32) -> Self {
        self.tab_width = width.max(1);
        self
    }

    pub fn with_unrecognized(mut self, policy: UnrecognizedCharPolicy) -> Self {
        self.unrecognized = policy;
        self
    }

    /// Source id stamped on every produced token.
    pub fn with_source(mut self, source: SourceId) -> Self {
        self.source = source;
        self
    }

    pub fn tab_width(&self) -> u32 {
        self.tab_width
    }

    pub fn unrecognized(&self) -> UnrecognizedCharPolicy {
        self.unrecognized
    }

    pub fn source(&self) -> SourceId {
        self.source
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    exec_fuel: Option<u32>,
    recursion_fuel: Option<u32>,
    tab_width: u32,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            exec_fuel: None,
            recursion_fuel: Some(DEFAULT_RECURSION_FUEL),
            tab_width: 1,
        }
    }
}

impl ParserConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Maximum matcher steps per parse. `None` is unlimited.
    pub fn with_exec_fuel(mut self, limit: Option<u32>) -> Self {
        self.exec_fuel = limit;
        self
    }

    /// Maximum depth of nested rule calls. `None` is unlimited.
    pub fn with_recursion_fuel(mut self, limit: Option<u32>) -> Self {
        self.recursion_fuel = limit;
        self
    }

    /// Columns a tab counts for in failure positions of a text parse.
    /// Zero is treated as one.
    pub fn with_tab_width(mut self, width: u32) -> Self {
        self.tab_width = width.max(1);
        self
    }

    pub fn exec_fuel(&self) -> Option<u32> {
        self.exec_fuel
    }

    pub fn recursion_fuel(&self) -> Option<u32> {
        self.recursion_fuel
    }

    pub fn tab_width(&self) -> u32 {
        self.tab_width
    }
}
