//! Registry of sources taking part in one front-end session.

/// Lightweight handle to a source in a [`SourceMap`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, serde::Serialize)]
pub struct SourceId(u32);

impl SourceId {
    pub fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u32 {
        self.0
    }
}

/// Describes the origin of a source.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum SourceKind {
    /// Text handed over directly (tests, editors, generated code).
    Inline,
    /// A file with its path.
    File(String),
}

impl SourceKind {
    /// Returns the display name for diagnostics.
    pub fn display_name(&self) -> &str {
        match self {
            SourceKind::Inline => "<input>",
            SourceKind::File(path) => path,
        }
    }
}

/// A borrowed view of a source: id, kind, and content.
#[derive(Clone, Copy, Debug)]
pub struct Source<'m> {
    pub id: SourceId,
    pub kind: &'m SourceKind,
    pub content: &'m str,
}

#[derive(Clone, Debug)]
struct SourceEntry {
    kind: SourceKind,
    content: String,
}

#[derive(Clone, Debug, Default)]
pub struct SourceMap {
    entries: Vec<SourceEntry>,
}

impl SourceMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_inline(&mut self, content: impl Into<String>) -> SourceId {
        self.push_entry(SourceKind::Inline, content.into())
    }

    pub fn add_file(&mut self, path: impl Into<String>, content: impl Into<String>) -> SourceId {
        self.push_entry(SourceKind::File(path.into()), content.into())
    }

    pub fn get(&self, id: SourceId) -> Option<Source<'_>> {
        self.entries.get(id.0 as usize).map(|entry| Source {
            id,
            kind: &entry.kind,
            content: &entry.content,
        })
    }

    pub fn content(&self, id: SourceId) -> Option<&str> {
        self.get(id).map(|s| s.content)
    }

    /// File path if this source is a file.
    pub fn path(&self, id: SourceId) -> Option<&str> {
        match self.get(id)?.kind {
            SourceKind::File(path) => Some(path),
            SourceKind::Inline => None,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Source<'_>> {
        self.entries
            .iter()
            .enumerate()
            .map(|(idx, entry)| Source {
                id: SourceId(idx as u32),
                kind: &entry.kind,
                content: &entry.content,
            })
    }

    fn push_entry(&mut self, kind: SourceKind, content: String) -> SourceId {
        let id = SourceId(self.entries.len() as u32);
        self.entries.push(SourceEntry { kind, content });
        id
    }
}
