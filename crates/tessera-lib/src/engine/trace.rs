//! Observing rule execution.
//!
//! The machine reports rule entry, exit and memo hits to a [`Tracer`].
//! [`NoopTracer`] methods are empty and `#[inline(always)]`, so an untraced
//! parse pays nothing for the hooks.

use tessera_core::Colors;

pub trait Tracer {
    /// A rule starts matching at `index`.
    fn trace_enter(&mut self, rule: &'static str, index: usize);

    /// A rule finished: `end` is where the match ended, `None` on failure.
    fn trace_exit(&mut self, rule: &'static str, index: usize, end: Option<usize>);

    /// A memoized result was reused instead of running the rule.
    fn trace_memo_hit(&mut self, rule: &'static str, index: usize, end: Option<usize>);
}

pub struct NoopTracer;

impl Tracer for NoopTracer {
    #[inline(always)]
    fn trace_enter(&mut self, _rule: &'static str, _index: usize) {}

    #[inline(always)]
    fn trace_exit(&mut self, _rule: &'static str, _index: usize, _end: Option<usize>) {}

    #[inline(always)]
    fn trace_memo_hit(&mut self, _rule: &'static str, _index: usize, _end: Option<usize>) {}
}

/// Collects an indented log of rule calls.
#[derive(Debug, Default)]
pub struct PrintTracer {
    lines: Vec<String>,
    depth: usize,
    colors: Colors,
}

impl PrintTracer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn colored(mut self, value: bool) -> Self {
        self.colors = Colors::new(value);
        self
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn dump(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        out
    }

    pub fn print(&self) {
        for line in &self.lines {
            println!("{line}");
        }
    }

    fn push(&mut self, line: String) {
        let indent = "  ".repeat(self.depth);
        self.lines.push(format!("{indent}{line}"));
    }

    fn outcome(&self, index: usize, end: Option<usize>) -> String {
        let c = &self.colors;
        match end {
            Some(end) => format!("{}{index}..{end}{}", c.green, c.reset),
            None => format!("{}fail{}", c.red, c.reset),
        }
    }
}

impl Tracer for PrintTracer {
    fn trace_enter(&mut self, rule: &'static str, index: usize) {
        let c = self.colors;
        self.push(format!("{}{rule}{} @{index}", c.blue, c.reset));
        self.depth += 1;
    }

    fn trace_exit(&mut self, rule: &'static str, index: usize, end: Option<usize>) {
        self.depth = self.depth.saturating_sub(1);
        let outcome = self.outcome(index, end);
        let c = self.colors;
        self.push(format!("{}{rule}{} = {outcome}", c.dim, c.reset));
    }

    fn trace_memo_hit(&mut self, rule: &'static str, index: usize, end: Option<usize>) {
        let outcome = self.outcome(index, end);
        let c = self.colors;
        self.push(format!("{}{rule}{} @{index} memo = {outcome}", c.dim, c.reset));
    }
}
