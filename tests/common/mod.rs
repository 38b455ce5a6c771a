//! Test utilities for the tidypaste test suite.

use kuchiki::traits::TendrilSink;

use tidypaste::{Delta, Editor, Op, Range, Source, ToolbarControl};

/// Placeholder character standing in for an embedded object.
#[allow(dead_code)]
pub const EMBED_CHAR: char = '\u{FFFC}';

/// A scriptable in-memory editor that records everything the paste
/// pipeline does to it.
pub struct MockEditor {
    enabled: bool,
    selection: Option<Range>,
    doc: Vec<char>,
    controls: Vec<ToolbarControl>,
    pub applied: Vec<(Delta, Source)>,
    pub embeds: Vec<(usize, String, String)>,
    pub selections: Vec<(usize, usize, Source)>,
    pub scroll_count: usize,
}

#[allow(dead_code)]
impl MockEditor {
    pub fn new(contents: &str) -> Self {
        Self {
            enabled: true,
            selection: Some(Range::cursor(0)),
            doc: contents.chars().collect(),
            controls: Vec::new(),
            applied: Vec::new(),
            embeds: Vec::new(),
            selections: Vec::new(),
            scroll_count: 0,
        }
    }

    pub fn disabled(contents: &str) -> Self {
        let mut editor = Self::new(contents);
        editor.enabled = false;
        editor
    }

    pub fn select(mut self, index: usize, length: usize) -> Self {
        self.selection = Some(Range::new(index, length));
        self
    }

    pub fn without_selection(mut self) -> Self {
        self.selection = None;
        self
    }

    pub fn with_controls(mut self, controls: Vec<ToolbarControl>) -> Self {
        self.controls = controls;
        self
    }

    pub fn contents(&self) -> String {
        self.doc.iter().collect()
    }

    pub fn last_selection(&self) -> Option<(usize, usize, Source)> {
        self.selections.last().copied()
    }

    fn apply(&mut self, delta: &Delta) {
        let mut pos = 0usize;
        for op in delta.ops() {
            match op {
                Op::Retain(n) => pos += n,
                Op::Delete(n) => {
                    let end = (pos + n).min(self.doc.len());
                    self.doc.drain(pos..end);
                }
                Op::Insert { text, .. } => {
                    for ch in text.chars() {
                        self.doc.insert(pos, ch);
                        pos += 1;
                    }
                }
                Op::InsertEmbed { .. } => {
                    self.doc.insert(pos, EMBED_CHAR);
                    pos += 1;
                }
            }
        }
    }
}

impl Editor for MockEditor {
    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn get_selection(&self) -> Option<Range> {
        self.selection
    }

    fn get_text(&self, index: usize, length: usize) -> String {
        let end = (index + length).min(self.doc.len());
        self.doc[index.min(self.doc.len())..end].iter().collect()
    }

    fn convert(&self, html: &str) -> Delta {
        // Text-only conversion is enough for assertions about indices and
        // document text.
        let document = kuchiki::parse_html().one(html.to_string());
        let text = document.text_contents();
        Delta::new().insert(text)
    }

    fn update_contents(&mut self, delta: Delta, source: Source) {
        self.apply(&delta);
        self.applied.push((delta, source));
    }

    fn set_selection(&mut self, index: usize, length: usize, source: Source) {
        self.selection = Some(Range::new(index, length));
        self.selections.push((index, length, source));
    }

    fn insert_embed(&mut self, index: usize, kind: &str, value: &str, source: Source) {
        self.doc.insert(index.min(self.doc.len()), EMBED_CHAR);
        self.embeds
            .push((index, kind.to_string(), value.to_string()));
        let _ = source;
    }

    fn scroll_selection_into_view(&mut self) {
        self.scroll_count += 1;
    }

    fn toolbar_controls(&self) -> Vec<ToolbarControl> {
        self.controls.clone()
    }
}
