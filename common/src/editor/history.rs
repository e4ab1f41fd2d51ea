/// Linear undo/redo history of full text snapshots.
///
/// Recording a new snapshot after an undo discards the redo branch.
#[derive(Debug, Clone)]
pub struct TextHistory {
    entries: Vec<String>,
    index: usize,
}

impl Default for TextHistory {
    fn default() -> Self {
        Self::new(String::new())
    }
}

impl TextHistory {
    pub fn new(initial: String) -> Self {
        Self {
            entries: vec![initial],
            index: 0,
        }
    }

    pub fn current(&self) -> &str {
        &self.entries[self.index]
    }

    /// Records `text` unless it equals the current snapshot.
    pub fn record(&mut self, text: String) {
        if self.current() == text {
            return;
        }
        self.entries.truncate(self.index + 1);
        self.entries.push(text);
        self.index = self.entries.len() - 1;
    }

    pub fn undo(&mut self) -> Option<&str> {
        if self.index == 0 {
            return None;
        }
        self.index -= 1;
        Some(self.current())
    }

    pub fn redo(&mut self) -> Option<&str> {
        if self.index + 1 >= self.entries.len() {
            return None;
        }
        self.index += 1;
        Some(self.current())
    }
}
