//! Line cursor with pushback.

/// Iterator adapter that lets the consumer put lines back
///
/// **Public** - the trace parser reads ahead one line when absorbing a
/// multi-line return value and pushes back the line that ends it
pub struct LineCursor<I: Iterator> {
    lines: I,
    pushed: Vec<I::Item>,
}

impl<I: Iterator> LineCursor<I> {
    pub fn new(lines: I) -> Self {
        Self {
            lines,
            pushed: Vec::new(),
        }
    }

    /// Put `line` back so the next call to `next` yields it again
    pub fn push_back(&mut self, line: I::Item) {
        self.pushed.push(line);
    }

    /// Look at the next line without consuming it
    pub fn peek(&mut self) -> Option<&I::Item> {
        if self.pushed.is_empty() {
            let line = self.lines.next()?;
            self.pushed.push(line);
        }
        self.pushed.last()
    }
}

impl<I: Iterator> Iterator for LineCursor<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        self.pushed.pop().or_else(|| self.lines.next())
    }
}
