use common_framework::Span;

/// One in-flight match attempt.
///
/// `start` is where the attempt began and `end` is how far it has advanced.
/// A frame only ever moves its `end` forward, so `start <= end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    start: usize,
    end: usize,
}

impl Frame {
    pub(crate) fn open(at: usize) -> Self {
        Self { start: at, end: at }
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn span(&self) -> Span {
        Span::new(self.start, self.end)
    }

    /// Number of bytes this frame has consumed.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The text this frame covers.
    pub fn value<'t>(&self, text: &'t str) -> &'t str {
        &text[self.start..self.end]
    }
}

/// Nested transactions over a single input position.
///
/// The effective position is the `end` of the top frame, or `base` when no
/// frame is open. Only the top frame ever advances.
#[derive(Debug, Clone, Default)]
pub struct FrameStack {
    base: usize,
    frames: Vec<Frame>,
}

impl FrameStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current effective position.
    pub fn offset(&self) -> usize {
        self.frames.last().map_or(self.base, |frame| frame.end)
    }

    /// The committed position, outside of any open transaction.
    pub fn base(&self) -> usize {
        self.base
    }

    /// Number of open frames.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn top(&self) -> Option<&Frame> {
        self.frames.last()
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Opens a frame at the current effective position.
    pub fn begin(&mut self) -> Frame {
        let frame = Frame::open(self.offset());
        self.frames.push(frame);
        frame
    }

    /// Closes the top frame and hands its advancement to the parent, or to the
    /// base when it was the outermost frame.
    pub fn commit(&mut self) -> Option<Frame> {
        let frame = self.frames.pop()?;
        match self.frames.last_mut() {
            Some(parent) => parent.end = frame.end,
            None => self.base = frame.end,
        }
        Some(frame)
    }

    /// Discards the top frame. The parent's `end` is untouched, so the
    /// effective position falls back to wherever the parent had reached.
    pub fn rollback(&mut self) -> Option<Frame> {
        self.frames.pop()
    }

    /// Rolls back every frame above `depth`.
    pub fn unwind(&mut self, depth: usize) {
        self.frames.truncate(depth);
    }

    /// Moves the effective position forward by `width` bytes.
    pub(crate) fn advance(&mut self, width: usize) {
        match self.frames.last_mut() {
            Some(frame) => frame.end += width,
            None => self.base += width,
        }
    }

    /// Drops every frame and rewinds to the start of the input.
    pub fn reset(&mut self) {
        self.frames.clear();
        self.base = 0;
    }
}
