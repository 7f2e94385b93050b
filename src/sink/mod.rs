//! # Byte Sinks
//!
//! The converter emits a stream of events instead of building a buffer.
//! Whatever consumes the stream decides how bytes end up on disk or screen.
//!
//! ## Event Sequence
//!
//! ```text
//! begin
//!   begin_array(name)
//!     write_byte | add_comment | add_line_break   (any number, any mix)
//!   end_array
//!   ...                                           (one or more arrays)
//! end
//! ```
//!
//! Calling events out of order is a programming error. Implementations may
//! check the sequence with `debug_assert!` but never need to recover.
//!
//! Byte level transforms (bit reversal, inversion) belong to the sink, not
//! the converter: [`ByteCollector`] keeps raw bytes while
//! [`SourceCodeGenerator`](crate::codegen::SourceCodeGenerator) transforms
//! them before rendering.

/// Consumer of the converter's event stream.
pub trait ByteSink {
    /// Start the output. Called once, before anything else.
    fn begin(&mut self);

    /// Start a new named byte array.
    fn begin_array(&mut self, name: &str);

    /// Write one byte to the current array.
    fn write_byte(&mut self, byte: u8);

    /// Add a comment followed by a line break.
    fn add_comment(&mut self, comment: &str);

    /// Add a line break without content.
    fn add_line_break(&mut self);

    /// Close the current array.
    fn end_array(&mut self);

    /// Finish the output. Called once, after everything else.
    fn end(&mut self);
}

/// One array recorded by [`ByteCollector`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectedArray {
    pub name: String,
    pub bytes: Vec<u8>,
    /// Comments with the number of bytes written before each one.
    pub comments: Vec<(usize, String)>,
}

/// A sink that records the raw, untransformed byte stream.
#[derive(Debug, Clone, Default)]
pub struct ByteCollector {
    arrays: Vec<CollectedArray>,
    in_array: bool,
    finished: bool,
}

impl ByteCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// All arrays written so far.
    pub fn arrays(&self) -> &[CollectedArray] {
        &self.arrays
    }

    /// Bytes of every array, concatenated.
    pub fn bytes(&self) -> Vec<u8> {
        self.arrays.iter().flat_map(|a| a.bytes.iter().copied()).collect()
    }

    /// Whether `end` was called.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    fn current(&mut self) -> &mut CollectedArray {
        debug_assert!(self.in_array, "array event outside of begin_array/end_array");
        if self.arrays.is_empty() {
            self.arrays.push(CollectedArray::default());
        }
        let last = self.arrays.len() - 1;
        &mut self.arrays[last]
    }
}

impl ByteSink for ByteCollector {
    fn begin(&mut self) {
        self.arrays.clear();
        self.finished = false;
    }

    fn begin_array(&mut self, name: &str) {
        debug_assert!(!self.in_array, "nested begin_array");
        self.arrays.push(CollectedArray {
            name: name.to_string(),
            ..Default::default()
        });
        self.in_array = true;
    }

    fn write_byte(&mut self, byte: u8) {
        self.current().bytes.push(byte);
    }

    fn add_comment(&mut self, comment: &str) {
        let array = self.current();
        let offset = array.bytes.len();
        array.comments.push((offset, comment.to_string()));
    }

    fn add_line_break(&mut self) {
        self.current();
    }

    fn end_array(&mut self) {
        debug_assert!(self.in_array, "end_array without begin_array");
        self.in_array = false;
    }

    fn end(&mut self) {
        debug_assert!(!self.in_array, "end with an open array");
        self.finished = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collects_arrays_and_comments() {
        let mut sink = ByteCollector::new();
        sink.begin();
        sink.begin_array("a");
        sink.write_byte(0x01);
        sink.write_byte(0x02);
        sink.add_comment("first");
        sink.add_line_break();
        sink.end_array();
        sink.begin_array("b");
        sink.write_byte(0xFF);
        sink.end_array();
        sink.end();

        assert!(sink.is_finished());
        assert_eq!(sink.arrays().len(), 2);
        assert_eq!(sink.arrays()[0].name, "a");
        assert_eq!(sink.arrays()[0].comments, vec![(2, "first".to_string())]);
        assert_eq!(sink.bytes(), vec![0x01, 0x02, 0xFF]);
    }

    #[test]
    fn test_begin_resets() {
        let mut sink = ByteCollector::new();
        sink.begin();
        sink.begin_array("a");
        sink.write_byte(0x01);
        sink.end_array();
        sink.end();

        sink.begin();
        assert!(!sink.is_finished());
        assert!(sink.arrays().is_empty());
    }
}
