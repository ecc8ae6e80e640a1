//! Line buffering and sub-chunk partitioning

/// Most lines a buffer reserves room for before any are pushed
///
/// The configured capacity is only an upper bound; larger buffers grow as
/// lines arrive.
pub const MAX_PREALLOCATED_LINES: usize = 4096;

/// A contiguous run of buffered lines handed to one worker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubChunk {
    /// Dispatch position within the cycle
    pub index: usize,
    /// 1-based input line number of the first line
    pub first_line: usize,
    /// The lines themselves
    pub lines: Vec<String>,
}

impl SubChunk {
    /// Number of lines in the sub-chunk
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the sub-chunk holds no lines
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Bounded buffer of input lines for one dispatch cycle
#[derive(Debug)]
pub struct LineBuffer {
    lines: Vec<String>,
    capacity: usize,
    /// Line number of the first buffered line
    first_line: usize,
}

impl LineBuffer {
    /// Create an empty buffer holding at most `capacity` lines
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: Vec::with_capacity(capacity.min(MAX_PREALLOCATED_LINES)),
            capacity,
            first_line: 1,
        }
    }

    /// Append a line
    ///
    /// Returns `true` once the buffer has reached capacity.
    pub fn push(&mut self, line: String) -> bool {
        debug_assert!(!self.is_full(), "push into a full line buffer");
        self.lines.push(line);
        self.is_full()
    }

    /// Whether the buffer holds `capacity` lines
    pub fn is_full(&self) -> bool {
        self.lines.len() >= self.capacity
    }

    /// Whether the buffer is empty
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of buffered lines
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Maximum number of lines per cycle
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// 1-based line number of the first buffered line
    pub fn first_line(&self) -> usize {
        self.first_line
    }

    /// 1-based line number of the last buffered line, if any
    pub fn last_line(&self) -> Option<usize> {
        (!self.lines.is_empty()).then(|| self.first_line + self.lines.len() - 1)
    }

    /// Drain the buffer into sub-chunks of at most `lines_per_chunk` lines
    ///
    /// The buffer is left empty and positioned after the drained lines.
    pub fn drain_sub_chunks(&mut self, lines_per_chunk: usize) -> Vec<SubChunk> {
        let first_line = self.first_line;
        let reserve = self.capacity.min(MAX_PREALLOCATED_LINES);
        let lines = std::mem::replace(&mut self.lines, Vec::with_capacity(reserve));
        self.first_line += lines.len();
        split_into_sub_chunks(lines, lines_per_chunk, first_line)
    }
}

/// Split `lines` into consecutive sub-chunks of at most `lines_per_chunk`
///
/// Only the last sub-chunk may be shorter. `first_line` is the 1-based line
/// number of `lines[0]`.
pub fn split_into_sub_chunks(
    lines: Vec<String>,
    lines_per_chunk: usize,
    first_line: usize,
) -> Vec<SubChunk> {
    let lines_per_chunk = lines_per_chunk.max(1);
    let mut chunks = Vec::with_capacity(lines.len().div_ceil(lines_per_chunk));
    let mut iter = lines.into_iter().peekable();
    let mut next_line = first_line;

    while iter.peek().is_some() {
        let chunk: Vec<String> = iter.by_ref().take(lines_per_chunk).collect();
        let len = chunk.len();
        chunks.push(SubChunk {
            index: chunks.len(),
            first_line: next_line,
            lines: chunk,
        });
        next_line += len;
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("line {i}")).collect()
    }

    #[test]
    fn test_split_even() {
        let chunks = split_into_sub_chunks(lines(6), 2, 1);
        assert_eq!(chunks.len(), 3);
        assert!(chunks.iter().all(|c| c.len() == 2));
        assert_eq!(
            chunks.iter().map(|c| c.first_line).collect::<Vec<_>>(),
            vec![1, 3, 5]
        );
    }

    #[test]
    fn test_split_uneven_last_is_short() {
        let chunks = split_into_sub_chunks(lines(5), 2, 11);
        assert_eq!(
            chunks.iter().map(SubChunk::len).collect::<Vec<_>>(),
            vec![2, 2, 1]
        );
        assert_eq!(chunks[2].first_line, 15);
        assert_eq!(chunks[2].lines, vec!["line 5".to_string()]);
    }

    #[test]
    fn test_split_empty() {
        assert!(split_into_sub_chunks(Vec::new(), 3, 1).is_empty());
    }

    #[test]
    fn test_split_indices_are_dispatch_order() {
        let chunks = split_into_sub_chunks(lines(7), 3, 1);
        for (i, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.index, i);
        }
    }

    #[test]
    fn test_buffer_fills_to_capacity() {
        let mut buffer = LineBuffer::new(3);
        assert!(!buffer.push("a".into()));
        assert!(!buffer.push("b".into()));
        assert!(buffer.push("c".into()));
        assert!(buffer.is_full());
        assert_eq!(buffer.last_line(), Some(3));
    }

    #[test]
    fn test_drain_advances_line_numbers() {
        let mut buffer = LineBuffer::new(4);
        for line in lines(4) {
            buffer.push(line);
        }
        let first = buffer.drain_sub_chunks(2);
        assert_eq!(first.len(), 2);
        assert!(buffer.is_empty());
        assert_eq!(buffer.first_line(), 5);
        assert_eq!(buffer.last_line(), None);

        buffer.push("tail".into());
        let second = buffer.drain_sub_chunks(2);
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].first_line, 5);
        assert_eq!(second[0].index, 0);
    }

    #[test]
    fn test_huge_capacity_reserves_little() {
        let mut buffer = LineBuffer::new(usize::MAX);
        assert_eq!(buffer.capacity(), usize::MAX);
        buffer.push("a".into());
        assert!(!buffer.is_full());

        let chunks = buffer.drain_sub_chunks(usize::MAX);
        assert_eq!(chunks.len(), 1);
        assert!(buffer.lines.capacity() <= MAX_PREALLOCATED_LINES);
    }
}
