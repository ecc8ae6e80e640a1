//! Chunked dispatcher
//!
//! Streams input lines into a bounded buffer of `workers * lines_per_worker`
//! lines. Each full buffer (and the short one left at end of input) is split
//! into sub-chunks, run on the executor, and written back in dispatch order
//! before the next line is read. Cycles never overlap, so at most one buffer
//! of input and its output are held at a time.

use crate::{
    assembler::{ResultAssembler, ResultRecord},
    chunker::LineBuffer,
    config::DispatchConfig,
    error::Result,
    executor::{build_executor, ExecutionMode, Executor},
    input::Input,
    transform::LineTransform,
};
use std::io::Write;

/// Totals for a finished run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchSummary {
    /// Input lines read
    pub lines_read: usize,
    /// Output lines written
    pub lines_written: usize,
    /// Dispatch cycles run
    pub cycles: usize,
    /// Sub-chunks dispatched across all cycles
    pub sub_chunks: usize,
}

/// What happened in one dispatch cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleReport {
    /// 1-based cycle number
    pub cycle: usize,
    /// 1-based number of the first input line in the cycle
    pub first_line: usize,
    /// 1-based number of the last input line in the cycle
    pub last_line: usize,
    /// Sub-chunks dispatched in the cycle
    pub sub_chunks: usize,
    /// Output lines produced by the cycle
    pub lines_written: usize,
}

impl CycleReport {
    /// Input lines consumed by the cycle
    pub fn lines_read(&self) -> usize {
        self.last_line + 1 - self.first_line
    }
}

/// Bounded, order-preserving line dispatcher
pub struct ChunkedDispatcher {
    config: DispatchConfig,
    capacity: usize,
    executor: Box<dyn Executor>,
    assembler: ResultAssembler,
}

impl std::fmt::Debug for ChunkedDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChunkedDispatcher")
            .field("config", &self.config)
            .field("capacity", &self.capacity)
            .field("mode", &self.executor.mode())
            .finish()
    }
}

impl ChunkedDispatcher {
    /// Create a dispatcher, building its worker pool
    pub fn new(config: DispatchConfig) -> Result<Self> {
        let capacity = config.validate()?;
        let executor = build_executor(&config)?;
        log::debug!(
            "dispatcher ready: {} workers x {} lines ({:?})",
            config.workers,
            config.lines_per_worker,
            executor.mode()
        );

        Ok(Self {
            config,
            capacity,
            executor,
            assembler: ResultAssembler::new(),
        })
    }

    /// The configuration this dispatcher was built with
    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Lines buffered per cycle
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Execution mode in use
    pub fn mode(&self) -> ExecutionMode {
        self.executor.mode()
    }

    /// Process `input` and write transformed lines to `writer`
    pub fn run<W: Write + ?Sized>(
        &self,
        input: Input,
        writer: &mut W,
        transform: &dyn LineTransform,
    ) -> Result<DispatchSummary> {
        self.run_observed(input, writer, transform, &mut |_| {})
    }

    /// Like [`run`](Self::run), calling `observer` after every cycle is written
    pub fn run_observed<W: Write + ?Sized>(
        &self,
        input: Input,
        writer: &mut W,
        transform: &dyn LineTransform,
        observer: &mut dyn FnMut(&CycleReport),
    ) -> Result<DispatchSummary> {
        let lines = input.into_lines()?;
        let summary = self.drive(
            lines,
            transform,
            &mut |records| self.assembler.write_to(records, writer),
            observer,
        )?;
        writer.flush()?;
        Ok(summary)
    }

    /// Run the same cycles over in-memory lines and return the output
    pub fn process_lines<I, S>(
        &self,
        lines: I,
        transform: &dyn LineTransform,
    ) -> Result<Vec<String>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut output = Vec::new();
        self.drive(
            lines
                .into_iter()
                .map(|line| Ok::<String, std::io::Error>(line.into())),
            transform,
            &mut |records| {
                let lines = self.assembler.assemble(records)?;
                let written = lines.len();
                output.extend(lines);
                Ok(written)
            },
            &mut |_| {},
        )?;
        Ok(output)
    }

    /// Fill, dispatch, collect and emit until the input is exhausted
    fn drive<I>(
        &self,
        lines: I,
        transform: &dyn LineTransform,
        emit: &mut dyn FnMut(Vec<ResultRecord>) -> Result<usize>,
        observer: &mut dyn FnMut(&CycleReport),
    ) -> Result<DispatchSummary>
    where
        I: Iterator<Item = std::io::Result<String>>,
    {
        let mut buffer = LineBuffer::new(self.capacity);
        let mut summary = DispatchSummary::default();

        for line in lines {
            summary.lines_read += 1;
            if buffer.push(line?) {
                self.dispatch_cycle(&mut buffer, transform, emit, observer, &mut summary)?;
            }
        }

        // Leftover lines when the input is not a multiple of the capacity
        if !buffer.is_empty() {
            self.dispatch_cycle(&mut buffer, transform, emit, observer, &mut summary)?;
        }

        log::debug!(
            "dispatch finished: {} lines in, {} lines out, {} cycles",
            summary.lines_read,
            summary.lines_written,
            summary.cycles
        );
        Ok(summary)
    }

    fn dispatch_cycle(
        &self,
        buffer: &mut LineBuffer,
        transform: &dyn LineTransform,
        emit: &mut dyn FnMut(Vec<ResultRecord>) -> Result<usize>,
        observer: &mut dyn FnMut(&CycleReport),
        summary: &mut DispatchSummary,
    ) -> Result<()> {
        let first_line = buffer.first_line();
        let last_line = buffer.last_line().unwrap_or(first_line);
        log::info!("Processing lines {first_line}-{last_line}");

        let chunks = buffer.drain_sub_chunks(self.config.lines_per_worker);
        let records = self.executor.execute(&chunks, transform)?;
        let lines_written = emit(records)?;

        summary.cycles += 1;
        summary.sub_chunks += chunks.len();
        summary.lines_written += lines_written;

        observer(&CycleReport {
            cycle: summary.cycles,
            first_line,
            last_line,
            sub_chunks: chunks.len(),
            lines_written,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::{MapLines, Passthrough};

    fn numbered(n: usize) -> Vec<String> {
        (1..=n).map(|i| i.to_string()).collect()
    }

    #[test]
    fn test_two_by_two_five_lines_runs_two_cycles() {
        let dispatcher = ChunkedDispatcher::new(DispatchConfig::new(2, 2)).unwrap();
        let mut reports = Vec::new();
        let mut out = Vec::new();

        let summary = dispatcher
            .run_observed(
                Input::from_text("1\n2\n3\n4\n5\n"),
                &mut out,
                &Passthrough,
                &mut |r| reports.push(*r),
            )
            .unwrap();

        assert_eq!(summary.cycles, 2);
        assert_eq!(summary.sub_chunks, 3);
        assert_eq!(reports[0].lines_read(), 4);
        assert_eq!(reports[0].sub_chunks, 2);
        assert_eq!((reports[1].first_line, reports[1].last_line), (5, 5));
        assert_eq!(String::from_utf8(out).unwrap(), "1\n2\n3\n4\n5\n");
    }

    #[test]
    fn test_exact_multiple_has_no_trailing_cycle() {
        let dispatcher = ChunkedDispatcher::new(DispatchConfig::new(2, 3)).unwrap();
        let mut out = Vec::new();
        let summary = dispatcher
            .run(Input::from_text(numbered(12).join("\n")), &mut out, &Passthrough)
            .unwrap();
        assert_eq!(summary.cycles, 2);
        assert_eq!(summary.lines_read, 12);
    }

    #[test]
    fn test_empty_input_runs_no_cycles() {
        let dispatcher = ChunkedDispatcher::new(DispatchConfig::new(3, 3)).unwrap();
        let mut out = Vec::new();
        let summary = dispatcher
            .run(Input::from_text(""), &mut out, &Passthrough)
            .unwrap();
        assert_eq!(summary, DispatchSummary::default());
        assert!(out.is_empty());
    }

    #[test]
    fn test_process_lines_applies_transform_in_order() {
        let dispatcher = ChunkedDispatcher::new(DispatchConfig::new(4, 3)).unwrap();
        let output = dispatcher
            .process_lines(numbered(50), &MapLines(|s: &str| format!("<{s}>")))
            .unwrap();
        let expected: Vec<String> = numbered(50).iter().map(|s| format!("<{s}>")).collect();
        assert_eq!(output, expected);
    }

    #[test]
    fn test_invalid_config_rejected_before_reading() {
        let err = ChunkedDispatcher::new(DispatchConfig::new(0, 1)).unwrap_err();
        assert!(err.to_string().contains("invalid configuration"));
    }
}
