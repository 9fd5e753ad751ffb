use std::io::BufRead;

use crate::parser::parse_lines;
use crate::StackDumpError;

/// A single frame of a call stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Call {
    /// The absolute instruction address captured by the sampler.
    pub address: u64,
}

/// The call stack of one thread, innermost frame first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallStack {
    /// The thread id from the `TID` line.
    pub tid: i32,
    /// Frames in the order they appear in the dump.
    pub calls: Vec<Call>,
}

impl CallStack {
    pub(crate) fn new(tid: i32) -> Self {
        Self {
            tid,
            calls: Vec::new(),
        }
    }
}

/// All call stacks captured from one process.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StackDump {
    /// The process id, if the dump starts with a `PID` line.
    pub pid: Option<i32>,
    /// Thread sections in the order they appear in the dump.
    ///
    /// A thread id that appears more than once yields more than one stack.
    pub stacks: Vec<CallStack>,
}

impl StackDump {
    /// Parses a stack dump held in memory.
    ///
    /// ```
    /// use unsym_stackdump::StackDump;
    ///
    /// let dump = StackDump::parse("PID 42\nTID 7:\n#0 0x10\n#1 0x20\n").unwrap();
    /// assert_eq!(dump.pid, Some(42));
    /// assert_eq!(dump.stacks[0].tid, 7);
    /// assert_eq!(dump.stacks[0].calls.len(), 2);
    /// ```
    pub fn parse(text: &str) -> Result<Self, StackDumpError> {
        parse_lines(text.lines().map(Ok))
    }

    /// Parses a stack dump line by line from a reader, such as standard input.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, StackDumpError> {
        parse_lines(reader.lines())
    }

    /// The process id from the leading `PID` line.
    pub fn pid(&self) -> Option<i32> {
        self.pid
    }

    /// The thread sections of the dump.
    pub fn stacks(&self) -> &[CallStack] {
        &self.stacks
    }

    /// Iterates over all calls of all threads together with their thread id.
    pub fn calls(&self) -> impl Iterator<Item = (i32, &Call)> + '_ {
        self.stacks
            .iter()
            .flat_map(|stack| stack.calls.iter().map(move |call| (stack.tid, call)))
    }
}
