use std::io;

use unsym_common::parse_hex_address;

use crate::{Call, CallStack, StackDump, StackDumpError, StackDumpErrorKind};

type Result<T, E = StackDumpError> = std::result::Result<T, E>;

/// Runs the line state machine over `lines`.
///
/// The first non-blank line must be a `PID` or `TID` line. Afterwards, every `TID` line closes the
/// open thread section and opens a new one, and every line starting with `#` adds a call to the
/// open section. Other lines are skipped. The open section is closed at the end of input.
#[tracing::instrument(level = "trace", name = "StackDump::parse", skip_all)]
pub(crate) fn parse_lines<I, S>(lines: I) -> Result<StackDump>
where
    I: IntoIterator<Item = io::Result<S>>,
    S: AsRef<str>,
{
    let mut dump = StackDump::default();
    let mut current: Option<CallStack> = None;
    let mut seen_first = false;

    for (index, line) in lines.into_iter().enumerate() {
        let line_no = index + 1;
        let line = line.map_err(|e| StackDumpError::new(StackDumpErrorKind::Io, line_no, e))?;

        let mut fields = line.as_ref().split_whitespace();
        let keyword = match fields.next() {
            Some(keyword) => keyword,
            None => continue,
        };

        if !seen_first {
            seen_first = true;
            match keyword {
                "PID" => {
                    dump.pid = Some(parse_pid(fields.next(), line_no)?);
                    continue;
                }
                "TID" => (),
                _ => {
                    return Err(StackDumpError::from_kind(
                        StackDumpErrorKind::UnexpectedFirstLine,
                        line_no,
                    ))
                }
            }
        }

        if keyword == "TID" {
            let tid = parse_tid(fields.next(), line_no)?;
            if let Some(stack) = current.replace(CallStack::new(tid)) {
                dump.stacks.push(stack);
            }
        } else if keyword.starts_with('#') {
            let address = parse_address(fields.next(), line_no)?;
            let stack = current.as_mut().ok_or_else(|| {
                StackDumpError::from_kind(StackDumpErrorKind::CallOutsideThread, line_no)
            })?;
            stack.calls.push(Call { address });
        } else {
            tracing::trace!(line = line_no, keyword, "skipping line");
        }
    }

    dump.stacks.extend(current);

    tracing::debug!(pid = ?dump.pid, threads = dump.stacks.len(), "parsed stack dump");

    Ok(dump)
}

fn parse_pid(field: Option<&str>, line_no: usize) -> Result<i32> {
    let kind = StackDumpErrorKind::InvalidPidField;
    let field = field.ok_or_else(|| StackDumpError::from_kind(kind, line_no))?;
    field
        .parse()
        .map_err(|e| StackDumpError::new(kind, line_no, e))
}

/// Parses a thread id written as `<tid>:`.
fn parse_tid(field: Option<&str>, line_no: usize) -> Result<i32> {
    let kind = StackDumpErrorKind::InvalidTidField;
    let field = field.ok_or_else(|| StackDumpError::from_kind(kind, line_no))?;
    field
        .trim_end_matches(':')
        .parse()
        .map_err(|e| StackDumpError::new(kind, line_no, e))
}

fn parse_address(field: Option<&str>, line_no: usize) -> Result<u64> {
    let kind = StackDumpErrorKind::InvalidAddressField;
    let field = field.ok_or_else(|| StackDumpError::from_kind(kind, line_no))?;
    parse_hex_address(field).map_err(|e| StackDumpError::new(kind, line_no, e))
}
