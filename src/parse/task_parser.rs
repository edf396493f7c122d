use crate::model::task::{Priority, Task};

/// Byte offset where task content starts: everything after `[x] `.
const CONTENT_OFFSET: usize = 4;

/// Parse the contents of a task file.
///
/// Returns the parsed tasks in line order, plus the lines that were dropped
/// because they are too short to hold a checkbox and content.
pub fn parse_tasks(source: &str) -> (Vec<Task>, Vec<String>) {
    let mut tasks = Vec::new();
    let mut dropped = Vec::new();

    for line in source.lines() {
        match parse_task_line(line) {
            Some(task) => tasks.push(task),
            None => dropped.push(line.to_string()),
        }
    }

    (tasks, dropped)
}

/// Parse raw task file bytes.
///
/// Lines are split on `\n` with a trailing `\r` removed. A line that is not
/// valid UTF-8 is dropped, reported lossily decoded.
pub fn parse_task_bytes(source: &[u8]) -> (Vec<Task>, Vec<String>) {
    let mut tasks = Vec::new();
    let mut dropped = Vec::new();

    if source.is_empty() {
        return (tasks, dropped);
    }
    let source = source.strip_suffix(b"\n").unwrap_or(source);

    for raw in source.split(|&b| b == b'\n') {
        let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
        match std::str::from_utf8(raw) {
            Ok(line) => match parse_task_line(line) {
                Some(task) => tasks.push(task),
                None => dropped.push(line.to_string()),
            },
            Err(_) => dropped.push(String::from_utf8_lossy(raw).into_owned()),
        }
    }

    (tasks, dropped)
}

/// Parse a single `[x] !! Text` line.
///
/// The checkbox contents are not validated: anything other than `x` at
/// byte 1 reads as pending. The priority marker is the first word, so
/// text that itself starts with `! ` is read as a priority.
pub fn parse_task_line(line: &str) -> Option<Task> {
    if line.len() <= CONTENT_OFFSET {
        return None;
    }
    let content = line.get(CONTENT_OFFSET..)?;
    let done = line.as_bytes()[1] == b'x';

    let (priority, text) = match content.split_once(' ') {
        Some((marker, rest)) if !marker.is_empty() => match Priority::from_marker(marker) {
            Some(priority) => (priority, rest),
            None => (Priority::None, content),
        },
        _ => (Priority::None, content),
    };

    Some(Task {
        text: text.trim().to_string(),
        done,
        priority,
    })
}
