//! In-engine developer console sink.
//!
//! Collects the lines produced by script `print` calls and by script faults
//! that the host reports. Every line is also forwarded to the `log` facade,
//! so a headless run still shows script output.
//!
//! The buffer is bounded: once `capacity` lines are stored, the oldest line
//! is dropped for every new one.

use log::{Level, error, info};
use mlua::prelude::*;
use std::cell::RefCell;
use std::collections::VecDeque;

/// One line of console output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleLogEntry {
    pub message: String,
    pub level: Level,
}

/// Console buffer shared by all environments of a session.
#[derive(Debug)]
pub struct ConsoleSink {
    entries: RefCell<VecDeque<ConsoleLogEntry>>,
    capacity: usize,
}

impl ConsoleSink {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: RefCell::new(VecDeque::with_capacity(capacity.min(1024))),
            capacity: capacity.max(1),
        }
    }

    /// Records a line of script output at info level.
    pub fn add_log(&self, message: impl Into<String>) {
        let message = message.into();
        info!(target: "lua", "{}", message);
        self.push(ConsoleLogEntry {
            message,
            level: Level::Info,
        });
    }

    /// Records a script fault.
    pub fn add_error(&self, message: impl Into<String>) {
        let message = message.into();
        error!(target: "lua", "{}", message);
        self.push(ConsoleLogEntry {
            message,
            level: Level::Error,
        });
    }

    /// Reports a failed script result; successful results are ignored.
    ///
    /// Returns `true` when the result was successful.
    pub fn check_result<T>(&self, result: &Result<T, String>) -> bool {
        match result {
            Ok(_) => true,
            Err(message) => {
                self.add_error(message.clone());
                false
            }
        }
    }

    /// Copy of the buffered lines, oldest first.
    pub fn entries(&self) -> Vec<ConsoleLogEntry> {
        self.entries.borrow().iter().cloned().collect()
    }

    /// Removes and returns the buffered lines, oldest first.
    pub fn drain(&self) -> Vec<ConsoleLogEntry> {
        self.entries.borrow_mut().drain(..).collect()
    }

    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    fn push(&self, entry: ConsoleLogEntry) {
        let mut entries = self.entries.borrow_mut();
        while entries.len() >= self.capacity {
            entries.pop_front();
        }
        entries.push_back(entry);
    }
}

/// Formats the arguments of a script `print` call into one line.
///
/// Scalars are converted with the interpreter's own string conversion (so
/// `__tostring` is honoured) and joined with spaces. Strings that are not
/// valid UTF-8 are converted lossily. A table argument is rendered one level
/// deep as `{key=value,...}`; nested values use their default string
/// conversion. Values that cannot be converted are skipped.
pub fn format_print_args(args: &LuaMultiValue) -> String {
    let mut message = String::new();
    for (i, value) in args.iter().enumerate() {
        match value {
            LuaValue::Table(table) => {
                if i > 0 {
                    message.push(' ');
                }
                message.push('{');
                let mut first = true;
                for pair in table.pairs::<LuaValue, LuaValue>() {
                    let Ok((key, value)) = pair else {
                        continue;
                    };
                    if !first {
                        message.push(',');
                    }
                    first = false;
                    if let Some(key) = value_text(&key) {
                        message.push_str(&key);
                        message.push('=');
                    }
                    if let Some(value) = value_text(&value) {
                        message.push_str(&value);
                    }
                }
                message.push('}');
            }
            other => {
                if let Some(text) = value_text(other) {
                    if i > 0 {
                        message.push(' ');
                    }
                    message.push_str(&text);
                }
            }
        }
    }
    message
}

fn value_text(value: &LuaValue) -> Option<String> {
    match value {
        LuaValue::String(s) => Some(s.to_string_lossy()),
        other => other.to_string().ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_drops_oldest() {
        let console = ConsoleSink::new(2);
        console.add_log("one");
        console.add_log("two");
        console.add_log("three");
        let lines: Vec<String> = console.entries().into_iter().map(|e| e.message).collect();
        assert_eq!(lines, vec!["two", "three"]);
    }

    #[test]
    fn test_check_result_records_errors_only() {
        let console = ConsoleSink::new(8);
        assert!(console.check_result::<()>(&Ok(())));
        assert!(console.is_empty());
        assert!(!console.check_result::<()>(&Err("boom".into())));
        let entries = console.drain();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].level, Level::Error);
        assert_eq!(entries[0].message, "boom");
        assert!(console.is_empty());
    }

    #[test]
    fn test_format_scalars_space_joined() {
        let lua = Lua::new();
        let args: LuaMultiValue = lua.load(r#"return "a", 1, true, nil"#).eval().unwrap();
        assert_eq!(format_print_args(&args), "a 1 true nil");
    }

    #[test]
    fn test_format_table_renders_all_pairs() {
        let lua = Lua::new();
        let args: LuaMultiValue = lua
            .load(r#"return "state", { hp = 10, name = "ship", [1] = "x" }"#)
            .eval()
            .unwrap();
        let line = format_print_args(&args);
        assert!(line.starts_with("state {"), "unexpected line: {line}");
        assert!(line.ends_with('}'));
        assert!(line.contains("hp=10"));
        assert!(line.contains("name=ship"));
        assert!(line.contains("1=x"));
        assert_eq!(line.matches(',').count(), 2);
    }

    #[test]
    fn test_format_honours_tostring() {
        let lua = Lua::new();
        let args: LuaMultiValue = lua
            .load(r#"return setmetatable({}, { __tostring = function() return "custom" end })"#)
            .eval()
            .unwrap();
        // Tables are always rendered structurally, even with __tostring.
        assert_eq!(format_print_args(&args), "{}");

        let args: LuaMultiValue = lua
            .load(r#"local t = setmetatable({}, { __tostring = function() return "custom" end }); return { inner = t }"#)
            .eval()
            .unwrap();
        assert_eq!(format_print_args(&args), "{inner=custom}");
    }

    #[test]
    fn test_format_invalid_utf8_is_lossy() {
        let lua = Lua::new();
        let args: LuaMultiValue = lua
            .load(r#"return "hp", "\xff\xfe", { ["\xff"] = 1 }"#)
            .eval()
            .unwrap();
        assert_eq!(format_print_args(&args), "hp \u{FFFD}\u{FFFD} {\u{FFFD}=1}");
    }
}
