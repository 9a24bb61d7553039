//! Output sinks — where command output goes.

/// One-way text sink. Nothing written here is read back.
pub trait OutputSink {
    fn emit_line(&mut self, text: &str);
    fn emit_error(&mut self, text: &str);
}

/// stdout for output, stderr for errors.
#[derive(Debug, Default, Clone, Copy)]
pub struct Terminal;

impl OutputSink for Terminal {
    fn emit_line(&mut self, text: &str) {
        println!("{}", text);
    }

    fn emit_error(&mut self, text: &str) {
        eprintln!("error: {}", text);
    }
}

/// Collects everything in memory.
#[derive(Debug, Default, Clone)]
pub struct BufferSink {
    pub lines: Vec<String>,
    pub errors: Vec<String>,
}

impl OutputSink for BufferSink {
    fn emit_line(&mut self, text: &str) {
        self.lines.push(text.to_string());
    }

    fn emit_error(&mut self, text: &str) {
        self.errors.push(text.to_string());
    }
}
