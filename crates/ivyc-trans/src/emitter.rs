//! Text layout (§4.5): a single growing buffer. Indentation carries no
//! semantic meaning in the target language, so the emitter never tracks an
//! indent level -- it only guarantees the "one trailing newline per
//! top-level declaration and per block statement" rule.

#[derive(Default)]
pub struct Emitter {
    buf: String,
}

impl Emitter {
    pub fn new() -> Self {
        Self { buf: String::new() }
    }

    pub fn push_str(&mut self, s: &str) {
        self.buf.push_str(s);
    }

    /// Appends `s` followed by exactly one newline.
    pub fn push_line(&mut self, s: &str) {
        self.buf.push_str(s);
        self.buf.push('\n');
    }

    pub fn finish(self) -> String {
        self.buf
    }
}
