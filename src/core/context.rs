//! Output buffering for LaTeX emission
//!
//! [`EmitContext`] owns the output buffer of one compile pass and the
//! commenting flag used for passthrough blocks. While the flag is set, every
//! line written through [`EmitContext::emit`] is prefixed with `%` so the
//! LaTeX compiler ignores it.

/// Initial capacity for the output buffer (reduces reallocations)
const INITIAL_BUFFER_CAPACITY: usize = 1024;

/// Output buffer with comment-mode support.
#[derive(Debug)]
pub struct EmitContext {
    buf: String,
    commenting: bool,
}

impl EmitContext {
    /// Create a new context with a pre-allocated buffer.
    pub fn new() -> Self {
        EmitContext {
            buf: String::with_capacity(INITIAL_BUFFER_CAPACITY),
            commenting: false,
        }
    }

    /// Append content to the buffer. In commenting mode every line start
    /// receives a `%` prefix, including line starts inside multi-line
    /// content.
    pub fn emit(&mut self, content: &str) {
        if !self.commenting {
            self.buf.push_str(content);
            return;
        }
        for piece in content.split_inclusive('\n') {
            if self.at_line_start() {
                self.buf.push('%');
            }
            self.buf.push_str(piece);
        }
    }

    /// Emit `\begin{name}` on its own line.
    pub fn begin(&mut self, name: &str) {
        self.emit(&format!("\\begin{{{}}}\n", name));
    }

    /// Emit `\end{name}` on its own line.
    pub fn end(&mut self, name: &str) {
        self.emit(&format!("\\end{{{}}}\n", name));
    }

    /// Whether the next emitted character would start a new output line.
    fn at_line_start(&self) -> bool {
        self.buf.is_empty() || self.buf.ends_with('\n')
    }

    /// Whether comment mode is currently active.
    pub fn commenting(&self) -> bool {
        self.commenting
    }

    /// Switch comment mode, returning the previous state so callers can
    /// restore it after a passthrough block.
    pub fn set_commenting(&mut self, on: bool) -> bool {
        std::mem::replace(&mut self.commenting, on)
    }

    /// The buffered output so far.
    pub fn as_str(&self) -> &str {
        &self.buf
    }

    /// Consume the context and return the concatenated output.
    pub fn into_string(self) -> String {
        self.buf
    }
}

impl Default for EmitContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emit_plain() {
        let mut ctx = EmitContext::new();
        ctx.emit("hello");
        ctx.emit(" world");
        assert_eq!(ctx.as_str(), "hello world");
    }

    #[test]
    fn test_begin_end() {
        let mut ctx = EmitContext::new();
        ctx.begin("itemize");
        ctx.emit("\\item a\n");
        ctx.end("itemize");
        assert_eq!(ctx.as_str(), "\\begin{itemize}\n\\item a\n\\end{itemize}\n");
    }

    #[test]
    fn test_commenting_prefixes_every_line() {
        let mut ctx = EmitContext::new();
        let prev = ctx.set_commenting(true);
        assert!(!prev);
        ctx.emit("first\nsecond\n");
        ctx.set_commenting(prev);
        ctx.emit("plain");
        assert_eq!(ctx.as_str(), "%first\n%second\nplain");
    }

    #[test]
    fn test_commenting_multiline_single_emit() {
        let mut ctx = EmitContext::new();
        ctx.set_commenting(true);
        ctx.emit("<video>\nsrc=\"x\"");
        assert_eq!(ctx.as_str(), "%<video>\n%src=\"x\"");
    }

    #[test]
    fn test_commenting_continues_open_line() {
        let mut ctx = EmitContext::new();
        ctx.set_commenting(true);
        ctx.emit("Unknown Node :: ");
        ctx.emit("video\n");
        assert_eq!(ctx.as_str(), "%Unknown Node :: video\n");
    }
}
