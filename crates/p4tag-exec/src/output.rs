/// How command output is copied into the run log.
#[derive(Debug, Clone, Copy)]
pub struct OutputConfig {
    /// Max line length (bytes) before truncation.
    pub max_line_length: usize,
    /// Forward stderr lines too (stdout is always forwarded).
    pub forward_stderr: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            max_line_length: 4096,
            forward_stderr: true,
        }
    }
}

impl OutputConfig {
    /// Cut `line` to `max_line_length`, on a char boundary.
    pub(crate) fn clip<'a>(&self, line: &'a str) -> (&'a str, bool) {
        if line.len() <= self.max_line_length {
            return (line, false);
        }
        let mut end = self.max_line_length;
        while !line.is_char_boundary(end) {
            end -= 1;
        }
        (&line[..end], true)
    }
}
