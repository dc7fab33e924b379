use std::io::{self, BufRead, Stdout, StdinLock, Write};

/// Line-oriented operator prompts.
///
/// Every question blocks on a single line read. Generic over the reader and
/// writer so the interactive flows can be driven from in-memory buffers.
pub struct Prompt<R, W> {
    input: R,
    output: W,
}

impl Prompt<StdinLock<'static>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print `question` and return the operator's answer without the line ending.
    pub fn ask(&mut self, question: &str) -> io::Result<String> {
        write!(self.output, "{question}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed while waiting for an answer",
            ));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Ask a yes/no question until the answer parses.
    pub fn confirm(&mut self, question: &str) -> io::Result<bool> {
        loop {
            let answer = self.ask(&format!("{question} (y/n): "))?;
            match parse_yes_no(&answer) {
                Some(value) => return Ok(value),
                None => writeln!(self.output, "Please answer 'y' or 'n'.")?,
            }
        }
    }

    pub fn say(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "{message}")
    }
}

pub fn parse_yes_no(answer: &str) -> Option<bool> {
    match answer.trim().to_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Cursor;

    fn prompt(input: &str) -> Prompt<Cursor<Vec<u8>>, Vec<u8>> {
        Prompt::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[rstest]
    #[case("y", Some(true))]
    #[case("YES", Some(true))]
    #[case("  n  ", Some(false))]
    #[case("No", Some(false))]
    #[case("", None)]
    #[case("maybe", None)]
    fn test_parse_yes_no(#[case] answer: &str, #[case] expected: Option<bool>) {
        assert_eq!(parse_yes_no(answer), expected);
    }

    #[test]
    fn test_ask_strips_line_ending() {
        let mut p = prompt("hello world\r\n");
        assert_eq!(p.ask("? ").unwrap(), "hello world");
    }

    #[test]
    fn test_ask_writes_question() {
        let mut out = Vec::new();
        Prompt::new(Cursor::new(b"x\n".to_vec()), &mut out)
            .ask("Enter value: ")
            .unwrap();
        let out = String::from_utf8(out).unwrap();
        assert_eq!(out, "Enter value: ");
    }

    #[test]
    fn test_ask_eof_is_error() {
        let mut p = prompt("");
        let err = p.ask("? ").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn test_confirm_reasks_until_valid() {
        let mut out = Vec::new();
        let mut p = Prompt::new(Cursor::new(b"what\n\nyes\n".to_vec()), &mut out);
        assert!(p.confirm("Overwrite?").unwrap());
        drop(p);
        let out = String::from_utf8(out).unwrap();
        assert_eq!(out.matches("Please answer").count(), 2);
    }

    #[test]
    fn test_confirm_no() {
        let mut p = prompt("n\n");
        assert!(!p.confirm("Overwrite?").unwrap());
    }

    #[test]
    fn test_confirm_eof_without_valid_answer() {
        let mut p = prompt("perhaps\n");
        assert!(p.confirm("Overwrite?").is_err());
    }
}
