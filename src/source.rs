use std::io::BufRead;

use log::error;

/// Something the lexer can pull characters out of, one at a time.
///
/// `None` marks the end of input; once returned, it is returned forever.
pub trait CharSource {
    fn next_char(&mut self) -> Option<char>;
}

impl CharSource for std::str::Chars<'_> {
    fn next_char(&mut self) -> Option<char> {
        self.next()
    }
}

/// Reads from a buffered reader a line at a time, so an interactive console
/// only blocks when the lexer actually needs another character.
pub struct ReaderSource<R> {
    reader: R,
    line: Vec<char>,
    cursor: usize,
    finished: bool,
}

impl<R: BufRead> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: Vec::new(),
            cursor: 0,
            finished: false,
        }
    }

    fn refill(&mut self) {
        let mut buf = Vec::new();
        match self.reader.read_until(b'\n', &mut buf) {
            Ok(0) => self.finished = true,
            Ok(_) => {
                // invalid bytes become U+FFFD and are rejected by the parser
                self.line = String::from_utf8_lossy(&buf).chars().collect();
                self.cursor = 0;
            }
            Err(e) => {
                error!("failed to read input: {}", e);
                self.finished = true;
            }
        }
    }
}

impl<R: BufRead> CharSource for ReaderSource<R> {
    fn next_char(&mut self) -> Option<char> {
        while !self.finished && self.cursor >= self.line.len() {
            self.refill();
        }
        if self.finished {
            return None;
        }
        let c = self.line[self.cursor];
        self.cursor += 1;
        Some(c)
    }
}
