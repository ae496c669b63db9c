//! Response classification and typed-value extraction.
//!
//! A response stream is a sequence of lines ending with a terminal status
//! token. Everything before the terminal token is either an error code
//! line, a blank line, or a payload line kept verbatim.

use log::warn;

/// Terminal token for a successful exchange.
pub const TOKEN_OK: &str = "OK";

/// Terminal token for a failed exchange.
pub const TOKEN_ERROR: &str = "ERROR";

/// Prefix of an out-of-band error code line.
pub const ERR_CODE_PREFIX: &str = "ERR CODE:";

/// Characters skipped between the prefix and the hexadecimal digits.
/// The skipped characters are not validated; real firmware pads the code
/// field and the digits of interest start two characters in.
pub const ERR_CODE_OFFSET: usize = 2;

/// Terminal status of a completed exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AtStatus {
    /// The modem answered `OK`.
    Ok,
    /// The modem answered `ERROR`.
    Error,
}

/// The structured result of one command exchange.
///
/// `lines` holds the non-empty payload lines in arrival order; terminal
/// tokens, blank lines, and the error code line itself are never stored.
/// `error_code` is `None` when no `ERR CODE:` line was seen, which is
/// distinct from a reported code of zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtResponse {
    /// Terminal status.
    pub status: AtStatus,
    /// Error code reported on an `ERR CODE:` line, if any.
    pub error_code: Option<u32>,
    /// Payload lines preceding the terminal token.
    pub lines: Vec<String>,
}

impl AtResponse {
    /// Check if the exchange ended with `OK`.
    pub fn is_ok(&self) -> bool {
        self.status == AtStatus::Ok
    }

    /// Check if the exchange ended with `ERROR`.
    pub fn is_error(&self) -> bool {
        self.status == AtStatus::Error
    }

    /// Extract a numeric reply of the form `+<integer>` from the first
    /// payload line.
    ///
    /// Returns the value only when the status is `Ok`, a first line
    /// exists, it starts with `+`, and the remainder parses as a decimal
    /// integer. Every other shape yields `None`; there is no zero
    /// default.
    pub fn first_number(&self) -> Option<i64> {
        if self.status != AtStatus::Ok {
            return None;
        }
        let line = self.lines.first()?;
        let digits = line.strip_prefix('+')?;
        digits.parse().ok()
    }
}

/// Push-style state machine that classifies response lines until a
/// terminal token arrives.
///
/// Feed one line at a time with [`push`](Self::push); the classifier
/// stays in its reading state across error code lines, blank lines, and
/// payload lines, and produces the finished [`AtResponse`] when it
/// consumes `OK` or `ERROR`. There is no bound on the number of lines;
/// bounding the exchange is the transport layer's concern.
#[derive(Debug, Default)]
pub struct ResponseClassifier {
    error_code: Option<u32>,
    lines: Vec<String>,
}

impl ResponseClassifier {
    /// Create a classifier for one exchange.
    pub fn new() -> Self {
        ResponseClassifier::default()
    }

    /// Classify one line.
    ///
    /// Returns `Some(response)` when the line is a terminal token, and
    /// `None` while the exchange is still open.
    pub fn push(&mut self, line: &str) -> Option<AtResponse> {
        if line == TOKEN_OK {
            return Some(self.finish(AtStatus::Ok));
        }
        if line == TOKEN_ERROR {
            return Some(self.finish(AtStatus::Error));
        }
        if let Some(rest) = line.strip_prefix(ERR_CODE_PREFIX) {
            match rest.get(ERR_CODE_OFFSET..).and_then(parse_leading_hex) {
                Some(code) => self.error_code = Some(code),
                None => warn!("unparseable error code line: {:?}", line),
            }
            return None;
        }
        if line.is_empty() {
            return None;
        }
        self.lines.push(line.to_string());
        None
    }

    fn finish(&mut self, status: AtStatus) -> AtResponse {
        AtResponse {
            status,
            error_code: self.error_code.take(),
            lines: std::mem::take(&mut self.lines),
        }
    }
}

/// Parse the longest leading run of hexadecimal digits, ignoring any
/// trailing padding the firmware appends after the code field.
fn parse_leading_hex(text: &str) -> Option<u32> {
    let text = text.trim_start();
    let run = text
        .find(|c: char| !c.is_ascii_hexdigit())
        .unwrap_or(text.len());
    u32::from_str_radix(&text[..run], 16).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(lines: &[&str]) -> AtResponse {
        let mut classifier = ResponseClassifier::new();
        for (i, line) in lines.iter().enumerate() {
            if let Some(response) = classifier.push(line) {
                assert_eq!(i, lines.len() - 1, "terminated before last line");
                return response;
            }
        }
        panic!("no terminal token in {:?}", lines);
    }

    #[test]
    fn test_ok_with_payload() {
        let response = classify(&["+CWMODE:1", "OK"]);
        assert_eq!(response.status, AtStatus::Ok);
        assert_eq!(response.lines, vec!["+CWMODE:1"]);
        assert_eq!(response.error_code, None);
    }

    #[test]
    fn test_payload_order_preserved() {
        let response = classify(&["first", "second", "third", "OK"]);
        assert_eq!(response.lines, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_blank_lines_discarded() {
        let response = classify(&["", "+120", "", "", "OK"]);
        assert_eq!(response.lines, vec!["+120"]);
        assert!(response.is_ok());
    }

    #[test]
    fn test_error_without_code() {
        let response = classify(&["ERROR"]);
        assert_eq!(response.status, AtStatus::Error);
        assert_eq!(response.error_code, None);
        assert!(response.lines.is_empty());
    }

    #[test]
    fn test_error_code_then_error() {
        let response = classify(&["ERR CODE:0041", "ERROR"]);
        assert_eq!(response.status, AtStatus::Error);
        assert_eq!(response.error_code, Some(0x41));
        // The code line never lands in the payload.
        assert!(response.lines.is_empty());
    }

    #[test]
    fn test_error_code_zero_is_present() {
        let response = classify(&["ERR CODE:0000", "ERROR"]);
        assert_eq!(response.error_code, Some(0));
    }

    #[test]
    fn test_error_code_skips_fixed_offset() {
        // Two characters after the token are skipped without validation.
        let response = classify(&["ERR CODE:xx1F", "ERROR"]);
        assert_eq!(response.error_code, Some(0x1F));
    }

    #[test]
    fn test_error_code_with_trailing_padding() {
        // Firmware may pad the code field; the leading digit run wins.
        let response = classify(&["ERR CODE:0041x", "ERROR"]);
        assert_eq!(response.error_code, Some(0x41));

        let response = classify(&["ERR CODE:001F  ", "ERROR"]);
        assert_eq!(response.error_code, Some(0x1F));
    }

    #[test]
    fn test_malformed_error_code_ignored() {
        let response = classify(&["ERR CODE:00zz", "ERROR"]);
        assert_eq!(response.error_code, None);
        assert!(response.lines.is_empty());
    }

    #[test]
    fn test_first_number() {
        let response = classify(&["+120", "OK"]);
        assert_eq!(response.first_number(), Some(120));
    }

    #[test]
    fn test_first_number_requires_ok() {
        let response = classify(&["+120", "ERROR"]);
        assert_eq!(response.first_number(), None);
    }

    #[test]
    fn test_first_number_requires_lines() {
        let response = classify(&["OK"]);
        assert_eq!(response.first_number(), None);
    }

    #[test]
    fn test_first_number_requires_plus_prefix() {
        let response = classify(&["120", "OK"]);
        assert_eq!(response.first_number(), None);
    }

    #[test]
    fn test_first_number_rejects_garbage() {
        let response = classify(&["+12x0", "OK"]);
        assert_eq!(response.first_number(), None);
    }

    #[test]
    fn test_only_first_line_is_interpreted() {
        let response = classify(&["+7", "+9", "OK"]);
        assert_eq!(response.first_number(), Some(7));
    }
}
