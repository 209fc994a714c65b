use std::io::{BufRead, Write};
use tally_core::Money;
use tally_extract::{ReviewDecision, ReviewError, ReviewRequest, Reviewer};

/// Interactive review on a line-oriented terminal.
///
/// For each file it prints the extracted text and the numbered candidates,
/// then reads one answer:
/// - empty line: the best guess (reject if there are no candidates)
/// - `1`..`n`: that candidate
/// - `r`: reject
/// - anything else: a typed total, re-asked until it parses
pub struct TerminalReviewer<R, W> {
    input: R,
    output: W,
    max_text_lines: usize,
}

impl<R: BufRead, W: Write> TerminalReviewer<R, W> {
    pub fn new(input: R, output: W, max_text_lines: usize) -> Self {
        Self { input, output, max_text_lines }
    }

    fn show(&mut self, request: &ReviewRequest<'_>) -> std::io::Result<()> {
        let out = &mut self.output;
        writeln!(out)?;
        writeln!(out, "Review totals for file: {}", request.file_name())?;
        writeln!(out, "────────────────────────────────────────")?;

        let lines: Vec<&str> = request.text.lines().collect();
        if lines.iter().all(|l| l.trim().is_empty()) {
            writeln!(out, "(no text could be extracted)")?;
        } else {
            for line in lines.iter().take(self.max_text_lines) {
                writeln!(out, "{line}")?;
            }
            if lines.len() > self.max_text_lines {
                writeln!(out, "… ({} more lines)", lines.len() - self.max_text_lines)?;
            }
        }
        writeln!(out, "────────────────────────────────────────")?;

        if request.candidates.is_empty() {
            writeln!(out, "No candidate totals found.")?;
        } else {
            writeln!(out, "Select the total from the options below:")?;
            for (i, candidate) in request.candidates.iter().enumerate() {
                let marker = if i == 0 { "  (best guess)" } else { "" };
                writeln!(out, "  [{}] {}{marker}", i + 1, candidate.label())?;
            }
        }
        out.flush()
    }

    fn ask(&mut self, has_candidates: bool) -> Result<String, ReviewError> {
        let hint = if has_candidates {
            "Enter = best guess, number = candidate, r = reject, or type a custom total: "
        } else {
            "Type a custom total, or press Enter / r to reject: "
        };
        write!(self.output, "{hint}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(ReviewError::Aborted);
        }
        Ok(line.trim().to_string())
    }
}

impl<R: BufRead, W: Write> Reviewer for TerminalReviewer<R, W> {
    fn review(&mut self, request: &ReviewRequest<'_>) -> Result<ReviewDecision, ReviewError> {
        self.show(request)?;
        let candidates = &request.candidates;

        loop {
            let answer = self.ask(!candidates.is_empty())?;

            if answer.is_empty() {
                return Ok(match candidates.best_guess() {
                    Some(best) => ReviewDecision::Select(best.value()),
                    None => ReviewDecision::Reject,
                });
            }
            if answer.eq_ignore_ascii_case("r") || answer.eq_ignore_ascii_case("reject") {
                return Ok(ReviewDecision::Reject);
            }
            if let Ok(index) = answer.parse::<usize>() {
                if let Some(candidate) = index.checked_sub(1).and_then(|i| candidates.get(i)) {
                    return Ok(ReviewDecision::Select(candidate.value()));
                }
            }
            match Money::parse_lenient(&answer) {
                Ok(total) => return Ok(ReviewDecision::Manual(total)),
                Err(e) => writeln!(self.output, "{e}. Try again.")?,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::path::Path;
    use tally_extract::rank_candidates;

    const TEXT: &str = "ACME LTD\nSubtotal 200.00\nTax 40.00\nDue 240.00\nPage 1.00";

    fn run(text: &str, answers: &str) -> (Result<ReviewDecision, ReviewError>, String) {
        let request = ReviewRequest {
            path: Path::new("/inv/acme.pdf"),
            text,
            candidates: rank_candidates(text),
        };
        let mut output = Vec::new();
        let result = {
            let mut reviewer = TerminalReviewer::new(Cursor::new(answers.as_bytes()), &mut output, 40);
            reviewer.review(&request)
        };
        (result, String::from_utf8(output).unwrap())
    }

    #[test]
    fn enter_accepts_best_guess() {
        let (decision, out) = run(TEXT, "\n");
        assert_eq!(decision.unwrap(), ReviewDecision::Select(Money::from_cents(24000)));
        assert!(out.contains("Review totals for file: acme.pdf"));
        assert!(out.contains("[1] 240.00  (best guess)"));
        assert!(out.contains("[3] 40.00"));
    }

    #[test]
    fn number_selects_candidate() {
        let (decision, _) = run(TEXT, "2\n");
        assert_eq!(decision.unwrap(), ReviewDecision::Select(Money::from_cents(20000)));
    }

    #[test]
    fn r_rejects() {
        let (decision, _) = run(TEXT, "R\n");
        assert_eq!(decision.unwrap(), ReviewDecision::Reject);
    }

    #[test]
    fn custom_total_is_manual() {
        let (decision, _) = run(TEXT, "£1,999.99\n");
        assert_eq!(decision.unwrap(), ReviewDecision::Manual(Money::from_cents(199999)));
    }

    #[test]
    fn out_of_range_number_is_a_manual_amount() {
        let (decision, _) = run(TEXT, "7\n");
        assert_eq!(decision.unwrap(), ReviewDecision::Manual(Money::from_cents(700)));
    }

    #[test]
    fn invalid_input_is_asked_again() {
        let (decision, out) = run(TEXT, "twelve\n12.50\n");
        assert_eq!(decision.unwrap(), ReviewDecision::Manual(Money::from_cents(1250)));
        assert!(out.contains("Invalid amount: 'twelve'. Try again."));
    }

    #[test]
    fn enter_without_candidates_rejects() {
        let (decision, out) = run("Page 1.00", "\n");
        assert_eq!(decision.unwrap(), ReviewDecision::Reject);
        assert!(out.contains("No candidate totals found."));
    }

    #[test]
    fn empty_text_is_flagged() {
        let (_, out) = run("", "r\n");
        assert!(out.contains("(no text could be extracted)"));
    }

    #[test]
    fn eof_aborts() {
        let (decision, _) = run(TEXT, "");
        assert!(matches!(decision, Err(ReviewError::Aborted)));
    }

    #[test]
    fn long_text_is_truncated() {
        let text: String = (0..50).map(|i| format!("line {i}\n")).collect();
        let (_, out) = run(&text, "r\n");
        assert!(out.contains("line 39\n"));
        assert!(!out.contains("line 40\n"));
        assert!(out.contains("(10 more lines)"));
    }
}
