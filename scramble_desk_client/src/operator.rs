use std::io::{self, BufRead, Write};

use scramble_desk::collaborator::is_affirmative;
use scramble_desk::Operator;
use tracing::warn;

/// Asks on stdout and reads the answer from stdin.
pub struct TerminalOperator;

impl Operator for TerminalOperator {
    fn confirm(&self, prompt: &str) -> bool {
        print!("{prompt} (y/N): ");
        if io::stdout().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => is_affirmative(&answer),
            Err(err) => {
                warn!(%err, "could not read answer");
                false
            }
        }
    }
}
