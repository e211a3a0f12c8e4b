use std::io::{BufRead, Write};

/// Ask a yes/no question. Only `yes` or `y` (any case) count as consent.
pub fn confirm<R: BufRead, W: Write>(
    question: &str,
    mut input: R,
    mut output: W,
) -> std::io::Result<bool> {
    write!(output, "{question} (yes/no): ")?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    let answer = answer.trim().to_lowercase();
    Ok(answer == "yes" || answer == "y")
}
