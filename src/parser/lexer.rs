//! Line tokenizer for the assembly dialect
//!
//! Commas are dropped outright (not replaced by a space), then the line is split
//! on whitespace. Operand decorations (`[...]` around addresses, `#` before jump
//! targets) are removed by the helpers below before numeric parsing.

/// Split a source line into tokens. An empty result means a blank line.
pub fn tokenize(line: &str) -> Vec<String> {
    line.trim()
        .replace(',', "")
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Strip surrounding square brackets from an address operand
pub fn strip_brackets(token: &str) -> &str {
    token.trim_matches(|c| c == '[' || c == ']')
}

/// Strip the `#` marker from a jump-target operand
pub fn strip_hash(token: &str) -> &str {
    token.trim_matches('#')
}
