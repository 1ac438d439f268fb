//! Shared string helpers.

/// Turns a caption or tool name into a safe file stem.
///
/// Alphanumerics are kept, every other run of characters becomes a single `_`.
pub fn file_stem(input: &str) -> String {
    let mut stem = String::with_capacity(input.len());
    let mut pending_sep = false;
    for c in input.chars() {
        if c.is_ascii_alphanumeric() || c == '-' {
            if pending_sep && !stem.is_empty() {
                stem.push('_');
            }
            pending_sep = false;
            stem.push(c);
        } else {
            pending_sep = true;
        }
    }
    if stem.is_empty() {
        "output".to_string()
    } else {
        stem
    }
}

/// Truncates a string to a maximum number of characters with ellipsis.
pub fn truncate_string(input: &str, max_length: usize) -> String {
    if input.chars().count() <= max_length {
        input.to_string()
    } else {
        let kept: String = input.chars().take(max_length.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

/// Collapses the whitespace of a multi-line description into one line.
pub fn single_line(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_stem() {
        assert_eq!(file_stem("SOHO/LASCO-C2 latest"), "SOHO_LASCO-C2_latest");
        assert_eq!(file_stem("  AIA 0171 "), "AIA_0171");
        assert_eq!(file_stem("///"), "output");
    }

    #[test]
    fn test_truncate_string() {
        let input = "This is a very long string that should be truncated";
        assert_eq!(truncate_string(input, 20), "This is a very lo...");
        assert_eq!(truncate_string("Short", 20), "Short");
    }

    #[test]
    fn test_single_line() {
        assert_eq!(single_line("\n  Visualize   real-time\n data.\n"), "Visualize real-time data.");
    }
}
