//! Utilities.

/// Returns ceiling log2.
pub const fn clog2(value: usize) -> usize {
    if value == 0 {
        0
    } else {
        usize::BITS as usize - (value - 1).leading_zeros() as usize
    }
}

/// Returns whether `width` can carry a butterfly network, i.e. is a power of two of at least 2.
pub const fn is_network_width(width: usize) -> bool { width >= 2 && width.is_power_of_two() }

/// Greedily wraps `words` into lines of at most `width` columns.
///
/// The first line starts with `initial` and the following ones with `subsequent`. A word longer than the line is
/// kept whole on its own line.
pub fn wrap_words<'a, I>(words: I, width: usize, initial: &str, subsequent: &str) -> Vec<String>
where I: IntoIterator<Item = &'a str> {
    let mut lines = vec![];
    let mut line = initial.to_string();
    let mut empty = true;

    for word in words {
        if !empty && line.len() + 1 + word.len() > width {
            lines.push(line);
            line = subsequent.to_string();
            empty = true;
        }
        if !empty {
            line.push(' ');
        }
        line.push_str(word);
        empty = false;
    }

    if !empty {
        lines.push(line);
    }
    lines
}

/// Some or executing the given expression.
#[macro_export]
macro_rules! some_or {
    ($e:expr, $err:expr) => {{
        match $e {
            Some(r) => r,
            None => $err,
        }
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clog2_matches_stage_count() {
        assert_eq!(clog2(1), 0);
        assert_eq!(clog2(2), 1);
        assert_eq!(clog2(8), 3);
        assert_eq!(clog2(64), 6);
        assert_eq!(clog2(5), 3);
    }

    #[test]
    fn network_width() {
        assert!(!is_network_width(0));
        assert!(!is_network_width(1));
        assert!(is_network_width(2));
        assert!(!is_network_width(12));
        assert!(is_network_width(1 << 20));
    }

    #[test]
    fn wrap_keeps_words_whole() {
        let lines = wrap_words("aa bb cc dd".split(' '), 8, "  ", "    ");
        assert_eq!(lines, vec!["  aa bb", "    cc", "    dd"]);
        assert_eq!(wrap_words(["a-very-long-word"], 4, "", ""), vec!["a-very-long-word"]);
    }
}
