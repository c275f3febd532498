//! Natural ("human") ordering for instrument file names.
//!
//! Runs of ASCII digits compare by value, everything else compares as
//! case-insensitive text, so `Bass2` sorts before `Bass10`.

use std::cmp::Ordering;
use std::path::Path;

/// Compare two names in natural order.
///
/// ```
/// use std::cmp::Ordering;
/// use tfi2opm::natural;
///
/// assert_eq!(natural::compare("Bass2", "Bass10"), Ordering::Less);
/// assert_eq!(natural::compare("lead 1", "LEAD1"), Ordering::Equal);
/// ```
pub fn compare(x: &str, y: &str) -> Ordering {
    let x = tokenize(x);
    let y = tokenize(y);

    for (i, a) in x.iter().enumerate() {
        let b = match y.get(i) {
            Some(b) => b,
            None => return Ordering::Greater,
        };

        let ordering = compare_tokens(a, b);
        if ordering != Ordering::Equal {
            return ordering;
        }
    }

    x.len().cmp(&y.len())
}

/// Like [`compare`], with a missing name ordered before any present name.
///
/// ```
/// use std::cmp::Ordering;
/// use tfi2opm::natural::compare_opt;
///
/// assert_eq!(compare_opt(None, Some("a1")), Ordering::Less);
/// assert_eq!(compare_opt(Some("a10"), Some("a9")), Ordering::Greater);
/// ```
pub fn compare_opt(x: Option<&str>, y: Option<&str>) -> Ordering {
    match (x, y) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(x), Some(y)) => compare(x, y),
    }
}

/// Sort file paths in natural order, comparing their lossy UTF-8 rendering.
pub fn sort<P: AsRef<Path>>(paths: &mut [P]) {
    paths.sort_by(|x, y| {
        compare(
            &x.as_ref().to_string_lossy(),
            &y.as_ref().to_string_lossy(),
        )
    });
}

/// Split into alternating text and digit runs, always starting and ending
/// with a (possibly empty) text run. Spaces are dropped first.
fn tokenize(name: &str) -> Vec<String> {
    let mut tokens = vec![String::new()];
    let mut in_digits = false;

    for c in name.chars().filter(|&c| c != ' ') {
        if c.is_ascii_digit() != in_digits {
            in_digits = !in_digits;
            tokens.push(String::new());
        }
        if let Some(token) = tokens.last_mut() {
            token.push(c);
        }
    }

    if in_digits {
        tokens.push(String::new());
    }

    tokens
}

fn compare_tokens(a: &str, b: &str) -> Ordering {
    match (a.parse::<i32>(), b.parse::<i32>()) {
        (Ok(a), Ok(b)) => a.cmp(&b),
        // A numeric token outranks one that does not fit an i32
        (Ok(_), Err(_)) => Ordering::Greater,
        (Err(_), Ok(_)) => Ordering::Less,
        (Err(_), Err(_)) => a
            .chars()
            .flat_map(char::to_lowercase)
            .cmp(b.chars().flat_map(char::to_lowercase)),
    }
}
