//! Normalization of the tag segments of a version string.
//!
//! Every function takes the raw text captured for one segment (already
//! lowercased) and returns its canonical stored form. Empty input always
//! yields an empty string, meaning the segment is absent.
//!
//! Post and dev tags are returned without their leading `.` separator; the
//! renderer adds it back.

const SEPARATORS: [char; 3] = ['.', '-', '_'];

fn strip_separators(tag: &str) -> String {
    tag.chars().filter(|c| !SEPARATORS.contains(c)).collect()
}

fn strip_leading_separator(tag: &str) -> &str {
    tag.strip_prefix(SEPARATORS).unwrap_or(tag)
}

fn is_all_digits(tag: &str) -> bool {
    tag.chars().all(|c| c.is_ascii_digit())
}

/// Split `tag` into its leading text and trailing run of ASCII digits.
pub(crate) fn split_trailing_digits(tag: &str) -> (&str, &str) {
    let stem = tag.trim_end_matches(|c: char| c.is_ascii_digit());
    (stem, &tag[stem.len()..])
}

fn strip_leading_zeros(digits: &str) -> &str {
    let trimmed = digits.trim_start_matches('0');
    if trimmed.is_empty() {
        "0"
    } else {
        trimmed
    }
}

/// A tag without a numeral gets an explicit `0`; an existing numeral loses
/// its leading zeros (`a` -> `a0`, `a01` -> `a1`).
fn implicit_numeral(tag: &str) -> String {
    let (stem, digits) = split_trailing_digits(tag);
    if stem.is_empty() || digits.is_empty() {
        format!("{tag}0")
    } else {
        format!("{stem}{}", strip_leading_zeros(digits))
    }
}

/// Normalize a pre-release segment to `aN`, `bN` or `rcN`.
pub fn pre_release(tag: &str) -> String {
    if tag.is_empty() {
        return String::new();
    }
    let mut tag = strip_separators(tag)
        .replace("alpha", "a")
        .replace("beta", "b");
    if tag.starts_with('c') {
        tag = tag.replace('c', "rc");
    }
    let mut tag = tag.replace("preview", "rc").replace("pre", "rc");
    if tag.is_empty() {
        tag = "pre0".to_string();
    }
    if is_all_digits(&tag) {
        tag = format!("pre{tag}");
    }
    implicit_numeral(&tag)
}

/// Normalize a post-release segment to `postN`.
pub fn post_release(tag: &str) -> String {
    if tag.is_empty() {
        return String::new();
    }
    let mut tag = strip_separators(strip_leading_separator(tag))
        .replace("rev", "post")
        .replace('r', "post");
    if tag.is_empty() {
        tag = "post0".to_string();
    }
    if is_all_digits(&tag) {
        tag = format!("post{tag}");
    }
    implicit_numeral(&tag)
}

/// Normalize a dev-release segment to `devN`.
pub fn dev_release(tag: &str) -> String {
    if tag.is_empty() {
        return String::new();
    }
    let mut tag = strip_separators(strip_leading_separator(tag));
    if tag.is_empty() {
        tag = "dev0".to_string();
    }
    if is_all_digits(&tag) {
        tag = format!("dev{tag}");
    }
    implicit_numeral(&tag)
}

/// Normalize a local segment so `.` is the only separator.
pub fn local(tag: &str) -> String {
    tag.replace(['-', '_'], ".")
}

/// Add one to a run of decimal digits, keeping its width
/// (`0123` -> `0124`, `99` -> `100`, empty -> `1`).
pub(crate) fn increment_digits(digits: &str) -> String {
    let mut out: Vec<char> = digits.chars().collect();
    for c in out.iter_mut().rev() {
        if *c == '9' {
            *c = '0';
        } else {
            *c = char::from_digit(c.to_digit(10).unwrap_or(0) + 1, 10).unwrap_or('1');
            return out.into_iter().collect();
        }
    }
    out.insert(0, '1');
    out.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pre_release_spellings() {
        assert_eq!(pre_release("a1"), "a1");
        assert_eq!(pre_release("alpha1"), "a1");
        assert_eq!(pre_release("beta2"), "b2");
        assert_eq!(pre_release("c3"), "rc3");
        assert_eq!(pre_release("pre4"), "rc4");
        assert_eq!(pre_release("preview5"), "rc5");
        assert_eq!(pre_release("rc6"), "rc6");
    }

    #[test]
    fn test_pre_release_separators_and_numerals() {
        assert_eq!(pre_release(".a"), "a0");
        assert_eq!(pre_release("-a.2"), "a2");
        assert_eq!(pre_release("_a_2"), "a2");
        assert_eq!(pre_release("a01"), "a1");
        assert_eq!(pre_release("a000"), "a0");
        assert_eq!(pre_release("preview"), "rc0");
    }

    #[test]
    fn test_pre_release_bare_numeral_gets_stem() {
        assert_eq!(pre_release("7"), "pre7");
    }

    #[test]
    fn test_pre_release_empty() {
        assert_eq!(pre_release(""), "");
    }

    #[test]
    fn test_post_release() {
        assert_eq!(post_release(".post1"), "post1");
        assert_eq!(post_release("-post-1"), "post1");
        assert_eq!(post_release("_post_01"), "post1");
        assert_eq!(post_release("post"), "post0");
        assert_eq!(post_release("-1"), "post1");
        assert_eq!(post_release("r4"), "post4");
        assert_eq!(post_release(".rev2"), "post2");
        assert_eq!(post_release("4"), "post4");
        assert_eq!(post_release(""), "");
    }

    #[test]
    fn test_dev_release() {
        assert_eq!(dev_release(".dev1"), "dev1");
        assert_eq!(dev_release("-dev-1"), "dev1");
        assert_eq!(dev_release("dev"), "dev0");
        assert_eq!(dev_release("dev007"), "dev7");
        assert_eq!(dev_release("3"), "dev3");
        assert_eq!(dev_release(""), "");
    }

    #[test]
    fn test_local() {
        assert_eq!(local("ubuntu-1"), "ubuntu.1");
        assert_eq!(local("ubuntu_1"), "ubuntu.1");
        assert_eq!(local("a-b_c.d"), "a.b.c.d");
        assert_eq!(local(""), "");
    }

    #[test]
    fn test_split_trailing_digits() {
        assert_eq!(split_trailing_digits("foo0123"), ("foo", "0123"));
        assert_eq!(split_trailing_digits("foo"), ("foo", ""));
        assert_eq!(split_trailing_digits("42"), ("", "42"));
        assert_eq!(split_trailing_digits(""), ("", ""));
    }

    #[test]
    fn test_increment_digits() {
        assert_eq!(increment_digits("0"), "1");
        assert_eq!(increment_digits("0123"), "0124");
        assert_eq!(increment_digits("0109"), "0110");
        assert_eq!(increment_digits("99"), "100");
        assert_eq!(increment_digits(""), "1");
        assert_eq!(
            increment_digits("18446744073709551615"),
            "18446744073709551616"
        );
    }
}
