//! Case-insensitive ordering shared by keys, cultures and entities.
//!
//! Every comparison in the model goes through [`compare_ignore_case`], so sorting,
//! equality and hashing can never disagree with each other.

use std::cmp::Ordering;
use std::hash::Hasher;

/// Upper-case form of `c` under one-to-one mapping.
///
/// Characters whose upper case spans several characters (`ß` → `SS`) are kept
/// as they are, so the mapped string always has as many characters as the input.
#[must_use]
pub fn upper_invariant_char(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(single), None) => single,
        _ => c,
    }
}

/// Upper-invariant form of `value`, character by character.
#[must_use]
pub fn upper_invariant(value: &str) -> String {
    value.chars().map(upper_invariant_char).collect()
}

/// Ordinal comparison of the upper-invariant character streams of `a` and `b`.
///
/// # Examples
/// ```
/// use std::cmp::Ordering;
/// use resx_entity::ordering::compare_ignore_case;
///
/// assert_eq!(compare_ignore_case("title", "TITLE"), Ordering::Equal);
/// assert_eq!(compare_ignore_case("apple", "Banana"), Ordering::Less);
/// assert_ne!(compare_ignore_case("straße", "STRASSE"), Ordering::Equal);
/// ```
#[must_use]
pub fn compare_ignore_case(a: &str, b: &str) -> Ordering {
    a.chars().map(upper_invariant_char).cmp(b.chars().map(upper_invariant_char))
}

#[must_use]
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    compare_ignore_case(a, b) == Ordering::Equal
}

/// Ordering of resource keys: upper-invariant form first, ordinal as tie breaker.
///
/// The tie breaker only matters for keys differing in case (`"a"` / `"A"`) and
/// keeps the entry order deterministic.
#[must_use]
pub fn compare_keys(a: &str, b: &str) -> Ordering {
    compare_ignore_case(a, b).then_with(|| a.cmp(b))
}

/// Feeds the upper-invariant form of `value` into `state`.
///
/// Consistent with [`eq_ignore_case`]: equal strings hash equally.
pub fn hash_ignore_case<H: Hasher>(value: &str, state: &mut H) {
    for c in value.chars().map(upper_invariant_char) {
        state.write_u32(u32::from(c));
    }
    state.write_u8(0xff);
}

/// Byte index of the last occurrence of `needle` in `haystack`, ignoring case.
///
/// Matches are aligned on character boundaries and span as many characters as
/// `needle`.
#[must_use]
pub fn rfind_ignore_case(haystack: &str, needle: &str) -> Option<usize> {
    let needle_chars = needle.chars().count();
    haystack.char_indices().rev().map(|(index, _)| index).find(|&index| {
        haystack.get(index..).is_some_and(|rest| {
            rest.chars().count() >= needle_chars
                && rest
                    .chars()
                    .take(needle_chars)
                    .map(upper_invariant_char)
                    .eq(needle.chars().map(upper_invariant_char))
        })
    })
}
