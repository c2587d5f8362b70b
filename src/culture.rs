//! Language (culture) identifiers.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::hash::{
    Hash,
    Hasher,
};
use std::sync::LazyLock;

use crate::ordering::{
    compare_ignore_case,
    hash_ignore_case,
};

/// ISO 639 primary language subtags accepted in resource file names.
static PRIMARY_LANGUAGES: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "af", "am", "ar", "as", "az", "ba", "be", "bg", "bn", "bo", "br", "bs", "ca", "co", "cs",
        "cy", "da", "de", "dv", "el", "en", "es", "et", "eu", "fa", "fi", "fo", "fr", "fy", "ga",
        "gd", "gl", "gu", "ha", "he", "hi", "hr", "hu", "hy", "id", "ig", "ii", "is", "it", "iu",
        "ja", "ka", "kk", "kl", "km", "kn", "ko", "ky", "lb", "lo", "lt", "lv", "mi", "mk", "ml",
        "mn", "mr", "ms", "mt", "nb", "ne", "nl", "nn", "no", "oc", "or", "pa", "pl", "ps", "pt",
        "rm", "ro", "ru", "rw", "sa", "se", "si", "sk", "sl", "sq", "sr", "sv", "sw", "ta", "te",
        "tg", "th", "tk", "tn", "tr", "tt", "ug", "uk", "ur", "uz", "vi", "wo", "xh", "yo", "zh",
        "zu", "arn", "fil", "gsw", "haw", "kok", "moh", "nso", "prs", "qut", "quz", "sah", "sma",
        "smj", "smn", "sms", "syr", "tzm",
    ]
    .into_iter()
    .collect()
});

/// Name of a language, e.g. `""` (neutral), `"de"` or `"en-US"`.
///
/// Equality, ordering and hashing ignore case, so `"en-us"` and `"en-US"` name
/// the same language. The neutral culture sorts before every other one.
#[derive(Debug, Clone, Default)]
pub struct Culture {
    name: String,
}

impl Culture {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// The neutral (invariant) culture backing the default resource file.
    #[must_use]
    pub const fn neutral() -> Self {
        Self { name: String::new() }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn is_neutral(&self) -> bool {
        self.name.is_empty()
    }
}

impl PartialEq for Culture {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Culture {}

impl PartialOrd for Culture {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Culture {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_ignore_case(&self.name, &other.name)
    }
}

impl Hash for Culture {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_ignore_case(&self.name, state);
    }
}

impl fmt::Display for Culture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl From<&str> for Culture {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Culture {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

/// Checks whether `candidate` looks like a culture name.
///
/// The primary subtag must be a known language code; any further subtags
/// (script, region) must be 2 to 8 ASCII alphanumerics.
///
/// # Examples
/// - `de` → `true`
/// - `zh-Hant-TW` → `true`
/// - `Designer` → `false`
#[must_use]
pub fn is_culture_name(candidate: &str) -> bool {
    let mut subtags = candidate.split('-');
    let Some(primary) = subtags.next() else {
        return false;
    };
    if !PRIMARY_LANGUAGES.contains(primary.to_ascii_lowercase().as_str()) {
        return false;
    }
    subtags.all(|subtag| {
        (2..=8).contains(&subtag.len()) && subtag.chars().all(|c| c.is_ascii_alphanumeric())
    })
}
