//! Note slugs: validation and derivation from titles.
//!
//! A slug is a non-empty run of ASCII letters, digits, hyphens, and
//! underscores, at most [`SLUG_MAX_LEN`] characters long. Slugs derived from
//! titles are lowercased and Cyrillic letters are transliterated to Latin.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Maximum length of a note slug.
pub const SLUG_MAX_LEN: usize = 100;

/// Validation errors returned by [`NoteSlug::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SlugValidationError {
    /// The slug was empty.
    #[error("slug must not be empty")]
    Empty,
    /// The slug exceeded [`SLUG_MAX_LEN`].
    #[error("slug must be at most {max} characters")]
    TooLong {
        /// Maximum accepted length.
        max: usize,
    },
    /// The slug contained characters outside the slug alphabet.
    #[error("slug may only contain latin letters, digits, hyphens, or underscores")]
    InvalidCharacters,
}

/// Unique, URL-safe note identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NoteSlug(String);

impl NoteSlug {
    /// Validate and construct a slug.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::NoteSlug;
    ///
    /// assert!(NoteSlug::new("new-note").is_ok());
    /// assert!(NoteSlug::new("новая").is_err());
    /// ```
    pub fn new(value: impl Into<String>) -> Result<Self, SlugValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(SlugValidationError::Empty);
        }
        if value.chars().count() > SLUG_MAX_LEN {
            return Err(SlugValidationError::TooLong { max: SLUG_MAX_LEN });
        }
        if !value.chars().all(is_slug_char) {
            return Err(SlugValidationError::InvalidCharacters);
        }
        Ok(Self(value))
    }

    /// Derive a slug from a note title, truncated to [`SLUG_MAX_LEN`].
    ///
    /// Returns `None` when nothing of the title survives derivation.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::NoteSlug;
    ///
    /// let slug = NoteSlug::from_title("Новая заметка").expect("derivable");
    /// assert_eq!(slug.as_ref(), "novaya-zametka");
    /// assert!(NoteSlug::from_title("?!").is_none());
    /// ```
    pub fn from_title(title: &str) -> Option<Self> {
        let derived: String = slugify(title).chars().take(SLUG_MAX_LEN).collect();
        Self::new(derived).ok()
    }
}

fn is_slug_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '-' || ch == '_'
}

impl AsRef<str> for NoteSlug {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for NoteSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<NoteSlug> for String {
    fn from(value: NoteSlug) -> Self {
        value.0
    }
}

impl TryFrom<String> for NoteSlug {
    type Error = SlugValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Turn free text into a lowercase hyphenated slug.
///
/// Runs of whitespace and dashes collapse into one hyphen. `&` and the
/// `&amp;` entity read as `and`. Cyrillic letters are transliterated and any
/// other character outside ASCII letters, digits and `_` is dropped. The
/// result is not truncated.
///
/// # Examples
/// ```
/// use backend::domain::slugify;
///
/// assert_eq!(slugify("Заметка пользователя 1"), "zametka-polzovatelya-1");
/// assert_eq!(slugify("Tom & Jerry"), "tom-and-jerry");
/// ```
pub fn slugify(input: &str) -> String {
    let lowered = input
        .trim()
        .to_lowercase()
        .replace("&amp;", " and ")
        .replace('&', " and ");
    let mut slug = String::with_capacity(lowered.len());
    let mut pending_separator = false;

    for ch in lowered.chars() {
        if ch.is_whitespace() || is_dash(ch) {
            pending_separator = true;
            continue;
        }
        if pending_separator {
            slug.push('-');
            pending_separator = false;
        }
        if ch.is_ascii_alphanumeric() || ch == '_' {
            slug.push(ch);
        } else if let Some(latin) = transliterate(ch) {
            slug.push_str(latin);
        }
    }
    if pending_separator {
        slug.push('-');
    }
    slug
}

fn is_dash(ch: char) -> bool {
    matches!(ch, '-' | '\u{2012}' | '\u{2013}' | '\u{2014}' | '\u{2212}')
}

/// Latin spelling of a lowercase Cyrillic letter.
fn transliterate(ch: char) -> Option<&'static str> {
    let latin = match ch {
        'а' => "a",
        'б' => "b",
        'в' => "v",
        'г' => "g",
        'д' => "d",
        'е' => "e",
        'ё' => "yo",
        'ж' => "zh",
        'з' => "z",
        'и' => "i",
        'й' => "j",
        'к' => "k",
        'л' => "l",
        'м' => "m",
        'н' => "n",
        'о' => "o",
        'п' => "p",
        'р' => "r",
        'с' => "s",
        'т' => "t",
        'у' => "u",
        'ф' => "f",
        'х' => "h",
        'ц' => "ts",
        'ч' => "ch",
        'ш' => "sh",
        'щ' => "sch",
        'ъ' | 'ь' => "",
        'ы' => "y",
        'э' => "e",
        'ю' => "yu",
        'я' => "ya",
        'є' => "ye",
        'і' => "i",
        'ї' => "yi",
        'ґ' => "g",
        _ => return None,
    };
    Some(latin)
}
