//! Slug generation from titles.
//!
//! A slug is built word by word: the title is lowercased, English stopwords are
//! dropped, remaining words are transliterated to ASCII and reduced to
//! `[a-z0-9]`, then joined with `-`. Slugs longer than the limit lose whole
//! trailing words until they fit.

use deunicode::deunicode_char;

pub const DEFAULT_SLUG_LENGTH: usize = 50;

const STOPWORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and",
    "any", "are", "as", "at", "be", "because", "been", "before", "being", "below",
    "between", "both", "but", "by", "can", "could", "did", "do", "does", "doing", "down",
    "during", "each", "either", "else", "ever", "every", "few", "for", "from", "further",
    "had", "has", "have", "having", "he", "her", "here", "hers", "herself", "him",
    "himself", "his", "how", "however", "i", "if", "in", "into", "is", "it", "its",
    "itself", "just", "let", "me", "more", "most", "must", "my", "myself", "neither",
    "never", "no", "nor", "not", "now", "of", "off", "often", "on", "once", "only", "or",
    "other", "ought", "our", "ours", "ourselves", "out", "over", "own", "same", "shall",
    "she", "should", "so", "some", "such", "than", "that", "the", "their", "theirs",
    "them", "themselves", "then", "there", "these", "they", "this", "those", "through",
    "to", "too", "under", "until", "up", "upon", "us", "very", "was", "we", "were",
    "what", "when", "where", "whether", "which", "while", "who", "whom", "whose", "why",
    "will", "with", "within", "without", "would", "yet", "you", "your", "yours",
    "yourself", "yourselves",
];

/// Symbols that read as a word in a title.
fn symbol_word(c: char) -> Option<&'static str> {
    Some(match c {
        '&' => "and",
        '♥' => "love",
        '∞' => "infinity",
        '%' => "percent",
        '$' => "dollar",
        '€' => "euro",
        '£' => "pound",
        '¥' => "yen",
        '¢' => "cent",
        '©' => "c",
        '®' => "r",
        '™' => "tm",
        _ => return None,
    })
}

fn is_stopword(word: &str) -> bool {
    let bare = word.trim_matches(|c: char| !c.is_alphanumeric());
    !bare.is_empty() && STOPWORDS.contains(&bare)
}

/// Reduces one word to ASCII slug fragments. A transliteration may itself
/// contain separators (`"北京"` becomes `"bei jing"`), hence the `Vec`.
fn fragments(word: &str) -> Vec<String> {
    let mut ascii = String::new();
    for c in word.chars() {
        if let Some(w) = symbol_word(c) {
            ascii.push(' ');
            ascii.push_str(w);
            ascii.push(' ');
        } else if c.is_ascii() {
            ascii.push(c);
        } else if c.is_alphanumeric() {
            if let Some(t) = deunicode_char(c) {
                ascii.push_str(t);
            }
        }
        // Other symbols and emoji are dropped.
    }
    ascii
        .to_ascii_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

/// Builds a slug for `title` no longer than `limit` bytes.
///
/// ```
/// use quillapp::slug::slugify;
///
/// assert_eq!(slugify("This is the song that never ends", 50), "song-ends");
/// assert_eq!(slugify("I ♥ chickens", 50), "love-chickens");
/// ```
pub fn slugify(title: &str, limit: usize) -> String {
    let lowered = title.to_lowercase();
    let mut slug = lowered
        .split_whitespace()
        .filter(|word| !is_stopword(word))
        .flat_map(fragments)
        .collect::<Vec<_>>()
        .join("-");

    while slug.len() > limit {
        match slug.rfind('-') {
            Some(cut) => slug.truncate(cut),
            None => slug.truncate(limit),
        }
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_titles() {
        assert_eq!(
            slugify("Amazing Incredible Beautiful", DEFAULT_SLUG_LENGTH),
            "amazing-incredible-beautiful"
        );
        assert_eq!(slugify("Test", DEFAULT_SLUG_LENGTH), "test");
    }

    #[test]
    fn removes_stopwords_and_emoji() {
        assert_eq!(slugify("I ♥ chickens", DEFAULT_SLUG_LENGTH), "love-chickens");
        assert_eq!(slugify("Chicken poop is ☢", DEFAULT_SLUG_LENGTH), "chicken-poop");
        assert_eq!(
            slugify("This is the song that never ends", DEFAULT_SLUG_LENGTH),
            "song-ends"
        );
    }

    #[test]
    fn trims_whole_words() {
        assert_eq!(
            slugify(
                "Amazing Incredible Beautiful Unique Dazzling Wonderful",
                DEFAULT_SLUG_LENGTH
            ),
            "amazing-incredible-beautiful-unique-dazzling"
        );
        assert_eq!(slugify("alpha beta gamma", 10), "alpha-beta");
    }

    #[test]
    fn single_long_word_is_cut() {
        assert_eq!(slugify("supercalifragilistic", 5), "super");
    }

    #[test]
    fn transliterates_accents_and_punctuation() {
        assert_eq!(slugify("Crème Brûlée!", DEFAULT_SLUG_LENGTH), "creme-brulee");
        assert_eq!(slugify("Rust: 2024 edition", DEFAULT_SLUG_LENGTH), "rust-2024-edition");
        assert_eq!(slugify("Salt & Pepper", DEFAULT_SLUG_LENGTH), "salt-and-pepper");
    }

    #[test]
    fn empty_and_stopword_only_titles() {
        assert_eq!(slugify("", DEFAULT_SLUG_LENGTH), "");
        assert_eq!(slugify("The", DEFAULT_SLUG_LENGTH), "");
    }
}
