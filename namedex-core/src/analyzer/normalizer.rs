use std::borrow::Cow;
use std::sync::LazyLock;

use memchr::memmem;
use regex::Regex;

/// UTF-8 encoding of U+200E LEFT-TO-RIGHT MARK.
const LRM_BYTES: &[u8] = "\u{200E}".as_bytes();

/// Trailing parenthesized qualifier, e.g. `"(alpine dialect)"`.
static TRAILING_QUALIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\(.*\)$").expect("qualifier pattern is valid")
});

/// Language-name normalizer.
///
/// Turns a raw display name into the form used both as a display string and
/// as the source of search tokens:
/// - Removes U+200E directionality marks
/// - Lowercases with the full Unicode mapping
/// - Trims leading/trailing Unicode whitespace
/// - Computes the *basic form*: the name without a trailing `(...)` qualifier
///
/// # Examples
///
/// ```
/// use namedex_core::analyzer::NameNormalizer;
///
/// let normalizer = NameNormalizer::default();
/// let name = normalizer.normalize("German Swiss (Alpine Dialect)");
/// assert_eq!(name.full(), "german swiss (alpine dialect)");
/// assert_eq!(name.basic_form(), "german swiss");
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct NameNormalizer {
    _private: (),
}

/// Result of [`NameNormalizer::normalize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedName {
    full: String,
    basic_end: usize,
}

impl NormalizedName {
    /// The cleaned name, qualifier included.
    #[inline(always)]
    pub fn full(&self) -> &str {
        &self.full
    }

    /// The cleaned name without its trailing qualifier.
    #[inline(always)]
    pub fn basic_form(&self) -> &str {
        &self.full[..self.basic_end]
    }

    /// Whitespace-separated words of the basic form.
    #[inline]
    pub fn tokens(&self) -> super::Tokens<'_> {
        super::Tokenizer::new().tokens(self.basic_form())
    }
}

impl NameNormalizer {
    /// Creates a new normalizer.
    pub const fn new() -> Self {
        Self { _private: () }
    }

    /// Removes marks, lowercases and trims `input` into `out`.
    ///
    /// Clears the buffer before writing and reuses its capacity.
    pub fn clean_into(&self, input: &str, out: &mut String) {
        out.clear();

        let stripped = strip_direction_marks(input);
        if stripped.is_ascii() {
            out.push_str(&stripped);
            out.make_ascii_lowercase();
        } else {
            out.push_str(&stripped.to_lowercase());
        }

        trim_in_place(out);
    }

    /// Removes marks, lowercases and trims `input`.
    #[inline]
    pub fn clean(&self, input: &str) -> String {
        let mut out = String::with_capacity(input.len());
        self.clean_into(input, &mut out);
        out
    }

    /// Cleans `input` into `out` and returns the byte length of its basic
    /// form, so that `&out[..len]` is the name without its qualifier.
    pub fn normalize_into(&self, input: &str, out: &mut String) -> usize {
        self.clean_into(input, out);
        basic_form_len(out)
    }

    /// Cleans `input` and splits off its basic form.
    #[inline]
    pub fn normalize(&self, input: &str) -> NormalizedName {
        let mut full = String::with_capacity(input.len());
        let basic_end = self.normalize_into(input, &mut full);
        NormalizedName { full, basic_end }
    }
}

fn strip_direction_marks(input: &str) -> Cow<'_, str> {
    let bytes = input.as_bytes();
    let mut hits = memmem::find_iter(bytes, LRM_BYTES).peekable();
    if hits.peek().is_none() {
        return Cow::Borrowed(input);
    }

    let mut out = String::with_capacity(input.len());
    let mut start = 0usize;
    for pos in hits {
        // The mark starts with a lead byte, so every hit is a char boundary.
        out.push_str(&input[start..pos]);
        start = pos + LRM_BYTES.len();
    }
    out.push_str(&input[start..]);
    Cow::Owned(out)
}

fn trim_in_place(s: &mut String) {
    let end = s.trim_end().len();
    s.truncate(end);
    let start = s.len() - s.trim_start().len();
    if start > 0 {
        s.drain(..start);
    }
}

fn basic_form_len(cleaned: &str) -> usize {
    match TRAILING_QUALIFIER.find(cleaned) {
        Some(m) => cleaned[..m.start()].trim_end().len(),
        None => cleaned.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn clean(input: &str) -> String {
        NameNormalizer::default().clean(input)
    }

    fn basic(input: &str) -> String {
        NameNormalizer::default().normalize(input).basic_form().to_owned()
    }

    #[test]
    fn ascii_lowercase() {
        assert_eq!(clean("English"), "english");
        assert_eq!(clean("CHINESE Simplified"), "chinese simplified");
    }

    #[test]
    fn unicode_lowercase() {
        assert_eq!(clean("Русский"), "русский");
        assert_eq!(clean("ÍSLENSKA"), "íslenska");
        assert_eq!(clean("Ελληνικά"), "ελληνικά");
        assert_eq!(clean("ՀԱՅԵՐԵՆ"), "հայերեն");
    }

    #[test]
    fn final_sigma_is_context_aware() {
        assert_eq!(clean("ΟΔΟΣ"), "\u{3bf}\u{3b4}\u{3bf}\u{3c2}");
    }

    #[test]
    fn uncased_scripts_pass_through() {
        assert_eq!(clean("日本語"), "日本語");
        assert_eq!(clean("العربية"), "العربية");
        assert_eq!(clean("ქართული"), "ქართული");
    }

    #[test]
    fn direction_marks_removed() {
        assert_eq!(clean("\u{200E}english"), "english");
        assert_eq!(clean("eng\u{200E}lish\u{200E}"), "english");
        assert_eq!(clean("\u{200E}\u{200E}"), "");
    }

    #[test]
    fn name_with_mark_equals_name_without() {
        let n = NameNormalizer::default();
        assert_eq!(
            n.normalize("Suomi\u{200E} (Finland)"),
            n.normalize("Suomi (Finland)")
        );
    }

    #[test]
    fn other_format_controls_kept() {
        assert_eq!(clean("a\u{200F}b"), "a\u{200F}b");
        assert_eq!(clean("a\u{200B}b"), "a\u{200B}b");
    }

    #[test]
    fn trims_unicode_whitespace() {
        assert_eq!(clean("  english \t"), "english");
        assert_eq!(clean("\u{3000}日本語\u{00A0}"), "日本語");
        assert_eq!(clean("   "), "");
    }

    #[test]
    fn mark_inside_leading_whitespace_is_trimmed() {
        assert_eq!(clean(" \u{200E} english"), "english");
    }

    #[test]
    fn trailing_qualifier_stripped() {
        assert_eq!(basic("Foo Bar (Qualifier)"), "foo bar");
        assert_eq!(
            basic("gjermanishte zvicerane (dialekti i alpeve)"),
            "gjermanishte zvicerane"
        );
    }

    #[test]
    fn qualifier_only_at_end() {
        assert_eq!(basic("foo (bar) baz"), "foo (bar) baz");
    }

    #[test]
    fn qualifier_match_starts_at_first_paren() {
        assert_eq!(basic("a (b) c (d)"), "a");
    }

    #[test]
    fn empty_parens_stripped() {
        assert_eq!(basic("foo ()"), "foo");
    }

    #[test]
    fn only_parenthetical_is_empty() {
        let name = NameNormalizer::default().normalize("(only parenthetical)");
        assert_eq!(name.full(), "(only parenthetical)");
        assert_eq!(name.basic_form(), "");
        assert!(name.tokens().is_empty());
    }

    #[test]
    fn no_qualifier_basic_equals_full() {
        let name = NameNormalizer::default().normalize("  Norsk Bokmål ");
        assert_eq!(name.full(), "norsk bokmål");
        assert_eq!(name.basic_form(), name.full());
    }

    #[test]
    fn tokens_from_basic_form() {
        let name = NameNormalizer::default().normalize("Foo Bar (Qualifier)");
        assert_eq!(name.tokens().as_slice(), ["foo", "bar"]);
    }

    #[test]
    fn normalize_into_reuses_capacity() {
        let normalizer = NameNormalizer::default();
        let mut buf = String::with_capacity(64);
        let cap = buf.capacity();

        let end = normalizer.normalize_into("Chinese (Simplified)", &mut buf);
        assert_eq!(&buf[..end], "chinese");
        assert_eq!(buf.capacity(), cap);

        let end = normalizer.normalize_into("ENGLISH", &mut buf);
        assert_eq!(&buf[..end], "english");
        assert_eq!(buf.capacity(), cap);
    }

    #[test]
    fn empty_input() {
        let name = NameNormalizer::default().normalize("");
        assert_eq!(name.full(), "");
        assert_eq!(name.basic_form(), "");
    }

    #[test]
    fn idempotent_on_basic_form() {
        let n = NameNormalizer::default();
        let samples = ["Foo Bar (Qualifier)", "  ÜBER Café ", "Русский язык"];

        for s in samples {
            let once = n.normalize(s);
            let twice = n.normalize(once.basic_form());
            assert_eq!(once.basic_form(), twice.basic_form());
        }
    }

    proptest! {
        #[test]
        fn basic_form_is_a_fixed_point(name in "[a-zA-ZÀ-ÿ ()\u{200E}]{0,32}") {
            let n = NameNormalizer::default();
            let once = n.normalize(&name);
            let twice = n.normalize(once.basic_form());
            prop_assert_eq!(once.basic_form(), twice.basic_form());
            prop_assert!(
                !once.full().contains('\u{200E}'),
                "direction mark left in {:?}",
                once.full()
            );
        }
    }
}
