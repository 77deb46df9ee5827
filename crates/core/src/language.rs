//! Language code and display-name resolution.
//!
//! Providers report languages as human-readable names in the reader's locale.
//! The built-in table covers the languages the library UI is translated into.

/// Resolves ISO 639 codes to display names for a locale.
pub trait LanguageNames: Send + Sync {
    /// ISO 639-1 (`ko`) to ISO 639-2/T (`kor`).
    fn lang3(&self, code: &str) -> Option<&'static str>;

    /// Name of the language `lang3` written in the language of `locale`.
    fn display_name(&self, locale: &str, lang3: &str) -> String;
}

const CODES: &[(&str, &str)] = &[
    ("cs", "ces"),
    ("de", "deu"),
    ("el", "ell"),
    ("en", "eng"),
    ("es", "spa"),
    ("fi", "fin"),
    ("fr", "fra"),
    ("hu", "hun"),
    ("it", "ita"),
    ("ja", "jpn"),
    ("ko", "kor"),
    ("nl", "nld"),
    ("pl", "pol"),
    ("pt", "por"),
    ("ru", "rus"),
    ("sv", "swe"),
    ("tr", "tur"),
    ("uk", "ukr"),
    ("zh", "zho"),
];

// (locale, lang3, name)
const NAMES: &[(&str, &str, &str)] = &[
    ("en", "kor", "Korean"),
    ("en", "eng", "English"),
    ("en", "jpn", "Japanese"),
    ("en", "zho", "Chinese"),
    ("en", "deu", "German"),
    ("en", "fra", "French"),
    ("en", "spa", "Spanish"),
    ("ko", "kor", "한국어"),
    ("ko", "eng", "영어"),
    ("ko", "jpn", "일본어"),
    ("ko", "zho", "중국어"),
    ("cs", "kor", "korejština"),
    ("de", "kor", "Koreanisch"),
    ("el", "kor", "Κορεατικά"),
    ("es", "kor", "coreano"),
    ("fi", "kor", "korea"),
    ("fr", "kor", "coréen"),
    ("hu", "kor", "koreai"),
    ("it", "kor", "coreano"),
    ("ja", "kor", "韓国語"),
    ("nl", "kor", "Koreaans"),
    ("pl", "kor", "koreański"),
    ("pt", "kor", "coreano"),
    ("ru", "kor", "корейский"),
    ("sv", "kor", "koreanska"),
    ("tr", "kor", "Korece"),
    ("uk", "kor", "корейська"),
    ("zh", "kor", "韩语"),
];

/// Table-backed resolver. Unknown locales fall back to English, unknown
/// languages to the raw code.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticLanguageNames;

/// Primary subtag of a locale: `ko_KR` and `ko-KR` become `ko`.
fn primary_subtag(locale: &str) -> String {
    locale
        .split(['_', '-'])
        .next()
        .unwrap_or(locale)
        .to_ascii_lowercase()
}

fn lookup_name(locale: &str, lang3: &str) -> Option<&'static str> {
    NAMES
        .iter()
        .find(|(l, code, _)| *l == locale && *code == lang3)
        .map(|(_, _, name)| *name)
}

impl LanguageNames for StaticLanguageNames {
    fn lang3(&self, code: &str) -> Option<&'static str> {
        let code = code.to_ascii_lowercase();
        CODES
            .iter()
            .find(|(two, three)| *two == code || *three == code)
            .map(|(_, three)| *three)
    }

    fn display_name(&self, locale: &str, lang3: &str) -> String {
        let locale = primary_subtag(locale);
        lookup_name(&locale, lang3)
            .or_else(|| lookup_name("en", lang3))
            .map(String::from)
            .unwrap_or_else(|| lang3.to_string())
    }
}
