//! Languages Mux can generate subtitles for.
//!
//! The catalog is fixed; maturity is informational and never gates
//! selection.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// How mature speech recognition is for a language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LanguageMaturity {
    Stable,
    Beta,
}

impl LanguageMaturity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stable => "Stable",
            Self::Beta => "Beta",
        }
    }
}

impl fmt::Display for LanguageMaturity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One entry of the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Language {
    pub label: &'static str,
    pub code: &'static str,
    pub maturity: LanguageMaturity,
}

const fn stable(label: &'static str, code: &'static str) -> Language {
    Language { label, code, maturity: LanguageMaturity::Stable }
}

const fn beta(label: &'static str, code: &'static str) -> Language {
    Language { label, code, maturity: LanguageMaturity::Beta }
}

static LANGUAGES: [Language; 22] = [
    stable("English", "en"),
    stable("Spanish", "es"),
    stable("Italian", "it"),
    stable("Portuguese", "pt"),
    stable("German", "de"),
    stable("French", "fr"),
    beta("Polish", "pl"),
    beta("Russian", "ru"),
    beta("Dutch", "nl"),
    beta("Catalan", "ca"),
    beta("Turkish", "tr"),
    beta("Swedish", "sv"),
    beta("Ukrainian", "uk"),
    beta("Norwegian", "no"),
    beta("Finnish", "fi"),
    beta("Slovak", "sk"),
    beta("Greek", "el"),
    beta("Czech", "cs"),
    beta("Croatian", "hr"),
    beta("Danish", "da"),
    beta("Romanian", "ro"),
    beta("Bulgarian", "bg"),
];

/// All supported languages in display order.
pub fn list_languages() -> &'static [Language] {
    &LANGUAGES
}

pub fn find_language(code: &str) -> Option<&'static Language> {
    LANGUAGES.iter().find(|l| l.code == code)
}

pub fn is_supported_language(code: &str) -> bool {
    find_language(code).is_some()
}

/// A language code that is known to be in the registry.
///
/// Serializes as the bare code (`"en"`). Deserializing an unknown code fails,
/// which keeps autogenerated tracks limited to languages Mux can transcribe.
///
/// ```
/// use mux_upload_core::languages::LanguageCode;
///
/// let code = LanguageCode::new("de").unwrap();
/// assert_eq!(code.as_str(), "de");
/// assert_eq!(code.language().label, "German");
/// assert!(LanguageCode::new("xx").is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LanguageCode(&'static Language);

impl LanguageCode {
    pub fn new(code: &str) -> Option<Self> {
        find_language(code).map(Self)
    }

    pub fn as_str(&self) -> &'static str {
        self.0.code
    }

    pub fn language(&self) -> &'static Language {
        self.0
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for LanguageCode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for LanguageCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(&s).ok_or_else(|| {
            serde::de::Error::custom(format!("unsupported subtitle language '{}'", s))
        })
    }
}
