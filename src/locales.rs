//! Known locale codes and their display names.
//!
//! The display name is embedded in the per-file prompt document so the
//! generation service knows which language each i18n key should carry.

use crate::context::Locale;

/// Locale codes the prompts have been exercised with. Codes outside this
/// table are passed through with the code doubling as the display name.
const KNOWN_LOCALES: &[(&str, &str)] = &[
    ("en-US", "English"),
    ("ja-JP", "日本語"),
    ("ko-KR", "한국어"),
    ("fr-FR", "Français"),
    ("de-DE", "Deutsch"),
    ("es-ES", "Español"),
    ("zh-CN", "中文"),
    ("zh-TW", "繁體中文"),
    ("zh-HK", "繁體中文"),
];

/// Resolve a locale code to a `Locale`, falling back to the code itself as
/// the display name for codes not in the table.
pub fn resolve(code: &str) -> Locale {
    let name = KNOWN_LOCALES
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(code))
        .map(|(_, name)| (*name).to_string())
        .unwrap_or_else(|| code.to_string());

    Locale {
        name,
        code: code.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_locale() {
        let locale = resolve("ja-JP");
        assert_eq!(locale.code, "ja-JP");
        assert_eq!(locale.name, "日本語");
    }

    #[test]
    fn test_resolve_is_case_insensitive() {
        let locale = resolve("en-us");
        assert_eq!(locale.name, "English");
    }

    #[test]
    fn test_resolve_unknown_locale_passes_through() {
        let locale = resolve("pt-BR");
        assert_eq!(locale.code, "pt-BR");
        assert_eq!(locale.name, "pt-BR");
    }
}
