//! Instruction documents sent to the generation service.
//!
//! The system document fixes the SEARCH/REPLACE answer format; the
//! stage-specific documents describe what to change in the builder config,
//! the entry file, and each matched component file. Content here is opaque
//! payload as far as the pipeline is concerned.

use crate::context::Locale;

/// Anchor appended to a component file so the service has a fixed place to
/// put the generated translation table. A literal empty sentinel surviving
/// in the response is stripped before the file is written.
pub const SENTINEL: &str = "<i18n></i18n>";

/// System document: answer with SEARCH/REPLACE blocks or an empty string.
pub const REPLACER_SYSTEM: &str = r#"Act as an expert code transformer.
Your task is to transform the provided code according to the user's requirements.

When receiving code, you MUST:
1. Analyze the provided code carefully
2. Transform it according to the user's requirements
3. Output the changes using the SEARCH/REPLACE block format
4. Only return the blocks, without any other text or comments
5. Return minimal changes to achieve the requirements
6. If the code already satisfies the requirements, return an empty string
7. If the code is unrelated to the requirements, return an empty string

The SEARCH/REPLACE block format:
<<<<<<< SEARCH
[original code]
=======
[transformed code]
>>>>>>> REPLACE

Use multiple blocks if different sections need to change. The SEARCH text
must be copied verbatim from the provided code."#;

/// Builder-config document for the (vite, vue) worker.
pub fn builder_config_document() -> &'static str {
    r#"Register the vue-i18n bundler plugin in this Vite config.

## Documentation
```ts
// vite.config.ts
import VueI18nPlugin from '@intlify/unplugin-vue-i18n/vite'

export default defineConfig({
  plugins: [
    VueI18nPlugin({
      /* options */
    })
  ]
})
```

Add the import and append the plugin to the existing plugins array. Keep
every existing plugin and option untouched."#
}

/// Entry-file document, parameterized by the default locale code.
pub fn main_config_document(default_locale: &str) -> String {
    format!(
        r#"Create a vue-i18n instance in this application entry file and
install it on the app before mount.

## Documentation
```ts
import {{ createI18n }} from 'vue-i18n'

const i18n = createI18n({{
  locale: '{default_locale}',
  fallbackLocale: '{default_locale}',
}})

app.use(i18n)
```

Set both `locale` and `fallbackLocale` to '{default_locale}'. Keep the rest
of the file untouched."#
    )
}

/// Per-file document, parameterized by the requested locale set.
pub fn primary_file_document(locales: &[Locale]) -> String {
    let codes = locales
        .iter()
        .map(|l| l.code.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let names = locales
        .iter()
        .map(|l| format!("{} ({})", l.code, l.name))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        r#"Translate the user-visible text in this Vue single-file component.

Locale codes to generate: {codes}
Each code's language: {names}

## Rules
1. Replace static text with $t calls:
   Before: <div>Hello World</div>
   After:  <div>{{{{ $t('hello_world') }}}}</div>
2. For text with variables, pass parameters:
   Before: <div>Welcome, {{{{ name }}}}</div>
   After:  <div>{{{{ $t('welcome', {{ name }}) }}}}</div>
3. For attributes, bind with $t:
   Before: <input placeholder="Enter name">
   After:  <input :placeholder="$t('enter_name')">
4. Fill the trailing {sentinel} tag with a JSON translation table covering
   every generated key for every listed locale code.
5. If the file has no user-visible text, return an empty string."#,
        codes = codes,
        names = names,
        sentinel = SENTINEL,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_main_document_embeds_locale() {
        let doc = main_config_document("ja-JP");
        assert!(doc.contains("locale: 'ja-JP'"));
        assert!(doc.contains("fallbackLocale: 'ja-JP'"));
    }

    #[test]
    fn test_primary_file_document_lists_locales() {
        let locales = vec![
            Locale {
                name: "English".to_string(),
                code: "en-US".to_string(),
            },
            Locale {
                name: "日本語".to_string(),
                code: "ja-JP".to_string(),
            },
        ];
        let doc = primary_file_document(&locales);
        assert!(doc.contains("en-US, ja-JP"));
        assert!(doc.contains("ja-JP (日本語)"));
        assert!(doc.contains(SENTINEL));
    }
}
