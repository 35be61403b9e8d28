//! Static language tables: comment tokens and language/extension names.
//!
//! Extending any table for a new language is a data change, not a code
//! change.

/// Line-comment token per file extension. Script-like extensions use `#`,
/// C-family `//`, assembly/ini-like `;`. Unknown extensions default to `#`.
const COMMENT_TOKENS: &[(&str, &str)] = &[
    // script-like
    ("py", "#"),
    ("rb", "#"),
    ("sh", "#"),
    ("bash", "#"),
    ("pl", "#"),
    ("r", "#"),
    ("yaml", "#"),
    ("yml", "#"),
    ("toml", "#"),
    ("cfg", "#"),
    ("conf", "#"),
    ("mk", "#"),
    ("cmake", "#"),
    ("ps1", "#"),
    // C-family and similar
    ("c", "//"),
    ("h", "//"),
    ("cpp", "//"),
    ("hpp", "//"),
    ("cc", "//"),
    ("cs", "//"),
    ("java", "//"),
    ("js", "//"),
    ("jsx", "//"),
    ("ts", "//"),
    ("tsx", "//"),
    ("go", "//"),
    ("rs", "//"),
    ("swift", "//"),
    ("kt", "//"),
    ("scala", "//"),
    ("php", "//"),
    ("css", "//"),
    // assembly / ini-like
    ("asm", ";"),
    ("s", ";"),
    ("nasm", ";"),
    ("ini", ";"),
    ("lisp", ";"),
    ("el", ";"),
];

/// Extension-to-language names used when tagging assembled fences.
const EXT_TO_LANG: &[(&str, &str)] = &[
    ("py", "python"),
    ("rs", "rust"),
    ("js", "javascript"),
    ("ts", "typescript"),
    ("cpp", "c++"),
    ("hpp", "c++"),
    ("h", "c++"),
    ("c", "c"),
    ("cs", "csharp"),
    ("java", "java"),
    ("rb", "ruby"),
    ("go", "go"),
    ("sh", "shell"),
    ("html", "html"),
    ("css", "css"),
    ("sql", "sql"),
    ("md", "markdown"),
    ("toml", "toml"),
    ("yaml", "yaml"),
    ("yml", "yaml"),
    ("json", "json"),
    ("txt", "text"),
];

/// Line-comment token for a file extension (without the dot).
pub fn comment_token(ext: &str) -> &'static str {
    let ext = ext.to_ascii_lowercase();
    COMMENT_TOKENS
        .iter()
        .find(|(e, _)| *e == ext)
        .map(|(_, tok)| *tok)
        .unwrap_or("#")
}

/// Language name for a file extension, falling back to the extension
/// itself for anything not in the table.
pub fn language_for_ext(ext: &str) -> String {
    let ext = ext.to_ascii_lowercase();
    EXT_TO_LANG
        .iter()
        .find(|(e, _)| *e == ext)
        .map(|(_, lang)| lang.to_string())
        .unwrap_or(ext)
}

/// Extension for a language tag, used when synthesizing a name for a
/// nameless block whose fence carries only a language. Falls back to the
/// tag itself so `` ```py `` still yields a `py` extension.
pub fn ext_for_language(lang: &str) -> String {
    let lang = lang.to_ascii_lowercase();
    EXT_TO_LANG
        .iter()
        .find(|(_, l)| *l == lang)
        .map(|(e, _)| e.to_string())
        .unwrap_or(lang)
}
