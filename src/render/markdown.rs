//! Markdown markup for paginated tables.
//!
//! Each chunk becomes one figure reference:
//!
//! ```text
//! ![Loads (Parte 2)](tables/table_5-2_loads.png){#tbl-5-2 width=6.5in .quarto-figure-center}
//! ```

use crate::config::DisplayConfig;
use crate::model::TableCounter;
use regex::Regex;
use std::sync::OnceLock;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Prefix of cross-reference ids.
pub const ID_PREFIX: &str = "tbl-";

/// Label of one chunk: `5` for the first chunk, `5-2`, `5-3` for the rest.
pub fn chunk_label(base: TableCounter, index: usize) -> String {
    if index == 0 {
        base.to_string()
    } else {
        format!("{}-{}", base, index + 1)
    }
}

/// Cross-reference id of one chunk.
pub fn table_id(base: TableCounter, index: usize) -> String {
    format!("{}{}", ID_PREFIX, chunk_label(base, index))
}

/// Caption of chunk `index` out of `total`.
///
/// Untitled tables are named after their number; split tables get a part
/// suffix.
pub fn caption(
    title: Option<&str>,
    display: &DisplayConfig,
    base: TableCounter,
    index: usize,
    total: usize,
) -> String {
    let title = match title.map(str::trim).filter(|t| !t.is_empty()) {
        Some(title) => title.to_string(),
        None => format!("{} {}", display.untitled_label, base),
    };
    if total > 1 {
        format!("{} ({} {})", title, display.part_label, index + 1)
    } else {
        title
    }
}

/// Figure reference for one rendered chunk.
pub fn figure(
    caption: &str,
    reference: &str,
    id: &str,
    width: &str,
    classes: &[String],
) -> String {
    let mut attrs = format!("#{} width={}in", id, width);
    for class in classes {
        attrs.push_str(" .");
        attrs.push_str(class.trim_start_matches('.'));
    }
    format!("\n\n![{}]({}){{{}}}\n\n", caption, reference, attrs)
}

/// Notice emitted in place of a chunk that could not be rendered.
pub fn fallback(title: Option<&str>, error: &str) -> String {
    format!(
        "\n\n**Table: {}**\n\n*(Table image could not be generated)*\n\nError: {}\n\n",
        title.filter(|t| !t.trim().is_empty()).unwrap_or("Table"),
        error
    )
}

/// File name of a chunk artifact: `table_<label>_<slug>.<ext>`, or
/// `table_<label>.<ext>` when the title has no usable characters.
pub fn artifact_file_name(label: &str, title: Option<&str>, extension: &str) -> String {
    let extension = extension.trim_start_matches('.');
    match title.map(slugify).filter(|s| !s.is_empty()) {
        Some(slug) => format!("table_{}_{}.{}", label, slug, extension),
        None => format!("table_{}.{}", label, extension),
    }
}

/// Lower-case ASCII slug: accents folded, other characters collapsed to `_`.
pub fn slugify(text: &str) -> String {
    static NON_ALNUM: OnceLock<Regex> = OnceLock::new();
    let pattern = NON_ALNUM.get_or_init(|| Regex::new(r"[^a-z0-9]+").unwrap());

    let folded: String = text
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .map(|c| if c.is_ascii() { c.to_ascii_lowercase() } else { ' ' })
        .collect();
    pattern.replace_all(&folded, "_").trim_matches('_').to_string()
}
