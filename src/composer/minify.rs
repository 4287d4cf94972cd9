//! Whitespace and comment stripping.

use once_cell::sync::Lazy;
use regex::Regex;

use super::Pass;

static COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)/\*.*?\*/").unwrap());
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static AROUND_PUNCT: Lazy<Regex> = Lazy::new(|| Regex::new(r" ?([{}:;]) ?").unwrap());

/// Collapses a stylesheet onto one line.
///
/// Comments go first, then every whitespace run becomes one space, then the
/// space on either side of `{`, `}`, `:` and `;` is dropped. Running it on
/// already minified text changes nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct Minify;

impl Pass for Minify {
    fn name(&self) -> &'static str {
        "minify"
    }

    fn apply(&self, css: &str) -> String {
        minify(css)
    }
}

/// Minifies `css`. See [`Minify`].
pub fn minify(css: &str) -> String {
    let css = COMMENT.replace_all(css, "");
    let css = WHITESPACE.replace_all(&css, " ");
    let css = AROUND_PUNCT.replace_all(&css, "$1");
    css.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_comments_and_space() {
        let css = "/* header */\n.a-card {\n  width: 10px;\n  border: none;\n}\n\n/* tail */\n";
        assert_eq!(minify(css), ".a-card{width:10px;border:none;}");
    }

    #[test]
    fn keeps_inner_value_spacing() {
        let css = ".a { box-shadow: 0 4px 12px rgba(1, 2, 3, 0.3); }";
        assert_eq!(minify(css), ".a{box-shadow:0 4px 12px rgba(1, 2, 3, 0.3);}");
    }

    #[test]
    fn multi_line_comment() {
        assert_eq!(minify("/* a\n b */ .x { }"), ".x{}");
    }

    #[test]
    fn idempotent_on_minified_text() {
        let once = minify(".a:hover {\n  transform: scale(1.05);\n}\n@keyframes p { 0% { opacity: 0.6; } }");
        assert_eq!(minify(&once), once);
    }
}
