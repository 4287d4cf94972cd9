//! Vendor prefix duplication.
//!
//! This is a textual rewrite of generated output, not a structural one. It
//! recognizes declarations by their line shape, so running it a second time
//! over its own output would prefix the standard lines again.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::Pass;

static DECLARATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^([ \t]*)(border-radius|box-shadow|animation): (.*)$").unwrap()
});
static GRADIENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^([ \t]*)background: (linear|radial)-gradient(.*)$").unwrap()
});
static KEYFRAMES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?ms)^@keyframes [\w-]+ \{.*?^\}").unwrap());

/// Inserts `-webkit-`/`-moz-` copies before selected declarations.
///
/// - `border-radius` gains a `-webkit-` copy.
/// - `box-shadow`, `animation` and gradient `background`s gain `-webkit-`
///   and `-moz-` copies.
/// - `@keyframes` blocks are repeated as `@-webkit-keyframes` and
///   `@-moz-keyframes`.
///
/// The standard declaration is always kept, last.
#[derive(Debug, Clone, Copy, Default)]
pub struct VendorPrefixes;

impl Pass for VendorPrefixes {
    fn name(&self) -> &'static str {
        "vendor-prefixes"
    }

    fn apply(&self, css: &str) -> String {
        add_prefixes(css)
    }
}

/// Adds vendor prefixes to `css`. See [`VendorPrefixes`].
pub fn add_prefixes(css: &str) -> String {
    let css = DECLARATION.replace_all(css, |caps: &Captures| {
        let (indent, property, value) = (&caps[1], &caps[2], &caps[3]);
        let prefixes: &[&str] = if property == "border-radius" {
            &["-webkit-"]
        } else {
            &["-webkit-", "-moz-"]
        };

        let mut out = String::new();
        for prefix in prefixes {
            out.push_str(&format!("{indent}{prefix}{property}: {value}\n"));
        }
        out.push_str(&format!("{indent}{property}: {value}"));
        out
    });

    let css = GRADIENT.replace_all(&css, |caps: &Captures| {
        let (indent, kind, rest) = (&caps[1], &caps[2], &caps[3]);
        format!(
            "{indent}background: -webkit-{kind}-gradient{rest}\n\
             {indent}background: -moz-{kind}-gradient{rest}\n\
             {indent}background: {kind}-gradient{rest}"
        )
    });

    let css = KEYFRAMES.replace_all(&css, |caps: &Captures| {
        let block = &caps[0];
        let rest = &block["@keyframes".len()..];
        format!("@-webkit-keyframes{rest}\n\n@-moz-keyframes{rest}\n\n{block}")
    });

    css.into_owned()
}
