//! Server-side-include directive matching.
//!
//! Two directive shapes are recognized:
//!
//! ```text
//! <!--#include virtual="/title.html" -->                      generic include
//! <script><!--#include virtual="/config.js"--></script>       remote-capable include
//! ```
//!
//! Whitespace is tolerated around every token, the path must be
//! double-quoted. Expansion is a single scan: text spliced in from an
//! included file is never scanned again.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{NoExpand, Regex};

static INCLUDE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<!--\s*#include\s+virtual="([^"]+)"\s*-->"#).expect("include pattern")
});

static CONFIG_SCRIPT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<script>\s*<!--\s*#include\s+virtual="/config.js"\s*-->\s*</script>"#)
        .expect("config.js pattern")
});

static INTERFACE_CONFIG_SCRIPT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"<script>\s*<!--\s*#include\s+virtual="/interface_config.js"\s*-->\s*</script>"#,
    )
    .expect("interface_config.js pattern")
});

/// The two includes that can be served from an external URL instead of
/// being baked into the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteScript {
    Config,
    InterfaceConfig,
}

impl RemoteScript {
    pub const ALL: [RemoteScript; 2] = [RemoteScript::Config, RemoteScript::InterfaceConfig];

    pub fn virtual_path(self) -> &'static str {
        match self {
            RemoteScript::Config => "/config.js",
            RemoteScript::InterfaceConfig => "/interface_config.js",
        }
    }

    fn pattern(self) -> &'static Regex {
        match self {
            RemoteScript::Config => &CONFIG_SCRIPT,
            RemoteScript::InterfaceConfig => &INTERFACE_CONFIG_SCRIPT,
        }
    }
}

/// `<script src="..."></script>` for an external script.
pub fn script_tag(url: &str) -> String {
    format!(r#"<script src="{url}"></script>"#)
}

/// Replace every `<script>`-wrapped include of `script` with a tag loading
/// `url`. The URL is inserted literally.
///
/// Returns the new content and the number of replacements.
pub fn substitute_remote<'a>(
    content: &'a str,
    script: RemoteScript,
    url: &str,
) -> (Cow<'a, str>, usize) {
    let pattern = script.pattern();
    let count = pattern.find_iter(content).count();
    if count == 0 {
        return (Cow::Borrowed(content), 0);
    }
    let tag = script_tag(url);
    (pattern.replace_all(content, NoExpand(&tag)), count)
}

/// Virtual paths of every generic include directive, in document order.
pub fn include_targets(content: &str) -> Vec<&str> {
    INCLUDE
        .captures_iter(content)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect()
}

/// Number of generic include directives in `content`.
pub fn count_includes(content: &str) -> usize {
    INCLUDE.find_iter(content).count()
}

/// Result of a single expansion pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expansion {
    pub content: String,
    pub expanded: usize,
}

/// Replace each generic include directive with whatever `load` returns for
/// its virtual path. The first loader error aborts the pass.
pub fn expand_includes<E>(
    content: &str,
    mut load: impl FnMut(&str) -> Result<String, E>,
) -> Result<Expansion, E> {
    let mut out = String::with_capacity(content.len());
    let mut last = 0;
    let mut expanded = 0;

    for caps in INCLUDE.captures_iter(content) {
        let (Some(whole), Some(path)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        out.push_str(&content[last..whole.start()]);
        out.push_str(&load(path.as_str())?);
        last = whole.end();
        expanded += 1;
    }
    out.push_str(&content[last..]);

    Ok(Expansion {
        content: out,
        expanded,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn include_tolerates_whitespace() {
        let doc = "<!--   #include   virtual=\"/a.html\"   -->|<!--#include virtual=\"b.html\"-->";
        assert_eq!(include_targets(doc), vec!["/a.html", "b.html"]);
    }

    #[test]
    fn include_requires_double_quotes() {
        assert_eq!(count_includes("<!--#include virtual='/a.html'-->"), 0);
    }

    #[test]
    fn include_requires_space_after_keyword() {
        assert_eq!(count_includes("<!--#includevirtual=\"/a.html\"-->"), 0);
    }

    #[test]
    fn remote_requires_script_wrapper() {
        let (out, n) = substitute_remote(
            "<!--#include virtual=\"/config.js\"-->",
            RemoteScript::Config,
            "https://x/config.js",
        );
        assert_eq!(n, 0);
        assert_eq!(out, "<!--#include virtual=\"/config.js\"-->");
    }

    #[test]
    fn remote_url_is_not_expanded_as_capture_reference() {
        let (out, n) = substitute_remote(
            "<script><!--#include virtual=\"/config.js\"--></script>",
            RemoteScript::Config,
            "https://x/$1/config.js",
        );
        assert_eq!(n, 1);
        assert_eq!(out, "<script src=\"https://x/$1/config.js\"></script>");
    }

    #[test]
    fn expansion_error_stops_the_pass() {
        let result: Result<Expansion, String> = expand_includes(
            "<!--#include virtual=\"/a\"--><!--#include virtual=\"/b\"-->",
            |path| {
                if path == "/a" {
                    Ok("A".to_owned())
                } else {
                    Err(format!("missing {path}"))
                }
            },
        );
        assert_eq!(result.unwrap_err(), "missing /b");
    }
}
