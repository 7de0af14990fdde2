//! Locator codec: engine text to canonical `By.<kind>("<value>")` and back.
//!
//! WebDriver engines render element handles and locators as free text. Two
//! shapes show up in practice:
//!
//! ```text
//! [[RemoteWebDriver: firefox on WINDOWS (a66f78e9)] -> xpath: .//*[@id='x']/a]   element handle
//! By.xpath: .//*[@id='thePage:j_id39']/img                                      locator
//! ```
//!
//! Both canonicalize to `By.xpath("...")`. Canonicalization is lenient: text
//! that does not match is handed back unchanged, so callers always get a
//! string. Parsing the canonical form back into a [`By`] is the one strict
//! direction; unknown kinds yield no locator.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use tracing::{debug, warn};

use crate::result::{DriverTraceError, DriverTraceResult};

/// Locator strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ByKind {
    /// `By.xpath`
    XPath,
    /// `By.cssSelector`
    CssSelector,
    /// `By.id`
    Id,
    /// `By.name`
    Name,
    /// `By.tagName`
    TagName,
    /// `By.className`
    ClassName,
    /// `By.linkText`
    LinkText,
    /// `By.partialLinkText`
    PartialLinkText,
}

impl ByKind {
    /// All kinds
    pub const ALL: [Self; 8] = [
        Self::XPath,
        Self::CssSelector,
        Self::Id,
        Self::Name,
        Self::TagName,
        Self::ClassName,
        Self::LinkText,
        Self::PartialLinkText,
    ];

    /// Factory method name on `By`
    #[must_use]
    pub const fn method_name(self) -> &'static str {
        match self {
            Self::XPath => "xpath",
            Self::CssSelector => "cssSelector",
            Self::Id => "id",
            Self::Name => "name",
            Self::TagName => "tagName",
            Self::ClassName => "className",
            Self::LinkText => "linkText",
            Self::PartialLinkText => "partialLinkText",
        }
    }
}

impl fmt::Display for ByKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.method_name())
    }
}

/// A structured element locator
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct By {
    /// Strategy
    pub kind: ByKind,
    /// Strategy argument, e.g. the xpath expression
    pub value: String,
}

impl By {
    /// Create a locator
    #[must_use]
    pub fn new(kind: ByKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }

    /// `By.xpath`
    #[must_use]
    pub fn xpath(value: impl Into<String>) -> Self {
        Self::new(ByKind::XPath, value)
    }

    /// `By.cssSelector`
    #[must_use]
    pub fn css_selector(value: impl Into<String>) -> Self {
        Self::new(ByKind::CssSelector, value)
    }

    /// `By.id`
    #[must_use]
    pub fn id(value: impl Into<String>) -> Self {
        Self::new(ByKind::Id, value)
    }

    /// `By.name`
    #[must_use]
    pub fn name(value: impl Into<String>) -> Self {
        Self::new(ByKind::Name, value)
    }

    /// `By.tagName`
    #[must_use]
    pub fn tag_name(value: impl Into<String>) -> Self {
        Self::new(ByKind::TagName, value)
    }

    /// `By.className`
    #[must_use]
    pub fn class_name(value: impl Into<String>) -> Self {
        Self::new(ByKind::ClassName, value)
    }

    /// `By.linkText`
    #[must_use]
    pub fn link_text(value: impl Into<String>) -> Self {
        Self::new(ByKind::LinkText, value)
    }

    /// `By.partialLinkText`
    #[must_use]
    pub fn partial_link_text(value: impl Into<String>) -> Self {
        Self::new(ByKind::PartialLinkText, value)
    }

    /// Canonical form, `By.<kind>("<value>")`
    #[must_use]
    pub fn canonical(&self) -> String {
        canonical(self.kind.method_name(), &self.value)
    }

    /// Parse a canonical string, or the bare `css selector: <value>` form.
    ///
    /// Prefixes are tried in table order and the first match wins.
    ///
    /// # Errors
    ///
    /// `UnknownLocatorKind` when no prefix matches, `MalformedLocator` when
    /// the string is too short to hold a value.
    pub fn parse(text: &str) -> DriverTraceResult<Self> {
        let (prefix, kind, shape) = PARSE_TABLE
            .iter()
            .find(|(prefix, _, _)| text.starts_with(prefix))
            .ok_or_else(|| DriverTraceError::UnknownLocatorKind {
                input: text.to_string(),
            })?;

        // skip `("` and `")`, or `: ` for the bare form
        let start = prefix.len() + 2;
        let value = match shape {
            ValueShape::Quoted => text.get(start..text.len().saturating_sub(2)),
            ValueShape::Bare => text.get(start..),
        };

        value
            .map(|value| Self::new(*kind, value))
            .ok_or_else(|| DriverTraceError::MalformedLocator {
                input: text.to_string(),
            })
    }
}

/// Engine form, `By.<kind>: <value>`
impl fmt::Display for By {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "By.{}: {}", self.kind, self.value)
    }
}

impl FromStr for By {
    type Err = DriverTraceError;

    fn from_str(s: &str) -> DriverTraceResult<Self> {
        Self::parse(s)
    }
}

#[derive(Debug, Clone, Copy)]
enum ValueShape {
    /// `<prefix>("<value>")`
    Quoted,
    /// `<prefix>: <value>`
    Bare,
}

// Order matters: a prefix that is itself a prefix of a later entry would
// shadow it. Add new kinds with that in mind.
const PARSE_TABLE: [(&str, ByKind, ValueShape); 9] = [
    ("By.xpath", ByKind::XPath, ValueShape::Quoted),
    ("By.cssSelector", ByKind::CssSelector, ValueShape::Quoted),
    ("css selector", ByKind::CssSelector, ValueShape::Bare),
    ("By.id", ByKind::Id, ValueShape::Quoted),
    ("By.name", ByKind::Name, ValueShape::Quoted),
    ("By.tagName", ByKind::TagName, ValueShape::Quoted),
    ("By.className", ByKind::ClassName, ValueShape::Quoted),
    ("By.linkText", ByKind::LinkText, ValueShape::Quoted),
    ("By.partialLinkText", ByKind::PartialLinkText, ValueShape::Quoted),
];

/// One step of the element-reference inner match
struct Stage {
    regex: Regex,
    /// Fixed kind name; `None` takes the first capture group
    kind: Option<&'static str>,
}

impl Stage {
    fn apply(&self, text: &str) -> Option<String> {
        let caps = self.regex.captures(text)?;
        let kind = match self.kind {
            Some(kind) => kind,
            None => caps.get(1)?.as_str(),
        };
        let value = caps.get(2)?.as_str();
        Some(canonical(kind, value))
    }
}

#[allow(clippy::expect_used)]
fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("static locator pattern")
}

fn element_outer() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| compile(r"^\[\[.+\] -> (.+)\]$"))
}

fn element_stages() -> &'static [Stage] {
    static STAGES: OnceLock<Vec<Stage>> = OnceLock::new();
    STAGES.get_or_init(|| {
        vec![
            Stage {
                regex: compile(r"^(\S+): (.+)$"),
                kind: None,
            },
            // "link text" has a space, so the generic stage never takes it
            Stage {
                regex: compile(r"^(link text): (.+)$"),
                kind: Some("linkText"),
            },
        ]
    })
}

fn by_form() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Literal dot: `Byxid: foo` is not a locator and passes through unchanged.
    RE.get_or_init(|| compile(r"^By\.(\S+): (.+)$"))
}

fn canonical(kind: &str, value: &str) -> String {
    format!("By.{kind}(\"{value}\")")
}

/// Canonicalize an engine's element-handle text.
///
/// Text without the `[[...] -> ...]` wrapper is returned unchanged. When the
/// wrapper matches but the inner `kind: value` does not, the inner text is
/// returned.
#[must_use]
pub fn from_element_string(text: &str) -> String {
    let Some(inner) = element_outer().captures(text).and_then(|caps| caps.get(1)) else {
        debug!(input = text, "element text not recognized, passing through");
        return text.to_string();
    };
    let inner = inner.as_str();

    element_stages()
        .iter()
        .find_map(|stage| stage.apply(inner))
        .unwrap_or_else(|| {
            debug!(input = inner, "element locator not recognized, passing through");
            inner.to_string()
        })
}

/// Canonicalize a locator's `By.<kind>: <value>` text.
///
/// Text of any other shape is returned unchanged.
#[must_use]
pub fn from_by_string(text: &str) -> String {
    match by_form().captures(text) {
        Some(caps) => canonical(&caps[1], &caps[2]),
        None => {
            debug!(input = text, "locator text not recognized, passing through");
            text.to_string()
        }
    }
}

/// Canonicalize anything that renders as element-handle text
#[must_use]
pub fn from_element<T: fmt::Display + ?Sized>(element: Option<&T>) -> Option<String> {
    element.map(|element| from_element_string(&element.to_string()))
}

/// Canonicalize anything that renders as `By.<kind>: <value>`
#[must_use]
pub fn from_by<T: fmt::Display + ?Sized>(by: Option<&T>) -> Option<String> {
    by.map(|by| from_by_string(&by.to_string()))
}

/// Parse a canonical locator string, logging and returning `None` on failure.
#[must_use]
pub fn parse_by(text: &str) -> Option<By> {
    match By::parse(text) {
        Ok(by) => Some(by),
        Err(err) => {
            warn!(input = text, "{err}");
            None
        }
    }
}
