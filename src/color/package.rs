//! Package-name based coloring for single (non-diff) flamegraphs.
//!
//! Every frame name is reduced to a package prefix with a spy-specific
//! expression, hashed, and mapped onto a fixed palette, so all frames of the
//! same package share a color across renders.

use super::murmur::hash_name;
use super::rgba::Color;
use log::warn;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Profiler that produced the stack frame names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SpyName {
    #[serde(rename = "gospy")]
    GoSpy,
    #[serde(rename = "scrape")]
    Scrape,
    #[serde(rename = "dotnetspy")]
    DotnetSpy,
    #[serde(rename = "ebpfspy")]
    EbpfSpy,
    #[serde(rename = "phpspy")]
    PhpSpy,
    #[serde(rename = "pyspy")]
    PySpy,
    #[serde(rename = "rbspy")]
    RbSpy,
    #[serde(rename = "pyroscope-rs")]
    PyroscopeRs,
    #[serde(rename = "nodespy")]
    NodeSpy,
    #[serde(rename = "javaspy")]
    JavaSpy,
    #[default]
    #[serde(rename = "unknown")]
    #[serde(other)]
    Other,
}

impl SpyName {
    pub fn from_name(name: &str) -> Self {
        match name {
            "gospy" => SpyName::GoSpy,
            "scrape" => SpyName::Scrape,
            "dotnetspy" => SpyName::DotnetSpy,
            "ebpfspy" => SpyName::EbpfSpy,
            "phpspy" => SpyName::PhpSpy,
            "pyspy" => SpyName::PySpy,
            "rbspy" => SpyName::RbSpy,
            "pyroscope-rs" => SpyName::PyroscopeRs,
            "nodespy" => SpyName::NodeSpy,
            "javaspy" => SpyName::JavaSpy,
            _ => SpyName::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SpyName::GoSpy => "gospy",
            SpyName::Scrape => "scrape",
            SpyName::DotnetSpy => "dotnetspy",
            SpyName::EbpfSpy => "ebpfspy",
            SpyName::PhpSpy => "phpspy",
            SpyName::PySpy => "pyspy",
            SpyName::RbSpy => "rbspy",
            SpyName::PyroscopeRs => "pyroscope-rs",
            SpyName::NodeSpy => "nodespy",
            SpyName::JavaSpy => "javaspy",
            SpyName::Other => "unknown",
        }
    }

    fn pattern(&self) -> Option<&'static Regex> {
        static GO: OnceLock<Option<Regex>> = OnceLock::new();
        static DOTNET: OnceLock<Option<Regex>> = OnceLock::new();
        static PHP: OnceLock<Option<Regex>> = OnceLock::new();
        static PY: OnceLock<Option<Regex>> = OnceLock::new();
        static RB: OnceLock<Option<Regex>> = OnceLock::new();
        static RUST: OnceLock<Option<Regex>> = OnceLock::new();
        static NODE: OnceLock<Option<Regex>> = OnceLock::new();
        static JAVA: OnceLock<Option<Regex>> = OnceLock::new();
        static WHOLE: OnceLock<Option<Regex>> = OnceLock::new();

        let (cell, source) = match self {
            // scrape targets are Go programs
            SpyName::GoSpy | SpyName::Scrape => {
                (&GO, r"^(?P<package>.*?/.*?\.|.*?\.|.+)(?P<function>.*)$")
            }
            SpyName::DotnetSpy => (&DOTNET, r"^(?P<package>.+)\.(.+)\.(.+)\(.*\)$"),
            SpyName::PhpSpy => (&PHP, r"^(?P<package>(.*/)*)(?P<filename>.*\.php+)(?P<line>.*)$"),
            SpyName::PySpy => (&PY, r"^(?P<package>(.*/)*)(?P<filename>.*\.py+)(?P<line>.*)$"),
            SpyName::RbSpy => (&RB, r"^(?P<package>(.*/)*)(?P<filename>.*\.rb+)(?P<line>.*)$"),
            SpyName::PyroscopeRs => (&RUST, r"^(?P<package>[^:]+)"),
            SpyName::NodeSpy => (
                &NODE,
                r"^(\./node_modules/)?(?P<package>[^/]*)(.*\.?(jsx?|tsx?)?:)(?P<function>.*):(?P<line>\d+)?$",
            ),
            SpyName::JavaSpy => (&JAVA, r"^(?P<package>.+/)(?P<filename>.+\.)(?P<function>.+)$"),
            SpyName::EbpfSpy | SpyName::Other => (&WHOLE, r"^(?P<package>.+)$"),
        };

        cell.get_or_init(|| match Regex::new(source) {
            Ok(re) => Some(re),
            Err(e) => {
                warn!("package pattern for {} failed to compile: {}", self.as_str(), e);
                None
            }
        })
        .as_ref()
    }
}

/// Extract the package prefix of a stack frame name.
///
/// Falls back to the full name when the spy's pattern does not match.
pub fn package_name_from_stack_trace<'a>(spy: SpyName, stack_trace: &'a str) -> &'a str {
    if stack_trace.is_empty() {
        return stack_trace;
    }

    spy.pattern()
        .and_then(|re| re.captures(stack_trace))
        .and_then(|caps| caps.name("package"))
        .map(|m| m.as_str())
        .unwrap_or(stack_trace)
}

enum Swatch {
    Hsl(f64, f64, f64),
    Rgb(u8, u8, u8),
}

const PACKAGE_PALETTE: [Swatch; 24] = [
    Swatch::Hsl(24.0, 69.0, 60.0),
    Swatch::Hsl(34.0, 65.0, 65.0),
    Swatch::Hsl(194.0, 52.0, 61.0),
    Swatch::Hsl(163.0, 45.0, 55.0),
    Swatch::Hsl(211.0, 48.0, 60.0),
    Swatch::Hsl(246.0, 40.0, 65.0),
    Swatch::Hsl(305.0, 63.0, 79.0),
    Swatch::Hsl(47.0, 100.0, 73.0),
    Swatch::Rgb(183, 219, 171),
    Swatch::Rgb(244, 213, 152),
    Swatch::Rgb(78, 146, 249),
    Swatch::Rgb(249, 186, 143),
    Swatch::Rgb(242, 145, 145),
    Swatch::Rgb(130, 181, 216),
    Swatch::Rgb(229, 168, 226),
    Swatch::Rgb(174, 162, 224),
    Swatch::Rgb(154, 196, 138),
    Swatch::Rgb(242, 201, 109),
    Swatch::Rgb(101, 197, 219),
    Swatch::Rgb(249, 147, 78),
    Swatch::Rgb(234, 100, 96),
    Swatch::Rgb(81, 149, 206),
    Swatch::Rgb(214, 131, 206),
    Swatch::Rgb(128, 110, 183),
];

/// Number of distinct package colors
pub const PACKAGE_PALETTE_SIZE: usize = PACKAGE_PALETTE.len();

/// Palette entry `index` (taken modulo the palette size)
pub fn package_palette_color(index: usize) -> Color {
    match PACKAGE_PALETTE[index % PACKAGE_PALETTE_SIZE] {
        Swatch::Hsl(h, s, l) => Color::hsl(h, s, l),
        Swatch::Rgb(r, g, b) => Color::rgb(r, g, b),
    }
}

/// Stable color for a package name
pub fn color_based_on_package_name(package_name: &str, alpha: f64) -> Color {
    let index = hash_name(package_name) as usize % PACKAGE_PALETTE_SIZE;
    package_palette_color(index).with_alpha(alpha)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_patterns_compile() {
        for spy in [
            SpyName::GoSpy,
            SpyName::Scrape,
            SpyName::DotnetSpy,
            SpyName::EbpfSpy,
            SpyName::PhpSpy,
            SpyName::PySpy,
            SpyName::RbSpy,
            SpyName::PyroscopeRs,
            SpyName::NodeSpy,
            SpyName::JavaSpy,
            SpyName::Other,
        ] {
            assert!(spy.pattern().is_some(), "{} pattern failed to compile", spy.as_str());
            assert_eq!(SpyName::from_name(spy.as_str()), spy);
        }
    }

    #[test]
    fn test_same_package_same_color() {
        let a = color_based_on_package_name("github.com/x/y.", 1.0);
        let b = color_based_on_package_name("github.com/x/y.", 0.5);
        assert_eq!((a.r, a.g, a.b), (b.r, b.g, b.b));
        assert_eq!(b.a, 0.5);
    }
}
