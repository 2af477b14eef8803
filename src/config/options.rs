// src/config/options.rs
use std::path::PathBuf;

use regex::Regex;
use std::sync::LazyLock;

use super::consts::*;

/// Language family of the page being augmented. Decides the revision
/// catalog, the source page names and which marker classes count.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Language {
    Cpp,
    C,
}

static C_PATH: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bc/").expect("static regex"));

impl Language {
    /// C pages live under `/w/c/`; everything else is C++.
    pub fn detect(url: &str) -> Self {
        if C_PATH.is_match(url) { Language::C } else { Language::Cpp }
    }

    pub fn prefix(self) -> &'static str {
        match self {
            Language::Cpp => "cpp",
            Language::C => "c",
        }
    }

    /// Prefix used by marker classes (`t-since-cxx17`, `t-until-c23`).
    pub fn marker_prefix(self) -> &'static str {
        match self {
            Language::Cpp => "cxx",
            Language::C => "c",
        }
    }

    /// Revisions that have a support page, oldest first.
    pub fn catalog(self) -> &'static [&'static str] {
        match self {
            Language::Cpp => CXX_REVISIONS,
            Language::C => C_REVISIONS,
        }
    }

    /// Every revision a marker may name, oldest first.
    pub fn ordering(self) -> &'static [&'static str] {
        match self {
            Language::Cpp => CXX_ORDER,
            Language::C => C_ORDER,
        }
    }

    pub fn support_page_title(self, rev: &str) -> String {
        SUPPORT_PAGE_TMPL
            .replace("{lang}", self.prefix())
            .replace("{rev}", rev)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Html,
    Csv,
    Tsv,
}

impl OutputFormat {
    pub fn delim(self) -> Option<char> {
        match self {
            OutputFormat::Html => None,
            OutputFormat::Csv => Some(','),
            OutputFormat::Tsv => Some('\t'),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunOptions {
    pub page_url: String,              // page being augmented
    pub page_file: Option<PathBuf>,    // read the page from disk instead of fetching it
    pub api_url: Option<String>,       // defaults to <origin of page_url> + API_PATH
    pub lang: Option<Language>,        // overrides detection from the URL
    pub format: OutputFormat,
    pub out: Option<PathBuf>,          // stdout when None
    pub xref_page: Option<String>,     // paper cross-reference page title
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            page_url: join!(DEFAULT_ORIGIN, "/w/cpp"),
            page_file: None,
            api_url: None,
            lang: None,
            format: OutputFormat::default(),
            out: None,
            xref_page: None,
        }
    }
}

impl RunOptions {
    pub fn language(&self) -> Language {
        self.lang.unwrap_or_else(|| Language::detect(&self.page_url))
    }
}
