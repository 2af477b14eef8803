// src/config/consts.rs

// Net config
pub const DEFAULT_ORIGIN: &str = "https://en.cppreference.com";
pub const API_PATH: &str = "/mwiki/api.php";
pub const USER_AGENT: &str = "cppref_support/0.1";
pub const TIMEOUT_SECS: u64 = 15;

// Source pages
pub const SUPPORT_PAGE_TMPL: &str = "Template:{lang}/compiler support/{rev}";
pub const COMPILER_SUPPORT_SELECTOR: &str = ".t-compiler-support-top";
pub const LIBRARY_SUPPORT_SELECTOR: &str = ".t-standard-library-support-top";

// Revision catalogs (what has a support page) and full orderings (what markers may name)
pub const CXX_REVISIONS: &[&str] = &["11", "14", "17", "20", "23", "26"];
pub const CXX_ORDER: &[&str] = &["98", "03", "11", "14", "17", "20", "23", "26"];
pub const C_REVISIONS: &[&str] = &["99", "23"];
pub const C_ORDER: &[&str] = &["89", "95", "99", "11", "17", "23"];

// Current page structure
pub const TITLE_MARKER_SELECTOR: &str = "#firstHeading .t-mark-rev";
pub const DCL_BLOCK_CLASS: &str = "t-dcl-begin";
pub const DCL_CLASS: &str = "t-dcl";
pub const MARK_REV_CLASS: &str = "t-mark-rev";
pub const NESTED_DCL_CLASSES: &[&str] = &["t-dcl-begin", "t-dsc-member-div"];
pub const DCL_HEADER_LINK_SELECTOR: &str = ".t-dcl-begin .t-dsc-header a[href]";
pub const FTM_HEADER_PREFIX: &str = "feature-test macro";
pub const DR_HEADER: &str = "DR";

// Span limits browsers apply to table cells
pub const MAX_COL_SPAN: usize = 1000;
pub const MAX_ROW_SPAN: usize = 65534;

// Output
pub const PLACEHOLDER_TEXT: &str = "N/A";
pub const PLACEHOLDER_CLASS: &str = "table-na";
pub const FEATURE_HEADER: &str = "Feature";
pub const SECTION_HEADING: &str = "Support status";
pub const COMPILER_CAPTION: &str = "Compiler support";
pub const LIBRARY_CAPTION: &str = "Library support";
pub const NOTE: &str = "The rows below were collected automatically from the compiler support \
pages of the revisions this page applies to. They may be incomplete or list entries that are \
only loosely related.";
