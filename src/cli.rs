// src/cli.rs
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use color_eyre::eyre::WrapErr;

use crate::config::options::{Language, OutputFormat, RunOptions};

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum LangArg {
    Cpp,
    C,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum FormatArg {
    Html,
    Csv,
    Tsv,
}

/// Collect the compiler/library support rows that concern one cppreference
/// page and print them as merged tables.
#[derive(Debug, Parser)]
#[command(name = "cppref-support", version, about)]
pub struct Cli {
    /// URL of the page to augment, e.g. https://en.cppreference.com/w/cpp/language/constraints
    pub url: String,

    /// Read the page from this file instead of fetching the URL
    #[arg(long, value_name = "PATH")]
    pub page_file: Option<PathBuf>,

    /// MediaWiki api.php endpoint (default: <origin of URL>/mwiki/api.php)
    #[arg(long, value_name = "URL")]
    pub api: Option<String>,

    /// Language family (default: detected from the URL)
    #[arg(long, value_enum)]
    pub lang: Option<LangArg>,

    /// Output format
    #[arg(long, value_enum, default_value = "html")]
    pub format: FormatArg,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "PATH")]
    pub out: Option<PathBuf>,

    /// Page title of a paper cross-reference table
    #[arg(long, value_name = "TITLE")]
    pub xref_page: Option<String>,

    /// Append log lines to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// More logging (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn to_options(&self) -> RunOptions {
        RunOptions {
            page_url: self.url.clone(),
            page_file: self.page_file.clone(),
            api_url: self.api.clone(),
            lang: self.lang.map(|l| match l {
                LangArg::Cpp => Language::Cpp,
                LangArg::C => Language::C,
            }),
            format: match self.format {
                FormatArg::Html => OutputFormat::Html,
                FormatArg::Csv => OutputFormat::Csv,
                FormatArg::Tsv => OutputFormat::Tsv,
            },
            out: self.out.clone(),
            xref_page: self.xref_page.clone(),
        }
    }
}

/// Parse the command line and run once on a single-threaded runtime.
pub fn run() -> color_eyre::Result<()> {
    let cli = Cli::parse();
    crate::log::init(cli.verbose, cli.log_file.as_deref()).wrap_err("could not open log file")?;
    let opts = cli.to_options();

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("could not start runtime")?;

    let written = rt
        .block_on(crate::runner::run(&opts))
        .wrap_err_with(|| format!("augmenting {} failed", opts.page_url))?;
    if let Some(path) = written {
        eprintln!("Wrote {}", path.display());
    }
    Ok(())
}
