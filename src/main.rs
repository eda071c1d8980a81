//! Marksmith - Markdown to HTML with a local article library.
//!
//! # Usage
//!
//! ```bash
//! marksmith convert notes.md -o notes.html --standalone
//! marksmith convert notes.md --watch
//! marksmith articles --article-dir site/article
//! marksmith export starter.zip --to ~/Downloads
//! ```

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use marksmith::config::{
    ConfigFlags, clear_config_flags, global_config_path, load_config_flags, local_override_path,
    save_config_flags,
};
use marksmith::document::{convert, render_page};
use marksmith::library::{DirStorage, Library, Manifest};
use marksmith::perf;
use marksmith::watcher::SourceWatcher;

const WATCH_DEBOUNCE: Duration = Duration::from_millis(200);
const WATCH_POLL: Duration = Duration::from_millis(250);

/// Convert Markdown to HTML and manage a small article library
#[derive(Parser, Debug)]
#[command(name = "marksmith", version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Print conversion timings to stderr
    #[arg(long, global = true)]
    perf: bool,

    /// Write every rewrite pass to a debug log
    #[arg(long, value_name = "PATH", global = true)]
    render_debug_log: Option<PathBuf>,

    /// Directory holding Markdown articles
    #[arg(long, value_name = "DIR", global = true)]
    article_dir: Option<PathBuf>,

    /// Directory holding downloadable resource files
    #[arg(long, value_name = "DIR", global = true)]
    file_dir: Option<PathBuf>,

    /// Manifest listing article and resource names
    #[arg(long, value_name = "PATH", global = true)]
    manifest: Option<PathBuf>,

    /// Save current command-line flags as defaults
    #[arg(long, global = true)]
    save: bool,

    /// Clear saved defaults
    #[arg(long, global = true)]
    clear: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert a Markdown file to HTML
    Convert {
        /// Markdown file to convert
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Write HTML here instead of stdout
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,

        /// Wrap the output in a complete HTML page
        #[arg(long)]
        standalone: bool,

        /// Convert again whenever the file changes
        #[arg(short, long)]
        watch: bool,
    },

    /// List catalog articles that exist
    Articles,

    /// Print an article as HTML
    Read {
        /// Article file name as listed in the catalog
        name: String,

        /// Wrap the output in a complete HTML page
        #[arg(long)]
        standalone: bool,
    },

    /// List catalog resource files that exist
    Files,

    /// Copy a resource file to a directory
    Export {
        /// Resource file name as listed in the catalog
        name: String,

        /// Destination directory
        #[arg(long, value_name = "DIR")]
        to: PathBuf,
    },
}

impl Cli {
    /// Flags given on this command line, in config-file terms.
    fn flags(&self) -> ConfigFlags {
        let (watch, standalone) = match &self.command {
            Commands::Convert {
                watch, standalone, ..
            } => (*watch, *standalone),
            Commands::Read { standalone, .. } => (false, *standalone),
            _ => (false, false),
        };
        ConfigFlags {
            watch,
            standalone,
            perf: self.perf,
            article_dir: self.article_dir.clone(),
            file_dir: self.file_dir.clone(),
            manifest: self.manifest.clone(),
            render_debug_log: self.render_debug_log.clone(),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive(default_level.into()))
        .init();

    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = cli.flags();

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    perf::set_enabled(effective.perf);
    if let Some(path) = effective.render_debug_log.as_deref() {
        if let Err(err) = perf::set_debug_log_path(Some(path)) {
            tracing::warn!(path = %path.display(), %err, "failed to open rewrite debug log");
        }
    }

    match cli.command {
        Commands::Convert { file, output, .. } => {
            cmd_convert(&file, output.as_deref(), effective.standalone)?;
            if effective.watch {
                watch_convert(&file, output.as_deref(), effective.standalone)?;
            }
        }
        Commands::Articles => cmd_articles(&open_library(&effective)?),
        Commands::Read { name, .. } => {
            cmd_read(&open_library(&effective)?, &name, effective.standalone)?;
        }
        Commands::Files => cmd_files(&open_library(&effective)?),
        Commands::Export { name, to } => {
            let outcome = open_library(&effective)?.export(&name, &to);
            if !outcome.success {
                anyhow::bail!("{}", outcome.message);
            }
            println!("{}", outcome.message);
        }
    }
    Ok(())
}

fn open_library(flags: &ConfigFlags) -> Result<Library<DirStorage>> {
    let manifest = match &flags.manifest {
        Some(path) => Manifest::load(path).context("Failed to load manifest")?,
        None => Manifest::builtin(),
    };
    Ok(Library::open(flags.article_dir(), flags.file_dir(), manifest))
}

fn page_title(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn render(markdown: &str, title: &str, standalone: bool) -> String {
    let body = convert(markdown);
    if standalone {
        render_page(title, &body)
    } else {
        body
    }
}

fn emit(html: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => std::fs::write(path, html)
            .with_context(|| format!("Failed to write {}", path.display())),
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{html}").context("Failed to write to stdout")
        }
    }
}

fn cmd_convert(file: &Path, output: Option<&Path>, standalone: bool) -> Result<()> {
    if !file.exists() {
        anyhow::bail!("File not found: {}", file.display());
    }
    let markdown = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    emit(&render(&markdown, &page_title(file), standalone), output)
}

fn watch_convert(file: &Path, output: Option<&Path>, standalone: bool) -> Result<()> {
    let mut watcher = SourceWatcher::new(file, WATCH_DEBOUNCE)
        .with_context(|| format!("Failed to watch {}", file.display()))?;
    eprintln!("Watching {} (Ctrl-C to stop)", watcher.source_path().display());
    loop {
        watcher.wait_for_change(WATCH_POLL);
        match cmd_convert(file, output, standalone) {
            Ok(()) => tracing::info!(file = %file.display(), "converted"),
            Err(err) => tracing::error!("{err:#}"),
        }
    }
}

fn cmd_articles(library: &Library<DirStorage>) {
    let articles = library.articles();
    if articles.is_empty() {
        println!("No articles found");
        return;
    }
    for article in articles {
        println!(
            "{}\t{}\t{}",
            article.title, article.category, article.encoded_filename
        );
    }
}

fn cmd_read(library: &Library<DirStorage>, name: &str, standalone: bool) -> Result<()> {
    let markdown = library.article_content(name);
    let title = name.strip_suffix(".md").unwrap_or(name);
    emit(&render(&markdown, title, standalone), None)
}

fn cmd_files(library: &Library<DirStorage>) {
    let files = library.resources();
    if files.is_empty() {
        println!("No files found");
        return;
    }
    for file in files {
        println!("{}\t{}\t{}", file.filename, file.size, file.description);
    }
}
