//! Mdtex CLI - compile a parsed Markdown document tree to LaTeX

#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
use mdtex::{
    compile_document, compile_tree, utils::files::{read_input, write_output},
    DocumentNode, ExportResult, Frontmatter, Settings,
};

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "md2tex")]
#[command(version)]
#[command(about = "Mdtex - Markdown document tree to LaTeX exporter", long_about = None)]
struct Cli {
    /// Input tree as mdast-shaped JSON (reads from stdin if not provided)
    input_file: Option<String>,

    /// Output file path (writes to stdout if not provided)
    #[arg(short, long)]
    output: Option<String>,

    /// Original Markdown source file, enables source-slice bookkeeping
    #[arg(short, long)]
    source: Option<String>,

    /// Frontmatter JSON file (flat string map) for placeholder substitution
    #[arg(short = 'm', long)]
    frontmatter: Option<String>,

    /// Assemble a complete document instead of a bare body
    #[arg(short = 'd', long)]
    document: bool,

    /// Preamble template file (defaults to the built-in template)
    #[arg(long)]
    preamble: Option<String>,

    /// Postamble template file (defaults to the built-in template)
    #[arg(long)]
    postamble: Option<String>,

    /// Command used for cross-references
    #[arg(long, default_value = "cref")]
    ref_command: String,

    /// Emit unnumbered sections
    #[arg(long)]
    no_numbered_sections: bool,

    /// Skip caption generation for tables and figures
    #[arg(long)]
    no_captions: bool,

    /// Skip label generation
    #[arg(long)]
    no_labels: bool,

    /// Collapse runs of blank lines in the body
    #[arg(long)]
    compress_newlines: bool,

    /// Quiet mode: suppress diagnostics on stderr
    #[arg(short, long)]
    quiet: bool,
}

#[cfg(feature = "cli")]
fn main() {
    if let Err(error) = run(Cli::parse()) {
        eprintln!("error: {}", error);
        std::process::exit(1);
    }
}

#[cfg(feature = "cli")]
fn run(cli: Cli) -> ExportResult<()> {
    let input = read_input(cli.input_file.as_deref())?;
    let tree: DocumentNode = serde_json::from_str(&input)?;

    let source = match cli.source.as_deref() {
        Some(path) => std::fs::read_to_string(path)?,
        None => String::new(),
    };

    let frontmatter: Frontmatter = match cli.frontmatter.as_deref() {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => Frontmatter::new(),
    };

    let mut settings = Settings {
        ref_command: cli.ref_command.clone(),
        numbered_sections: !cli.no_numbered_sections,
        generate_captions: !cli.no_captions,
        generate_labels: !cli.no_labels,
        compress_newlines: cli.compress_newlines,
        ..Settings::default()
    };
    if let Some(path) = cli.preamble.as_deref() {
        settings.preamble = std::fs::read_to_string(path)?;
    }
    if let Some(path) = cli.postamble.as_deref() {
        settings.postamble = std::fs::read_to_string(path)?;
    }

    let result = if cli.document {
        compile_document(&tree, &settings, &source, &frontmatter)
    } else {
        compile_tree(&tree, &settings, &source)
    };

    if !cli.quiet && !result.messages.is_empty() {
        eprintln!("Export warnings ({}):", result.messages.len());
        for message in &result.messages {
            eprintln!("  {}", message);
        }
    }

    write_output(cli.output.as_deref(), &result.content)
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Build with --features cli");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  cargo install mdtex --features cli");
    eprintln!("  md2tex [OPTIONS] [INPUT_FILE]");
}
