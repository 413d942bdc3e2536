use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "velum")]
#[command(author, version)]
#[command(about = "An HTML exporter for Typora-flavored Markdown documents")]
#[command(after_help = "\
EXAMPLES:

    # Export a document
    velum export notes.md -o notes.html

    # Export without the head/body shell or dialect classes
    velum export notes.md -o fragment.html --vanilla-html --exclude-head

    # Inspect the outline and link references as JSON
    velum inspect notes.md

CONFIGURATION:

Velum looks for velum.toml or .velum.toml in the input file's directory
and its parents; command-line flags override the file.")]
#[command(arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert a Markdown document to an HTML file
    Export {
        /// Input markdown file
        file: PathBuf,

        /// Output file name
        #[arg(short = 'o', long)]
        output: PathBuf,

        /// No dialect-specific classes or wrappers
        #[arg(short = 'n', long)]
        vanilla_html: bool,

        /// Don't include head and body tags
        #[arg(short = 'e', long)]
        exclude_head: bool,

        /// Title of the HTML page; defaults to the file name without
        /// extension, no effect with --exclude-head
        #[arg(short = 't', long)]
        title: Option<String>,

        /// File with extra tags to add to the head tag, no effect with
        /// --exclude-head
        #[arg(short = 'g', long)]
        extra_head_tags: Option<PathBuf>,

        /// Display line numbers on code blocks
        #[arg(short = 'l', long)]
        code_display_line_numbers: bool,
    },

    /// Parse a document and print its outline and link references as JSON
    Inspect {
        /// Input markdown file
        file: PathBuf,
    },
}
