use std::fs;
use std::io;
use std::path::Path;
use std::process::ExitCode;

use clap::Parser;

use velum::{ParseResult, RenderOptions};

mod cli;
use cli::{Cli, Commands};

fn parse_document(path: &Path) -> io::Result<Result<ParseResult, velum::ParseError>> {
    let input = fs::read_to_string(path)?;
    Ok(velum::parse(&input))
}

fn run() -> io::Result<ExitCode> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Export {
            file,
            output,
            vanilla_html,
            exclude_head,
            title,
            extra_head_tags,
            code_display_line_numbers,
        } => {
            let start_dir = file.parent().unwrap_or(Path::new("."));
            let (config, config_path) = velum::config::load(cli.config.as_deref(), start_dir)?;
            if let Some(path) = &config_path {
                log::debug!("using config from: {}", path.display());
            } else {
                log::debug!("using default config");
            }

            let result = match parse_document(&file)? {
                Ok(result) => result,
                Err(e) => {
                    eprintln!("error: {e}");
                    return Ok(ExitCode::FAILURE);
                }
            };

            let mut opts = RenderOptions::default();
            opts.vanilla_html = vanilla_html || config.vanilla_html;
            opts.include_head = if exclude_head {
                false
            } else {
                config.include_head
            };
            opts.code_line_numbers = code_display_line_numbers || config.code_line_numbers;
            opts.title = title
                .or(config.title)
                .or_else(|| {
                    file.file_stem()
                        .map(|stem| stem.to_string_lossy().into_owned())
                });
            opts.extra_head_tags = match extra_head_tags {
                Some(path) => Some(fs::read_to_string(path)?),
                None => config.extra_head_tags,
            };

            let html = result.render_html(&opts);
            fs::write(&output, html)?;
            log::info!("exported {} to {}", file.display(), output.display());
            Ok(ExitCode::SUCCESS)
        }
        Commands::Inspect { file } => {
            let result = match parse_document(&file)? {
                Ok(result) => result,
                Err(e) => {
                    eprintln!("error: {e}");
                    return Ok(ExitCode::FAILURE);
                }
            };

            let summary = serde_json::json!({
                "tocEntries": result.toc_entries,
                "linkReferences": result.link_references,
            });
            println!("{}", serde_json::to_string_pretty(&summary)?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn main() -> io::Result<ExitCode> {
    env_logger::init();
    run()
}
