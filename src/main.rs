use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use blockdown::{Config, Error, Result};
use clap::{Parser, ValueEnum};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Pdf,
    Typst,
    Json,
}

#[derive(Parser)]
#[command(name = "blockdown")]
#[command(about = "Convert Markdown to PDF, Typst markup or a JSON block tree")]
struct Cli {
    /// Input Markdown file (`-` reads stdin)
    input: PathBuf,

    /// Output file (PDF defaults to input name with .pdf extension, other
    /// formats to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Pdf)]
    format: Format,

    /// Config file
    #[arg(short, long, default_value = "blockdown.toml")]
    config: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = Config::load(&cli.config)?;
    let markdown = read_input(&cli.input)?;
    log::info!("read {} bytes from {}", markdown.len(), cli.input.display());

    match cli.format {
        Format::Pdf => {
            let pdf_bytes = blockdown::markdown_to_pdf_with_config(&markdown, &config)?;
            let output = cli
                .output
                .clone()
                .unwrap_or_else(|| pdf_path_for(&cli.input));
            write_output(&output, &pdf_bytes)?;
            println!("Created {}", output.display());
        }
        Format::Typst => {
            let typst = blockdown::markdown_to_typst_with_config(&markdown, &config);
            emit(cli.output.as_deref(), typst.as_bytes())?;
        }
        Format::Json => {
            let json = blockdown::markdown_to_json(&markdown, &config.scan_options())?;
            emit(cli.output.as_deref(), json.as_bytes())?;
        }
    }

    Ok(())
}

fn read_input(path: &Path) -> Result<String> {
    let read_err = |source: io::Error| Error::Read {
        path: path.to_path_buf(),
        source,
    };

    if path == Path::new("-") {
        let mut markdown = String::new();
        io::stdin()
            .read_to_string(&mut markdown)
            .map_err(read_err)?;
        Ok(markdown)
    } else {
        fs::read_to_string(path).map_err(read_err)
    }
}

fn pdf_path_for(input: &Path) -> PathBuf {
    if input == Path::new("-") {
        PathBuf::from("out.pdf")
    } else {
        input.with_extension("pdf")
    }
}

fn emit(output: Option<&Path>, bytes: &[u8]) -> Result<()> {
    match output {
        Some(path) => write_output(path, bytes),
        None => io::stdout()
            .write_all(bytes)
            .map_err(|source| Error::Write {
                path: PathBuf::from("-"),
                source,
            }),
    }
}

fn write_output(path: &Path, bytes: &[u8]) -> Result<()> {
    log::debug!("writing {} bytes to {}", bytes.len(), path.display());
    fs::write(path, bytes).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })
}
