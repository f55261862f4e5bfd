use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use pdf_repage::RepageOptions;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "pdfre", about = "PDF page order and size rewriting", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rescale every page to the document's most common page size
    Resize {
        /// Input PDF file or directory (defaults to the 'input' folder)
        input: Option<PathBuf>,

        /// Output directory
        #[arg(short, long, default_value = "output")]
        output_dir: PathBuf,

        /// Show statistics only, don't write PDFs
        #[arg(long)]
        stats_only: bool,
    },

    /// Swap adjacent page pairs (positions 2i and 2i+1 exchange places)
    Swap {
        /// Input PDF file or directory (defaults to the 'input' folder)
        input: Option<PathBuf>,

        /// Output directory
        #[arg(short, long, default_value = "output")]
        output_dir: PathBuf,

        /// Keep the first pair in its original order
        #[arg(long)]
        keep_first_pair: bool,

        /// Also rescale pages to the most common size
        #[arg(long)]
        resize: bool,

        /// Show statistics only, don't write PDFs
        #[arg(long)]
        stats_only: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let (input, output_dir, options, stats_only, suffix) = match cli.command {
        Commands::Resize {
            input,
            output_dir,
            stats_only,
        } => {
            let options = RepageOptions {
                swap_pages: false,
                restore_first_pair: false,
                normalize_sizes: true,
            };
            (input, output_dir, options, stats_only, "adjusted")
        }

        Commands::Swap {
            input,
            output_dir,
            keep_first_pair,
            resize,
            stats_only,
        } => {
            let options = RepageOptions {
                swap_pages: true,
                restore_first_pair: keep_first_pair,
                normalize_sizes: resize,
            };
            let suffix = if resize {
                "swapped_adjusted"
            } else {
                "swapped"
            };
            (input, output_dir, options, stats_only, suffix)
        }
    };

    options.validate()?;
    run_batch(input, &output_dir, &options, stats_only, suffix).await
}

async fn run_batch(
    input: Option<PathBuf>,
    output_dir: &Path,
    options: &RepageOptions,
    stats_only: bool,
    suffix: &str,
) -> Result<()> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output directory {}", output_dir.display()))?;

    let files = match input {
        Some(path) if path.is_file() => vec![path],
        Some(path) if path.is_dir() => collect_pdfs(&path)?,
        Some(path) => bail!("{} is not a valid file or directory", path.display()),
        None => {
            println!("No input provided, processing all files in the 'input' folder...");
            std::fs::create_dir_all("input")?;
            collect_pdfs(Path::new("input"))?
        }
    };

    if files.is_empty() {
        println!("No PDF files found");
        return Ok(());
    }

    // One bad document must not abort the batch
    let mut failures = 0;
    for file in &files {
        if let Err(e) = process_file(file, output_dir, options, stats_only, suffix).await {
            eprintln!("Error processing {}: {:#}", file.display(), e);
            failures += 1;
        }
    }

    if failures > 0 {
        bail!("{} of {} documents failed", failures, files.len());
    }
    Ok(())
}

fn collect_pdfs(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory {}", dir.display()))?
    {
        let path = entry?.path();
        let is_pdf = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
        if path.is_file() && is_pdf {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

async fn process_file(
    input: &Path,
    output_dir: &Path,
    options: &RepageOptions,
    stats_only: bool,
    suffix: &str,
) -> Result<()> {
    let doc = pdf_repage::load_pdf(input)
        .await
        .context("Failed to load PDF")?;

    let stats = pdf_repage::calculate_statistics(&doc, options)?;
    println!("{}:", input.display());
    println!("  Source pages: {}", stats.source_pages);
    println!("  Distinct page sizes: {}", stats.distinct_sizes);
    if let Some(target) = stats.target_size {
        println!("  Target size: {} x {} pt", target.width, target.height);
        println!("  Pages to rescale: {}", stats.pages_to_rescale);
    }
    println!("  Pairs swapped: {}", stats.pairs_swapped);

    if stats_only {
        return Ok(());
    }

    let result = pdf_repage::repage(&doc, options).await?;

    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    let output_file = output_dir.join(format!("{}_{}.pdf", stem, suffix));

    pdf_repage::save_pdf(result, &output_file)
        .await
        .context("Failed to write PDF")?;

    println!("Processed: {} -> {}", input.display(), output_file.display());
    Ok(())
}
