//! Receipt Roll CLI - Turn HTML receipts and paged PDFs into continuous rolls.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use receipt_roll_core::{
    AppConfig, LicenseStatus, ReceiptFont, ReceiptPipeline, combine, create_converter, probe,
    trim,
};
use std::path::{Path, PathBuf};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Debug, Clone, ValueEnum)]
enum FontOption {
    Arial,
    Courier,
    Helvetica,
    Monospace,
    Sans,
    Serif,
    Times,
}

impl From<FontOption> for ReceiptFont {
    fn from(opt: FontOption) -> Self {
        match opt {
            FontOption::Arial => Self::Arial,
            FontOption::Courier => Self::Courier,
            FontOption::Helvetica => Self::Helvetica,
            FontOption::Monospace => Self::Monospace,
            FontOption::Sans => Self::Sans,
            FontOption::Serif => Self::Serif,
            FontOption::Times => Self::Times,
        }
    }
}

/// Receipt layout and converter settings, overriding the config file
#[derive(clap::Args, Debug)]
struct ReceiptArgs {
    /// Roll width in millimetres
    #[arg(long)]
    width_mm: Option<u32>,

    /// Converter page height in millimetres
    #[arg(long)]
    height_mm: Option<u32>,

    /// Blank space to keep under the content
    #[arg(short, long)]
    margin: Option<u32>,

    /// Body font
    #[arg(long, value_enum)]
    font: Option<FontOption>,

    /// Body font size in points
    #[arg(long)]
    font_size: Option<u32>,

    /// Render in colour instead of grayscale
    #[arg(long)]
    color: bool,

    /// Path to the htmldoc executable
    #[arg(long, env = "HTMLDOC_PATH")]
    htmldoc: Option<PathBuf>,
}

impl ReceiptArgs {
    fn apply(self, config: &mut AppConfig) {
        let receipt = &mut config.receipt;
        if let Some(width_mm) = self.width_mm {
            receipt.width_mm = width_mm;
        }
        if let Some(height_mm) = self.height_mm {
            receipt.height_mm = height_mm;
        }
        if let Some(margin) = self.margin {
            receipt.bottom_margin = margin;
        }
        if let Some(font) = self.font {
            receipt.font = font.into();
        }
        if let Some(font_size) = self.font_size {
            receipt.font_size = font_size;
        }
        if self.color {
            receipt.gray = false;
        }
        if self.htmldoc.is_some() {
            config.htmldoc_path = self.htmldoc;
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "receipt-roll")]
#[command(author, version, about = "Continuous-roll PDF receipts for POS printers", long_about = None)]
struct Args {
    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Stack every page of a PDF onto one tall page
    Combine {
        input: PathBuf,
        output: PathBuf,
    },

    /// Cut trailing blank space off the bottom of page 1
    Trim {
        input: PathBuf,
        output: PathBuf,

        /// Blank space to keep under the content
        #[arg(short, long)]
        margin: Option<u32>,
    },

    /// Rasterize page 1 and report its trailing blank rows
    Probe {
        input: PathBuf,

        /// Also save the rasterized page as PNG
        #[arg(long)]
        png: Option<PathBuf>,
    },

    /// Convert an HTML receipt into paged PDF output, without combining or trimming
    Convert {
        /// Input HTML file
        html: PathBuf,

        /// Output PDF file
        output: PathBuf,

        #[command(flatten)]
        receipt: ReceiptArgs,
    },

    /// Convert an HTML receipt into a trimmed roll PDF
    Render {
        /// Input HTML file
        html: PathBuf,

        /// Output PDF file (default: input with .pdf extension)
        output: Option<PathBuf>,

        #[command(flatten)]
        receipt: ReceiptArgs,
    },
}

fn load_config(path: Option<&PathBuf>) -> Result<AppConfig> {
    match path {
        Some(path) => AppConfig::from_file(path).context("Failed to load config file"),
        None => Ok(AppConfig::load()),
    }
}

fn build_pipeline(config: &AppConfig) -> Result<ReceiptPipeline> {
    let converter = create_converter(config).context("Failed to set up htmldoc")?;
    ReceiptPipeline::new(
        converter,
        Box::new(LicenseStatus::Licensed),
        config.receipt.clone(),
    )
    .context("Invalid receipt options")
}

fn read_html(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read HTML: {}", path.display()))
}

fn main() -> Result<()> {
    // Load .env file if present (before parsing args so env vars are available)
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let log_level = match args.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .init();

    let mut config = load_config(args.config.as_ref())?;

    match args.command {
        Command::Combine { input, output } => {
            let size = combine(&input, &output)
                .with_context(|| format!("Failed to combine {}", input.display()))?;

            // CLI output is intentional
            #[allow(clippy::print_stdout)]
            {
                println!("Combined page saved to: {} ({size})", output.display());
            }
        }

        Command::Trim {
            input,
            output,
            margin,
        } => {
            let margin = margin.unwrap_or(config.receipt.bottom_margin);
            let size = trim(&input, &output, margin)
                .with_context(|| format!("Failed to trim {}", input.display()))?;

            #[allow(clippy::print_stdout)]
            {
                println!("{}", serde_json::to_string(&size)?);
            }
        }

        Command::Probe { input, png } => {
            let (frame, probe) =
                probe(&input).with_context(|| format!("Failed to probe {}", input.display()))?;

            if let Some(png_path) = png {
                std::fs::write(&png_path, frame.to_png()?)
                    .with_context(|| format!("Failed to write {}", png_path.display()))?;
                info!("Raster saved to {}", png_path.display());
            }

            #[allow(clippy::print_stdout)]
            {
                println!(
                    "{}x{} px, {} trailing blank rows, content height {} px",
                    frame.width,
                    frame.height,
                    probe.blank_rows,
                    probe.content_height()
                );
            }
        }

        Command::Convert {
            html,
            output,
            receipt,
        } => {
            receipt.apply(&mut config);
            let markup = read_html(&html)?;
            let pipeline = build_pipeline(&config)?;

            pipeline
                .html_to_pdf(&markup, &output)
                .with_context(|| format!("Failed to convert {}", html.display()))?;

            #[allow(clippy::print_stdout)]
            {
                println!("Converted PDF saved to: {}", output.display());
            }
        }

        Command::Render {
            html,
            output,
            receipt,
        } => {
            receipt.apply(&mut config);
            let markup = read_html(&html)?;
            let pipeline = build_pipeline(&config)?;

            let output_path = output.unwrap_or_else(|| html.with_extension("pdf"));
            info!("Rendering {} into {}", html.display(), output_path.display());

            let size = pipeline
                .html_to_receipt(&markup, &output_path)
                .with_context(|| format!("Failed to render {}", html.display()))?;

            #[allow(clippy::print_stdout)]
            {
                println!("Receipt saved to: {} ({size})", output_path.display());
            }
        }
    }

    Ok(())
}
