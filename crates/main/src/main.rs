use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use log::info;
use sahayak_pdf::encode::encode_page;
use sahayak_pdf::{
    DocumentGenerator, DocumentRequest, FontSelection, FormTemplate, LayoutConfig, RenderWarning,
    WrapMode,
};

/// Renders printable scheme forms as single-page A4 PDFs.
///
/// Text is drawn with `MarathiFont.ttf`, searched for in `SAHAYAK_FONTS_DIR`,
/// the current directory and `assets/fonts`. Without it the documents are
/// still produced with placeholder glyphs and a warning.
#[derive(Parser)]
#[command(author, version, about = "Render printable Majhi Ladki Bahin forms as PDFs")]
struct Cli {
    /// Font file to render with instead of searching for MarathiFont.ttf.
    #[arg(long, global = true, env = "SAHAYAK_FONT", value_name = "FILE")]
    font: Option<PathBuf>,

    /// Draw placeholder glyphs without looking for any font.
    #[arg(long, global = true, conflicts_with = "font")]
    builtin_glyphs: bool,

    /// Wrap lines by measured pixel width instead of character count.
    #[arg(long, global = true)]
    measured_wrap: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a document from the given title, body and footer.
    Render {
        /// Centered heading; omitted when empty.
        #[arg(long, default_value = "")]
        title: String,

        /// Body text with paragraphs separated by newlines.
        #[arg(long, conflicts_with = "body_file")]
        body: Option<String>,

        /// Read the body text from a UTF-8 file.
        #[arg(long, value_name = "FILE")]
        body_file: Option<PathBuf>,

        /// Footer text; four or more spaces split it into left and right columns.
        #[arg(long, default_value = "")]
        footer: String,

        /// Output PDF path.
        #[arg(short, long, default_value = "document.pdf")]
        output: PathBuf,

        /// Also save the rendered page as a PNG image.
        #[arg(long, value_name = "FILE")]
        preview: Option<PathBuf>,
    },

    /// Render one of the bundled blank forms (hamipatra, correction, dbt).
    Form {
        form: FormTemplate,

        /// Output PDF path; defaults to the form's download name.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Render every bundled form into a directory.
    #[command(name = "all-forms", aliases = ["all_forms", "all"])]
    AllForms {
        #[arg(default_value = "target/forms")]
        output_dir: PathBuf,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("error")).init();
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        eprintln!("Error: {}", err);
        print_error_sources(err.as_ref());
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let generator = build_generator(&cli);

    match cli.command {
        Commands::Render {
            title,
            body,
            body_file,
            footer,
            output,
            preview,
        } => {
            let body = match body_file {
                Some(path) => fs::read_to_string(&path)
                    .map_err(|err| format!("cannot read body from {}: {}", path.display(), err))?,
                None => body.unwrap_or_default(),
            };
            let request = DocumentRequest::new(title, body, footer);
            render_request(&generator, &request, &output, preview.as_deref())
        }
        Commands::Form { form, output } => {
            let output = output.unwrap_or_else(|| PathBuf::from(form.file_name()));
            render_request(&generator, &form.request(), &output, None)
        }
        Commands::AllForms { output_dir } => {
            fs::create_dir_all(&output_dir)?;
            for form in FormTemplate::ALL {
                render_request(
                    &generator,
                    &form.request(),
                    &output_dir.join(form.file_name()),
                    None,
                )?;
            }
            println!("All forms rendered to {}.", output_dir.display());
            Ok(())
        }
    }
}

fn build_generator(cli: &Cli) -> DocumentGenerator {
    let font = if cli.builtin_glyphs {
        FontSelection::Builtin
    } else if let Some(path) = &cli.font {
        FontSelection::File(path.clone())
    } else {
        FontSelection::Search
    };

    let wrap_mode = if cli.measured_wrap {
        WrapMode::MeasuredWidth
    } else {
        WrapMode::CharacterCount
    };

    let generator = DocumentGenerator::builder()
        .with_config(LayoutConfig::default().with_wrap_mode(wrap_mode))
        .with_font(font)
        .build();
    info!("Rendering with {}", generator.font().glyphs().name());
    generator
}

fn render_request(
    generator: &DocumentGenerator,
    request: &DocumentRequest,
    output: &Path,
    preview: Option<&Path>,
) -> Result<(), Box<dyn Error>> {
    let page = generator.render_page(request);
    report_warnings(&page.warnings);

    if let Some(preview) = preview {
        page.image.save(preview)?;
        println!("Saved preview {}", preview.display());
    }

    let bytes = encode_page(&page.image, generator.config().page.dpi)?;
    fs::write(output, &bytes)?;
    println!("Generated {} ({} bytes)", output.display(), bytes.len());
    Ok(())
}

fn report_warnings(warnings: &[RenderWarning]) {
    for warning in warnings {
        eprintln!("warning: {}", warning);
    }
}

fn print_error_sources(mut error: &(dyn Error + 'static)) {
    while let Some(source) = error.source() {
        eprintln!("  caused by: {}", source);
        error = source;
    }
}
