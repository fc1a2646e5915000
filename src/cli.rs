use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Parser;

use crate::converter::{Backend, Conversion, PdfBackend};
use crate::error::Error;
use crate::model::PageRange;

pub const EXIT_OK: i32 = 0;
pub const EXIT_USAGE: i32 = 1;
pub const EXIT_FAILURE: i32 = 2;

#[derive(Parser)]
#[command(
    name = "pdfside-docx",
    about = "Convert PDF files to DOCX",
    disable_help_flag = true,
    disable_version_flag = true
)]
struct Args {
    // Every argument is a path, including ones that look like flags.
    /// Input PDF file
    #[arg(allow_hyphen_values = true)]
    input: PathBuf,
    /// Output DOCX file (created or overwritten)
    #[arg(allow_hyphen_values = true)]
    output: PathBuf,
    /// Anything after the output path is ignored
    #[arg(hide = true, allow_hyphen_values = true)]
    extra: Vec<OsString>,
}

/// Closes the handle when it goes out of scope, on every path out of
/// `convert` including unwinding.
struct Opened<H: Conversion>(H);

impl<H: Conversion> Drop for Opened<H> {
    fn drop(&mut self) {
        self.0.close();
    }
}

fn convert<B: Backend>(backend: &B, input: &Path, output: &Path) -> Result<(), Error> {
    let mut handle = Opened(backend.open(input)?);
    handle.0.convert(output, PageRange::all())
}

/// Runs the command line with the built-in PDF engine and returns the process
/// exit code.
pub fn run<I, T>(args: I, stdout: &mut dyn Write, stderr: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    run_with(&PdfBackend, args, stdout, stderr)
}

pub fn run_with<B, I, T>(
    backend: &B,
    args: I,
    stdout: &mut dyn Write,
    stderr: &mut dyn Write,
) -> i32
where
    B: Backend,
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args = match Args::try_parse_from(args) {
        Ok(args) => args,
        Err(e) => {
            let _ = write!(stderr, "{}", e.render());
            return EXIT_USAGE;
        }
    };

    if !args.extra.is_empty() {
        log::warn!("Ignoring {} extra argument(s)", args.extra.len());
    }

    match convert(backend, &args.input, &args.output) {
        Ok(()) => {
            let _ = writeln!(stdout, "OK");
            EXIT_OK
        }
        Err(e) => {
            log::debug!("Conversion of {} failed: {e:?}", args.input.display());
            let _ = writeln!(stderr, "ERROR: {e}");
            EXIT_FAILURE
        }
    }
}
