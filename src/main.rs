use std::io::Write;

fn main() {
    env_logger::init();

    let mut stdout = std::io::stdout();
    let mut stderr = std::io::stderr();
    let code = pdfside_docx::cli::run(std::env::args_os(), &mut stdout, &mut stderr);
    let _ = stdout.flush();
    std::process::exit(code);
}
