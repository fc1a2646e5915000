//! Inspect a DOCX produced by pdfside-docx.
//!
//! Usage:
//!   docx-inspect <file.docx>                    list ZIP entries
//!   docx-inspect <file.docx> --text             print paragraphs, one per line, pages separated by a rule
//!   docx-inspect <file.docx> <internal/path>    dump a raw entry

use std::fs;
use std::io::{self, Read, Write};
use std::process::ExitCode;
use zip::ZipArchive;

const WML_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

type Archive = ZipArchive<fs::File>;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();
    let Some(path) = args.get(1) else {
        eprintln!("Usage:");
        eprintln!("  docx-inspect <file.docx>                    list ZIP entries");
        eprintln!("  docx-inspect <file.docx> --text             print paragraph text");
        eprintln!("  docx-inspect <file.docx> <internal/path>    dump entry");
        return ExitCode::from(1);
    };

    let result = fs::File::open(path)
        .map_err(|e| format!("Cannot open '{path}': {e}"))
        .and_then(|f| ZipArchive::new(f).map_err(|e| format!("Not a valid DOCX: {e}")))
        .and_then(|mut archive| match args.get(2).map(String::as_str) {
            None => list_entries(&mut archive),
            Some("--text") => print_text(&mut archive),
            Some(entry) => dump_entry(&mut archive, entry),
        });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(msg) => {
            eprintln!("{msg}");
            ExitCode::from(1)
        }
    }
}

fn list_entries(archive: &mut Archive) -> Result<(), String> {
    println!("{:>9}  {:>9}  path", "bytes", "packed");
    for i in 0..archive.len() {
        let entry = archive.by_index(i).map_err(|e| e.to_string())?;
        if !entry.is_dir() {
            println!(
                "{:>9}  {:>9}  {}",
                entry.size(),
                entry.compressed_size(),
                entry.name()
            );
        }
    }
    Ok(())
}

fn read_entry(archive: &mut Archive, name: &str) -> Result<Vec<u8>, String> {
    let mut entry = archive
        .by_name(name)
        .map_err(|_| format!("'{name}' not found in archive"))?;
    let mut content = Vec::new();
    entry
        .read_to_end(&mut content)
        .map_err(|e| format!("Cannot read '{name}': {e}"))?;
    Ok(content)
}

fn dump_entry(archive: &mut Archive, name: &str) -> Result<(), String> {
    let content = read_entry(archive, name)?;
    io::stdout().write_all(&content).map_err(|e| e.to_string())
}

fn print_text(archive: &mut Archive) -> Result<(), String> {
    let bytes = read_entry(archive, "word/document.xml")?;
    let xml = String::from_utf8(bytes).map_err(|e| e.to_string())?;
    let doc = roxmltree::Document::parse(&xml).map_err(|e| format!("XML error: {e}"))?;

    let mut page = 1;
    println!("── page {page}");
    for para in doc
        .descendants()
        .filter(|n| n.tag_name().name() == "p" && n.tag_name().namespace() == Some(WML_NS))
    {
        let is_break = para.descendants().any(|n| {
            n.tag_name().name() == "br" && n.attribute((WML_NS, "type")) == Some("page")
        });
        if is_break {
            page += 1;
            println!("── page {page}");
            continue;
        }
        let text: String = para
            .descendants()
            .filter(|n| n.tag_name().name() == "t")
            .filter_map(|n| n.text())
            .collect();
        println!("{text}");
    }
    Ok(())
}
