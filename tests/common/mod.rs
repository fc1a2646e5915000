#![allow(dead_code)]

use std::fs;
use std::io::Read;
use std::path::Path;

use lopdf::{Object, Stream, StringFormat, dictionary};
use md5::{Digest, Md5};
use pdf_writer::{Content, Name, Pdf, Rect, Ref, Str, TextStr};

const LETTER: (f32, f32) = (612.0, 792.0);

/// Writes a Helvetica-only US Letter PDF with one page per entry of `pages`,
/// each line drawn in its own text object.
pub fn write_pdf(path: &Path, pages: &[&[&str]], title: Option<&str>) {
    let sized: Vec<((f32, f32), &[&str])> = pages.iter().map(|&lines| (LETTER, lines)).collect();
    write_sized_pdf(path, &sized, title);
}

/// Like `write_pdf`, with an explicit (width, height) in points per page.
pub fn write_sized_pdf(path: &Path, pages: &[((f32, f32), &[&str])], title: Option<&str>) {
    let mut pdf = Pdf::new();
    let catalog_id = Ref::new(1);
    let pages_id = Ref::new(2);
    let font_id = Ref::new(3);
    let info_id = Ref::new(4);
    let mut next_id = 5;

    let mut page_ids = Vec::new();
    for &((width, height), lines) in pages {
        let page_id = Ref::new(next_id);
        let content_id = Ref::new(next_id + 1);
        next_id += 2;
        page_ids.push(page_id);

        let mut content = Content::new();
        let mut y = height - 72.0;
        for line in lines.iter() {
            content
                .begin_text()
                .set_font(Name(b"F1"), 12.0)
                .next_line(72.0, y)
                .show(Str(line.as_bytes()))
                .end_text();
            y -= 14.4;
        }
        pdf.stream(content_id, &content.finish());

        pdf.page(page_id)
            .media_box(Rect::new(0.0, 0.0, width, height))
            .parent(pages_id)
            .contents(content_id)
            .resources()
            .fonts()
            .pair(Name(b"F1"), font_id);
    }

    pdf.catalog(catalog_id).pages(pages_id);
    pdf.pages(pages_id)
        .kids(page_ids.iter().copied())
        .count(page_ids.len() as i32);
    pdf.type1_font(font_id).base_font(Name(b"Helvetica"));
    if let Some(title) = title {
        pdf.document_info(info_id).title(TextStr(title));
    }

    fs::write(path, pdf.finish()).expect("write fixture PDF");
}

// Standard security handler padding string.
const PAD: [u8; 32] = [
    0x28, 0xBF, 0x4E, 0x5E, 0x4E, 0x75, 0x8A, 0x41, 0x64, 0x00, 0x4E, 0x56, 0xFF, 0xFA, 0x01, 0x08,
    0x2E, 0x2E, 0x00, 0xB6, 0xD0, 0x68, 0x3E, 0x80, 0x2F, 0x0C, 0xA9, 0xFE, 0x64, 0x53, 0x69, 0x7A,
];

fn padded(password: &[u8]) -> Vec<u8> {
    password.iter().chain(PAD.iter()).take(32).copied().collect()
}

fn md5(parts: &[&[u8]]) -> Vec<u8> {
    let mut hasher = Md5::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().to_vec()
}

fn rc4(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut s: Vec<u8> = (0..=255).collect();
    let mut j: u8 = 0;
    for i in 0..256 {
        j = j.wrapping_add(s[i]).wrapping_add(key[i % key.len()]);
        s.swap(i, j as usize);
    }
    let (mut i, mut j) = (0u8, 0u8);
    data.iter()
        .map(|&b| {
            i = i.wrapping_add(1);
            j = j.wrapping_add(s[i as usize]);
            s.swap(i as usize, j as usize);
            b ^ s[s[i as usize].wrapping_add(s[j as usize]) as usize]
        })
        .collect()
}

/// Writes a one-page PDF encrypted with the 40-bit RC4 standard security
/// handler (revision 2). An empty `user_password` gives an owner-only file
/// that any reader can open.
pub fn write_encrypted_pdf(path: &Path, user_password: &[u8], text: &str) {
    let file_id = b"pdfside-fixture-id".to_vec();
    let permissions: i32 = -44;

    let owner_key = md5(&[&padded(b"owner-secret")[..]]);
    let owner_entry = rc4(&owner_key[..5], &padded(user_password));
    let padded_user = padded(user_password);
    let key = md5(&[
        &padded_user[..],
        &owner_entry[..],
        &permissions.to_le_bytes()[..],
        &file_id[..],
    ])[..5]
        .to_vec();
    let user_entry = rc4(&key, &PAD);

    let mut doc = lopdf::Document::with_version("1.4");
    let pages_id = doc.new_object_id();
    let content_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => dictionary! { "Font" => dictionary! { "F1" => font_id } },
        "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        }),
    );

    let content = format!("BT /F1 12 Tf 72 720 Td ({text}) Tj ET");
    let (num, generation) = content_id;
    let object_key = md5(&[
        &key[..],
        &num.to_le_bytes()[..3],
        &generation.to_le_bytes()[..2],
    ]);
    let encrypted = rc4(&object_key[..10], content.as_bytes());
    doc.objects
        .insert(content_id, Object::Stream(Stream::new(dictionary! {}, encrypted)));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let encrypt_id = doc.add_object(dictionary! {
        "Filter" => "Standard",
        "V" => 1,
        "R" => 2,
        "Length" => 40,
        "O" => Object::String(owner_entry, StringFormat::Hexadecimal),
        "U" => Object::String(user_entry, StringFormat::Hexadecimal),
        "P" => i64::from(permissions),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Encrypt", encrypt_id);
    doc.trailer.set(
        "ID",
        vec![
            Object::String(file_id.clone(), StringFormat::Hexadecimal),
            Object::String(file_id, StringFormat::Hexadecimal),
        ],
    );

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).expect("serialize encrypted fixture");
    fs::write(path, bytes).expect("write encrypted fixture");
}

pub fn read_docx_entry(path: &Path, name: &str) -> String {
    let file = fs::File::open(path).expect("open DOCX");
    let mut archive = zip::ZipArchive::new(file).expect("DOCX is a ZIP");
    let mut xml = String::new();
    archive
        .by_name(name)
        .unwrap_or_else(|_| panic!("{name} missing from DOCX"))
        .read_to_string(&mut xml)
        .expect("read entry");
    xml
}

/// Text of every `w:t` in document order, plus the number of page breaks.
pub fn document_text(path: &Path) -> (Vec<String>, usize) {
    let xml = read_docx_entry(path, "word/document.xml");
    let doc = roxmltree::Document::parse(&xml).expect("document.xml is well-formed");
    let text = doc
        .descendants()
        .filter(|n| n.tag_name().name() == "t")
        .filter_map(|n| n.text())
        .map(String::from)
        .collect();
    let breaks = doc
        .descendants()
        .filter(|n| n.tag_name().name() == "br" && n.attribute((W_NS, "type")) == Some("page"))
        .count();
    (text, breaks)
}

const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
