use std::io::{Cursor, Write};
use zip::unstable::write::FileOptionsExt;

use subsalvage_archive::{Error, extract_subtitle_entry, read_entries};

fn zip_of(files: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = zip::write::SimpleFileOptions::default();
    for (name, bytes) in files {
        writer.start_file(*name, options).unwrap();
        writer.write_all(bytes).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

fn tar_of(files: &[(&str, &[u8])]) -> Vec<u8> {
    let mut builder = tar::Builder::new(Vec::new());
    for (name, bytes) in files {
        let mut header = tar::Header::new_gnu();
        header.set_size(bytes.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder.append_data(&mut header, name, *bytes).unwrap();
    }
    builder.into_inner().unwrap()
}

fn gzip(bytes: &[u8], name: Option<&str>) -> Vec<u8> {
    let mut builder = flate2::GzBuilder::new();
    if let Some(name) = name {
        builder = builder.filename(name);
    }
    let mut encoder = builder.write(Vec::new(), flate2::Compression::default());
    encoder.write_all(bytes).unwrap();
    encoder.finish().unwrap()
}

#[test]
fn zip_entries_in_archive_order() {
    let data = zip_of(&[("notes.txt", b"read me"), ("movie.srt", b"1\n")]);
    let entries = read_entries(&data).unwrap();
    let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, ["notes.txt", "movie.srt"]);
    assert_eq!(entries[0].bytes, b"read me");
}

#[test]
fn zip_selects_srt_regardless_of_order() {
    for files in [
        [("notes.txt", &b"n"[..]), ("movie.srt", &b"s"[..])],
        [("movie.srt", &b"s"[..]), ("notes.txt", &b"n"[..])],
    ] {
        let entry = extract_subtitle_entry(&zip_of(&files)).unwrap();
        assert_eq!(entry.name, "movie.srt");
        assert_eq!(entry.bytes, b"s");
    }
}

#[test]
fn zip_skips_directories_and_macos_metadata() {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = zip::write::SimpleFileOptions::default();
    writer.add_directory("subs/", options).unwrap();
    writer.start_file("__MACOSX/subs/._movie.srt", options).unwrap();
    writer.write_all(b"\x00\x05\x16\x07").unwrap();
    writer.start_file("subs/movie.srt", options).unwrap();
    writer.write_all(b"1\n").unwrap();
    let data = writer.finish().unwrap().into_inner();

    let entries = read_entries(&data).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].name, "subs/movie.srt");
}

#[test]
fn encrypted_member_is_skipped() {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let locked = zip::write::SimpleFileOptions::default().with_deprecated_encryption(b"secret");
    writer.start_file("readme.nfo", locked).unwrap();
    writer.write_all(b"locked away").unwrap();
    writer
        .start_file("movie.srt", zip::write::SimpleFileOptions::default())
        .unwrap();
    writer.write_all(b"1\n").unwrap();
    let data = writer.finish().unwrap().into_inner();

    let entries = read_entries(&data).unwrap();
    let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, ["movie.srt"]);
    assert_eq!(extract_subtitle_entry(&data).unwrap().bytes, b"1\n");
}

#[test]
fn empty_zip_is_empty_archive() {
    let data = zip_of(&[]);
    assert!(read_entries(&data).unwrap().is_empty());
    assert!(matches!(extract_subtitle_entry(&data), Err(Error::EmptyArchive)));
}

#[test]
fn zip_with_zero_byte_entry() {
    let data = zip_of(&[("empty.srt", b"")]);
    let entry = extract_subtitle_entry(&data).unwrap();
    assert_eq!(entry.name, "empty.srt");
    assert!(entry.is_empty());
}

#[test]
fn truncated_zip_is_corrupted() {
    let mut data = zip_of(&[("movie.srt", b"1\n00:00:01,000 --> 00:00:02,000\nHi\n")]);
    data.truncate(12);
    assert!(matches!(read_entries(&data), Err(Error::Corrupted)));
}

#[test]
fn plain_tar() {
    let data = tar_of(&[("a/readme.nfo", b"info"), ("a/movie.ass", b"[Script Info]")]);
    let entry = extract_subtitle_entry(&data).unwrap();
    assert_eq!(entry.name, "a/movie.ass");
    assert_eq!(entry.bytes, b"[Script Info]");
}

#[test]
fn tar_gz() {
    let data = gzip(&tar_of(&[("movie.vtt", b"WEBVTT\n")]), None);
    let entries = read_entries(&data).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].name, "movie.vtt");
}

#[test]
fn bare_gzip_uses_header_name() {
    let data = gzip(b"1\n00:00:01,000 --> 00:00:02,000\nHi\n", Some("movie.srt"));
    let entry = extract_subtitle_entry(&data).unwrap();
    assert_eq!(entry.name, "movie.srt");
    assert!(entry.bytes.starts_with(b"1\n"));
}

#[test]
fn bare_gzip_without_name() {
    let data = gzip(b"hello", None);
    let entry = extract_subtitle_entry(&data).unwrap();
    assert_eq!(entry.name, subsalvage_archive::extract::UNNAMED_ENTRY);
}

#[test]
fn raw_text_is_unsupported() {
    let result = read_entries(b"1\n00:00:01,000 --> 00:00:02,000\nHi\n");
    assert!(matches!(result, Err(Error::UnsupportedFormat)));
}
