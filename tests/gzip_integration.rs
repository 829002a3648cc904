use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::Write;
use std::path::PathBuf;
use tempfile::TempDir;
use yamlsmith::navigator::NavigationPrefs;
use yamlsmith::printer::{PrinterOptions, YamlPrinter};
use yamlsmith::stream::StreamEvaluator;

/// Helper function to write gzip-compressed text into the temp dir
fn write_gzipped(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(contents.as_bytes()).unwrap();
    std::fs::write(&path, encoder.finish().unwrap()).unwrap();
    path
}

#[test]
fn test_gzipped_input_is_streamed() {
    let dir = TempDir::new().unwrap();
    let path = write_gzipped(&dir, "docs.yaml.gz", "a: 1\n---\na: 2\n");
    let files = [path.to_string_lossy().to_string()];

    let evaluator = StreamEvaluator::new(NavigationPrefs::default());
    let mut printer = YamlPrinter::new(Vec::new(), PrinterOptions::default());
    evaluator
        .evaluate_file_streams_sequence(".a", &files, &mut printer)
        .unwrap();
    assert_eq!(printer.into_inner(), b"1\n---\n2\n");
}

#[test]
fn test_gzipped_and_plain_inputs_combined() {
    let dir = TempDir::new().unwrap();
    let packed = write_gzipped(&dir, "packed.yaml.gz", "a: 1\n");
    let plain = dir.path().join("plain.yaml");
    std::fs::write(&plain, "a: 2\n").unwrap();
    let files = [
        packed.to_string_lossy().to_string(),
        plain.to_string_lossy().to_string(),
    ];

    let evaluator = StreamEvaluator::new(NavigationPrefs::default());
    let mut printer = YamlPrinter::new(
        Vec::new(),
        PrinterOptions {
            print_document_separators: false,
            ..PrinterOptions::default()
        },
    );
    evaluator
        .evaluate_all_file_streams(".a", &files, &mut printer)
        .unwrap();
    assert_eq!(printer.into_inner(), b"1\n2\n");
}
