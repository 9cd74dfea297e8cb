use indexer::ingest_dir;
use search_core::IndexEngine;
use std::fs;
use tempfile::tempdir;

#[test]
fn ingests_text_files_in_path_order() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("week2")).unwrap();
    fs::write(dir.path().join("b_notes.txt"), "Kernel scheduling notes").unwrap();
    fs::write(dir.path().join("a_report.txt"), "Scheduling report, scheduling again").unwrap();
    fs::write(dir.path().join("week2/c_slides.txt"), "Paging and memory").unwrap();
    fs::write(dir.path().join("ignored.pdf"), "scheduling").unwrap();

    let mut engine = IndexEngine::new();
    let summary = ingest_dir(&mut engine, dir.path()).unwrap();
    assert_eq!(summary.ingested, vec![1, 2, 3]);
    assert!(summary.rejected.is_empty());

    let first = engine.get_document(1).unwrap();
    assert_eq!(first.title, "a_report");
    assert_eq!(first.filename, "a_report.txt");
    assert_eq!(engine.keyword_search("scheduling"), vec![(1, 2), (2, 1)]);
    assert_eq!(engine.filename_search("slides", false), vec![(3, 1)]);
}

#[test]
fn rejected_files_are_reported() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("blank.txt"), "   \n\t").unwrap();
    fs::write(dir.path().join("stop.txt"), "the and of").unwrap();
    fs::write(dir.path().join("real.txt"), "content").unwrap();

    let mut engine = IndexEngine::new();
    let summary = ingest_dir(&mut engine, dir.path()).unwrap();
    assert_eq!(summary.ingested, vec![1]);
    assert_eq!(summary.rejected.len(), 2);
    assert_eq!(engine.get_document(1).unwrap().filename, "real.txt");
}

#[test]
fn invalid_utf8_is_read_lossily() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("binary.txt");
    fs::write(&file, [0xff, 0xfe, b'o', b'k', 0x00, b'f', b'i', b'n', b'e']).unwrap();

    let mut engine = IndexEngine::new();
    let summary = ingest_dir(&mut engine, &file).unwrap();
    assert_eq!(summary.ingested, vec![1]);
    assert_eq!(engine.keyword_search("fine"), vec![(1, 1)]);
}

#[test]
fn missing_input_is_an_error() {
    let dir = tempdir().unwrap();
    let mut engine = IndexEngine::new();
    assert!(ingest_dir(&mut engine, &dir.path().join("nope")).is_err());
}
