use super::*;

#[test]
fn write_page_creates_directories() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("cards").join("exploration");
    let path = write_page(&nested, "VARIANTS.md", "# hi\n").unwrap();
    assert_eq!(path, nested.join("VARIANTS.md"));
    assert_eq!(std::fs::read_to_string(path).unwrap(), "# hi\n");
}
