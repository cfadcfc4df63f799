use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        CardError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        CardError::missing_input("portrait.png")
            .to_string()
            .contains("missing input: portrait.png")
    );
    assert!(CardError::render("x").to_string().contains("render error:"));
    assert!(
        CardError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = CardError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn anyhow_context_converts_with_question_mark() {
    use anyhow::Context as _;

    fn read(path: &std::path::Path) -> CardResult<String> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read card '{}'", path.display()))?;
        Ok(s)
    }

    let err = read(std::path::Path::new("/definitely/not/here.json")).unwrap_err();
    assert!(matches!(err, CardError::Other(_)));
    assert!(err.to_string().contains("read card '/definitely/not/here.json'"));
}
