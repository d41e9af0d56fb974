use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        ScorecardError::config("x")
            .to_string()
            .contains("invalid configuration:")
    );
    assert!(
        ScorecardError::score("x")
            .to_string()
            .contains("invalid score record:")
    );
    assert!(
        ScorecardError::asset("x")
            .to_string()
            .contains("asset processing failure:")
    );
    assert!(
        ScorecardError::text("x")
            .to_string()
            .contains("text rendering error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ScorecardError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
