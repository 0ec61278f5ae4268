use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        FramefoldError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        FramefoldError::config("x")
            .to_string()
            .contains("configuration error:")
    );
    assert!(
        FramefoldError::evaluation("x")
            .to_string()
            .contains("evaluation error:")
    );
    assert!(
        FramefoldError::encode("x")
            .to_string()
            .contains("encode error:")
    );
    assert!(
        FramefoldError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = FramefoldError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
