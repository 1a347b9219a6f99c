use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        SymbolFxError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(SymbolFxError::parse("x").to_string().contains("parse error:"));
    assert!(SymbolFxError::asset("x").to_string().contains("asset error:"));
    assert!(
        SymbolFxError::animation("x")
            .to_string()
            .contains("animation error:")
    );
    assert!(
        SymbolFxError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = SymbolFxError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn serde_json_errors_convert() {
    let err: SymbolFxError = serde_json::from_str::<serde_json::Value>("{")
        .unwrap_err()
        .into();
    assert!(matches!(err, SymbolFxError::Serde(_)));
}
