use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        PosefxError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        PosefxError::param("x")
            .to_string()
            .contains("parameter error:")
    );
    assert!(PosefxError::raster("x").to_string().contains("raster error:"));
    assert!(
        PosefxError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = PosefxError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn json_errors_map_to_serde_variant() {
    let err: PosefxError = serde_json::from_str::<u32>("nope").unwrap_err().into();
    assert!(matches!(err, PosefxError::Serde(_)));
}

#[test]
fn constructors_build_their_named_variant() {
    assert!(matches!(PosefxError::validation("x"), PosefxError::Validation(m) if m == "x"));
    assert!(matches!(PosefxError::param("x"), PosefxError::Param(_)));
    assert!(matches!(PosefxError::raster("x"), PosefxError::Raster(_)));
    assert!(matches!(PosefxError::serde("x"), PosefxError::Serde(_)));
}
