pub fn assert_close(actual: f64, expected: f64, relative: f64) {
    let scale = expected.abs().max(1e-300);
    assert!(
        ((actual - expected) / scale).abs() <= relative,
        "expected {expected} (rel ± {relative}), got {actual}"
    );
}
