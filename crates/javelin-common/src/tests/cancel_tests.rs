use super::*;

#[test]
fn test_token_starts_uncancelled() {
    let token = CancellationToken::new();
    assert!(!token.is_cancelled());
    assert!(token.check().is_ok());
}

#[test]
fn test_cancel_is_shared_between_clones() {
    let token = CancellationToken::new();
    let clone = token.clone();
    clone.cancel();
    assert!(token.is_cancelled());
    assert_eq!(token.check(), Err(AnalysisError::Cancelled));
}
