//! Unit tests for repository addressing and credentials.

use rstest::rstest;

use super::{PersonalAccessToken, RetrievalError, WorkflowId};


#[rstest]
#[case::empty("")]
#[case::whitespace("  \t ")]
fn rejects_blank_token(#[case] raw: &str) {
    let result = PersonalAccessToken::new(raw);
    assert!(
        matches!(result, Err(RetrievalError::MissingToken)),
        "expected MissingToken, got {result:?}"
    );
}

#[rstest]
fn trims_token_whitespace() {
    let token = PersonalAccessToken::new("  ghp_example\n").expect("token should be accepted");
    assert_eq!(token.value(), "ghp_example", "token should be trimmed");
}

#[rstest]
fn rejects_zero_workflow_id() {
    assert_eq!(WorkflowId::new(0), Err(RetrievalError::InvalidWorkflowId));
}

#[rstest]
fn wraps_workflow_id() {
    let id = WorkflowId::new(161_335).expect("workflow id should be valid");
    assert_eq!(id.get(), 161_335);
}
