use rstest::rstest;

use crate::error::AppError;

#[rstest]
#[case(AppError::Unauthenticated("test".into()), 401, "UNAUTHENTICATED")]
#[case(AppError::Unauthorized("test".into()), 401, "UNAUTHORIZED")]
#[case(AppError::BadRequest("test".into()), 400, "BAD_REQUEST")]
#[case(AppError::PayloadTooLarge("test".into()), 413, "PAYLOAD_TOO_LARGE")]
#[case(AppError::Validation("test".into()), 400, "VALIDATION_ERROR")]
#[case(AppError::NotFound("test".into()), 404, "NOT_FOUND")]
#[case(AppError::Upstream("test".into()), 500, "UPSTREAM_ERROR")]
#[case(AppError::Database("test".into()), 500, "DATABASE_ERROR")]
#[case(AppError::Internal("test".into()), 500, "INTERNAL_ERROR")]
fn test_app_error_mapping(#[case] err: AppError, #[case] status: u16, #[case] code: &str) {
    assert_eq!(err.status_code(), status);
    assert_eq!(err.error_code(), code);
    assert_eq!(err.is_server_error(), status >= 500);
}

#[test]
fn test_app_error_display() {
    assert_eq!(
        format!("{}", AppError::Unauthenticated("msg".into())),
        "Authentication required: msg"
    );
    assert_eq!(
        format!("{}", AppError::Unauthorized("msg".into())),
        "Authentication failed: msg"
    );
    assert_eq!(
        format!("{}", AppError::BadRequest("msg".into())),
        "Bad request: msg"
    );
    assert_eq!(
        format!("{}", AppError::NotFound("msg".into())),
        "Not found: msg"
    );
    assert_eq!(
        format!("{}", AppError::Upstream("msg".into())),
        "Upstream error: msg"
    );
}
