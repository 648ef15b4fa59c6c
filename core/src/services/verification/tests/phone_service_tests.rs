//! Unit tests for the phone verification proxy

use std::sync::Arc;

use crate::errors::DomainError;
use crate::services::verification::PhoneVerificationService;

use super::mocks::MockPhoneVerifier;

#[tokio::test]
async fn test_start_normalizes_phone() {
    let verifier = Arc::new(MockPhoneVerifier::new("123456"));
    let service = PhoneVerificationService::new(verifier.clone());

    let ticket = service.start("+1 (415) 555-0123").await.unwrap();

    assert_eq!(ticket.sid, "VE0001");
    assert_eq!(ticket.status, "pending");
    assert_eq!(*verifier.started.lock().unwrap(), vec!["+14155550123".to_string()]);
}

#[tokio::test]
async fn test_start_rejects_missing_or_short_phone() {
    let service = PhoneVerificationService::new(Arc::new(MockPhoneVerifier::new("123456")));

    match service.start("  ").await {
        Err(DomainError::Validation { message }) => assert!(message.contains("required")),
        other => panic!("Expected validation error, got {:?}", other),
    }
    assert!(matches!(service.start("12345").await, Err(DomainError::Validation { .. })));
    assert!(matches!(
        service.start("1234567890123456").await,
        Err(DomainError::Validation { .. })
    ));
}

#[tokio::test]
async fn test_check_approved_and_pending() {
    let service = PhoneVerificationService::new(Arc::new(MockPhoneVerifier::new("123456")));

    let approved = service.check("+14155550123", "123456").await.unwrap();
    assert!(approved.verified);
    assert_eq!(approved.status, "approved");

    let pending = service.check("+14155550123", "654321").await.unwrap();
    assert!(!pending.verified);
    assert_eq!(pending.status, "pending");
}

#[tokio::test]
async fn test_check_requires_phone_and_code() {
    let service = PhoneVerificationService::new(Arc::new(MockPhoneVerifier::new("123456")));

    assert!(matches!(
        service.check("+14155550123", "").await,
        Err(DomainError::Validation { .. })
    ));
    assert!(matches!(service.check("", "123456").await, Err(DomainError::Validation { .. })));
}

#[tokio::test]
async fn test_provider_errors_surface_as_transport() {
    let service = PhoneVerificationService::new(Arc::new(MockPhoneVerifier::failing()));

    match service.start("+14155550123").await {
        Err(DomainError::Transport { message }) => assert!(message.contains("To")),
        other => panic!("Expected transport error, got {:?}", other),
    }
    assert!(matches!(
        service.check("+14155550123", "123456").await,
        Err(DomainError::Transport { .. })
    ));
}
