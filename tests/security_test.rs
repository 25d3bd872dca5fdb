use toolroom::auth::{create_jwt, decode_jwt};
use toolroom::models::UserRole;

#[tokio::test]
async fn test_jwt_creation_and_verification() {
    let token = create_jwt(42, UserRole::LabSupervisor, Some("Supervisor"))
        .expect("Failed to create JWT");
    assert!(!token.is_empty());

    let claims = decode_jwt(&token).expect("Failed to verify JWT");
    assert_eq!(claims.sub, "42");
    assert_eq!(claims.role, "lab_supervisor");
    assert_eq!(claims.name.as_deref(), Some("Supervisor"));

    let actor = claims.actor().expect("Claims should resolve to an actor");
    assert_eq!(actor.user_id, 42);
    assert_eq!(actor.role, UserRole::LabSupervisor);
}

#[tokio::test]
async fn test_tampered_token_is_rejected() {
    let token = create_jwt(1, UserRole::User, None).expect("Failed to create JWT");

    // Flip one character in the middle of the signature
    let mut bytes = token.into_bytes();
    let signature_start = bytes.iter().rposition(|&b| b == b'.').unwrap() + 1;
    let target = signature_start + 5;
    bytes[target] = if bytes[target] == b'A' { b'B' } else { b'A' };
    let tampered = String::from_utf8(bytes).unwrap();

    assert!(decode_jwt(&tampered).is_err());
    assert!(decode_jwt("garbage").is_err());
}
