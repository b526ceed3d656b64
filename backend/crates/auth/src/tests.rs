//! Unit tests for Auth crate

#[cfg(test)]
mod support {
    use std::sync::{Arc, Mutex};

    use crate::application::notifier::Notifier;
    use crate::application::secrets::LoginSecretSource;
    use crate::domain::entity::identity::PendingLogin;
    use crate::domain::value_object::{
        email::Email, otp_code::OtpCode, phone::Phone, session_id::SessionId,
    };
    use crate::{AuthAppState, AuthConfig, MemoryAuthRepository};

    /// Captures every delivery instead of sending it
    #[derive(Default)]
    pub struct RecordingNotifier {
        pub codes: Mutex<Vec<(String, OtpCode)>>,
        pub links: Mutex<Vec<(String, String)>>,
    }

    impl RecordingNotifier {
        pub fn last_code(&self) -> OtpCode {
            self.codes.lock().unwrap().last().unwrap().1
        }

        pub fn last_link(&self) -> String {
            self.links.lock().unwrap().last().unwrap().1.clone()
        }
    }

    impl Notifier for RecordingNotifier {
        fn send_login_code(&self, phone: &Phone, code: OtpCode) {
            self.codes.lock().unwrap().push((phone.to_string(), code));
        }

        fn send_email_verification(&self, email: &Email, link: &str) {
            self.links
                .lock()
                .unwrap()
                .push((email.to_string(), link.to_string()));
        }
    }

    /// Fresh session ids, always the same code
    pub struct FixedCode(pub u16);

    impl LoginSecretSource for FixedCode {
        fn next_pending(&self) -> PendingLogin {
            PendingLogin {
                session_id: SessionId::generate(),
                code: OtpCode::new(self.0).unwrap(),
            }
        }
    }

    pub fn state(
        notifier: Arc<RecordingNotifier>,
    ) -> (MemoryAuthRepository, AuthAppState<MemoryAuthRepository>) {
        let repo = MemoryAuthRepository::new();
        let config = AuthConfig {
            public_base_url: "https://shop.example.com".to_string(),
            ..AuthConfig::development()
        };
        let state = AuthAppState::new(repo.clone(), config, notifier).unwrap();
        (repo, state)
    }
}

#[cfg(test)]
mod login_flow_tests {
    use std::sync::Arc;

    use super::support::*;
    use crate::application::{RequestLoginUseCase, VerifyLoginUseCase};
    use crate::domain::repository::IdentityRepository;
    use crate::domain::value_object::{phone::Phone, session_id::SessionId};
    use crate::error::AuthError;

    fn use_cases(
        code: u16,
    ) -> (
        crate::MemoryAuthRepository,
        RequestLoginUseCase<crate::MemoryAuthRepository>,
        VerifyLoginUseCase<crate::MemoryAuthRepository>,
        Arc<RecordingNotifier>,
    ) {
        let notifier = Arc::new(RecordingNotifier::default());
        let (repo, state) = state(notifier.clone());
        let state = state.with_secret_source(Arc::new(FixedCode(code)));
        let request = RequestLoginUseCase::new(
            state.repo.clone(),
            state.notifier.clone(),
            state.secrets.clone(),
        );
        let verify = VerifyLoginUseCase::new(state.repo.clone(), state.codec.clone());
        (repo, request, verify, notifier)
    }

    #[tokio::test]
    async fn test_request_then_verify_issues_token_for_phone() {
        let (repo, request, verify, notifier) = use_cases(4821);
        let phone = Phone::new("79991234567").unwrap();

        let session_id = request.execute(phone.clone()).await.unwrap();
        assert_eq!(notifier.last_code().to_string(), "4821");

        let identity = repo.find_by_phone(&phone).await.unwrap().unwrap();
        assert_eq!(identity.pending_session_id(), Some(&session_id));

        let issued = verify.execute(&session_id, 4821).await.unwrap();
        assert_eq!(issued.expires_at - issued.issued_at, chrono::Duration::hours(24));

        let identity = repo.find_by_phone(&phone).await.unwrap().unwrap();
        assert!(identity.pending.is_none());
    }

    #[tokio::test]
    async fn test_token_subject_is_phone() {
        let notifier = Arc::new(RecordingNotifier::default());
        let (_, state) = state(notifier);
        let state = state.with_secret_source(Arc::new(FixedCode(7)));
        let request = RequestLoginUseCase::new(
            state.repo.clone(),
            state.notifier.clone(),
            state.secrets.clone(),
        );
        let verify = VerifyLoginUseCase::new(state.repo.clone(), state.codec.clone());

        let session_id = request
            .execute(Phone::new("79851174203").unwrap())
            .await
            .unwrap();
        let issued = verify.execute(&session_id, 7).await.unwrap();

        assert_eq!(state.codec.verify(&issued.token).unwrap(), "79851174203");
    }

    #[tokio::test]
    async fn test_second_verify_is_session_not_found() {
        let (_, request, verify, _) = use_cases(4821);
        let session_id = request
            .execute(Phone::new("79991234567").unwrap())
            .await
            .unwrap();

        verify.execute(&session_id, 4821).await.unwrap();
        assert!(matches!(
            verify.execute(&session_id, 4821).await,
            Err(AuthError::SessionNotFound)
        ));
    }

    #[tokio::test]
    async fn test_wrong_code_burns_session() {
        let (repo, request, verify, _) = use_cases(4821);
        let phone = Phone::new("79991234567").unwrap();
        let session_id = request.execute(phone.clone()).await.unwrap();

        assert!(matches!(
            verify.execute(&session_id, 1234).await,
            Err(AuthError::InvalidCode)
        ));
        assert!(matches!(
            verify.execute(&session_id, 4821).await,
            Err(AuthError::SessionNotFound)
        ));

        let identity = repo.find_by_phone(&phone).await.unwrap().unwrap();
        assert!(identity.pending.is_none());
    }

    #[tokio::test]
    async fn test_unknown_session() {
        let (_, _, verify, _) = use_cases(4821);
        assert!(matches!(
            verify.execute(&SessionId::from_raw("deadbeef"), 4821).await,
            Err(AuthError::SessionNotFound)
        ));
    }

    #[tokio::test]
    async fn test_repeat_request_replaces_session() {
        let (repo, request, verify, _) = use_cases(4821);
        let phone = Phone::new("79991234567").unwrap();

        let first = request.execute(phone.clone()).await.unwrap();
        let second = request.execute(phone.clone()).await.unwrap();
        assert_ne!(first, second);

        assert!(matches!(
            verify.execute(&first, 4821).await,
            Err(AuthError::SessionNotFound)
        ));
        assert!(verify.execute(&second, 4821).await.is_ok());

        // Same identity both times
        let identity = repo.find_by_phone(&phone).await.unwrap().unwrap();
        assert_eq!(identity.id.get(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_verifications_only_one_wins() {
        let (_, request, verify, _) = use_cases(4821);
        let session_id = request
            .execute(Phone::new("79991234567").unwrap())
            .await
            .unwrap();

        let verify = Arc::new(verify);
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let verify = verify.clone();
                let session_id = session_id.clone();
                tokio::spawn(async move { verify.execute(&session_id, 4821).await })
            })
            .collect();

        let mut successes = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => successes += 1,
                Err(AuthError::SessionNotFound) => {}
                Err(e) => panic!("unexpected error: {e}"),
            }
        }
        assert_eq!(successes, 1);
    }
}

#[cfg(test)]
mod email_verification_tests {
    use std::sync::Arc;
    use std::time::Duration;

    use super::support::*;
    use crate::application::{SendEmailVerificationUseCase, VerifyEmailUseCase};
    use crate::domain::value_object::email::Email;
    use crate::error::AuthError;

    fn token_from_link(link: &str) -> &str {
        link.rsplit('/').next().unwrap()
    }

    #[tokio::test]
    async fn test_link_verifies_once() {
        let notifier = Arc::new(RecordingNotifier::default());
        let (_, state) = state(notifier.clone());
        let send = SendEmailVerificationUseCase::new(
            state.repo.clone(),
            state.config.clone(),
            state.notifier.clone(),
        );
        let verify = VerifyEmailUseCase::new(state.repo.clone());

        send.execute(Email::new("User@Example.com").unwrap())
            .await
            .unwrap();
        let link = notifier.last_link();
        assert!(link.starts_with("https://shop.example.com/verify/"));

        let email = verify.execute(token_from_link(&link)).await.unwrap();
        assert_eq!(email.as_str(), "user@example.com");

        assert!(matches!(
            verify.execute(token_from_link(&link)).await,
            Err(AuthError::VerificationNotFound)
        ));
    }

    #[tokio::test]
    async fn test_expired_link_is_rejected() {
        let notifier = Arc::new(RecordingNotifier::default());
        let (repo, mut state) = state(notifier.clone());
        let mut config = (*state.config).clone();
        config.email_verification_ttl = Duration::ZERO;
        state.config = Arc::new(config);

        let send = SendEmailVerificationUseCase::new(
            state.repo.clone(),
            state.config.clone(),
            state.notifier.clone(),
        );
        send.execute(Email::new("user@example.com").unwrap())
            .await
            .unwrap();

        tokio::time::sleep(Duration::from_millis(20)).await;

        let verify = VerifyEmailUseCase::new(state.repo.clone());
        assert!(matches!(
            verify.execute(token_from_link(&notifier.last_link())).await,
            Err(AuthError::VerificationNotFound)
        ));
        assert_eq!(repo.pending_verifications().await, 0);
    }

    #[tokio::test]
    async fn test_unknown_token() {
        let notifier = Arc::new(RecordingNotifier::default());
        let (_, state) = state(notifier);
        let verify = VerifyEmailUseCase::new(state.repo.clone());
        assert!(matches!(
            verify.execute("not-a-token").await,
            Err(AuthError::VerificationNotFound)
        ));
    }
}

#[cfg(test)]
mod http_tests {
    use std::sync::Arc;

    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use axum::routing::get;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::support::*;
    use crate::{AuthenticatedSubject, auth_router, require_bearer};

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn app(code: u16) -> (Router, Arc<RecordingNotifier>) {
        let notifier = Arc::new(RecordingNotifier::default());
        let (_, state) = state(notifier.clone());
        let state = state.with_secret_source(Arc::new(FixedCode(code)));

        let protected = Router::new()
            .route(
                "/me",
                get(|subject: AuthenticatedSubject| async move { subject.0 }),
            )
            .layer(axum::middleware::from_fn_with_state(
                state.gate(),
                require_bearer,
            ));

        (auth_router(state).merge(protected), notifier)
    }

    #[tokio::test]
    async fn test_login_flow_over_http() {
        let (app, notifier) = app(4821);

        let (status, body) = send(&app, post_json("/auth", json!({"phone": "79991234567"}))).await;
        assert_eq!(status, StatusCode::OK);
        let session_id = body["sessionId"].as_str().unwrap().to_string();
        assert!(body.get("code").is_none());
        assert_eq!(notifier.last_code().get(), 4821);

        let (status, body) = send(
            &app,
            post_json("/auth/verify", json!({"sessionId": session_id, "code": 4821})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let token = body["token"].as_str().unwrap().to_string();

        let response = app
            .clone()
            .oneshot(
                Request::get("/me")
                    .header(header::AUTHORIZATION, format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"79991234567");

        let (status, _) = send(
            &app,
            post_json("/auth/verify", json!({"sessionId": session_id, "code": 4821})),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_invalid_phone_is_bad_request() {
        let (app, notifier) = app(4821);
        for phone in ["", "12345", "69991234567"] {
            let (status, body) = send(&app, post_json("/auth", json!({ "phone": phone }))).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["status"], 400);
        }
        assert!(notifier.codes.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let (app, _) = app(4821);
        let (status, body) = send(&app, post_json("/auth/verify", json!({"sessionId": "x"}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["title"], "Bad Request");

        let (status, _) = send(
            &app,
            post_json("/auth/verify", json!({"sessionId": "x", "code": "4821"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_wrong_code_is_unauthorized() {
        let (app, _) = app(4821);
        let (_, body) = send(&app, post_json("/auth", json!({"phone": "79991234567"}))).await;
        let session_id = body["sessionId"].as_str().unwrap().to_string();

        let (status, body) = send(
            &app,
            post_json("/auth/verify", json!({"sessionId": session_id, "code": 1111})),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["detail"], "Invalid one-time code");
    }

    #[tokio::test]
    async fn test_gate_rejects_without_reason() {
        let (app, _) = app(4821);

        for value in [None, Some("Basic abc"), Some("Bearer not.a.token"), Some("Bearer ")] {
            let mut request = Request::get("/me");
            if let Some(value) = value {
                request = request.header(header::AUTHORIZATION, value);
            }
            let response = app
                .clone()
                .oneshot(request.body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
            assert_eq!(
                response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
                "Bearer"
            );
            let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .unwrap();
            let body: Value = serde_json::from_slice(&bytes).unwrap();
            assert_eq!(body["detail"], "Authentication required");
        }
    }

    #[tokio::test]
    async fn test_email_verification_over_http() {
        let (app, notifier) = app(4821);

        let (status, body) = send(
            &app,
            post_json("/email/send", json!({"email": "user@example.com"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "sent"}));

        let link = notifier.last_link();
        let path = link.trim_start_matches("https://shop.example.com");
        let (status, body) = send(&app, Request::get(path).body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "verified", "email": "user@example.com"}));

        let (status, _) = send(&app, Request::get(path).body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, post_json("/email/send", json!({"email": "nope"}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}

#[cfg(test)]
mod error_tests {
    use crate::error::*;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use platform::token::TokenError;

    #[test]
    fn test_error_into_response_status_codes() {
        let test_cases: Vec<(AuthError, StatusCode)> = vec![
            (AuthError::InvalidPhone("x".into()), StatusCode::BAD_REQUEST),
            (AuthError::InvalidEmail("x".into()), StatusCode::BAD_REQUEST),
            (AuthError::SessionNotFound, StatusCode::UNAUTHORIZED),
            (AuthError::InvalidCode, StatusCode::UNAUTHORIZED),
            (AuthError::Unauthorized, StatusCode::UNAUTHORIZED),
            (AuthError::Token(TokenError::Expired), StatusCode::UNAUTHORIZED),
            (AuthError::PhoneTaken, StatusCode::CONFLICT),
            (AuthError::StaleIdentity, StatusCode::CONFLICT),
            (AuthError::VerificationNotFound, StatusCode::NOT_FOUND),
            (
                AuthError::Token(TokenError::Signing("empty".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                AuthError::Internal("test".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected_status) in test_cases {
            let response = error.into_response();
            assert_eq!(
                response.status(),
                expected_status,
                "Error should return correct status code"
            );
        }
    }

    #[test]
    fn test_internal_detail_is_hidden() {
        let app_error = AuthError::Internal("pool exploded".into()).into_app_error();
        assert_eq!(app_error.public_detail(), "Internal server error");
    }
}

#[cfg(test)]
mod models_tests {
    use crate::presentation::dto::*;

    #[test]
    fn test_request_login_response_serialization() {
        let response = RequestLoginResponse {
            session_id: "abc".to_string(),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(json, r#"{"sessionId":"abc"}"#);
    }

    #[test]
    fn test_verify_login_request_deserialization() {
        let json = r#"{"sessionId":"abc","code":42}"#;
        let request: VerifyLoginRequest = serde_json::from_str(json).unwrap();
        let (session_id, code) = request.into_input();
        assert_eq!(session_id.as_str(), "abc");
        assert_eq!(code, 42);
    }

    #[test]
    fn test_request_login_trims_phone() {
        let request = RequestLoginRequest {
            phone: " 79991234567 ".to_string(),
        };
        assert_eq!(request.try_into_input().unwrap().as_str(), "79991234567");
    }
}
