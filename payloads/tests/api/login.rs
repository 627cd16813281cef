use payloads::{AuthContext, ClientError, Role, UserId, requests};
use reqwest::StatusCode;

use test_helpers::{
    assert_status_code, customer_account, customer_credentials, spawn_app,
};

#[tokio::test]
async fn login_refused() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.seed_users().await?;

    let body = requests::LoginCredentials {
        email: "carla@example.com".into(),
        password: "not-her-password".into(),
    };
    let result = app.client.login(&body).await;

    match result {
        Err(ClientError::APIError(code, text)) => {
            assert_eq!(code, StatusCode::UNAUTHORIZED);
            assert_eq!(text, "Invalid email or password");
        }
        _ => panic!("Expected APIError"),
    }

    Ok(())
}

#[tokio::test]
async fn login_returns_profile_and_usable_context() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.seed_users().await?;

    let (auth, profile) = app.client.login(&customer_credentials()).await?;
    assert_eq!(profile.email, "carla@example.com");
    assert_eq!(profile.role, Role::Customer);
    assert_eq!(auth.user_id(), &profile.user_id);

    let me = app.client.current_user(&auth).await?;
    assert_eq!(me, profile);

    Ok(())
}

#[tokio::test]
async fn unknown_token_is_unauthorized() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let auth = AuthContext::new(UserId("someone".into()), "forged-token");
    let result = app.client.current_user(&auth).await;

    assert!(matches!(&result, Err(e) if e.is_unauthorized()));
    assert_status_code(result, StatusCode::UNAUTHORIZED);

    Ok(())
}

#[tokio::test]
async fn duplicate_account_conflicts() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.seed_users().await?;

    let result = app.client.create_account(&customer_account()).await;
    assert_status_code(result, StatusCode::CONFLICT);

    Ok(())
}

#[tokio::test]
async fn invalid_account_is_not_sent() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let mut body = customer_account();
    body.password = "short".into();
    let result = app.client.create_account(&body).await;

    assert!(matches!(result, Err(ClientError::Validation(_))));
    assert_eq!(app.backend.request_count(), 0);

    Ok(())
}
