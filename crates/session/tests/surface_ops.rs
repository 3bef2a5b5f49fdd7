//! Login / logout / version-change / action behavior on the state surface.

use std::sync::Arc;

use lg_domain::config::PlaygroundConfig;
use lg_domain::error::Error;
use lg_domain::{Capability, DecodedIdToken, Profile, Scope};
use lg_platform::{Message, StaticScript, StubPlatform};
use lg_session::{RecordingHost, Session, SessionPhase};

const PAGE_URL: &str = "https://liff.example/?version=2&patch=true";

fn config() -> PlaygroundConfig {
    let mut config = PlaygroundConfig::from_query("?version=2&patch=true&liffId=1234-abcd");
    config.reload_settle_ms = 0;
    config
}

fn logged_in_stub() -> StubPlatform {
    StubPlatform::new()
        .with_logged_in(true)
        .with_profile(Profile {
            user_id: "U1234".into(),
            display_name: "Alice".into(),
            picture_url: None,
            status_message: None,
        })
        .with_tokens("id-token", "access-token", DecodedIdToken::default())
        .with_scope(vec![Scope::ChatMessageWrite])
        .with_available_api("shareTargetPicker")
        .with_available_api("scanCodeV2")
}

async fn ready_session(stub: Arc<StubPlatform>) -> (Session, Arc<RecordingHost>) {
    let host = Arc::new(RecordingHost::new(PAGE_URL));
    let session = Session::new(config(), host.clone());
    session.bootstrap(&StaticScript::default(), stub).await;
    assert_eq!(session.snapshot().phase, SessionPhase::Ready);
    (session, host)
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Login / logout
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[tokio::test]
async fn login_before_ready_is_a_warned_noop() {
    let stub = Arc::new(StubPlatform::new());
    let session = Session::new(config(), Arc::new(RecordingHost::new(PAGE_URL)));

    session.login().await.unwrap();

    assert!(stub.login_redirects().is_empty());
}

#[tokio::test]
async fn login_redirects_to_the_current_page() {
    let stub = Arc::new(StubPlatform::new());
    let (session, _host) = ready_session(stub.clone()).await;

    session.login().await.unwrap();

    assert_eq!(stub.login_redirects(), vec![PAGE_URL.to_string()]);
}

#[tokio::test]
async fn logout_clears_profile_and_tokens_together() {
    let stub = Arc::new(logged_in_stub());
    let (session, _host) = ready_session(stub.clone()).await;
    assert!(session.snapshot().logged_in);

    session.logout().await.unwrap();

    let snap = session.snapshot();
    assert!(!snap.logged_in);
    assert!(snap.profile.is_none());
    assert!(!snap.tokens.is_present());
    assert!(snap.granted_scopes.is_none());
    // Gated capabilities drop; the login-independent probe survives.
    assert!(!snap.capabilities.contains(&Capability::SendMessage));
    assert!(!snap.capabilities.contains(&Capability::ShareTargetPicker));
    assert!(snap.capabilities.contains(&Capability::ScanCodeV2));
    assert!(stub.calls().contains(&"logout".to_string()));
}

#[tokio::test]
async fn logout_clears_local_state_even_when_the_platform_call_fails() {
    let stub = Arc::new(logged_in_stub().with_failing_call("logout"));
    let (session, _host) = ready_session(stub).await;

    session.logout().await.unwrap();

    let snap = session.snapshot();
    assert!(!snap.logged_in);
    assert!(snap.profile.is_none());
    assert!(!snap.tokens.is_present());
}

#[tokio::test]
async fn logout_before_ready_is_a_warned_noop() {
    let stub = Arc::new(logged_in_stub());
    let session = Session::new(config(), Arc::new(RecordingHost::new(PAGE_URL)));

    session.logout().await.unwrap();

    assert!(!stub.calls().contains(&"logout".to_string()));
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Version change
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[tokio::test]
async fn version_change_persists_then_reloads() {
    let stub = Arc::new(StubPlatform::new());
    let (session, host) = ready_session(stub).await;

    session.set_sdk_version("2.5.1", false).await.unwrap();

    let persisted = host.persisted_queries();
    assert_eq!(persisted.len(), 1);
    assert!(persisted[0].contains("version=2.5.1"));
    assert!(persisted[0].contains("patch=false"));
    assert_eq!(host.reload_count(), 1);
}

#[tokio::test]
async fn invalid_version_change_is_rejected_without_side_effects() {
    let stub = Arc::new(StubPlatform::new());
    let (session, host) = ready_session(stub).await;

    let err = session.set_sdk_version("not-a-version", true).await.unwrap_err();

    assert!(matches!(err, Error::Version(_)));
    assert!(host.persisted_queries().is_empty());
    assert_eq!(host.reload_count(), 0);
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Permission queries & gated actions
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[tokio::test]
async fn has_permission_prefers_the_explicit_grant_list() {
    let stub = Arc::new(logged_in_stub().with_granted(vec![Scope::Profile]));
    let (session, _host) = ready_session(stub).await;

    // The context advertises chat_message.write, but the grant list is
    // authoritative once the query succeeded.
    assert!(session.has_permission(&Scope::Profile));
    assert!(!session.has_permission(&Scope::ChatMessageWrite));
}

#[tokio::test]
async fn has_permission_falls_back_to_context_scope() {
    let stub = Arc::new(logged_in_stub());
    let (session, _host) = ready_session(stub).await;

    assert!(session.has_permission(&Scope::ChatMessageWrite));
    assert!(!session.has_permission(&Scope::Email));
}

#[tokio::test]
async fn send_message_delegates_when_capability_present() {
    let stub = Arc::new(logged_in_stub().with_granted(vec![Scope::ChatMessageWrite]));
    let (session, _host) = ready_session(stub.clone()).await;

    session.send_text_message("hello from the playground").await.unwrap();

    assert_eq!(
        stub.sent_messages(),
        vec![Message::text("hello from the playground")]
    );
}

#[tokio::test]
async fn send_message_without_capability_is_unsupported() {
    // Logged in but the explicit grant withholds chat_message.write.
    let stub = Arc::new(logged_in_stub().with_granted(vec![Scope::Profile]));
    let (session, _host) = ready_session(stub.clone()).await;

    let err = session.send_text_message("nope").await.unwrap_err();

    assert!(matches!(err, Error::Unsupported(_)));
    assert!(stub.sent_messages().is_empty());
}

#[tokio::test]
async fn failed_action_does_not_disturb_session_state() {
    let stub = Arc::new(
        logged_in_stub()
            .with_granted(vec![Scope::ChatMessageWrite])
            .with_failing_call("sendMessages"),
    );
    let (session, _host) = ready_session(stub).await;
    let before = session.snapshot();

    let err = session.send_text_message("boom").await.unwrap_err();
    assert!(matches!(err, Error::Platform { .. }));

    let after = session.snapshot();
    assert_eq!(after.phase, SessionPhase::Ready);
    assert_eq!(after.logged_in, before.logged_in);
    assert_eq!(after.capabilities, before.capabilities);
}

#[tokio::test]
async fn share_and_permanent_link_round_trip() {
    let stub = Arc::new(logged_in_stub());
    let (session, _host) = ready_session(stub.clone()).await;

    session.share_text("check this out").await.unwrap();
    assert_eq!(stub.shared_messages(), vec![Message::text("check this out")]);

    let link = session.permanent_link(PAGE_URL).await.unwrap();
    assert!(link.contains("permalink"));
}
