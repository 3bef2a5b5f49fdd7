//! Configurable in-memory platform provider.
//!
//! Stands in for a real SDK build in tests and the demo CLI: every signal
//! the capability resolver and bootstrap consume (context, login state,
//! granted scopes, API availability) is settable, and calls can be made to
//! fail individually to exercise the error paths.

use std::collections::HashSet;

use parking_lot::Mutex;

use lg_domain::error::{Error, Result};
use lg_domain::{Context, ContextType, DecodedIdToken, Os, Profile, Scope};

use crate::traits::{Message, PlatformSdk};

pub struct StubPlatform {
    context: Option<Context>,
    in_client: bool,
    os: Os,
    profile: Option<Profile>,
    id_token: Option<String>,
    access_token: Option<String>,
    decoded_id_token: Option<DecodedIdToken>,
    /// `None` = the build does not support the granted-permission query.
    granted: Option<Vec<Scope>>,
    available_apis: HashSet<String>,
    /// API names whose availability probe errors instead of answering.
    poisoned_apis: HashSet<String>,
    /// Call names that fail with an injected platform error.
    failing_calls: HashSet<String>,
    sdk_version: String,
    app_language: String,
    language: String,
    line_version: Option<String>,

    initialized: Mutex<bool>,
    logged_in: Mutex<bool>,
    calls: Mutex<Vec<String>>,
    login_redirects: Mutex<Vec<String>>,
    sent: Mutex<Vec<Message>>,
    shared: Mutex<Vec<Message>>,
}

impl Default for StubPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl StubPlatform {
    pub fn new() -> Self {
        Self {
            context: Some(Context {
                context_type: ContextType::Utou,
                view_type: None,
                liff_id: Some("1234-abcd".into()),
                scope: Vec::new(),
                mini_domain_allowed: false,
                endpoint_url: None,
            }),
            in_client: true,
            os: Os::Ios,
            profile: None,
            id_token: None,
            access_token: None,
            decoded_id_token: None,
            granted: None,
            available_apis: HashSet::new(),
            poisoned_apis: HashSet::new(),
            failing_calls: HashSet::new(),
            sdk_version: "2.26.0".into(),
            app_language: "en".into(),
            language: "en-US".into(),
            line_version: Some("14.0.0".into()),
            initialized: Mutex::new(false),
            logged_in: Mutex::new(false),
            calls: Mutex::new(Vec::new()),
            login_redirects: Mutex::new(Vec::new()),
            sent: Mutex::new(Vec::new()),
            shared: Mutex::new(Vec::new()),
        }
    }

    // ── Builder-style setters ──────────────────────────────────────

    pub fn with_context(mut self, context: Option<Context>) -> Self {
        self.context = context;
        self
    }

    pub fn with_context_type(mut self, context_type: ContextType) -> Self {
        if let Some(ctx) = self.context.as_mut() {
            ctx.context_type = context_type;
        }
        self
    }

    pub fn with_scope(mut self, scope: Vec<Scope>) -> Self {
        if let Some(ctx) = self.context.as_mut() {
            ctx.scope = scope;
        }
        self
    }

    pub fn with_logged_in(self, logged_in: bool) -> Self {
        *self.logged_in.lock() = logged_in;
        self
    }

    pub fn with_profile(mut self, profile: Profile) -> Self {
        self.profile = Some(profile);
        self
    }

    pub fn with_tokens(
        mut self,
        id_token: &str,
        access_token: &str,
        decoded: DecodedIdToken,
    ) -> Self {
        self.id_token = Some(id_token.into());
        self.access_token = Some(access_token.into());
        self.decoded_id_token = Some(decoded);
        self
    }

    /// Set the granted-permission query result. `Some(vec![])` is a
    /// supported query with nothing granted; use the default (`None`) for
    /// builds without the permission API.
    pub fn with_granted(mut self, granted: Vec<Scope>) -> Self {
        self.granted = Some(granted);
        self
    }

    pub fn with_available_api(mut self, api: &str) -> Self {
        self.available_apis.insert(api.into());
        self
    }

    /// Make `is_api_available(api)` return an error, like older builds that
    /// throw on unknown API names.
    pub fn with_poisoned_api(mut self, api: &str) -> Self {
        self.poisoned_apis.insert(api.into());
        self
    }

    pub fn with_failing_call(mut self, call: &str) -> Self {
        self.failing_calls.insert(call.into());
        self
    }

    pub fn with_os(mut self, os: Os) -> Self {
        self.os = os;
        self
    }

    pub fn external_browser(mut self) -> Self {
        self.in_client = false;
        self.line_version = None;
        self.os = Os::Web;
        self
    }

    // ── Test inspection ────────────────────────────────────────────

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    pub fn login_redirects(&self) -> Vec<String> {
        self.login_redirects.lock().clone()
    }

    pub fn sent_messages(&self) -> Vec<Message> {
        self.sent.lock().clone()
    }

    pub fn shared_messages(&self) -> Vec<Message> {
        self.shared.lock().clone()
    }

    // ── Internals ──────────────────────────────────────────────────

    fn record(&self, call: &str) -> Result<()> {
        self.calls.lock().push(call.to_string());
        if self.failing_calls.contains(call) {
            return Err(Error::platform(call, "injected failure"));
        }
        Ok(())
    }

    fn require_init(&self, call: &str) -> Result<()> {
        if !*self.initialized.lock() {
            return Err(Error::platform(call, "SDK not initialized"));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl PlatformSdk for StubPlatform {
    async fn init(&self, liff_id: &str) -> Result<()> {
        self.record("init")?;
        if liff_id.is_empty() {
            return Err(Error::platform("init", "empty liffId"));
        }
        *self.initialized.lock() = true;
        Ok(())
    }

    async fn get_context(&self) -> Result<Option<Context>> {
        self.record("getContext")?;
        self.require_init("getContext")?;
        Ok(self.context.clone())
    }

    async fn is_in_client(&self) -> Result<bool> {
        self.record("isInClient")?;
        Ok(self.in_client)
    }

    async fn get_os(&self) -> Result<Os> {
        self.record("getOS")?;
        Ok(self.os)
    }

    async fn is_logged_in(&self) -> Result<bool> {
        self.record("isLoggedIn")?;
        self.require_init("isLoggedIn")?;
        Ok(*self.logged_in.lock())
    }

    async fn login(&self, redirect_uri: &str) -> Result<()> {
        self.record("login")?;
        self.require_init("login")?;
        self.login_redirects.lock().push(redirect_uri.to_string());
        *self.logged_in.lock() = true;
        Ok(())
    }

    async fn logout(&self) -> Result<()> {
        self.record("logout")?;
        self.require_init("logout")?;
        *self.logged_in.lock() = false;
        Ok(())
    }

    async fn get_profile(&self) -> Result<Profile> {
        self.record("getProfile")?;
        self.require_init("getProfile")?;
        self.profile
            .clone()
            .ok_or_else(|| Error::platform("getProfile", "no profile configured"))
    }

    async fn get_id_token(&self) -> Result<Option<String>> {
        self.record("getIDToken")?;
        Ok(self.id_token.clone())
    }

    async fn get_access_token(&self) -> Result<Option<String>> {
        self.record("getAccessToken")?;
        Ok(self.access_token.clone())
    }

    async fn get_decoded_id_token(&self) -> Result<Option<DecodedIdToken>> {
        self.record("getDecodedIDToken")?;
        Ok(self.decoded_id_token.clone())
    }

    async fn is_api_available(&self, api: &str) -> Result<bool> {
        self.record(&format!("isApiAvailable:{api}"))?;
        if self.poisoned_apis.contains(api) {
            return Err(Error::platform("isApiAvailable", format!("unknown api {api}")));
        }
        Ok(self.available_apis.contains(api))
    }

    async fn send_messages(&self, messages: &[Message]) -> Result<()> {
        self.record("sendMessages")?;
        self.require_init("sendMessages")?;
        self.sent.lock().extend_from_slice(messages);
        Ok(())
    }

    async fn share_target_picker(&self, messages: &[Message]) -> Result<()> {
        self.record("shareTargetPicker")?;
        self.require_init("shareTargetPicker")?;
        self.shared.lock().extend_from_slice(messages);
        Ok(())
    }

    async fn create_permanent_link(&self, url: &str) -> Result<String> {
        self.record("permanentLink.createUrlBy")?;
        self.require_init("permanentLink.createUrlBy")?;
        Ok(format!("https://liff.line.me/permalink?url={url}"))
    }

    async fn get_granted_all(&self) -> Result<Option<Vec<Scope>>> {
        self.record("permission.getGrantedAll")?;
        Ok(self.granted.clone())
    }

    async fn get_version(&self) -> Result<String> {
        self.record("getVersion")?;
        Ok(self.sdk_version.clone())
    }

    async fn get_app_language(&self) -> Result<String> {
        self.record("getAppLanguage")?;
        Ok(self.app_language.clone())
    }

    async fn get_language(&self) -> Result<String> {
        self.record("getLanguage")?;
        Ok(self.language.clone())
    }

    async fn get_line_version(&self) -> Result<Option<String>> {
        self.record("getLineVersion")?;
        Ok(self.line_version.clone())
    }
}
