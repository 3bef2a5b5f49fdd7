//! Capability resolution.
//!
//! A pure function from the signals known after initialization to the
//! capability set. Signals disagree in practice: the context advertises
//! registered scopes, the granted-permission query (when the build supports
//! it) says what the user actually allowed, and static probes say what the
//! build can do at all. The rules:
//!
//! - scan-code-v2 follows its probe alone, login-independent.
//! - share-target-picker needs its probe plus a logged-in user.
//! - send-message needs a logged-in user and either an explicit grant that
//!   agrees with the scope hint, or — when the grant query is unavailable —
//!   the scope hint alone in a context type that can receive messages.

use serde::{Deserialize, Serialize};

use lg_domain::{Capability, CapabilitySet, ContextType, Scope};

/// Outcomes of the static feature probes, each already collapsed so that a
/// throwing probe reads as `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeResults {
    pub share_target_picker: bool,
    pub scan_code_v2: bool,
}

/// Everything the resolver looks at. Same inputs, same output.
#[derive(Debug, Clone)]
pub struct CapabilityInputs<'a> {
    pub logged_in: bool,
    pub probes: ProbeResults,
    /// Context scope list contains `chat_message.write`.
    pub scope_hint: bool,
    /// Explicit granted-permission query result. `None` when the SDK build
    /// does not support the query.
    pub granted: Option<&'a [Scope]>,
    /// Absent when the surface returned no context.
    pub context_type: Option<ContextType>,
    /// Context types excluded from the send-message fallback heuristic.
    pub excluded: &'a [ContextType],
}

pub fn resolve(inputs: &CapabilityInputs<'_>) -> CapabilitySet {
    let mut set = CapabilitySet::new();

    if inputs.probes.scan_code_v2 {
        set.insert(Capability::ScanCodeV2);
    }

    if !inputs.logged_in {
        // Permission-gated capabilities never appear for logged-out sessions.
        return set;
    }

    if inputs.probes.share_target_picker {
        set.insert(Capability::ShareTargetPicker);
    }

    if send_message_allowed(inputs) {
        set.insert(Capability::SendMessage);
    }

    set
}

fn send_message_allowed(inputs: &CapabilityInputs<'_>) -> bool {
    match inputs.granted {
        // A non-empty grant list is authoritative: both the hint and the
        // explicit grant must agree.
        Some(granted) if !granted.is_empty() => {
            inputs.scope_hint && granted.contains(&Scope::ChatMessageWrite)
        }
        // Query unsupported or returned nothing: fall back to the scope
        // hint, restricted to context types that can receive messages.
        _ => {
            inputs.scope_hint
                && inputs
                    .context_type
                    .is_some_and(|t| !inputs.excluded.contains(&t))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXCLUDED: &[ContextType] = &[ContextType::None, ContextType::External];

    fn inputs<'a>(granted: Option<&'a [Scope]>) -> CapabilityInputs<'a> {
        CapabilityInputs {
            logged_in: true,
            probes: ProbeResults {
                share_target_picker: true,
                scan_code_v2: true,
            },
            scope_hint: true,
            granted,
            context_type: Some(ContextType::Utou),
            excluded: EXCLUDED,
        }
    }

    #[test]
    fn explicit_grant_enables_send_message() {
        let granted = [Scope::ChatMessageWrite];
        let set = resolve(&inputs(Some(&granted)));
        assert!(set.contains(&Capability::SendMessage));
        assert!(set.contains(&Capability::ShareTargetPicker));
        assert!(set.contains(&Capability::ScanCodeV2));
    }

    #[test]
    fn grant_without_message_scope_denies_send_message() {
        let granted = [Scope::Profile, Scope::OpenId];
        let set = resolve(&inputs(Some(&granted)));
        assert!(!set.contains(&Capability::SendMessage));
        assert!(set.contains(&Capability::ShareTargetPicker));
    }

    #[test]
    fn grant_disagreeing_with_hint_denies_send_message() {
        let granted = [Scope::ChatMessageWrite];
        let mut i = inputs(Some(&granted));
        i.scope_hint = false;
        assert!(!resolve(&i).contains(&Capability::SendMessage));
    }

    #[test]
    fn unsupported_query_falls_back_to_hint_and_context() {
        // utou context, hint true, no grant data: heuristic applies.
        let set = resolve(&inputs(None));
        assert!(set.contains(&Capability::SendMessage));
    }

    #[test]
    fn empty_grant_list_also_falls_back() {
        let granted: [Scope; 0] = [];
        let set = resolve(&inputs(Some(&granted)));
        assert!(set.contains(&Capability::SendMessage));
    }

    #[test]
    fn fallback_respects_excluded_context_types() {
        for excluded_type in [ContextType::None, ContextType::External] {
            let mut i = inputs(None);
            i.context_type = Some(excluded_type);
            assert!(
                !resolve(&i).contains(&Capability::SendMessage),
                "{excluded_type:?} must not get the fallback"
            );
        }
    }

    #[test]
    fn fallback_exclusion_list_is_configuration() {
        // With an empty exclusion list even an external context passes.
        let mut i = inputs(None);
        i.context_type = Some(ContextType::External);
        i.excluded = &[];
        assert!(resolve(&i).contains(&Capability::SendMessage));
    }

    #[test]
    fn missing_context_denies_the_fallback() {
        let mut i = inputs(None);
        i.context_type = None;
        assert!(!resolve(&i).contains(&Capability::SendMessage));
    }

    #[test]
    fn logged_out_keeps_only_static_probes() {
        let mut i = inputs(None);
        i.logged_in = false;
        let set = resolve(&i);
        assert_eq!(set.len(), 1);
        assert!(set.contains(&Capability::ScanCodeV2));
    }

    #[test]
    fn failed_probes_contribute_nothing() {
        let mut i = inputs(None);
        i.probes = ProbeResults::default();
        i.scope_hint = false;
        assert!(resolve(&i).is_empty());
    }

    #[test]
    fn resolution_is_deterministic() {
        let granted = [Scope::ChatMessageWrite, Scope::Profile];
        let a = resolve(&inputs(Some(&granted)));
        let b = resolve(&inputs(Some(&granted)));
        assert_eq!(a, b);
    }
}
