//! Role-based authorization policy.
//!
//! | Operation                 | Allowed roles                              |
//! |---------------------------|--------------------------------------------|
//! | ViewService               | any authenticated role                     |
//! | RegisterService           | Administrator                              |
//! | Orchestrate               | Administrator, Orchestrator                |
//! | UpdateOrchestrationRules  | Orchestrator                               |
//! | AuthorizeResourceAccess   | depends on `ResourceAccessMode`            |
//!
//! In the default `ClaimMatch` mode, `AuthorizeResourceAccess` is allowed only
//! when the caller's role equals the role named in the request body. The
//! `ResourceRules` mode instead checks each requested resource against the
//! caller role's patterns.

use crate::models::{Decision, Operation, ResourceAccessMode, ResourceRules, Role};
use crate::observability::metrics::record_authorization_decision;
use std::str::FromStr;

#[derive(Debug, Clone, Default)]
pub struct AuthorizationPolicy {
    resource_access: ResourceAccessMode,
}

impl AuthorizationPolicy {
    pub fn new(resource_access: ResourceAccessMode) -> Self {
        Self { resource_access }
    }

    /// Decide whether `role` may perform `operation`.
    ///
    /// Pure: depends only on the arguments and the configured mode.
    pub fn authorize(&self, role: Role, operation: &Operation<'_>) -> Decision {
        let allowed = match operation {
            Operation::ViewService => true,
            Operation::RegisterService => matches!(role, Role::Administrator),
            Operation::Orchestrate => matches!(role, Role::Administrator | Role::Orchestrator),
            Operation::UpdateOrchestrationRules => matches!(role, Role::Orchestrator),
            Operation::AuthorizeResourceAccess {
                claimed_role,
                resources,
            } => match &self.resource_access {
                ResourceAccessMode::ClaimMatch => {
                    Role::from_str(claimed_role).is_ok_and(|claimed| claimed == role)
                }
                ResourceAccessMode::ResourceRules(rules) => {
                    resources_allowed(rules, role, resources)
                }
            },
        };

        let decision = if allowed {
            Decision::Allowed
        } else {
            Decision::Denied
        };
        record_authorization_decision(operation.as_str(), decision.as_str());
        decision
    }
}

/// Every resource must match at least one of the role's patterns. An empty
/// request is denied.
fn resources_allowed(rules: &ResourceRules, role: Role, resources: &[String]) -> bool {
    let patterns = rules.patterns_for(role);
    !resources.is_empty()
        && resources
            .iter()
            .all(|resource| patterns.iter().any(|p| wildcard_match(p, resource)))
}

/// Glob match where `*` matches any (possibly empty) run of characters.
fn wildcard_match(pattern: &str, value: &str) -> bool {
    if pattern == "*" {
        return true;
    }

    let pattern: Vec<char> = pattern.chars().collect();
    let value: Vec<char> = value.chars().collect();

    let (mut p_idx, mut v_idx) = (0usize, 0usize);
    let (mut star_idx, mut match_idx) = (None, 0usize);

    while let Some(&v) = value.get(v_idx) {
        match pattern.get(p_idx) {
            Some(&'*') => {
                star_idx = Some(p_idx);
                match_idx = v_idx;
                p_idx += 1;
                continue;
            }
            Some(&p) if p == v => {
                p_idx += 1;
                v_idx += 1;
                continue;
            }
            _ => {}
        }

        match star_idx {
            Some(star) => {
                p_idx = star + 1;
                match_idx += 1;
                v_idx = match_idx;
            }
            None => return false,
        }
    }

    while pattern.get(p_idx) == Some(&'*') {
        p_idx += 1;
    }

    p_idx == pattern.len()
}
