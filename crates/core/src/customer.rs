//! Customer context and plan context types

use serde::{Deserialize, Serialize};

/// The plan-context triple selecting a knowledge partition
///
/// All three fields must be non-empty before policy retrieval can run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PlanContext {
    pub contract_type: String,
    pub plan: String,
    pub state: String,
}

impl PlanContext {
    pub fn new(
        contract_type: impl Into<String>,
        plan: impl Into<String>,
        state: impl Into<String>,
    ) -> Self {
        Self {
            contract_type: contract_type.into(),
            plan: plan.into(),
            state: state.into(),
        }
    }

    /// True when contract type, plan and state are all resolved
    pub fn is_complete(&self) -> bool {
        !self.contract_type.trim().is_empty()
            && !self.plan.trim().is_empty()
            && !self.state.trim().is_empty()
    }
}

/// Customer profile as seen by the suggestion layer
///
/// Empty strings mean "unknown"; the payload always carries every key so the
/// consuming UI never has to null-check. `verified` is monotone within a
/// session: once set it is never cleared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CustomerContext {
    pub verified: bool,
    pub name: String,
    pub plan: String,
    pub contract_type: String,
    pub state: String,
    pub phone: String,
}

impl CustomerContext {
    /// Plan context carried by this profile
    pub fn plan_context(&self) -> PlanContext {
        PlanContext {
            contract_type: self.contract_type.clone(),
            plan: self.plan.clone(),
            state: self.state.clone(),
        }
    }

    /// True when enough plan context is present to answer policy questions
    pub fn has_plan_context(&self) -> bool {
        self.plan_context().is_complete()
    }
}

/// A customer row returned by the directory
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CustomerRecord {
    pub phone: String,
    pub name: String,
    pub plan: String,
    pub contract_type: String,
    pub state: String,
}

impl CustomerRecord {
    /// Promote a directory match into a verified customer context
    ///
    /// `matched_phone` is the candidate that produced the match; the stored
    /// phone may be formatted differently.
    pub fn into_verified_context(self, matched_phone: &str) -> CustomerContext {
        let name = if self.name.trim().is_empty() {
            "Customer".to_string()
        } else {
            self.name
        };
        CustomerContext {
            verified: true,
            name,
            plan: self.plan,
            contract_type: self.contract_type,
            state: self.state,
            phone: if self.phone.trim().is_empty() {
                matched_phone.to_string()
            } else {
                self.phone
            },
        }
    }
}
