//! GoToSocial style interaction policies, as far as quoting is concerned.
//!
//! A quote policy is packed in a `u32`: the low half holds the identity
//! classes whose quotes need manual approval, the high half the classes
//! whose quotes are approved automatically.

use tracing::trace;

use crate::json_ld::Node;
use crate::json_ld::vocab::{self, Term};

/// Shift applied to the automatic approval half.
pub const AUTOMATIC_APPROVAL_SHIFT: u32 = 16;

/// Bit 0 is reserved for subjects no class recognizes. It is never set here.
pub const UNSUPPORTED_POLICY_BIT: u16 = 1 << 0;

/// A named category of accounts a policy rule can refer to.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum IdentityClass {
    /// Everyone, including people who do not follow the author.
    Public,
    /// Followers of the author.
    Followers,
}

impl IdentityClass {
    pub const ALL: [IdentityClass; 2] = [IdentityClass::Public, IdentityClass::Followers];

    pub const fn bit(self) -> u16 {
        match self {
            IdentityClass::Public => 1 << 1,
            IdentityClass::Followers => 1 << 2,
        }
    }
}

/// Unpacked view of a quote policy bitmask.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct QuotePolicy {
    automatic: u16,
    manual: u16,
}

impl QuotePolicy {
    /// Nobody may quote.
    pub const NOBODY: QuotePolicy = QuotePolicy {
        automatic: 0,
        manual: 0,
    };

    pub const fn from_bits(bits: u32) -> QuotePolicy {
        QuotePolicy {
            automatic: (bits >> AUTOMATIC_APPROVAL_SHIFT) as u16,
            manual: bits as u16,
        }
    }

    pub const fn bits(self) -> u32 {
        ((self.automatic as u32) << AUTOMATIC_APPROVAL_SHIFT) | self.manual as u32
    }

    pub fn is_automatic(self, class: IdentityClass) -> bool {
        self.automatic & class.bit() != 0
    }

    pub fn needs_approval(self, class: IdentityClass) -> bool {
        self.manual & class.bit() != 0
    }

    pub fn with_automatic(mut self, class: IdentityClass) -> QuotePolicy {
        self.automatic |= class.bit();
        self
    }

    pub fn with_manual(mut self, class: IdentityClass) -> QuotePolicy {
        self.manual |= class.bit();
        self
    }
}

impl From<QuotePolicy> for u32 {
    fn from(policy: QuotePolicy) -> Self {
        policy.bits()
    }
}

/// Resolves policy subjects against the identities known for one sender.
pub(crate) struct PolicyEvaluator<'a> {
    pub(crate) actor_uri: &'a str,
    pub(crate) followers_collection: Option<&'a str>,
}

impl PolicyEvaluator<'_> {
    /// Evaluate the `canQuote` rule of an `interactionPolicy` node.
    ///
    /// Returns `None` when the node declares no quote rule.
    pub(crate) fn quote_policy(&self, interaction_policy: Node<'_>) -> Option<QuotePolicy> {
        let can_quote = interaction_policy.get_node(vocab::CAN_QUOTE)?;
        let mut policy = QuotePolicy::NOBODY;
        for class in self.subpolicy(can_quote, vocab::AUTOMATIC_APPROVAL) {
            policy = policy.with_automatic(class);
        }
        for class in self.subpolicy(can_quote, vocab::MANUAL_APPROVAL) {
            policy = policy.with_manual(class);
        }
        Some(policy)
    }

    fn subpolicy(&self, rule: Node<'_>, term: Term) -> Vec<IdentityClass> {
        rule.get_iris(term)
            .into_iter()
            .filter_map(|subject| self.classify(subject))
            .collect()
    }

    fn classify(&self, subject: &str) -> Option<IdentityClass> {
        if vocab::is_public_collection(subject) {
            return Some(IdentityClass::Public);
        }
        if self.followers_collection == Some(subject) {
            return Some(IdentityClass::Followers);
        }
        if subject != self.actor_uri {
            trace!(target: "policy", %subject, "ignoring unsupported policy subject");
        }
        None
    }
}
