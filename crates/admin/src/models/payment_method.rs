//! Checkout payment methods.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use storedesk_core::derive::matches_eq;
use storedesk_core::{
    Criteria, PaymentMethodId, PaymentMethodKind, PaymentMethodStatus, Record, Toggle,
};

use super::{ValidationError, blank_as_none, required};

/// Highest processing fee a method may charge, in percent.
const MAX_FEE_PERCENT: i64 = 100;

/// A payment option offered to customers at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethod {
    pub id: PaymentMethodId,
    pub name: String,
    pub kind: PaymentMethodKind,
    pub status: PaymentMethodStatus,
    pub is_default: bool,
    /// Processing fee in percent of the order total.
    pub fee_percent: Decimal,
    /// Last four digits of the settlement account, if any.
    pub last_four: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaymentMethodPatch {
    pub status: Option<PaymentMethodStatus>,
    pub is_default: Option<bool>,
    pub fee_percent: Option<Decimal>,
}

impl PaymentMethodPatch {
    /// Patch that makes a method the active default.
    #[must_use]
    pub const fn promote() -> Self {
        Self {
            status: Some(PaymentMethodStatus::Active),
            is_default: Some(true),
            fee_percent: None,
        }
    }

    /// Patch that clears the default marker.
    #[must_use]
    pub const fn demote() -> Self {
        Self {
            status: None,
            is_default: Some(false),
            fee_percent: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethodFlag {
    /// Switch between active and inactive. Deactivating the default method
    /// also clears its default marker.
    Status,
}

impl Record for PaymentMethod {
    type Id = PaymentMethodId;
    type Patch = PaymentMethodPatch;

    fn id(&self) -> PaymentMethodId {
        self.id
    }

    fn set_id(&mut self, id: PaymentMethodId) {
        self.id = id;
    }

    fn apply(&mut self, patch: &PaymentMethodPatch) {
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(is_default) = patch.is_default {
            self.is_default = is_default;
        }
        if let Some(fee) = patch.fee_percent {
            self.fee_percent = fee;
        }
    }
}

impl Toggle for PaymentMethod {
    type Flag = PaymentMethodFlag;

    fn flip(&mut self, flag: PaymentMethodFlag) {
        match flag {
            PaymentMethodFlag::Status => {
                self.status = self.status.flipped();
                if self.status == PaymentMethodStatus::Inactive {
                    self.is_default = false;
                }
            }
        }
    }
}

/// Form for adding a payment method. New methods start inactive.
#[derive(Debug, Clone, Deserialize)]
pub struct NewPaymentMethod {
    pub name: String,
    pub kind: PaymentMethodKind,
    #[serde(default)]
    pub fee_percent: Decimal,
    pub last_four: Option<String>,
}

impl NewPaymentMethod {
    /// # Errors
    ///
    /// Returns an error for a blank name, a fee outside 0-100%, or a
    /// `last_four` that is not exactly four digits.
    pub fn into_payment_method(self) -> Result<PaymentMethod, ValidationError> {
        let name = required("name", &self.name)?;
        if self.fee_percent.is_sign_negative() && !self.fee_percent.is_zero() {
            return Err(ValidationError::TooSmall {
                field: "fee_percent",
                min: "0".to_string(),
            });
        }
        if self.fee_percent > Decimal::from(MAX_FEE_PERCENT) {
            return Err(ValidationError::TooLarge {
                field: "fee_percent",
                max: MAX_FEE_PERCENT.to_string(),
            });
        }
        let last_four = self
            .last_four
            .map(|digits| digits.trim().to_string())
            .filter(|digits| !digits.is_empty());
        let malformed = last_four
            .as_deref()
            .is_some_and(|digits| digits.len() != 4 || !digits.chars().all(|c| c.is_ascii_digit()));
        if malformed {
            return Err(ValidationError::Invalid {
                field: "last_four",
                reason: "must be exactly four digits".to_string(),
            });
        }

        Ok(PaymentMethod {
            id: PaymentMethodId::new(0),
            name,
            kind: self.kind,
            status: PaymentMethodStatus::Inactive,
            is_default: false,
            fee_percent: self.fee_percent,
            last_four,
        })
    }
}

/// Payment method list query.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaymentMethodQuery {
    #[serde(default, deserialize_with = "blank_as_none")]
    pub status: Option<PaymentMethodStatus>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub kind: Option<PaymentMethodKind>,
}

impl Criteria<PaymentMethod> for PaymentMethodQuery {
    fn matches(&self, m: &PaymentMethod) -> bool {
        matches_eq(&m.status, self.status.as_ref()) && matches_eq(&m.kind, self.kind.as_ref())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use storedesk_core::Collection;

    use super::*;
    use crate::seed;

    fn form(fee: i64, last_four: Option<&str>) -> NewPaymentMethod {
        NewPaymentMethod {
            name: "Klarna".to_string(),
            kind: PaymentMethodKind::Wallet,
            fee_percent: Decimal::new(fee, 1),
            last_four: last_four.map(ToString::to_string),
        }
    }

    #[test]
    fn test_new_method_validation() {
        assert!(matches!(
            form(-5, None).into_payment_method(),
            Err(ValidationError::TooSmall { .. })
        ));
        assert!(matches!(
            form(1005, None).into_payment_method(),
            Err(ValidationError::TooLarge { .. })
        ));
        assert!(matches!(
            form(29, Some("12a4")).into_payment_method(),
            Err(ValidationError::Invalid { field: "last_four", .. })
        ));

        let method = form(29, Some(" 4242 ")).into_payment_method().unwrap();
        assert_eq!(method.status, PaymentMethodStatus::Inactive);
        assert_eq!(method.last_four.as_deref(), Some("4242"));
        assert!(!method.is_default);
    }

    #[test]
    fn test_make_default_leaves_exactly_one() {
        let mut methods = Collection::from_seed(seed::payment_methods()).unwrap();
        let target = methods.iter().find(|m| !m.is_default).unwrap().id;

        methods.bulk_update(
            |m| m.is_default && m.id != target,
            &PaymentMethodPatch::demote(),
        );
        let promoted = methods
            .update_field(target, &PaymentMethodPatch::promote())
            .unwrap();

        assert!(promoted.is_default);
        assert_eq!(promoted.status, PaymentMethodStatus::Active);
        assert_eq!(methods.count(|m| m.is_default), 1);
    }

    #[test]
    fn test_deactivating_default_clears_marker() {
        let mut methods = Collection::from_seed(seed::payment_methods()).unwrap();
        let default = methods.iter().find(|m| m.is_default).unwrap().id;

        let toggled = methods.toggle(default, PaymentMethodFlag::Status).unwrap();
        assert_eq!(toggled.status, PaymentMethodStatus::Inactive);
        assert!(!toggled.is_default);
    }
}
