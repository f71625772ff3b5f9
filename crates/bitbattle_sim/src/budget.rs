//! Per-kind gate limits for a challenge.

use bitbattle_netlist::{GateKind, Netlist};
use serde::{Deserialize, Serialize};

use crate::error::SimError;

/// Optional caps on the number of logic gates of each kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateBudget {
    /// AND gate limit.
    pub and: Option<usize>,
    /// OR gate limit.
    pub or: Option<usize>,
    /// NOT gate limit.
    pub not: Option<usize>,
    /// XOR gate limit.
    pub xor: Option<usize>,
}

impl GateBudget {
    /// A budget with no limits.
    pub fn unlimited() -> Self {
        Self::default()
    }

    /// The limit for `kind`. INPUT and OUTPUT pins are never limited.
    pub fn limit(&self, kind: GateKind) -> Option<usize> {
        match kind {
            GateKind::And => self.and,
            GateKind::Or => self.or,
            GateKind::Not => self.not,
            GateKind::Xor => self.xor,
            GateKind::Input | GateKind::Output => None,
        }
    }

    /// Fails on the first kind, in catalog order, whose count exceeds its limit.
    pub fn check(&self, netlist: &Netlist) -> Result<(), SimError> {
        for kind in GateKind::ALL {
            let Some(limit) = self.limit(kind) else {
                continue;
            };
            let used = netlist.count_kind(kind);
            if used > limit {
                return Err(SimError::GateBudgetExceeded { kind, used, limit });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitbattle_common::Label;
    use bitbattle_netlist::NetlistBuilder;

    fn two_xors() -> Netlist {
        let mut b = NetlistBuilder::new();
        let a = b.input(Label::new('A').unwrap()).unwrap();
        let c = b.input(Label::new('B').unwrap()).unwrap();
        let x = b.gate(GateKind::Xor, &[a, c]).unwrap();
        b.gate(GateKind::Xor, &[x, c]).unwrap();
        b.finish()
    }

    #[test]
    fn unlimited_accepts_anything() {
        assert!(GateBudget::unlimited().check(&two_xors()).is_ok());
    }

    #[test]
    fn reports_exceeded_kind() {
        let budget = GateBudget {
            xor: Some(1),
            and: Some(0),
            ..Default::default()
        };
        match budget.check(&two_xors()) {
            Err(SimError::GateBudgetExceeded { kind, used, limit }) => {
                assert_eq!(kind, GateKind::Xor);
                assert_eq!(used, 2);
                assert_eq!(limit, 1);
            }
            other => panic!("expected budget error, got {other:?}"),
        }
    }

    #[test]
    fn pins_are_never_limited() {
        let budget = GateBudget {
            not: Some(0),
            ..Default::default()
        };
        assert_eq!(budget.limit(GateKind::Input), None);
        assert!(budget.check(&two_xors()).is_ok());
    }
}
