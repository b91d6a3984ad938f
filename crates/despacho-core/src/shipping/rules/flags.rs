//! Shipping flag inference from keyword presence.

use tracing::trace;

use crate::models::record::{Flag, FlagSet};

use super::normalize;
use super::patterns::{COURIER, DESPACHO_A_DOMICILIO, DOMICILIO, PAGADO, POR_PAGAR, SUCURSAL};

/// A named keyword rule deciding one flag from normalized text.
#[derive(Clone, Copy)]
pub struct FlagRule {
    pub name: &'static str,
    pub flag: Flag,
    pub infer: fn(&str) -> bool,
}

/// Flag rules in evaluation order. `OnAccount` has no rule: it is edit-only.
pub static FLAG_RULES: [FlagRule; 4] = [
    FlagRule {
        name: "por_pagar",
        flag: Flag::CashOnDelivery,
        infer: is_cash_on_delivery,
    },
    FlagRule {
        name: "pagado",
        flag: Flag::Prepaid,
        infer: is_prepaid,
    },
    FlagRule {
        name: "domicilio",
        flag: Flag::HomeDelivery,
        infer: is_home_delivery,
    },
    FlagRule {
        name: "sucursal_o_courier",
        flag: Flag::PickupAtBranch,
        infer: is_pickup_at_branch,
    },
];

fn is_cash_on_delivery(normalized: &str) -> bool {
    POR_PAGAR.is_match(normalized)
}

fn is_prepaid(normalized: &str) -> bool {
    PAGADO.is_match(normalized) && !POR_PAGAR.is_match(normalized)
}

fn is_home_delivery(normalized: &str) -> bool {
    DESPACHO_A_DOMICILIO.is_match(normalized) || DOMICILIO.is_match(normalized)
}

fn is_pickup_at_branch(normalized: &str) -> bool {
    SUCURSAL.is_match(normalized) || COURIER.is_match(normalized)
}

/// Infer a fresh flag set from raw text.
pub fn infer_flags(text: &str) -> FlagSet {
    infer_flags_normalized(&normalize(text))
}

/// Infer a fresh flag set from text already passed through [`normalize`].
pub fn infer_flags_normalized(normalized: &str) -> FlagSet {
    let mut flags = FlagSet::default();
    for rule in &FLAG_RULES {
        let on = (rule.infer)(normalized);
        trace!("Flag rule {} -> {}={}", rule.name, rule.flag.key(), on);
        flags.set(rule.flag, on);
    }
    flags
}
