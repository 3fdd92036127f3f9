//! Command handlers, one per command kind.
//!
//! Shared shape: extract the payload variant, validate preconditions
//! against the snapshot, compute derived values from the economy tables,
//! and emit drafts. On any failure, return a typed error and emit
//! nothing. Handlers never stamp envelopes and never read a clock.

pub mod equipment;
pub mod finance;
pub mod interagent;
pub mod locations;
pub mod pricing;
pub mod social;
pub mod staffing;
pub mod vendors;

use spincycle_events::command::commands;
use spincycle_events::{Command, EventDraft, EventPayload};

use crate::registry::CommandRegistry;

/// Register every built-in handler. Hosts may register additional kinds
/// or override these afterwards.
pub fn register_defaults(reg: &mut CommandRegistry) {
    reg.register(commands::SET_PRICE, pricing::set_price);
    reg.register(commands::INVEST_IN_MARKETING, pricing::invest_in_marketing);
    reg.register(commands::SUBSCRIBE_LOYALTY_PROGRAM, pricing::subscribe_loyalty_program);

    reg.register(commands::TAKE_LOAN, finance::take_loan);
    reg.register(commands::MAKE_DEBT_PAYMENT, finance::make_debt_payment);

    reg.register(commands::BUY_EQUIPMENT, equipment::buy_equipment);
    reg.register(commands::SELL_EQUIPMENT, equipment::sell_equipment);
    reg.register(commands::PERFORM_MAINTENANCE, equipment::perform_maintenance);
    reg.register(commands::FIX_MACHINE, equipment::fix_machine);
    reg.register(commands::BUY_SUPPLIES, equipment::buy_supplies);

    reg.register(commands::OPEN_NEW_LOCATION, locations::open_new_location);

    reg.register(commands::HIRE_STAFF, staffing::hire_staff);
    reg.register(commands::FIRE_STAFF, staffing::fire_staff);
    reg.register(commands::ADJUST_STAFF_WAGE, staffing::adjust_staff_wage);
    reg.register(commands::PROVIDE_BENEFITS, staffing::provide_benefits);

    reg.register(commands::NEGOTIATE_VENDOR_DEAL, vendors::negotiate_vendor_deal);
    reg.register(commands::SIGN_EXCLUSIVE_CONTRACT, vendors::sign_exclusive_contract);
    reg.register(commands::CANCEL_VENDOR_CONTRACT, vendors::cancel_vendor_contract);

    reg.register(commands::INITIATE_CHARITY, social::initiate_charity);
    reg.register(commands::RESOLVE_SCANDAL, social::resolve_scandal);
    reg.register(commands::MAKE_ETHICAL_CHOICE, social::make_ethical_choice);
    reg.register(commands::FILE_REGULATORY_REPORT, social::file_regulatory_report);
    reg.register(commands::FILE_APPEAL, social::file_appeal);

    reg.register(commands::ENTER_ALLIANCE, interagent::enter_alliance);
    reg.register(commands::PROPOSE_BUYOUT, interagent::propose_buyout);
    reg.register(commands::ACCEPT_BUYOUT_OFFER, interagent::accept_buyout_offer);
    reg.register(commands::COMMUNICATE_TO_AGENT, interagent::communicate_to_agent);
}

/// Draft on the issuing agent's own stream.
pub(crate) fn own(cmd: &Command, payload: EventPayload) -> EventDraft {
    EventDraft::new(cmd.agent_id.clone(), payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_catalog_command_has_a_default_handler() {
        let mut reg = CommandRegistry::new();
        register_defaults(&mut reg);
        for kind in commands::ALL {
            assert!(reg.get(kind).is_some(), "no handler registered for {kind}");
        }
    }
}
