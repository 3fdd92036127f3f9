//! The command catalog: one tagged variant per player intent.
//!
//! Commands are transient; they are validated against a snapshot and
//! either rejected with a typed error or turned into events. Monetary
//! payload fields are dollars (f64) as submitted by hosts and LLM
//! drivers; handlers convert to cents at the boundary.

use serde::{Deserialize, Serialize};
use spincycle_core::{
    AgentId, CorrelationId, DilemmaId, FineId, ListingId, LocationId, MachineId, ScandalId,
    StaffId, VendorId,
};
use spincycle_domain::economy::MaintenanceTier;
use spincycle_domain::{AllianceKind, LoanKind, MachineKind, ServiceKind, StaffRole};

use crate::payload::EthicalChoice;

/// A submitted command: the issuing agent plus a typed payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Command {
    pub agent_id: AgentId,
    #[serde(flatten)]
    pub payload: CommandPayload,
}

impl Command {
    pub fn new(agent_id: AgentId, payload: CommandPayload) -> Self {
        Self { agent_id, payload }
    }

    pub fn kind(&self) -> &'static str {
        self.payload.kind()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command_kind")]
pub enum CommandPayload {
    #[serde(rename = "SET_PRICE")]
    SetPrice {
        location_id: LocationId,
        service: ServiceKind,
        new_price: f64,
    },
    #[serde(rename = "TAKE_LOAN")]
    TakeLoan {
        kind: LoanKind,
        amount: f64,
        /// Present in some client payloads; the validator ignores it.
        #[serde(default)]
        location_id: Option<LocationId>,
    },
    #[serde(rename = "MAKE_DEBT_PAYMENT")]
    MakeDebtPayment {
        /// Names either a loan or a pending fine.
        debt_id: String,
        amount: f64,
    },
    #[serde(rename = "INVEST_IN_MARKETING")]
    InvestInMarketing { location_id: LocationId, spend: f64 },
    #[serde(rename = "BUY_EQUIPMENT")]
    BuyEquipment {
        location_id: LocationId,
        kind: MachineKind,
        #[serde(default)]
        vendor_id: Option<VendorId>,
        quantity: u32,
    },
    #[serde(rename = "SELL_EQUIPMENT")]
    SellEquipment {
        location_id: LocationId,
        machine_id: MachineId,
    },
    #[serde(rename = "PERFORM_MAINTENANCE")]
    PerformMaintenance {
        location_id: LocationId,
        machine_id: MachineId,
        tier: MaintenanceTier,
    },
    #[serde(rename = "FIX_MACHINE")]
    FixMachine {
        location_id: LocationId,
        machine_id: MachineId,
    },
    #[serde(rename = "BUY_SUPPLIES")]
    BuySupplies {
        location_id: LocationId,
        #[serde(default)]
        vendor_id: Option<VendorId>,
        detergent_units: u32,
        softener_units: u32,
    },
    #[serde(rename = "OPEN_NEW_LOCATION")]
    OpenNewLocation { listing_id: ListingId },
    #[serde(rename = "HIRE_STAFF")]
    HireStaff {
        location_id: LocationId,
        name: String,
        role: StaffRole,
        hourly_rate: f64,
    },
    #[serde(rename = "FIRE_STAFF")]
    FireStaff {
        location_id: LocationId,
        staff_id: StaffId,
    },
    #[serde(rename = "ADJUST_STAFF_WAGE")]
    AdjustStaffWage {
        location_id: LocationId,
        staff_id: StaffId,
        new_rate: f64,
    },
    #[serde(rename = "PROVIDE_BENEFITS")]
    ProvideBenefits { location_id: LocationId },
    #[serde(rename = "NEGOTIATE_VENDOR_DEAL")]
    NegotiateVendorDeal {
        location_id: LocationId,
        vendor_id: VendorId,
        requested_discount: f64,
    },
    #[serde(rename = "SIGN_EXCLUSIVE_CONTRACT")]
    SignExclusiveContract {
        location_id: LocationId,
        vendor_id: VendorId,
    },
    #[serde(rename = "CANCEL_VENDOR_CONTRACT")]
    CancelVendorContract {
        location_id: LocationId,
        vendor_id: VendorId,
    },
    #[serde(rename = "INITIATE_CHARITY")]
    InitiateCharity { cause: String, amount: f64 },
    #[serde(rename = "RESOLVE_SCANDAL")]
    ResolveScandal { scandal_id: ScandalId },
    #[serde(rename = "MAKE_ETHICAL_CHOICE")]
    MakeEthicalChoice {
        dilemma_id: DilemmaId,
        choice: EthicalChoice,
    },
    #[serde(rename = "FILE_REGULATORY_REPORT")]
    FileRegulatoryReport,
    #[serde(rename = "FILE_APPEAL")]
    FileAppeal { fine_id: FineId },
    #[serde(rename = "SUBSCRIBE_LOYALTY_PROGRAM")]
    SubscribeLoyaltyProgram,
    #[serde(rename = "ENTER_ALLIANCE")]
    EnterAlliance {
        partner: AgentId,
        kind: AllianceKind,
    },
    #[serde(rename = "PROPOSE_BUYOUT")]
    ProposeBuyout { target: AgentId, offer: f64 },
    #[serde(rename = "ACCEPT_BUYOUT_OFFER")]
    AcceptBuyoutOffer { correlation_id: CorrelationId },
    #[serde(rename = "COMMUNICATE_TO_AGENT")]
    CommunicateToAgent { to: AgentId, message: String },
}

impl CommandPayload {
    /// The kind tag, identical to the serde `command_kind` field.
    pub fn kind(&self) -> &'static str {
        use commands::*;
        match self {
            CommandPayload::SetPrice { .. } => SET_PRICE,
            CommandPayload::TakeLoan { .. } => TAKE_LOAN,
            CommandPayload::MakeDebtPayment { .. } => MAKE_DEBT_PAYMENT,
            CommandPayload::InvestInMarketing { .. } => INVEST_IN_MARKETING,
            CommandPayload::BuyEquipment { .. } => BUY_EQUIPMENT,
            CommandPayload::SellEquipment { .. } => SELL_EQUIPMENT,
            CommandPayload::PerformMaintenance { .. } => PERFORM_MAINTENANCE,
            CommandPayload::FixMachine { .. } => FIX_MACHINE,
            CommandPayload::BuySupplies { .. } => BUY_SUPPLIES,
            CommandPayload::OpenNewLocation { .. } => OPEN_NEW_LOCATION,
            CommandPayload::HireStaff { .. } => HIRE_STAFF,
            CommandPayload::FireStaff { .. } => FIRE_STAFF,
            CommandPayload::AdjustStaffWage { .. } => ADJUST_STAFF_WAGE,
            CommandPayload::ProvideBenefits { .. } => PROVIDE_BENEFITS,
            CommandPayload::NegotiateVendorDeal { .. } => NEGOTIATE_VENDOR_DEAL,
            CommandPayload::SignExclusiveContract { .. } => SIGN_EXCLUSIVE_CONTRACT,
            CommandPayload::CancelVendorContract { .. } => CANCEL_VENDOR_CONTRACT,
            CommandPayload::InitiateCharity { .. } => INITIATE_CHARITY,
            CommandPayload::ResolveScandal { .. } => RESOLVE_SCANDAL,
            CommandPayload::MakeEthicalChoice { .. } => MAKE_ETHICAL_CHOICE,
            CommandPayload::FileRegulatoryReport => FILE_REGULATORY_REPORT,
            CommandPayload::FileAppeal { .. } => FILE_APPEAL,
            CommandPayload::SubscribeLoyaltyProgram => SUBSCRIBE_LOYALTY_PROGRAM,
            CommandPayload::EnterAlliance { .. } => ENTER_ALLIANCE,
            CommandPayload::ProposeBuyout { .. } => PROPOSE_BUYOUT,
            CommandPayload::AcceptBuyoutOffer { .. } => ACCEPT_BUYOUT_OFFER,
            CommandPayload::CommunicateToAgent { .. } => COMMUNICATE_TO_AGENT,
        }
    }
}

/// Canonical command kinds.
pub mod commands {
    pub const SET_PRICE: &str = "SET_PRICE";
    pub const TAKE_LOAN: &str = "TAKE_LOAN";
    pub const MAKE_DEBT_PAYMENT: &str = "MAKE_DEBT_PAYMENT";
    pub const INVEST_IN_MARKETING: &str = "INVEST_IN_MARKETING";
    pub const BUY_EQUIPMENT: &str = "BUY_EQUIPMENT";
    pub const SELL_EQUIPMENT: &str = "SELL_EQUIPMENT";
    pub const PERFORM_MAINTENANCE: &str = "PERFORM_MAINTENANCE";
    pub const FIX_MACHINE: &str = "FIX_MACHINE";
    pub const BUY_SUPPLIES: &str = "BUY_SUPPLIES";
    pub const OPEN_NEW_LOCATION: &str = "OPEN_NEW_LOCATION";
    pub const HIRE_STAFF: &str = "HIRE_STAFF";
    pub const FIRE_STAFF: &str = "FIRE_STAFF";
    pub const ADJUST_STAFF_WAGE: &str = "ADJUST_STAFF_WAGE";
    pub const PROVIDE_BENEFITS: &str = "PROVIDE_BENEFITS";
    pub const NEGOTIATE_VENDOR_DEAL: &str = "NEGOTIATE_VENDOR_DEAL";
    pub const SIGN_EXCLUSIVE_CONTRACT: &str = "SIGN_EXCLUSIVE_CONTRACT";
    pub const CANCEL_VENDOR_CONTRACT: &str = "CANCEL_VENDOR_CONTRACT";
    pub const INITIATE_CHARITY: &str = "INITIATE_CHARITY";
    pub const RESOLVE_SCANDAL: &str = "RESOLVE_SCANDAL";
    pub const MAKE_ETHICAL_CHOICE: &str = "MAKE_ETHICAL_CHOICE";
    pub const FILE_REGULATORY_REPORT: &str = "FILE_REGULATORY_REPORT";
    pub const FILE_APPEAL: &str = "FILE_APPEAL";
    pub const SUBSCRIBE_LOYALTY_PROGRAM: &str = "SUBSCRIBE_LOYALTY_PROGRAM";
    pub const ENTER_ALLIANCE: &str = "ENTER_ALLIANCE";
    pub const PROPOSE_BUYOUT: &str = "PROPOSE_BUYOUT";
    pub const ACCEPT_BUYOUT_OFFER: &str = "ACCEPT_BUYOUT_OFFER";
    pub const COMMUNICATE_TO_AGENT: &str = "COMMUNICATE_TO_AGENT";

    pub const ALL: &[&str] = &[
        SET_PRICE,
        TAKE_LOAN,
        MAKE_DEBT_PAYMENT,
        INVEST_IN_MARKETING,
        BUY_EQUIPMENT,
        SELL_EQUIPMENT,
        PERFORM_MAINTENANCE,
        FIX_MACHINE,
        BUY_SUPPLIES,
        OPEN_NEW_LOCATION,
        HIRE_STAFF,
        FIRE_STAFF,
        ADJUST_STAFF_WAGE,
        PROVIDE_BENEFITS,
        NEGOTIATE_VENDOR_DEAL,
        SIGN_EXCLUSIVE_CONTRACT,
        CANCEL_VENDOR_CONTRACT,
        INITIATE_CHARITY,
        RESOLVE_SCANDAL,
        MAKE_ETHICAL_CHOICE,
        FILE_REGULATORY_REPORT,
        FILE_APPEAL,
        SUBSCRIBE_LOYALTY_PROGRAM,
        ENTER_ALLIANCE,
        PROPOSE_BUYOUT,
        ACCEPT_BUYOUT_OFFER,
        COMMUNICATE_TO_AGENT,
    ];
}
