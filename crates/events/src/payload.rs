//! The event catalog: one tagged variant per observable fact.
//!
//! Conventions:
//! - Kind tags are dotted `{family}.{fact}` strings and never change once
//!   a log has been written with them.
//! - Payload fields declare the fact completely. Reducers apply what the
//!   event says (deltas, new values, new statuses) and never re-derive
//!   game rules; producers do all computation up front.
//! - Fields added later must be `#[serde(default)]` so historical logs
//!   keep folding.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use spincycle_core::{
    AgentId, AllianceId, CorrelationId, DilemmaId, FineId, InvestigationId, ListingId, LoanId,
    LocationId, MachineId, Money, ScandalId, StaffId, VendorId,
};
use spincycle_domain::economy::MaintenanceTier;
use spincycle_domain::{
    AllianceKind, LoanKind, MachineKind, MachineStatus, NegotiationOutcome, RegulatoryStatus,
    ServiceKind, StaffRole,
};

/// Direction and bookkeeping category of a cash movement.
///
/// REVENUE and LOAN credit the balance; the rest debit it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransferKind {
    Revenue,
    Loan,
    Expense,
    Payment,
    Fine,
    Penalty,
}

impl TransferKind {
    pub const fn credits(self) -> bool {
        matches!(self, TransferKind::Revenue | TransferKind::Loan)
    }
}

/// The two ways out of a dilemma.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EthicalChoice {
    Principled,
    Expedient,
}

/// Every event kind the engine can append.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event_kind")]
pub enum EventPayload {
    // ── Lifecycle ────────────────────────────────────────────────
    #[serde(rename = "agent.created")]
    AgentCreated {
        name: String,
        starting_cash: Money,
        credit_limit: Money,
        credit_rating: i64,
        social_score: i64,
    },
    #[serde(rename = "agent.retired")]
    AgentRetired { reason: String },

    // ── Time & autonomous operations ─────────────────────────────
    #[serde(rename = "time.advanced")]
    TimeAdvanced,
    #[serde(rename = "ops.daily_revenue_processed")]
    DailyRevenueProcessed {
        location_id: LocationId,
        loads_by_service: BTreeMap<ServiceKind, u32>,
        revenue: Money,
        cogs: Money,
    },
    #[serde(rename = "ops.weekly_fixed_costs_billed")]
    WeeklyFixedCostsBilled {
        location_id: LocationId,
        rent: Money,
        utilities: Money,
        wages: Money,
        total: Money,
    },

    // ── Finance ──────────────────────────────────────────────────
    #[serde(rename = "finance.funds_transferred")]
    FundsTransferred {
        kind: TransferKind,
        amount: Money,
        memo: String,
    },
    #[serde(rename = "finance.loan_taken")]
    LoanTaken {
        loan_id: LoanId,
        kind: LoanKind,
        principal: Money,
        annual_rate: f64,
        term_weeks: Option<u32>,
        rating_delta: i64,
    },
    #[serde(rename = "finance.debt_payment_processed")]
    DebtPaymentProcessed {
        loan_id: LoanId,
        amount: Money,
        remaining: Money,
        rating_delta: i64,
    },
    #[serde(rename = "finance.interest_accrued")]
    InterestAccrued { loan_id: LoanId, amount: Money },
    #[serde(rename = "finance.tax_liability_calculated")]
    TaxLiabilityCalculated {
        amount: Money,
        period_revenue: Money,
        period_cogs: Money,
    },

    // ── Pricing & marketing ──────────────────────────────────────
    #[serde(rename = "pricing.price_set")]
    PriceSet {
        location_id: LocationId,
        service: ServiceKind,
        price: Money,
    },
    #[serde(rename = "marketing.boost_applied")]
    MarketingBoostApplied {
        location_id: LocationId,
        spend: Money,
        boost: f64,
        until_week: u32,
    },
    #[serde(rename = "market.competitor_price_changed")]
    CompetitorPriceChanged {
        location_id: LocationId,
        service: ServiceKind,
        price: Money,
    },
    #[serde(rename = "market.listing_posted")]
    LocationListingPosted {
        listing_id: ListingId,
        zone: String,
        monthly_rent: Money,
        purchase_price: Money,
    },

    // ── Equipment ────────────────────────────────────────────────
    #[serde(rename = "equipment.purchased")]
    EquipmentPurchased {
        location_id: LocationId,
        machine_id: MachineId,
        kind: MachineKind,
        unit_price: Money,
        vendor_id: VendorId,
    },
    #[serde(rename = "equipment.sold")]
    EquipmentSold {
        location_id: LocationId,
        machine_id: MachineId,
        salvage_value: Money,
    },
    #[serde(rename = "equipment.repaired")]
    EquipmentRepaired {
        location_id: LocationId,
        machine_id: MachineId,
        /// None for an emergency breakdown fix outside the tier table.
        #[serde(default)]
        tier: Option<MaintenanceTier>,
        new_condition: f64,
        new_status: MachineStatus,
    },
    #[serde(rename = "equipment.wear_updated")]
    MachineWearUpdated {
        location_id: LocationId,
        machine_id: MachineId,
        wear: f64,
        new_condition: f64,
        loads_processed: u32,
    },
    #[serde(rename = "equipment.status_changed")]
    MachineStatusChanged {
        location_id: LocationId,
        machine_id: MachineId,
        new_status: MachineStatus,
    },

    // ── Inventory ────────────────────────────────────────────────
    #[serde(rename = "inventory.supplies_purchased")]
    SuppliesPurchased {
        location_id: LocationId,
        vendor_id: VendorId,
        detergent_units: u32,
        softener_units: u32,
        cost: Money,
    },
    #[serde(rename = "inventory.consumed")]
    InventoryConsumed {
        location_id: LocationId,
        detergent_units: u32,
        softener_units: u32,
    },

    // ── Locations ────────────────────────────────────────────────
    #[serde(rename = "location.opened")]
    LocationOpened {
        location_id: LocationId,
        zone: String,
        monthly_rent: Money,
        /// Listing consumed by this opening, if any.
        #[serde(default)]
        listing_id: Option<ListingId>,
    },
    #[serde(rename = "location.closed")]
    LocationClosed { location_id: LocationId },
    #[serde(rename = "location.cleanliness_adjusted")]
    CleanlinessAdjusted {
        location_id: LocationId,
        delta: f64,
        new_value: f64,
    },

    // ── Staff ────────────────────────────────────────────────────
    #[serde(rename = "staff.hired")]
    StaffHired {
        location_id: LocationId,
        staff_id: StaffId,
        name: String,
        role: StaffRole,
        hourly_rate: Money,
    },
    #[serde(rename = "staff.fired")]
    StaffFired {
        location_id: LocationId,
        staff_id: StaffId,
        severance: Money,
    },
    #[serde(rename = "staff.quit")]
    StaffQuit {
        location_id: LocationId,
        staff_id: StaffId,
        reason: String,
    },
    #[serde(rename = "staff.wage_adjusted")]
    StaffWageAdjusted {
        location_id: LocationId,
        staff_id: StaffId,
        new_rate: Money,
        morale_delta: i64,
    },
    #[serde(rename = "staff.benefits_provided")]
    StaffBenefitsProvided {
        location_id: LocationId,
        cost: Money,
        morale_delta: i64,
        until_week: u32,
    },
    #[serde(rename = "staff.morale_changed")]
    StaffMoraleChanged {
        location_id: LocationId,
        staff_id: StaffId,
        delta: i64,
    },

    // ── Vendors ──────────────────────────────────────────────────
    #[serde(rename = "vendor.relationship_established")]
    VendorRelationshipEstablished {
        location_id: LocationId,
        vendor_id: VendorId,
        unit_price: Money,
    },
    #[serde(rename = "vendor.negotiation_initiated")]
    VendorNegotiationInitiated {
        location_id: LocationId,
        vendor_id: VendorId,
        requested_discount: f64,
    },
    #[serde(rename = "vendor.negotiation_resolved")]
    VendorNegotiationResolved {
        location_id: LocationId,
        vendor_id: VendorId,
        outcome: NegotiationOutcome,
        granted_discount: f64,
    },
    #[serde(rename = "vendor.terms_updated")]
    VendorTermsUpdated {
        location_id: LocationId,
        vendor_id: VendorId,
        new_unit_price: Money,
    },
    #[serde(rename = "vendor.exclusive_signed")]
    ExclusiveContractSigned {
        location_id: LocationId,
        vendor_id: VendorId,
        discount: f64,
        until_week: u32,
    },
    #[serde(rename = "vendor.contract_cancelled")]
    VendorContractCancelled {
        location_id: LocationId,
        vendor_id: VendorId,
        penalty: Money,
    },
    #[serde(rename = "vendor.price_fluctuated")]
    VendorPriceFluctuated {
        location_id: LocationId,
        vendor_id: VendorId,
        new_unit_price: Money,
    },
    #[serde(rename = "vendor.delivery_disruption_started")]
    DeliveryDisruptionStarted {
        location_id: LocationId,
        vendor_id: VendorId,
        duration_days: u32,
    },
    #[serde(rename = "vendor.delivery_disruption_ended")]
    DeliveryDisruptionEnded {
        location_id: LocationId,
        vendor_id: VendorId,
    },

    // ── Social & ethics ──────────────────────────────────────────
    #[serde(rename = "social.charity_initiated")]
    CharityInitiated { cause: String, amount: Money },
    #[serde(rename = "social.score_adjusted")]
    SocialScoreAdjusted { delta: i64, reason: String },
    #[serde(rename = "social.scandal_started")]
    ScandalStarted {
        scandal_id: ScandalId,
        description: String,
        severity: f64,
        duration_weeks: u32,
        weekly_decay: f64,
    },
    #[serde(rename = "social.scandal_resolved")]
    ScandalResolved { scandal_id: ScandalId, cost: Money },
    #[serde(rename = "social.scandal_decayed")]
    ScandalMarkerDecayed { scandal_id: ScandalId, decay: f64 },
    #[serde(rename = "social.ethical_choice_made")]
    EthicalChoiceMade {
        dilemma_id: DilemmaId,
        choice: EthicalChoice,
    },
    #[serde(rename = "social.dilemma_triggered")]
    DilemmaTriggered {
        dilemma_id: DilemmaId,
        title: String,
        description: String,
    },
    #[serde(rename = "social.loyalty_program_subscribed")]
    LoyaltyProgramSubscribed { members_added: u32, cost: Money },

    // ── Regulatory ───────────────────────────────────────────────
    #[serde(rename = "regulatory.finding")]
    RegulatoryFinding {
        fine_id: FineId,
        description: String,
        amount: Money,
        due_week: u32,
    },
    #[serde(rename = "regulatory.status_updated")]
    RegulatoryStatusUpdated { status: RegulatoryStatus },
    #[serde(rename = "regulatory.investigation_started")]
    InvestigationStarted {
        investigation_id: InvestigationId,
        subject: String,
    },
    #[serde(rename = "regulatory.report_filed")]
    RegulatoryReportFiled { filing_fee: Money },
    #[serde(rename = "regulatory.fine_paid")]
    FinePaid { fine_id: FineId, amount: Money },
    #[serde(rename = "regulatory.fine_appealed")]
    FineAppealed { fine_id: FineId, filing_fee: Money },

    // ── Narrative ────────────────────────────────────────────────
    #[serde(rename = "narrative.customer_review_submitted")]
    CustomerReviewSubmitted {
        location_id: LocationId,
        rating: u8,
        comment: String,
    },

    // ── Inter-agent ──────────────────────────────────────────────
    #[serde(rename = "rivalry.buyout_proposed")]
    BuyoutProposed {
        correlation_id: CorrelationId,
        target: AgentId,
        offer: Money,
    },
    #[serde(rename = "rivalry.buyout_offer_received")]
    BuyoutOfferReceived {
        correlation_id: CorrelationId,
        from: AgentId,
        offer: Money,
    },
    #[serde(rename = "rivalry.buyout_accepted")]
    BuyoutAccepted {
        correlation_id: CorrelationId,
        buyer: AgentId,
        price: Money,
    },
    #[serde(rename = "rivalry.buyout_concluded")]
    BuyoutConcluded {
        correlation_id: CorrelationId,
        seller: AgentId,
        price: Money,
    },
    #[serde(rename = "rivalry.alliance_formed")]
    AllianceFormed {
        alliance_id: AllianceId,
        partner: AgentId,
        kind: AllianceKind,
    },
    #[serde(rename = "rivalry.alliance_breached")]
    AllianceBreached {
        alliance_id: AllianceId,
        reason: String,
    },
    #[serde(rename = "rivalry.message_sent")]
    AgentMessageSent {
        correlation_id: CorrelationId,
        to: AgentId,
        body: String,
    },
    #[serde(rename = "rivalry.message_received")]
    AgentMessageReceived {
        correlation_id: CorrelationId,
        from: AgentId,
        body: String,
    },
}

impl EventPayload {
    /// The kind tag, identical to the serde `event_kind` field.
    pub fn kind(&self) -> &'static str {
        use kinds::*;
        match self {
            EventPayload::AgentCreated { .. } => AGENT_CREATED,
            EventPayload::AgentRetired { .. } => AGENT_RETIRED,
            EventPayload::TimeAdvanced => TIME_ADVANCED,
            EventPayload::DailyRevenueProcessed { .. } => DAILY_REVENUE_PROCESSED,
            EventPayload::WeeklyFixedCostsBilled { .. } => WEEKLY_FIXED_COSTS_BILLED,
            EventPayload::FundsTransferred { .. } => FUNDS_TRANSFERRED,
            EventPayload::LoanTaken { .. } => LOAN_TAKEN,
            EventPayload::DebtPaymentProcessed { .. } => DEBT_PAYMENT_PROCESSED,
            EventPayload::InterestAccrued { .. } => INTEREST_ACCRUED,
            EventPayload::TaxLiabilityCalculated { .. } => TAX_LIABILITY_CALCULATED,
            EventPayload::PriceSet { .. } => PRICE_SET,
            EventPayload::MarketingBoostApplied { .. } => MARKETING_BOOST_APPLIED,
            EventPayload::CompetitorPriceChanged { .. } => COMPETITOR_PRICE_CHANGED,
            EventPayload::LocationListingPosted { .. } => LISTING_POSTED,
            EventPayload::EquipmentPurchased { .. } => EQUIPMENT_PURCHASED,
            EventPayload::EquipmentSold { .. } => EQUIPMENT_SOLD,
            EventPayload::EquipmentRepaired { .. } => EQUIPMENT_REPAIRED,
            EventPayload::MachineWearUpdated { .. } => MACHINE_WEAR_UPDATED,
            EventPayload::MachineStatusChanged { .. } => MACHINE_STATUS_CHANGED,
            EventPayload::SuppliesPurchased { .. } => SUPPLIES_PURCHASED,
            EventPayload::InventoryConsumed { .. } => INVENTORY_CONSUMED,
            EventPayload::LocationOpened { .. } => LOCATION_OPENED,
            EventPayload::LocationClosed { .. } => LOCATION_CLOSED,
            EventPayload::CleanlinessAdjusted { .. } => CLEANLINESS_ADJUSTED,
            EventPayload::StaffHired { .. } => STAFF_HIRED,
            EventPayload::StaffFired { .. } => STAFF_FIRED,
            EventPayload::StaffQuit { .. } => STAFF_QUIT,
            EventPayload::StaffWageAdjusted { .. } => STAFF_WAGE_ADJUSTED,
            EventPayload::StaffBenefitsProvided { .. } => STAFF_BENEFITS_PROVIDED,
            EventPayload::StaffMoraleChanged { .. } => STAFF_MORALE_CHANGED,
            EventPayload::VendorRelationshipEstablished { .. } => VENDOR_RELATIONSHIP_ESTABLISHED,
            EventPayload::VendorNegotiationInitiated { .. } => VENDOR_NEGOTIATION_INITIATED,
            EventPayload::VendorNegotiationResolved { .. } => VENDOR_NEGOTIATION_RESOLVED,
            EventPayload::VendorTermsUpdated { .. } => VENDOR_TERMS_UPDATED,
            EventPayload::ExclusiveContractSigned { .. } => EXCLUSIVE_CONTRACT_SIGNED,
            EventPayload::VendorContractCancelled { .. } => VENDOR_CONTRACT_CANCELLED,
            EventPayload::VendorPriceFluctuated { .. } => VENDOR_PRICE_FLUCTUATED,
            EventPayload::DeliveryDisruptionStarted { .. } => DELIVERY_DISRUPTION_STARTED,
            EventPayload::DeliveryDisruptionEnded { .. } => DELIVERY_DISRUPTION_ENDED,
            EventPayload::CharityInitiated { .. } => CHARITY_INITIATED,
            EventPayload::SocialScoreAdjusted { .. } => SOCIAL_SCORE_ADJUSTED,
            EventPayload::ScandalStarted { .. } => SCANDAL_STARTED,
            EventPayload::ScandalResolved { .. } => SCANDAL_RESOLVED,
            EventPayload::ScandalMarkerDecayed { .. } => SCANDAL_MARKER_DECAYED,
            EventPayload::EthicalChoiceMade { .. } => ETHICAL_CHOICE_MADE,
            EventPayload::DilemmaTriggered { .. } => DILEMMA_TRIGGERED,
            EventPayload::LoyaltyProgramSubscribed { .. } => LOYALTY_PROGRAM_SUBSCRIBED,
            EventPayload::RegulatoryFinding { .. } => REGULATORY_FINDING,
            EventPayload::RegulatoryStatusUpdated { .. } => REGULATORY_STATUS_UPDATED,
            EventPayload::InvestigationStarted { .. } => INVESTIGATION_STARTED,
            EventPayload::RegulatoryReportFiled { .. } => REGULATORY_REPORT_FILED,
            EventPayload::FinePaid { .. } => FINE_PAID,
            EventPayload::FineAppealed { .. } => FINE_APPEALED,
            EventPayload::CustomerReviewSubmitted { .. } => CUSTOMER_REVIEW_SUBMITTED,
            EventPayload::BuyoutProposed { .. } => BUYOUT_PROPOSED,
            EventPayload::BuyoutOfferReceived { .. } => BUYOUT_OFFER_RECEIVED,
            EventPayload::BuyoutAccepted { .. } => BUYOUT_ACCEPTED,
            EventPayload::BuyoutConcluded { .. } => BUYOUT_CONCLUDED,
            EventPayload::AllianceFormed { .. } => ALLIANCE_FORMED,
            EventPayload::AllianceBreached { .. } => ALLIANCE_BREACHED,
            EventPayload::AgentMessageSent { .. } => AGENT_MESSAGE_SENT,
            EventPayload::AgentMessageReceived { .. } => AGENT_MESSAGE_RECEIVED,
        }
    }
}

/// Stable kind tags. Registry keys and the serde `event_kind` field both
/// use these values; `payload::tests` keeps them in sync.
pub mod kinds {
    pub const AGENT_CREATED: &str = "agent.created";
    pub const AGENT_RETIRED: &str = "agent.retired";
    pub const TIME_ADVANCED: &str = "time.advanced";
    pub const DAILY_REVENUE_PROCESSED: &str = "ops.daily_revenue_processed";
    pub const WEEKLY_FIXED_COSTS_BILLED: &str = "ops.weekly_fixed_costs_billed";
    pub const FUNDS_TRANSFERRED: &str = "finance.funds_transferred";
    pub const LOAN_TAKEN: &str = "finance.loan_taken";
    pub const DEBT_PAYMENT_PROCESSED: &str = "finance.debt_payment_processed";
    pub const INTEREST_ACCRUED: &str = "finance.interest_accrued";
    pub const TAX_LIABILITY_CALCULATED: &str = "finance.tax_liability_calculated";
    pub const PRICE_SET: &str = "pricing.price_set";
    pub const MARKETING_BOOST_APPLIED: &str = "marketing.boost_applied";
    pub const COMPETITOR_PRICE_CHANGED: &str = "market.competitor_price_changed";
    pub const LISTING_POSTED: &str = "market.listing_posted";
    pub const EQUIPMENT_PURCHASED: &str = "equipment.purchased";
    pub const EQUIPMENT_SOLD: &str = "equipment.sold";
    pub const EQUIPMENT_REPAIRED: &str = "equipment.repaired";
    pub const MACHINE_WEAR_UPDATED: &str = "equipment.wear_updated";
    pub const MACHINE_STATUS_CHANGED: &str = "equipment.status_changed";
    pub const SUPPLIES_PURCHASED: &str = "inventory.supplies_purchased";
    pub const INVENTORY_CONSUMED: &str = "inventory.consumed";
    pub const LOCATION_OPENED: &str = "location.opened";
    pub const LOCATION_CLOSED: &str = "location.closed";
    pub const CLEANLINESS_ADJUSTED: &str = "location.cleanliness_adjusted";
    pub const STAFF_HIRED: &str = "staff.hired";
    pub const STAFF_FIRED: &str = "staff.fired";
    pub const STAFF_QUIT: &str = "staff.quit";
    pub const STAFF_WAGE_ADJUSTED: &str = "staff.wage_adjusted";
    pub const STAFF_BENEFITS_PROVIDED: &str = "staff.benefits_provided";
    pub const STAFF_MORALE_CHANGED: &str = "staff.morale_changed";
    pub const VENDOR_RELATIONSHIP_ESTABLISHED: &str = "vendor.relationship_established";
    pub const VENDOR_NEGOTIATION_INITIATED: &str = "vendor.negotiation_initiated";
    pub const VENDOR_NEGOTIATION_RESOLVED: &str = "vendor.negotiation_resolved";
    pub const VENDOR_TERMS_UPDATED: &str = "vendor.terms_updated";
    pub const EXCLUSIVE_CONTRACT_SIGNED: &str = "vendor.exclusive_signed";
    pub const VENDOR_CONTRACT_CANCELLED: &str = "vendor.contract_cancelled";
    pub const VENDOR_PRICE_FLUCTUATED: &str = "vendor.price_fluctuated";
    pub const DELIVERY_DISRUPTION_STARTED: &str = "vendor.delivery_disruption_started";
    pub const DELIVERY_DISRUPTION_ENDED: &str = "vendor.delivery_disruption_ended";
    pub const CHARITY_INITIATED: &str = "social.charity_initiated";
    pub const SOCIAL_SCORE_ADJUSTED: &str = "social.score_adjusted";
    pub const SCANDAL_STARTED: &str = "social.scandal_started";
    pub const SCANDAL_RESOLVED: &str = "social.scandal_resolved";
    pub const SCANDAL_MARKER_DECAYED: &str = "social.scandal_decayed";
    pub const ETHICAL_CHOICE_MADE: &str = "social.ethical_choice_made";
    pub const DILEMMA_TRIGGERED: &str = "social.dilemma_triggered";
    pub const LOYALTY_PROGRAM_SUBSCRIBED: &str = "social.loyalty_program_subscribed";
    pub const REGULATORY_FINDING: &str = "regulatory.finding";
    pub const REGULATORY_STATUS_UPDATED: &str = "regulatory.status_updated";
    pub const INVESTIGATION_STARTED: &str = "regulatory.investigation_started";
    pub const REGULATORY_REPORT_FILED: &str = "regulatory.report_filed";
    pub const FINE_PAID: &str = "regulatory.fine_paid";
    pub const FINE_APPEALED: &str = "regulatory.fine_appealed";
    pub const CUSTOMER_REVIEW_SUBMITTED: &str = "narrative.customer_review_submitted";
    pub const BUYOUT_PROPOSED: &str = "rivalry.buyout_proposed";
    pub const BUYOUT_OFFER_RECEIVED: &str = "rivalry.buyout_offer_received";
    pub const BUYOUT_ACCEPTED: &str = "rivalry.buyout_accepted";
    pub const BUYOUT_CONCLUDED: &str = "rivalry.buyout_concluded";
    pub const ALLIANCE_FORMED: &str = "rivalry.alliance_formed";
    pub const ALLIANCE_BREACHED: &str = "rivalry.alliance_breached";
    pub const AGENT_MESSAGE_SENT: &str = "rivalry.message_sent";
    pub const AGENT_MESSAGE_RECEIVED: &str = "rivalry.message_received";

    /// All catalog kinds, for registry-completeness checks.
    pub const ALL: &[&str] = &[
        AGENT_CREATED,
        AGENT_RETIRED,
        TIME_ADVANCED,
        DAILY_REVENUE_PROCESSED,
        WEEKLY_FIXED_COSTS_BILLED,
        FUNDS_TRANSFERRED,
        LOAN_TAKEN,
        DEBT_PAYMENT_PROCESSED,
        INTEREST_ACCRUED,
        TAX_LIABILITY_CALCULATED,
        PRICE_SET,
        MARKETING_BOOST_APPLIED,
        COMPETITOR_PRICE_CHANGED,
        LISTING_POSTED,
        EQUIPMENT_PURCHASED,
        EQUIPMENT_SOLD,
        EQUIPMENT_REPAIRED,
        MACHINE_WEAR_UPDATED,
        MACHINE_STATUS_CHANGED,
        SUPPLIES_PURCHASED,
        INVENTORY_CONSUMED,
        LOCATION_OPENED,
        LOCATION_CLOSED,
        CLEANLINESS_ADJUSTED,
        STAFF_HIRED,
        STAFF_FIRED,
        STAFF_QUIT,
        STAFF_WAGE_ADJUSTED,
        STAFF_BENEFITS_PROVIDED,
        STAFF_MORALE_CHANGED,
        VENDOR_RELATIONSHIP_ESTABLISHED,
        VENDOR_NEGOTIATION_INITIATED,
        VENDOR_NEGOTIATION_RESOLVED,
        VENDOR_TERMS_UPDATED,
        EXCLUSIVE_CONTRACT_SIGNED,
        VENDOR_CONTRACT_CANCELLED,
        VENDOR_PRICE_FLUCTUATED,
        DELIVERY_DISRUPTION_STARTED,
        DELIVERY_DISRUPTION_ENDED,
        CHARITY_INITIATED,
        SOCIAL_SCORE_ADJUSTED,
        SCANDAL_STARTED,
        SCANDAL_RESOLVED,
        SCANDAL_MARKER_DECAYED,
        ETHICAL_CHOICE_MADE,
        DILEMMA_TRIGGERED,
        LOYALTY_PROGRAM_SUBSCRIBED,
        REGULATORY_FINDING,
        REGULATORY_STATUS_UPDATED,
        INVESTIGATION_STARTED,
        REGULATORY_REPORT_FILED,
        FINE_PAID,
        FINE_APPEALED,
        CUSTOMER_REVIEW_SUBMITTED,
        BUYOUT_PROPOSED,
        BUYOUT_OFFER_RECEIVED,
        BUYOUT_ACCEPTED,
        BUYOUT_CONCLUDED,
        ALLIANCE_FORMED,
        ALLIANCE_BREACHED,
        AGENT_MESSAGE_SENT,
        AGENT_MESSAGE_RECEIVED,
    ];
}
