// Request and response shapes exchanged with the front end

use serde::{Deserialize, Serialize};

use desk_domain::{
    CheckIn, ChildInfo, DeadLetter, LedgerStats, RsvpStatus, SyncStatus, Ticket, TicketReference,
};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub volunteer_name: String,
    pub pin: String,
}

#[derive(Debug, Deserialize)]
pub struct IssueTicketRequest {
    pub recipient_name: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub email: String,
    pub adult_count: u32,
    #[serde(default)]
    pub child_count: u32,
    #[serde(default)]
    pub children: Option<Vec<ChildInfo>>,
    #[serde(default)]
    pub special_needs: Option<String>,
    #[serde(default)]
    pub rsvp_status: RsvpStatus,
}

#[derive(Debug, Deserialize)]
pub struct CheckInRequest {
    pub ticket_id: String,
    pub actual_adults: u32,
    #[serde(default)]
    pub actual_children: u32,
}

#[derive(Debug, Deserialize)]
pub struct WalkInRequest {
    pub name: String,
    #[serde(default)]
    pub phone_number: String,
    pub adult_count: u32,
    #[serde(default)]
    pub child_count: u32,
    #[serde(default)]
    pub children: Option<Vec<ChildInfo>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TicketSearchQuery {
    pub query: Option<String>,
    pub limit: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ActivityQuery {
    pub volunteer: Option<String>,
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct ResolveReferenceRequest {
    pub raw: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct IssuedTicket {
    pub ticket: Ticket,
    /// Compact token to print on the ticket.
    pub reference: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResolvedReference {
    pub reference: TicketReference,
    pub ticket: Option<Ticket>,
    pub check_in: Option<CheckIn>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub stats: LedgerStats,
    pub sync: SyncStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeadLetterList {
    pub total: usize,
    pub items: Vec<DeadLetter>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct RequeueSummary {
    pub requeued: usize,
}
