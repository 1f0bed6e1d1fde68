use serde::Serialize;

use super::contact::{ContactDetails, TicketType};
use super::selection::TicketSelection;

/// Which info block the form shows next to the ticket type choice. The paper ticket block is
/// shown until card is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InfoPanel {
    /// Card purchases get no paper ticket.
    Ticketless,
    Paper,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FormValidation {
    pub submit_enabled: bool,
    pub missing_user_info: bool,
    pub missing_ticket_count: bool,
    pub info_panel: InfoPanel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseForm {
    pub selection: TicketSelection,
    pub contact: ContactDetails,
}

impl PurchaseForm {
    pub fn new(selection: TicketSelection) -> Self {
        Self {
            selection,
            contact: ContactDetails::default(),
        }
    }

    pub fn validate(&self) -> FormValidation {
        let missing_user_info = !self.contact.is_complete();
        let missing_ticket_count = self.selection.summary().total_tickets == 0;
        let info_panel = match self.contact.ticket_type() {
            Some(TicketType::Card) => InfoPanel::Ticketless,
            Some(TicketType::Paper) | None => InfoPanel::Paper,
        };

        FormValidation {
            submit_enabled: !missing_user_info && !missing_ticket_count,
            missing_user_info,
            missing_ticket_count,
            info_panel,
        }
    }
}
