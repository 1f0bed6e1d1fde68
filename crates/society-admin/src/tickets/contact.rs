use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketType {
    /// Tickets are sent to an email address.
    Paper,
    /// Tickets are loaded onto a member card.
    Card,
}

/// Buyer contact info. Only the field belonging to the chosen ticket type is editable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactDetails {
    ticket_type: Option<TicketType>,
    email: String,
    membercard: String,
}

impl ContactDetails {
    pub fn ticket_type(&self) -> Option<TicketType> {
        self.ticket_type
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn membercard(&self) -> &str {
        &self.membercard
    }

    pub fn choose_ticket_type(&mut self, ticket_type: TicketType) {
        self.ticket_type = Some(ticket_type);
        match ticket_type {
            TicketType::Paper => self.membercard.clear(),
            TicketType::Card => self.email.clear(),
        }
    }

    /// Returns false when the email field is disabled.
    pub fn set_email(&mut self, email: impl Into<String>) -> bool {
        if self.ticket_type != Some(TicketType::Paper) {
            return false;
        }
        self.email = email.into();
        true
    }

    /// Returns false when the member card field is disabled.
    pub fn set_membercard(&mut self, membercard: impl Into<String>) -> bool {
        if self.ticket_type != Some(TicketType::Card) {
            return false;
        }
        self.membercard = membercard.into();
        true
    }

    pub fn is_complete(&self) -> bool {
        match self.ticket_type {
            Some(TicketType::Paper) => !self.email.trim().is_empty(),
            Some(TicketType::Card) => !self.membercard.trim().is_empty(),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn switching_type_clears_the_other_field() {
        let mut contact = ContactDetails::default();
        contact.choose_ticket_type(TicketType::Paper);
        assert!(contact.set_email("kari@example.org"));
        assert!(contact.is_complete());

        contact.choose_ticket_type(TicketType::Card);
        assert_eq!(contact.email(), "");
        assert!(!contact.is_complete());
        assert!(contact.set_membercard("123456"));
        assert!(contact.is_complete());

        contact.choose_ticket_type(TicketType::Paper);
        assert_eq!(contact.membercard(), "");
    }

    #[test]
    fn disabled_fields_ignore_input() {
        let mut contact = ContactDetails::default();
        assert!(!contact.set_email("kari@example.org"));
        assert!(!contact.is_complete());

        contact.choose_ticket_type(TicketType::Card);
        assert!(!contact.set_email("kari@example.org"));
        assert_eq!(contact.email(), "");
    }

    #[test]
    fn blank_values_do_not_count() {
        let mut contact = ContactDetails::default();
        contact.choose_ticket_type(TicketType::Paper);
        contact.set_email("   ");
        assert!(!contact.is_complete());
    }
}
