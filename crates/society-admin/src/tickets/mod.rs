//! State behind the ticket purchase modal, kept free of any DOM so it can be driven and tested
//! directly.

pub mod contact;
pub mod form;
pub mod navigation;
pub mod selection;

pub use contact::{ContactDetails, TicketType};
pub use form::{FormValidation, InfoPanel, PurchaseForm};
pub use navigation::{buy_link, ModalCommand, ModalRequest, PurchaseClick, PurchaseNavigator};
pub use selection::{
    PriceGroup, PriceGroupId, PriceLine, SelectionSummary, TicketError, TicketGroup,
    TicketGroupId, TicketOption, TicketSelection,
};
