use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TicketGroupId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PriceGroupId(pub u32);

/// A pool of tickets shared by several price groups. `limit` caps the pool per purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketGroup {
    pub id: TicketGroupId,
    pub name: String,
    pub limit: Option<u32>,
}

/// A priced ticket category with a dropdown of `0..option_count` choices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceGroup {
    pub id: PriceGroupId,
    pub ticket_group: TicketGroupId,
    pub name: String,
    pub price: u32,
    pub option_count: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TicketOption {
    pub value: u32,
    pub enabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriceLine {
    pub price_group: PriceGroupId,
    pub count: u32,
    pub sum: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionSummary {
    pub lines: Vec<PriceLine>,
    pub total_tickets: u32,
    pub total_cost: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TicketError {
    #[error("unknown ticket group {0:?}")]
    UnknownTicketGroup(TicketGroupId),
    #[error("unknown price group {0:?}")]
    UnknownPriceGroup(PriceGroupId),
    #[error("price group {0:?} is listed twice")]
    DuplicatePriceGroup(PriceGroupId),
    #[error("{count} is not one of the {option_count} options")]
    OptionOutOfRange { count: u32, option_count: u32 },
    #[error("{requested} tickets exceed the limit for {ticket_group:?}; at most {maximum}")]
    ExceedsLimit {
        ticket_group: TicketGroupId,
        requested: u32,
        maximum: u32,
    },
}

/// Ticket counts chosen per price group, checked against each ticket group's limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketSelection {
    default_limit: u32,
    ticket_groups: Vec<TicketGroup>,
    price_groups: Vec<PriceGroup>,
    selected: BTreeMap<PriceGroupId, u32>,
}

impl TicketSelection {
    pub fn new(
        default_limit: u32,
        ticket_groups: Vec<TicketGroup>,
        price_groups: Vec<PriceGroup>,
    ) -> Result<Self, TicketError> {
        let mut seen = BTreeSet::new();
        for price_group in &price_groups {
            if !seen.insert(price_group.id) {
                return Err(TicketError::DuplicatePriceGroup(price_group.id));
            }
            if !ticket_groups
                .iter()
                .any(|group| group.id == price_group.ticket_group)
            {
                return Err(TicketError::UnknownTicketGroup(price_group.ticket_group));
            }
        }

        Ok(Self {
            default_limit,
            ticket_groups,
            price_groups,
            selected: BTreeMap::new(),
        })
    }

    pub fn price_groups(&self) -> &[PriceGroup] {
        &self.price_groups
    }

    fn price_group(&self, id: PriceGroupId) -> Result<&PriceGroup, TicketError> {
        self.price_groups
            .iter()
            .find(|group| group.id == id)
            .ok_or(TicketError::UnknownPriceGroup(id))
    }

    pub fn selected(&self, id: PriceGroupId) -> u32 {
        self.selected.get(&id).copied().unwrap_or(0)
    }

    pub fn limit(&self, id: TicketGroupId) -> Result<u32, TicketError> {
        self.ticket_groups
            .iter()
            .find(|group| group.id == id)
            .map(|group| group.limit.unwrap_or(self.default_limit))
            .ok_or(TicketError::UnknownTicketGroup(id))
    }

    pub fn group_total(&self, id: TicketGroupId) -> u32 {
        self.price_groups
            .iter()
            .filter(|group| group.ticket_group == id)
            .map(|group| self.selected(group.id))
            .sum()
    }

    /// Highest count the price group may show as enabled: its own choice plus what is left.
    fn legal_maximum(&self, price_group: &PriceGroup) -> Result<i64, TicketError> {
        let limit = self.limit(price_group.ticket_group)?;
        let chosen = self.selected(price_group.id);
        let total = self.group_total(price_group.ticket_group);
        Ok(i64::from(chosen) + i64::from(limit) - i64::from(total))
    }

    pub fn options(&self, id: PriceGroupId) -> Result<Vec<TicketOption>, TicketError> {
        let price_group = self.price_group(id)?;
        let legal = self.legal_maximum(price_group)?;

        Ok((0..price_group.option_count)
            .map(|value| TicketOption {
                value,
                enabled: i64::from(value) <= legal,
            })
            .collect())
    }

    /// Choose `count` tickets in a price group. Lowering a count is always allowed.
    pub fn select(
        &mut self,
        id: PriceGroupId,
        count: u32,
    ) -> Result<SelectionSummary, TicketError> {
        let price_group = self.price_group(id)?;
        if count >= price_group.option_count {
            return Err(TicketError::OptionOutOfRange {
                count,
                option_count: price_group.option_count,
            });
        }

        let legal = self.legal_maximum(price_group)?;
        if count > self.selected(id) && i64::from(count) > legal {
            return Err(TicketError::ExceedsLimit {
                ticket_group: price_group.ticket_group,
                requested: count,
                maximum: u32::try_from(legal.max(0)).unwrap_or(0),
            });
        }

        if count == 0 {
            self.selected.remove(&id);
        } else {
            self.selected.insert(id, count);
        }
        Ok(self.summary())
    }

    pub fn summary(&self) -> SelectionSummary {
        let lines: Vec<PriceLine> = self
            .price_groups
            .iter()
            .map(|group| {
                let count = self.selected(group.id);
                PriceLine {
                    price_group: group.id,
                    count,
                    sum: u64::from(count) * u64::from(group.price),
                }
            })
            .collect();

        SelectionSummary {
            total_tickets: lines.iter().map(|line| line.count).sum(),
            total_cost: lines.iter().map(|line| line.sum).sum(),
            lines,
        }
    }
}
