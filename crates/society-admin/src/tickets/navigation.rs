//! Purchase modal navigation driven by the URL hash and browser history.

use crate::i18n::Locale;

const BUY_SUFFIX: &str = "buy";

/// Localized path of the purchase page for an event fragment such as `42/buy`.
pub fn buy_link(locale: Locale, fragment: &str) -> String {
    let fragment = fragment.trim_start_matches('/');
    match locale {
        Locale::English => format!("/en/events/{fragment}"),
        Locale::Norwegian => format!("/arrangement/{fragment}"),
    }
}

/// A modal fetch tagged with the generation it was issued for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalRequest {
    pub url: String,
    pub generation: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalCommand {
    Open(ModalRequest),
    Close,
    Nothing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseClick {
    /// Hash to push onto the history stack.
    pub push_hash: String,
    pub request: ModalRequest,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseNavigator {
    locale: Locale,
    initial_pop_pending: bool,
    generation: u64,
    open: bool,
}

impl PurchaseNavigator {
    /// `has_history_state` is true when the page was reached through history navigation, in
    /// which case the first `popstate` is a real one.
    pub fn new(locale: Locale, has_history_state: bool) -> Self {
        Self {
            locale,
            initial_pop_pending: !has_history_state,
            generation: 0,
            open: false,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn request(&mut self, url: String) -> ModalRequest {
        self.generation += 1;
        ModalRequest {
            url,
            generation: self.generation,
        }
    }

    fn from_hash(&mut self, hash: &str) -> ModalCommand {
        let fragment = hash.trim_start_matches('#');
        if fragment.ends_with(BUY_SUFFIX) {
            let url = buy_link(self.locale, fragment);
            return ModalCommand::Open(self.request(url));
        }
        let was_open = self.open;
        self.close();
        if was_open {
            ModalCommand::Close
        } else {
            ModalCommand::Nothing
        }
    }

    fn close(&mut self) {
        self.open = false;
        self.generation += 1;
    }

    pub fn on_load(&mut self, hash: &str) -> ModalCommand {
        self.from_hash(hash)
    }

    pub fn on_popstate(&mut self, hash: &str) -> ModalCommand {
        if std::mem::take(&mut self.initial_pop_pending) {
            return ModalCommand::Nothing;
        }
        self.from_hash(hash)
    }

    /// A purchase button for `event_id` linking to `path` was clicked.
    pub fn on_purchase_click(&mut self, event_id: &str, path: &str) -> PurchaseClick {
        self.initial_pop_pending = false;
        PurchaseClick {
            push_hash: format!("#{event_id}/{BUY_SUFFIX}"),
            request: self.request(path.to_string()),
        }
    }

    /// Whether a fetched modal body may be shown. Responses for superseded requests are dropped.
    pub fn accept_response(&mut self, generation: u64) -> bool {
        if generation != self.generation {
            return false;
        }
        self.open = true;
        true
    }

    /// The user dismissed the modal. Returns the hash to push.
    pub fn on_modal_closed(&mut self) -> String {
        self.close();
        "#".to_string()
    }
}
