//! Pure view model for the queue display.
//!
//! Every snapshot is turned into a fresh [`QueueView`]; nothing is carried over
//! from the previous render except through [`QueueView::disconnected`], which
//! only swaps the status badge. Components bind these strings as text nodes,
//! so server-supplied names never reach the DOM as markup.

use lineup_common::{QueueState, Token};

pub const DISCONNECTED_LABEL: &str = "Disconnected";
pub const CONNECTING_LABEL: &str = "Connecting...";
pub const IDLE_PLACEHOLDER: &str = "No one is being served";
pub const EMPTY_QUEUE_PLACEHOLDER: &str = "Queue is empty";

const BADGE_CLASS: &str = "status-badge";

/// CSS class for a professor status.
///
/// Lower-cases the status and replaces only the first space with `-`, so
/// `"On Short Break"` becomes `status-on-short break`.
pub fn status_class(status: &str) -> String {
    format!("status-{}", status.to_lowercase().replacen(' ', "-", 1))
}

/// Status badge text and classes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusView {
    pub label: String,
    pub class: String,
}

impl StatusView {
    pub fn from_status(status: &str) -> Self {
        Self {
            label: status.to_string(),
            class: format!("{BADGE_CLASS} {}", status_class(status)),
        }
    }

    pub fn disconnected() -> Self {
        Self {
            label: DISCONNECTED_LABEL.to_string(),
            class: format!("{BADGE_CLASS} status-unavailable"),
        }
    }

    pub fn connecting() -> Self {
        Self {
            label: CONNECTING_LABEL.to_string(),
            class: format!("{BADGE_CLASS} status-connecting"),
        }
    }
}

/// One token as displayed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenRow {
    pub id: i64,
    /// `#<id>`
    pub id_label: String,
    pub name: String,
    pub kind: String,
}

impl TokenRow {
    pub fn from_token(token: &Token) -> Self {
        Self {
            id: token.id,
            id_label: format!("#{}", token.id),
            name: token.name.clone(),
            kind: token.kind.clone(),
        }
    }

    /// `Token #<id>`
    pub fn headline(&self) -> String {
        format!("Token {}", self.id_label)
    }

    /// `#<id> - <name>`
    pub fn title(&self) -> String {
        format!("{} - {}", self.id_label, self.name)
    }

    /// `#<id> - <name> (<type>)`, the professor's one-line form.
    pub fn summary(&self) -> String {
        format!("{} - {} ({})", self.id_label, self.name, self.kind)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CurrentTokenView {
    Serving(TokenRow),
    Idle,
}

impl CurrentTokenView {
    pub fn from_token(token: Option<&Token>) -> Self {
        match token {
            Some(token) => CurrentTokenView::Serving(TokenRow::from_token(token)),
            None => CurrentTokenView::Idle,
        }
    }
}

/// The waiting line, in server order.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct QueueListView {
    pub count: usize,
    pub rows: Vec<TokenRow>,
}

impl QueueListView {
    pub fn from_queue(queue: &[Token]) -> Self {
        Self {
            count: queue.len(),
            rows: queue.iter().map(TokenRow::from_token).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Everything the page shows about the queue.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueueView {
    pub status: StatusView,
    pub current: CurrentTokenView,
    pub queue: QueueListView,
}

impl Default for QueueView {
    fn default() -> Self {
        Self::connecting()
    }
}

impl QueueView {
    /// Before the first snapshot arrives.
    pub fn connecting() -> Self {
        Self {
            status: StatusView::connecting(),
            current: CurrentTokenView::Idle,
            queue: QueueListView::default(),
        }
    }

    pub fn render(state: &QueueState) -> Self {
        Self {
            status: StatusView::from_status(&state.professor_status),
            current: CurrentTokenView::from_token(state.current_token.as_ref()),
            queue: QueueListView::from_queue(&state.queue),
        }
    }

    /// Same view with the badge switched to `Disconnected`.
    pub fn disconnected(&self) -> Self {
        Self {
            status: StatusView::disconnected(),
            ..self.clone()
        }
    }
}
