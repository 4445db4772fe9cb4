//! Actor autocomplete for the "filter by user" control.

use std::sync::{Arc, RwLock};

use tracing::{debug, warn};

use qams_client::traits::UserDirectory;
use qams_core::config::ConsoleConfig;
use qams_core::types::UserId;
use qams_entity::user::UserSummary;

use crate::debounce::Debouncer;
use crate::sequence::RequestSequence;

/// Shown when the user search fails without a backend message.
pub const SEARCH_FAILED: &str = "Failed to search users";

/// What the suggestion list shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SuggestionState {
    /// Closed: input too short, dismissed, or a selection was made.
    #[default]
    Idle,
    /// A search is in flight.
    Loading,
    /// Matching users.
    Results(Vec<UserSummary>),
    /// The search completed with no match.
    Empty,
    /// The search failed.
    Failed(String),
}

/// Snapshot of the autocomplete control.
#[derive(Debug, Clone, Default)]
pub struct ActorState {
    /// Free text in the input.
    pub input: String,
    /// Suggestion list.
    pub suggestions: SuggestionState,
    /// The chosen actor, whose id is the active filter value.
    pub selected: Option<UserSummary>,
}

struct Shared {
    directory: Arc<dyn UserDirectory>,
    state: RwLock<ActorState>,
    sequence: RequestSequence,
    limit: u64,
}

impl Shared {
    async fn search(&self, text: String) {
        let ticket = self.sequence.issue();
        self.write().suggestions = SuggestionState::Loading;

        let outcome = self.directory.search_users(&text, self.limit).await;

        if !self.sequence.is_latest(ticket) {
            debug!("Discarding superseded actor suggestions");
            return;
        }
        let suggestions = match outcome {
            Ok(users) if users.is_empty() => SuggestionState::Empty,
            Ok(users) => SuggestionState::Results(users),
            Err(e) => {
                warn!(error = %e, "Actor search failed");
                SuggestionState::Failed(e.user_message_or(SEARCH_FAILED))
            }
        };
        self.write().suggestions = suggestions;
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, ActorState> {
        self.state.read().unwrap_or_else(|p| p.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, ActorState> {
        self.state.write().unwrap_or_else(|p| p.into_inner())
    }
}

/// Resolves partial names or emails into candidate actors.
pub struct ActorAutocomplete {
    shared: Arc<Shared>,
    debouncer: Debouncer,
    min_chars: usize,
}

impl std::fmt::Debug for ActorAutocomplete {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActorAutocomplete")
            .field("min_chars", &self.min_chars)
            .field("limit", &self.shared.limit)
            .finish()
    }
}

impl ActorAutocomplete {
    /// Create the control with thresholds from `config`.
    pub fn new(directory: Arc<dyn UserDirectory>, config: &ConsoleConfig) -> Self {
        Self {
            shared: Arc::new(Shared {
                directory,
                state: RwLock::new(ActorState::default()),
                sequence: RequestSequence::new(),
                limit: config.actor_suggestion_limit.max(1),
            }),
            debouncer: Debouncer::new(config.debounce()),
            min_chars: config.actor_min_chars,
        }
    }

    /// A copy of the current control state.
    pub fn state(&self) -> ActorState {
        self.shared.read().clone()
    }

    /// Id of the selected actor, the value to filter the log by.
    pub fn selected_id(&self) -> Option<UserId> {
        self.shared.read().selected.as_ref().map(|u| u.id.clone())
    }

    /// The operator typed into the control.
    ///
    /// Any earlier selection is dropped. Input shorter than the minimum
    /// closes the suggestions without a request; otherwise a search is
    /// scheduled after the quiet period.
    pub fn input(&self, text: &str) {
        self.shared.sequence.invalidate();
        let query = text.trim().to_string();
        {
            let mut state = self.shared.write();
            state.input = text.to_string();
            state.selected = None;
            if query.chars().count() < self.min_chars {
                state.suggestions = SuggestionState::Idle;
            }
        }

        if query.chars().count() < self.min_chars {
            self.debouncer.cancel();
            return;
        }

        let shared = self.shared.clone();
        self.debouncer.schedule(async move {
            shared.search(query).await;
        });
    }

    /// Pick a suggestion: the input shows its name and its id becomes the
    /// active filter value. No new search is issued.
    pub fn select(&self, user: UserSummary) -> UserId {
        self.close();
        let id = user.id.clone();
        let mut state = self.shared.write();
        state.input = user.display_name();
        state.selected = Some(user);
        id
    }

    /// Clear the selection and the input.
    pub fn clear(&self) {
        self.close();
        let mut state = self.shared.write();
        state.input.clear();
        state.selected = None;
    }

    /// Close the suggestion list (focus lost). Late results are ignored.
    pub fn dismiss(&self) {
        self.close();
    }

    /// Wait for a pending debounced search to finish.
    pub async fn settle(&self) {
        self.debouncer.settle().await;
    }

    fn close(&self) {
        self.shared.sequence.invalidate();
        self.debouncer.cancel();
        self.shared.write().suggestions = SuggestionState::Idle;
    }
}
