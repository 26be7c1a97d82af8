use crate::types::Turn;

/// Maximum number of turns retained between requests.
pub const HISTORY_CAPACITY: usize = 20;

/// Number of retained turns replayed to the model ahead of a new turn.
pub const CONTEXT_WINDOW: usize = 10;

/// Rolling record of committed turns.
///
/// Turns are only ever added in user/model pairs through [`commit`], and
/// trimmed from the front two at a time, so the history always holds complete
/// pairs in chronological order.
///
/// [`commit`]: ConversationHistory::commit
#[derive(Debug, Clone)]
pub struct ConversationHistory {
    turns: Vec<Turn>,
    capacity: usize,
    window: usize,
}

impl Default for ConversationHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversationHistory {
    /// Empty history with [`HISTORY_CAPACITY`] and [`CONTEXT_WINDOW`].
    pub fn new() -> Self {
        Self::with_limits(HISTORY_CAPACITY, CONTEXT_WINDOW)
    }

    /// Empty history with custom limits.
    ///
    /// An odd `capacity` is rounded up so that pair trimming can always
    /// restore the bound.
    pub fn with_limits(capacity: usize, window: usize) -> Self {
        let capacity = capacity.max(2);
        Self {
            turns: Vec::with_capacity(capacity + 2),
            capacity: capacity + capacity % 2,
            window,
        }
    }

    /// Context for the next model call: the trailing window of history
    /// followed by `new_turn`. History is not modified.
    pub fn assemble(&self, new_turn: &Turn) -> Vec<Turn> {
        let start = self.turns.len().saturating_sub(self.window);
        let mut context = Vec::with_capacity(self.turns.len() - start + 1);
        context.extend_from_slice(&self.turns[start..]);
        context.push(new_turn.clone());
        context
    }

    /// Record a completed exchange.
    ///
    /// Drops the oldest pair once if the history grew past capacity. A commit
    /// adds exactly two turns to a history that was already within an even
    /// capacity, so one trim is always enough.
    pub fn commit(&mut self, user_turn: Turn, model_turn: Turn) {
        self.turns.push(user_turn);
        self.turns.push(model_turn);

        if self.turns.len() > self.capacity {
            self.turns.drain(..2);
        }
    }

    /// Committed turns, oldest first.
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Number of committed turns.
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// True when nothing has been committed yet.
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Retention cap in turns.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
