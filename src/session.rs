use crate::problem::Problem;

/// Identifier for one problem row. Monotonic per session, so it can never
/// collide and stale references to earlier rows compare unequal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryId(u64);

/// One row in the session: a problem and whether it has been solved.
#[derive(Debug, Clone)]
pub struct ProblemEntry {
    pub id: EntryId,
    pub problem: Problem,
    pub answered: bool,
}

/// Ordered record of the problems presented so far. The current entry is
/// always the most recently added one; there is no navigation back.
#[derive(Debug, Clone)]
pub struct Session {
    entries: Vec<ProblemEntry>,
    current_id: Option<EntryId>,
    solved: usize,
    next_id: u64,
    total_problems: usize,
}

impl Session {
    pub fn new(total_problems: usize) -> Self {
        Self {
            entries: Vec::new(),
            current_id: None,
            solved: 0,
            next_id: 0,
            total_problems,
        }
    }

    /// Drop all entries and counters. Idempotent.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.current_id = None;
        self.solved = 0;
        self.next_id = 0;
    }

    /// Append a fresh unanswered entry and make it current.
    pub fn add_problem(&mut self, problem: Problem) -> EntryId {
        let id = EntryId(self.next_id);
        self.next_id += 1;
        self.entries.push(ProblemEntry {
            id,
            problem,
            answered: false,
        });
        self.current_id = Some(id);
        id
    }

    pub fn current(&self) -> Option<&ProblemEntry> {
        let id = self.current_id?;
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn current_id(&self) -> Option<EntryId> {
        self.current_id
    }

    /// Mark the matching entry answered and bump the solved counter, as one
    /// operation so the two can never drift apart. Returns false (and leaves
    /// state untouched) for an unknown or already-answered id.
    pub fn record_solved(&mut self, id: EntryId) -> bool {
        match self.entries.iter_mut().find(|e| e.id == id) {
            Some(entry) if !entry.answered => {
                entry.answered = true;
                self.solved += 1;
                true
            }
            _ => false,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.solved >= self.total_problems
    }

    pub fn solved_count(&self) -> usize {
        self.solved
    }

    pub fn total_problems(&self) -> usize {
        self.total_problems
    }

    pub fn entries(&self) -> &[ProblemEntry] {
        &self.entries
    }
}
