#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Reveal {
    #[default]
    Question,
    Answer,
}

impl Reveal {
    pub fn toggled(self) -> Self {
        match self {
            Reveal::Question => Reveal::Answer,
            Reveal::Answer => Reveal::Question,
        }
    }
}

/// Which clue, if any, is open in the detail view.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    Idle,
    Open { clue_id: i64, reveal: Reveal },
}

impl Selection {
    /// Opening always starts on the question, even when replacing another
    /// open clue.
    pub fn select(self, clue_id: i64) -> Self {
        Selection::Open {
            clue_id,
            reveal: Reveal::Question,
        }
    }

    pub fn toggle_reveal(self) -> Self {
        match self {
            Selection::Idle => Selection::Idle,
            Selection::Open { clue_id, reveal } => Selection::Open {
                clue_id,
                reveal: reveal.toggled(),
            },
        }
    }

    pub fn close(self) -> Self {
        Selection::Idle
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Selection::Open { .. })
    }

    pub fn clue_id(&self) -> Option<i64> {
        match self {
            Selection::Open { clue_id, .. } => Some(*clue_id),
            Selection::Idle => None,
        }
    }

    pub fn reveal(&self) -> Option<Reveal> {
        match self {
            Selection::Open { reveal, .. } => Some(*reveal),
            Selection::Idle => None,
        }
    }
}
