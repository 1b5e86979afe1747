use crate::screen::ScreenId;

/// Where the rotation is inside one slide period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// A screen is fully visible.
    Showing,
    /// The fade-out has started; the index advances when the fade ends.
    Transitioning,
}

/// Errors building a rotation from the configured screen list.
#[derive(Debug, PartialEq, Eq)]
pub enum RotationError {
    EmptyScreenList,
    DuplicateScreen(ScreenId),
}

impl std::fmt::Display for RotationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyScreenList => write!(f, "rotation needs at least one screen"),
            Self::DuplicateScreen(id) => write!(f, "screen '{id}' appears more than once"),
        }
    }
}

impl std::error::Error for RotationError {}

/// The active-screen state machine.
///
/// Holds the ordered screen list, the active index, and the transient
/// visibility flag that drives fade transitions. The timed driver calls
/// `begin_fade` when a slide period elapses and `advance` when the fade
/// delay elapses; renderers only read. The index never changes while the
/// screen is fading out, so a renderer cannot observe a mid-fade content
/// swap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rotation {
    screens: Vec<ScreenId>,
    active: usize,
    visible: bool,
    phase: Phase,
}

impl Rotation {
    /// Build a rotation over an ordered, duplicate-free, non-empty screen list.
    pub fn new(screens: Vec<ScreenId>) -> Result<Self, RotationError> {
        if screens.is_empty() {
            return Err(RotationError::EmptyScreenList);
        }
        for (i, id) in screens.iter().enumerate() {
            if screens[..i].contains(id) {
                return Err(RotationError::DuplicateScreen(*id));
            }
        }
        Ok(Self {
            screens,
            active: 0,
            visible: true,
            phase: Phase::Showing,
        })
    }

    pub fn screens(&self) -> &[ScreenId] {
        &self.screens
    }

    /// The screen renderers should draw right now.
    pub fn active_screen(&self) -> ScreenId {
        self.screens[self.active]
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Start the fade-out. No-op if a transition is already in progress.
    pub fn begin_fade(&mut self) {
        if self.phase == Phase::Showing {
            self.visible = false;
            self.phase = Phase::Transitioning;
        }
    }

    /// End the transition: advance to the next screen and fade back in.
    /// No-op unless a fade was started first, so the index can only move
    /// once per transition window.
    pub fn advance(&mut self) {
        if self.phase == Phase::Transitioning {
            self.active = (self.active + 1) % self.screens.len();
            self.visible = true;
            self.phase = Phase::Showing;
        }
    }
}
