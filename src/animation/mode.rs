use super::progress::TreeMode;

/// Owner of the user-selected mode.
///
/// The engine holds exactly one of these and hands the current mode to the
/// simulation every frame. Changing the mode only retargets the progress
/// scalars; it never interrupts or resets them.
#[derive(Debug, Clone, Default)]
pub struct ModeSelector {
    current: TreeMode,
}

impl ModeSelector {
    pub fn new(initial: TreeMode) -> Self {
        Self { current: initial }
    }

    pub fn current(&self) -> TreeMode {
        self.current
    }

    /// Select a mode. Returns false when it was already active.
    pub fn select(&mut self, mode: TreeMode) -> bool {
        if self.current == mode {
            return false;
        }
        log::info!("mode {} -> {}", self.current.as_str(), mode.as_str());
        self.current = mode;
        true
    }
}
