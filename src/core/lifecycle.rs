//! Run lifecycle: Idle → Running ⇄ Paused → GameOver → Idle.

use std::fmt;
use thiserror::Error;

/// Where a game session currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Before the first start, or after a manual reset.
    #[default]
    Idle,
    Running,
    Paused,
    GameOver,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Idle => "idle",
            Phase::Running => "running",
            Phase::Paused => "paused",
            Phase::GameOver => "game over",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifecycleError {
    #[error("cannot {action} while {from}")]
    IllegalTransition { from: Phase, action: &'static str },
}

/// State machine guarding lifecycle transitions. Illegal requests leave the
/// phase untouched and report an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lifecycle {
    phase: Phase,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    /// Idle or GameOver → Running.
    pub fn start(&mut self) -> Result<(), LifecycleError> {
        match self.phase {
            Phase::Idle | Phase::GameOver => {
                self.phase = Phase::Running;
                Ok(())
            }
            from => Err(LifecycleError::IllegalTransition {
                from,
                action: "start",
            }),
        }
    }

    /// Running ⇄ Paused. Returns the new phase.
    pub fn toggle_pause(&mut self) -> Result<Phase, LifecycleError> {
        self.phase = match self.phase {
            Phase::Running => Phase::Paused,
            Phase::Paused => Phase::Running,
            from => {
                return Err(LifecycleError::IllegalTransition {
                    from,
                    action: "pause",
                })
            }
        };
        Ok(self.phase)
    }

    /// Running → GameOver after a collision or boundary failure.
    pub fn finish(&mut self) -> Result<(), LifecycleError> {
        if self.phase != Phase::Running {
            return Err(LifecycleError::IllegalTransition {
                from: self.phase,
                action: "finish",
            });
        }
        self.phase = Phase::GameOver;
        Ok(())
    }

    /// Any phase → Idle.
    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
    }
}

/// Enabled state of the on-screen controls for a phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlState {
    pub start_enabled: bool,
    pub pause_enabled: bool,
    pub pause_label: &'static str,
}

impl ControlState {
    pub fn for_phase(phase: Phase) -> Self {
        Self {
            start_enabled: matches!(phase, Phase::Idle | Phase::GameOver),
            pause_enabled: matches!(phase, Phase::Running | Phase::Paused),
            pause_label: if phase == Phase::Paused {
                "Resume"
            } else {
                "Pause"
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_idle() {
        assert_eq!(Lifecycle::new().phase(), Phase::Idle);
    }

    #[test]
    fn test_full_cycle() {
        let mut lc = Lifecycle::new();
        lc.start().unwrap();
        assert_eq!(lc.toggle_pause(), Ok(Phase::Paused));
        assert_eq!(lc.toggle_pause(), Ok(Phase::Running));
        lc.finish().unwrap();
        assert_eq!(lc.phase(), Phase::GameOver);
        lc.start().unwrap();
        assert!(lc.is_running());
        lc.reset();
        assert_eq!(lc.phase(), Phase::Idle);
    }

    #[test]
    fn test_pause_illegal_outside_run() {
        let mut lc = Lifecycle::new();
        assert!(lc.toggle_pause().is_err());
        lc.start().unwrap();
        lc.finish().unwrap();
        assert_eq!(
            lc.toggle_pause(),
            Err(LifecycleError::IllegalTransition {
                from: Phase::GameOver,
                action: "pause"
            })
        );
        assert_eq!(lc.phase(), Phase::GameOver);
    }

    #[test]
    fn test_start_illegal_while_running_or_paused() {
        let mut lc = Lifecycle::new();
        lc.start().unwrap();
        assert!(lc.start().is_err());
        lc.toggle_pause().unwrap();
        assert!(lc.start().is_err());
        assert_eq!(lc.phase(), Phase::Paused);
    }

    #[test]
    fn test_finish_only_from_running() {
        let mut lc = Lifecycle::new();
        assert!(lc.finish().is_err());
        lc.start().unwrap();
        lc.toggle_pause().unwrap();
        assert!(lc.finish().is_err());
    }

    #[test]
    fn test_reset_from_any_phase() {
        let mut lc = Lifecycle::new();
        lc.start().unwrap();
        lc.toggle_pause().unwrap();
        lc.reset();
        assert_eq!(lc.phase(), Phase::Idle);
    }

    #[test]
    fn test_error_message() {
        let err = LifecycleError::IllegalTransition {
            from: Phase::Idle,
            action: "pause",
        };
        assert_eq!(err.to_string(), "cannot pause while idle");
    }

    #[test]
    fn test_control_state() {
        let idle = ControlState::for_phase(Phase::Idle);
        assert!(idle.start_enabled && !idle.pause_enabled);
        let running = ControlState::for_phase(Phase::Running);
        assert!(!running.start_enabled && running.pause_enabled);
        assert_eq!(running.pause_label, "Pause");
        assert_eq!(ControlState::for_phase(Phase::Paused).pause_label, "Resume");
        assert!(ControlState::for_phase(Phase::GameOver).start_enabled);
    }
}
