//! Cooldown timers polled against the millisecond clock.

use crate::config::PlayerTuning;

/// What a timer does when it runs out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerAction {
    UseTool,
    PlantSeed,
    Interact,
}

/// A one-shot countdown. It fires its action once on expiry, then goes
/// inactive until activated again.
#[derive(Debug, Clone, PartialEq)]
pub struct CooldownTimer {
    duration_ms: u64,
    started_at: Option<u64>,
    action: Option<TimerAction>,
}

impl CooldownTimer {
    pub fn new(duration_ms: u64, action: Option<TimerAction>) -> Self {
        Self {
            duration_ms,
            started_at: None,
            action,
        }
    }

    /// Starts (or restarts) the countdown from zero elapsed.
    pub fn activate(&mut self, now_ms: u64) {
        self.started_at = Some(now_ms);
    }

    /// Cancels the countdown without firing.
    pub fn deactivate(&mut self) {
        self.started_at = None;
    }

    pub fn is_active(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    /// Returns the bound action when the countdown has just expired.
    pub fn update(&mut self, now_ms: u64) -> Option<TimerAction> {
        let started = self.started_at?;
        if now_ms.saturating_sub(started) < self.duration_ms {
            return None;
        }
        self.started_at = None;
        self.action
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerTimers {
    pub tool_use: CooldownTimer,
    pub tool_switch: CooldownTimer,
    pub seed_use: CooldownTimer,
    pub interact: CooldownTimer,
}

impl PlayerTimers {
    pub fn new(tuning: &PlayerTuning) -> Self {
        Self {
            tool_use: CooldownTimer::new(tuning.tool_use_ms, Some(TimerAction::UseTool)),
            tool_switch: CooldownTimer::new(tuning.tool_switch_ms, None),
            seed_use: CooldownTimer::new(tuning.seed_use_ms, Some(TimerAction::PlantSeed)),
            interact: CooldownTimer::new(tuning.interact_ms, Some(TimerAction::Interact)),
        }
    }

    /// Polls every timer and collects the actions that fired this tick.
    pub fn update(&mut self, now_ms: u64) -> Vec<TimerAction> {
        [
            &mut self.tool_use,
            &mut self.tool_switch,
            &mut self.seed_use,
            &mut self.interact,
        ]
        .into_iter()
        .filter_map(|timer| timer.update(now_ms))
        .collect()
    }
}
