//! Provider fallback state machine.
//!
//! The core is deterministic: every transition is driven by an explicit
//! event or deadline carrying its own timestamp, so behavior is fully
//! testable without a clock. `run` is the thin async shell that feeds it
//! real tile events and timers.

use std::time::{Duration, Instant};

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::providers::TileProvider;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CascadeConfig {
    /// Window in which rapid errors condemn a candidate.
    pub early_window: Duration,
    /// Errors inside the early window needed to condemn, absent successes.
    pub early_error_threshold: u32,
    /// A candidate with zero successful loads after this long is abandoned.
    pub overall_window: Duration,
}

impl Default for CascadeConfig {
    fn default() -> Self {
        Self {
            early_window: Duration::from_secs(5),
            early_error_threshold: 3,
            overall_window: Duration::from_secs(12),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CascadeState {
    /// Candidate `i` is attached and on probation.
    Trying(usize),
    /// Candidate `i` has served at least one tile; timers are disarmed.
    Steady(usize),
    /// Every candidate failed; the reliable fallback is attached with a
    /// darkening overlay.
    FilteredFallback,
}

/// Instruction for the embedding map layer host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayerCommand {
    Attach(TileProvider),
    ApplyOverlayFilter,
    RemoveOverlayFilter,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TileEvent {
    Loaded,
    Error,
}

#[derive(Debug)]
pub struct TileCascade {
    config: CascadeConfig,
    candidates: Vec<TileProvider>,
    fallback: TileProvider,
    state: CascadeState,
    entered_at: Instant,
    state_errors: u32,
    total_loads: u64,
    total_errors: u64,
    overlay_applied: bool,
}

impl TileCascade {
    /// Attach the first candidate (or the fallback when there are none).
    /// The returned commands must be applied before any events are fed in.
    pub fn new(
        candidates: Vec<TileProvider>,
        fallback: TileProvider,
        config: CascadeConfig,
        now: Instant,
    ) -> (Self, Vec<LayerCommand>) {
        let mut cascade = Self {
            config,
            candidates,
            fallback,
            state: CascadeState::FilteredFallback,
            entered_at: now,
            state_errors: 0,
            total_loads: 0,
            total_errors: 0,
            overlay_applied: false,
        };

        let commands = if cascade.candidates.is_empty() {
            cascade.enter_fallback()
        } else {
            cascade.state = CascadeState::Trying(0);
            vec![LayerCommand::Attach(cascade.candidates[0].clone())]
        };
        (cascade, commands)
    }

    pub fn state(&self) -> CascadeState {
        self.state
    }

    pub fn active_provider(&self) -> &TileProvider {
        match self.state {
            CascadeState::Trying(i) | CascadeState::Steady(i) => &self.candidates[i],
            CascadeState::FilteredFallback => &self.fallback,
        }
    }

    /// Aggregate (loads, errors) across all providers.
    pub fn load_counts(&self) -> (u64, u64) {
        (self.total_loads, self.total_errors)
    }

    pub fn on_event(&mut self, event: TileEvent, now: Instant) -> Vec<LayerCommand> {
        match event {
            TileEvent::Loaded => self.on_tile_loaded(now),
            TileEvent::Error => self.on_tile_error(now),
        }
    }

    /// A tile rendered successfully: the attached candidate is good.
    pub fn on_tile_loaded(&mut self, _now: Instant) -> Vec<LayerCommand> {
        self.total_loads += 1;

        let CascadeState::Trying(i) = self.state else {
            return Vec::new();
        };
        debug!(provider = %self.candidates[i].name, "tile provider confirmed");
        self.state = CascadeState::Steady(i);
        self.state_errors = 0;

        if self.overlay_applied {
            self.overlay_applied = false;
            vec![LayerCommand::RemoveOverlayFilter]
        } else {
            Vec::new()
        }
    }

    /// A tile failed to load. Enough early errors with no successes
    /// condemn the candidate on the spot.
    pub fn on_tile_error(&mut self, now: Instant) -> Vec<LayerCommand> {
        self.total_errors += 1;

        let CascadeState::Trying(_) = self.state else {
            return Vec::new();
        };
        self.state_errors += 1;

        let within_early_window = now < self.entered_at + self.config.early_window;
        if within_early_window && self.state_errors >= self.config.early_error_threshold {
            return self.advance(now);
        }
        Vec::new()
    }

    /// The next instant at which `on_deadline` must be called, if any.
    /// Steady and fallback states have no pending timers.
    pub fn next_deadline(&self) -> Option<Instant> {
        match self.state {
            CascadeState::Trying(_) => Some(self.entered_at + self.config.overall_window),
            CascadeState::Steady(_) | CascadeState::FilteredFallback => None,
        }
    }

    /// The overall window elapsed with zero successful loads.
    pub fn on_deadline(&mut self, now: Instant) -> Vec<LayerCommand> {
        let CascadeState::Trying(i) = self.state else {
            return Vec::new();
        };
        if now < self.entered_at + self.config.overall_window {
            return Vec::new();
        }
        warn!(
            provider = %self.candidates[i].name,
            "no tiles served within the overall window"
        );
        self.advance(now)
    }

    /// Re-run the cascade from the first candidate, e.g. after a network
    /// recovery. An active overlay stays until a candidate succeeds.
    pub fn restart(&mut self, now: Instant) -> Vec<LayerCommand> {
        if self.candidates.is_empty() {
            return Vec::new();
        }
        self.state = CascadeState::Trying(0);
        self.entered_at = now;
        self.state_errors = 0;
        vec![LayerCommand::Attach(self.candidates[0].clone())]
    }

    fn advance(&mut self, now: Instant) -> Vec<LayerCommand> {
        let CascadeState::Trying(i) = self.state else {
            return Vec::new();
        };

        let next = i + 1;
        if next < self.candidates.len() {
            info!(
                abandoned = %self.candidates[i].name,
                next = %self.candidates[next].name,
                "switching tile provider"
            );
            self.state = CascadeState::Trying(next);
            self.entered_at = now;
            self.state_errors = 0;
            vec![LayerCommand::Attach(self.candidates[next].clone())]
        } else {
            warn!("all tile providers failed; using filtered fallback");
            self.enter_fallback()
        }
    }

    fn enter_fallback(&mut self) -> Vec<LayerCommand> {
        self.state = CascadeState::FilteredFallback;
        self.state_errors = 0;

        let mut commands = vec![LayerCommand::Attach(self.fallback.clone())];
        if !self.overlay_applied {
            self.overlay_applied = true;
            commands.push(LayerCommand::ApplyOverlayFilter);
        }
        commands
    }

    /// Drive the state machine with live tile events until the event
    /// stream closes. Emits layer commands as transitions happen.
    pub async fn run(
        mut self,
        mut events: mpsc::Receiver<TileEvent>,
        commands: mpsc::Sender<LayerCommand>,
    ) {
        loop {
            let deadline = self.next_deadline();
            let emitted = tokio::select! {
                event = events.recv() => match event {
                    Some(event) => self.on_event(event, Instant::now()),
                    None => break,
                },
                _ = wait_until(deadline) => {
                    // Trust the timer over the wall clock so paused-time
                    // tests and production behave identically.
                    self.on_deadline(deadline.unwrap_or_else(Instant::now))
                }
            };
            for command in emitted {
                if commands.send(command).await.is_err() {
                    return;
                }
            }
        }
    }
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => {
            let wait = deadline.saturating_duration_since(Instant::now());
            tokio::time::sleep(wait).await;
        }
        None => std::future::pending::<()>().await,
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use pretty_assertions::assert_eq;
    use tokio::sync::mpsc;

    use crate::providers::{default_candidates, fallback_provider};

    use super::{CascadeConfig, CascadeState, LayerCommand, TileCascade, TileEvent};

    fn cascade_at(now: Instant) -> (TileCascade, Vec<LayerCommand>) {
        TileCascade::new(
            default_candidates(),
            fallback_provider(),
            CascadeConfig::default(),
            now,
        )
    }

    fn overlay_count(commands: &[LayerCommand]) -> usize {
        commands
            .iter()
            .filter(|c| **c == LayerCommand::ApplyOverlayFilter)
            .count()
    }

    #[test]
    fn starts_by_attaching_the_first_candidate() {
        let (cascade, commands) = cascade_at(Instant::now());
        assert_eq!(cascade.state(), CascadeState::Trying(0));
        assert_eq!(commands.len(), 1);
        assert!(matches!(&commands[0], LayerCommand::Attach(p) if p.name == "carto-dark"));
    }

    #[test]
    fn three_early_errors_condemn_a_candidate() {
        let t0 = Instant::now();
        let (mut cascade, _) = cascade_at(t0);

        assert!(cascade.on_tile_error(t0 + Duration::from_secs(1)).is_empty());
        assert!(cascade.on_tile_error(t0 + Duration::from_secs(2)).is_empty());
        let commands = cascade.on_tile_error(t0 + Duration::from_secs(3));

        assert_eq!(cascade.state(), CascadeState::Trying(1));
        assert!(matches!(&commands[0], LayerCommand::Attach(p) if p.name == "stadia-dark"));
    }

    #[test]
    fn slow_errors_wait_for_the_overall_deadline() {
        let t0 = Instant::now();
        let (mut cascade, _) = cascade_at(t0);

        // Past the early window: error count no longer condemns by itself.
        for s in [6, 7, 8] {
            assert!(cascade.on_tile_error(t0 + Duration::from_secs(s)).is_empty());
        }
        assert_eq!(cascade.state(), CascadeState::Trying(0));

        let deadline = cascade.next_deadline().unwrap();
        assert_eq!(deadline, t0 + Duration::from_secs(12));
        let commands = cascade.on_deadline(deadline);
        assert_eq!(cascade.state(), CascadeState::Trying(1));
        assert_eq!(commands.len(), 1);
    }

    #[test]
    fn one_success_settles_the_candidate() {
        let t0 = Instant::now();
        let (mut cascade, _) = cascade_at(t0);

        cascade.on_tile_error(t0 + Duration::from_secs(1));
        cascade.on_tile_error(t0 + Duration::from_secs(1));
        assert!(cascade.on_tile_loaded(t0 + Duration::from_secs(2)).is_empty());

        assert_eq!(cascade.state(), CascadeState::Steady(0));
        assert_eq!(cascade.next_deadline(), None);

        // Later errors no longer move the state machine.
        assert!(cascade.on_tile_error(t0 + Duration::from_secs(3)).is_empty());
        assert_eq!(cascade.state(), CascadeState::Steady(0));
        assert_eq!(cascade.load_counts(), (1, 3));
    }

    #[test]
    fn exhausting_all_candidates_applies_the_overlay_exactly_once() {
        let t0 = Instant::now();
        let (mut cascade, initial) = cascade_at(t0);
        let mut all_commands = initial;

        let mut now = t0;
        for _ in 0..4 {
            for _ in 0..3 {
                now += Duration::from_millis(200);
                all_commands.extend(cascade.on_tile_error(now));
            }
        }

        assert_eq!(cascade.state(), CascadeState::FilteredFallback);
        assert_eq!(cascade.active_provider().name, "osm-standard");
        assert_eq!(overlay_count(&all_commands), 1);

        // The terminal state has no timers and ignores further errors.
        assert_eq!(cascade.next_deadline(), None);
        assert!(cascade.on_tile_error(now + Duration::from_secs(1)).is_empty());
        assert_eq!(cascade.state(), CascadeState::FilteredFallback);
    }

    #[test]
    fn restart_keeps_overlay_until_a_candidate_succeeds() {
        let t0 = Instant::now();
        let (mut cascade, _) = cascade_at(t0);

        let mut now = t0;
        let mut commands = Vec::new();
        for _ in 0..12 {
            now += Duration::from_millis(100);
            commands.extend(cascade.on_tile_error(now));
        }
        assert_eq!(cascade.state(), CascadeState::FilteredFallback);
        assert_eq!(overlay_count(&commands), 1);

        let restart_commands = cascade.restart(now + Duration::from_secs(60));
        assert_eq!(cascade.state(), CascadeState::Trying(0));
        assert_eq!(overlay_count(&restart_commands), 0);

        let loaded = cascade.on_tile_loaded(now + Duration::from_secs(61));
        assert_eq!(loaded, vec![LayerCommand::RemoveOverlayFilter]);
        assert_eq!(cascade.state(), CascadeState::Steady(0));

        // A second exhaustion may re-apply the overlay: it was removed.
        let again = cascade.restart(now + Duration::from_secs(62));
        assert_eq!(again.len(), 1);
    }

    #[test]
    fn empty_candidate_list_goes_straight_to_fallback() {
        let (cascade, commands) = TileCascade::new(
            Vec::new(),
            fallback_provider(),
            CascadeConfig::default(),
            Instant::now(),
        );
        assert_eq!(cascade.state(), CascadeState::FilteredFallback);
        assert_eq!(overlay_count(&commands), 1);
        assert!(matches!(&commands[0], LayerCommand::Attach(p) if p.name == "osm-standard"));
    }

    #[tokio::test(start_paused = true)]
    async fn driver_walks_all_candidates_on_silence() {
        let (cascade, initial) = cascade_at(Instant::now());
        assert_eq!(initial.len(), 1);

        let (_event_tx, event_rx) = mpsc::channel::<TileEvent>(8);
        let (command_tx, mut command_rx) = mpsc::channel(16);
        let driver = tokio::spawn(cascade.run(event_rx, command_tx));

        // With no tile ever loading, the overall window expires once per
        // remaining candidate and then the fallback takes over.
        let mut received = Vec::new();
        while let Some(command) = command_rx.recv().await {
            let done = command == LayerCommand::ApplyOverlayFilter;
            received.push(command);
            if done {
                break;
            }
        }

        let attaches = received
            .iter()
            .filter(|c| matches!(c, LayerCommand::Attach(_)))
            .count();
        assert_eq!(attaches, 4); // three remaining candidates + fallback
        assert_eq!(overlay_count(&received), 1);

        driver.abort();
    }
}
