//! Run output: per-tick snapshots and the end-of-run summary.

use serde::Serialize;

use roam_core::{AgentState, NavMode};
use roam_nav::{Simulation, TickReport, Transition};

/// One line of `--format jsonl` output.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Snapshot {
    pub tick: u64,
    pub state: AgentState,
    /// Heading wrapped into `[0, 360)`.
    pub display_heading: f32,
    pub report: Option<TickReport>,
}

impl Snapshot {
    pub fn capture(sim: &Simulation) -> Self {
        Self {
            tick: sim.tick_count(),
            state: *sim.state(),
            display_heading: sim.state().display_heading(),
            report: sim.last_report().copied(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunSummary {
    pub ticks: u64,
    pub cruising: u64,
    pub reversing: u64,
    pub turning: u64,
    /// Ticks whose move was rolled back.
    pub violations: u64,
    pub recoveries: u64,
    pub restarts: u64,
    pub final_state: Option<AgentState>,
}

impl RunSummary {
    /// Fold in the state and report published by one tick.
    pub fn record(&mut self, state: &AgentState, report: &TickReport) {
        self.ticks += 1;
        match state.mode {
            NavMode::Cruising => self.cruising += 1,
            NavMode::RecoveringReverse => self.reversing += 1,
            NavMode::RecoveringTurn => self.turning += 1,
        }
        if report.rolled_back() {
            self.violations += 1;
        }
        match report.transition {
            Some(Transition::EnterRecovery { .. }) => self.recoveries += 1,
            Some(Transition::RestartRecovery) => self.restarts += 1,
            _ => {}
        }
        self.final_state = Some(*state);
    }

    pub fn print(&self) {
        println!("roam run summary");
        println!("================");
        println!();
        println!("Ticks: {}", self.ticks);
        if let Some(state) = &self.final_state {
            println!(
                "Final pose: ({:.2}, {:.2}) heading {:.1} [{}]",
                state.position.x,
                state.position.y,
                state.display_heading(),
                state.mode
            );
        }
        println!();
        println!("Ticks per mode:");
        println!("  cruising            {}", self.cruising);
        println!("  recovering_reverse  {}", self.reversing);
        println!("  recovering_turn     {}", self.turning);
        println!();
        println!("Violations: {}", self.violations);
        println!("Recoveries: {} ({} restarted)", self.recoveries, self.restarts);
    }
}
