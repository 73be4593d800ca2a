//! Fixed-step battle loop: spawn the roster, replay the script, tick.

use std::collections::BTreeSet;

use armada_content::Scenario;
use armada_core::{
    EffectLog, EffectRequest, ErrorSeverity, GameError, SimContext, SimEngine, Team, UnitId,
    UnitSnapshot, UseOutcome, WorldState,
};
use tracing::Level;

use crate::config::SimConfig;

/// Outcome of one run.
#[derive(Clone, Debug)]
pub struct BattleReport {
    pub scenario: String,
    /// Simulated (time-scaled) seconds.
    pub elapsed: f32,
    pub steps: u32,
    pub orders_applied: usize,
    pub orders_ignored: usize,
    pub orders_rejected: usize,
    pub survivors: Vec<UnitSnapshot>,
    pub destroyed: Vec<UnitId>,
    pub effects: EffectLog,
}

impl BattleReport {
    /// Teams with at least one unit left.
    pub fn standing_teams(&self) -> BTreeSet<Team> {
        self.survivors.iter().map(|u| u.team).collect()
    }

    pub fn swarms_deployed(&self) -> usize {
        self.effects
            .requests
            .iter()
            .filter(|r| matches!(r, EffectRequest::SwarmDeployed { .. }))
            .count()
    }

    pub fn log_summary(&self) {
        tracing::info!(
            scenario = %self.scenario,
            elapsed = self.elapsed,
            steps = self.steps,
            "battle finished"
        );
        tracing::info!(
            applied = self.orders_applied,
            ignored = self.orders_ignored,
            rejected = self.orders_rejected,
            "orders"
        );
        tracing::info!(
            hits = self.effects.hits.len(),
            effect_requests = self.effects.requests.len(),
            swarms = self.swarms_deployed(),
            "effects"
        );
        for unit in &self.survivors {
            let statuses: Vec<&str> = unit.statuses.iter().map(|s| s.name).collect();
            tracing::info!(
                unit = %unit.id,
                team = unit.team.0,
                health = unit.vitals.health.current,
                armor = unit.vitals.armor.current,
                shield = unit.vitals.shield.current,
                ?statuses,
                "survivor"
            );
        }
        for id in &self.destroyed {
            tracing::info!(unit = %id, "destroyed");
        }
    }
}

/// Runs `scenario` until `config.duration` simulated seconds have passed or
/// only one team is left with no orders outstanding.
pub fn run(
    context: &SimContext,
    scenario: &Scenario,
    config: &SimConfig,
) -> anyhow::Result<BattleReport> {
    let mut world = WorldState::new();
    let mut engine = SimEngine::new(&mut world, context.env());
    let mut effects = EffectLog::new();

    let ids: Vec<UnitId> = scenario
        .unit_specs()
        .map(|spec| engine.spawn_unit(&spec))
        .collect();
    let schedule = scenario.resolve(&ids)?;
    let mut pending = schedule.into_iter().peekable();

    let (mut applied, mut ignored, mut rejected) = (0, 0, 0);
    let mut steps = 0;

    while engine.state().elapsed() < config.duration {
        let now = engine.state().elapsed();
        while let Some(order) = pending.next_if(|o| o.at <= now) {
            match engine.execute(order.intent, &mut effects) {
                Ok(UseOutcome::Activated) => {
                    applied += 1;
                    tracing::debug!(at = now, intent = ?order.intent, "order applied");
                }
                Ok(UseOutcome::Ignored(reason)) => {
                    ignored += 1;
                    tracing::debug!(at = now, intent = ?order.intent, ?reason, "order ignored");
                }
                Err(e) => {
                    rejected += 1;
                    let code = e.error_code();
                    let severity = e.severity().as_str();
                    let level = rejection_level(e.severity());
                    if level == Level::DEBUG {
                        tracing::debug!(at = now, code, severity, "order rejected: {}", e);
                    } else if level == Level::WARN {
                        tracing::warn!(at = now, code, severity, "order rejected: {}", e);
                    } else {
                        tracing::error!(at = now, code, severity, "order rejected: {}", e);
                    }
                }
            }
        }

        engine.tick(config.timestep, &mut effects);
        steps += 1;

        let teams: BTreeSet<Team> = engine.state().units().map(|u| u.team).collect();
        if teams.len() <= 1 && pending.peek().is_none() {
            tracing::info!(at = engine.state().elapsed(), "battle decided");
            break;
        }
    }

    let (survivors, destroyed): (Vec<UnitId>, Vec<UnitId>) = ids
        .iter()
        .copied()
        .partition(|id| engine.state().unit(*id).is_some());

    Ok(BattleReport {
        scenario: scenario.name.clone(),
        elapsed: engine.state().elapsed(),
        steps,
        orders_applied: applied,
        orders_ignored: ignored,
        orders_rejected: rejected,
        survivors: survivors
            .into_iter()
            .filter_map(|id| engine.snapshot(id))
            .collect(),
        destroyed,
        effects,
    })
}

/// Log level for a rejected scripted order.
///
/// Orders that simply found nothing to act on are routine; malformed orders
/// point at the scenario file and internal errors at the engine.
fn rejection_level(severity: ErrorSeverity) -> Level {
    if severity.is_recoverable() {
        Level::DEBUG
    } else if severity.is_internal() {
        Level::ERROR
    } else {
        Level::WARN
    }
}
