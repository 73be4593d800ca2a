//! Fighter group movement and engagement.

use crate::combat::{Battlefield, CombatWorld, DamageType};
use crate::env::{EffectRequest, EffectSink, SimEnv};
use crate::state::{FighterGroup, SwarmHandle, TargetRef, UnitId, WorldState};
use crate::status::{StatusInstance, StatusKind};

/// Advances every fighter group, then removes the destroyed ones.
///
/// A group flies toward its target until it is within the interact radius.
/// Engaged on an enemy, it damages the unit and registers as its attacker.
/// Engaged on an ally, it grants `SwarmResist` and fights the first enemy
/// group attacking that ally. A group whose target is gone returns to its
/// owner.
pub(super) fn tick_swarms(
    state: &mut WorldState,
    env: SimEnv<'_>,
    effects: &mut dyn EffectSink,
    dt: f32,
) {
    for handle in state.swarms.handles() {
        step_group(state, env, handle, dt);
    }

    for handle in state.swarms.handles() {
        if state.swarms.get(handle).is_some_and(FighterGroup::is_destroyed) {
            state.remove_swarm(handle);
            effects.request(EffectRequest::SwarmDestroyed { swarm: handle });
            tracing::debug!(swarm = ?handle, "fighter group destroyed");
        }
    }
}

fn step_group(state: &mut WorldState, env: SimEnv<'_>, handle: SwarmHandle, dt: f32) {
    let rules = env.rules();
    let Some((owner, team, mut aim)) = state
        .swarms
        .get(handle)
        .filter(|g| !g.is_destroyed())
        .map(|g| (g.owner, g.team, g.target))
    else {
        return;
    };

    let alive = |state: &WorldState, id: UnitId| state.unit(id).is_some_and(|u| u.is_alive());
    if !alive(state, aim) {
        if aim == owner || !alive(state, owner) {
            return;
        }
        state.retarget_swarm(handle, owner);
        aim = owner;
    }
    let Some((goal, goal_team)) = state.unit(aim).map(|u| (u.position, u.team)) else {
        return;
    };

    let Some(group) = state.swarms.get_mut(handle) else {
        return;
    };
    let offset = goal - group.position;
    let gap = offset.length() - rules.swarm_interact_radius;
    if gap > 0.0 {
        let step = (rules.swarm_speed * dt).min(gap);
        group.position += offset.normalize_or_zero() * step;
        if step < gap {
            return;
        }
    }

    let amount = rules.swarm_dps * dt;
    if team.is_allied_with(goal_team) {
        state.apply_status(
            aim,
            StatusInstance::new(StatusKind::SwarmResist, Some(TargetRef::Swarm(handle))),
        );
        if let Some(&attacker) = state.relations.attackers(aim).first() {
            Battlefield::new(state, env).damage(
                TargetRef::Swarm(attacker),
                amount,
                0.0,
                DamageType::Swarm,
            );
        }
    } else {
        state.relations.add_attacker(aim, handle);
        Battlefield::new(state, env).damage(TargetRef::Unit(aim), amount, 0.0, DamageType::Swarm);
    }
}
