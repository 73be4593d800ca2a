use crate::ability::{AbilityBehavior, AbilityContext, AbilityInstance, AbilityKind, AbilityTarget};
use crate::config::GameRules;
use crate::env::EffectRequest;
use crate::state::{FighterGroup, TargetRef};
use crate::status::{StatusInstance, StatusKind};

/// Deploys fighter groups. `stacks` counts the deployments left.
pub struct SpawnSwarm;

impl AbilityBehavior for SpawnSwarm {
    fn init(&self, ability: &mut AbilityInstance, rules: &GameRules) {
        ability.stacks = rules.swarm_max_uses;
    }

    fn on_activate(
        &self,
        ctx: &mut AbilityContext<'_>,
        ability: &mut AbilityInstance,
        target: AbilityTarget,
    ) {
        if ability.stacks <= 0 {
            tracing::debug!(unit = %ctx.user, "no fighter groups left to deploy");
            return;
        }
        let Some((position, team)) = ctx.user_unit().map(|u| (u.position, u.team)) else {
            return;
        };
        let aim = ctx.target_unit(target).map_or(ctx.user, |u| u.id);

        let group = FighterGroup::new(ctx.user, ctx.slot, team, position, aim, ctx.rules());
        let swarm = ctx.state.swarms.insert(group);
        ability.stacks -= 1;
        ctx.effects.request(EffectRequest::SwarmDeployed {
            swarm,
            owner: ctx.user,
            target: aim,
        });
        ctx.spawn_effect(AbilityKind::SpawnSwarm, target);

        let user = ctx.user;
        if let Some(unit) = ctx.state.unit_mut(user) {
            if ability.stacks > 0 {
                unit.apply_status(StatusInstance::new(
                    StatusKind::SpawnSwarmSpeedNerf,
                    Some(TargetRef::Unit(user)),
                ));
            } else {
                unit.statuses.remove(StatusKind::SpawnSwarmSpeedNerf);
            }
        }
        tracing::debug!(unit = %user, ?swarm, left = ability.stacks, "fighter group deployed");
    }

    /// Recalls every group this slot deployed.
    fn on_end(&self, ctx: &mut AbilityContext<'_>, ability: &mut AbilityInstance) {
        let (user, slot) = (ctx.user, ctx.slot);
        let owned: Vec<_> = ctx
            .state
            .swarms
            .iter()
            .filter(|(_, g)| g.owner == user && g.owner_slot == slot)
            .map(|(h, _)| h)
            .collect();
        for swarm in owned {
            ctx.state.remove_swarm(swarm);
            ctx.effects.request(EffectRequest::SwarmDestroyed { swarm });
        }
        if let Some(unit) = ctx.state.unit_mut(user) {
            unit.statuses.remove(StatusKind::SpawnSwarmSpeedNerf);
        }
        ability.deactivate();
        ctx.end_effect(AbilityKind::SpawnSwarm);
    }
}

/// Orders every live fighter group of the user onto a new target.
/// `stacks` mirrors the live group count.
pub struct MoveSwarm;

impl AbilityBehavior for MoveSwarm {
    fn on_activate(
        &self,
        ctx: &mut AbilityContext<'_>,
        _ability: &mut AbilityInstance,
        target: AbilityTarget,
    ) {
        let Some(aim) = ctx.target_unit(target).map(|u| u.id) else {
            return;
        };
        for swarm in ctx.state.swarms.owned_by(ctx.user) {
            ctx.state.retarget_swarm(swarm, aim);
        }
        ctx.spawn_effect(AbilityKind::MoveSwarm, target);
    }

    fn on_tick(&self, ctx: &mut AbilityContext<'_>, ability: &mut AbilityInstance, _dt: f32) {
        ability.stacks = ctx.state.swarms.owned_by(ctx.user).len() as i32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ability::kinds::testing::Bench;
    use crate::state::UnitId;

    fn deploy(bench: &mut Bench, user: UnitId, target: UnitId) {
        bench.with(user, 0, |ctx, ability| {
            SpawnSwarm.on_activate(ctx, ability, AbilityTarget::Unit(target))
        });
    }

    #[test]
    fn deployments_use_stacks_and_toggle_speed_nerf() {
        let mut bench = Bench::new();
        let user = bench.unit(0, 0.0, &[AbilityKind::SpawnSwarm]);
        let enemy = bench.unit(1, 30.0, &[]);
        assert_eq!(bench.ability(user, 0).stacks, bench.rules.swarm_max_uses);

        deploy(&mut bench, user, enemy);
        assert_eq!(bench.ability(user, 0).stacks, 2);
        assert!(bench.state.unit(user).unwrap().statuses.has(StatusKind::SpawnSwarmSpeedNerf));

        deploy(&mut bench, user, enemy);
        deploy(&mut bench, user, enemy);
        assert_eq!(bench.ability(user, 0).stacks, 0);
        assert!(!bench.state.unit(user).unwrap().statuses.has(StatusKind::SpawnSwarmSpeedNerf));
        assert_eq!(bench.state.swarms.owned_by(user).len(), 3);

        deploy(&mut bench, user, enemy);
        assert_eq!(bench.state.swarms.len(), 3);
        assert_eq!(bench.ability(user, 0).stacks, 0);
    }

    #[test]
    fn dead_target_makes_the_group_guard_the_user() {
        let mut bench = Bench::new();
        let user = bench.unit(0, 0.0, &[AbilityKind::SpawnSwarm]);
        deploy(&mut bench, user, UnitId(99));
        let (_, group) = bench.state.swarms.iter().next().unwrap();
        assert_eq!(group.target, user);
    }

    #[test]
    fn move_order_retargets_all_groups_and_counts_them() {
        let mut bench = Bench::new();
        let user = bench.unit(0, 0.0, &[AbilityKind::SpawnSwarm, AbilityKind::MoveSwarm]);
        let first = bench.unit(1, 30.0, &[]);
        let second = bench.unit(1, -30.0, &[]);
        deploy(&mut bench, user, first);
        deploy(&mut bench, user, first);

        bench.with(user, 1, |ctx, ability| {
            MoveSwarm.on_activate(ctx, ability, AbilityTarget::Unit(second));
            MoveSwarm.on_tick(ctx, ability, 0.1);
        });

        assert!(bench.state.swarms.iter().all(|(_, g)| g.target == second));
        assert_eq!(bench.ability(user, 1).stacks, 2);
    }

    #[test]
    fn ending_recalls_deployed_groups() {
        let mut bench = Bench::new();
        let user = bench.unit(0, 0.0, &[AbilityKind::SpawnSwarm]);
        let enemy = bench.unit(1, 30.0, &[]);
        deploy(&mut bench, user, enemy);

        bench.with(user, 0, |ctx, ability| SpawnSwarm.on_end(ctx, ability));

        assert!(bench.state.swarms.is_empty());
        assert!(!bench.state.unit(user).unwrap().statuses.has(StatusKind::SpawnSwarmSpeedNerf));
        assert!(
            bench
                .effects
                .requests
                .iter()
                .any(|r| matches!(r, EffectRequest::SwarmDestroyed { .. }))
        );
    }
}
