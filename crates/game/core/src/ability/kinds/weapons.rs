use crate::ability::{AbilityBehavior, AbilityContext, AbilityInstance, AbilityKind, AbilityTarget};
use crate::combat::{Battlefield, DamageType, Hitscan, resolve_direct};
use crate::state::TargetRef;
use crate::status::StatusKind;

/// Gravity chain tethering another unit. `link` holds the tethered unit.
pub struct Chain;

impl Chain {
    fn release(ctx: &mut AbilityContext<'_>, ability: &mut AbilityInstance) {
        if ability.link.take().is_some() {
            ctx.end_effect(AbilityKind::Chain);
        }
    }
}

impl AbilityBehavior for Chain {
    fn on_activate(
        &self,
        ctx: &mut AbilityContext<'_>,
        ability: &mut AbilityInstance,
        target: AbilityTarget,
    ) {
        let Some(tethered) = ctx
            .target_unit(target)
            .map(|u| u.id)
            .filter(|id| *id != ctx.user)
        else {
            return;
        };
        Self::release(ctx, ability);
        ability.link = Some(tethered);
        ctx.spawn_effect(AbilityKind::Chain, target);
    }

    fn on_tick(&self, ctx: &mut AbilityContext<'_>, ability: &mut AbilityInstance, _dt: f32) {
        let Some(tethered) = ability.link else {
            return;
        };
        let max_length = ctx.rules().chain_max_length;
        let holds = match (ctx.user_unit(), ctx.state.unit(tethered)) {
            (Some(user), Some(other)) => {
                other.is_alive() && user.position.distance(other.position) <= max_length
            }
            _ => false,
        };
        if !holds {
            Self::release(ctx, ability);
        }
    }

    fn on_end(&self, ctx: &mut AbilityContext<'_>, ability: &mut AbilityInstance) {
        Self::release(ctx, ability);
        ability.deactivate();
    }
}

/// Charged beam. Collects every `SuperlaserMark` on the target into one
/// direct hit.
pub struct Superlaser;

impl AbilityBehavior for Superlaser {
    fn on_activate(
        &self,
        ctx: &mut AbilityContext<'_>,
        _ability: &mut AbilityInstance,
        target: AbilityTarget,
    ) {
        let Some((origin, team)) = ctx.user_unit().map(|u| (u.position, u.team)) else {
            return;
        };
        let Some(goal) = ctx.target_unit(target).map(|u| u.id) else {
            return;
        };
        let Some(goal_unit) = ctx.state.unit_mut(goal) else {
            return;
        };
        let stored = goal_unit.statuses.consume(StatusKind::SuperlaserMark);
        let offset = goal_unit.position - origin;

        let damage = ctx.rules().superlaser_damage + stored;
        let scan = Hitscan::new(ctx.user, team, origin, offset, damage, offset.length())
            .with_damage_type(DamageType::Laser);
        ctx.spawn_effect(AbilityKind::Superlaser, target);

        let mut field = Battlefield::new(&mut *ctx.state, ctx.env);
        let result = resolve_direct(&scan, TargetRef::Unit(goal), &mut field, &mut *ctx.effects);
        tracing::info!(
            unit = %ctx.user,
            target = %goal,
            damage,
            stored,
            died = result.damage.died,
            "superlaser fired"
        );
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::ability::kinds::testing::Bench;
    use crate::env::HitCue;
    use crate::state::UnitId;
    use crate::status::StatusInstance;

    #[test]
    fn chain_breaks_when_stretched_too_far() {
        let mut bench = Bench::new();
        let user = bench.unit(0, 0.0, &[AbilityKind::Chain]);
        let enemy = bench.unit(1, 10.0, &[]);

        bench.with(user, 0, |ctx, ability| {
            Chain.on_activate(ctx, ability, AbilityTarget::Unit(enemy));
            Chain.on_tick(ctx, ability, 0.1);
        });
        assert_eq!(bench.ability(user, 0).link, Some(enemy));

        bench.state.unit_mut(enemy).unwrap().position = Vec3::new(100.0, 0.0, 0.0);
        bench.with(user, 0, |ctx, ability| Chain.on_tick(ctx, ability, 0.1));
        assert_eq!(bench.ability(user, 0).link, None);
        assert_eq!(bench.effects.ends_of(AbilityKind::Chain), 1);
    }

    #[test]
    fn chain_refuses_to_tether_self() {
        let mut bench = Bench::new();
        let user = bench.unit(0, 0.0, &[AbilityKind::Chain]);
        bench.with(user, 0, |ctx, ability| {
            Chain.on_activate(ctx, ability, AbilityTarget::Unit(user))
        });
        assert_eq!(bench.ability(user, 0).link, None);
        assert_eq!(bench.effects.spawns_of(AbilityKind::Chain), 0);
    }

    #[test]
    fn superlaser_collects_and_consumes_marks() {
        let mut bench = Bench::new();
        let user = bench.unit(0, 0.0, &[AbilityKind::Superlaser]);
        let enemy = bench.unit(1, 10.0, &[]);
        {
            let unit = bench.state.unit_mut(enemy).unwrap();
            unit.vitals = crate::state::Vitals::new(1000.0, 0.0, 0.0);
            for source in [UnitId(7), UnitId(8)] {
                unit.apply_status(StatusInstance::with_value(
                    StatusKind::SuperlaserMark,
                    Some(TargetRef::Unit(source)),
                    25.0,
                ));
            }
        }

        bench.with(user, 0, |ctx, ability| {
            Superlaser.on_activate(ctx, ability, AbilityTarget::Unit(enemy))
        });

        let unit = bench.state.unit(enemy).unwrap();
        let expected = 1000.0 - (bench.rules.superlaser_damage + 50.0);
        assert!((unit.vitals.health.current - expected).abs() < 1e-3);
        assert!(!unit.statuses.has(StatusKind::SuperlaserMark));
        assert_eq!(bench.effects.hits.len(), 1);
        assert_eq!(bench.effects.hits[0].cue, HitCue::Near);
    }
}
