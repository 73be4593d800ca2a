use crate::ability::{AbilityBehavior, AbilityContext, AbilityInstance, AbilityKind, AbilityTarget};
use crate::combat::{CombatWorld, DamageType};
use crate::state::TargetRef;
use crate::status::{StatusInstance, StatusKind};

/// Reactor overload: the unit speeds up and takes a large share of its own
/// maximum health as point-blank damage.
pub struct SelfDestruct;

impl AbilityBehavior for SelfDestruct {
    fn on_activate(
        &self,
        ctx: &mut AbilityContext<'_>,
        _ability: &mut AbilityInstance,
        target: AbilityTarget,
    ) {
        let Some(max_health) = ctx.user_unit().map(|u| u.vitals.health.maximum) else {
            return;
        };
        ctx.spawn_effect(AbilityKind::Default, target);

        let user = ctx.user;
        ctx.state.apply_status(
            user,
            StatusInstance::new(StatusKind::SelfDestructSpeedBuff, Some(TargetRef::Unit(user))),
        );

        let amount = max_health * ctx.rules().self_destruct_health_fraction;
        let result = ctx
            .battlefield()
            .damage(TargetRef::Unit(user), amount, 0.0, DamageType::Reactor);
        tracing::info!(unit = %user, amount, died = result.died, "reactor overload");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ability::kinds::testing::Bench;

    #[test]
    fn overload_costs_a_fraction_of_max_health() {
        let mut bench = Bench::new();
        let user = bench.unit(0, 0.0, &[AbilityKind::Default]);

        bench.with(user, 0, |ctx, ability| {
            SelfDestruct.on_activate(ctx, ability, AbilityTarget::None)
        });

        let unit = bench.state.unit(user).unwrap();
        let expected = 100.0 * (1.0 - bench.rules.self_destruct_health_fraction);
        assert!((unit.vitals.health.current - expected).abs() < 1e-4);
        // point-blank: armor untouched
        assert_eq!(unit.vitals.armor.current, 100.0);
        assert!(unit.statuses.has(StatusKind::SelfDestructSpeedBuff));
        assert_eq!(bench.effects.spawns_of(AbilityKind::Default), 1);
    }
}
