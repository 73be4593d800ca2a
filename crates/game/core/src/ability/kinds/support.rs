use crate::ability::{AbilityBehavior, AbilityContext, AbilityInstance, AbilityKind, AbilityTarget};
use crate::config::GameRules;
use crate::state::{AbilityRef, UnitId};

/// Projects the ability's shield pool onto another unit.
///
/// Damage to the protected unit drains `pool` before anything else. The pool
/// only regenerates while nothing is being protected.
pub struct ShieldProject;

impl ShieldProject {
    fn release(ctx: &mut AbilityContext<'_>, ability: &mut AbilityInstance) {
        ctx.state.relations.release_shield(AbilityRef {
            unit: ctx.user,
            slot: ctx.slot,
        });
        if ability.link.take().is_some() {
            ctx.end_effect(AbilityKind::ShieldProject);
        }
    }
}

impl AbilityBehavior for ShieldProject {
    fn init(&self, ability: &mut AbilityInstance, rules: &GameRules) {
        ability.pool = rules.shield_project_max_pool;
    }

    fn on_activate(
        &self,
        ctx: &mut AbilityContext<'_>,
        ability: &mut AbilityInstance,
        target: AbilityTarget,
    ) {
        let Some(protected) = ctx.target_unit(target).map(|u| u.id) else {
            return;
        };
        if ability.pool <= 0.0 {
            tracing::debug!(unit = %ctx.user, "shield pool empty");
            return;
        }

        Self::release(ctx, ability);
        ctx.state.relations.project_shield(
            protected,
            AbilityRef {
                unit: ctx.user,
                slot: ctx.slot,
            },
        );
        ability.link = Some(protected);
        ctx.spawn_effect(AbilityKind::ShieldProject, target);
    }

    fn on_tick(&self, ctx: &mut AbilityContext<'_>, ability: &mut AbilityInstance, dt: f32) {
        match ability.link {
            Some(protected) => {
                let alive = ctx.state.unit(protected).is_some_and(|u| u.is_alive());
                if !alive || ability.pool <= 0.0 {
                    Self::release(ctx, ability);
                }
            }
            None => {
                let rules = ctx.rules();
                ability.pool = (ability.pool + rules.shield_project_regen_per_second * dt)
                    .clamp(0.0, rules.shield_project_max_pool);
            }
        }
    }

    fn on_end(&self, ctx: &mut AbilityContext<'_>, ability: &mut AbilityInstance) {
        Self::release(ctx, ability);
        ability.deactivate();
    }
}

/// Restores armor to the user and every ally around it.
pub struct HealField;

impl AbilityBehavior for HealField {
    fn on_activate(
        &self,
        ctx: &mut AbilityContext<'_>,
        _ability: &mut AbilityInstance,
        target: AbilityTarget,
    ) {
        let Some((center, team)) = ctx.user_unit().map(|u| (u.position, u.team)) else {
            return;
        };
        let rules = ctx.rules();

        let allies: Vec<UnitId> = ctx
            .state
            .units_within(center, rules.heal_field_radius)
            .filter(|u| u.team.is_allied_with(team))
            .map(|u| u.id)
            .collect();
        for id in &allies {
            if let Some(unit) = ctx.state.unit_mut(*id) {
                unit.vitals.armor.restore(rules.heal_field_armor);
            }
        }
        ctx.spawn_effect(AbilityKind::HealField, target);
        tracing::debug!(unit = %ctx.user, healed = allies.len(), "heal field");
    }
}
