use crate::ability::{AbilityBehavior, AbilityContext, AbilityInstance, AbilityKind, AbilityTarget};
use crate::config::GameRules;
use crate::state::{TargetRef, UnitId};
use crate::status::{StatusInstance, StatusKind};

/// Toggle field that keeps `ArmorMelt` on every enemy in range while engaged.
pub struct ArmorDrain;

impl AbilityBehavior for ArmorDrain {
    fn on_activate(
        &self,
        ctx: &mut AbilityContext<'_>,
        ability: &mut AbilityInstance,
        _target: AbilityTarget,
    ) {
        ctx.set_active(AbilityKind::ArmorDrain, ability.is_active());
    }

    fn on_tick(&self, ctx: &mut AbilityContext<'_>, ability: &mut AbilityInstance, _dt: f32) {
        if !ability.is_active() {
            return;
        }
        let Some(user) = ctx.user_unit() else {
            return;
        };
        let (center, team) = (user.position, user.team);
        let radius = ctx.rules().armor_drain_radius;

        let victims: Vec<UnitId> = ctx
            .state
            .units_within(center, radius)
            .filter(|u| !u.team.is_allied_with(team))
            .map(|u| u.id)
            .collect();
        let source = Some(TargetRef::Unit(ctx.user));
        for id in victims {
            ctx.state
                .apply_status(id, StatusInstance::new(StatusKind::ArmorMelt, source));
        }
    }

    fn on_end(&self, ctx: &mut AbilityContext<'_>, ability: &mut AbilityInstance) {
        if ability.is_active() {
            ability.deactivate();
            ctx.set_active(AbilityKind::ArmorDrain, false);
        }
        ctx.end_effect(AbilityKind::ArmorDrain);
    }
}

/// Passive armor regeneration, faster the more armor is missing.
pub struct ArmorRegen;

/// Regeneration bracket for an armor fraction: one bracket per missing fifth.
pub fn regen_bracket(armor_fraction: f32) -> usize {
    let brackets = GameRules::ARMOR_REGEN_BRACKETS as f32;
    let index = (brackets * (1.0 - armor_fraction)).ceil() as i32 - 1;
    index.clamp(0, GameRules::ARMOR_REGEN_BRACKETS as i32 - 1) as usize
}

impl AbilityBehavior for ArmorRegen {
    fn on_activate(
        &self,
        _ctx: &mut AbilityContext<'_>,
        _ability: &mut AbilityInstance,
        _target: AbilityTarget,
    ) {
    }

    fn on_tick(&self, ctx: &mut AbilityContext<'_>, _ability: &mut AbilityInstance, dt: f32) {
        let rates = ctx.rules().armor_regen_per_second;
        let Some(unit) = ctx.state.unit_mut(ctx.user).filter(|u| u.is_alive()) else {
            return;
        };
        let armor = &mut unit.vitals.armor;
        if armor.maximum <= 0.0 {
            return;
        }
        let bracket = regen_bracket(armor.current / armor.maximum);
        armor.restore(rates[bracket] * dt);
    }

    fn on_end(&self, _ctx: &mut AbilityContext<'_>, _ability: &mut AbilityInstance) {}
}
