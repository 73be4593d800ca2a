//! Instant-hit shot resolution.

use glam::Vec3;

use crate::config::GameRules;
use crate::env::{EffectSink, HitCue};
use crate::state::{TargetRef, Team, UnitId};
use crate::status::{StatusInstance, StatusKind};

use super::damage::{DamageResult, DamageType};
use super::trace::{CollisionOracle, Ray, RayHit};
use super::world::CombatWorld;

/// A single instant-hit shot.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hitscan {
    pub origin: Vec3,
    /// Normalized firing direction.
    pub direction: Vec3,
    pub from: UnitId,
    /// Team of the firing unit, captured at fire time.
    pub team: Team,
    pub damage: f32,
    pub range: f32,
    pub damage_type: DamageType,
    /// Seconds the beam visual lingers.
    pub lifetime: f32,
    /// Status attached to a unit hit in traced mode.
    pub status: Option<StatusInstance>,
}

impl Hitscan {
    pub fn new(from: UnitId, team: Team, origin: Vec3, direction: Vec3, damage: f32, range: f32) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
            from,
            team,
            damage,
            range,
            damage_type: DamageType::Kinetic,
            lifetime: 0.1,
            status: None,
        }
    }

    pub fn with_damage_type(mut self, damage_type: DamageType) -> Self {
        self.damage_type = damage_type;
        self
    }

    pub fn with_status(mut self, status: StatusInstance) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_lifetime(mut self, lifetime: f32) -> Self {
        self.lifetime = lifetime;
        self
    }

    pub fn ray(&self) -> Ray {
        Ray {
            origin: self.origin,
            direction: self.direction,
            max_distance: self.range,
        }
    }
}

/// What a shot ended on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HitOutcome {
    /// The known goal was hit directly.
    Goal,
    Enemy,
    /// Allied unit, damaged at the friendly-fire multiplier.
    Ally,
    Terrain,
    /// The firing unit's own collider; nothing happens.
    PassedThroughSelf,
    Miss,
}

/// Result of resolving one shot.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HitResolution {
    /// Visual beam length.
    pub length: f32,
    pub outcome: HitOutcome,
    pub target: Option<TargetRef>,
    pub damage: DamageResult,
}

impl HitResolution {
    fn inert(length: f32, outcome: HitOutcome) -> Self {
        Self {
            length,
            outcome,
            target: None,
            damage: DamageResult::NONE,
        }
    }
}

/// Resolves a shot, directly when `goal` still exists and by tracing otherwise.
pub fn resolve_hitscan<W, C>(
    scan: &Hitscan,
    goal: Option<TargetRef>,
    world: &mut W,
    collision: &C,
    effects: &mut dyn EffectSink,
    rules: &GameRules,
) -> HitResolution
where
    W: CombatWorld + ?Sized,
    C: CollisionOracle + ?Sized,
{
    if let Some(goal) = goal.filter(|goal| world.target_info(*goal).is_some()) {
        return resolve_direct(scan, goal, world, effects);
    }
    let hit = collision.raycast(&scan.ray());
    resolve_traced(scan, hit, world, effects, rules)
}

/// Hits `goal` at exactly the distance to it, ignoring colliders in between.
pub fn resolve_direct<W>(
    scan: &Hitscan,
    goal: TargetRef,
    world: &mut W,
    effects: &mut dyn EffectSink,
) -> HitResolution
where
    W: CombatWorld + ?Sized,
{
    let Some(info) = world.target_info(goal) else {
        return HitResolution::inert(scan.range, HitOutcome::Miss);
    };

    let length = (scan.origin - info.position).length();
    let damage = world.damage(goal, scan.damage, length, scan.damage_type);
    effects.hit(
        HitCue::Near,
        scan.origin + scan.direction * length,
        scan.direction,
        scan.team,
    );

    HitResolution {
        length,
        outcome: HitOutcome::Goal,
        target: Some(goal),
        damage,
    }
}

/// Resolves a shot against the first collider along its ray.
///
/// A unit hit has the shot's status attached before damage is applied
/// (a `SuperlaserMark` stores the shot's damage as its value). Allies take
/// `friendly_fire_damage_mult` of the damage. The visual end is pulled back
/// `hit_offset` from the hit point.
pub fn resolve_traced<W>(
    scan: &Hitscan,
    hit: Option<RayHit>,
    world: &mut W,
    effects: &mut dyn EffectSink,
    rules: &GameRules,
) -> HitResolution
where
    W: CombatWorld + ?Sized,
{
    let Some(hit) = hit else {
        return HitResolution::inert(scan.range, HitOutcome::Miss);
    };
    if hit.unit == Some(scan.from) {
        return HitResolution::inert(scan.range, HitOutcome::PassedThroughSelf);
    }

    let end = hit.point - scan.direction * rules.hit_offset;
    let normal = -scan.direction;
    let length = (scan.origin - end).length();

    let target = hit.unit.map(TargetRef::Unit);
    let Some((id, info)) = hit
        .unit
        .and_then(|id| world.target_info(TargetRef::Unit(id)).map(|info| (id, info)))
    else {
        effects.hit(HitCue::Normal, end, normal, scan.team);
        return HitResolution::inert(length, HitOutcome::Terrain);
    };

    if let Some(mut status) = scan.status {
        if status.kind == StatusKind::SuperlaserMark {
            status.set_time_left(scan.damage);
        }
        world.attach_status(id, status);
    }

    let actual_range = (hit.point - scan.origin).length();
    let (amount, outcome) = if info.team.is_allied_with(scan.team) {
        (scan.damage * rules.friendly_fire_damage_mult, HitOutcome::Ally)
    } else {
        (scan.damage, HitOutcome::Enemy)
    };
    let damage = world.damage(TargetRef::Unit(id), amount, actual_range, scan.damage_type);

    let shielded = world
        .target_info(TargetRef::Unit(id))
        .is_some_and(|after| after.shield > 0.0);
    let cue = if shielded { HitCue::Absorbed } else { HitCue::Normal };
    effects.hit(cue, end, normal, scan.team);

    HitResolution {
        length,
        outcome,
        target,
        damage,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::combat::TargetInfo;
    use crate::env::EffectLog;
    use crate::status::ApplyOutcome;

    /// Records damage and statuses instead of applying a damage model.
    #[derive(Default)]
    struct Dummies {
        targets: BTreeMap<u32, TargetInfo>,
        damage: Vec<(TargetRef, f32, f32)>,
        statuses: Vec<(UnitId, StatusInstance)>,
    }

    impl Dummies {
        fn with(mut self, id: u32, team: u8, position: Vec3, shield: f32) -> Self {
            self.targets.insert(
                id,
                TargetInfo {
                    position,
                    team: Team(team),
                    shield,
                    alive: true,
                },
            );
            self
        }
    }

    impl CombatWorld for Dummies {
        fn target_info(&self, target: TargetRef) -> Option<TargetInfo> {
            match target {
                TargetRef::Unit(id) => self.targets.get(&id.0).copied(),
                TargetRef::Swarm(_) => None,
            }
        }

        fn damage(&mut self, target: TargetRef, amount: f32, range: f32, _: DamageType) -> DamageResult {
            self.damage.push((target, amount, range));
            DamageResult {
                dealt: amount,
                ..DamageResult::NONE
            }
        }

        fn attach_status(&mut self, unit: UnitId, status: StatusInstance) -> Option<ApplyOutcome> {
            self.statuses.push((unit, status));
            Some(ApplyOutcome::Added)
        }
    }

    fn scan(damage: f32) -> Hitscan {
        Hitscan::new(UnitId(1), Team(0), Vec3::ZERO, Vec3::X, damage, 100.0)
    }

    fn unit_hit(id: u32, at: f32) -> Option<RayHit> {
        Some(RayHit {
            point: Vec3::new(at, 0.0, 0.0),
            distance: at,
            unit: Some(UnitId(id)),
        })
    }

    #[test]
    fn direct_hit_uses_distance_to_goal() {
        let mut world = Dummies::default().with(2, 1, Vec3::new(5.0, 0.0, 0.0), 0.0);
        let mut effects = EffectLog::new();

        let result = resolve_direct(&scan(30.0), TargetRef::Unit(UnitId(2)), &mut world, &mut effects);

        assert_eq!(result.length, 5.0);
        assert_eq!(result.outcome, HitOutcome::Goal);
        assert_eq!(world.damage, vec![(TargetRef::Unit(UnitId(2)), 30.0, 5.0)]);
        assert_eq!(effects.hits.len(), 1);
        assert_eq!(effects.hits[0].cue, HitCue::Near);
        assert_eq!(effects.hits[0].position, Vec3::new(5.0, 0.0, 0.0));
    }

    #[test]
    fn traced_ally_hit_applies_friendly_fire_multiplier() {
        let rules = GameRules::default();
        let mut world = Dummies::default().with(2, 0, Vec3::new(20.0, 0.0, 0.0), 0.0);
        let mut effects = EffectLog::new();

        let result = resolve_traced(&scan(40.0), unit_hit(2, 20.0), &mut world, &mut effects, &rules);

        assert_eq!(result.outcome, HitOutcome::Ally);
        assert_eq!(world.damage.len(), 1);
        assert!((world.damage[0].1 - 10.0).abs() < 1e-6);
        assert!((world.damage[0].2 - 20.0).abs() < 1e-6);
        assert!((result.length - (20.0 - rules.hit_offset)).abs() < 1e-5);
    }

    #[test]
    fn traced_enemy_with_shield_is_cued_absorbed() {
        let rules = GameRules::default();
        let mut world = Dummies::default().with(2, 1, Vec3::new(20.0, 0.0, 0.0), 50.0);
        let mut effects = EffectLog::new();

        let result = resolve_traced(&scan(40.0), unit_hit(2, 20.0), &mut world, &mut effects, &rules);

        assert_eq!(result.outcome, HitOutcome::Enemy);
        assert_eq!(world.damage[0].1, 40.0);
        assert_eq!(effects.hits[0].cue, HitCue::Absorbed);
        assert_eq!(effects.hits[0].normal, -Vec3::X);
    }

    #[test]
    fn self_hit_is_inert_and_reports_full_range() {
        let rules = GameRules::default();
        let mut world = Dummies::default().with(1, 0, Vec3::ZERO, 0.0);
        let mut effects = EffectLog::new();
        let shot = scan(40.0).with_status(StatusInstance::new(StatusKind::ArmorMelt, None));

        let result = resolve_traced(&shot, unit_hit(1, 2.0), &mut world, &mut effects, &rules);

        assert_eq!(result.length, 100.0);
        assert_eq!(result.outcome, HitOutcome::PassedThroughSelf);
        assert!(world.damage.is_empty());
        assert!(world.statuses.is_empty());
        assert!(effects.hits.is_empty());
    }

    #[test]
    fn miss_reports_full_range_without_effects() {
        let rules = GameRules::default();
        let mut world = Dummies::default();
        let mut effects = EffectLog::new();

        let result = resolve_traced(&scan(40.0), None, &mut world, &mut effects, &rules);

        assert_eq!(result.length, 100.0);
        assert_eq!(result.outcome, HitOutcome::Miss);
        assert!(effects.hits.is_empty());
    }

    #[test]
    fn terrain_hit_spawns_normal_cue() {
        let rules = GameRules::default();
        let mut world = Dummies::default();
        let mut effects = EffectLog::new();
        let hit = Some(RayHit {
            point: Vec3::new(7.0, 0.0, 0.0),
            distance: 7.0,
            unit: None,
        });

        let result = resolve_traced(&scan(40.0), hit, &mut world, &mut effects, &rules);

        assert_eq!(result.outcome, HitOutcome::Terrain);
        assert!(world.damage.is_empty());
        assert_eq!(effects.hits[0].cue, HitCue::Normal);
    }

    #[test]
    fn superlaser_mark_stores_shot_damage() {
        let rules = GameRules::default();
        let mut world = Dummies::default().with(2, 1, Vec3::new(20.0, 0.0, 0.0), 0.0);
        let mut effects = EffectLog::new();
        let shot = scan(35.0).with_status(StatusInstance::new(
            StatusKind::SuperlaserMark,
            Some(TargetRef::Unit(UnitId(1))),
        ));

        resolve_traced(&shot, unit_hit(2, 20.0), &mut world, &mut effects, &rules);

        assert_eq!(world.statuses.len(), 1);
        assert_eq!(world.statuses[0].1.time_left(), 35.0);
    }

    #[test]
    fn vanished_goal_falls_back_to_tracing() {
        let rules = GameRules::default();
        let mut world = Dummies::default().with(3, 1, Vec3::new(9.0, 0.0, 0.0), 0.0);
        let mut effects = EffectLog::new();
        let oracle = |_: &Ray| unit_hit(3, 9.0);

        let result = resolve_hitscan(
            &scan(12.0),
            Some(TargetRef::Unit(UnitId(2))),
            &mut world,
            &oracle,
            &mut effects,
            &rules,
        );

        assert_eq!(result.outcome, HitOutcome::Enemy);
        assert_eq!(result.target, Some(TargetRef::Unit(UnitId(3))));
    }
}
