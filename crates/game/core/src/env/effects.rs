use glam::Vec3;

use crate::ability::{AbilityKind, AbilityTarget};
use crate::state::{SwarmHandle, Team, UnitId};

/// Visual classification of a resolved shot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HitCue {
    /// Point-blank hit on a known goal.
    Near,
    /// Unshielded unit or terrain.
    Normal,
    /// Unit with shield remaining.
    Absorbed,
}

/// Lifecycle trigger for an ability's external effect object.
///
/// The core never owns these objects; it only says when they should appear,
/// change state, or go away.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectRequest {
    Spawn {
        owner: UnitId,
        slot: usize,
        kind: AbilityKind,
        target: AbilityTarget,
    },
    SetActive {
        owner: UnitId,
        slot: usize,
        kind: AbilityKind,
        active: bool,
    },
    End {
        owner: UnitId,
        slot: usize,
        kind: AbilityKind,
    },
    SwarmDeployed {
        swarm: SwarmHandle,
        owner: UnitId,
        target: UnitId,
    },
    SwarmDestroyed {
        swarm: SwarmHandle,
    },
}

/// Receiver of visual cues and effect lifecycle requests.
pub trait EffectSink {
    fn hit(&mut self, cue: HitCue, position: Vec3, normal: Vec3, team: Team);

    fn request(&mut self, request: EffectRequest);
}

/// Sink that discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullEffects;

impl EffectSink for NullEffects {
    fn hit(&mut self, _cue: HitCue, _position: Vec3, _normal: Vec3, _team: Team) {}

    fn request(&mut self, _request: EffectRequest) {}
}

/// A recorded hit cue.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HitEvent {
    pub cue: HitCue,
    pub position: Vec3,
    pub normal: Vec3,
    pub team: Team,
}

/// Sink that records everything in order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EffectLog {
    pub hits: Vec<HitEvent>,
    pub requests: Vec<EffectRequest>,
}

impl EffectLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.hits.clear();
        self.requests.clear();
    }

    /// Spawn requests issued for `kind`.
    pub fn spawns_of(&self, kind: AbilityKind) -> usize {
        self.requests
            .iter()
            .filter(|r| matches!(r, EffectRequest::Spawn { kind: k, .. } if *k == kind))
            .count()
    }

    pub fn ends_of(&self, kind: AbilityKind) -> usize {
        self.requests
            .iter()
            .filter(|r| matches!(r, EffectRequest::End { kind: k, .. } if *k == kind))
            .count()
    }
}

impl EffectSink for EffectLog {
    fn hit(&mut self, cue: HitCue, position: Vec3, normal: Vec3, team: Team) {
        self.hits.push(HitEvent {
            cue,
            position,
            normal,
            team,
        });
    }

    fn request(&mut self, request: EffectRequest) {
        self.requests.push(request);
    }
}
