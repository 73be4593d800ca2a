/// Game rules: tunable combat and ability parameters shared by every unit.
///
/// All fields carry defaults so rule files only need to list what they
/// change.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameRules {
    // ===== time =====
    /// When set, every timer runs at `1 / test_time_mult` speed.
    pub use_test_values: bool,
    pub test_time_mult: f32,

    // ===== projectiles =====
    /// Damage multiplier for shots that resolve against an allied unit.
    pub friendly_fire_damage_mult: f32,
    /// Distance the visual end of a traced shot is pulled back from the hit point.
    pub hit_offset: f32,

    // ===== damage model =====
    /// Fraction of post-shield damage soaked by armor at non-zero range.
    pub armor_absorption: f32,
    /// Multiplier on `armor_absorption` while the unit carries `ArmorMelt`.
    pub armor_melt_absorption_mult: f32,
    /// Health fraction below which a unit burns.
    pub burn_health_threshold: f32,
    pub burn_damage_per_second: f32,

    // ===== abilities =====
    /// Armor restored per second, indexed by missing-armor bracket (fifths).
    pub armor_regen_per_second: [f32; 5],
    pub armor_drain_radius: f32,
    pub swarm_max_uses: i32,
    pub swarm_fighters_per_group: usize,
    pub swarm_fighter_health: f32,
    pub swarm_dps: f32,
    pub swarm_interact_radius: f32,
    pub swarm_speed: f32,
    pub swarm_resist_damage_mult: f32,
    pub shield_project_max_pool: f32,
    pub shield_project_regen_per_second: f32,
    pub heal_field_radius: f32,
    pub heal_field_armor: f32,
    pub chain_max_length: f32,
    pub superlaser_damage: f32,
    pub self_destruct_health_fraction: f32,
    pub command_wheel_pick_radius: f32,

    // ===== movement multipliers (read by the movement collaborator) =====
    pub spawn_swarm_speed_mult: f32,
    pub self_destruct_speed_mult: f32,
    pub mode_speed_mult: f32,
}

impl GameRules {
    // ===== compile-time constants used as type parameters =====
    pub const MAX_ABILITY_SLOTS: usize = 4;
    pub const MAX_STATUS_EFFECTS: usize = 16;

    /// Armor regeneration brackets (one per fifth of missing armor).
    pub const ARMOR_REGEN_BRACKETS: usize = 5;

    pub fn new() -> Self {
        Self {
            use_test_values: false,
            test_time_mult: 1.0,

            friendly_fire_damage_mult: 0.25,
            hit_offset: 0.1,

            armor_absorption: 0.5,
            armor_melt_absorption_mult: 0.5,
            burn_health_threshold: 0.2,
            burn_damage_per_second: 2.0,

            armor_regen_per_second: [2.0, 4.0, 6.0, 8.0, 10.0],
            armor_drain_radius: 15.0,
            swarm_max_uses: 3,
            swarm_fighters_per_group: 6,
            swarm_fighter_health: 10.0,
            swarm_dps: 8.0,
            swarm_interact_radius: 4.0,
            swarm_speed: 12.0,
            swarm_resist_damage_mult: 0.75,
            shield_project_max_pool: 300.0,
            shield_project_regen_per_second: 15.0,
            heal_field_radius: 12.0,
            heal_field_armor: 40.0,
            chain_max_length: 30.0,
            superlaser_damage: 200.0,
            self_destruct_health_fraction: 0.8,
            command_wheel_pick_radius: 5.0,

            spawn_swarm_speed_mult: 0.6,
            self_destruct_speed_mult: 1.5,
            mode_speed_mult: 0.5,
        }
    }

    /// Multiplier applied to every frame delta before timers advance.
    pub fn time_scale(&self) -> f32 {
        if self.use_test_values && self.test_time_mult > 0.0 {
            1.0 / self.test_time_mult
        } else {
            1.0
        }
    }

    /// Returns a copy with test timing enabled at the given multiplier.
    pub fn with_test_time(mut self, mult: f32) -> Self {
        self.use_test_values = true;
        self.test_time_mult = mult;
        self
    }
}

impl Default for GameRules {
    fn default() -> Self {
        Self::new()
    }
}
