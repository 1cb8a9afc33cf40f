//! Common player state and strategy inputs shared by every policy

use serde::Serialize;

use crate::core::config::PotionUse;
use crate::core::types::{ActionId, NOT_APPLICABLE};
use crate::policy::PolicyContext;

/// Party damage buffs (status ids) that policies try to align with
const DAMAGE_BUFFS: &[u32] = &[
    49,   // medicated
    141,  // battle voice
    786,  // battle litany
    1185, // brotherhood
    1297, // embolden
    1822, // technical finish
    1878, // divination
    2599, // arcane circle
    2703, // searing light
    2964, // radiant finale
];

pub fn is_damage_buff(status_id: u32) -> bool {
    DAMAGE_BUFFS.contains(&status_id)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CommonPlayerState {
    pub level: u8,
    pub current_mp: u32,
    pub animation_lock: f32,
    pub animation_lock_delay: f32,
    pub combo_time_left: f32,
    pub combo_last_action: Option<ActionId>,
    /// Longest remaining party damage buff on the player
    pub raid_buffs_left: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommonStrategy {
    pub prepull: bool,
    pub fight_end_in: f32,
    pub raid_buffs_in: f32,
    pub position_lock_in: f32,
    pub potion: PotionUse,
}

impl<'a> PolicyContext<'a> {
    pub fn fill_common_player_state(&self) -> CommonPlayerState {
        let raid_buffs_left = self
            .player
            .statuses
            .iter()
            .filter(|s| is_damage_buff(s.id))
            .map(|s| self.status_duration(s.expire_at))
            .fold(0.0, f32::max);

        CommonPlayerState {
            level: self.level,
            current_mp: self.player.mp,
            animation_lock: self.timing.effective_animation_lock(),
            animation_lock_delay: self.timing.animation_lock_delay(),
            combo_time_left: self.timing.combo_time_left(),
            combo_last_action: self.timing.combo_last_action(),
            raid_buffs_left,
        }
    }

    /// Strategy inputs derived from the active encounter and config
    ///
    /// Without a plan the fight is assumed to end now and no raid buffs or
    /// movement are expected.
    pub fn fill_common_strategy(&self, potion: ActionId) -> CommonStrategy {
        let plan = self.encounter.and_then(|e| e.plan);

        let fight_end_in = plan.map_or(0.0, |p| p.estimate_time_to_next_downtime());
        let mut raid_buffs_in = plan.map_or(NOT_APPLICABLE, |p| p.estimate_time_to_next_vulnerable());
        if let Some(encounter) = self.encounter.filter(|e| e.has_plan_config) {
            raid_buffs_in = raid_buffs_in.min(encounter.next_damage_buff_in);
        }
        let position_lock_in = if self.config.enable_movement {
            plan.map_or(NOT_APPLICABLE, |p| p.estimate_time_to_next_positioning())
        } else {
            0.0
        };

        let mut potion_use = self.config.potion_use;
        if potion_use != PotionUse::Manual && !self.world.have_item(potion.id) {
            potion_use = PotionUse::Manual;
        }

        CommonStrategy {
            prepull: !self.player.in_combat,
            fight_end_in,
            raid_buffs_in,
            position_lock_in,
            potion: potion_use,
        }
    }
}
