//! Speed lookup tables
//!
//! Horizontal speed depends only on how long the rally has lasted; vertical
//! speed ("load") depends on where the ball struck the paddle.

use serde::{Deserialize, Serialize};

use crate::settings::{Settings, SettingsError, SpeedTier, validate_tables};

/// Immutable speed tables shared by every ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeedTables {
    tiers: Vec<SpeedTier>,
    vertical_speeds: Vec<f32>,
    hit_zones: Vec<usize>,
}

impl SpeedTables {
    pub fn new(
        tiers: Vec<SpeedTier>,
        vertical_speeds: Vec<f32>,
        hit_zones: Vec<usize>,
    ) -> Result<Self, SettingsError> {
        validate_tables(&tiers, &vertical_speeds, &hit_zones)?;
        Ok(Self {
            tiers,
            vertical_speeds,
            hit_zones,
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, SettingsError> {
        Self::new(
            settings.horizontal_tiers.clone(),
            settings.vertical_speeds.clone(),
            settings.hit_zones.clone(),
        )
    }

    /// Speed of the last tier whose threshold the rally has reached, or 0
    /// before the first threshold.
    pub fn horizontal_speed(&self, rally_hits: u32) -> f32 {
        self.tiers
            .iter()
            .take_while(|tier| tier.hits <= rally_hits)
            .last()
            .map_or(0.0, |tier| tier.speed)
    }

    /// Map a paddle hit offset to a load.
    ///
    /// The offset picks a hit zone (round half up, clamped to the table), and
    /// the zone names the load. Any input, however far out of range, lands on
    /// a valid load.
    pub fn vertical_load_from_offset(&self, y: f32) -> usize {
        let zones = self.hit_zones.len();
        // Saturating float cast; NaN lands on zone 0
        let slot = ((y + 0.5) * zones as f32 + 0.5).floor() as i64;
        let slot = slot.clamp(0, zones as i64 - 1) as usize;
        self.hit_zones[slot]
    }

    /// Reflect a load through the middle of the table
    #[inline]
    pub fn mirror_load(&self, load: usize) -> usize {
        self.vertical_speeds.len() - 1 - load
    }

    /// Vertical speed for a load
    #[inline]
    pub fn vertical_speed(&self, load: usize) -> f32 {
        self.vertical_speeds[load]
    }

    pub fn load_count(&self) -> usize {
        self.vertical_speeds.len()
    }

    /// The flat (or flattest) load
    pub fn middle_load(&self) -> usize {
        self.vertical_speeds.len() / 2
    }

    pub fn tiers(&self) -> &[SpeedTier] {
        &self.tiers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tables() -> SpeedTables {
        SpeedTables::from_settings(&Settings::default()).unwrap()
    }

    #[test]
    fn test_horizontal_speed_tiers() {
        let t = tables();
        assert_eq!(t.horizontal_speed(0), 0.26);
        assert_eq!(t.horizontal_speed(3), 0.26);
        assert_eq!(t.horizontal_speed(4), 0.39);
        assert_eq!(t.horizontal_speed(11), 0.39);
        assert_eq!(t.horizontal_speed(12), 0.53);
        assert_eq!(t.horizontal_speed(1000), 0.53);
    }

    #[test]
    fn test_horizontal_speed_before_first_tier() {
        let t = SpeedTables::new(vec![SpeedTier::new(2, 0.3)], vec![0.0], vec![0]).unwrap();
        assert_eq!(t.horizontal_speed(0), 0.0);
        assert_eq!(t.horizontal_speed(1), 0.0);
        assert_eq!(t.horizontal_speed(2), 0.3);
    }

    #[test]
    fn test_center_hit_is_flat() {
        let t = tables();
        let load = t.vertical_load_from_offset(0.0);
        assert_eq!(load, 3);
        assert_eq!(t.vertical_speed(load), 0.0);
    }

    #[test]
    fn test_edge_hits_are_steep() {
        let t = tables();
        assert_eq!(t.vertical_load_from_offset(-0.5), 0);
        assert_eq!(t.vertical_load_from_offset(-0.625), 0);
        assert_eq!(t.vertical_load_from_offset(0.5), 6);
        assert_eq!(t.vertical_load_from_offset(0.625), 6);
        // Top of the paddle sends the ball up (negative y)
        assert!(t.vertical_speed(t.vertical_load_from_offset(-0.5)) < 0.0);
        assert!(t.vertical_speed(t.vertical_load_from_offset(0.5)) > 0.0);
    }

    #[test]
    fn test_load_from_extreme_offsets() {
        let t = tables();
        assert_eq!(t.vertical_load_from_offset(-1e9), 0);
        assert_eq!(t.vertical_load_from_offset(1e9), 6);
        assert_eq!(t.vertical_load_from_offset(f32::NEG_INFINITY), 0);
        assert_eq!(t.vertical_load_from_offset(f32::INFINITY), 6);
        assert!(t.vertical_load_from_offset(f32::NAN) < t.load_count());
    }

    #[test]
    fn test_identity_zones_round_half_up() {
        let t = SpeedTables::new(
            vec![SpeedTier::new(0, 0.1)],
            vec![-1.0, -0.5, 0.0, 0.5, 1.0],
            vec![0, 1, 2, 3, 4],
        )
        .unwrap();
        // (y + 0.5) * 5 = 2.5 rounds up to 3
        assert_eq!(t.vertical_load_from_offset(0.0), 3);
        assert_eq!(t.vertical_load_from_offset(-0.3), 1);
    }

    #[test]
    fn test_mirror_load() {
        let t = tables();
        assert_eq!(t.mirror_load(0), 6);
        assert_eq!(t.mirror_load(6), 0);
        assert_eq!(t.mirror_load(3), 3);
        for load in 0..t.load_count() {
            assert_eq!(t.mirror_load(t.mirror_load(load)), load);
        }
    }

    #[test]
    fn test_invalid_tables_rejected() {
        assert!(matches!(
            SpeedTables::new(vec![], vec![0.0], vec![0]),
            Err(SettingsError::EmptyTiers)
        ));
        assert!(matches!(
            SpeedTables::new(vec![SpeedTier::new(0, 0.1)], vec![], vec![0]),
            Err(SettingsError::EmptyVerticalSpeeds)
        ));
    }
}
