//! Diagnostic draw requests emitted by a step for an external visualizer.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_MAX_DEBUG_DRAWS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DebugColor {
    Red,
    Green,
    Blue,
    Yellow,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DebugDraw {
    Sphere {
        center: Vec3,
        radius: f32,
        wire: bool,
        color: DebugColor,
    },
    Line {
        start: Vec3,
        end: Vec3,
        color: DebugColor,
    },
}

/// Bounded list of draw requests. Requests beyond the capacity are counted, not stored.
#[derive(Debug, Clone)]
pub struct DebugDrawList {
    draws: Vec<DebugDraw>,
    capacity: usize,
    dropped: usize,
    enabled: bool,
}

impl Default for DebugDrawList {
    fn default() -> Self {
        Self::disabled()
    }
}

impl DebugDrawList {
    pub fn new(capacity: usize) -> Self {
        Self {
            draws: Vec::new(),
            capacity,
            dropped: 0,
            enabled: true,
        }
    }

    /// A list that ignores every request.
    pub fn disabled() -> Self {
        Self {
            draws: Vec::new(),
            capacity: DEFAULT_MAX_DEBUG_DRAWS,
            dropped: 0,
            enabled: false,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn push(&mut self, draw: DebugDraw) {
        if !self.enabled {
            return;
        }
        if self.draws.len() >= self.capacity {
            if self.dropped == 0 {
                log::warn!("debug draw list full ({} entries), dropping requests", self.capacity);
            }
            self.dropped += 1;
            return;
        }
        self.draws.push(draw);
    }

    pub fn sphere(&mut self, center: Vec3, radius: f32, wire: bool, color: DebugColor) {
        self.push(DebugDraw::Sphere {
            center,
            radius,
            wire,
            color,
        });
    }

    pub fn line(&mut self, start: Vec3, end: Vec3, color: DebugColor) {
        self.push(DebugDraw::Line { start, end, color });
    }

    pub fn draws(&self) -> &[DebugDraw] {
        &self.draws
    }

    pub fn len(&self) -> usize {
        self.draws.len()
    }

    pub fn is_empty(&self) -> bool {
        self.draws.is_empty()
    }

    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn clear(&mut self) {
        self.draws.clear();
        self.dropped = 0;
    }
}
