// Copyright 2026 the Tilepaint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Service and tile configuration.

use crate::time::{Duration, Timebase};

/// Which render service a tile uses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// Immediate-mode raster surface, repainted per dirty frame.
    #[default]
    Canvas,
    /// Retained-mode vector document, mutated in place.
    Svg,
}

/// Per-service behavior.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ServiceConfig {
    /// Whether the surface receives pointer events at all.
    pub interactive: bool,
    /// Hit-test slack in pixels beyond the stroke half-width.
    pub tolerance: f64,
    /// Minimum spacing between delivered pointer moves, in host ticks.
    pub move_throttle: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ServiceConfig {
    /// Interval between delivered pointer moves.
    pub const MOVE_THROTTLE_MS: u64 = 32;

    /// Interactive defaults for a microsecond host clock (the web).
    #[must_use]
    pub const fn new() -> Self {
        Self::for_timebase(Timebase::MICROS)
    }

    /// Interactive defaults with the move throttle expressed in `timebase`.
    #[must_use]
    pub const fn for_timebase(timebase: Timebase) -> Self {
        Self {
            interactive: true,
            tolerance: 0.0,
            move_throttle: Duration::from_millis(Self::MOVE_THROTTLE_MS, timebase),
        }
    }

    /// Defaults for a surface that never receives pointer events.
    #[must_use]
    pub const fn passive() -> Self {
        Self {
            interactive: false,
            ..Self::new()
        }
    }
}

/// Options for one tile surface.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TileOptions {
    /// Render service to create.
    pub backend: BackendKind,
    /// Service behavior.
    pub service: ServiceConfig,
}

impl TileOptions {
    /// Canvas backend with interactive defaults.
    #[must_use]
    pub const fn canvas() -> Self {
        Self {
            backend: BackendKind::Canvas,
            service: ServiceConfig::new(),
        }
    }

    /// SVG backend with interactive defaults.
    #[must_use]
    pub const fn svg() -> Self {
        Self {
            backend: BackendKind::Svg,
            service: ServiceConfig::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_throttle_is_32ms() {
        let config = ServiceConfig::new();
        assert_eq!(config.move_throttle, Duration(32_000));
        assert_eq!(
            ServiceConfig::for_timebase(Timebase::NANOS).move_throttle,
            Duration(32_000_000)
        );
        assert!(config.interactive);
        assert!(!ServiceConfig::passive().interactive);
    }

    #[test]
    fn tile_options_select_backend() {
        assert_eq!(TileOptions::default().backend, BackendKind::Canvas);
        assert_eq!(TileOptions::svg().backend, BackendKind::Svg);
    }
}
