//! Render configuration owned by a single `Rasterizer`

use serde::{Deserialize, Serialize};
use super::blend::BlendMode;
use super::math::Vec3;
use super::types::Color;

/// Which faces get discarded when culling is enabled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CullFace {
    /// Faces pointing at the camera
    Front,
    /// Faces pointing away from the camera
    #[default]
    Back,
    /// Everything; the mesh is skipped without visiting faces
    FrontAndBack,
}

/// Toggleable pipeline features
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    CullFace,
}

/// Cull, blend and clear settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderState {
    pub clear_color: Color,
    pub cull_enabled: bool,
    pub cull_face: CullFace,
    pub blend: BlendMode,
}

impl Default for RenderState {
    fn default() -> Self {
        Self {
            clear_color: Color::TRANSPARENT,
            cull_enabled: false,
            cull_face: CullFace::Back,
            blend: BlendMode::Set,
        }
    }
}

impl RenderState {
    /// True if no face of a mesh can survive culling
    pub fn culls_everything(&self) -> bool {
        self.cull_enabled && self.cull_face == CullFace::FrontAndBack
    }

    /// Decide whether a face is discarded.
    ///
    /// `normal` and `center` are the face normal and centroid in world space,
    /// `eye` the camera position. A positive dot product between the normal
    /// and the eye-to-center direction means the face points away.
    pub fn should_cull(&self, normal: Vec3, center: Vec3, eye: Vec3) -> bool {
        if !self.cull_enabled {
            return false;
        }
        let facing = normal.dot((center - eye).normalize());
        match self.cull_face {
            CullFace::Back => facing > 0.0,
            CullFace::Front => facing < 0.0,
            CullFace::FrontAndBack => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EYE: Vec3 = Vec3::new(0.0, 0.0, -5.0);
    const CENTER: Vec3 = Vec3::ZERO;
    // Points at the camera
    const TOWARD: Vec3 = Vec3::new(0.0, 0.0, -1.0);
    const AWAY: Vec3 = Vec3::new(0.0, 0.0, 1.0);

    #[test]
    fn test_disabled_never_culls() {
        let state = RenderState::default();
        assert!(!state.should_cull(AWAY, CENTER, EYE));
        assert!(!state.should_cull(TOWARD, CENTER, EYE));
    }

    #[test]
    fn test_back_and_front() {
        let mut state = RenderState { cull_enabled: true, ..Default::default() };
        assert!(state.should_cull(AWAY, CENTER, EYE));
        assert!(!state.should_cull(TOWARD, CENTER, EYE));

        state.cull_face = CullFace::Front;
        assert!(!state.should_cull(AWAY, CENTER, EYE));
        assert!(state.should_cull(TOWARD, CENTER, EYE));
    }

    #[test]
    fn test_front_and_back_only_when_enabled() {
        let mut state = RenderState { cull_face: CullFace::FrontAndBack, ..Default::default() };
        assert!(!state.culls_everything());
        state.cull_enabled = true;
        assert!(state.culls_everything());
    }
}
