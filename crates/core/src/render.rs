//! Draw contract between the board and a rendering collaborator.
//!
//! The board never touches a graphics API. [`StoneBoard::draw`] walks the
//! presented grid and hands one [`StoneTransform`] per visible stone to a
//! [`RenderTarget`], together with the asset an [`AssetCatalog`] resolves for
//! the stone's kind.
//!
//! [`StoneBoard::draw`]: crate::board::StoneBoard::draw

use crate::types::StoneKind;

/// Placement of one stone for the current frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StoneTransform {
    pub translation: [f32; 3],
    /// Spin about +Y, in degrees.
    pub angle_deg: f32,
    pub scale: f32,
}

impl StoneTransform {
    /// Column-major model matrix: translate, then rotate about Y, then scale.
    pub fn model_matrix(&self) -> [[f32; 4]; 4] {
        let (sin, cos) = self.angle_deg.to_radians().sin_cos();
        let s = self.scale;
        let [tx, ty, tz] = self.translation;
        [
            [cos * s, 0.0, -sin * s, 0.0],
            [0.0, s, 0.0, 0.0],
            [sin * s, 0.0, cos * s, 0.0],
            [tx, ty, tz, 1.0],
        ]
    }
}

/// Resolves the visual asset of a stone kind.
pub trait AssetCatalog {
    type Asset: ?Sized;

    /// `None` skips stones of that kind.
    fn asset(&self, kind: StoneKind) -> Option<&Self::Asset>;
}

/// Receives the stones to draw this frame.
pub trait RenderTarget<A: ?Sized> {
    fn submit(&mut self, asset: &A, transform: &StoneTransform);
}
