/// Screen-filling quad, interleaved `position.xy, uv.xy` per vertex.
#[rustfmt::skip]
pub const QUAD: [f32; 16] = [
    -1.0, 1.0, 0.0, 1.0,  // top left
    1.0, 1.0, 1.0, 1.0,   // top right
    1.0, -1.0, 1.0, 0.0,  // bottom right
    -1.0, -1.0, 0.0, 0.0, // bottom left
];

/// Two triangles sharing the top-left/bottom-right diagonal of [`QUAD`].
#[rustfmt::skip]
pub const QUAD_INDICES: [u32; 6] = [
    0, 1, 2,
    2, 3, 0,
];

pub mod geometry;
pub mod program;
pub mod renderer;
pub mod texture;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quad_covers_clip_space() {
        let positions: Vec<(f32, f32)> = QUAD.chunks(4).map(|v| (v[0], v[1])).collect();

        for corner in [(-1.0, 1.0), (1.0, 1.0), (1.0, -1.0), (-1.0, -1.0)] {
            assert!(positions.contains(&corner));
        }
    }

    #[test]
    fn quad_uvs_match_corners() {
        for v in QUAD.chunks(4) {
            assert_eq!(v[2], (v[0] + 1.0) / 2.0);
            assert_eq!(v[3], (v[1] + 1.0) / 2.0);
        }
    }

    #[test]
    fn triangles_share_diagonal() {
        let (first, second) = QUAD_INDICES.split_at(3);
        let shared: Vec<_> = first.iter().filter(|i| second.contains(i)).collect();

        assert_eq!(shared, vec![&0, &2]);
    }
}
