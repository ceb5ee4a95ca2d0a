/// Positions and linear RGB colors of a generated galaxy.
///
/// `positions[i]` and `colors[i]` always describe the same particle. A buffer
/// is only handed out once every particle has been written.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParticleBuffer {
    pub positions: Vec<[f32; 3]>,
    pub colors: Vec<[f32; 3]>,
}

impl ParticleBuffer {
    pub(crate) fn zeroed(count: usize) -> Self {
        Self {
            positions: vec![[0.0; 3]; count],
            colors: vec![[0.0; 3]; count],
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Iterates `(position, color)` pairs in particle order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&[f32; 3], &[f32; 3])> {
        self.positions.iter().zip(self.colors.iter())
    }
}
