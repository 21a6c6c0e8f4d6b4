use super::error::ModelError;

/// Cartesian 3-vector.
pub type Vec3 = [f64; 3];

/// Particle positions and velocities in recording order.
///
/// Frames are appended as position/velocity pairs, so both sequences always
/// hold the same number of frames. Every frame must carry the particle
/// count of the first one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrajectoryData {
    position: Vec<Vec<Vec3>>,
    velocity: Vec<Vec<Vec3>>,
}

impl TrajectoryData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(frames: usize) -> Self {
        Self {
            position: Vec::with_capacity(frames),
            velocity: Vec::with_capacity(frames),
        }
    }

    pub fn push_frame(
        &mut self,
        position: Vec<Vec3>,
        velocity: Vec<Vec3>,
    ) -> Result<(), ModelError> {
        let frame = self.position.len();

        if position.len() != velocity.len() {
            return Err(ModelError::FrameVelocityCount {
                frame,
                positions: position.len(),
                velocities: velocity.len(),
            });
        }
        if let Some(expected) = self.natoms() {
            if position.len() != expected {
                return Err(ModelError::FrameParticleCount {
                    frame,
                    expected,
                    got: position.len(),
                });
            }
        }

        self.position.push(position);
        self.velocity.push(velocity);
        Ok(())
    }

    #[inline]
    pub fn position(&self) -> &[Vec<Vec3>] {
        &self.position
    }

    #[inline]
    pub fn velocity(&self) -> &[Vec<Vec3>] {
        &self.velocity
    }

    #[inline]
    pub fn nframes(&self) -> usize {
        self.position.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.position.is_empty()
    }

    /// Particle count shared by all frames, `None` while no frame is stored.
    pub fn natoms(&self) -> Option<usize> {
        self.position.first().map(Vec::len)
    }

    pub fn frame(&self, index: usize) -> Option<(&[Vec3], &[Vec3])> {
        Some((
            self.position.get(index)?.as_slice(),
            self.velocity.get(index)?.as_slice(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frames_keep_recording_order() {
        let mut traj = TrajectoryData::with_capacity(2);
        traj.push_frame(vec![[0.0; 3]; 2], vec![[1.0; 3]; 2]).unwrap();
        traj.push_frame(vec![[2.0; 3]; 2], vec![[3.0; 3]; 2]).unwrap();

        assert_eq!(traj.nframes(), 2);
        assert_eq!(traj.natoms(), Some(2));
        let (pos, vel) = traj.frame(1).unwrap();
        assert_eq!(pos[0], [2.0; 3]);
        assert_eq!(vel[1], [3.0; 3]);
        assert_eq!(traj.position().len(), traj.velocity().len());
    }

    #[test]
    fn rejects_changing_particle_count() {
        let mut traj = TrajectoryData::new();
        traj.push_frame(vec![[0.0; 3]; 3], vec![[0.0; 3]; 3]).unwrap();

        let err = traj
            .push_frame(vec![[0.0; 3]; 4], vec![[0.0; 3]; 4])
            .unwrap_err();
        assert_eq!(
            err,
            ModelError::FrameParticleCount {
                frame: 1,
                expected: 3,
                got: 4
            }
        );
        assert_eq!(traj.nframes(), 1);
    }

    #[test]
    fn rejects_velocity_length_mismatch() {
        let mut traj = TrajectoryData::new();
        let err = traj
            .push_frame(vec![[0.0; 3]; 2], vec![[0.0; 3]; 1])
            .unwrap_err();
        assert!(matches!(err, ModelError::FrameVelocityCount { frame: 0, .. }));
        assert!(traj.is_empty());
        assert_eq!(traj.natoms(), None);
    }
}
