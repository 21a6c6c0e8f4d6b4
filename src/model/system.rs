use super::error::ModelError;

/// Static description of the simulated particles.
#[derive(Debug, Clone, PartialEq)]
pub struct SystemData {
    natoms: usize,
    nconstraints: usize,
    ndof_reduction_tra: usize,
    ndof_reduction_rot: usize,
    mass: Vec<f64>,
}

impl SystemData {
    pub fn new(natoms: usize, mass: Vec<f64>) -> Result<Self, ModelError> {
        if natoms == 0 {
            return Err(ModelError::EmptySystem);
        }
        if mass.len() != natoms {
            return Err(ModelError::MassLength {
                expected: natoms,
                got: mass.len(),
            });
        }
        if let Some((index, &value)) = mass
            .iter()
            .enumerate()
            .find(|(_, m)| !(m.is_finite() && **m > 0.0))
        {
            return Err(ModelError::InvalidMass { index, value });
        }

        Ok(Self {
            natoms,
            nconstraints: 0,
            ndof_reduction_tra: 0,
            ndof_reduction_rot: 0,
            mass,
        })
    }

    pub fn with_constraints(mut self, nconstraints: usize) -> Self {
        self.nconstraints = nconstraints;
        self
    }

    pub fn with_ndof_reduction(mut self, translational: usize, rotational: usize) -> Self {
        self.ndof_reduction_tra = translational;
        self.ndof_reduction_rot = rotational;
        self
    }

    #[inline]
    pub fn natoms(&self) -> usize {
        self.natoms
    }

    #[inline]
    pub fn nconstraints(&self) -> usize {
        self.nconstraints
    }

    #[inline]
    pub fn ndof_reduction_tra(&self) -> usize {
        self.ndof_reduction_tra
    }

    #[inline]
    pub fn ndof_reduction_rot(&self) -> usize {
        self.ndof_reduction_rot
    }

    #[inline]
    pub fn mass(&self) -> &[f64] {
        &self.mass
    }

    pub fn total_mass(&self) -> f64 {
        self.mass.iter().sum()
    }

    /// Kinematic degrees of freedom left after constraints and symmetry reductions.
    pub fn ndof(&self) -> usize {
        (3 * self.natoms)
            .saturating_sub(self.nconstraints)
            .saturating_sub(self.ndof_reduction_tra)
            .saturating_sub(self.ndof_reduction_rot)
    }
}
