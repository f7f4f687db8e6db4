use bitvec::prelude::BitVec;
use ndarray::Array2;
use thiserror::Error;

pub mod fixture;

/// SMILES string that could not be parsed into a molecule. There is no
/// sensible default molecule, so this always propagates to the caller.
#[derive(Debug, Error)]
#[error("invalid molecule: could not parse SMILES {smiles:?}: {reason}")]
pub struct InvalidMoleculeError {
    pub smiles: String,
    pub reason: String,
}

impl InvalidMoleculeError {
    pub fn new(smiles: &str, reason: impl Into<String>) -> Self {
        Self {
            smiles: smiles.to_string(),
            reason: reason.into(),
        }
    }
}

/// Fixed-length topological fingerprint bit vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fingerprint(pub BitVec<u8>);

/// One 3D arrangement of a molecule's atoms, one row of x/y/z per atom.
#[derive(Debug, Clone, PartialEq)]
pub struct Conformer(pub Array2<f64>);

impl Conformer {
    pub fn num_atoms(&self) -> usize {
        self.0.nrows()
    }
}

/// Capability seam over an external cheminformatics backend.
///
/// The similarity routines only ever talk to a backend through this trait,
/// so they can run against deterministic in-memory fixtures as well as real
/// toolkit bindings. Embedding failure is a routine outcome for some
/// molecular graphs and is reported as `None`, never as an error; callers
/// must check before reading coordinates.
pub trait Toolkit {
    type Mol;

    fn parse_smiles(&self, smiles: &str) -> Result<Self::Mol, InvalidMoleculeError>;

    fn add_explicit_hydrogens(&self, mol: &Self::Mol) -> Self::Mol;

    fn num_atoms(&self, mol: &Self::Mol) -> usize;

    /// Attempt to generate a 3D conformer. The seed is threaded per call so
    /// repeated and concurrent invocations stay independently reproducible.
    fn embed(&self, mol: &Self::Mol, seed: u64) -> Option<Conformer>;

    fn morgan_fingerprint(&self, mol: &Self::Mol, radius: u32, n_bits: usize) -> Fingerprint;
}
