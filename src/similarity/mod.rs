use crate::toolkit::Toolkit;

pub mod fingerprint;
pub mod spatial;

/// Morgan fingerprint radius used throughout.
pub const MORGAN_RADIUS: u32 = 2;

/// Fingerprint width in bits.
pub const FINGERPRINT_NBITS: usize = 2048;

/// Seed threaded into every conformer embedding call so repeated
/// comparisons of the same pair are reproducible.
pub const EMBED_SEED: u64 = 42;

/// Parse a SMILES string and add explicit hydrogens.
///
/// Embedding quality and atom correspondence both depend on the complete
/// heavy+hydrogen atom set, so the 3D path always goes through this.
pub fn prepare_molecule<T: Toolkit>(toolkit: &T, smiles: &str) -> eyre::Result<T::Mol> {
    let mol = toolkit.parse_smiles(smiles)?;
    Ok(toolkit.add_explicit_hydrogens(&mol))
}
