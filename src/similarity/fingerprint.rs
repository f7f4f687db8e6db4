use ndarray::Array2;

use crate::similarity::{FINGERPRINT_NBITS, MORGAN_RADIUS};
use crate::toolkit::{Fingerprint, Toolkit};

/// Compute the 2048-bit radius-2 Morgan fingerprint of a SMILES string.
pub fn compute_fingerprint<T: Toolkit>(toolkit: &T, smiles: &str) -> eyre::Result<Fingerprint> {
    let mol = toolkit.parse_smiles(smiles)?;
    Ok(toolkit.morgan_fingerprint(&mol, MORGAN_RADIUS, FINGERPRINT_NBITS))
}

/// Fingerprint a batch of SMILES into a rectangular 0/1 feature matrix,
/// one row per input, input order preserved.
///
/// Any unparsable SMILES fails the whole batch; callers needing partial
/// tolerance must pre-filter.
pub fn extract_features<T: Toolkit>(
    toolkit: &T,
    smiles_list: &[&str],
) -> eyre::Result<Array2<u8>> {
    let mut flat = Vec::with_capacity(smiles_list.len() * FINGERPRINT_NBITS);
    for smiles in smiles_list {
        let fp = compute_fingerprint(toolkit, smiles)?;
        flat.extend(fp.0.iter().map(|b| if *b { 1u8 } else { 0u8 }));
    }

    Ok(Array2::from_shape_vec(
        (smiles_list.len(), FINGERPRINT_NBITS),
        flat,
    )?)
}
