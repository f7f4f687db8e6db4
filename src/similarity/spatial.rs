use ndarray::{Array1, Array2, Axis};

use crate::similarity::{prepare_molecule, EMBED_SEED};
use crate::toolkit::Toolkit;

/// Compare two molecules by generated 3D conformer geometry.
///
/// Returns `(success, deviation)`. The deviation is a root-mean-square
/// distance over corresponding atoms after a simplified alignment:
///
/// - equal atom counts: per-set centroid subtraction (translation only);
/// - unequal atom counts: greedy nearest-neighbor atom correspondence over
///   the full cross distance matrix, no rigid-body alignment.
///
/// When either molecule fails to embed, the result is
/// `(false, f64::INFINITY)` — infinity so the sentinel can never be
/// mistaken for a real score and sorts last under any ranking. Unparsable
/// SMILES propagate as [`InvalidMoleculeError`](crate::toolkit::InvalidMoleculeError).
///
/// Deviation bands, by convention: [0, 1) very similar, [1, 2) closely
/// similar, 2 and up low similarity.
pub fn compute_3d_similarity<T: Toolkit>(
    toolkit: &T,
    smiles1: &str,
    smiles2: &str,
) -> eyre::Result<(bool, f64)> {
    let mut mol1 = prepare_molecule(toolkit, smiles1)?;
    let mut mol2 = prepare_molecule(toolkit, smiles2)?;

    // Canonicalize the pair so the larger molecule is always the first
    // operand, making the result independent of argument order. Counts are
    // taken after hydrogenation, the same counts the embedder sees.
    if toolkit.num_atoms(&mol1) < toolkit.num_atoms(&mol2) {
        std::mem::swap(&mut mol1, &mut mol2);
    }

    let conf1 = toolkit.embed(&mol1, EMBED_SEED);
    let conf2 = toolkit.embed(&mol2, EMBED_SEED);

    let (conf1, conf2) = match (conf1, conf2) {
        (Some(conf1), Some(conf2)) => (conf1, conf2),
        _ => {
            log::debug!("conformer embedding failed; no similarity could be assessed");
            return Ok((false, f64::INFINITY));
        }
    };

    let (aligned1, aligned2) = if conf1.num_atoms() != conf2.num_atoms() {
        nearest_neighbor_align(&conf1.0, &conf2.0)
    } else {
        centroid_align(&conf1.0, &conf2.0)
    };

    Ok((true, rmsd(&aligned1, &aligned2)))
}

/// Pairwise Euclidean distances, one row per atom of `a`, one column per
/// atom of `b`.
pub fn distance_matrix(a: &Array2<f64>, b: &Array2<f64>) -> Array2<f64> {
    Array2::from_shape_fn((a.nrows(), b.nrows()), |(i, j)| {
        let diff = &a.row(i) - &b.row(j);
        diff.dot(&diff).sqrt()
    })
}

/// Correspondence for unequal atom counts: each row of `a` is paired with
/// its nearest row of `b` (greedy row-wise arg-min, non-bijective — several
/// atoms of `a` may map to one atom of `b`). `b` is reordered accordingly;
/// no translation or rotation is applied.
pub fn nearest_neighbor_align(a: &Array2<f64>, b: &Array2<f64>) -> (Array2<f64>, Array2<f64>) {
    let dist = distance_matrix(a, b);
    let matches = dist
        .axis_iter(Axis(0))
        .map(|row| {
            row.iter()
                .enumerate()
                .fold((0, f64::INFINITY), |best, (j, &d)| {
                    if d < best.1 {
                        (j, d)
                    } else {
                        best
                    }
                })
                .0
        })
        .collect::<Vec<_>>();

    (a.to_owned(), b.select(Axis(0), &matches))
}

/// Alignment for equal atom counts: subtract each set's centroid
/// (translation only; deliberately no rotational superposition).
pub fn centroid_align(a: &Array2<f64>, b: &Array2<f64>) -> (Array2<f64>, Array2<f64>) {
    (a - &centroid(a), b - &centroid(b))
}

fn centroid(coords: &Array2<f64>) -> Array1<f64> {
    coords
        .mean_axis(Axis(0))
        .unwrap_or_else(|| Array1::zeros(coords.ncols()))
}

/// Root-mean-square Euclidean distance between corresponding rows.
pub fn rmsd(a: &Array2<f64>, b: &Array2<f64>) -> f64 {
    let diff = a - b;
    let sq_dists = diff.mapv(|v| v * v).sum_axis(Axis(1));
    sq_dists.mean().unwrap_or(0.0).sqrt()
}
