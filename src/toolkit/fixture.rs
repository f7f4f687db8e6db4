//! Deterministic in-memory toolkit backend.
//!
//! Parses a linear organic-subset SMILES grammar (unbracketed element
//! symbols, implicit single bonds), adds hydrogens from fixed valences,
//! and "embeds" molecules as a schematic zig-zag chain with seeded jitter.
//! The geometry is not chemically meaningful; the point is a backend whose
//! every capability is reproducible, so the similarity routines can be
//! exercised without native toolkit bindings.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use bitvec::prelude::*;
use ndarray::Array2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::toolkit::{Conformer, Fingerprint, InvalidMoleculeError, Toolkit};

lazy_static::lazy_static! {
    static ref ATOM_RE: regex::Regex = regex::Regex::new(r"Cl|Br|[BCNOPSFI]").unwrap();
}

#[derive(Debug, Clone)]
struct FixtureAtom {
    symbol: String,
    // Index of the heavy atom this hydrogen hangs off; None for heavy atoms.
    parent: Option<usize>,
}

/// Molecule handle produced by [`FixtureToolkit`]: a chain of heavy atoms
/// in SMILES order, followed by any explicit hydrogens.
#[derive(Debug, Clone)]
pub struct FixtureMol {
    atoms: Vec<FixtureAtom>,
    num_heavy: usize,
}

impl FixtureMol {
    fn adjacency(&self) -> Vec<Vec<usize>> {
        let mut adj = vec![Vec::new(); self.atoms.len()];
        for i in 1..self.num_heavy {
            adj[i - 1].push(i);
            adj[i].push(i - 1);
        }
        for (i, atom) in self.atoms.iter().enumerate() {
            if let Some(p) = atom.parent {
                adj[p].push(i);
                adj[i].push(p);
            }
        }
        adj
    }
}

fn valence(symbol: &str) -> usize {
    match symbol {
        "C" => 4,
        "N" | "P" | "B" => 3,
        "O" | "S" => 2,
        _ => 1,
    }
}

#[derive(Debug, Clone, Default)]
pub struct FixtureToolkit {
    embedding_disabled: bool,
}

impl FixtureToolkit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend whose every embedding attempt reports failure, for driving
    /// the comparator's no-conformer path.
    pub fn with_embedding_disabled() -> Self {
        Self {
            embedding_disabled: true,
        }
    }
}

impl Toolkit for FixtureToolkit {
    type Mol = FixtureMol;

    fn parse_smiles(&self, smiles: &str) -> Result<FixtureMol, InvalidMoleculeError> {
        let mut atoms = Vec::new();
        let mut cursor = 0;
        for m in ATOM_RE.find_iter(smiles) {
            if m.start() != cursor {
                return Err(InvalidMoleculeError::new(smiles, "unrecognized token"));
            }
            cursor = m.end();
            atoms.push(FixtureAtom {
                symbol: m.as_str().to_string(),
                parent: None,
            });
        }
        if cursor != smiles.len() {
            return Err(InvalidMoleculeError::new(smiles, "unrecognized token"));
        }
        let num_heavy = atoms.len();
        Ok(FixtureMol { atoms, num_heavy })
    }

    fn add_explicit_hydrogens(&self, mol: &FixtureMol) -> FixtureMol {
        let mut atoms = mol.atoms[..mol.num_heavy].to_vec();
        for i in 0..mol.num_heavy {
            let degree = match (i, mol.num_heavy) {
                (_, 1) => 0,
                (0, _) => 1,
                (i, n) if i == n - 1 => 1,
                _ => 2,
            };
            let h_count = valence(&atoms[i].symbol).saturating_sub(degree);
            for _ in 0..h_count {
                atoms.push(FixtureAtom {
                    symbol: "H".to_string(),
                    parent: Some(i),
                });
            }
        }
        FixtureMol {
            atoms,
            num_heavy: mol.num_heavy,
        }
    }

    fn num_atoms(&self, mol: &FixtureMol) -> usize {
        mol.atoms.len()
    }

    fn embed(&self, mol: &FixtureMol, seed: u64) -> Option<Conformer> {
        if self.embedding_disabled || mol.atoms.is_empty() {
            return None;
        }

        let mut rng = StdRng::seed_from_u64(seed);
        let n = mol.atoms.len();
        let mut coords = Array2::<f64>::zeros((n, 3));

        let mut h_total = vec![0usize; mol.num_heavy];
        for atom in &mol.atoms {
            if let Some(p) = atom.parent {
                h_total[p] += 1;
            }
        }
        let mut h_seen = vec![0usize; mol.num_heavy];

        for i in 0..n {
            // Heavy atoms first in a zig-zag chain; hydrogens on a unit
            // circle around their parent in the y-z plane.
            let base = match mol.atoms[i].parent {
                None => [
                    1.5 * i as f64,
                    if i % 2 == 1 { 0.8 } else { 0.0 },
                    0.0,
                ],
                Some(p) => {
                    let k = h_seen[p];
                    h_seen[p] += 1;
                    let angle =
                        std::f64::consts::TAU * (k as f64 + 1.0) / (h_total[p] as f64 + 1.0);
                    [
                        coords[[p, 0]],
                        coords[[p, 1]] + angle.cos(),
                        coords[[p, 2]] + angle.sin(),
                    ]
                }
            };
            for c in 0..3 {
                coords[[i, c]] = base[c] + rng.gen_range(-0.02..0.02);
            }
        }

        Some(Conformer(coords))
    }

    fn morgan_fingerprint(&self, mol: &FixtureMol, radius: u32, n_bits: usize) -> Fingerprint {
        let mut bits = bitvec![u8, Lsb0; 0; n_bits];
        if n_bits == 0 {
            return Fingerprint(bits);
        }

        let adj = mol.adjacency();
        for start in 0..mol.atoms.len() {
            let mut within = vec![false; mol.atoms.len()];
            within[start] = true;
            let mut frontier = vec![start];
            for r in 0..=radius {
                let mut env = (0..mol.atoms.len())
                    .filter(|&i| within[i])
                    .map(|i| mol.atoms[i].symbol.as_str())
                    .collect::<Vec<_>>();
                env.sort_unstable();

                let mut hasher = DefaultHasher::new();
                (r, mol.atoms[start].symbol.as_str(), env).hash(&mut hasher);
                let bit = (hasher.finish() % n_bits as u64) as usize;
                bits.set(bit, true);

                let mut next = Vec::new();
                for &i in &frontier {
                    for &j in &adj[i] {
                        if !within[j] {
                            within[j] = true;
                            next.push(j);
                        }
                    }
                }
                frontier = next;
            }
        }

        Fingerprint(bits)
    }
}
