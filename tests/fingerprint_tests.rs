use molsim::similarity::fingerprint::{compute_fingerprint, extract_features};
use molsim::similarity::FINGERPRINT_NBITS;
use molsim::toolkit::fixture::FixtureToolkit;
use molsim::toolkit::InvalidMoleculeError;

#[test]
fn test_fingerprint_length_and_determinism() {
    let toolkit = FixtureToolkit::new();

    let fp1 = compute_fingerprint(&toolkit, "CCO").unwrap();
    let fp2 = compute_fingerprint(&toolkit, "CCO").unwrap();

    assert_eq!(fp1.0.len(), FINGERPRINT_NBITS);
    assert_eq!(fp1, fp2);
    assert!(fp1.0.count_ones() > 0);
}

#[test]
fn test_distinct_molecules_distinct_fingerprints() {
    let toolkit = FixtureToolkit::new();

    let fp1 = compute_fingerprint(&toolkit, "CC").unwrap();
    let fp2 = compute_fingerprint(&toolkit, "CCO").unwrap();

    assert_ne!(fp1, fp2);
}

#[test]
fn test_feature_matrix_rows_match_input_order() {
    let toolkit = FixtureToolkit::new();
    let smiles = ["CCO", "CC", "CCCN"];

    let features = extract_features(&toolkit, &smiles).unwrap();
    assert_eq!(features.shape(), &[3, FINGERPRINT_NBITS]);

    for (i, smi) in smiles.iter().enumerate() {
        let fp = compute_fingerprint(&toolkit, smi).unwrap();
        let expected = fp
            .0
            .iter()
            .map(|b| if *b { 1u8 } else { 0u8 })
            .collect::<Vec<_>>();
        assert_eq!(features.row(i).to_vec(), expected);
    }
}

#[test]
fn test_batch_fails_whole_on_bad_smiles() {
    let toolkit = FixtureToolkit::new();

    let result = extract_features(&toolkit, &["CCO", "not_a_smiles", "CC"]);
    let err = result.unwrap_err();
    assert!(err.downcast_ref::<InvalidMoleculeError>().is_some());
}

#[test]
fn test_unparsable_smiles_is_invalid_molecule_error() {
    let toolkit = FixtureToolkit::new();

    let err = compute_fingerprint(&toolkit, "not_a_smiles").unwrap_err();
    assert!(err.downcast_ref::<InvalidMoleculeError>().is_some());
}
