use molsim::toolkit::fixture::FixtureToolkit;
use molsim::toolkit::Toolkit;

#[test]
fn test_parses_linear_subset() {
    let toolkit = FixtureToolkit::new();

    let mol = toolkit.parse_smiles("CClBrO").unwrap();
    assert_eq!(toolkit.num_atoms(&mol), 4);

    let mol = toolkit.parse_smiles("CCN").unwrap();
    assert_eq!(toolkit.num_atoms(&mol), 3);
}

#[test]
fn test_rejects_unsupported_input() {
    let toolkit = FixtureToolkit::new();

    assert!(toolkit.parse_smiles("not_a_smiles").is_err());
    assert!(toolkit.parse_smiles("C1=CC1").is_err());
    assert!(toolkit.parse_smiles("c1ccccc1").is_err());
}

#[test]
fn test_hydrogen_counts_follow_valence() {
    let toolkit = FixtureToolkit::new();

    // Methane: C + 4 H.
    let mol = toolkit.parse_smiles("C").unwrap();
    let mol = toolkit.add_explicit_hydrogens(&mol);
    assert_eq!(toolkit.num_atoms(&mol), 5);

    // Ethanol skeleton: 3 heavy + (3 + 2 + 1) H.
    let mol = toolkit.parse_smiles("CCO").unwrap();
    let mol = toolkit.add_explicit_hydrogens(&mol);
    assert_eq!(toolkit.num_atoms(&mol), 9);
}

#[test]
fn test_embedding_is_seed_deterministic() {
    let toolkit = FixtureToolkit::new();
    let mol = toolkit.parse_smiles("CCO").unwrap();
    let mol = toolkit.add_explicit_hydrogens(&mol);

    let conf1 = toolkit.embed(&mol, 42).unwrap();
    let conf2 = toolkit.embed(&mol, 42).unwrap();
    assert_eq!(conf1.0, conf2.0);
    assert_eq!(conf1.num_atoms(), 9);

    let other_seed = toolkit.embed(&mol, 7).unwrap();
    assert_ne!(conf1.0, other_seed.0);
}

#[test]
fn test_embedding_failure_modes() {
    let toolkit = FixtureToolkit::new();
    let empty = toolkit.parse_smiles("").unwrap();
    assert!(toolkit.embed(&empty, 42).is_none());

    let disabled = FixtureToolkit::with_embedding_disabled();
    let mol = disabled.parse_smiles("CCO").unwrap();
    assert!(disabled.embed(&mol, 42).is_none());
}

#[test]
fn test_fingerprint_width_is_respected() {
    let toolkit = FixtureToolkit::new();
    let mol = toolkit.parse_smiles("CCO").unwrap();

    let fp = toolkit.morgan_fingerprint(&mol, 2, 512);
    assert_eq!(fp.0.len(), 512);
    assert!(fp.0.count_ones() > 0);
}
