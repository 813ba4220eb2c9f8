use std::collections::HashSet;

use plasmid_designer::assembly::PlasmidAssembler;
use plasmid_designer::parts::{DesignWhitelist, Part, PartCatalog, PartCategory, DEFAULT_ORI_KEY};
use plasmid_designer::seq::{compute_skew_minimum, extract_ori, skew_curve, NucleotideSequence, Topology};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_bases(rng: &mut StdRng, len: usize, alphabet: &[u8]) -> String {
    (0..len)
        .map(|_| alphabet[rng.gen_range(0..alphabet.len())] as char)
        .collect()
}

fn random_genome(rng: &mut StdRng, len: usize, alphabet: &[u8]) -> NucleotideSequence {
    NucleotideSequence::from_str_named("random", &random_bases(rng, len, alphabet)).unwrap()
}

#[test]
fn test_skew_minimum_is_global_and_first() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..50 {
        let len = rng.gen_range(1..500);
        let genome = random_genome(&mut rng, len, b"ACGTN");
        if genome.composition().unambiguous() == 0 {
            continue;
        }
        let min_pos = compute_skew_minimum(&genome).unwrap();
        let curve = skew_curve(&genome);
        let values = curve.values();
        let min_value = *values.iter().min().unwrap();

        assert_eq!(values[min_pos], min_value);
        assert!(values[..min_pos].iter().all(|&v| v > min_value));
        assert_eq!(compute_skew_minimum(&genome).unwrap(), min_pos);
    }
}

#[test]
fn test_circular_window_always_full_length() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..100 {
        let len = rng.gen_range(1..300);
        let genome = random_genome(&mut rng, len, b"ACGT");
        let center = rng.gen_range(0..len);
        let window = rng.gen_range(1..700);

        let ori = extract_ori(&genome, center, window, Topology::Circular).unwrap();
        assert_eq!(ori.len(), window);
        // First base is the one `window / 2` before the center, modulo length
        let first = (center as i64 - (window / 2) as i64).rem_euclid(len as i64) as usize;
        assert_eq!(ori.as_bytes()[0], genome.as_bytes()[first]);
    }
}

#[test]
fn test_resolve_partitions_whitelist() {
    let mut rng = StdRng::seed_from_u64(23);
    let known: Vec<String> = (0..10).map(|i| format!("part{}", i)).collect();
    let catalog = PartCatalog::from_parts(
        known
            .iter()
            .map(|n| Part::new(n, PartCategory::Marker, "ACGT").unwrap()),
    );

    for _ in 0..50 {
        let names: Vec<String> = (0..rng.gen_range(0..15))
            .map(|_| format!("part{}", rng.gen_range(0..20)))
            .collect();
        let res = catalog.resolve(&names);

        assert_eq!(res.resolved.len() + res.missing.len(), names.len());
        let resolved: Vec<&str> = res.resolved.iter().map(|p| p.name.as_str()).collect();
        let expected_resolved: Vec<&str> = names
            .iter()
            .filter(|n| catalog.get(n).is_some())
            .map(String::as_str)
            .collect();
        assert_eq!(resolved, expected_resolved);

        let resolved_set: HashSet<&str> = resolved.iter().copied().collect();
        assert!(res.missing.iter().all(|m| !resolved_set.contains(m.as_str())));
    }
}

#[test]
fn test_separator_count_matches_parts() {
    let mut rng = StdRng::seed_from_u64(42);
    let assembler = PlasmidAssembler::default();

    for _ in 0..30 {
        // No T anywhere outside the separator, so it cannot occur by accident
        let len = rng.gen_range(50..400);
        let genome = random_genome(&mut rng, len, b"ACG");
        let center = rng.gen_range(0..len);
        let ori = extract_ori(&genome, center, 60, Topology::Circular).unwrap();

        let parts: Vec<Part> = (0..8)
            .map(|i| {
                let name = if i % 3 == 0 { format!("s{}_site", i) } else { format!("m{}", i) };
                let category = PartCategory::infer(&name);
                let len = rng.gen_range(1..40);
                Part::new(&name, category, &random_bases(&mut rng, len, b"AC")).unwrap()
            })
            .collect();
        let catalog = PartCatalog::from_parts(parts[..5].to_vec());
        let defaults: Vec<Part> = (0..rng.gen_range(0..3))
            .map(|i| Part::new(&format!("d{}", i), PartCategory::DefaultGene, "ACCA").unwrap())
            .collect();

        let requested: Vec<&str> = parts.iter().map(|p| p.name.as_str()).collect();
        let whitelist = DesignWhitelist::from_names(&requested, DEFAULT_ORI_KEY);
        let result = assembler.assemble(&ori, &whitelist, &catalog, &defaults);

        let n = result.included().len();
        assert_eq!(n, 1 + 5 + defaults.len());
        assert_eq!(result.skipped().len(), 3);
        assert_eq!(result.sequence().matches(assembler.separator()).count(), n - 1);

        let again = assembler.assemble(&ori, &whitelist, &catalog, &defaults);
        assert_eq!(again.sequence(), result.sequence());
    }
}
