#![no_main]

use libfuzzer_sys::fuzz_target;
use chunksim::{DigestSequence, digest_bytes, similarity};

fuzz_target!(|input: (Vec<u8>, Vec<u8>)| {
    let (a, b) = input;

    for chunk_size in [1usize, 7, 64, 1024] {
        let da = digest_bytes(&a, chunk_size).unwrap();
        let db = digest_bytes(&b, chunk_size).unwrap();

        // Verify: one checksum per block, ceil(len / chunk_size)
        assert_eq!(da.len(), a.len().div_ceil(chunk_size));

        // Verify: every checksum fits the block bound
        for checksum in da.iter() {
            assert!(checksum.value() as usize <= chunk_size * 255);
        }

        // Verify: score is bounded and symmetric
        let score = similarity(&da, &db);
        assert!((0.0..=100.0).contains(&score));
        assert_eq!(score, similarity(&db, &da));

        // Verify: self-similarity is maximal for non-empty digests
        if !da.is_empty() {
            assert_eq!(similarity(&da, &da), 100.0);
        }

        // Verify: a tail on the longer side never changes the score
        if db.len() <= da.len() {
            let mut extended = da.clone().into_inner();
            extended.extend(db.iter().copied());
            let extended = DigestSequence::from(extended);
            assert_eq!(similarity(&db, &da), similarity(&db, &extended));
        }
    }
});
