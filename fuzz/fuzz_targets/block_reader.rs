#![no_main]

use std::io::{Cursor, Read};

use libfuzzer_sys::fuzz_target;
use chunksim::{BlockReader, digest_bytes, digest_reader, sum_reader};

/// Hands out at most `step` bytes per read call.
struct Trickle<'a> {
    data: &'a [u8],
    step: usize,
}

impl Read for Trickle<'_> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let n = self.step.min(buf.len()).min(self.data.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

fuzz_target!(|input: (Vec<u8>, u8)| {
    let (data, step) = input;
    let step = usize::from(step).max(1);

    for chunk_size in [1usize, 16, 1024] {
        let blocks: Vec<_> = BlockReader::new(Trickle { data: &data, step }, chunk_size)
            .map(|b| b.unwrap())
            .collect();

        // Verify: all blocks full except the last, offsets contiguous
        let mut expected_offset = 0u64;
        for (i, block) in blocks.iter().enumerate() {
            assert_eq!(block.index, i);
            assert_eq!(block.offset, expected_offset);
            assert!(!block.is_empty());
            if i + 1 < blocks.len() {
                assert_eq!(block.len(), chunk_size);
            }
            expected_offset += block.len() as u64;
        }
        assert_eq!(expected_offset, data.len() as u64);

        // Verify: reader and in-memory digests agree
        let digest = digest_reader(Cursor::new(&data), chunk_size).unwrap();
        assert_eq!(digest, digest_bytes(&data, chunk_size).unwrap());

        // Verify: whole-file sum equals the sum of block checksums
        let total = sum_reader(Cursor::new(&data), chunk_size).unwrap();
        let from_blocks: u64 = digest.iter().map(|c| u64::from(c.value())).sum();
        assert_eq!(total.sum.value(), from_blocks);
    }
});
