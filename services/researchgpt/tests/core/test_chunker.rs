// Fixed-stride chunking properties
//
// Window starts advance by `size - overlap`, lengths are
// `min(size, N - start)`, and stripping the overlap from every chunk
// after the first reassembles the input.

use researchgpt::core::indexer::Chunker;

fn windows(text: &str, size: usize, overlap: usize) -> Vec<String> {
    Chunker::new(size, overlap)
        .unwrap()
        .chunks(text)
        .map(|w| w.text.to_string())
        .collect()
}

fn reassemble(chunks: &[String], overlap: usize) -> String {
    let mut out = String::new();
    for (i, chunk) in chunks.iter().enumerate() {
        if i == 0 {
            out.push_str(chunk);
        } else {
            out.extend(chunk.chars().skip(overlap));
        }
    }
    out
}

#[test]
fn test_documented_example() {
    assert_eq!(
        windows("abcdefghij", 4, 2),
        ["abcd", "cdef", "efgh", "ghij", "ij"]
    );
}

#[test]
fn test_starts_follow_stride() {
    let text: String = ('a'..='z').cycle().take(103).collect();

    for (size, overlap) in [(10, 0), (10, 3), (7, 6), (20, 5), (1000, 200)] {
        let chunker = Chunker::new(size, overlap).unwrap();
        let stride = size - overlap;
        let starts: Vec<usize> = chunker.chunks(&text).map(|w| w.char_start).collect();

        if text.len() <= size {
            assert_eq!(starts, [0]);
            continue;
        }

        let expected: Vec<usize> = (0..text.len()).step_by(stride).collect();
        assert_eq!(starts, expected, "size={size} overlap={overlap}");
    }
}

#[test]
fn test_lengths_are_clamped_to_text_end() {
    let text: String = "0123456789".repeat(5);
    let n = text.chars().count();
    let chunker = Chunker::new(12, 4).unwrap();

    for window in chunker.chunks(&text) {
        let len = window.text.chars().count();
        assert_eq!(len, 12usize.min(n - window.char_start));
        assert!(len > 0);
    }
}

#[test]
fn test_reassembly_reproduces_text() {
    let samples = [
        "The quick brown fox jumps over the lazy dog.".repeat(9),
        "量子コンピュータは重ね合わせを利用する。".repeat(12),
        "Rust 🦀 + research 🔬 = reports 📄 ".repeat(15),
    ];

    for text in &samples {
        for (size, overlap) in [(16, 0), (16, 5), (33, 32), (1000, 200)] {
            let chunks = windows(text, size, overlap);
            assert_eq!(&reassemble(&chunks, overlap), text, "size={size} overlap={overlap}");
        }
    }
}

#[test]
fn test_short_text_is_single_chunk() {
    assert_eq!(windows("hello", 10, 3), ["hello"]);
    assert_eq!(windows("hello", 5, 2), ["hello"]);
    assert_eq!(windows("🦀🦀🦀", 3, 1), ["🦀🦀🦀"]);
}

#[test]
fn test_empty_text_has_no_chunks() {
    assert!(windows("", 10, 2).is_empty());
}

#[test]
fn test_overlap_not_below_size_rejected() {
    for (size, overlap) in [(10, 10), (10, 11), (1, 1), (0, 0)] {
        let err = Chunker::new(size, overlap).unwrap_err();
        assert!(err.is_bad_request(), "size={size} overlap={overlap}");
    }
}

#[test]
fn test_byte_offsets_slice_original() {
    let text = "naïve café – déjà vu, señor! ".repeat(6);
    let chunker = Chunker::new(17, 5).unwrap();

    for chunk in chunker.chunk_text(&text) {
        assert_eq!(&text[chunk.start_offset..chunk.end_offset], chunk.text);
    }
}

#[test]
fn test_chunk_indices_are_sequential() {
    let text = "x".repeat(100);
    let chunks = Chunker::new(30, 10).unwrap().chunk_text(&text);

    let indices: Vec<usize> = chunks.iter().map(|c| c.chunk_index).collect();
    assert_eq!(indices, (0..chunks.len()).collect::<Vec<_>>());
}

#[test]
fn test_iterator_is_fused() {
    let chunker = Chunker::new(4, 1).unwrap();
    let mut iter = chunker.chunks("abcdefg");

    while iter.next().is_some() {}
    assert!(iter.next().is_none());
    assert!(iter.next().is_none());
}
