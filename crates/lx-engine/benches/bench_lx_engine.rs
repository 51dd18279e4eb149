use criterion::{black_box, criterion_group, criterion_main, Criterion};
use lx_engine::Compressor;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const VOCAB: &[&str] = &[
    "the", "quick", "brown", "fox", "jumps", "over", "lazy", "dog", "a", "and", "in", "of", "to",
    "it", "is", "was", "for", "on", "with", "as", "his", "they", "at", "be", "this", "have",
    "from", "or", "one", "had", "by", "word", "but", "not", "what", "all", "were", "when", "we",
    "there", "can", "an", "your", "which", "their", "said", "if", "do", "will", "each",
];

fn canonical_words() -> Vec<String> {
    VOCAB.iter().map(|w| w.to_string()).collect()
}

/// Build a corpus with natural-looking repetition: common stock phrases
/// interleaved with randomly drawn vocabulary words.
fn generate_text(size_kb: usize) -> String {
    let mut rng = StdRng::seed_from_u64(42);
    let stock = [
        "the quick brown fox jumps over the lazy dog",
        "in the middle of the night",
        "at the end of the day",
        "one of the words in this text",
    ];
    let mut text = String::with_capacity(size_kb * 1024);
    while text.len() < size_kb * 1024 {
        if rng.gen_bool(0.4) {
            text.push_str(stock[rng.gen_range(0..stock.len())]);
        } else {
            for _ in 0..8 {
                text.push_str(VOCAB[rng.gen_range(0..VOCAB.len())]);
                text.push(' ');
            }
        }
        text.push_str(". ");
    }
    text.truncate(size_kb * 1024);
    text
}

fn bench_compress(c: &mut Criterion) {
    let canonical = canonical_words();
    let compressor = Compressor::default();
    for &size_kb in &[1usize, 10, 100] {
        let text = generate_text(size_kb);
        c.bench_function(&format!("compress_{size_kb}kb"), |b| {
            b.iter(|| black_box(compressor.compress(black_box(&text), &canonical).unwrap()))
        });
    }
}

fn bench_decompress(c: &mut Criterion) {
    let canonical = canonical_words();
    let compressor = Compressor::default();
    let text = generate_text(10);
    let doc = compressor.compress(&text, &canonical).unwrap();
    c.bench_function("decompress_10kb", |b| {
        b.iter(|| {
            black_box(
                compressor
                    .decompress(black_box(&doc.payload), &doc.dictionary)
                    .unwrap(),
            )
        })
    });
}

criterion_group!(benches, bench_compress, bench_decompress);
criterion_main!(benches);
