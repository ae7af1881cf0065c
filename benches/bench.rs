//! Criterion benchmarks for the uniword tokenizer.
//!
//! Covers the stages of a tokenize call:
//! - UTF-8 → UTF-16 conversion with the offset map
//! - Transform rule-set application
//! - Full tokenization for several locales, UAX #29 and dictionary segmented

use std::hint::black_box;

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use uniword::analysis::codec::{MalformedInputPolicy, Utf16Text};
use uniword::analysis::engine::BuiltinCapabilities;
use uniword::analysis::token::{Flow, TokenFlags, TokenizeFlags};
use uniword::analysis::tokenizer::{SegmentingTokenizer, Tokenizer};
use uniword::analysis::transliterator::RuleSetTransliterator;
use uniword::config::{ROOT_RULES, TokenizerConfig};

/// Generate a mixed-script document of roughly `words` words.
fn generate_text(words: usize) -> String {
    let vocabulary = [
        "search", "Ｅｎｇｉｎｅ", "café", "Straße", "Привет", "мир", "Ωμέγα", "カタカナ", "ひらがな",
        "東京", "42", "naïve", "𝐁𝐨𝐥𝐝", "résumé", "漢語", "العربية", "שלום", "ภาษาไทย",
    ];
    let mut text = String::new();
    for i in 0..words {
        if i > 0 {
            text.push_str(if i % 7 == 0 { ", " } else { " " });
        }
        text.push_str(vocabulary[(i * 31 + 7) % vocabulary.len()]);
    }
    text
}

fn bench_codec(c: &mut Criterion) {
    let text = generate_text(1000);
    let mut group = c.benchmark_group("codec");
    group.throughput(Throughput::Bytes(text.len() as u64));

    group.bench_function("utf16_offset_map", |b| {
        b.iter(|| Utf16Text::from_utf8(black_box(text.as_bytes()), MalformedInputPolicy::Reject))
    });

    group.finish();
}

fn bench_transform(c: &mut Criterion) {
    let words: Vec<&str> = vec!["Ｅｎｇｉｎｅ", "Straße", "Привет", "カタカナ", "résumé", "漢語", "العربية"];
    let root = RuleSetTransliterator::new(ROOT_RULES).unwrap();
    let lower = RuleSetTransliterator::new("Lower").unwrap();

    let mut group = c.benchmark_group("transform");
    group.bench_function("root_rules", |b| {
        b.iter(|| {
            for word in &words {
                black_box(root.apply(black_box(word)));
            }
        })
    });
    group.bench_function("lower_only", |b| {
        b.iter(|| {
            for word in &words {
                black_box(lower.apply(black_box(word)));
            }
        })
    });
    group.finish();
}

fn bench_tokenize(c: &mut Criterion) {
    let text = generate_text(1000);
    let mut group = c.benchmark_group("tokenize");
    group.throughput(Throughput::Bytes(text.len() as u64));

    for config in [
        TokenizerConfig::default(),
        TokenizerConfig::for_locale("ja"),
        TokenizerConfig::for_locale("ru"),
        TokenizerConfig::for_locale("th"),
    ] {
        let mut tokenizer = SegmentingTokenizer::create(&config, &BuiltinCapabilities).unwrap();
        group.bench_function(config.name.as_str(), |b| {
            b.iter(|| {
                let mut count = 0usize;
                let mut sink = |_: TokenFlags, token: &[u8], _: usize, _: usize| {
                    count += token.len();
                    Flow::Continue
                };
                tokenizer
                    .tokenize(TokenizeFlags::DOCUMENT, black_box(text.as_bytes()), None, &mut sink)
                    .unwrap();
                black_box(count)
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_codec, bench_transform, bench_tokenize);
criterion_main!(benches);
