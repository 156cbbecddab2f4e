use std::path::Path;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use phishguard::config::DataConfig;
use phishguard::Detector;

const URLS: &[&str] = &[
    "https://www.google.com",
    "http://192.168.0.1/login",
    "http://secure-paypal.account-update.info/signin?session=8f3a",
    "https://mail.example.co.uk:8443/inbox",
];

fn detector() -> Detector {
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures");
    let data = DataConfig {
        corpus_path: fixtures.join("unigram_freq.csv"),
        wordlist_path: Some(fixtures.join("words.txt")),
        suffix_list_path: fixtures.join("public_suffix_list.dat"),
        model_path: fixtures.join("model.json"),
    };
    Detector::from_config(&data).expect("fixture data loads")
}

fn bench_preprocess(c: &mut Criterion) {
    let detector = detector();
    c.bench_function("preprocess_url", |b| {
        b.iter(|| {
            for url in URLS {
                let _ = black_box(detector.features(black_box(url)));
            }
        })
    });
}

fn bench_assess(c: &mut Criterion) {
    let detector = detector();
    c.bench_function("assess", |b| {
        b.iter(|| {
            for url in URLS {
                let _ = black_box(detector.assess(black_box(url)));
            }
        })
    });
}

fn bench_segmentation(c: &mut Criterion) {
    let detector = detector();
    let scorer = detector.extractor().scorer();
    c.bench_function("compute_ratio", |b| {
        b.iter(|| scorer.compute_ratio(black_box("securepaypalaccountupdateverify")))
    });
}

criterion_group!(benches, bench_preprocess, bench_assess, bench_segmentation);
criterion_main!(benches);
