//! Locator Codec Benchmarks
//!
//! Benchmarks for element/locator canonicalization and canonical parsing.
//!
//! Run with: `cargo bench --bench locator_ops`

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use drivertrace::prelude::*;

fn bench_element_canonicalization(c: &mut Criterion) {
    let mut group = c.benchmark_group("element_canonicalization");

    let inputs = vec![
        (
            "xpath",
            "[[RemoteWebDriver: firefox on WINDOWS (a66f78e9668e4aa3b066239459f969fe)] -> xpath: .//*[@id='Country__c_body']/table/tbody/tr[2]/th/a]",
        ),
        ("id", "[[ChromeDriver: chrome on LINUX (4f1c)] -> id: submit]"),
        (
            "link_text",
            "[[ChromeDriver: chrome on LINUX (4f1c)] -> link text: Sign in]",
        ),
        (
            "css_fallback",
            "[[ChromeDriver: chrome on LINUX (4f1c)] -> css selector: div.main > a]",
        ),
        ("passthrough", "Foo.bar: baz"),
    ];

    for (name, input) in inputs {
        group.bench_with_input(BenchmarkId::from_parameter(name), &input, |bench, text| {
            bench.iter(|| from_element_string(black_box(text)));
        });
    }

    group.finish();
}

fn bench_by_canonicalization(c: &mut Criterion) {
    let mut group = c.benchmark_group("by_canonicalization");

    let inputs = vec![
        ("id", "By.id: submitBtn"),
        (
            "xpath",
            "By.xpath: .//*[@id='thePage:j_id39:searchblock:test:j_id45_lkwgt']/img",
        ),
        ("passthrough", "Foo.bar: baz"),
    ];

    for (name, input) in inputs {
        group.bench_with_input(BenchmarkId::from_parameter(name), &input, |bench, text| {
            bench.iter(|| from_by_string(black_box(text)));
        });
    }

    group.finish();
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_by");

    for kind in ByKind::ALL {
        let canonical = By::new(kind, "value").canonical();
        group.bench_with_input(
            BenchmarkId::from_parameter(kind.method_name()),
            &canonical,
            |bench, text| {
                bench.iter(|| By::parse(black_box(text)).unwrap());
            },
        );
    }

    group.finish();
}

fn bench_long_form(c: &mut Criterion) {
    c.bench_function("long_form_all_commands", |bench| {
        bench.iter(|| {
            for cmd in Command::ALL {
                black_box(cmd.long_form());
            }
        });
    });
}

criterion_group!(
    benches,
    bench_element_canonicalization,
    bench_by_canonicalization,
    bench_parse,
    bench_long_form
);
criterion_main!(benches);
