use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde::{Deserialize, Serialize};
use tomlite::{from_str, read, to_string, write, Table};

#[derive(Serialize, Deserialize, Clone)]
struct Server {
    host: String,
    port: u16,
    enabled: bool,
}

#[derive(Serialize, Deserialize, Clone)]
struct Product {
    sku: String,
    name: String,
    price: f64,
    quantity: u32,
}

#[derive(Serialize, Deserialize, Clone)]
struct Catalog {
    products: Vec<Product>,
}

const DOCUMENT: &str = r#"
# This is a TOML document.

title = "TOML Example"

[owner]
name = "Tom Preston-Werner"
dob = 1979-05-27T07:32:00-08:00

[database]
server = "192.168.1.1"
ports = [ 8001, 8001, 8002 ]
connection_max = 5000
enabled = true

[servers]

  [servers.alpha]
  ip = "10.0.0.1"
  dc = "eqdc10"

  [servers.beta]
  ip = "10.0.0.2"
  dc = "eqdc10"

[clients]
data = [ ["gamma", "delta"], [1, 2] ]
hosts = [
  "alpha",
  "omega"
]
"#;

fn catalog(size: u32) -> Catalog {
    Catalog {
        products: (0..size)
            .map(|i| Product {
                sku: format!("SKU{}", i),
                name: format!("Product {}", i),
                price: 9.99 + f64::from(i),
                quantity: i,
            })
            .collect(),
    }
}

fn benchmark_read_document(c: &mut Criterion) {
    c.bench_function("read_document", |b| b.iter(|| read(black_box(DOCUMENT))));
}

fn benchmark_write_document(c: &mut Criterion) {
    let doc = read(DOCUMENT).unwrap();
    c.bench_function("write_document", |b| b.iter(|| write(black_box(&doc))));
}

fn benchmark_serialize_simple(c: &mut Criterion) {
    let server = Server {
        host: "0.0.0.0".to_string(),
        port: 8080,
        enabled: true,
    };

    c.bench_function("serialize_simple_struct", |b| {
        b.iter(|| to_string(black_box(&server)))
    });
}

fn benchmark_deserialize_simple(c: &mut Criterion) {
    let text = "host = \"0.0.0.0\"\nport = 8080\nenabled = true\n";

    c.bench_function("deserialize_simple_struct", |b| {
        b.iter(|| from_str::<Server>(black_box(text)))
    });
}

fn benchmark_table_arrays(c: &mut Criterion) {
    let mut group = c.benchmark_group("table_arrays");

    for size in [10, 50, 100, 500].iter() {
        let data = catalog(*size);
        let text = to_string(&data).unwrap();

        group.bench_with_input(BenchmarkId::new("serialize", size), &data, |b, data| {
            b.iter(|| to_string(black_box(data)))
        });
        group.bench_with_input(BenchmarkId::new("deserialize", size), &text, |b, text| {
            b.iter(|| from_str::<Catalog>(black_box(text)))
        });
    }
    group.finish();
}

fn benchmark_scalars(c: &mut Criterion) {
    let mut group = c.benchmark_group("scalars");

    let integers: String = (0..100).map(|i| format!("i{} = {}\n", i, i * 12_345_679)).collect();
    let floats: String = (0..100).map(|i| format!("f{} = {:?}\n", i, f64::from(i) * 1.5e-3)).collect();
    let dates: String = (0..100)
        .map(|i| format!("d{} = 2015-03-{:02}T19:04:35+01:00\n", i, i % 28 + 1))
        .collect();
    let strings: String = (0..100)
        .map(|i| format!("s{} = \"line {}\\twith \\\"escapes\\\" \\u00E9\"\n", i, i))
        .collect();

    group.bench_function("read_integers", |b| b.iter(|| read(black_box(&integers))));
    group.bench_function("read_floats", |b| b.iter(|| read(black_box(&floats))));
    group.bench_function("read_dates", |b| b.iter(|| read(black_box(&dates))));
    group.bench_function("read_strings", |b| b.iter(|| read(black_box(&strings))));

    group.finish();
}

fn benchmark_comparison_with_json(c: &mut Criterion) {
    let doc: Table = read(DOCUMENT).unwrap();
    let json = serde_json::to_string(&doc).unwrap();

    let mut group = c.benchmark_group("comparison");

    group.bench_function("toml_read", |b| b.iter(|| read(black_box(DOCUMENT))));
    group.bench_function("json_read", |b| {
        b.iter(|| serde_json::from_str::<Table>(black_box(&json)))
    });

    group.finish();
}

fn benchmark_roundtrip(c: &mut Criterion) {
    c.bench_function("roundtrip_document", |b| {
        b.iter(|| {
            let doc = read(black_box(DOCUMENT)).unwrap();
            let _text = write(black_box(&doc)).unwrap();
        })
    });
}

criterion_group!(
    benches,
    benchmark_read_document,
    benchmark_write_document,
    benchmark_serialize_simple,
    benchmark_deserialize_simple,
    benchmark_table_arrays,
    benchmark_scalars,
    benchmark_comparison_with_json,
    benchmark_roundtrip
);
criterion_main!(benches);
