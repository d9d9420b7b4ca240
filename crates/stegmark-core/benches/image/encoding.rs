use criterion::{criterion_group, criterion_main, Criterion};
use image::{ImageBuffer, Rgba, RgbaImage};
use stegmark_core::{LsbCodec, Permutation, SecretKey};

fn carrier_image() -> RgbaImage {
    ImageBuffer::from_fn(512, 512, |x, y| Rgba([(x ^ y) as u8, x as u8, y as u8, 255]))
}

pub fn image_encoding(c: &mut Criterion) {
    let key = SecretKey::new("SuperSecret42").expect("Key is not valid");
    let plain_image = carrier_image();

    c.bench_function("Permutation 512x512", |b| {
        b.iter(|| Permutation::generate(&key, 512 * 512))
    });

    c.bench_function("Image Encoding", |b| {
        b.iter(|| {
            LsbCodec::embed_text(&plain_image, &key, "Hello World!")
                .expect("Cannot embed watermark")
        })
    });
}

criterion_group!(benches, image_encoding);
criterion_main!(benches);
