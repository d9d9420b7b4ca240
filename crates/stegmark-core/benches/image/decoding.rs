use criterion::{criterion_group, criterion_main, Criterion};
use image::{ImageBuffer, Rgba, RgbaImage};
use stegmark_core::{CodecOptions, LsbCodec, SecretKey};

fn carrier_image() -> RgbaImage {
    ImageBuffer::from_fn(512, 512, |x, y| Rgba([(x ^ y) as u8, x as u8, y as u8, 255]))
}

pub fn image_decoding(c: &mut Criterion) {
    let key = SecretKey::new("SuperSecret42").expect("Key is not valid");
    let opts = CodecOptions::default();
    let watermarked = LsbCodec::embed_text(&carrier_image(), &key, "Hello World!")
        .expect("Cannot embed watermark")
        .image;

    c.bench_function("Image Decoding", |b| {
        b.iter(|| LsbCodec::extract(&watermarked, &key, &opts))
    });

    c.bench_function("Image Decoding without watermark", |b| {
        let plain_image = carrier_image();
        b.iter(|| LsbCodec::extract_raw(&plain_image, &key, &opts))
    });
}

criterion_group!(benches, image_decoding);
criterion_main!(benches);
