use std::io::Cursor;

use super::*;

fn png_bytes(img: image::RgbaImage) -> Vec<u8> {
    let mut buf = Vec::new();
    DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

/// Top half red, bottom half blue.
fn two_band(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgba8(image::RgbaImage::from_fn(width, height, |_, y| {
        if y < height / 2 {
            image::Rgba([255, 0, 0, 255])
        } else {
            image::Rgba([0, 0, 255, 255])
        }
    }))
}

#[test]
fn decode_png_dimensions() {
    let img = image::RgbaImage::from_raw(2, 1, vec![1, 2, 3, 255, 4, 5, 6, 255]).unwrap();
    let decoded = decode_image(&png_bytes(img)).unwrap();
    assert_eq!(image_size(&decoded), Size::new(2, 1));
}

#[test]
fn decode_garbage_fails() {
    assert!(decode_image(b"not an image").is_err());
}

#[test]
fn missing_file_is_missing_input() {
    let err = load_image(Path::new("/nope/portrait.png")).unwrap_err();
    assert!(matches!(err, CardError::MissingInput(_)));
}

#[test]
fn premultiply_matches_rounded_formula() {
    let mut px = [100u8, 50, 200, 128];
    premultiply_rgba8_in_place(&mut px);
    assert_eq!(
        px,
        [
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128
        ]
    );
    let mut clear = [9u8, 9, 9, 0];
    premultiply_rgba8_in_place(&mut clear);
    assert_eq!(clear, [0, 0, 0, 0]);
}

#[test]
fn demultiply_inverts_opaque_and_half_alpha() {
    let mut px = [50u8, 25, 100, 128];
    demultiply_rgba8_in_place(&mut px);
    assert_eq!(px, [100, 50, 199, 128]);
    let mut opaque = [10u8, 20, 30, 255];
    demultiply_rgba8_in_place(&mut opaque);
    assert_eq!(opaque, [10, 20, 30, 255]);
}

#[test]
fn cover_resize_fills_target_exactly() {
    let s = cover_resize(&two_band(40, 80), Size::new(30, 30), CropGravity::Center).unwrap();
    assert_eq!(s.size(), Size::new(30, 30));
    assert_eq!(s.data().len(), 30 * 30 * 4);
}

#[test]
fn top_gravity_keeps_the_top() {
    let img = two_band(20, 80);
    let top = cover_resize(&img, Size::new(20, 20), CropGravity::Top).unwrap();
    let bottom = cover_resize(&img, Size::new(20, 20), CropGravity::Bottom).unwrap();
    assert_eq!(top.pixel(10, 10), Some([255, 0, 0, 255]));
    assert_eq!(bottom.pixel(10, 10), Some([0, 0, 255, 255]));
}

#[test]
fn wide_images_crop_sides_evenly() {
    let img = DynamicImage::ImageRgba8(image::RgbaImage::from_fn(90, 30, |x, _| {
        if (30..60).contains(&x) {
            image::Rgba([0, 255, 0, 255])
        } else {
            image::Rgba([0, 0, 0, 255])
        }
    }));
    let s = cover_resize(&img, Size::new(30, 30), CropGravity::Top).unwrap();
    assert_eq!(s.pixel(15, 15), Some([0, 255, 0, 255]));
}

#[test]
fn image_to_surface_premultiplies() {
    let img = DynamicImage::ImageRgba8(image::RgbaImage::from_pixel(
        3,
        2,
        image::Rgba([200, 100, 0, 128]),
    ));
    let s = image_to_surface(&img).unwrap();
    assert_eq!(s.size(), Size::new(3, 2));
    assert_eq!(s.pixel(2, 1), Some([100, 50, 0, 128]));
}
