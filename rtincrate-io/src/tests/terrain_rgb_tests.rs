use crate::*;
use approx::assert_relative_eq;

/// Inverse of the Mapbox packing for whole decimetres
fn mapbox_pixel(metres: f64) -> [u8; 3] {
    let v = ((metres + 10000.0) * 10.0).round() as u32;
    [(v >> 16) as u8, (v >> 8) as u8, v as u8]
}

#[test]
fn test_encoding_from_str() {
    assert_eq!("mapbox".parse::<TerrainEncoding>(), Ok(TerrainEncoding::Mapbox));
    assert_eq!("Terrarium".parse::<TerrainEncoding>(), Ok(TerrainEncoding::Terrarium));
    assert_eq!(
        "png".parse::<TerrainEncoding>(),
        Err(DecodeError::UnknownEncoding { name: "png".to_string() })
    );
    assert_eq!(TerrainEncoding::Terrarium.to_string(), "terrarium");
}

#[test]
fn test_mapbox_values() {
    let enc = TerrainEncoding::Mapbox;
    assert_relative_eq!(enc.decode(0, 0, 0), -10000.0);
    assert_relative_eq!(enc.decode(1, 134, 160), 0.0);
    let [r, g, b] = mapbox_pixel(1234.5);
    assert_relative_eq!(enc.decode(r, g, b), 1234.5, epsilon = 1e-3);
}

#[test]
fn test_terrarium_values() {
    let enc = TerrainEncoding::Terrarium;
    assert_relative_eq!(enc.decode(128, 0, 0), 0.0);
    assert_relative_eq!(enc.decode(128, 100, 128), 100.5);
    assert_relative_eq!(enc.decode(0, 0, 0), -32768.0);
}

#[test]
fn test_decode_rgba_grid() {
    let heights = [0.0, 10.0, 20.0, 30.0];
    let pixels: Vec<u8> = heights
        .iter()
        .flat_map(|&h| {
            let [r, g, b] = mapbox_pixel(h);
            [r, g, b, 255]
        })
        .collect();
    let hm = decode_elevations(&pixels, 2, 2, 4, TerrainEncoding::Mapbox).unwrap();
    assert_eq!(hm.width(), 2);
    for (i, &h) in heights.iter().enumerate() {
        let (x, y) = ((i % 2) as u32, (i / 2) as u32);
        assert_relative_eq!(hm.elevation_at(x, y).unwrap(), h as f32, epsilon = 1e-3);
    }
}

#[test]
fn test_decode_errors() {
    let pixels = vec![0u8; 9 * 3];
    assert_eq!(
        decode_elevations(&pixels, 3, 3, 2, TerrainEncoding::Mapbox).unwrap_err(),
        DecodeError::ChannelCount { channels: 2 }
    );
    assert_eq!(
        decode_elevations(&pixels[1..], 3, 3, 3, TerrainEncoding::Mapbox).unwrap_err(),
        DecodeError::BufferLength { expected: 27, actual: 26 }
    );
    // decodes fine but 4x4 cannot be tiled by the hierarchy
    let pixels = vec![0u8; 16 * 3];
    assert!(matches!(
        decode_elevations(&pixels, 4, 4, 3, TerrainEncoding::Terrarium),
        Err(DecodeError::Core(rtincrate_core::Error::InvalidDimensions(_)))
    ));
}

#[test]
fn test_decode_size_overflow() {
    for (w, h, c) in [(usize::MAX, 2, 3), (usize::MAX / 4, 8, 3), (3, usize::MAX / 2, 4)] {
        assert!(matches!(
            decode_elevations(&[], w, h, c, TerrainEncoding::Mapbox),
            Err(DecodeError::Core(rtincrate_core::Error::InvalidDimensions(_)))
        ));
    }
}
