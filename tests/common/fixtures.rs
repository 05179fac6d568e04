//! Canned response bodies shared across harnesses.

/// A small but valid PNG, encoded in-memory. 40×30 so tests can verify the
/// interpreter resizes onto the fixed square canvas.
pub fn tiny_png() -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(40, 30, image::Rgba([255, 255, 255, 255]));
    let mut cursor = std::io::Cursor::new(Vec::new());
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut cursor, image::ImageFormat::Png)
        .expect("encoding a fixture PNG cannot fail");
    cursor.into_inner()
}

/// A minimal SDF document — enough structure for byte-equality assertions.
pub fn tiny_sdf() -> Vec<u8> {
    b"2244\n  -OEChem-01010000002D\n\n 21 21  0     0  0  0  0  0  0999 V2000\nM  END\n$$$$\n"
        .to_vec()
}

/// The property table the service returns for aspirin (CID 2244), trimmed.
pub fn aspirin_properties() -> &'static str {
    r#"{"PropertyTable":{"Properties":[{"CID":2244,"MolecularFormula":"C9H8O4","MolecularWeight":"180.16","SMILES":"CC(=O)OC1=CC=CC=C1C(=O)O"}]}}"#
}
