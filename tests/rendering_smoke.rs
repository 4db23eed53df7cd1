use certgen::{CertificateRecord, FixedSerial, Renderer};

#[test]
fn smoke_render_default_scale() {
    let renderer = Renderer::with_serial(1.0, Box::new(FixedSerial(1)));
    let img = renderer
        .render(&CertificateRecord::new("Jane Doe", "Cloud Computing Fundamentals"))
        .expect("render");
    assert_eq!(img.width(), 1200);
    assert_eq!(img.height(), 800);
}
