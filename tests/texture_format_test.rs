use rtt_card::data_structures::texture::{
    CANDIDATE_FORMATS, Precision, choose_format, mip_level_count, precision_of,
};
use wgpu::TextureFormat;

#[test]
fn should_prefer_smallest_sufficient_format() {
    let wanted = Precision::rgba(8, 8, 8, 0);
    assert_eq!(
        choose_format(&CANDIDATE_FORMATS, wanted),
        Some(TextureFormat::Rgba8UnormSrgb)
    );

    let supported = [TextureFormat::Rgba32Float, TextureFormat::Rgba16Float];
    assert_eq!(
        choose_format(&supported, wanted),
        Some(TextureFormat::Rgba16Float)
    );
}

#[test]
fn should_break_ties_by_order() {
    let supported = [TextureFormat::Bgra8Unorm, TextureFormat::Rgba8Unorm];
    assert_eq!(
        choose_format(&supported, Precision::rgba(8, 8, 8, 8)),
        Some(TextureFormat::Bgra8Unorm)
    );
}

#[test]
fn should_pick_deep_format_for_high_precision() {
    assert_eq!(
        choose_format(&CANDIDATE_FORMATS, Precision::rgba(10, 10, 10, 0)),
        Some(TextureFormat::Rgb10a2Unorm)
    );
    assert_eq!(
        choose_format(&CANDIDATE_FORMATS, Precision::rgba(10, 10, 10, 8)),
        Some(TextureFormat::Rgba16Float)
    );
}

#[test]
fn should_report_no_format_when_nothing_qualifies() {
    assert_eq!(choose_format(&[], Precision::rgba(8, 8, 8, 0)), None);
    assert_eq!(
        choose_format(&[TextureFormat::Rgba8Unorm], Precision::rgba(16, 16, 16, 0)),
        None
    );
    // formats without a known precision are never chosen
    assert_eq!(
        choose_format(&[TextureFormat::R8Unorm], Precision::default()),
        None
    );
}

#[test]
fn should_know_precision_of_every_candidate() {
    for format in CANDIDATE_FORMATS {
        assert!(precision_of(format).is_some(), "{:?}", format);
    }
    assert!(Precision::rgba(8, 8, 8, 8).satisfies(&Precision::rgba(8, 8, 8, 0)));
    assert!(!Precision::rgba(10, 10, 10, 2).satisfies(&Precision::rgba(8, 8, 8, 8)));
}

#[test]
fn should_count_full_mip_chain() {
    assert_eq!(mip_level_count(512, 512), 10);
    assert_eq!(mip_level_count(1, 1), 1);
    assert_eq!(mip_level_count(0, 0), 1);
    assert_eq!(mip_level_count(800, 600), 10);
    assert_eq!(mip_level_count(1024, 2), 11);
}
