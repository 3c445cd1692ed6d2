//! Whole frame scenarios through `PlaneRender`, the way the BSP walk drives it

use math::{Angle, FixedPoint, Plane};
use render_trait::{FLAT_BYTES, LevelSpan, ShadeRef, SlopeSpan, SpanFiller};

use crate::{
    FlatSource, FlatTransform, LightTables, PlaneConfig, PlaneRender, RenderError, ViewPoint,
};

const SKY: usize = 0xFFFF;
const WIDTH: usize = 64;
const HEIGHT: usize = 40;

struct TestFlats {
    flats: Vec<Vec<u8>>,
    warped: Vec<usize>,
}

impl TestFlats {
    fn new() -> Self {
        Self {
            flats: (0..4u8)
                .map(|f| {
                    (0..FLAT_BYTES)
                        .map(|i| (i as u8).wrapping_mul(3) ^ f)
                        .collect()
                })
                .collect(),
            warped: vec![3],
        }
    }
}

impl FlatSource for TestFlats {
    fn translate(&self, picnum: usize) -> usize {
        // picture 7 is an animation currently showing flat 2
        if picnum == 7 { 2 } else { picnum }
    }

    fn pixels(&self, flat: usize) -> &[u8] {
        &self.flats[flat]
    }

    fn is_warped(&self, flat: usize) -> bool {
        self.warped.contains(&flat)
    }
}

/// Counts how many times each pixel is written, and where the flat data
/// came from
struct Coverage {
    hits: Vec<u32>,
    sources: Vec<usize>,
    sky: Vec<(i32, i32, i32)>,
    sky_shades: Vec<ShadeRef>,
    slope_spans: usize,
}

impl Coverage {
    fn new() -> Self {
        Self {
            hits: vec![0; WIDTH * HEIGHT],
            sources: Vec::new(),
            sky: Vec::new(),
            sky_shades: Vec::new(),
            slope_spans: 0,
        }
    }

    fn hit(&mut self, y: i32, x1: i32, x2: i32) {
        for x in x1..=x2 {
            self.hits[y as usize * WIDTH + x as usize] += 1;
        }
    }

    fn at(&self, x: usize, y: usize) -> u32 {
        self.hits[y * WIDTH + x]
    }
}

impl SpanFiller for Coverage {
    fn draw_span(&mut self, span: &LevelSpan) {
        self.sources.push(span.source.as_ptr() as usize);
        self.hit(span.y, span.x1, span.x2);
    }

    fn draw_slope_span(&mut self, span: &SlopeSpan) {
        assert_eq!(span.lighting.len(), (span.x2 - span.x1 + 1) as usize);
        self.slope_spans += 1;
        self.sources.push(span.source.as_ptr() as usize);
        self.hit(span.y, span.x1, span.x2);
    }

    fn draw_sky_column(&mut self, x: i32, yl: i32, yh: i32, shade: ShadeRef) {
        self.sky.push((x, yl, yh));
        self.sky_shades.push(shade);
    }
}

fn config() -> PlaneConfig {
    PlaneConfig {
        sky_flat: SKY,
        ..PlaneConfig::default()
    }
}

fn view() -> ViewPoint {
    ViewPoint::new(
        FixedPoint::from_int(32),
        FixedPoint::from_int(32),
        FixedPoint::from_int(41),
        Angle::ANG90,
    )
}

fn floor() -> Plane {
    Plane::floor(FixedPoint::ZERO)
}

fn ceiling() -> Plane {
    Plane::ceiling(FixedPoint::from_int(128))
}

/// What the wall renderer does for one sector's floor or ceiling
fn open(
    render: &mut PlaneRender,
    plane: Plane,
    picnum: usize,
    light: i32,
    start: i32,
    stop: i32,
    rows: (i32, i32),
) -> usize {
    let id = render.find_plane(plane, picnum, light, FlatTransform::IDENTITY);
    let id = render.check_plane(id, start, stop);
    let pl = render.visplane_mut(id);
    for x in start..=stop {
        pl.set_column(x, rows.0, rows.1);
    }
    id
}

#[test]
fn two_sectors_merge_into_one_visplane() {
    let mut render = PlaneRender::new(WIDTH, HEIGHT, config()).unwrap();
    render.clear_planes();
    let a = open(&mut render, floor(), 1, 160, 0, 9, (30, 39));
    let b = open(&mut render, floor(), 1, 160, 10, 19, (25, 39));
    assert_eq!(a, b);
    let pl = render.visplane(a);
    assert_eq!((pl.minx, pl.maxx), (0, 19));
    assert_eq!(render.pool().len(), 1);
}

#[test]
fn overlapping_claim_gets_its_own_visplane() {
    let mut render = PlaneRender::new(WIDTH, HEIGHT, config()).unwrap();
    render.clear_planes();
    let a = open(&mut render, floor(), 1, 160, 0, 9, (30, 39));
    let b = open(&mut render, floor(), 1, 160, 5, 12, (35, 39));
    assert_ne!(a, b);
    assert_eq!((render.visplane(a).minx, render.visplane(a).maxx), (0, 9));
    assert_eq!((render.visplane(b).minx, render.visplane(b).maxx), (5, 12));
}

#[test]
fn skies_share_a_visplane_and_draw_columns() {
    let mut render = PlaneRender::new(WIDTH, HEIGHT, config()).unwrap();
    render.clear_planes();
    let a = open(&mut render, ceiling(), SKY, 200, 0, 3, (0, 5));
    let b = open(&mut render, ceiling(), SKY, 48, 4, 7, (0, 9));
    assert_eq!(a, b);

    let mut cover = Coverage::new();
    render.draw_planes(&view(), &TestFlats::new(), &LightTables::new(), &mut cover);
    assert_eq!(cover.sky.len(), 8);
    assert_eq!(cover.sky[0], (0, 0, 5));
    assert_eq!(cover.sky[7], (7, 0, 9));
    assert!(cover.hits.iter().all(|&h| h == 0));
    assert!(cover.sky_shades.iter().all(|&s| s == ShadeRef::new(0, 0)));
}

#[test]
fn sky_follows_fixed_light_not_fixed_colormap() {
    let mut render = PlaneRender::new(WIDTH, HEIGHT, config()).unwrap();
    let flats = TestFlats::new();
    let lights = LightTables::new();

    let mut view = view();
    view.fixed_colormap = Some(ShadeRef::new(2, 0));
    render.clear_planes();
    open(&mut render, ceiling(), SKY, 160, 0, 3, (0, 5));
    let mut cover = Coverage::new();
    render.draw_planes(&view, &flats, &lights, &mut cover);
    assert_eq!(cover.sky_shades.len(), 4);
    assert!(cover.sky_shades.iter().all(|&s| s == ShadeRef::new(0, 0)));

    view.fixed_light = Some(7);
    let mut cover = Coverage::new();
    render.draw_planes(&view, &flats, &lights, &mut cover);
    assert_eq!(cover.sky_shades.len(), 4);
    assert!(cover.sky_shades.iter().all(|&s| s == ShadeRef::new(0, 7)));
}

#[test]
fn short_flat_skipped_and_reported_once() {
    let mut render = PlaneRender::new(WIDTH, HEIGHT, config()).unwrap();
    let mut flats = TestFlats::new();
    flats.flats[1].truncate(100);
    let lights = LightTables::new();

    for _ in 0..3 {
        render.clear_planes();
        open(&mut render, floor(), 1, 160, 0, 31, (30, 39));
        open(&mut render, floor(), 2, 160, 32, 63, (30, 39));
        let mut cover = Coverage::new();
        render.draw_planes(&view(), &flats, &lights, &mut cover);
        assert!((0..32).all(|x| cover.at(x, 35) == 0));
        assert!((32..64).all(|x| cover.at(x, 35) == 1));
    }
    assert_eq!(render.short_flats.len(), 1);
    assert!(render.short_flats.contains(&1));
}

#[test]
fn colormap_splits_visplanes() {
    let mut render = PlaneRender::new(WIDTH, HEIGHT, config()).unwrap();
    render.clear_planes();
    let a = render.find_plane(floor(), 1, 160, FlatTransform::IDENTITY);
    render.set_base_colormap(1);
    let b = render.find_plane(floor(), 1, 160, FlatTransform::IDENTITY);
    assert_ne!(a, b);
    assert_eq!(render.visplane(b).key.colormap, 1);
}

#[test]
fn every_open_pixel_drawn_once() {
    let mut render = PlaneRender::new(WIDTH, HEIGHT, config()).unwrap();
    render.clear_planes();

    // Floor below the horizon in two sectors, a ceiling above, and a ramp
    open(&mut render, floor(), 1, 160, 0, 31, (28, 39));
    open(&mut render, floor(), 2, 96, 32, 63, (24, 39));
    open(&mut render, ceiling(), 7, 160, 0, 63, (0, 12));
    let ramp = Plane::sloped(
        FixedPoint::ZERO,
        FixedPoint::ZERO,
        FixedPoint::from_int(8),
        FixedPoint::new(FixedPoint::UNIT.raw() / 4),
        FixedPoint::ZERO,
        false,
    );
    open(&mut render, ramp, 1, 160, 0, 63, (21, 23));

    let mut cover = Coverage::new();
    let flats = TestFlats::new();
    render.draw_planes(&view(), &flats, &LightTables::new(), &mut cover);

    for y in 0..HEIGHT {
        for x in 0..WIDTH {
            let expect = y <= 12
                || (21..=23).contains(&y)
                || (x < 32 && y >= 28)
                || (x >= 32 && y >= 24);
            assert_eq!(cover.at(x, y), expect as u32, "pixel {x},{y}");
        }
    }
    assert_eq!(cover.slope_spans, 3);
    // Animated picture 7 was drawn from flat 2
    assert!(cover.sources.contains(&(flats.pixels(2).as_ptr() as usize)));
}

#[test]
fn warped_flat_drawn_from_cache() {
    let mut render = PlaneRender::new(WIDTH, HEIGHT, config()).unwrap();
    let flats = TestFlats::new();
    render.clear_planes();
    open(&mut render, floor(), 3, 160, 0, 63, (30, 39));

    let mut cover = Coverage::new();
    render.draw_planes(&view(), &flats, &LightTables::new(), &mut cover);
    let original = flats.pixels(3).as_ptr() as usize;
    assert!(!cover.sources.is_empty());
    assert!(cover.sources.iter().all(|&s| s != original));
    // one cached copy, every span from it
    let first = cover.sources[0];
    assert!(cover.sources.iter().all(|&s| s == first));
}

#[test]
fn eye_level_plane_draws_nothing() {
    let mut render = PlaneRender::new(WIDTH, HEIGHT, config()).unwrap();
    render.clear_planes();
    open(&mut render, Plane::floor(FixedPoint::from_int(41)), 1, 160, 0, 63, (20, 39));
    let mut cover = Coverage::new();
    render.draw_planes(&view(), &TestFlats::new(), &LightTables::new(), &mut cover);
    assert!(cover.hits.iter().all(|&h| h == 0));
}

#[test]
fn clear_resets_clips_and_planes() {
    let mut render = PlaneRender::new(WIDTH, HEIGHT, config()).unwrap();
    render.floorclip[3] = 7;
    render.ceilingclip[3] = 2;
    open(&mut render, floor(), 1, 160, 0, 9, (30, 39));
    render.clear_planes();
    assert!(render.floorclip.iter().all(|&c| c == HEIGHT as i32));
    assert!(render.ceilingclip.iter().all(|&c| c == -1));
    assert!(render.pool().is_empty());
    render.clear_planes();
    assert!(render.pool().is_empty());

    let mut cover = Coverage::new();
    render.draw_planes(&view(), &TestFlats::new(), &LightTables::new(), &mut cover);
    assert!(cover.hits.iter().all(|&h| h == 0));
}

#[test]
fn resize_rebuilds_tables() {
    let mut render = PlaneRender::new(WIDTH, HEIGHT, config()).unwrap();
    open(&mut render, floor(), 1, 160, 0, 9, (30, 39));
    render.resize(320, 200).unwrap();
    assert_eq!((render.width(), render.height()), (320, 200));
    assert_eq!(render.floorclip.len(), 320);
    assert_eq!(render.projection().yslope.len(), 200);
    assert!(render.pool().is_empty());

    let id = open(&mut render, floor(), 1, 160, 300, 319, (150, 199));
    assert_eq!(render.visplane(id).top.len(), 320);
}

#[test]
fn bad_surfaces_and_config_rejected() {
    assert_eq!(
        PlaneRender::new(0, 200, config()).err(),
        Some(RenderError::InvalidSurface { width: 0, height: 200 })
    );
    let mut render = PlaneRender::new(WIDTH, HEIGHT, config()).unwrap();
    assert!(render.resize(5000, 10).is_err());
    // failed resize keeps the old tables
    assert_eq!(render.width(), WIDTH);

    let config = PlaneConfig {
        visplane_buckets: 100,
        ..config()
    };
    assert_eq!(
        PlaneRender::new(WIDTH, HEIGHT, config).err(),
        Some(RenderError::BucketCount(100))
    );
}
