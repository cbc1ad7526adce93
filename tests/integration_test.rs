//! Integration tests for the split pipeline

use std::fs;
use std::io::Cursor;

use chrono::NaiveDate;
use image::{DynamicImage, GenericImageView, Rgb, RgbImage};
use zip::ZipArchive;

use calsplit::raster::DocumentId;
use calsplit::utils::logger::Logger;
use calsplit::{
    build_plan, ArchiveAssembler, CachingRasterizer, CalendarSplitter, MemoryRasterizer, PageRasterizer, Rect,
    RunConfig, SplitError, SplitResult,
};

const PAGE_WIDTH: u32 = 1780;
const PAGE_HEIGHT: u32 = 1300;

fn band() -> Rect {
    Rect::new(100.0, 140.0, 1680.0, 1160.0)
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Colour painted into a column of a page
fn cell_color(page_index: usize, column_index: usize) -> Rgb<u8> {
    Rgb([page_index as u8, (column_index * 30) as u8, 200])
}

/// Pages whose day columns are painted with `cell_color`
fn calendar_pages(count: usize) -> MemoryRasterizer {
    let band = band();
    let step = band.width() / 7.0;
    let pages = (0..count)
        .map(|page_index| {
            DynamicImage::ImageRgb8(RgbImage::from_fn(PAGE_WIDTH, PAGE_HEIGHT, |x, y| {
                let (x, y) = (x as f64, y as f64);
                if x < band.x0 || x >= band.x1 || y < band.y0 || y >= band.y1 {
                    return Rgb([255, 255, 255]);
                }
                let column_index = (((x - band.x0) / step).floor() as usize).min(6);
                cell_color(page_index, column_index)
            }))
        })
        .collect();
    MemoryRasterizer::new(pages)
}

fn config(anchor: NaiveDate, target_month: u32) -> RunConfig {
    RunConfig {
        target_month,
        anchor,
        band: band(),
        dpi: 150,
    }
}

fn open_archive(bytes: &[u8]) -> ZipArchive<Cursor<Vec<u8>>> {
    ZipArchive::new(Cursor::new(bytes.to_vec())).unwrap()
}

fn read_entry(archive: &mut ZipArchive<Cursor<Vec<u8>>>, name: &str) -> DynamicImage {
    let mut file = archive.by_name(name).unwrap();
    let mut bytes = Vec::new();
    std::io::copy(&mut file, &mut bytes).unwrap();
    image::load_from_memory(&bytes).unwrap()
}

fn center_pixel(image: &DynamicImage) -> Rgb<u8> {
    let (w, h) = image.dimensions();
    *image.to_rgb8().get_pixel(w / 2, h / 2)
}

#[test]
fn test_january_split_end_to_end() {
    let mut rasterizer = calendar_pages(5);
    let plan = build_plan(rasterizer.page_count(), date(2026, 1, 5), &band(), 1).unwrap();

    let report = ArchiveAssembler::new().assemble_zip(&plan, &mut rasterizer, 150).unwrap();

    assert_eq!(report.emitted_count, 27);
    assert_eq!(report.pages_rendered, 4);
    assert_eq!(rasterizer.render_count(), 4);

    let mut archive = open_archive(&report.archive);
    assert_eq!(archive.len(), 27);
    let names: Vec<String> = archive.file_names().map(str::to_string).collect();
    for day in 5..=31 {
        assert!(names.contains(&format!("{}.png", day)), "missing {}.png", day);
    }

    // Jan 5 is page 0 Monday, Jan 31 is page 3 Saturday
    assert_eq!(center_pixel(&read_entry(&mut archive, "5.png")), cell_color(0, 0));
    assert_eq!(center_pixel(&read_entry(&mut archive, "14.png")), cell_color(1, 2));
    assert_eq!(center_pixel(&read_entry(&mut archive, "31.png")), cell_color(3, 5));
}

#[test]
fn test_cell_images_have_column_size() {
    let mut rasterizer = calendar_pages(1);
    let plan = build_plan(1, date(2026, 1, 5), &band(), 1).unwrap();
    let report = ArchiveAssembler::new().assemble_zip(&plan, &mut rasterizer, 150).unwrap();
    let mut archive = open_archive(&report.archive);

    for entry in plan.entries() {
        let image = read_entry(&mut archive, &entry.archive_name());
        let (left, top, right, bottom) = entry.rect.to_pixel_bounds();
        assert_eq!(image.dimensions(), ((right - left) as u32, (bottom - top) as u32));
    }

    // Sunday reaches the band's right edge exactly
    let sunday = read_entry(&mut archive, "11.png");
    let monday = read_entry(&mut archive, "5.png");
    assert!(sunday.width().abs_diff(monday.width()) <= 1);
}

#[test]
fn test_no_matching_month_gives_empty_archive() {
    let mut rasterizer = calendar_pages(5);
    let plan = build_plan(5, date(2026, 1, 5), &band(), 6).unwrap();
    let report = ArchiveAssembler::new().assemble_zip(&plan, &mut rasterizer, 150).unwrap();

    assert_eq!(report.emitted_count, 0);
    assert_eq!(report.pages_rendered, 0);
    assert_eq!(rasterizer.render_count(), 0);
    assert_eq!(open_archive(&report.archive).len(), 0);
}

#[test]
fn test_plan_beyond_document_is_rejected() {
    let mut rasterizer = calendar_pages(3);
    let plan = build_plan(5, date(2026, 1, 5), &band(), 1).unwrap();

    let result = ArchiveAssembler::new().assemble_zip(&plan, &mut rasterizer, 150);
    assert!(matches!(
        result,
        Err(SplitError::PageIndexOutOfRange { page_index: 3, page_count: 3 })
    ));
}

struct BrokenDocument {
    id: DocumentId,
}

impl PageRasterizer for BrokenDocument {
    fn document_id(&self) -> &DocumentId {
        &self.id
    }

    fn page_count(&self) -> usize {
        5
    }

    fn render(&mut self, _page_index: usize, _dpi: u32) -> SplitResult<DynamicImage> {
        Err(SplitError::RenderFailure("corrupt page stream".to_string()))
    }
}

#[test]
fn test_render_failure_aborts_run() {
    let mut rasterizer = BrokenDocument { id: DocumentId::from_bytes(b"broken") };
    let plan = build_plan(5, date(2026, 1, 5), &band(), 1).unwrap();

    let result = ArchiveAssembler::new().assemble_zip(&plan, &mut rasterizer, 150);
    assert!(matches!(result, Err(SplitError::RenderFailure(_))));
}

#[test]
fn test_same_month_of_next_year_overwrites_day_names() {
    // 60 weeks from 2026-01-05 reach into February 2027
    let mut rasterizer = calendar_pages(60);
    let plan = build_plan(60, date(2026, 1, 5), &band(), 1).unwrap();
    let report = ArchiveAssembler::new().assemble_zip(&plan, &mut rasterizer, 150).unwrap();

    assert_eq!(report.emitted_count, 27 + 31);
    let mut archive = open_archive(&report.archive);
    assert_eq!(archive.len(), 31);

    // 2027-01-05 is a Tuesday on page 52
    assert_eq!(center_pixel(&read_entry(&mut archive, "5.png")), cell_color(52, 1));
}

#[test]
fn test_splitter_writes_journal() {
    let dir = tempfile::tempdir().unwrap();
    let journal_path = dir.path().join("journal.log");
    let journal = Logger::new(journal_path.to_str().unwrap()).unwrap();

    let mut rasterizer = calendar_pages(5);
    let outcome = CalendarSplitter::new(&journal)
        .split(&mut rasterizer, &config(date(2026, 1, 5), 1))
        .unwrap();

    assert_eq!(outcome.emitted_count(), 27);
    assert!(!outcome.is_empty());
    assert_eq!(outcome.archive_name, "menu_01.zip");

    let journal_text = fs::read_to_string(&journal_path).unwrap();
    assert!(journal_text.contains("Extraction plan (27 entries):"));
    assert!(journal_text.contains("Date: 2026-01-31"));
    assert!(journal_text.contains("Wrote 27 images for month 1"));
}

#[test]
fn test_splitter_rejects_invalid_config_before_rendering() {
    let journal = Logger::disabled();
    let mut rasterizer = calendar_pages(5);

    let mut bad_band = config(date(2026, 1, 5), 1);
    bad_band.band = Rect::new(1680.0, 140.0, 100.0, 1160.0);
    let result = CalendarSplitter::new(&journal).split(&mut rasterizer, &bad_band);
    assert!(matches!(result, Err(SplitError::InvalidGeometry(_))));

    let mut bad_month = config(date(2026, 1, 5), 1);
    bad_month.target_month = 0;
    let result = CalendarSplitter::new(&journal).split(&mut rasterizer, &bad_month);
    assert!(matches!(result, Err(SplitError::InvalidConfig(_))));

    // Columns of a 3 px band round to nothing
    let mut narrow_band = config(date(2026, 1, 5), 1);
    narrow_band.band = Rect::new(100.0, 140.0, 103.0, 1160.0);
    let result = CalendarSplitter::new(&journal).split(&mut rasterizer, &narrow_band);
    assert!(matches!(result, Err(SplitError::InvalidGeometry(_))));

    assert_eq!(rasterizer.render_count(), 0);
}

#[test]
fn test_empty_outcome_is_not_an_error() {
    let journal = Logger::disabled();
    let mut rasterizer = calendar_pages(5);
    let outcome = CalendarSplitter::new(&journal)
        .split(&mut rasterizer, &config(date(2026, 1, 5), 9))
        .unwrap();

    assert!(outcome.is_empty());
    assert_eq!(outcome.archive_name, "menu_09.zip");
    assert_eq!(open_archive(&outcome.report.archive).len(), 0);
}

#[test]
fn test_preview_then_split_renders_each_page_once() {
    let journal = Logger::disabled();
    let splitter = CalendarSplitter::new(&journal);
    let mut rasterizer = CachingRasterizer::new(calendar_pages(5));
    let run = config(date(2026, 1, 5), 1);

    let preview = splitter.preview(&mut rasterizer, &run, 3).unwrap();
    assert_eq!(preview.cells.len(), 7);
    assert_eq!(preview.cells[6].label, "2/1");
    assert!(!preview.cells[6].selected);
    assert_eq!(preview.band_crop.dimensions(), (1580, 1020));
    assert_eq!(preview.overlay.dimensions(), (PAGE_WIDTH, PAGE_HEIGHT));

    let outcome = splitter.split(&mut rasterizer, &run).unwrap();
    assert_eq!(outcome.emitted_count(), 27);
    assert_eq!(rasterizer.hits(), 1);
    assert_eq!(rasterizer.misses(), 4);
}

#[test]
fn test_preview_page_out_of_range() {
    let journal = Logger::disabled();
    let mut rasterizer = calendar_pages(2);
    let result = CalendarSplitter::new(&journal).preview(&mut rasterizer, &config(date(2026, 1, 5), 1), 2);
    assert!(matches!(result, Err(SplitError::PageIndexOutOfRange { page_index: 2, page_count: 2 })));
}
